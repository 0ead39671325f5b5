// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Value type parsing module for iCalendar property values.
//!
//! This module handles the parsing and validation of iCalendar value types
//! as defined in RFC 5545 Section 3.3.

mod datetime;
mod duration;
mod miscellaneous;
mod rrule;

use std::fmt::Write as _;

use chumsky::input::Stream;
use chumsky::prelude::*;
use thiserror::Error;

pub use datetime::{ValueDate, ValueDateTime, ValueTime, ValueUtcOffset};
pub use duration::ValueDuration;
pub use rrule::{RecurrenceFrequency, RecurrenceRule, RuleEnd, RuleError, WeekDay, WeekDayNum};

use crate::value::datetime::{
    value_date, value_date_time, value_utc_offset, values_date, values_date_time,
};
use crate::value::duration::value_duration;
use crate::value::rrule::value_rrule;

/// Error produced when a property value does not match its grammar.
///
/// Owns its input so it can outlive the source string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed {expected} value {src:?}: {reason}")]
pub struct ParseError {
    /// Name of the value type that was expected
    pub expected: &'static str,
    /// The offending input
    pub src: String,
    /// Grammar-level reason, derived from the first parse error
    pub reason: String,
}

impl ParseError {
    pub(crate) fn invalid(expected: &'static str, src: &str, reason: impl std::fmt::Display) -> Self {
        ParseError {
            expected,
            src: src.to_owned(),
            reason: reason.to_string(),
        }
    }

    fn new(expected: &'static str, src: &str, errors: &[Rich<'_, char>]) -> Self {
        let mut reason = String::new();
        if let Some(first) = errors.first() {
            let _ = write!(reason, "{first}");
        } else {
            reason.push_str("unknown error");
        }
        ParseError {
            expected,
            src: src.to_owned(),
            reason,
        }
    }
}

/// Parse a DATE value, e.g. `19970714`.
///
/// # Errors
///
/// Fails when the input is not a valid calendar day in `yyyyMMdd` form.
pub fn parse_date(src: &str) -> Result<ValueDate, ParseError> {
    value_date::<'_, _, extra::Err<Rich<'_, char>>>()
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| ParseError::new("DATE", src, &errs))
}

/// Parse a comma-separated list of DATE values.
///
/// # Errors
///
/// Fails when any element of the list is malformed.
pub fn parse_date_list(src: &str) -> Result<Vec<ValueDate>, ParseError> {
    values_date::<'_, _, extra::Err<Rich<'_, char>>>()
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| ParseError::new("DATE", src, &errs))
}

/// Parse a DATE-TIME value, e.g. `19980119T070000Z`.
///
/// # Errors
///
/// Fails when the input is not a valid `yyyyMMddTHHmmss[Z]` date-time.
pub fn parse_date_time(src: &str) -> Result<ValueDateTime, ParseError> {
    value_date_time::<'_, _, extra::Err<Rich<'_, char>>>()
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| ParseError::new("DATE-TIME", src, &errs))
}

/// Parse a comma-separated list of DATE-TIME values.
///
/// # Errors
///
/// Fails when any element of the list is malformed.
pub fn parse_date_time_list(src: &str) -> Result<Vec<ValueDateTime>, ParseError> {
    values_date_time::<'_, _, extra::Err<Rich<'_, char>>>()
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| ParseError::new("DATE-TIME", src, &errs))
}

/// Parse a DURATION value, e.g. `P15DT5H0M20S` or `-P2W`.
///
/// # Errors
///
/// Fails when the input is not a valid RFC 5545 duration.
pub fn parse_duration(src: &str) -> Result<ValueDuration, ParseError> {
    value_duration::<'_, _, extra::Err<Rich<'_, char>>>()
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| ParseError::new("DURATION", src, &errs))
}

/// Parse a RECUR value, e.g. `FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=6`.
///
/// # Errors
///
/// Fails when a part is malformed, FREQ is missing, a part occurs twice,
/// or COUNT and UNTIL occur together.
pub fn parse_rrule(src: &str) -> Result<RecurrenceRule, ParseError> {
    value_rrule::<'_, _, extra::Err<Rich<'_, char>>>()
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| ParseError::new("RECUR", src, &errs))
}

/// Parse a UTC-OFFSET value, e.g. `-0500`.
///
/// # Errors
///
/// Fails when the input is not a valid signed offset.
pub fn parse_utc_offset(src: &str) -> Result<ValueUtcOffset, ParseError> {
    value_utc_offset::<'_, _, extra::Err<Rich<'_, char>>>()
        .parse(Stream::from_iter(src.chars()))
        .into_result()
        .map_err(|errs| ParseError::new("UTC-OFFSET", src, &errs))
}
