// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type as defined in RFC 5545 Section 3.3.6.

use std::fmt::{self, Display};

use chumsky::extra::ParserExtra;
use chumsky::input::Input;
use chumsky::label::LabelError;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::value::miscellaneous::{ValueExpected, u32_value};

/// Duration Value defined in RFC 5545 Section 3.3.6.
///
/// The two forms are mutually exclusive by grammar: a week-form duration
/// never carries day or time fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueDuration {
    /// Date and Time Duration
    DateTime {
        /// Whether the duration is positive
        positive: bool,
        /// Day Duration
        day: u32,
        /// Hour Duration
        hour: u32,
        /// Minute Duration
        minute: u32,
        /// Second Duration
        second: u32,
    },

    /// Week Duration
    Week {
        /// Whether the duration is positive
        positive: bool,
        /// Week Duration
        week: u32,
    },
}

impl ValueDuration {
    /// A duration of the given number of whole weeks.
    #[must_use]
    pub const fn weeks(week: u32) -> Self {
        ValueDuration::Week {
            positive: true,
            week,
        }
    }

    /// A duration of the given number of whole days.
    #[must_use]
    pub const fn days(day: u32) -> Self {
        ValueDuration::DateTime {
            positive: true,
            day,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    /// Whether the duration points forward in time.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        match self {
            ValueDuration::DateTime { positive, .. } | ValueDuration::Week { positive, .. } => {
                positive
            }
        }
    }

    /// The same duration pointing the other way.
    #[must_use]
    pub const fn negated(self) -> Self {
        match self {
            ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            } => ValueDuration::DateTime {
                positive: !positive,
                day,
                hour,
                minute,
                second,
            },
            ValueDuration::Week { positive, week } => ValueDuration::Week {
                positive: !positive,
                week,
            },
        }
    }

    /// Convert to a `jiff::Span` suitable for calendar arithmetic.
    ///
    /// # Errors
    ///
    /// Fails when a unit exceeds the range `jiff::Span` can represent.
    pub fn to_span(self) -> Result<jiff::Span, jiff::Error> {
        let span = match self {
            ValueDuration::Week { week, .. } => jiff::Span::new().try_weeks(i64::from(week))?,
            ValueDuration::DateTime {
                day,
                hour,
                minute,
                second,
                ..
            } => jiff::Span::new()
                .try_days(i64::from(day))?
                .try_hours(i64::from(hour))?
                .try_minutes(i64::from(minute))?
                .try_seconds(i64::from(second))?,
        };
        Ok(if self.is_positive() {
            span
        } else {
            span.negate()
        })
    }
}

impl Display for ValueDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_positive() {
            write!(f, "-")?;
        }
        write!(f, "P")?;
        match *self {
            ValueDuration::Week { week, .. } => write!(f, "{week}W"),
            ValueDuration::DateTime {
                day,
                hour,
                minute,
                second,
                ..
            } => {
                if day > 0 {
                    write!(f, "{day}D")?;
                }
                if hour > 0 || minute > 0 || second > 0 || day == 0 {
                    write!(f, "T")?;
                    if hour > 0 {
                        write!(f, "{hour}H")?;
                    }
                    // the grammar only reaches seconds through minutes
                    if minute > 0 || (hour > 0 && second > 0) {
                        write!(f, "{minute}M")?;
                    }
                    if second > 0 || (hour == 0 && minute == 0) {
                        write!(f, "{second}S")?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Format Definition:  This value type is defined by the following notation:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
pub(crate) fn value_duration<'src, I, E>() -> impl Parser<'src, I, ValueDuration, E>
where
    I: Input<'src, Token = char, Span = SimpleSpan>,
    E: ParserExtra<'src, I>,
    E::Error: LabelError<'src, I, ValueExpected>,
{
    // case-sensitive
    let int = u32_value();

    let week = int.then_ignore(just('W'));

    let second_val = int.then_ignore(just('S'));
    let minute_val = int.then_ignore(just('M'));
    let hour_val = int.then_ignore(just('H'));

    // dur-second = 1*DIGIT "S"
    let second_only = second_val.map(|s| (0, 0, s));

    // dur-minute = 1*DIGIT "M" [dur-second]
    let minute_with_second = minute_val
        .then(second_val.or_not())
        .map(|(m, s)| (0, m, s.unwrap_or(0)));

    // dur-hour = 1*DIGIT "H" [dur-minute]
    let hour_with_minute = hour_val
        .then(minute_val.then(second_val.or_not()).or_not())
        .map(|(h, opt_ms)| match opt_ms {
            Some((m, opt_s)) => (h, m, opt_s.unwrap_or(0)),
            None => (h, 0, 0),
        });

    // dur-time = "T" (dur-hour / dur-minute / dur-second)
    let time = just('T').ignore_then(choice((hour_with_minute, minute_with_second, second_only)));

    let day = int.then_ignore(just('D'));
    let date = day.then(time.or_not());

    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|sign| !matches!(sign, Some('-')));
    let prefix = sign.then_ignore(just('P'));
    choice((
        prefix.then(date).map(|(positive, (day, time))| {
            let (hour, minute, second) = time.unwrap_or((0, 0, 0));
            ValueDuration::DateTime {
                positive,
                day,
                hour,
                minute,
                second,
            }
        }),
        prefix
            .then(time)
            .map(|(positive, (h, m, s))| ValueDuration::DateTime {
                positive,
                day: 0,
                hour: h,
                minute: m,
                second: s,
            }),
        prefix
            .then(week)
            .map(|(positive, week)| ValueDuration::Week { positive, week }),
    ))
}
