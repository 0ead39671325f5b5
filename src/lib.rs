// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar object model, recurrence engine, and validation toolkit.
//!
//! Three cores build on one property graph:
//!
//! - [`CalDate`] models RFC 5545 temporal values at two precisions, DAY
//!   and INSTANT, with zone-aware comparison and arithmetic;
//! - [`RecurrenceRule`] evaluates RFC 5545 recurrence rules over a
//!   caller-supplied window via [`RecurrenceRule::occurrences`] and
//!   [`RecurrenceRule::next_after`];
//! - [`Component::validate`] checks a component graph against the
//!   structural rules of its kind and, when a [`Method`] is supplied,
//!   the iTIP (RFC 5546) scheduling table.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

pub mod component;
mod datetime;
pub mod keyword;
pub mod property;
mod recur;
pub mod validation;
pub mod value;

pub use crate::component::{Component, ComponentKind, Method};
pub use crate::datetime::{CalDate, Precision};
pub use crate::property::{Parameter, Property, PropertyContainer};
pub use crate::validation::{ValidationConfig, ValidationError, Violation, validate};
pub use crate::value::{
    ParseError, RecurrenceFrequency, RecurrenceRule, RuleEnd, RuleError, ValueDate, ValueDateTime,
    ValueDuration, ValueTime, ValueUtcOffset, WeekDay, WeekDayNum,
};
