// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar dates at day or instant precision.
//!
//! RFC 5545 distinguishes DATE values, which name a whole calendar day, from
//! DATE-TIME values, which name an exact instant in some time zone. The two
//! behave differently under arithmetic and comparison, so they stay distinct
//! variants instead of collapsing into a single timestamp.

use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

use jiff::civil;
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use tracing::warn;

use crate::value::{
    ParseError, ValueDuration, parse_date, parse_date_list, parse_date_time, parse_date_time_list,
};

/// Precision of a [`CalDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// A whole calendar day with no time-of-day
    Day,
    /// An exact instant in a specific time zone
    Instant,
}

/// A calendar date at day or instant precision.
///
/// Ordering compares instants by their position on the global timeline and
/// days by calendar order. A mixed comparison truncates the instant to its
/// civil day first, so a day compares equal to any instant that falls on it.
#[derive(Debug, Clone)]
pub enum CalDate {
    /// A whole calendar day
    Day(civil::Date),
    /// An exact instant
    Instant(Zoned),
}

impl CalDate {
    /// Parse a DATE or DATE-TIME value, anchoring floating date-times to `tz`.
    ///
    /// A trailing `Z` yields a UTC instant regardless of `tz`.
    ///
    /// # Errors
    ///
    /// Fails when the input matches neither grammar, or when the civil
    /// date-time cannot be resolved in `tz`.
    pub fn parse(src: &str, tz: &TimeZone) -> Result<Self, ParseError> {
        if src.contains('T') {
            let dt = parse_date_time(src)?;
            let civil = dt
                .civil()
                .map_err(|e| ParseError::invalid("DATE-TIME", src, e))?;
            let tz = if dt.time.utc { &TimeZone::UTC } else { tz };
            let zoned =
                resolve_civil(civil, tz).map_err(|e| ParseError::invalid("DATE-TIME", src, e))?;
            Ok(CalDate::Instant(zoned))
        } else {
            let date = parse_date(src)?;
            let civil = date
                .civil()
                .map_err(|e| ParseError::invalid("DATE", src, e))?;
            Ok(CalDate::Day(civil))
        }
    }

    /// Parse a comma-separated list of DATE or DATE-TIME values, as
    /// carried by EXDATE and RDATE. A property value is homogeneous, so
    /// the grammar is chosen once for the whole list.
    ///
    /// # Errors
    ///
    /// Fails when any element is malformed or cannot be resolved in `tz`.
    pub fn parse_list(src: &str, tz: &TimeZone) -> Result<Vec<Self>, ParseError> {
        if src.contains('T') {
            parse_date_time_list(src)?
                .into_iter()
                .map(|dt| {
                    let civil = dt
                        .civil()
                        .map_err(|e| ParseError::invalid("DATE-TIME", src, e))?;
                    let tz = if dt.time.utc { &TimeZone::UTC } else { tz };
                    let zoned = resolve_civil(civil, tz)
                        .map_err(|e| ParseError::invalid("DATE-TIME", src, e))?;
                    Ok(CalDate::Instant(zoned))
                })
                .collect()
        } else {
            parse_date_list(src)?
                .into_iter()
                .map(|date| {
                    let civil = date.civil().map_err(|e| ParseError::invalid("DATE", src, e))?;
                    Ok(CalDate::Day(civil))
                })
                .collect()
        }
    }

    /// An instant from a Unix timestamp in the given zone.
    ///
    /// # Errors
    ///
    /// Fails when `seconds` is outside the representable timestamp range.
    pub fn from_epoch_seconds(seconds: i64, tz: &TimeZone) -> Result<Self, jiff::Error> {
        let ts = Timestamp::from_second(seconds)?;
        Ok(CalDate::Instant(ts.to_zoned(tz.clone())))
    }

    /// An instant from civil parts resolved in the given zone.
    ///
    /// # Errors
    ///
    /// Fails when the civil date-time cannot be placed in `tz`.
    pub fn from_civil(dt: civil::DateTime, tz: &TimeZone) -> Result<Self, jiff::Error> {
        Ok(CalDate::Instant(resolve_civil(dt, tz)?))
    }

    /// The current instant in the given zone.
    #[must_use]
    pub fn now_in(tz: &TimeZone) -> Self {
        CalDate::Instant(Timestamp::now().to_zoned(tz.clone()))
    }

    /// The precision of this value.
    #[must_use]
    pub const fn precision(&self) -> Precision {
        match self {
            CalDate::Day(_) => Precision::Day,
            CalDate::Instant(_) => Precision::Instant,
        }
    }

    /// The civil calendar day, truncating instants to their local date.
    #[must_use]
    pub fn date(&self) -> civil::Date {
        match self {
            CalDate::Day(date) => *date,
            CalDate::Instant(zoned) => zoned.date(),
        }
    }

    /// Truncate to day precision.
    #[must_use]
    pub fn to_day(&self) -> Self {
        CalDate::Day(self.date())
    }

    /// The UTC offset in minutes, or `None` for day-precision values.
    #[must_use]
    pub fn offset_minutes(&self) -> Option<i32> {
        match self {
            CalDate::Day(_) => None,
            CalDate::Instant(zoned) => Some(zoned.offset().seconds() / 60),
        }
    }

    /// The time zone, or `None` for day-precision values.
    #[must_use]
    pub fn time_zone(&self) -> Option<&TimeZone> {
        match self {
            CalDate::Day(_) => None,
            CalDate::Instant(zoned) => Some(zoned.time_zone()),
        }
    }

    /// Shift by a duration.
    ///
    /// Day-precision values move through midnight of their zone-less day and
    /// truncate back afterwards, so adding `PT1H` to a day yields the same
    /// day. Instants shift on the timeline of their zone, which means adding
    /// `P1D` across a DST transition keeps the local clock time while the
    /// absolute gap may be 23 or 25 hours.
    ///
    /// # Errors
    ///
    /// Fails when the shifted value falls outside the representable range.
    pub fn add(&self, duration: &ValueDuration) -> Result<Self, jiff::Error> {
        let span = duration.to_span()?;
        match self {
            CalDate::Day(date) => {
                let midnight = date.to_datetime(civil::Time::midnight());
                Ok(CalDate::Day(midnight.checked_add(span)?.date()))
            }
            CalDate::Instant(zoned) => Ok(CalDate::Instant(zoned.checked_add(span)?)),
        }
    }
}

impl Display for CalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalDate::Day(date) => {
                write!(
                    f,
                    "{:04}{:02}{:02}",
                    date.year(),
                    date.month(),
                    date.day()
                )
            }
            CalDate::Instant(zoned) => {
                let dt = zoned.datetime();
                write!(
                    f,
                    "{:04}{:02}{:02}T{:02}{:02}{:02}",
                    dt.year(),
                    dt.month(),
                    dt.day(),
                    dt.hour(),
                    dt.minute(),
                    dt.second()
                )?;
                if zoned.time_zone().iana_name() == Some("UTC") {
                    write!(f, "Z")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for CalDate {
    type Err = ParseError;

    /// Parse with floating date-times anchored to UTC.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        CalDate::parse(src, &TimeZone::UTC)
    }
}

impl From<civil::Date> for CalDate {
    fn from(date: civil::Date) -> Self {
        CalDate::Day(date)
    }
}

impl From<Zoned> for CalDate {
    fn from(zoned: Zoned) -> Self {
        CalDate::Instant(zoned)
    }
}

impl PartialEq for CalDate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CalDate {}

impl PartialOrd for CalDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalDate {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CalDate::Day(a), CalDate::Day(b)) => a.cmp(b),
            (CalDate::Instant(a), CalDate::Instant(b)) => a.timestamp().cmp(&b.timestamp()),
            // Mixed precision compares at day granularity.
            (CalDate::Day(a), CalDate::Instant(b)) => a.cmp(&b.date()),
            (CalDate::Instant(a), CalDate::Day(b)) => a.date().cmp(b),
        }
    }
}

/// Resolve a civil date-time in a zone, warning when DST folds or gaps move
/// the wall clock away from what was written.
pub(crate) fn resolve_civil(dt: civil::DateTime, tz: &TimeZone) -> Result<Zoned, jiff::Error> {
    let zoned = tz.to_ambiguous_zoned(dt).compatible()?;
    if zoned.datetime() != dt {
        warn!(
            requested = %dt,
            resolved = %zoned,
            "civil time does not exist in zone, shifted by transition"
        );
    }
    Ok(zoned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tz(name: &str) -> TimeZone {
        TimeZone::get(name).unwrap()
    }

    #[test]
    fn parses_day_and_instant() {
        let day = CalDate::parse("20170101", &TimeZone::UTC).unwrap();
        assert_eq!(day.precision(), Precision::Day);
        assert_eq!(day.date(), civil::date(2017, 1, 1));
        assert_eq!(day.offset_minutes(), None);

        let utc = CalDate::parse("20170101T120000Z", &tz("America/New_York")).unwrap();
        assert_eq!(utc.precision(), Precision::Instant);
        assert_eq!(utc.offset_minutes(), Some(0));
        assert_eq!(utc.to_string(), "20170101T120000Z");

        let local = CalDate::parse("20170101T120000", &tz("America/New_York")).unwrap();
        assert_eq!(local.offset_minutes(), Some(-5 * 60));
        assert_eq!(local.to_string(), "20170101T120000");

        assert!(CalDate::parse("20170101T", &TimeZone::UTC).is_err());
        assert!(CalDate::parse("2017-01-01", &TimeZone::UTC).is_err());
    }

    #[test]
    fn from_str_anchors_to_utc() {
        let date: CalDate = "20170315T083000".parse().unwrap();
        assert_eq!(date.offset_minutes(), Some(0));
    }

    #[test]
    fn orders_instants_on_the_timeline() {
        let early = CalDate::parse("20170101T060000", &tz("America/New_York")).unwrap();
        let late = CalDate::parse("20170101T120000Z", &TimeZone::UTC).unwrap();
        // 06:00-0500 is 11:00Z
        assert!(early < late);
    }

    #[test]
    fn mixed_precision_compares_at_day_granularity() {
        let day = CalDate::Day(civil::date(2017, 1, 1));
        let morning = CalDate::parse("20170101T083000Z", &TimeZone::UTC).unwrap();
        let next = CalDate::parse("20170102T000000Z", &TimeZone::UTC).unwrap();
        assert_eq!(day, morning);
        assert!(day < next);
    }

    #[test]
    fn day_arithmetic_ignores_sub_day_components() {
        let day = CalDate::Day(civil::date(2017, 1, 1));
        let shifted = day
            .add(&crate::value::parse_duration("PT1H").unwrap())
            .unwrap();
        assert_eq!(shifted, CalDate::Day(civil::date(2017, 1, 1)));

        let shifted = day
            .add(&crate::value::parse_duration("P1DT1H").unwrap())
            .unwrap();
        assert_eq!(shifted, CalDate::Day(civil::date(2017, 1, 2)));
    }

    #[test]
    fn instant_arithmetic_preserves_local_clock_across_dst() {
        // 2017-03-12 02:00 EST -> EDT, the day is 23 absolute hours long
        let ny = tz("America/New_York");
        let before = CalDate::parse("20170311T090000", &ny).unwrap();
        let after = before
            .add(&crate::value::parse_duration("P1D").unwrap())
            .unwrap();
        assert_eq!(after.to_string(), "20170312T090000");
        assert_eq!(before.offset_minutes(), Some(-5 * 60));
        assert_eq!(after.offset_minutes(), Some(-4 * 60));
    }

    #[test]
    fn epoch_seconds_lands_in_requested_zone() {
        let date = CalDate::from_epoch_seconds(1_483_272_000, &tz("America/New_York")).unwrap();
        // 2017-01-01T12:00:00Z is 07:00 in New York
        assert_eq!(date.to_string(), "20170101T070000");
    }

    #[test]
    fn nonexistent_local_time_shifts_forward() {
        // 02:30 does not exist on the spring-forward day
        let ny = tz("America/New_York");
        let date = CalDate::parse("20170312T023000", &ny).unwrap();
        assert_eq!(date.to_string(), "20170312T033000");
    }
}
