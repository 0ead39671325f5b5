// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence expansion as defined in RFC 5545 Section 3.8.5.3.
//!
//! The engine walks whole periods of `freq * interval` starting at the seed,
//! generates the candidate days of each period, intersects every BY part as
//! a filter, applies BYSETPOS, and emits candidates at or after the seed in
//! ascending order. An empty period is routine and simply advances the
//! cursor. Emission precision follows the seed: a day seed yields days, an
//! instant seed yields instants in the seed's zone carrying the seed's time
//! of day.

use jiff::Span;
use jiff::civil::{Date, DateTime, Time, Weekday};
use jiff::tz::TimeZone;
use tracing::warn;

use crate::datetime::{CalDate, resolve_civil};
use crate::value::{RecurrenceFrequency, RecurrenceRule, RuleEnd, WeekDay, WeekDayNum};

impl RecurrenceRule {
    /// All occurrences within `[window_start, window_end]`, both inclusive.
    ///
    /// The result is finite, strictly ascending, and duplicate-free. COUNT
    /// counts occurrences from the seed onward, so a window that starts
    /// after the seed still consumes the budget of the occurrences it
    /// skips over.
    #[must_use]
    pub fn occurrences(
        &self,
        seed: &CalDate,
        window_start: &CalDate,
        window_end: &CalDate,
    ) -> Vec<CalDate> {
        let mut out = Vec::new();
        let horizon = window_end
            .date()
            .checked_add(Span::new().days(1))
            .unwrap_or_else(|_| window_end.date());
        self.scan(seed, Some(horizon), |occ| {
            if occ > window_end {
                return false;
            }
            if occ >= window_start {
                out.push(occ.clone());
            }
            true
        });
        out
    }

    /// The first occurrence strictly after `after`, or `None` once the
    /// rule's terminator binds.
    ///
    /// An unbounded rule is scanned to the end of the representable
    /// calendar before giving up.
    #[must_use]
    pub fn next_after(&self, seed: &CalDate, after: &CalDate) -> Option<CalDate> {
        let mut found = None;
        self.scan(seed, None, |occ| {
            if occ > after {
                found = Some(occ.clone());
                return false;
            }
            true
        });
        found
    }

    /// Walk periods from the seed, feeding each occurrence at or after the
    /// seed to `visit` in ascending order until `visit` declines, the
    /// terminator binds, or the period floor passes `horizon`.
    fn scan(&self, seed: &CalDate, horizon: Option<Date>, mut visit: impl FnMut(&CalDate) -> bool) {
        let seed_dt = match seed {
            CalDate::Day(date) => date.to_datetime(Time::midnight()),
            CalDate::Instant(zoned) => zoned.datetime(),
        };
        let until = self.until_bound(seed);
        let horizon = match (horizon, &until) {
            (Some(h), Some(u)) => Some(h.min(u.date())),
            (Some(h), None) => Some(h),
            (None, Some(u)) => Some(u.date()),
            (None, None) => None,
        };

        let mut emitted: u32 = 0;
        let mut last: Option<CalDate> = None;

        for k in 0.. {
            let Some((floor, mut candidates)) = self.expand_period(seed_dt, k) else {
                return;
            };
            if let Some(horizon) = horizon {
                // week 1 of a year can reach back into late December
                if floor > horizon.saturating_add(Span::new().days(7)) {
                    return;
                }
            }

            candidates.retain(|dt| self.matches(*dt));
            candidates.sort_unstable();
            candidates.dedup();
            self.apply_set_pos(&mut candidates);

            for dt in candidates {
                let Some(occ) = materialize(dt, seed) else {
                    continue;
                };
                if occ < *seed {
                    continue;
                }
                if last.as_ref().is_some_and(|prev| occ <= *prev) {
                    continue;
                }
                if until.as_ref().is_some_and(|u| occ > *u) {
                    return;
                }
                if let Some(count) = self.count {
                    emitted += 1;
                    if emitted > count {
                        return;
                    }
                }
                let keep_going = visit(&occ);
                last = Some(occ);
                if !keep_going {
                    return;
                }
            }
        }
    }

    /// The candidate days of period `k`, untimed filters not yet applied.
    ///
    /// Returns the period floor (no candidate can precede it by more than a
    /// week) together with the candidates carrying the seed's time of day.
    /// `None` means the period fell off the representable calendar.
    fn expand_period(&self, seed_dt: DateTime, k: i64) -> Option<(Date, Vec<DateTime>)> {
        let interval = i64::from(self.interval);
        let seed_date = seed_dt.date();
        let time = seed_dt.time();

        let (floor, dates): (Date, Vec<Date>) = match self.freq {
            RecurrenceFrequency::Yearly => {
                let year =
                    i16::try_from(i64::from(seed_date.year()).checked_add(interval.checked_mul(k)?)?)
                        .ok()?;
                let jan1 = Date::new(year, 1, 1).ok()?;
                if self.expands_days() {
                    return Some((jan1, attach(all_days_of_year(jan1), time)));
                }
                let months: Vec<i8> = if self.by_month.is_empty() {
                    vec![seed_date.month()]
                } else {
                    self.by_month
                        .iter()
                        .filter_map(|&m| i8::try_from(m).ok())
                        .collect()
                };
                let dates = months
                    .into_iter()
                    .filter_map(|m| Date::new(year, m, seed_date.day()).ok())
                    .collect();
                (jan1, dates)
            }
            RecurrenceFrequency::Monthly => {
                let index = (i64::from(seed_date.year()) * 12 + i64::from(seed_date.month() - 1))
                    .checked_add(interval.checked_mul(k)?)?;
                let year = i16::try_from(index.div_euclid(12)).ok()?;
                #[expect(clippy::cast_possible_truncation)]
                let month = (index.rem_euclid(12) + 1) as i8;
                let first = Date::new(year, month, 1).ok()?;
                if self.expands_days() {
                    let dates = (1..=first.days_in_month())
                        .filter_map(|d| Date::new(year, month, d).ok())
                        .collect();
                    (first, dates)
                } else {
                    let dates = Date::new(year, month, seed_date.day())
                        .ok()
                        .into_iter()
                        .collect();
                    (first, dates)
                }
            }
            RecurrenceFrequency::Weekly => {
                let step = 7i64.checked_mul(interval)?.checked_mul(k)?;
                let anchor = seed_date
                    .checked_add(Span::new().try_days(step).ok()?)
                    .ok()?;
                let start = week_start(anchor, self.wkst)?;
                if self.by_day.is_empty() {
                    (start, vec![anchor])
                } else {
                    let dates = (0..7)
                        .filter_map(|d| start.checked_add(Span::new().days(d)).ok())
                        .collect();
                    (start, dates)
                }
            }
            RecurrenceFrequency::Daily => {
                let date = seed_date
                    .checked_add(Span::new().try_days(interval.checked_mul(k)?).ok()?)
                    .ok()?;
                (date, vec![date])
            }
            RecurrenceFrequency::Hourly
            | RecurrenceFrequency::Minutely
            | RecurrenceFrequency::Secondly => {
                let step = interval.checked_mul(k)?;
                let span = match self.freq {
                    RecurrenceFrequency::Hourly => Span::new().try_hours(step),
                    RecurrenceFrequency::Minutely => Span::new().try_minutes(step),
                    _ => Span::new().try_seconds(step),
                }
                .ok()?;
                let cursor = seed_dt.checked_add(span).ok()?;
                return Some((cursor.date(), vec![cursor]));
            }
        };

        Some((floor, attach(dates, time)))
    }

    /// Whether any BY part determines the day, switching the period to full
    /// expansion instead of the seed-aligned default day.
    fn expands_days(&self) -> bool {
        match self.freq {
            RecurrenceFrequency::Yearly => {
                !self.by_month_day.is_empty()
                    || !self.by_year_day.is_empty()
                    || !self.by_week_no.is_empty()
                    || !self.by_day.is_empty()
            }
            RecurrenceFrequency::Monthly => {
                !self.by_month_day.is_empty() || !self.by_day.is_empty()
            }
            _ => false,
        }
    }

    /// Intersect every BY part as a filter over one candidate.
    fn matches(&self, dt: DateTime) -> bool {
        let date = dt.date();

        #[expect(clippy::cast_sign_loss)]
        if !self.by_month.is_empty() && !self.by_month.contains(&(date.month() as u8)) {
            return false;
        }
        if !self.by_month_day.is_empty() {
            let days_in_month = date.days_in_month();
            let hit = self
                .by_month_day
                .iter()
                .any(|&d| resolve_ordinal(i16::from(d), i16::from(days_in_month))
                    == Some(i16::from(date.day())));
            if !hit {
                return false;
            }
        }
        if !self.by_year_day.is_empty() {
            let days_in_year = date.days_in_year();
            let hit = self
                .by_year_day
                .iter()
                .any(|&d| resolve_ordinal(d, days_in_year) == Some(date.day_of_year()));
            if !hit {
                return false;
            }
        }
        if !self.by_week_no.is_empty() && !self.matches_week_no(date) {
            return false;
        }
        if !self.by_day.is_empty() && !self.by_day.iter().any(|wd| self.matches_week_day(date, *wd))
        {
            return false;
        }

        #[expect(clippy::cast_sign_loss)]
        {
            if !self.by_hour.is_empty() && !self.by_hour.contains(&(dt.hour() as u8)) {
                return false;
            }
            if !self.by_minute.is_empty() && !self.by_minute.contains(&(dt.minute() as u8)) {
                return false;
            }
            if !self.by_second.is_empty() && !self.by_second.contains(&(dt.second() as u8)) {
                return false;
            }
        }
        true
    }

    fn matches_week_no(&self, date: Date) -> bool {
        let Some((week_year, week)) = week_number(date, self.wkst) else {
            return false;
        };
        let Some(weeks) = weeks_in_year(week_year, self.wkst) else {
            return false;
        };
        self.by_week_no
            .iter()
            .any(|&w| resolve_ordinal(i16::from(w), i16::from(weeks)) == Some(i16::from(week)))
    }

    fn matches_week_day(&self, date: Date, spec: WeekDayNum) -> bool {
        let weekday = Weekday::from(spec.day);
        if date.weekday() != weekday {
            return false;
        }
        let Some(nth) = spec.occurrence else {
            return true;
        };
        // Ordinals scope to the month for MONTHLY (and YEARLY narrowed by
        // BYMONTH), to the year for bare YEARLY, and are meaningless at
        // finer frequencies.
        match self.freq {
            RecurrenceFrequency::Monthly => nth_weekday_of_month(date, nth, weekday) == Some(date),
            RecurrenceFrequency::Yearly if !self.by_month.is_empty() => {
                nth_weekday_of_month(date, nth, weekday) == Some(date)
            }
            RecurrenceFrequency::Yearly => {
                nth_weekday_of_year(date.year(), nth, weekday) == Some(date)
            }
            _ => true,
        }
    }

    /// Select by 1-based position within the period's sorted candidate set.
    fn apply_set_pos(&self, candidates: &mut Vec<DateTime>) {
        if self.by_set_pos.is_empty() || candidates.is_empty() {
            return;
        }
        let len = i64::try_from(candidates.len()).unwrap_or(i64::MAX);
        let mut picked: Vec<DateTime> = self
            .by_set_pos
            .iter()
            .filter_map(|&pos| {
                let index = if pos > 0 {
                    i64::from(pos) - 1
                } else {
                    len + i64::from(pos)
                };
                usize::try_from(index)
                    .ok()
                    .and_then(|i| candidates.get(i).copied())
            })
            .collect();
        picked.sort_unstable();
        picked.dedup();
        *candidates = picked;
    }

    /// The UNTIL bound as written: a date bounds at day granularity even
    /// against an instant seed, a date-time is taken as UTC when written
    /// with `Z` and otherwise anchored to the seed's zone (truncated to a
    /// day for a day seed).
    fn until_bound(&self, seed: &CalDate) -> Option<CalDate> {
        let until = match self.until? {
            RuleEnd::Date(date) => return Some(CalDate::Day(date.civil().ok()?)),
            RuleEnd::DateTime(until) => until,
        };
        let date = until.date.civil().ok()?;
        match seed {
            CalDate::Day(_) => Some(CalDate::Day(date)),
            CalDate::Instant(zoned) => {
                let dt = date.to_datetime(until.time.civil().ok()?);
                let tz = if until.time.utc {
                    TimeZone::UTC
                } else {
                    zoned.time_zone().clone()
                };
                match resolve_civil(dt, &tz) {
                    Ok(z) => Some(CalDate::Instant(z)),
                    Err(err) => {
                        warn!(%dt, %err, "unresolvable UNTIL bound, rule treated as unbounded");
                        None
                    }
                }
            }
        }
    }
}

/// A candidate at the seed's precision, in the seed's zone.
fn materialize(dt: DateTime, seed: &CalDate) -> Option<CalDate> {
    match seed {
        CalDate::Day(_) => Some(CalDate::Day(dt.date())),
        CalDate::Instant(zoned) => match resolve_civil(dt, zoned.time_zone()) {
            Ok(z) => Some(CalDate::Instant(z)),
            Err(err) => {
                warn!(%dt, %err, "candidate does not resolve in seed zone, skipped");
                None
            }
        },
    }
}

fn attach(dates: Vec<Date>, time: Time) -> Vec<DateTime> {
    dates.into_iter().map(|d| d.to_datetime(time)).collect()
}

fn all_days_of_year(jan1: Date) -> Vec<Date> {
    let mut dates = Vec::with_capacity(366);
    let mut date = jan1;
    loop {
        dates.push(date);
        match date.tomorrow() {
            Ok(next) if next.year() == jan1.year() => date = next,
            _ => break,
        }
    }
    dates
}

/// Resolve a possibly negative 1-based ordinal against a period length.
fn resolve_ordinal(ordinal: i16, len: i16) -> Option<i16> {
    if ordinal > 0 && ordinal <= len {
        Some(ordinal)
    } else if ordinal < 0 && -ordinal <= len {
        Some(len + 1 + ordinal)
    } else {
        None
    }
}

/// The first day of the week containing `date`, per the configured start.
fn week_start(date: Date, wkst: WeekDay) -> Option<Date> {
    let offset = i64::from(
        (date.weekday().to_monday_zero_offset()
            - Weekday::from(wkst).to_monday_zero_offset())
        .rem_euclid(7),
    );
    date.checked_add(Span::new().days(-offset)).ok()
}

/// The start of week 1: the week containing January 1st when at least four
/// of its days fall in the new year, otherwise the week after.
fn week1_start(year: i16, wkst: WeekDay) -> Option<Date> {
    let jan1 = Date::new(year, 1, 1).ok()?;
    let start = week_start(jan1, wkst)?;
    let days_before_jan1 = jan1.since(start).ok()?.get_days();
    if days_before_jan1 <= 3 {
        Some(start)
    } else {
        start.checked_add(Span::new().days(7)).ok()
    }
}

fn weeks_in_year(year: i16, wkst: WeekDay) -> Option<i8> {
    let this = week1_start(year, wkst)?;
    let next = week1_start(year.checked_add(1)?, wkst)?;
    i8::try_from(next.since(this).ok()?.get_days() / 7).ok()
}

/// The week-numbering year and week of `date`, majority-day rule.
fn week_number(date: Date, wkst: WeekDay) -> Option<(i16, i8)> {
    let start = week_start(date, wkst)?;
    let probe = start.checked_add(Span::new().days(3)).ok()?;
    let week_year = probe.year();
    let w1 = week1_start(week_year, wkst)?;
    let week = i8::try_from(start.since(w1).ok()?.get_days() / 7 + 1).ok()?;
    Some((week_year, week))
}

/// The nth weekday of the candidate's month, negative from the end.
fn nth_weekday_of_month(date: Date, nth: i8, weekday: Weekday) -> Option<Date> {
    let (first, last) = (date.first_of_month(), date.last_of_month());
    nth_weekday_in_range(first, last, nth, weekday)
}

/// The nth weekday of the year, negative from the end.
fn nth_weekday_of_year(year: i16, nth: i8, weekday: Weekday) -> Option<Date> {
    let first = Date::new(year, 1, 1).ok()?;
    let last = first.last_of_year();
    nth_weekday_in_range(first, last, nth, weekday)
}

fn nth_weekday_in_range(first: Date, last: Date, nth: i8, weekday: Weekday) -> Option<Date> {
    if nth == 0 {
        return None;
    }
    let date = if nth > 0 {
        let offset = i64::from(
            (weekday.to_monday_zero_offset() - first.weekday().to_monday_zero_offset())
                .rem_euclid(7),
        );
        first.checked_add(Span::new().days(offset + 7 * (i64::from(nth) - 1)))
            .ok()?
    } else {
        let offset = i64::from(
            (last.weekday().to_monday_zero_offset() - weekday.to_monday_zero_offset())
                .rem_euclid(7),
        );
        last.checked_add(Span::new().days(-offset - 7 * (i64::from(-nth) - 1)))
            .ok()?
    };
    (date >= first && date <= last).then_some(date)
}
