// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence expansion tests driven by rule text, the way calendar
//! data arrives off the wire.

use aimcal_model::CalDate;
use aimcal_model::value::parse_rrule;
use jiff::civil;

fn day(year: i16, month: i8, dom: i8) -> CalDate {
    CalDate::Day(civil::date(year, month, dom))
}

fn days(dates: &[CalDate]) -> Vec<civil::Date> {
    dates.iter().map(CalDate::date).collect()
}

#[test]
fn daily_count_five_is_the_first_five_days() {
    let rule = parse_rrule("FREQ=DAILY;COUNT=5").unwrap();
    let got = rule.occurrences(&day(2017, 1, 1), &day(2017, 1, 1), &day(2017, 12, 31));
    assert_eq!(
        days(&got),
        [
            civil::date(2017, 1, 1),
            civil::date(2017, 1, 2),
            civil::date(2017, 1, 3),
            civil::date(2017, 1, 4),
            civil::date(2017, 1, 5),
        ]
    );
}

#[test]
fn weekly_byday_emits_in_chronological_order() {
    // seed is a Monday
    let rule = parse_rrule("FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=6").unwrap();
    let got = rule.occurrences(&day(2017, 1, 2), &day(2017, 1, 1), &day(2017, 2, 1));
    assert_eq!(
        days(&got),
        [
            civil::date(2017, 1, 2),
            civil::date(2017, 1, 4),
            civil::date(2017, 1, 6),
            civil::date(2017, 1, 9),
            civil::date(2017, 1, 11),
            civil::date(2017, 1, 13),
        ]
    );
}

#[test]
fn monthly_day_31_produces_no_february_occurrence() {
    let rule = parse_rrule("FREQ=MONTHLY;BYMONTHDAY=31").unwrap();
    let got = rule.occurrences(&day(2017, 1, 31), &day(2017, 1, 1), &day(2017, 5, 31));
    assert_eq!(
        days(&got),
        [
            civil::date(2017, 1, 31),
            civil::date(2017, 3, 31),
            civil::date(2017, 5, 31),
        ]
    );
}

#[test]
fn occurrences_are_deterministic_across_calls() {
    let rule = parse_rrule("FREQ=WEEKLY;INTERVAL=2;BYDAY=TU,TH").unwrap();
    let seed = day(2017, 1, 3);
    let first = rule.occurrences(&seed, &day(2017, 1, 1), &day(2017, 6, 30));
    let second = rule.occurrences(&seed, &day(2017, 1, 1), &day(2017, 6, 30));
    assert_eq!(first, second);
    assert!(first.windows(2).all(|w| w[0] < w[1]));
    assert!(!first.is_empty());
}

#[test]
fn window_restart_resumes_without_drift() {
    let rule = parse_rrule("FREQ=DAILY;INTERVAL=3").unwrap();
    let seed = day(2017, 1, 1);
    let whole = rule.occurrences(&seed, &day(2017, 1, 1), &day(2017, 2, 28));
    let head = rule.occurrences(&seed, &day(2017, 1, 1), &day(2017, 1, 31));
    let tail = rule.occurrences(&seed, &day(2017, 2, 1), &day(2017, 2, 28));
    let stitched: Vec<CalDate> = head.into_iter().chain(tail).collect();
    assert_eq!(whole, stitched);
}

#[test]
fn next_after_matches_enumeration_order() {
    let rule = parse_rrule("FREQ=MONTHLY;BYDAY=1MO").unwrap();
    let seed = day(2017, 1, 2);
    let next = rule.next_after(&seed, &day(2017, 1, 15)).unwrap();
    assert_eq!(next.date(), civil::date(2017, 2, 6));

    // after a terminator there is nothing left
    let bounded = parse_rrule("FREQ=MONTHLY;BYDAY=1MO;COUNT=2").unwrap();
    assert_eq!(bounded.next_after(&seed, &day(2017, 2, 28)), None);
}

#[test]
fn until_is_inclusive() {
    let rule = parse_rrule("FREQ=DAILY;UNTIL=20170103").unwrap();
    let got = rule.occurrences(&day(2017, 1, 1), &day(2017, 1, 1), &day(2017, 12, 31));
    assert_eq!(
        days(&got),
        [
            civil::date(2017, 1, 1),
            civil::date(2017, 1, 2),
            civil::date(2017, 1, 3),
        ]
    );
}

#[test]
fn count_is_anchored_at_the_seed_not_the_window() {
    let rule = parse_rrule("FREQ=DAILY;COUNT=10").unwrap();
    // the first seven occurrences fall before the window opens
    let got = rule.occurrences(&day(2017, 1, 1), &day(2017, 1, 8), &day(2017, 12, 31));
    assert_eq!(
        days(&got),
        [
            civil::date(2017, 1, 8),
            civil::date(2017, 1, 9),
            civil::date(2017, 1, 10),
        ]
    );
}

#[test]
fn instant_seed_keeps_local_clock_across_dst() {
    let tz = jiff::tz::TimeZone::get("America/New_York").unwrap();
    let seed = CalDate::parse("20170310T090000", &tz).unwrap();
    let rule = parse_rrule("FREQ=DAILY;COUNT=4").unwrap();

    let window_end = CalDate::parse("20170320T000000", &tz).unwrap();
    let got = rule.occurrences(&seed, &seed, &window_end);
    assert_eq!(got.len(), 4);
    for occ in &got {
        let CalDate::Instant(zoned) = occ else {
            panic!("instant seed must emit instants");
        };
        assert_eq!(zoned.hour(), 9);
    }
    // the spring-forward transition changes the offset, not the clock
    assert_eq!(got[0].offset_minutes(), Some(-5 * 60));
    assert_eq!(got[3].offset_minutes(), Some(-4 * 60));
}
