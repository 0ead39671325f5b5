// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Round-trip tests for value text.
//!
//! Serialized output is normalized to RFC-declared part order, so the
//! guarantee is field-wise equality after reparsing, not textual
//! equality with arbitrary input.

use aimcal_model::value::{parse_duration, parse_rrule};
use aimcal_model::{CalDate, Precision};
use jiff::tz::TimeZone;

#[test]
fn rule_text_survives_reparse_field_wise() {
    let cases = [
        "FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE,FR;COUNT=10",
        "FREQ=MONTHLY;BYMONTHDAY=-1",
        "FREQ=YEARLY;BYMONTH=3;BYDAY=2SU",
        "FREQ=DAILY;UNTIL=20171231T235959Z",
        "FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1",
        "FREQ=WEEKLY;WKST=SU;BYDAY=TU,TH",
    ];
    for src in cases {
        let rule = parse_rrule(src).unwrap();
        let reparsed = parse_rrule(&rule.to_string()).unwrap();
        assert_eq!(rule, reparsed, "rule text: {src}");
    }
}

#[test]
fn shuffled_part_order_parses_to_the_same_rule() {
    let a = parse_rrule("FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,WE,FR;COUNT=10").unwrap();
    let b = parse_rrule("COUNT=10;BYDAY=MO,WE,FR;FREQ=WEEKLY;INTERVAL=2").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn duration_text_survives_reparse() {
    let cases = ["P15DT5H0M20S", "PT1H30M", "P7W", "-PT15M", "P1DT12H"];
    for src in cases {
        let duration = parse_duration(src).unwrap();
        let reparsed = parse_duration(&duration.to_string()).unwrap();
        assert_eq!(duration, reparsed, "duration text: {src}");
    }
}

#[test]
fn caldate_text_survives_reparse() {
    let utc = TimeZone::UTC;
    for src in ["20170425", "20170425T091500", "20170425T091500Z"] {
        let date = CalDate::parse(src, &utc).unwrap();
        let reparsed = CalDate::parse(&date.to_string(), &utc).unwrap();
        assert_eq!(date, reparsed, "date text: {src}");
    }
}

#[test]
fn day_equals_midnight_instant_of_the_same_day() {
    let utc = TimeZone::UTC;
    let day = CalDate::parse("20170425", &utc).unwrap();
    let midnight = CalDate::parse("20170425T000000", &utc).unwrap();
    let noon = CalDate::parse("20170425T120000", &utc).unwrap();

    assert_eq!(day.precision(), Precision::Day);
    assert_eq!(midnight.precision(), Precision::Instant);

    // mixed-precision comparison truncates the instant to its civil day
    assert_eq!(day, midnight);
    assert_eq!(day, noon);
    assert!(day < CalDate::parse("20170426T000000", &utc).unwrap());
}
