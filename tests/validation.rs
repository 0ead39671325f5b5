// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Validation tests over realistic component graphs.

use aimcal_model::{
    Component, ComponentKind, Method, Property, ValidationConfig, Violation,
};

fn meeting() -> Component {
    let alarm = Component::new(ComponentKind::Alarm)
        .with_property(Property::new("ACTION", "DISPLAY"))
        .with_property(Property::new("TRIGGER", "-PT15M"))
        .with_property(Property::new("DESCRIPTION", "Reminder"));

    Component::new(ComponentKind::Event)
        .with_property(Property::new("UID", "20170425T090000-1@example.com"))
        .with_property(Property::new("DTSTAMP", "20170420T120000Z"))
        .with_property(Property::new("DTSTART", "20170425T090000Z"))
        .with_property(Property::new("DTEND", "20170425T100000Z"))
        .with_property(Property::new("SUMMARY", "Sprint review"))
        .with_property(Property::new("ORGANIZER", "mailto:owner@example.com"))
        .with_child(alarm)
}

#[test]
fn complete_meeting_validates_recursively() {
    assert!(
        meeting()
            .validate(true, None, &ValidationConfig::strict())
            .is_ok()
    );
}

#[test]
fn publish_payload_validates_end_to_end() {
    assert!(
        meeting()
            .validate(true, Some(Method::Publish), &ValidationConfig::strict())
            .is_ok()
    );
}

#[test]
fn relaxed_mode_admits_uid_less_event_strict_rejects() {
    let mut ev = meeting();
    ev.properties_mut().remove("UID");

    let err = ev
        .validate(false, None, &ValidationConfig::strict())
        .unwrap_err();
    assert!(err.violations.iter().any(|v| matches!(
        v,
        Violation::MissingProperty { property: "UID", .. }
    )));

    assert!(ev.validate(false, None, &ValidationConfig::relaxed()).is_ok());
}

#[test]
fn todo_due_duration_exclusivity_round_trip() {
    let todo = Component::new(ComponentKind::Todo)
        .with_property(Property::new("UID", "todo-1@example.com"))
        .with_property(Property::new("DTSTAMP", "20170420T120000Z"))
        .with_property(Property::new("DUE", "20170501"))
        .with_property(Property::new("DURATION", "P2D"));

    let err = todo
        .validate(false, None, &ValidationConfig::strict())
        .unwrap_err();
    assert_eq!(
        err.violations,
        [Violation::MutuallyExclusive {
            kind: "VTODO".into(),
            first: "DUE",
            second: "DURATION",
        }]
    );

    let mut fixed = todo;
    fixed.properties_mut().remove("DUE");
    assert!(fixed.validate(false, None, &ValidationConfig::strict()).is_ok());
}

#[test]
fn broken_alarm_child_fails_the_parent_graph() {
    let mut ev = meeting();
    if let Some(alarm) = ev.children_mut().first_mut() {
        alarm.properties_mut().remove("TRIGGER");
    }

    let err = ev
        .validate(true, None, &ValidationConfig::strict())
        .unwrap_err();
    assert_eq!(
        err.violations,
        [Violation::MissingProperty {
            kind: "VALARM".into(),
            property: "TRIGGER",
        }]
    );
}

#[test]
fn attendee_forbidden_on_published_event() {
    let ev = meeting().with_property(Property::new("ATTENDEE", "mailto:dev@example.com"));
    let err = ev
        .validate(true, Some(Method::Publish), &ValidationConfig::strict())
        .unwrap_err();
    assert_eq!(
        err.violations,
        [Violation::ForbiddenProperty {
            kind: "VEVENT".into(),
            method: Method::Publish,
            property: "ATTENDEE",
        }]
    );
}

#[test]
fn timezone_graph_validates_with_observances() {
    let standard = Component::new(ComponentKind::Standard)
        .with_property(Property::new("DTSTART", "19701101T020000"))
        .with_property(Property::new("TZOFFSETFROM", "-0400"))
        .with_property(Property::new("TZOFFSETTO", "-0500"));
    let daylight = Component::new(ComponentKind::Daylight)
        .with_property(Property::new("DTSTART", "19700308T020000"))
        .with_property(Property::new("TZOFFSETFROM", "-0500"))
        .with_property(Property::new("TZOFFSETTO", "-0400"));
    let tz = Component::new(ComponentKind::TimeZone)
        .with_property(Property::new("TZID", "America/New_York"))
        .with_child(standard)
        .with_child(daylight);

    assert!(tz.validate(true, None, &ValidationConfig::strict()).is_ok());

    let mut broken = tz;
    if let Some(obs) = broken.children_mut().first_mut() {
        obs.properties_mut().remove("TZOFFSETTO");
    }
    let err = broken
        .validate(true, None, &ValidationConfig::strict())
        .unwrap_err();
    assert_eq!(err.violations.len(), 1);
}
