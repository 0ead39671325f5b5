// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scheduling-method rules from RFC 5546 Section 3.2.
//!
//! A static table keyed by `(Method, ComponentKind)` classifies the
//! tracked properties of an iTIP payload as required, optional, or
//! forbidden. Required means exactly once; forbidden means absent;
//! optional entries record that the property is tracked but carry no
//! constraint of their own. Pairs the table does not define have no
//! scheduling semantics at all.

use crate::component::{Component, ComponentKind, Method};
use crate::keyword::{
    KW_ATTENDEE, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART, KW_DUE, KW_DURATION,
    KW_EXDATE, KW_FREEBUSY, KW_ORGANIZER, KW_PRIORITY, KW_RDATE, KW_RECURRENCE_ID,
    KW_REQUEST_STATUS, KW_RRULE, KW_SEQUENCE, KW_SUMMARY, KW_UID,
};
use crate::validation::{Violation, kind_name};

/// How a tracked property may occur under a given method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Requirement {
    /// Must occur exactly once.
    Required,
    /// May occur; tracked for documentation only.
    Optional,
    /// Must not occur.
    Forbidden,
}

use Requirement::{Forbidden, Optional, Required};

pub(crate) type MethodRules = &'static [(&'static str, Requirement)];

#[rustfmt::skip]
static EVENT_PUBLISH: MethodRules = &[
    (KW_DTSTAMP, Required), (KW_DTSTART, Required), (KW_ORGANIZER, Required),
    (KW_SUMMARY, Required), (KW_UID, Required),
    (KW_SEQUENCE, Optional), (KW_RECURRENCE_ID, Optional),
    (KW_ATTENDEE, Forbidden), (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static EVENT_REQUEST: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_DTSTART, Required),
    (KW_ORGANIZER, Required), (KW_SUMMARY, Required), (KW_UID, Required),
    (KW_SEQUENCE, Optional),
    (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static EVENT_REPLY: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_ORGANIZER, Required),
    (KW_UID, Required),
    (KW_REQUEST_STATUS, Optional), (KW_SEQUENCE, Optional),
];

#[rustfmt::skip]
static EVENT_ADD: MethodRules = &[
    (KW_DTSTAMP, Required), (KW_DTSTART, Required), (KW_ORGANIZER, Required),
    (KW_SEQUENCE, Required), (KW_SUMMARY, Required), (KW_UID, Required),
    (KW_RECURRENCE_ID, Forbidden), (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static EVENT_CANCEL: MethodRules = &[
    (KW_DTSTAMP, Required), (KW_ORGANIZER, Required), (KW_SEQUENCE, Required),
    (KW_UID, Required),
    (KW_ATTENDEE, Optional),
    (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static EVENT_REFRESH: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_ORGANIZER, Required),
    (KW_UID, Required),
    (KW_DTSTART, Forbidden), (KW_DTEND, Forbidden), (KW_DURATION, Forbidden),
    (KW_RRULE, Forbidden), (KW_RDATE, Forbidden), (KW_EXDATE, Forbidden),
    (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static EVENT_COUNTER: MethodRules = &[
    (KW_DTSTAMP, Required), (KW_DTSTART, Required), (KW_ORGANIZER, Required),
    (KW_SEQUENCE, Required), (KW_SUMMARY, Required), (KW_UID, Required),
    (KW_ATTENDEE, Optional), (KW_REQUEST_STATUS, Optional),
];

#[rustfmt::skip]
static EVENT_DECLINE_COUNTER: MethodRules = &[
    (KW_DTSTAMP, Required), (KW_ORGANIZER, Required), (KW_UID, Required),
    (KW_SEQUENCE, Optional), (KW_REQUEST_STATUS, Optional),
];

#[rustfmt::skip]
static TODO_PUBLISH: MethodRules = &[
    (KW_DTSTAMP, Required), (KW_DTSTART, Required), (KW_ORGANIZER, Required),
    (KW_PRIORITY, Required), (KW_SUMMARY, Required), (KW_UID, Required),
    (KW_SEQUENCE, Optional),
    (KW_ATTENDEE, Forbidden), (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static TODO_REQUEST: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_DTSTART, Required),
    (KW_ORGANIZER, Required), (KW_PRIORITY, Required), (KW_SUMMARY, Required),
    (KW_UID, Required),
    (KW_SEQUENCE, Optional),
    (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static TODO_REPLY: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_ORGANIZER, Required),
    (KW_UID, Required),
    (KW_REQUEST_STATUS, Optional), (KW_SEQUENCE, Optional),
];

#[rustfmt::skip]
static TODO_ADD: MethodRules = &[
    (KW_DTSTAMP, Required), (KW_ORGANIZER, Required), (KW_PRIORITY, Required),
    (KW_SEQUENCE, Required), (KW_SUMMARY, Required), (KW_UID, Required),
    (KW_RECURRENCE_ID, Forbidden), (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static TODO_CANCEL: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_ORGANIZER, Required),
    (KW_SEQUENCE, Required), (KW_UID, Required),
    (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static TODO_REFRESH: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_UID, Required),
    (KW_DTSTART, Forbidden), (KW_DUE, Forbidden), (KW_DURATION, Forbidden),
    (KW_RRULE, Forbidden), (KW_RDATE, Forbidden), (KW_EXDATE, Forbidden),
    (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static TODO_COUNTER: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_ORGANIZER, Required),
    (KW_PRIORITY, Required), (KW_SUMMARY, Required), (KW_UID, Required),
    (KW_SEQUENCE, Optional), (KW_REQUEST_STATUS, Optional),
];

#[rustfmt::skip]
static TODO_DECLINE_COUNTER: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_ORGANIZER, Required),
    (KW_SEQUENCE, Required), (KW_UID, Required),
    (KW_REQUEST_STATUS, Optional),
];

#[rustfmt::skip]
static JOURNAL_PUBLISH: MethodRules = &[
    (KW_DESCRIPTION, Required), (KW_DTSTAMP, Required), (KW_DTSTART, Required),
    (KW_ORGANIZER, Required), (KW_UID, Required),
    (KW_ATTENDEE, Forbidden), (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static JOURNAL_ADD: MethodRules = &[
    (KW_DESCRIPTION, Required), (KW_DTSTAMP, Required), (KW_DTSTART, Required),
    (KW_ORGANIZER, Required), (KW_SEQUENCE, Required), (KW_UID, Required),
    (KW_ATTENDEE, Forbidden), (KW_RECURRENCE_ID, Forbidden),
    (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static JOURNAL_CANCEL: MethodRules = &[
    (KW_DTSTAMP, Required), (KW_ORGANIZER, Required), (KW_SEQUENCE, Required),
    (KW_UID, Required),
    (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static FREE_BUSY_PUBLISH: MethodRules = &[
    (KW_DTSTAMP, Required), (KW_DTSTART, Required), (KW_DTEND, Required),
    (KW_FREEBUSY, Required), (KW_ORGANIZER, Required), (KW_UID, Required),
    (KW_ATTENDEE, Forbidden), (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static FREE_BUSY_REQUEST: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_DTSTART, Required),
    (KW_DTEND, Required), (KW_ORGANIZER, Required), (KW_UID, Required),
    (KW_FREEBUSY, Forbidden), (KW_REQUEST_STATUS, Forbidden),
];

#[rustfmt::skip]
static FREE_BUSY_REPLY: MethodRules = &[
    (KW_ATTENDEE, Required), (KW_DTSTAMP, Required), (KW_DTSTART, Required),
    (KW_DTEND, Required), (KW_ORGANIZER, Required), (KW_UID, Required),
    (KW_FREEBUSY, Optional), (KW_REQUEST_STATUS, Optional),
];

/// Look up the rule set for a `(method, kind)` pair.
///
/// `None` means the pair has no scheduling semantics.
pub(crate) fn rules(method: Method, kind: &ComponentKind) -> Option<MethodRules> {
    match (kind, method) {
        (ComponentKind::Event, Method::Publish) => Some(EVENT_PUBLISH),
        (ComponentKind::Event, Method::Request) => Some(EVENT_REQUEST),
        (ComponentKind::Event, Method::Reply) => Some(EVENT_REPLY),
        (ComponentKind::Event, Method::Add) => Some(EVENT_ADD),
        (ComponentKind::Event, Method::Cancel) => Some(EVENT_CANCEL),
        (ComponentKind::Event, Method::Refresh) => Some(EVENT_REFRESH),
        (ComponentKind::Event, Method::Counter) => Some(EVENT_COUNTER),
        (ComponentKind::Event, Method::DeclineCounter) => Some(EVENT_DECLINE_COUNTER),

        (ComponentKind::Todo, Method::Publish) => Some(TODO_PUBLISH),
        (ComponentKind::Todo, Method::Request) => Some(TODO_REQUEST),
        (ComponentKind::Todo, Method::Reply) => Some(TODO_REPLY),
        (ComponentKind::Todo, Method::Add) => Some(TODO_ADD),
        (ComponentKind::Todo, Method::Cancel) => Some(TODO_CANCEL),
        (ComponentKind::Todo, Method::Refresh) => Some(TODO_REFRESH),
        (ComponentKind::Todo, Method::Counter) => Some(TODO_COUNTER),
        (ComponentKind::Todo, Method::DeclineCounter) => Some(TODO_DECLINE_COUNTER),

        (ComponentKind::Journal, Method::Publish) => Some(JOURNAL_PUBLISH),
        (ComponentKind::Journal, Method::Add) => Some(JOURNAL_ADD),
        (ComponentKind::Journal, Method::Cancel) => Some(JOURNAL_CANCEL),

        (ComponentKind::FreeBusy, Method::Publish) => Some(FREE_BUSY_PUBLISH),
        (ComponentKind::FreeBusy, Method::Request) => Some(FREE_BUSY_REQUEST),
        (ComponentKind::FreeBusy, Method::Reply) => Some(FREE_BUSY_REPLY),

        _ => None,
    }
}

/// Apply one rule set to a component.
pub(crate) fn check(
    component: &Component,
    method: Method,
    rules: MethodRules,
    out: &mut Vec<Violation>,
) {
    let props = component.properties();
    for &(name, requirement) in rules {
        let count = props.count(name);
        match requirement {
            Required if count == 0 => out.push(Violation::MissingForMethod {
                kind: kind_name(component.kind()),
                method,
                property: name,
            }),
            Required if count > 1 => out.push(Violation::DuplicateProperty {
                kind: kind_name(component.kind()),
                property: name,
                count,
            }),
            Forbidden if count > 0 => out.push(Violation::ForbiddenProperty {
                kind: kind_name(component.kind()),
                method,
                property: name,
            }),
            Required | Optional | Forbidden => {}
        }
    }
}
