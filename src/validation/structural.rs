// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Per-kind structural rules from RFC 5545 Section 3.6.
//!
//! Each component kind carries a fixed rule set: properties that must be
//! present, properties limited to one occurrence, pairs that exclude each
//! other, the allowed STATUS values, and pairs that must travel together.
//! Every rule is evaluated independently; none gates another.

use crate::component::{Component, ComponentKind};
use crate::keyword::{
    KW_ACTION, KW_CLASS, KW_COMPLETED, KW_CONTACT, KW_CREATED, KW_DESCRIPTION, KW_DTEND,
    KW_DTSTAMP, KW_DTSTART, KW_DUE, KW_DURATION, KW_GEO, KW_LAST_MODIFIED, KW_LOCATION,
    KW_ORGANIZER, KW_PERCENT_COMPLETE, KW_PRIORITY, KW_RECURRENCE_ID, KW_REPEAT, KW_SEQUENCE,
    KW_STATUS, KW_STATUS_CANCELLED, KW_STATUS_COMPLETED, KW_STATUS_CONFIRMED, KW_STATUS_DRAFT,
    KW_STATUS_FINAL, KW_STATUS_IN_PROCESS, KW_STATUS_NEEDS_ACTION, KW_STATUS_TENTATIVE,
    KW_SUMMARY, KW_TRANSP, KW_TRIGGER, KW_TZID, KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_TZURL, KW_UID,
    KW_URL,
};
use crate::validation::{ValidationConfig, Violation, kind_name};

/// The structural rule set for one component kind.
struct KindRules {
    /// Required properties; `true` marks those waived in relaxed mode.
    required: &'static [(&'static str, bool)],
    /// Properties that may occur at most once.
    at_most_once: &'static [&'static str],
    /// Pairs that may not share a component.
    exclusive: &'static [(&'static str, &'static str)],
    /// Allowed STATUS values; empty means STATUS is not constrained.
    status_values: &'static [&'static str],
    /// Ordered pairs where the first requires the second.
    requires: &'static [(&'static str, &'static str)],
}

#[rustfmt::skip]
static EVENT: KindRules = KindRules {
    required: &[(KW_UID, true), (KW_DTSTAMP, true)],
    at_most_once: &[
        KW_UID, KW_DTSTAMP, KW_CLASS, KW_CREATED, KW_DESCRIPTION, KW_DTSTART, KW_GEO,
        KW_LAST_MODIFIED, KW_LOCATION, KW_ORGANIZER, KW_PRIORITY, KW_RECURRENCE_ID, KW_SEQUENCE,
        KW_STATUS, KW_SUMMARY, KW_TRANSP, KW_URL, KW_DTEND, KW_DURATION,
    ],
    exclusive: &[(KW_DTEND, KW_DURATION)],
    status_values: &[KW_STATUS_TENTATIVE, KW_STATUS_CONFIRMED, KW_STATUS_CANCELLED],
    requires: &[],
};

#[rustfmt::skip]
static TODO: KindRules = KindRules {
    required: &[(KW_UID, true), (KW_DTSTAMP, true)],
    at_most_once: &[
        KW_UID, KW_DTSTAMP, KW_CLASS, KW_COMPLETED, KW_CREATED, KW_DESCRIPTION, KW_DTSTART,
        KW_GEO, KW_LAST_MODIFIED, KW_LOCATION, KW_ORGANIZER, KW_PERCENT_COMPLETE, KW_PRIORITY,
        KW_RECURRENCE_ID, KW_SEQUENCE, KW_STATUS, KW_SUMMARY, KW_URL, KW_DUE, KW_DURATION,
    ],
    exclusive: &[(KW_DUE, KW_DURATION)],
    status_values: &[
        KW_STATUS_NEEDS_ACTION, KW_STATUS_COMPLETED, KW_STATUS_IN_PROCESS, KW_STATUS_CANCELLED,
    ],
    requires: &[],
};

#[rustfmt::skip]
static JOURNAL: KindRules = KindRules {
    required: &[(KW_UID, true), (KW_DTSTAMP, true)],
    at_most_once: &[
        KW_UID, KW_DTSTAMP, KW_CLASS, KW_CREATED, KW_DTSTART, KW_LAST_MODIFIED, KW_ORGANIZER,
        KW_RECURRENCE_ID, KW_SEQUENCE, KW_STATUS, KW_SUMMARY, KW_URL,
    ],
    exclusive: &[],
    status_values: &[KW_STATUS_DRAFT, KW_STATUS_FINAL, KW_STATUS_CANCELLED],
    requires: &[],
};

static FREE_BUSY: KindRules = KindRules {
    required: &[(KW_UID, true), (KW_DTSTAMP, true)],
    at_most_once: &[
        KW_UID, KW_DTSTAMP, KW_CONTACT, KW_DTSTART, KW_DTEND, KW_ORGANIZER, KW_URL,
    ],
    exclusive: &[],
    status_values: &[],
    requires: &[],
};

static TIME_ZONE: KindRules = KindRules {
    required: &[(KW_TZID, false)],
    at_most_once: &[KW_TZID, KW_LAST_MODIFIED, KW_TZURL],
    exclusive: &[],
    status_values: &[],
    requires: &[],
};

static OBSERVANCE: KindRules = KindRules {
    required: &[(KW_DTSTART, false), (KW_TZOFFSETFROM, false), (KW_TZOFFSETTO, false)],
    at_most_once: &[KW_DTSTART, KW_TZOFFSETFROM, KW_TZOFFSETTO],
    exclusive: &[],
    status_values: &[],
    requires: &[],
};

static ALARM: KindRules = KindRules {
    required: &[(KW_ACTION, false), (KW_TRIGGER, false)],
    at_most_once: &[
        KW_ACTION, KW_TRIGGER, KW_DURATION, KW_REPEAT, KW_DESCRIPTION, KW_SUMMARY,
    ],
    exclusive: &[],
    status_values: &[],
    // DURATION and REPEAT describe the re-fire schedule together
    requires: &[(KW_DURATION, KW_REPEAT), (KW_REPEAT, KW_DURATION)],
};

fn rules(kind: &ComponentKind) -> Option<&'static KindRules> {
    match kind {
        ComponentKind::Event => Some(&EVENT),
        ComponentKind::Todo => Some(&TODO),
        ComponentKind::Journal => Some(&JOURNAL),
        ComponentKind::FreeBusy => Some(&FREE_BUSY),
        ComponentKind::TimeZone => Some(&TIME_ZONE),
        ComponentKind::Standard | ComponentKind::Daylight => Some(&OBSERVANCE),
        ComponentKind::Alarm => Some(&ALARM),
        ComponentKind::Custom(_) => None,
    }
}

/// Run every structural rule for the component's kind.
pub(crate) fn check(component: &Component, config: &ValidationConfig, out: &mut Vec<Violation>) {
    let Some(rules) = rules(component.kind()) else {
        return;
    };
    let props = component.properties();

    for &(name, relaxable) in rules.required {
        if props.count(name) == 0 && !(relaxable && config.relaxed) {
            out.push(Violation::MissingProperty {
                kind: kind_name(component.kind()),
                property: name,
            });
        }
    }

    for &name in rules.at_most_once {
        let count = props.count(name);
        if count > 1 {
            out.push(Violation::DuplicateProperty {
                kind: kind_name(component.kind()),
                property: name,
                count,
            });
        }
    }

    for &(first, second) in rules.exclusive {
        if props.count(first) > 0 && props.count(second) > 0 {
            out.push(Violation::MutuallyExclusive {
                kind: kind_name(component.kind()),
                first,
                second,
            });
        }
    }

    if !rules.status_values.is_empty() {
        for prop in props.all(KW_STATUS) {
            let value = prop.value().to_ascii_uppercase();
            if !rules.status_values.contains(&value.as_str()) {
                out.push(Violation::InvalidValue {
                    kind: kind_name(component.kind()),
                    property: KW_STATUS,
                    value: prop.value().to_owned(),
                });
            }
        }
    }

    for &(present, missing) in rules.requires {
        if props.count(present) > 0 && props.count(missing) == 0 {
            out.push(Violation::MustOccurTogether {
                kind: kind_name(component.kind()),
                present,
                missing,
            });
        }
    }
}
