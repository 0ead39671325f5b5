// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Component validation against RFC 5545 grammar and RFC 5546 scheduling
//! rules.
//!
//! Two independent rule families run over the same property graph:
//!
//! - structural rules, keyed by [`ComponentKind`]: required and
//!   at-most-once properties, mutually exclusive pairs, enumerated STATUS
//!   values, and co-occurrence constraints;
//! - method rules, keyed by `(Method, ComponentKind)`: a static table
//!   classifying tracked properties as required, optional, or forbidden
//!   for an iTIP scheduling payload.
//!
//! Every applicable rule is evaluated; nothing stops at the first
//! violation. The outcome is either `Ok(())` or a [`ValidationError`]
//! aggregating all violations found.

mod itip;
mod structural;

use thiserror::Error;

use crate::component::{Component, ComponentKind, Method};

/// Knobs for structural validation.
///
/// Relaxed mode downgrades the required UID and DTSTAMP checks on
/// Event, Todo, Journal, and FreeBusy components to optional, matching
/// feeds produced by clients that omit them. Nothing else is affected;
/// method rules in particular always run strict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Tolerate missing UID/DTSTAMP on the four scheduling components.
    pub relaxed: bool,
}

impl ValidationConfig {
    /// The strict default.
    #[must_use]
    pub const fn strict() -> Self {
        ValidationConfig { relaxed: false }
    }

    /// Relaxed compatibility mode.
    #[must_use]
    pub const fn relaxed() -> Self {
        ValidationConfig { relaxed: true }
    }
}

/// A single rule failure.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// A property the component kind requires is absent.
    #[error("{kind}: missing required property {property}")]
    MissingProperty {
        /// Component name the rule applies to
        kind: String,
        /// The absent property
        property: &'static str,
    },

    /// A property limited to one occurrence appears several times.
    #[error("{kind}: property {property} occurs {count} times, at most once allowed")]
    DuplicateProperty {
        /// Component name the rule applies to
        kind: String,
        /// The repeated property
        property: &'static str,
        /// How many times it occurs
        count: usize,
    },

    /// Two properties that may not share a component are both present.
    #[error("{kind}: properties {first} and {second} are mutually exclusive")]
    MutuallyExclusive {
        /// Component name the rule applies to
        kind: String,
        /// One of the pair
        first: &'static str,
        /// The other
        second: &'static str,
    },

    /// A property value is outside its enumerated set.
    #[error("{kind}: value {value:?} is not allowed for {property}")]
    InvalidValue {
        /// Component name the rule applies to
        kind: String,
        /// The constrained property
        property: &'static str,
        /// The offending value
        value: String,
    },

    /// A property that must travel with another appears alone.
    #[error("{kind}: property {present} requires {missing} alongside it")]
    MustOccurTogether {
        /// Component name the rule applies to
        kind: String,
        /// The property that is present
        present: &'static str,
        /// Its missing companion
        missing: &'static str,
    },

    /// A scheduling method demands a property the payload lacks.
    #[error("{kind}: method {method} requires property {property}")]
    MissingForMethod {
        /// Component name the rule applies to
        kind: String,
        /// The scheduling method in force
        method: Method,
        /// The absent property
        property: &'static str,
    },

    /// A scheduling method forbids a property the payload carries.
    #[error("{kind}: method {method} forbids property {property}")]
    ForbiddenProperty {
        /// Component name the rule applies to
        kind: String,
        /// The scheduling method in force
        method: Method,
        /// The forbidden property
        property: &'static str,
    },

    /// No scheduling semantics exist for this method on this kind.
    #[error("method {method} does not apply to {kind} components")]
    MethodNotApplicable {
        /// Component name the payload carries
        kind: String,
        /// The scheduling method in force
        method: Method,
    },
}

/// Aggregated validation outcome; carries every violation found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} validation violation(s): {}", violations.len(), join(violations))]
pub struct ValidationError {
    /// All violations, in rule evaluation order.
    pub violations: Vec<Violation>,
}

fn join(violations: &[Violation]) -> String {
    let parts: Vec<String> = violations.iter().map(ToString::to_string).collect();
    parts.join("; ")
}

/// Validate a component graph.
///
/// Structural rules for the component's kind always run. When `method`
/// is supplied, the `(method, kind)` scheduling table runs as well; a
/// pair the table does not define is itself a violation on the top-level
/// component, while sub-components without scheduling semantics (alarms,
/// time zone observances) are simply skipped. `recurse` walks owned
/// sub-components with the same configuration.
///
/// # Errors
///
/// Returns every violation found, aggregated into one error.
pub fn validate(
    component: &Component,
    recurse: bool,
    method: Option<Method>,
    config: &ValidationConfig,
) -> Result<(), ValidationError> {
    let mut violations = Vec::new();
    check(component, recurse, method, config, true, &mut violations);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

fn check(
    component: &Component,
    recurse: bool,
    method: Option<Method>,
    config: &ValidationConfig,
    top_level: bool,
    out: &mut Vec<Violation>,
) {
    structural::check(component, config, out);

    if let Some(method) = method {
        match itip::rules(method, component.kind()) {
            Some(rules) => itip::check(component, method, rules, out),
            None if top_level => out.push(Violation::MethodNotApplicable {
                kind: kind_name(component.kind()),
                method,
            }),
            None => {}
        }
    }

    if recurse {
        for child in component.children() {
            check(child, recurse, method, config, false, out);
        }
    }
}

pub(crate) fn kind_name(kind: &ComponentKind) -> String {
    kind.name().to_owned()
}
