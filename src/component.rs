// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar components and typed access to their properties.
//!
//! A component is a kind tag, a property container, and owned
//! sub-components, mirroring the `BEGIN:`/`END:` nesting of RFC 5545
//! Section 3.6. Property values stay as raw text until a typed accessor
//! interprets them, so building a graph never fails.

use std::fmt::{self, Display};

use jiff::tz::TimeZone;
use tracing::warn;

use crate::keyword::{
    KW_DAYLIGHT, KW_EXDATE, KW_METHOD, KW_RDATE, KW_RRULE, KW_STANDARD, KW_STATUS, KW_UID,
    KW_VALARM, KW_VEVENT, KW_VFREEBUSY, KW_VJOURNAL, KW_VTIMEZONE, KW_VTODO,
};
use crate::property::{Property, PropertyContainer};
use crate::validation::{ValidationConfig, ValidationError, validate};
use crate::value::{ParseError, RecurrenceRule, ValueDuration, parse_duration, parse_rrule};
use crate::CalDate;

/// The kind of a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VEVENT
    Event,
    /// VTODO
    Todo,
    /// VJOURNAL
    Journal,
    /// VFREEBUSY
    FreeBusy,
    /// VTIMEZONE
    TimeZone,
    /// VALARM
    Alarm,
    /// STANDARD observance inside VTIMEZONE
    Standard,
    /// DAYLIGHT observance inside VTIMEZONE
    Daylight,
    /// Any other component name, e.g. an X- extension
    Custom(String),
}

impl ComponentKind {
    /// The component name as it appears on `BEGIN:`/`END:` lines.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            ComponentKind::Event => KW_VEVENT,
            ComponentKind::Todo => KW_VTODO,
            ComponentKind::Journal => KW_VJOURNAL,
            ComponentKind::FreeBusy => KW_VFREEBUSY,
            ComponentKind::TimeZone => KW_VTIMEZONE,
            ComponentKind::Alarm => KW_VALARM,
            ComponentKind::Standard => KW_STANDARD,
            ComponentKind::Daylight => KW_DAYLIGHT,
            ComponentKind::Custom(name) => name,
        }
    }

    /// Resolve a component name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            KW_VEVENT => ComponentKind::Event,
            KW_VTODO => ComponentKind::Todo,
            KW_VJOURNAL => ComponentKind::Journal,
            KW_VFREEBUSY => ComponentKind::FreeBusy,
            KW_VTIMEZONE => ComponentKind::TimeZone,
            KW_VALARM => ComponentKind::Alarm,
            KW_STANDARD => ComponentKind::Standard,
            KW_DAYLIGHT => ComponentKind::Daylight,
            _ => ComponentKind::Custom(upper),
        }
    }
}

impl Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An iTIP scheduling method as defined in RFC 5546 Section 1.4.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[expect(missing_docs)]
pub enum Method {
    #[strum(serialize = "PUBLISH")]
    Publish,
    #[strum(serialize = "REQUEST")]
    Request,
    #[strum(serialize = "REPLY")]
    Reply,
    #[strum(serialize = "ADD")]
    Add,
    #[strum(serialize = "CANCEL")]
    Cancel,
    #[strum(serialize = "REFRESH")]
    Refresh,
    #[strum(serialize = "COUNTER")]
    Counter,
    #[strum(serialize = "DECLINE-COUNTER")]
    DeclineCounter,
}

/// A calendar component: kind, properties, and owned sub-components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    kind: ComponentKind,
    properties: PropertyContainer,
    children: Vec<Component>,
}

impl Component {
    /// An empty component of the given kind.
    #[must_use]
    pub const fn new(kind: ComponentKind) -> Self {
        Component {
            kind,
            properties: PropertyContainer::new(),
            children: Vec::new(),
        }
    }

    /// The component kind.
    #[must_use]
    pub const fn kind(&self) -> &ComponentKind {
        &self.kind
    }

    /// The property container.
    #[must_use]
    pub const fn properties(&self) -> &PropertyContainer {
        &self.properties
    }

    /// Mutable access to the property container.
    pub const fn properties_mut(&mut self) -> &mut PropertyContainer {
        &mut self.properties
    }

    /// Owned sub-components in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Component] {
        &self.children
    }

    /// Mutable access to the sub-components.
    pub const fn children_mut(&mut self) -> &mut Vec<Component> {
        &mut self.children
    }

    /// Append a sub-component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Append a property; builder form.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.add(property);
        self
    }

    /// Append a sub-component; builder form.
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// The raw value of the first property with the given name.
    #[must_use]
    pub fn property_value(&self, name: &str) -> Option<&str> {
        self.properties.first(name).map(Property::value)
    }

    /// The UID property value.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.property_value(KW_UID)
    }

    /// The STATUS property value.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.property_value(KW_STATUS)
    }

    /// The first date-valued property, anchored via its TZID parameter.
    ///
    /// # Errors
    ///
    /// Fails when the property is present but not a valid DATE or
    /// DATE-TIME. Absence is `Ok(None)`.
    pub fn date(&self, name: &str) -> Result<Option<CalDate>, ParseError> {
        match self.properties.first(name) {
            Some(prop) => {
                let tz = property_zone(prop);
                CalDate::parse(prop.value(), &tz).map(Some)
            }
            None => Ok(None),
        }
    }

    /// The first duration-valued property.
    ///
    /// # Errors
    ///
    /// Fails when the property is present but not a valid DURATION.
    pub fn duration(&self, name: &str) -> Result<Option<ValueDuration>, ParseError> {
        match self.properties.first(name) {
            Some(prop) => parse_duration(prop.value()).map(Some),
            None => Ok(None),
        }
    }

    /// The first RRULE property, parsed.
    ///
    /// # Errors
    ///
    /// Fails when the property is present but not a valid RECUR value.
    pub fn rrule(&self) -> Result<Option<RecurrenceRule>, ParseError> {
        match self.properties.first(KW_RRULE) {
            Some(prop) => parse_rrule(prop.value()).map(Some),
            None => Ok(None),
        }
    }

    /// All EXDATE values across every EXDATE property, in property order.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed element.
    pub fn exception_dates(&self) -> Result<Vec<CalDate>, ParseError> {
        self.date_list(KW_EXDATE)
    }

    /// All RDATE values across every RDATE property, in property order.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed element.
    pub fn recurrence_dates(&self) -> Result<Vec<CalDate>, ParseError> {
        self.date_list(KW_RDATE)
    }

    /// The METHOD property, parsed into the iTIP method enum.
    ///
    /// # Errors
    ///
    /// Fails when the property is present but names no known method.
    pub fn method(&self) -> Result<Option<Method>, ParseError> {
        match self.property_value(KW_METHOD) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|e| ParseError::invalid("METHOD", value, e)),
            None => Ok(None),
        }
    }

    /// Check this component against the structural rules for its kind and,
    /// when a method is supplied, the iTIP rules for (method, kind).
    ///
    /// # Errors
    ///
    /// Returns every violation found, aggregated.
    pub fn validate(
        &self,
        recurse: bool,
        method: Option<Method>,
        config: &ValidationConfig,
    ) -> Result<(), ValidationError> {
        validate(self, recurse, method, config)
    }

    fn date_list(&self, name: &str) -> Result<Vec<CalDate>, ParseError> {
        let mut dates = Vec::new();
        for prop in self.properties.all(name) {
            let tz = property_zone(prop);
            dates.extend(CalDate::parse_list(prop.value(), &tz)?);
        }
        Ok(dates)
    }
}

/// The zone named by a TZID parameter, or UTC when absent or unknown.
fn property_zone(prop: &Property) -> TimeZone {
    use crate::keyword::KW_TZID;

    match prop.parameter(KW_TZID) {
        Some(tzid) => match TimeZone::get(tzid) {
            Ok(tz) => tz,
            Err(err) => {
                warn!(tzid, %err, "unknown time zone, falling back to UTC");
                TimeZone::UTC
            }
        },
        None => TimeZone::UTC,
    }
}
