// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Untyped iCalendar properties and their ordered container.
//!
//! A property is a name, a raw value, and a list of parameters, matching the
//! content line shape of RFC 5545 Section 3.1. Typed interpretation of the
//! value happens lazily at the component layer, so a container never rejects
//! a property it does not understand.

use std::fmt::{self, Display};
use std::slice;

/// A property parameter, e.g. `TZID=America/New_York`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    name: String,
    value: String,
}

impl Parameter {
    /// Create a parameter. The name is folded to upper case.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Parameter {
            name: name.into().to_ascii_uppercase(),
            value: value.into(),
        }
    }

    /// The parameter name, always upper case.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter value, case preserved.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A single property with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    value: String,
    params: Vec<Parameter>,
}

impl Property {
    /// Create a property. The name is folded to upper case.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Property {
            name: name.into().to_ascii_uppercase(),
            value: value.into(),
            params: Vec::new(),
        }
    }

    /// Attach a parameter, replacing an existing one of the same name.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_parameter(name, value);
        self
    }

    /// The property name, always upper case.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw property value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the raw property value.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The value of the named parameter, if present.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(Parameter::value)
    }

    /// Set a parameter, replacing an existing one of the same name.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let param = Parameter::new(name, value);
        match self.params.iter_mut().find(|p| p.name == param.name) {
            Some(existing) => *existing = param,
            None => self.params.push(param),
        }
    }

    /// All parameters in insertion order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for param in &self.params {
            write!(f, ";{}={}", param.name, param.value)?;
        }
        write!(f, ":{}", self.value)
    }
}

/// An ordered, multi-valued property collection.
///
/// Insertion order is preserved and duplicates are permitted; cardinality is
/// the validation layer's concern, not the container's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyContainer {
    properties: Vec<Property>,
}

impl PropertyContainer {
    /// An empty container.
    #[must_use]
    pub const fn new() -> Self {
        PropertyContainer {
            properties: Vec::new(),
        }
    }

    /// Append a property, keeping any existing ones of the same name.
    pub fn add(&mut self, property: Property) {
        self.properties.push(property);
    }

    /// Replace all properties of the same name with the given one.
    pub fn set(&mut self, property: Property) {
        self.remove(property.name());
        self.properties.push(property);
    }

    /// The first property with the given name.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&Property> {
        self.properties
            .iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// All properties with the given name, in insertion order.
    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Property> {
        self.properties
            .iter()
            .filter(move |p| p.name().eq_ignore_ascii_case(name))
    }

    /// Count the properties with the given name.
    #[must_use]
    pub fn count(&self, name: &str) -> usize {
        self.all(name).count()
    }

    /// Remove all properties with the given name, returning how many.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.properties.len();
        self.properties.retain(|p| !p.name().eq_ignore_ascii_case(name));
        before - self.properties.len()
    }

    /// Iterate over every property in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, Property> {
        self.properties.iter()
    }

    /// The total number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the container holds no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<'a> IntoIterator for &'a PropertyContainer {
    type Item = &'a Property;
    type IntoIter = slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}

impl FromIterator<Property> for PropertyContainer {
    fn from_iter<T: IntoIterator<Item = Property>>(iter: T) -> Self {
        PropertyContainer {
            properties: iter.into_iter().collect(),
        }
    }
}
