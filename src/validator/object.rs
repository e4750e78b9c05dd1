//! Object traversal.
//!
//! This module provides [`Properties`] (a fixed key → validator mapping),
//! [`Dictionary`] (the same mapping, closed to other keys) and
//! [`PropertyKeys`] / [`PropertyValues`] (one validator applied to every key or
//! value). Each re-homes child failures under the key that produced them.
//!
//! A key is present when the input object contains it. Non-object inputs have
//! no properties. Missing properties are handed to child validators as
//! [`absent()`](super::absent()), which `null` and equality checks reject.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::ValidationFailure;
use crate::message::{describe_input, interpolate, messages};
use crate::path::JsonPath;

use super::absent::absent;
use super::traits::{pass, BoxedValidator, Failures, Validator};

/// Which declared properties get checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Presence {
    /// Every declared key is checked; missing ones are checked as [`absent()`](super::absent()).
    #[default]
    All,
    /// Only declared keys the input actually contains are checked.
    Present,
}

impl Presence {
    fn includes(self, object: Option<&Map<String, Value>>, key: &str) -> bool {
        match self {
            Presence::All => true,
            Presence::Present => object.is_some_and(|o| o.contains_key(key)),
        }
    }
}

/// Validates declared properties of an object.
///
/// Keys are checked in declaration order and traversal is lazy: a consumer
/// that stops early never evaluates later properties.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{JsonPath, Rule, Validator};
///
/// let user = Rule::properties()
///     .property("name", Rule::string())
///     .property("age", Rule::integer());
///
/// let failures: Vec<_> = user.validate(&json!({"name": 0, "age": 3})).collect();
/// assert_eq!(failures.len(), 1);
/// assert_eq!(failures[0].instance_path, JsonPath::from_field("name"));
///
/// // Optional properties skip keys the input does not have.
/// let patch = Rule::optional_properties().property("name", Rule::string());
/// assert!(patch.is(&json!({})));
/// ```
pub struct Properties {
    entries: IndexMap<String, BoxedValidator>,
    presence: Presence,
}

impl Properties {
    /// Creates an empty mapping with the given presence rule.
    pub fn new(presence: Presence) -> Self {
        Self {
            entries: IndexMap::new(),
            presence,
        }
    }

    /// Adds (or replaces) the validator for `key`.
    pub fn property<V>(mut self, key: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.entries.insert(key.into(), Box::new(validator));
        self
    }

    /// The presence rule in effect.
    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// Declared keys in traversal order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    fn declares(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self::new(Presence::All)
    }
}

impl Validator for Properties {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        let object = input.as_object();
        let presence = self.presence;

        Box::new(
            self.entries
                .iter()
                .filter(move |(key, _)| presence.includes(object, key))
                .flat_map(move |(key, child)| {
                    let value = object
                        .and_then(|o| o.get(key.as_str()))
                        .unwrap_or(absent());
                    child
                        .validate(value)
                        .map(move |failure| failure.prepend_field(key.as_str()))
                }),
        )
    }

    fn is(&self, input: &Value) -> bool {
        let object = input.as_object();
        self.entries
            .iter()
            .filter(|(key, _)| self.presence.includes(object, key))
            .all(|(key, child)| {
                let value = object
                    .and_then(|o| o.get(key.as_str()))
                    .unwrap_or(absent());
                child.is(value)
            })
    }
}

impl fmt::Display for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.presence {
            Presence::All => "",
            Presence::Present => "?",
        };
        let keys: Vec<String> = self.keys().map(|k| format!("{}{}", k, marker)).collect();
        if keys.is_empty() {
            f.write_str("{}")
        } else {
            write!(f, "{{ {} }}", keys.join(", "))
        }
    }
}

/// A record whose keys are exactly the declared ones.
///
/// Declared keys are checked like [`Properties`] under the chosen presence
/// rule; afterwards every key the mapping does not declare yields one failure at
/// that key.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{JsonPath, Presence, Rule, Validator};
///
/// let point = Rule::dictionary(Presence::All)
///     .property("x", Rule::number())
///     .property("y", Rule::number());
///
/// let failures: Vec<_> = point.validate(&json!({"x": 1, "y": 2, "z": 3})).collect();
/// assert_eq!(failures.len(), 1);
/// assert_eq!(failures[0].instance_path, JsonPath::from_field("z"));
/// assert_eq!(failures[0].message, "should be absent, but 3");
/// ```
pub struct Dictionary {
    declared: Properties,
}

impl Dictionary {
    /// Creates an empty closed mapping with the given presence rule.
    pub fn new(presence: Presence) -> Self {
        Self {
            declared: Properties::new(presence),
        }
    }

    /// Adds (or replaces) the validator for `key`.
    pub fn property<V>(mut self, key: impl Into<String>, validator: V) -> Self
    where
        V: Validator + 'static,
    {
        self.declared = self.declared.property(key, validator);
        self
    }

    fn undeclared<'a>(&'a self, input: &'a Value) -> impl Iterator<Item = (&'a String, &'a Value)> {
        input
            .as_object()
            .into_iter()
            .flat_map(|o| o.iter())
            .filter(move |(key, _)| !self.declared.declares(key))
    }
}

impl Validator for Dictionary {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        let unknown = self.undeclared(input).map(|(key, value)| {
            ValidationFailure::at(
                JsonPath::from_field(key.as_str()),
                interpolate(messages::SHOULD_BE_BUT, &["absent".to_string(), describe_input(value)]),
            )
        });
        Box::new(self.declared.validate(input).chain(unknown))
    }

    fn is(&self, input: &Value) -> bool {
        self.declared.is(input) && self.undeclared(input).next().is_none()
    }
}

impl fmt::Display for Dictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "exactly {}", self.declared)
    }
}

/// Applies one validator to every key of an object.
///
/// Keys are checked as JSON strings; a failing key is reported at its own path.
pub struct PropertyKeys {
    child: BoxedValidator,
}

impl PropertyKeys {
    /// Creates a validator checking each key against `child`.
    pub fn new<V: Validator + 'static>(child: V) -> Self {
        Self {
            child: Box::new(child),
        }
    }
}

impl Validator for PropertyKeys {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        let Some(object) = input.as_object() else {
            return pass();
        };

        Box::new(object.keys().flat_map(move |key| {
            let as_value = Value::String(key.clone());
            let failures: Vec<ValidationFailure> = self.child.validate(&as_value).collect();
            failures
                .into_iter()
                .map(move |failure| failure.prepend_field(key.as_str()))
        }))
    }

    fn is(&self, input: &Value) -> bool {
        input.as_object().map_or(true, |object| {
            object
                .keys()
                .all(|key| self.child.is(&Value::String(key.clone())))
        })
    }
}

impl fmt::Display for PropertyKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "property keys {}", self.child)
    }
}

/// Applies one validator to every value of an object.
pub struct PropertyValues {
    child: BoxedValidator,
}

impl PropertyValues {
    /// Creates a validator checking each value against `child`.
    pub fn new<V: Validator + 'static>(child: V) -> Self {
        Self {
            child: Box::new(child),
        }
    }
}

impl Validator for PropertyValues {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        let Some(object) = input.as_object() else {
            return pass();
        };

        Box::new(object.iter().flat_map(move |(key, value)| {
            self.child
                .validate(value)
                .map(move |failure| failure.prepend_field(key.as_str()))
        }))
    }

    fn is(&self, input: &Value) -> bool {
        input
            .as_object()
            .map_or(true, |object| object.values().all(|value| self.child.is(value)))
    }
}

impl fmt::Display for PropertyValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "property values {}", self.child)
    }
}
