//! Validation failure records.
//!
//! This module provides [`ValidationFailure`] for a single rule violation and
//! [`ValidationFailures`] for the non-empty, ordered collection a failed
//! validation produces.

use std::fmt::{self, Display};

use stillwater::prelude::*;

use crate::path::JsonPath;

/// A single rule violation.
///
/// A failure is created by a leaf validator with an empty instance path. As it
/// bubbles up through structural combinators each one hands back a new failure
/// with its own key in front of the path; logical combinators may hand back a
/// copy with a different message. Failures are never mutated in place by an
/// ancestor.
///
/// # Example
///
/// ```rust
/// use verdict::{JsonPath, ValidationFailure};
///
/// let failure = ValidationFailure::new("should be string, but 0")
///     .prepend_field("name")
///     .prepend_index(2);
///
/// assert_eq!(failure.instance_path.to_string(), "[2].name");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    /// Human-readable error message. May be empty until a combinator fills it in.
    pub message: String,
    /// Keys and indices from the root input to the failing value.
    pub instance_path: JsonPath,
}

impl ValidationFailure {
    /// Creates a failure at the root path.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            instance_path: JsonPath::root(),
        }
    }

    /// Creates a failure at the given path.
    pub fn at(instance_path: JsonPath, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            instance_path,
        }
    }

    /// Returns this failure with its message replaced.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns this failure with its instance path replaced.
    pub fn with_path(mut self, instance_path: JsonPath) -> Self {
        self.instance_path = instance_path;
        self
    }

    /// Returns this failure re-homed under a property key.
    pub fn prepend_field(mut self, name: impl Into<String>) -> Self {
        self.instance_path = self.instance_path.prepend_field(name);
        self
    }

    /// Returns this failure re-homed under a sequence position.
    pub fn prepend_index(mut self, index: usize) -> Self {
        self.instance_path = self.instance_path.prepend_index(index);
        self
    }
}

impl Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

impl std::error::Error for ValidationFailure {}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationFailure>();
    assert_sync::<ValidationFailure>();
};

/// A non-empty, ordered collection of validation failures.
///
/// `ValidationFailures` wraps a `NonEmptyVec<ValidationFailure>` so that a
/// `Validation::Failure` always carries at least one failure. Order is the
/// order in which the validator tree produced them.
///
/// # Combining Failures
///
/// ```rust
/// use verdict::{JsonPath, ValidationFailure, ValidationFailures};
/// use stillwater::prelude::*;
///
/// let name = ValidationFailures::single(
///     ValidationFailure::at(JsonPath::from_field("name"), "should be string, but 0")
/// );
/// let age = ValidationFailures::single(
///     ValidationFailure::at(JsonPath::from_field("age"), "should be integer, but 1.5")
/// );
///
/// assert_eq!(name.combine(age).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailures(NonEmptyVec<ValidationFailure>);

impl ValidationFailures {
    /// Creates a collection containing a single failure.
    pub fn single(failure: ValidationFailure) -> Self {
        Self(NonEmptyVec::singleton(failure))
    }

    /// Creates a collection from a `Vec`, or `None` if it is empty.
    pub fn from_vec(failures: Vec<ValidationFailure>) -> Option<Self> {
        NonEmptyVec::from_vec(failures).map(Self)
    }

    /// Returns the number of failures in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API consistency.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the failures in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationFailure> {
        self.0.iter()
    }

    /// Returns the first failure encountered.
    pub fn first(&self) -> &ValidationFailure {
        self.0.head()
    }

    /// Returns all failures at the specified path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&ValidationFailure> {
        self.0.iter().filter(|f| &f.instance_path == path).collect()
    }

    /// Converts this collection into a `Vec<ValidationFailure>`.
    pub fn into_vec(self) -> Vec<ValidationFailure> {
        self.0.into_vec()
    }
}

impl Semigroup for ValidationFailures {
    fn combine(self, other: Self) -> Self {
        ValidationFailures(self.0.combine(other.0))
    }
}

impl Display for ValidationFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} failure(s):", self.len())?;
        for (i, failure) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailures {}

impl IntoIterator for ValidationFailures {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationFailures {
    type Item = &'a ValidationFailure;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationFailure> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}
