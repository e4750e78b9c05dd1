//! Message overrides.
//!
//! [`Expect`] wraps any validator and replaces the message of every failure it
//! yields. Instance paths are left untouched, so wrapping an `and` chain re-tags
//! the failures of whichever child stopped the chain while keeping their
//! locations. Each message is rendered for the value found at the failure's
//! path, not for the wrapped input as a whole.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::message::{describe_input, interpolate};
use crate::path::{JsonPath, PathSegment};

use super::absent::absent;
use super::traits::{Failures, Validator};

/// A replacement failure message.
///
/// `Text` messages may use the slots `{0}` (the description of the wrapped
/// rule) and `{1}` (the printed value that failed). `Dynamic` messages are
/// computed from the value that failed.
///
/// The value that failed is the one at the failure's instance path, so
/// `items(string()).expect("bad {1}")` on `[1]` renders `bad 1`. A path that
/// leads nowhere (a missing property) yields the absent value. Failures
/// reported at an object key, as by [`PropertyKeys`](super::PropertyKeys),
/// resolve to the value stored under that key.
#[derive(Clone)]
pub enum Message {
    /// A template with optional `{0}` / `{1}` slots.
    Text(String),
    /// A message computed from the failing input.
    Dynamic(Arc<dyn Fn(&Value) -> String + Send + Sync>),
}

impl Message {
    /// Builds a message computed from the failing input.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Message::Dynamic(Arc::new(f))
    }

    /// Renders the message for `input` failing `rule`.
    ///
    /// `input` is the value that failed, not necessarily the validated root.
    pub fn render(&self, rule: &dyn fmt::Display, input: &Value) -> String {
        match self {
            Message::Text(template) => {
                interpolate(template, &[rule.to_string(), describe_input(input)])
            }
            Message::Dynamic(f) => f(input),
        }
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Message::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

/// A validator whose failures carry a caller-chosen message.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator, ValidatorExt};
///
/// let age = Rule::integer()
///     .and(Rule::gte(0))
///     .expect("age must be a non-negative integer, got {1}");
///
/// let failure = age.validate(&json!(-3)).next().unwrap();
/// assert_eq!(failure.message, "age must be a non-negative integer, got -3");
/// ```
pub struct Expect<V> {
    inner: V,
    message: Message,
}

impl<V: Validator> Expect<V> {
    /// Wraps `inner` so its failures carry `message`.
    pub fn new(inner: V, message: impl Into<Message>) -> Self {
        Self {
            inner,
            message: message.into(),
        }
    }

    /// Returns a reference to the wrapped validator.
    pub fn inner(&self) -> &V {
        &self.inner
    }

    /// Unwraps the validator, dropping the override.
    pub fn into_inner(self) -> V {
        self.inner
    }
}

/// The value under `path` inside `root`.
fn locate<'a>(root: &'a Value, path: &JsonPath) -> &'a Value {
    path.segments().fold(root, |value, segment| {
        let next = match segment {
            PathSegment::Field(key) => value.get(key.as_str()),
            PathSegment::Index(position) => value.get(*position),
        };
        next.unwrap_or(absent())
    })
}

impl<V: Validator> Validator for Expect<V> {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        Box::new(self.inner.validate(input).map(move |failure| {
            let failed = locate(input, &failure.instance_path);
            let message = self.message.render(&self.inner, failed);
            failure.with_message(message)
        }))
    }

    fn is(&self, input: &Value) -> bool {
        self.inner.is(input)
    }
}

impl<V: Validator> fmt::Display for Expect<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::JsonPath;
    use crate::validator::{Rule, ValidatorExt};
    use serde_json::json;

    #[test]
    fn test_text_message_slots() {
        let validator = Rule::string().expect("{0} wanted, {1} given");
        let failure = validator.validate(&json!(5)).next().unwrap();
        assert_eq!(failure.message, "string wanted, 5 given");
    }

    #[test]
    fn test_dynamic_message() {
        let validator =
            Rule::string().expect(Message::dynamic(|input| format!("got {}", input)));
        let failure = validator.validate(&json!(true)).next().unwrap();
        assert_eq!(failure.message, "got true");
    }

    #[test]
    fn test_override_keeps_paths() {
        let validator = Rule::properties()
            .property("a", Rule::string())
            .property("b", Rule::string())
            .expect("bad");

        let failures: Vec<_> = validator.validate(&json!({"a": 1, "b": 2})).collect();
        assert_eq!(failures.len(), 2);
        assert!(failures.iter().all(|f| f.message == "bad"));
        assert_eq!(failures[0].instance_path, JsonPath::from_field("a"));
        assert_eq!(failures[1].instance_path, JsonPath::from_field("b"));
    }

    #[test]
    fn test_input_slot_names_the_nested_value() {
        let validator = Rule::items(Rule::string()).expect("bad {1}");
        let failures: Vec<_> = validator.validate(&json!(["ok", 1, [2]])).collect();

        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].message, "bad 1");
        assert_eq!(failures[0].instance_path, JsonPath::from_index(1));
        assert_eq!(failures[1].message, "bad array");
    }

    #[test]
    fn test_input_slot_for_missing_property() {
        let validator = Rule::properties()
            .property("user", Rule::properties().property("id", Rule::integer()))
            .expect(Message::dynamic(|value| format!("id was {}", describe_input(value))));

        let failure = validator.validate(&json!({"user": {}})).next().unwrap();
        assert_eq!(failure.instance_path.to_string(), "user.id");
        assert_eq!(failure.message, "id was absent");
    }

    #[test]
    fn test_passing_input_is_untouched() {
        let validator = Rule::string().expect("never shown");
        assert!(validator.is(&json!("ok")));
        assert_eq!(validator.validate(&json!("ok")).count(), 0);
        assert_eq!(validator.to_string(), "string");
    }
}
