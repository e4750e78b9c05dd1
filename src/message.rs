//! Message templates and interpolation.
//!
//! Every built-in failure message is produced by filling the positional slots
//! (`{0}`, `{1}`, ...) of one of the templates in [`messages`]. The same
//! [`interpolate`] function is public so custom validators can reuse it.

use std::fmt::Display;

use serde_json::Value;

use crate::validator::is_absent;

/// Built-in message templates.
pub mod messages {
    /// Leaf failure: rule description, then the printed input.
    pub const SHOULD_BE_BUT: &str = "should be {0}, but {1}";

    /// Combinator failure: rule description only.
    pub const SHOULD_BE: &str = "should be {0}";

    /// Upper item-count bound, then the actual count.
    pub const MAX_COUNT: &str = "item count should be less than or equal to {0}, but {1}";

    /// Lower item-count bound, then the actual count.
    pub const MIN_COUNT: &str = "item count should be greater than or equal to {0}, but {1}";

    /// Rendered instance path appended to assertion errors.
    pub const INSTANCE_PATH: &str = "instance path: {0}";
}

/// Fills the `{N}` slots of `template` with `args[N]`.
///
/// Slots with no matching argument and braces that do not enclose a plain
/// index are copied through unchanged.
///
/// # Example
///
/// ```rust
/// use verdict::message::{interpolate, messages};
///
/// let message = interpolate(messages::SHOULD_BE_BUT, &["string", "0"]);
/// assert_eq!(message, "should be string, but 0");
///
/// assert_eq!(interpolate("{0} {2}", &["a"]), "a {2}");
/// ```
pub fn interpolate<D: Display>(template: &str, args: &[D]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let slot = after.find('}').and_then(|close| {
            let digits = &after[..close];
            let is_index = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
            let arg = if is_index {
                digits.parse::<usize>().ok().and_then(|i| args.get(i))
            } else {
                None
            };
            arg.map(|arg| (arg, close))
        });

        match slot {
            Some((arg, close)) => {
                out.push_str(&arg.to_string());
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Printed form of an input for the `{1}` slot of a failure message.
///
/// Scalars print as JSON text; containers print as their kind so a large
/// document is not dumped into every message. A missing member prints as
/// `absent`.
pub fn describe_input(value: &Value) -> String {
    if is_absent(value) {
        return "absent".to_string();
    }
    match value {
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
        scalar => scalar.to_string(),
    }
}

/// Joins alternatives as `a`, `a or b`, or `a, b, or c`.
pub fn list_alternatives<D: Display>(items: &[D]) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{} or {}", first, second),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{}, or {}", head.join(", "), last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interpolate_positional_slots() {
        assert_eq!(
            interpolate(messages::MAX_COUNT, &[3, 5]),
            "item count should be less than or equal to 3, but 5"
        );
        assert_eq!(
            interpolate(messages::MIN_COUNT, &[1, 0]),
            "item count should be greater than or equal to 1, but 0"
        );
    }

    #[test]
    fn test_interpolate_repeated_and_reordered_slots() {
        assert_eq!(interpolate("{1}-{0}-{1}", &["a", "b"]), "b-a-b");
    }

    #[test]
    fn test_interpolate_leaves_unknown_slots() {
        assert_eq!(interpolate("{0} {name} {} {9}", &["x"]), "x {name} {} {9}");
        assert_eq!(interpolate("open { brace", &["x"]), "open { brace");
        assert_eq!(interpolate("trailing {", &["x"]), "trailing {");
    }

    #[test]
    fn test_interpolate_nested_brace() {
        assert_eq!(interpolate("{{0}}", &["x"]), "{x}");
    }

    #[test]
    fn test_instance_path_template() {
        assert_eq!(
            interpolate(messages::INSTANCE_PATH, &["a.b.c"]),
            "instance path: a.b.c"
        );
    }

    #[test]
    fn test_describe_input() {
        assert_eq!(describe_input(&json!("hi")), "\"hi\"");
        assert_eq!(describe_input(&json!(1.5)), "1.5");
        assert_eq!(describe_input(&json!(null)), "null");
        assert_eq!(describe_input(&json!([1, 2])), "array");
        assert_eq!(describe_input(&json!({"a": 1})), "object");
        assert_eq!(describe_input(crate::validator::absent()), "absent");
    }

    #[test]
    fn test_list_alternatives() {
        assert_eq!(list_alternatives::<&str>(&[]), "");
        assert_eq!(list_alternatives(&["string"]), "string");
        assert_eq!(list_alternatives(&["string", "null"]), "string or null");
        assert_eq!(
            list_alternatives(&["string", "number", "null"]),
            "string, number, or null"
        );
    }
}
