//! Ordering leaves.
//!
//! This module provides [`Comparison`] for a single fixed bound (`greater than
//! 5`) and [`Between`] for an inclusive range. Bounds are either numbers or
//! strings; numbers compare numerically and strings compare lexically. An input
//! of the other kind never satisfies the bound.

use std::cmp::Ordering;
use std::fmt;

use serde_json::{Number, Value};

use crate::error::{InvalidArgument, ValidationFailure};
use crate::message::{describe_input, interpolate, messages};

use super::traits::{fail, pass, Failures, Validator};

/// A fixed bound an input is ordered against.
///
/// Integer bounds compare exactly against integer inputs across the whole
/// `i64`/`u64` range. Any comparison involving a fraction is done in `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    /// An integer, compared numerically against number inputs.
    Integer(i128),
    /// A float, compared numerically against number inputs.
    Float(f64),
    /// Compared lexically against string inputs.
    Text(String),
}

/// The exact integer value of `n`, if it has one.
fn exact_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

impl Bound {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Bound::Integer(i) => Some(*i as f64),
            Bound::Float(f) => Some(*f),
            Bound::Text(_) => None,
        }
    }

    /// Orders `input` relative to this bound, or `None` if they are not comparable.
    fn compare(&self, input: &Value) -> Option<Ordering> {
        match (self, input) {
            (Bound::Integer(bound), Value::Number(n)) => match exact_integer(n) {
                Some(i) => Some(i.cmp(bound)),
                None => n.as_f64()?.partial_cmp(&(*bound as f64)),
            },
            (Bound::Float(bound), Value::Number(n)) => n.as_f64()?.partial_cmp(bound),
            (Bound::Text(bound), Value::String(s)) => Some(s.as_str().cmp(bound.as_str())),
            _ => None,
        }
    }

    /// Orders two bounds of the same kind; `None` for mixed kinds or NaN.
    fn order(&self, other: &Bound) -> Option<Ordering> {
        match (self, other) {
            (Bound::Integer(a), Bound::Integer(b)) => Some(a.cmp(b)),
            (Bound::Text(a), Bound::Text(b)) => Some(a.cmp(b)),
            (Bound::Text(_), _) | (_, Bound::Text(_)) => None,
            _ => self.as_f64()?.partial_cmp(&other.as_f64()?),
        }
    }

    fn is_text(&self) -> bool {
        matches!(self, Bound::Text(_))
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Integer(i) => write!(f, "{}", i),
            Bound::Float(n) => write!(f, "{}", n),
            Bound::Text(s) => write!(f, "{:?}", s),
        }
    }
}

macro_rules! bound_from {
    ($variant:ident, $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Bound {
                fn from(n: $t) -> Self {
                    Bound::$variant(<$target>::from(n))
                }
            }
        )*
    };
}

bound_from!(Integer, i128: i8, i16, i32, i64, u8, u16, u32, u64);
bound_from!(Float, f64: f32, f64);

impl From<usize> for Bound {
    fn from(n: usize) -> Self {
        // usize is at most 64 bits on every supported target
        Bound::Integer(n as i128)
    }
}

impl From<&str> for Bound {
    fn from(s: &str) -> Self {
        Bound::Text(s.to_string())
    }
}

impl From<String> for Bound {
    fn from(s: String) -> Self {
        Bound::Text(s)
    }
}

/// How an input must relate to a [`Comparison`] bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordinal {
    /// `input > bound`
    GreaterThan,
    /// `input >= bound`
    GreaterThanOrEqual,
    /// `input < bound`
    LessThan,
    /// `input <= bound`
    LessThanOrEqual,
}

impl Ordinal {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Ordinal::GreaterThan => ordering == Ordering::Greater,
            Ordinal::GreaterThanOrEqual => ordering != Ordering::Less,
            Ordinal::LessThan => ordering == Ordering::Less,
            Ordinal::LessThanOrEqual => ordering != Ordering::Greater,
        }
    }
}

/// Orders the input against one fixed bound.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator};
///
/// let positive = Rule::gt(0);
/// assert!(positive.is(&json!(0.5)));
///
/// let failure = positive.validate(&json!(-1)).next().unwrap();
/// assert_eq!(failure.message, "should be greater than 0, but -1");
///
/// let after_m = Rule::gte("m");
/// assert!(after_m.is(&json!("zebra")));
/// assert!(!after_m.is(&json!("apple")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    ordinal: Ordinal,
    bound: Bound,
}

impl Comparison {
    /// Creates a comparison of the input against `bound`.
    pub fn new(ordinal: Ordinal, bound: impl Into<Bound>) -> Self {
        Self {
            ordinal,
            bound: bound.into(),
        }
    }

    fn matches(&self, input: &Value) -> bool {
        self.bound
            .compare(input)
            .is_some_and(|ordering| self.ordinal.accepts(ordering))
    }
}

impl Validator for Comparison {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        if self.matches(input) {
            return pass();
        }
        fail(ValidationFailure::new(interpolate(
            messages::SHOULD_BE_BUT,
            &[self.to_string(), describe_input(input)],
        )))
    }

    fn is(&self, input: &Value) -> bool {
        self.matches(input)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relation = match self.ordinal {
            Ordinal::GreaterThan => "greater than",
            Ordinal::GreaterThanOrEqual => "greater than or equal to",
            Ordinal::LessThan => "less than",
            Ordinal::LessThanOrEqual => "less than or equal to",
        };
        write!(f, "{} {}", relation, self.bound)
    }
}

/// Requires the input to lie within `[min, max]`.
///
/// Construction fails with [`InvalidArgument`] unless `min < max` and both
/// bounds are of the same kind.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use verdict::{Rule, Validator};
///
/// let percent = Rule::between(0, 100).unwrap();
/// assert!(percent.is(&json!(100)));
///
/// let failure = percent.validate(&json!(101)).next().unwrap();
/// assert_eq!(failure.message, "should be between 0 and 100, but 101");
///
/// assert!(Rule::between(5, 5).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Between {
    min: Bound,
    max: Bound,
}

impl Between {
    /// Creates an inclusive range validator.
    pub fn new(min: impl Into<Bound>, max: impl Into<Bound>) -> Result<Self, InvalidArgument> {
        let min = min.into();
        let max = max.into();

        if min.is_text() != max.is_text() {
            return Err(InvalidArgument::MixedBounds {
                min: min.to_string(),
                max: max.to_string(),
            });
        }

        if min.order(&max) != Some(Ordering::Less) {
            return Err(InvalidArgument::Range {
                min: min.to_string(),
                max: max.to_string(),
            });
        }

        Ok(Self { min, max })
    }

    fn matches(&self, input: &Value) -> bool {
        let above_min = self
            .min
            .compare(input)
            .is_some_and(|o| o != Ordering::Less);
        let below_max = self
            .max
            .compare(input)
            .is_some_and(|o| o != Ordering::Greater);
        above_min && below_max
    }
}

impl Validator for Between {
    fn validate<'a>(&'a self, input: &'a Value) -> Failures<'a> {
        if self.matches(input) {
            return pass();
        }
        fail(ValidationFailure::new(interpolate(
            messages::SHOULD_BE_BUT,
            &[self.to_string(), describe_input(input)],
        )))
    }

    fn is(&self, input: &Value) -> bool {
        self.matches(input)
    }
}

impl fmt::Display for Between {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "between {} and {}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comparisons() {
        let gt = Comparison::new(Ordinal::GreaterThan, 5);
        let gte = Comparison::new(Ordinal::GreaterThanOrEqual, 5);
        let lt = Comparison::new(Ordinal::LessThan, 5);
        let lte = Comparison::new(Ordinal::LessThanOrEqual, 5);

        assert!(!gt.is(&json!(5)) && gt.is(&json!(6)));
        assert!(gte.is(&json!(5)) && !gte.is(&json!(4.9)));
        assert!(!lt.is(&json!(5)) && lt.is(&json!(-1)));
        assert!(lte.is(&json!(5)) && !lte.is(&json!(5.1)));
    }

    #[test]
    fn test_comparison_rejects_other_kinds() {
        let gt = Comparison::new(Ordinal::GreaterThan, 0);
        assert!(!gt.is(&json!("1")));
        assert!(!gt.is(&json!(null)));

        let text = Comparison::new(Ordinal::LessThan, "b");
        assert!(text.is(&json!("a")));
        assert!(!text.is(&json!(0)));
    }

    #[test]
    fn test_comparison_display() {
        assert_eq!(
            Comparison::new(Ordinal::LessThanOrEqual, 2.5).to_string(),
            "less than or equal to 2.5"
        );
        assert_eq!(
            Comparison::new(Ordinal::GreaterThan, "a").to_string(),
            "greater than \"a\""
        );
    }

    #[test]
    fn test_between_is_inclusive() {
        let range = Between::new(-127, 128).unwrap();
        assert!(range.is(&json!(-127)));
        assert!(range.is(&json!(128)));
        assert!(!range.is(&json!(200)));
        assert!(!range.is(&json!(-128)));
        assert_eq!(range.to_string(), "between -127 and 128");
    }

    #[test]
    fn test_between_rejects_inverted_or_empty_range() {
        assert!(matches!(
            Between::new(10, 1),
            Err(InvalidArgument::Range { .. })
        ));
        assert!(matches!(
            Between::new(3, 3),
            Err(InvalidArgument::Range { .. })
        ));
        assert!(matches!(
            Between::new("b", "a"),
            Err(InvalidArgument::Range { .. })
        ));
        assert!(matches!(
            Between::new(f64::NAN, 1.0),
            Err(InvalidArgument::Range { .. })
        ));
    }

    #[test]
    fn test_integer_bounds_are_exact() {
        let top = Between::new(u64::MAX - 1, u64::MAX).unwrap();
        assert!(top.is(&json!(u64::MAX)));
        assert!(!top.is(&json!(u64::MAX - 2)));
        assert_eq!(top.to_string(), format!("between {} and {}", u64::MAX - 1, u64::MAX));

        let floor = Comparison::new(Ordinal::GreaterThan, i64::MIN);
        assert!(floor.is(&json!(i64::MIN + 1)));
        assert!(!floor.is(&json!(i64::MIN)));
        assert!(floor.is(&json!(u64::MAX)));
    }

    #[test]
    fn test_mixed_numeric_bounds() {
        let range = Between::new(0, 2.5).unwrap();
        assert!(range.is(&json!(2)));
        assert!(range.is(&json!(2.5)));
        assert!(!range.is(&json!(2.6)));
        assert!(matches!(
            Between::new(1.5, 1),
            Err(InvalidArgument::Range { .. })
        ));
    }

    #[test]
    fn test_between_rejects_mixed_bounds() {
        assert!(matches!(
            Between::new(1, "z"),
            Err(InvalidArgument::MixedBounds { .. })
        ));
    }

    #[test]
    fn test_between_failure_is_at_root() {
        let failures: Vec<_> = Between::new(1, 10)
            .unwrap()
            .validate(&json!(11))
            .collect();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].instance_path.is_root());
        assert_eq!(failures[0].message, "should be between 1 and 10, but 11");
    }
}
