//! Argument matching for conditional spy behavior.
//!
//! Arguments are compared with deep structural equality:
//!
//! - objects field by field, regardless of key order
//! - arrays element by element, order and length sensitive
//! - numbers by numeric value, so `1` and `1.0` are equal
//! - every other primitive by value
//!
//! There is no wildcard or partial matching.
//!
//! # Example
//!
//! ```rust
//! use testkit_autospy::args;
//! use testkit_autospy::spy::matcher::{matches, ArgsMatcher, Matcher};
//!
//! assert!(matches(&args![1, {"a": [true]}], &args![1.0, {"a": [true]}]));
//! assert!(!matches(&args![1, 2], &args![2, 1]));
//!
//! let m = ArgsMatcher::new(args!["id"]);
//! assert!(m.matches(&args!["id"][..]));
//! ```

use serde_json::Value;

use super::Args;

/// A matcher for testing values.
///
/// Implemented by [`ArgsMatcher`] so that registry lookups and mismatch
/// diagnostics share one description of what was expected.
pub trait Matcher<T: ?Sized> {
    /// Check if the value matches.
    fn matches(&self, value: &T) -> bool;

    /// Describe what this matcher expects.
    fn describe(&self) -> String;

    /// Describe why a value didn't match.
    fn describe_mismatch(&self, value: &T) -> String;
}

/// Compare two argument lists with deep structural equality.
#[must_use]
pub fn matches(expected: &[Value], actual: &[Value]) -> bool {
    expected.len() == actual.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(e, a)| deep_equal(e, a))
}

/// Compare two values with deep structural equality.
#[must_use]
pub fn deep_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(l), Value::Bool(r)) => l == r,
        (Value::String(l), Value::String(r)) => l == r,
        (Value::Number(l), Value::Number(r)) => {
            if l == r {
                return true;
            }
            match (l.as_f64(), r.as_f64()) {
                #[allow(clippy::float_cmp)]
                (Some(l), Some(r)) => l == r,
                _ => false,
            }
        }
        (Value::Array(l), Value::Array(r)) => matches(l, r),
        (Value::Object(l), Value::Object(r)) => {
            l.len() == r.len()
                && l
                    .iter()
                    .all(|(key, lv)| r.get(key).is_some_and(|rv| deep_equal(lv, rv)))
        }
        _ => false,
    }
}

/// Matcher for one expected argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgsMatcher {
    expected: Args,
}

impl ArgsMatcher {
    /// Create a matcher expecting exactly these arguments.
    #[must_use]
    pub fn new(expected: Args) -> Self {
        Self { expected }
    }

    /// The expected argument list.
    #[must_use]
    pub fn expected(&self) -> &[Value] {
        &self.expected
    }
}

impl Matcher<[Value]> for ArgsMatcher {
    fn matches(&self, value: &[Value]) -> bool {
        matches(&self.expected, value)
    }

    fn describe(&self) -> String {
        format!("called with {}", render_args(&self.expected))
    }

    fn describe_mismatch(&self, value: &[Value]) -> String {
        format!(
            "called with {} but expected {}",
            render_args(value),
            render_args(&self.expected)
        )
    }
}

/// Render an argument list the way it appears in diagnostics.
pub(crate) fn render_args(args: &[Value]) -> String {
    Value::Array(args.to_vec()).to_string()
}
