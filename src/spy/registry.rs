//! Per-method store of argument-scoped and default behaviors.

use serde_json::Value;

use super::behavior::Behavior;
use super::matcher::{ArgsMatcher, Matcher};
use super::Args;

/// A behavior that applies only to calls with specific arguments.
#[derive(Debug, Clone)]
pub struct ConditionalEntry<T, E> {
    matcher: ArgsMatcher,
    required: bool,
    behavior: Behavior<T, E>,
}

impl<T, E> ConditionalEntry<T, E> {
    /// The argument list this entry applies to.
    #[must_use]
    pub fn expected(&self) -> &[Value] {
        self.matcher.expected()
    }

    /// Whether calls with other arguments must be reported.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The configured behavior.
    #[must_use]
    pub fn behavior(&self) -> &Behavior<T, E> {
        &self.behavior
    }
}

/// Which configuration applies to a call.
#[derive(Debug)]
pub enum Resolution<'a, T, E> {
    /// A conditional entry matched the arguments.
    Matched {
        /// The entry's behavior.
        behavior: &'a Behavior<T, E>,
        /// Whether the entry was registered as required.
        required: bool,
    },
    /// No entry matched; the default applies.
    Default(&'a Behavior<T, E>),
    /// Nothing applies.
    NoMatch,
}

impl<'a, T, E> Resolution<'a, T, E> {
    /// The behavior to realize, if any.
    #[must_use]
    pub fn behavior(&self) -> Option<&'a Behavior<T, E>> {
        match self {
            Self::Matched { behavior, .. } | Self::Default(behavior) => Some(*behavior),
            Self::NoMatch => None,
        }
    }

    /// Short name of the resolution, for diagnostics.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Matched { required: true, .. } => "required entry",
            Self::Matched { required: false, .. } => "optional entry",
            Self::Default(_) => "default",
            Self::NoMatch => "no match",
        }
    }
}

/// Default behavior plus conditional entries in registration order.
#[derive(Debug, Clone)]
pub struct CallRegistry<T, E> {
    default: Option<Behavior<T, E>>,
    entries: Vec<ConditionalEntry<T, E>>,
}

impl<T, E> CallRegistry<T, E> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            default: None,
            entries: Vec::new(),
        }
    }

    /// Replace the default behavior.
    pub fn set_default(&mut self, behavior: Behavior<T, E>) {
        self.default = Some(behavior);
    }

    /// Append a conditional entry.
    pub fn add_conditional(&mut self, expected: Args, behavior: Behavior<T, E>, required: bool) {
        self.entries.push(ConditionalEntry {
            matcher: ArgsMatcher::new(expected),
            required,
            behavior,
        });
    }

    /// Find the behavior for a call.
    ///
    /// The first entry, in registration order, whose arguments match wins;
    /// otherwise the default applies if one is set.
    #[must_use]
    pub fn resolve(&self, actual: &[Value]) -> Resolution<'_, T, E> {
        if let Some(entry) = self.entries.iter().find(|e| e.matcher.matches(actual)) {
            return Resolution::Matched {
                behavior: &entry.behavior,
                required: entry.required,
            };
        }
        match &self.default {
            Some(behavior) => Resolution::Default(behavior),
            None => Resolution::NoMatch,
        }
    }

    /// Check a call against the required entries.
    ///
    /// Returns the required argument lists when at least one exists and none
    /// of them matches `actual`. Whether a default or optional entry would
    /// serve the call does not matter.
    #[must_use]
    pub fn check_required_violation(&self, actual: &[Value]) -> Option<Vec<Args>> {
        let mut required = self.entries.iter().filter(|e| e.required).peekable();
        required.peek()?;

        let mut expected = Vec::new();
        for entry in required {
            if entry.matcher.matches(actual) {
                return None;
            }
            expected.push(entry.matcher.expected().to_vec());
        }
        Some(expected)
    }

    /// The current default behavior.
    #[must_use]
    pub fn default_behavior(&self) -> Option<&Behavior<T, E>> {
        self.default.as_ref()
    }

    /// Conditional entries in registration order.
    #[must_use]
    pub fn entries(&self) -> &[ConditionalEntry<T, E>] {
        &self.entries
    }

    /// Whether any required entry is registered.
    #[must_use]
    pub fn has_required(&self) -> bool {
        self.entries.iter().any(|e| e.required)
    }

    /// Whether anything has been configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.default.is_some() || !self.entries.is_empty()
    }

    /// Drop every configuration.
    pub fn clear(&mut self) {
        self.default = None;
        self.entries.clear();
    }
}

impl<T, E> Default for CallRegistry<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    type Registry = CallRegistry<&'static str, String>;

    fn value_of(resolution: &Resolution<'_, &'static str, String>) -> Option<&'static str> {
        match resolution.behavior() {
            Some(Behavior::Value(v)) => Some(*v),
            _ => None,
        }
    }

    #[test]
    fn test_empty_registry_has_no_match() {
        let registry = Registry::new();
        assert!(matches!(registry.resolve(&args![1]), Resolution::NoMatch));
        assert_eq!(registry.resolve(&args![1]).label(), "no match");
        assert!(!registry.is_configured());
    }

    #[test]
    fn test_default_applies_to_any_call() {
        let mut registry = Registry::new();
        registry.set_default(Behavior::Value("default"));
        assert!(matches!(registry.resolve(&args![1]), Resolution::Default(_)));
        assert_eq!(value_of(&registry.resolve(&[])), Some("default"));
    }

    #[test]
    fn test_last_default_wins() {
        let mut registry = Registry::new();
        registry.set_default(Behavior::Value("first"));
        registry.set_default(Behavior::Value("second"));
        assert_eq!(value_of(&registry.resolve(&args![1])), Some("second"));
    }

    #[test]
    fn test_conditional_beats_default() {
        let mut registry = Registry::new();
        registry.set_default(Behavior::Value("default"));
        registry.add_conditional(args![1, 2], Behavior::Value("x"), false);

        let resolution = registry.resolve(&args![1, 2]);
        assert!(matches!(resolution, Resolution::Matched { required: false, .. }));
        assert_eq!(value_of(&resolution), Some("x"));
        assert_eq!(value_of(&registry.resolve(&args![9])), Some("default"));
    }

    #[test]
    fn test_entries_are_independent() {
        let mut registry = Registry::new();
        registry.add_conditional(args![1, 2], Behavior::Value("x"), false);
        registry.add_conditional(args![3, 4], Behavior::Value("y"), false);

        assert_eq!(value_of(&registry.resolve(&args![3, 4])), Some("y"));
        assert_eq!(value_of(&registry.resolve(&args![1, 2])), Some("x"));
    }

    #[test]
    fn test_first_registered_match_wins() {
        let mut registry = Registry::new();
        registry.add_conditional(args!["a"], Behavior::Value("first"), false);
        registry.add_conditional(args!["a"], Behavior::Value("second"), true);

        let resolution = registry.resolve(&args!["a"]);
        assert!(matches!(resolution, Resolution::Matched { required: false, .. }));
        assert_eq!(value_of(&resolution), Some("first"));
        assert_eq!(resolution.label(), "optional entry");
    }

    #[test]
    fn test_no_violation_without_required_entries() {
        let mut registry = Registry::new();
        registry.add_conditional(args!["WRONG"], Behavior::Value("x"), false);
        assert_eq!(registry.check_required_violation(&args![1, 2]), None);
        assert!(!registry.has_required());
    }

    #[test]
    fn test_violation_lists_required_arguments() {
        let mut registry = Registry::new();
        registry.add_conditional(args!["WRONG"], Behavior::Value("x"), true);
        registry.add_conditional(args!["other"], Behavior::Value("y"), false);
        registry.add_conditional(args![7], Behavior::Value("z"), true);

        assert_eq!(
            registry.check_required_violation(&args![1, 2]),
            Some(vec![args!["WRONG"], args![7]])
        );
    }

    #[test]
    fn test_violation_reported_even_with_default() {
        let mut registry = Registry::new();
        registry.set_default(Behavior::Value("default"));
        registry.add_conditional(args!["WRONG"], Behavior::Value("x"), true);

        assert!(registry.check_required_violation(&args![9]).is_some());
        assert_eq!(value_of(&registry.resolve(&args![9])), Some("default"));
        assert_eq!(registry.resolve(&args!["WRONG"]).label(), "required entry");
        assert_eq!(registry.resolve(&args![9]).label(), "default");
    }

    #[test]
    fn test_matching_required_entry_is_not_a_violation() {
        let mut registry = Registry::new();
        registry.add_conditional(args![1], Behavior::Value("a"), true);
        registry.add_conditional(args![2], Behavior::Value("b"), true);
        assert_eq!(registry.check_required_violation(&args![2]), None);
    }

    #[test]
    fn test_clear() {
        let mut registry = Registry::new();
        registry.set_default(Behavior::Value("d"));
        registry.add_conditional(args![1], Behavior::Value("a"), true);
        registry.clear();
        assert!(!registry.is_configured());
        assert!(registry.entries().is_empty());
        assert!(registry.default_behavior().is_none());
    }
}
