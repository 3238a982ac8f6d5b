//! Scripted emission programs.

use super::Notification;

/// An ordered script of notifications replayed onto every new subscriber.
///
/// Events after the first terminal event are never delivered.
///
/// # Example
///
/// ```rust
/// use testkit_autospy::observable::{EmissionProgram, Notification};
///
/// let program = EmissionProgram::<i32, String>::one_shot(5);
/// assert!(program.is_one_shot());
/// assert_eq!(
///     program.events(),
///     &[Notification::Next(5), Notification::Complete]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionProgram<T, E> {
    events: Vec<Notification<T, E>>,
    one_shot: bool,
}

impl<T, E> EmissionProgram<T, E> {
    /// Build a program from an explicit event list.
    #[must_use]
    pub fn from_events(events: Vec<Notification<T, E>>) -> Self {
        Self {
            events,
            one_shot: false,
        }
    }

    /// Emit `value` and stay open.
    #[must_use]
    pub fn next(value: T) -> Self {
        Self::from_events(vec![Notification::Next(value)])
    }

    /// Emit `value` then complete.
    #[must_use]
    pub fn one_shot(value: T) -> Self {
        Self {
            events: vec![Notification::Next(value), Notification::Complete],
            one_shot: true,
        }
    }

    /// Fail immediately with `error`.
    #[must_use]
    pub fn error(error: E) -> Self {
        Self::from_events(vec![Notification::Error(error)])
    }

    /// Complete without emitting.
    #[must_use]
    pub fn complete() -> Self {
        Self::from_events(vec![Notification::Complete])
    }

    /// The events in delivery order.
    #[must_use]
    pub fn events(&self) -> &[Notification<T, E>] {
        &self.events
    }

    /// Whether this program was built with [`one_shot`](Self::one_shot).
    #[must_use]
    pub fn is_one_shot(&self) -> bool {
        self.one_shot
    }

    /// Whether a subscriber will see the stream end.
    #[must_use]
    pub fn terminates(&self) -> bool {
        self.events.iter().any(Notification::is_terminal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_never_terminates() {
        let program = EmissionProgram::<i32, String>::next(1);
        assert!(!program.terminates());
        assert!(!program.is_one_shot());
    }

    #[test]
    fn test_one_shot_ends_with_complete() {
        let program = EmissionProgram::<i32, String>::one_shot(1);
        assert_eq!(program.events().last(), Some(&Notification::Complete));
        assert!(program.terminates());
    }

    #[test]
    fn test_error_and_complete_terminate() {
        assert!(EmissionProgram::<i32, String>::error("e".into()).terminates());
        assert!(EmissionProgram::<i32, String>::complete().terminates());
    }
}
