//! Typed configuration builder for spy methods.
//!
//! Returned by [`SpyMethod::and`], [`SpyMethod::called_with`] and
//! [`SpyMethod::must_be_called_with`]. Each setter consumes the builder and
//! registers exactly one behavior on its target.

use super::behavior::{Behavior, ExternalStreams};
use super::method::SpyMethod;
use super::Args;
use crate::observable::{EmissionProgram, Notification, Payload};

enum Target {
    Default,
    Conditional { args: Args, required: bool },
}

/// Sets the behavior for the default slot or for one argument list.
#[must_use = "a configuration builder does nothing until a behavior is set"]
pub struct BehaviorConfig<'a, T, E> {
    spy: &'a SpyMethod<T, E>,
    target: Target,
}

impl<'a, T: Payload, E: Payload> BehaviorConfig<'a, T, E> {
    pub(crate) fn default_for(spy: &'a SpyMethod<T, E>) -> Self {
        Self {
            spy,
            target: Target::Default,
        }
    }

    pub(crate) fn conditional_for(spy: &'a SpyMethod<T, E>, args: Args, required: bool) -> Self {
        Self {
            spy,
            target: Target::Conditional { args, required },
        }
    }

    /// Register an arbitrary behavior.
    pub fn behaves(self, behavior: Behavior<T, E>) {
        match self.target {
            Target::Default => self.spy.set_default(behavior),
            Target::Conditional { args, required } => {
                self.spy.add_conditional(args, behavior, required);
            }
        }
    }

    /// Return `value` synchronously.
    pub fn returns(self, value: T) {
        self.behaves(Behavior::Value(value));
    }

    /// Fail synchronously with `error`.
    pub fn throws(self, error: E) {
        self.behaves(Behavior::Error(error));
    }

    /// Return a stream that emits `value` and stays open.
    pub fn next_with(self, value: T) {
        self.behaves(Behavior::Program(EmissionProgram::next(value)));
    }

    /// Return a stream that emits `value` and completes.
    pub fn next_one_time_with(self, value: T) {
        self.behaves(Behavior::Program(EmissionProgram::one_shot(value)));
    }

    /// Return a stream that fails with `error`.
    pub fn throw_with(self, error: E) {
        self.behaves(Behavior::Program(EmissionProgram::error(error)));
    }

    /// Return a stream that completes without emitting.
    pub fn complete(self) {
        self.behaves(Behavior::Program(EmissionProgram::complete()));
    }

    /// Return a stream that replays `events` in order.
    pub fn emit(self, events: Vec<Notification<T, E>>) {
        self.behaves(Behavior::Program(EmissionProgram::from_events(events)));
    }

    /// Return a fresh subject per call and hand the test a handle to them.
    pub fn return_subject(self) -> ExternalStreams<T, E> {
        let streams = ExternalStreams::new();
        self.behaves(Behavior::ExternalSubject(streams.clone()));
        streams
    }
}
