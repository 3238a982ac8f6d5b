//! The spy method engine.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde_json::Value;

use super::behavior::{Behavior, Outcome};
use super::config::BehaviorConfig;
use super::matcher::{self, render_args};
use super::registry::CallRegistry;
use super::Args;
use crate::observable::{Observable, Payload};
use crate::report::{ArgumentErrorReporter, ArgumentMismatch, PanicReporter};

/// How a class member is exposed, as classified by reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKind {
    /// A method returning a plain value.
    PlainMethod,
    /// A method returning an observable.
    ObservableMethod,
    /// A property holding an observable.
    ObservableProperty,
}

impl MemberKind {
    /// Whether the member yields an observable.
    #[must_use]
    pub fn is_observable(self) -> bool {
        !matches!(self, Self::PlainMethod)
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlainMethod => write!(f, "plain method"),
            Self::ObservableMethod => write!(f, "observable method"),
            Self::ObservableProperty => write!(f, "observable property"),
        }
    }
}

/// A record of a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    /// The arguments passed to the call.
    pub args: Args,
    /// When the call was made (relative to spy creation).
    pub timestamp: Duration,
}

struct SpyState<T, E> {
    registry: CallRegistry<T, E>,
    calls: Vec<CallRecord>,
}

/// A call-tracking stand-in for one class member.
///
/// Every invocation is recorded, then resolved against the configured
/// behaviors: the first conditional entry whose arguments match, else the
/// default, else [`Outcome::Unconfigured`]. Calls that match none of the
/// required argument lists are handed to the injected
/// [`ArgumentErrorReporter`] once each, independently of the outcome.
///
/// Clones share calls and configuration.
///
/// # Example
///
/// ```rust
/// use testkit_autospy::args;
/// use testkit_autospy::assertions::subscribe_spy_to;
/// use testkit_autospy::spy::{MemberKind, SpyMethod};
/// use serde_json::json;
///
/// let spy: SpyMethod = SpyMethod::new("getObservable", MemberKind::ObservableMethod);
/// spy.and().next_with(json!("default"));
/// spy.called_with(args![1, 2]).next_one_time_with(json!("one"));
///
/// let matched = subscribe_spy_to(&spy.invoke_observable(args![1, 2]).unwrap());
/// assert_eq!(matched.last_value(), Some(json!("one")));
/// assert!(matched.received_complete());
///
/// let fallback = subscribe_spy_to(&spy.invoke_observable(args![9]).unwrap());
/// assert_eq!(fallback.last_value(), Some(json!("default")));
/// assert!(!fallback.received_complete());
///
/// assert_eq!(spy.call_count(), 2);
/// ```
pub struct SpyMethod<T = Value, E = Value> {
    name: Arc<str>,
    kind: MemberKind,
    state: Arc<Mutex<SpyState<T, E>>>,
    reporter: Arc<dyn ArgumentErrorReporter>,
    created_at: Instant,
}

impl<T: Payload, E: Payload> SpyMethod<T, E> {
    /// Create a spy method that panics on required-argument violations.
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self::with_reporter(name, kind, Arc::new(PanicReporter))
    }

    /// Create a spy method with an explicit reporter.
    pub fn with_reporter(
        name: impl Into<String>,
        kind: MemberKind,
        reporter: Arc<dyn ArgumentErrorReporter>,
    ) -> Self {
        let name: String = name.into();
        Self {
            name: Arc::from(name),
            kind,
            state: Arc::new(Mutex::new(SpyState {
                registry: CallRegistry::new(),
                calls: Vec::new(),
            })),
            reporter,
            created_at: Instant::now(),
        }
    }

    /// The member name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The member classification.
    #[must_use]
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Call the spy method.
    ///
    /// A required-argument violation is reported after the outcome has been
    /// produced; the outcome is returned regardless.
    pub fn invoke(&self, args: Args) -> Outcome<T, E> {
        let (behavior, violation) = {
            let mut state = self.state.lock();
            let resolution = state.registry.resolve(&args);
            tracing::trace!(
                method = %self.name,
                resolution = resolution.label(),
                "behavior resolved"
            );
            let behavior = resolution.behavior().cloned();
            let violation = state.registry.check_required_violation(&args);
            state.calls.push(CallRecord {
                args: args.clone(),
                timestamp: self.created_at.elapsed(),
            });
            (behavior, violation)
        };

        tracing::debug!(
            method = %self.name,
            args = %render_args(&args),
            configured = behavior.is_some(),
            "spy method invoked"
        );

        let outcome = behavior.map_or(Outcome::Unconfigured, |b| b.realize());

        if let Some(expected) = violation {
            let mismatch = ArgumentMismatch {
                method: self.name.to_string(),
                actual: args,
                expected,
            };
            tracing::debug!(method = %self.name, "required arguments not met");
            self.reporter.report_argument_mismatch(&mismatch);
        }

        outcome
    }

    /// Call the spy method and take the returned stream, if any.
    pub fn invoke_observable(&self, args: Args) -> Option<Observable<T, E>> {
        self.invoke(args).into_observable()
    }

    /// Replace the default behavior.
    pub fn set_default(&self, behavior: Behavior<T, E>) {
        tracing::debug!(method = %self.name, "default behavior set");
        self.state.lock().registry.set_default(behavior);
    }

    /// Register a behavior for calls with exactly `args`.
    ///
    /// With `required`, every call with other arguments is reported.
    pub fn add_conditional(&self, args: Args, behavior: Behavior<T, E>, required: bool) {
        tracing::debug!(
            method = %self.name,
            args = %render_args(&args),
            required,
            "conditional behavior added"
        );
        self.state
            .lock()
            .registry
            .add_conditional(args, behavior, required);
    }

    /// Configure the default behavior.
    pub fn and(&self) -> BehaviorConfig<'_, T, E> {
        BehaviorConfig::default_for(self)
    }

    /// Configure a behavior for calls with exactly `args`.
    ///
    /// Calls with other arguments are not reported.
    pub fn called_with(&self, args: Args) -> BehaviorConfig<'_, T, E> {
        BehaviorConfig::conditional_for(self, args, false)
    }

    /// Configure a behavior for calls with exactly `args`, and report every
    /// call that matches no required argument list.
    pub fn must_be_called_with(&self, args: Args) -> BehaviorConfig<'_, T, E> {
        BehaviorConfig::conditional_for(self, args, true)
    }

    /// Whether any behavior has been configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.state.lock().registry.is_configured()
    }

    /// Drop every configured behavior; the call log is kept.
    pub fn reset_behaviors(&self) {
        self.state.lock().registry.clear();
    }

    /// Get all recorded calls.
    pub fn calls(&self) -> Vec<CallRecord> {
        self.state.lock().calls.clone()
    }

    /// Get the number of times the spy was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    /// Check if the spy was called at least once.
    #[must_use]
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Check if the spy was called exactly N times.
    #[must_use]
    pub fn was_called_times(&self, n: usize) -> bool {
        self.call_count() == n
    }

    /// Check if any call had arguments deep-equal to `args`.
    #[must_use]
    pub fn was_called_with(&self, args: &[Value]) -> bool {
        self.state
            .lock()
            .calls
            .iter()
            .any(|c| matcher::matches(args, &c.args))
    }

    /// Get the Nth call record (0-indexed).
    pub fn nth_call(&self, n: usize) -> Option<CallRecord> {
        self.state.lock().calls.get(n).cloned()
    }

    /// Get the most recent call record.
    pub fn last_call(&self) -> Option<CallRecord> {
        self.state.lock().calls.last().cloned()
    }

    /// Reset the call history.
    pub fn reset_calls(&self) {
        self.state.lock().calls.clear();
    }
}

impl<T, E> Clone for SpyMethod<T, E> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            kind: self.kind,
            state: Arc::clone(&self.state),
            reporter: Arc::clone(&self.reporter),
            created_at: self.created_at,
        }
    }
}

impl<T, E> fmt::Debug for SpyMethod<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SpyMethod")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("call_count", &state.calls.len())
            .field("calls", &state.calls)
            .finish_non_exhaustive()
    }
}
