//! Spies for observable-valued properties.

use serde_json::Value;

use crate::observable::{Notification, Observable, Payload};
use crate::spy::{BehaviorConfig, ExternalStreams, SpyMethod};

/// A property whose value is an observable.
///
/// Every subscription is recorded as a call without arguments. The
/// returned observable resolves the configuration current at subscription
/// time, so configuring after reading still takes effect. An unconfigured
/// property never emits.
///
/// # Example
///
/// ```rust
/// use testkit_autospy::assertions::subscribe_spy_to;
/// use testkit_autospy::class::PropertySpy;
/// use serde_json::json;
///
/// let prop: PropertySpy = PropertySpy::new("observableProp");
/// let observable = prop.observable();
/// prop.next_one_time_with(json!("FAKE"));
///
/// let spy = subscribe_spy_to(&observable);
/// assert_eq!(spy.last_value(), Some(json!("FAKE")));
/// assert!(spy.received_complete());
/// ```
#[derive(Debug, Clone)]
pub struct PropertySpy<T = Value, E = Value> {
    spy: SpyMethod<T, E>,
}

impl<T: Payload, E: Payload> PropertySpy<T, E> {
    /// Create an unconfigured property spy.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_spy(SpyMethod::new(name, crate::spy::MemberKind::ObservableProperty))
    }

    pub(crate) fn from_spy(spy: SpyMethod<T, E>) -> Self {
        Self { spy }
    }

    /// The property name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.spy.name()
    }

    /// Read the property.
    #[must_use]
    pub fn observable(&self) -> Observable<T, E> {
        let spy = self.spy.clone();
        Observable::defer(move || {
            spy.invoke(Vec::new())
                .into_observable()
                .unwrap_or_else(Observable::never)
        })
    }

    /// The underlying spy, for call inspection.
    #[must_use]
    pub fn spy(&self) -> &SpyMethod<T, E> {
        &self.spy
    }

    fn config(&self) -> BehaviorConfig<'_, T, E> {
        self.spy.and()
    }

    /// Emit `value` and stay open.
    pub fn next_with(&self, value: T) {
        self.config().next_with(value);
    }

    /// Emit `value` and complete.
    pub fn next_one_time_with(&self, value: T) {
        self.config().next_one_time_with(value);
    }

    /// Fail with `error`.
    pub fn throw_with(&self, error: E) {
        self.config().throw_with(error);
    }

    /// Complete without emitting.
    pub fn complete(&self) {
        self.config().complete();
    }

    /// Replay `events` in order.
    pub fn emit(&self, events: Vec<Notification<T, E>>) {
        self.config().emit(events);
    }

    /// Give every subscriber its own subject, reachable through the handle.
    pub fn return_subject(&self) -> ExternalStreams<T, E> {
        self.config().return_subject()
    }
}
