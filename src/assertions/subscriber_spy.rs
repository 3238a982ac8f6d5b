// Allow must_use_candidate since spy accessors are often called for their assertions
#![allow(clippy::must_use_candidate)]

//! Subscriber spies for observing what an observable delivered.

use std::fmt::{self, Debug};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::observable::{Observable, Observer, Payload, Subscription};

struct Received<T, E> {
    values: Vec<T>,
    error: Option<E>,
    completed: bool,
}

struct SpyObserver<T, E> {
    received: Arc<Mutex<Received<T, E>>>,
}

impl<T: Send, E: Send> Observer<T, E> for SpyObserver<T, E> {
    fn next(&mut self, value: T) {
        self.received.lock().values.push(value);
    }

    fn error(&mut self, error: E) {
        self.received.lock().error = Some(error);
    }

    fn complete(&mut self) {
        self.received.lock().completed = true;
    }
}

/// Subscribe a [`SubscriberSpy`] to `observable`.
///
/// # Example
///
/// ```rust
/// use testkit_autospy::assertions::subscribe_spy_to;
/// use testkit_autospy::observable::Observable;
///
/// let spy = subscribe_spy_to(&Observable::<i32, String>::throw("bad".to_string()));
/// assert!(spy.received_error());
/// assert_eq!(spy.error(), Some("bad".to_string()));
/// ```
pub fn subscribe_spy_to<T: Payload, E: Payload>(observable: &Observable<T, E>) -> SubscriberSpy<T, E> {
    let received = Arc::new(Mutex::new(Received {
        values: Vec::new(),
        error: None,
        completed: false,
    }));
    let subscription = observable.subscribe(SpyObserver {
        received: Arc::clone(&received),
    });
    SubscriberSpy {
        received,
        subscription,
    }
}

/// Records every event a subscription received.
pub struct SubscriberSpy<T, E> {
    received: Arc<Mutex<Received<T, E>>>,
    subscription: Subscription,
}

impl<T: Clone, E: Clone> SubscriberSpy<T, E> {
    /// All values received, in order.
    pub fn values(&self) -> Vec<T> {
        self.received.lock().values.clone()
    }

    /// The first value received.
    pub fn first_value(&self) -> Option<T> {
        self.received.lock().values.first().cloned()
    }

    /// The most recent value received.
    pub fn last_value(&self) -> Option<T> {
        self.received.lock().values.last().cloned()
    }

    /// The Nth value received (0-indexed).
    pub fn value_at(&self, n: usize) -> Option<T> {
        self.received.lock().values.get(n).cloned()
    }

    /// Number of values received.
    #[must_use]
    pub fn value_count(&self) -> usize {
        self.received.lock().values.len()
    }

    /// The error the stream failed with.
    pub fn error(&self) -> Option<E> {
        self.received.lock().error.clone()
    }

    /// Whether the stream failed.
    #[must_use]
    pub fn received_error(&self) -> bool {
        self.received.lock().error.is_some()
    }

    /// Whether the stream completed.
    #[must_use]
    pub fn received_complete(&self) -> bool {
        self.received.lock().completed
    }

    /// Stop listening.
    pub fn unsubscribe(&self) {
        self.subscription.unsubscribe();
    }

    /// Whether the subscription ended, by termination or unsubscription.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.subscription.is_closed()
    }
}

impl<T: Debug, E: Debug> Debug for SubscriberSpy<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let received = self.received.lock();
        f.debug_struct("SubscriberSpy")
            .field("values", &received.values)
            .field("error", &received.error)
            .field("completed", &received.completed)
            .finish()
    }
}
