//! Observers, notifications and subscriptions.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// One event delivered to an observer.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification<T, E> {
    /// A value.
    Next(T),
    /// Terminates the stream in error.
    Error(E),
    /// Terminates the stream successfully.
    Complete,
}

impl<T, E> Notification<T, E> {
    /// Whether this notification ends the stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }
}

/// Receives the events of an [`Observable`](super::Observable).
///
/// After `error` or `complete` has been called, no further method is called.
///
/// # Example
///
/// ```rust
/// use testkit_autospy::observable::{Observable, Observer};
///
/// struct Count(usize);
///
/// impl Observer<i32, String> for Count {
///     fn next(&mut self, _value: i32) {
///         self.0 += 1;
///     }
///     fn error(&mut self, _error: String) {}
///     fn complete(&mut self) {}
/// }
///
/// let sub = Observable::<i32, String>::of(7).subscribe(Count(0));
/// assert!(sub.is_closed());
/// ```
pub trait Observer<T, E>: Send {
    /// Called for every emitted value.
    fn next(&mut self, value: T);

    /// Called once when the stream fails.
    fn error(&mut self, error: E);

    /// Called once when the stream completes.
    fn complete(&mut self);
}

/// Observer built from a value callback; errors and completion are ignored.
pub struct FnObserver<F> {
    on_next: F,
}

impl<F> FnObserver<F> {
    /// Wrap a value callback.
    pub fn new(on_next: F) -> Self {
        Self { on_next }
    }
}

impl<T, E, F> Observer<T, E> for FnObserver<F>
where
    F: FnMut(T) + Send,
{
    fn next(&mut self, value: T) {
        (self.on_next)(value);
    }

    fn error(&mut self, _error: E) {}

    fn complete(&mut self) {}
}

/// Anything a [`Subscription`] can close.
trait Closable: Send + Sync {
    fn close(&self);
    fn is_closed(&self) -> bool;
}

struct SinkState<T, E> {
    /// `None` once closed, or while a notification is in flight.
    observer: Option<Box<dyn Observer<T, E>>>,
    /// Notifications raised from inside an observer callback.
    queue: VecDeque<Notification<T, E>>,
    delivering: bool,
    unsubscribed: bool,
}

struct SinkInner<T, E> {
    state: Mutex<SinkState<T, E>>,
    /// Set once a terminal event is accepted or the subscriber leaves.
    closed: AtomicBool,
}

impl<T: Send, E: Send> Closable for SinkInner<T, E> {
    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
        let observer = {
            let mut state = self.state.lock();
            state.unsubscribed = true;
            state.queue.clear();
            state.observer.take()
        };
        drop(observer);
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

/// One subscriber's delivery endpoint.
///
/// Guarantees the observer sees nothing after a terminal event or after
/// unsubscription. The observer is taken out of the lock while it runs so it
/// may unsubscribe itself, or push into its own source, from inside a
/// callback; notifications raised meanwhile are queued and delivered in order
/// before the outer call returns.
pub(crate) struct Sink<T, E> {
    inner: Arc<SinkInner<T, E>>,
}

impl<T: Send + 'static, E: Send + 'static> Sink<T, E> {
    pub(crate) fn new(observer: Box<dyn Observer<T, E>>) -> Self {
        Self {
            inner: Arc::new(SinkInner {
                state: Mutex::new(SinkState {
                    observer: Some(observer),
                    queue: VecDeque::new(),
                    delivering: false,
                    unsubscribed: false,
                }),
                closed: AtomicBool::new(false),
            }),
        }
    }

    pub(crate) fn subscription(&self) -> Subscription {
        Subscription {
            handle: Arc::clone(&self.inner) as Arc<dyn Closable>,
        }
    }

    pub(crate) fn deliver(&self, notification: Notification<T, E>) {
        {
            let mut state = self.inner.state.lock();
            if self.is_closed() {
                return;
            }
            if notification.is_terminal() {
                self.inner.closed.store(true, Ordering::SeqCst);
            }
            state.queue.push_back(notification);
            if state.delivering {
                return;
            }
            state.delivering = true;
        }

        loop {
            let (mut observer, notification) = {
                let mut state = self.inner.state.lock();
                let Some(notification) = state.queue.pop_front() else {
                    state.delivering = false;
                    return;
                };
                let Some(observer) = state.observer.take() else {
                    state.queue.clear();
                    state.delivering = false;
                    return;
                };
                (observer, notification)
            };

            let terminal = notification.is_terminal();
            match notification {
                Notification::Next(value) => observer.next(value),
                Notification::Error(error) => observer.error(error),
                Notification::Complete => observer.complete(),
            }

            let mut state = self.inner.state.lock();
            if terminal || state.unsubscribed {
                state.queue.clear();
                state.delivering = false;
                drop(state);
                drop(observer);
                return;
            }
            state.observer = Some(observer);
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }
}

impl<T, E> Clone for Sink<T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Handle to an active subscription.
///
/// Dropping a `Subscription` does not unsubscribe; call
/// [`unsubscribe`](Self::unsubscribe) to stop delivery.
#[derive(Clone)]
pub struct Subscription {
    handle: Arc<dyn Closable>,
}

impl Subscription {
    /// Stop delivering events to this subscriber.
    pub fn unsubscribe(&self) {
        self.handle.close();
    }

    /// Whether the subscription was unsubscribed or its stream terminated.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.handle.is_closed()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
