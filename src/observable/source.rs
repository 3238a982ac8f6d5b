//! Lazily subscribed observables.

use std::fmt;
use std::sync::Arc;

use super::observer::Sink;
use super::{EmissionProgram, FnObserver, ObservableStream, Observer, Payload, Subscription};
#[cfg(test)]
use super::Notification;

/// Where an observable's events come from.
pub(crate) trait Source<T, E>: Send + Sync {
    /// Connect a new subscriber.
    fn attach(&self, sink: Sink<T, E>);
}

/// A lazily subscribed, push-based stream of values.
///
/// Nothing happens until [`subscribe`](Self::subscribe) is called; each
/// subscription gets its own delivery of the underlying source.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use testkit_autospy::observable::Observable;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
///
/// Observable::<&str, ()>::of("hi").subscribe_next(move |v| sink.lock().unwrap().push(v));
/// assert_eq!(*seen.lock().unwrap(), vec!["hi"]);
/// ```
pub struct Observable<T, E> {
    source: Arc<dyn Source<T, E>>,
}

impl<T: Payload, E: Payload> Observable<T, E> {
    pub(crate) fn from_source(source: Arc<dyn Source<T, E>>) -> Self {
        Self { source }
    }

    /// Replay `program` onto every subscriber, synchronously on subscribe.
    #[must_use]
    pub fn from_program(program: EmissionProgram<T, E>) -> Self {
        Self::from_source(Arc::new(ProgramSource { program }))
    }

    /// Emit one value, then complete.
    #[must_use]
    pub fn of(value: T) -> Self {
        Self::from_program(EmissionProgram::one_shot(value))
    }

    /// Fail immediately.
    #[must_use]
    pub fn throw(error: E) -> Self {
        Self::from_program(EmissionProgram::error(error))
    }

    /// Complete immediately.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_program(EmissionProgram::complete())
    }

    /// Never emit and never terminate.
    #[must_use]
    pub fn never() -> Self {
        Self::from_program(EmissionProgram::from_events(Vec::new()))
    }

    /// Build the real observable at subscription time.
    pub fn defer<F>(factory: F) -> Self
    where
        F: Fn() -> Observable<T, E> + Send + Sync + 'static,
    {
        Self::from_source(Arc::new(DeferSource { factory }))
    }

    /// Subscribe an observer.
    pub fn subscribe<O>(&self, observer: O) -> Subscription
    where
        O: Observer<T, E> + 'static,
    {
        let sink = Sink::new(Box::new(observer));
        let subscription = sink.subscription();
        self.source.attach(sink);
        subscription
    }

    /// Subscribe with a callback for values only.
    pub fn subscribe_next<F>(&self, on_next: F) -> Subscription
    where
        F: FnMut(T) + Send + 'static,
    {
        self.subscribe(FnObserver::new(on_next))
    }

    /// Adapt into a [`futures_core::Stream`].
    #[must_use]
    pub fn into_stream(self) -> ObservableStream<T, E> {
        ObservableStream::new(&self)
    }
}

impl<T, E> Clone for Observable<T, E> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<T, E> fmt::Debug for Observable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable").finish_non_exhaustive()
    }
}

struct ProgramSource<T, E> {
    program: EmissionProgram<T, E>,
}

impl<T: Payload, E: Payload> Source<T, E> for ProgramSource<T, E> {
    fn attach(&self, sink: Sink<T, E>) {
        for event in self.program.events() {
            if sink.is_closed() {
                break;
            }
            sink.deliver(event.clone());
        }
    }
}

struct DeferSource<F> {
    factory: F,
}

impl<T, E, F> Source<T, E> for DeferSource<F>
where
    T: Payload,
    E: Payload,
    F: Fn() -> Observable<T, E> + Send + Sync,
{
    fn attach(&self, sink: Sink<T, E>) {
        (self.factory)().source.attach(sink);
    }
}

/// Collects every notification; shared by the observable tests.
#[cfg(test)]
pub(crate) struct Recorder<T, E>(pub(crate) Arc<parking_lot::Mutex<Vec<Notification<T, E>>>>);

#[cfg(test)]
impl<T: Send, E: Send> Observer<T, E> for Recorder<T, E> {
    fn next(&mut self, value: T) {
        self.0.lock().push(Notification::Next(value));
    }
    fn error(&mut self, error: E) {
        self.0.lock().push(Notification::Error(error));
    }
    fn complete(&mut self) {
        self.0.lock().push(Notification::Complete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn record<T: Payload, E: Payload>(
        observable: &Observable<T, E>,
    ) -> (Arc<Mutex<Vec<Notification<T, E>>>>, Subscription) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sub = observable.subscribe(Recorder(Arc::clone(&log)));
        (log, sub)
    }

    #[test]
    fn test_of_emits_then_completes() {
        let (log, sub) = record(&Observable::<i32, String>::of(3));
        assert_eq!(*log.lock(), vec![Notification::Next(3), Notification::Complete]);
        assert!(sub.is_closed());
    }

    #[test]
    fn test_events_after_error_are_dropped() {
        let program = EmissionProgram::from_events(vec![
            Notification::Next(1),
            Notification::Error("boom".to_string()),
            Notification::Next(2),
            Notification::Complete,
        ]);
        let (log, _sub) = record(&Observable::from_program(program));
        assert_eq!(
            *log.lock(),
            vec![Notification::Next(1), Notification::Error("boom".to_string())]
        );
    }

    #[test]
    fn test_next_program_stays_open() {
        let (log, sub) = record(&Observable::<i32, String>::from_program(EmissionProgram::next(4)));
        assert_eq!(*log.lock(), vec![Notification::Next(4)]);
        assert!(!sub.is_closed());
    }

    #[test]
    fn test_each_subscription_replays() {
        let observable = Observable::<i32, String>::of(1);
        let (first, _) = record(&observable);
        let (second, _) = record(&observable);
        assert_eq!(*first.lock(), *second.lock());
    }

    #[test]
    fn test_never_delivers_nothing() {
        let (log, sub) = record(&Observable::<i32, String>::never());
        assert!(log.lock().is_empty());
        assert!(!sub.is_closed());
    }

    #[test]
    fn test_defer_resolves_at_subscribe_time() {
        let current = Arc::new(Mutex::new(1));
        let factory_state = Arc::clone(&current);
        let observable =
            Observable::<i32, String>::defer(move || Observable::of(*factory_state.lock()));

        *current.lock() = 2;
        let (log, _) = record(&observable);
        assert_eq!(log.lock()[0], Notification::Next(2));
    }
}
