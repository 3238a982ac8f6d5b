//! Multicast subjects driven imperatively by tests.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use super::observer::Sink;
use super::source::Source;
use super::{Notification, Observable, Observer, Payload};

struct SubjectState<T, E> {
    sinks: Vec<Sink<T, E>>,
    terminal: Option<Notification<T, E>>,
    /// Most recent value, kept only by replaying subjects.
    latest: Option<T>,
    replay: bool,
}

/// A multicast stream pushed from the outside.
///
/// Every value passed to [`next`](Self::next) reaches all current subscribers
/// synchronously, in push order. Once [`error`](Self::error) or
/// [`complete`](Self::complete) is called the subject is stopped: later pushes
/// are ignored and late subscribers receive the terminal event immediately.
/// A [`replaying`](Self::replaying) subject also hands late subscribers its
/// most recent value first.
///
/// Clones share the same stream.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use testkit_autospy::observable::Subject;
///
/// let subject = Subject::<i32, String>::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&seen);
/// subject.as_observable().subscribe_next(move |v| sink.lock().unwrap().push(v));
///
/// subject.next(1);
/// subject.next(2);
/// assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
/// ```
pub struct Subject<T, E> {
    state: Arc<Mutex<SubjectState<T, E>>>,
}

impl<T: Payload, E: Payload> Subject<T, E> {
    /// Create an open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_replay(false)
    }

    /// Create a subject that hands its most recent value to every new
    /// subscriber before any live event.
    ///
    /// ```rust
    /// use testkit_autospy::assertions::subscribe_spy_to;
    /// use testkit_autospy::observable::Subject;
    ///
    /// let subject = Subject::<i32, String>::replaying();
    /// subject.next(1);
    /// subject.next(2);
    ///
    /// let spy = subscribe_spy_to(&subject.as_observable());
    /// assert_eq!(spy.values(), vec![2]);
    /// ```
    #[must_use]
    pub fn replaying() -> Self {
        Self::with_replay(true)
    }

    fn with_replay(replay: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                sinks: Vec::new(),
                terminal: None,
                latest: None,
                replay,
            })),
        }
    }

    /// Push a value to every subscriber.
    pub fn next(&self, value: T) {
        let sinks = {
            let mut state = self.state.lock();
            if state.terminal.is_some() {
                return;
            }
            if state.replay {
                state.latest = Some(value.clone());
            }
            state.sinks.retain(|s| !s.is_closed());
            state.sinks.clone()
        };
        for sink in sinks {
            sink.deliver(Notification::Next(value.clone()));
        }
    }

    /// Fail the stream.
    pub fn error(&self, error: E) {
        self.stop(Notification::Error(error));
    }

    /// Complete the stream.
    pub fn complete(&self) {
        self.stop(Notification::Complete);
    }

    fn stop(&self, terminal: Notification<T, E>) {
        let sinks = {
            let mut state = self.state.lock();
            if state.terminal.is_some() {
                return;
            }
            state.terminal = Some(terminal.clone());
            std::mem::take(&mut state.sinks)
        };
        for sink in sinks {
            sink.deliver(terminal.clone());
        }
    }

    /// Whether `error` or `complete` has been called.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.state.lock().terminal.is_some()
    }

    /// Number of subscribers still receiving events.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.state
            .lock()
            .sinks
            .iter()
            .filter(|s| !s.is_closed())
            .count()
    }

    /// The observable side of this subject.
    #[must_use]
    pub fn as_observable(&self) -> Observable<T, E> {
        Observable::from_source(Arc::new(SubjectSource {
            state: Arc::clone(&self.state),
        }))
    }
}

impl<T: Payload, E: Payload> Default for Subject<T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, E> Clone for Subject<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, E> fmt::Debug for Subject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Subject")
            .field("observers", &state.sinks.len())
            .field("stopped", &state.terminal.is_some())
            .finish()
    }
}

// A subject can itself subscribe to another observable and forward its events.
impl<T: Payload, E: Payload> Observer<T, E> for Subject<T, E> {
    fn next(&mut self, value: T) {
        Subject::next(self, value);
    }

    fn error(&mut self, error: E) {
        Subject::error(self, error);
    }

    fn complete(&mut self) {
        Subject::complete(self);
    }
}

struct SubjectSource<T, E> {
    state: Arc<Mutex<SubjectState<T, E>>>,
}

impl<T: Payload, E: Payload> Source<T, E> for SubjectSource<T, E> {
    fn attach(&self, sink: Sink<T, E>) {
        let (latest, terminal) = {
            let mut state = self.state.lock();
            if state.terminal.is_none() {
                state.sinks.push(sink.clone());
            }
            (state.latest.clone(), state.terminal.clone())
        };
        if let Some(value) = latest {
            sink.deliver(Notification::Next(value));
        }
        if let Some(terminal) = terminal {
            sink.deliver(terminal);
        }
    }
}
