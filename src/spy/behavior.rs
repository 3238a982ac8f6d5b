//! Behavior descriptors and how they turn into call outcomes.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::observable::{EmissionProgram, Notification, Observable, Payload, Subject};

/// What a spy method does when a configuration applies.
///
/// Descriptors are never mutated after registration; configuring again
/// replaces or adds one.
#[derive(Debug)]
pub enum Behavior<T, E> {
    /// Return the value synchronously.
    Value(T),
    /// Fail synchronously with the error.
    Error(E),
    /// Return an observable that replays the program to each subscriber.
    Program(EmissionProgram<T, E>),
    /// Return a fresh subject per call, reachable through the handle.
    ExternalSubject(ExternalStreams<T, E>),
}

impl<T: Payload, E: Payload> Behavior<T, E> {
    /// Produce the outcome of one call.
    ///
    /// Every call to an observable behavior gets its own stream instance.
    #[must_use]
    pub fn realize(&self) -> Outcome<T, E> {
        match self {
            Self::Value(value) => Outcome::Value(value.clone()),
            Self::Error(error) => Outcome::Error(error.clone()),
            Self::Program(program) => Outcome::Stream(Observable::from_program(program.clone())),
            Self::ExternalSubject(streams) => Outcome::Stream(streams.open()),
        }
    }

    /// Whether calls produce a stream rather than a plain value.
    #[must_use]
    pub fn is_observable(&self) -> bool {
        matches!(self, Self::Program(_) | Self::ExternalSubject(_))
    }
}

impl<T: Clone, E: Clone> Clone for Behavior<T, E> {
    fn clone(&self) -> Self {
        match self {
            Self::Value(value) => Self::Value(value.clone()),
            Self::Error(error) => Self::Error(error.clone()),
            Self::Program(program) => Self::Program(program.clone()),
            Self::ExternalSubject(streams) => Self::ExternalSubject(streams.clone()),
        }
    }
}

/// The result of invoking a spy method.
#[derive(Debug)]
pub enum Outcome<T, E> {
    /// A plain return value.
    Value(T),
    /// A synchronous failure.
    Error(E),
    /// A stream for the caller to subscribe to.
    Stream(Observable<T, E>),
    /// No configuration applied; the neutral "nothing returned" result.
    Unconfigured,
}

impl<T, E> Outcome<T, E> {
    /// The returned stream, if any.
    #[must_use]
    pub fn into_observable(self) -> Option<Observable<T, E>> {
        match self {
            Self::Stream(observable) => Some(observable),
            _ => None,
        }
    }

    /// View a plain outcome as a `Result`.
    ///
    /// Streams and unconfigured calls yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the configured error for [`Outcome::Error`].
    pub fn into_result(self) -> Result<Option<T>, E> {
        match self {
            Self::Value(value) => Ok(Some(value)),
            Self::Error(error) => Err(error),
            Self::Stream(_) | Self::Unconfigured => Ok(None),
        }
    }

    /// Whether no configuration applied to the call.
    #[must_use]
    pub fn is_unconfigured(&self) -> bool {
        matches!(self, Self::Unconfigured)
    }
}

/// Handle to the subjects handed out by an external-subject configuration.
///
/// One replaying subject is created per call of the spy method, in call
/// order. Clones share the same list.
///
/// Pushes through the handle go to the most recent call's subject. Made
/// before any call, they are held back: the latest value and any terminal
/// event seed the subject of the next call.
pub struct ExternalStreams<T, E> {
    state: Arc<Mutex<StreamsState<T, E>>>,
}

struct StreamsState<T, E> {
    subjects: Vec<Subject<T, E>>,
    pending_value: Option<T>,
    pending_terminal: Option<Notification<T, E>>,
}

impl<T: Payload, E: Payload> ExternalStreams<T, E> {
    pub(crate) fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(StreamsState {
                subjects: Vec::new(),
                pending_value: None,
                pending_terminal: None,
            })),
        }
    }

    /// Create the subject for one call.
    fn open(&self) -> Observable<T, E> {
        let subject = Subject::replaying();
        let (value, terminal) = {
            let mut state = self.state.lock();
            state.subjects.push(subject.clone());
            (state.pending_value.take(), state.pending_terminal.take())
        };
        if let Some(value) = value {
            subject.next(value);
        }
        match terminal {
            Some(Notification::Error(error)) => subject.error(error),
            Some(Notification::Complete) => subject.complete(),
            Some(Notification::Next(_)) | None => {}
        }
        subject.as_observable()
    }

    /// Number of calls served so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().subjects.len()
    }

    /// Whether the spy method has not been called with this configuration yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().subjects.is_empty()
    }

    /// The subject returned by the Nth matching call (0-indexed).
    #[must_use]
    pub fn get(&self, n: usize) -> Option<Subject<T, E>> {
        self.state.lock().subjects.get(n).cloned()
    }

    /// The subject returned by the most recent matching call.
    #[must_use]
    pub fn latest(&self) -> Option<Subject<T, E>> {
        self.state.lock().subjects.last().cloned()
    }

    /// Every subject handed out, in call order.
    #[must_use]
    pub fn all(&self) -> Vec<Subject<T, E>> {
        self.state.lock().subjects.clone()
    }

    /// Whether a push is waiting for the first call.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        let state = self.state.lock();
        state.pending_value.is_some() || state.pending_terminal.is_some()
    }

    /// Push a value into the most recent call's subject.
    pub fn next(&self, value: T) {
        self.push(Notification::Next(value));
    }

    /// Fail the most recent call's subject.
    pub fn error(&self, error: E) {
        self.push(Notification::Error(error));
    }

    /// Complete the most recent call's subject.
    pub fn complete(&self) {
        self.push(Notification::Complete);
    }

    fn push(&self, event: Notification<T, E>) {
        let subject = {
            let mut state = self.state.lock();
            match state.subjects.last() {
                Some(subject) => subject.clone(),
                None => {
                    if state.pending_terminal.is_some() {
                        tracing::warn!("external stream already terminated before any call; event dropped");
                        return;
                    }
                    tracing::debug!("external stream push before any call; held for the next call");
                    match event {
                        Notification::Next(value) => state.pending_value = Some(value),
                        terminal => state.pending_terminal = Some(terminal),
                    }
                    return;
                }
            }
        };
        match event {
            Notification::Next(value) => subject.next(value),
            Notification::Error(error) => subject.error(error),
            Notification::Complete => subject.complete(),
        }
    }
}

impl<T, E> Clone for ExternalStreams<T, E> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T, E> fmt::Debug for ExternalStreams<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ExternalStreams")
            .field("streams", &state.subjects.len())
            .field("pending", &(state.pending_value.is_some() || state.pending_terminal.is_some()))
            .finish()
    }
}
