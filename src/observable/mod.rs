//! Observable streams for spies that return them.
//!
//! This module turns configured behavior into actual streams:
//!
//! - [`Observable`] - Lazily subscribed stream; replays an [`EmissionProgram`]
//!   to each subscriber or forwards a [`Subject`]
//! - [`Subject`] - Multicast stream the test pushes into
//! - [`Observer`] / [`Subscription`] - The next/error/complete contract
//! - [`ObservableStream`] - Adapter to [`futures_core::Stream`]
//!
//! Delivery is synchronous: a program is replayed the moment `subscribe` is
//! called and a subject push reaches subscribers before `next` returns.
//!
//! # Programs
//!
//! ```rust
//! use testkit_autospy::observable::{EmissionProgram, Observable};
//! use testkit_autospy::assertions::subscribe_spy_to;
//!
//! let observable = Observable::<i32, String>::from_program(EmissionProgram::one_shot(3));
//! let spy = subscribe_spy_to(&observable);
//!
//! assert_eq!(spy.last_value(), Some(3));
//! assert!(spy.received_complete());
//! ```
//!
//! # Subjects
//!
//! ```rust
//! use testkit_autospy::observable::Subject;
//! use testkit_autospy::assertions::subscribe_spy_to;
//!
//! let subject = Subject::<i32, String>::new();
//! let spy = subscribe_spy_to(&subject.as_observable());
//!
//! subject.next(1);
//! subject.error("boom".to_string());
//!
//! assert_eq!(spy.values(), vec![1]);
//! assert_eq!(spy.error(), Some("boom".to_string()));
//! ```

mod observer;
mod program;
mod source;
mod stream;
mod subject;

pub use observer::{FnObserver, Notification, Observer, Subscription};
pub use program::EmissionProgram;
pub use source::Observable;
pub use stream::ObservableStream;
pub use subject::Subject;

/// Bound for values and errors that flow through observables.
pub trait Payload: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> Payload for T {}
