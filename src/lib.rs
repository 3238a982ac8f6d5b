//! # testkit-autospy 🕵️
//!
//! > Auto-generated spies for every member of a class
//!
//! **testkit-autospy** builds call-tracking stand-ins whose return behavior is
//! programmable per test, per argument list, with first-class support for
//! members that return observables.
//!
//! ## Quick Start
//!
//! ```rust
//! use testkit_autospy::prelude::*;
//! use testkit_autospy::args;
//! use serde_json::json;
//!
//! let shape = ClassShape::new("UserService").observable_method("getUser");
//! let users: ClassSpy = ClassSpy::new(&shape);
//!
//! let get_user = users.observable_method("getUser")?;
//! get_user.called_with(args![42]).next_one_time_with(json!({"name": "Ada"}));
//!
//! let observer = subscribe_spy_to(&get_user.invoke_observable(args![42]).unwrap());
//! assert_eq!(observer.last_value(), Some(json!({"name": "Ada"})));
//! assert!(observer.received_complete());
//! # Ok::<(), testkit_autospy::Error>(())
//! ```
//!
//! ## Features
//!
//! - 🎯 **Argument-scoped behavior** - `called_with` / `must_be_called_with`
//! - 📡 **Observable programs** - emit, fail or complete on subscription
//! - 🎮 **External subjects** - push events from the test, per call
//! - 🚨 **Pluggable mismatch reporting** - panic, log or record

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assertions;
pub mod class;
pub mod error;
pub mod observable;
pub mod report;
pub mod spy;

/// Prelude for convenient imports
///
/// ```rust
/// use testkit_autospy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::assertions::{subscribe_spy_to, SubscriberSpy};
    pub use crate::class::{ClassDescriptor, ClassShape, ClassSpy, PropertySpy, SpyOptions};
    pub use crate::error::{Error, Result};
    pub use crate::observable::{EmissionProgram, Notification, Observable, Observer, Subject};
    pub use crate::report::{ArgumentErrorReporter, LogReporter, PanicReporter, RecordingReporter};
    pub use crate::spy::{Args, Behavior, MemberKind, Outcome, SpyMethod};
}

// Re-exports
pub use error::{Error, Result};

#[doc(hidden)]
pub use serde_json::json as __json;

/// Build an argument list from JSON-like literals.
///
/// ```rust
/// use testkit_autospy::args;
/// use serde_json::json;
///
/// assert_eq!(args![1, "two", {"three": [3]}], vec![json!(1), json!("two"), json!({"three": [3]})]);
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    ($($tt:tt)*) => {
        $crate::spy::into_args($crate::__json!([$($tt)*]))
    };
}
