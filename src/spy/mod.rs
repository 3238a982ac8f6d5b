//! Spy methods with argument-scoped behavior.
//!
//! This module provides the engine behind every generated spy:
//!
//! - [`SpyMethod`] - Records calls and resolves which behavior applies
//! - [`CallRegistry`] - Default behavior plus conditional entries
//! - [`Behavior`] / [`Outcome`] - What a call does and what it returns
//! - [`BehaviorConfig`] - Typed builder behind `and()` / `called_with()` /
//!   `must_be_called_with()`
//! - [`matcher`] - Deep structural argument matching
//!
//! # Optional vs required arguments
//!
//! ```rust
//! use std::sync::Arc;
//! use testkit_autospy::args;
//! use testkit_autospy::report::RecordingReporter;
//! use testkit_autospy::spy::{MemberKind, SpyMethod};
//! use serde_json::json;
//!
//! let reporter = Arc::new(RecordingReporter::new());
//! let spy: SpyMethod = SpyMethod::with_reporter("find", MemberKind::ObservableMethod, reporter.clone());
//!
//! // Optional: other arguments are silently ignored.
//! spy.called_with(args!["a"]).next_with(json!(1));
//! spy.invoke(args!["b"]);
//! assert!(reporter.is_empty());
//!
//! // Required: other arguments are reported.
//! spy.must_be_called_with(args!["c"]).next_with(json!(2));
//! spy.invoke(args!["b"]);
//! assert_eq!(reporter.count(), 1);
//! ```

mod behavior;
mod config;
pub mod matcher;
mod method;
mod registry;

pub use behavior::{Behavior, ExternalStreams, Outcome};
pub use config::BehaviorConfig;
pub use method::{CallRecord, MemberKind, SpyMethod};
pub use registry::{CallRegistry, ConditionalEntry, Resolution};

use serde_json::Value;

/// An argument list as seen by a spy method.
pub type Args = Vec<Value>;

/// Turn a JSON value into an argument list.
///
/// Arrays become their elements; any other value becomes a single argument.
/// Used by [`args!`](crate::args).
#[must_use]
pub fn into_args(value: Value) -> Args {
    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}
