//! Reporting of unmet argument expectations.
//!
//! A spy method configured with
//! [`must_be_called_with`](crate::spy::SpyMethod::must_be_called_with) hands every
//! call whose arguments match none of its required lists to an
//! [`ArgumentErrorReporter`], exactly once per call. The reporter decides what
//! a mismatch means:
//!
//! - [`PanicReporter`] - Fails the test immediately (the default)
//! - [`LogReporter`] - Emits a `tracing` error event and carries on
//! - [`RecordingReporter`] - Keeps every mismatch for later assertions
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use testkit_autospy::args;
//! use testkit_autospy::report::RecordingReporter;
//! use testkit_autospy::spy::{MemberKind, SpyMethod};
//! use serde_json::Value;
//!
//! let reporter = Arc::new(RecordingReporter::new());
//! let spy: SpyMethod = SpyMethod::with_reporter("load", MemberKind::ObservableMethod, reporter.clone());
//!
//! spy.must_be_called_with(args![1, 2]).next_with(Value::from("ok"));
//! spy.invoke(args![9]);
//!
//! assert_eq!(reporter.mismatches()[0].actual, args![9]);
//! ```

use std::fmt;

use parking_lot::Mutex;

use crate::error::Result;
use crate::spy::matcher::render_args;
use crate::spy::Args;

/// One call that satisfied none of the required argument lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentMismatch {
    /// Name of the spied member.
    pub method: String,
    /// The exact arguments of the offending call.
    pub actual: Args,
    /// Every required argument list registered on the member.
    pub expected: Vec<Args>,
}

impl fmt::Display for ArgumentMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} was configured to be called with ",
            self.method
        )?;
        for (i, expected) in self.expected.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{}", render_args(expected))?;
        }
        write!(f, " but was called with {}", render_args(&self.actual))
    }
}

impl std::error::Error for ArgumentMismatch {}

/// Receives required-argument violations from spy methods.
pub trait ArgumentErrorReporter: Send + Sync {
    /// Called once for every violating call.
    fn report_argument_mismatch(&self, mismatch: &ArgumentMismatch);
}

/// Panics with the mismatch diagnostic, failing the current test.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicReporter;

impl ArgumentErrorReporter for PanicReporter {
    fn report_argument_mismatch(&self, mismatch: &ArgumentMismatch) {
        panic!("{mismatch}");
    }
}

/// Logs the mismatch at error level and lets the call continue.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ArgumentErrorReporter for LogReporter {
    fn report_argument_mismatch(&self, mismatch: &ArgumentMismatch) {
        tracing::error!(
            method = %mismatch.method,
            actual = %render_args(&mismatch.actual),
            "{mismatch}"
        );
    }
}

/// Records every mismatch.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    mismatches: Mutex<Vec<ArgumentMismatch>>,
}

impl RecordingReporter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded mismatches, oldest first.
    #[must_use]
    pub fn mismatches(&self) -> Vec<ArgumentMismatch> {
        self.mismatches.lock().clone()
    }

    /// Number of recorded mismatches.
    #[must_use]
    pub fn count(&self) -> usize {
        self.mismatches.lock().len()
    }

    /// Whether nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mismatches.lock().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.mismatches.lock().clear();
    }

    /// Fail with the first recorded mismatch, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArgumentMismatch`](crate::Error::ArgumentMismatch) carrying the oldest mismatch.
    pub fn verify(&self) -> Result<()> {
        match self.mismatches.lock().first() {
            Some(mismatch) => Err(mismatch.clone().into()),
            None => Ok(()),
        }
    }
}

impl ArgumentErrorReporter for RecordingReporter {
    fn report_argument_mismatch(&self, mismatch: &ArgumentMismatch) {
        self.mismatches.lock().push(mismatch.clone());
    }
}
