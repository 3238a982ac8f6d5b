//! Error definitions
//!
//! This module provides error types for testkit-autospy.

use thiserror::Error;

use crate::report::ArgumentMismatch;
use crate::spy::MemberKind;

/// Main error type for testkit-autospy
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The class spy has no member with this name
    #[error("Unknown member: {0}")]
    UnknownMember(String),

    /// The member exists but was looked up as a different kind
    #[error("Member {name} is classified as {actual}, expected {expected}")]
    WrongMemberKind {
        /// Member name.
        name: String,
        /// The kind the caller asked for.
        expected: MemberKind,
        /// The kind the member was classified as.
        actual: MemberKind,
    },

    /// A required argument expectation was not met
    #[error("Argument mismatch: {0}")]
    ArgumentMismatch(ArgumentMismatch),
}

impl Error {
    /// Create an unknown member error.
    #[must_use]
    pub fn unknown_member(name: impl Into<String>) -> Self {
        Self::UnknownMember(name.into())
    }

    /// Create a wrong member kind error.
    #[must_use]
    pub fn wrong_member_kind(name: impl Into<String>, expected: MemberKind, actual: MemberKind) -> Self {
        Self::WrongMemberKind {
            name: name.into(),
            expected,
            actual,
        }
    }
}

impl From<ArgumentMismatch> for Error {
    fn from(mismatch: ArgumentMismatch) -> Self {
        Self::ArgumentMismatch(mismatch)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
