//! Shared error definitions for profile validation.

use thiserror::Error;

use crate::profile::{MAX_DAILY_MINUTES, MIN_DAILY_MINUTES};

/// Errors raised while validating a raw fitness profile.
///
/// Each variant maps to one user-correctable input problem; none of them
/// involve the chat backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The birth date did not parse or falls outside [1900-01-01, today].
    #[error("birth date out of range: {reason}")]
    BirthDateOutOfRange {
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// The daily exercise duration falls outside the supported range.
    #[error(
        "daily exercise minutes must be between {} and {}, got {value}",
        MIN_DAILY_MINUTES,
        MAX_DAILY_MINUTES
    )]
    DurationOutOfRange {
        /// The offending minute count.
        value: i64,
    },

    /// The fitness goal string matched none of the supported goals.
    #[error("unsupported fitness goal `{value}` (expected `lose weight` or `gain muscles`)")]
    UnsupportedGoal {
        /// The offending goal string.
        value: String,
    },
}

impl ValidationError {
    /// Convenience constructor for birth-date failures.
    #[must_use]
    pub fn birth_date(reason: impl Into<String>) -> Self {
        Self::BirthDateOutOfRange {
            reason: reason.into(),
        }
    }
}
