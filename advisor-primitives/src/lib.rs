//! Core shared types for the Sveikata exercise advisor.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod plan;
mod profile;
mod status;

/// Validation error kinds raised while checking a raw profile.
pub use error::ValidationError;
/// Generated exercise plan handed back to the caller.
pub use plan::Plan;
/// Fitness profile types and the validation entry points.
pub use profile::{
    Goal, MAX_DAILY_MINUTES, MIN_DAILY_MINUTES, NOTES_MAX_CHARS, Profile, RawProfile,
};
/// Snapshot of the chat backend's availability.
pub use status::BackendStatus;
