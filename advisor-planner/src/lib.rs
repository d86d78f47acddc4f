//! Plan generation service for the Sveikata exercise advisor.
//!
//! Orchestrates profile validation, prompt construction, and the chat
//! backend call, and guarantees the advisory disclaimer is present in every
//! returned plan.

#![warn(missing_docs, clippy::pedantic)]

mod service;

/// Service entry point and its error type.
pub use service::{PlanError, PlanService};
