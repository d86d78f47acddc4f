//! UAB Sveikata exercise advisor SDK facade.
//!
//! Depend on this crate to pull in the advisor components; feature flags let
//! downstream users disable the parts they do not need.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared domain types for convenience.
pub use advisor_primitives as primitives;

/// Prompt construction (enabled by `prompts` feature).
#[cfg(feature = "prompts")]
pub use advisor_prompts as prompts;

/// Chat backend clients (enabled by `adapters` feature).
#[cfg(feature = "adapters")]
pub use advisor_adapters as adapters;

/// Plan generation service (enabled by `planner` feature).
#[cfg(feature = "planner")]
pub use advisor_planner as planner;
