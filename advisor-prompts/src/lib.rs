//! Deterministic prompt construction for exercise plan generation.

#![warn(missing_docs, clippy::pedantic)]

mod plan;

/// Prompt pair builder and the fixed disclaimer sentence.
pub use plan::{DISCLAIMER, PromptPair, build_plan_prompts};
