//! Provider-independent chat client contract and error taxonomy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use advisor_primitives::BackendStatus;

/// Result alias used by chat client implementations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Default sampling temperature for plan generation.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Default output token budget for plan generation.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1500;

/// Failures raised at the chat client boundary.
///
/// Backend exceptions never escape past this type; the original diagnostic
/// message is preserved inside the variant so callers can surface it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("backend unreachable: {reason}")]
    Unreachable {
        /// Additional context about the transport failure.
        reason: String,
    },

    /// The backend answered but does not serve the target model.
    #[error("model `{model}` not found on the backend")]
    ModelNotFound {
        /// The missing model identifier.
        model: String,
    },

    /// The backend reported success but the payload lacked usable content.
    #[error("malformed backend response: {reason}")]
    MalformedResponse {
        /// What was wrong with the payload.
        reason: String,
    },

    /// Catch-all for any other backend fault.
    #[error("backend error: {reason}")]
    Backend {
        /// Original diagnostic message from the backend.
        reason: String,
    },

    /// The client itself is misconfigured (bad base URL).
    #[error("client not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },
}

impl ClientError {
    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self::Unreachable {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for malformed payloads.
    #[must_use]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for unclassified backend faults.
    #[must_use]
    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}

/// Decoding options passed with every chat call.
///
/// Kept explicit and overridable rather than hidden at call sites; the plan
/// service holds one immutable copy.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
pub struct ChatOptions {
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl ChatOptions {
    /// Overrides the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Overrides the output token budget.
    #[must_use]
    pub const fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }
}

/// Single-turn chat backend contract.
///
/// Every call is stateless and independent: no streaming, no multi-turn
/// memory, no shared mutable state, so concurrent calls need no ordering.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Returns the configured target model identifier.
    fn model(&self) -> &str;

    /// Probes the backend by listing its models.
    ///
    /// Never errors: any transport failure yields
    /// [`BackendStatus::unreachable`].
    async fn probe(&self) -> BackendStatus;

    /// Executes one chat completion over a system/user message pair.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] classifying the failure; see the variant
    /// documentation.
    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &ChatOptions,
    ) -> ClientResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_the_advisor_contract() {
        let options = ChatOptions::default();
        assert!((options.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(options.max_output_tokens, 1500);
    }

    #[test]
    fn options_are_overridable() {
        let options = ChatOptions::default()
            .with_temperature(0.2)
            .with_max_output_tokens(64);
        assert!((options.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(options.max_output_tokens, 64);
    }
}
