//! The plan generation service.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use advisor_adapters::client::{ChatClient, ChatOptions, ClientError};
use advisor_primitives::{BackendStatus, Plan, Profile, RawProfile, ValidationError};
use advisor_prompts::{DISCLAIMER, build_plan_prompts};

/// Failures surfaced by [`PlanService::generate`].
#[derive(Debug, Error)]
pub enum PlanError {
    /// The raw profile failed validation; the backend was never contacted.
    #[error("invalid profile: {0}")]
    Validation(#[from] ValidationError),

    /// The chat backend call failed; see [`ClientError`] for the kind.
    #[error(transparent)]
    Backend(#[from] ClientError),
}

impl PlanError {
    /// One actionable next step per error kind, suitable for direct display.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Correct the highlighted profile fields and resubmit.",
            Self::Backend(ClientError::Unreachable { .. }) => {
                "Start the backend with `ollama serve` and try again."
            }
            Self::Backend(ClientError::ModelNotFound { .. }) => {
                "Install the configured model with `ollama pull` and try again."
            }
            Self::Backend(ClientError::Configuration { .. }) => {
                "Fix the backend endpoint configuration."
            }
            Self::Backend(_) => "Try generating the plan again in a moment.",
        }
    }
}

/// Generates exercise plans by delegating to a chat backend.
///
/// Holds only the client and an immutable copy of the decoding options, so
/// concurrent [`generate`](Self::generate) calls are fully independent.
#[derive(Debug)]
pub struct PlanService<C> {
    client: C,
    options: ChatOptions,
}

impl<C: ChatClient> PlanService<C> {
    /// Creates a service over the supplied client with default decoding
    /// options (temperature 0.7, 1500 output tokens).
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: ChatOptions::default(),
        }
    }

    /// Overrides the decoding options used for every generation.
    #[must_use]
    pub const fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the target model identifier of the underlying client.
    pub fn model(&self) -> &str {
        self.client.model()
    }

    /// Probes the backend for the diagnostics surface.
    pub async fn backend_status(&self) -> BackendStatus {
        self.client.probe().await
    }

    /// Generates a 7-day exercise plan for the raw profile.
    ///
    /// Validates first (failing fast without a backend round-trip), builds
    /// the prompt pair, performs exactly one chat call (no retries; the
    /// caller may resubmit), and prepends the disclaimer if the model
    /// omitted it.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Validation`] for bad input and
    /// [`PlanError::Backend`] for any backend failure.
    pub async fn generate(&self, raw: &RawProfile) -> Result<Plan, PlanError> {
        let profile = Profile::validate(raw)?;
        self.generate_validated(profile).await
    }

    /// Same as [`generate`](Self::generate) for an already-validated profile.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::Backend`] for any backend failure.
    pub async fn generate_validated(&self, profile: Profile) -> Result<Plan, PlanError> {
        let prompts = build_plan_prompts(&profile);
        debug!(
            age = profile.age(),
            minutes = profile.daily_minutes(),
            goal = %profile.goal(),
            "requesting plan"
        );

        let reply = self
            .client
            .chat(prompts.system(), prompts.user(), &self.options)
            .await?;

        let content = ensure_disclaimer(reply);
        info!(model = self.client.model(), "plan generated");

        Ok(Plan::new(content, profile, Utc::now()))
    }
}

/// Prepends the disclaimer when the model's reply lacks it.
///
/// A content-correctness fix rather than error suppression: the safety
/// notice is enforced here, not merely requested of the backend.
fn ensure_disclaimer(reply: String) -> String {
    if reply.contains(DISCLAIMER) {
        reply
    } else {
        format!("{DISCLAIMER}\n\n{reply}")
    }
}
