//! Backend availability snapshot for the diagnostics surface.

use serde::{Deserialize, Serialize};

/// Result of probing the chat backend.
///
/// Transient: queried on demand, never persisted.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct BackendStatus {
    /// Whether the backend answered the model-listing call at all.
    pub reachable: bool,
    /// Model identifiers advertised by the backend.
    pub available_models: Vec<String>,
    /// Whether the configured target model appears in the catalog.
    pub target_model_present: bool,
}

impl BackendStatus {
    /// Status for a backend that could not be contacted.
    #[must_use]
    pub const fn unreachable() -> Self {
        Self {
            reachable: false,
            available_models: Vec::new(),
            target_model_present: false,
        }
    }

    /// Status for a reachable backend with the supplied catalog.
    #[must_use]
    pub fn reachable(available_models: Vec<String>, target_model_present: bool) -> Self {
        Self {
            reachable: true,
            available_models,
            target_model_present,
        }
    }
}
