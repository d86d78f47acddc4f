//! Generated exercise plan handed back to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// A generated 7-day exercise plan.
///
/// `content` is plain text suitable for direct display or `.txt` export and
/// always contains the advisory disclaimer sentence at least once.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Plan {
    content: String,
    profile: Profile,
    generated_at: DateTime<Utc>,
}

impl Plan {
    /// Wraps generated plan text together with the profile it was built for.
    #[must_use]
    pub fn new(content: impl Into<String>, profile: Profile, generated_at: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            profile,
            generated_at,
        }
    }

    /// Returns the plan text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the profile the plan was generated for.
    #[must_use]
    pub const fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Returns the generation timestamp.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Suggested file name for exporting the plan as plain text,
    /// e.g. `exercise_plan_lose_weight_24yrs.txt`.
    #[must_use]
    pub fn suggested_file_name(&self) -> String {
        format!(
            "exercise_plan_{}_{}yrs.txt",
            self.profile.goal().slug(),
            self.profile.age()
        )
    }
}
