//! Renders the system/user prompt pair for a validated profile.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use advisor_primitives::Profile;

/// The advisory sentence that must open and close every generated plan.
///
/// The exact string matters: the plan service verifies the model's output
/// against it with a case-sensitive substring check.
pub const DISCLAIMER: &str =
    "The advice is AI based and is not a professional doctor's opinion.";

/// An immutable system/user prompt pair, rebuilt fresh per request since it
/// embeds profile data.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PromptPair {
    system: String,
    user: String,
}

impl PromptPair {
    /// Returns the system prompt.
    #[must_use]
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Returns the user prompt.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }
}

/// Builds the prompt pair for the supplied profile.
///
/// Deterministic: the same profile yields byte-identical prompts. The user
/// prompt states age, daily minutes, goal, and verbatim notes, and instructs
/// the model twice (opening and closing) to include [`DISCLAIMER`]; the
/// system prompt re-asserts the same obligation through a second channel
/// because the model is not guaranteed to follow either literally.
#[must_use]
pub fn build_plan_prompts(profile: &Profile) -> PromptPair {
    PromptPair {
        system: system_prompt(),
        user: user_prompt(profile),
    }
}

fn system_prompt() -> String {
    format!(
        "You are a professional fitness trainer working for UAB Sveikata who creates \
         personalized, safe, and effective exercise plans. Always remind users that \
         \"{DISCLAIMER}\" at the beginning and end of your recommendations. Provide \
         detailed, actionable advice."
    )
}

fn user_prompt(profile: &Profile) -> String {
    let minutes = profile.daily_minutes();
    let goal = profile.goal().phrase();

    let mut prompt = format!(
        "You are a professional fitness trainer working for UAB Sveikata. Create a \
         detailed 7-day exercise plan for a person with the following profile:\n\n\
         Age: {} years old\n\
         Available time per day: {minutes} minutes\n\
         Fitness goal: {goal}",
        profile.age()
    );

    if !profile.notes().is_empty() {
        let _ = write!(
            prompt,
            "\n\nAdditional user information: {}",
            profile.notes()
        );
    }

    let _ = write!(
        prompt,
        "\n\nIMPORTANT: Start your response with a reminder that \"{DISCLAIMER}\"\n\n\
         Please provide:\n\
         1. A weekly exercise plan with specific exercises for each day (Monday to Sunday)\n\
         2. Each day should have exercises that fit within {minutes} minutes\n\
         3. Exercises should be appropriate for someone who wants to {goal}\n\
         4. Include warm-up and cool-down activities\n\
         5. Consider the age of the person when recommending exercises\n\
         6. Provide brief instructions for each exercise\n\
         7. Include rest days if appropriate\n\
         8. Consider any additional information provided by the user\n\n\
         IMPORTANT: End your response with a reminder that \"{DISCLAIMER}\"\n\n\
         Format the response in a clear, day-by-day structure that is easy to follow."
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_primitives::RawProfile;
    use chrono::NaiveDate;

    fn profile(notes: Option<&str>) -> Profile {
        let mut raw = RawProfile::new("2000-01-01", 45, "gain muscles");
        raw.notes = notes.map(str::to_owned);
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        Profile::validate_at(&raw, today).unwrap()
    }

    #[test]
    fn building_is_deterministic() {
        let profile = profile(Some("home workouts only"));
        assert_eq!(build_plan_prompts(&profile), build_plan_prompts(&profile));
    }

    #[test]
    fn user_prompt_states_the_profile() {
        let pair = build_plan_prompts(&profile(None));
        assert!(pair.user().contains("Age: 24 years old"));
        assert!(pair.user().contains("Available time per day: 45 minutes"));
        assert!(pair.user().contains("Fitness goal: gain muscles"));
    }

    #[test]
    fn user_prompt_embeds_notes_verbatim() {
        let pair = build_plan_prompts(&profile(Some("I have knee problems")));
        assert!(
            pair.user()
                .contains("Additional user information: I have knee problems")
        );
    }

    #[test]
    fn user_prompt_omits_notes_section_when_empty() {
        let pair = build_plan_prompts(&profile(None));
        assert!(!pair.user().contains("Additional user information"));
    }

    #[test]
    fn disclaimer_is_demanded_at_both_ends() {
        let pair = build_plan_prompts(&profile(None));
        assert_eq!(pair.user().matches(DISCLAIMER).count(), 2);
        assert!(pair.system().contains(DISCLAIMER));
    }

    #[test]
    fn enumerates_the_seven_day_structure() {
        let pair = build_plan_prompts(&profile(None));
        assert!(pair.user().contains("Monday to Sunday"));
        assert!(pair.user().contains("warm-up and cool-down"));
        assert!(pair.user().contains("rest days"));
    }
}
