//! Fitness profile types and validation.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Lowest accepted daily exercise duration, in minutes.
pub const MIN_DAILY_MINUTES: u16 = 1;
/// Highest accepted daily exercise duration, in minutes.
pub const MAX_DAILY_MINUTES: u16 = 300;
/// Free-text notes are truncated beyond this many characters to bound the
/// size of the rendered prompt.
pub const NOTES_MAX_CHARS: usize = 2000;

/// Earliest accepted birth date.
const EARLIEST_BIRTH_YEAR: i32 = 1900;

/// Supported fitness goals.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Reduce body weight.
    LoseWeight,
    /// Build muscle mass.
    GainMuscle,
}

impl Goal {
    /// Returns the goal phrased the way it is shown to the user and embedded
    /// into prompts.
    #[must_use]
    pub const fn phrase(self) -> &'static str {
        match self {
            Self::LoseWeight => "lose weight",
            Self::GainMuscle => "gain muscles",
        }
    }

    /// Returns a file-name-safe token for the goal.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::LoseWeight => "lose_weight",
            Self::GainMuscle => "gain_muscles",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.phrase())
    }
}

impl FromStr for Goal {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lose weight" | "lose_weight" => Ok(Self::LoseWeight),
            "gain muscles" | "gain_muscles" | "gain muscle" | "gain_muscle" => {
                Ok(Self::GainMuscle)
            }
            _ => Err(ValidationError::UnsupportedGoal {
                value: s.to_owned(),
            }),
        }
    }
}

/// Unvalidated profile fields as supplied by the input surface.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct RawProfile {
    /// Birth date as an ISO-8601 calendar date (`YYYY-MM-DD`).
    pub birth_date: String,
    /// Minutes available for exercise per day.
    pub daily_minutes: i64,
    /// Fitness goal, one of the supported goal phrases.
    pub goal: String,
    /// Optional free-text requirements ("knee problems", "home workouts", ...).
    pub notes: Option<String>,
}

impl RawProfile {
    /// Creates a raw profile without notes.
    #[must_use]
    pub fn new(
        birth_date: impl Into<String>,
        daily_minutes: i64,
        goal: impl Into<String>,
    ) -> Self {
        Self {
            birth_date: birth_date.into(),
            daily_minutes,
            goal: goal.into(),
            notes: None,
        }
    }

    /// Attaches free-text notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A validated fitness profile.
///
/// Can only be obtained through [`Profile::validate`], so holding one proves
/// every domain constraint already passed.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Profile {
    birth_date: NaiveDate,
    age: u32,
    daily_minutes: u16,
    goal: Goal,
    notes: String,
}

impl Profile {
    /// Validates the raw fields against today's date.
    ///
    /// # Errors
    ///
    /// Returns the first applicable [`ValidationError`]: birth date before
    /// duration before goal.
    pub fn validate(raw: &RawProfile) -> Result<Self, ValidationError> {
        Self::validate_at(raw, Local::now().date_naive())
    }

    /// Validates the raw fields against an explicit reference date.
    ///
    /// Pure function of its inputs; [`Profile::validate`] delegates here with
    /// the current date.
    ///
    /// # Errors
    ///
    /// See [`Profile::validate`].
    pub fn validate_at(raw: &RawProfile, today: NaiveDate) -> Result<Self, ValidationError> {
        let birth_date = NaiveDate::parse_from_str(raw.birth_date.trim(), "%Y-%m-%d")
            .map_err(|err| ValidationError::birth_date(format!("not a calendar date: {err}")))?;

        let earliest = NaiveDate::from_ymd_opt(EARLIEST_BIRTH_YEAR, 1, 1)
            .unwrap_or(NaiveDate::MIN);
        if birth_date < earliest {
            return Err(ValidationError::birth_date(format!(
                "{birth_date} is before {EARLIEST_BIRTH_YEAR}-01-01"
            )));
        }
        if birth_date > today {
            return Err(ValidationError::birth_date(format!(
                "{birth_date} is in the future"
            )));
        }

        let daily_minutes = match u16::try_from(raw.daily_minutes) {
            Ok(minutes) if (MIN_DAILY_MINUTES..=MAX_DAILY_MINUTES).contains(&minutes) => minutes,
            _ => {
                return Err(ValidationError::DurationOutOfRange {
                    value: raw.daily_minutes,
                });
            }
        };

        let goal = raw.goal.parse::<Goal>()?;

        let notes = raw
            .notes
            .as_deref()
            .map(truncate_notes)
            .unwrap_or_default();

        Ok(Self {
            birth_date,
            age: age_at(birth_date, today),
            daily_minutes,
            goal,
            notes,
        })
    }

    /// Returns the birth date.
    #[must_use]
    pub const fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    /// Returns the age in whole years, as of validation time.
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Returns the daily exercise budget in minutes.
    #[must_use]
    pub const fn daily_minutes(&self) -> u16 {
        self.daily_minutes
    }

    /// Returns the fitness goal.
    #[must_use]
    pub const fn goal(&self) -> Goal {
        self.goal
    }

    /// Returns the free-text notes; empty when the user supplied none.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }
}

/// Whole years elapsed between `birth_date` and `today`.
///
/// Subtracts one year when today's (month, day) precedes the birth
/// (month, day), i.e. the birthday has not happened yet this year.
fn age_at(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    // birth_date <= today is checked by the caller, so this never underflows.
    u32::try_from(years).unwrap_or(0)
}

fn truncate_notes(notes: &str) -> String {
    if notes.chars().count() > NOTES_MAX_CHARS {
        notes.chars().take(NOTES_MAX_CHARS).collect()
    } else {
        notes.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn raw() -> RawProfile {
        RawProfile::new("2000-01-01", 30, "lose weight")
    }

    #[test]
    fn example_profile_from_the_docs() {
        let profile = Profile::validate_at(&raw(), date(2024, 6, 15)).unwrap();
        assert_eq!(profile.age(), 24);
        assert_eq!(profile.daily_minutes(), 30);
        assert_eq!(profile.goal(), Goal::LoseWeight);
        assert_eq!(profile.notes(), "");
    }

    #[test]
    fn age_flips_exactly_on_the_birthday() {
        let raw = RawProfile::new("1990-06-15", 30, "gain muscles");
        let before = Profile::validate_at(&raw, date(2024, 6, 14)).unwrap();
        let on = Profile::validate_at(&raw, date(2024, 6, 15)).unwrap();
        assert_eq!(before.age(), 33);
        assert_eq!(on.age(), 34);
    }

    #[test]
    fn age_is_zero_for_a_newborn() {
        let raw = RawProfile::new("2024-06-15", 30, "lose weight");
        let profile = Profile::validate_at(&raw, date(2024, 6, 15)).unwrap();
        assert_eq!(profile.age(), 0);
    }

    #[test]
    fn rejects_unparseable_birth_date() {
        let raw = RawProfile::new("15/06/1990", 30, "lose weight");
        let err = Profile::validate_at(&raw, date(2024, 6, 15)).unwrap_err();
        assert!(matches!(err, ValidationError::BirthDateOutOfRange { .. }));
    }

    #[test]
    fn rejects_birth_date_before_1900() {
        let raw = RawProfile::new("1899-12-31", 30, "lose weight");
        let err = Profile::validate_at(&raw, date(2024, 6, 15)).unwrap_err();
        assert!(matches!(err, ValidationError::BirthDateOutOfRange { .. }));
    }

    #[test]
    fn accepts_the_1900_boundary_and_today() {
        let today = date(2024, 6, 15);
        assert!(Profile::validate_at(&RawProfile::new("1900-01-01", 30, "lose weight"), today).is_ok());
        assert!(Profile::validate_at(&RawProfile::new("2024-06-15", 30, "lose weight"), today).is_ok());
    }

    #[test]
    fn rejects_future_birth_date() {
        let raw = RawProfile::new("2024-06-16", 30, "lose weight");
        let err = Profile::validate_at(&raw, date(2024, 6, 15)).unwrap_err();
        assert!(matches!(err, ValidationError::BirthDateOutOfRange { .. }));
    }

    #[test]
    fn duration_boundaries() {
        let today = date(2024, 6, 15);
        for bad in [0, 301, -5, i64::from(u16::MAX) + 1] {
            let mut raw = raw();
            raw.daily_minutes = bad;
            let err = Profile::validate_at(&raw, today).unwrap_err();
            assert_eq!(err, ValidationError::DurationOutOfRange { value: bad });
        }
        for good in [1, 300] {
            let mut raw = raw();
            raw.daily_minutes = good;
            assert!(Profile::validate_at(&raw, today).is_ok());
        }
    }

    #[test]
    fn parses_both_goal_phrasings() {
        assert_eq!("lose weight".parse::<Goal>().unwrap(), Goal::LoseWeight);
        assert_eq!("Gain Muscles".parse::<Goal>().unwrap(), Goal::GainMuscle);
        assert_eq!("gain_muscle".parse::<Goal>().unwrap(), Goal::GainMuscle);
    }

    #[test]
    fn rejects_unknown_goal() {
        let mut raw = raw();
        raw.goal = "run a marathon".to_owned();
        let err = Profile::validate_at(&raw, date(2024, 6, 15)).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedGoal { .. }));
    }

    #[test]
    fn truncates_oversized_notes() {
        let raw = raw().with_notes("x".repeat(NOTES_MAX_CHARS + 50));
        let profile = Profile::validate_at(&raw, date(2024, 6, 15)).unwrap();
        assert_eq!(profile.notes().chars().count(), NOTES_MAX_CHARS);
    }

    #[test]
    fn keeps_short_notes_verbatim() {
        let raw = raw().with_notes("I have knee problems");
        let profile = Profile::validate_at(&raw, date(2024, 6, 15)).unwrap();
        assert_eq!(profile.notes(), "I have knee problems");
    }
}
