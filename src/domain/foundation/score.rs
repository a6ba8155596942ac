//! Bounded score value objects (0-100 scale).
//!
//! `ImpactScore`, `ProficiencyLevel` and `MatchScore` share the same shape:
//! a `u8` that can only be obtained through a validating constructor.
//! Deserialization goes through the same check, so an out-of-range instance
//! cannot exist.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Lowest accepted score.
pub const SCORE_MIN: i64 = 0;

/// Highest accepted score.
pub const SCORE_MAX: i64 = 100;

macro_rules! bounded_score {
    ($(#[$meta:meta])* $name:ident, field = $field:literal, default = $default:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "u8")]
        pub struct $name(u8);

        impl $name {
            /// Value used when none is supplied.
            pub const DEFAULT: Self = Self($default);

            /// Creates a score, failing if the value is outside [0, 100].
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
                    return Err(ValidationError::out_of_range(
                        $field, SCORE_MIN, SCORE_MAX, value,
                    ));
                }
                Ok(Self(value as u8))
            }

            /// Returns the value as u8.
            pub fn value(&self) -> u8 {
                self.0
            }

            /// Returns the value as a fraction (0.0 to 1.0).
            pub fn as_fraction(&self) -> f64 {
                f64::from(self.0) / 100.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::DEFAULT
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u8 {
            fn from(score: $name) -> Self {
                score.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

bounded_score!(
    /// Perceived strength of a single bullet.
    ImpactScore,
    field = "impact_score",
    default = 50
);

bounded_score!(
    /// Self-assessed proficiency for a skill.
    ProficiencyLevel,
    field = "proficiency_level",
    default = 0
);

bounded_score!(
    /// How well an assembled resume fits a specific job.
    MatchScore,
    field = "match_score",
    default = 0
);

impl MatchScore {
    /// Builds a score from a backend-reported number.
    ///
    /// Fractions are rounded to the nearest integer; non-finite or
    /// out-of-range values are rejected rather than clamped.
    pub fn from_reported(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::invalid_format(
                "match_score",
                "score is not a finite number",
            ));
        }
        let rounded = value.round();
        if rounded < SCORE_MIN as f64 || rounded > SCORE_MAX as f64 {
            return Err(ValidationError::out_of_range(
                "match_score",
                SCORE_MIN,
                SCORE_MAX,
                rounded as i64,
            ));
        }
        Self::new(rounded as i64)
    }
}
