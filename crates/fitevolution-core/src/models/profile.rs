// ABOUTME: Profile input model with sex, activity level, goal and experience enums
// ABOUTME: Validates raw user measurements against accepted ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use crate::constants::profile_limits;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex used by body composition formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Male (sex indicator 1)
    #[serde(rename = "M")]
    Male,
    /// Female (sex indicator 0)
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    /// Indicator used by the Deurenberg body fat formula
    #[must_use]
    pub const fn indicator(&self) -> f64 {
        match self {
            Self::Male => 1.0,
            Self::Female => 0.0,
        }
    }
}

impl FromStr for Sex {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Self::Male),
            "f" | "female" => Ok(Self::Female),
            other => Err(AppError::invalid_input(format!(
                "Unsupported sex '{other}', expected M or F"
            ))),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported weekly activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise a few days a week
    Light,
    /// Regular moderate exercise
    Moderate,
    /// Hard training most days
    Intense,
}

impl ActivityLevel {
    /// All levels in ascending order of activity
    pub const ALL: [Self; 4] = [Self::Sedentary, Self::Light, Self::Moderate, Self::Intense];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Intense => "intense",
        }
    }

    /// Parse from string, falling back to `Light` for unknown values
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Self::Sedentary,
            "moderate" => Self::Moderate,
            "intense" => Self::Intense,
            "light" => Self::Light,
            other => {
                tracing::warn!(activity_level = %other, "Unknown activity level, defaulting to light");
                Self::Light
            }
        }
    }

    /// Experience level implied by the activity level
    #[must_use]
    pub const fn experience(&self) -> ExperienceLevel {
        match self {
            Self::Sedentary | Self::Light => ExperienceLevel::Beginner,
            Self::Moderate => ExperienceLevel::Intermediate,
            Self::Intense => ExperienceLevel::Advanced,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training goal driving rep ranges and set selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Lose body fat
    FatLoss,
    /// Lose fat while building muscle
    Recomposition,
    /// Build muscle
    Hypertrophy,
}

impl Goal {
    /// All goals
    pub const ALL: [Self; 3] = [Self::FatLoss, Self::Recomposition, Self::Hypertrophy];

    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FatLoss => "fat_loss",
            Self::Recomposition => "recomposition",
            Self::Hypertrophy => "hypertrophy",
        }
    }

    /// Parse from string, falling back to `Hypertrophy` for unknown values
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "fat_loss" => Self::FatLoss,
            "recomposition" => Self::Recomposition,
            "hypertrophy" => Self::Hypertrophy,
            other => {
                tracing::warn!(goal = %other, "Unknown goal, defaulting to hypertrophy");
                Self::Hypertrophy
            }
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training experience, used as a categorical model feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// New to resistance training
    Beginner,
    /// Trains regularly
    Intermediate,
    /// Years of structured training
    Advanced,
}

impl ExperienceLevel {
    /// Label as stored in model encoders
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

/// Raw profile data supplied by a user.
///
/// Derived body composition metrics are deliberately absent: they are always
/// recomputed from these inputs and never accepted from a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    /// Age in years (13-100)
    pub age: u32,
    /// Biological sex
    pub sex: Sex,
    /// Body weight in kilograms (20-400)
    pub weight_kg: f64,
    /// Height in centimeters (80-300)
    pub height_cm: u32,
    /// Weekly activity level
    pub activity_level: ActivityLevel,
    /// Training goal
    pub goal: Goal,
    /// Typical session length in minutes (10-230)
    pub session_minutes: Option<u32>,
}

impl ProfileInput {
    /// Validate every field against the accepted ranges
    ///
    /// # Errors
    ///
    /// Returns a `ValueOutOfRange` error naming the first offending field
    pub fn validate(&self) -> AppResult<()> {
        if !(profile_limits::MIN_AGE..=profile_limits::MAX_AGE).contains(&self.age) {
            return Err(AppError::value_out_of_range(
                "age",
                self.age,
                f64::from(profile_limits::MIN_AGE),
                f64::from(profile_limits::MAX_AGE),
            ));
        }
        if !self.weight_kg.is_finite()
            || !(profile_limits::MIN_WEIGHT_KG..=profile_limits::MAX_WEIGHT_KG)
                .contains(&self.weight_kg)
        {
            return Err(AppError::value_out_of_range(
                "weight_kg",
                self.weight_kg,
                profile_limits::MIN_WEIGHT_KG,
                profile_limits::MAX_WEIGHT_KG,
            ));
        }
        if !(profile_limits::MIN_HEIGHT_CM..=profile_limits::MAX_HEIGHT_CM)
            .contains(&self.height_cm)
        {
            return Err(AppError::value_out_of_range(
                "height_cm",
                self.height_cm,
                f64::from(profile_limits::MIN_HEIGHT_CM),
                f64::from(profile_limits::MAX_HEIGHT_CM),
            ));
        }
        if let Some(minutes) = self.session_minutes {
            if !(profile_limits::MIN_SESSION_MINUTES..=profile_limits::MAX_SESSION_MINUTES)
                .contains(&minutes)
            {
                return Err(AppError::value_out_of_range(
                    "session_minutes",
                    minutes,
                    f64::from(profile_limits::MIN_SESSION_MINUTES),
                    f64::from(profile_limits::MAX_SESSION_MINUTES),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn input() -> ProfileInput {
        ProfileInput {
            age: 30,
            sex: Sex::Male,
            weight_kg: 80.0,
            height_cm: 180,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Hypertrophy,
            session_minutes: Some(60),
        }
    }

    #[test]
    fn test_unknown_categories_fall_back() {
        assert_eq!(ActivityLevel::parse("couch"), ActivityLevel::Light);
        assert_eq!(Goal::parse("bulk"), Goal::Hypertrophy);
        assert_eq!(ActivityLevel::parse(" Intense "), ActivityLevel::Intense);
    }

    #[test]
    fn test_sex_parsing_is_strict() {
        assert_eq!("m".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("Female".parse::<Sex>().unwrap(), Sex::Female);
        assert!("x".parse::<Sex>().is_err());
    }

    #[test]
    fn test_validate_ranges() {
        assert!(input().validate().is_ok());

        let young = ProfileInput { age: 12, ..input() };
        assert_eq!(young.validate().unwrap_err().code, ErrorCode::ValueOutOfRange);

        let heavy = ProfileInput {
            weight_kg: 401.0,
            ..input()
        };
        assert!(heavy.validate().is_err());

        let long_session = ProfileInput {
            session_minutes: Some(231),
            ..input()
        };
        assert!(long_session.validate().is_err());
    }
}
