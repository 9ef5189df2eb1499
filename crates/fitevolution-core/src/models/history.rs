// ABOUTME: Workout history records logged per performed set
// ABOUTME: Captures reps, load, RPE and discomfort against a scheduled day exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use crate::constants::history_limits;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One performed set of a scheduled exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutLog {
    /// Log identifier
    pub id: i64,
    /// User who performed the set
    pub user_id: Uuid,
    /// Scheduled exercise the set belongs to
    pub day_exercise_id: i64,
    /// When the set was performed
    pub performed_at: DateTime<Utc>,
    /// Set number within the session (1-based)
    pub set_number: u8,
    /// Reps actually completed
    pub reps_done: u32,
    /// Load used in kilograms
    pub weight_used_kg: Option<f64>,
    /// Rate of perceived exertion (1-10)
    pub rpe: u8,
    /// Discomfort level (0 = none, 10 = severe)
    pub discomfort: u8,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Data required to log a performed set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkoutLog {
    /// User who performed the set
    pub user_id: Uuid,
    /// Scheduled exercise the set belongs to
    pub day_exercise_id: i64,
    /// Set number within the session (1-based)
    pub set_number: u8,
    /// Reps actually completed
    pub reps_done: u32,
    /// Load used in kilograms
    pub weight_used_kg: Option<f64>,
    /// Rate of perceived exertion (1-10)
    pub rpe: u8,
    /// Discomfort level (0-10)
    pub discomfort: u8,
    /// Free-form notes
    pub notes: Option<String>,
}

impl NewWorkoutLog {
    /// Validate set number, RPE, discomfort and load
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field
    pub fn validate(&self) -> AppResult<()> {
        if self.set_number == 0 {
            return Err(AppError::invalid_input("Set number starts at 1"));
        }
        if !(history_limits::MIN_RPE..=history_limits::MAX_RPE).contains(&self.rpe) {
            return Err(AppError::value_out_of_range(
                "rpe",
                self.rpe,
                f64::from(history_limits::MIN_RPE),
                f64::from(history_limits::MAX_RPE),
            ));
        }
        if self.discomfort > history_limits::MAX_DISCOMFORT {
            return Err(AppError::value_out_of_range(
                "discomfort",
                self.discomfort,
                0.0,
                f64::from(history_limits::MAX_DISCOMFORT),
            ));
        }
        if let Some(weight) = self.weight_used_kg {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AppError::invalid_input(
                    "Weight used must be a non-negative number",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rpe_bounds() {
        let log = NewWorkoutLog {
            user_id: Uuid::new_v4(),
            day_exercise_id: 1,
            set_number: 1,
            reps_done: 10,
            weight_used_kg: Some(60.0),
            rpe: 0,
            discomfort: 0,
            notes: None,
        };
        assert!(log.validate().is_err());
        assert!(NewWorkoutLog { rpe: 8, ..log.clone() }.validate().is_ok());
        assert!(NewWorkoutLog { discomfort: 11, rpe: 8, ..log }.validate().is_err());
    }
}
