// ABOUTME: Training plan, training day and day exercise records
// ABOUTME: Includes the plan status state machine and input validation for new records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::Goal;
use crate::constants::plan_limits;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of a training plan.
///
/// ```text
/// active --pause--> paused --resume--> active
/// active --complete--> completed (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// The plan the user is currently following (at most one per user)
    Active,
    /// Finished; no further transitions
    Completed,
    /// Temporarily not followed
    Paused,
}

impl PlanStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Paused => "paused",
        }
    }

    /// Parse from database string representation
    ///
    /// # Errors
    ///
    /// Returns an error for values outside the known statuses
    pub fn parse(s: &str) -> AppResult<Self> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "paused" => Ok(Self::Paused),
            other => Err(AppError::invalid_input(format!(
                "Unknown plan status '{other}'"
            ))),
        }
    }

    /// Whether the state machine allows moving from `self` to `next`
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Active, Self::Paused | Self::Completed) | (Self::Paused, Self::Active)
        )
    }

    /// Whether no transition leaves this status
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted training plan owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPlan {
    /// Plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Display name
    pub name: String,
    /// First day of the plan
    pub start_date: NaiveDate,
    /// Last day of the plan
    pub end_date: NaiveDate,
    /// Goal the plan was generated for
    pub goal: Goal,
    /// Current lifecycle status
    pub status: PlanStatus,
    /// Target training days per week
    pub days_per_week: u8,
    /// Injury risk score in [0, 1], when an external model provided one
    pub injury_risk: Option<f64>,
    /// Stagnation risk score in [0, 1], when an external model provided one
    pub stagnation_risk: Option<f64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a training plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTrainingPlan {
    /// Owning user
    pub user_id: Uuid,
    /// Display name
    pub name: String,
    /// First day of the plan
    pub start_date: NaiveDate,
    /// Last day of the plan
    pub end_date: NaiveDate,
    /// Goal the plan targets
    pub goal: Goal,
    /// Initial status; `Active` demotes any other active plan of the user
    pub status: PlanStatus,
    /// Target training days per week
    pub days_per_week: u8,
    /// Optional injury risk score
    pub injury_risk: Option<f64>,
    /// Optional stagnation risk score
    pub stagnation_risk: Option<f64>,
}

impl NewTrainingPlan {
    /// Validate dates, weekly frequency and risk scores
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("Plan name must not be empty"));
        }
        if self.end_date < self.start_date {
            return Err(AppError::invalid_input(
                "Plan end date must not precede its start date",
            ));
        }
        if !(plan_limits::MIN_WEEKDAY..=plan_limits::MAX_WEEKDAY).contains(&self.days_per_week) {
            return Err(AppError::value_out_of_range(
                "days_per_week",
                self.days_per_week,
                f64::from(plan_limits::MIN_WEEKDAY),
                f64::from(plan_limits::MAX_WEEKDAY),
            ));
        }
        for (field, risk) in [
            ("injury_risk", self.injury_risk),
            ("stagnation_risk", self.stagnation_risk),
        ] {
            if let Some(value) = risk {
                if !(0.0..=1.0).contains(&value) {
                    return Err(AppError::value_out_of_range(field, value, 0.0, 1.0));
                }
            }
        }
        if self.status == PlanStatus::Completed {
            return Err(AppError::invalid_input(
                "A plan cannot be created in the completed state",
            ));
        }
        Ok(())
    }
}

/// One training day inside a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDay {
    /// Day identifier
    pub id: i64,
    /// Owning plan
    pub plan_id: Uuid,
    /// Weekday number 1-7, unique within the plan
    pub weekday: u8,
    /// Display name, e.g. "Chest/Triceps"
    pub name: String,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Data required to add a training day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrainingDay {
    /// Weekday number 1-7
    pub weekday: u8,
    /// Display name
    pub name: String,
    /// Free-form notes
    pub notes: Option<String>,
}

impl NewTrainingDay {
    /// Validate the weekday number
    ///
    /// # Errors
    ///
    /// Returns an error if the weekday is outside 1-7 or the name is empty
    pub fn validate(&self) -> AppResult<()> {
        if !(plan_limits::MIN_WEEKDAY..=plan_limits::MAX_WEEKDAY).contains(&self.weekday) {
            return Err(AppError::value_out_of_range(
                "weekday",
                self.weekday,
                f64::from(plan_limits::MIN_WEEKDAY),
                f64::from(plan_limits::MAX_WEEKDAY),
            ));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::invalid_input("Training day name must not be empty"));
        }
        Ok(())
    }
}

/// An exercise scheduled on a training day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayExercise {
    /// Entry identifier
    pub id: i64,
    /// Owning training day
    pub day_id: i64,
    /// Referenced catalog exercise
    pub exercise_id: i64,
    /// Position within the day, unique per day (gaps allowed)
    pub order: u32,
    /// Number of sets (1-10)
    pub sets: u8,
    /// Rep prescription such as "8-12"
    pub reps: String,
    /// Suggested load in kilograms
    pub suggested_weight_kg: Option<f64>,
    /// Rest between sets in minutes
    pub rest_minutes: f64,
}

/// Data required to schedule an exercise on a training day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDayExercise {
    /// Referenced catalog exercise
    pub exercise_id: i64,
    /// Explicit position; `None` assigns the next free order
    pub order: Option<u32>,
    /// Number of sets (1-10)
    pub sets: u8,
    /// Rep prescription
    pub reps: String,
    /// Suggested load in kilograms
    pub suggested_weight_kg: Option<f64>,
    /// Rest between sets in minutes
    pub rest_minutes: f64,
}

impl NewDayExercise {
    /// Validate order, sets, reps, load and rest
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field
    pub fn validate(&self) -> AppResult<()> {
        if !(plan_limits::MIN_SETS..=plan_limits::MAX_SETS).contains(&self.sets) {
            return Err(AppError::value_out_of_range(
                "sets",
                self.sets,
                f64::from(plan_limits::MIN_SETS),
                f64::from(plan_limits::MAX_SETS),
            ));
        }
        if let Some(order) = self.order {
            let orders = plan_limits::MIN_EXERCISE_ORDER..=plan_limits::MAX_EXERCISE_ORDER;
            if !orders.contains(&order) {
                return Err(AppError::value_out_of_range(
                    "order",
                    order,
                    f64::from(plan_limits::MIN_EXERCISE_ORDER),
                    f64::from(plan_limits::MAX_EXERCISE_ORDER),
                ));
            }
        }
        if self.reps.trim().is_empty() {
            return Err(AppError::invalid_input("Reps must not be empty"));
        }
        if !self.rest_minutes.is_finite() || self.rest_minutes < 0.0 {
            return Err(AppError::invalid_input(
                "Rest minutes must be a non-negative number",
            ));
        }
        if let Some(weight) = self.suggested_weight_kg {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AppError::invalid_input(
                    "Suggested weight must be a non-negative number",
                ));
            }
        }
        Ok(())
    }
}
