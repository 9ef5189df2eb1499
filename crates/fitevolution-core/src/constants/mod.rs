// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Validation limits, planner clamps, and service names for FitEvolution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large
//! list, so that validation code and planner code can import only what they use.

/// Accepted ranges for profile inputs
pub mod profile_limits {
    /// Minimum age in years
    pub const MIN_AGE: u32 = 13;
    /// Maximum age in years
    pub const MAX_AGE: u32 = 100;
    /// Minimum body weight in kilograms
    pub const MIN_WEIGHT_KG: f64 = 20.0;
    /// Maximum body weight in kilograms
    pub const MAX_WEIGHT_KG: f64 = 400.0;
    /// Minimum height in centimeters
    pub const MIN_HEIGHT_CM: u32 = 80;
    /// Maximum height in centimeters
    pub const MAX_HEIGHT_CM: u32 = 300;
    /// Minimum training session length in minutes
    pub const MIN_SESSION_MINUTES: u32 = 10;
    /// Maximum training session length in minutes
    pub const MAX_SESSION_MINUTES: u32 = 230;
}

/// Body composition estimation bounds
pub mod body_composition {
    /// Lowest body fat percentage ever reported
    pub const MIN_BODY_FAT_PCT: f64 = 3.0;
    /// Highest body fat percentage ever reported
    pub const MAX_BODY_FAT_PCT: f64 = 70.0;
    /// Deurenberg BMI coefficient
    pub const DEURENBERG_BMI_COEF: f64 = 1.20;
    /// Deurenberg age coefficient
    pub const DEURENBERG_AGE_COEF: f64 = 0.23;
    /// Deurenberg sex coefficient (applied when the indicator is 1)
    pub const DEURENBERG_SEX_COEF: f64 = 10.8;
    /// Deurenberg constant term
    pub const DEURENBERG_CONSTANT: f64 = 5.4;
}

/// Bounds applied to plan entries
pub mod plan_limits {
    /// Minimum sets on a day exercise
    pub const MIN_SETS: u8 = 1;
    /// Maximum sets on a day exercise
    pub const MAX_SETS: u8 = 10;
    /// First weekday number
    pub const MIN_WEEKDAY: u8 = 1;
    /// Last weekday number
    pub const MAX_WEEKDAY: u8 = 7;
    /// First position of an exercise within a day
    pub const MIN_EXERCISE_ORDER: u32 = 1;
    /// Last position of an exercise within a day
    pub const MAX_EXERCISE_ORDER: u32 = 9_999;
    /// Default number of attempts when assigning the next exercise order
    pub const DEFAULT_ORDER_RETRY_ATTEMPTS: u32 = 3;
    /// Upper bound accepted for the order retry setting
    pub const MAX_ORDER_RETRY_ATTEMPTS: u32 = 10;
}

/// Sane ranges for values produced by trained models
pub mod prediction_clamps {
    /// Minimum predicted sets
    pub const MIN_SETS: f64 = 2.0;
    /// Maximum predicted sets
    pub const MAX_SETS: f64 = 5.0;
    /// Minimum predicted reps
    pub const MIN_REPS: f64 = 6.0;
    /// Maximum predicted reps
    pub const MAX_REPS: f64 = 20.0;
    /// Minimum predicted rest in minutes
    pub const MIN_REST_MINUTES: f64 = 0.5;
    /// Maximum predicted rest in minutes
    pub const MAX_REST_MINUTES: f64 = 5.0;
    /// Smallest suggested load the model path will output (kg)
    pub const MIN_SUGGESTED_WEIGHT_KG: f64 = 5.0;
}

/// Workout history bounds
pub mod history_limits {
    /// Lowest rate of perceived exertion
    pub const MIN_RPE: u8 = 1;
    /// Highest rate of perceived exertion
    pub const MAX_RPE: u8 = 10;
    /// Highest discomfort level (0 means none)
    pub const MAX_DISCOMFORT: u8 = 10;
}

/// Service identification for structured logging
pub mod service_names {
    /// Service name reported in log records
    pub const FITEVOLUTION: &str = "fitevolution";
}
