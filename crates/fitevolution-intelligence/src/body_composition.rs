// ABOUTME: Body composition metrics (BMI, Deurenberg body fat) and the validated user profile
// ABOUTME: Derived metrics are recomputed on every change and can never be set by callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! Profile evaluation.
//!
//! - BMI = `weight_kg / height_m²`, rounded to 2 decimals
//! - Body fat (Deurenberg, 1991) = `1.20 × BMI + 0.23 × age − 10.8 × sex − 5.4`,
//!   computed from the rounded BMI, clamped to [3, 70] and rounded to 1 decimal
//!
//! Invalid inputs surface as [`CompositionError`] instead of silently producing
//! nulls; [`Profile`] turns an error into absent metrics and logs it.

use crate::rounding::round_to;
use fitevolution_core::constants::body_composition::{
    DEURENBERG_AGE_COEF, DEURENBERG_BMI_COEF, DEURENBERG_CONSTANT, DEURENBERG_SEX_COEF,
    MAX_BODY_FAT_PCT, MIN_BODY_FAT_PCT,
};
use fitevolution_core::errors::{AppError, AppResult};
use fitevolution_core::models::{ActivityLevel, Goal, ProfileInput, Sex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why body composition could not be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompositionError {
    /// Input was not a finite number
    #[error("{field} is not a number")]
    NonNumeric {
        /// Offending input
        field: &'static str,
    },
    /// Input was zero or negative
    #[error("{field} must be positive")]
    NonPositive {
        /// Offending input
        field: &'static str,
    },
}

impl From<CompositionError> for AppError {
    fn from(error: CompositionError) -> Self {
        Self::invalid_input(error.to_string())
    }
}

/// Derived body composition metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyComposition {
    /// Body mass index, 2 decimals
    pub bmi: f64,
    /// Estimated body fat percentage, 1 decimal, within [3, 70]
    pub body_fat_pct: f64,
}

fn require_positive(value: f64, field: &'static str) -> Result<f64, CompositionError> {
    if !value.is_finite() {
        return Err(CompositionError::NonNumeric { field });
    }
    if value <= 0.0 {
        return Err(CompositionError::NonPositive { field });
    }
    Ok(value)
}

/// BMI rounded to 2 decimals
///
/// # Errors
///
/// Returns an error if weight or height is not a positive finite number
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<f64, CompositionError> {
    let weight_kg = require_positive(weight_kg, "weight_kg")?;
    let height_m = require_positive(height_cm, "height_cm")? / 100.0;
    Ok(round_to(weight_kg / (height_m * height_m), 2))
}

/// Deurenberg body fat estimate, clamped to [3, 70] and rounded to 1 decimal
#[must_use]
pub fn estimate_body_fat(bmi: f64, age: u32, sex: Sex) -> f64 {
    let raw = DEURENBERG_AGE_COEF.mul_add(
        f64::from(age),
        DEURENBERG_BMI_COEF * bmi,
    ) - DEURENBERG_SEX_COEF * sex.indicator()
        - DEURENBERG_CONSTANT;
    round_to(raw.clamp(MIN_BODY_FAT_PCT, MAX_BODY_FAT_PCT), 1)
}

/// Compute BMI and body fat from measurements
///
/// # Errors
///
/// Returns an error if weight or height is not a positive finite number
pub fn evaluate(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: Sex,
) -> Result<BodyComposition, CompositionError> {
    let bmi = calculate_bmi(weight_kg, height_cm)?;
    Ok(BodyComposition {
        bmi,
        body_fat_pct: estimate_body_fat(bmi, age, sex),
    })
}

/// Compute metrics from unparsed text measurements, as submitted by forms
///
/// # Errors
///
/// Returns `NonNumeric` when a measurement does not parse, otherwise as [`evaluate`]
pub fn evaluate_raw(
    weight_kg: &str,
    height_cm: &str,
    age: u32,
    sex: Sex,
) -> Result<BodyComposition, CompositionError> {
    let weight = weight_kg
        .trim()
        .parse::<f64>()
        .map_err(|_| CompositionError::NonNumeric { field: "weight_kg" })?;
    let height = height_cm
        .trim()
        .parse::<f64>()
        .map_err(|_| CompositionError::NonNumeric { field: "height_cm" })?;
    evaluate(weight, height, age, sex)
}

/// A validated user profile with its derived metrics.
///
/// Fields are private: every mutation goes through [`Profile::update`], which
/// revalidates the input and recomputes the metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    #[serde(flatten)]
    input: ProfileInput,
    #[serde(flatten)]
    metrics: Option<BodyComposition>,
}

impl Profile {
    /// Validate raw input and compute metrics
    ///
    /// # Errors
    ///
    /// Returns an error if any field is outside its accepted range
    pub fn new(input: ProfileInput) -> AppResult<Self> {
        input.validate()?;
        let metrics = derive_metrics(&input);
        Ok(Self { input, metrics })
    }

    /// Apply a change to the raw input, then revalidate and recompute metrics.
    /// The profile is left untouched when the changed input is invalid.
    ///
    /// # Errors
    ///
    /// Returns an error if the changed input is outside accepted ranges
    pub fn update(&mut self, change: impl FnOnce(&mut ProfileInput)) -> AppResult<()> {
        let mut next = self.input.clone();
        change(&mut next);
        next.validate()?;
        self.metrics = derive_metrics(&next);
        self.input = next;
        Ok(())
    }

    /// Raw input
    #[must_use]
    pub const fn input(&self) -> &ProfileInput {
        &self.input
    }

    /// Derived metrics, `None` when they could not be computed
    #[must_use]
    pub const fn metrics(&self) -> Option<BodyComposition> {
        self.metrics
    }

    /// Body mass index
    #[must_use]
    pub fn bmi(&self) -> Option<f64> {
        self.metrics.map(|m| m.bmi)
    }

    /// Estimated body fat percentage
    #[must_use]
    pub fn body_fat_pct(&self) -> Option<f64> {
        self.metrics.map(|m| m.body_fat_pct)
    }

    /// Age in years
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.input.age
    }

    /// Biological sex
    #[must_use]
    pub const fn sex(&self) -> Sex {
        self.input.sex
    }

    /// Body weight in kilograms
    #[must_use]
    pub const fn weight_kg(&self) -> f64 {
        self.input.weight_kg
    }

    /// Height in centimeters
    #[must_use]
    pub const fn height_cm(&self) -> u32 {
        self.input.height_cm
    }

    /// Activity level
    #[must_use]
    pub const fn activity_level(&self) -> ActivityLevel {
        self.input.activity_level
    }

    /// Training goal
    #[must_use]
    pub const fn goal(&self) -> Goal {
        self.input.goal
    }

    /// Session length in minutes, if known
    #[must_use]
    pub const fn session_minutes(&self) -> Option<u32> {
        self.input.session_minutes
    }
}

fn derive_metrics(input: &ProfileInput) -> Option<BodyComposition> {
    match evaluate(
        input.weight_kg,
        f64::from(input.height_cm),
        input.age,
        input.sex,
    ) {
        Ok(metrics) => Some(metrics),
        Err(error) => {
            tracing::warn!(error = %error, "Profile metrics unavailable");
            None
        }
    }
}
