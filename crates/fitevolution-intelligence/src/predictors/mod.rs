// ABOUTME: Predictor capability for model-assisted planning and the profile feature vector
// ABOUTME: Defines prediction outputs, clamping ranges and the predictor error taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! # Predictors
//!
//! A [`Predictor`] turns a [`FeatureVector`] into either regressed exercise
//! parameters or a set of historically similar exercise records. Trained
//! artifacts are produced offline and loaded once at startup; implementations
//! are immutable and shared behind `Arc`.
//!
//! Feature column order is fixed by [`FEATURE_COLUMNS`]. Every artifact declares
//! the columns it was trained with and is rejected at load time when they differ.

/// Label encoders, scaler and artifact file helpers
pub mod artifact;

/// Linear regression over exercise parameters
pub mod linear;

/// k-nearest-neighbor lookup over historical exercise records
pub mod neighbors;

pub use artifact::{CategoricalEncoders, LabelEncoder, StandardScaler};
pub use linear::{LinearParameterArtifact, LinearParameterModel};
pub use neighbors::{HistoricalRecord, NearestNeighborModel, NeighborDataset};

use crate::body_composition::Profile;
use crate::rounding::round_to;
use fitevolution_core::constants::prediction_clamps;
use fitevolution_core::errors::AppError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Column order every artifact must be trained with
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "age",
    "weight_kg",
    "height_cm",
    "bmi",
    "body_fat_pct",
    "session_minutes",
    "sex",
    "experience",
    "goal",
];

/// Number of model features
pub const FEATURE_COUNT: usize = 9;

/// Session length assumed when the profile does not record one
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

/// Failures of the model-assisted path
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictorError {
    /// Artifact file could not be read
    #[error("failed to load model artifact {path}: {reason}")]
    ArtifactLoad {
        /// Artifact path
        path: String,
        /// Underlying I/O error
        reason: String,
    },
    /// Artifact content is malformed
    #[error("malformed model artifact: {0}")]
    ArtifactFormat(String),
    /// Artifact was trained with a different feature order
    #[error("feature columns {found:?} do not match expected {expected:?}")]
    FeatureMismatch {
        /// Expected columns
        expected: Vec<String>,
        /// Columns declared by the artifact
        found: Vec<String>,
    },
    /// Categorical value missing from the fitted encoder
    #[error("unknown {feature} category '{value}'")]
    UnknownCategory {
        /// Encoded feature
        feature: &'static str,
        /// Value not seen during training
        value: String,
    },
    /// Profile has no body composition metrics to build features from
    #[error("profile body composition metrics are unavailable")]
    MissingMetrics,
    /// Model evaluation failed or produced unusable output
    #[error("inference failed: {0}")]
    Inference(String),
}

impl PredictorError {
    /// Short machine-readable error kind for structured logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ArtifactLoad { .. } => "artifact_load",
            Self::ArtifactFormat(_) => "artifact_format",
            Self::FeatureMismatch { .. } => "feature_mismatch",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::MissingMetrics => "missing_metrics",
            Self::Inference(_) => "inference",
        }
    }
}

impl From<PredictorError> for AppError {
    fn from(error: PredictorError) -> Self {
        Self::recommendation_unavailable(error.to_string())
    }
}

/// Model input assembled from a profile in [`FEATURE_COLUMNS`] order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    /// Wrap raw values already in column order
    #[must_use]
    pub const fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Assemble features from a profile, encoding categorical fields
    ///
    /// # Errors
    ///
    /// Returns `MissingMetrics` when BMI/body fat are absent and
    /// `UnknownCategory` when an encoder has not seen a label
    pub fn from_profile(
        profile: &Profile,
        encoders: &CategoricalEncoders,
    ) -> Result<Self, PredictorError> {
        let metrics = profile.metrics().ok_or(PredictorError::MissingMetrics)?;
        let session = profile
            .session_minutes()
            .unwrap_or(DEFAULT_SESSION_MINUTES);
        let experience = profile.activity_level().experience();

        Ok(Self([
            f64::from(profile.age()),
            profile.weight_kg(),
            f64::from(profile.height_cm()),
            metrics.bmi,
            metrics.body_fat_pct,
            f64::from(session),
            encoders.sex.encode("sex", profile.sex().as_str())?,
            encoders.experience.encode("experience", experience.as_str())?,
            encoders.goal.encode("goal", profile.goal().as_str())?,
        ]))
    }

    /// Values in column order
    #[must_use]
    pub const fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }
}

/// Regressed exercise parameters before clamping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictedParameters {
    /// Sets per exercise
    pub sets: f64,
    /// Reps per set
    pub reps: f64,
    /// Load in kilograms
    pub weight_kg: f64,
    /// Rest between sets in minutes
    pub rest_minutes: f64,
}

impl PredictedParameters {
    /// Clamp into sane ranges: sets 2-5, reps 6-20, rest 0.5-5.0 minutes,
    /// load at least 5 kg (rounded to 0.1 kg)
    #[must_use]
    pub fn clamped(&self) -> ClampedParameters {
        ClampedParameters {
            sets: self
                .sets
                .round()
                .clamp(prediction_clamps::MIN_SETS, prediction_clamps::MAX_SETS)
                as u8,
            reps: self
                .reps
                .round()
                .clamp(prediction_clamps::MIN_REPS, prediction_clamps::MAX_REPS)
                as u32,
            weight_kg: round_to(self.weight_kg, 1)
                .max(prediction_clamps::MIN_SUGGESTED_WEIGHT_KG),
            rest_minutes: round_to(
                self.rest_minutes.clamp(
                    prediction_clamps::MIN_REST_MINUTES,
                    prediction_clamps::MAX_REST_MINUTES,
                ),
                1,
            ),
        }
    }
}

/// Exercise parameters after clamping
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClampedParameters {
    /// Sets, 2-5
    pub sets: u8,
    /// Reps, 6-20
    pub reps: u32,
    /// Load in kilograms, at least 5
    pub weight_kg: f64,
    /// Rest in minutes, 0.5-5.0
    pub rest_minutes: f64,
}

/// A historical exercise record returned by a neighbor lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborRecord {
    /// Catalog exercise id
    pub exercise_id: i64,
    /// Muscle group name
    pub muscle_group: String,
    /// Sets performed
    pub sets: f64,
    /// Reps performed
    pub reps: f64,
    /// Load in kilograms
    pub weight_kg: f64,
    /// Rest in minutes
    pub rest_minutes: f64,
    /// Scaled Euclidean distance to the query
    pub distance: f64,
}

impl NeighborRecord {
    /// Parameters carried by this record
    #[must_use]
    pub const fn parameters(&self) -> PredictedParameters {
        PredictedParameters {
            sets: self.sets,
            reps: self.reps,
            weight_kg: self.weight_kg,
            rest_minutes: self.rest_minutes,
        }
    }
}

/// Output of a predictor
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// Regressed parameters applied to every assignment
    Parameters(PredictedParameters),
    /// Similar historical records, nearest first
    Neighbors(Vec<NeighborRecord>),
}

/// A trained model usable by the model-assisted planner
pub trait Predictor: Send + Sync {
    /// Identifier used in logs
    fn name(&self) -> &'static str;

    /// Encoders fitted alongside the model
    fn encoders(&self) -> &CategoricalEncoders;

    /// Run inference
    ///
    /// # Errors
    ///
    /// Returns an error when inference fails or yields unusable values
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictorError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitevolution_core::errors::ErrorCode;

    #[test]
    fn test_clamping() {
        let raw = PredictedParameters {
            sets: 7.4,
            reps: 3.0,
            weight_kg: 2.26,
            rest_minutes: 9.0,
        };
        let clamped = raw.clamped();
        assert_eq!(clamped.sets, 5);
        assert_eq!(clamped.reps, 6);
        assert!((clamped.weight_kg - 5.0).abs() < f64::EPSILON);
        assert!((clamped.rest_minutes - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_error_maps_to_recommendation_unavailable() {
        let error: AppError = PredictorError::MissingMetrics.into();
        assert_eq!(error.code, ErrorCode::RecommendationUnavailable);
    }
}
