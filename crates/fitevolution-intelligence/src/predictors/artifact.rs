// ABOUTME: Fitted preprocessing components shipped inside model artifacts
// ABOUTME: Label encoders, standard scaler, JSON artifact reading and column validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::PredictorError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Maps category labels to their fitted integer codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Known labels; a label's code is its index
    pub classes: Vec<String>,
}

impl LabelEncoder {
    /// Create an encoder from labels in code order
    #[must_use]
    pub fn new<S: Into<String>>(classes: impl IntoIterator<Item = S>) -> Self {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    /// Encode a label
    ///
    /// # Errors
    ///
    /// Returns `UnknownCategory` for labels not seen during fitting
    pub fn encode(&self, feature: &'static str, label: &str) -> Result<f64, PredictorError> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|index| index as f64)
            .ok_or_else(|| PredictorError::UnknownCategory {
                feature,
                value: label.to_owned(),
            })
    }
}

/// Per-column standardization `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Column means
    pub mean: Vec<f64>,
    /// Column standard deviations; zero is treated as one
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Verify the scaler covers exactly `width` columns
    ///
    /// # Errors
    ///
    /// Returns `ArtifactFormat` on a width mismatch
    pub fn check_width(&self, width: usize) -> Result<(), PredictorError> {
        if self.mean.len() != width || self.scale.len() != width {
            return Err(PredictorError::ArtifactFormat(format!(
                "scaler has {} means and {} scales, expected {width}",
                self.mean.len(),
                self.scale.len()
            )));
        }
        Ok(())
    }

    /// Standardize values column by column
    ///
    /// # Errors
    ///
    /// Returns `Inference` when the input width differs from the scaler's
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>, PredictorError> {
        if values.len() != self.mean.len() {
            return Err(PredictorError::Inference(format!(
                "expected {} features, got {}",
                self.mean.len(),
                values.len()
            )));
        }
        Ok(values
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(value, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (value - mean) / scale
            })
            .collect())
    }
}

/// Encoders for the categorical feature columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalEncoders {
    /// Sex labels ("M", "F")
    pub sex: LabelEncoder,
    /// Experience labels ("beginner", "intermediate", "advanced")
    pub experience: LabelEncoder,
    /// Goal labels ("fat_loss", "recomposition", "hypertrophy")
    pub goal: LabelEncoder,
}

impl Default for CategoricalEncoders {
    fn default() -> Self {
        Self {
            sex: LabelEncoder::new(["F", "M"]),
            experience: LabelEncoder::new(["advanced", "beginner", "intermediate"]),
            goal: LabelEncoder::new(["fat_loss", "hypertrophy", "recomposition"]),
        }
    }
}

/// Read and deserialize a JSON artifact
///
/// # Errors
///
/// Returns `ArtifactLoad` when the file cannot be read and `ArtifactFormat`
/// when its content does not deserialize
pub fn read_json_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, PredictorError> {
    let content = fs::read_to_string(path).map_err(|e| PredictorError::ArtifactLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content)
        .map_err(|e| PredictorError::ArtifactFormat(format!("{}: {e}", path.display())))
}

/// Compare declared artifact columns with the expected order
///
/// # Errors
///
/// Returns `FeatureMismatch` unless both lists are identical
pub fn check_columns(found: &[String], expected: &[&str]) -> Result<(), PredictorError> {
    if found.len() == expected.len() && found.iter().zip(expected).all(|(f, e)| f == e) {
        return Ok(());
    }
    Err(PredictorError::FeatureMismatch {
        expected: expected.iter().map(|c| (*c).to_owned()).collect(),
        found: found.to_vec(),
    })
}
