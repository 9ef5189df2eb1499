// ABOUTME: Linear regression predictor for sets, reps, load and rest
// ABOUTME: Loads coefficients, encoders and scaler from a JSON artifact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::artifact::{check_columns, read_json_artifact, CategoricalEncoders, StandardScaler};
use super::{
    FeatureVector, PredictedParameters, Prediction, Predictor, PredictorError, FEATURE_COLUMNS,
    FEATURE_COUNT,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of regression outputs: sets, reps, `weight_kg`, `rest_minutes`
pub const OUTPUT_COUNT: usize = 4;

/// Serialized form of a [`LinearParameterModel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearParameterArtifact {
    /// Feature columns the model was trained with
    pub feature_columns: Vec<String>,
    /// Fitted categorical encoders
    pub encoders: CategoricalEncoders,
    /// Fitted scaler over all feature columns
    pub scaler: StandardScaler,
    /// One coefficient row per output
    pub coefficients: Vec<Vec<f64>>,
    /// One intercept per output
    pub intercepts: Vec<f64>,
}

/// Multi-output linear regression over scaled features
#[derive(Debug, Clone)]
pub struct LinearParameterModel {
    encoders: CategoricalEncoders,
    scaler: StandardScaler,
    coefficients: [[f64; FEATURE_COUNT]; OUTPUT_COUNT],
    intercepts: [f64; OUTPUT_COUNT],
}

impl LinearParameterModel {
    /// Validate an artifact and build the model
    ///
    /// # Errors
    ///
    /// Returns `FeatureMismatch` for a different column order and
    /// `ArtifactFormat` for wrongly shaped matrices
    pub fn from_artifact(artifact: LinearParameterArtifact) -> Result<Self, PredictorError> {
        check_columns(&artifact.feature_columns, &FEATURE_COLUMNS)?;
        artifact.scaler.check_width(FEATURE_COUNT)?;

        if artifact.coefficients.len() != OUTPUT_COUNT {
            return Err(PredictorError::ArtifactFormat(format!(
                "expected {OUTPUT_COUNT} coefficient rows, found {}",
                artifact.coefficients.len()
            )));
        }
        let mut coefficients = [[0.0; FEATURE_COUNT]; OUTPUT_COUNT];
        for (target, row) in coefficients.iter_mut().zip(&artifact.coefficients) {
            *target = row.as_slice().try_into().map_err(|_| {
                PredictorError::ArtifactFormat(format!(
                    "coefficient row has {} values, expected {FEATURE_COUNT}",
                    row.len()
                ))
            })?;
        }
        let intercepts = artifact.intercepts.as_slice().try_into().map_err(|_| {
            PredictorError::ArtifactFormat(format!(
                "expected {OUTPUT_COUNT} intercepts, found {}",
                artifact.intercepts.len()
            ))
        })?;

        Ok(Self {
            encoders: artifact.encoders,
            scaler: artifact.scaler,
            coefficients,
            intercepts,
        })
    }

    /// Load from a JSON artifact file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation
    pub fn load(path: &Path) -> Result<Self, PredictorError> {
        let model = Self::from_artifact(read_json_artifact(path)?)?;
        tracing::info!(path = %path.display(), "Loaded linear parameter model");
        Ok(model)
    }
}

impl Predictor for LinearParameterModel {
    fn name(&self) -> &'static str {
        "linear_parameters"
    }

    fn encoders(&self) -> &CategoricalEncoders {
        &self.encoders
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictorError> {
        let scaled = self.scaler.transform(features.values())?;
        let mut outputs = self.intercepts;
        for (output, row) in outputs.iter_mut().zip(&self.coefficients) {
            *output += row.iter().zip(&scaled).map(|(c, x)| c * x).sum::<f64>();
        }
        if outputs.iter().any(|v| !v.is_finite()) {
            return Err(PredictorError::Inference(
                "model produced a non-finite output".into(),
            ));
        }
        let [sets, reps, weight_kg, rest_minutes] = outputs;
        Ok(Prediction::Parameters(PredictedParameters {
            sets,
            reps,
            weight_kg,
            rest_minutes,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> LinearParameterArtifact {
        let mut coefficients = vec![vec![0.0; FEATURE_COUNT]; OUTPUT_COUNT];
        coefficients[2][1] = 1.0;
        LinearParameterArtifact {
            feature_columns: FEATURE_COLUMNS.iter().map(|c| (*c).to_owned()).collect(),
            encoders: CategoricalEncoders::default(),
            scaler: StandardScaler {
                mean: vec![0.0; FEATURE_COUNT],
                scale: vec![1.0; FEATURE_COUNT],
            },
            coefficients,
            intercepts: vec![4.0, 10.0, 0.0, 1.5],
        }
    }

    #[test]
    fn test_weight_follows_coefficient() {
        let model = LinearParameterModel::from_artifact(artifact()).unwrap();
        let mut values = [0.0; FEATURE_COUNT];
        values[1] = 72.5;
        let prediction = model.predict(&FeatureVector::from_values(values)).unwrap();
        let Prediction::Parameters(params) = prediction else {
            panic!("expected parameters");
        };
        assert!((params.weight_kg - 72.5).abs() < 1e-9);
        assert!((params.sets - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_short_coefficient_row_rejected() {
        let mut bad = artifact();
        bad.coefficients[0].pop();
        assert!(matches!(
            LinearParameterModel::from_artifact(bad),
            Err(PredictorError::ArtifactFormat(_))
        ));
    }
}
