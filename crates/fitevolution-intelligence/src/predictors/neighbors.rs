// ABOUTME: k-nearest-neighbor predictor over a dataset of historical exercise records
// ABOUTME: Scaled Euclidean distances computed in parallel with deterministic tie-breaking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::artifact::{check_columns, read_json_artifact, CategoricalEncoders, StandardScaler};
use super::{
    FeatureVector, NeighborRecord, Prediction, Predictor, PredictorError, FEATURE_COLUMNS,
    FEATURE_COUNT,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Neighbors returned when no count is configured
pub const DEFAULT_NEIGHBORS: usize = 5;

/// One exercise performed by a historical user, with that user's raw features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    /// Raw (unscaled) features in column order
    pub features: Vec<f64>,
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
}

/// Serialized form of a [`NearestNeighborModel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborDataset {
    /// Feature columns of every record
    pub feature_columns: Vec<String>,
    /// Fitted categorical encoders
    pub encoders: CategoricalEncoders,
    /// Fitted scaler over all feature columns
    pub scaler: StandardScaler,
    /// Historical records
    pub records: Vec<HistoricalRecord>,
}

/// Nearest-neighbor lookup over pre-scaled historical records
#[derive(Debug, Clone)]
pub struct NearestNeighborModel {
    encoders: CategoricalEncoders,
    scaler: StandardScaler,
    points: Vec<Vec<f64>>,
    records: Vec<HistoricalRecord>,
    k: usize,
}

impl NearestNeighborModel {
    /// Validate a dataset and pre-scale its records
    ///
    /// # Errors
    ///
    /// Returns `FeatureMismatch` for a different column order and
    /// `ArtifactFormat` for malformed records or a zero neighbor count
    pub fn from_dataset(dataset: NeighborDataset, k: usize) -> Result<Self, PredictorError> {
        check_columns(&dataset.feature_columns, &FEATURE_COLUMNS)?;
        dataset.scaler.check_width(FEATURE_COUNT)?;
        if k == 0 {
            return Err(PredictorError::ArtifactFormat(
                "neighbor count must be at least 1".into(),
            ));
        }

        let points = dataset
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                if record.features.len() != FEATURE_COUNT {
                    return Err(PredictorError::ArtifactFormat(format!(
                        "record {index} has {} features, expected {FEATURE_COUNT}",
                        record.features.len()
                    )));
                }
                dataset.scaler.transform(&record.features)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            encoders: dataset.encoders,
            scaler: dataset.scaler,
            points,
            records: dataset.records,
            k,
        })
    }

    /// Load a dataset from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation
    pub fn load(path: &Path, k: usize) -> Result<Self, PredictorError> {
        let model = Self::from_dataset(read_json_artifact(path)?, k)?;
        tracing::info!(
            path = %path.display(),
            records = model.records.len(),
            k,
            "Loaded nearest-neighbor dataset"
        );
        Ok(model)
    }

    /// Number of historical records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Indices and distances of the `k` nearest records, nearest first; equal
    /// distances are ordered by record index
    ///
    /// # Errors
    ///
    /// Returns `Inference` when the dataset is empty
    pub fn nearest(&self, features: &FeatureVector) -> Result<Vec<(usize, f64)>, PredictorError> {
        if self.points.is_empty() {
            return Err(PredictorError::Inference(
                "neighbor dataset has no records".into(),
            ));
        }
        let query = self.scaler.transform(features.values())?;

        let mut distances: Vec<(usize, f64)> = self
            .points
            .par_iter()
            .enumerate()
            .map(|(index, point)| (index, euclidean(&query, point)))
            .collect();

        distances.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        distances.truncate(self.k);
        Ok(distances)
    }
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

impl Predictor for NearestNeighborModel {
    fn name(&self) -> &'static str {
        "nearest_neighbors"
    }

    fn encoders(&self) -> &CategoricalEncoders {
        &self.encoders
    }

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictorError> {
        let neighbors = self
            .nearest(features)?
            .into_iter()
            .filter_map(|(index, distance)| {
                self.records.get(index).map(|record| NeighborRecord {
                    exercise_id: record.exercise_id,
                    muscle_group: record.muscle_group.clone(),
                    sets: record.sets,
                    reps: record.reps,
                    weight_kg: record.weight_kg,
                    rest_minutes: record.rest_minutes,
                    distance,
                })
            })
            .collect();
        Ok(Prediction::Neighbors(neighbors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(age: f64, exercise_id: i64) -> HistoricalRecord {
        let mut features = vec![0.0; FEATURE_COUNT];
        features[0] = age;
        HistoricalRecord {
            features,
            exercise_id,
            muscle_group: "Chest".into(),
            sets: 4.0,
            reps: 10.0,
            weight_kg: 60.0,
            rest_minutes: 2.0,
        }
    }

    fn dataset(records: Vec<HistoricalRecord>) -> NeighborDataset {
        NeighborDataset {
            feature_columns: FEATURE_COLUMNS.iter().map(|c| (*c).to_owned()).collect(),
            encoders: CategoricalEncoders::default(),
            scaler: StandardScaler {
                mean: vec![0.0; FEATURE_COUNT],
                scale: vec![1.0; FEATURE_COUNT],
            },
            records,
        }
    }

    #[test]
    fn test_ties_broken_by_index() {
        let model = NearestNeighborModel::from_dataset(
            dataset(vec![record(40.0, 3), record(20.0, 1), record(40.0, 2)]),
            2,
        )
        .unwrap();
        let mut query = [0.0; FEATURE_COUNT];
        query[0] = 30.0;
        let nearest = model.nearest(&FeatureVector::from_values(query)).unwrap();
        let indices: Vec<usize> = nearest.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_empty_dataset_fails_inference() {
        let model = NearestNeighborModel::from_dataset(dataset(Vec::new()), 3).unwrap();
        let result = model.predict(&FeatureVector::from_values([0.0; FEATURE_COUNT]));
        assert!(matches!(result, Err(PredictorError::Inference(_))));
    }

    #[test]
    fn test_short_record_rejected() {
        let mut bad = record(30.0, 1);
        bad.features.pop();
        assert!(NearestNeighborModel::from_dataset(dataset(vec![bad]), 3).is_err());
    }
}
