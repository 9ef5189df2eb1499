// ABOUTME: Behavior tests for artifact loading and model-assisted plan generation
// ABOUTME: Writes JSON artifacts into temporary directories and exercises both predictors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitevolution_core::errors::ErrorCode;
use fitevolution_core::models::{ActivityLevel, Goal, ProfileInput, Sex};
use fitevolution_intelligence::predictors::{
    CategoricalEncoders, FeatureVector, HistoricalRecord, LabelEncoder, LinearParameterArtifact,
    LinearParameterModel, NearestNeighborModel, NeighborDataset, StandardScaler, FEATURE_COLUMNS,
    FEATURE_COUNT,
};
use fitevolution_intelligence::{
    ExerciseCatalog, ModelAssistedPlanner, PlanGenerator, PlannerConfig, Predictor,
    PredictorError, Profile,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn profile() -> Profile {
    Profile::new(ProfileInput {
        age: 28,
        sex: Sex::Female,
        weight_kg: 62.0,
        height_cm: 168,
        activity_level: ActivityLevel::Moderate,
        goal: Goal::Recomposition,
        session_minutes: None,
    })
    .unwrap()
}

fn columns() -> Vec<String> {
    FEATURE_COLUMNS.iter().map(|c| (*c).to_owned()).collect()
}

fn identity_scaler() -> StandardScaler {
    StandardScaler {
        mean: vec![0.0; FEATURE_COUNT],
        scale: vec![1.0; FEATURE_COUNT],
    }
}

fn linear_artifact(intercepts: Vec<f64>) -> LinearParameterArtifact {
    LinearParameterArtifact {
        feature_columns: columns(),
        encoders: CategoricalEncoders::default(),
        scaler: identity_scaler(),
        coefficients: vec![vec![0.0; FEATURE_COUNT]; 4],
        intercepts,
    }
}

fn write_json<T: serde::Serialize>(dir: &TempDir, name: &str, value: &T) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

#[test]
fn test_feature_vector_column_order() {
    let encoders = CategoricalEncoders::default();
    let features = FeatureVector::from_profile(&profile(), &encoders).unwrap();
    let values = features.values();

    assert!((values[0] - 28.0).abs() < f64::EPSILON);
    assert!((values[1] - 62.0).abs() < f64::EPSILON);
    assert!((values[2] - 168.0).abs() < f64::EPSILON);
    assert_eq!(Some(values[3]), profile().bmi());
    assert_eq!(Some(values[4]), profile().body_fat_pct());
    // Session length defaults to an hour
    assert!((values[5] - 60.0).abs() < f64::EPSILON);
    // "F" is class 0; moderate maps to intermediate (class 2); recomposition is class 2
    assert!(values[6].abs() < f64::EPSILON);
    assert!((values[7] - 2.0).abs() < f64::EPSILON);
    assert!((values[8] - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_unknown_category_reported() {
    let encoders = CategoricalEncoders {
        sex: LabelEncoder::new(["M"]),
        ..CategoricalEncoders::default()
    };
    let error = FeatureVector::from_profile(&profile(), &encoders).unwrap_err();
    assert!(matches!(error, PredictorError::UnknownCategory { feature: "sex", .. }));
}

#[test]
fn test_linear_artifact_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "linear.json", &linear_artifact(vec![9.0, 3.0, 42.04, 0.1]));
    let model = LinearParameterModel::load(&path).unwrap();

    let planner = ModelAssistedPlanner::new(Arc::new(PlannerConfig::default()), Arc::new(model));
    let plan = planner
        .generate_plan(&profile(), &ExerciseCatalog::builtin(), None)
        .unwrap();

    assert_eq!(plan.len(), 4);
    for (_, day) in plan.days() {
        for exercise in &day.exercises {
            // Clamped into sets 2-5, reps 6-20, rest 0.5-5.0
            assert_eq!(exercise.sets, 5);
            assert_eq!(exercise.reps, "6");
            assert!((exercise.rest_minutes - 0.5).abs() < f64::EPSILON);
            if exercise.muscle_group == "Abs" {
                assert_eq!(exercise.suggested_weight_kg, None);
            } else {
                assert_eq!(exercise.suggested_weight_kg, Some(42.0));
            }
        }
    }
}

#[test]
fn test_feature_mismatch_rejected_at_load() {
    let dir = TempDir::new().unwrap();
    let mut artifact = linear_artifact(vec![3.0, 10.0, 40.0, 1.5]);
    artifact.feature_columns.swap(0, 1);
    let path = write_json(&dir, "swapped.json", &artifact);

    let error = LinearParameterModel::load(&path).unwrap_err();
    assert!(matches!(error, PredictorError::FeatureMismatch { .. }));
}

#[test]
fn test_missing_artifact_is_load_error() {
    let dir = TempDir::new().unwrap();
    let error = LinearParameterModel::load(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(error.kind(), "artifact_load");
}

#[test]
fn test_malformed_artifact_is_format_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"feature_columns\": [").unwrap();
    let error = LinearParameterModel::load(&path).unwrap_err();
    assert!(matches!(error, PredictorError::ArtifactFormat(_)));
}

fn record(features: Vec<f64>, exercise_id: i64, group: &str, weight_kg: f64) -> HistoricalRecord {
    HistoricalRecord {
        features,
        exercise_id,
        muscle_group: group.into(),
        sets: 3.0,
        reps: 12.0,
        weight_kg,
        rest_minutes: 1.5,
    }
}

#[test]
fn test_neighbor_plan_prefers_similar_users_exercises() {
    let encoders = CategoricalEncoders::default();
    let query = *FeatureVector::from_profile(&profile(), &encoders).unwrap().values();
    let mut far = query;
    far[0] += 40.0;

    let dataset = NeighborDataset {
        feature_columns: columns(),
        encoders,
        scaler: identity_scaler(),
        records: vec![
            record(far.to_vec(), 1, "Chest", 90.0),
            record(query.to_vec(), 3, "Chest", 22.5),
            record(query.to_vec(), 11, "Legs", 70.0),
        ],
    };
    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "neighbors.json", &dataset);
    let model = NearestNeighborModel::load(&path, 2).unwrap();

    let planner = ModelAssistedPlanner::new(Arc::new(PlannerConfig::default()), Arc::new(model));
    let plan = planner
        .generate_plan(&profile(), &ExerciseCatalog::builtin(), None)
        .unwrap();

    let chest_day = plan.day(1).unwrap();
    let chest: Vec<_> = chest_day
        .exercises
        .iter()
        .filter(|e| e.muscle_group == "Chest")
        .collect();
    assert_eq!(chest[0].exercise_id, 3);
    assert_eq!(chest[0].suggested_weight_kg, Some(22.5));
    // The far record is not among the two nearest, so catalog order fills the rest
    assert_eq!(chest[1].exercise_id, 1);
    assert_eq!(chest[1].suggested_weight_kg, Some(22.5));
}

#[test]
fn test_trait_maps_failures_to_recommendation_unavailable() {
    struct Failing(CategoricalEncoders);

    impl Predictor for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn encoders(&self) -> &CategoricalEncoders {
            &self.0
        }

        fn predict(
            &self,
            _features: &FeatureVector,
        ) -> Result<fitevolution_intelligence::Prediction, PredictorError> {
            Err(PredictorError::Inference("boom".into()))
        }
    }

    let planner = ModelAssistedPlanner::new(
        Arc::new(PlannerConfig::default()),
        Arc::new(Failing(CategoricalEncoders::default())),
    );
    let error = planner
        .generate(&profile(), &ExerciseCatalog::builtin(), None)
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::RecommendationUnavailable);
}
