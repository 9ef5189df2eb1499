// ABOUTME: Criterion benchmarks for weekly plan generation and neighbor lookup
// ABOUTME: Measures rule-based planning, k-NN search over synthetic datasets and order assignment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! Criterion benchmarks for the training planner.
//!
//! Covers rule-based generation per day count, nearest-neighbor lookup over
//! growing synthetic datasets and automatic day-exercise ordering in `SQLite`.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fitevolution::database::Database;
use fitevolution::intelligence::predictors::{
    CategoricalEncoders, FeatureVector, HistoricalRecord, NearestNeighborModel, NeighborDataset,
    StandardScaler, FEATURE_COLUMNS, FEATURE_COUNT,
};
use fitevolution::intelligence::{ExerciseCatalog, Profile, RuleBasedPlanner};
use fitevolution::models::{
    ActivityLevel, Goal, NewDayExercise, NewTrainingDay, NewTrainingPlan, PlanStatus,
    ProfileInput, Sex,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

fn bench_profile() -> Profile {
    Profile::new(ProfileInput {
        age: 34,
        sex: Sex::Female,
        weight_kg: 64.0,
        height_cm: 168,
        activity_level: ActivityLevel::Intense,
        goal: Goal::Recomposition,
        session_minutes: Some(75),
    })
    .unwrap()
}

/// Deterministic dataset spread around typical adult measurements
fn synthetic_dataset(size: usize) -> NeighborDataset {
    let groups = ["chest", "back", "legs", "shoulders", "biceps", "triceps"];
    let records = (0..size)
        .map(|i| {
            let step = (i % 97) as f64;
            HistoricalRecord {
                features: vec![
                    18.0 + (i % 50) as f64,
                    50.0 + step * 0.6,
                    150.0 + (i % 45) as f64,
                    18.0 + (i % 17) as f64,
                    10.0 + (i % 30) as f64,
                    30.0 + (i % 7) as f64 * 10.0,
                    (i % 2) as f64,
                    (i % 3) as f64,
                    (i % 3) as f64,
                ],
                exercise_id: (i % 21) as i64 + 1,
                muscle_group: groups[i % groups.len()].to_owned(),
                sets: 3.0 + (i % 2) as f64,
                reps: 8.0 + (i % 5) as f64,
                weight_kg: 20.0 + step,
                rest_minutes: 1.5,
            }
        })
        .collect();

    NeighborDataset {
        feature_columns: FEATURE_COLUMNS.iter().map(|c| (*c).to_owned()).collect(),
        encoders: CategoricalEncoders::default(),
        scaler: StandardScaler {
            mean: vec![40.0, 80.0, 172.0, 25.0, 25.0, 60.0, 0.5, 1.0, 1.0],
            scale: vec![12.0, 15.0, 10.0, 4.0, 8.0, 20.0, 0.5, 0.8, 0.8],
        },
        records,
    }
}

fn bench_rule_based_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_based_generation");
    let planner = RuleBasedPlanner::default();
    let catalog = ExerciseCatalog::builtin();
    let profile = bench_profile();

    for days in [3_u8, 4, 5] {
        group.bench_with_input(BenchmarkId::new("days", days), &days, |b, &days| {
            b.iter(|| planner.generate_plan(black_box(&profile), &catalog, Some(days)));
        });
    }

    group.finish();
}

fn bench_nearest_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearest_neighbors");
    let profile = bench_profile();
    let features = FeatureVector::from_profile(&profile, &CategoricalEncoders::default()).unwrap();
    assert_eq!(features.values().len(), FEATURE_COUNT);

    for size in [100_usize, 1_000, 10_000] {
        let model = NearestNeighborModel::from_dataset(synthetic_dataset(size), 5).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("records", size), &model, |b, model| {
            b.iter(|| model.nearest(black_box(&features)).unwrap());
        });
    }

    group.finish();
}

fn bench_automatic_ordering(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("day_exercise_ordering");

    let database = rt.block_on(async {
        let database = Database::new("sqlite::memory:", 3).await.unwrap();
        database.seed_default_catalog().await.unwrap();
        database
    });
    let day_id = rt.block_on(async {
        let plan = database
            .create_plan(&NewTrainingPlan {
                user_id: Uuid::new_v4(),
                name: "Bench block".into(),
                start_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
                goal: Goal::Hypertrophy,
                status: PlanStatus::Active,
                days_per_week: 3,
                injury_risk: None,
                stagnation_risk: None,
            })
            .await
            .unwrap();
        let day = database
            .add_training_day(
                plan.id,
                &NewTrainingDay {
                    weekday: 1,
                    name: "Full body".into(),
                    notes: None,
                },
            )
            .await
            .unwrap();
        day.id
    });

    let entry = NewDayExercise {
        exercise_id: 1,
        order: None,
        sets: 3,
        reps: "8-12".into(),
        suggested_weight_kg: Some(60.0),
        rest_minutes: 2.0,
    };

    // Orders keep growing across iterations, so this also covers MAX() over a long day
    group.bench_function("append", |b| {
        b.iter(|| {
            rt.block_on(async { database.add_day_exercise(day_id, black_box(&entry)).await })
                .unwrap()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rule_based_generation,
    bench_nearest_neighbors,
    bench_automatic_ordering,
);
criterion_main!(benches);
