// ABOUTME: Shared test utilities for the FitEvolution integration tests
// ABOUTME: In-memory database setup, seeded catalog and sample profiles and plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `fitevolution`

use anyhow::Result;
use chrono::NaiveDate;
use fitevolution::database::Database;
use fitevolution::models::{
    ActivityLevel, Goal, NewDayExercise, NewTrainingDay, NewTrainingPlan, PlanStatus,
    ProfileInput, Sex,
};
use std::env;
use std::sync::Once;
use tracing::Level;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory database with the default retry bound
pub async fn create_test_database() -> Result<Database> {
    create_test_database_with_retries(3).await
}

/// Fresh in-memory database with a given retry bound
pub async fn create_test_database_with_retries(attempts: u32) -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:", attempts).await?)
}

/// Fresh in-memory database with the built-in catalog loaded
pub async fn create_seeded_database() -> Result<Database> {
    let database = create_test_database().await?;
    database.seed_default_catalog().await?;
    Ok(database)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// 30 year old, 80 kg, 180 cm male training moderately for hypertrophy
pub fn sample_profile() -> ProfileInput {
    ProfileInput {
        age: 30,
        sex: Sex::Male,
        weight_kg: 80.0,
        height_cm: 180,
        activity_level: ActivityLevel::Moderate,
        goal: Goal::Hypertrophy,
        session_minutes: Some(60),
    }
}

/// A four week plan starting 2025-01-06
pub fn sample_plan(user_id: Uuid, status: PlanStatus) -> NewTrainingPlan {
    NewTrainingPlan {
        user_id,
        name: "Base block".into(),
        start_date: date(2025, 1, 6),
        end_date: date(2025, 2, 2),
        goal: Goal::Hypertrophy,
        status,
        days_per_week: 3,
        injury_risk: None,
        stagnation_risk: None,
    }
}

pub fn sample_day(weekday: u8) -> NewTrainingDay {
    NewTrainingDay {
        weekday,
        name: "Chest/Triceps".into(),
        notes: None,
    }
}

/// Bench press, three sets of 8-12, automatic order
pub fn bench_press() -> NewDayExercise {
    NewDayExercise {
        exercise_id: 1,
        order: None,
        sets: 3,
        reps: "8-12".into(),
        suggested_weight_kg: Some(60.0),
        rest_minutes: 2.0,
    }
}

/// Plan with a single Monday day, returning `(plan_id, day_id)`
pub async fn plan_with_day(database: &Database, user_id: Uuid) -> Result<(Uuid, i64)> {
    let plan = database
        .create_plan(&sample_plan(user_id, PlanStatus::Active))
        .await?;
    let day = database.add_training_day(plan.id, &sample_day(1)).await?;
    Ok((plan.id, day.id))
}
