// ABOUTME: Workout history commands: record a performed set and list recent sets
// ABOUTME: Listing can be narrowed to one scheduled day exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use crate::helpers::output::print_json;
use fitevolution::database::Database;
use fitevolution::errors::AppResult;
use fitevolution::models::{NewWorkoutLog, WorkoutLog};
use uuid::Uuid;

/// Raw `log add` arguments
pub struct LogArgs {
    pub day_exercise_id: i64,
    pub set_number: u8,
    pub reps_done: u32,
    pub weight_used_kg: Option<f64>,
    pub rpe: u8,
    pub discomfort: u8,
    pub notes: Option<String>,
}

pub async fn add(database: &Database, user_id: Uuid, args: LogArgs) -> AppResult<()> {
    let log = NewWorkoutLog {
        user_id,
        day_exercise_id: args.day_exercise_id,
        set_number: args.set_number,
        reps_done: args.reps_done,
        weight_used_kg: args.weight_used_kg,
        rpe: args.rpe,
        discomfort: args.discomfort,
        notes: args.notes,
    };
    let saved = database.add_workout_log(&log).await?;
    print_json(&saved)
}

pub async fn list(
    database: &Database,
    user_id: Uuid,
    day_exercise_id: Option<i64>,
    limit: u32,
) -> AppResult<()> {
    let logs: Vec<WorkoutLog> = match day_exercise_id {
        Some(id) => database
            .list_workout_logs_for_exercise(id)
            .await?
            .into_iter()
            .filter(|log| log.user_id == user_id)
            .take(limit as usize)
            .collect(),
        None => database.list_workout_logs(user_id, limit).await?,
    };
    print_json(&logs)
}
