// ABOUTME: Training plan commands: generate, store, list, show and change status
// ABOUTME: Also adds days and exercises to a plan by hand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use crate::helpers::output::print_json;
use chrono::{Local, NaiveDate};
use fitevolution::database::Database;
use fitevolution::errors::AppResult;
use fitevolution::models::{NewDayExercise, NewTrainingDay, PlanStatus};
use fitevolution::services::{NewPlanRequest, PlanService};
use uuid::Uuid;

/// `plan generate --save` options
pub struct SaveOptions {
    pub name: Option<String>,
    pub weeks: u32,
    pub start: Option<NaiveDate>,
}

/// Raw `plan add-exercise` arguments
pub struct ExerciseArgs {
    pub exercise_id: i64,
    pub order: Option<u32>,
    pub sets: u8,
    pub reps: String,
    pub suggested_weight_kg: Option<f64>,
    pub rest_minutes: f64,
}

pub async fn generate(service: &PlanService, user_id: Uuid, days: Option<u8>) -> AppResult<()> {
    let generated = service.generate(user_id, days).await?;
    print_json(&generated)
}

pub async fn generate_and_save(
    service: &PlanService,
    user_id: Uuid,
    days: Option<u8>,
    options: SaveOptions,
) -> AppResult<()> {
    let start_date = options.start.unwrap_or_else(|| Local::now().date_naive());
    let request = NewPlanRequest {
        name: options
            .name
            .unwrap_or_else(|| format!("Plan starting {start_date}")),
        start_date,
        weeks: options.weeks,
        days_per_week: days,
    };
    let detail = service.generate_and_save(user_id, &request).await?;
    print_json(&detail)
}

pub async fn list(database: &Database, user_id: Uuid) -> AppResult<()> {
    let plans = database.list_plans(user_id).await?;
    print_json(&plans)
}

pub async fn show(database: &Database, plan_id: Uuid) -> AppResult<()> {
    let detail = database.get_plan_detail(plan_id).await?;
    print_json(&detail)
}

pub async fn activate(database: &Database, plan_id: Uuid) -> AppResult<()> {
    change_status(database, plan_id, PlanStatus::Active).await
}

pub async fn pause(database: &Database, plan_id: Uuid) -> AppResult<()> {
    change_status(database, plan_id, PlanStatus::Paused).await
}

pub async fn complete(database: &Database, plan_id: Uuid) -> AppResult<()> {
    change_status(database, plan_id, PlanStatus::Completed).await
}

async fn change_status(database: &Database, plan_id: Uuid, next: PlanStatus) -> AppResult<()> {
    let plan = database.set_plan_status(plan_id, next).await?;
    print_json(&plan)
}

pub async fn add_day(
    database: &Database,
    plan_id: Uuid,
    weekday: u8,
    name: String,
    notes: Option<String>,
) -> AppResult<()> {
    let day = database
        .add_training_day(plan_id, &NewTrainingDay { weekday, name, notes })
        .await?;
    print_json(&day)
}

pub async fn add_exercise(database: &Database, day_id: i64, args: ExerciseArgs) -> AppResult<()> {
    let entry = NewDayExercise {
        exercise_id: args.exercise_id,
        order: args.order,
        sets: args.sets,
        reps: args.reps,
        suggested_weight_kg: args.suggested_weight_kg,
        rest_minutes: args.rest_minutes,
    };
    let created = database.add_day_exercise(day_id, &entry).await?;
    print_json(&created)
}
