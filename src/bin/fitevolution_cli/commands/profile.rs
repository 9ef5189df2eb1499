// ABOUTME: Profile commands: save raw measurements and show the stored profile
// ABOUTME: Body composition is always derived on save, never passed in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use crate::helpers::output::print_json;
use fitevolution::database::Database;
use fitevolution::errors::AppResult;
use fitevolution::models::{ActivityLevel, Goal, ProfileInput, Sex};
use uuid::Uuid;

/// Raw `profile set` arguments
pub struct ProfileArgs {
    pub age: u32,
    pub sex: String,
    pub weight_kg: f64,
    pub height_cm: u32,
    pub activity_level: String,
    pub goal: String,
    pub session_minutes: Option<u32>,
}

pub async fn set(database: &Database, user_id: Uuid, args: ProfileArgs) -> AppResult<()> {
    let input = ProfileInput {
        age: args.age,
        sex: args.sex.parse::<Sex>()?,
        weight_kg: args.weight_kg,
        height_cm: args.height_cm,
        activity_level: ActivityLevel::parse(&args.activity_level),
        goal: Goal::parse(&args.goal),
        session_minutes: args.session_minutes,
    };
    let stored = database.save_profile(user_id, input).await?;
    print_json(&stored)
}

pub async fn show(database: &Database, user_id: Uuid) -> AppResult<()> {
    let stored = database.require_profile(user_id).await?;
    print_json(&stored)
}
