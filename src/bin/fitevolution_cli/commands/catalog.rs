// ABOUTME: Catalog commands: seed the built-in exercises and list what is stored
// ABOUTME: Seeding is idempotent and reports how many rows were added
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use crate::helpers::output::print_json;
use fitevolution::database::Database;
use fitevolution::errors::AppResult;
use serde_json::json;

pub async fn seed(database: &Database) -> AppResult<()> {
    let inserted = database.seed_default_catalog().await?;
    print_json(&json!({ "inserted": inserted }))
}

pub async fn list(database: &Database) -> AppResult<()> {
    let catalog = database.load_catalog().await?;
    print_json(&json!({
        "muscle_groups": catalog.groups(),
        "exercises": catalog.exercises(),
    }))
}
