// ABOUTME: Macros command printing daily protein, carbohydrate and fat targets
// ABOUTME: Uses the macro model when one is loaded, otherwise rule-based estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use crate::helpers::output::print_json;
use fitevolution::errors::AppResult;
use fitevolution::services::PlanService;
use uuid::Uuid;

pub async fn show(service: &PlanService, user_id: Uuid, days: Option<u8>) -> AppResult<()> {
    let targets = service.macros(user_id, days).await?;
    print_json(&targets)
}
