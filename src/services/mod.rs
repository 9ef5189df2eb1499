// ABOUTME: Application service layer between the CLI and persistence
// ABOUTME: Plan generation with predictor fallback, plan persistence and macro targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! Application services
//!
//! Services own the loaded artifacts and a database handle, so callers only
//! deal with user ids and requests.

/// Training plan generation and persistence
pub mod plan_service;

pub use plan_service::{GeneratedPlan, NewPlanRequest, PlanService};
