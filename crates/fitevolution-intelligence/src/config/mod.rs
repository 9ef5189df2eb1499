// ABOUTME: Configuration module for fitevolution-intelligence crate
// ABOUTME: Planner lookup tables, nutrition rules, and their validation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

/// Configuration validation errors
pub mod error;

/// Macronutrient estimation rules
pub mod nutrition;

/// Training planner lookup tables
pub mod planner;

pub use error::ConfigError;
pub use nutrition::NutritionConfig;
pub use planner::{
    ActivityProfile, ActivityTable, Bounds, GoalReps, GroupingRule, MuscleGroupRule,
    PlannerConfig,
};
