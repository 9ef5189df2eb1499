// ABOUTME: Training plan intelligence for FitEvolution
// ABOUTME: Profile evaluation, exercise catalog, rule-based and model-assisted plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

#![deny(unsafe_code)]

//! # FitEvolution Intelligence
//!
//! Pure computation behind the training planner. Nothing in this crate performs
//! I/O except loading trained model artifacts, which happens once at startup.
//!
//! ## Modules
//!
//! - **body_composition**: BMI and Deurenberg body fat estimation, `Profile`
//! - **catalog**: the exercise catalog consumed by the planners
//! - **config**: injectable lookup tables (`PlannerConfig`, `NutritionConfig`)
//! - **plan_generator**: rule-based and model-assisted weekly plan generation
//! - **predictors**: the `Predictor` capability and its trained-model implementations
//! - **nutrition**: macronutrient targets from a trained model or Mifflin-St Jeor rules

/// Body composition metrics and the validated user profile
pub mod body_composition;

/// Exercise catalog reference data
pub mod catalog;

/// Planner and nutrition lookup tables
pub mod config;

/// Macronutrient recommendations
pub mod nutrition;

/// Weekly plan generation
pub mod plan_generator;

/// Trained-model predictors
pub mod predictors;

mod rounding;

pub use body_composition::{BodyComposition, CompositionError, Profile};
pub use catalog::ExerciseCatalog;
pub use config::{NutritionConfig, PlannerConfig};
pub use nutrition::{estimate_macros, recommend_macros, MacroModel, MacroSource, MacroTargets};
pub use plan_generator::{
    ExerciseAssignment, GeneratorKind, ModelAssistedPlanner, PlanGenerator, PlannedDay,
    RuleBasedPlanner, WeeklyPlan,
};
pub use predictors::{Prediction, Predictor, PredictorError};

/// Re-export of the core error types used by this crate
pub use fitevolution_core::errors;
