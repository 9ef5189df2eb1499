// ABOUTME: Core data models and types for the FitEvolution training planner
// ABOUTME: Re-exports profile inputs, catalog entities, plans and workout history records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! # Data Models
//!
//! This module contains the core data structures shared by the planner and the
//! persistence layer.
//!
//! ## Core Models
//!
//! - `ProfileInput`: raw user measurements and training preferences
//! - `MuscleGroup` / `Exercise`: static exercise catalog reference data
//! - `TrainingPlan` / `TrainingDay` / `DayExercise`: a persisted weekly schedule
//! - `PlanStatus`: the plan lifecycle state machine
//! - `WorkoutLog`: one performed set recorded against a day exercise

// Domain modules
mod catalog;
mod history;
mod plan;
mod profile;

// Profile domain
pub use profile::{ActivityLevel, ExperienceLevel, Goal, ProfileInput, Sex};

// Catalog domain
pub use catalog::{Difficulty, Equipment, Exercise, MuscleGroup};

// Plan domain
pub use plan::{
    DayExercise, NewDayExercise, NewTrainingDay, NewTrainingPlan, PlanStatus, TrainingDay,
    TrainingPlan,
};

// Workout history domain
pub use history::{NewWorkoutLog, WorkoutLog};
