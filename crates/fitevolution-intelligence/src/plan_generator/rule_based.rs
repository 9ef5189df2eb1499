// ABOUTME: Table-driven weekly plan generator
// ABOUTME: Sets, reps, rest and suggested load come from PlannerConfig lookups only
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::{build_skeleton, ExerciseAssignment, GeneratorKind, PlanGenerator, WeeklyPlan};
use crate::body_composition::Profile;
use crate::catalog::ExerciseCatalog;
use crate::config::{ConfigError, PlannerConfig};
use fitevolution_core::errors::AppResult;
use std::sync::Arc;

/// Rule-based planner over validated lookup tables
#[derive(Debug, Clone, Default)]
pub struct RuleBasedPlanner {
    config: Arc<PlannerConfig>,
}

impl RuleBasedPlanner {
    /// Create a planner after validating the tables
    ///
    /// # Errors
    ///
    /// Returns an error if the tables are inconsistent
    pub fn new(config: PlannerConfig) -> Result<Self, ConfigError> {
        Self::with_shared_config(Arc::new(config))
    }

    /// Create a planner over tables shared with other components
    ///
    /// # Errors
    ///
    /// Returns an error if the tables are inconsistent
    pub fn with_shared_config(config: Arc<PlannerConfig>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Lookup tables in use
    #[must_use]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Generate a weekly plan. Never fails: unsupported day counts fall back to
    /// the activity default and groups missing from the catalog get no exercises.
    #[must_use]
    pub fn generate_plan(
        &self,
        profile: &Profile,
        catalog: &ExerciseCatalog,
        days_per_week: Option<u8>,
    ) -> WeeklyPlan {
        let level = profile.activity_level();
        let goal = profile.goal();
        let activity = self.config.activity.get(level);
        let days = self.config.resolve_days(level, days_per_week);
        let sets = activity.sets_for(goal);
        let reps = activity.reps_for(goal);

        let plan: WeeklyPlan = build_skeleton(&self.config, catalog, days)
            .into_iter()
            .map(|day| {
                day.into_planned(|group, exercise| ExerciseAssignment {
                    exercise_id: exercise.id,
                    muscle_group: group.name.to_owned(),
                    sets,
                    reps: reps.clone(),
                    suggested_weight_kg: group
                        .rule
                        .suggested_weight(profile.weight_kg(), activity.weight_intensity),
                    rest_minutes: activity.rest_minutes(group.rule.compound),
                })
            })
            .collect();

        tracing::debug!(
            activity_level = %level,
            goal = %goal,
            days = plan.len(),
            exercises = plan.exercise_count(),
            "Generated rule-based plan"
        );
        plan
    }
}

impl PlanGenerator for RuleBasedPlanner {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::RuleBased
    }

    fn generate(
        &self,
        profile: &Profile,
        catalog: &ExerciseCatalog,
        days_per_week: Option<u8>,
    ) -> AppResult<WeeklyPlan> {
        Ok(self.generate_plan(profile, catalog, days_per_week))
    }
}
