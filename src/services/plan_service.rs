// ABOUTME: Plan service wiring profile, catalog, generators and persistence together
// ABOUTME: Model-assisted generation falls back to the rule-based planner on predictor failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use crate::config::{AppConfig, Artifacts};
use crate::database::{Database, PlanDetail};
use crate::errors::{AppError, AppResult};
use crate::models::{NewTrainingPlan, PlanStatus};
use chrono::{Days, NaiveDate};
use fitevolution_intelligence::{
    recommend_macros, ExerciseCatalog, GeneratorKind, MacroTargets, ModelAssistedPlanner, Profile,
    RuleBasedPlanner, WeeklyPlan,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// Longest plan accepted from a request, in weeks
const MAX_PLAN_WEEKS: u32 = 52;

/// A generated week and the generator that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPlan {
    /// Which generator produced the plan
    pub generator: GeneratorKind,
    /// Days keyed by 1-based index
    pub plan: WeeklyPlan,
}

/// Request to generate and store a new active plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPlanRequest {
    /// Display name
    pub name: String,
    /// First day of the plan
    pub start_date: NaiveDate,
    /// Plan length in weeks, 1 to 52
    pub weeks: u32,
    /// Requested training days per week, activity default when `None`
    pub days_per_week: Option<u8>,
}

impl NewPlanRequest {
    /// Last day covered by the plan
    ///
    /// # Errors
    ///
    /// Returns a validation error for a length outside 1..=52 weeks
    pub fn end_date(&self) -> AppResult<NaiveDate> {
        if !(1..=MAX_PLAN_WEEKS).contains(&self.weeks) {
            return Err(AppError::value_out_of_range(
                "weeks",
                self.weeks,
                1.0,
                f64::from(MAX_PLAN_WEEKS),
            ));
        }
        self.start_date
            .checked_add_days(Days::new(u64::from(self.weeks) * 7 - 1))
            .ok_or_else(|| AppError::invalid_input("Plan end date is out of range"))
    }
}

/// Generates, stores and tracks training plans
#[derive(Debug, Clone)]
pub struct PlanService {
    database: Database,
    artifacts: Artifacts,
    rule_based: RuleBasedPlanner,
    model_assisted: Option<ModelAssistedPlanner>,
}

impl PlanService {
    /// Build a service from already loaded artifacts
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the planner tables are inconsistent
    pub fn new(database: Database, artifacts: Artifacts) -> AppResult<Self> {
        let rule_based = RuleBasedPlanner::with_shared_config(artifacts.planner.clone())?;
        let model_assisted = artifacts
            .predictor
            .clone()
            .map(|predictor| ModelAssistedPlanner::new(artifacts.planner.clone(), predictor));

        Ok(Self {
            database,
            artifacts,
            rule_based,
            model_assisted,
        })
    }

    /// Load the configured artifacts and build the service
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the planner tables cannot be loaded
    pub fn from_config(database: Database, config: &AppConfig) -> AppResult<Self> {
        let artifacts = Artifacts::load(config)?;
        Self::new(database, artifacts)
    }

    /// Underlying database handle
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.database
    }

    /// Loaded artifacts
    #[must_use]
    pub const fn artifacts(&self) -> &Artifacts {
        &self.artifacts
    }

    /// Generator used when the predictor succeeds
    #[must_use]
    pub fn preferred_generator(&self) -> GeneratorKind {
        if self.model_assisted.is_some() {
            GeneratorKind::ModelAssisted
        } else {
            GeneratorKind::RuleBased
        }
    }

    /// Generate a weekly plan for a user without storing it
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has no profile and an
    /// invalid input error when the exercise catalog has not been seeded
    pub async fn generate(&self, user_id: Uuid, days_per_week: Option<u8>) -> AppResult<GeneratedPlan> {
        let stored = self.database.require_profile(user_id).await?;
        let catalog = self.load_catalog().await?;
        let generated = self.generate_for(&stored.profile, &catalog, days_per_week);

        info!(
            user_id = %user_id,
            days = generated.plan.len(),
            exercises = generated.plan.exercise_count(),
            generator = %generated.generator,
            "Training plan generated"
        );
        Ok(generated)
    }

    /// Generate a plan for a profile and catalog already in hand
    #[must_use]
    pub fn generate_for(
        &self,
        profile: &Profile,
        catalog: &ExerciseCatalog,
        days_per_week: Option<u8>,
    ) -> GeneratedPlan {
        if let Some(planner) = &self.model_assisted {
            match planner.generate_plan(profile, catalog, days_per_week) {
                Ok(plan) => {
                    return GeneratedPlan {
                        generator: GeneratorKind::ModelAssisted,
                        plan,
                    }
                }
                Err(error) => {
                    warn!(
                        predictor = planner.predictor_name(),
                        error_kind = error.kind(),
                        error = %error,
                        "Model-assisted generation unavailable, using rule-based planner"
                    );
                }
            }
        }

        GeneratedPlan {
            generator: GeneratorKind::RuleBased,
            plan: self.rule_based.generate_plan(profile, catalog, days_per_week),
        }
    }

    /// Generate a plan and store it as the user's active plan, pausing any
    /// previously active one
    ///
    /// # Errors
    ///
    /// Returns the generation errors of [`Self::generate`], a validation error
    /// for a bad request, or a database error if storing fails
    pub async fn generate_and_save(
        &self,
        user_id: Uuid,
        request: &NewPlanRequest,
    ) -> AppResult<PlanDetail> {
        let end_date = request.end_date()?;
        let stored = self.database.require_profile(user_id).await?;
        let catalog = self.load_catalog().await?;
        let generated = self.generate_for(&stored.profile, &catalog, request.days_per_week);

        let new_plan = NewTrainingPlan {
            user_id,
            name: request.name.trim().to_owned(),
            start_date: request.start_date,
            end_date,
            goal: stored.profile.goal(),
            status: PlanStatus::Active,
            days_per_week: u8::try_from(generated.plan.len())
                .map_err(|_| AppError::internal("Generated plan has too many days"))?,
            injury_risk: None,
            stagnation_risk: None,
        };
        let detail = self
            .database
            .create_plan_with_week(&new_plan, &generated.plan)
            .await?;

        info!(
            user_id = %user_id,
            plan_id = %detail.plan.id,
            days = detail.days.len(),
            exercises = generated.plan.exercise_count(),
            generator = %generated.generator,
            "Training plan generated"
        );
        Ok(detail)
    }

    /// Daily macronutrient targets for a user
    ///
    /// Without `days_per_week` the activity level default is used.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has no profile
    pub async fn macros(&self, user_id: Uuid, days_per_week: Option<u8>) -> AppResult<MacroTargets> {
        let stored = self.database.require_profile(user_id).await?;
        let profile = &stored.profile;
        let days = days_per_week.unwrap_or_else(|| {
            self.artifacts
                .planner
                .activity
                .get(profile.activity_level())
                .days_per_week
        });

        Ok(recommend_macros(
            profile,
            days,
            self.artifacts.macro_model.as_deref(),
            &self.artifacts.nutrition,
        ))
    }

    async fn load_catalog(&self) -> AppResult<ExerciseCatalog> {
        let catalog = self.database.load_catalog().await?;
        if catalog.is_empty() {
            return Err(AppError::invalid_input(
                "Exercise catalog is empty; run `catalog seed` first",
            ));
        }
        Ok(catalog)
    }
}
