// ABOUTME: Weekly training plan generation shared by the rule-based and model-assisted planners
// ABOUTME: Output types, the PlanGenerator trait, and deterministic day/group/exercise selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! # Plan Generation
//!
//! Both generators share the same skeleton:
//!
//! 1. Resolve the day count (requested count when a template exists, otherwise
//!    the activity level default).
//! 2. Take that day count's muscle group template.
//! 3. Per group, select `min(catalog size, 4 | 3 | 2)` exercises in catalog id
//!    order depending on how many groups the day trains.
//!
//! They differ only in how sets, reps, load and rest are filled in.

/// Model-assisted generation backed by a `Predictor`
pub mod model_assisted;

/// Table-driven generation
pub mod rule_based;

pub use model_assisted::ModelAssistedPlanner;
pub use rule_based::RuleBasedPlanner;

use crate::body_composition::Profile;
use crate::catalog::ExerciseCatalog;
use crate::config::{Bounds, MuscleGroupRule, PlannerConfig};
use fitevolution_core::errors::AppResult;
use fitevolution_core::models::Exercise;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One exercise prescription inside a planned day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseAssignment {
    /// Catalog exercise id
    pub exercise_id: i64,
    /// Muscle group the exercise was selected for
    pub muscle_group: String,
    /// Number of sets
    pub sets: u8,
    /// Rep prescription, a range like "8-12" or a single count
    pub reps: String,
    /// Suggested load in kilograms, `None` for unloaded groups
    pub suggested_weight_kg: Option<f64>,
    /// Rest between sets in minutes
    pub rest_minutes: f64,
}

/// One training day of a generated plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedDay {
    /// Groups joined with "/", e.g. "Chest/Triceps"
    pub day_name: String,
    /// Groups trained, in template order
    pub muscle_groups: Vec<String>,
    /// Prescriptions in training order
    pub exercises: Vec<ExerciseAssignment>,
}

/// Generated plan keyed by 1-based day index
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyPlan(BTreeMap<u8, PlannedDay>);

impl WeeklyPlan {
    /// Number of training days
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the plan has no days
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Day by 1-based index
    #[must_use]
    pub fn day(&self, index: u8) -> Option<&PlannedDay> {
        self.0.get(&index)
    }

    /// Days in index order
    pub fn days(&self) -> impl Iterator<Item = (u8, &PlannedDay)> {
        self.0.iter().map(|(index, day)| (*index, day))
    }

    /// Total exercise assignments across all days
    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.0.values().map(|day| day.exercises.len()).sum()
    }
}

impl FromIterator<(u8, PlannedDay)> for WeeklyPlan {
    fn from_iter<I: IntoIterator<Item = (u8, PlannedDay)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which generator produced a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind {
    /// Lookup tables only
    RuleBased,
    /// Trained model predictions
    ModelAssisted,
}

impl GeneratorKind {
    /// Label used in logs and output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RuleBased => "rule_based",
            Self::ModelAssisted => "model_assisted",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weekly plan generator
pub trait PlanGenerator: Send + Sync {
    /// Generator identity
    fn kind(&self) -> GeneratorKind;

    /// Generate a plan; `days_per_week` overrides the activity default when a
    /// template exists for it
    ///
    /// # Errors
    ///
    /// Model-assisted generation fails with `RecommendationUnavailable`
    fn generate(
        &self,
        profile: &Profile,
        catalog: &ExerciseCatalog,
        days_per_week: Option<u8>,
    ) -> AppResult<WeeklyPlan>;
}

/// Exercises selected for one muscle group on one day
pub(crate) struct GroupSlots<'a> {
    pub name: &'a str,
    pub rule: MuscleGroupRule,
    pub exercises: Vec<&'a Exercise>,
}

/// A day before parameters are filled in
pub(crate) struct DaySkeleton<'a> {
    pub index: u8,
    pub name: String,
    pub groups: Vec<GroupSlots<'a>>,
}

impl DaySkeleton<'_> {
    /// Assemble the planned day from per-exercise prescriptions
    pub fn into_planned(
        self,
        mut prescribe: impl FnMut(&GroupSlots<'_>, &Exercise) -> ExerciseAssignment,
    ) -> (u8, PlannedDay) {
        let mut exercises = Vec::new();
        for group in &self.groups {
            for exercise in &group.exercises {
                exercises.push(prescribe(group, exercise));
            }
        }
        let muscle_groups = self.groups.iter().map(|g| g.name.to_owned()).collect();
        (
            self.index,
            PlannedDay {
                day_name: self.name,
                muscle_groups,
                exercises,
            },
        )
    }
}

const UNLOADED_RULE: MuscleGroupRule = MuscleGroupRule {
    weight_factor: Bounds {
        low: 0.0,
        high: 0.0,
    },
    compound: false,
};

/// Days, groups and exercises for a resolved day count, deterministic for a
/// fixed config and catalog
pub(crate) fn build_skeleton<'a>(
    config: &'a PlannerConfig,
    catalog: &'a ExerciseCatalog,
    days_per_week: u8,
) -> Vec<DaySkeleton<'a>> {
    let template = config.template(days_per_week).unwrap_or_default();

    (1_u8..)
        .zip(template)
        .map(|(index, groups)| {
            let per_group = config.grouping.exercises_per_group(groups.len());
            let slots = groups
                .iter()
                .map(|name| GroupSlots {
                    name: name.as_str(),
                    rule: config.group_rule(name).cloned().unwrap_or(UNLOADED_RULE),
                    exercises: catalog.exercises_for_group(name).take(per_group).collect(),
                })
                .collect();
            DaySkeleton {
                index,
                name: groups.join("/"),
                groups: slots,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_follows_grouping_rule() {
        let config = PlannerConfig::default();
        let catalog = ExerciseCatalog::builtin();
        let days = build_skeleton(&config, &catalog, 3);
        assert_eq!(days.len(), 3);

        // Chest/Triceps/Shoulders trains three groups: two exercises each
        let first = &days[0];
        assert_eq!(first.name, "Chest/Triceps/Shoulders");
        assert!(first.groups.iter().all(|g| g.exercises.len() == 2));

        // Legs/Abs: three legs exercises, abs capped by its two catalog entries
        let legs_abs = &days[2];
        assert_eq!(legs_abs.groups[0].exercises.len(), 3);
        assert_eq!(legs_abs.groups[1].exercises.len(), 2);
    }

    #[test]
    fn test_missing_template_yields_no_days() {
        let config = PlannerConfig::default();
        let catalog = ExerciseCatalog::builtin();
        assert!(build_skeleton(&config, &catalog, 7).is_empty());
    }
}
