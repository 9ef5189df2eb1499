// ABOUTME: Weekly plan generator whose exercise parameters come from a trained predictor
// ABOUTME: Maps regression outputs or nearest-neighbor records onto the shared plan skeleton
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::{build_skeleton, ExerciseAssignment, GeneratorKind, PlanGenerator, WeeklyPlan};
use crate::body_composition::Profile;
use crate::catalog::ExerciseCatalog;
use crate::config::PlannerConfig;
use crate::predictors::{
    FeatureVector, NeighborRecord, PredictedParameters, Prediction, Predictor, PredictorError,
};
use fitevolution_core::errors::AppResult;
use fitevolution_core::models::Exercise;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Planner that delegates parameter selection to a [`Predictor`]
#[derive(Clone)]
pub struct ModelAssistedPlanner {
    config: Arc<PlannerConfig>,
    predictor: Arc<dyn Predictor>,
}

impl fmt::Debug for ModelAssistedPlanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelAssistedPlanner")
            .field("predictor", &self.predictor.name())
            .finish_non_exhaustive()
    }
}

impl ModelAssistedPlanner {
    /// Create a planner; the tables are expected to be validated already
    #[must_use]
    pub fn new(config: Arc<PlannerConfig>, predictor: Arc<dyn Predictor>) -> Self {
        Self { config, predictor }
    }

    /// Name of the underlying predictor
    #[must_use]
    pub fn predictor_name(&self) -> &'static str {
        self.predictor.name()
    }

    /// Generate a weekly plan from predictions
    ///
    /// # Errors
    ///
    /// Returns the predictor failure unchanged so callers can log its kind and
    /// fall back to the rule-based planner
    pub fn generate_plan(
        &self,
        profile: &Profile,
        catalog: &ExerciseCatalog,
        days_per_week: Option<u8>,
    ) -> Result<WeeklyPlan, PredictorError> {
        let features = FeatureVector::from_profile(profile, self.predictor.encoders())?;
        let prediction = self.predictor.predict(&features)?;
        let days = self
            .config
            .resolve_days(profile.activity_level(), days_per_week);
        let skeleton = build_skeleton(&self.config, catalog, days);

        let plan: WeeklyPlan = match prediction {
            Prediction::Parameters(raw) => {
                let params = raw.clamped();
                skeleton
                    .into_iter()
                    .map(|day| {
                        day.into_planned(|group, exercise| ExerciseAssignment {
                            exercise_id: exercise.id,
                            muscle_group: group.name.to_owned(),
                            sets: params.sets,
                            reps: params.reps.to_string(),
                            suggested_weight_kg: group.rule.is_loaded().then_some(params.weight_kg),
                            rest_minutes: params.rest_minutes,
                        })
                    })
                    .collect()
            }
            Prediction::Neighbors(neighbors) => {
                if neighbors.is_empty() {
                    return Err(PredictorError::Inference(
                        "predictor returned no neighbors".into(),
                    ));
                }
                skeleton
                    .into_iter()
                    .map(|mut day| {
                        for group in &mut day.groups {
                            group.exercises =
                                rank_candidates(&neighbors, catalog, group.name, group.exercises.len());
                        }
                        day.into_planned(|group, exercise| {
                            let params = neighbor_parameters(&neighbors, group.name, exercise.id)
                                .clamped();
                            ExerciseAssignment {
                                exercise_id: exercise.id,
                                muscle_group: group.name.to_owned(),
                                sets: params.sets,
                                reps: params.reps.to_string(),
                                suggested_weight_kg: group
                                    .rule
                                    .is_loaded()
                                    .then_some(params.weight_kg),
                                rest_minutes: params.rest_minutes,
                            }
                        })
                    })
                    .collect()
            }
        };

        tracing::debug!(
            predictor = self.predictor.name(),
            days = plan.len(),
            exercises = plan.exercise_count(),
            "Generated model-assisted plan"
        );
        Ok(plan)
    }
}

/// Exercises for a group: neighbor suggestions in rank order first, then the
/// remaining catalog exercises in id order, `count` in total
fn rank_candidates<'a>(
    neighbors: &[NeighborRecord],
    catalog: &'a ExerciseCatalog,
    group: &str,
    count: usize,
) -> Vec<&'a Exercise> {
    let pool: Vec<&Exercise> = catalog.exercises_for_group(group).collect();
    let mut seen = HashSet::new();

    let suggested = neighbors
        .iter()
        .filter(|n| n.muscle_group == group)
        .filter_map(|n| pool.iter().copied().find(|e| e.id == n.exercise_id));

    suggested
        .chain(pool.iter().copied())
        .filter(|e| seen.insert(e.id))
        .take(count)
        .collect()
}

/// Parameters for one slot: the nearest record of that exercise, else the
/// group average, else the average over all neighbors
fn neighbor_parameters(
    neighbors: &[NeighborRecord],
    group: &str,
    exercise_id: i64,
) -> PredictedParameters {
    if let Some(record) = neighbors.iter().find(|n| n.exercise_id == exercise_id) {
        return record.parameters();
    }
    mean_parameters(neighbors.iter().filter(|n| n.muscle_group == group))
        .or_else(|| mean_parameters(neighbors.iter()))
        .unwrap_or(PredictedParameters {
            sets: 0.0,
            reps: 0.0,
            weight_kg: 0.0,
            rest_minutes: 0.0,
        })
}

fn mean_parameters<'a>(
    records: impl Iterator<Item = &'a NeighborRecord>,
) -> Option<PredictedParameters> {
    let (count, sum) = records.fold(
        (
            0_u32,
            PredictedParameters {
                sets: 0.0,
                reps: 0.0,
                weight_kg: 0.0,
                rest_minutes: 0.0,
            },
        ),
        |(count, acc), record| {
            (
                count + 1,
                PredictedParameters {
                    sets: acc.sets + record.sets,
                    reps: acc.reps + record.reps,
                    weight_kg: acc.weight_kg + record.weight_kg,
                    rest_minutes: acc.rest_minutes + record.rest_minutes,
                },
            )
        },
    );
    if count == 0 {
        return None;
    }
    let n = f64::from(count);
    Some(PredictedParameters {
        sets: sum.sets / n,
        reps: sum.reps / n,
        weight_kg: sum.weight_kg / n,
        rest_minutes: sum.rest_minutes / n,
    })
}

impl PlanGenerator for ModelAssistedPlanner {
    fn kind(&self) -> GeneratorKind {
        GeneratorKind::ModelAssisted
    }

    fn generate(
        &self,
        profile: &Profile,
        catalog: &ExerciseCatalog,
        days_per_week: Option<u8>,
    ) -> AppResult<WeeklyPlan> {
        Ok(self.generate_plan(profile, catalog, days_per_week)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbor(exercise_id: i64, group: &str, weight_kg: f64) -> NeighborRecord {
        NeighborRecord {
            exercise_id,
            muscle_group: group.into(),
            sets: 4.0,
            reps: 10.0,
            weight_kg,
            rest_minutes: 2.0,
            distance: 0.0,
        }
    }

    #[test]
    fn test_candidates_prefer_neighbors_then_catalog() {
        let catalog = ExerciseCatalog::builtin();
        let neighbors = vec![
            neighbor(3, "Chest", 30.0),
            neighbor(11, "Legs", 100.0),
            neighbor(3, "Chest", 35.0),
        ];
        let picked: Vec<i64> = rank_candidates(&neighbors, &catalog, "Chest", 3)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(picked, vec![3, 1, 2]);
    }

    #[test]
    fn test_parameters_fall_back_to_group_average() {
        let neighbors = vec![neighbor(1, "Chest", 60.0), neighbor(2, "Chest", 80.0)];
        let exact = neighbor_parameters(&neighbors, "Chest", 2);
        assert!((exact.weight_kg - 80.0).abs() < f64::EPSILON);
        let averaged = neighbor_parameters(&neighbors, "Chest", 3);
        assert!((averaged.weight_kg - 70.0).abs() < f64::EPSILON);
        let overall = neighbor_parameters(&neighbors, "Back", 6);
        assert!((overall.weight_kg - 70.0).abs() < f64::EPSILON);
    }
}
