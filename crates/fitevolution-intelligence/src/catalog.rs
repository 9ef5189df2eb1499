// ABOUTME: In-memory exercise catalog consumed by the plan generators
// ABOUTME: Stable id ordering, group lookup by name, and the built-in seed catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use fitevolution_core::errors::{AppError, AppResult};
use fitevolution_core::models::{Difficulty, Equipment, Exercise, MuscleGroup};
use std::collections::HashSet;

/// Muscle group names used by the default planner tables
pub mod group_names {
    /// Chest
    pub const CHEST: &str = "Chest";
    /// Back
    pub const BACK: &str = "Back";
    /// Legs
    pub const LEGS: &str = "Legs";
    /// Shoulders
    pub const SHOULDERS: &str = "Shoulders";
    /// Biceps
    pub const BICEPS: &str = "Biceps";
    /// Triceps
    pub const TRICEPS: &str = "Triceps";
    /// Abs
    pub const ABS: &str = "Abs";
}

/// Immutable exercise reference data, ordered by id
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExerciseCatalog {
    groups: Vec<MuscleGroup>,
    exercises: Vec<Exercise>,
}

impl ExerciseCatalog {
    /// Build a catalog, sorting both lists by id
    ///
    /// # Errors
    ///
    /// Returns an error for duplicate group names or exercises referencing an
    /// unknown muscle group
    pub fn new(mut groups: Vec<MuscleGroup>, mut exercises: Vec<Exercise>) -> AppResult<Self> {
        groups.sort_by_key(|g| g.id);
        exercises.sort_by_key(|e| e.id);

        let mut names = HashSet::new();
        for group in &groups {
            if !names.insert(group.name.as_str()) {
                return Err(AppError::invalid_input(format!(
                    "Duplicate muscle group '{}'",
                    group.name
                )));
            }
        }

        let group_ids: HashSet<i64> = groups.iter().map(|g| g.id).collect();
        if let Some(orphan) = exercises
            .iter()
            .find(|e| !group_ids.contains(&e.muscle_group_id))
        {
            return Err(AppError::invalid_input(format!(
                "Exercise '{}' references unknown muscle group {}",
                orphan.name, orphan.muscle_group_id
            )));
        }

        Ok(Self { groups, exercises })
    }

    /// All muscle groups in id order
    #[must_use]
    pub fn groups(&self) -> &[MuscleGroup] {
        &self.groups
    }

    /// All exercises in id order
    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Muscle group by exact name
    #[must_use]
    pub fn group_by_name(&self, name: &str) -> Option<&MuscleGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Exercises of a named group in id order; empty for unknown groups
    pub fn exercises_for_group<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Exercise> {
        let group_id = self.group_by_name(name).map(|g| g.id);
        self.exercises
            .iter()
            .filter(move |e| Some(e.muscle_group_id) == group_id)
    }

    /// Whether the catalog holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// The default seed catalog: seven muscle groups and nineteen exercises
    #[must_use]
    pub fn builtin() -> Self {
        use group_names::{ABS, BACK, BICEPS, CHEST, LEGS, SHOULDERS, TRICEPS};

        let groups = [
            (1, CHEST),
            (2, BACK),
            (3, LEGS),
            (4, SHOULDERS),
            (5, BICEPS),
            (6, TRICEPS),
            (7, ABS),
        ]
        .into_iter()
        .map(|(id, name)| MuscleGroup {
            id,
            name: name.to_owned(),
            description: None,
        })
        .collect();

        let exercises = [
            (1, "Bench Press", 1, Equipment::Barbell, Difficulty::Intermediate),
            (2, "Incline Dumbbell Press", 1, Equipment::Dumbbell, Difficulty::Intermediate),
            (3, "Chest Fly", 1, Equipment::Dumbbell, Difficulty::Beginner),
            (4, "Dips", 6, Equipment::Bodyweight, Difficulty::Intermediate),
            (5, "Skull Crusher", 6, Equipment::Barbell, Difficulty::Intermediate),
            (6, "Pull-Up", 2, Equipment::Bodyweight, Difficulty::Intermediate),
            (7, "Barbell Row", 2, Equipment::Barbell, Difficulty::Intermediate),
            (8, "Lat Pulldown", 2, Equipment::Cable, Difficulty::Beginner),
            (9, "Barbell Curl", 5, Equipment::Barbell, Difficulty::Beginner),
            (10, "Hammer Curl", 5, Equipment::Dumbbell, Difficulty::Beginner),
            (11, "Back Squat", 3, Equipment::Barbell, Difficulty::Intermediate),
            (12, "Leg Press", 3, Equipment::Machine, Difficulty::Beginner),
            (13, "Deadlift", 3, Equipment::Barbell, Difficulty::Advanced),
            (14, "Leg Extension", 3, Equipment::Machine, Difficulty::Beginner),
            (15, "Overhead Press", 4, Equipment::Barbell, Difficulty::Intermediate),
            (16, "Lateral Raise", 4, Equipment::Dumbbell, Difficulty::Beginner),
            (17, "Face Pull", 4, Equipment::Cable, Difficulty::Beginner),
            (18, "Plank", 7, Equipment::Bodyweight, Difficulty::Beginner),
            (19, "Crunch", 7, Equipment::Bodyweight, Difficulty::Beginner),
        ]
        .into_iter()
        .map(|(id, name, muscle_group_id, equipment, difficulty)| Exercise {
            id,
            name: name.to_owned(),
            muscle_group_id,
            equipment,
            difficulty,
        })
        .collect();

        Self { groups, exercises }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_group_sizes() {
        let catalog = ExerciseCatalog::builtin();
        assert_eq!(catalog.exercises_for_group("Chest").count(), 3);
        assert_eq!(catalog.exercises_for_group("Triceps").count(), 2);
        assert_eq!(catalog.exercises_for_group("Legs").count(), 4);
        assert_eq!(catalog.exercises_for_group("Calves").count(), 0);
    }

    #[test]
    fn test_orphan_exercise_rejected() {
        let exercise = Exercise {
            id: 1,
            name: "Calf Raise".into(),
            muscle_group_id: 42,
            equipment: Equipment::Machine,
            difficulty: Difficulty::Beginner,
        };
        assert!(ExerciseCatalog::new(Vec::new(), vec![exercise]).is_err());
    }

    #[test]
    fn test_new_sorts_by_id() {
        let builtin = ExerciseCatalog::builtin();
        let mut exercises = builtin.exercises().to_vec();
        exercises.reverse();
        let catalog = ExerciseCatalog::new(builtin.groups().to_vec(), exercises).unwrap();
        assert_eq!(catalog, builtin);
    }
}
