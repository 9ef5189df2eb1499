// ABOUTME: Training planner lookup tables keyed by activity level, day count and muscle group
// ABOUTME: Sets/reps/rest ranges, weekly muscle group distributions, and load factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! Planner Configuration
//!
//! Every table the rule-based and model-assisted planners consult lives here, so
//! the generators can be exercised with alternate tables. The defaults encode the
//! documented training guidelines:
//!
//! | Activity  | Sets | Rest (s) | Days | Load intensity |
//! |-----------|------|----------|------|----------------|
//! | sedentary | 2-3  | 60-90    | 3    | 0.0            |
//! | light     | 3-4  | 60-90    | 4    | 0.5            |
//! | moderate  | 3-4  | 90-120   | 4    | 1.0            |
//! | intense   | 4-5  | 120-180  | 5    | 1.0            |
//!
//! Suggested load is `body_weight_kg x factor`, where the factor moves from the low
//! to the high end of the group's range as load intensity rises.

use super::ConfigError;
use crate::catalog::group_names::{ABS, BACK, BICEPS, CHEST, LEGS, SHOULDERS, TRICEPS};
use crate::rounding::round_to;
use fitevolution_core::constants::plan_limits;
use fitevolution_core::models::{ActivityLevel, Goal};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

/// Inclusive numeric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    /// Lower bound
    pub low: T,
    /// Upper bound
    pub high: T,
}

impl<T: PartialOrd + Copy + Display> Bounds<T> {
    /// Create a range
    pub const fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    fn check(&self, name: &str) -> Result<(), ConfigError> {
        if self.low > self.high {
            return Err(ConfigError::InvalidRange(format!(
                "{name}: low {} must be <= high {}",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Rep ranges keyed by goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalReps {
    /// Fat loss rep range
    pub fat_loss: Bounds<u8>,
    /// Recomposition rep range
    pub recomposition: Bounds<u8>,
    /// Hypertrophy rep range
    pub hypertrophy: Bounds<u8>,
}

impl GoalReps {
    /// Rep range for a goal
    #[must_use]
    pub const fn get(&self, goal: Goal) -> Bounds<u8> {
        match goal {
            Goal::FatLoss => self.fat_loss,
            Goal::Recomposition => self.recomposition,
            Goal::Hypertrophy => self.hypertrophy,
        }
    }
}

/// Training parameters for one activity level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityProfile {
    /// Sets per exercise
    pub sets: Bounds<u8>,
    /// Reps per set, by goal
    pub reps: GoalReps,
    /// Rest between sets in seconds
    pub rest_seconds: Bounds<u32>,
    /// Default training days per week
    pub days_per_week: u8,
    /// Position within each muscle group's load factor range (0.0-1.0)
    pub weight_intensity: f64,
}

impl ActivityProfile {
    /// Sets prescribed for a goal: low end for fat loss, high end otherwise
    #[must_use]
    pub const fn sets_for(&self, goal: Goal) -> u8 {
        match goal {
            Goal::FatLoss => self.sets.low,
            Goal::Recomposition | Goal::Hypertrophy => self.sets.high,
        }
    }

    /// Rep prescription string such as "8-12"
    #[must_use]
    pub fn reps_for(&self, goal: Goal) -> String {
        let range = self.reps.get(goal);
        format!("{}-{}", range.low, range.high)
    }

    /// Rest in minutes: upper bound for compound groups, lower bound otherwise
    #[must_use]
    pub fn rest_minutes(&self, compound: bool) -> f64 {
        let seconds = if compound {
            self.rest_seconds.high
        } else {
            self.rest_seconds.low
        };
        round_to(f64::from(seconds) / 60.0, 1)
    }
}

/// Activity profiles for every activity level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTable {
    /// Sedentary profile
    pub sedentary: ActivityProfile,
    /// Light profile
    pub light: ActivityProfile,
    /// Moderate profile
    pub moderate: ActivityProfile,
    /// Intense profile
    pub intense: ActivityProfile,
}

impl ActivityTable {
    /// Profile for an activity level
    #[must_use]
    pub const fn get(&self, level: ActivityLevel) -> &ActivityProfile {
        match level {
            ActivityLevel::Sedentary => &self.sedentary,
            ActivityLevel::Light => &self.light,
            ActivityLevel::Moderate => &self.moderate,
            ActivityLevel::Intense => &self.intense,
        }
    }
}

/// Load and rest rules for one muscle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleGroupRule {
    /// Body weight multiplier range; a zero high bound means no suggested load
    pub weight_factor: Bounds<f64>,
    /// Compound groups rest at the upper bound of the rest range
    pub compound: bool,
}

impl MuscleGroupRule {
    /// Load factor at a given intensity (0.0 = low end, 1.0 = high end)
    #[must_use]
    pub fn factor_at(&self, intensity: f64) -> f64 {
        let span = self.weight_factor.high - self.weight_factor.low;
        span.mul_add(intensity.clamp(0.0, 1.0), self.weight_factor.low)
    }

    /// Whether exercises of this group carry a suggested load at all
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.weight_factor.high > 0.0
    }

    /// Suggested load rounded to 0.1 kg, `None` for unloaded groups
    #[must_use]
    pub fn suggested_weight(&self, body_weight_kg: f64, intensity: f64) -> Option<f64> {
        if !self.is_loaded() {
            return None;
        }
        Some(round_to(body_weight_kg * self.factor_at(intensity), 1))
    }
}

/// How many exercises each muscle group gets, by groups trained that day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingRule {
    /// Exercises when the day trains a single group
    pub single_group: u8,
    /// Exercises per group when the day trains two groups
    pub two_groups: u8,
    /// Exercises per group when the day trains three or more groups
    pub many_groups: u8,
}

impl GroupingRule {
    /// Exercise count per group for a day training `groups_in_day` groups
    #[must_use]
    pub fn exercises_per_group(&self, groups_in_day: usize) -> usize {
        let count = match groups_in_day {
            0 | 1 => self.single_group,
            2 => self.two_groups,
            _ => self.many_groups,
        };
        usize::from(count)
    }
}

impl Default for GroupingRule {
    fn default() -> Self {
        Self {
            single_group: 4,
            two_groups: 3,
            many_groups: 2,
        }
    }
}

/// Complete set of planner lookup tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Training parameters per activity level
    pub activity: ActivityTable,
    /// Day count to ordered per-day muscle group lists
    pub distributions: BTreeMap<u8, Vec<Vec<String>>>,
    /// Load and rest rules per muscle group name
    pub muscle_groups: BTreeMap<String, MuscleGroupRule>,
    /// Exercises per group rule
    #[serde(default)]
    pub grouping: GroupingRule,
}

impl PlannerConfig {
    /// Per-day muscle group template for a day count
    #[must_use]
    pub fn template(&self, days_per_week: u8) -> Option<&[Vec<String>]> {
        self.distributions.get(&days_per_week).map(Vec::as_slice)
    }

    /// Day count to plan: the requested count when a template exists for it,
    /// otherwise the activity level default
    #[must_use]
    pub fn resolve_days(&self, level: ActivityLevel, requested: Option<u8>) -> u8 {
        let default_days = self.activity.get(level).days_per_week;
        match requested {
            Some(days) if self.distributions.contains_key(&days) => days,
            Some(days) => {
                tracing::warn!(
                    requested_days = days,
                    fallback_days = default_days,
                    "No distribution template for requested day count, using activity default"
                );
                default_days
            }
            None => default_days,
        }
    }

    /// Rule for a muscle group
    #[must_use]
    pub fn group_rule(&self, group: &str) -> Option<&MuscleGroupRule> {
        self.muscle_groups.get(group)
    }

    /// Parse tables from JSON and validate them
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the tables are inconsistent
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::Parse(format!("planner tables: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read tables from a JSON file and validate them
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the tables are invalid
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Validate internal consistency of the tables
    ///
    /// # Errors
    ///
    /// Returns an error for inverted ranges, out-of-range intensities, day counts
    /// without a template, templates of the wrong length, or unknown groups
    pub fn validate(&self) -> Result<(), ConfigError> {
        for level in ActivityLevel::ALL {
            let profile = self.activity.get(level);
            profile.sets.check(&format!("{level}.sets"))?;
            profile.rest_seconds.check(&format!("{level}.rest_seconds"))?;
            for goal in Goal::ALL {
                let reps = profile.reps.get(goal);
                reps.check(&format!("{level}.reps.{goal}"))?;
                if reps.low == 0 {
                    return Err(ConfigError::ValueOutOfRange(format!(
                        "{level}.reps.{goal} must be at least 1"
                    )));
                }
            }
            if profile.sets.low < plan_limits::MIN_SETS || profile.sets.high > plan_limits::MAX_SETS
            {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "{level}.sets must be within {}-{}",
                    plan_limits::MIN_SETS,
                    plan_limits::MAX_SETS
                )));
            }
            if !(0.0..=1.0).contains(&profile.weight_intensity) {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "{level}.weight_intensity must be within 0.0-1.0"
                )));
            }
            if !self.distributions.contains_key(&profile.days_per_week) {
                return Err(ConfigError::MissingField(format!(
                    "distribution template for {} days ({level})",
                    profile.days_per_week
                )));
            }
        }

        for (days, template) in &self.distributions {
            if template.len() != usize::from(*days) {
                return Err(ConfigError::InvalidRange(format!(
                    "template for {days} days lists {} days",
                    template.len()
                )));
            }
            for group in template.iter().flatten() {
                if !self.muscle_groups.contains_key(group) {
                    return Err(ConfigError::UnknownMuscleGroup(group.clone()));
                }
            }
        }

        for (name, rule) in &self.muscle_groups {
            rule.weight_factor.check(&format!("{name}.weight_factor"))?;
            if rule.weight_factor.low < 0.0 {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "{name}.weight_factor must not be negative"
                )));
            }
        }

        let grouping = self.grouping;
        if grouping.single_group == 0 || grouping.two_groups == 0 || grouping.many_groups == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "grouping rule counts must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

fn template(days: &[&[&str]]) -> Vec<Vec<String>> {
    days.iter()
        .map(|groups| groups.iter().map(|g| (*g).to_owned()).collect())
        .collect()
}

fn group_rule(low: f64, high: f64, compound: bool) -> MuscleGroupRule {
    MuscleGroupRule {
        weight_factor: Bounds::new(low, high),
        compound,
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        let mut distributions = BTreeMap::new();
        distributions.insert(
            3,
            template(&[&[CHEST, TRICEPS, SHOULDERS], &[BACK, BICEPS], &[LEGS, ABS]]),
        );
        distributions.insert(
            4,
            template(&[&[CHEST, TRICEPS], &[LEGS], &[BACK, BICEPS], &[SHOULDERS, ABS]]),
        );
        distributions.insert(
            5,
            template(&[
                &[CHEST],
                &[BACK],
                &[LEGS],
                &[SHOULDERS],
                &[BICEPS, TRICEPS, ABS],
            ]),
        );

        let mut muscle_groups = BTreeMap::new();
        muscle_groups.insert(CHEST.to_owned(), group_rule(0.8, 1.0, true));
        muscle_groups.insert(BACK.to_owned(), group_rule(0.7, 1.0, true));
        muscle_groups.insert(LEGS.to_owned(), group_rule(1.2, 1.5, true));
        muscle_groups.insert(SHOULDERS.to_owned(), group_rule(0.4, 0.6, false));
        muscle_groups.insert(BICEPS.to_owned(), group_rule(0.3, 0.45, false));
        muscle_groups.insert(TRICEPS.to_owned(), group_rule(0.4, 0.6, false));
        muscle_groups.insert(ABS.to_owned(), group_rule(0.0, 0.0, false));

        Self {
            activity: ActivityTable::default(),
            distributions,
            muscle_groups,
            grouping: GroupingRule::default(),
        }
    }
}

impl Default for ActivityTable {
    fn default() -> Self {
        Self {
            sedentary: ActivityProfile {
                sets: Bounds::new(2, 3),
                reps: GoalReps {
                    fat_loss: Bounds::new(12, 15),
                    recomposition: Bounds::new(10, 12),
                    hypertrophy: Bounds::new(10, 12),
                },
                rest_seconds: Bounds::new(60, 90),
                days_per_week: 3,
                weight_intensity: 0.0,
            },
            light: ActivityProfile {
                sets: Bounds::new(3, 4),
                reps: GoalReps {
                    fat_loss: Bounds::new(12, 15),
                    recomposition: Bounds::new(10, 12),
                    hypertrophy: Bounds::new(8, 12),
                },
                rest_seconds: Bounds::new(60, 90),
                days_per_week: 4,
                weight_intensity: 0.5,
            },
            moderate: ActivityProfile {
                sets: Bounds::new(3, 4),
                reps: GoalReps {
                    fat_loss: Bounds::new(12, 15),
                    recomposition: Bounds::new(8, 12),
                    hypertrophy: Bounds::new(8, 12),
                },
                rest_seconds: Bounds::new(90, 120),
                days_per_week: 4,
                weight_intensity: 1.0,
            },
            intense: ActivityProfile {
                sets: Bounds::new(4, 5),
                reps: GoalReps {
                    fat_loss: Bounds::new(10, 15),
                    recomposition: Bounds::new(8, 10),
                    hypertrophy: Bounds::new(6, 10),
                },
                rest_seconds: Bounds::new(120, 180),
                days_per_week: 5,
                weight_intensity: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_are_valid() {
        PlannerConfig::default().validate().unwrap();
    }

    #[test]
    fn test_rest_minutes_by_group_kind() {
        let table = ActivityTable::default();
        assert!((table.moderate.rest_minutes(true) - 2.0).abs() < f64::EPSILON);
        assert!((table.moderate.rest_minutes(false) - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut config = PlannerConfig::default();
        config.activity.light.sets = Bounds::new(5, 3);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
    }

    #[test]
    fn test_sets_above_limit_rejected() {
        let mut config = PlannerConfig::default();
        config.activity.intense.sets = Bounds::new(4, 12);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(message)) if message.starts_with("intense.sets")
        ));

        config.activity.intense.sets = Bounds::new(4, plan_limits::MAX_SETS);
        config.validate().unwrap();
    }

    #[test]
    fn test_zero_reps_rejected() {
        let mut config = PlannerConfig::default();
        config.activity.sedentary.reps.fat_loss = Bounds::new(0, 15);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(message)) if message.contains("reps")
        ));
    }

    #[test]
    fn test_unknown_group_in_template_rejected() {
        let mut config = PlannerConfig::default();
        config
            .distributions
            .insert(3, template(&[&["Calves"], &[BACK], &[LEGS]]));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownMuscleGroup(name)) if name == "Calves"
        ));
    }

    #[test]
    fn test_unsupported_day_request_falls_back() {
        let config = PlannerConfig::default();
        assert_eq!(config.resolve_days(ActivityLevel::Intense, Some(6)), 5);
        assert_eq!(config.resolve_days(ActivityLevel::Intense, Some(3)), 3);
        assert_eq!(config.resolve_days(ActivityLevel::Sedentary, None), 3);
    }
}
