// ABOUTME: Exercise catalog reference entities: muscle groups and exercises
// ABOUTME: Equipment and difficulty tags with database string conversions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use serde::{Deserialize, Serialize};

/// A trainable muscle group (unique by name)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuscleGroup {
    /// Stable identifier
    pub id: i64,
    /// Unique display name, also used as the key in planner tables
    pub name: String,
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Equipment required by an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    /// No equipment needed
    #[default]
    Bodyweight,
    /// Barbell work
    Barbell,
    /// Dumbbell work
    Dumbbell,
    /// Selectorized or plate-loaded machine
    Machine,
    /// Cable stack
    Cable,
}

impl Equipment {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bodyweight => "bodyweight",
            Self::Barbell => "barbell",
            Self::Dumbbell => "dumbbell",
            Self::Machine => "machine",
            Self::Cable => "cable",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "barbell" => Self::Barbell,
            "dumbbell" => Self::Dumbbell,
            "machine" => Self::Machine,
            "cable" => Self::Cable,
            // Default to Bodyweight for unrecognized values
            _ => Self::Bodyweight,
        }
    }
}

/// Difficulty level of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Suitable for beginners
    #[default]
    Beginner,
    /// Requires some training history
    Intermediate,
    /// For experienced lifters
    Advanced,
}

impl Difficulty {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            // Default to Beginner for unrecognized values
            _ => Self::Beginner,
        }
    }
}

/// A catalog exercise belonging to exactly one muscle group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Stable identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Owning muscle group
    pub muscle_group_id: i64,
    /// Equipment required
    pub equipment: Equipment,
    /// Difficulty level
    pub difficulty: Difficulty,
}
