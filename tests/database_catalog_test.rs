// ABOUTME: Integration tests for exercise catalog storage
// ABOUTME: Seeding is idempotent and loading preserves id order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::create_test_database;
use fitevolution::intelligence::ExerciseCatalog;
use fitevolution::models::{Difficulty, Equipment, Exercise, MuscleGroup};

#[tokio::test]
async fn test_seed_is_idempotent() -> Result<()> {
    let database = create_test_database().await?;
    let builtin = ExerciseCatalog::builtin();
    let expected = (builtin.groups().len() + builtin.exercises().len()) as u64;

    assert_eq!(database.seed_default_catalog().await?, expected);
    assert_eq!(database.seed_default_catalog().await?, 0);

    let loaded = database.load_catalog().await?;
    assert_eq!(loaded, builtin);
    Ok(())
}

#[tokio::test]
async fn test_empty_catalog_loads_empty() -> Result<()> {
    let database = create_test_database().await?;
    assert!(database.load_catalog().await?.is_empty());
    assert!(!database.exercise_exists(1).await?);
    Ok(())
}

#[tokio::test]
async fn test_custom_catalog_loads_in_id_order() -> Result<()> {
    let database = create_test_database().await?;
    let groups = vec![MuscleGroup {
        id: 1,
        name: "Chest".into(),
        description: Some("Pectorals".into()),
    }];
    let exercises = vec![
        Exercise {
            id: 20,
            name: "Cable Crossover".into(),
            muscle_group_id: 1,
            equipment: Equipment::Cable,
            difficulty: Difficulty::Beginner,
        },
        Exercise {
            id: 5,
            name: "Push-Up".into(),
            muscle_group_id: 1,
            equipment: Equipment::Bodyweight,
            difficulty: Difficulty::Beginner,
        },
    ];
    let catalog = ExerciseCatalog::new(groups, exercises)?;
    assert_eq!(database.seed_catalog(&catalog).await?, 3);

    let loaded = database.load_catalog().await?;
    let ids: Vec<i64> = loaded.exercises().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![5, 20]);
    assert_eq!(loaded.groups()[0].description.as_deref(), Some("Pectorals"));
    assert!(database.exercise_exists(20).await?);
    assert!(!database.exercise_exists(21).await?);
    Ok(())
}
