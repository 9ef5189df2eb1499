// ABOUTME: Exercise catalog storage: muscle groups and exercises
// ABOUTME: Idempotent seeding of the built-in catalog and loading in stable id order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{Difficulty, Equipment, Exercise, MuscleGroup};
use fitevolution_intelligence::ExerciseCatalog;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::info;

impl Database {
    pub(super) async fn migrate_catalog(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS muscle_groups (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                description TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create muscle_groups table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                muscle_group_id INTEGER NOT NULL REFERENCES muscle_groups(id),
                equipment TEXT NOT NULL,
                difficulty TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create exercises table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercises_group ON exercises(muscle_group_id, id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create exercises index: {e}")))?;

        Ok(())
    }

    /// Insert the built-in catalog; rows that already exist are left alone
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails
    pub async fn seed_default_catalog(&self) -> AppResult<u64> {
        self.seed_catalog(&ExerciseCatalog::builtin()).await
    }

    /// Insert a catalog in one transaction, skipping existing ids.
    /// Returns the number of rows inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails
    pub async fn seed_catalog(&self, catalog: &ExerciseCatalog) -> AppResult<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for group in catalog.groups() {
            inserted += sqlx::query(
                "INSERT OR IGNORE INTO muscle_groups (id, name, description) VALUES ($1, $2, $3)",
            )
            .bind(group.id)
            .bind(&group.name)
            .bind(&group.description)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed muscle group: {e}")))?
            .rows_affected();
        }

        for exercise in catalog.exercises() {
            inserted += sqlx::query(
                r"
                INSERT OR IGNORE INTO exercises (id, name, muscle_group_id, equipment, difficulty)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(exercise.id)
            .bind(&exercise.name)
            .bind(exercise.muscle_group_id)
            .bind(exercise.equipment.as_str())
            .bind(exercise.difficulty.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to seed exercise: {e}")))?
            .rows_affected();
        }

        tx.commit().await?;
        info!(inserted, "Exercise catalog seeded");
        Ok(inserted)
    }

    /// Load the stored catalog in id order
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or the stored rows are inconsistent
    pub async fn load_catalog(&self) -> AppResult<ExerciseCatalog> {
        let groups = sqlx::query("SELECT id, name, description FROM muscle_groups ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list muscle groups: {e}")))?
            .iter()
            .map(row_to_muscle_group)
            .collect();

        let exercises = sqlx::query(
            "SELECT id, name, muscle_group_id, equipment, difficulty FROM exercises ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list exercises: {e}")))?
        .iter()
        .map(row_to_exercise)
        .collect();

        ExerciseCatalog::new(groups, exercises)
    }

    /// Whether a catalog exercise exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exercise_exists(&self, exercise_id: i64) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM exercises WHERE id = $1")
            .bind(exercise_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up exercise: {e}")))?;
        Ok(row.is_some())
    }
}

fn row_to_muscle_group(row: &SqliteRow) -> MuscleGroup {
    MuscleGroup {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
    }
}

fn row_to_exercise(row: &SqliteRow) -> Exercise {
    let equipment: String = row.get("equipment");
    let difficulty: String = row.get("difficulty");
    Exercise {
        id: row.get("id"),
        name: row.get("name"),
        muscle_group_id: row.get("muscle_group_id"),
        equipment: Equipment::parse(&equipment),
        difficulty: Difficulty::parse(&difficulty),
    }
}
