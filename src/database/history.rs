// ABOUTME: Workout history persistence: one row per performed set
// ABOUTME: Lists logs newest first by user or by scheduled day exercise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::{parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{NewWorkoutLog, WorkoutLog};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

const LOG_COLUMNS: &str = "id, user_id, day_exercise_id, performed_at, set_number, reps_done, \
                           weight_used_kg, rpe, discomfort, notes";

impl Database {
    pub(super) async fn migrate_history(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                day_exercise_id INTEGER NOT NULL REFERENCES day_exercises(id) ON DELETE CASCADE,
                performed_at TEXT NOT NULL,
                set_number INTEGER NOT NULL CHECK (set_number >= 1),
                reps_done INTEGER NOT NULL CHECK (reps_done >= 0),
                weight_used_kg REAL CHECK (weight_used_kg >= 0),
                rpe INTEGER NOT NULL CHECK (rpe BETWEEN 1 AND 10),
                discomfort INTEGER NOT NULL DEFAULT 0 CHECK (discomfort BETWEEN 0 AND 10),
                notes TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout_logs table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_logs_user ON workout_logs(user_id, performed_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout_logs index: {e}")))?;

        Ok(())
    }

    /// Record a performed set now
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range values and
    /// `ResourceNotFound` for an unknown day exercise
    pub async fn add_workout_log(&self, log: &NewWorkoutLog) -> AppResult<WorkoutLog> {
        self.add_workout_log_at(log, Utc::now()).await
    }

    /// Record a performed set at a given time
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-range values and
    /// `ResourceNotFound` for an unknown day exercise
    pub async fn add_workout_log_at(
        &self,
        log: &NewWorkoutLog,
        performed_at: DateTime<Utc>,
    ) -> AppResult<WorkoutLog> {
        log.validate()?;
        if !self.day_exercise_exists(log.day_exercise_id).await? {
            return Err(AppError::not_found(format!(
                "Day exercise {}",
                log.day_exercise_id
            )));
        }

        let performed_at = performed_at.to_rfc3339_opts(SecondsFormat::Micros, true);
        let id = sqlx::query(
            r"
            INSERT INTO workout_logs (
                user_id, day_exercise_id, performed_at, set_number, reps_done,
                weight_used_kg, rpe, discomfort, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(log.user_id.to_string())
        .bind(log.day_exercise_id)
        .bind(&performed_at)
        .bind(i64::from(log.set_number))
        .bind(i64::from(log.reps_done))
        .bind(log.weight_used_kg)
        .bind(i64::from(log.rpe))
        .bind(i64::from(log.discomfort))
        .bind(&log.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save workout log: {e}")))?
        .last_insert_rowid();

        Ok(WorkoutLog {
            id,
            user_id: log.user_id,
            day_exercise_id: log.day_exercise_id,
            performed_at: parse_timestamp(&performed_at)?,
            set_number: log.set_number,
            reps_done: log.reps_done,
            weight_used_kg: log.weight_used_kg,
            rpe: log.rpe,
            discomfort: log.discomfort,
            notes: log.notes.clone(),
        })
    }

    /// A user's logs, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_workout_logs(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<WorkoutLog>> {
        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM workout_logs WHERE user_id = $1 \
             ORDER BY performed_at DESC, id DESC LIMIT $2"
        );
        let rows = sqlx::query(&sql)
            .bind(user_id.to_string())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list workout logs: {e}")))?;

        rows.iter().map(row_to_workout_log).collect()
    }

    /// Logs recorded against one scheduled exercise, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_workout_logs_for_exercise(
        &self,
        day_exercise_id: i64,
    ) -> AppResult<Vec<WorkoutLog>> {
        let sql = format!(
            "SELECT {LOG_COLUMNS} FROM workout_logs WHERE day_exercise_id = $1 \
             ORDER BY performed_at DESC, id DESC"
        );
        let rows = sqlx::query(&sql)
            .bind(day_exercise_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list workout logs: {e}")))?;

        rows.iter().map(row_to_workout_log).collect()
    }
}

fn row_to_workout_log(row: &SqliteRow) -> AppResult<WorkoutLog> {
    let user_id: String = row.get("user_id");
    let performed_at: String = row.get("performed_at");
    let set_number: i64 = row.get("set_number");
    let reps_done: i64 = row.get("reps_done");
    let rpe: i64 = row.get("rpe");
    let discomfort: i64 = row.get("discomfort");

    Ok(WorkoutLog {
        id: row.get("id"),
        user_id: parse_uuid(&user_id)?,
        day_exercise_id: row.get("day_exercise_id"),
        performed_at: parse_timestamp(&performed_at)?,
        set_number: set_number as u8,
        reps_done: reps_done as u32,
        weight_used_kg: row.get("weight_used_kg"),
        rpe: rpe as u8,
        discomfort: discomfort as u8,
        notes: row.get("notes"),
    })
}
