// ABOUTME: Training days and day exercises with per-day order uniqueness
// ABOUTME: Automatic ordering recomputes the next slot and retries collisions up to a bound
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::{parse_uuid, Database};
use crate::constants::plan_limits;
use crate::errors::{AppError, AppResult};
use crate::models::{DayExercise, NewDayExercise, NewTrainingDay, TrainingDay};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::{debug, warn};
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_days(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS training_days (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                plan_id TEXT NOT NULL REFERENCES training_plans(id) ON DELETE CASCADE,
                weekday INTEGER NOT NULL CHECK (weekday BETWEEN 1 AND 7),
                name TEXT NOT NULL,
                notes TEXT,
                UNIQUE(plan_id, weekday)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create training_days table: {e}")))?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS day_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                day_id INTEGER NOT NULL REFERENCES training_days(id) ON DELETE CASCADE,
                exercise_id INTEGER NOT NULL REFERENCES exercises(id),
                position INTEGER NOT NULL CHECK (position >= 1),
                sets INTEGER NOT NULL CHECK (sets BETWEEN 1 AND 10),
                reps TEXT NOT NULL,
                suggested_weight_kg REAL CHECK (suggested_weight_kg >= 0),
                rest_minutes REAL NOT NULL CHECK (rest_minutes >= 0),
                UNIQUE(day_id, position)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create day_exercises table: {e}")))?;

        Ok(())
    }

    /// Add a training day to a plan
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown plan and a conflict when the
    /// plan already has a day on that weekday
    pub async fn add_training_day(
        &self,
        plan_id: Uuid,
        new_day: &NewTrainingDay,
    ) -> AppResult<TrainingDay> {
        self.require_plan(plan_id).await?;
        let mut conn = self.pool.acquire().await?;
        insert_training_day(&mut conn, plan_id, new_day)
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    AppError::conflict(format!(
                        "Training plan {plan_id} already has a day on weekday {}",
                        new_day.weekday
                    ))
                } else {
                    e
                }
            })
    }

    /// Get a training day
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_training_day(&self, day_id: i64) -> AppResult<Option<TrainingDay>> {
        let row = sqlx::query("SELECT id, plan_id, weekday, name, notes FROM training_days WHERE id = $1")
            .bind(day_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get training day: {e}")))?;

        row.as_ref().map(row_to_training_day).transpose()
    }

    /// Days of a plan in weekday order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_training_days(&self, plan_id: Uuid) -> AppResult<Vec<TrainingDay>> {
        let rows = sqlx::query(
            "SELECT id, plan_id, weekday, name, notes FROM training_days WHERE plan_id = $1 ORDER BY weekday",
        )
        .bind(plan_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list training days: {e}")))?;

        rows.iter().map(row_to_training_day).collect()
    }

    /// Schedule an exercise on a training day.
    ///
    /// Without an explicit order the next free slot (`max + 1`) is computed and
    /// the insert retried on collision, up to the configured number of attempts.
    /// An explicit order that is already taken is a conflict immediately.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown day or exercise, a validation
    /// error for out-of-range values (including a day whose last order slot is
    /// used), and a conflict when the order is taken or retries are exhausted
    pub async fn add_day_exercise(
        &self,
        day_id: i64,
        entry: &NewDayExercise,
    ) -> AppResult<DayExercise> {
        entry.validate()?;
        if self.get_training_day(day_id).await?.is_none() {
            return Err(AppError::not_found(format!("Training day {day_id}")));
        }
        if !self.exercise_exists(entry.exercise_id).await? {
            return Err(AppError::not_found(format!("Exercise {}", entry.exercise_id)));
        }

        if let Some(order) = entry.order {
            let mut conn = self.pool.acquire().await?;
            return insert_day_exercise(&mut conn, day_id, order, entry)
                .await
                .map_err(|e| {
                    if e.is_conflict() {
                        AppError::conflict(format!(
                            "Order {order} is already taken on training day {day_id}"
                        ))
                    } else {
                        e
                    }
                });
        }

        for attempt in 1..=self.order_retry_attempts {
            let mut conn = self.pool.acquire().await?;
            let order = next_order(&mut conn, day_id).await?;
            match insert_day_exercise(&mut conn, day_id, order, entry).await {
                Ok(created) => return Ok(created),
                Err(e) if e.is_conflict() => {
                    debug!(day_id, order, attempt, "Day exercise order collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            day_id,
            attempts = self.order_retry_attempts,
            "Day exercise order retries exhausted"
        );
        Err(AppError::conflict(format!(
            "Could not assign an order on training day {day_id}: conflict, try again"
        ))
        .with_resource_id(day_id.to_string()))
    }

    /// Exercises of a day in order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_day_exercises(&self, day_id: i64) -> AppResult<Vec<DayExercise>> {
        let rows = sqlx::query(
            r"
            SELECT id, day_id, exercise_id, position, sets, reps, suggested_weight_kg, rest_minutes
            FROM day_exercises
            WHERE day_id = $1
            ORDER BY position
            ",
        )
        .bind(day_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list day exercises: {e}")))?;

        Ok(rows.iter().map(row_to_day_exercise).collect())
    }

    /// Whether a scheduled day exercise exists
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn day_exercise_exists(&self, day_exercise_id: i64) -> AppResult<bool> {
        let row = sqlx::query("SELECT 1 FROM day_exercises WHERE id = $1")
            .bind(day_exercise_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to look up day exercise: {e}")))?;
        Ok(row.is_some())
    }
}

pub(super) async fn insert_training_day(
    conn: &mut SqliteConnection,
    plan_id: Uuid,
    new_day: &NewTrainingDay,
) -> AppResult<TrainingDay> {
    new_day.validate()?;
    let name = new_day.name.trim();
    let id = sqlx::query(
        "INSERT INTO training_days (plan_id, weekday, name, notes) VALUES ($1, $2, $3, $4)",
    )
    .bind(plan_id.to_string())
    .bind(i64::from(new_day.weekday))
    .bind(name)
    .bind(&new_day.notes)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(TrainingDay {
        id,
        plan_id,
        weekday: new_day.weekday,
        name: name.to_owned(),
        notes: new_day.notes.clone(),
    })
}

pub(super) async fn insert_day_exercise(
    conn: &mut SqliteConnection,
    day_id: i64,
    order: u32,
    entry: &NewDayExercise,
) -> AppResult<DayExercise> {
    let id = sqlx::query(
        r"
        INSERT INTO day_exercises (
            day_id, exercise_id, position, sets, reps, suggested_weight_kg, rest_minutes
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ",
    )
    .bind(day_id)
    .bind(entry.exercise_id)
    .bind(i64::from(order))
    .bind(i64::from(entry.sets))
    .bind(entry.reps.trim())
    .bind(entry.suggested_weight_kg)
    .bind(entry.rest_minutes)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(DayExercise {
        id,
        day_id,
        exercise_id: entry.exercise_id,
        order,
        sets: entry.sets,
        reps: entry.reps.trim().to_owned(),
        suggested_weight_kg: entry.suggested_weight_kg,
        rest_minutes: entry.rest_minutes,
    })
}

async fn next_order(conn: &mut SqliteConnection, day_id: i64) -> AppResult<u32> {
    let max: Option<i64> = sqlx::query_scalar("SELECT MAX(position) FROM day_exercises WHERE day_id = $1")
        .bind(day_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to compute next exercise order: {e}")))?;

    let next = max.map_or(1, |max| max.saturating_add(1));
    u32::try_from(next)
        .ok()
        .filter(|order| *order <= plan_limits::MAX_EXERCISE_ORDER)
        .ok_or_else(|| {
            AppError::value_out_of_range(
                "order",
                next,
                f64::from(plan_limits::MIN_EXERCISE_ORDER),
                f64::from(plan_limits::MAX_EXERCISE_ORDER),
            )
            .with_resource_id(day_id.to_string())
        })
}

fn row_to_training_day(row: &SqliteRow) -> AppResult<TrainingDay> {
    let plan_id: String = row.get("plan_id");
    let weekday: i64 = row.get("weekday");
    Ok(TrainingDay {
        id: row.get("id"),
        plan_id: parse_uuid(&plan_id)?,
        weekday: weekday as u8,
        name: row.get("name"),
        notes: row.get("notes"),
    })
}

fn row_to_day_exercise(row: &SqliteRow) -> DayExercise {
    let position: i64 = row.get("position");
    let sets: i64 = row.get("sets");
    DayExercise {
        id: row.get("id"),
        day_id: row.get("day_id"),
        exercise_id: row.get("exercise_id"),
        order: position as u32,
        sets: sets as u8,
        reps: row.get("reps"),
        suggested_weight_kg: row.get("suggested_weight_kg"),
        rest_minutes: row.get("rest_minutes"),
    }
}
