// ABOUTME: Training plan persistence and the plan status state machine
// ABOUTME: Activation demotes other active plans inside the same transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::days::{insert_day_exercise, insert_training_day};
use super::{parse_date, parse_timestamp, parse_uuid, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{
    DayExercise, Goal, NewDayExercise, NewTrainingDay, NewTrainingPlan, PlanStatus, TrainingDay,
    TrainingPlan,
};
use chrono::{NaiveDate, SecondsFormat, Utc};
use fitevolution_intelligence::WeeklyPlan;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::info;
use uuid::Uuid;

const PLAN_COLUMNS: &str = "id, user_id, name, start_date, end_date, goal, status, days_per_week, \
                            injury_risk, stagnation_risk, created_at, updated_at";

/// A training day with its scheduled exercises
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    /// The day
    #[serde(flatten)]
    pub day: TrainingDay,
    /// Exercises in order
    pub exercises: Vec<DayExercise>,
}

/// A plan with all of its days and exercises
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanDetail {
    /// The plan
    #[serde(flatten)]
    pub plan: TrainingPlan,
    /// Days in weekday order
    pub days: Vec<DayDetail>,
}

impl Database {
    pub(super) async fn migrate_plans(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS training_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                name TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                goal TEXT NOT NULL,
                status TEXT NOT NULL CHECK (status IN ('active', 'completed', 'paused')),
                days_per_week INTEGER NOT NULL CHECK (days_per_week BETWEEN 1 AND 7),
                injury_risk REAL CHECK (injury_risk BETWEEN 0 AND 1),
                stagnation_risk REAL CHECK (stagnation_risk BETWEEN 0 AND 1),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create training_plans table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_training_plans_user ON training_plans(user_id, created_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create training_plans index: {e}")))?;

        // At most one active plan per user
        sqlx::query(
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_training_plans_one_active
            ON training_plans(user_id) WHERE status = 'active'
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create active plan index: {e}")))?;

        Ok(())
    }

    /// Create a plan. A plan created as `active` demotes the user's current
    /// active plan to `paused` in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the plan fails validation or the transaction fails
    pub async fn create_plan(&self, new_plan: &NewTrainingPlan) -> AppResult<TrainingPlan> {
        new_plan.validate()?;
        let plan_id = Uuid::new_v4();

        let mut tx = self.pool.begin().await?;
        let demoted = if new_plan.status == PlanStatus::Active {
            demote_active_plans(&mut tx, new_plan.user_id, plan_id).await?
        } else {
            0
        };
        insert_plan(&mut tx, plan_id, new_plan).await?;
        let plan = fetch_plan(&mut tx, plan_id)
            .await?
            .ok_or_else(|| AppError::internal("Created plan could not be read back"))?;
        tx.commit().await?;

        if plan.status == PlanStatus::Active {
            info!(
                user_id = %plan.user_id,
                plan_id = %plan.id,
                demoted,
                "Training plan activated"
            );
        }
        Ok(plan)
    }

    /// Create a plan and materialize a generated week into it atomically
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or any insert fails; nothing is
    /// stored in that case
    pub async fn create_plan_with_week(
        &self,
        new_plan: &NewTrainingPlan,
        week: &WeeklyPlan,
    ) -> AppResult<PlanDetail> {
        new_plan.validate()?;
        let plan_id = Uuid::new_v4();

        let mut tx = self.pool.begin().await?;
        let demoted = if new_plan.status == PlanStatus::Active {
            demote_active_plans(&mut tx, new_plan.user_id, plan_id).await?
        } else {
            0
        };
        insert_plan(&mut tx, plan_id, new_plan).await?;
        insert_week(&mut tx, plan_id, week).await?;
        tx.commit().await?;

        let detail = self.get_plan_detail(plan_id).await?;
        if detail.plan.status == PlanStatus::Active {
            info!(
                user_id = %detail.plan.user_id,
                plan_id = %plan_id,
                demoted,
                "Training plan activated"
            );
        }
        Ok(detail)
    }

    /// Materialize a generated week into an existing plan's days and exercises.
    /// Day indexes become weekday numbers and exercises are ordered from 1.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown plan and a conflict if the
    /// plan already has a day on one of the weekdays
    pub async fn save_weekly_plan(&self, plan_id: Uuid, week: &WeeklyPlan) -> AppResult<Vec<DayDetail>> {
        let mut tx = self.pool.begin().await?;
        if fetch_plan(&mut tx, plan_id).await?.is_none() {
            return Err(AppError::not_found(format!("Training plan {plan_id}")));
        }
        let days = insert_week(&mut tx, plan_id, week).await?;
        tx.commit().await?;
        Ok(days)
    }

    /// Get a plan by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_plan(&self, plan_id: Uuid) -> AppResult<Option<TrainingPlan>> {
        let mut conn = self.pool.acquire().await?;
        fetch_plan(&mut conn, plan_id).await
    }

    /// Get a plan by id, failing when it does not exist
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown plan
    pub async fn require_plan(&self, plan_id: Uuid) -> AppResult<TrainingPlan> {
        self.get_plan(plan_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Training plan {plan_id}")))
    }

    /// List a user's plans, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_plans(&self, user_id: Uuid) -> AppResult<Vec<TrainingPlan>> {
        let sql = format!(
            "SELECT {PLAN_COLUMNS} FROM training_plans WHERE user_id = $1 \
             ORDER BY created_at DESC, id"
        );
        let rows = sqlx::query(&sql)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list training plans: {e}")))?;

        rows.iter().map(row_to_plan).collect()
    }

    /// The user's active plan, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_active_plan(&self, user_id: Uuid) -> AppResult<Option<TrainingPlan>> {
        let sql = format!(
            "SELECT {PLAN_COLUMNS} FROM training_plans WHERE user_id = $1 AND status = 'active'"
        );
        let row = sqlx::query(&sql)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get active plan: {e}")))?;

        row.as_ref().map(row_to_plan).transpose()
    }

    /// Move a plan to a new status.
    ///
    /// Activating (resuming) a plan pauses the user's other active plan in the
    /// same transaction. `completed` is terminal.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown plan and `InvalidTransition`
    /// when the state machine forbids the change
    pub async fn set_plan_status(&self, plan_id: Uuid, next: PlanStatus) -> AppResult<TrainingPlan> {
        let mut tx = self.pool.begin().await?;
        let current = fetch_plan(&mut tx, plan_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Training plan {plan_id}")))?;

        if !current.status.can_transition_to(next) {
            return Err(AppError::invalid_transition(current.status, next)
                .with_resource_id(plan_id.to_string()));
        }

        let demoted = if next == PlanStatus::Active {
            demote_active_plans(&mut tx, current.user_id, plan_id).await?
        } else {
            0
        };

        sqlx::query("UPDATE training_plans SET status = $1, updated_at = $2 WHERE id = $3")
            .bind(next.as_str())
            .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
            .bind(plan_id.to_string())
            .execute(&mut *tx)
            .await?;

        let plan = fetch_plan(&mut tx, plan_id)
            .await?
            .ok_or_else(|| AppError::internal("Updated plan could not be read back"))?;
        tx.commit().await?;

        if next == PlanStatus::Active {
            info!(user_id = %plan.user_id, plan_id = %plan_id, demoted, "Training plan activated");
        } else {
            info!(plan_id = %plan_id, from = %current.status, to = %next, "Training plan status changed");
        }
        Ok(plan)
    }

    /// Complete every active plan whose end date is before `today`.
    /// Returns the number of plans completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn complete_expired_plans(&self, today: NaiveDate) -> AppResult<u64> {
        let completed = sqlx::query(
            r"
            UPDATE training_plans SET status = 'completed', updated_at = $1
            WHERE status = 'active' AND end_date < $2
            ",
        )
        .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
        .bind(today.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to complete expired plans: {e}")))?
        .rows_affected();

        if completed > 0 {
            info!(completed, %today, "Expired training plans completed");
        }
        Ok(completed)
    }

    /// A plan with its days and exercises
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown plan
    pub async fn get_plan_detail(&self, plan_id: Uuid) -> AppResult<PlanDetail> {
        let plan = self.require_plan(plan_id).await?;
        let mut days = Vec::new();
        for day in self.list_training_days(plan_id).await? {
            let exercises = self.list_day_exercises(day.id).await?;
            days.push(DayDetail { day, exercises });
        }
        Ok(PlanDetail { plan, days })
    }
}

async fn insert_plan(
    conn: &mut SqliteConnection,
    plan_id: Uuid,
    new_plan: &NewTrainingPlan,
) -> AppResult<()> {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
    sqlx::query(
        r"
        INSERT INTO training_plans (
            id, user_id, name, start_date, end_date, goal, status, days_per_week,
            injury_risk, stagnation_risk, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        ",
    )
    .bind(plan_id.to_string())
    .bind(new_plan.user_id.to_string())
    .bind(new_plan.name.trim())
    .bind(new_plan.start_date.to_string())
    .bind(new_plan.end_date.to_string())
    .bind(new_plan.goal.as_str())
    .bind(new_plan.status.as_str())
    .bind(i64::from(new_plan.days_per_week))
    .bind(new_plan.injury_risk)
    .bind(new_plan.stagnation_risk)
    .bind(&now)
    .bind(&now)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Pause the user's active plans other than `keep`
async fn demote_active_plans(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    keep: Uuid,
) -> AppResult<u64> {
    let result = sqlx::query(
        r"
        UPDATE training_plans SET status = 'paused', updated_at = $1
        WHERE user_id = $2 AND status = 'active' AND id <> $3
        ",
    )
    .bind(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
    .bind(user_id.to_string())
    .bind(keep.to_string())
    .execute(&mut *conn)
    .await
    .map_err(|e| AppError::database(format!("Failed to pause active plans: {e}")))?;

    Ok(result.rows_affected())
}

async fn fetch_plan(conn: &mut SqliteConnection, plan_id: Uuid) -> AppResult<Option<TrainingPlan>> {
    let sql = format!("SELECT {PLAN_COLUMNS} FROM training_plans WHERE id = $1");
    let row = sqlx::query(&sql)
        .bind(plan_id.to_string())
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| AppError::database(format!("Failed to get training plan: {e}")))?;

    row.as_ref().map(row_to_plan).transpose()
}

async fn insert_week(
    conn: &mut SqliteConnection,
    plan_id: Uuid,
    week: &WeeklyPlan,
) -> AppResult<Vec<DayDetail>> {
    let mut days = Vec::with_capacity(week.len());
    for (index, planned) in week.days() {
        let new_day = NewTrainingDay {
            weekday: index,
            name: planned.day_name.clone(),
            notes: None,
        };
        let day = insert_training_day(conn, plan_id, &new_day).await?;

        let mut exercises = Vec::with_capacity(planned.exercises.len());
        for (position, assignment) in (1_u32..).zip(&planned.exercises) {
            let entry = NewDayExercise {
                exercise_id: assignment.exercise_id,
                order: Some(position),
                sets: assignment.sets,
                reps: assignment.reps.clone(),
                suggested_weight_kg: assignment.suggested_weight_kg,
                rest_minutes: assignment.rest_minutes,
            };
            entry.validate()?;
            exercises.push(insert_day_exercise(conn, day.id, position, &entry).await?);
        }
        days.push(DayDetail { day, exercises });
    }
    Ok(days)
}

fn row_to_plan(row: &SqliteRow) -> AppResult<TrainingPlan> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let start_date: String = row.get("start_date");
    let end_date: String = row.get("end_date");
    let goal: String = row.get("goal");
    let status: String = row.get("status");
    let days_per_week: i64 = row.get("days_per_week");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(TrainingPlan {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        name: row.get("name"),
        start_date: parse_date(&start_date)?,
        end_date: parse_date(&end_date)?,
        goal: Goal::parse(&goal),
        status: PlanStatus::parse(&status)?,
        days_per_week: days_per_week as u8,
        injury_risk: row.get("injury_risk"),
        stagnation_risk: row.get("stagnation_risk"),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
