// ABOUTME: Profile persistence with body composition recomputed on every write
// ABOUTME: Callers supply raw measurements only; BMI and body fat columns are derived
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::{parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{ActivityLevel, Goal, ProfileInput, Sex};
use chrono::{DateTime, SecondsFormat, Utc};
use fitevolution_intelligence::Profile;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

/// A user's saved profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredProfile {
    /// Owning user
    pub user_id: Uuid,
    /// Validated input with derived metrics
    #[serde(flatten)]
    pub profile: Profile,
    /// First save
    pub created_at: DateTime<Utc>,
    /// Last save
    pub updated_at: DateTime<Utc>,
}

impl Database {
    pub(super) async fn migrate_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS profiles (
                user_id TEXT PRIMARY KEY,
                age INTEGER NOT NULL,
                sex TEXT NOT NULL CHECK (sex IN ('M', 'F')),
                weight_kg REAL NOT NULL,
                height_cm INTEGER NOT NULL,
                activity_level TEXT NOT NULL,
                goal TEXT NOT NULL,
                session_minutes INTEGER,
                bmi REAL,
                body_fat_pct REAL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create profiles table: {e}")))?;
        Ok(())
    }

    /// Create or replace a user's profile.
    ///
    /// BMI and body fat are recomputed from the input; when they cannot be
    /// derived both columns are stored as NULL.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is out of range or the write fails
    pub async fn save_profile(
        &self,
        user_id: Uuid,
        input: ProfileInput,
    ) -> AppResult<StoredProfile> {
        let profile = Profile::new(input)?;
        let metrics = profile.metrics();
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);

        sqlx::query(
            r"
            INSERT INTO profiles (
                user_id, age, sex, weight_kg, height_cm, activity_level, goal,
                session_minutes, bmi, body_fat_pct, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT(user_id) DO UPDATE SET
                age = excluded.age,
                sex = excluded.sex,
                weight_kg = excluded.weight_kg,
                height_cm = excluded.height_cm,
                activity_level = excluded.activity_level,
                goal = excluded.goal,
                session_minutes = excluded.session_minutes,
                bmi = excluded.bmi,
                body_fat_pct = excluded.body_fat_pct,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(profile.age()))
        .bind(profile.sex().as_str())
        .bind(profile.weight_kg())
        .bind(i64::from(profile.height_cm()))
        .bind(profile.activity_level().as_str())
        .bind(profile.goal().as_str())
        .bind(profile.session_minutes().map(i64::from))
        .bind(metrics.map(|m| m.bmi))
        .bind(metrics.map(|m| m.body_fat_pct))
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save profile: {e}")))?;

        self.get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::internal("Saved profile could not be read back"))
    }

    /// Get a user's profile
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is invalid
    pub async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<StoredProfile>> {
        let row = sqlx::query(
            r"
            SELECT user_id, age, sex, weight_kg, height_cm, activity_level, goal,
                   session_minutes, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get profile: {e}")))?;

        row.map(|row| row_to_profile(user_id, &row)).transpose()
    }

    /// Get a user's profile, failing when none is saved
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the user has no profile
    pub async fn require_profile(&self, user_id: Uuid) -> AppResult<StoredProfile> {
        self.get_profile(user_id).await?.ok_or_else(|| {
            AppError::not_found(format!("Profile for user {user_id}"))
                .with_user_id(user_id)
        })
    }
}

fn row_to_profile(user_id: Uuid, row: &SqliteRow) -> AppResult<StoredProfile> {
    let sex: String = row.get("sex");
    let activity_level: String = row.get("activity_level");
    let goal: String = row.get("goal");
    let age: i64 = row.get("age");
    let height_cm: i64 = row.get("height_cm");
    let session_minutes: Option<i64> = row.get("session_minutes");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    let input = ProfileInput {
        age: age as u32,
        sex: sex.parse::<Sex>()?,
        weight_kg: row.get("weight_kg"),
        height_cm: height_cm as u32,
        activity_level: ActivityLevel::parse(&activity_level),
        goal: Goal::parse(&goal),
        session_minutes: session_minutes.map(|minutes| minutes as u32),
    };

    Ok(StoredProfile {
        user_id,
        profile: Profile::new(input)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
