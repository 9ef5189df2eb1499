// ABOUTME: Integration tests for profile storage with derived body composition
// ABOUTME: BMI and body fat are recomputed from raw measurements on every save
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{create_test_database, sample_profile};
use fitevolution::errors::ErrorCode;
use fitevolution::models::{Goal, ProfileInput, Sex};
use sqlx::Row;
use uuid::Uuid;

#[tokio::test]
async fn test_save_profile_derives_metrics() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();

    let stored = database.save_profile(user_id, sample_profile()).await?;
    assert_eq!(stored.user_id, user_id);
    assert_eq!(stored.profile.bmi(), Some(24.69));
    assert_eq!(stored.profile.body_fat_pct(), Some(20.3));

    let row = sqlx::query("SELECT bmi, body_fat_pct FROM profiles WHERE user_id = $1")
        .bind(user_id.to_string())
        .fetch_one(database.pool())
        .await?;
    assert_eq!(row.get::<Option<f64>, _>("bmi"), Some(24.69));
    assert_eq!(row.get::<Option<f64>, _>("body_fat_pct"), Some(20.3));
    Ok(())
}

#[tokio::test]
async fn test_profile_update_recomputes_metrics() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();

    let first = database.save_profile(user_id, sample_profile()).await?;
    let heavier = ProfileInput {
        weight_kg: 90.0,
        goal: Goal::FatLoss,
        ..sample_profile()
    };
    let second = database.save_profile(user_id, heavier).await?;

    assert_eq!(second.profile.bmi(), Some(27.78));
    assert_eq!(second.profile.body_fat_pct(), Some(24.0));
    assert_eq!(second.profile.goal(), Goal::FatLoss);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);

    let reloaded = database.get_profile(user_id).await?.unwrap();
    assert_eq!(reloaded, second);
    Ok(())
}

#[tokio::test]
async fn test_sex_changes_body_fat() -> Result<()> {
    let database = create_test_database().await?;
    let male = database
        .save_profile(Uuid::new_v4(), sample_profile())
        .await?;
    let female = database
        .save_profile(
            Uuid::new_v4(),
            ProfileInput {
                sex: Sex::Female,
                ..sample_profile()
            },
        )
        .await?;

    assert_eq!(male.profile.bmi(), female.profile.bmi());
    assert_eq!(female.profile.body_fat_pct(), Some(31.1));
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_profile_is_not_stored() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();

    for input in [
        ProfileInput {
            age: 12,
            ..sample_profile()
        },
        ProfileInput {
            weight_kg: 401.0,
            ..sample_profile()
        },
        ProfileInput {
            height_cm: 79,
            ..sample_profile()
        },
        ProfileInput {
            session_minutes: Some(5),
            ..sample_profile()
        },
    ] {
        let error = database.save_profile(user_id, input).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    }
    assert!(database.get_profile(user_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_require_profile_reports_missing_user() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();

    let error = database.require_profile(user_id).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(error.context.user_id, Some(user_id));
    Ok(())
}
