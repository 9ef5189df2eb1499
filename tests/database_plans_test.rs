// ABOUTME: Integration tests for training plan storage and the status state machine
// ABOUTME: Covers single active plan per user, demotion on activation and plan expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{create_seeded_database, create_test_database, date, sample_plan};
use fitevolution::errors::ErrorCode;
use fitevolution::intelligence::{ExerciseCatalog, Profile, RuleBasedPlanner};
use fitevolution::models::PlanStatus;
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_get_plan() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();

    let mut new_plan = sample_plan(user_id, PlanStatus::Active);
    new_plan.injury_risk = Some(0.2);
    let plan = database.create_plan(&new_plan).await?;

    assert_eq!(plan.user_id, user_id);
    assert_eq!(plan.status, PlanStatus::Active);
    assert_eq!(plan.start_date, date(2025, 1, 6));
    assert_eq!(plan.injury_risk, Some(0.2));
    assert_eq!(plan.stagnation_risk, None);

    let fetched = database.get_plan(plan.id).await?.unwrap();
    assert_eq!(fetched, plan);
    assert!(database.get_plan(Uuid::new_v4()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_invalid_plan_is_rejected() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();

    let mut backwards = sample_plan(user_id, PlanStatus::Active);
    backwards.end_date = date(2024, 12, 1);
    assert_eq!(
        database.create_plan(&backwards).await.unwrap_err().code,
        ErrorCode::InvalidInput
    );

    let mut risky = sample_plan(user_id, PlanStatus::Active);
    risky.stagnation_risk = Some(1.5);
    assert_eq!(
        database.create_plan(&risky).await.unwrap_err().code,
        ErrorCode::ValueOutOfRange
    );

    let completed = sample_plan(user_id, PlanStatus::Completed);
    assert!(database.create_plan(&completed).await.is_err());
    assert!(database.list_plans(user_id).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_new_active_plan_pauses_previous() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();

    let first = database
        .create_plan(&sample_plan(user_id, PlanStatus::Active))
        .await?;
    let second = database
        .create_plan(&sample_plan(user_id, PlanStatus::Active))
        .await?;

    assert_eq!(
        database.get_plan(first.id).await?.unwrap().status,
        PlanStatus::Paused
    );
    assert_eq!(database.get_active_plan(user_id).await?.unwrap().id, second.id);
    Ok(())
}

#[tokio::test]
async fn test_active_plans_are_per_user() -> Result<()> {
    let database = create_test_database().await?;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let alice_plan = database
        .create_plan(&sample_plan(alice, PlanStatus::Active))
        .await?;
    database
        .create_plan(&sample_plan(bob, PlanStatus::Active))
        .await?;

    assert_eq!(
        database.get_active_plan(alice).await?.unwrap().id,
        alice_plan.id
    );
    assert!(database.get_active_plan(bob).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_paused_plan_does_not_demote() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();

    let active = database
        .create_plan(&sample_plan(user_id, PlanStatus::Active))
        .await?;
    database
        .create_plan(&sample_plan(user_id, PlanStatus::Paused))
        .await?;

    assert_eq!(database.get_active_plan(user_id).await?.unwrap().id, active.id);
    Ok(())
}

#[tokio::test]
async fn test_resuming_plan_pauses_current() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();

    let older = database
        .create_plan(&sample_plan(user_id, PlanStatus::Active))
        .await?;
    let newer = database
        .create_plan(&sample_plan(user_id, PlanStatus::Active))
        .await?;

    let resumed = database.set_plan_status(older.id, PlanStatus::Active).await?;
    assert_eq!(resumed.status, PlanStatus::Active);
    assert_eq!(
        database.get_plan(newer.id).await?.unwrap().status,
        PlanStatus::Paused
    );

    let active: Vec<_> = database
        .list_plans(user_id)
        .await?
        .into_iter()
        .filter(|plan| plan.status == PlanStatus::Active)
        .collect();
    assert_eq!(active.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_status_state_machine() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();
    let plan = database
        .create_plan(&sample_plan(user_id, PlanStatus::Active))
        .await?;

    let error = database
        .set_plan_status(plan.id, PlanStatus::Active)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidTransition);

    let paused = database.set_plan_status(plan.id, PlanStatus::Paused).await?;
    assert_eq!(paused.status, PlanStatus::Paused);

    let error = database
        .set_plan_status(plan.id, PlanStatus::Completed)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidTransition);

    database.set_plan_status(plan.id, PlanStatus::Active).await?;
    let completed = database
        .set_plan_status(plan.id, PlanStatus::Completed)
        .await?;
    assert_eq!(completed.status, PlanStatus::Completed);

    for next in [PlanStatus::Active, PlanStatus::Paused] {
        let error = database.set_plan_status(plan.id, next).await.unwrap_err();
        assert_eq!(error.code, ErrorCode::InvalidTransition);
    }
    Ok(())
}

#[tokio::test]
async fn test_status_change_on_unknown_plan() -> Result<()> {
    let database = create_test_database().await?;
    let error = database
        .set_plan_status(Uuid::new_v4(), PlanStatus::Paused)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}

#[tokio::test]
async fn test_complete_expired_plans() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();
    let other_user = Uuid::new_v4();

    let expiring = database
        .create_plan(&sample_plan(user_id, PlanStatus::Active))
        .await?;
    let paused = database
        .create_plan(&sample_plan(other_user, PlanStatus::Paused))
        .await?;

    // Last day of the plan is still in range
    assert_eq!(database.complete_expired_plans(date(2025, 2, 2)).await?, 0);

    assert_eq!(database.complete_expired_plans(date(2025, 2, 3)).await?, 1);
    assert_eq!(
        database.get_plan(expiring.id).await?.unwrap().status,
        PlanStatus::Completed
    );
    assert_eq!(
        database.get_plan(paused.id).await?.unwrap().status,
        PlanStatus::Paused
    );
    assert!(database.get_active_plan(user_id).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_list_plans_newest_first() -> Result<()> {
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();

    let first = database
        .create_plan(&sample_plan(user_id, PlanStatus::Paused))
        .await?;
    sleep(Duration::from_millis(5)).await;
    let second = database
        .create_plan(&sample_plan(user_id, PlanStatus::Paused))
        .await?;
    database
        .create_plan(&sample_plan(Uuid::new_v4(), PlanStatus::Paused))
        .await?;

    let ids: Vec<Uuid> = database
        .list_plans(user_id)
        .await?
        .into_iter()
        .map(|plan| plan.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
    Ok(())
}

#[tokio::test]
async fn test_create_plan_with_generated_week() -> Result<()> {
    let database = create_seeded_database().await?;
    let user_id = Uuid::new_v4();

    let profile = Profile::new(common::sample_profile())?;
    let week = RuleBasedPlanner::default().generate_plan(&profile, &ExerciseCatalog::builtin(), Some(3));

    let detail = database
        .create_plan_with_week(&sample_plan(user_id, PlanStatus::Active), &week)
        .await?;

    assert_eq!(detail.days.len(), week.len());
    for (day, (index, planned)) in detail.days.iter().zip(week.days()) {
        assert_eq!(day.day.weekday, index);
        assert_eq!(day.day.name, planned.day_name);
        let orders: Vec<u32> = day.exercises.iter().map(|e| e.order).collect();
        let expected: Vec<u32> = (1..=planned.exercises.len() as u32).collect();
        assert_eq!(orders, expected);
        for (stored, assignment) in day.exercises.iter().zip(&planned.exercises) {
            assert_eq!(stored.exercise_id, assignment.exercise_id);
            assert_eq!(stored.sets, assignment.sets);
            assert_eq!(stored.reps, assignment.reps);
        }
    }

    let reloaded = database.get_plan_detail(detail.plan.id).await?;
    assert_eq!(reloaded, detail);
    Ok(())
}

#[tokio::test]
async fn test_failed_week_leaves_nothing_behind() -> Result<()> {
    // Catalog not seeded: exercise foreign keys fail
    let database = create_test_database().await?;
    let user_id = Uuid::new_v4();
    let profile = Profile::new(common::sample_profile())?;
    let week = RuleBasedPlanner::default().generate_plan(&profile, &ExerciseCatalog::builtin(), None);

    let previous = database
        .create_plan(&sample_plan(user_id, PlanStatus::Active))
        .await?;
    assert!(database
        .create_plan_with_week(&sample_plan(user_id, PlanStatus::Active), &week)
        .await
        .is_err());

    let plans = database.list_plans(user_id).await?;
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].id, previous.id);
    assert_eq!(plans[0].status, PlanStatus::Active);
    Ok(())
}

#[tokio::test]
async fn test_save_weekly_plan_into_existing_plan() -> Result<()> {
    let database = create_seeded_database().await?;
    let user_id = Uuid::new_v4();
    let plan = database
        .create_plan(&sample_plan(user_id, PlanStatus::Active))
        .await?;
    let profile = Profile::new(common::sample_profile())?;
    let week = RuleBasedPlanner::default().generate_plan(&profile, &ExerciseCatalog::builtin(), Some(3));

    let days = database.save_weekly_plan(plan.id, &week).await?;
    assert_eq!(days.len(), 3);
    assert_eq!(database.list_training_days(plan.id).await?.len(), 3);

    // Same weekdays again collide
    let error = database.save_weekly_plan(plan.id, &week).await.unwrap_err();
    assert!(error.is_conflict());
    assert_eq!(database.list_training_days(plan.id).await?.len(), 3);

    let error = database
        .save_weekly_plan(Uuid::new_v4(), &week)
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    Ok(())
}
