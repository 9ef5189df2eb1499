// ABOUTME: SQLite persistence for profiles, the exercise catalog, training plans and workout history
// ABOUTME: Owns the connection pool and bootstraps every table on connect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! # Database
//!
//! Operations are grouped by table in submodules, each adding methods to
//! [`Database`]. Tables are created with `CREATE TABLE IF NOT EXISTS` every time
//! a connection pool is opened; there is no separate migration step.
//!
//! Identifiers of user-owned rows are UUIDs and timestamps are RFC 3339 text.
//! Dates are ISO `YYYY-MM-DD` text, so lexical comparison orders them.

mod catalog;
mod days;
mod history;
mod plans;
mod profiles;

pub use plans::{DayDetail, PlanDetail};

use crate::constants::plan_limits;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

/// Pool size for file databases
const FILE_POOL_CONNECTIONS: u32 = 5;

/// Database manager for all FitEvolution tables
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
    order_retry_attempts: u32,
}

impl Database {
    /// Open (creating if needed) the database and bootstrap its tables.
    ///
    /// In-memory URLs use a single long-lived connection so every query sees
    /// the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the file cannot be created, or
    /// table creation fails
    pub async fn new(database_url: &str, order_retry_attempts: u32) -> AppResult<Self> {
        if !(1..=plan_limits::MAX_ORDER_RETRY_ATTEMPTS).contains(&order_retry_attempts) {
            return Err(AppError::value_out_of_range(
                "order_retry_attempts",
                order_retry_attempts,
                1.0,
                f64::from(plan_limits::MAX_ORDER_RETRY_ATTEMPTS),
            ));
        }

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL '{database_url}': {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            create_parent_dir(options.get_filename()).await?;
            SqlitePoolOptions::new().max_connections(FILE_POOL_CONNECTIONS)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open {database_url}: {e}")))?;

        let db = Self {
            pool,
            order_retry_attempts,
        };
        db.migrate().await?;
        info!(database_url, in_memory, "Database ready");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Attempts made when assigning a day-exercise order automatically
    #[must_use]
    pub const fn order_retry_attempts(&self) -> u32 {
        self.order_retry_attempts
    }

    /// Create all tables and indexes
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_profiles().await?;
        self.migrate_catalog().await?;
        self.migrate_plans().await?;
        self.migrate_days().await?;
        self.migrate_history().await?;
        debug!("Database tables bootstrapped");
        Ok(())
    }

    /// Close the pool, waiting for connections to be returned
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn create_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::database(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}

pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))
}

pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| AppError::internal(format!("Invalid datetime: {e}")))?
        .with_timezone(&Utc))
}

pub(crate) fn parse_date(value: &str) -> AppResult<NaiveDate> {
    value
        .parse()
        .map_err(|e| AppError::internal(format!("Invalid date '{value}': {e}")))
}
