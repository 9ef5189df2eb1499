// ABOUTME: Main library entry point for the FitEvolution training planner
// ABOUTME: Wires configuration, logging, SQLite persistence and the plan service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

#![deny(unsafe_code)]

//! # FitEvolution
//!
//! Generates weekly resistance training plans from a user profile and keeps
//! them, together with workout history, in a SQLite database.
//!
//! Plan generation itself lives in `fitevolution-intelligence`; this crate
//! adds what a running application needs around it:
//!
//! - **config**: environment configuration and trained artifact loading
//! - **logging**: `tracing` subscriber setup
//! - **database**: profiles, catalog, plans, days, day exercises, workout logs
//! - **services**: plan generation with rule-based fallback and persistence
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitevolution::config::AppConfig;
//! use fitevolution::database::Database;
//! use fitevolution::services::PlanService;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = AppConfig::from_env()?;
//! let database = Database::new(&config.database_url, config.order_retry_attempts).await?;
//! let service = PlanService::from_config(database, &config)?;
//! # Ok(())
//! # }
//! ```

/// Environment configuration
pub mod config;

/// SQLite persistence
pub mod database;

/// Error types shared with the core crate
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Application services
pub mod services;

pub use fitevolution_core::{constants, models};
pub use fitevolution_intelligence as intelligence;
