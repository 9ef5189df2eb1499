// ABOUTME: Configuration module for the FitEvolution application
// ABOUTME: Environment settings and startup loading of planner tables and trained artifacts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! Configuration for FitEvolution.
//!
//! - **environment**: `AppConfig` read from environment variables
//! - **artifacts**: planner tables, predictor and macro model loaded once at startup

/// Environment configuration
pub mod environment;

/// Startup loading of tables and trained artifacts
pub mod artifacts;

pub use artifacts::Artifacts;
pub use environment::AppConfig;
pub use fitevolution_intelligence::config::ConfigError;
