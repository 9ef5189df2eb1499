// ABOUTME: Configuration error types for planner table validation
// ABOUTME: Defines error variants for invalid ranges, missing tables, and parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! Configuration error types for planner table validation.

use fitevolution_core::errors::{AppError, ErrorCode};
use std::env;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., low bound above high bound)
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// Required configuration entry is missing
    #[error("Missing required entry: {0}")]
    MissingField(String),

    /// A distribution template references a muscle group with no rule
    #[error("Unknown muscle group in template: {0}")]
    UnknownMuscleGroup(String),

    /// Environment variable access or parse error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] env::VarError),

    /// Failed to read or parse configuration value
    #[error("Parse error: {0}")]
    Parse(String),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match &error {
            ConfigError::MissingField(_) | ConfigError::EnvVar(_) => ErrorCode::ConfigMissing,
            _ => ErrorCode::ConfigInvalid,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
