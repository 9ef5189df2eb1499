// ABOUTME: Environment-based application configuration
// ABOUTME: Reads database URL, artifact paths, retry bound and neighbor count with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::ConfigError;
use crate::constants::plan_limits;
use fitevolution_intelligence::predictors::neighbors::DEFAULT_NEIGHBORS;
use std::env::{self, VarError};
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::info;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/fitevolution.db";

/// Environment variable names
pub mod env_keys {
    /// Database connection URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Linear parameter model artifact
    pub const MODEL_ARTIFACT: &str = "FITEVOLUTION_MODEL_ARTIFACT";
    /// Nearest-neighbor dataset artifact
    pub const NEIGHBOR_DATASET: &str = "FITEVOLUTION_NEIGHBOR_DATASET";
    /// Macro model artifact
    pub const MACRO_MODEL: &str = "FITEVOLUTION_MACRO_MODEL";
    /// JSON file replacing the default planner tables
    pub const PLANNER_CONFIG: &str = "FITEVOLUTION_PLANNER_CONFIG";
    /// Attempts for automatic day-exercise ordering
    pub const ORDER_RETRY_ATTEMPTS: &str = "FITEVOLUTION_ORDER_RETRY_ATTEMPTS";
    /// Neighbors consulted by the nearest-neighbor predictor
    pub const NEIGHBORS: &str = "FITEVOLUTION_NEIGHBORS";
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite connection URL
    pub database_url: String,
    /// Linear parameter model artifact path
    pub model_artifact: Option<PathBuf>,
    /// Nearest-neighbor dataset artifact path
    pub neighbor_dataset: Option<PathBuf>,
    /// Macro model artifact path
    pub macro_model: Option<PathBuf>,
    /// Planner tables replacing the defaults
    pub planner_config: Option<PathBuf>,
    /// Insert attempts when assigning day-exercise order automatically
    pub order_retry_attempts: u32,
    /// k for the nearest-neighbor predictor
    pub neighbors: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_owned(),
            model_artifact: None,
            neighbor_dataset: None,
            macro_model: None,
            planner_config: None,
            order_retry_attempts: plan_limits::DEFAULT_ORDER_RETRY_ATTEMPTS,
            neighbors: DEFAULT_NEIGHBORS,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is not valid unicode, does not parse,
    /// or fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            database_url: optional_var(env_keys::DATABASE_URL)?
                .unwrap_or(defaults.database_url),
            model_artifact: optional_var(env_keys::MODEL_ARTIFACT)?.map(PathBuf::from),
            neighbor_dataset: optional_var(env_keys::NEIGHBOR_DATASET)?.map(PathBuf::from),
            macro_model: optional_var(env_keys::MACRO_MODEL)?.map(PathBuf::from),
            planner_config: optional_var(env_keys::PLANNER_CONFIG)?.map(PathBuf::from),
            order_retry_attempts: parsed_var(env_keys::ORDER_RETRY_ATTEMPTS)?
                .unwrap_or(defaults.order_retry_attempts),
            neighbors: parsed_var(env_keys::NEIGHBORS)?.unwrap_or(defaults.neighbors),
        };

        config.validate()?;
        info!(
            database_url = %config.database_url,
            predictor = config.predictor_label(),
            macro_model = config.macro_model.is_some(),
            order_retry_attempts = config.order_retry_attempts,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for an out-of-range retry bound or neighbor count, or
    /// when both predictor artifacts are configured
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=plan_limits::MAX_ORDER_RETRY_ATTEMPTS).contains(&self.order_retry_attempts) {
            return Err(ConfigError::ValueOutOfRange(format!(
                "{} must be between 1 and {}, got {}",
                env_keys::ORDER_RETRY_ATTEMPTS,
                plan_limits::MAX_ORDER_RETRY_ATTEMPTS,
                self.order_retry_attempts
            )));
        }
        if self.neighbors == 0 {
            return Err(ConfigError::ValueOutOfRange(format!(
                "{} must be at least 1",
                env_keys::NEIGHBORS
            )));
        }
        if self.model_artifact.is_some() && self.neighbor_dataset.is_some() {
            return Err(ConfigError::InvalidRange(format!(
                "{} and {} are mutually exclusive",
                env_keys::MODEL_ARTIFACT,
                env_keys::NEIGHBOR_DATASET
            )));
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::MissingField(env_keys::DATABASE_URL.to_owned()));
        }
        Ok(())
    }

    /// Which predictor the configuration selects
    #[must_use]
    pub const fn predictor_label(&self) -> &'static str {
        match (&self.model_artifact, &self.neighbor_dataset) {
            (Some(_), _) => "linear_parameters",
            (None, Some(_)) => "nearest_neighbors",
            (None, None) => "none",
        }
    }
}

/// Read a variable; unset or empty is `None`
fn optional_var(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parsed_var<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    optional_var(key)?
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| ConfigError::Parse(format!("{key}='{raw}': {e}")))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.order_retry_attempts, 3);
        assert_eq!(config.predictor_label(), "none");
    }

    #[test]
    fn test_retry_bound_validation() {
        for attempts in [0, 11] {
            let config = AppConfig {
                order_retry_attempts: attempts,
                ..AppConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::ValueOutOfRange(_))
            ));
        }
    }

    #[test]
    fn test_predictor_artifacts_are_exclusive() {
        let config = AppConfig {
            model_artifact: Some(PathBuf::from("linear.json")),
            neighbor_dataset: Some(PathBuf::from("neighbors.json")),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
