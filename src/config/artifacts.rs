// ABOUTME: Startup loading of planner tables, the configured predictor and the macro model
// ABOUTME: Predictor load failures are logged and leave the rule-based path in charge
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

use super::{AppConfig, ConfigError};
use fitevolution_intelligence::predictors::{LinearParameterModel, NearestNeighborModel};
use fitevolution_intelligence::{MacroModel, NutritionConfig, PlannerConfig, Predictor, PredictorError};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Immutable tables and trained models shared by the services
#[derive(Clone)]
pub struct Artifacts {
    /// Planner lookup tables
    pub planner: Arc<PlannerConfig>,
    /// Nutrition rules
    pub nutrition: Arc<NutritionConfig>,
    /// Predictor for model-assisted planning, when one loaded
    pub predictor: Option<Arc<dyn Predictor>>,
    /// Macro model, when one loaded
    pub macro_model: Option<Arc<MacroModel>>,
}

impl fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Artifacts")
            .field("planner", &self.planner)
            .field("nutrition", &self.nutrition)
            .field("predictor", &self.predictor.as_ref().map(|p| p.name()))
            .field("macro_model", &self.macro_model.is_some())
            .finish()
    }
}

impl Default for Artifacts {
    fn default() -> Self {
        Self {
            planner: Arc::new(PlannerConfig::default()),
            nutrition: Arc::new(NutritionConfig::default()),
            predictor: None,
            macro_model: None,
        }
    }
}

impl Artifacts {
    /// Load everything the configuration names.
    ///
    /// Invalid planner tables are fatal. A predictor or macro model that fails
    /// to load is reported and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the planner tables cannot be read or are inconsistent
    pub fn load(config: &AppConfig) -> Result<Self, ConfigError> {
        let planner = match &config.planner_config {
            Some(path) => {
                let tables = PlannerConfig::from_json_file(path)?;
                info!(path = %path.display(), "Loaded planner tables");
                tables
            }
            None => PlannerConfig::default(),
        };

        let predictor = Self::load_predictor(config).unwrap_or_else(|error| {
            warn!(
                error_kind = error.kind(),
                error = %error,
                "Predictor unavailable, plans will use rule-based generation"
            );
            None
        });

        let macro_model = config.macro_model.as_deref().and_then(|path| {
            MacroModel::load(path)
                .map_err(|error| {
                    warn!(
                        error_kind = error.kind(),
                        error = %error,
                        "Macro model unavailable, using rule-based estimates"
                    );
                })
                .ok()
                .map(Arc::new)
        });

        Ok(Self {
            planner: Arc::new(planner),
            nutrition: Arc::new(NutritionConfig::default()),
            predictor,
            macro_model,
        })
    }

    fn load_predictor(config: &AppConfig) -> Result<Option<Arc<dyn Predictor>>, PredictorError> {
        if let Some(path) = &config.model_artifact {
            let model = LinearParameterModel::load(path)?;
            return Ok(Some(Arc::new(model)));
        }
        if let Some(path) = &config.neighbor_dataset {
            let model = NearestNeighborModel::load(path, config.neighbors)?;
            return Ok(Some(Arc::new(model)));
        }
        Ok(None)
    }
}
