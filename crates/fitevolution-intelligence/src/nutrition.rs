// ABOUTME: Daily macronutrient targets from a trained linear model or Mifflin-St Jeor rules
// ABOUTME: Model failures fall back to the rule-based estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! # Macronutrient Recommendations
//!
//! The rule-based estimate:
//!
//! ```text
//! BMR      = 10 × weight + 6.25 × height − 5 × age + (5 | −161)
//! calories = BMR × activity factor × (1 + goal adjustment)
//! protein  = weight × goal g/kg
//! fat      = calories × fat fraction / 9
//! carbs    = remaining calories / 4
//! ```

use crate::body_composition::Profile;
use crate::config::NutritionConfig;
use crate::predictors::artifact::{
    check_columns, read_json_artifact, CategoricalEncoders, StandardScaler,
};
use crate::predictors::{PredictorError, DEFAULT_SESSION_MINUTES};
use crate::rounding::round_to;
use fitevolution_core::models::Sex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column order of the macro model
pub const MACRO_FEATURE_COLUMNS: [&str; MACRO_FEATURE_COUNT] = [
    "age",
    "sex",
    "weight_kg",
    "height_m",
    "days_per_week",
    "session_hours",
    "experience",
    "goal",
    "body_fat_pct",
    "lean_mass_kg",
];

/// Number of macro model features
pub const MACRO_FEATURE_COUNT: usize = 10;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// How a recommendation was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroSource {
    /// Trained macro model
    Model,
    /// Mifflin-St Jeor rules
    Rules,
}

/// Daily macronutrient targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Protein grams
    pub protein_g: f64,
    /// Carbohydrate grams
    pub carbs_g: f64,
    /// Fat grams
    pub fat_g: f64,
    /// Energy in kcal
    pub calories: f64,
    /// Producer of the targets
    pub source: MacroSource,
}

/// Raw macro model inputs
#[derive(Debug, Clone, PartialEq)]
pub struct MacroFeatures {
    /// Age in years
    pub age: f64,
    /// Sex label ("M" or "F")
    pub sex: &'static str,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in meters
    pub height_m: f64,
    /// Training days per week
    pub days_per_week: f64,
    /// Session length in hours
    pub session_hours: f64,
    /// Experience label
    pub experience: &'static str,
    /// Goal label
    pub goal: &'static str,
    /// Body fat percentage, imputed when absent
    pub body_fat_pct: Option<f64>,
    /// Lean mass in kilograms, imputed when absent
    pub lean_mass_kg: Option<f64>,
}

impl MacroFeatures {
    /// Build features from a profile and planned weekly frequency
    #[must_use]
    pub fn from_profile(profile: &Profile, days_per_week: u8) -> Self {
        let session_minutes = profile
            .session_minutes()
            .unwrap_or(DEFAULT_SESSION_MINUTES);
        let body_fat_pct = profile.body_fat_pct();
        Self {
            age: f64::from(profile.age()),
            sex: profile.sex().as_str(),
            weight_kg: profile.weight_kg(),
            height_m: f64::from(profile.height_cm()) / 100.0,
            days_per_week: f64::from(days_per_week),
            session_hours: f64::from(session_minutes) / 60.0,
            experience: profile.activity_level().experience().as_str(),
            goal: profile.goal().as_str(),
            body_fat_pct,
            lean_mass_kg: body_fat_pct
                .map(|pct| round_to(profile.weight_kg() * (1.0 - pct / 100.0), 1)),
        }
    }
}

/// Medians used to impute optional features
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroMedians {
    /// Median body fat percentage of the training set
    pub body_fat_pct: f64,
    /// Median lean mass of the training set
    pub lean_mass_kg: f64,
}

/// Serialized form of a [`MacroModel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroModelArtifact {
    /// Feature columns the model was trained with
    pub feature_columns: Vec<String>,
    /// Fitted categorical encoders
    pub encoders: CategoricalEncoders,
    /// Fitted scaler over all feature columns
    pub scaler: StandardScaler,
    /// Imputation medians
    pub medians: MacroMedians,
    /// Coefficient rows for protein, carbs and fat grams
    pub coefficients: Vec<Vec<f64>>,
    /// Intercepts for protein, carbs and fat grams
    pub intercepts: Vec<f64>,
}

/// Linear macro model
#[derive(Debug, Clone)]
pub struct MacroModel {
    encoders: CategoricalEncoders,
    scaler: StandardScaler,
    medians: MacroMedians,
    coefficients: [[f64; MACRO_FEATURE_COUNT]; 3],
    intercepts: [f64; 3],
}

impl MacroModel {
    /// Validate an artifact and build the model
    ///
    /// # Errors
    ///
    /// Returns `FeatureMismatch` for a different column order and
    /// `ArtifactFormat` for wrongly shaped matrices
    pub fn from_artifact(artifact: MacroModelArtifact) -> Result<Self, PredictorError> {
        check_columns(&artifact.feature_columns, &MACRO_FEATURE_COLUMNS)?;
        artifact.scaler.check_width(MACRO_FEATURE_COUNT)?;

        let shape_error = || {
            PredictorError::ArtifactFormat(format!(
                "macro model needs 3 coefficient rows of {MACRO_FEATURE_COUNT} values and 3 intercepts"
            ))
        };
        if artifact.coefficients.len() != 3 {
            return Err(shape_error());
        }
        let mut coefficients = [[0.0; MACRO_FEATURE_COUNT]; 3];
        for (target, row) in coefficients.iter_mut().zip(&artifact.coefficients) {
            *target = row.as_slice().try_into().map_err(|_| shape_error())?;
        }
        let intercepts = artifact
            .intercepts
            .as_slice()
            .try_into()
            .map_err(|_| shape_error())?;

        Ok(Self {
            encoders: artifact.encoders,
            scaler: artifact.scaler,
            medians: artifact.medians,
            coefficients,
            intercepts,
        })
    }

    /// Load from a JSON artifact file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails validation
    pub fn load(path: &Path) -> Result<Self, PredictorError> {
        let model = Self::from_artifact(read_json_artifact(path)?)?;
        tracing::info!(path = %path.display(), "Loaded macro model");
        Ok(model)
    }

    /// Predict targets; negative outputs are floored at zero
    ///
    /// # Errors
    ///
    /// Returns an error for unknown categories or non-finite outputs
    pub fn predict(&self, features: &MacroFeatures) -> Result<MacroTargets, PredictorError> {
        let values = [
            features.age,
            self.encoders.sex.encode("sex", features.sex)?,
            features.weight_kg,
            features.height_m,
            features.days_per_week,
            features.session_hours,
            self.encoders
                .experience
                .encode("experience", features.experience)?,
            self.encoders.goal.encode("goal", features.goal)?,
            features.body_fat_pct.unwrap_or(self.medians.body_fat_pct),
            features.lean_mass_kg.unwrap_or(self.medians.lean_mass_kg),
        ];
        let scaled = self.scaler.transform(&values)?;

        let mut outputs = self.intercepts;
        for (output, row) in outputs.iter_mut().zip(&self.coefficients) {
            *output += row.iter().zip(&scaled).map(|(c, x)| c * x).sum::<f64>();
        }
        if outputs.iter().any(|v| !v.is_finite()) {
            return Err(PredictorError::Inference(
                "macro model produced a non-finite output".into(),
            ));
        }
        let [protein, carbs, fat] = outputs.map(|grams| grams.max(0.0));
        Ok(targets(protein, carbs, fat, MacroSource::Model))
    }
}

fn targets(protein_g: f64, carbs_g: f64, fat_g: f64, source: MacroSource) -> MacroTargets {
    let calories = fat_g.mul_add(
        KCAL_PER_G_FAT,
        protein_g.mul_add(KCAL_PER_G_PROTEIN, carbs_g * KCAL_PER_G_CARBS),
    );
    MacroTargets {
        protein_g: round_to(protein_g, 1),
        carbs_g: round_to(carbs_g, 1),
        fat_g: round_to(fat_g, 1),
        calories: calories.round(),
        source,
    }
}

/// Rule-based targets from Mifflin-St Jeor expenditure
#[must_use]
pub fn estimate_macros(profile: &Profile, config: &NutritionConfig) -> MacroTargets {
    let bmr_config = &config.bmr;
    let sex_constant = match profile.sex() {
        Sex::Male => bmr_config.msj_male_constant,
        Sex::Female => bmr_config.msj_female_constant,
    };
    let bmr = (bmr_config.msj_weight_coef * profile.weight_kg()
        + bmr_config.msj_height_coef * f64::from(profile.height_cm())
        + bmr_config.msj_age_coef * f64::from(profile.age())
        + sex_constant)
        .max(bmr_config.min_bmr_kcal);

    let expenditure = bmr * config.activity_factors.get(profile.activity_level());
    let goal = config.goals.get(profile.goal());
    let calories = expenditure * (1.0 + goal.calorie_adjustment);

    let protein_g = profile.weight_kg() * goal.protein_g_per_kg;
    let fat_g = calories * config.fat_fraction_of_calories.0 / KCAL_PER_G_FAT;
    let carbs_g = ((calories - protein_g * KCAL_PER_G_PROTEIN - fat_g * KCAL_PER_G_FAT)
        / KCAL_PER_G_CARBS)
        .max(0.0);

    targets(protein_g, carbs_g, fat_g, MacroSource::Rules)
}

/// Model targets when a model is available and succeeds, rule-based otherwise
#[must_use]
pub fn recommend_macros(
    profile: &Profile,
    days_per_week: u8,
    model: Option<&MacroModel>,
    config: &NutritionConfig,
) -> MacroTargets {
    if let Some(model) = model {
        match model.predict(&MacroFeatures::from_profile(profile, days_per_week)) {
            Ok(targets) => return targets,
            Err(error) => {
                tracing::warn!(
                    error_kind = error.kind(),
                    error = %error,
                    "Macro model unavailable, using rule-based estimate"
                );
            }
        }
    }
    estimate_macros(profile, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fitevolution_core::models::{ActivityLevel, Goal, ProfileInput};

    fn profile() -> Profile {
        Profile::new(ProfileInput {
            age: 30,
            sex: Sex::Male,
            weight_kg: 80.0,
            height_cm: 180,
            activity_level: ActivityLevel::Moderate,
            goal: Goal::Hypertrophy,
            session_minutes: Some(60),
        })
        .unwrap()
    }

    #[test]
    fn test_rule_estimate() {
        let targets = estimate_macros(&profile(), &NutritionConfig::default());
        assert_eq!(targets.source, MacroSource::Rules);
        assert!((targets.protein_g - 144.0).abs() < 1e-9);
        assert!((targets.fat_g - 84.3).abs() < 1e-9);
        assert!((targets.calories - 3035.0).abs() < 1e-9);
    }

    #[test]
    fn test_lean_mass_derived_from_body_fat() {
        let features = MacroFeatures::from_profile(&profile(), 4);
        // 80 kg at 20.3 % body fat
        assert_eq!(features.lean_mass_kg, Some(63.8));
        assert!((features.session_hours - 1.0).abs() < f64::EPSILON);
    }
}
