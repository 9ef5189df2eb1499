// ABOUTME: Nutrition rule configuration for rule-based macronutrient estimates
// ABOUTME: Mifflin-St Jeor coefficients, activity factors, goal calorie adjustments, protein targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitEvolution

//! Nutrition Configuration
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Protein: Phillips & Van Loon (2011) DOI: 10.1080/02640414.2011.619204

use super::ConfigError;
use fitevolution_core::models::{ActivityLevel, Goal};
use serde::{Deserialize, Serialize};

/// Rule-based macronutrient estimation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Basal metabolic rate formula coefficients
    pub bmr: BmrConfig,
    /// Multipliers turning BMR into daily expenditure
    pub activity_factors: ActivityFactorsConfig,
    /// Calorie adjustment and protein target per goal
    pub goals: GoalNutritionConfig,
    /// Share of daily calories coming from fat
    pub fat_fraction_of_calories: FatFraction,
}

/// Mifflin-St Jeor coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Male constant (+5)
    pub msj_male_constant: f64,
    /// Female constant (-161)
    pub msj_female_constant: f64,
    /// Floor applied to the computed BMR (kcal/day)
    pub min_bmr_kcal: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            min_bmr_kcal: 1000.0,
        }
    }
}

/// Activity factor multipliers for total daily energy expenditure
///
/// Reference: `McArdle`, W.D., Katch, F.I., & Katch, V.L. (2010). Exercise Physiology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Light: 1.375
    pub light: f64,
    /// Moderate: 1.55
    pub moderate: f64,
    /// Intense: 1.725
    pub intense: f64,
}

impl ActivityFactorsConfig {
    /// Factor for an activity level
    #[must_use]
    pub const fn get(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Intense => self.intense,
        }
    }
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            light: 1.375,
            moderate: 1.55,
            intense: 1.725,
        }
    }
}

/// Calorie adjustment and protein target for one goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalNutrition {
    /// Relative calorie adjustment applied to expenditure (-0.2 = 20 % deficit)
    pub calorie_adjustment: f64,
    /// Protein grams per kilogram of body weight
    pub protein_g_per_kg: f64,
}

/// Per-goal nutrition targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalNutritionConfig {
    /// Fat loss: 20 % deficit, 2.2 g/kg protein
    pub fat_loss: GoalNutrition,
    /// Recomposition: maintenance, 2.0 g/kg protein
    pub recomposition: GoalNutrition,
    /// Hypertrophy: 10 % surplus, 1.8 g/kg protein
    pub hypertrophy: GoalNutrition,
}

impl GoalNutritionConfig {
    /// Targets for a goal
    #[must_use]
    pub const fn get(&self, goal: Goal) -> GoalNutrition {
        match goal {
            Goal::FatLoss => self.fat_loss,
            Goal::Recomposition => self.recomposition,
            Goal::Hypertrophy => self.hypertrophy,
        }
    }
}

impl Default for GoalNutritionConfig {
    fn default() -> Self {
        Self {
            fat_loss: GoalNutrition {
                calorie_adjustment: -0.20,
                protein_g_per_kg: 2.2,
            },
            recomposition: GoalNutrition {
                calorie_adjustment: 0.0,
                protein_g_per_kg: 2.0,
            },
            hypertrophy: GoalNutrition {
                calorie_adjustment: 0.10,
                protein_g_per_kg: 1.8,
            },
        }
    }
}

/// Fraction of calories assigned to fat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FatFraction(pub f64);

impl Default for FatFraction {
    fn default() -> Self {
        Self(0.25)
    }
}

impl NutritionConfig {
    /// Validate factor and fraction ranges
    ///
    /// # Errors
    ///
    /// Returns an error when a factor is not positive or a fraction is outside 0-1
    pub fn validate(&self) -> Result<(), ConfigError> {
        for level in ActivityLevel::ALL {
            if self.activity_factors.get(level) <= 0.0 {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "activity factor for {level} must be positive"
                )));
            }
        }
        for goal in Goal::ALL {
            let targets = self.goals.get(goal);
            if !(-1.0..=1.0).contains(&targets.calorie_adjustment) {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "calorie adjustment for {goal} must be within -1.0-1.0"
                )));
            }
            if targets.protein_g_per_kg < 0.0 {
                return Err(ConfigError::ValueOutOfRange(format!(
                    "protein target for {goal} must not be negative"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.fat_fraction_of_calories.0) {
            return Err(ConfigError::ValueOutOfRange(
                "fat fraction must be within 0.0-1.0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        NutritionConfig::default().validate().unwrap();
    }

    #[test]
    fn test_negative_factor_rejected() {
        let mut config = NutritionConfig::default();
        config.activity_factors.light = 0.0;
        assert!(config.validate().is_err());
    }
}
