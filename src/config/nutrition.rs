// ABOUTME: Nutrition configuration for target derivation and meal planning
// ABOUTME: BMR coefficients, activity factors, goal-driven macro factors, timing distributions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Nutrition configuration.
//!
//! Every coefficient used by target derivation and meal planning lives here
//! so deployments can version them as data assets. `Default` carries the
//! built-in values.
//!
//! # Scientific References
//!
//! - BMR: Harris-Benedict revised coefficients per sex
//! - Activity factors: `McArdle` et al. (2010) - Exercise Physiology
//! - Protein: Phillips & Van Loon (2011) DOI: 10.1080/02640414.2011.619204

use crate::errors::ConfigError;
use crate::models::{ActivityLevel, Goal};
use serde::{Deserialize, Serialize};

/// BMR (Basal Metabolic Rate) formula coefficients, per sex
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Male base constant
    pub male_base: f64,
    /// Male weight coefficient (per kg)
    pub male_weight_coef: f64,
    /// Male height coefficient (per cm)
    pub male_height_coef: f64,
    /// Male age coefficient (per year, subtracted)
    pub male_age_coef: f64,
    /// Female base constant
    pub female_base: f64,
    /// Female weight coefficient (per kg)
    pub female_weight_coef: f64,
    /// Female height coefficient (per cm)
    pub female_height_coef: f64,
    /// Female age coefficient (per year, subtracted)
    pub female_age_coef: f64,
}

impl Default for BmrConfig {
    fn default() -> Self {
        Self {
            male_base: 88.362,
            male_weight_coef: 13.397,
            male_height_coef: 4.799,
            male_age_coef: 5.677,
            female_base: 447.593,
            female_weight_coef: 9.247,
            female_height_coef: 3.098,
            female_age_coef: 4.330,
        }
    }
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Little/no exercise: 1.2
    pub sedentary: f64,
    /// 1-3 days/week: 1.375
    pub lightly_active: f64,
    /// 3-5 days/week: 1.55
    pub moderately_active: f64,
    /// 6-7 days/week: 1.725
    pub very_active: f64,
    /// Hard training 2x/day: 1.9
    pub extra_active: f64,
}

impl Default for ActivityFactorsConfig {
    fn default() -> Self {
        Self {
            sedentary: 1.2,
            lightly_active: 1.375,
            moderately_active: 1.55,
            very_active: 1.725,
            extra_active: 1.9,
        }
    }
}

impl ActivityFactorsConfig {
    /// Multiplier for a given activity level
    #[must_use]
    pub const fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::LightlyActive => self.lightly_active,
            ActivityLevel::ModeratelyActive => self.moderately_active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::ExtraActive => self.extra_active,
        }
    }

    /// Validate that multipliers ascend with activity level
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = [
            self.sedentary,
            self.lightly_active,
            self.moderately_active,
            self.very_active,
            self.extra_active,
        ];
        if ordered.windows(2).any(|w| w[1] < w[0]) {
            return Err(ConfigError::InvalidRange(
                "activity factors must not decrease with activity level",
            ));
        }
        if self.sedentary <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "activity factors must be positive",
            ));
        }
        Ok(())
    }
}

/// Goal-driven calorie and macro factors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacronutrientConfig {
    /// Calorie adjustment for fat loss (fraction of TDEE, negative)
    pub fat_loss_calorie_adjustment: f64,
    /// Calorie adjustment for muscle gain (fraction of TDEE)
    pub muscle_gain_calorie_adjustment: f64,
    /// Calorie adjustment for athletic performance (fraction of TDEE)
    pub athletic_calorie_adjustment: f64,
    /// Protein g/kg for fat loss: 2.2
    pub protein_fat_loss_g_per_kg: f64,
    /// Protein g/kg for muscle gain: 2.0
    pub protein_muscle_gain_g_per_kg: f64,
    /// Protein g/kg for athletic performance: 1.8
    pub protein_athletic_g_per_kg: f64,
    /// Protein g/kg otherwise: 1.6
    pub protein_default_g_per_kg: f64,
    /// Fat share of calories for fat loss: 0.25
    pub fat_loss_fat_fraction: f64,
    /// Fat share of calories otherwise: 0.30
    pub default_fat_fraction: f64,
    /// Carb ceiling g/kg for athletic performance: 6
    pub carbs_athletic_g_per_kg: f64,
    /// Carb ceiling g/kg for muscle gain: 4
    pub carbs_muscle_gain_g_per_kg: f64,
    /// Carb ceiling g/kg otherwise: 3
    pub carbs_default_g_per_kg: f64,
    /// Fiber grams per 1000 kcal: 14
    pub fiber_g_per_1000_kcal: f64,
    /// Added-sugar ceiling as a fraction of calories: 0.10
    pub sugar_max_calorie_fraction: f64,
    /// Sodium ceiling in mg: 2300
    pub sodium_max_mg: u32,
}

impl Default for MacronutrientConfig {
    fn default() -> Self {
        Self {
            fat_loss_calorie_adjustment: -0.20,
            muscle_gain_calorie_adjustment: 0.10,
            athletic_calorie_adjustment: 0.05,
            protein_fat_loss_g_per_kg: 2.2,
            protein_muscle_gain_g_per_kg: 2.0,
            protein_athletic_g_per_kg: 1.8,
            protein_default_g_per_kg: 1.6,
            fat_loss_fat_fraction: 0.25,
            default_fat_fraction: 0.30,
            carbs_athletic_g_per_kg: 6.0,
            carbs_muscle_gain_g_per_kg: 4.0,
            carbs_default_g_per_kg: 3.0,
            fiber_g_per_1000_kcal: 14.0,
            sugar_max_calorie_fraction: 0.10,
            sodium_max_mg: 2300,
        }
    }
}

impl MacronutrientConfig {
    /// Calorie adjustment fraction for a goal
    #[must_use]
    pub const fn calorie_adjustment(&self, goal: Goal) -> f64 {
        match goal {
            Goal::FatLoss => self.fat_loss_calorie_adjustment,
            Goal::MuscleGain => self.muscle_gain_calorie_adjustment,
            Goal::Maintenance => 0.0,
            Goal::AthleticPerformance => self.athletic_calorie_adjustment,
        }
    }

    /// Protein factor (g/kg) for a goal
    #[must_use]
    pub const fn protein_g_per_kg(&self, goal: Goal) -> f64 {
        match goal {
            Goal::FatLoss => self.protein_fat_loss_g_per_kg,
            Goal::MuscleGain => self.protein_muscle_gain_g_per_kg,
            Goal::AthleticPerformance => self.protein_athletic_g_per_kg,
            Goal::Maintenance => self.protein_default_g_per_kg,
        }
    }

    /// Fat share of calories for a goal
    #[must_use]
    pub const fn fat_fraction(&self, goal: Goal) -> f64 {
        match goal {
            Goal::FatLoss => self.fat_loss_fat_fraction,
            _ => self.default_fat_fraction,
        }
    }

    /// Carbohydrate ceiling (g/kg) for a goal
    #[must_use]
    pub const fn carbs_g_per_kg(&self, goal: Goal) -> f64 {
        match goal {
            Goal::AthleticPerformance => self.carbs_athletic_g_per_kg,
            Goal::MuscleGain => self.carbs_muscle_gain_g_per_kg,
            _ => self.carbs_default_g_per_kg,
        }
    }

    /// Validate fractions and factors
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.fat_loss_fat_fraction)
            || !(0.0..=1.0).contains(&self.default_fat_fraction)
        {
            return Err(ConfigError::InvalidRange(
                "fat fractions must be between 0 and 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.sugar_max_calorie_fraction) {
            return Err(ConfigError::InvalidRange(
                "sugar fraction must be between 0 and 1",
            ));
        }
        if self.protein_default_g_per_kg <= 0.0 || self.carbs_default_g_per_kg <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "macro factors must be positive",
            ));
        }
        Ok(())
    }
}

/// Hydration targeting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydrationConfig {
    /// Daily water target per kg of body weight, in mL: 35
    pub ml_per_kg: f64,
}

impl Default for HydrationConfig {
    fn default() -> Self {
        Self { ml_per_kg: 35.0 }
    }
}

/// Calorie distribution across meal slots for a given meal count
///
/// Percentages always sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealDistributionConfig {
    /// Three-meal split
    pub three_meals: Vec<u8>,
    /// Four-meal split
    pub four_meals: Vec<u8>,
    /// Five-meal split
    pub five_meals: Vec<u8>,
    /// Split used when the goal forces intermittent fasting (3 slots)
    pub fasting_meals: Vec<u8>,
    /// Split used for the athlete strategy (5 slots)
    pub athlete_meals: Vec<u8>,
}

impl Default for MealDistributionConfig {
    fn default() -> Self {
        Self {
            three_meals: vec![35, 40, 25],
            four_meals: vec![25, 35, 30, 10],
            five_meals: vec![20, 30, 25, 15, 10],
            fasting_meals: vec![40, 35, 25],
            athlete_meals: vec![20, 25, 20, 25, 10],
        }
    }
}

impl MealDistributionConfig {
    /// Validate every split sums to 100 and has 3-5 slots
    pub fn validate(&self) -> Result<(), ConfigError> {
        let splits = [
            ("three_meals", &self.three_meals),
            ("four_meals", &self.four_meals),
            ("five_meals", &self.five_meals),
            ("fasting_meals", &self.fasting_meals),
            ("athlete_meals", &self.athlete_meals),
        ];
        for (name, split) in splits {
            if !(3..=5).contains(&split.len()) {
                return Err(ConfigError::InvalidWeights(format!(
                    "{name} must have 3-5 slots, got {}",
                    split.len()
                )));
            }
            let sum: u32 = split.iter().map(|p| u32::from(*p)).sum();
            if sum != 100 {
                return Err(ConfigError::InvalidWeights(format!(
                    "{name} must sum to 100, got {sum}"
                )));
            }
        }
        Ok(())
    }
}

/// Allocator tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Minimum usable fraction of a serving; candidates below this are skipped: 0.1
    pub min_serving_fraction: f64,
    /// Maximum alternatives fetched per selected food: 3
    pub max_alternatives: usize,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            min_serving_fraction: 0.1,
            max_alternatives: 3,
        }
    }
}

impl AllocatorConfig {
    /// Validate the serving floor is a usable fraction
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_serving_fraction) {
            return Err(ConfigError::InvalidRange(
                "min_serving_fraction must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_distributions_validate() {
        assert!(MealDistributionConfig::default().validate().is_ok());
    }

    #[test]
    fn distribution_not_summing_to_100_rejected() {
        let config = MealDistributionConfig {
            four_meals: vec![25, 35, 30, 15],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn distribution_with_too_many_slots_rejected() {
        let config = MealDistributionConfig {
            five_meals: vec![20, 20, 20, 20, 10, 10],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn descending_activity_factors_rejected() {
        let config = ActivityFactorsConfig {
            very_active: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn activity_factors_ascend_by_level() {
        let config = ActivityFactorsConfig::default();
        assert!(config.factor(ActivityLevel::Sedentary) < config.factor(ActivityLevel::ExtraActive));
    }

    #[test]
    fn goal_factors_match_built_ins() {
        let config = MacronutrientConfig::default();
        assert!((config.protein_g_per_kg(Goal::FatLoss) - 2.2).abs() < f64::EPSILON);
        assert!((config.carbs_g_per_kg(Goal::AthleticPerformance) - 6.0).abs() < f64::EPSILON);
        assert!((config.fat_fraction(Goal::FatLoss) - 0.25).abs() < f64::EPSILON);
        assert!((config.calorie_adjustment(Goal::Maintenance)).abs() < f64::EPSILON);
    }
}
