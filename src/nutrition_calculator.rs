// ABOUTME: Macro target derivation: BMR, TDEE, goal-adjusted calories, macro split
// ABOUTME: Pure functions of a NutritionProfile and the nutrition configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: rounded non-negative kcal/grams

use crate::config::EngineConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{MacroTargets, NutritionProfile, Sex};
use tracing::debug;

/// Physiologically plausible input bounds for target derivation
const WEIGHT_RANGE_KG: (f64, f64) = (30.0, 300.0);
const HEIGHT_RANGE_CM: (f64, f64) = (100.0, 250.0);
const AGE_RANGE_YEARS: (u32, u32) = (13, 120);

/// Derives daily calorie and macro targets from an athlete profile.
///
/// Stateless; borrows configuration so repeated derivations share one
/// coefficient set.
pub struct TargetCalculator<'a> {
    config: &'a EngineConfig,
}

impl<'a> TargetCalculator<'a> {
    /// Create a calculator over the given configuration
    #[must_use]
    pub const fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Derive full macro targets for a profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when weight, height, or age fall outside
    /// plausible human ranges.
    pub fn calculate_targets(&self, profile: &NutritionProfile) -> AppResult<MacroTargets> {
        Self::validate_profile(profile)?;

        let bmr = self.basal_metabolic_rate(profile);
        let tdee = bmr * self.config.activity_factors.factor(profile.activity_level);
        let macros = &self.config.macronutrients;

        let adjusted_calories = tdee * (1.0 + macros.calorie_adjustment(profile.goal));

        let protein_per_kg = macros.protein_g_per_kg(profile.goal);
        let protein_g = profile.weight_kg * protein_per_kg;

        let fat_percentage = macros.fat_fraction(profile.goal);
        let fat_g = adjusted_calories * fat_percentage / 9.0;

        // Carbs fill the remaining energy, capped at the goal's per-kg ceiling.
        let carbs_per_kg = macros.carbs_g_per_kg(profile.goal);
        let non_carb_calories = protein_g.mul_add(4.0, fat_g * 9.0);
        let carbs_remainder_g = (adjusted_calories - non_carb_calories) / 4.0;
        let carbs_g = (profile.weight_kg * carbs_per_kg)
            .min(carbs_remainder_g)
            .max(0.0);

        // When the ceiling binds, reconcile calories down to the macro sum so
        // the calorie/macro identity holds; tdee still carries the energy
        // target the derivation started from.
        let calories = protein_g.mul_add(4.0, carbs_g.mul_add(4.0, fat_g * 9.0));
        if calories < adjusted_calories - 1.0 {
            debug!(
                adjusted_calories = adjusted_calories.round(),
                reconciled = calories.round(),
                "carb ceiling bound, calories reconciled to macro sum"
            );
        }

        let fiber_g = calories / 1000.0 * macros.fiber_g_per_1000_kcal;
        let sugar_max_g = calories * macros.sugar_max_calorie_fraction / 4.0;

        Ok(MacroTargets {
            calories: calories.round() as u32,
            protein_g: protein_g.round() as u32,
            carbohydrates_g: carbs_g.round() as u32,
            fat_g: fat_g.round() as u32,
            fiber_g: fiber_g.round() as u32,
            sugar_max_g: sugar_max_g.round() as u32,
            sodium_max_mg: macros.sodium_max_mg,
            protein_per_kg,
            carbs_per_kg,
            fat_percentage,
            bmr,
            tdee,
        })
    }

    /// Harris-Benedict revised BMR for the profile's sex
    #[must_use]
    pub fn basal_metabolic_rate(&self, profile: &NutritionProfile) -> f64 {
        let bmr = &self.config.bmr;
        let age = f64::from(profile.age);
        match profile.sex {
            Sex::Male => bmr.male_age_coef.mul_add(
                -age,
                bmr.male_weight_coef.mul_add(
                    profile.weight_kg,
                    bmr.male_height_coef.mul_add(profile.height_cm, bmr.male_base),
                ),
            ),
            Sex::Female => bmr.female_age_coef.mul_add(
                -age,
                bmr.female_weight_coef.mul_add(
                    profile.weight_kg,
                    bmr.female_height_coef
                        .mul_add(profile.height_cm, bmr.female_base),
                ),
            ),
        }
    }

    /// Daily hydration target in milliliters
    #[must_use]
    pub fn hydration_ml(&self, profile: &NutritionProfile) -> u32 {
        (profile.weight_kg * self.config.hydration.ml_per_kg).round() as u32
    }

    fn validate_profile(profile: &NutritionProfile) -> AppResult<()> {
        if !(WEIGHT_RANGE_KG.0..=WEIGHT_RANGE_KG.1).contains(&profile.weight_kg) {
            return Err(AppError::out_of_range(format!(
                "weight_kg must be between {} and {}, got {}",
                WEIGHT_RANGE_KG.0, WEIGHT_RANGE_KG.1, profile.weight_kg
            )));
        }
        if !(HEIGHT_RANGE_CM.0..=HEIGHT_RANGE_CM.1).contains(&profile.height_cm) {
            return Err(AppError::out_of_range(format!(
                "height_cm must be between {} and {}, got {}",
                HEIGHT_RANGE_CM.0, HEIGHT_RANGE_CM.1, profile.height_cm
            )));
        }
        if !(AGE_RANGE_YEARS.0..=AGE_RANGE_YEARS.1).contains(&profile.age) {
            return Err(AppError::out_of_range(format!(
                "age must be between {} and {}, got {}",
                AGE_RANGE_YEARS.0, AGE_RANGE_YEARS.1, profile.age
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Goal};

    fn profile() -> NutritionProfile {
        NutritionProfile {
            age: 30,
            sex: Sex::Male,
            weight_kg: 80.0,
            height_cm: 180.0,
            activity_level: ActivityLevel::ModeratelyActive,
            goal: Goal::MuscleGain,
            dietary_restrictions: vec![],
            allergies: vec![],
            meals_per_day: 4,
            budget: crate::models::ConstraintLevel::Medium,
            time_constraint: crate::models::ConstraintLevel::Medium,
            cooking_skill: crate::models::CookingSkill::Intermediate,
        }
    }

    #[test]
    fn muscle_gain_targets_for_reference_male() {
        let config = EngineConfig::default();
        let calculator = TargetCalculator::new(&config);
        let p = profile();
        let targets = calculator.calculate_targets(&p).unwrap();

        let expected_bmr =
            5.677f64.mul_add(-30.0, 13.397f64.mul_add(80.0, 4.799f64.mul_add(180.0, 88.362)));
        assert!((targets.bmr - expected_bmr).abs() < 1e-6);
        assert!((targets.tdee - expected_bmr * 1.55).abs() < 1e-6);

        assert_eq!(targets.protein_g, 160); // 80kg * 2.0 g/kg
        assert_eq!(targets.carbohydrates_g, 320); // capped at 80kg * 4 g/kg
        assert_eq!(targets.sodium_max_mg, 2300);
    }

    #[test]
    fn calorie_macro_identity_holds_within_tolerance() {
        let config = EngineConfig::default();
        let calculator = TargetCalculator::new(&config);
        for goal in [
            Goal::FatLoss,
            Goal::MuscleGain,
            Goal::Maintenance,
            Goal::AthleticPerformance,
        ] {
            let mut p = profile();
            p.goal = goal;
            let t = calculator.calculate_targets(&p).unwrap();
            let macro_calories = t.protein_g * 4 + t.carbohydrates_g * 4 + t.fat_g * 9;
            let diff = i64::from(t.calories).abs_diff(i64::from(macro_calories));
            let tolerance = u64::from(t.calories) / 50; // 2%
            assert!(
                diff <= tolerance.max(20),
                "goal {goal:?}: calories {} vs macro sum {macro_calories}",
                t.calories
            );
        }
    }

    #[test]
    fn calories_monotonic_in_activity_level() {
        let config = EngineConfig::default();
        let calculator = TargetCalculator::new(&config);
        let levels = [
            ActivityLevel::Sedentary,
            ActivityLevel::LightlyActive,
            ActivityLevel::ModeratelyActive,
            ActivityLevel::VeryActive,
            ActivityLevel::ExtraActive,
        ];
        let mut previous_calories = 0u32;
        for level in levels {
            let mut p = profile();
            p.goal = Goal::Maintenance;
            p.activity_level = level;
            let t = calculator.calculate_targets(&p).unwrap();
            assert!(
                t.calories >= previous_calories,
                "calories dropped at {level:?}"
            );
            previous_calories = t.calories;
        }
    }

    #[test]
    fn implausible_weight_rejected() {
        let config = EngineConfig::default();
        let calculator = TargetCalculator::new(&config);
        let mut p = profile();
        p.weight_kg = 20.0;
        assert!(calculator.calculate_targets(&p).is_err());
    }

    #[test]
    fn hydration_scales_with_weight() {
        let config = EngineConfig::default();
        let calculator = TargetCalculator::new(&config);
        assert_eq!(calculator.hydration_ml(&profile()), 2800);
    }
}
