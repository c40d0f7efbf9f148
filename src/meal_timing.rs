// ABOUTME: Meal timing strategy selection: named strategy, eating window, calorie distribution
// ABOUTME: Pure lookup/override table over profile goal, constraints, and workout times
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::config::EngineConfig;
use crate::models::{ConstraintLevel, Goal, NutritionProfile};
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Named meal-timing strategies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimingStrategy {
    /// Regular meal spacing through the day
    Standard,
    /// Compressed eating window
    IntermittentFasting,
    /// Training-centric meal placement with extra slots
    Athlete,
    /// Meals anchored to a night-shift schedule
    ShiftWorker,
}

/// Daily eating window in local clock hours
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EatingWindow {
    /// First eating hour (inclusive, 0-23)
    pub start_hour: u8,
    /// Last eating hour (exclusive, 0-23)
    pub end_hour: u8,
}

/// Macro percentage split for a peri-workout meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroSplit {
    /// Carbohydrate share of the meal's calories
    pub carbohydrates_percent: u8,
    /// Protein share of the meal's calories
    pub protein_percent: u8,
    /// Fat share of the meal's calories
    pub fat_percent: u8,
}

/// Carb-forward split ahead of training
const PRE_WORKOUT_SPLIT: MacroSplit = MacroSplit {
    carbohydrates_percent: 50,
    protein_percent: 25,
    fat_percent: 25,
};

/// Recovery split after training
const POST_WORKOUT_SPLIT: MacroSplit = MacroSplit {
    carbohydrates_percent: 40,
    protein_percent: 40,
    fat_percent: 20,
};

/// Night-shift window: workouts starting at or after this hour flag shift work
const NIGHT_SHIFT_START_HOUR: u32 = 21;
/// Night-shift window: workouts starting at or before this hour flag shift work
const NIGHT_SHIFT_END_HOUR: u32 = 5;

/// Complete meal-timing recommendation for one athlete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealTimingStrategy {
    /// Selected strategy
    pub strategy: TimingStrategy,
    /// Eating window, when the strategy compresses one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eating_window: Option<EatingWindow>,
    /// Suggested macro split for the pre-workout meal
    pub pre_workout: MacroSplit,
    /// Suggested macro split for the post-workout meal
    pub post_workout: MacroSplit,
    /// Calorie percentage per meal slot, 3-5 slots summing to 100
    pub meal_distribution: Vec<u8>,
}

/// Selects a meal-timing strategy from profile and recent workout times.
///
/// Deterministic given inputs: the same profile and workout history always
/// produce the same strategy.
pub struct MealTimingPlanner<'a> {
    config: &'a EngineConfig,
}

impl<'a> MealTimingPlanner<'a> {
    /// Create a planner over the given configuration
    #[must_use]
    pub const fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Build the timing strategy for a profile.
    ///
    /// Overrides apply in order: goal picks the strategy and distribution,
    /// night-shift workout times rename the strategy, a high time constraint
    /// collapses the distribution to three meals.
    #[must_use]
    pub fn plan(
        &self,
        profile: &NutritionProfile,
        workout_times: &[DateTime<Utc>],
    ) -> MealTimingStrategy {
        let distributions = &self.config.meal_distributions;

        let (mut strategy, mut eating_window, mut distribution) = match profile.goal {
            Goal::FatLoss => (
                TimingStrategy::IntermittentFasting,
                Some(EatingWindow {
                    start_hour: 12,
                    end_hour: 20,
                }),
                distributions.fasting_meals.clone(),
            ),
            Goal::AthleticPerformance => (
                TimingStrategy::Athlete,
                None,
                distributions.athlete_meals.clone(),
            ),
            Goal::MuscleGain | Goal::Maintenance => (
                TimingStrategy::Standard,
                None,
                Self::distribution_for_count(distributions, profile.meals_per_day),
            ),
        };

        if Self::trains_night_shift(workout_times) {
            debug!(strategy = ?strategy, "night-shift workout times, switching strategy");
            strategy = TimingStrategy::ShiftWorker;
            eating_window = None;
        }

        if profile.time_constraint == ConstraintLevel::High && distribution.len() > 3 {
            distribution = if strategy == TimingStrategy::IntermittentFasting {
                distributions.fasting_meals.clone()
            } else {
                distributions.three_meals.clone()
            };
        }

        MealTimingStrategy {
            strategy,
            eating_window,
            pre_workout: PRE_WORKOUT_SPLIT,
            post_workout: POST_WORKOUT_SPLIT,
            meal_distribution: distribution,
        }
    }

    fn distribution_for_count(
        distributions: &crate::config::MealDistributionConfig,
        meals_per_day: u8,
    ) -> Vec<u8> {
        match meals_per_day {
            0..=3 => distributions.three_meals.clone(),
            4 => distributions.four_meals.clone(),
            _ => distributions.five_meals.clone(),
        }
    }

    fn trains_night_shift(workout_times: &[DateTime<Utc>]) -> bool {
        workout_times
            .iter()
            .any(|t| t.hour() >= NIGHT_SHIFT_START_HOUR || t.hour() <= NIGHT_SHIFT_END_HOUR)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, CookingSkill, Sex};
    use chrono::TimeZone;

    fn profile(goal: Goal) -> NutritionProfile {
        NutritionProfile {
            age: 28,
            sex: Sex::Female,
            weight_kg: 62.0,
            height_cm: 168.0,
            activity_level: ActivityLevel::ModeratelyActive,
            goal,
            dietary_restrictions: vec![],
            allergies: vec![],
            meals_per_day: 4,
            budget: ConstraintLevel::Medium,
            time_constraint: ConstraintLevel::Medium,
            cooking_skill: CookingSkill::Intermediate,
        }
    }

    #[test]
    fn every_distribution_sums_to_100() {
        let config = EngineConfig::default();
        let planner = MealTimingPlanner::new(&config);
        for goal in [
            Goal::FatLoss,
            Goal::MuscleGain,
            Goal::Maintenance,
            Goal::AthleticPerformance,
        ] {
            let strategy = planner.plan(&profile(goal), &[]);
            let sum: u32 = strategy.meal_distribution.iter().map(|p| u32::from(*p)).sum();
            assert_eq!(sum, 100, "distribution for {goal:?}");
            assert!((3..=5).contains(&strategy.meal_distribution.len()));
        }
    }

    #[test]
    fn fat_loss_gets_fasting_window() {
        let config = EngineConfig::default();
        let planner = MealTimingPlanner::new(&config);
        let strategy = planner.plan(&profile(Goal::FatLoss), &[]);
        assert_eq!(strategy.strategy, TimingStrategy::IntermittentFasting);
        let window = strategy.eating_window.unwrap();
        assert_eq!(window.start_hour, 12);
        assert_eq!(window.end_hour, 20);
        assert_eq!(strategy.meal_distribution, vec![40, 35, 25]);
    }

    #[test]
    fn athletic_goal_gets_five_slots() {
        let config = EngineConfig::default();
        let planner = MealTimingPlanner::new(&config);
        let strategy = planner.plan(&profile(Goal::AthleticPerformance), &[]);
        assert_eq!(strategy.strategy, TimingStrategy::Athlete);
        assert_eq!(strategy.meal_distribution.len(), 5);
    }

    #[test]
    fn late_workouts_switch_to_shift_worker() {
        let config = EngineConfig::default();
        let planner = MealTimingPlanner::new(&config);
        let late = Utc.with_ymd_and_hms(2026, 3, 10, 22, 30, 0).unwrap();
        let strategy = planner.plan(&profile(Goal::Maintenance), &[late]);
        assert_eq!(strategy.strategy, TimingStrategy::ShiftWorker);
    }

    #[test]
    fn high_time_constraint_collapses_to_three_meals() {
        let config = EngineConfig::default();
        let planner = MealTimingPlanner::new(&config);
        let mut p = profile(Goal::MuscleGain);
        p.meals_per_day = 5;
        p.time_constraint = ConstraintLevel::High;
        let strategy = planner.plan(&p, &[]);
        assert_eq!(strategy.meal_distribution.len(), 3);
    }
}
