// ABOUTME: Plain serializable records crossing the engine boundary
// ABOUTME: Raw input records from collaborators and computed summary outputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model for the engine: raw records supplied by the data-storage
//! collaborator and the derived summaries handed back to the presentation
//! layer. Everything here is a behavior-free serde record so it can cross a
//! process or network boundary unchanged.

/// Nutrition records: meals, profiles, macro targets, food catalog, meal plans
pub mod nutrition;
/// Workout records: raw logs, per-day summaries, per-exercise metrics
pub mod workout;

pub use nutrition::{
    ActivityLevel, CatalogFood, ConstraintLevel, CookingSkill, FoodAlternatives, Goal,
    MacroBioavailability, MacroTargets, MacroTotals, MealPlan, MealRecord, MealSlot,
    NutritionProfile, NutritionSummary, OptimizedFood, PlannedMeal, Sex, ShoppingItem, WeightEntry,
};
pub use workout::{
    ExerciseEntry, ExerciseMetric, PersonalBest, PersonalBestKind, SetEntry, WorkoutRecord,
    WorkoutSummary, WorkoutType,
};
