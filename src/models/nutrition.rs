// ABOUTME: Nutrition data models for intake analysis and meal planning
// ABOUTME: MealRecord, NutritionProfile, MacroTargets, food catalog, and MealPlan definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Raw meal/food-log record supplied by the data-storage collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealRecord {
    /// Unique identifier for this entry
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// When the meal was logged
    pub logged_at: DateTime<Utc>,
    /// Meal description or name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Calories for this meal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    /// Protein in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_g: Option<f64>,
    /// Carbohydrates in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbohydrates_g: Option<f64>,
    /// Fat in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_g: Option<f64>,
    /// Water intake in mL, if tracked alongside the meal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_ml: Option<f64>,
}

/// One calendar day of intake, built by folding all meal entries for that day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionSummary {
    /// Calendar date
    pub date: NaiveDate,
    /// Total calories consumed
    pub total_calories: f64,
    /// Total protein in grams
    pub protein_g: f64,
    /// Total carbohydrates in grams
    pub carbohydrates_g: f64,
    /// Total fat in grams
    pub fat_g: f64,
    /// Number of meals logged
    pub meal_count: u32,
    /// Total water intake in mL, if any entry tracked it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_ml: Option<f64>,
}

/// Body-weight reading, ordered by date
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Calendar date of the reading
    pub date: NaiveDate,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Body-fat percentage, if measured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_fat_percent: Option<f64>,
}

/// Biological sex for BMR calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male (higher BMR constant)
    Male,
    /// Female (lower BMR constant)
    Female,
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// 1-3 days/week
    LightlyActive,
    /// 3-5 days/week
    ModeratelyActive,
    /// 6-7 days/week
    VeryActive,
    /// Hard training twice a day
    ExtraActive,
}

/// Training goal driving calorie and macro targeting
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    /// Caloric deficit, high protein
    FatLoss,
    /// Caloric surplus
    MuscleGain,
    /// Caloric balance
    Maintenance,
    /// Performance fueling, high carbs
    AthleticPerformance,
}

/// Coarse constraint level for budget and time
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintLevel {
    /// Loose constraint
    Low,
    /// Moderate constraint
    #[default]
    Medium,
    /// Tight constraint
    High,
}

/// Self-reported cooking skill
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CookingSkill {
    /// Minimal kitchen experience
    Beginner,
    /// Comfortable with most recipes
    #[default]
    Intermediate,
    /// Experienced cook
    Advanced,
}

/// User profile supplied by the caller; input to target calculation and planning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionProfile {
    /// Age in years
    pub age: u32,
    /// Biological sex
    pub sex: Sex,
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in centimeters
    pub height_cm: f64,
    /// Activity level for TDEE
    pub activity_level: ActivityLevel,
    /// Training goal
    pub goal: Goal,
    /// Dietary restrictions (vegetarian, halal, ...)
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    /// Food allergies
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Preferred meals per day (clamped to 3-5 by the planner)
    pub meals_per_day: u8,
    /// Grocery budget constraint
    #[serde(default)]
    pub budget: ConstraintLevel,
    /// Meal-prep time constraint
    #[serde(default)]
    pub time_constraint: ConstraintLevel,
    /// Cooking skill
    #[serde(default)]
    pub cooking_skill: CookingSkill,
}

/// Daily calorie and macro-nutrient targets.
///
/// Computed, immutable per invocation. `calories` always equals
/// `protein_g*4 + carbohydrates_g*4 + fat_g*9` within rounding tolerance;
/// when the per-kg carb ceiling binds, calories are reconciled down to the
/// macro sum (the goal-adjusted energy target remains visible via `tdee`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroTargets {
    /// Daily calorie target
    pub calories: u32,
    /// Daily protein target in grams
    pub protein_g: u32,
    /// Daily carbohydrate target in grams
    pub carbohydrates_g: u32,
    /// Daily fat target in grams
    pub fat_g: u32,
    /// Daily fiber target in grams
    pub fiber_g: u32,
    /// Added-sugar ceiling in grams
    pub sugar_max_g: u32,
    /// Sodium ceiling in milligrams
    pub sodium_max_mg: u32,
    /// Protein factor applied (g per kg body weight)
    pub protein_per_kg: f64,
    /// Carbohydrate ceiling factor applied (g per kg body weight)
    pub carbs_per_kg: f64,
    /// Fat share of calories applied (fraction)
    pub fat_percentage: f64,
    /// Basal metabolic rate the derivation started from (kcal/day)
    pub bmr: f64,
    /// Total daily energy expenditure before goal adjustment (kcal/day)
    pub tdee: f64,
}

/// Per-macro absorption factors (0-1) for a catalog food
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MacroBioavailability {
    /// Protein absorption factor
    pub protein: f64,
    /// Carbohydrate absorption factor
    pub carbohydrates: f64,
    /// Fat absorption factor
    pub fat: f64,
}

impl Default for MacroBioavailability {
    fn default() -> Self {
        Self {
            protein: 1.0,
            carbohydrates: 1.0,
            fat: 1.0,
        }
    }
}

/// Food drawn from the external catalog collaborator, per single serving
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFood {
    /// Food name
    pub name: String,
    /// Catalog category ("protein", "grain", ...; unmapped foods use "Other")
    pub category: String,
    /// Calories per serving
    pub calories: f64,
    /// Protein per serving (grams)
    pub protein_g: f64,
    /// Carbohydrates per serving (grams)
    pub carbohydrates_g: f64,
    /// Fat per serving (grams)
    pub fat_g: f64,
    /// Fiber per serving (grams)
    pub fiber_g: f64,
    /// Micronutrients per serving (name -> amount)
    #[serde(default)]
    pub micronutrients: HashMap<String, f64>,
    /// Satiety score, 1-10
    pub satiety_score: f64,
    /// Nutrition-density score, 1-10
    pub nutrition_density: f64,
    /// Cost per serving, if the catalog prices it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Preparation time in minutes, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<u32>,
    /// Per-macro absorption factors
    #[serde(default)]
    pub bioavailability: MacroBioavailability,
}

/// A food selected and scaled by the allocator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedFood {
    /// Food name
    pub name: String,
    /// Catalog category
    pub category: String,
    /// Servings selected (never below 0.1 of a full serving)
    pub servings: f64,
    /// Calories contributed at the selected quantity
    pub calories: f64,
    /// Protein contributed (grams)
    pub protein_g: f64,
    /// Carbohydrates contributed (grams)
    pub carbohydrates_g: f64,
    /// Fat contributed (grams)
    pub fat_g: f64,
    /// Fiber contributed (grams)
    pub fiber_g: f64,
    /// Micronutrients contributed at the selected quantity (name -> amount)
    #[serde(default)]
    pub micronutrients: HashMap<String, f64>,
    /// Per-macro absorption factors of the source food
    #[serde(default)]
    pub bioavailability: MacroBioavailability,
    /// Satiety score of the source food, 1-10
    pub satiety_score: f64,
    /// Nutrition-density score of the source food, 1-10
    pub nutrition_density: f64,
    /// Cost at the selected quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    /// Preparation time in minutes for the source food
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time_minutes: Option<u32>,
}

/// Meal slot within the day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealSlot {
    /// First meal of the day
    Breakfast,
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
    /// Smaller meal between the main ones
    Snack,
}

/// Aggregated calorie/macro totals
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MacroTotals {
    /// Calories
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbohydrates_g: f64,
    /// Fat in grams
    pub fat_g: f64,
}

impl MacroTotals {
    /// Accumulate another total into this one
    pub fn add(&mut self, other: &Self) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.carbohydrates_g += other.carbohydrates_g;
        self.fat_g += other.fat_g;
    }
}

/// Alternatives for one selected food (same category, comparable macro density)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodAlternatives {
    /// Name of the selected food these substitute for
    pub for_food: String,
    /// Up to three catalog substitutes
    pub options: Vec<CatalogFood>,
}

/// One planned meal within a daily plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedMeal {
    /// Slot this meal fills
    pub slot: MealSlot,
    /// Calorie/macro targets for the slot
    pub target: MacroTotals,
    /// Priority of hitting this slot's targets (1 = highest)
    pub priority: u8,
    /// Foods selected by the allocator
    pub foods: Vec<OptimizedFood>,
    /// Alternative food sets, one entry per selected food
    pub alternatives: Vec<FoodAlternatives>,
}

/// Shopping-list line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Food name
    pub name: String,
    /// Total servings needed across the plan
    pub servings: f64,
}

/// Daily meal plan.
///
/// Produced once per planning day and never mutated afterward; regenerate to
/// change it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    /// Plan date
    pub date: NaiveDate,
    /// Aggregated macros over all meals
    pub totals: MacroTotals,
    /// Ordered meals
    pub meals: Vec<PlannedMeal>,
    /// Supplement recommendations
    pub supplements: Vec<String>,
    /// Daily hydration target in mL
    pub hydration_ml: f64,
    /// Closeness of allocated macros to the daily targets, 0-100
    pub adherence_score: f64,
    /// Mean quality (density/satiety) of the selections, 0-100
    pub optimization_score: f64,
    /// Total cost over priced foods
    pub total_cost: f64,
    /// Total preparation time in minutes
    pub total_prep_time_minutes: u32,
    /// Deduplicated shopping list
    pub shopping_list: Vec<ShoppingItem>,
}
