// ABOUTME: Shared helpers for integration tests
// ABOUTME: In-memory HistoryProvider and FoodCatalog plus synthetic record builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)] // not every test file uses every helper

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use fitforge::errors::AppResult;
use fitforge::models::{
    ActivityLevel, CatalogFood, ConstraintLevel, CookingSkill, ExerciseEntry, Goal,
    MacroBioavailability, MealRecord, MealSlot, NutritionProfile, SetEntry, Sex, WeightEntry,
    WorkoutRecord, WorkoutType,
};
use fitforge::providers::{FoodCatalog, HistoryProvider};
use std::collections::HashMap;
use uuid::Uuid;

/// Fixed user for synthetic data
pub fn test_user() -> Uuid {
    Uuid::from_u128(0x5EED)
}

/// Midnight UTC on the given date
pub fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(hour, 0, 0).unwrap())
}

pub fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap() + Duration::days(offset)
}

/// A strength workout with one exercise at the given top load
pub fn strength_workout(date: NaiveDate, exercise: &str, load_kg: f64) -> WorkoutRecord {
    WorkoutRecord {
        id: Uuid::new_v4(),
        user_id: test_user(),
        started_at: at(date, 18),
        workout_type: WorkoutType::Strength,
        duration_minutes: 60,
        exercises: vec![ExerciseEntry {
            name: exercise.to_owned(),
            sets: vec![
                SetEntry {
                    reps: 5,
                    weight_kg: load_kg,
                    rpe: Some(8.0),
                },
                SetEntry {
                    reps: 5,
                    weight_kg: load_kg * 0.9,
                    rpe: Some(7.0),
                },
            ],
        }],
    }
}

/// A meal entry with the given macros
pub fn meal(date: NaiveDate, calories: f64, protein_g: f64) -> MealRecord {
    MealRecord {
        id: Uuid::new_v4(),
        user_id: test_user(),
        logged_at: at(date, 12),
        name: Some("logged meal".to_owned()),
        calories: Some(calories),
        protein_g: Some(protein_g),
        carbohydrates_g: Some(calories * 0.4 / 4.0),
        fat_g: Some(calories * 0.3 / 9.0),
        water_ml: None,
    }
}

pub fn weight(date: NaiveDate, weight_kg: f64) -> WeightEntry {
    WeightEntry {
        date,
        weight_kg,
        body_fat_percent: None,
    }
}

pub fn default_profile() -> NutritionProfile {
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
        budget: ConstraintLevel::Medium,
        time_constraint: ConstraintLevel::Medium,
        cooking_skill: CookingSkill::Intermediate,
    }
}

/// In-memory history provider backed by plain vectors
pub struct SyntheticHistory {
    pub workouts: Vec<WorkoutRecord>,
    pub meals: Vec<MealRecord>,
    pub weights: Vec<WeightEntry>,
    pub profile: NutritionProfile,
}

impl SyntheticHistory {
    pub fn new(profile: NutritionProfile) -> Self {
        Self {
            workouts: vec![],
            meals: vec![],
            weights: vec![],
            profile,
        }
    }
}

#[async_trait]
impl HistoryProvider for SyntheticHistory {
    async fn fetch_workouts(
        &self,
        _user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<WorkoutRecord>> {
        Ok(self
            .workouts
            .iter()
            .filter(|w| w.started_at >= from && w.started_at <= to)
            .cloned()
            .collect())
    }

    async fn fetch_meals(
        &self,
        _user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<MealRecord>> {
        Ok(self
            .meals
            .iter()
            .filter(|m| m.logged_at >= from && m.logged_at <= to)
            .cloned()
            .collect())
    }

    async fn fetch_weights(
        &self,
        _user_id: Uuid,
        _from: DateTime<Utc>,
        _to: DateTime<Utc>,
    ) -> AppResult<Vec<WeightEntry>> {
        Ok(self.weights.clone())
    }

    async fn fetch_profile(&self, _user_id: Uuid) -> AppResult<NutritionProfile> {
        Ok(self.profile.clone())
    }
}

pub fn catalog_food(
    name: &str,
    category: &str,
    calories: f64,
    protein_g: f64,
    carbohydrates_g: f64,
    fat_g: f64,
) -> CatalogFood {
    CatalogFood {
        name: name.to_owned(),
        category: category.to_owned(),
        calories,
        protein_g,
        carbohydrates_g,
        fat_g,
        fiber_g: 2.0,
        micronutrients: HashMap::new(),
        satiety_score: 7.0,
        nutrition_density: 7.5,
        cost: Some(2.5),
        prep_time_minutes: Some(10),
        bioavailability: MacroBioavailability::default(),
    }
}

/// Small fixed catalog serving every slot from the same pool
pub struct SyntheticCatalog {
    pub foods: Vec<CatalogFood>,
}

impl SyntheticCatalog {
    pub fn with_staples() -> Self {
        Self {
            foods: vec![
                catalog_food("oatmeal with berries", "grain", 300.0, 10.0, 54.0, 5.0),
                catalog_food("greek yogurt", "dairy", 150.0, 17.0, 8.0, 4.0),
                catalog_food("chicken and rice bowl", "protein", 550.0, 42.0, 60.0, 12.0),
                catalog_food("garden salad", "vegetable", 120.0, 4.0, 10.0, 7.0),
                catalog_food("salmon with potato", "protein", 520.0, 38.0, 40.0, 22.0),
                catalog_food("protein bar", "snack", 220.0, 20.0, 22.0, 7.0),
                catalog_food("almonds", "snack", 170.0, 6.0, 6.0, 15.0),
            ],
        }
    }
}

#[async_trait]
impl FoodCatalog for SyntheticCatalog {
    async fn candidates_for(
        &self,
        _slot: MealSlot,
        profile: &NutritionProfile,
    ) -> AppResult<Vec<CatalogFood>> {
        let blocked: Vec<String> = profile
            .allergies
            .iter()
            .map(|a| a.to_lowercase())
            .collect();
        Ok(self
            .foods
            .iter()
            .filter(|f| {
                let name = f.name.to_lowercase();
                !blocked.iter().any(|a| name.contains(a))
            })
            .cloned()
            .collect())
    }

    async fn similar_foods(&self, food_name: &str, limit: usize) -> AppResult<Vec<CatalogFood>> {
        let category = self
            .foods
            .iter()
            .find(|f| f.name == food_name)
            .map(|f| f.category.clone());
        Ok(self
            .foods
            .iter()
            .filter(|f| f.name != food_name && Some(&f.category) == category.as_ref())
            .take(limit)
            .cloned()
            .collect())
    }
}
