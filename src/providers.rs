// ABOUTME: Async collaborator traits for history storage and the food catalog
// ABOUTME: The engine depends on these interfaces, never on a concrete backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits.
//!
//! All external I/O happens behind these interfaces before the engine's pure
//! computation runs. Implementations must be `Send + Sync` so one instance
//! can serve concurrent per-user analyses.

use crate::errors::AppResult;
use crate::models::{
    CatalogFood, MealRecord, MealSlot, NutritionProfile, WeightEntry, WorkoutRecord,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of logged history for one user
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Workout records within the window, any order
    async fn fetch_workouts(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<WorkoutRecord>>;

    /// Meal/food-log records within the window, any order
    async fn fetch_meals(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<MealRecord>>;

    /// Body-weight entries within the window, any order
    async fn fetch_weights(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<WeightEntry>>;

    /// The user's nutrition profile
    async fn fetch_profile(&self, user_id: Uuid) -> AppResult<NutritionProfile>;
}

/// Source of catalog foods for meal planning
#[async_trait]
pub trait FoodCatalog: Send + Sync {
    /// Candidate foods for a meal slot, already filtered for the profile's
    /// restrictions and allergies
    async fn candidates_for(
        &self,
        slot: MealSlot,
        profile: &NutritionProfile,
    ) -> AppResult<Vec<CatalogFood>>;

    /// Up to `limit` substitutes for a food: same category, comparable macro
    /// density
    async fn similar_foods(&self, food_name: &str, limit: usize) -> AppResult<Vec<CatalogFood>>;
}
