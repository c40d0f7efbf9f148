// ABOUTME: Greedy food allocation against per-meal macro budgets and daily plan assembly
// ABOUTME: Deterministic single-pass heuristic, order-sensitive and not globally optimal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: score and serving rounding

use crate::config::EngineConfig;
use crate::models::{
    CatalogFood, Goal, MacroTargets, MacroTotals, MealPlan, MealSlot, NutritionProfile,
    OptimizedFood, PlannedMeal, ShoppingItem,
};
use crate::nutrition_calculator::TargetCalculator;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Fills a meal's macro budgets from a candidate pool, greedily.
///
/// Single pass, no backtracking: candidates are taken best-scored first, each
/// scaled to the largest serving fraction that fits every remaining budget.
/// The result is deterministic for a given pool but not globally optimal.
pub struct FoodAllocator<'a> {
    config: &'a EngineConfig,
}

impl<'a> FoodAllocator<'a> {
    /// Create an allocator over the given configuration
    #[must_use]
    pub const fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Select and scale foods for one meal slot.
    ///
    /// Candidates are first narrowed by the slot's name keywords; when no
    /// candidate matches, the full pool is used instead.
    #[must_use]
    pub fn allocate(
        &self,
        slot: MealSlot,
        candidates: &[CatalogFood],
        target: &MacroTotals,
    ) -> Vec<OptimizedFood> {
        let keywords = &self.config.meal_keywords;
        let mut pool: Vec<&CatalogFood> = candidates
            .iter()
            .filter(|f| keywords.matches(slot, &f.name))
            .collect();
        if pool.is_empty() {
            debug!(slot = ?slot, "no keyword match, falling back to full candidate pool");
            pool = candidates.iter().collect();
        }

        pool.sort_by(|a, b| {
            let score_a = (a.nutrition_density + a.satiety_score) / 2.0;
            let score_b = (b.nutrition_density + b.satiety_score) / 2.0;
            score_b
                .partial_cmp(&score_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        let min_fraction = self.config.allocator.min_serving_fraction;
        let mut remaining = *target;
        let mut selection = Vec::new();

        for food in pool {
            if remaining.calories <= 0.0 {
                break;
            }
            let Some(fraction) = usable_fraction(food, &remaining) else {
                continue;
            };
            if fraction < min_fraction {
                continue;
            }
            let selected = scale_food(food, fraction);
            remaining.calories -= selected.calories;
            remaining.protein_g -= selected.protein_g;
            remaining.carbohydrates_g -= selected.carbohydrates_g;
            remaining.fat_g -= selected.fat_g;
            selection.push(selected);
        }

        selection
    }
}

/// Largest fraction of one serving that fits every remaining budget.
///
/// Ratios with a zero macro contribution are skipped; a food with no macro
/// content at all yields `None`.
fn usable_fraction(food: &CatalogFood, remaining: &MacroTotals) -> Option<f64> {
    let ratios = [
        (food.calories, remaining.calories),
        (food.protein_g, remaining.protein_g),
        (food.carbohydrates_g, remaining.carbohydrates_g),
        (food.fat_g, remaining.fat_g),
    ];
    let mut fraction: Option<f64> = None;
    for (per_serving, budget) in ratios {
        if per_serving <= 0.0 {
            continue;
        }
        let ratio = (budget / per_serving).max(0.0);
        fraction = Some(fraction.map_or(ratio, |f| f.min(ratio)));
    }
    fraction.map(|f| f.min(1.0))
}

fn scale_food(food: &CatalogFood, fraction: f64) -> OptimizedFood {
    OptimizedFood {
        name: food.name.clone(),
        category: food.category.clone(),
        servings: fraction,
        calories: food.calories * fraction,
        protein_g: food.protein_g * fraction,
        carbohydrates_g: food.carbohydrates_g * fraction,
        fat_g: food.fat_g * fraction,
        fiber_g: food.fiber_g * fraction,
        micronutrients: food
            .micronutrients
            .iter()
            .map(|(name, amount)| (name.clone(), amount * fraction))
            .collect(),
        bioavailability: food.bioavailability,
        satiety_score: food.satiety_score,
        nutrition_density: food.nutrition_density,
        cost: food.cost.map(|c| c * fraction),
        prep_time_minutes: food.prep_time_minutes,
    }
}

/// Meal slot sequence for a distribution of the given length
#[must_use]
pub fn slots_for_distribution(len: usize) -> Vec<MealSlot> {
    match len {
        4 => vec![
            MealSlot::Breakfast,
            MealSlot::Lunch,
            MealSlot::Dinner,
            MealSlot::Snack,
        ],
        5 => vec![
            MealSlot::Breakfast,
            MealSlot::Snack,
            MealSlot::Lunch,
            MealSlot::Dinner,
            MealSlot::Snack,
        ],
        _ => vec![MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner],
    }
}

/// Per-meal macro budget for one slot's calorie percentage
#[must_use]
pub fn slot_target(daily: &MacroTargets, percent: u8) -> MacroTotals {
    let share = f64::from(percent) / 100.0;
    MacroTotals {
        calories: f64::from(daily.calories) * share,
        protein_g: f64::from(daily.protein_g) * share,
        carbohydrates_g: f64::from(daily.carbohydrates_g) * share,
        fat_g: f64::from(daily.fat_g) * share,
    }
}

/// Slot priorities by calorie share, largest share first (1 = highest)
#[must_use]
pub fn slot_priorities(distribution: &[u8]) -> Vec<u8> {
    let mut indexed: Vec<(usize, u8)> = distribution.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    let mut priorities = vec![0u8; distribution.len()];
    for (rank, (index, _)) in indexed.into_iter().enumerate() {
        priorities[index] = rank as u8 + 1;
    }
    priorities
}

/// Assembles allocated meals into a daily [`MealPlan`]
pub struct MealPlanner<'a> {
    config: &'a EngineConfig,
}

impl<'a> MealPlanner<'a> {
    /// Create a planner over the given configuration
    #[must_use]
    pub const fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Build the daily plan from already-allocated meals.
    ///
    /// Computes totals, supplement suggestions, hydration, adherence and
    /// optimization scores, cost and prep totals, and the shopping list.
    #[must_use]
    pub fn assemble(
        &self,
        date: NaiveDate,
        profile: &NutritionProfile,
        daily_targets: &MacroTargets,
        meals: Vec<PlannedMeal>,
    ) -> MealPlan {
        let mut totals = MacroTotals::default();
        let mut total_cost = 0.0;
        let mut total_prep = 0u32;
        let mut quality_sum = 0.0;
        let mut food_count = 0usize;
        let mut shopping: BTreeMap<String, f64> = BTreeMap::new();

        for meal in &meals {
            for food in &meal.foods {
                totals.add(&MacroTotals {
                    calories: food.calories,
                    protein_g: food.protein_g,
                    carbohydrates_g: food.carbohydrates_g,
                    fat_g: food.fat_g,
                });
                total_cost += food.cost.unwrap_or(0.0);
                total_prep += food.prep_time_minutes.unwrap_or(0);
                quality_sum += (food.nutrition_density + food.satiety_score) / 2.0;
                food_count += 1;
                *shopping.entry(food.name.clone()).or_insert(0.0) += food.servings;
            }
        }

        let adherence_score = adherence(&totals, daily_targets);
        let optimization_score = if food_count == 0 {
            0.0
        } else {
            (quality_sum / food_count as f64 * 10.0).min(100.0)
        };

        let hydration_ml = f64::from(TargetCalculator::new(self.config).hydration_ml(profile));

        MealPlan {
            date,
            totals,
            meals,
            supplements: supplement_suggestions(profile, daily_targets),
            hydration_ml,
            adherence_score,
            optimization_score,
            total_cost,
            total_prep_time_minutes: total_prep,
            shopping_list: shopping
                .into_iter()
                .map(|(name, servings)| ShoppingItem { name, servings })
                .collect(),
        }
    }
}

/// Closeness of allocated macros to the daily targets, 0-100.
///
/// 100 minus the mean absolute percent deviation over the four macros, each
/// deviation capped at 100. Zero-valued targets are skipped.
fn adherence(totals: &MacroTotals, targets: &MacroTargets) -> f64 {
    let pairs = [
        (totals.calories, f64::from(targets.calories)),
        (totals.protein_g, f64::from(targets.protein_g)),
        (totals.carbohydrates_g, f64::from(targets.carbohydrates_g)),
        (totals.fat_g, f64::from(targets.fat_g)),
    ];
    let mut deviation_sum = 0.0;
    let mut counted = 0usize;
    for (actual, target) in pairs {
        if target <= 0.0 {
            continue;
        }
        deviation_sum += ((actual - target).abs() / target * 100.0).min(100.0);
        counted += 1;
    }
    if counted == 0 {
        return 0.0;
    }
    (100.0 - deviation_sum / counted as f64).max(0.0)
}

fn supplement_suggestions(profile: &NutritionProfile, targets: &MacroTargets) -> Vec<String> {
    let mut supplements = Vec::new();
    if matches!(profile.goal, Goal::MuscleGain | Goal::AthleticPerformance) {
        supplements.push("creatine monohydrate 5g daily".to_owned());
    }
    if targets.protein_per_kg >= 2.0 {
        supplements.push("whey protein to close the protein gap".to_owned());
    }
    if profile.goal == Goal::FatLoss {
        supplements.push("green tea extract (caffeine-free)".to_owned());
    }
    let plant_based = profile
        .dietary_restrictions
        .iter()
        .any(|r| matches!(r.to_lowercase().as_str(), "vegan" | "vegetarian"));
    if plant_based {
        supplements.push("vitamin B12".to_owned());
    }
    supplements
}
