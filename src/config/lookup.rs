// ABOUTME: Static lookup tables externalized as configuration data
// ABOUTME: Exercise-to-muscle-group mapping and meal-slot keyword table
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup tables the aggregator and allocator consult. Both are ordinary
//! serde structures so deployments can extend them without code changes; the
//! `Default` impls carry the built-in tables.

use crate::models::MealSlot;
use serde::{Deserialize, Serialize};

/// Muscle group used when no table entry matches an exercise name
pub const UNKNOWN_MUSCLE_GROUP: &str = "unknown";

/// One canonical-name-to-muscle-group mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleGroupEntry {
    /// Canonical substring matched against the logged exercise name
    pub pattern: String,
    /// Muscle group the match maps to
    pub group: String,
}

/// Exercise-to-muscle-group lookup table.
///
/// Matching is case-insensitive exact-substring against canonical names, in
/// table order; the first hit wins, and unmatched exercises map to
/// [`UNKNOWN_MUSCLE_GROUP`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleGroupTable {
    /// Ordered mapping entries
    pub entries: Vec<MuscleGroupEntry>,
}

impl Default for MuscleGroupTable {
    fn default() -> Self {
        let table: &[(&str, &str)] = &[
            ("bench press", "chest"),
            ("incline press", "chest"),
            ("chest fly", "chest"),
            ("push-up", "chest"),
            ("pushup", "chest"),
            ("dip", "chest"),
            ("overhead press", "shoulders"),
            ("shoulder press", "shoulders"),
            ("lateral raise", "shoulders"),
            ("face pull", "shoulders"),
            ("deadlift", "back"),
            ("barbell row", "back"),
            ("dumbbell row", "back"),
            ("row", "back"),
            ("pull-up", "back"),
            ("pullup", "back"),
            ("chin-up", "back"),
            ("pulldown", "back"),
            ("squat", "quadriceps"),
            ("leg press", "quadriceps"),
            ("leg extension", "quadriceps"),
            ("lunge", "quadriceps"),
            ("leg curl", "hamstrings"),
            ("romanian", "hamstrings"),
            ("hip thrust", "glutes"),
            ("glute bridge", "glutes"),
            ("calf raise", "calves"),
            ("bicep curl", "biceps"),
            ("hammer curl", "biceps"),
            ("curl", "biceps"),
            ("tricep extension", "triceps"),
            ("skullcrusher", "triceps"),
            ("pushdown", "triceps"),
            ("plank", "core"),
            ("crunch", "core"),
            ("sit-up", "core"),
            ("leg raise", "core"),
        ];
        Self {
            entries: table
                .iter()
                .map(|(pattern, group)| MuscleGroupEntry {
                    pattern: (*pattern).to_owned(),
                    group: (*group).to_owned(),
                })
                .collect(),
        }
    }
}

impl MuscleGroupTable {
    /// Resolve an exercise name to its muscle group
    #[must_use]
    pub fn group_for(&self, exercise_name: &str) -> &str {
        let lowered = exercise_name.to_lowercase();
        self.entries
            .iter()
            .find(|entry| lowered.contains(&entry.pattern))
            .map_or(UNKNOWN_MUSCLE_GROUP, |entry| entry.group.as_str())
    }
}

/// Keywords that bias food candidates toward a meal slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealKeywordTable {
    /// Breakfast-leaning keywords
    pub breakfast: Vec<String>,
    /// Lunch-leaning keywords
    pub lunch: Vec<String>,
    /// Dinner-leaning keywords
    pub dinner: Vec<String>,
    /// Snack-leaning keywords
    pub snack: Vec<String>,
}

impl Default for MealKeywordTable {
    fn default() -> Self {
        let owned = |words: &[&str]| words.iter().map(|w| (*w).to_owned()).collect();
        Self {
            breakfast: owned(&[
                "oat", "egg", "yogurt", "granola", "toast", "pancake", "cereal", "smoothie",
                "berr",
            ]),
            lunch: owned(&[
                "chicken", "rice", "salad", "sandwich", "wrap", "bowl", "quinoa", "turkey",
            ]),
            dinner: owned(&[
                "salmon", "beef", "steak", "pasta", "potato", "cod", "stir-fry", "tofu",
            ]),
            snack: owned(&[
                "bar", "nut", "almond", "fruit", "apple", "banana", "shake", "cottage",
            ]),
        }
    }
}

impl MealKeywordTable {
    /// Keywords for a slot
    #[must_use]
    pub fn keywords(&self, slot: MealSlot) -> &[String] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
            MealSlot::Snack => &self.snack,
        }
    }

    /// Whether a food name leans toward a slot
    #[must_use]
    pub fn matches(&self, slot: MealSlot, food_name: &str) -> bool {
        let lowered = food_name.to_lowercase();
        self.keywords(slot).iter().any(|kw| lowered.contains(kw))
    }
}
