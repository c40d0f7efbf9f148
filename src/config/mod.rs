// ABOUTME: Engine configuration aggregate with validated, serde-loadable sub-configs
// ABOUTME: Defaults carry every built-in constant; deployments can override as data assets
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Engine configuration.
//!
//! The engine takes an [`EngineConfig`] by injection rather than reading
//! process-global state; concurrent analyses never share mutable
//! configuration.

/// Trend, plateau, pattern, and insight thresholds
pub mod analysis;
/// Static lookup tables (muscle groups, meal keywords)
pub mod lookup;
/// BMR/macro coefficients, distributions, allocator tuning
pub mod nutrition;

pub use analysis::{InsightConfig, PatternConfig, PlateauConfig};
pub use lookup::{MealKeywordTable, MuscleGroupTable, UNKNOWN_MUSCLE_GROUP};
pub use nutrition::{
    ActivityFactorsConfig, AllocatorConfig, BmrConfig, HydrationConfig, MacronutrientConfig,
    MealDistributionConfig,
};

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Complete engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// BMR formula coefficients
    pub bmr: BmrConfig,
    /// TDEE activity multipliers
    pub activity_factors: ActivityFactorsConfig,
    /// Goal-driven macro factors
    pub macronutrients: MacronutrientConfig,
    /// Hydration targeting
    pub hydration: HydrationConfig,
    /// Meal calorie distributions
    pub meal_distributions: MealDistributionConfig,
    /// Food allocator tuning
    pub allocator: AllocatorConfig,
    /// Plateau-risk thresholds
    pub plateau: PlateauConfig,
    /// Pattern-rule thresholds
    pub patterns: PatternConfig,
    /// Insight-rule thresholds
    pub insights: InsightConfig,
    /// Exercise-to-muscle-group table
    pub muscle_groups: MuscleGroupTable,
    /// Meal-slot keyword table
    pub meal_keywords: MealKeywordTable,
}

impl EngineConfig {
    /// Validate every sub-config
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.activity_factors.validate()?;
        self.macronutrients.validate()?;
        self.meal_distributions.validate()?;
        self.allocator.validate()?;
        self.plateau.validate()?;
        self.patterns.validate()?;
        self.insights.validate()?;
        Ok(())
    }
}
