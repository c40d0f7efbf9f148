// ABOUTME: Analysis thresholds for trend, plateau, pattern, and insight rules
// ABOUTME: Every cutoff the analytics rules compare against, serde-loadable with validated Defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};

/// Plateau-risk classification thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateauConfig {
    /// Minimum load observations before risk is scored: 4
    pub min_observations: usize,
    /// Variance below this is "flat": 2.0
    pub low_variance: f64,
    /// Absolute trend percent below this is "flat": 2.0
    pub low_trend_percent: f64,
    /// Variance below this is "settling": 5.0
    pub moderate_variance: f64,
    /// Absolute trend percent below this is "settling": 5.0
    pub moderate_trend_percent: f64,
    /// Risk when flat: 80
    pub high_risk: u8,
    /// Risk when settling: 50
    pub moderate_risk: u8,
    /// Risk otherwise: 20
    pub base_risk: u8,
    /// Minimum body-weight entries before plateau is judged: 5
    pub weight_min_entries: usize,
    /// Body-weight variance (kg^2) below which weight is plateaued: 0.5
    pub weight_variance_threshold: f64,
}

impl Default for PlateauConfig {
    fn default() -> Self {
        Self {
            min_observations: 4,
            low_variance: 2.0,
            low_trend_percent: 2.0,
            moderate_variance: 5.0,
            moderate_trend_percent: 5.0,
            high_risk: 80,
            moderate_risk: 50,
            base_risk: 20,
            weight_min_entries: 5,
            weight_variance_threshold: 0.5,
        }
    }
}

impl PlateauConfig {
    /// Validate threshold ordering
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.low_variance > self.moderate_variance {
            return Err(ConfigError::InvalidRange(
                "low_variance must not exceed moderate_variance",
            ));
        }
        if self.low_trend_percent > self.moderate_trend_percent {
            return Err(ConfigError::InvalidRange(
                "low_trend_percent must not exceed moderate_trend_percent",
            ));
        }
        if self.high_risk > 100 || self.moderate_risk > 100 || self.base_risk > 100 {
            return Err(ConfigError::InvalidRange("risk scores must be 0-100"));
        }
        Ok(())
    }
}

/// Pattern-rule thresholds and fixed rule confidences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Rolling window the rules look at, in days: 30
    pub window_days: u32,
    /// Workout-day ratio above which consistency is positive: 0.7
    pub consistency_high_ratio: f64,
    /// Workout-day ratio below which consistency is negative: 0.3
    pub consistency_low_ratio: f64,
    /// Minimum volume-bearing workouts before overload is judged: 5
    pub min_volume_workouts: usize,
    /// Volume trend percent above which overload is positive: 5.0
    pub overload_trend_percent: f64,
    /// Protein reference factor, g per kg body weight: 1.6
    pub protein_reference_g_per_kg: f64,
    /// Protein ratio at/above which intake is positive: 0.9
    pub protein_good_ratio: f64,
    /// Protein ratio below which intake is negative: 0.6
    pub protein_low_ratio: f64,
    /// Minimum rest days per window before recovery flags: 8
    pub min_rest_days: u32,
    /// Fixed confidence: positive consistency rule
    pub consistency_positive_confidence: f64,
    /// Fixed confidence: negative consistency rule
    pub consistency_negative_confidence: f64,
    /// Fixed confidence: progressive-overload rule
    pub overload_confidence: f64,
    /// Fixed confidence: positive protein rule
    pub protein_positive_confidence: f64,
    /// Fixed confidence: negative protein rule
    pub protein_negative_confidence: f64,
    /// Fixed confidence: recovery rule
    pub recovery_confidence: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            consistency_high_ratio: 0.7,
            consistency_low_ratio: 0.3,
            min_volume_workouts: 5,
            overload_trend_percent: 5.0,
            protein_reference_g_per_kg: 1.6,
            protein_good_ratio: 0.9,
            protein_low_ratio: 0.6,
            min_rest_days: 8,
            consistency_positive_confidence: 0.9,
            consistency_negative_confidence: 0.85,
            overload_confidence: 0.8,
            protein_positive_confidence: 0.85,
            protein_negative_confidence: 0.8,
            recovery_confidence: 0.75,
        }
    }
}

impl PatternConfig {
    /// Validate ratios and confidence bounds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.consistency_low_ratio > self.consistency_high_ratio {
            return Err(ConfigError::InvalidRange(
                "consistency_low_ratio must not exceed consistency_high_ratio",
            ));
        }
        let confidences = [
            self.consistency_positive_confidence,
            self.consistency_negative_confidence,
            self.overload_confidence,
            self.protein_positive_confidence,
            self.protein_negative_confidence,
            self.recovery_confidence,
        ];
        if confidences.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ConfigError::InvalidRange(
                "pattern confidences must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Insight-rule thresholds and program-score weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Strength progression percent above which a gain insight fires: 5.0
    pub strength_gain_percent: f64,
    /// Number of top progressing exercises surfaced: 3
    pub strength_gain_top_n: usize,
    /// Plateau risk above which a plateau insight fires: 70
    pub plateau_risk_threshold: u8,
    /// Imbalance risk above which a warning fires: 60.0
    pub imbalance_risk_threshold: f64,
    /// Progression percent below which a group is overtrained (with high risk): -5.0
    pub overtrained_progression_percent: f64,
    /// Coefficient of variation of daily calories above which intake counts as erratic: 0.25
    pub calorie_variation_threshold: f64,
    /// Program-score weight for workout consistency: 0.4
    pub consistency_weight: f64,
    /// Program-score weight for nutrition adherence: 0.3
    pub adherence_weight: f64,
    /// Strength bonus when trend is improving: 30
    pub improving_bonus: u32,
    /// Strength bonus when trend is plateaued: 15
    pub plateau_bonus: u32,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            strength_gain_percent: 5.0,
            strength_gain_top_n: 3,
            plateau_risk_threshold: 70,
            imbalance_risk_threshold: 60.0,
            overtrained_progression_percent: -5.0,
            calorie_variation_threshold: 0.25,
            consistency_weight: 0.4,
            adherence_weight: 0.3,
            improving_bonus: 30,
            plateau_bonus: 15,
        }
    }
}

impl InsightConfig {
    /// Validate weights and thresholds
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.consistency_weight < 0.0 || self.adherence_weight < 0.0 {
            return Err(ConfigError::InvalidRange(
                "program-score weights must be non-negative",
            ));
        }
        if self.consistency_weight + self.adherence_weight > 1.0 {
            return Err(ConfigError::InvalidRange(
                "program-score weights must not exceed 1 combined",
            ));
        }
        if self.plateau_risk_threshold > 100 {
            return Err(ConfigError::InvalidRange(
                "plateau_risk_threshold must be 0-100",
            ));
        }
        Ok(())
    }
}
