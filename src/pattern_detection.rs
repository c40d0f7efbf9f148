// ABOUTME: Pattern detection over summary series: streaks, plateau risk, threshold rules
// ABOUTME: Produces ephemeral Pattern/Streak values re-derived on every analysis run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::cast_precision_loss)] // Safe: fitness data conversions

use crate::config::{PatternConfig, PlateauConfig};
use crate::models::{NutritionSummary, WeightEntry, WorkoutSummary};
use crate::statistics::{trend_percent, variance};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Direction of a detected pattern
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Behavior helping the athlete's goal
    Positive,
    /// Behavior working against the goal
    Negative,
    /// Neither helping nor hurting
    Neutral,
}

/// Life area a pattern belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    /// Training behavior
    Workout,
    /// Intake behavior
    Nutrition,
    /// Rest behavior
    Recovery,
    /// Logging/attendance behavior
    Consistency,
}

/// A detected behavioral pattern.
///
/// Ephemeral: produced fresh each analysis run, never persisted as mutable
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pattern {
    /// Direction of the pattern
    pub pattern_type: PatternType,
    /// Life area
    pub category: PatternCategory,
    /// Human-readable description
    pub description: String,
    /// Fixed per-rule confidence, 0-1
    pub confidence: f64,
    /// Window the rule looked at
    pub timeframe: String,
    /// What the pattern means for the athlete
    pub impact: String,
}

/// What kind of activity a streak tracks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StreakType {
    /// Consecutive workout days
    Workout,
    /// Consecutive logging days
    Logging,
    /// Consecutive goal-hitting days
    Goal,
}

/// Consecutive-day streak derived from sorted distinct activity dates.
///
/// `current` is a snapshot relative to the final record in the series, not
/// relative to "today": a user who stops logging keeps the streak value their
/// last record closed with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Streak {
    /// What the streak tracks
    pub streak_type: StreakType,
    /// Running length at the most recent record
    pub current: u32,
    /// Longest run seen in the window
    pub best: u32,
    /// Date the streak last broke (the day before a gap), if it ever did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_break: Option<NaiveDate>,
}

/// Walk sorted distinct dates and fold consecutive-day runs into a streak.
///
/// A day gap of exactly 1 extends the run; a gap greater than 1 closes it,
/// records the break, and restarts the run at 1.
#[must_use]
pub fn compute_streak(dates: &[NaiveDate], streak_type: StreakType) -> Streak {
    let mut sorted: Vec<NaiveDate> = dates.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if sorted.is_empty() {
        return Streak {
            streak_type,
            current: 0,
            best: 0,
            last_break: None,
        };
    }

    let mut run: u32 = 1;
    let mut best: u32 = 1;
    let mut last_break: Option<NaiveDate> = None;

    for pair in sorted.windows(2) {
        let gap = (pair[1] - pair[0]).num_days();
        if gap == 1 {
            run += 1;
        } else {
            last_break = Some(pair[0]);
            run = 1;
        }
        best = best.max(run);
    }

    Streak {
        streak_type,
        current: run,
        best,
        last_break,
    }
}

/// Plateau risk (0-100) for an exercise from its per-session top loads.
///
/// Classified over the most recent `min_observations` loads, mirroring the
/// recency window [`weight_plateaued`] uses: low variance with a flat trend
/// scores high risk; fewer points than the minimum score 0.
#[must_use]
pub fn plateau_risk(loads: &[f64], config: &PlateauConfig) -> u8 {
    if loads.len() < config.min_observations {
        return 0;
    }

    let recent = &loads[loads.len() - config.min_observations..];
    let var = variance(recent);
    let trend = trend_percent(recent).abs();

    if var < config.low_variance && trend < config.low_trend_percent {
        config.high_risk
    } else if var < config.moderate_variance && trend < config.moderate_trend_percent {
        config.moderate_risk
    } else {
        config.base_risk
    }
}

/// Whether body weight has plateaued over the most recent entries
#[must_use]
pub fn weight_plateaued(entries: &[WeightEntry], config: &PlateauConfig) -> bool {
    if entries.len() < config.weight_min_entries {
        return false;
    }
    let recent: Vec<f64> = entries
        .iter()
        .rev()
        .take(config.weight_min_entries)
        .map(|e| e.weight_kg)
        .collect();
    variance(&recent) < config.weight_variance_threshold
}

/// Threshold-based pattern rules.
///
/// Rules are independent and order-insensitive; each carries a fixed
/// confidence constant rather than a computed one.
pub struct PatternDetector<'a> {
    config: &'a PatternConfig,
}

impl<'a> PatternDetector<'a> {
    /// Create a detector over the given thresholds
    #[must_use]
    pub const fn new(config: &'a PatternConfig) -> Self {
        Self { config }
    }

    /// Evaluate every rule over the window ending at `window_end`
    #[must_use]
    pub fn detect(
        &self,
        workouts: &[WorkoutSummary],
        nutrition: &[NutritionSummary],
        body_weight_kg: f64,
        window_end: NaiveDate,
    ) -> Vec<Pattern> {
        let mut patterns = Vec::new();
        patterns.extend(self.consistency_rule(workouts, window_end));
        patterns.extend(self.overload_rule(workouts));
        patterns.extend(self.protein_rule(nutrition, body_weight_kg));
        patterns.extend(self.recovery_rule(workouts, window_end));
        patterns
    }

    fn window_days(&self) -> i64 {
        i64::from(self.config.window_days)
    }

    fn timeframe(&self) -> String {
        format!("last_{}_days", self.config.window_days)
    }

    fn workout_days_in_window(&self, workouts: &[WorkoutSummary], window_end: NaiveDate) -> u32 {
        let window_start = window_end - chrono::Duration::days(self.window_days() - 1);
        let mut dates: Vec<NaiveDate> = workouts
            .iter()
            .map(|w| w.date)
            .filter(|d| *d >= window_start && *d <= window_end)
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates.len() as u32
    }

    fn consistency_rule(
        &self,
        workouts: &[WorkoutSummary],
        window_end: NaiveDate,
    ) -> Option<Pattern> {
        let workout_days = self.workout_days_in_window(workouts, window_end);
        let ratio = f64::from(workout_days) / f64::from(self.config.window_days);

        if ratio > self.config.consistency_high_ratio {
            Some(Pattern {
                pattern_type: PatternType::Positive,
                category: PatternCategory::Consistency,
                description: format!(
                    "Trained on {workout_days} of the last {} days",
                    self.config.window_days
                ),
                confidence: self.config.consistency_positive_confidence,
                timeframe: self.timeframe(),
                impact: "Strong training habit supports steady progress".to_owned(),
            })
        } else if ratio < self.config.consistency_low_ratio {
            Some(Pattern {
                pattern_type: PatternType::Negative,
                category: PatternCategory::Consistency,
                description: format!(
                    "Only {workout_days} workout days in the last {} days",
                    self.config.window_days
                ),
                confidence: self.config.consistency_negative_confidence,
                timeframe: self.timeframe(),
                impact: "Irregular training slows adaptation".to_owned(),
            })
        } else {
            None
        }
    }

    fn overload_rule(&self, workouts: &[WorkoutSummary]) -> Option<Pattern> {
        let volumes: Vec<f64> = workouts
            .iter()
            .map(|w| w.total_volume_kg)
            .filter(|v| *v > 0.0)
            .collect();
        if volumes.len() < self.config.min_volume_workouts {
            debug!(
                volume_workouts = volumes.len(),
                "too few volume-bearing workouts for overload rule"
            );
            return None;
        }

        let trend = trend_percent(&volumes);
        (trend > self.config.overload_trend_percent).then(|| Pattern {
            pattern_type: PatternType::Positive,
            category: PatternCategory::Workout,
            description: format!("Training volume trending up {trend:.1}% per session"),
            confidence: self.config.overload_confidence,
            timeframe: self.timeframe(),
            impact: "Progressive overload is driving adaptation".to_owned(),
        })
    }

    fn protein_rule(&self, nutrition: &[NutritionSummary], body_weight_kg: f64) -> Option<Pattern> {
        if nutrition.is_empty() || body_weight_kg <= 0.0 {
            return None;
        }
        let average_protein =
            nutrition.iter().map(|n| n.protein_g).sum::<f64>() / nutrition.len() as f64;
        let reference = body_weight_kg * self.config.protein_reference_g_per_kg;
        if reference <= 0.0 {
            return None;
        }
        let ratio = average_protein / reference;

        if ratio >= self.config.protein_good_ratio {
            Some(Pattern {
                pattern_type: PatternType::Positive,
                category: PatternCategory::Nutrition,
                description: format!("Averaging {average_protein:.0}g protein per day"),
                confidence: self.config.protein_positive_confidence,
                timeframe: self.timeframe(),
                impact: "Protein intake supports recovery and muscle retention".to_owned(),
            })
        } else if ratio < self.config.protein_low_ratio {
            Some(Pattern {
                pattern_type: PatternType::Negative,
                category: PatternCategory::Nutrition,
                description: format!(
                    "Averaging {average_protein:.0}g protein per day, well below the {reference:.0}g reference"
                ),
                confidence: self.config.protein_negative_confidence,
                timeframe: self.timeframe(),
                impact: "Low protein limits recovery and muscle retention".to_owned(),
            })
        } else {
            None
        }
    }

    fn recovery_rule(&self, workouts: &[WorkoutSummary], window_end: NaiveDate) -> Option<Pattern> {
        let workout_days = self.workout_days_in_window(workouts, window_end);
        let rest_days = self.config.window_days.saturating_sub(workout_days);
        (rest_days < self.config.min_rest_days).then(|| Pattern {
            pattern_type: PatternType::Negative,
            category: PatternCategory::Recovery,
            description: format!(
                "Only {rest_days} rest days in the last {} days",
                self.config.window_days
            ),
            confidence: self.config.recovery_confidence,
            timeframe: self.timeframe(),
            impact: "Insufficient rest raises overtraining risk".to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::PlateauConfig;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn streak_of_three_consecutive_days() {
        let dates = [date(2026, 3, 1), date(2026, 3, 2), date(2026, 3, 3)];
        let streak = compute_streak(&dates, StreakType::Workout);
        assert_eq!(streak.current, 3);
        assert_eq!(streak.best, 3);
        assert!(streak.last_break.is_none());
    }

    #[test]
    fn streak_resets_on_gap_and_records_break() {
        let dates = [date(2026, 3, 1), date(2026, 3, 3)];
        let streak = compute_streak(&dates, StreakType::Logging);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.best, 1);
        assert_eq!(streak.last_break, Some(date(2026, 3, 1)));
    }

    #[test]
    fn streak_survives_early_break() {
        // 2 days, gap, then 4 days: best 4, current 4, break at day 2
        let dates = [
            date(2026, 3, 1),
            date(2026, 3, 2),
            date(2026, 3, 5),
            date(2026, 3, 6),
            date(2026, 3, 7),
            date(2026, 3, 8),
        ];
        let streak = compute_streak(&dates, StreakType::Workout);
        assert_eq!(streak.current, 4);
        assert_eq!(streak.best, 4);
        assert_eq!(streak.last_break, Some(date(2026, 3, 2)));
    }

    #[test]
    fn streak_empty_input() {
        let streak = compute_streak(&[], StreakType::Goal);
        assert_eq!(streak.current, 0);
        assert_eq!(streak.best, 0);
    }

    #[test]
    fn plateau_risk_high_for_flat_loads() {
        let config = PlateauConfig::default();
        let loads = [100.0, 100.0, 101.0, 100.0, 99.0];
        assert_eq!(plateau_risk(&loads, &config), 80);
    }

    #[test]
    fn plateau_risk_zero_below_min_observations() {
        let config = PlateauConfig::default();
        assert_eq!(plateau_risk(&[100.0, 100.0, 100.0], &config), 0);
    }

    #[test]
    fn plateau_risk_low_for_rising_loads() {
        let config = PlateauConfig::default();
        let loads = [100.0, 110.0, 120.0, 130.0, 140.0];
        assert_eq!(plateau_risk(&loads, &config), 20);
    }

    #[test]
    fn plateau_risk_sees_flat_tail_after_earlier_gains() {
        let config = PlateauConfig::default();
        let loads = [80.0, 85.0, 90.0, 95.0, 100.0, 100.0, 100.0, 100.0];
        assert_eq!(plateau_risk(&loads, &config), config.high_risk);
    }
}
