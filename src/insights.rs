// ABOUTME: Insight and action-item generation from aggregated metrics and pattern output
// ABOUTME: Independent threshold rules, severity-ordered output, overall program score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)] // Safe: score rounding

use crate::config::EngineConfig;
use crate::metrics::{MuscleGroupAnalysis, ProgressionAnalysis, TrendDirection};
use crate::models::{ExerciseMetric, MacroTargets, NutritionSummary};
use crate::statistics::{mean, variance};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// How urgently an insight deserves attention
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational
    Low,
    /// Worth adjusting soon
    Medium,
    /// Needs a programming change now
    High,
}

/// A single generated insight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    /// Rule identifier ("strength_gain", "plateau_detected", ...)
    pub insight_type: String,
    /// Urgency
    pub severity: Severity,
    /// Human-readable finding
    pub message: String,
    /// Rule-specific payload for the presentation layer
    pub data: Value,
}

/// A concrete recommended action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionItem {
    /// Action identifier ("deload", "raise_protein", ...)
    pub action_type: String,
    /// Urgency
    pub severity: Severity,
    /// What to do
    pub description: String,
}

/// Generates insights and action items from aggregated analysis output.
///
/// Rules are independent; ordering of the final list is by severity
/// descending, ties keeping rule-evaluation order.
pub struct InsightEngine<'a> {
    config: &'a EngineConfig,
}

impl<'a> InsightEngine<'a> {
    /// Create an engine over the given configuration
    #[must_use]
    pub const fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Evaluate every workout rule and return severity-ordered insights
    #[must_use]
    pub fn workout_insights(
        &self,
        metrics: &[ExerciseMetric],
        progression: &ProgressionAnalysis,
        muscle_groups: &[MuscleGroupAnalysis],
    ) -> Vec<Insight> {
        let rules = &self.config.insights;
        let mut insights = Vec::new();

        // Top progressing exercises above the gain threshold.
        let mut gainers: Vec<&ExerciseMetric> = metrics
            .iter()
            .filter(|m| m.strength_progression_percent > rules.strength_gain_percent)
            .collect();
        gainers.sort_by(|a, b| {
            b.strength_progression_percent
                .partial_cmp(&a.strength_progression_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for metric in gainers.into_iter().take(rules.strength_gain_top_n) {
            insights.push(Insight {
                insight_type: "strength_gain".to_owned(),
                severity: Severity::Low,
                message: format!(
                    "{} strength up {:.1}% over the analysis window",
                    metric.exercise, metric.strength_progression_percent
                ),
                data: json!({
                    "exercise": metric.exercise,
                    "progression_percent": metric.strength_progression_percent,
                }),
            });
        }

        for metric in metrics {
            if metric.plateau_risk > rules.plateau_risk_threshold {
                insights.push(Insight {
                    insight_type: "plateau_detected".to_owned(),
                    severity: Severity::Medium,
                    message: format!(
                        "{} has stalled; vary load or rep ranges",
                        metric.exercise
                    ),
                    data: json!({
                        "exercise": metric.exercise,
                        "plateau_risk": metric.plateau_risk,
                    }),
                });
            }
        }

        for group in muscle_groups {
            if group.imbalance_risk > rules.imbalance_risk_threshold {
                insights.push(Insight {
                    insight_type: "imbalance_warning".to_owned(),
                    severity: Severity::Medium,
                    message: format!(
                        "{} volume share deviates {:.0}% from an even split",
                        group.muscle_group, group.imbalance_risk
                    ),
                    data: json!({
                        "muscle_group": group.muscle_group,
                        "imbalance_risk": group.imbalance_risk,
                        "volume_share": group.volume_share,
                    }),
                });
            }
        }

        if progression.direction == TrendDirection::Improving {
            insights.push(Insight {
                insight_type: "peak_performance".to_owned(),
                severity: Severity::Low,
                message: format!(
                    "Overall strength trending up {:.1}% across {} exercises",
                    progression.average_progression_percent, progression.exercises_analyzed
                ),
                data: json!({
                    "average_progression_percent": progression.average_progression_percent,
                }),
            });
        }

        for group in muscle_groups {
            if group.overtrained {
                insights.push(Insight {
                    insight_type: "recovery_needed".to_owned(),
                    severity: Severity::High,
                    message: format!(
                        "{} shows declining progression with high plateau risk; schedule a deload",
                        group.muscle_group
                    ),
                    data: json!({
                        "muscle_group": group.muscle_group,
                        "average_progression_percent": group.average_progression_percent,
                        "average_plateau_risk": group.average_plateau_risk,
                    }),
                });
            }
        }

        sort_by_severity(&mut insights);
        insights
    }

    /// Compare logged intake against daily targets and its own day-to-day spread
    #[must_use]
    pub fn nutrition_insights(
        &self,
        summaries: &[NutritionSummary],
        targets: &MacroTargets,
    ) -> Vec<Insight> {
        let mut insights = Vec::new();
        if summaries.is_empty() {
            return insights;
        }
        let days = summaries.len() as f64;
        let daily_calories: Vec<f64> = summaries.iter().map(|s| s.total_calories).collect();
        let avg_calories = mean(&daily_calories);
        let avg_protein = summaries.iter().map(|s| s.protein_g).sum::<f64>() / days;

        let calorie_target = f64::from(targets.calories);
        if calorie_target > 0.0 {
            let ratio = avg_calories / calorie_target;
            if ratio < 0.85 {
                insights.push(Insight {
                    insight_type: "calorie_deficit_large".to_owned(),
                    severity: Severity::Medium,
                    message: format!(
                        "Averaging {avg_calories:.0} kcal against a {calorie_target:.0} kcal target"
                    ),
                    data: json!({ "average_calories": avg_calories, "target": targets.calories }),
                });
            } else if ratio > 1.15 {
                insights.push(Insight {
                    insight_type: "calorie_surplus_large".to_owned(),
                    severity: Severity::Medium,
                    message: format!(
                        "Averaging {avg_calories:.0} kcal against a {calorie_target:.0} kcal target"
                    ),
                    data: json!({ "average_calories": avg_calories, "target": targets.calories }),
                });
            }
        }

        // Day-to-day spread relative to the average, independent of the target.
        if avg_calories > 0.0 {
            let spread = variance(&daily_calories).sqrt() / avg_calories;
            if spread > self.config.insights.calorie_variation_threshold {
                insights.push(Insight {
                    insight_type: "calorie_intake_erratic".to_owned(),
                    severity: Severity::Low,
                    message: format!(
                        "Daily calories swing {:.0}% around the {avg_calories:.0} kcal average",
                        spread * 100.0
                    ),
                    data: json!({
                        "relative_spread": spread,
                        "average_calories": avg_calories,
                    }),
                });
            }
        }

        let avg_meals = summaries.iter().map(|s| f64::from(s.meal_count)).sum::<f64>() / days;
        if avg_meals < 2.0 {
            insights.push(Insight {
                insight_type: "logging_sparse".to_owned(),
                severity: Severity::Low,
                message: format!("Averaging {avg_meals:.1} logged meals per day"),
                data: json!({ "average_meals_per_day": avg_meals }),
            });
        }

        let protein_target = f64::from(targets.protein_g);
        if protein_target > 0.0 && avg_protein / protein_target < 0.8 {
            insights.push(Insight {
                insight_type: "protein_below_target".to_owned(),
                severity: Severity::Medium,
                message: format!(
                    "Averaging {avg_protein:.0}g protein against a {protein_target:.0}g target"
                ),
                data: json!({ "average_protein_g": avg_protein, "target_g": targets.protein_g }),
            });
        }

        sort_by_severity(&mut insights);
        insights
    }

    /// Derive concrete actions from the generated insights
    #[must_use]
    pub fn action_items(insights: &[Insight]) -> Vec<ActionItem> {
        let mut actions = Vec::new();
        for insight in insights {
            let action = match insight.insight_type.as_str() {
                "recovery_needed" => Some(ActionItem {
                    action_type: "deload".to_owned(),
                    severity: insight.severity,
                    description: "Cut volume 40-50% for one week on the flagged muscle group"
                        .to_owned(),
                }),
                "plateau_detected" => Some(ActionItem {
                    action_type: "vary_stimulus".to_owned(),
                    severity: insight.severity,
                    description: "Rotate rep ranges or swap a variation on the stalled lift"
                        .to_owned(),
                }),
                "imbalance_warning" => Some(ActionItem {
                    action_type: "rebalance_volume".to_owned(),
                    severity: insight.severity,
                    description: "Shift weekly sets toward under-trained muscle groups".to_owned(),
                }),
                "protein_below_target" => Some(ActionItem {
                    action_type: "raise_protein".to_owned(),
                    severity: insight.severity,
                    description: "Add a protein-dense food to each main meal".to_owned(),
                }),
                _ => None,
            };
            if let Some(action) = action {
                actions.push(action);
            }
        }
        actions
    }

    /// Overall program score, 0-100.
    ///
    /// Weighted sum of workout consistency and nutrition adherence plus a
    /// strength bonus keyed to the overall trend direction.
    #[must_use]
    pub fn program_score(
        &self,
        workout_consistency: f64,
        nutrition_adherence: f64,
        direction: TrendDirection,
    ) -> u32 {
        let rules = &self.config.insights;
        let bonus = match direction {
            TrendDirection::Improving => rules.improving_bonus,
            TrendDirection::Plateau => rules.plateau_bonus,
            TrendDirection::Declining => 0,
        };
        let weighted = workout_consistency.mul_add(
            rules.consistency_weight,
            nutrition_adherence * rules.adherence_weight,
        );
        (weighted + f64::from(bonus)).round().min(100.0) as u32
    }
}

/// Stable severity-descending sort
fn sort_by_severity(insights: &mut [Insight]) {
    insights.sort_by(|a, b| b.severity.cmp(&a.severity));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn metric(name: &str, progression: f64, risk: u8) -> ExerciseMetric {
        ExerciseMetric {
            exercise: name.to_owned(),
            total_volume_kg: 10_000.0,
            total_sets: 40,
            total_reps: 320,
            average_load_kg: 80.0,
            max_load_kg: 110.0,
            estimated_one_rep_max_kg: 120.0,
            volume_progression_percent: progression,
            strength_progression_percent: progression,
            sessions_per_week: 2.0,
            plateau_risk: risk,
            last_performed: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            personal_bests: vec![],
        }
    }

    #[test]
    fn strength_gain_limited_to_top_three() {
        let config = EngineConfig::default();
        let engine = InsightEngine::new(&config);
        let metrics = vec![
            metric("squat", 8.0, 20),
            metric("bench press", 7.0, 20),
            metric("deadlift", 9.0, 20),
            metric("overhead press", 6.0, 20),
        ];
        let progression = ProgressionAnalysis {
            direction: TrendDirection::Plateau,
            average_progression_percent: 2.0,
            exercises_analyzed: 4,
        };
        let insights = engine.workout_insights(&metrics, &progression, &[]);
        let gains: Vec<&Insight> = insights
            .iter()
            .filter(|i| i.insight_type == "strength_gain")
            .collect();
        assert_eq!(gains.len(), 3);
        assert!(gains[0].message.starts_with("deadlift"));
    }

    #[test]
    fn recovery_insight_outranks_plateau() {
        let config = EngineConfig::default();
        let engine = InsightEngine::new(&config);
        let metrics = vec![metric("squat", 0.5, 80)];
        let groups = vec![MuscleGroupAnalysis {
            muscle_group: "legs".to_owned(),
            total_volume_kg: 20_000.0,
            volume_share: 0.6,
            imbalance_risk: 20.0,
            average_progression_percent: -6.0,
            average_plateau_risk: 80.0,
            overtrained: true,
        }];
        let progression = ProgressionAnalysis {
            direction: TrendDirection::Declining,
            average_progression_percent: -6.0,
            exercises_analyzed: 1,
        };
        let insights = engine.workout_insights(&metrics, &progression, &groups);
        assert_eq!(insights[0].insight_type, "recovery_needed");
        assert_eq!(insights[0].severity, Severity::High);
    }

    fn summary(day: u32, calories: f64) -> NutritionSummary {
        NutritionSummary {
            date: NaiveDate::from_ymd_opt(2026, 3, day).unwrap(),
            total_calories: calories,
            protein_g: 150.0,
            carbohydrates_g: 200.0,
            fat_g: 70.0,
            meal_count: 3,
            water_ml: None,
        }
    }

    fn targets() -> MacroTargets {
        MacroTargets {
            calories: 2000,
            protein_g: 150,
            carbohydrates_g: 200,
            fat_g: 70,
            fiber_g: 28,
            sugar_max_g: 50,
            sodium_max_mg: 2300,
            protein_per_kg: 2.0,
            carbs_per_kg: 3.0,
            fat_percentage: 0.3,
            bmr: 1700.0,
            tdee: 2400.0,
        }
    }

    #[test]
    fn erratic_calories_flagged_even_when_average_on_target() {
        let config = EngineConfig::default();
        let engine = InsightEngine::new(&config);
        let summaries: Vec<NutritionSummary> = (1..=6)
            .map(|d| summary(d, if d % 2 == 0 { 2800.0 } else { 1200.0 }))
            .collect();
        let insights = engine.nutrition_insights(&summaries, &targets());
        assert!(insights
            .iter()
            .any(|i| i.insight_type == "calorie_intake_erratic"));
        assert!(!insights
            .iter()
            .any(|i| i.insight_type == "calorie_deficit_large"));
    }

    #[test]
    fn steady_calories_not_flagged_as_erratic() {
        let config = EngineConfig::default();
        let engine = InsightEngine::new(&config);
        let summaries: Vec<NutritionSummary> = (1..=6)
            .map(|d| summary(d, f64::from(d % 2).mul_add(50.0, 2000.0)))
            .collect();
        let insights = engine.nutrition_insights(&summaries, &targets());
        assert!(insights
            .iter()
            .all(|i| i.insight_type != "calorie_intake_erratic"));
    }

    #[test]
    fn program_score_weights_and_bonus() {
        let config = EngineConfig::default();
        let engine = InsightEngine::new(&config);
        // 80*0.4 + 90*0.3 + 30 = 89
        assert_eq!(engine.program_score(80.0, 90.0, TrendDirection::Improving), 89);
        // 80*0.4 + 90*0.3 + 0 = 59
        assert_eq!(engine.program_score(80.0, 90.0, TrendDirection::Declining), 59);
    }

    #[test]
    fn program_score_caps_at_100() {
        let config = EngineConfig::default();
        let engine = InsightEngine::new(&config);
        assert_eq!(
            engine.program_score(100.0, 100.0, TrendDirection::Improving),
            100
        );
    }

    #[test]
    fn action_items_follow_insights() {
        let insights = vec![Insight {
            insight_type: "plateau_detected".to_owned(),
            severity: Severity::Medium,
            message: "squat has stalled".to_owned(),
            data: serde_json::Value::Null,
        }];
        let actions = InsightEngine::action_items(&insights);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_type, "vary_stimulus");
    }
}
