// ABOUTME: Raw-record aggregation into per-day and per-exercise summaries
// ABOUTME: Workout/nutrition/weight folding, ExerciseMetric build, muscle-group and progression analysis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::cast_precision_loss)] // Safe: fitness data conversions

//! Metrics aggregation.
//!
//! Pure transforms from raw collaborator records into the summaries the rest
//! of the engine consumes. Source records are never mutated; empty input
//! yields empty output, never an error.

use crate::config::EngineConfig;
use crate::models::{
    ExerciseEntry, ExerciseMetric, MealRecord, NutritionSummary, PersonalBest, PersonalBestKind,
    WeightEntry, WorkoutRecord, WorkoutSummary,
};
use crate::pattern_detection::plateau_risk;
use crate::statistics::trend_percent;
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Overall direction of training progression
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Strength is trending up
    Improving,
    /// Strength is flat
    Plateau,
    /// Strength is trending down
    Declining,
}

/// Window-level progression judgment across all exercises
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionAnalysis {
    /// Overall direction
    pub direction: TrendDirection,
    /// Mean strength-progression percent across exercises
    pub average_progression_percent: f64,
    /// Number of exercises that contributed
    pub exercises_analyzed: usize,
}

/// Per-muscle-group volume balance analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuscleGroupAnalysis {
    /// Muscle group name
    pub muscle_group: String,
    /// Total volume attributed to the group (kg)
    pub total_volume_kg: f64,
    /// Share of total volume, 0-1
    pub volume_share: f64,
    /// Normalized deviation from an equal share, 0-100
    pub imbalance_risk: f64,
    /// Mean strength progression of the group's exercises (percent)
    pub average_progression_percent: f64,
    /// Mean plateau risk of the group's exercises, 0-100
    pub average_plateau_risk: f64,
    /// Declining progression combined with high plateau risk
    pub overtrained: bool,
}

/// One exercise's appearances across the window, in date order
struct ExerciseSessions {
    dates: Vec<NaiveDate>,
    session_volumes: Vec<f64>,
    top_loads: Vec<f64>,
    total_sets: u32,
    total_reps: u32,
    load_sum: f64,
    load_count: u32,
    max_load: f64,
    max_load_date: NaiveDate,
    best_volume: f64,
    best_volume_date: NaiveDate,
    best_e1rm: f64,
    best_e1rm_date: NaiveDate,
}

/// Aggregates raw records into summaries.
///
/// Stateless apart from the injected configuration; instances are cheap and
/// safe to use from any number of threads.
pub struct MetricsAggregator<'a> {
    config: &'a EngineConfig,
}

impl<'a> MetricsAggregator<'a> {
    /// Create an aggregator over the given configuration
    #[must_use]
    pub const fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Fold raw workouts into per-workout summaries, ordered by date
    #[must_use]
    pub fn summarize_workouts(&self, records: &[WorkoutRecord]) -> Vec<WorkoutSummary> {
        let mut summaries: Vec<WorkoutSummary> = records
            .iter()
            .map(|record| self.summarize_workout(record))
            .collect();
        summaries.sort_by_key(|s| s.date);
        summaries
    }

    fn summarize_workout(&self, record: &WorkoutRecord) -> WorkoutSummary {
        let total_volume_kg: f64 = record.exercises.iter().map(ExerciseEntry::volume_kg).sum();

        let rpes: Vec<f64> = record
            .exercises
            .iter()
            .flat_map(|e| e.sets.iter().filter_map(|s| s.rpe))
            .collect();
        let average_intensity = if rpes.is_empty() {
            None
        } else {
            Some(rpes.iter().sum::<f64>() / rpes.len() as f64)
        };

        let mut muscle_groups: Vec<String> = Vec::new();
        for exercise in &record.exercises {
            let group = self.config.muscle_groups.group_for(&exercise.name);
            if group == crate::config::UNKNOWN_MUSCLE_GROUP {
                debug!(exercise = %exercise.name, "no muscle-group mapping, using unknown bucket");
            }
            if !muscle_groups.iter().any(|g| g == group) {
                muscle_groups.push(group.to_owned());
            }
        }

        WorkoutSummary {
            date: record.started_at.date_naive(),
            workout_type: record.workout_type,
            duration_minutes: record.duration_minutes,
            exercise_count: record.exercises.len(),
            total_volume_kg,
            average_intensity,
            muscle_groups,
        }
    }

    /// Fold meal entries into one summary per calendar day, ordered by date.
    ///
    /// Missing numeric fields count as zero.
    #[must_use]
    pub fn summarize_nutrition(meals: &[MealRecord]) -> Vec<NutritionSummary> {
        let mut by_date: BTreeMap<NaiveDate, NutritionSummary> = BTreeMap::new();

        for meal in meals {
            let date = meal.logged_at.date_naive();
            let summary = by_date.entry(date).or_insert_with(|| NutritionSummary {
                date,
                total_calories: 0.0,
                protein_g: 0.0,
                carbohydrates_g: 0.0,
                fat_g: 0.0,
                meal_count: 0,
                water_ml: None,
            });
            summary.total_calories += meal.calories.unwrap_or(0.0);
            summary.protein_g += meal.protein_g.unwrap_or(0.0);
            summary.carbohydrates_g += meal.carbohydrates_g.unwrap_or(0.0);
            summary.fat_g += meal.fat_g.unwrap_or(0.0);
            summary.meal_count += 1;
            if let Some(water) = meal.water_ml {
                summary.water_ml = Some(summary.water_ml.unwrap_or(0.0) + water);
            }
        }

        by_date.into_values().collect()
    }

    /// Return weight entries sorted ascending by date
    #[must_use]
    pub fn order_weights(entries: &[WeightEntry]) -> Vec<WeightEntry> {
        let mut ordered = entries.to_vec();
        ordered.sort_by_key(|e| e.date);
        ordered
    }

    /// Build one [`ExerciseMetric`] per distinct exercise name.
    ///
    /// Exercises are analyzed independently, so the per-exercise work fans
    /// out across threads; output order is by exercise name.
    #[must_use]
    pub fn exercise_metrics(&self, records: &[WorkoutRecord]) -> Vec<ExerciseMetric> {
        let sessions = Self::collect_sessions(records);

        let mut metrics: Vec<ExerciseMetric> = sessions
            .into_par_iter()
            .map(|(name, s)| self.build_metric(name, &s))
            .collect();
        metrics.sort_by(|a, b| a.exercise.cmp(&b.exercise));
        metrics
    }

    fn collect_sessions(records: &[WorkoutRecord]) -> Vec<(String, ExerciseSessions)> {
        let mut ordered: Vec<&WorkoutRecord> = records.iter().collect();
        ordered.sort_by_key(|r| r.started_at);

        let mut by_name: HashMap<String, ExerciseSessions> = HashMap::new();
        for record in ordered {
            let date = record.started_at.date_naive();
            for exercise in &record.exercises {
                let volume = exercise.volume_kg();
                let entry = by_name
                    .entry(exercise.name.clone())
                    .or_insert_with(|| ExerciseSessions {
                        dates: Vec::new(),
                        session_volumes: Vec::new(),
                        top_loads: Vec::new(),
                        total_sets: 0,
                        total_reps: 0,
                        load_sum: 0.0,
                        load_count: 0,
                        max_load: 0.0,
                        max_load_date: date,
                        best_volume: 0.0,
                        best_volume_date: date,
                        best_e1rm: 0.0,
                        best_e1rm_date: date,
                    });

                let mut top_load: f64 = 0.0;
                for set in &exercise.sets {
                    entry.total_sets += 1;
                    entry.total_reps += set.reps;
                    entry.load_sum += set.weight_kg;
                    entry.load_count += 1;
                    top_load = top_load.max(set.weight_kg);
                    if set.weight_kg > entry.max_load {
                        entry.max_load = set.weight_kg;
                        entry.max_load_date = date;
                    }
                    let e1rm = epley_one_rep_max(set.weight_kg, set.reps);
                    if e1rm > entry.best_e1rm {
                        entry.best_e1rm = e1rm;
                        entry.best_e1rm_date = date;
                    }
                }

                entry.dates.push(date);
                entry.session_volumes.push(volume);
                entry.top_loads.push(top_load);
                if volume > entry.best_volume {
                    entry.best_volume = volume;
                    entry.best_volume_date = date;
                }
            }
        }

        let mut grouped: Vec<(String, ExerciseSessions)> = by_name.into_iter().collect();
        grouped.sort_by(|a, b| a.0.cmp(&b.0));
        grouped
    }

    fn build_metric(&self, name: String, sessions: &ExerciseSessions) -> ExerciseMetric {
        let average_load_kg = if sessions.load_count == 0 {
            0.0
        } else {
            sessions.load_sum / f64::from(sessions.load_count)
        };

        let volume_progression_percent = trend_percent(&sessions.session_volumes);
        let strength_progression_percent = trend_percent(&sessions.top_loads);
        let risk = plateau_risk(&sessions.top_loads, &self.config.plateau);

        let span_days = sessions
            .dates
            .last()
            .zip(sessions.dates.first())
            .map_or(0, |(last, first)| (*last - *first).num_days());
        let weeks = (span_days as f64 / 7.0).max(1.0);
        let sessions_per_week = sessions.dates.len() as f64 / weeks;

        let last_performed = sessions
            .dates
            .last()
            .copied()
            .unwrap_or(sessions.max_load_date);

        let mut personal_bests = Vec::new();
        if sessions.max_load > 0.0 {
            personal_bests.push(PersonalBest {
                kind: PersonalBestKind::MaxLoad,
                value_kg: sessions.max_load,
                date: sessions.max_load_date,
            });
        }
        if sessions.best_volume > 0.0 {
            personal_bests.push(PersonalBest {
                kind: PersonalBestKind::SessionVolume,
                value_kg: sessions.best_volume,
                date: sessions.best_volume_date,
            });
        }
        if sessions.best_e1rm > 0.0 {
            personal_bests.push(PersonalBest {
                kind: PersonalBestKind::EstimatedOneRepMax,
                value_kg: sessions.best_e1rm,
                date: sessions.best_e1rm_date,
            });
        }

        ExerciseMetric {
            exercise: name,
            total_volume_kg: sessions.session_volumes.iter().sum(),
            total_sets: sessions.total_sets,
            total_reps: sessions.total_reps,
            average_load_kg,
            max_load_kg: sessions.max_load,
            estimated_one_rep_max_kg: sessions.best_e1rm,
            volume_progression_percent,
            strength_progression_percent,
            sessions_per_week,
            plateau_risk: risk,
            last_performed,
            personal_bests,
        }
    }

    /// Judge overall progression from the per-exercise metrics
    #[must_use]
    pub fn progression_analysis(&self, metrics: &[ExerciseMetric]) -> ProgressionAnalysis {
        if metrics.is_empty() {
            return ProgressionAnalysis {
                direction: TrendDirection::Plateau,
                average_progression_percent: 0.0,
                exercises_analyzed: 0,
            };
        }

        let average = metrics
            .iter()
            .map(|m| m.strength_progression_percent)
            .sum::<f64>()
            / metrics.len() as f64;

        let threshold = self.config.insights.strength_gain_percent;
        let direction = if average > threshold {
            TrendDirection::Improving
        } else if average < -threshold {
            TrendDirection::Declining
        } else {
            TrendDirection::Plateau
        };

        ProgressionAnalysis {
            direction,
            average_progression_percent: average,
            exercises_analyzed: metrics.len(),
        }
    }

    /// Per-muscle-group volume shares, imbalance risk, and overtraining flags
    #[must_use]
    pub fn muscle_group_analysis(
        &self,
        records: &[WorkoutRecord],
        metrics: &[ExerciseMetric],
    ) -> Vec<MuscleGroupAnalysis> {
        let mut volume_by_group: BTreeMap<String, f64> = BTreeMap::new();
        let mut progression_by_group: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        let mut risk_by_group: BTreeMap<String, Vec<f64>> = BTreeMap::new();

        for record in records {
            for exercise in &record.exercises {
                let group = self.config.muscle_groups.group_for(&exercise.name);
                *volume_by_group.entry(group.to_owned()).or_insert(0.0) += exercise.volume_kg();
            }
        }
        for metric in metrics {
            let group = self.config.muscle_groups.group_for(&metric.exercise);
            progression_by_group
                .entry(group.to_owned())
                .or_default()
                .push(metric.strength_progression_percent);
            risk_by_group
                .entry(group.to_owned())
                .or_default()
                .push(f64::from(metric.plateau_risk));
        }

        let total_volume: f64 = volume_by_group.values().sum();
        if total_volume <= 0.0 {
            return Vec::new();
        }
        let group_count = volume_by_group.len();
        let equal_share = 1.0 / group_count as f64;

        volume_by_group
            .into_iter()
            .map(|(group, volume)| {
                let share = volume / total_volume;
                let imbalance_risk = ((share - equal_share).abs() / equal_share * 100.0).min(100.0);
                let progressions = progression_by_group.get(&group);
                let average_progression_percent = progressions
                    .filter(|p| !p.is_empty())
                    .map_or(0.0, |p| p.iter().sum::<f64>() / p.len() as f64);
                let risks = risk_by_group.get(&group);
                let average_plateau_risk = risks
                    .filter(|r| !r.is_empty())
                    .map_or(0.0, |r| r.iter().sum::<f64>() / r.len() as f64);
                let overtrained = average_progression_percent
                    < self.config.insights.overtrained_progression_percent
                    && average_plateau_risk > f64::from(self.config.insights.plateau_risk_threshold);

                MuscleGroupAnalysis {
                    muscle_group: group,
                    total_volume_kg: volume,
                    volume_share: share,
                    imbalance_risk,
                    average_progression_percent,
                    average_plateau_risk,
                    overtrained,
                }
            })
            .collect()
    }
}

/// Estimated one-rep max via Epley: `load x (1 + reps/30)`
#[must_use]
pub fn epley_one_rep_max(load_kg: f64, reps: u32) -> f64 {
    if reps == 0 || load_kg <= 0.0 {
        return 0.0;
    }
    load_kg * (1.0 + f64::from(reps) / 30.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::SetEntry;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn epley_matches_reference_values() {
        // 100 kg x 10 reps -> 100 * (1 + 10/30) = 133.33
        assert!((epley_one_rep_max(100.0, 10) - 133.333_333).abs() < 1e-3);
        // A single rep is its own max
        assert!((epley_one_rep_max(120.0, 1) - 124.0).abs() < 1e-9);
        assert!(epley_one_rep_max(100.0, 0).abs() < f64::EPSILON);
    }

    fn workout(exercise: &str, sets: Vec<SetEntry>) -> WorkoutRecord {
        WorkoutRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            started_at: Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap(),
            workout_type: crate::models::WorkoutType::Strength,
            duration_minutes: 45,
            exercises: vec![ExerciseEntry {
                name: exercise.to_owned(),
                sets,
            }],
        }
    }

    #[test]
    fn intensity_ignores_sets_without_rpe() {
        let config = EngineConfig::default();
        let aggregator = MetricsAggregator::new(&config);
        let record = workout(
            "bench press",
            vec![
                SetEntry {
                    reps: 5,
                    weight_kg: 100.0,
                    rpe: Some(8.0),
                },
                SetEntry {
                    reps: 5,
                    weight_kg: 100.0,
                    rpe: None,
                },
                SetEntry {
                    reps: 5,
                    weight_kg: 100.0,
                    rpe: Some(9.0),
                },
            ],
        );
        let summaries = aggregator.summarize_workouts(std::slice::from_ref(&record));
        assert!((summaries[0].average_intensity.unwrap() - 8.5).abs() < 1e-9);
    }

    #[test]
    fn unmapped_exercise_falls_back_to_unknown_group() {
        let config = EngineConfig::default();
        let aggregator = MetricsAggregator::new(&config);
        let record = workout(
            "zercher carry",
            vec![SetEntry {
                reps: 10,
                weight_kg: 60.0,
                rpe: None,
            }],
        );
        let summaries = aggregator.summarize_workouts(std::slice::from_ref(&record));
        assert_eq!(summaries[0].muscle_groups, vec!["unknown".to_owned()]);
        assert!(summaries[0].average_intensity.is_none());
    }

    #[test]
    fn nutrition_folds_by_calendar_day_with_missing_as_zero() {
        let user = Uuid::new_v4();
        let entry = |hour: u32, calories: Option<f64>| MealRecord {
            id: Uuid::new_v4(),
            user_id: user,
            logged_at: Utc.with_ymd_and_hms(2026, 3, 2, hour, 0, 0).unwrap(),
            name: None,
            calories,
            protein_g: Some(30.0),
            carbohydrates_g: None,
            fat_g: None,
            water_ml: None,
        };
        let summaries =
            MetricsAggregator::summarize_nutrition(&[entry(8, Some(500.0)), entry(13, None)]);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].meal_count, 2);
        assert!((summaries[0].total_calories - 500.0).abs() < 1e-9);
        assert!((summaries[0].protein_g - 60.0).abs() < 1e-9);
        assert!(summaries[0].water_ml.is_none());
    }
}
