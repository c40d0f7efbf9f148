// ABOUTME: Stateless analytics facade: fetch via collaborators, run the pure pipeline
// ABOUTME: One AnalysisReport or MealPlan per invocation, no shared mutable state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::cast_precision_loss)] // Safe: day counts into score arithmetic

use crate::config::EngineConfig;
use crate::errors::{AppError, AppResult};
use crate::insights::{ActionItem, Insight, InsightEngine};
use crate::meal_planner::{
    slot_priorities, slot_target, slots_for_distribution, FoodAllocator, MealPlanner,
};
use crate::meal_timing::{MealTimingPlanner, MealTimingStrategy};
use crate::metrics::{MetricsAggregator, MuscleGroupAnalysis, ProgressionAnalysis};
use crate::models::{
    ExerciseMetric, FoodAlternatives, MacroTargets, MealPlan, NutritionProfile, NutritionSummary,
    PlannedMeal, WorkoutSummary,
};
use crate::nutrition_calculator::TargetCalculator;
use crate::pattern_detection::{
    compute_streak, weight_plateaued, Pattern, PatternDetector, Streak, StreakType,
};
use crate::providers::{FoodCatalog, HistoryProvider};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Complete analysis output for one user and window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// User the report belongs to
    pub user_id: Uuid,
    /// Window start
    pub window_start: DateTime<Utc>,
    /// Window end
    pub window_end: DateTime<Utc>,
    /// Per-workout summaries, date-ordered
    pub workout_summaries: Vec<WorkoutSummary>,
    /// Per-day nutrition summaries, date-ordered
    pub nutrition_summaries: Vec<NutritionSummary>,
    /// Per-exercise metrics, name-ordered
    pub exercise_metrics: Vec<ExerciseMetric>,
    /// Overall strength progression
    pub progression: ProgressionAnalysis,
    /// Per-muscle-group volume analysis
    pub muscle_groups: Vec<MuscleGroupAnalysis>,
    /// Workout and logging streaks
    pub streaks: Vec<Streak>,
    /// Detected behavioral patterns
    pub patterns: Vec<Pattern>,
    /// Whether body weight has plateaued
    pub weight_plateaued: bool,
    /// Daily macro targets derived from the profile
    pub targets: MacroTargets,
    /// Severity-ordered insights (workout then nutrition rules)
    pub insights: Vec<Insight>,
    /// Recommended actions derived from the insights
    pub action_items: Vec<ActionItem>,
    /// Overall program score, 0-100
    pub program_score: u32,
}

/// Stateless analytics engine.
///
/// Owns only configuration; every invocation is a pure function of its
/// inputs, so one engine instance serves concurrent users safely.
pub struct AnalyticsEngine {
    config: EngineConfig,
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl AnalyticsEngine {
    /// Create an engine over the given configuration
    #[must_use]
    pub const fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Create an engine after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when any configuration section is out of range.
    pub fn with_validated_config(config: EngineConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Borrow the engine's configuration
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Fetch a user's history and run the full analysis pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when a collaborator fails or the window is
    /// inverted. Insufficient data never errors; the affected statistics
    /// degrade to neutral values instead.
    pub async fn analyze(
        &self,
        provider: &dyn HistoryProvider,
        user_id: Uuid,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> AppResult<AnalysisReport> {
        if window_end <= window_start {
            return Err(AppError::invalid_input(
                "analysis window end must be after its start",
            ));
        }

        let workouts = provider
            .fetch_workouts(user_id, window_start, window_end)
            .await?;
        let meals = provider.fetch_meals(user_id, window_start, window_end).await?;
        let weights = provider
            .fetch_weights(user_id, window_start, window_end)
            .await?;
        let profile = provider.fetch_profile(user_id).await?;

        info!(
            %user_id,
            workouts = workouts.len(),
            meals = meals.len(),
            weights = weights.len(),
            "analysis inputs fetched"
        );

        let aggregator = MetricsAggregator::new(&self.config);
        let workout_summaries = aggregator.summarize_workouts(&workouts);
        let nutrition_summaries = MetricsAggregator::summarize_nutrition(&meals);
        let ordered_weights = MetricsAggregator::order_weights(&weights);

        let exercise_metrics = aggregator.exercise_metrics(&workouts);
        let progression = aggregator.progression_analysis(&exercise_metrics);
        let muscle_groups = aggregator.muscle_group_analysis(&workouts, &exercise_metrics);

        let workout_dates: Vec<NaiveDate> = workout_summaries.iter().map(|s| s.date).collect();
        let logging_dates: Vec<NaiveDate> = nutrition_summaries.iter().map(|s| s.date).collect();
        let streaks = vec![
            compute_streak(&workout_dates, StreakType::Workout),
            compute_streak(&logging_dates, StreakType::Logging),
        ];

        let detector = PatternDetector::new(&self.config.patterns);
        let patterns = detector.detect(
            &workout_summaries,
            &nutrition_summaries,
            profile.weight_kg,
            window_end.date_naive(),
        );

        let calculator = TargetCalculator::new(&self.config);
        let targets = calculator.calculate_targets(&profile)?;

        let insight_engine = InsightEngine::new(&self.config);
        let mut insights =
            insight_engine.workout_insights(&exercise_metrics, &progression, &muscle_groups);
        insights.extend(insight_engine.nutrition_insights(&nutrition_summaries, &targets));
        let action_items = InsightEngine::action_items(&insights);

        let consistency = self.workout_consistency(&workout_dates, window_end.date_naive());
        let adherence = Self::nutrition_adherence(&nutrition_summaries, &targets);
        let program_score = insight_engine.program_score(consistency, adherence, progression.direction);

        Ok(AnalysisReport {
            user_id,
            window_start,
            window_end,
            workout_summaries,
            nutrition_summaries,
            exercise_metrics,
            progression,
            muscle_groups,
            streaks,
            patterns,
            weight_plateaued: weight_plateaued(&ordered_weights, &self.config.plateau),
            targets,
            insights,
            action_items,
            program_score,
        })
    }

    /// Derive daily macro targets for a profile without fetching history.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when the profile is outside plausible ranges.
    pub fn calculate_targets(&self, profile: &NutritionProfile) -> AppResult<MacroTargets> {
        TargetCalculator::new(&self.config).calculate_targets(profile)
    }

    /// Select a meal-timing strategy for a profile
    #[must_use]
    pub fn meal_timing(
        &self,
        profile: &NutritionProfile,
        workout_times: &[DateTime<Utc>],
    ) -> MealTimingStrategy {
        MealTimingPlanner::new(&self.config).plan(profile, workout_times)
    }

    /// Build a daily meal plan from the catalog.
    ///
    /// Targets and timing are derived from the profile; each meal slot is
    /// filled greedily from the catalog's candidates, then alternatives are
    /// attached per selected food.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] when the profile is invalid or the catalog fails.
    pub async fn plan_meals(
        &self,
        catalog: &dyn FoodCatalog,
        profile: &NutritionProfile,
        workout_times: &[DateTime<Utc>],
        date: NaiveDate,
    ) -> AppResult<MealPlan> {
        let calculator = TargetCalculator::new(&self.config);
        let targets = calculator.calculate_targets(profile)?;
        let timing = MealTimingPlanner::new(&self.config).plan(profile, workout_times);

        let slots = slots_for_distribution(timing.meal_distribution.len());
        let priorities = slot_priorities(&timing.meal_distribution);
        let allocator = FoodAllocator::new(&self.config);
        let max_alternatives = self.config.allocator.max_alternatives;

        let mut meals = Vec::with_capacity(slots.len());
        for ((slot, percent), priority) in slots
            .into_iter()
            .zip(timing.meal_distribution.iter().copied())
            .zip(priorities)
        {
            let target = slot_target(&targets, percent);
            let candidates = catalog.candidates_for(slot, profile).await?;
            let foods = allocator.allocate(slot, &candidates, &target);
            debug!(slot = ?slot, selected = foods.len(), "meal slot allocated");

            let mut alternatives = Vec::with_capacity(foods.len());
            for food in &foods {
                let options = catalog.similar_foods(&food.name, max_alternatives).await?;
                alternatives.push(FoodAlternatives {
                    for_food: food.name.clone(),
                    options,
                });
            }

            meals.push(PlannedMeal {
                slot,
                target,
                priority,
                foods,
                alternatives,
            });
        }

        Ok(MealPlanner::new(&self.config).assemble(date, profile, &targets, meals))
    }

    /// Workout days over the pattern window as a 0-100 score
    fn workout_consistency(&self, workout_dates: &[NaiveDate], window_end: NaiveDate) -> f64 {
        let window_days = self.config.patterns.window_days;
        let window_start = window_end - chrono::Duration::days(i64::from(window_days) - 1);
        let mut days: Vec<NaiveDate> = workout_dates
            .iter()
            .copied()
            .filter(|d| *d >= window_start && *d <= window_end)
            .collect();
        days.sort_unstable();
        days.dedup();
        (days.len() as f64 / f64::from(window_days) * 100.0).min(100.0)
    }

    /// Mean closeness of daily calories and protein to target, 0-100
    fn nutrition_adherence(summaries: &[NutritionSummary], targets: &MacroTargets) -> f64 {
        if summaries.is_empty() {
            return 0.0;
        }
        let calorie_target = f64::from(targets.calories);
        let protein_target = f64::from(targets.protein_g);
        if calorie_target <= 0.0 || protein_target <= 0.0 {
            return 0.0;
        }
        let mut score_sum = 0.0;
        for day in summaries {
            let calorie_dev = ((day.total_calories - calorie_target).abs() / calorie_target
                * 100.0)
                .min(100.0);
            let protein_dev =
                ((day.protein_g - protein_target).abs() / protein_target * 100.0).min(100.0);
            score_sum += 100.0 - (calorie_dev + protein_dev) / 2.0;
        }
        (score_sum / summaries.len() as f64).max(0.0)
    }
}
