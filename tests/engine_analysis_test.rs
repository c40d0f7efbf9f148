// ABOUTME: End-to-end analysis tests through the AnalyticsEngine facade
// ABOUTME: Synthetic history in, full AnalysisReport out, checked against known scenarios
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::cast_possible_wrap)] // Safe: small synthetic indices

mod helpers;

use fitforge::engine::AnalyticsEngine;
use fitforge::pattern_detection::{PatternCategory, PatternType, StreakType};
use helpers::{day, default_profile, meal, strength_workout, test_user, weight, SyntheticHistory};

fn engine() -> AnalyticsEngine {
    AnalyticsEngine::default()
}

#[tokio::test]
async fn flat_loads_flag_plateau() {
    let mut history = SyntheticHistory::new(default_profile());
    // Five bench sessions at essentially the same top load.
    for (i, load) in [100.0, 100.0, 101.0, 100.0, 99.0].into_iter().enumerate() {
        history
            .workouts
            .push(strength_workout(day(i as i64 * 3), "bench press", load));
    }

    let report = engine()
        .analyze(&history, test_user(), helpers::at(day(0), 0), helpers::at(day(29), 23))
        .await
        .unwrap();

    let bench = report
        .exercise_metrics
        .iter()
        .find(|m| m.exercise == "bench press")
        .unwrap();
    assert_eq!(bench.plateau_risk, 80);
    assert!(report
        .insights
        .iter()
        .any(|i| i.insight_type == "plateau_detected"));
}

#[tokio::test]
async fn frequent_training_yields_positive_consistency() {
    let mut history = SyntheticHistory::new(default_profile());
    // 25 workout days out of 30.
    for i in 0..25 {
        history
            .workouts
            .push(strength_workout(day(i), "squat", 100.0 + i as f64 * 2.0));
    }

    let report = engine()
        .analyze(&history, test_user(), helpers::at(day(0), 0), helpers::at(day(29), 23))
        .await
        .unwrap();

    let consistency = report
        .patterns
        .iter()
        .find(|p| p.category == PatternCategory::Consistency)
        .unwrap();
    assert_eq!(consistency.pattern_type, PatternType::Positive);
    assert!((consistency.confidence - 0.9).abs() < f64::EPSILON);
}

#[tokio::test]
async fn sparse_training_yields_negative_consistency() {
    let mut history = SyntheticHistory::new(default_profile());
    // 8 workout days out of 30 sits below the 0.3 ratio.
    for i in 0..8 {
        history
            .workouts
            .push(strength_workout(day(i * 4), "deadlift", 140.0));
    }

    let report = engine()
        .analyze(&history, test_user(), helpers::at(day(0), 0), helpers::at(day(29), 23))
        .await
        .unwrap();

    let consistency = report
        .patterns
        .iter()
        .find(|p| p.category == PatternCategory::Consistency)
        .unwrap();
    assert_eq!(consistency.pattern_type, PatternType::Negative);
}

#[tokio::test]
async fn workout_streak_snapshot_reported() {
    let mut history = SyntheticHistory::new(default_profile());
    for i in [0, 1, 2, 5, 6] {
        history
            .workouts
            .push(strength_workout(day(i), "row", 60.0));
    }

    let report = engine()
        .analyze(&history, test_user(), helpers::at(day(0), 0), helpers::at(day(29), 23))
        .await
        .unwrap();

    let workout_streak = report
        .streaks
        .iter()
        .find(|s| s.streak_type == StreakType::Workout)
        .unwrap();
    assert_eq!(workout_streak.current, 2);
    assert_eq!(workout_streak.best, 3);
    assert_eq!(workout_streak.last_break, Some(day(2)));
}

#[tokio::test]
async fn stable_weight_reported_as_plateau() {
    let mut history = SyntheticHistory::new(default_profile());
    history.workouts.push(strength_workout(day(0), "squat", 100.0));
    for i in 0..6 {
        history.weights.push(weight(day(i * 2), 80.0 + (i % 2) as f64 * 0.2));
    }

    let report = engine()
        .analyze(&history, test_user(), helpers::at(day(0), 0), helpers::at(day(29), 23))
        .await
        .unwrap();
    assert!(report.weight_plateaued);
}

#[tokio::test]
async fn program_score_within_bounds() {
    let mut history = SyntheticHistory::new(default_profile());
    for i in 0..20 {
        history
            .workouts
            .push(strength_workout(day(i), "squat", 100.0 + i as f64 * 2.5));
        history.meals.push(meal(day(i), 2800.0, 165.0));
    }

    let report = engine()
        .analyze(&history, test_user(), helpers::at(day(0), 0), helpers::at(day(29), 23))
        .await
        .unwrap();
    assert!(report.program_score <= 100);
    assert!(report.program_score > 0);
}

#[tokio::test]
async fn empty_history_degrades_without_error() {
    let history = SyntheticHistory::new(default_profile());
    let report = engine()
        .analyze(&history, test_user(), helpers::at(day(0), 0), helpers::at(day(29), 23))
        .await
        .unwrap();

    assert!(report.exercise_metrics.is_empty());
    assert_eq!(report.progression.exercises_analyzed, 0);
    assert!(!report.weight_plateaued);
    assert_eq!(report.targets.protein_g, 160);
}

#[tokio::test]
async fn inverted_window_rejected() {
    let history = SyntheticHistory::new(default_profile());
    let result = engine()
        .analyze(&history, test_user(), helpers::at(day(10), 0), helpers::at(day(0), 0))
        .await;
    assert!(result.is_err());
}
