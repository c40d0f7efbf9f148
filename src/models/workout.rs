// ABOUTME: Workout data models for training analysis
// ABOUTME: WorkoutRecord, SetEntry, WorkoutSummary, and ExerciseMetric definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broad workout classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutType {
    /// Resistance training
    Strength,
    /// Cardiovascular training
    Cardio,
    /// Mobility and stretching
    Flexibility,
    /// Sport practice or competition
    Sport,
}

/// A single logged set within an exercise
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SetEntry {
    /// Repetitions performed
    pub reps: u32,
    /// Load in kilograms (0 for bodyweight work)
    pub weight_kg: f64,
    /// Rate of perceived exertion (1-10), if the athlete logged it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpe: Option<f64>,
}

/// A single exercise within a workout, with all its logged sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// Exercise name as logged by the athlete
    pub name: String,
    /// Logged sets in order
    pub sets: Vec<SetEntry>,
}

impl ExerciseEntry {
    /// Total volume for this exercise entry (sum of reps x load over all sets)
    #[must_use]
    pub fn volume_kg(&self) -> f64 {
        self.sets
            .iter()
            .map(|s| f64::from(s.reps) * s.weight_kg)
            .sum()
    }
}

/// Raw workout record supplied by the data-storage collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Unique identifier for this workout
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// When the workout started
    pub started_at: DateTime<Utc>,
    /// Workout classification
    pub workout_type: WorkoutType,
    /// Total duration in minutes
    pub duration_minutes: u32,
    /// Exercises performed, in order
    pub exercises: Vec<ExerciseEntry>,
}

/// Per-workout summary derived by the aggregator.
///
/// Immutable once computed; recomputed whenever source logs change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Calendar date of the workout
    pub date: NaiveDate,
    /// Workout classification
    pub workout_type: WorkoutType,
    /// Total duration in minutes
    pub duration_minutes: u32,
    /// Number of distinct exercises performed
    pub exercise_count: usize,
    /// Total volume in kilograms (sum of reps x load over every set)
    pub total_volume_kg: f64,
    /// Mean RPE across sets that logged one; `None` when no set did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_intensity: Option<f64>,
    /// Distinct muscle groups touched, from the exercise lookup table
    pub muscle_groups: Vec<String>,
}

/// Kind of personal best tracked per exercise
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PersonalBestKind {
    /// Heaviest single load lifted
    MaxLoad,
    /// Highest single-session volume
    SessionVolume,
    /// Best estimated one-rep max (Epley)
    EstimatedOneRepMax,
}

/// A personal best for one exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonalBest {
    /// What was bested
    pub kind: PersonalBestKind,
    /// Value in kilograms
    pub value_kg: f64,
    /// Date the best was set
    pub date: NaiveDate,
}

/// Per-exercise analysis over the whole window.
///
/// One instance per distinct exercise name per analysis run; owned by the
/// run, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseMetric {
    /// Exercise name
    pub exercise: String,
    /// Total volume across the window (kg)
    pub total_volume_kg: f64,
    /// Total sets logged
    pub total_sets: u32,
    /// Total reps logged
    pub total_reps: u32,
    /// Mean load across sets (kg)
    pub average_load_kg: f64,
    /// Heaviest load across sets (kg)
    pub max_load_kg: f64,
    /// Estimated one-rep max via Epley: load x (1 + reps/30)
    pub estimated_one_rep_max_kg: f64,
    /// Session-volume trend over the window (percent)
    pub volume_progression_percent: f64,
    /// Top-set load trend over the window (percent)
    pub strength_progression_percent: f64,
    /// Sessions per week across the window
    pub sessions_per_week: f64,
    /// Stagnation likelihood, 0-100
    pub plateau_risk: u8,
    /// Date of the most recent session including this exercise
    pub last_performed: NaiveDate,
    /// Personal bests within the window
    pub personal_bests: Vec<PersonalBest>,
}
