// ABOUTME: Main library entry point for the FitForge analytics engine
// ABOUTME: Aggregation, trend analysis, macro targeting, meal planning, and insights
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # FitForge
//!
//! A fitness and nutrition analytics engine. Given a user's logged workouts,
//! meals, and body-weight history plus a profile, it derives exercise
//! metrics, behavioral patterns, daily macro targets, meal plans, and
//! actionable insights.
//!
//! ## Architecture
//!
//! The engine is a stateless library: all I/O happens behind the collaborator
//! traits in [`providers`], and every public entry point is a pure function
//! of its inputs.
//!
//! - **Models**: Serializable records crossing the API boundary
//! - **Config**: Every coefficient and threshold as versionable data
//! - **Metrics**: Workout aggregation and per-exercise analysis
//! - **Patterns**: Streaks, plateau risk, behavioral rules
//! - **Nutrition**: BMR/TDEE targets, meal timing, greedy food allocation
//! - **Insights**: Threshold rules over the aggregated output
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitforge::config::EngineConfig;
//! use fitforge::engine::AnalyticsEngine;
//! use fitforge::errors::AppResult;
//!
//! fn build_engine() -> AppResult<AnalyticsEngine> {
//!     AnalyticsEngine::with_validated_config(EngineConfig::default())
//! }
//! ```

/// Engine configuration: coefficients, thresholds, and lookup tables as data
pub mod config;
/// Stateless analytics facade and the `AnalysisReport` it produces
pub mod engine;
/// Unified error types
pub mod errors;
/// Insight and action-item generation from aggregated output
pub mod insights;
/// Greedy food allocation and daily meal-plan assembly
pub mod meal_planner;
/// Meal-timing strategy selection
pub mod meal_timing;
/// Raw-record aggregation and per-exercise metrics
pub mod metrics;
/// Serializable records crossing the engine boundary
pub mod models;
/// BMR/TDEE and daily macro-target derivation
pub mod nutrition_calculator;
/// Streaks, plateau risk, and behavioral pattern rules
pub mod pattern_detection;
/// Async collaborator traits for history storage and the food catalog
pub mod providers;
/// Statistical primitives shared by the analysis modules
pub mod statistics;

pub use engine::{AnalysisReport, AnalyticsEngine};
pub use errors::{AppError, AppResult};
