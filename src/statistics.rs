// ABOUTME: Statistical primitives for fitness trend calculations
// ABOUTME: Least-squares slope, mean-normalized trend percent, and population variance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(clippy::cast_precision_loss)] // Safe: statistical calculations with controlled ranges

//! Statistical primitives shared by the analysis modules.
//!
//! Everything here degrades rather than fails: series too short for a
//! statistic return a neutral zero, and any ratio with a non-positive
//! denominator short-circuits to zero instead of propagating `NaN`.

/// Mean of a series; 0 for an empty series
#[must_use]
pub fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    series.iter().sum::<f64>() / series.len() as f64
}

/// Population variance of a series; 0 below 2 points
#[must_use]
pub fn variance(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let m = mean(series);
    series.iter().map(|v| (v - m).powi(2)).sum::<f64>() / series.len() as f64
}

/// Least-squares slope over evenly indexed observations (x = 0, 1, 2, ...).
///
/// `slope = (n*sum(xy) - sum(x)*sum(y)) / (n*sum(x^2) - sum(x)^2)`;
/// 0 below 2 points or when the denominator vanishes.
#[must_use]
pub fn least_squares_slope(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }

    let n = series.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_x_y = 0.0;
    let mut sum_xx = 0.0;
    for (i, &y) in series.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_x_y = x.mul_add(y, sum_x_y);
        sum_xx = x.mul_add(x, sum_xx);
    }

    let denominator = n.mul_add(sum_xx, -(sum_x * sum_x));
    if denominator.abs() < f64::EPSILON {
        return 0.0;
    }
    n.mul_add(sum_x_y, -(sum_x * sum_y)) / denominator
}

/// Dimensionless trend of a series as a percentage per step.
///
/// The least-squares slope normalized by the series mean, times 100. Returns
/// 0 for series shorter than 2 points or when the mean is not positive.
#[must_use]
pub fn trend_percent(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let m = mean(series);
    if m <= 0.0 {
        return 0.0;
    }
    least_squares_slope(series) / m * 100.0
}
