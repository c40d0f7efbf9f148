// ABOUTME: Unified error types for the analytics engine
// ABOUTME: AppError for caller-contract violations, ConfigError for invalid injected configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error handling for the engine.
//!
//! The analysis paths themselves never fail: insufficient data, zero
//! denominators, and lookup misses all degrade to neutral values. `AppError`
//! covers the remaining fallible surface — profile inputs that violate the
//! caller contract (non-positive weight, absurd age) and collaborator
//! failures surfaced through the facade.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The provided input is invalid
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// The provided value is outside the acceptable range
    #[serde(rename = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange,
    /// A collaborator (history provider, food catalog) failed
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError,
    /// Configuration is invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,
    /// An internal error occurred
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl AppError {
    /// Create an invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: message.into(),
        }
    }

    /// Create a value-out-of-range error
    pub fn out_of_range(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValueOutOfRange,
            message: message.into(),
        }
    }

    /// Create an external-service error for collaborator failures
    pub fn external(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ExternalServiceError,
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InternalError,
            message: message.into(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self {
            code: ErrorCode::ConfigInvalid,
            message: err.to_string(),
        }
    }
}

/// Result alias used across the engine
pub type AppResult<T> = Result<T, AppError>;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Value outside acceptable range (e.g., percentage not between 0-100)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Weights don't sum to required total (e.g., not 100%)
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Required configuration entry is missing
    #[error("Missing required entry: {0}")]
    MissingEntry(&'static str),
}
