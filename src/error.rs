//! Error handling module for the planner
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Resolution and planning either succeed completely or fail with one of
//! these before any assertion is produced.

use thiserror::Error;

/// Main error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    /// The `osfamily` fact has no platform defaults entry
    #[error("Unsupported platform: osfamily '{0}' has no defaults")]
    UnsupportedPlatform(String),

    /// A supplied parameter failed validation
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// IO errors (reading parameter or facts files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Create an unsupported platform error
    pub fn unsupported_platform(os_family: impl Into<String>) -> Self {
        Self::UnsupportedPlatform(os_family.into())
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
