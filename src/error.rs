//! Error types for asgctl
//!
//! Library code uses `crate::error::Result<T>` which returns `AsgctlError`.
//! CLI code uses `anyhow::Result<T>` for top-level error handling; the
//! conversion happens at the binary boundary and preserves error chains.
//!
//! Expected operator-facing conditions (a group that cannot be found during
//! a downscale, an update the API rejected) are printed where they occur.
//! Anything else bubbles up through `main` for a non-zero exit.

use thiserror::Error;

/// Main error type for asgctl
#[derive(Error, Debug)]
pub enum AsgctlError {
    /// A describe/list call against the Fleet Management API failed.
    #[error("Fleet query error: {0}")]
    FleetQuery(String),

    /// A desired-capacity update failed. Never retried.
    #[error("Capacity update error: {0}")]
    Update(String),

    #[error("Autoscaling group not found: {0}")]
    GroupNotFound(String),

    /// The configured readiness-check cap was exhausted before the
    /// downscale gate held.
    #[error("Gave up waiting on group {group} after {attempts} readiness checks")]
    WaitTimeout { group: String, attempts: u32 },

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AsgctlError>;
