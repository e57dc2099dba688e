//! Error types for the volume driver.
//!
//! Every failure a lifecycle operation can report is a [`DriverError`]. Its
//! `Display` output is the cause string handed back to the plugin host.

use thiserror::Error;

/// Unified error type for dataset and volume operations.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Startup configuration is unusable (no roots, root creation failed).
    #[error("configuration error: {0}")]
    Config(String),

    /// No dataset exists at the resolved path.
    #[error("volume {0} not found")]
    NotFound(String),

    /// A dataset already occupies the create target.
    #[error("volume already exists: {0}")]
    AlreadyExists(String),

    /// Any other backend failure, with the backend's cause attached.
    #[error("{op} failed for {dataset}: {reason}")]
    Backend {
        op: &'static str,
        dataset: String,
        reason: String,
    },

    /// An optional dataset property could not be read.
    #[error("property {property} unavailable on {dataset}: {reason}")]
    PropertyUnavailable {
        dataset: String,
        property: &'static str,
        reason: String,
    },

    /// The blocking worker running a lifecycle call did not complete.
    #[error("worker task failed: {0}")]
    Task(String),
}

impl DriverError {
    /// Build a [`DriverError::Backend`] from anything displayable.
    pub fn backend<E: std::fmt::Display>(op: &'static str, dataset: &str, e: E) -> Self {
        Self::Backend {
            op,
            dataset: dataset.to_string(),
            reason: e.to_string(),
        }
    }
}

pub type DriverResult<T> = Result<T, DriverError>;
