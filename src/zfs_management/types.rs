// zfs_management/types.rs
// Dataset handle and the backend contract the volume layer drives

use crate::error::DriverResult;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt;

/// Opaque creation options, passed through to the backend untouched
pub type DatasetOptions = HashMap<String, String>;

/// A native dataset, addressed by its full slash-separated path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dataset {
    pub name: String,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        Dataset { name: name.into() }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Dataset operations the volume layer needs from the storage subsystem.
///
/// Every call is a bounded synchronous round trip to the backend.
/// `create_recursive` is the sole arbiter of uniqueness: it must report
/// `DriverError::AlreadyExists` when the target already exists.
pub trait DatasetBackend: Send + Sync {
    /// Whether a dataset exists at `name`
    fn exists(&self, name: &str) -> DriverResult<bool>;

    /// Create `name`, materializing missing parents with default options
    fn create_recursive(&self, name: &str, options: &DatasetOptions) -> DriverResult<()>;

    /// Look up a dataset by full path, `NotFound` if absent
    fn get(&self, name: &str) -> DriverResult<Dataset>;

    /// All descendants of `root` (excluding `root`), in backend order
    fn children(&self, root: &str) -> DriverResult<Vec<Dataset>>;

    fn mountpoint(&self, dataset: &Dataset) -> DriverResult<String>;

    fn creation_time(&self, dataset: &Dataset) -> DriverResult<DateTime<Utc>>;

    fn destroy(&self, dataset: &Dataset) -> DriverResult<()>;
}
