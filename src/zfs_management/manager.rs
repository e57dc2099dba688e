// zfs_management/manager.rs
// ZfsManager struct definition and constructor

use crate::error::{DriverError, DriverResult};
use libzetta::zfs::DelegatingZfsEngine;
use std::sync::Arc;

/// libzetta-backed implementation of `DatasetBackend`
#[derive(Clone)]
pub struct ZfsManager {
    pub(crate) zfs_engine: Arc<DelegatingZfsEngine>,
}

impl ZfsManager {
    /// Create a new ZfsManager instance
    /// Initializes the libzetta dataset engine
    pub fn new() -> DriverResult<Self> {
        let zfs_engine = Arc::new(DelegatingZfsEngine::new().map_err(|e| {
            DriverError::Config(format!("Failed to initialize ZFS engine: {}", e))
        })?);

        Ok(ZfsManager { zfs_engine })
    }
}
