//! Shapes datasets into the volume records handed to the plugin host.

use chrono::SecondsFormat;
use tracing::warn;

use super::types::Volume;
use crate::error::DriverResult;
use crate::zfs_management::{Dataset, DatasetBackend};

pub struct VolumeProjector<'a> {
    backend: &'a dyn DatasetBackend,
}

impl<'a> VolumeProjector<'a> {
    pub fn new(backend: &'a dyn DatasetBackend) -> Self {
        VolumeProjector { backend }
    }

    /// Mountpoint is mandatory: a failure here fails the whole read.
    pub fn mountpoint(&self, dataset: &Dataset) -> DriverResult<String> {
        self.backend.mountpoint(dataset)
    }

    /// Full record including the creation time when it can be read.
    pub fn project(&self, dataset: &Dataset) -> DriverResult<Volume> {
        let mountpoint = self.mountpoint(dataset)?;
        let created_at = match self.backend.creation_time(dataset) {
            Ok(ts) => Some(ts.to_rfc3339_opts(SecondsFormat::Secs, true)),
            Err(e) => {
                warn!(dataset = %dataset, error = %e, "failed to get creation property from dataset");
                None
            }
        };

        Ok(Volume {
            name: dataset.name.clone(),
            mountpoint,
            created_at,
        })
    }

    /// Listing record: name and mountpoint only.
    pub fn summarize(&self, dataset: &Dataset) -> DriverResult<Volume> {
        Ok(Volume {
            name: dataset.name.clone(),
            mountpoint: self.mountpoint(dataset)?,
            created_at: None,
        })
    }
}
