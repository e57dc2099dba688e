//! Volume lifecycle facade driven by the plugin host.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::projector::VolumeProjector;
use super::registry::DatasetRegistry;
use super::resolver::resolve;
use super::types::{Capabilities, Volume, LOCAL_CAPABILITIES};
use crate::error::{DriverError, DriverResult};
use crate::zfs_management::{Dataset, DatasetOptions};

/// Implements the volume lifecycle on top of a [`DatasetRegistry`].
///
/// Cheap to clone; every request recomputes its answer from the backend.
#[derive(Clone)]
pub struct VolumeDriver {
    registry: Arc<DatasetRegistry>,
}

impl VolumeDriver {
    pub fn new(registry: DatasetRegistry) -> Self {
        VolumeDriver {
            registry: Arc::new(registry),
        }
    }

    fn projector(&self) -> VolumeProjector<'_> {
        VolumeProjector::new(self.registry.backend())
    }

    /// Find the dataset behind `name`: the name as a full path first, then
    /// the grouped placement Create would have chosen for it.
    fn locate(&self, name: &str) -> DriverResult<Dataset> {
        match self.registry.find(name) {
            Err(DriverError::NotFound(_)) => {
                let placement = resolve(name, self.registry.roots());
                match placement.group {
                    Some(_) => self
                        .registry
                        .find(&placement.dataset)
                        .map_err(|e| match e {
                            DriverError::NotFound(_) => DriverError::NotFound(name.to_string()),
                            other => other,
                        }),
                    None => Err(DriverError::NotFound(name.to_string())),
                }
            }
            found => found,
        }
    }

    /// Create the dataset backing `name`.
    ///
    /// The existence pre-check only short-circuits the common case; the
    /// backend's own duplicate rejection is what reports a concurrent create.
    pub fn create(&self, name: &str, options: &DatasetOptions) -> DriverResult<()> {
        debug!(name = %name, "create");
        let placement = resolve(name, self.registry.roots());
        let dataset = placement.dataset.as_str();

        match &placement.group {
            Some(key) => info!(
                group = %key.group,
                member = %key.member,
                dataset = %dataset,
                "creating hierarchical dataset for grouped volume"
            ),
            None => debug!(dataset = %dataset, "creating flat dataset"),
        }

        let backend = self.registry.backend();
        if backend.exists(dataset)? {
            return Err(DriverError::AlreadyExists(dataset.to_string()));
        }

        backend.create_recursive(dataset, options)?;
        info!(dataset = %dataset, "created dataset");
        Ok(())
    }

    pub fn get(&self, name: &str) -> DriverResult<Volume> {
        debug!(name = %name, "get");
        let dataset = self.locate(name)?;
        self.projector().project(&dataset)
    }

    /// All volumes under every root. Entries whose mountpoint cannot be read
    /// are skipped.
    pub fn list(&self) -> DriverResult<Vec<Volume>> {
        debug!("list");
        let projector = self.projector();
        let mut volumes = Vec::new();

        for dataset in self.registry.list_all() {
            let dataset = dataset?;
            match projector.summarize(&dataset) {
                Ok(volume) => volumes.push(volume),
                Err(e) => {
                    warn!(name = %dataset, error = %e, "failed to get mountpoint from dataset");
                }
            }
        }

        Ok(volumes)
    }

    pub fn remove(&self, name: &str) -> DriverResult<()> {
        debug!(name = %name, "remove");
        let dataset = self.locate(name)?;
        self.registry.backend().destroy(&dataset)?;
        info!(dataset = %dataset, "destroyed dataset");
        Ok(())
    }

    pub fn path(&self, name: &str) -> DriverResult<String> {
        debug!(name = %name, "path");
        self.mountpoint(name)
    }

    /// Pure lookup: datasets stay mounted under the backend's own policy.
    pub fn mount(&self, name: &str) -> DriverResult<String> {
        debug!(name = %name, "mount");
        self.mountpoint(name)
    }

    /// Always succeeds without touching the backend.
    pub fn unmount(&self, name: &str) -> DriverResult<()> {
        debug!(name = %name, "unmount");
        Ok(())
    }

    pub fn capabilities(&self) -> Capabilities {
        debug!("capabilities");
        LOCAL_CAPABILITIES
    }

    fn mountpoint(&self, name: &str) -> DriverResult<String> {
        let dataset = self.locate(name)?;
        self.projector().mountpoint(&dataset)
    }
}
