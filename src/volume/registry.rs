//! Configured root datasets and root-scoped lookups.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::error::{DriverError, DriverResult};
use crate::zfs_management::{Dataset, DatasetBackend, DatasetOptions};

/// Holds the immutable, ordered list of root datasets and the backend they
/// live on.
pub struct DatasetRegistry {
    backend: Arc<dyn DatasetBackend>,
    roots: Vec<String>,
}

impl DatasetRegistry {
    /// Build a registry, creating any root dataset that does not exist yet.
    ///
    /// Fails with [`DriverError::Config`] when `roots` is empty or a root
    /// cannot be created or opened. Roots created before the failing one are
    /// left in place.
    pub fn open(backend: Arc<dyn DatasetBackend>, roots: Vec<String>) -> DriverResult<Self> {
        if roots.is_empty() {
            return Err(DriverError::Config("no root datasets specified".to_string()));
        }

        let registry = DatasetRegistry { backend, roots };
        registry.ensure_roots()?;
        Ok(registry)
    }

    fn ensure_roots(&self) -> DriverResult<()> {
        for root in &self.roots {
            let present = self
                .backend
                .exists(root)
                .map_err(|e| root_failure("check", root, e))?;

            if !present {
                info!(dataset = %root, "creating root dataset");
                self.backend
                    .create_recursive(root, &DatasetOptions::new())
                    .map_err(|e| root_failure("create", root, e))?;
            }

            self.backend
                .get(root)
                .map_err(|e| root_failure("open", root, e))?;
            debug!(dataset = %root, "root dataset ready");
        }
        Ok(())
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn backend(&self) -> &dyn DatasetBackend {
        self.backend.as_ref()
    }

    /// Look up a dataset by its full path.
    pub fn find(&self, name: &str) -> DriverResult<Dataset> {
        self.backend.get(name)
    }

    /// Every dataset below every root, in root configuration order.
    ///
    /// Roots are enumerated on demand as the iterator advances; a root whose
    /// enumeration fails yields a single `Err`.
    pub fn list_all(&self) -> impl Iterator<Item = DriverResult<Dataset>> + '_ {
        self.roots
            .iter()
            .flat_map(move |root| match self.backend.children(root) {
                Ok(datasets) => datasets.into_iter().map(Ok).collect::<Vec<_>>(),
                Err(e) => vec![Err(e)],
            })
    }
}

fn root_failure(action: &str, root: &str, e: DriverError) -> DriverError {
    error!(dataset = %root, error = %e, "failed to {} root dataset", action);
    DriverError::Config(format!("failed to {} root dataset {}: {}", action, root, e))
}
