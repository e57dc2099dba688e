// zfs_management/datasets.rs
// Dataset operations: existence, recursive create, enumeration, properties, destroy

use super::helpers::{ancestors, classify, classify_cli, classify_errno, create_args};
use super::manager::ZfsManager;
use super::types::{Dataset, DatasetBackend, DatasetOptions};
use crate::error::{DriverError, DriverResult};
use chrono::{DateTime, Utc};
use libzetta::zfs::{CreateDatasetRequest, DatasetKind, Properties, ZfsEngine};
use libzetta_zfs_core_sys::lzc_destroy;
use std::ffi::CString;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

impl ZfsManager {
    fn create_one(&self, name: &str) -> DriverResult<()> {
        let request = CreateDatasetRequest::builder()
            .name(PathBuf::from(name))
            .kind(DatasetKind::Filesystem)
            .build()
            .map_err(|e| DriverError::backend("create", name, e))?;

        self.zfs_engine
            .create(request)
            .map_err(|e| classify("create", name, e))
    }

    /// Native properties need typed values that only `zfs create -o` parses,
    /// so datasets with options are created through the CLI in one step.
    fn create_with_options(&self, name: &str, options: &DatasetOptions) -> DriverResult<()> {
        let args = create_args(name, options)?;
        let output = Command::new("zfs")
            .args(&args)
            .output()
            .map_err(|e| DriverError::backend("create", name, format!("failed to execute zfs: {}", e)))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(classify_cli("create", name, &String::from_utf8_lossy(&output.stderr)))
        }
    }

    fn read_properties(&self, dataset: &Dataset, op: &'static str) -> DriverResult<Properties> {
        self.zfs_engine
            .read_properties(PathBuf::from(&dataset.name))
            .map_err(|e| classify(op, &dataset.name, e))
    }
}

impl DatasetBackend for ZfsManager {
    fn exists(&self, name: &str) -> DriverResult<bool> {
        self.zfs_engine
            .exists(PathBuf::from(name))
            .map_err(|e| classify("exists", name, e))
    }

    fn create_recursive(&self, name: &str, options: &DatasetOptions) -> DriverResult<()> {
        for parent in ancestors(name) {
            if self.exists(&parent)? {
                continue;
            }
            debug!(dataset = %parent, "creating parent dataset");
            match self.create_one(&parent) {
                // Another request created it between the check and the create.
                Ok(()) | Err(DriverError::AlreadyExists(_)) => {}
                Err(e) => return Err(e),
            }
        }

        if options.is_empty() {
            self.create_one(name)
        } else {
            self.create_with_options(name, options)
        }
    }

    fn get(&self, name: &str) -> DriverResult<Dataset> {
        if self.exists(name)? {
            Ok(Dataset::new(name))
        } else {
            Err(DriverError::NotFound(name.to_string()))
        }
    }

    fn children(&self, root: &str) -> DriverResult<Vec<Dataset>> {
        let prefix = format!("{}/", root);
        let datasets = self
            .zfs_engine
            .list_filesystems(root)
            .map_err(|e| classify("list", root, e))?;

        Ok(datasets
            .into_iter()
            .map(|p| p.to_string_lossy().to_string())
            .filter(|name| name.starts_with(&prefix))
            .map(Dataset::new)
            .collect())
    }

    fn mountpoint(&self, dataset: &Dataset) -> DriverResult<String> {
        match self.read_properties(dataset, "mountpoint")? {
            Properties::Filesystem(fs) => fs
                .mount_point()
                .as_ref()
                .map(|p| p.to_string_lossy().to_string())
                .ok_or_else(|| {
                    DriverError::backend("mountpoint", &dataset.name, "dataset has no mountpoint")
                }),
            _ => Err(DriverError::backend("mountpoint", &dataset.name, "not a filesystem")),
        }
    }

    fn creation_time(&self, dataset: &Dataset) -> DriverResult<DateTime<Utc>> {
        let unavailable = |reason: String| DriverError::PropertyUnavailable {
            dataset: dataset.name.clone(),
            property: "creation",
            reason,
        };

        let creation = match self.read_properties(dataset, "creation") {
            Ok(Properties::Filesystem(fs)) => *fs.creation(),
            Ok(_) => return Err(unavailable("not a filesystem".to_string())),
            Err(e) => return Err(unavailable(e.to_string())),
        };

        DateTime::from_timestamp(creation, 0)
            .ok_or_else(|| unavailable(format!("timestamp {} out of range", creation)))
    }

    /// Destroy via libzfs_core so the errno (busy, has children) reaches the caller
    fn destroy(&self, dataset: &Dataset) -> DriverResult<()> {
        let c_name = CString::new(dataset.name.as_str()).map_err(|_| {
            DriverError::backend("destroy", &dataset.name, "invalid path: contains null byte")
        })?;

        // libzfs_core was initialized when the engine was constructed
        let result = unsafe { lzc_destroy(c_name.as_ptr()) };

        match result {
            0 => Ok(()),
            errno => Err(classify_errno("destroy", &dataset.name, errno)),
        }
    }
}
