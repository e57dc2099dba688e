//! In-memory `DatasetBackend` used by the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use zfs_volume_driver::zfs_management::{Dataset, DatasetBackend, DatasetOptions};
use zfs_volume_driver::{DatasetRegistry, DriverError, DriverResult, VolumeDriver};

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    options: DatasetOptions,
}

#[derive(Default)]
struct State {
    // Insertion order doubles as the backend's listing order.
    datasets: Vec<Entry>,
    no_mountpoint: HashSet<String>,
    no_creation: HashSet<String>,
    fail_create: HashSet<String>,
}

/// Fake dataset store. Every trait call bumps `calls`.
#[derive(Default)]
pub struct FakeBackend {
    state: Mutex<State>,
    calls: AtomicUsize,
    /// Make `exists` always answer false, as if another request raced us.
    pub stale_exists: std::sync::atomic::AtomicBool,
}

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }

    pub fn insert(&self, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.datasets.push(Entry {
            name: name.to_string(),
            options: DatasetOptions::new(),
        });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state.lock().unwrap().datasets.iter().any(|e| e.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.datasets.iter().map(|e| e.name.clone()).collect()
    }

    pub fn options_of(&self, name: &str) -> Option<DatasetOptions> {
        let state = self.state.lock().unwrap();
        state
            .datasets
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.options.clone())
    }

    pub fn break_mountpoint(&self, name: &str) {
        self.state.lock().unwrap().no_mountpoint.insert(name.to_string());
    }

    pub fn break_creation(&self, name: &str) {
        self.state.lock().unwrap().no_creation.insert(name.to_string());
    }

    pub fn break_create(&self, name: &str) {
        self.state.lock().unwrap().fail_create.insert(name.to_string());
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl DatasetBackend for FakeBackend {
    fn exists(&self, name: &str) -> DriverResult<bool> {
        self.tick();
        if self.stale_exists.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self.contains(name))
    }

    fn create_recursive(&self, name: &str, options: &DatasetOptions) -> DriverResult<()> {
        self.tick();
        let mut state = self.state.lock().unwrap();
        if state.fail_create.contains(name) {
            return Err(DriverError::backend("create", name, "permission denied"));
        }
        if state.datasets.iter().any(|e| e.name == name) {
            return Err(DriverError::AlreadyExists(name.to_string()));
        }

        let parts: Vec<&str> = name.split('/').collect();
        for depth in 2..parts.len() {
            let parent = parts[..depth].join("/");
            if !state.datasets.iter().any(|e| e.name == parent) {
                state.datasets.push(Entry {
                    name: parent,
                    options: DatasetOptions::new(),
                });
            }
        }
        state.datasets.push(Entry {
            name: name.to_string(),
            options: options.clone(),
        });
        Ok(())
    }

    fn get(&self, name: &str) -> DriverResult<Dataset> {
        self.tick();
        if self.contains(name) {
            Ok(Dataset::new(name))
        } else {
            Err(DriverError::NotFound(name.to_string()))
        }
    }

    fn children(&self, root: &str) -> DriverResult<Vec<Dataset>> {
        self.tick();
        let prefix = format!("{}/", root);
        let state = self.state.lock().unwrap();
        Ok(state
            .datasets
            .iter()
            .filter(|e| e.name.starts_with(&prefix))
            .map(|e| Dataset::new(e.name.clone()))
            .collect())
    }

    fn mountpoint(&self, dataset: &Dataset) -> DriverResult<String> {
        self.tick();
        if self.state.lock().unwrap().no_mountpoint.contains(&dataset.name) {
            return Err(DriverError::backend("mountpoint", &dataset.name, "dataset has no mountpoint"));
        }
        Ok(format!("/{}", dataset.name))
    }

    fn creation_time(&self, dataset: &Dataset) -> DriverResult<DateTime<Utc>> {
        self.tick();
        if self.state.lock().unwrap().no_creation.contains(&dataset.name) {
            return Err(DriverError::PropertyUnavailable {
                dataset: dataset.name.clone(),
                property: "creation",
                reason: "property not set".to_string(),
            });
        }
        Ok(created_at())
    }

    fn destroy(&self, dataset: &Dataset) -> DriverResult<()> {
        self.tick();
        let mut state = self.state.lock().unwrap();
        let prefix = format!("{}/", dataset.name);
        if state.datasets.iter().any(|e| e.name.starts_with(&prefix)) {
            return Err(DriverError::backend("destroy", &dataset.name, "dataset is busy"));
        }
        let before = state.datasets.len();
        state.datasets.retain(|e| e.name != dataset.name);
        if state.datasets.len() == before {
            return Err(DriverError::NotFound(dataset.name.clone()));
        }
        Ok(())
    }
}

/// Driver over a fresh fake with the given roots already opened.
pub fn driver_with_roots(roots: &[&str]) -> (Arc<FakeBackend>, VolumeDriver) {
    let backend = FakeBackend::new();
    let registry = DatasetRegistry::open(
        backend.clone(),
        roots.iter().map(|r| r.to_string()).collect(),
    )
    .expect("roots open");
    (backend, VolumeDriver::new(registry))
}
