// zfs_management/mod.rs
// Native dataset backend

mod datasets;
mod helpers;
mod manager;
mod types;


pub use manager::ZfsManager;
pub use types::{Dataset, DatasetBackend, DatasetOptions};
