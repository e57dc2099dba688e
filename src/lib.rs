//! Docker volume plugin that maps volumes onto ZFS datasets.
//!
//! | Module | Purpose |
//! |---|---|
//! | [`volume`] | Name resolution, root registry, volume lifecycle. |
//! | [`zfs_management`] | `DatasetBackend` contract and its libzetta implementation. |
//! | [`routes`] / [`handlers`] / [`models`] | Plugin protocol over HTTP with warp. |
//! | [`config`] | Command line and environment settings. |
//! | [`error`] | [`DriverError`] taxonomy. |

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod utils;
pub mod volume;
pub mod zfs_management;

pub use error::{DriverError, DriverResult};
pub use volume::{DatasetRegistry, Volume, VolumeDriver};
