//! Command line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::error::{DriverError, DriverResult};

#[derive(Debug, Parser)]
#[command(name = "zfs-volume-driver")]
#[command(version, about = "Docker volume plugin backed by ZFS datasets", long_about = None)]
pub struct Args {
    /// Root dataset for volumes; repeat for more. Grouped volumes go under the first.
    #[arg(
        long = "dataset-name",
        env = "ZFS_VOLUME_DATASETS",
        value_name = "NAME",
        value_delimiter = ',',
        required = true
    )]
    pub dataset_names: Vec<String>,

    /// Address the plugin protocol is served on
    #[arg(long, env = "ZFS_VOLUME_LISTEN", default_value = "127.0.0.1:9876")]
    pub listen: SocketAddr,

    /// Write a plugin discovery file pointing at --listen
    #[arg(long, value_name = "FILE")]
    pub plugin_spec: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Ordered, de-duplicated root dataset names.
    pub fn roots(&self) -> DriverResult<Vec<String>> {
        let mut roots: Vec<String> = Vec::new();
        for name in &self.dataset_names {
            let name = name.trim().trim_end_matches('/');
            if !name.is_empty() && !roots.iter().any(|r| r == name) {
                roots.push(name.to_string());
            }
        }

        if roots.is_empty() {
            return Err(DriverError::Config("no root datasets specified".to_string()));
        }
        Ok(roots)
    }

    /// Contents of the plugin discovery file.
    pub fn plugin_url(&self) -> String {
        format!("tcp://{}", self.listen)
    }
}
