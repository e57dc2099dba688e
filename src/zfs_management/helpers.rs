// zfs_management/helpers.rs
// Helper functions for ZFS management

use super::types::DatasetOptions;
use crate::error::{DriverError, DriverResult};
use libzetta::zfs::Error as ZfsError;

/// Convert errno to descriptive string
pub fn errno_to_string(errno: i32) -> &'static str {
    match errno {
        libc::ENOENT => "dataset not found",
        libc::EEXIST => "dataset already exists",
        libc::EBUSY => "dataset is busy",
        libc::EINVAL => "invalid argument",
        libc::EPERM => "permission denied",
        libc::ENOSPC => "no space left on device",
        libc::EDQUOT => "quota exceeded",
        _ => "unknown error",
    }
}

/// Parent datasets of `name` below the pool, shallowest first.
/// `tank/a/b/c` yields `tank/a` and `tank/a/b`.
pub fn ancestors(name: &str) -> Vec<String> {
    let parts: Vec<&str> = name.split('/').collect();
    (2..parts.len()).map(|depth| parts[..depth].join("/")).collect()
}

/// Map an errno returned by libzfs_core onto the driver taxonomy
pub fn classify_errno(op: &'static str, dataset: &str, errno: i32) -> DriverError {
    match errno {
        // The kernel reports a dataset with children as EEXIST on destroy
        libc::EEXIST if op == "destroy" => DriverError::backend(
            op,
            dataset,
            format!("dataset has children (errno {})", errno),
        ),
        libc::EEXIST => DriverError::AlreadyExists(dataset.to_string()),
        libc::ENOENT => DriverError::NotFound(dataset.to_string()),
        _ => DriverError::backend(
            op,
            dataset,
            format!("{} (errno {})", errno_to_string(errno), errno),
        ),
    }
}

/// Map a libzetta error onto the driver taxonomy
pub fn classify(op: &'static str, dataset: &str, err: ZfsError) -> DriverError {
    match err {
        ZfsError::DatasetNotFound(_) => DriverError::NotFound(dataset.to_string()),
        ZfsError::Io(io) => match io.raw_os_error() {
            Some(errno) => classify_errno(op, dataset, errno),
            None => DriverError::backend(op, dataset, io),
        },
        other => DriverError::backend(op, dataset, other),
    }
}

/// Map a failed `zfs` invocation onto the driver taxonomy, keeping stderr as the cause
pub fn classify_cli(op: &'static str, dataset: &str, stderr: &str) -> DriverError {
    let stderr = stderr.trim();
    if stderr.contains("already exists") {
        DriverError::AlreadyExists(dataset.to_string())
    } else if stderr.contains("does not exist") {
        DriverError::NotFound(dataset.to_string())
    } else {
        DriverError::backend(op, dataset, stderr)
    }
}

/// Validate property name to prevent option injection
/// Native names plus `module:property` user properties
pub fn is_valid_property_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 256 {
        return false;
    }
    if !name.starts_with(|c: char| c.is_ascii_lowercase()) {
        return false;
    }
    name.chars().all(|c| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | ':' | '.' | '-')
    })
}

/// Arguments for `zfs create -p -o k=v ... <name>`, options in key order
pub fn create_args(name: &str, options: &DatasetOptions) -> DriverResult<Vec<String>> {
    let mut keys: Vec<&String> = options.keys().collect();
    keys.sort();

    let mut args = vec!["create".to_string(), "-p".to_string()];
    for key in keys {
        let value = &options[key];
        if !is_valid_property_name(key) {
            return Err(DriverError::backend(
                "create",
                name,
                format!("invalid property name: {}", key),
            ));
        }
        if value.contains('\0') || value.contains('\n') {
            return Err(DriverError::backend(
                "create",
                name,
                format!("invalid value for property {}", key),
            ));
        }
        args.push("-o".to_string());
        args.push(format!("{}={}", key, value));
    }
    args.push(name.to_string());
    Ok(args)
}
