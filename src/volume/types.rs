//! Externally visible volume records.

use serde::{Deserialize, Serialize};

/// A volume as reported to the plugin host.
///
/// `name` is the full dataset path. `created_at` is RFC 3339 and absent when
/// the creation property could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Volume {
    pub name: String,
    pub mountpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Local,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Capabilities {
    pub scope: Scope,
}

/// Datasets live on this host only.
pub const LOCAL_CAPABILITIES: Capabilities = Capabilities {
    scope: Scope::Local,
};
