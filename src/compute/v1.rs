//! Stable (`v1`) disk record

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use super::wire::CustomerEncryptionKey;

/// Persistent disk as returned by the `compute/v1` API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Disk {
    pub name: String,
    pub kind: String,
    pub status: String,
    pub self_link: String,

    /// Size in whole gigabytes
    #[serde(with = "super::wire::int64_string")]
    #[schemars(with = "String")]
    pub size_gb: i64,

    /// Zone URL, empty for regional disks
    pub zone: String,
    /// Region URL, empty for zonal disks
    pub region: String,

    /// Instances the disk is attached to
    pub users: Vec<String>,

    /// Disk type URL, e.g. `projects/p/zones/z/diskTypes/pd-standard`
    pub r#type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_encryption_key: Option<CustomerEncryptionKey>,

    pub source_snapshot_id: String,
    pub source_disk_id: String,
    pub source_image_id: String,
}
