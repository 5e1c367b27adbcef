//! Alpha disk record

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use super::wire::CustomerEncryptionKey;

/// Persistent disk as returned by the `compute/alpha` API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Disk {
    pub name: String,
    pub kind: String,
    pub status: String,
    pub self_link: String,

    #[serde(with = "super::wire::int64_string")]
    #[schemars(with = "String")]
    pub size_gb: i64,

    pub zone: String,
    pub region: String,
    pub users: Vec<String>,
    pub r#type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk_encryption_key: Option<CustomerEncryptionKey>,

    pub source_snapshot_id: String,
    pub source_disk_id: String,
    pub source_image_id: String,

    pub multi_writer: bool,
    pub enable_confidential_compute: bool,

    /// Storage pool URL, empty when the disk is not pool-backed
    pub storage_pool: String,
}
