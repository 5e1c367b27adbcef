//! CloudDisk
//!
//! A single read surface over the `v1`, `beta` and `alpha` disk records.
//! Callers never branch on the API revision: every accessor on [`DiskView`]
//! applies the per-revision presence rule itself and falls back to a fixed
//! default for fields the revision does not carry.
//!
//! An absent disk (nothing was fetched) is an `Option<CloudDisk>::None`.
//! `Option<T>` implements [`DiskView`] too, so `None` answers every accessor
//! with its zero value instead of requiring a check at each call site.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{alpha, beta, v1};
use crate::error::Error;

/// Status reported when no disk is available
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Size reported when no disk is available
pub const UNKNOWN_SIZE_GB: i64 = -1;

// =============================================================================
// API Version
// =============================================================================

/// Compute API revision a disk record was fetched from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    V1,
    Beta,
    Alpha,
}

impl std::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiVersion::V1 => write!(f, "v1"),
            ApiVersion::Beta => write!(f, "beta"),
            ApiVersion::Alpha => write!(f, "alpha"),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v1" | "ga" | "stable" => Ok(ApiVersion::V1),
            "beta" => Ok(ApiVersion::Beta),
            "alpha" => Ok(ApiVersion::Alpha),
            _ => Err(Error::UnknownApiVersion(s.to_string())),
        }
    }
}

// =============================================================================
// Location Type
// =============================================================================

/// Scope of the disk's resource key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    Zonal,
    Regional,
    Global,
}

impl LocationType {
    fn from_location(zone: &str, region: &str) -> Self {
        if !zone.is_empty() {
            LocationType::Zonal
        } else if !region.is_empty() {
            LocationType::Regional
        } else {
            LocationType::Global
        }
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LocationType::Zonal => write!(f, "zonal"),
            LocationType::Regional => write!(f, "regional"),
            LocationType::Global => write!(f, "global"),
        }
    }
}

// =============================================================================
// DiskView
// =============================================================================

/// Read-only accessors shared by every disk representation
pub trait DiskView {
    fn location_type(&self) -> LocationType;
    fn users(&self) -> &[String];
    fn name(&self) -> &str;
    fn kind(&self) -> &str;
    /// Lifecycle status; [`UNKNOWN_STATUS`] when no disk is present
    fn status(&self) -> &str;
    /// Disk type name taken from the last segment of the type URL
    ///
    /// `projects/p/zones/z/diskTypes/pd-standard` yields `pd-standard`. The
    /// value is passed through from the API and is not validated.
    fn pd_type(&self) -> &str;
    fn self_link(&self) -> &str;
    /// Size in gigabytes; [`UNKNOWN_SIZE_GB`] when no disk is present
    fn size_gb(&self) -> i64;
    fn zone(&self) -> &str;
    fn region(&self) -> &str;
    fn snapshot_id(&self) -> &str;
    fn source_disk_id(&self) -> &str;
    fn image_id(&self) -> &str;
    fn kms_key_name(&self) -> &str;
    fn multi_writer(&self) -> bool;
    fn enable_confidential_compute(&self) -> bool;
    fn enable_storage_pools(&self) -> bool;
}

// =============================================================================
// CloudDisk
// =============================================================================

/// A disk record from exactly one compute API revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloudDisk {
    V1(v1::Disk),
    Beta(beta::Disk),
    Alpha(alpha::Disk),
}

/// Dispatch over fields every revision carries under the same name
macro_rules! shared {
    ($disk:expr, |$d:ident| $body:expr) => {
        match $disk {
            CloudDisk::V1($d) => $body,
            CloudDisk::Beta($d) => $body,
            CloudDisk::Alpha($d) => $body,
        }
    };
}

impl CloudDisk {
    pub fn from_v1(disk: v1::Disk) -> Self {
        CloudDisk::V1(disk)
    }

    pub fn from_beta(disk: beta::Disk) -> Self {
        CloudDisk::Beta(disk)
    }

    pub fn from_alpha(disk: alpha::Disk) -> Self {
        CloudDisk::Alpha(disk)
    }

    /// API revision this disk was fetched from
    pub fn version(&self) -> ApiVersion {
        match self {
            CloudDisk::V1(_) => ApiVersion::V1,
            CloudDisk::Beta(_) => ApiVersion::Beta,
            CloudDisk::Alpha(_) => ApiVersion::Alpha,
        }
    }

    /// Overwrite the size of the underlying record. Test fixtures only.
    #[cfg(test)]
    pub(crate) fn set_size_gb(&mut self, size_gb: i64) {
        shared!(self, |d| d.size_gb = size_gb)
    }
}

impl From<v1::Disk> for CloudDisk {
    fn from(disk: v1::Disk) -> Self {
        CloudDisk::from_v1(disk)
    }
}

impl From<beta::Disk> for CloudDisk {
    fn from(disk: beta::Disk) -> Self {
        CloudDisk::from_beta(disk)
    }
}

impl From<alpha::Disk> for CloudDisk {
    fn from(disk: alpha::Disk) -> Self {
        CloudDisk::from_alpha(disk)
    }
}

impl DiskView for CloudDisk {
    fn location_type(&self) -> LocationType {
        shared!(self, |d| LocationType::from_location(&d.zone, &d.region))
    }

    fn users(&self) -> &[String] {
        shared!(self, |d| &d.users)
    }

    fn name(&self) -> &str {
        shared!(self, |d| &d.name)
    }

    fn kind(&self) -> &str {
        shared!(self, |d| &d.kind)
    }

    fn status(&self) -> &str {
        shared!(self, |d| &d.status)
    }

    fn pd_type(&self) -> &str {
        let type_url: &str = shared!(self, |d| &d.r#type);
        type_url.rsplit('/').next().unwrap_or_default().trim()
    }

    fn self_link(&self) -> &str {
        shared!(self, |d| &d.self_link)
    }

    fn size_gb(&self) -> i64 {
        shared!(self, |d| d.size_gb)
    }

    fn zone(&self) -> &str {
        shared!(self, |d| &d.zone)
    }

    fn region(&self) -> &str {
        shared!(self, |d| &d.region)
    }

    fn snapshot_id(&self) -> &str {
        shared!(self, |d| &d.source_snapshot_id)
    }

    fn source_disk_id(&self) -> &str {
        shared!(self, |d| &d.source_disk_id)
    }

    fn image_id(&self) -> &str {
        shared!(self, |d| &d.source_image_id)
    }

    fn kms_key_name(&self) -> &str {
        shared!(self, |d| d
            .disk_encryption_key
            .as_ref()
            .map_or("", |key| key.kms_key_name.as_str()))
    }

    fn multi_writer(&self) -> bool {
        match self {
            CloudDisk::V1(_) => false,
            CloudDisk::Beta(d) => d.multi_writer,
            CloudDisk::Alpha(d) => d.multi_writer,
        }
    }

    fn enable_confidential_compute(&self) -> bool {
        match self {
            CloudDisk::V1(_) => false,
            CloudDisk::Beta(d) => d.enable_confidential_compute,
            CloudDisk::Alpha(d) => d.enable_confidential_compute,
        }
    }

    fn enable_storage_pools(&self) -> bool {
        match self {
            CloudDisk::V1(_) | CloudDisk::Beta(_) => false,
            CloudDisk::Alpha(d) => !d.storage_pool.is_empty(),
        }
    }
}

impl<T: DiskView + ?Sized> DiskView for &T {
    fn location_type(&self) -> LocationType {
        (**self).location_type()
    }
    fn users(&self) -> &[String] {
        (**self).users()
    }
    fn name(&self) -> &str {
        (**self).name()
    }
    fn kind(&self) -> &str {
        (**self).kind()
    }
    fn status(&self) -> &str {
        (**self).status()
    }
    fn pd_type(&self) -> &str {
        (**self).pd_type()
    }
    fn self_link(&self) -> &str {
        (**self).self_link()
    }
    fn size_gb(&self) -> i64 {
        (**self).size_gb()
    }
    fn zone(&self) -> &str {
        (**self).zone()
    }
    fn region(&self) -> &str {
        (**self).region()
    }
    fn snapshot_id(&self) -> &str {
        (**self).snapshot_id()
    }
    fn source_disk_id(&self) -> &str {
        (**self).source_disk_id()
    }
    fn image_id(&self) -> &str {
        (**self).image_id()
    }
    fn kms_key_name(&self) -> &str {
        (**self).kms_key_name()
    }
    fn multi_writer(&self) -> bool {
        (**self).multi_writer()
    }
    fn enable_confidential_compute(&self) -> bool {
        (**self).enable_confidential_compute()
    }
    fn enable_storage_pools(&self) -> bool {
        (**self).enable_storage_pools()
    }
}

/// The absent disk: every accessor returns its zero value
impl<T: DiskView> DiskView for Option<T> {
    fn location_type(&self) -> LocationType {
        self.as_ref().map_or(LocationType::Global, |d| d.location_type())
    }

    fn users(&self) -> &[String] {
        self.as_ref().map_or(&[] as &[String], |d| d.users())
    }

    fn name(&self) -> &str {
        self.as_ref().map_or("", |d| d.name())
    }

    fn kind(&self) -> &str {
        self.as_ref().map_or("", |d| d.kind())
    }

    fn status(&self) -> &str {
        self.as_ref().map_or(UNKNOWN_STATUS, |d| d.status())
    }

    fn pd_type(&self) -> &str {
        self.as_ref().map_or("", |d| d.pd_type())
    }

    fn self_link(&self) -> &str {
        self.as_ref().map_or("", |d| d.self_link())
    }

    fn size_gb(&self) -> i64 {
        self.as_ref().map_or(UNKNOWN_SIZE_GB, |d| d.size_gb())
    }

    fn zone(&self) -> &str {
        self.as_ref().map_or("", |d| d.zone())
    }

    fn region(&self) -> &str {
        self.as_ref().map_or("", |d| d.region())
    }

    fn snapshot_id(&self) -> &str {
        self.as_ref().map_or("", |d| d.snapshot_id())
    }

    fn source_disk_id(&self) -> &str {
        self.as_ref().map_or("", |d| d.source_disk_id())
    }

    fn image_id(&self) -> &str {
        self.as_ref().map_or("", |d| d.image_id())
    }

    fn kms_key_name(&self) -> &str {
        self.as_ref().map_or("", |d| d.kms_key_name())
    }

    fn multi_writer(&self) -> bool {
        self.as_ref().is_some_and(|d| d.multi_writer())
    }

    fn enable_confidential_compute(&self) -> bool {
        self.as_ref().is_some_and(|d| d.enable_confidential_compute())
    }

    fn enable_storage_pools(&self) -> bool {
        self.as_ref().is_some_and(|d| d.enable_storage_pools())
    }
}

// =============================================================================
// Summary
// =============================================================================

/// Owned snapshot of every accessor, for display and JSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskSummary {
    pub name: String,
    pub kind: String,
    pub status: String,
    pub location_type: LocationType,
    pub zone: String,
    pub region: String,
    pub self_link: String,
    pub pd_type: String,
    pub size_gb: i64,
    pub users: Vec<String>,
    pub snapshot_id: String,
    pub source_disk_id: String,
    pub image_id: String,
    pub kms_key_name: String,
    pub multi_writer: bool,
    pub enable_confidential_compute: bool,
    pub enable_storage_pools: bool,
}

impl DiskSummary {
    pub fn from_view(view: &impl DiskView) -> Self {
        Self {
            name: view.name().to_string(),
            kind: view.kind().to_string(),
            status: view.status().to_string(),
            location_type: view.location_type(),
            zone: view.zone().to_string(),
            region: view.region().to_string(),
            self_link: view.self_link().to_string(),
            pd_type: view.pd_type().to_string(),
            size_gb: view.size_gb(),
            users: view.users().to_vec(),
            snapshot_id: view.snapshot_id().to_string(),
            source_disk_id: view.source_disk_id().to_string(),
            image_id: view.image_id().to_string(),
            kms_key_name: view.kms_key_name().to_string(),
            multi_writer: view.multi_writer(),
            enable_confidential_compute: view.enable_confidential_compute(),
            enable_storage_pools: view.enable_storage_pools(),
        }
    }
}
