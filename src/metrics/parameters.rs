//! Metric label derivation
//!
//! Projects a disk (or its absence) into the string label values attached
//! to driver operation metrics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compute::{CloudDisk, DiskView};

/// Disk type label used when no disk was fetched
pub const DEFAULT_DISK_TYPE_FOR_METRIC: &str = "unknownDiskType";

/// Confidential compute label used when no disk was fetched
pub const DEFAULT_ENABLE_CONFIDENTIAL_COMPUTE: &str = "false";

/// Storage pools label used when no disk was fetched
pub const DEFAULT_ENABLE_STORAGE_POOLS: &str = "false";

/// Label values describing the disk an operation acted on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricParameters {
    pub disk_type: String,
    pub enable_confidential_compute: String,
    pub enable_storage_pools: String,
}

impl Default for MetricParameters {
    fn default() -> Self {
        Self {
            disk_type: DEFAULT_DISK_TYPE_FOR_METRIC.to_string(),
            enable_confidential_compute: DEFAULT_ENABLE_CONFIDENTIAL_COMPUTE.to_string(),
            enable_storage_pools: DEFAULT_ENABLE_STORAGE_POOLS.to_string(),
        }
    }
}

impl From<MetricParameters> for (String, String, String) {
    fn from(params: MetricParameters) -> Self {
        (
            params.disk_type,
            params.enable_confidential_compute,
            params.enable_storage_pools,
        )
    }
}

/// Derive metric labels for a disk
///
/// `None` means no disk resource exists, e.g. creation failed before the
/// API returned one; the fixed defaults are used in that case.
pub fn derive_metric_parameters(disk: Option<&CloudDisk>) -> MetricParameters {
    let Some(disk) = disk else {
        debug!("No disk available, using default metric labels");
        return MetricParameters::default();
    };

    MetricParameters {
        disk_type: disk.pd_type().to_string(),
        enable_confidential_compute: disk.enable_confidential_compute().to_string(),
        enable_storage_pools: disk.enable_storage_pools().to_string(),
    }
}
