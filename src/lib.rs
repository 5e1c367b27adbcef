//! PD Cloud Disk - version-polymorphic persistent disk metadata
//!
//! Read surface over Compute Engine persistent disks for a CSI driver.
//! A disk may come from the `v1`, `beta` or `alpha` API; callers read it
//! through one accessor set and never branch on the revision.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐  ┌───────────────┐  ┌───────────────┐
//! │   v1::Disk    │  │  beta::Disk   │  │  alpha::Disk  │
//! └───────┬───────┘  └───────┬───────┘  └───────┬───────┘
//!         └──────────────────┼──────────────────┘
//!                            │
//!                ┌───────────┴───────────┐
//!                │  CloudDisk / DiskView │   Option<CloudDisk>::None
//!                │   (one read surface)  │   answers with defaults
//!                └───────────┬───────────┘
//!                            │
//!              ┌─────────────┴─────────────┐
//!              │ derive_metric_parameters  │
//!              │ (disk_type, cc, pools)    │
//!              └─────────────┬─────────────┘
//!                            │
//!                 ┌──────────┴──────────┐
//!                 │   MetricsManager    │
//!                 │ (operation errors)  │
//!                 └─────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`compute`]: revision records, the [`CloudDisk`] view and loaders
//! - [`metrics`]: metric label derivation and Prometheus collectors
//! - [`error`]: Error types and handling

pub mod compute;
pub mod error;
pub mod metrics;

// Re-export commonly used types
pub use compute::{
    load_disk, load_disk_file, ApiVersion, CloudDisk, CustomerEncryptionKey, DiskSummary,
    DiskView, InputFormat, LocationType, UNKNOWN_SIZE_GB, UNKNOWN_STATUS,
};

pub use metrics::{
    derive_metric_parameters, MetricParameters, MetricsConfig, MetricsManager,
    DEFAULT_DISK_TYPE_FOR_METRIC, DEFAULT_ENABLE_CONFIDENTIAL_COMPUTE,
    DEFAULT_ENABLE_STORAGE_POOLS, PDCSI_DRIVER_NAME,
};

pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
