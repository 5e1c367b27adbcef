//! Driver metrics
//!
//! - `parameters`: disk-derived label values, defaulted when no disk exists
//! - `manager`: Prometheus collectors that consume those labels

pub mod manager;
pub mod parameters;

pub use manager::{MetricsConfig, MetricsManager, PDCSI_DRIVER_NAME};
pub use parameters::*;
