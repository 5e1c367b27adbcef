//! Metrics Manager
//!
//! Owns the Prometheus registry for driver operation metrics. Failed
//! operations are counted with the disk labels from
//! [`derive_metric_parameters`].

use prometheus::{Encoder, GaugeVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::parameters::derive_metric_parameters;
use crate::compute::{CloudDisk, DiskView};
use crate::error::{Error, Result};

/// CSI driver name reported on every operation metric
pub const PDCSI_DRIVER_NAME: &str = "pd.csi.storage.gke.io";

const SUBSYSTEM: &str = "csidriver";

const OPERATION_ERROR_LABELS: &[&str] = &[
    "driver_name",
    "method_name",
    "grpc_status_code",
    "disk_type",
    "enable_confidential_storage",
    "enable_storage_pools",
];

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the metrics manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsConfig {
    /// Value of the `driver_name` label
    pub driver_name: String,

    /// Component version to publish, if the deployment provides one
    #[serde(default)]
    pub component_version: Option<String>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            driver_name: PDCSI_DRIVER_NAME.to_string(),
            component_version: None,
        }
    }
}

// =============================================================================
// Metrics Manager
// =============================================================================

/// Registry plus the driver's operation collectors
#[derive(Clone, Debug)]
pub struct MetricsManager {
    config: MetricsConfig,
    registry: Registry,
    operation_errors: IntCounterVec,
    component_version: GaugeVec,
}

impl MetricsManager {
    /// Create a manager with a fresh registry
    pub fn new(config: MetricsConfig) -> Result<Self> {
        Self::with_registry(config, Registry::new())
    }

    /// Create a manager that registers into an existing registry
    pub fn with_registry(config: MetricsConfig, registry: Registry) -> Result<Self> {
        let operation_errors = IntCounterVec::new(
            Opts::new("operation_errors", "CSI server side error metrics").subsystem(SUBSYSTEM),
            OPERATION_ERROR_LABELS,
        )?;
        registry.register(Box::new(operation_errors.clone()))?;

        let component_version = GaugeVec::new(
            Opts::new(
                "component_version",
                "Metric to expose the version of the PDCSI component.",
            ),
            &["component_version"],
        )?;
        registry.register(Box::new(component_version.clone()))?;

        Ok(Self {
            config,
            registry,
            operation_errors,
            component_version,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &MetricsConfig {
        &self.config
    }

    /// Counter for one (method, code, disk) label combination
    fn operation_error_counter(
        &self,
        method: &str,
        code: &str,
        disk: Option<&CloudDisk>,
    ) -> IntCounter {
        let params = derive_metric_parameters(disk);
        self.operation_errors.with_label_values(&[
            self.config.driver_name.as_str(),
            method,
            code,
            params.disk_type.as_str(),
            params.enable_confidential_compute.as_str(),
            params.enable_storage_pools.as_str(),
        ])
    }

    /// Count one failed operation against the disk it acted on
    pub fn record_operation_error(&self, method: &str, code: &str, disk: Option<&CloudDisk>) {
        debug!(
            method = method,
            code = code,
            disk = disk.name(),
            "Recording operation error"
        );
        self.operation_error_counter(method, code, disk).inc();
    }

    /// Current count for one label combination
    pub fn operation_error_count(
        &self,
        method: &str,
        code: &str,
        disk: Option<&CloudDisk>,
    ) -> u64 {
        self.operation_error_counter(method, code, disk).get()
    }

    /// Publish the configured component version as a constant gauge
    pub fn emit_component_version(&self) -> Result<()> {
        let version = self
            .config
            .component_version
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Configuration("component version is not set".to_string()))?;

        self.component_version.with_label_values(&[version]).set(1.0);
        info!(version = version, "Emitted component version metric");
        Ok(())
    }

    /// Render every registered metric in the Prometheus text format
    pub fn gather_text(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::{alpha, beta};
    use crate::metrics::DEFAULT_DISK_TYPE_FOR_METRIC;
    use assert_matches::assert_matches;

    const METHOD: &str = "/csi.v1.Controller/CreateVolume";

    #[test]
    fn test_record_operation_error_with_disk() {
        let manager = MetricsManager::new(MetricsConfig::default()).unwrap();
        let disk = CloudDisk::from_beta(beta::Disk {
            r#type: "projects/p/zones/z/diskTypes/hyperdisk-balanced".into(),
            enable_confidential_compute: true,
            ..Default::default()
        });

        manager.record_operation_error(METHOD, "Internal", Some(&disk));
        manager.record_operation_error(METHOD, "Internal", Some(&disk));
        manager.record_operation_error(METHOD, "NotFound", Some(&disk));

        assert_eq!(
            manager.operation_error_count(METHOD, "Internal", Some(&disk)),
            2
        );
        assert_eq!(
            manager.operation_error_count(METHOD, "NotFound", Some(&disk)),
            1
        );

        let text = manager.gather_text().unwrap();
        assert!(text.contains("csidriver_operation_errors"));
        assert!(text.contains(r#"disk_type="hyperdisk-balanced""#));
        assert!(text.contains(r#"enable_confidential_storage="true""#));
        assert!(text.contains(r#"driver_name="pd.csi.storage.gke.io""#));
    }

    #[test]
    fn test_record_operation_error_without_disk() {
        let manager = MetricsManager::new(MetricsConfig::default()).unwrap();
        manager.record_operation_error(METHOD, "ResourceExhausted", None);

        assert_eq!(
            manager.operation_error_count(METHOD, "ResourceExhausted", None),
            1
        );
        let text = manager.gather_text().unwrap();
        assert!(text.contains(&format!(r#"disk_type="{}""#, DEFAULT_DISK_TYPE_FOR_METRIC)));
        assert!(text.contains(r#"enable_storage_pools="false""#));
    }

    #[test]
    fn test_labels_distinguish_storage_pools() {
        let manager = MetricsManager::new(MetricsConfig::default()).unwrap();
        let pooled = CloudDisk::from_alpha(alpha::Disk {
            r#type: "hyperdisk-balanced".into(),
            storage_pool: "projects/p/zones/z/storagePools/sp1".into(),
            ..Default::default()
        });
        let plain = CloudDisk::from_alpha(alpha::Disk {
            r#type: "hyperdisk-balanced".into(),
            ..Default::default()
        });

        manager.record_operation_error(METHOD, "Internal", Some(&pooled));
        assert_eq!(manager.operation_error_count(METHOD, "Internal", Some(&pooled)), 1);
        assert_eq!(manager.operation_error_count(METHOD, "Internal", Some(&plain)), 0);
    }

    #[test]
    fn test_emit_component_version() {
        let manager = MetricsManager::new(MetricsConfig {
            component_version: Some("v1.13.2-gke.0".into()),
            ..Default::default()
        })
        .unwrap();
        manager.emit_component_version().unwrap();

        let text = manager.gather_text().unwrap();
        assert!(text.contains(r#"component_version{component_version="v1.13.2-gke.0"} 1"#));
    }

    #[test]
    fn test_emit_component_version_requires_config() {
        let manager = MetricsManager::new(MetricsConfig::default()).unwrap();
        assert_matches!(manager.emit_component_version(), Err(Error::Configuration(_)));

        let manager = MetricsManager::new(MetricsConfig {
            component_version: Some(String::new()),
            ..Default::default()
        })
        .unwrap();
        assert_matches!(manager.emit_component_version(), Err(Error::Configuration(_)));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let registry = Registry::new();
        MetricsManager::with_registry(MetricsConfig::default(), registry.clone()).unwrap();
        assert_matches!(
            MetricsManager::with_registry(MetricsConfig::default(), registry),
            Err(Error::Metrics(_))
        );
    }
}
