//! Compute Engine disk records
//!
//! This module contains:
//! - `v1`, `beta`, `alpha`: per-revision disk records in the REST wire shape
//! - `cloud_disk`: the revision-independent [`CloudDisk`] view
//! - loaders that decode a record of a given revision from JSON or YAML

pub mod alpha;
pub mod beta;
pub mod cloud_disk;
pub mod v1;
mod wire;

pub use cloud_disk::*;
pub use wire::CustomerEncryptionKey;

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

// =============================================================================
// Input Format
// =============================================================================

/// Serialization format of a disk record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Guess the format from a file extension, defaulting to JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                InputFormat::Yaml
            }
            _ => InputFormat::Json,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Json => write!(f, "json"),
            InputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(InputFormat::Json),
            "yaml" | "yml" => Ok(InputFormat::Yaml),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

// =============================================================================
// Loaders
// =============================================================================

fn decode<T: DeserializeOwned>(format: InputFormat, bytes: &[u8]) -> Result<T> {
    match format {
        InputFormat::Json => Ok(serde_json::from_slice(bytes)?),
        InputFormat::Yaml => Ok(serde_yaml::from_slice(bytes)?),
    }
}

/// Decode a disk record of the given revision
pub fn load_disk(version: ApiVersion, format: InputFormat, bytes: &[u8]) -> Result<CloudDisk> {
    let disk = match version {
        ApiVersion::V1 => CloudDisk::from_v1(decode(format, bytes)?),
        ApiVersion::Beta => CloudDisk::from_beta(decode(format, bytes)?),
        ApiVersion::Alpha => CloudDisk::from_alpha(decode(format, bytes)?),
    };
    debug!(version = %version, format = %format, name = disk.name(), "Loaded disk record");
    Ok(disk)
}

/// Read and decode a disk record file; the format follows the extension
pub fn load_disk_file(version: ApiVersion, path: impl AsRef<Path>) -> Result<CloudDisk> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    load_disk(version, InputFormat::from_path(path), &bytes)
}
