//! pd-disk
//!
//! Inspect Compute Engine persistent disk records the way the CSI driver
//! sees them: through the revision-independent view and the derived
//! metric labels.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pd_cloud_disk::compute::{alpha, beta, v1};
use pd_cloud_disk::{
    derive_metric_parameters, load_disk, load_disk_file, ApiVersion, CloudDisk, DiskSummary,
    InputFormat, MetricsConfig, MetricsManager, Result, PDCSI_DRIVER_NAME,
};

// =============================================================================
// CLI Arguments
// =============================================================================

/// pd-disk - persistent disk metadata inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn", global = true)]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON", global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every accessor of a disk record as JSON
    Inspect {
        #[command(flatten)]
        source: DiskSource,
    },

    /// Print the metric labels derived from a disk record
    MetricParams {
        #[command(flatten)]
        source: OptionalDiskSource,
    },

    /// Print the JSON schema of a disk record revision
    Schema {
        /// Compute API revision (v1, beta, alpha)
        #[arg(long, default_value = "v1", value_parser = parse_api_version)]
        api_version: ApiVersion,
    },

    /// Record one operation error and print the metrics exposition
    RecordError {
        /// Full gRPC method name
        #[arg(long)]
        method: String,

        /// gRPC status code name
        #[arg(long, default_value = "Internal")]
        code: String,

        /// CSI driver name label
        #[arg(long, env = "PDCSI_DRIVER_NAME", default_value = PDCSI_DRIVER_NAME)]
        driver_name: String,

        /// Component version to publish alongside the error
        #[arg(long, env = "GKE_PDCSI_VERSION")]
        component_version: Option<String>,

        #[command(flatten)]
        source: OptionalDiskSource,
    },
}

#[derive(clap::Args, Debug)]
struct DiskSource {
    /// Compute API revision of the record (v1, beta, alpha)
    #[arg(long, default_value = "v1", value_parser = parse_api_version)]
    api_version: ApiVersion,

    /// Record format; inferred from the file extension when omitted
    #[arg(long, value_parser = parse_format)]
    format: Option<InputFormat>,

    /// Disk record file, `-` for stdin
    file: PathBuf,
}

#[derive(clap::Args, Debug)]
struct OptionalDiskSource {
    /// Compute API revision of the record (v1, beta, alpha)
    #[arg(long, default_value = "v1", value_parser = parse_api_version)]
    api_version: ApiVersion,

    /// Record format; inferred from the file extension when omitted
    #[arg(long, value_parser = parse_format)]
    format: Option<InputFormat>,

    /// Disk record file, `-` for stdin; omit to describe an absent disk
    file: Option<PathBuf>,
}

fn parse_api_version(s: &str) -> std::result::Result<ApiVersion, String> {
    s.parse().map_err(|e: pd_cloud_disk::Error| e.to_string())
}

fn parse_format(s: &str) -> std::result::Result<InputFormat, String> {
    s.parse().map_err(|e: pd_cloud_disk::Error| e.to_string())
}

// =============================================================================
// Main
// =============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);
    info!(version = pd_cloud_disk::VERSION, "Starting pd-disk");

    match args.command {
        Command::Inspect { source } => {
            let disk = read_disk(source.api_version, source.format, &source.file)?;
            print_json(&DiskSummary::from_view(&disk))?;
        }
        Command::MetricParams { source } => {
            let disk = read_optional_disk(&source)?;
            print_json(&derive_metric_parameters(disk.as_ref()))?;
        }
        Command::Schema { api_version } => {
            let schema = match api_version {
                ApiVersion::V1 => schemars::schema_for!(v1::Disk),
                ApiVersion::Beta => schemars::schema_for!(beta::Disk),
                ApiVersion::Alpha => schemars::schema_for!(alpha::Disk),
            };
            print_json(&schema)?;
        }
        Command::RecordError {
            method,
            code,
            driver_name,
            component_version,
            source,
        } => {
            let disk = read_optional_disk(&source)?;
            let manager = MetricsManager::new(MetricsConfig {
                driver_name,
                component_version,
            })?;
            if manager.config().component_version.is_some() {
                manager.emit_component_version()?;
            }
            manager.record_operation_error(&method, &code, disk.as_ref());
            print!("{}", manager.gather_text()?);
        }
    }

    Ok(())
}

fn read_disk(version: ApiVersion, format: Option<InputFormat>, path: &Path) -> Result<CloudDisk> {
    if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::Read::read_to_end(&mut std::io::stdin(), &mut bytes)?;
        return load_disk(version, format.unwrap_or(InputFormat::Json), &bytes);
    }

    match format {
        Some(format) => load_disk(version, format, &std::fs::read(path)?),
        None => load_disk_file(version, path),
    }
}

fn read_optional_disk(source: &OptionalDiskSource) -> Result<Option<CloudDisk>> {
    source
        .file
        .as_ref()
        .map(|path| read_disk(source.api_version, source.format, path))
        .transpose()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // stdout carries command output, logs go to stderr
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
