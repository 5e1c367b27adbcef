//! Benchmark for metric label derivation
//!
//! Runs on every failed CSI operation, so it should stay allocation-light.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pd_cloud_disk::compute::{alpha, beta, v1};
use pd_cloud_disk::{derive_metric_parameters, CloudDisk, DiskView};

const TYPE_URL: &str =
    "https://www.googleapis.com/compute/v1/projects/p/zones/us-central1-a/diskTypes/hyperdisk-balanced";

fn bench_derive_metric_parameters(c: &mut Criterion) {
    let mut group = c.benchmark_group("metric_parameters");
    group.throughput(Throughput::Elements(1));

    let disks = [
        (
            "v1",
            CloudDisk::from_v1(v1::Disk {
                r#type: TYPE_URL.to_string(),
                ..Default::default()
            }),
        ),
        (
            "beta",
            CloudDisk::from_beta(beta::Disk {
                r#type: TYPE_URL.to_string(),
                enable_confidential_compute: true,
                ..Default::default()
            }),
        ),
        (
            "alpha",
            CloudDisk::from_alpha(alpha::Disk {
                r#type: TYPE_URL.to_string(),
                storage_pool: "projects/p/zones/us-central1-a/storagePools/sp1".to_string(),
                ..Default::default()
            }),
        ),
    ];

    for (name, disk) in &disks {
        group.bench_function(*name, |b| {
            b.iter(|| derive_metric_parameters(black_box(Some(disk))));
        });
    }

    group.bench_function("absent", |b| {
        b.iter(|| derive_metric_parameters(black_box(None)));
    });

    group.finish();
}

fn bench_pd_type(c: &mut Criterion) {
    let mut group = c.benchmark_group("cloud_disk");
    group.throughput(Throughput::Elements(1));

    let disk = CloudDisk::from_alpha(alpha::Disk {
        r#type: TYPE_URL.to_string(),
        ..Default::default()
    });

    group.bench_function("pd_type", |b| {
        b.iter(|| black_box(&disk).pd_type().len());
    });

    group.finish();
}

criterion_group!(benches, bench_derive_metric_parameters, bench_pd_type);
criterion_main!(benches);
