//! latmon-core 집계 벤치마크
//!
//! 실행: cargo bench -p latmon-core
//!
//! 벤치마크 대상:
//! - 데이터셋 크기별 단일 리전 집계
//! - 요청 리전 수별 집계

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use latmon_core::aggregator::aggregate;
use latmon_core::models::telemetry::TelemetryRecord;
use latmon_core::store::TelemetryStore;
use std::hint::black_box;

const REGIONS: [&str; 4] = ["apac", "emea", "amer", "latam"];

/// 테스트용 저장소 생성
fn create_store(size: usize) -> TelemetryStore {
    let records = (0..size)
        .map(|i| {
            TelemetryRecord::new(
                REGIONS[i % REGIONS.len()],
                100.0 + (i * 37 % 150) as f64,
                97.0 + (i % 30) as f64 / 10.0,
            )
        })
        .collect();
    TelemetryStore::from_records(records, "bench").expect("저장소 생성 실패")
}

/// 데이터셋 크기별 집계 벤치마크
fn bench_dataset_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_dataset_size");

    for size in [100, 1_000, 10_000] {
        let store = create_store(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &store, |b, store| {
            b.iter(|| aggregate(black_box(store), black_box(&["apac"][..]), 180))
        });
    }

    group.finish();
}

/// 요청 리전 수별 집계 벤치마크
fn bench_region_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_region_count");
    let store = create_store(5_000);

    for count in 1..=REGIONS.len() {
        let regions = &REGIONS[..count];
        group.bench_with_input(BenchmarkId::from_parameter(count), &regions, |b, regions| {
            b.iter(|| aggregate(black_box(&store), black_box(*regions), 180))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dataset_size, bench_region_count);
criterion_main!(benches);
