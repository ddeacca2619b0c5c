//! Benchmark suite for sprite boundary detection
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench slice

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gani_benches::{generate_atlas, generate_solid_atlas};
use gani_types::atlas::{SliceConfig, detect_bounds};
use std::hint::black_box;

/// Small blobs on a large atlas: the common editor click
fn bench_grid_atlas(c: &mut Criterion) {
	let mut group = c.benchmark_group("slice_grid");

	for cell in [16u32, 64, 256] {
		let atlas = generate_atlas(1024, 1024, cell);
		group.throughput(Throughput::Elements(u64::from(cell) * u64::from(cell)));
		group.bench_with_input(BenchmarkId::new("cell", cell), &atlas, |b, atlas| {
			b.iter(|| {
				let result = detect_bounds(atlas, black_box(cell / 2), black_box(cell / 2), SliceConfig::default());
				black_box(result)
			});
		});
	}

	group.finish();
}

/// One region covering the whole atlas
fn bench_solid_atlas(c: &mut Criterion) {
	let mut group = c.benchmark_group("slice_solid");
	group.sample_size(20);

	for side in [256u32, 1024] {
		let atlas = generate_solid_atlas(side, side);
		group.throughput(Throughput::Elements(u64::from(side) * u64::from(side)));
		group.bench_with_input(BenchmarkId::new("side", side), &atlas, |b, atlas| {
			b.iter(|| black_box(detect_bounds(atlas, 0, 0, SliceConfig::unbounded())));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_grid_atlas, bench_solid_atlas);
criterion_main!(benches);
