//! Benchmark suite for the animation text format and sprite rendering
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml --bench script

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use gani_benches::{generate_atlas, generate_script};
use gani_types::{atlas::render_sprite, gani::Animation};
use std::hint::black_box;

/// Parse and serialise scripts of increasing length
fn bench_codec(c: &mut Criterion) {
	let mut group = c.benchmark_group("gani_codec");

	for frames in [16usize, 256, 2048] {
		let text = generate_script(64, frames, 6);
		group.throughput(Throughput::Bytes(text.len() as u64));
		group.bench_with_input(BenchmarkId::new("parse", frames), &text, |b, text| {
			b.iter(|| black_box(Animation::from_text(black_box(text))));
		});

		let ani = Animation::from_text(&text);
		group.bench_with_input(BenchmarkId::new("write", frames), &ani, |b, ani| {
			b.iter(|| black_box(ani.to_text()));
		});
	}

	group.finish();
}

/// Render every sprite of a generated script against a generated atlas
fn bench_render(c: &mut Criterion) {
	let atlas = generate_atlas(2048, 32, 32);
	let ani = Animation::from_text(&generate_script(64, 4, 2));

	c.bench_function("render_all_sprites", |b| {
		b.iter(|| {
			for sprite in ani.sprites() {
				black_box(render_sprite(sprite, Some(&atlas)));
			}
		});
	});
}

criterion_group!(benches, bench_codec, bench_render);
criterion_main!(benches);
