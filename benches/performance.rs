// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for serial-melody
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Alphabet filtering throughput on noisy input
//! - Note layout
//! - MIDI encoding of long captures

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use serial_melody::music::{filter, filter_bytes};
use serial_melody::MelodyExporter;

/// Noisy serial-like input: accepted symbols mixed with line endings and junk
fn noisy_input(len: usize) -> String {
    const PATTERN: &str = "1a\r\n2Bz0\u{ff}9i ";
    PATTERN.chars().cycle().take(len).collect()
}

/// Benchmark alphabet filtering (runs on every received byte)
fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [100, 1000, 10000].iter() {
        let input = noisy_input(*size);

        group.bench_with_input(BenchmarkId::new("str", size), &input, |b, input| {
            b.iter(|| black_box(filter(black_box(input)).len()))
        });

        group.bench_with_input(BenchmarkId::new("bytes", size), &input, |b, input| {
            b.iter(|| black_box(filter_bytes(black_box(input.as_bytes())).len()))
        });
    }

    group.finish();
}

/// Benchmark note layout
fn bench_build_notes(c: &mut Criterion) {
    let symbols = filter(&noisy_input(10000));

    c.bench_function("build_notes_10000", |b| {
        b.iter(|| black_box(MelodyExporter::build_notes(black_box(&symbols)).map(|notes| notes.len())))
    });
}

/// Benchmark full encoding to bytes
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let exporter = MelodyExporter::new();

    // 30 s at 230400 baud tops out well above these sizes, but captures are
    // rate-limited by the instrument in practice
    for size in [100, 1000, 10000].iter() {
        let input = noisy_input(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| black_box(exporter.to_bytes(black_box(input)).map(|(_, bytes)| bytes.len())))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_build_notes, bench_encode);
criterion_main!(benches);
