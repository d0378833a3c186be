//! Performance benchmarks for the search pipeline.
//!
//! Run with: cargo bench
//!
//! These benchmarks cover:
//! - Building the normalized projection for bodies of various sizes
//! - Finding matches and rendering highlighted HTML
//! - Running a query across a diary of many entries

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use diario::search::{build_projection, find_matches, render, search_entries};
use diario::Entry;

const PARAGRAPH: &str = "Hoy desayuné en el café de la esquina con Ángela. \
    Hablamos del pingüino del zoológico y de su résumé.\n\
    Después caminé hasta la estación.\n\n";

fn body_of_size(bytes: usize) -> String {
    let mut body = String::with_capacity(bytes + PARAGRAPH.len());
    while body.len() < bytes {
        body.push_str(PARAGRAPH);
    }
    body
}

/// Benchmark projection building at various body sizes.
fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_projection");

    for (name, size) in [("1KB", 1024), ("16KB", 16 * 1024), ("256KB", 256 * 1024)] {
        let body = body_of_size(size);
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &body, |b, body| {
            b.iter(|| black_box(build_projection(black_box(body))));
        });
    }

    group.finish();
}

/// Benchmark matching plus HTML rendering on a prebuilt projection.
fn bench_find_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_and_render");

    for (name, size) in [("1KB", 1024), ("16KB", 16 * 1024), ("256KB", 256 * 1024)] {
        let body = body_of_size(size);
        let projection = build_projection(&body);
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &body, |b, body| {
            b.iter(|| {
                let matches = find_matches(&projection, black_box("cafe"));
                black_box(render(body, &matches, true));
            });
        });
    }

    group.finish();
}

/// Benchmark a query over diaries with many entries.
fn bench_search_entries(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_entries");

    for count in [100_i64, 1_000, 5_000] {
        let entries: Vec<Entry> = (0..count)
            .map(|id| Entry {
                id,
                title: (id % 3 == 0).then(|| format!("Día número {}", id)),
                body: body_of_size(2 * 1024),
                created_at: "19 Oct 2026, 08:00".to_string(),
                edited_at: None,
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(count), &entries, |b, entries| {
            b.iter(|| black_box(search_entries(black_box("pinguino"), entries)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_projection,
    bench_find_and_render,
    bench_search_entries
);
criterion_main!(benches);
