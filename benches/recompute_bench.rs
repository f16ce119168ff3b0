//! Benchmarks for the recompute operations
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use gamedash::dataset::DatasetLoader;
use gamedash::reactive::{ControlId, ControlValue, Runtime};
use gamedash::recompute::{
    release_timeline, score_scatter, selection_count, FilterSelection, YearBounds,
};
use std::fmt::Write;
use std::sync::Arc;

const PLATFORMS: [&str; 6] = ["PS2", "PS3", "PS4", "X360", "Wii", "PC"];
const GENRES: [&str; 5] = ["Action", "RPG", "Sports", "Shooter", "Racing"];
const RATINGS: [&str; 4] = ["E", "E10+", "T", "M"];

fn create_test_table(rows: usize) -> String {
    let mut csv =
        String::from("Name,Platform,Year_of_Release,Genre,Publisher,Critic_Score,User_Score,Rating\n");
    for i in 0..rows {
        let _ = writeln!(
            csv,
            "Game {},{},{},{},Bench,{},{:.1},{}",
            i,
            PLATFORMS[i % PLATFORMS.len()],
            2000 + (i % 17),
            GENRES[i % GENRES.len()],
            40 + (i % 60),
            (i % 100) as f64 / 10.0,
            RATINGS[i % RATINGS.len()]
        );
    }
    csv
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [1_000, 10_000] {
        let table = create_test_table(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("clean_{}", size), |b| {
            b.iter(|| DatasetLoader::new().load_str(black_box(&table)).unwrap())
        });
    }

    group.finish();
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute");

    for size in [1_000, 10_000] {
        let dataset = DatasetLoader::new()
            .load_str(&create_test_table(size))
            .unwrap();
        let selection = FilterSelection::new(2002, 2014, ["Action", "RPG", "Shooter"], ["E", "T", "M"]);
        let bounds = YearBounds::Exclusive;

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("count_{}", size), |b| {
            b.iter(|| selection_count(black_box(&selection), &dataset, bounds))
        });

        group.bench_function(format!("timeline_{}", size), |b| {
            b.iter(|| release_timeline(black_box(&selection), &dataset, bounds))
        });

        group.bench_function(format!("scatter_{}", size), |b| {
            b.iter(|| score_scatter(black_box(&selection), &dataset, bounds))
        });
    }

    group.finish();
}

fn bench_runtime(c: &mut Criterion) {
    let dataset = DatasetLoader::new()
        .load_str(&create_test_table(10_000))
        .unwrap();
    let runtime = Runtime::new(Arc::new(dataset), YearBounds::Exclusive);

    c.bench_function("runtime_apply_rating", |b| {
        let mut selection = runtime.initial_selection();
        b.iter(|| {
            runtime
                .apply(
                    &mut selection,
                    ControlId::RatingDropdown,
                    black_box(ControlValue::Multi(vec!["E".into(), "T".into()])),
                )
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_load, bench_recompute, bench_runtime);
criterion_main!(benches);
