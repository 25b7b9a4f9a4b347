//! Benchmarks for the record store.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qcreview::session::{FilterMode, compute_filtered_indices};
use qcreview::store::{Dataset, format_flag, read_csv, save};

fn sample_dataset(rows: usize) -> Dataset {
    let mut dataset = Dataset::new(
        ["id", "img_name", "hr", "vo2", "bad_vals", "edited", "editor", "viewed"]
            .into_iter()
            .map(String::from)
            .collect(),
    );
    for i in 0..rows {
        dataset.push_row(vec![
            i.to_string(),
            format!("plot_{i:05}.png"),
            (60 + i % 40).to_string(),
            format!("{:.2}", 30.0 + (i % 17) as f64 * 0.5),
            format_flag(i % 7 == 0).to_string(),
            format_flag(false).to_string(),
            String::new(),
            format_flag(i % 3 == 0).to_string(),
        ]);
    }
    dataset
}

fn bench_save_full_table(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run_edited.csv");
    let dataset = sample_dataset(5_000);
    c.bench_function("save_5000_rows", |b| {
        b.iter(|| save(black_box(&dataset), &path).unwrap())
    });
}

fn bench_read_full_table(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run_edited.csv");
    save(&sample_dataset(5_000), &path).unwrap();
    c.bench_function("read_5000_rows", |b| {
        b.iter(|| read_csv(black_box(&path)).unwrap())
    });
}

fn bench_filter(c: &mut Criterion) {
    let dataset = sample_dataset(5_000);
    c.bench_function("filter_unviewed_bad", |b| {
        b.iter(|| compute_filtered_indices(black_box(&dataset), FilterMode::UnviewedBadOnly))
    });
}

criterion_group!(benches, bench_save_full_table, bench_read_full_table, bench_filter);
criterion_main!(benches);
