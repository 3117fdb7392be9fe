use chrono::{Datelike, Duration, NaiveDate};
use climate_compare::{
    merge, monthly_summary, yearly_aggregates, AnalysisSettings, LocationDataset, Measurement,
    MergeMode, WeatherRecord,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Sixty years of daily records with a seasonal temperature curve.
fn synthetic_dataset(location: &str, offset: f64) -> LocationDataset {
    let start = NaiveDate::from_ymd_opt(1964, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
    let days = (end - start).num_days();
    let records = (0..=days)
        .map(|i| {
            let date = start + Duration::days(i);
            let season = (f64::from(date.ordinal()) / 365.25 * std::f64::consts::TAU).cos();
            WeatherRecord {
                location_id: location.to_string(),
                date,
                station_id: "USC00000001".to_string(),
                tmax: Some(62.0 - 18.0 * season + offset),
                tmin: Some(44.0 - 14.0 * season + offset),
                tavg: None,
                precipitation: Some(if i % 3 == 0 { 0.2 } else { 0.0 }),
            }
        })
        .collect();
    LocationDataset::new(location, records)
}

fn bench_aggregation(c: &mut Criterion) {
    let ridgefield = synthetic_dataset("ridgefield", 0.0);
    let portland = synthetic_dataset("portland", 3.0);
    let settings = AnalysisSettings::default();

    c.bench_function("yearly_aggregates", |b| {
        b.iter(|| yearly_aggregates(black_box(&ridgefield), black_box(&settings)))
    });
    c.bench_function("monthly_summary", |b| {
        b.iter(|| monthly_summary(black_box(&ridgefield), Measurement::MaxTemperature))
    });
    let pair = [ridgefield.clone(), portland];
    c.bench_function("merge_outer", |b| {
        b.iter(|| merge(black_box(&pair), MergeMode::Outer))
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
