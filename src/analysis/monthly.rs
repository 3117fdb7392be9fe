use crate::types::dataset::LocationDataset;
use crate::types::record::Measurement;
use chrono::Datelike;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distribution of one measurement over every day of a calendar month, all years combined.
/// These are the five numbers a box plot needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// 1 = January.
    pub month: u32,
    pub count: usize,
    pub min: f64,
    pub lower_quartile: f64,
    pub median: f64,
    pub upper_quartile: f64,
    pub max: f64,
}

/// Linear interpolation between the closest ranks of a sorted, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

/// Per-month distribution of `measurement`, using one value per date
/// (stations averaged). Months without any value are omitted.
pub fn monthly_summary(dataset: &LocationDataset, measurement: Measurement) -> Vec<MonthlySummary> {
    let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for (date, values) in dataset.daily_values() {
        if let Some(value) = values.get(measurement) {
            by_month.entry(date.month()).or_default().push(value);
        }
    }

    by_month
        .into_iter()
        .map(|(month, mut values)| {
            values.sort_by_key(|v| OrderedFloat(*v));
            MonthlySummary {
                month,
                count: values.len(),
                min: values[0],
                lower_quartile: quantile(&values, 0.25),
                median: quantile(&values, 0.5),
                upper_quartile: quantile(&values, 0.75),
                max: values[values.len() - 1],
            }
        })
        .collect()
}
