use crate::analysis::error::AnalysisError;
use crate::types::comparison::{ComparisonRow, ComparisonTable};
use crate::types::dataset::LocationDataset;
use crate::types::record::DailyValues;
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Which dates end up in a [`ComparisonTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MergeMode {
    /// Only dates every location has data for.
    Inner,
    /// Every date any location has data for; absent locations are `None`.
    #[default]
    Outer,
}

/// Joins the datasets of several locations on date.
///
/// Each location's stations are first combined into one [`DailyValues`] per
/// date (see [`LocationDataset::daily_values`]). Column order follows the
/// order of `datasets`.
///
/// # Arguments
///
/// * `datasets` - One dataset per location; location ids must be unique.
/// * `mode` - [`MergeMode::Inner`] keeps shared dates only, [`MergeMode::Outer`] keeps all.
///
/// # Returns
///
/// A [`ComparisonTable`] with one row per kept date, sorted ascending.
///
/// # Errors
///
/// * [`AnalysisError::NoDatasets`] if `datasets` is empty.
/// * [`AnalysisError::DuplicateLocation`] if two datasets share a location id.
/// * [`AnalysisError::EmptyOverlap`] in [`MergeMode::Inner`] when no date is common to all.
///
/// # Example
///
/// ```no_run
/// use climate_compare::{load, merge, MergeMode, Measurement};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let ridgefield = load("data/ridgefield.csv", "ridgefield")?;
/// let portland = load("data/portland.csv", "portland")?;
/// let table = merge(&[ridgefield, portland], MergeMode::Inner)?;
/// for (date, tmin) in table.column("portland", Measurement::MinTemperature).unwrap_or_default() {
///     println!("{date}: {tmin:?}");
/// }
/// # Ok(())
/// # }
/// ```
pub fn merge(datasets: &[LocationDataset], mode: MergeMode) -> Result<ComparisonTable, AnalysisError> {
    if datasets.is_empty() {
        return Err(AnalysisError::NoDatasets);
    }
    let mut seen = HashSet::with_capacity(datasets.len());
    for dataset in datasets {
        if !seen.insert(dataset.location_id()) {
            return Err(AnalysisError::DuplicateLocation(
                dataset.location_id().to_string(),
            ));
        }
    }

    let locations: Vec<String> = datasets
        .iter()
        .map(|d| d.location_id().to_string())
        .collect();
    let per_location: Vec<BTreeMap<NaiveDate, DailyValues>> =
        datasets.iter().map(|d| d.daily_values()).collect();

    let mut by_date: BTreeMap<NaiveDate, Vec<Option<DailyValues>>> = BTreeMap::new();
    for (idx, values) in per_location.iter().enumerate() {
        for (date, daily) in values {
            by_date
                .entry(*date)
                .or_insert_with(|| vec![None; locations.len()])[idx] = Some(*daily);
        }
    }
    let union_len = by_date.len();

    let rows: Vec<ComparisonRow> = by_date
        .into_iter()
        .filter(|(_, values)| match mode {
            MergeMode::Inner => values.iter().all(Option::is_some),
            MergeMode::Outer => true,
        })
        .map(|(date, values)| ComparisonRow { date, values })
        .collect();

    if rows.is_empty() && mode == MergeMode::Inner {
        return Err(AnalysisError::EmptyOverlap { locations });
    }
    debug!(
        "{:?} merge kept {} of {} distinct dates",
        mode,
        rows.len(),
        union_len
    );
    info!("Merged {} locations over {} dates", locations.len(), rows.len());
    Ok(ComparisonTable::new(locations, rows))
}
