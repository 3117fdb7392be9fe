//! The `ClimateWorkbench`: one object holding the column mapping and analysis
//! settings, with the loading and comparison steps exposed as builders.

use crate::analysis::aggregate::{self, YearlyAggregate};
use crate::analysis::merge::{merge, MergeMode};
use crate::analysis::monthly::{monthly_summary, MonthlySummary};
use crate::config::{AnalysisSettings, ColumnMapping};
use crate::error::ClimateError;
use crate::types::comparison::ComparisonTable;
use crate::types::dataset::LocationDataset;
use crate::types::hardiness::HardinessZone;
use crate::types::record::Measurement;
use crate::weather_data::loader::WeatherDataLoader;
use bon::bon;
use std::collections::BTreeMap;
use std::path::Path;

/// Entry point tying the loader, merger and aggregator together.
///
/// # Examples
///
/// ```no_run
/// use climate_compare::{AnalysisSettings, ClimateWorkbench, GreatDayRange, MergeMode};
/// use std::path::Path;
///
/// # fn main() -> Result<(), climate_compare::ClimateError> {
/// let workbench = ClimateWorkbench::builder()
///     .settings(
///         AnalysisSettings::builder()
///             .great_day(GreatDayRange::new(62.0, 78.0)?)
///             .build(),
///     )
///     .build();
///
/// let ridgefield = workbench
///     .load()
///     .path(Path::new("data/ridgefield.csv"))
///     .location("ridgefield")
///     .call()?;
/// let portland = workbench
///     .load()
///     .path(Path::new("data/portland.csv"))
///     .location("portland")
///     .call()?;
///
/// let table = workbench
///     .compare(&[ridgefield.clone(), portland])
///     .mode(MergeMode::Inner)
///     .call()?;
/// println!("{} shared days", table.len());
/// println!("zone {}", workbench.hardiness_zone(&ridgefield)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClimateWorkbench {
    loader: WeatherDataLoader,
    settings: AnalysisSettings,
}

#[bon]
impl ClimateWorkbench {
    /// Unset options fall back to [`ColumnMapping::default`] and [`AnalysisSettings::default`].
    #[builder]
    pub fn new(columns: Option<ColumnMapping>, settings: Option<AnalysisSettings>) -> Self {
        Self {
            loader: WeatherDataLoader::new(columns.unwrap_or_default()),
            settings: settings.unwrap_or_default(),
        }
    }

    pub fn columns(&self) -> &ColumnMapping {
        self.loader.columns()
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Loads one location file with the configured column mapping.
    #[builder]
    pub fn load(&self, path: &Path, location: &str) -> Result<LocationDataset, ClimateError> {
        Ok(self.loader.load(path, location)?)
    }

    /// Merges datasets on date, [`MergeMode::Outer`] unless a mode is given.
    #[builder]
    pub fn compare(
        &self,
        #[builder(start_fn)] datasets: &[LocationDataset],
        mode: Option<MergeMode>,
    ) -> Result<ComparisonTable, ClimateError> {
        Ok(merge(datasets, mode.unwrap_or_default())?)
    }

    pub fn yearly_summary(
        &self,
        dataset: &LocationDataset,
    ) -> Result<Vec<YearlyAggregate>, ClimateError> {
        Ok(aggregate::yearly_aggregates(dataset, &self.settings)?)
    }

    /// Great days per year, using the configured range and measurement.
    pub fn great_days(&self, dataset: &LocationDataset) -> Result<BTreeMap<i32, u32>, ClimateError> {
        let range = self.settings.great_day;
        Ok(aggregate::count_days_in_range(
            dataset,
            self.settings.great_day_measurement,
            range.low,
            range.high,
        )?)
    }

    /// Per-month distribution of a measurement named like a column (`"tmax"`, `"PRCP"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::UnknownMeasurement`] if `measurement` names no known measurement.
    pub fn monthly_summary(
        &self,
        dataset: &LocationDataset,
        measurement: &str,
    ) -> Result<Vec<MonthlySummary>, ClimateError> {
        let measurement: Measurement = measurement.parse()?;
        Ok(monthly_summary(dataset, measurement))
    }

    /// Hardiness zone over the configured rolling window.
    pub fn hardiness_zone(&self, dataset: &LocationDataset) -> Result<HardinessZone, ClimateError> {
        Ok(aggregate::hardiness_zone(dataset, self.settings.rolling)?)
    }
}

impl Default for ClimateWorkbench {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::error::AnalysisError;
    use crate::config::{GreatDayRange, RollingWindow};
    use std::fmt::Write as _;

    /// Five years of two daily rows: a cold winter night and a mild summer day.
    fn write_location(dir: &Path, name: &str, winter_low: i32) -> std::path::PathBuf {
        let mut csv = String::from("day,hi,lo\n");
        for year in 2015..2020 {
            writeln!(csv, "{year}-01-10,35,{winter_low}").unwrap();
            writeln!(csv, "{year}-07-10,70,52").unwrap();
        }
        let path = dir.join(name);
        std::fs::write(&path, csv).unwrap();
        path
    }

    fn workbench() -> ClimateWorkbench {
        ClimateWorkbench::builder()
            .columns(ColumnMapping {
                date: "day".to_string(),
                tmax: "hi".to_string(),
                tmin: "lo".to_string(),
                ..ColumnMapping::default()
            })
            .settings(
                AnalysisSettings::builder()
                    .great_day(GreatDayRange::new(65.0, 80.0).unwrap())
                    .rolling(RollingWindow::new(5))
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_workbench_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let bench = workbench();
        let ridgefield = bench
            .load()
            .path(&write_location(dir.path(), "ridgefield.csv", -5))
            .location("ridgefield")
            .call()?;
        let portland = bench
            .load()
            .path(&write_location(dir.path(), "portland.csv", 12))
            .location("portland")
            .call()?;

        let table = bench
            .compare(&[ridgefield.clone(), portland.clone()])
            .mode(MergeMode::Inner)
            .call()?;
        assert_eq!(table.len(), 10);

        let summary = bench.yearly_summary(&ridgefield)?;
        assert_eq!(summary.len(), 5);
        assert_eq!(summary[4].rolling_avg_min, Some(-5.0));
        assert!(summary.iter().all(|row| row.great_day_count == 1));

        assert_eq!(bench.great_days(&portland)?.get(&2017), Some(&1));
        assert_eq!(bench.hardiness_zone(&ridgefield)?.to_string(), "6b");
        assert_eq!(bench.hardiness_zone(&portland)?.to_string(), "8a");
        Ok(())
    }

    #[test]
    fn test_monthly_summary_by_name() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let bench = workbench();
        let ridgefield = bench
            .load()
            .path(&write_location(dir.path(), "ridgefield.csv", 20))
            .location("ridgefield")
            .call()?;

        let summary = bench.monthly_summary(&ridgefield, "TMIN")?;
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].month, 1);
        assert_eq!(summary[0].median, 20.0);
        assert_eq!(summary[1].max, 52.0);

        let unknown = bench.monthly_summary(&ridgefield, "snow");
        assert!(matches!(unknown, Err(ClimateError::UnknownMeasurement(_))));
        assert!(unknown
            .map_err(|e| e.to_string())
            .unwrap_err()
            .contains("snow"));
        Ok(())
    }

    #[test]
    fn test_default_workbench_and_errors() {
        let bench = ClimateWorkbench::default();
        assert_eq!(bench.columns(), &ColumnMapping::default());
        assert_eq!(bench.settings().rolling.window_years, 30);

        let result = bench.compare(&[]).call();
        assert!(matches!(
            result,
            Err(ClimateError::Analysis(AnalysisError::NoDatasets))
        ));

        let missing = bench
            .load()
            .path(Path::new("/definitely/not/here.csv"))
            .location("nowhere")
            .call();
        assert!(matches!(missing, Err(ClimateError::Load(_))));
    }
}
