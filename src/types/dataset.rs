//! Contains the `LocationDataset` structure: every daily record loaded for one
//! location, kept sorted by date.

use crate::error::ClimateError;
use crate::types::record::{DailyValues, Measurement, WeatherRecord};
use crate::types::station::StationSite;
use crate::types::traits::any::any_date::AnyDate;
use crate::types::traits::period::date_period::DatePeriod;
use crate::types::traits::types::StartEndDate;
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};

/// All daily records of one location, ordered by `(date, station_id)`.
///
/// Dates need not be contiguous and several stations may report for the same
/// day; `(station_id, date)` is unique within a dataset.
///
/// Instances are normally produced by [`crate::load`] or
/// [`crate::ClimateWorkbench::load`]. The slicing methods (`get_range`,
/// `get_at`, `get_for_period`) return new datasets and leave the original untouched.
///
/// # Example
///
/// ```no_run
/// # use climate_compare::{load, ClimateError, Year};
/// # fn main() -> Result<(), ClimateError> {
/// let portland = load("data/portland.csv", "portland")?;
///
/// // Only the records of 2021
/// let year = portland.get_for_period(Year(2021))?;
/// println!("{} records in 2021", year.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDataset {
    location_id: String,
    records: Vec<WeatherRecord>,
    station_names: BTreeMap<String, String>,
    sites: Vec<StationSite>,
}

impl LocationDataset {
    /// Creates a dataset from records, sorting them by date then station.
    pub fn new(location_id: impl Into<String>, mut records: Vec<WeatherRecord>) -> Self {
        records.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.station_id.cmp(&b.station_id))
        });
        Self {
            location_id: location_id.into(),
            records,
            station_names: BTreeMap::new(),
            sites: Vec::new(),
        }
    }

    /// Attaches station names and sites discovered while loading.
    pub(crate) fn with_stations(
        mut self,
        station_names: BTreeMap<String, String>,
        mut sites: Vec<StationSite>,
    ) -> Self {
        sites.sort_by(|a, b| a.station_id.cmp(&b.station_id));
        self.station_names = station_names;
        self.sites = sites;
        self
    }

    pub fn location_id(&self) -> &str {
        &self.location_id
    }

    pub fn records(&self) -> &[WeatherRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last date present, or `None` for an empty dataset.
    pub fn date_range(&self) -> Option<StartEndDate> {
        Some(StartEndDate {
            start: self.records.first()?.date,
            end: self.records.last()?.date,
        })
    }

    /// Distinct years with at least one record.
    pub fn years(&self) -> BTreeSet<i32> {
        self.records.iter().map(|r| r.date.year()).collect()
    }

    /// Distinct station ids, sorted.
    pub fn station_ids(&self) -> BTreeSet<&str> {
        self.records.iter().map(|r| r.station_id.as_str()).collect()
    }

    pub fn station_name(&self, station_id: &str) -> Option<&str> {
        self.station_names.get(station_id).map(String::as_str)
    }

    /// Station sites found in the source file, sorted by station id.
    pub fn sites(&self) -> &[StationSite] {
        &self.sites
    }

    /// Whether any record carries a value for `measurement`.
    pub fn has_measurement(&self, measurement: Measurement) -> bool {
        self.records.iter().any(|r| r.value(measurement).is_some())
    }

    /// Keeps the records matching `predicate`; station metadata is preserved.
    pub fn filter(&self, predicate: impl Fn(&WeatherRecord) -> bool) -> LocationDataset {
        LocationDataset {
            location_id: self.location_id.clone(),
            records: self.records.iter().filter(|r| predicate(r)).cloned().collect(),
            station_names: self.station_names.clone(),
            sites: self.sites.clone(),
        }
    }

    /// Records dated within `start..=end`. Either bound may be any [`AnyDate`];
    /// a `Year` or `Month` start uses its first day and an end uses its last day.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::DateParsingError`] if a bound cannot be resolved.
    pub fn get_range(
        &self,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<LocationDataset, ClimateError> {
        let bounds = StartEndDate {
            start: start
                .get_date_range()
                .ok_or(ClimateError::DateParsingError)?
                .start,
            end: end
                .get_date_range()
                .ok_or(ClimateError::DateParsingError)?
                .end,
        };
        Ok(self.filter(|r| bounds.contains(r.date)))
    }

    /// Records of a single day (one per reporting station).
    pub fn get_at(&self, date: impl AnyDate) -> Result<LocationDataset, ClimateError> {
        let day = date
            .get_date_range()
            .ok_or(ClimateError::DateParsingError)?
            .start;
        Ok(self.filter(|r| r.date == day))
    }

    /// Records within a [`DatePeriod`] such as a [`crate::Year`] or [`crate::Month`].
    pub fn get_for_period(&self, period: impl DatePeriod) -> Result<LocationDataset, ClimateError> {
        let period = period
            .get_date_period()
            .ok_or(ClimateError::DateParsingError)?;
        self.get_range(period.start, period.end)
    }

    /// Records of one station only.
    pub fn for_station(&self, station_id: &str) -> LocationDataset {
        self.filter(|r| r.station_id == station_id)
    }

    /// One value set per date, averaging stations that reported on the same day.
    pub fn daily_values(&self) -> BTreeMap<NaiveDate, DailyValues> {
        let mut by_date: BTreeMap<NaiveDate, Vec<&WeatherRecord>> = BTreeMap::new();
        for record in &self.records {
            by_date.entry(record.date).or_default().push(record);
        }
        by_date
            .into_iter()
            .map(|(date, records)| (date, DailyValues::mean_of(records)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Month, Year};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(date: NaiveDate, station: &str, tmax: f64) -> WeatherRecord {
        WeatherRecord {
            location_id: "ridgefield".to_string(),
            date,
            station_id: station.to_string(),
            tmax: Some(tmax),
            tmin: Some(tmax - 20.0),
            tavg: None,
            precipitation: None,
        }
    }

    fn sample() -> LocationDataset {
        LocationDataset::new(
            "ridgefield",
            vec![
                record(day(2021, 3, 2), "B", 55.0),
                record(day(2020, 12, 31), "A", 40.0),
                record(day(2021, 3, 2), "A", 57.0),
                record(day(2021, 1, 15), "A", 45.0),
                record(day(2022, 7, 4), "B", 88.0),
            ],
        )
    }

    #[test]
    fn test_new_sorts_by_date_then_station() {
        let ds = sample();
        let keys: Vec<(NaiveDate, &str)> = ds
            .records()
            .iter()
            .map(|r| (r.date, r.station_id.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (day(2020, 12, 31), "A"),
                (day(2021, 1, 15), "A"),
                (day(2021, 3, 2), "A"),
                (day(2021, 3, 2), "B"),
                (day(2022, 7, 4), "B"),
            ]
        );
        let range = ds.date_range().unwrap();
        assert_eq!(range.start, day(2020, 12, 31));
        assert_eq!(range.end, day(2022, 7, 4));
        assert_eq!(ds.years().into_iter().collect::<Vec<_>>(), vec![2020, 2021, 2022]);
    }

    #[test]
    fn test_get_for_period_year_and_month() -> Result<(), ClimateError> {
        let ds = sample();
        assert_eq!(ds.get_for_period(Year(2021))?.len(), 3);
        assert_eq!(ds.get_for_period(Month::new(3, 2021))?.len(), 2);
        assert!(ds.get_for_period(Year(1990))?.is_empty());
        Ok(())
    }

    #[test]
    fn test_get_range_mixes_bound_types() -> Result<(), ClimateError> {
        let ds = sample();
        let slice = ds.get_range(Year(2021), "2022-07-04")?;
        assert_eq!(slice.len(), 4);
        assert!(matches!(
            ds.get_range("garbage", Year(2022)),
            Err(ClimateError::DateParsingError)
        ));
        Ok(())
    }

    #[test]
    fn test_get_at_and_station_filter() -> Result<(), ClimateError> {
        let ds = sample();
        assert_eq!(ds.get_at(day(2021, 3, 2))?.len(), 2);
        assert_eq!(ds.for_station("B").len(), 2);
        assert_eq!(ds.station_ids().into_iter().collect::<Vec<_>>(), vec!["A", "B"]);
        Ok(())
    }

    #[test]
    fn test_daily_values_average_stations() {
        let values = sample().daily_values();
        assert_eq!(values.len(), 4);
        assert_eq!(values[&day(2021, 3, 2)].tmax, Some(56.0));
        assert_eq!(values[&day(2021, 3, 2)].tmin, Some(36.0));
    }
}
