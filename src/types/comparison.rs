//! Contains the `ComparisonTable`: several locations side by side on a shared date index.

use crate::error::ClimateError;
use crate::types::record::{DailyValues, Measurement};
use crate::types::traits::any::any_date::AnyDate;
use crate::types::traits::period::date_period::DatePeriod;
use crate::types::traits::types::{StartEndDate, Year};
use chrono::NaiveDate;

/// One date of a [`ComparisonTable`]. `values` is parallel to the table's
/// locations; `None` marks a location without data on that date.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub values: Vec<Option<DailyValues>>,
}

/// Locations joined on date, produced by [`crate::merge`].
///
/// Rows are sorted by date. Depending on the [`crate::MergeMode`] used, the
/// dates are either those shared by all locations or the union of all dates.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    locations: Vec<String>,
    rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub(crate) fn new(locations: Vec<String>, rows: Vec<ComparisonRow>) -> Self {
        Self { locations, rows }
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|row| row.date)
    }

    pub fn location_index(&self, location_id: &str) -> Option<usize> {
        self.locations.iter().position(|l| l == location_id)
    }

    /// The value of `measurement` for `location_id` on `date`, if both exist and it was recorded.
    pub fn value(&self, date: NaiveDate, location_id: &str, measurement: Measurement) -> Option<f64> {
        let idx = self.location_index(location_id)?;
        let row = self
            .rows
            .binary_search_by_key(&date, |row| row.date)
            .ok()
            .map(|i| &self.rows[i])?;
        row.values[idx].and_then(|v| v.get(measurement))
    }

    /// All dates of the table with the given location's `measurement`.
    /// Returns `None` for an unknown location.
    pub fn column(
        &self,
        location_id: &str,
        measurement: Measurement,
    ) -> Option<Vec<(NaiveDate, Option<f64>)>> {
        let idx = self.location_index(location_id)?;
        Some(
            self.rows
                .iter()
                .map(|row| (row.date, row.values[idx].and_then(|v| v.get(measurement))))
                .collect(),
        )
    }

    /// Rows dated within `start..=end`.
    pub fn for_range(
        &self,
        start: impl AnyDate,
        end: impl AnyDate,
    ) -> Result<ComparisonTable, ClimateError> {
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
        Ok(Self {
            locations: self.locations.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| bounds.contains(row.date))
                .cloned()
                .collect(),
        })
    }

    /// Rows within a [`DatePeriod`], typically a [`crate::Year`].
    pub fn for_period(&self, period: impl DatePeriod) -> Result<ComparisonTable, ClimateError> {
        let period = period
            .get_date_period()
            .ok_or(ClimateError::DateParsingError)?;
        self.for_range(period.start, period.end)
    }

    pub fn for_year(&self, year: i32) -> Result<ComparisonTable, ClimateError> {
        self.for_period(Year(year))
    }
}
