//! Conversions into polars `DataFrame`s, for handing data to a plotting library
//! or to further polars processing.

use crate::analysis::aggregate::YearlyAggregate;
use crate::error::ClimateError;
use crate::types::comparison::ComparisonTable;
use crate::types::dataset::LocationDataset;
use crate::types::record::Measurement;
use crate::types::traits::period::date_period::DatePeriod;
use chrono::NaiveDate;
use polars::prelude::*;

impl LocationDataset {
    /// One row per record with the columns
    /// `location, station, date, tmax, tmin, tavg, prcp`. `date` has the polars `Date` type.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let records = self.records();
        let measurement = |m: Measurement| -> Column {
            Column::new(
                m.column_name().into(),
                records.iter().map(|r| r.value(m)).collect::<Vec<_>>(),
            )
        };
        DataFrame::new(vec![
            Column::new(
                "location".into(),
                records.iter().map(|r| r.location_id.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                "station".into(),
                records.iter().map(|r| r.station_id.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                "date".into(),
                records.iter().map(|r| r.date).collect::<Vec<NaiveDate>>(),
            ),
            measurement(Measurement::MaxTemperature),
            measurement(Measurement::MinTemperature),
            measurement(Measurement::AverageTemperature),
            measurement(Measurement::Precipitation),
        ])
    }

    /// Filters the frame of this dataset with an arbitrary polars predicate.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use climate_compare::load;
    /// use polars::prelude::{col, lit};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let ridgefield = load("data/ridgefield.csv", "ridgefield")?;
    /// let freezing = ridgefield.filter_frame(col("tmin").lt_eq(lit(32.0)))?;
    /// println!("{}", freezing.height());
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter_frame(&self, predicate: Expr) -> PolarsResult<DataFrame> {
        self.to_frame()?.lazy().filter(predicate).collect()
    }
}

impl ComparisonTable {
    /// Wide layout: a `date` column followed by one column per measurement and
    /// location, named `<measurement>_<location>` (e.g. `tmin_portland`).
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(1 + Measurement::ALL.len() * self.locations().len());
        columns.push(Column::new(
            "date".into(),
            self.dates().collect::<Vec<NaiveDate>>(),
        ));
        for measurement in Measurement::ALL {
            for (idx, location) in self.locations().iter().enumerate() {
                let values: Vec<Option<f64>> = self
                    .rows()
                    .iter()
                    .map(|row| row.values[idx].and_then(|v| v.get(measurement)))
                    .collect();
                columns.push(Column::new(
                    format!("{}_{}", measurement.column_name(), location).into(),
                    values,
                ));
            }
        }
        DataFrame::new(columns)
    }

    /// Long layout of one measurement within `period` (typically a
    /// [`crate::Year`]): columns `date, variable, value`, where `variable` is
    /// the location id. Dates without a value for a location are left out.
    pub fn long_format(
        &self,
        measurement: Measurement,
        period: impl DatePeriod,
    ) -> Result<DataFrame, ClimateError> {
        let slice = self.for_period(period)?;
        let mut dates = Vec::new();
        let mut variables = Vec::new();
        let mut values = Vec::new();
        for (idx, location) in slice.locations().iter().enumerate() {
            for row in slice.rows() {
                if let Some(value) = row.values[idx].and_then(|v| v.get(measurement)) {
                    dates.push(row.date);
                    variables.push(location.as_str());
                    values.push(value);
                }
            }
        }
        Ok(DataFrame::new(vec![
            Column::new("date".into(), dates),
            Column::new("variable".into(), variables),
            Column::new("value".into(), values),
        ])?)
    }
}

/// Yearly aggregates as a frame with the columns
/// `location, year, min_of_tmin, rolling_avg_min, great_day_count`.
pub fn aggregates_to_frame(aggregates: &[YearlyAggregate]) -> PolarsResult<DataFrame> {
    df!(
        "location" => aggregates.iter().map(|a| a.location_id.as_str()).collect::<Vec<_>>(),
        "year" => aggregates.iter().map(|a| a.year).collect::<Vec<i32>>(),
        "min_of_tmin" => aggregates.iter().map(|a| a.min_of_tmin).collect::<Vec<f64>>(),
        "rolling_avg_min" => aggregates.iter().map(|a| a.rolling_avg_min).collect::<Vec<Option<f64>>>(),
        "great_day_count" => aggregates.iter().map(|a| a.great_day_count).collect::<Vec<u32>>(),
    )
}
