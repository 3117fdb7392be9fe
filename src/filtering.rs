use chrono::NaiveDate;
use polars::prelude::{col, lit, DataType, LazyFrame};

/// Lazy filters for frames produced by [`crate::LocationDataset::to_frame`].
pub trait ClimateFrameFilterExt {
    /// Keeps rows whose `date` lies within `start_date..=end_date`.
    ///
    /// # Arguments
    ///
    /// * `start_date` - First day to keep.
    /// * `end_date` - Last day to keep. A start after the end yields an empty frame.
    ///
    /// # Returns
    ///
    /// A new `LazyFrame` with the date filter applied lazily.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use chrono::NaiveDate;
    /// use climate_compare::{load, ClimateFrameFilterExt};
    /// use polars::prelude::IntoLazy;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let frame = load("data/ridgefield.csv", "ridgefield")?.to_frame()?;
    /// let spring = frame
    ///     .lazy()
    ///     .filter_daily(
    ///         NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
    ///         NaiveDate::from_ymd_opt(2023, 5, 31).unwrap(),
    ///     )
    ///     .collect()?;
    /// println!("{spring}");
    /// # Ok(())
    /// # }
    /// ```
    fn filter_daily(self, start_date: NaiveDate, end_date: NaiveDate) -> LazyFrame;

    /// Keeps rows whose `date` falls in the years `start_year..=end_year`.
    ///
    /// # Arguments
    ///
    /// * `start_year` - First calendar year to keep (e.g., `1991`).
    /// * `end_year` - Last calendar year to keep (e.g., `2020`).
    ///
    /// # Returns
    ///
    /// A new `LazyFrame` with the year filter applied lazily.
    fn filter_years(self, start_year: i32, end_year: i32) -> LazyFrame;

    /// Keeps rows of one location.
    ///
    /// # Arguments
    ///
    /// * `location_id` - Value of the `location` column to keep.
    ///
    /// # Returns
    ///
    /// A new `LazyFrame` holding only that location's rows.
    fn filter_location(self, location_id: &str) -> LazyFrame;
}

impl ClimateFrameFilterExt for LazyFrame {
    fn filter_daily(self, start_date: NaiveDate, end_date: NaiveDate) -> LazyFrame {
        self.filter(
            col("date")
                .cast(DataType::Date)
                .gt_eq(lit(start_date))
                .and(col("date").cast(DataType::Date).lt_eq(lit(end_date))),
        )
    }

    fn filter_years(self, start_year: i32, end_year: i32) -> LazyFrame {
        self.filter(
            col("date")
                .dt()
                .year()
                .gt_eq(lit(start_year))
                .and(col("date").dt().year().lt_eq(lit(end_year))),
        )
    }

    fn filter_location(self, location_id: &str) -> LazyFrame {
        self.filter(col("location").eq(lit(location_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::dataset::LocationDataset;
    use crate::types::record::WeatherRecord;
    use polars::prelude::{IntoLazy, PolarsError};

    fn dataset() -> LocationDataset {
        let records = [(2019, 12, 31), (2020, 1, 1), (2020, 7, 4), (2021, 1, 1)]
            .into_iter()
            .map(|(y, m, d)| WeatherRecord {
                location_id: "ridgefield".to_string(),
                date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                station_id: "S".to_string(),
                tmax: Some(50.0),
                tmin: Some(30.0),
                tavg: None,
                precipitation: None,
            })
            .collect();
        LocationDataset::new("ridgefield", records)
    }

    #[test]
    fn test_filter_daily() -> Result<(), PolarsError> {
        let frame = dataset()
            .to_frame()?
            .lazy()
            .filter_daily(
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
            )
            .collect()?;
        assert_eq!(frame.height(), 2);
        Ok(())
    }

    #[test]
    fn test_filter_years_and_location() -> Result<(), PolarsError> {
        let lazy = dataset().to_frame()?.lazy();
        assert_eq!(lazy.clone().filter_years(2020, 2021).collect()?.height(), 3);
        assert_eq!(lazy.clone().filter_location("ridgefield").collect()?.height(), 4);
        assert_eq!(lazy.filter_location("portland").collect()?.height(), 0);
        Ok(())
    }
}
