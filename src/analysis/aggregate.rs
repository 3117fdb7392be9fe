//! Yearly statistics over a single location: annual extremes, rolling
//! averages of those extremes, great-day counts and the hardiness zone.

use crate::analysis::error::AnalysisError;
use crate::config::{AnalysisSettings, GreatDayRange, RollingWindow};
use crate::types::dataset::LocationDataset;
use crate::types::hardiness::HardinessZone;
use crate::types::record::Measurement;
use chrono::Datelike;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The rolling average for the window ending with `year`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub year: i32,
    pub average: f64,
}

/// One row of [`yearly_aggregates`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyAggregate {
    pub location_id: String,
    pub year: i32,
    /// Lowest daily minimum temperature of the year.
    pub min_of_tmin: f64,
    /// Rolling average of `min_of_tmin`, absent while the window is incomplete.
    pub rolling_avg_min: Option<f64>,
    pub great_day_count: u32,
}

fn annual_extreme(
    dataset: &LocationDataset,
    measurement: Measurement,
    pick: fn(f64, f64) -> f64,
) -> BTreeMap<i32, f64> {
    let mut extremes = BTreeMap::new();
    for record in dataset.records() {
        let Some(value) = record.value(measurement) else {
            continue;
        };
        extremes
            .entry(record.year())
            .and_modify(|current: &mut f64| *current = pick(*current, value))
            .or_insert(value);
    }
    extremes
}

/// Lowest `tmin` of each year, over all stations. Years without any `tmin` are omitted.
pub fn annual_min(dataset: &LocationDataset) -> BTreeMap<i32, f64> {
    annual_extreme(dataset, Measurement::MinTemperature, f64::min)
}

/// Highest `tmax` of each year, over all stations. Years without any `tmax` are omitted.
pub fn annual_max(dataset: &LocationDataset) -> BTreeMap<i32, f64> {
    annual_extreme(dataset, Measurement::MaxTemperature, f64::max)
}

/// Trailing rolling average of a yearly series.
///
/// For every year `Y` in `series` the window covers the calendar years
/// `Y - window_years + 1 ..= Y`. Gaps in the series count against the window,
/// so `Y` only gets a value when at least `min_years` of those years are
/// present. Passing a plain `u32` asks for complete windows.
///
/// # Arguments
///
/// * `series` - Yearly values keyed by calendar year, e.g. the output of [`annual_min`].
/// * `window` - Window length in years, optionally with a lower `min_years` threshold.
///
/// # Returns
///
/// One [`RollingPoint`] per year of `series` whose window is sufficiently filled, in year order.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use climate_compare::{rolling_average, RollingWindow};
///
/// let series: BTreeMap<i32, f64> = (2000..2005).map(|y| (y, f64::from(y - 2000))).collect();
///
/// let full = rolling_average(&series, 3u32).unwrap();
/// assert_eq!(full.len(), 3);
/// assert_eq!(full[0].year, 2002);
/// assert_eq!(full[0].average, 1.0);
///
/// let partial = rolling_average(&series, RollingWindow::new(3).allow_partial(1)).unwrap();
/// assert_eq!(partial.len(), 5);
/// ```
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidWindow`] for a zero-year window or when
/// `min_years` exceeds `window_years`.
pub fn rolling_average(
    series: &BTreeMap<i32, f64>,
    window: impl Into<RollingWindow>,
) -> Result<Vec<RollingPoint>, AnalysisError> {
    let window = window.into();
    window.validate()?;
    let span = i32::try_from(window.window_years - 1).unwrap_or(i32::MAX);

    let points: Vec<RollingPoint> = series
        .keys()
        .filter_map(|&year| {
            let (sum, count) = series
                .range(year.saturating_sub(span)..=year)
                .fold((0.0, 0u32), |(sum, count), (_, value)| (sum + value, count + 1));
            (count >= window.min_years).then(|| RollingPoint {
                year,
                average: sum / f64::from(count),
            })
        })
        .collect();
    debug!(
        "Rolling {}-year average: {} of {} years have a value",
        window.window_years,
        points.len(),
        series.len()
    );
    Ok(points)
}

/// Counts, per year, the days whose `measurement` falls within `low..=high`.
///
/// Stations reporting on the same day are averaged first, so each date is
/// counted at most once. Every year with at least one value of `measurement`
/// is present in the result, possibly with a count of zero.
///
/// # Arguments
///
/// * `dataset` - Records of one location.
/// * `measurement` - Which daily value to test, usually [`Measurement::MaxTemperature`].
/// * `low` - Inclusive lower bound.
/// * `high` - Inclusive upper bound.
///
/// # Returns
///
/// A map from calendar year to the number of days within the range.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidRange`] if `low > high` or a bound is NaN.
pub fn count_days_in_range(
    dataset: &LocationDataset,
    measurement: Measurement,
    low: f64,
    high: f64,
) -> Result<BTreeMap<i32, u32>, AnalysisError> {
    let range = GreatDayRange::new(low, high)?;
    Ok(count_great_days(dataset, measurement, &range))
}

fn count_great_days(
    dataset: &LocationDataset,
    measurement: Measurement,
    range: &GreatDayRange,
) -> BTreeMap<i32, u32> {
    let mut counts = BTreeMap::new();
    for (date, values) in dataset.daily_values() {
        if let Some(value) = values.get(measurement) {
            let count = counts.entry(date.year()).or_insert(0);
            if range.contains(value) {
                *count += 1;
            }
        }
    }
    counts
}

/// Per-year summary of a location: annual minimum, its rolling average and the
/// number of great days, for every year that has a `tmin` value.
///
/// # Arguments
///
/// * `dataset` - Records of one location.
/// * `settings` - Great-day range, its measurement and the rolling window.
///
/// # Returns
///
/// One [`YearlyAggregate`] per year, ascending. `rolling_avg_min` is `None`
/// while the window does not yet hold enough years.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidRange`] or [`AnalysisError::InvalidWindow`]
/// when the settings are invalid.
pub fn yearly_aggregates(
    dataset: &LocationDataset,
    settings: &AnalysisSettings,
) -> Result<Vec<YearlyAggregate>, AnalysisError> {
    settings.great_day.validate()?;
    let mins = annual_min(dataset);
    let rolling: BTreeMap<i32, f64> = rolling_average(&mins, settings.rolling)?
        .into_iter()
        .map(|point| (point.year, point.average))
        .collect();
    let great_days = count_great_days(
        dataset,
        settings.great_day_measurement,
        &settings.great_day,
    );

    Ok(mins
        .into_iter()
        .map(|(year, min_of_tmin)| YearlyAggregate {
            location_id: dataset.location_id().to_string(),
            year,
            min_of_tmin,
            rolling_avg_min: rolling.get(&year).copied(),
            great_day_count: great_days.get(&year).copied().unwrap_or(0),
        })
        .collect())
}

/// Estimates the USDA hardiness zone from the average of the annual minimum
/// temperatures (°F) over the most recent `window` calendar years.
///
/// # Arguments
///
/// * `dataset` - Records of one location, temperatures in °F.
/// * `window` - How many of the latest calendar years to average.
///
/// # Returns
///
/// The [`HardinessZone`] whose 5°F half-zone band contains the averaged minimum.
///
/// # Errors
///
/// * [`AnalysisError::InvalidWindow`] for an invalid window.
/// * [`AnalysisError::InsufficientData`] when fewer than `min_years` of the
///   window's years have a `tmin` value.
pub fn hardiness_zone(
    dataset: &LocationDataset,
    window: impl Into<RollingWindow>,
) -> Result<HardinessZone, AnalysisError> {
    let window = window.into();
    window.validate()?;
    let mins = annual_min(dataset);
    let insufficient = |found: usize| AnalysisError::InsufficientData {
        location: dataset.location_id().to_string(),
        required: window.min_years,
        found,
    };

    let Some(&last_year) = mins.keys().next_back() else {
        return Err(insufficient(0));
    };
    let span = i32::try_from(window.window_years - 1).unwrap_or(i32::MAX);
    let recent: Vec<f64> = mins
        .range(last_year.saturating_sub(span)..=last_year)
        .map(|(_, min)| *min)
        .collect();
    if recent.len() < window.min_years as usize {
        return Err(insufficient(recent.len()));
    }

    let average = recent.iter().sum::<f64>() / recent.len() as f64;
    debug!(
        "Average annual minimum for '{}' over {} years: {:.1}",
        dataset.location_id(),
        recent.len(),
        average
    );
    HardinessZone::from_fahrenheit(average).ok_or_else(|| insufficient(recent.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::hardiness::HalfZone;
    use crate::types::record::WeatherRecord;
    use chrono::NaiveDate;

    fn record(date: NaiveDate, station: &str, tmax: Option<f64>, tmin: Option<f64>) -> WeatherRecord {
        WeatherRecord {
            location_id: "ridgefield".to_string(),
            date,
            station_id: station.to_string(),
            tmax,
            tmin,
            tavg: None,
            precipitation: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Two days per year: a cold January day and a mild July day.
    fn yearly_dataset(years: std::ops::Range<i32>, january_tmin: impl Fn(i32) -> f64) -> LocationDataset {
        let records = years
            .flat_map(|y| {
                [
                    record(day(y, 1, 15), "S", Some(35.0), Some(january_tmin(y))),
                    record(day(y, 7, 15), "S", Some(72.0), Some(55.0)),
                ]
            })
            .collect();
        LocationDataset::new("ridgefield", records)
    }

    #[test]
    fn test_rolling_average_constant_series() -> Result<(), AnalysisError> {
        let series: BTreeMap<i32, f64> = (1985..2020).map(|y| (y, 12.5)).collect();
        assert_eq!(series.len(), 35);

        let points = rolling_average(&series, 30u32)?;
        assert_eq!(points.len(), 6);
        assert_eq!(points[0].year, 2014);
        assert_eq!(points[5].year, 2019);
        assert!(points.iter().all(|p| (p.average - 12.5).abs() < 1e-9));
        Ok(())
    }

    #[test]
    fn test_rolling_average_counts_gaps_against_window() -> Result<(), AnalysisError> {
        let series = BTreeMap::from([(2000, 1.0), (2001, 2.0), (2003, 4.0), (2004, 5.0)]);
        let full = rolling_average(&series, 3u32)?;
        assert!(full.is_empty());

        let partial = rolling_average(&series, RollingWindow::new(3).allow_partial(2))?;
        assert_eq!(
            partial,
            vec![
                RollingPoint { year: 2001, average: 1.5 },
                RollingPoint { year: 2003, average: 3.0 },
                RollingPoint { year: 2004, average: 4.5 },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_rolling_average_rejects_zero_window() {
        let series = BTreeMap::from([(2000, 1.0)]);
        assert_eq!(
            rolling_average(&series, 0u32),
            Err(AnalysisError::InvalidWindow {
                window_years: 0,
                min_years: 0
            })
        );
    }

    #[test]
    fn test_count_days_in_range_inclusive() -> Result<(), AnalysisError> {
        let dataset = LocationDataset::new(
            "x",
            [58.0, 60.0, 75.0, 76.0, 61.0]
                .into_iter()
                .enumerate()
                .map(|(i, tmax)| record(day(2021, 5, 1 + i as u32), "S", Some(tmax), None))
                .collect(),
        );
        let counts = count_days_in_range(&dataset, "tmax".parse().unwrap(), 60.0, 75.0)?;
        assert_eq!(counts, BTreeMap::from([(2021, 3)]));
        Ok(())
    }

    #[test]
    fn test_count_days_in_range_keeps_zero_years_and_validates() {
        let dataset = LocationDataset::new(
            "x",
            vec![
                record(day(2020, 1, 1), "S", Some(40.0), None),
                record(day(2021, 6, 1), "S", Some(70.0), None),
                record(day(2021, 6, 1), "T", Some(80.0), None),
                record(day(2022, 6, 1), "S", None, Some(50.0)),
            ],
        );
        let counts =
            count_days_in_range(&dataset, Measurement::MaxTemperature, 60.0, 75.0).unwrap();
        // 2021-06-01 averages to 75.0; 2022 has no tmax at all
        assert_eq!(counts, BTreeMap::from([(2020, 0), (2021, 1)]));

        assert_eq!(
            count_days_in_range(&dataset, Measurement::MaxTemperature, 80.0, 60.0),
            Err(AnalysisError::InvalidRange {
                low: 80.0,
                high: 60.0
            })
        );
    }

    #[test]
    fn test_annual_extremes_skip_missing_values() {
        let dataset = LocationDataset::new(
            "x",
            vec![
                record(day(2020, 1, 1), "S", Some(40.0), Some(20.0)),
                record(day(2020, 1, 1), "T", Some(44.0), Some(18.0)),
                record(day(2020, 8, 1), "S", Some(95.0), None),
                record(day(2021, 8, 1), "S", Some(90.0), None),
            ],
        );
        assert_eq!(annual_min(&dataset), BTreeMap::from([(2020, 18.0)]));
        assert_eq!(
            annual_max(&dataset),
            BTreeMap::from([(2020, 95.0), (2021, 90.0)])
        );
    }

    #[test]
    fn test_yearly_aggregates() -> Result<(), AnalysisError> {
        let dataset = yearly_dataset(2000..2010, |y| f64::from(y - 2000));
        let settings = AnalysisSettings::builder()
            .rolling(RollingWindow::new(5))
            .build();
        let rows = yearly_aggregates(&dataset, &settings)?;

        assert_eq!(rows.len(), 10);
        assert_eq!(rows[0].min_of_tmin, 0.0);
        assert_eq!(rows[0].rolling_avg_min, None);
        assert_eq!(rows[3].rolling_avg_min, None);
        assert_eq!(rows[4].rolling_avg_min, Some(2.0));
        assert_eq!(rows[9].rolling_avg_min, Some(7.0));
        // only the July day (tmax 72) is in the default 60..=75 range
        assert!(rows.iter().all(|r| r.great_day_count == 1));
        assert!(rows.iter().all(|r| r.location_id == "ridgefield"));
        Ok(())
    }

    #[test]
    fn test_hardiness_zone_from_recent_minima() -> Result<(), AnalysisError> {
        // older, colder years fall outside the 10-year window
        let dataset = yearly_dataset(1990..2020, |y| if y < 2010 { -30.0 } else { -5.0 });
        let zone = hardiness_zone(&dataset, 10u32)?;
        assert_eq!(zone.zone(), 6);
        assert_eq!(zone.half(), HalfZone::B);

        let cold = yearly_dataset(2000..2010, |_| -12.0);
        assert_eq!(hardiness_zone(&cold, 10u32)?.to_string(), "5b");
        Ok(())
    }

    #[test]
    fn test_hardiness_zone_needs_enough_years() {
        let dataset = yearly_dataset(2015..2020, |_| 0.0);
        assert_eq!(
            hardiness_zone(&dataset, 30u32),
            Err(AnalysisError::InsufficientData {
                location: "ridgefield".to_string(),
                required: 30,
                found: 5
            })
        );
        let zone = hardiness_zone(&dataset, RollingWindow::new(30).allow_partial(5));
        assert_eq!(zone.map(|z| z.to_string()), Ok("7a".to_string()));
    }
}
