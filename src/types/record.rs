//! Row-level types: a single daily observation and the measurements it carries.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One daily observation from one station, tagged with the location it was loaded for.
///
/// Measurements are optional because station exports routinely leave cells empty.
/// Temperatures are in whatever unit the source file uses (NOAA exports in
/// standard units use °F, which is what [`crate::HardinessZone`] expects).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location_id: String,
    pub date: NaiveDate,
    pub station_id: String,
    pub tmax: Option<f64>,
    pub tmin: Option<f64>,
    /// Daily average temperature, when the export carries one.
    pub tavg: Option<f64>,
    pub precipitation: Option<f64>,
}

impl WeatherRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Returns the value of `measurement`, if it was recorded.
    pub fn value(&self, measurement: Measurement) -> Option<f64> {
        match measurement {
            Measurement::MaxTemperature => self.tmax,
            Measurement::MinTemperature => self.tmin,
            Measurement::AverageTemperature => self.tavg,
            Measurement::Precipitation => self.precipitation,
        }
    }
}

/// The measurement columns a dataset can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measurement {
    /// Daily maximum temperature (`tmax`).
    MaxTemperature,
    /// Daily minimum temperature (`tmin`).
    MinTemperature,
    /// Daily average temperature (`tavg`).
    AverageTemperature,
    /// Daily precipitation total (`prcp`).
    Precipitation,
}

impl Measurement {
    pub const ALL: [Measurement; 4] = [
        Measurement::MaxTemperature,
        Measurement::MinTemperature,
        Measurement::AverageTemperature,
        Measurement::Precipitation,
    ];

    /// Short column name used in frames produced by this crate.
    pub fn column_name(&self) -> &'static str {
        match self {
            Measurement::MaxTemperature => "tmax",
            Measurement::MinTemperature => "tmin",
            Measurement::AverageTemperature => "tavg",
            Measurement::Precipitation => "prcp",
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown measurement '{0}', expected one of tmax, tmin, tavg, prcp")]
pub struct UnknownMeasurement(pub String);

impl FromStr for Measurement {
    type Err = UnknownMeasurement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tmax" | "max_temperature" => Ok(Measurement::MaxTemperature),
            "tmin" | "min_temperature" => Ok(Measurement::MinTemperature),
            "tavg" | "average_temperature" => Ok(Measurement::AverageTemperature),
            "prcp" | "precipitation" => Ok(Measurement::Precipitation),
            _ => Err(UnknownMeasurement(s.to_string())),
        }
    }
}

/// The values of one location on one day, after combining every station that reported.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyValues {
    pub tmax: Option<f64>,
    pub tmin: Option<f64>,
    pub tavg: Option<f64>,
    pub precipitation: Option<f64>,
}

impl DailyValues {
    pub fn get(&self, measurement: Measurement) -> Option<f64> {
        match measurement {
            Measurement::MaxTemperature => self.tmax,
            Measurement::MinTemperature => self.tmin,
            Measurement::AverageTemperature => self.tavg,
            Measurement::Precipitation => self.precipitation,
        }
    }

    /// Averages each measurement over the records that carry it.
    pub(crate) fn mean_of<'a>(records: impl IntoIterator<Item = &'a WeatherRecord>) -> Self {
        let mut sums = [(0.0, 0u32); 4];
        for record in records {
            for (slot, measurement) in sums.iter_mut().zip(Measurement::ALL) {
                if let Some(value) = record.value(measurement) {
                    slot.0 += value;
                    slot.1 += 1;
                }
            }
        }
        let mean = |(sum, count): (f64, u32)| (count > 0).then(|| sum / count as f64);
        DailyValues {
            tmax: mean(sums[0]),
            tmin: mean(sums[1]),
            tavg: mean(sums[2]),
            precipitation: mean(sums[3]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(station: &str, tmax: Option<f64>, tmin: Option<f64>) -> WeatherRecord {
        WeatherRecord {
            location_id: "vancouver".to_string(),
            date: NaiveDate::from_ymd_opt(2020, 7, 1).unwrap(),
            station_id: station.to_string(),
            tmax,
            tmin,
            tavg: None,
            precipitation: None,
        }
    }

    #[test]
    fn test_measurement_parses_common_names() {
        assert_eq!("tmax".parse::<Measurement>(), Ok(Measurement::MaxTemperature));
        assert_eq!(" TMIN ".parse::<Measurement>(), Ok(Measurement::MinTemperature));
        assert_eq!("precipitation".parse::<Measurement>(), Ok(Measurement::Precipitation));
        assert_eq!("PRCP".parse::<Measurement>(), Ok(Measurement::Precipitation));
        assert_eq!("TAVG".parse::<Measurement>(), Ok(Measurement::AverageTemperature));
        assert!("snow".parse::<Measurement>().is_err());
    }

    #[test]
    fn test_mean_of_ignores_missing_values() {
        let records = [
            record("A", Some(80.0), None),
            record("B", Some(70.0), Some(50.0)),
            record("C", None, None),
        ];
        let values = DailyValues::mean_of(&records);
        assert_eq!(values.tmax, Some(75.0));
        assert_eq!(values.tmin, Some(50.0));
        assert_eq!(values.precipitation, None);
    }
}
