//! Caller-supplied configuration: how CSV headers map onto the record fields,
//! and the thresholds used by the yearly analysis.

use crate::analysis::error::AnalysisError;
use crate::types::record::Measurement;
use crate::weather_data::error::LoadError;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Names of the CSV columns to read. Header matching is case-insensitive.
///
/// The defaults match the daily summaries exported by NOAA's Climate Data
/// Online (GHCN-Daily): `DATE`, `STATION`, `NAME`, `TMAX`, `TMIN`, `TAVG`, `PRCP`,
/// `LATITUDE`, `LONGITUDE`, `ELEVATION`. Only the date column and one
/// measurement column must be present.
///
/// # Examples
///
/// ```
/// use climate_compare::ColumnMapping;
///
/// let mapping = ColumnMapping::from_json_str(r#"{ "date": "day", "tmax": "high" }"#).unwrap();
/// assert_eq!(mapping.date, "day");
/// assert_eq!(mapping.tmax, "high");
/// assert_eq!(mapping.tmin, "TMIN"); // unspecified fields keep their default
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub date: String,
    pub station: String,
    pub name: String,
    pub tmax: String,
    pub tmin: String,
    pub tavg: String,
    pub precipitation: String,
    pub latitude: String,
    pub longitude: String,
    pub elevation: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date: "DATE".to_string(),
            station: "STATION".to_string(),
            name: "NAME".to_string(),
            tmax: "TMAX".to_string(),
            tmin: "TMIN".to_string(),
            tavg: "TAVG".to_string(),
            precipitation: "PRCP".to_string(),
            latitude: "LATITUDE".to_string(),
            longitude: "LONGITUDE".to_string(),
            elevation: "ELEVATION".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| LoadError::ConfigRead(path.to_path_buf(), e))?;
        Self::from_json_str(&json)
    }

    /// The configured CSV column for a measurement.
    pub fn measurement_column(&self, measurement: Measurement) -> &str {
        match measurement {
            Measurement::MaxTemperature => &self.tmax,
            Measurement::MinTemperature => &self.tmin,
            Measurement::AverageTemperature => &self.tavg,
            Measurement::Precipitation => &self.precipitation,
        }
    }
}

/// Inclusive bounds of a comfortable day ("great day").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreatDayRange {
    pub low: f64,
    pub high: f64,
}

impl GreatDayRange {
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidRange`] if `low > high` or either bound is NaN.
    pub fn new(low: f64, high: f64) -> Result<Self, AnalysisError> {
        let range = Self { low, high };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.low <= self.high {
            Ok(())
        } else {
            Err(AnalysisError::InvalidRange {
                low: self.low,
                high: self.high,
            })
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

impl Default for GreatDayRange {
    fn default() -> Self {
        Self {
            low: 60.0,
            high: 75.0,
        }
    }
}

/// A trailing window of calendar years for rolling averages.
///
/// A year receives an average only when at least `min_years` of the
/// `window_years` years ending with it have data. By default `min_years`
/// equals `window_years`, so incomplete windows at the start of a series
/// produce nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingWindow {
    pub window_years: u32,
    pub min_years: u32,
}

impl RollingWindow {
    pub fn new(window_years: u32) -> Self {
        Self {
            window_years,
            min_years: window_years,
        }
    }

    /// Accepts windows holding at least `min_years` observed years.
    pub fn allow_partial(self, min_years: u32) -> Self {
        Self { min_years, ..self }
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.window_years == 0 || self.min_years == 0 || self.min_years > self.window_years {
            return Err(AnalysisError::InvalidWindow {
                window_years: self.window_years,
                min_years: self.min_years,
            });
        }
        Ok(())
    }
}

impl Default for RollingWindow {
    fn default() -> Self {
        Self::new(30)
    }
}

impl From<u32> for RollingWindow {
    fn from(window_years: u32) -> Self {
        Self::new(window_years)
    }
}

/// Settings for the yearly summaries.
///
/// # Examples
///
/// ```
/// use climate_compare::{AnalysisSettings, GreatDayRange, RollingWindow};
///
/// let settings = AnalysisSettings::builder()
///     .great_day(GreatDayRange::new(65.0, 80.0).unwrap())
///     .rolling(RollingWindow::new(10).allow_partial(5))
///     .build();
/// assert_eq!(settings.rolling.min_years, 5);
///
/// let defaults = AnalysisSettings::default();
/// assert_eq!(defaults.rolling.window_years, 30);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Builder)]
pub struct AnalysisSettings {
    #[builder(default)]
    #[serde(default)]
    pub great_day: GreatDayRange,
    #[builder(default)]
    #[serde(default)]
    pub rolling: RollingWindow,
    /// Measurement that decides whether a day is a great day.
    #[builder(default = Measurement::MaxTemperature)]
    #[serde(default = "default_great_day_measurement")]
    pub great_day_measurement: Measurement,
}

fn default_great_day_measurement() -> Measurement {
    Measurement::MaxTemperature
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            great_day: GreatDayRange::default(),
            rolling: RollingWindow::default(),
            great_day_measurement: default_great_day_measurement(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_json_falls_back_to_defaults() -> Result<(), LoadError> {
        let mapping = ColumnMapping::from_json_str(r#"{"precipitation": "rain_in"}"#)?;
        assert_eq!(mapping.precipitation, "rain_in");
        assert_eq!(mapping.date, "DATE");
        assert_eq!(mapping.measurement_column(Measurement::Precipitation), "rain_in");
        Ok(())
    }

    #[test]
    fn test_mapping_json_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("columns.json");
        std::fs::write(&path, r#"{"date": "obs_date", "station": "site"}"#)?;
        let mapping = ColumnMapping::from_json_file(&path)?;
        assert_eq!(mapping.date, "obs_date");
        assert_eq!(mapping.station, "site");

        let missing = ColumnMapping::from_json_file(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(LoadError::ConfigRead(..))));
        Ok(())
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let result = ColumnMapping::from_json_str("{ not json");
        assert!(matches!(result, Err(LoadError::ConfigParse(_))));
    }

    #[test]
    fn test_great_day_range_validation() {
        assert!(GreatDayRange::new(60.0, 75.0).is_ok());
        assert!(GreatDayRange::new(70.0, 70.0).is_ok());
        assert_eq!(
            GreatDayRange::new(80.0, 60.0),
            Err(AnalysisError::InvalidRange {
                low: 80.0,
                high: 60.0
            })
        );
        assert!(GreatDayRange::new(f64::NAN, 60.0).is_err());
    }

    #[test]
    fn test_rolling_window_validation() {
        assert!(RollingWindow::new(30).validate().is_ok());
        assert!(RollingWindow::new(30).allow_partial(10).validate().is_ok());
        assert!(RollingWindow::new(0).validate().is_err());
        assert!(RollingWindow::new(5).allow_partial(6).validate().is_err());
        assert!(RollingWindow::new(5).allow_partial(0).validate().is_err());
    }

    #[test]
    fn test_settings_deserialize_with_defaults() -> Result<(), serde_json::Error> {
        let settings: AnalysisSettings =
            serde_json::from_str(r#"{"great_day": {"low": 55.0, "high": 70.0}}"#)?;
        assert_eq!(settings.great_day.low, 55.0);
        assert_eq!(settings.rolling, RollingWindow::new(30));
        assert_eq!(settings.great_day_measurement, Measurement::MaxTemperature);
        Ok(())
    }
}
