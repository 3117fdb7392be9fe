//! Station metadata gathered while loading a location's CSV file: where each
//! station sits and which part of the date range it covers.

use chrono::NaiveDate;
use haversine::{distance, Location as HaversineLocation, Units};
use serde::{Deserialize, Serialize};

/// A geographical coordinate: latitude first, longitude second, both in decimal degrees.
///
/// # Examples
///
/// ```
/// use climate_compare::LatLon;
///
/// let battle_ground = LatLon(45.78, -122.53);
/// assert_eq!(battle_ground.0, 45.78);
/// assert_eq!(battle_ground.1, -122.53);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: LatLon) -> f64 {
        distance(
            HaversineLocation {
                latitude: self.0,
                longitude: self.1,
            },
            HaversineLocation {
                latitude: other.0,
                longitude: other.1,
            },
            Units::Kilometers,
        )
    }
}

/// The physical site of a station, as reported by the optional
/// latitude/longitude/elevation columns of an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSite {
    pub station_id: String,
    pub name: Option<String>,
    pub location: LatLon,
    /// Elevation in the unit of the source file (meters for NOAA exports).
    pub elevation: Option<f64>,
}

/// The coverage of one station within a dataset: first and last reported day
/// and how many records it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSpan {
    pub station_id: String,
    pub name: Option<String>,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub record_count: usize,
}

impl StationSpan {
    /// Number of calendar days between the first and last record, inclusive.
    pub fn days_spanned(&self) -> i64 {
        (self.last_date - self.first_date).num_days() + 1
    }
}
