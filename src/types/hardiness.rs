//! Defines the `HardinessZone` type, mapping an average annual extreme minimum
//! temperature onto the USDA Plant Hardiness Zone scale.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coldest temperature (°F) covered by zone 1a.
const COLDEST_ZONE_START_F: f64 = -60.0;
/// Width of a half zone in °F.
const HALF_ZONE_WIDTH_F: f64 = 5.0;
/// Zones 1a through 13b.
const HALF_ZONE_COUNT: i64 = 26;

/// The lower (`A`) or upper (`B`) 5 °F half of a hardiness zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HalfZone {
    A,
    B,
}

/// A USDA Plant Hardiness Zone such as `7a` or `8b`.
///
/// Zones are 10 °F bands of average annual extreme minimum temperature,
/// starting with zone 1 at -60 °F and ending with zone 13 at 70 °F, each split
/// into an `a` and `b` half. Temperatures colder than -60 °F are reported as
/// `1a`, warmer than 65 °F as `13b`.
///
/// # Examples
///
/// ```rust
/// use climate_compare::{HalfZone, HardinessZone};
///
/// let zone = HardinessZone::from_fahrenheit(-5.0).unwrap();
/// assert_eq!(zone.zone(), 6);
/// assert_eq!(zone.half(), HalfZone::B);
/// assert_eq!(zone.to_string(), "6b");
///
/// assert_eq!(HardinessZone::from_fahrenheit(f64::NAN), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HardinessZone {
    zone: u8,
    half: HalfZone,
}

impl HardinessZone {
    /// Looks up the zone for an average annual extreme minimum in °F.
    /// Returns `None` for NaN.
    pub fn from_fahrenheit(min_temp_f: f64) -> Option<Self> {
        if min_temp_f.is_nan() {
            return None;
        }
        let index = ((min_temp_f - COLDEST_ZONE_START_F) / HALF_ZONE_WIDTH_F).floor();
        let index = (index.max(0.0) as i64).min(HALF_ZONE_COUNT - 1);
        Some(Self {
            zone: (index / 2 + 1) as u8,
            half: if index % 2 == 0 { HalfZone::A } else { HalfZone::B },
        })
    }

    /// Looks up the zone for an average annual extreme minimum in °C.
    pub fn from_celsius(min_temp_c: f64) -> Option<Self> {
        Self::from_fahrenheit(min_temp_c * 9.0 / 5.0 + 32.0)
    }

    pub fn zone(&self) -> u8 {
        self.zone
    }

    pub fn half(&self) -> HalfZone {
        self.half
    }

    /// The coldest temperature (°F) that still falls in this zone.
    pub fn lower_bound_f(&self) -> f64 {
        let half_offset = match self.half {
            HalfZone::A => 0.0,
            HalfZone::B => HALF_ZONE_WIDTH_F,
        };
        COLDEST_ZONE_START_F + f64::from(self.zone - 1) * 2.0 * HALF_ZONE_WIDTH_F + half_offset
    }
}

impl fmt::Display for HardinessZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let half = match self.half {
            HalfZone::A => 'a',
            HalfZone::B => 'b',
        };
        write!(f, "{}{}", self.zone, half)
    }
}
