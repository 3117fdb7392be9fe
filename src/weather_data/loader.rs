use crate::config::ColumnMapping;
use crate::types::dataset::LocationDataset;
use crate::types::record::{Measurement, WeatherRecord};
use crate::types::station::{LatLon, StationSite};
use crate::weather_data::error::LoadError;
use crate::weather_data::extractor::{
    find_text_column, header_names, parse_date, parse_number, text_cell,
};
use chrono::NaiveDate;
use log::{debug, info, warn};
use polars::prelude::*;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Counts of what happened to the rows of a file during [`WeatherDataLoader::load_with_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Data rows in the file (header excluded).
    pub rows_read: usize,
    /// Rows that became records.
    pub rows_kept: usize,
    /// Rows dropped because the date was empty or unparseable.
    pub bad_dates: usize,
    /// Rows dropped because a measurement cell was not a number.
    pub bad_values: usize,
    /// Rows dropped because an earlier row had the same station and date.
    pub duplicate_keys: usize,
}

impl LoadReport {
    pub fn dropped(&self) -> usize {
        self.bad_dates + self.bad_values + self.duplicate_keys
    }
}

/// The text columns of an export, resolved against a [`ColumnMapping`].
struct ExportColumns<'a> {
    date: &'a StringChunked,
    station: Option<&'a StringChunked>,
    name: Option<&'a StringChunked>,
    tmax: Option<&'a StringChunked>,
    tmin: Option<&'a StringChunked>,
    tavg: Option<&'a StringChunked>,
    precipitation: Option<&'a StringChunked>,
    latitude: Option<&'a StringChunked>,
    longitude: Option<&'a StringChunked>,
    elevation: Option<&'a StringChunked>,
}

impl ExportColumns<'_> {
    fn measurement(&self, measurement: Measurement) -> Option<&StringChunked> {
        match measurement {
            Measurement::MaxTemperature => self.tmax,
            Measurement::MinTemperature => self.tmin,
            Measurement::AverageTemperature => self.tavg,
            Measurement::Precipitation => self.precipitation,
        }
    }
}

/// Reads station CSV exports into [`LocationDataset`]s.
///
/// Rows with a bad date or a non-numeric measurement are skipped with a
/// warning instead of failing the whole file.
#[derive(Debug, Clone, Default)]
pub struct WeatherDataLoader {
    columns: ColumnMapping,
}

impl WeatherDataLoader {
    pub fn new(columns: ColumnMapping) -> WeatherDataLoader {
        WeatherDataLoader { columns }
    }

    pub fn columns(&self) -> &ColumnMapping {
        &self.columns
    }

    /// Loads `path` and tags every record with `location_id`.
    pub fn load(&self, path: &Path, location_id: &str) -> Result<LocationDataset, LoadError> {
        self.load_with_report(path, location_id)
            .map(|(dataset, _)| dataset)
    }

    /// Like [`Self::load`], also returning what happened to each row.
    pub fn load_with_report(
        &self,
        path: &Path,
        location_id: &str,
    ) -> Result<(LocationDataset, LoadReport), LoadError> {
        let df = match read_text_table(path) {
            Ok(df) => df,
            Err(LoadError::CsvRead {
                source: PolarsError::NoData(_),
                ..
            }) => return Err(LoadError::EmptyDataset(path.to_path_buf())),
            Err(e) => return Err(e),
        };
        let headers = header_names(&df);
        let columns = self.resolve_columns(&df, &headers, path)?;

        let mut report = LoadReport {
            rows_read: df.height(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(df.height());
        let mut seen: HashSet<(String, NaiveDate)> = HashSet::with_capacity(df.height());
        let mut station_names: BTreeMap<String, String> = BTreeMap::new();
        let mut sites: BTreeMap<String, StationSite> = BTreeMap::new();

        'rows: for idx in 0..df.height() {
            // Header is line 1
            let line = idx + 2;
            let raw_date = columns.date.get(idx).unwrap_or("");
            let Some(date) = parse_date(raw_date) else {
                warn!(
                    "Skipping line {} of {:?}: unparseable date '{}'",
                    line, path, raw_date
                );
                report.bad_dates += 1;
                continue;
            };

            let mut values = [None; 4];
            for (slot, measurement) in values.iter_mut().zip(Measurement::ALL) {
                let Some(column) = columns.measurement(measurement) else {
                    continue;
                };
                match parse_number(column.get(idx)) {
                    Ok(value) => *slot = value,
                    Err(raw) => {
                        warn!(
                            "Skipping line {} of {:?}: non-numeric {} value '{}'",
                            line, path, measurement, raw
                        );
                        report.bad_values += 1;
                        continue 'rows;
                    }
                }
            }

            let station_id = text_cell(columns.station, idx).unwrap_or_default().to_string();
            if !seen.insert((station_id.clone(), date)) {
                warn!(
                    "Skipping line {} of {:?}: duplicate record for station '{}' on {}",
                    line, path, station_id, date
                );
                report.duplicate_keys += 1;
                continue;
            }

            let name = text_cell(columns.name, idx);
            if let Some(name) = name {
                station_names
                    .entry(station_id.clone())
                    .or_insert_with(|| name.to_string());
            }
            if !sites.contains_key(&station_id) {
                if let Some(site) = read_site(&columns, idx, &station_id, name) {
                    sites.insert(station_id.clone(), site);
                }
            }

            let [tmax, tmin, tavg, precipitation] = values;
            records.push(WeatherRecord {
                location_id: location_id.to_string(),
                date,
                station_id,
                tmax,
                tmin,
                tavg,
                precipitation,
            });
        }

        report.rows_kept = records.len();
        if records.is_empty() {
            warn!("No usable rows in {:?} ({} rows read)", path, report.rows_read);
            return Err(LoadError::EmptyDataset(path.to_path_buf()));
        }
        info!(
            "Loaded {} records for '{}' from {:?} ({} rows dropped)",
            report.rows_kept,
            location_id,
            path,
            report.dropped()
        );

        let dataset = LocationDataset::new(location_id, records)
            .with_stations(station_names, sites.into_values().collect());
        Ok((dataset, report))
    }

    fn resolve_columns<'a>(
        &self,
        df: &'a DataFrame,
        headers: &[String],
        path: &Path,
    ) -> Result<ExportColumns<'a>, LoadError> {
        let find = |wanted: &str| {
            find_text_column(df, headers, wanted).map_err(|e| LoadError::CsvRead {
                path: path.to_path_buf(),
                source: e,
            })
        };

        let date = find(&self.columns.date)?.ok_or_else(|| LoadError::MissingColumn {
            path: path.to_path_buf(),
            column: self.columns.date.clone(),
        })?;

        let columns = ExportColumns {
            date,
            station: find(&self.columns.station)?,
            name: find(&self.columns.name)?,
            tmax: find(&self.columns.tmax)?,
            tmin: find(&self.columns.tmin)?,
            tavg: find(&self.columns.tavg)?,
            precipitation: find(&self.columns.precipitation)?,
            latitude: find(&self.columns.latitude)?,
            longitude: find(&self.columns.longitude)?,
            elevation: find(&self.columns.elevation)?,
        };

        if Measurement::ALL
            .iter()
            .all(|m| columns.measurement(*m).is_none())
        {
            return Err(LoadError::NoMeasurementColumns {
                path: path.to_path_buf(),
                expected: Measurement::ALL
                    .iter()
                    .map(|m| self.columns.measurement_column(*m).to_string())
                    .collect(),
            });
        }
        if columns.station.is_none() {
            debug!(
                "No '{}' column in {:?}; records get an empty station id",
                self.columns.station, path
            );
        }
        Ok(columns)
    }
}

/// Reads a station site from the coordinate columns, if both coordinates parse.
fn read_site(
    columns: &ExportColumns<'_>,
    idx: usize,
    station_id: &str,
    name: Option<&str>,
) -> Option<StationSite> {
    let latitude = parse_number(text_cell(columns.latitude, idx)).ok()??;
    let longitude = parse_number(text_cell(columns.longitude, idx)).ok()??;
    Some(StationSite {
        station_id: station_id.to_string(),
        name: name.map(str::to_string),
        location: LatLon(latitude, longitude),
        elevation: parse_number(text_cell(columns.elevation, idx))
            .ok()
            .flatten(),
    })
}

/// Reads a CSV file with every column as text, so that malformed cells can be
/// handled row by row instead of failing schema inference.
///
/// Fields beyond the header's width are ignored and invalid UTF-8 bytes are
/// replaced with U+FFFD, so one damaged line never rejects the whole file.
pub(crate) fn read_text_table(path: &Path) -> Result<DataFrame, LoadError> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(
            CsvParseOptions::default()
                .with_encoding(CsvEncoding::LossyUtf8)
                .with_truncate_ragged_lines(true),
        )
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| LoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })?
        .finish()
        .map_err(|e| LoadError::CsvRead {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Loads a station export using the default NOAA column names.
///
/// # Errors
///
/// * [`LoadError::MissingColumn`] if the date column is absent.
/// * [`LoadError::NoMeasurementColumns`] if none of TMAX/TMIN/TAVG/PRCP is present.
/// * [`LoadError::EmptyDataset`] if no data rows remain after parsing.
/// * [`LoadError::CsvRead`] if the file cannot be read as CSV.
///
/// # Example
///
/// ```no_run
/// use climate_compare::load;
///
/// let ridgefield = load("data/ridgefield.csv", "ridgefield").unwrap();
/// println!("{} records", ridgefield.len());
/// ```
pub fn load(path: impl AsRef<Path>, location_id: &str) -> Result<LocationDataset, LoadError> {
    WeatherDataLoader::default().load(path.as_ref(), location_id)
}

/// Loads a station export with custom column names.
pub fn load_with(
    path: impl AsRef<Path>,
    location_id: &str,
    columns: &ColumnMapping,
) -> Result<LocationDataset, LoadError> {
    WeatherDataLoader::new(columns.clone()).load(path.as_ref(), location_id)
}
