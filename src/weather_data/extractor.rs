//! Cell-level parsing of the text columns read from a station export.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// Day formats tried in order before falling back to timestamps.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses a date cell. Timestamps keep only their date part.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
        .ok()
        .map(|dt| dt.date())
}

/// Parses a numeric cell. Empty cells and `NaN` are missing values;
/// anything else that is not a finite number is returned as `Err` with the raw text.
pub(crate) fn parse_number(raw: Option<&str>) -> Result<Option<f64>, String> {
    let Some(trimmed) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_nan() => Ok(None),
        Ok(value) if value.is_infinite() => Err(trimmed.to_string()),
        Ok(value) => Ok(Some(value)),
        Err(_) => Err(trimmed.to_string()),
    }
}

/// Non-empty trimmed text of a cell.
pub(crate) fn text_cell<'a>(column: Option<&'a StringChunked>, idx: usize) -> Option<&'a str> {
    column
        .and_then(|c| c.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Header names of a frame, in order.
pub(crate) fn header_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect()
}

/// Finds the text column whose header matches `wanted`, ignoring case and
/// surrounding whitespace.
pub(crate) fn find_text_column<'a>(
    df: &'a DataFrame,
    headers: &[String],
    wanted: &str,
) -> PolarsResult<Option<&'a StringChunked>> {
    let wanted = wanted.trim();
    match headers
        .iter()
        .find(|header| header.trim().eq_ignore_ascii_case(wanted))
    {
        Some(header) => Ok(Some(df.column(header)?.str()?)),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2023, 1, 9);
        assert_eq!(parse_date("2023-01-09"), expected);
        assert_eq!(parse_date(" 2023/01/09 "), expected);
        assert_eq!(parse_date("01/09/2023"), expected);
        assert_eq!(parse_date("2023-01-09T06:00:00"), expected);
        assert_eq!(parse_date("2023-01-09T06:00:00-08:00"), expected);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(Some("61")), Ok(Some(61.0)));
        assert_eq!(parse_number(Some(" -3.5 ")), Ok(Some(-3.5)));
        assert_eq!(parse_number(Some("")), Ok(None));
        assert_eq!(parse_number(Some("NaN")), Ok(None));
        assert_eq!(parse_number(None), Ok(None));
        assert_eq!(parse_number(Some("T")), Err("T".to_string()));
        assert_eq!(parse_number(Some("inf")), Err("inf".to_string()));
    }
}
