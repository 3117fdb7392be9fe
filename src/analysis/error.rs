use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Locations {locations:?} have no dates in common")]
    EmptyOverlap { locations: Vec<String> },

    #[error("Invalid range: low ({low}) must not exceed high ({high})")]
    InvalidRange { low: f64, high: f64 },

    #[error("Invalid rolling window of {window_years} years requiring {min_years} observed years")]
    InvalidWindow { window_years: u32, min_years: u32 },

    #[error("At least one dataset is required")]
    NoDatasets,

    #[error("Location '{0}' was supplied more than once")]
    DuplicateLocation(String),

    #[error("Location '{location}' needs {required} years of data, found {found}")]
    InsufficientData {
        location: String,
        required: u32,
        found: usize,
    },
}
