use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error accessing '{0}'")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Parsing error reading CSV file '{path}'")]
    CsvRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    // DataFormatError: the date column is required
    #[error("Required column '{column}' not found in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    // DataFormatError: at least one measurement column is required
    #[error("None of the measurement columns {expected:?} found in '{path}'")]
    NoMeasurementColumns { path: PathBuf, expected: Vec<String> },

    #[error("No usable data rows in '{0}'")]
    EmptyDataset(PathBuf),

    #[error("Columns of '{new}' ({new_columns:?}) do not match columns of '{existing}' ({existing_columns:?})")]
    ColumnMismatch {
        new: PathBuf,
        existing: PathBuf,
        new_columns: Vec<String>,
        existing_columns: Vec<String>,
    },

    #[error("Failed to combine '{new}' with '{existing}'")]
    Combine {
        new: PathBuf,
        existing: PathBuf,
        #[source]
        source: PolarsError,
    },

    #[error("Failed to write CSV file '{0}'")]
    CsvWrite(PathBuf, #[source] PolarsError),

    #[error("Failed to replace '{0}' with the updated data")]
    Persist(PathBuf, #[source] std::io::Error),

    #[error("Failed to read column mapping '{0}'")]
    ConfigRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse column mapping")]
    ConfigParse(#[from] serde_json::Error),
}
