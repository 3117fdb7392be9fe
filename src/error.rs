use crate::analysis::error::AnalysisError;
use crate::types::record::UnknownMeasurement;
use crate::weather_data::error::LoadError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    UnknownMeasurement(#[from] UnknownMeasurement),

    #[error("Failed processing DataFrame: {0}")]
    Polars(#[from] PolarsError),

    #[error("Could not resolve the requested date or period")]
    DateParsingError,
}
