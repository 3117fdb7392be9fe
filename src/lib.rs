mod analysis;
mod config;
mod error;
mod filtering;
mod frames;
mod types;
mod weather_data;
mod workbench;

pub use config::*;
pub use error::ClimateError;
pub use filtering::ClimateFrameFilterExt;
pub use frames::aggregates_to_frame;
pub use workbench::ClimateWorkbench;

pub use weather_data::error::LoadError;
pub use weather_data::loader::{load, load_with, LoadReport, WeatherDataLoader};
pub use weather_data::update::update_data;

pub use analysis::aggregate::*;
pub use analysis::error::AnalysisError;
pub use analysis::merge::{merge, MergeMode};
pub use analysis::monthly::{monthly_summary, MonthlySummary};
pub use analysis::stations::{sites_within, station_date_ranges};

pub use types::comparison::*;
pub use types::dataset::LocationDataset;
pub use types::hardiness::*;
pub use types::record::*;
pub use types::station::*;

pub use types::traits::any::any_date::AnyDate;
pub use types::traits::period::date_period::DatePeriod;
pub use types::traits::types::{Month, StartEndDate, Year};
