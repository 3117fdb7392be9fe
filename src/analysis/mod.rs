pub mod aggregate;
pub mod error;
pub mod merge;
pub mod monthly;
pub mod stations;
