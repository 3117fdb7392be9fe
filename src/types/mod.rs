pub mod comparison;
pub mod dataset;
pub mod hardiness;
pub mod record;
pub mod station;
pub mod traits;
