pub mod error;
pub(crate) mod extractor;
pub mod loader;
pub mod update;
