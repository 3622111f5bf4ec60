//! Data module - CSV loading, normalization and the immutable dataset

mod cache;
mod dataset;
mod loader;
mod record;
mod timestamp;

pub use cache::DatasetCache;
pub use dataset::{Dataset, DatasetView};
pub use loader::{DataLoader, DatasetError, LoadError, ParseError, REQUIRED_COLUMNS};
pub use record::*;
pub use timestamp::parse_crash_timestamp;

#[cfg(test)]
pub(crate) use dataset::fixtures;
