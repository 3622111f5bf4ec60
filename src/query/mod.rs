//! Query module - derived views over the immutable dataset

mod filters;
mod hexbin;
mod histogram;
mod panels;
mod ranking;

pub use filters::{
    filter_by_hour, filter_by_hour_range, hour_window_label, map_midpoint, min_injured_points,
};
pub use hexbin::{hexagon_bins, resolution_for_radius, HexBin};
pub use histogram::{minute_histogram, MinuteHistogram, MINUTE_BINS};
pub use panels::{Controls, DashboardPanels, HOUR_RANGE, INJURED_RANGE};
pub use ranking::{top_streets, StreetCount, TOP_STREETS_LIMIT};
