//! Record filters feeding the map and hour-of-day panels.

use crate::data::{DatasetView, GeoPoint};
use chrono::Timelike;
use statrs::statistics::Statistics;

/// Coordinates of records with at least `threshold` persons injured.
///
/// Records with an unknown injury count never qualify. Order is preserved.
pub fn min_injured_points(view: &DatasetView<'_>, threshold: u32) -> Vec<GeoPoint> {
    view.records()
        .filter(|r| r.injured_persons.is_some_and(|n| n >= threshold))
        .map(|r| r.location())
        .filter(GeoPoint::is_finite)
        .collect()
}

/// Records whose timestamp falls on exactly `hour`.
pub fn filter_by_hour<'a>(view: &DatasetView<'a>, hour: u32) -> DatasetView<'a> {
    view.filter(|r| r.timestamp.hour() == hour)
}

/// Records in the half-open interval `[hour, hour + 1)`.
pub fn filter_by_hour_range<'a>(view: &DatasetView<'a>, hour: u32) -> DatasetView<'a> {
    let end = hour.saturating_add(1);
    view.filter(|r| {
        let h = r.timestamp.hour();
        h >= hour && h < end
    })
}

/// "8:00 and 9:00" style label; the end always wraps modulo 24.
pub fn hour_window_label(hour: u32) -> String {
    format!("{}:00 and {}:00", hour, hour.wrapping_add(1) % 24)
}

/// Average position of the records in `view`, if any.
pub fn map_midpoint(view: &DatasetView<'_>) -> Option<GeoPoint> {
    if view.is_empty() {
        return None;
    }
    let lat = view.records().map(|r| r.latitude).mean();
    let lon = view.records().map(|r| r.longitude).mean();
    let midpoint = GeoPoint::new(lat, lon);
    midpoint.is_finite().then_some(midpoint)
}
