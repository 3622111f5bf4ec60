//! Dashboard panel pipeline.
//! Recomputes every derived view from the immutable dataset for one set of
//! control values.

use super::filters::{
    filter_by_hour, filter_by_hour_range, hour_window_label, map_midpoint, min_injured_points,
};
use super::hexbin::{hexagon_bins, HexBin};
use super::histogram::{minute_histogram, MinuteHistogram};
use super::ranking::{top_streets, StreetCount, TOP_STREETS_LIMIT};
use crate::config::HeatmapConfig;
use crate::data::{AffectedClass, Dataset, GeoPoint};
use log::debug;
use serde::Serialize;
use std::ops::RangeInclusive;

pub const INJURED_RANGE: RangeInclusive<u32> = 0..=19;
pub const HOUR_RANGE: RangeInclusive<u32> = 0..=23;

/// Values of the dashboard controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Controls {
    pub min_injured: u32,
    pub hour: u32,
    pub show_raw: bool,
    pub class: AffectedClass,
}

/// Everything the dashboard renders for one set of controls.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPanels {
    pub controls: Controls,
    /// Locations with at least `min_injured` persons injured.
    pub injury_points: Vec<GeoPoint>,
    /// "{hour}:00 and {hour+1}:00" window text.
    pub hour_label: String,
    pub hour_count: usize,
    pub midpoint: Option<GeoPoint>,
    pub hex_bins: Vec<HexBin>,
    /// Dataset rows of the hour view, present only with `show_raw`.
    #[serde(skip)]
    pub raw_rows: Option<Vec<usize>>,
    pub minute_histogram: MinuteHistogram,
    pub top_streets: Vec<StreetCount>,
}

impl DashboardPanels {
    pub fn compute(dataset: &Dataset, controls: &Controls, heatmap: &HeatmapConfig) -> Self {
        let all = dataset.view();

        let injury_points = min_injured_points(&all, controls.min_injured);

        let hour_view = filter_by_hour(&all, controls.hour);
        let hour_points: Vec<GeoPoint> = hour_view.records().map(|r| r.location()).collect();
        let hex_bins = hexagon_bins(&hour_points, heatmap);
        let midpoint = map_midpoint(&hour_view);

        let minute_histogram = minute_histogram(&filter_by_hour_range(&hour_view, controls.hour));

        // Ranking ignores the hour control.
        let top_streets = top_streets(&all, controls.class, TOP_STREETS_LIMIT);

        debug!(
            "panels: {} injury points, {} crashes at hour {}, {} hexagons",
            injury_points.len(),
            hour_view.len(),
            controls.hour,
            hex_bins.len()
        );

        Self {
            controls: *controls,
            injury_points,
            hour_label: hour_window_label(controls.hour),
            hour_count: hour_view.len(),
            midpoint,
            hex_bins,
            raw_rows: controls.show_raw.then(|| hour_view.rows().to_vec()),
            minute_histogram,
            top_streets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{dataset, record};

    fn sample() -> Dataset {
        let mut records = Vec::new();
        for (hour, minute, injured, street) in [
            (7, 5, 1, "BROADWAY"),
            (8, 15, 3, "ATLANTIC AVENUE"),
            (8, 15, 0, "BROADWAY"),
            (8, 45, 2, "FLATBUSH AVENUE"),
            (9, 0, 6, "QUEENS BOULEVARD"),
        ] {
            let mut r = record(hour, minute);
            r.injured_persons = Some(injured);
            r.injured_motorists = Some(injured);
            r.on_street_name = Some(street.to_string());
            records.push(r);
        }
        dataset(records)
    }

    #[test]
    fn hour_panels_follow_hour_control() {
        let ds = sample();
        let controls = Controls {
            hour: 8,
            ..Controls::default()
        };
        let panels = DashboardPanels::compute(&ds, &controls, &HeatmapConfig::default());

        assert_eq!(panels.hour_label, "8:00 and 9:00");
        assert_eq!(panels.hour_count, 3);
        assert_eq!(panels.minute_histogram.total(), 3);
        assert_eq!(panels.minute_histogram.bins()[15], 2);
        assert_eq!(panels.hex_bins.iter().map(|b| b.count).sum::<usize>(), 3);
        assert!(panels.midpoint.is_some());
        assert!(panels.raw_rows.is_none());
    }

    #[test]
    fn ranking_ignores_hour_control() {
        let ds = sample();
        let controls = Controls {
            hour: 3,
            show_raw: true,
            class: AffectedClass::Motorists,
            ..Controls::default()
        };
        let panels = DashboardPanels::compute(&ds, &controls, &HeatmapConfig::default());

        assert_eq!(panels.hour_count, 0);
        assert_eq!(panels.minute_histogram.total(), 0);
        assert!(panels.midpoint.is_none());
        assert_eq!(panels.raw_rows, Some(Vec::new()));
        let streets: Vec<&str> = panels.top_streets.iter().map(|s| s.street.as_str()).collect();
        assert_eq!(
            streets,
            vec!["QUEENS BOULEVARD", "ATLANTIC AVENUE", "FLATBUSH AVENUE", "BROADWAY"]
        );
    }

    #[test]
    fn injury_map_ignores_hour_control() {
        let ds = sample();
        let controls = Controls {
            min_injured: 2,
            hour: 23,
            ..Controls::default()
        };
        let panels = DashboardPanels::compute(&ds, &controls, &HeatmapConfig::default());
        assert_eq!(panels.injury_points.len(), 3);
        assert_eq!(panels.hour_label, "23:00 and 0:00");
    }
}
