//! Hexagon heatmap layer.
//! Bins crash coordinates into H3 cells and scales each cell's elevation.

use crate::config::HeatmapConfig;
use crate::data::GeoPoint;
use h3o::{CellIndex, LatLng, Resolution};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// One extruded hexagon of the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HexBin {
    pub cell: String,
    pub center: GeoPoint,
    pub boundary: Vec<GeoPoint>,
    pub count: usize,
    pub elevation: f64,
}

/// H3 resolution whose average edge length is closest to `radius` meters.
pub fn resolution_for_radius(radius: f64) -> Resolution {
    (0..=15u8)
        .filter_map(|r| Resolution::try_from(r).ok())
        .min_by(|a, b| {
            let da = (a.edge_length_m() - radius).abs();
            let db = (b.edge_length_m() - radius).abs();
            da.total_cmp(&db)
        })
        .unwrap_or(Resolution::Ten)
}

/// Count `points` per hexagon and assign elevations.
///
/// Points that are not valid coordinates are skipped. Bins come back sorted
/// by cell index.
pub fn hexagon_bins(points: &[GeoPoint], config: &HeatmapConfig) -> Vec<HexBin> {
    let resolution = resolution_for_radius(config.radius);

    let counts: HashMap<CellIndex, usize> = points
        .par_iter()
        .filter_map(|p| LatLng::new(p.lat, p.lon).ok())
        .map(|ll| ll.to_cell(resolution))
        .fold(HashMap::new, |mut acc, cell| {
            *acc.entry(cell).or_insert(0) += 1;
            acc
        })
        .reduce(HashMap::new, |mut a, b| {
            for (cell, n) in b {
                *a.entry(cell).or_insert(0) += n;
            }
            a
        });

    let mut cells: Vec<(CellIndex, usize)> = counts.into_iter().collect();
    cells.sort_unstable_by_key(|&(cell, _)| cell);

    let min = cells.iter().map(|&(_, n)| n).min().unwrap_or(0);
    let max = cells.iter().map(|&(_, n)| n).max().unwrap_or(0);

    cells
        .into_iter()
        .map(|(cell, count)| {
            let center = LatLng::from(cell);
            HexBin {
                cell: cell.to_string(),
                center: GeoPoint::new(center.lat(), center.lng()),
                boundary: cell
                    .boundary()
                    .iter()
                    .map(|v| GeoPoint::new(v.lat(), v.lng()))
                    .collect(),
                count,
                elevation: elevation(count, min, max, config),
            }
        })
        .collect()
}

/// Linear map of `count` from `[min, max]` onto the elevation range, scaled.
fn elevation(count: usize, min: usize, max: usize, config: &HeatmapConfig) -> f64 {
    let [low, high] = config.elevation_range;
    let t = if max > min {
        (count - min) as f64 / (max - min) as f64
    } else {
        0.5
    };
    (low + t * (high - low)) * config.elevation_scale
}
