//! Chart Plotter Module
//! Draws the dashboard's map, heatmap and bar chart with egui_plot.

use crate::data::GeoPoint;
use crate::query::{HexBin, MinuteHistogram};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points, Polygon};

/// Point color for the injury map
pub const POINT_COLOR: Color32 = Color32::from_rgb(231, 76, 60); // Red

/// Bar color for the minute breakdown
pub const BAR_COLOR: Color32 = Color32::from_rgb(100, 149, 237); // Cornflower

/// Hexagon color ramp, lowest to highest count (yellow to dark red).
pub const HEX_PALETTE: [Color32; 6] = [
    Color32::from_rgb(255, 255, 178),
    Color32::from_rgb(254, 217, 118),
    Color32::from_rgb(254, 178, 76),
    Color32::from_rgb(253, 141, 60),
    Color32::from_rgb(240, 59, 32),
    Color32::from_rgb(189, 0, 38),
];

/// Degrees of longitude covered by one 256px web-map tile at `zoom`.
pub fn span_for_zoom(zoom: f64) -> f64 {
    360.0 / 2f64.powf(zoom)
}

/// Visible map area: a midpoint and the span around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFrame {
    pub center: GeoPoint,
    pub span: f64,
}

impl MapFrame {
    pub fn new(center: GeoPoint, zoom: f64) -> Self {
        Self {
            center,
            span: span_for_zoom(zoom),
        }
    }

    /// Longitude and latitude extents as `([min_x, max_x], [min_y, max_y])`.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let half = self.span / 2.0;
        (
            [self.center.lon - half, self.center.lon + half],
            [self.center.lat - half, self.center.lat + half],
        )
    }
}

/// Draws the dashboard's interactive charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Quantize `count` onto the hexagon palette.
    pub fn hex_color(count: usize, max: usize) -> Color32 {
        if max == 0 {
            return HEX_PALETTE[0];
        }
        let idx = (count * HEX_PALETTE.len()).saturating_sub(1) / max;
        HEX_PALETTE[idx.min(HEX_PALETTE.len() - 1)]
    }

    /// Fill opacity for a hexagon: taller cells are drawn more solid.
    pub fn elevation_opacity(elevation: f64, max_elevation: f64) -> f32 {
        const FLOOR: f64 = 0.3;
        if max_elevation.is_nan() || max_elevation <= 0.0 {
            return 0.8;
        }
        let t = (elevation / max_elevation).clamp(0.0, 1.0);
        (FLOOR + t * (1.0 - FLOOR)) as f32
    }

    /// Scatter of crash locations, longitude on x and latitude on y.
    pub fn draw_point_map(ui: &mut egui::Ui, id: &str, points: &[GeoPoint], frame: Option<MapFrame>) {
        let mut plot = Plot::new(id)
            .height(400.0)
            .data_aspect(1.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .allow_scroll(false);
        if let Some(frame) = frame {
            let ([x0, x1], [y0, y1]) = frame.bounds();
            plot = plot.include_x(x0).include_x(x1).include_y(y0).include_y(y1);
        }

        plot.show(ui, |plot_ui| {
            let coords: PlotPoints = points.iter().map(|p| [p.lon, p.lat]).collect();
            plot_ui.points(
                Points::new(coords)
                    .radius(1.5)
                    .color(POINT_COLOR.gamma_multiply(0.7))
                    .name("Collisions"),
            );
        });
    }

    /// Hexagon heatmap; fill color follows the bin count, opacity and outline
    /// width follow the elevation.
    pub fn draw_hex_heatmap(ui: &mut egui::Ui, bins: &[HexBin], frame: Option<MapFrame>) {
        let max = bins.iter().map(|b| b.count).max().unwrap_or(0);
        let max_elevation = bins.iter().map(|b| b.elevation).fold(0.0, f64::max);

        let mut plot = Plot::new("hex_heatmap")
            .height(450.0)
            .data_aspect(1.0)
            .x_axis_label("Longitude")
            .y_axis_label("Latitude")
            .allow_scroll(false);
        if let Some(frame) = frame {
            let ([x0, x1], [y0, y1]) = frame.bounds();
            plot = plot.include_x(x0).include_x(x1).include_y(y0).include_y(y1);
        }

        plot.show(ui, |plot_ui| {
            for bin in bins {
                let outline: PlotPoints = bin.boundary.iter().map(|p| [p.lon, p.lat]).collect();
                let color = Self::hex_color(bin.count, max);
                let opacity = Self::elevation_opacity(bin.elevation, max_elevation);
                plot_ui.polygon(
                    Polygon::new(outline)
                        .fill_color(color.gamma_multiply(opacity))
                        .stroke(egui::Stroke::new(0.5 + 2.0 * opacity, color))
                        .name(format!("{} crashes, elevation {:.0}", bin.count, bin.elevation)),
                );
            }
        });
    }

    /// 60-bar chart of crashes per minute.
    pub fn draw_minute_histogram(ui: &mut egui::Ui, histogram: &MinuteHistogram) {
        let bars: Vec<Bar> = histogram
            .bins()
            .iter()
            .enumerate()
            .map(|(minute, &crashes)| {
                Bar::new(minute as f64, crashes as f64)
                    .width(0.8)
                    .name(format!("minute {minute}"))
            })
            .collect();

        Plot::new("minute_histogram")
            .height(400.0)
            .x_axis_label("minute")
            .y_axis_label("crashes")
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(-0.5)
            .include_x(59.5)
            .include_y(0.0)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("crashes"));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_covers_count_range() {
        assert_eq!(ChartPlotter::hex_color(0, 0), HEX_PALETTE[0]);
        assert_eq!(ChartPlotter::hex_color(1, 60), HEX_PALETTE[0]);
        assert_eq!(ChartPlotter::hex_color(30, 60), HEX_PALETTE[2]);
        assert_eq!(ChartPlotter::hex_color(60, 60), HEX_PALETTE[5]);
    }

    #[test]
    fn opacity_follows_elevation() {
        assert_eq!(ChartPlotter::elevation_opacity(0.0, 4000.0), 0.3);
        assert_eq!(ChartPlotter::elevation_opacity(4000.0, 4000.0), 1.0);
        assert!(
            ChartPlotter::elevation_opacity(1000.0, 4000.0)
                < ChartPlotter::elevation_opacity(3000.0, 4000.0)
        );
        assert_eq!(ChartPlotter::elevation_opacity(0.0, 0.0), 0.8);
    }

    #[test]
    fn frame_centers_on_midpoint() {
        let frame = MapFrame::new(GeoPoint::new(40.0, -74.0), 0.0);
        assert_eq!(frame.bounds(), ([-254.0, 106.0], [-140.0, 220.0]));
    }

    #[test]
    fn zoom_halves_span() {
        assert_eq!(span_for_zoom(0.0), 360.0);
        assert!((span_for_zoom(11.0) * 2.0 - span_for_zoom(10.0)).abs() < 1e-12);
    }
}
