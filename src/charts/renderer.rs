//! Static Chart Renderer
//! Writes the per-minute breakdown as a PNG bar chart with plotters.
//!
//! Layout:
//! 1. Caption: "Breakdown by minute between {label}"
//! 2. Bar chart, one bar per minute (x: minute, y: crashes)

use crate::query::{MinuteHistogram, MINUTE_BINS};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 400;

const BAR_COLOR: RGBColor = RGBColor(100, 149, 237);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image size must be non-zero, got {0}x{1}")]
    EmptyCanvas(u32, u32),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render the minute histogram for the `hour_label` window to `path`.
    pub fn render_minute_histogram(
        histogram: &MinuteHistogram,
        hour_label: &str,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyCanvas(width, height));
        }

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let y_max = histogram.max().max(1);
        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Breakdown by minute between {hour_label}"),
                ("sans-serif", 22),
            )
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0u32..(MINUTE_BINS as u32 - 1)).into_segmented(), 0usize..y_max + 1)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("minute")
            .y_desc("crashes")
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR_COLOR.filled())
                    .margin(1)
                    .data(
                        histogram
                            .bins()
                            .iter()
                            .enumerate()
                            .map(|(minute, &crashes)| (minute as u32, crashes)),
                    ),
            )
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
        Ok(())
    }
}

fn draw_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(err.to_string())
}
