//! Dashboard View Widget
//! Central scrollable panel with the map, heatmap, bar chart and tables.

use crate::charts::{ChartPlotter, MapFrame};
use crate::data::Dataset;
use crate::query::DashboardPanels;
use egui::{Grid, RichText, ScrollArea};

const SECTION_SPACING: f32 = 20.0;
const RAW_ROW_HEIGHT: f32 = 18.0;

/// Renders a computed set of dashboard panels.
pub struct DashboardView {
    zoom: f64,
}

impl DashboardView {
    pub fn new(zoom: f64) -> Self {
        Self { zoom }
    }

    pub fn show(&self, ui: &mut egui::Ui, dataset: Option<&Dataset>, panels: Option<&DashboardPanels>) {
        let (Some(dataset), Some(panels)) = (dataset, panels) else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Motor Vehicle Collisions in New York City");
                ui.label(
                    "This application is a dashboard that can be used \
                     to analyze motor vehicle collisions in NYC 🗽💥🚗",
                );
                ui.add_space(SECTION_SPACING);

                self.show_injury_map(ui, panels);
                ui.add_space(SECTION_SPACING);

                self.show_hour_heatmap(ui, panels);
                ui.add_space(SECTION_SPACING);

                if let Some(rows) = &panels.raw_rows {
                    ui.label(
                        RichText::new(format!(
                            "Raw data by minute between {}",
                            panels.hour_label
                        ))
                        .size(16.0)
                        .strong(),
                    );
                    Self::show_raw_table(ui, dataset, rows);
                    ui.add_space(SECTION_SPACING);
                }

                ui.label(
                    RichText::new(format!("Breakdown by minute between {}", panels.hour_label))
                        .size(16.0)
                        .strong(),
                );
                ChartPlotter::draw_minute_histogram(ui, &panels.minute_histogram);
                ui.add_space(SECTION_SPACING);

                Self::show_top_streets(ui, panels);
            });
    }

    fn show_injury_map(&self, ui: &mut egui::Ui, panels: &DashboardPanels) {
        ui.heading("Where are the most people injured in NYC?");
        ui.label(format!(
            "{} collisions with at least {} persons injured",
            panels.injury_points.len(),
            panels.controls.min_injured
        ));
        ChartPlotter::draw_point_map(ui, "injury_map", &panels.injury_points, None);
    }

    fn show_hour_heatmap(&self, ui: &mut egui::Ui, panels: &DashboardPanels) {
        ui.heading("How many collisions occur during a given time of day?");
        ui.label(format!(
            "Vehicle collisions between {}",
            panels.hour_label
        ));
        let frame = panels.midpoint.map(|mid| MapFrame::new(mid, self.zoom));
        ChartPlotter::draw_hex_heatmap(ui, &panels.hex_bins, frame);
    }

    fn show_raw_table(ui: &mut egui::Ui, dataset: &Dataset, rows: &[usize]) {
        let frame = dataset.frame();
        let columns = frame.get_columns();

        ScrollArea::both()
            .id_salt("raw_data")
            .max_height(300.0)
            .show_rows(ui, RAW_ROW_HEIGHT, rows.len() + 1, |ui, range| {
                Grid::new("raw_data_grid").striped(true).show(ui, |ui| {
                    for line in range {
                        if line == 0 {
                            for column in columns {
                                ui.label(RichText::new(column.name().as_str()).strong());
                            }
                        } else {
                            let row = rows[line - 1];
                            for column in columns {
                                let text = column
                                    .get(row)
                                    .map(|v| {
                                        if v.is_null() {
                                            String::new()
                                        } else {
                                            v.to_string().trim_matches('"').to_string()
                                        }
                                    })
                                    .unwrap_or_default();
                                ui.label(text);
                            }
                        }
                        ui.end_row();
                    }
                });
            });
    }

    fn show_top_streets(ui: &mut egui::Ui, panels: &DashboardPanels) {
        let class = panels.controls.class;
        ui.heading("Top 5 dangerous streets by affected class");
        ui.label(format!("Affected class: {}", class.label()));
        ui.add_space(5.0);

        if panels.top_streets.is_empty() {
            ui.label(RichText::new("No injuries recorded for this class").italics());
            return;
        }

        Grid::new("top_streets")
            .striped(true)
            .num_columns(2)
            .show(ui, |ui| {
                ui.label(RichText::new("on_street_name").strong());
                ui.label(RichText::new(class.column()).strong());
                ui.end_row();
                for entry in &panels.top_streets {
                    ui.label(&entry.street);
                    ui.label(entry.count.to_string());
                    ui.end_row();
                }
            });
    }
}
