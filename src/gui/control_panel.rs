//! Control Panel Widget
//! Left side panel with the data source and the dashboard controls.

use crate::data::AffectedClass;
use crate::query::{Controls, HOUR_RANGE, INJURED_RANGE};
use egui::{Color32, ComboBox, RichText};
use std::path::PathBuf;

/// Left side control panel with file selection and dashboard controls.
pub struct ControlPanel {
    pub controls: Controls,
    pub csv_path: Option<PathBuf>,
    pub max_rows: usize,
    pub row_count: usize,
    pub status: String,
    pub controls_enabled: bool,
}

impl ControlPanel {
    pub fn new(csv_path: PathBuf, max_rows: usize) -> Self {
        Self {
            controls: Controls::default(),
            csv_path: Some(csv_path),
            max_rows,
            row_count: 0,
            status: "Ready".to_string(),
            controls_enabled: false,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🚗 Collision Explorer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Motor Vehicle Collisions in New York City")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
                ui.label(
                    RichText::new(format!(
                        "{} rows loaded (cap {})",
                        self.row_count, self.max_rows
                    ))
                    .size(11.0)
                    .color(Color32::GRAY),
                );
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Controls Section =====
        ui.add_enabled_ui(self.controls_enabled, |ui| {
            ui.label(RichText::new("🔧 Controls").size(14.0).strong());
            ui.add_space(8.0);

            ui.label("Number of persons injured in vehicle collisions");
            ui.add(egui::Slider::new(
                &mut self.controls.min_injured,
                INJURED_RANGE,
            ));
            ui.add_space(8.0);

            ui.label("Hour to look at");
            ui.add(egui::Slider::new(&mut self.controls.hour, HOUR_RANGE));
            ui.add_space(8.0);

            ui.checkbox(&mut self.controls.show_raw, "Show raw data");
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Affected class");
                ComboBox::from_id_salt("affected_class")
                    .width(150.0)
                    .selected_text(self.controls.class.label())
                    .show_ui(ui, |ui| {
                        for class in AffectedClass::ALL {
                            ui.selectable_value(&mut self.controls.class, class, class.label());
                        }
                    });
            });

            ui.add_space(15.0);
            ui.vertical_centered(|ui| {
                let button = egui::Button::new(RichText::new("🖼 Export Histogram").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportHistogram;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") || self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    ExportHistogram,
}
