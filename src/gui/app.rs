//! Collision Explorer Main Application
//! Main window with control panel and dashboard view.

use crate::charts::{StaticChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::config::Config;
use crate::data::{DataLoader, Dataset, DatasetCache};
use crate::gui::{ControlPanel, ControlPanelAction, DashboardView};
use crate::query::{Controls, DashboardPanels};
use egui::SidePanel;
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;

/// CSV loading result from background thread
enum LoadResult {
    Complete(Dataset),
    Error(String),
}

/// Main application window.
pub struct CollisionApp {
    config: Config,
    dataset: Option<Dataset>,
    panels: Option<DashboardPanels>,
    computed_for: Option<Controls>,
    control_panel: ControlPanel,
    dashboard_view: DashboardView,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl CollisionApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        let mut app = Self::idle(config);
        let path = app.config.dataset.path.clone();
        app.start_loading(path);
        app
    }

    fn idle(config: Config) -> Self {
        Self {
            control_panel: ControlPanel::new(config.dataset.path.clone(), config.dataset.max_rows),
            dashboard_view: DashboardView::new(config.heatmap.zoom),
            config,
            dataset: None,
            panels: None,
            computed_for: None,
            load_rx: None,
            is_loading: false,
        }
    }

    /// Load a dataset in a background thread
    fn start_loading(&mut self, path: PathBuf) {
        if self.is_loading {
            return; // Already loading
        }

        self.control_panel.csv_path = Some(path.clone());
        self.control_panel.set_status("Loading CSV file...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let max_rows = self.config.dataset.max_rows;
        let use_cache = self.config.dataset.cache;

        thread::spawn(move || {
            let result = if use_cache {
                DatasetCache::global().load(&path, max_rows)
            } else {
                DataLoader::load(&path, max_rows)
            };

            let _ = tx.send(match result {
                Ok(dataset) => LoadResult::Complete(dataset),
                Err(e) => LoadResult::Error(e.to_string()),
            });
        });
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(dataset)) => {
                self.control_panel.row_count = dataset.len();
                self.control_panel.controls_enabled = true;
                self.control_panel.set_status(&format!(
                    "Loaded {} rows, {} columns",
                    dataset.len(),
                    dataset.column_names().len()
                ));
                self.dataset = Some(dataset);
                self.computed_for = None;
                self.is_loading = false;
            }
            Ok(LoadResult::Error(err)) => {
                error!("load failed: {err}");
                self.control_panel.set_status(&format!("Error: {}", err));
                self.is_loading = false;
            }
            Err(TryRecvError::Empty) => self.load_rx = Some(rx),
            Err(TryRecvError::Disconnected) => {
                error!("loader thread exited without a result");
                self.control_panel
                    .set_status("Error: loader stopped before finishing");
                self.is_loading = false;
            }
        }
    }

    /// Recompute every panel when a control value changed.
    fn refresh_panels(&mut self) {
        let Some(dataset) = &self.dataset else {
            return;
        };
        let controls = self.control_panel.controls;
        if self.computed_for == Some(controls) {
            return;
        }

        self.panels = Some(DashboardPanels::compute(
            dataset,
            &controls,
            &self.config.heatmap,
        ));
        self.computed_for = Some(controls);
    }

    fn handle_browse_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.start_loading(path);
        }
    }

    fn handle_export_histogram(&mut self) {
        let Some(panels) = &self.panels else {
            self.control_panel.set_status("No histogram to export");
            return;
        };

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("minute_breakdown_{:02}.png", panels.controls.hour))
            .save_file()
        else {
            return; // User cancelled
        };

        let status = match StaticChartRenderer::render_minute_histogram(
            &panels.minute_histogram,
            &panels.hour_label,
            &output_path,
            DEFAULT_WIDTH,
            DEFAULT_HEIGHT,
        ) {
            Ok(()) => {
                info!("exported histogram to {}", output_path.display());
                format!("Exported {}", output_path.display())
            }
            Err(e) => {
                error!("export failed: {e}");
                format!("Error: {}", e)
            }
        };
        self.control_panel.set_status(&status);
    }
}

impl eframe::App for CollisionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        // Request repaint while loading
        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::ExportHistogram => self.handle_export_histogram(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        self.refresh_panels();

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard_view
                .show(ui, self.dataset.as_ref(), self.panels.as_ref());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dead_loader_thread_ends_loading() {
        let mut app = CollisionApp::idle(Config::default());
        let (tx, rx) = channel::<LoadResult>();
        app.load_rx = Some(rx);
        app.is_loading = true;

        app.check_load_results();
        assert!(app.is_loading);
        assert!(app.load_rx.is_some());

        drop(tx);
        app.check_load_results();
        assert!(!app.is_loading);
        assert!(app.load_rx.is_none());
        assert!(app.control_panel.status.starts_with("Error"));
    }
}
