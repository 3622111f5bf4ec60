//! Collision Explorer - Motor Vehicle Collision Dashboard
//!
//! Opens the interactive dashboard, or prints / exports panels headlessly.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use collision_explorer::charts::{StaticChartRenderer, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use collision_explorer::config::{self, Config};
use collision_explorer::data::{AffectedClass, DataLoader, Dataset, DatasetCache};
use collision_explorer::gui::CollisionApp;
use collision_explorer::query::{Controls, DashboardPanels};
use eframe::egui;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Collision CSV, overrides the configured path
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Maximum number of rows to read
    #[arg(short, long)]
    rows: Option<usize>,

    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive dashboard
    Dashboard,
    /// Print the dashboard panels for one set of controls
    Summary {
        #[arg(long, default_value_t = 0)]
        injured: u32,
        #[arg(long, default_value_t = 0)]
        hour: u32,
        #[arg(long, value_enum, default_value_t = AffectedClass::Pedestrians)]
        class: AffectedClass,
        #[arg(long)]
        json: bool,
    },
    /// Render the per-minute breakdown for an hour to PNG
    ExportHistogram {
        #[arg(long)]
        hour: u32,
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = config::load_or_default(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.dataset.path = data;
    }
    if let Some(rows) = cli.rows {
        config.dataset.max_rows = rows;
    }

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => run_dashboard(config),
        Command::Summary {
            injured,
            hour,
            class,
            json,
        } => {
            let controls = Controls {
                min_injured: injured,
                hour,
                show_raw: false,
                class,
            };
            let dataset = load_dataset(&config)?;
            let panels = DashboardPanels::compute(&dataset, &controls, &config.heatmap);
            if json {
                println!("{}", serde_json::to_string_pretty(&panels)?);
            } else {
                print_summary(&dataset, &panels);
            }
            Ok(())
        }
        Command::ExportHistogram { hour, output } => {
            let controls = Controls {
                hour,
                ..Controls::default()
            };
            let dataset = load_dataset(&config)?;
            let panels = DashboardPanels::compute(&dataset, &controls, &config.heatmap);
            StaticChartRenderer::render_minute_histogram(
                &panels.minute_histogram,
                &panels.hour_label,
                &output,
                DEFAULT_WIDTH,
                DEFAULT_HEIGHT,
            )
            .with_context(|| format!("Failed to export {}", output.display()))?;
            log::info!("wrote {}", output.display());
            Ok(())
        }
    }
}

fn load_dataset(config: &Config) -> Result<Dataset> {
    let path = &config.dataset.path;
    let max_rows = config.dataset.max_rows;
    let dataset = if config.dataset.cache {
        DatasetCache::global().load(path, max_rows)
    } else {
        DataLoader::load(path, max_rows)
    };
    dataset.with_context(|| format!("Failed to load {}", path.display()))
}

fn run_dashboard(config: Config) -> Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("Collision Explorer"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Collision Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(CollisionApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("Dashboard failed: {e}"))
}

fn print_summary(dataset: &Dataset, panels: &DashboardPanels) {
    let controls = &panels.controls;
    println!("Loaded {} collisions", dataset.len());
    println!();
    println!(
        "Collisions with at least {} persons injured: {}",
        controls.min_injured,
        panels.injury_points.len()
    );
    println!(
        "Vehicle collisions between {}: {} in {} hexagons",
        panels.hour_label,
        panels.hour_count,
        panels.hex_bins.len()
    );
    if let Some(mid) = panels.midpoint {
        println!("Midpoint: {:.5}, {:.5}", mid.lat, mid.lon);
    }
    println!();
    println!("Breakdown by minute between {}", panels.hour_label);
    for (minute, crashes) in panels.minute_histogram.bins().iter().enumerate() {
        if *crashes > 0 {
            println!("  {minute:>2}  {crashes}");
        }
    }
    println!();
    println!(
        "Top 5 dangerous streets for {}",
        controls.class.label().to_lowercase()
    );
    for entry in &panels.top_streets {
        println!("  {:<40} {}", entry.street, entry.count);
    }
}
