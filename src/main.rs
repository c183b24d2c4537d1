mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use app::PaperExplorerApp;
use clap::Parser;
use config::ExplorerConfig;
use eframe::egui;
use state::AppState;

/// Explore a paper metadata table: publications per year, top journals,
/// sources and title words, filtered by year range and journal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Metadata file to open (.csv, .tsv or .json)
    #[arg(default_value = "metadata.csv")]
    input: PathBuf,

    /// TOML file overriding column names, thresholds and top-N sizes
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ExplorerConfig::from_toml_file(path)?,
        None => ExplorerConfig::default(),
    };
    log::debug!("Using {config:?}");

    // A failed load is reported in the window, which can still open another file.
    let mut state = AppState::new(config);
    state.open(&args.input);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Paper Explorer – Metadata Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(PaperExplorerApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
