mod app;
mod color;
mod config;
mod data;
mod error;
mod format;
mod pipeline;
mod state;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use app::SalesDashboardApp;
use clap::Parser;
use config::Config;
use data::cache::DataCache;
use data::source::{DataSource, FileSource, HttpSource};
use eframe::egui;
use state::AppState;

/// Filterable sales KPI and chart dashboard.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (default: <config dir>/sales-dashboard/config.toml or ./config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Remote CSV to load
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Local .csv, .json or .parquet file to load
    #[arg(long)]
    file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = Config::load_default(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.source.url = url;
        config.source.file = None;
    }
    if let Some(file) = cli.file {
        config.source.file = Some(file);
    }

    let source: Box<dyn DataSource> = match &config.source.file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(
            config.source.url.clone(),
            Duration::from_secs(config.source.timeout_secs),
        )),
    };

    // The first (and only) fetch happens here, before the first frame.
    let state = AppState::new(DataCache::new(source), config.filters.default_region_count);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Global Sales Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SalesDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard: {e}"))
}
