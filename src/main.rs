//! Salary Dashboard - Data-Science Salary Survey Explorer
//!
//! Computes the dashboard tables once at startup, then opens the viewer,
//! exports the charts as PNG files, or prints the tables as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eframe::egui;
use salary_dashboard::charts::StaticChartRenderer;
use salary_dashboard::dashboard::{Route, OVERVIEW_PATH};
use salary_dashboard::gui::DashboardApp;
use salary_dashboard::logger::init_logger;
use salary_dashboard::{DashboardConfig, DashboardTables, Pipeline};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "salary-dashboard")]
#[command(about = "Explore the data-science salary survey")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Survey CSV, overrides `data_path` from the configuration
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the interactive dashboard (default)
    View {
        /// Page to open first
        #[arg(long, default_value = OVERVIEW_PATH)]
        path: String,
    },
    /// Render the charts of a page to PNG files
    Export {
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,
        #[arg(long, default_value = OVERVIEW_PATH)]
        path: String,
        #[arg(long, default_value_t = 1200)]
        width: u32,
        #[arg(long, default_value_t = 800)]
        height: u32,
    },
    /// Print the computed tables as JSON
    Summary {
        #[arg(long)]
        pretty: bool,
    },
}

fn load_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = &cli.data {
        config.data_path = data.clone();
    }
    config.validate()?;
    Ok(config)
}

fn run_viewer(tables: Arc<DashboardTables>, path: String) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Salary Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, tables, &path)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {}", e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = load_config(&cli)?;
    tracing::debug!(?config, "Configuration loaded");

    let tables = Pipeline::run(&config)
        .with_context(|| format!("preparing dashboard from {}", config.data_path.display()))?;
    let tables = Arc::new(tables);

    match cli.command.unwrap_or(Command::View {
        path: OVERVIEW_PATH.to_string(),
    }) {
        Command::View { path } => run_viewer(tables, path)?,
        Command::Export {
            out,
            path,
            width,
            height,
        } => {
            let route = Route::from_path(&path);
            let written = StaticChartRenderer::render_page(route, &tables, &out, width, height)
                .with_context(|| format!("exporting charts to {}", out.display()))?;
            tracing::info!(count = written.len(), route = route.path(), "Charts exported");
            for file in written {
                println!("{}", file.display());
            }
        }
        Command::Summary { pretty } => {
            let json = if pretty {
                serde_json::to_string_pretty(tables.as_ref())?
            } else {
                serde_json::to_string(tables.as_ref())?
            };
            println!("{}", json);
        }
    }

    Ok(())
}
