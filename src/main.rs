//! Magnet Timing Chart - Electromagnet activation timing results viewer
//!
//! Plots final speed against magnet activation time with error bars, either in
//! an interactive window or straight to an image file.

mod charts;
mod cli;
mod config;
mod data;
mod gui;

use anyhow::{anyhow, Context};
use charts::{Figure, StaticChartRenderer};
use clap::Parser;
use cli::{Cli, OutputTarget};
use config::FigureConfig;
use eframe::egui;
use gui::ChartApp;
use log::{info, warn};
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => FigureConfig::load(path).context("loading figure config")?,
        None => FigureConfig::default(),
    };

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    // Validate before anything is drawn
    let series = data::electromagnet_timing().context("validating measurement series")?;
    if series.is_empty() {
        warn!("Measurement series is empty, the chart will have no points");
    } else {
        info!("Loaded {} observations", series.len());
    }

    let figure = Figure::build(&series, &config);

    let display = cli::display_available(|name| std::env::var_os(name));
    match cli.target(display) {
        OutputTarget::File(path) => {
            if cli.output.is_none() {
                warn!(
                    "No display available, writing chart to {} instead",
                    path.display()
                );
            }
            save_chart(&figure, &path, cli.open)
        }
        OutputTarget::Window => {
            let fallback = figure.clone();
            show_window(figure).or_else(|e| {
                let path = PathBuf::from(cli::FALLBACK_OUTPUT);
                warn!("{:#}, writing chart to {} instead", e, path.display());
                save_chart(&fallback, &path, false)
            })
        }
    }
}

/// Render to a file, optionally handing it to the system viewer.
fn save_chart(figure: &Figure, path: &Path, open_after: bool) -> anyhow::Result<()> {
    StaticChartRenderer::save(figure, path)
        .with_context(|| format!("rendering chart to {}", path.display()))?;
    if open_after {
        open::that(path).with_context(|| format!("opening {}", path.display()))?;
    }
    Ok(())
}

/// Open the interactive window; blocks until it is closed.
fn show_window(figure: Figure) -> anyhow::Result<()> {
    // Configure native options
    let (width, height) = figure.size_px;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32 + 300.0, height as f32 + 80.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Magnet Timing Chart"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Magnet Timing Chart",
        options,
        Box::new(|cc| Ok(Box::new(ChartApp::new(cc, figure)))),
    )
    .map_err(|e| anyhow!("chart window failed: {}", e))
}
