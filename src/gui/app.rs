//! Magnet Timing Chart Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{Figure, OutputFormat, StaticChartRenderer};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use log::{error, info, warn};

/// Main application window.
pub struct ChartApp {
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl ChartApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, figure: Figure) -> Self {
        Self {
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(figure),
        }
    }

    /// Handle export - ask for a location, render and write the chart
    fn handle_export(&mut self, format: OutputFormat) {
        let (filter_name, extension) = match format {
            OutputFormat::Png => ("PNG Image", "png"),
            OutputFormat::Jpeg => ("JPEG Image", "jpg"),
            OutputFormat::Bmp => ("Bitmap Image", "bmp"),
            OutputFormat::Svg => ("SVG Image", "svg"),
        };

        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter(filter_name, &[extension])
            .set_file_name(format!("activation_timing.{}", extension))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match StaticChartRenderer::save(&self.chart_viewer.figure, &output_path) {
            Ok(_) => {
                let name = output_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| output_path.display().to_string());
                self.control_panel
                    .set_status(&format!("Exported {}", name), false);

                if self.control_panel.open_after_export {
                    if let Err(e) = open::that(&output_path) {
                        warn!("Could not open {}: {}", output_path.display(), e);
                    }
                }
            }
            Err(e) => {
                error!("Export to {} failed: {}", output_path.display(), e);
                self.control_panel
                    .set_status(&format!("Export error: {}", e), true);
            }
        }
    }
}

impl eframe::App for ChartApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                let action = self.control_panel.show(ui, &self.chart_viewer.figure);

                match action {
                    ControlPanelAction::Export(format) => {
                        info!("Export requested as {:?}", format);
                        self.handle_export(format);
                    }
                    ControlPanelAction::None => {}
                }
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
