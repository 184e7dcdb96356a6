//! Control Panel Widget
//! Left side panel with dataset summary, export controls and status.

use crate::charts::{Figure, OutputFormat};
use egui::{Color32, RichText};

/// Left side control panel with export controls.
pub struct ControlPanel {
    pub open_after_export: bool,
    pub status: String,
    pub status_is_error: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            open_after_export: true,
            status: "Ready".to_string(),
            status_is_error: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, figure: &Figure) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🧲 Magnet Timing")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Activation timing results")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📁 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("dataset_summary")
                    .num_columns(2)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Observations:");
                        ui.label(figure.point_count().to_string());
                        ui.end_row();

                        ui.label("Time range:");
                        ui.label(Self::range_text(figure.bars.iter().map(|b| b.x), 0));
                        ui.end_row();

                        ui.label("Speed range:");
                        ui.label(Self::range_text(figure.bars.iter().map(|b| b.y), 4));
                        ui.end_row();

                        ui.label("Figure size:");
                        ui.label(format!("{} × {} px", figure.size_px.0, figure.size_px.1));
                        ui.end_row();
                    });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export Buttons =====
        ui.label(RichText::new("💾 Export").size(14.0).strong());
        ui.add_space(8.0);

        ui.vertical_centered(|ui| {
            let png_button = egui::Button::new(RichText::new("🖼 Export PNG…").size(14.0))
                .min_size(egui::vec2(180.0, 30.0));
            if ui.add(png_button).clicked() {
                action = ControlPanelAction::Export(OutputFormat::Png);
            }

            ui.add_space(6.0);

            let svg_button = egui::Button::new(RichText::new("📐 Export SVG…").size(14.0))
                .min_size(egui::vec2(180.0, 30.0));
            if ui.add(svg_button).clicked() {
                action = ControlPanelAction::Export(OutputFormat::Svg);
            }
        });

        ui.add_space(8.0);
        ui.checkbox(&mut self.open_after_export, "Open file after export");

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status_is_error {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status text
    pub fn set_status(&mut self, status: &str, is_error: bool) {
        self.status = status.to_string();
        self.status_is_error = is_error;
    }

    fn range_text(values: impl Iterator<Item = f64>, decimals: usize) -> String {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if min > max {
            "-".to_string()
        } else {
            format!("{:.*} – {:.*}", decimals, min, decimals, max)
        }
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Export(OutputFormat),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_text_formats_bounds() {
        let text = ControlPanel::range_text([3.0, 1.0, 2.0].into_iter(), 1);
        assert_eq!(text, "1.0 – 3.0");
    }

    #[test]
    fn range_text_of_nothing_is_dash() {
        assert_eq!(ControlPanel::range_text(std::iter::empty(), 2), "-");
    }

    #[test]
    fn status_tracks_errors() {
        let mut panel = ControlPanel::new();
        assert_eq!(panel.status, "Ready");
        panel.set_status("Export error: disk full", true);
        assert!(panel.status_is_error);
        panel.set_status("Exported chart.png", false);
        assert!(!panel.status_is_error);
    }
}
