//! Chart Viewer Widget
//! Central panel showing the titled timing chart using egui_plot.

use crate::charts::{ChartPlotter, Figure};
use egui::RichText;

/// Chart card inner margin
const CARD_MARGIN: f32 = 12.0;

/// Central chart display area.
pub struct ChartViewer {
    pub figure: Figure,
}

impl ChartViewer {
    pub fn new(figure: Figure) -> Self {
        Self { figure }
    }

    /// Draw the chart card filling the available space
    pub fn show(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .rounding(8.0)
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(CARD_MARGIN)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&self.figure.title).size(18.0).strong());
                });

                ui.add_space(8.0);

                if self.figure.bars.is_empty() {
                    ui.label(RichText::new("No observations").size(12.0).italics());
                }

                ChartPlotter::draw_error_bar_chart(ui, &self.figure);
            });
    }
}
