//! Chart Plotter Module
//! Draws the timing figure interactively using egui_plot.

use crate::charts::figure::{ErrorBar, Figure};
use egui::Color32;
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, PlotUi, Points};

/// Series color, matches the static renderer
pub const SERIES_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

/// Creates the interactive error bar chart using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw the error bar chart filling the available space.
    /// X-axis: activation time, Y-axis: final speed
    pub fn draw_error_bar_chart(ui: &mut egui::Ui, figure: &Figure) {
        let radius = figure.marker_radius_px as f32;

        let mut plot = Plot::new("activation_timing")
            .x_axis_label(figure.x_axis.label.clone())
            .y_axis_label(figure.y_axis.label.clone())
            .show_grid(figure.show_grid)
            .allow_scroll(false)
            .include_x(figure.x_axis.range.start)
            .include_x(figure.x_axis.range.end)
            .include_y(figure.y_axis.range.start)
            .include_y(figure.y_axis.range.end);

        if figure.show_legend {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            // Caps keep a fixed on-screen length at any zoom
            let cap = cap_in_data_units(
                figure.cap_half_width_px,
                plot_ui.transform().dvalue_dpos()[0],
            );
            for bar in &figure.bars {
                Self::draw_error_bar(plot_ui, bar, cap);
            }

            // Only the markers are named, so the legend has one entry
            let points: PlotPoints = figure.bars.iter().map(|bar| [bar.x, bar.y]).collect();
            plot_ui.points(
                Points::new(points)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(radius)
                    .color(SERIES_COLOR)
                    .name(&figure.series_label),
            );
        });
    }

    /// Vertical line from low to high, with a cap at each end.
    fn draw_error_bar(plot_ui: &mut PlotUi, bar: &ErrorBar, cap: f64) {
        let segments = [
            [[bar.x, bar.low], [bar.x, bar.high]],
            [[bar.x - cap, bar.low], [bar.x + cap, bar.low]],
            [[bar.x - cap, bar.high], [bar.x + cap, bar.high]],
        ];

        for segment in segments {
            let line_points: PlotPoints = segment.into_iter().collect();
            plot_ui.line(Line::new(line_points).color(SERIES_COLOR).width(1.0));
        }
    }
}

/// Convert a cap half-width from screen points to x data units.
fn cap_in_data_units(half_width_px: i32, x_value_per_px: f64) -> f64 {
    f64::from(half_width_px) * x_value_per_px.abs()
}
