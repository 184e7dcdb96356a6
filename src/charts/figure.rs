//! Figure Module
//! Resolves a measurement series and figure settings into a backend
//! independent description of the chart: axis ranges, error bars, pixel sizes.

use crate::config::FigureConfig;
use crate::data::MeasurementSeries;
use std::ops::Range;

/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

/// A single error bar in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBar {
    pub x: f64,
    pub y: f64,
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    pub label: String,
    pub range: Range<f64>,
}

/// Everything needed to draw the chart, on any backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub size_px: (u32, u32),
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub series_label: String,
    pub bars: Vec<ErrorBar>,
    /// Half the cap length (px)
    pub cap_half_width_px: i32,
    pub marker_radius_px: u32,
    pub show_grid: bool,
    pub show_legend: bool,
}

impl Figure {
    pub fn build(series: &MeasurementSeries, config: &FigureConfig) -> Self {
        let bars = series
            .observations()
            .map(|o| ErrorBar {
                x: o.activation_time,
                y: o.final_speed,
                low: o.lower(),
                high: o.upper(),
            })
            .collect();

        let cap_half_width_px = (config.points_to_px(config.cap_size_pt) / 2.0).round() as i32;
        let marker_radius_px =
            ((config.points_to_px(config.marker_size_pt) / 2.0).round() as u32).max(1);

        Self {
            title: config.title.clone(),
            size_px: config.pixel_size(),
            x_axis: Axis {
                label: config.x_label.clone(),
                range: padded_range(series.x_bounds()),
            },
            y_axis: Axis {
                label: config.y_label.clone(),
                range: padded_range(series.y_bounds()),
            },
            series_label: config.series_label.clone(),
            bars,
            cap_half_width_px,
            marker_radius_px,
            show_grid: config.show_grid,
            show_legend: config.show_legend,
        }
    }

    /// Number of plotted points.
    pub fn point_count(&self) -> usize {
        self.bars.len()
    }
}

/// Pad data bounds so no point sits on the plot border.
fn padded_range(bounds: Option<(f64, f64)>) -> Range<f64> {
    let Some((min, max)) = bounds else {
        return 0.0..1.0;
    };

    let span = max - min;
    let pad = if span > f64::EPSILON {
        span * AXIS_MARGIN
    } else if min != 0.0 {
        min.abs() * 0.1
    } else {
        0.5
    };

    (min - pad)..(max + pad)
}
