//! Static Chart Renderer
//! Draws a `Figure` with plotters and writes it out as a raster image or SVG.
//!
//! Layout:
//! 1. Title centered above the plot
//! 2. Mesh with tick labels, axis descriptions and major gridlines
//! 3. Vertical error lines with caps, then filled point markers
//! 4. Legend box in the upper right

use crate::charts::figure::Figure;
use image::{ImageFormat, RgbImage};
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Colors
const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const GRID_COLOR: RGBColor = RGBColor(176, 176, 176);

// Font sizes (px)
const TITLE_FONT: u32 = 22;
const AXIS_DESC_FONT: u32 = 16;
const TICK_FONT: u32 = 13;
const LEGEND_FONT: u32 = 14;

// Layout (px)
const MARGIN_PX: u32 = 15;
const X_LABEL_AREA_PX: u32 = 50;
const Y_LABEL_AREA_PX: u32 = 80;

/// Legend glyph offset from the legend entry anchor (px)
const LEGEND_GLYPH_OFFSET: i32 = 10;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Unsupported output format for {}: expected png, jpg, jpeg, bmp or svg", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Image buffer does not match figure size {0:?}")]
    Buffer((u32, u32)),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}

fn draw_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(err.to_string())
}

/// File formats the renderer can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
}

impl OutputFormat {
    /// Pick the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("jpg") | Some("jpeg") => Ok(OutputFormat::Jpeg),
            Some("bmp") => Ok(OutputFormat::Bmp),
            Some("svg") => Ok(OutputFormat::Svg),
            _ => Err(RenderError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn image_format(self) -> Option<ImageFormat> {
        match self {
            OutputFormat::Png => Some(ImageFormat::Png),
            OutputFormat::Jpeg => Some(ImageFormat::Jpeg),
            OutputFormat::Bmp => Some(ImageFormat::Bmp),
            OutputFormat::Svg => None,
        }
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Draw the complete chart onto a drawing area of any backend.
    pub fn draw<DB: DrawingBackend>(
        figure: &Figure,
        root: &DrawingArea<DB, Shift>,
    ) -> Result<(), RenderError> {
        debug!(
            "Drawing {} error bars, x {:?}, y {:?}",
            figure.point_count(),
            figure.x_axis.range,
            figure.y_axis.range
        );

        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(root)
            .caption(&figure.title, ("sans-serif", TITLE_FONT))
            .margin(MARGIN_PX)
            .x_label_area_size(X_LABEL_AREA_PX)
            .y_label_area_size(Y_LABEL_AREA_PX)
            .build_cartesian_2d(figure.x_axis.range.clone(), figure.y_axis.range.clone())
            .map_err(draw_err)?;

        let speed_label = |v: &f64| format!("{:.3}", v);
        {
            let mut mesh = chart.configure_mesh();
            mesh.x_desc(figure.x_axis.label.as_str())
                .y_desc(figure.y_axis.label.as_str())
                .axis_desc_style(("sans-serif", AXIS_DESC_FONT))
                .label_style(("sans-serif", TICK_FONT))
                .y_label_formatter(&speed_label);
            if figure.show_grid {
                mesh.bold_line_style(GRID_COLOR.mix(0.6))
                    .light_line_style(TRANSPARENT);
            } else {
                mesh.disable_mesh();
            }
            mesh.draw().map_err(draw_err)?;
        }

        let stroke = SERIES_COLOR.stroke_width(1);
        let fill = SERIES_COLOR.filled();
        let cap = figure.cap_half_width_px;
        let radius = figure.marker_radius_px;

        // Error lines
        chart
            .draw_series(
                figure
                    .bars
                    .iter()
                    .map(|bar| PathElement::new(vec![(bar.x, bar.low), (bar.x, bar.high)], stroke)),
            )
            .map_err(draw_err)?;

        // Caps, sized in pixels so they do not stretch with the axis
        chart
            .draw_series(figure.bars.iter().flat_map(|bar| {
                [bar.low, bar.high].map(|y| {
                    EmptyElement::at((bar.x, y)) + PathElement::new(vec![(-cap, 0), (cap, 0)], stroke)
                })
            }))
            .map_err(draw_err)?;

        // Markers carry the single legend entry
        chart
            .draw_series(
                figure
                    .bars
                    .iter()
                    .map(|bar| Circle::new((bar.x, bar.y), radius, fill)),
            )
            .map_err(draw_err)?
            .label(figure.series_label.as_str())
            .legend(move |(x, y)| Circle::new((x + LEGEND_GLYPH_OFFSET, y), radius, fill));

        if figure.show_legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .label_font(("sans-serif", LEGEND_FONT))
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .draw()
                .map_err(draw_err)?;
        }

        root.present().map_err(draw_err)?;
        Ok(())
    }

    /// Render into an in-memory RGB image of the figure's pixel size.
    pub fn render_rgb(figure: &Figure) -> Result<RgbImage, RenderError> {
        let (width, height) = figure.size_px;
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            Self::draw(figure, &root)?;
        }
        RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(figure.size_px))
    }

    /// Render to an SVG document.
    pub fn render_svg(figure: &Figure) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, figure.size_px).into_drawing_area();
            Self::draw(figure, &root)?;
        }
        Ok(svg)
    }

    /// Write the chart to `path`, choosing the format from its extension.
    pub fn save(figure: &Figure, path: &Path) -> Result<OutputFormat, RenderError> {
        let format = OutputFormat::from_path(path)?;

        match format.image_format() {
            Some(image_format) => {
                Self::render_rgb(figure)?.save_with_format(path, image_format)?;
            }
            None => {
                fs::write(path, Self::render_svg(figure)?)?;
            }
        }

        info!(
            "Chart written to {} ({:?}, {}x{} px)",
            path.display(),
            format,
            figure.size_px.0,
            figure.size_px.1
        );
        Ok(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FigureConfig;
    use crate::data::{electromagnet_timing, MeasurementSeries};
    use plotters_backend::{
        BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend as Backend,
        DrawingErrorKind,
    };
    use std::cell::RefCell;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Pixel(BackendCoord),
        Line(BackendCoord, BackendCoord),
        Rect(BackendCoord, BackendCoord, bool),
        Path(Vec<BackendCoord>),
        Polygon(Vec<BackendCoord>),
        Circle(BackendCoord, u32, bool),
        Text(String, BackendCoord),
    }

    /// Records primitive draw calls instead of rasterizing, so tests need no
    /// fonts or display.
    struct RecordingBackend {
        size: (u32, u32),
        ops: Rc<RefCell<Vec<Op>>>,
    }

    type Res<T> = Result<T, DrawingErrorKind<Infallible>>;

    impl Backend for RecordingBackend {
        type ErrorType = Infallible;

        fn get_size(&self) -> (u32, u32) {
            self.size
        }

        fn ensure_prepared(&mut self) -> Res<()> {
            Ok(())
        }

        fn present(&mut self) -> Res<()> {
            Ok(())
        }

        fn draw_pixel(&mut self, point: BackendCoord, _color: BackendColor) -> Res<()> {
            self.ops.borrow_mut().push(Op::Pixel(point));
            Ok(())
        }

        fn draw_line<S: BackendStyle>(
            &mut self,
            from: BackendCoord,
            to: BackendCoord,
            _style: &S,
        ) -> Res<()> {
            self.ops.borrow_mut().push(Op::Line(from, to));
            Ok(())
        }

        fn draw_rect<S: BackendStyle>(
            &mut self,
            upper_left: BackendCoord,
            bottom_right: BackendCoord,
            _style: &S,
            fill: bool,
        ) -> Res<()> {
            self.ops
                .borrow_mut()
                .push(Op::Rect(upper_left, bottom_right, fill));
            Ok(())
        }

        fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
            &mut self,
            path: I,
            _style: &S,
        ) -> Res<()> {
            self.ops
                .borrow_mut()
                .push(Op::Path(path.into_iter().collect()));
            Ok(())
        }

        fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
            &mut self,
            vert: I,
            _style: &S,
        ) -> Res<()> {
            self.ops
                .borrow_mut()
                .push(Op::Polygon(vert.into_iter().collect()));
            Ok(())
        }

        fn draw_circle<S: BackendStyle>(
            &mut self,
            center: BackendCoord,
            radius: u32,
            _style: &S,
            fill: bool,
        ) -> Res<()> {
            self.ops.borrow_mut().push(Op::Circle(center, radius, fill));
            Ok(())
        }

        fn draw_text<T: BackendTextStyle>(
            &mut self,
            text: &str,
            _style: &T,
            pos: BackendCoord,
        ) -> Res<()> {
            self.ops.borrow_mut().push(Op::Text(text.to_string(), pos));
            Ok(())
        }

        fn estimate_text_size<T: BackendTextStyle>(&self, text: &str, style: &T) -> Res<(u32, u32)> {
            let size = style.size();
            Ok(((text.chars().count() as f64 * size * 0.6) as u32, size as u32))
        }
    }

    fn record(figure: &Figure) -> Vec<Op> {
        let ops = Rc::new(RefCell::new(Vec::new()));
        let backend = RecordingBackend {
            size: figure.size_px,
            ops: Rc::clone(&ops),
        };
        {
            let root = backend.into_drawing_area();
            StaticChartRenderer::draw(figure, &root).unwrap();
        }
        let recorded = ops.borrow().clone();
        recorded
    }

    fn texts(ops: &[Op]) -> Vec<&str> {
        ops.iter()
            .filter_map(|op| match op {
                Op::Text(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn markers(ops: &[Op], radius: u32) -> usize {
        ops.iter()
            .filter(|op| matches!(op, Op::Circle(_, r, true) if *r == radius))
            .count()
    }

    fn timing_figure(config: &FigureConfig) -> Figure {
        Figure::build(&electromagnet_timing().unwrap(), config)
    }

    #[test]
    fn draws_title_labels_and_legend_entry() {
        let figure = timing_figure(&FigureConfig::default());
        let ops = record(&figure);
        let texts = texts(&ops);

        assert!(texts.contains(&"Effect of Electromagnet Activation Timing on Final Speed"));
        assert!(texts.contains(&"Activation Time (ms)"));
        assert!(texts.contains(&"Acceleration (m/s^2)"));
        assert_eq!(texts.iter().filter(|t| **t == "Final Speed").count(), 1);
    }

    #[test]
    fn plots_sixteen_markers() {
        let config = FigureConfig {
            show_legend: false,
            ..FigureConfig::default()
        };
        let figure = timing_figure(&config);
        let ops = record(&figure);
        assert_eq!(markers(&ops, figure.marker_radius_px), 16);
    }

    #[test]
    fn legend_adds_one_glyph() {
        let figure = timing_figure(&FigureConfig::default());
        let ops = record(&figure);
        // 16 data markers plus the legend glyph
        assert_eq!(markers(&ops, figure.marker_radius_px), 17);
    }

    #[test]
    fn caps_span_configured_width() {
        let config = FigureConfig {
            cap_size_pt: 20.0,
            ..FigureConfig::default()
        };
        let figure = timing_figure(&config);
        let ops = record(&figure);
        let cap_len = 2 * figure.cap_half_width_px;
        let caps = ops
            .iter()
            .filter(|op| match op {
                Op::Path(points) => {
                    points.len() == 2
                        && points[0].1 == points[1].1
                        && points[1].0 - points[0].0 == cap_len
                }
                _ => false,
            })
            .count();
        // two caps per bar, nothing else on the chart is this long and flat
        assert_eq!(caps, 32);
    }

    #[test]
    fn grid_follows_config() {
        let count_lines = |show_grid: bool| {
            let config = FigureConfig {
                show_grid,
                ..FigureConfig::default()
            };
            record(&timing_figure(&config))
                .iter()
                .filter(|op| matches!(op, Op::Line(..)))
                .count()
        };
        // Mesh lines are the only straight lines the chart draws
        assert!(count_lines(true) > 0);
        assert_eq!(count_lines(false), 0);
    }

    #[test]
    fn legend_box_follows_config() {
        let rects = |show_legend: bool| {
            let config = FigureConfig {
                show_legend,
                ..FigureConfig::default()
            };
            let ops = record(&timing_figure(&config));
            let filled = ops
                .iter()
                .filter(|op| matches!(op, Op::Rect(_, _, true)))
                .count();
            let outlined = ops
                .iter()
                .filter(|op| matches!(op, Op::Rect(_, _, false)))
                .count();
            let entries = texts(&ops).iter().filter(|t| **t == "Final Speed").count();
            (filled, outlined, entries)
        };

        let (filled_on, outlined_on, entries_on) = rects(true);
        let (filled_off, outlined_off, entries_off) = rects(false);
        // background plus border
        assert_eq!(filled_on, filled_off + 1);
        assert_eq!(outlined_on, 1);
        assert_eq!(outlined_off, 0);
        assert_eq!(entries_on, 1);
        assert_eq!(entries_off, 0);
    }

    #[test]
    fn rendering_twice_is_identical() {
        let figure = timing_figure(&FigureConfig::default());
        assert_eq!(record(&figure), record(&figure));
    }

    #[test]
    fn empty_series_renders_axes_only() {
        let series = MeasurementSeries::from_slices(&[], &[], &[]).unwrap();
        let config = FigureConfig {
            show_legend: false,
            ..FigureConfig::default()
        };
        let figure = Figure::build(&series, &config);
        let ops = record(&figure);
        let texts = texts(&ops);

        assert!(texts.contains(&"Effect of Electromagnet Activation Timing on Final Speed"));
        assert!(texts.contains(&"Activation Time (ms)"));
        assert!(texts.contains(&"Acceleration (m/s^2)"));
        assert_eq!(markers(&ops, figure.marker_radius_px), 0);
    }

    #[test]
    fn detects_output_format_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("chart.png")).unwrap(),
            OutputFormat::Png
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("out/chart.JPG")).unwrap(),
            OutputFormat::Jpeg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("chart.jpeg")).unwrap(),
            OutputFormat::Jpeg
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("chart.bmp")).unwrap(),
            OutputFormat::Bmp
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("chart.Svg")).unwrap(),
            OutputFormat::Svg
        );
    }

    #[test]
    fn rejects_unknown_extension() {
        assert!(matches!(
            OutputFormat::from_path(Path::new("chart.pdf")),
            Err(RenderError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            OutputFormat::from_path(Path::new("chart")),
            Err(RenderError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn save_fails_before_drawing_on_unknown_format() {
        let path = std::env::temp_dir().join(format!(
            "magnet_timing_chart_{}.gif",
            std::process::id()
        ));
        let figure = timing_figure(&FigureConfig::default());
        let err = StaticChartRenderer::save(&figure, &path).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedFormat(_)));
        assert!(!path.exists());
    }
}
