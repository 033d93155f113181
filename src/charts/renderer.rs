//! Chart Renderer
//! Draws axes and bubbles with plotters and writes the chart document.
//!
//! Layout:
//! 1. Plot area inset by the configured margins
//! 2. Bottom axis (first indicator) and left axis (second indicator),
//!    tick labels and one description per axis, no grid
//! 3. One translucent circle with a dark outline per mark, in record order

use crate::charts::color::OUTLINE;
use crate::charts::document;
use crate::charts::layout::BubbleLayout;
use crate::config::ChartConfig;
use log::{debug, info};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error("Failed to encode hover data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn draw_error<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Draw(err.to_string())
}

/// Output flavour, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// SVG inside an HTML page with hover tooltips.
    Html,
    Svg,
    Png,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match ext.as_str() {
            "svg" => OutputFormat::Svg,
            "png" => OutputFormat::Png,
            _ => OutputFormat::Html,
        }
    }
}

/// Axis ranges need a positive finite end; undefined domains fall back to 1.
fn axis_bound(upper: f64) -> f64 {
    if upper.is_finite() && upper > 0.0 {
        upper
    } else {
        1.0
    }
}

pub struct ChartRenderer;

impl ChartRenderer {
    /// Render the chart and write it to `config.output`.
    pub fn write(layout: &BubbleLayout, config: &ChartConfig) -> Result<PathBuf, RenderError> {
        let path = config.output.clone();
        let format = OutputFormat::from_path(&path);
        debug!("Writing {:?} output to {}", format, path.display());

        match format {
            OutputFormat::Png => Self::render_png(layout, config, &path)?,
            OutputFormat::Svg => {
                let svg = Self::render_svg(layout, config)?;
                write_file(&path, &svg)?;
            }
            OutputFormat::Html => {
                let svg = Self::render_svg(layout, config)?;
                let html = document::html_document(&svg, layout, config)?;
                write_file(&path, &html)?;
            }
        }

        info!("Chart with {} marks written to {}", layout.marks.len(), path.display());
        Ok(path)
    }

    /// Render to an SVG string.
    pub fn render_svg(layout: &BubbleLayout, config: &ChartConfig) -> Result<String, RenderError> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (config.width, config.height))
                .into_drawing_area();
            Self::draw(&root, layout, config)?;
        }
        Ok(svg)
    }

    /// Render straight into a PNG file.
    pub fn render_png(layout: &BubbleLayout, config: &ChartConfig, path: &Path) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        Self::draw(&root, layout, config)
    }

    fn draw<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        layout: &BubbleLayout,
        config: &ChartConfig,
    ) -> Result<(), RenderError> {
        let margin = &config.margin;
        root.fill(&WHITE).map_err(draw_error)?;

        let x_end = axis_bound(layout.x.domain.1);
        let y_end = axis_bound(layout.y.domain.1);
        debug!("Axis ranges: x 0..{}, y 0..{}", x_end, y_end);

        let mut chart = ChartBuilder::on(root)
            .margin_top(margin.top)
            .margin_right(margin.right)
            .x_label_area_size(margin.bottom)
            .y_label_area_size(margin.left)
            .build_cartesian_2d(0f64..x_end, 0f64..y_end)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(config.labels.x.as_str())
            .y_desc(config.labels.y.as_str())
            .axis_desc_style(("sans-serif", 13))
            .label_style(("sans-serif", 11))
            .draw()
            .map_err(draw_error)?;

        // Marks are already in plot-area pixels
        let area = chart.plotting_area().strip_coord_spec();
        for mark in &layout.marks {
            let (cx, cy, r) = mark.pixel();
            let fill = mark.color().mix(config.mark_opacity).filled();
            area.draw(&Circle::new((cx, cy), r, fill)).map_err(draw_error)?;
            area.draw(&Circle::new((cx, cy), r, OUTLINE.stroke_width(1)))
                .map_err(draw_error)?;
        }

        root.present().map_err(draw_error)?;
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), RenderError> {
    fs::write(path, content).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{join_tables, IndicatorRow, IndicatorTable};
    use tempfile::tempdir;

    /// A(100, 80), B(50, 40) and C(0) without a life expectancy row.
    fn three_marks(config: &ChartConfig) -> BubbleLayout {
        let gdp = IndicatorTable::new(
            "country",
            vec!["2000".into()],
            vec![
                IndicatorRow::new("A").with_value("2000", 100.0),
                IndicatorRow::new("B").with_value("2000", 50.0),
                IndicatorRow::new("C").with_value("2000", 0.0),
            ],
        );
        let life = IndicatorTable::new(
            "country",
            vec!["2000".into()],
            vec![
                IndicatorRow::new("A").with_value("2000", 80.0),
                IndicatorRow::new("B").with_value("2000", 40.0),
            ],
        );
        let records = join_tables(&gdp, &life);
        BubbleLayout::compute(&records, config)
    }

    #[test]
    fn test_svg_has_fill_and_outline_per_mark() {
        let config = ChartConfig::default();
        let layout = three_marks(&config);
        let svg = ChartRenderer::render_svg(&layout, &config).unwrap();

        assert!(svg.contains("<svg") && svg.contains("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 2 * layout.marks.len());
        assert!(svg.to_ascii_lowercase().contains("#333333"));
        assert!(svg.contains(">GDP<"));
        assert!(svg.contains(">Life Expectancy<"));

        // Plot-area pixels shifted by the left/top margins
        assert!(svg.contains(r#"cx="1170" cy="20" r="50""#));
        assert!(svg.contains(r#"cx="610" cy="290" r="35""#));
    }

    #[test]
    fn test_write_creates_svg_and_html() {
        let dir = tempdir().unwrap();

        let svg_config = ChartConfig {
            output: dir.path().join("chart.svg"),
            ..ChartConfig::default()
        };
        let layout = three_marks(&svg_config);
        let path = ChartRenderer::write(&layout, &svg_config).unwrap();
        assert_eq!(path, svg_config.output);
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg") && svg.contains("</svg>"));
        assert!(!svg.contains("<script>"));

        let html_config = ChartConfig {
            output: dir.path().join("chart.html"),
            ..ChartConfig::default()
        };
        let path = ChartRenderer::write(&layout, &html_config).unwrap();
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<svg"));
        assert!(html.contains(r#"<div class="tooltip" id="tooltip"></div>"#));
        assert_eq!(html.matches("<circle").count(), 6);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let config = ChartConfig {
            output: dir.path().join("missing").join("chart.html"),
            ..ChartConfig::default()
        };
        let layout = three_marks(&config);
        let err = ChartRenderer::write(&layout, &config).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }

    #[test]
    fn test_output_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("chart.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::from_path(Path::new("chart.PNG")), OutputFormat::Png);
        assert_eq!(OutputFormat::from_path(Path::new("chart.html")), OutputFormat::Html);
        assert_eq!(OutputFormat::from_path(Path::new("chart")), OutputFormat::Html);
    }

    #[test]
    fn test_axis_bound_falls_back_for_degenerate_domains() {
        assert_eq!(axis_bound(42.0), 42.0);
        assert_eq!(axis_bound(0.0), 1.0);
        assert_eq!(axis_bound(-3.0), 1.0);
        assert_eq!(axis_bound(f64::NAN), 1.0);
        assert_eq!(axis_bound(f64::INFINITY), 1.0);
    }
}
