//! Bubble Layout
//! Turns joined records into positioned, sized and coloured marks.
//!
//! Coordinates are relative to the plot area (top-left corner of the inner
//! rectangle, margins excluded). Records with undefined values keep their
//! mark; its geometry is simply `NaN`.

use crate::charts::color::{ColorAssigner, PALETTE};
use crate::charts::scale::{max_value, LinearScale, SqrtScale};
use crate::config::ChartConfig;
use crate::data::JoinedRecord;
use plotters::style::RGBColor;

/// Lines shown when hovering a mark, as (label, value) pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub lines: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub entity: String,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    /// Index into [`PALETTE`].
    pub slot: usize,
    pub tooltip: Tooltip,
}

impl Mark {
    pub fn color(&self) -> RGBColor {
        PALETTE[self.slot % PALETTE.len()]
    }

    /// Pixel geometry as drawn: `NaN` lands on 0, radii never go negative.
    pub fn pixel(&self) -> (i32, i32, u32) {
        let r = if self.r > 0.0 { self.r.round() as u32 } else { 0 };
        (self.cx.round() as i32, self.cy.round() as i32, r)
    }
}

#[derive(Debug, Clone)]
pub struct BubbleLayout {
    pub plot_width: u32,
    pub plot_height: u32,
    pub x: LinearScale,
    pub y: LinearScale,
    pub radius: SqrtScale,
    pub marks: Vec<Mark>,
}

impl BubbleLayout {
    pub fn compute(records: &[JoinedRecord<'_>], config: &ChartConfig) -> Self {
        let year = config.year_column();
        let plot_width = config.plot_width();
        let plot_height = config.plot_height();

        let x_max = max_value(records.iter().map(|r| r.first_value(&year))).unwrap_or(f64::NAN);
        let y_max = max_value(records.iter().map(|r| r.second_value(&year))).unwrap_or(f64::NAN);

        let x = LinearScale::new((0.0, x_max), (0.0, plot_width as f64));
        let y = LinearScale::new((0.0, y_max), (plot_height as f64, 0.0));
        let radius = SqrtScale::new((0.0, x_max), (0.0, config.max_radius));

        let colors = ColorAssigner::new(config.color_mode);

        let marks = records
            .iter()
            .map(|record| {
                let first = record.first_value(&year);
                let second = record.second_value(&year);
                Mark {
                    entity: record.entity.to_string(),
                    cx: x.apply(first),
                    cy: y.apply(second),
                    r: radius.apply(first),
                    slot: colors.slot(record.entity),
                    tooltip: tooltip(record, config, first, second),
                }
            })
            .collect();

        Self {
            plot_width,
            plot_height,
            x,
            y,
            radius,
            marks,
        }
    }
}

/// Halves round towards positive infinity (-2.5 becomes -2).
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn tooltip(record: &JoinedRecord<'_>, config: &ChartConfig, first: f64, second: f64) -> Tooltip {
    let labels = &config.labels;
    let second_text = match record.second {
        Some(_) => format!("{} {}", second, labels.y_unit),
        None => "n/a".to_string(),
    };

    Tooltip {
        lines: vec![
            (labels.entity.clone(), record.entity.to_string()),
            (format!("{} {}", config.year, labels.y), second_text),
            (labels.x.clone(), format!("{}", round_half_up(first))),
        ],
    }
}
