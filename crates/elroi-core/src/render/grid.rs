// File: crates/elroi-core/src/render/grid.rs
// Summary: Built-in grid drawer: horizontal gridlines, baseline, and x/y axis label overlays.

use tracing::trace;

use crate::geometry::{Point2, Rect};
use crate::graph::GraphState;
use crate::host::{ElementKind, Overlay};
use crate::options::{AxisType, LabelWidth, XAxisOptions, YAxisOptions};
use crate::scale::{linspace, BandScale};
use crate::surface::{Primitive, Stroke};
use crate::theme::chrome;

use super::{GridRenderer, Layer};

/// Approximate advance of one label character, in pixels.
const CHAR_WIDTH: f32 = 6.0;
const LABEL_GAP: f32 = 5.0;

pub struct DefaultGridRenderer;

impl GridRenderer for DefaultGridRenderer {
    fn render(&self, state: &GraphState) -> Layer {
        let options = &state.options;
        let plot = state.layout.plot_rect();
        let rows = options.grid.num_y_labels;
        let mut layer = Layer::new();

        if options.grid.show {
            // the bottom row is left to the baseline
            let ys = linspace(plot.top as f64, plot.bottom as f64, rows);
            let above_baseline = ys.split_last().map_or(&[][..], |(_, rest)| rest);
            for &y in above_baseline {
                layer.push(Primitive::Line {
                    from: Point2::new(plot.left, y as f32),
                    to: Point2::new(plot.right, y as f32),
                    stroke: Stroke::new(chrome::GRID, 1.0),
                });
            }
        }
        if options.grid.show_baseline {
            layer.push(Primitive::Line {
                from: Point2::new(plot.left, plot.bottom),
                to: Point2::new(plot.right, plot.bottom),
                stroke: Stroke::new(chrome::BASELINE, 1.0),
            });
        }

        let axes = &options.axes;
        if axes.y1.show {
            layer.overlay(y_labels(state, &axes.y1, rows, 0.0));
        }
        if axes.y2.show {
            layer.overlay(y_labels(state, &axes.y2, rows, plot.right + LABEL_GAP));
        }
        let line_height = state.layout.label_line_height;
        for (axis, row) in [(&axes.x1, 0.0), (&axes.x2, 1.0)] {
            if !axis.show { continue; }
            if let Some(overlay) = x_labels(state, axis, plot, plot.bottom + LABEL_GAP + row * line_height) {
                layer.overlay(overlay);
            }
        }

        trace!(primitives = layer.primitives.len(), overlays = layer.overlays.len(), "grid rendered");
        layer
    }
}

/// Label text for a y value, trimmed of useless decimals.
pub fn format_value(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        let s = format!("{value:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn with_unit(value: &str, unit: &str, prefix: bool) -> String {
    match (unit.is_empty(), prefix) {
        (true, _) => value.to_string(),
        (false, true) => format!("{unit}{value}"),
        (false, false) => format!("{value} {unit}"),
    }
}

fn y_labels(state: &GraphState, axis: &YAxisOptions, rows: usize, x: f32) -> Overlay {
    let plot = state.layout.plot_rect();
    let scale = state.y_scale(axis.series_index);
    let values = linspace(scale.vmax, scale.vmin, rows);
    let half_line = state.layout.label_line_height * 0.5;

    let children = values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let unit = if i == 0 && !axis.top_unit.is_empty() { &axis.top_unit } else { &axis.unit };
            let text = with_unit(&format_value(v), unit, axis.prefix_unit);
            Overlay::new(ElementKind::AxisLabel, Point2::new(x, scale.to_px(v) - half_line), text)
        })
        .collect();

    Overlay::new(ElementKind::AxisLabels, Point2::new(x, plot.top), axis.id.clone()).with_children(children)
}

fn x_labels(state: &GraphState, axis: &XAxisOptions, plot: Rect, y: f32) -> Option<Overlay> {
    let texts: Vec<Option<String>> = if !axis.labels.is_empty() {
        axis.labels.iter().cloned().map(Some).collect()
    } else if let Some(custom) = &axis.custom_x_label {
        let center = plot.center().x;
        let label = Overlay::new(ElementKind::AxisLabel, Point2::new(center, y), custom.clone());
        return Some(Overlay::new(ElementKind::AxisLabels, Point2::new(plot.left, y), axis.id.clone()).with_children(vec![label]));
    } else {
        let layer = state.all_series.get(axis.series_index)?.series.first()?;
        layer
            .iter()
            .map(|p| match axis.axis_type {
                AxisType::Date => p.x_label(&state.options.label_date_format),
                AxisType::Text => p.label.clone(),
            })
            .collect()
    };
    if texts.iter().all(Option::is_none) {
        return None;
    }

    let count = texts.len().max(state.all_series.get(axis.series_index).map_or(0, |s| s.point_count()));
    let bands = BandScale::new(plot.left, plot.right, count);
    let label_width = match state.options.label_width {
        LabelWidth::Fixed(w) => w,
        LabelWidth::Auto => {
            let longest = texts.iter().flatten().map(|t| t.chars().count()).max().unwrap_or(0);
            longest as f32 * CHAR_WIDTH + LABEL_GAP
        }
    };
    // thin out labels that would overlap their neighbours
    let stride = (label_width / bands.band_width().max(1.0)).ceil().max(1.0) as usize;

    let children = texts
        .into_iter()
        .enumerate()
        .filter(|(i, _)| i % stride == 0)
        .filter_map(|(i, text)| text.map(|t| Overlay::new(ElementKind::AxisLabel, Point2::new(bands.center_px(i), y), t)))
        .collect();

    Some(Overlay::new(ElementKind::AxisLabels, Point2::new(plot.left, y), axis.id.clone()).with_children(children))
}
