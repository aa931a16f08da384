// File: crates/elroi-core/src/render/lines.rs
// Summary: Built-in line drawer: one polyline per run of values, point markers, flags and point labels.

use tracing::trace;

use crate::geometry::Point2;
use crate::graph::GraphState;
use crate::helpers::interpolate_nulls;
use crate::host::{ElementKind, Overlay};
use crate::surface::{Fill, Primitive, Stroke};
use crate::theme::chrome;

use super::grid::format_value;
use super::{Layer, SeriesRenderer};

pub struct LineRenderer;

impl SeriesRenderer for LineRenderer {
    fn render(&self, state: &GraphState, index: usize) -> Layer {
        let mut layer = Layer::new();
        let (Some(series), Some(series_options)) = (state.all_series.get(index), state.series_options.get(index)) else {
            return layer;
        };
        let options = &state.options;
        let lines = &options.lines;
        let x = state.x_scale(index);
        let y = state.y_scale(index);
        let color_offset = state.color_offset(index);

        for (j, points) in series.series.iter().enumerate() {
            let color = options.color(color_offset + j);
            let values: Vec<Option<f64>> = if series_options.interpolate_nulls {
                interpolate_nulls(points)
            } else {
                points.iter().map(|p| p.value).collect()
            };
            let stroke = Stroke::new(color, lines.width).with_opacity(lines.opacity);

            // contiguous runs of values; a gap breaks the line
            let mut run: Vec<Point2> = Vec::new();
            for (i, v) in values.iter().enumerate() {
                match v {
                    Some(v) => run.push(Point2::new(x.center_px(i), y.to_px(*v))),
                    None => flush_run(&mut layer, &mut run, stroke),
                }
            }
            flush_run(&mut layer, &mut run, stroke);

            let draw_points = series_options.show_points && points.len() <= options.skip_point_threshold;
            for (i, (point, value)) in points.iter().zip(&values).enumerate() {
                let Some(value) = *value else { continue };
                let at = Point2::new(x.center_px(i), y.to_px(value));

                if draw_points {
                    let fill = if series_options.fill_points {
                        Fill::new(color).with_opacity(lines.fill_opacity)
                    } else {
                        Fill::new(chrome::POINT_FILL)
                    };
                    layer.push(Primitive::Circle {
                        center: at,
                        radius: lines.point_radius,
                        fill,
                        stroke: Some(Stroke::new(color, lines.point_stroke_width)),
                    });
                }
                if let Some(flag) = &point.point_flag {
                    let anchor = Point2::new(at.x, at.y - lines.point_radius - options.flag_offset);
                    layer.overlay(Overlay::new(ElementKind::PointFlag, anchor, flag.content()));
                }
                if series_options.label_points {
                    let text = format!("{}{}", format_value(value), series_options.point_label_units);
                    let anchor = Point2::new(at.x, at.y - lines.point_radius - state.layout.label_line_height);
                    layer.overlay(Overlay::new(ElementKind::PointLabel, anchor, text));
                }
            }
        }

        trace!(index, primitives = layer.primitives.len(), overlays = layer.overlays.len(), "line series rendered");
        layer
    }
}

fn flush_run(layer: &mut Layer, run: &mut Vec<Point2>, stroke: Stroke) {
    if run.len() >= 2 {
        layer.push(Primitive::Path { points: std::mem::take(run), stroke });
    } else {
        run.clear();
    }
}
