// File: crates/elroi-core/src/render/bars.rs
// Summary: Built-in stacked-bar drawer: per index, layers stacked from the baseline, with point flags.

use tracing::trace;

use crate::geometry::{Point2, Rect};
use crate::graph::GraphState;
use crate::host::{ElementKind, Overlay};
use crate::options::FlagPosition;
use crate::surface::{Fill, Primitive};

use super::{Layer, SeriesRenderer};

/// Share of a band a bar occupies.
const BAR_FILL_RATIO: f32 = 0.6;

pub struct StackedBarRenderer;

impl SeriesRenderer for StackedBarRenderer {
    fn render(&self, state: &GraphState, index: usize) -> Layer {
        let mut layer = Layer::new();
        let Some(series) = state.all_series.get(index) else {
            return layer;
        };
        let options = &state.options;
        let x = state.x_scale(index);
        let y = state.y_scale(index);
        let color_offset = state.color_offset(index);
        let bar_width = x.band_width() * BAR_FILL_RATIO;
        let baseline = y.baseline_px();

        for i in 0..series.point_count() {
            let left = x.center_px(i) - bar_width * 0.5;
            let mut stacked = 0.0;
            let mut flags = Vec::new();

            for (j, layer_points) in series.series.iter().enumerate() {
                let Some(point) = layer_points.get(i) else { continue };
                let value = point.value.unwrap_or(0.0);
                let bottom_px = y.to_px(stacked).min(baseline);
                stacked += value;
                let top_px = y.to_px(stacked);

                if value != 0.0 {
                    let rect = Rect::from_ltrb(left, top_px.min(bottom_px), left + bar_width, top_px.max(bottom_px));
                    layer.push(Primitive::Rect {
                        rect,
                        fill: Fill::new(options.color(color_offset + j)),
                        stroke: None,
                    });
                }
                if let Some(flag) = &point.point_flag {
                    let interior = Point2::new(x.center_px(i), (top_px + bottom_px) * 0.5);
                    flags.push((flag.content().to_string(), interior));
                }
            }

            let stack_top = y.to_px(stacked);
            for (content, interior) in flags {
                let anchor = match options.bars.flag_position {
                    FlagPosition::Exterior => Point2::new(interior.x, stack_top - options.flag_offset),
                    FlagPosition::Interior => interior,
                };
                layer.overlay(Overlay::new(ElementKind::PointFlag, anchor, content));
            }
        }

        trace!(index, primitives = layer.primitives.len(), overlays = layer.overlays.len(), "stacked bars rendered");
        layer
    }
}
