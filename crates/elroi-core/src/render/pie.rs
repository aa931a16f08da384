// File: crates/elroi-core/src/render/pie.rs
// Summary: Built-in pie drawer: one sector per layer, sized by the layer's total.

use tracing::{trace, warn};

use crate::graph::GraphState;
use crate::surface::{Fill, Primitive, Stroke};
use crate::theme::chrome;

use super::{Layer, SeriesRenderer};

pub struct PieRenderer;

impl SeriesRenderer for PieRenderer {
    fn render(&self, state: &GraphState, index: usize) -> Layer {
        let mut layer = Layer::new();
        let Some(series) = state.all_series.get(index) else {
            return layer;
        };

        let slices: Vec<f64> = series
            .series
            .iter()
            .map(|points| points.iter().filter_map(|p| p.value).filter(|v| *v > 0.0).sum())
            .collect();
        let total: f64 = slices.iter().sum();
        if total <= 0.0 {
            warn!(index, "pie series has no positive values; nothing drawn");
            return layer;
        }

        let plot = state.layout.plot_rect();
        let center = plot.center();
        let radius = plot.width().min(plot.height()) * 0.5;
        let color_offset = state.color_offset(index);

        let mut start_angle = 0.0f32;
        for (j, &value) in slices.iter().enumerate() {
            if value <= 0.0 { continue; }
            let sweep_angle = (value / total * 360.0) as f32;
            layer.push(Primitive::Sector {
                center,
                radius,
                start_angle,
                sweep_angle,
                fill: Fill::new(state.options.color(color_offset + j)),
                stroke: Some(Stroke::new(chrome::BACKGROUND, 1.0)),
            });
            start_angle += sweep_angle;
        }

        trace!(index, slices = layer.primitives.len(), "pie rendered");
        layer
    }
}
