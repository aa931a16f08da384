// File: crates/elroi-core/src/chart.rs
// Summary: The chart handle: construction, draw dispatch, clear/update lifecycle, and pointer events.

use tracing::{debug, trace};

use crate::geometry::{clamp, Point2};
use crate::graph::{ElroiArgs, Graph};
use crate::host::Host;
use crate::render::Renderers;
use crate::series::{Series, SeriesTag};
use crate::surface::DrawingSurface;
use crate::tooltip::{format_tooltip, TooltipFormatter};
use crate::types::Size;

/// Pointer events delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to `(x, y)` in surface pixels.
    Move { x: f32, y: f32 },
    /// Pointer left the container.
    Leave,
}

/// Gap between the pointer and the tooltip, in pixels.
const TOOLTIP_OFFSET: f32 = 10.0;

/// Create a graph inside `args.container` and return its handle. Nothing is drawn yet.
pub fn elroi<H, S>(args: ElroiArgs, host: H, make_surface: impl FnOnce(Size) -> S) -> Elroi<H, S>
where
    H: Host,
    S: DrawingSurface,
{
    Elroi::new(args, host, make_surface)
}

pub struct Elroi<H: Host, S: DrawingSurface> {
    graph: Graph<H, S>,
    renderers: Renderers,
    formatter: TooltipFormatter,
}

impl<H: Host, S: DrawingSurface> Elroi<H, S> {
    pub fn new(args: ElroiArgs, host: H, make_surface: impl FnOnce(Size) -> S) -> Self {
        Self {
            graph: Graph::new(args, host, make_surface),
            renderers: Renderers::default(),
            formatter: Box::new(format_tooltip),
        }
    }

    /// Replace the drawers used by `draw`.
    pub fn with_renderers(mut self, renderers: Renderers) -> Self {
        self.renderers = renderers;
        self
    }

    pub fn with_tooltip_formatter(mut self, formatter: TooltipFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn graph(&self) -> &Graph<H, S> { &self.graph }
    pub fn graph_mut(&mut self) -> &mut Graph<H, S> { &mut self.graph }
    pub fn into_graph(self) -> Graph<H, S> { self.graph }

    /// Draw the error banner (if configured), the grid, and every series.
    ///
    /// Calling this twice without `clear` layers a second copy on top of the first.
    pub fn draw(&mut self) {
        if let Some(message) = self.graph.state.options.error_message.clone() {
            self.graph.show_error(&message);
        }

        if self.graph.state.all_series.is_empty() {
            // no series: draw the grid so an error banner isn't left floating alone
            let layer = self.renderers.grid.render(&self.graph.state);
            self.graph.commit(layer);
            debug!("drew empty graph");
            return;
        }

        let mut grid_drawn = false;
        for index in 0..self.graph.state.all_series.len() {
            let tag = self.graph.state.series_options[index].series_type.clone();

            if !grid_drawn && !tag.is_pie() {
                let layer = self.renderers.grid.render(&self.graph.state);
                self.graph.commit(layer);
                grid_drawn = true;
            }

            match tag {
                SeriesTag::Known(series_type) => {
                    let layer = self.renderers.for_type(series_type).render(&self.graph.state, index);
                    trace!(index, %series_type, primitives = layer.primitives.len(), "series drawn");
                    self.graph.commit(layer);
                }
                SeriesTag::Unknown(name) => {
                    debug!(index, series_type = %name, "skipping series with unknown type");
                }
            }
        }
        debug!(
            series = self.graph.state.all_series.len(),
            primitives = self.graph.surface().primitive_count(),
            "drew graph"
        );
    }

    /// Remove everything drawn; the surface and tooltip stay reusable.
    pub fn clear(&mut self) {
        self.graph.clear();
    }

    /// Replace the series data and redraw from scratch.
    ///
    /// Configuration is not re-merged and the surface keeps its size.
    pub fn update(&mut self, new_data: Vec<Series>) {
        self.clear();
        self.graph.state.set_series(new_data);
        self.draw();
    }

    /// Apply a host pointer event to the tooltip. The latest event fully decides its state.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Leave => self.graph.hide_tooltip(),
            PointerEvent::Move { x, y } => match self.tooltip_at(x, y) {
                Some((position, content)) => self.graph.show_tooltip(position, content),
                None => self.graph.hide_tooltip(),
            },
        }
    }

    fn tooltip_at(&self, x: f32, y: f32) -> Option<(Point2, String)> {
        let state = &self.graph.state;
        if !state.options.tooltip.show {
            return None;
        }
        let index = state.x_scale(state.options.axes.x1.series_index).index_at(x)?;
        let record = state.tooltips.get(index)?;

        let width = state.tooltip.width;
        let mut left = x + TOOLTIP_OFFSET;
        if left + width > state.layout.width {
            left = x - TOOLTIP_OFFSET - width;
        }
        let left = clamp(left, 0.0, (state.layout.width - width).max(0.0));
        Some((Point2::new(left, y), (self.formatter)(record)))
    }
}
