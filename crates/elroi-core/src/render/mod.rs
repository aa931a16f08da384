// File: crates/elroi-core/src/render/mod.rs
// Summary: Drawer traits, drawer output (`Layer`), and the injectable set of built-in drawers.

pub mod bars;
pub mod grid;
pub mod lines;
pub mod pie;

use crate::graph::GraphState;
use crate::host::Overlay;
use crate::series::SeriesType;
use crate::surface::Primitive;

pub use bars::StackedBarRenderer;
pub use grid::DefaultGridRenderer;
pub use lines::LineRenderer;
pub use pie::PieRenderer;

/// What one drawer produced: shapes for the surface and elements for the host.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layer {
    pub primitives: Vec<Primitive>,
    pub overlays: Vec<Overlay>,
}

impl Layer {
    pub fn new() -> Self { Self::default() }
    pub fn push(&mut self, primitive: Primitive) { self.primitives.push(primitive); }
    pub fn overlay(&mut self, overlay: Overlay) { self.overlays.push(overlay); }
    pub fn is_empty(&self) -> bool { self.primitives.is_empty() && self.overlays.is_empty() }
}

/// Draws gridlines, baseline and axis labels.
pub trait GridRenderer {
    fn render(&self, state: &GraphState) -> Layer;
}

/// Draws series group `index` of the graph.
pub trait SeriesRenderer {
    fn render(&self, state: &GraphState, index: usize) -> Layer;
}

/// The drawers a graph dispatches to, one per series type plus the grid.
pub struct Renderers {
    pub grid: Box<dyn GridRenderer>,
    pub line: Box<dyn SeriesRenderer>,
    pub stacked_bar: Box<dyn SeriesRenderer>,
    pub pie: Box<dyn SeriesRenderer>,
}

impl Default for Renderers {
    fn default() -> Self {
        Self {
            grid: Box::new(DefaultGridRenderer),
            line: Box::new(LineRenderer),
            stacked_bar: Box::new(StackedBarRenderer),
            pie: Box::new(PieRenderer),
        }
    }
}

impl Renderers {
    pub fn for_type(&self, series_type: SeriesType) -> &dyn SeriesRenderer {
        match series_type {
            SeriesType::Line => self.line.as_ref(),
            SeriesType::StackedBar => self.stacked_bar.as_ref(),
            SeriesType::Pie => self.pie.as_ref(),
        }
    }
}
