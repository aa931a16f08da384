// File: crates/elroi-core/src/surface.rs
// Summary: Drawing-surface collaborator: vector primitives, the surface trait, and an in-memory surface.

use crate::geometry::{Point2, Rect};
use crate::theme::Color;
use crate::types::Size;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub opacity: f32,
}

impl Stroke {
    pub fn new(color: Color, width: f32) -> Self { Self { color, width, opacity: 1.0 } }
    pub fn with_opacity(mut self, opacity: f32) -> Self { self.opacity = opacity; self }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    pub color: Color,
    pub opacity: f32,
}

impl Fill {
    pub fn new(color: Color) -> Self { Self { color, opacity: 1.0 } }
    pub fn with_opacity(mut self, opacity: f32) -> Self { self.opacity = opacity; self }
}

/// One shape handed to the drawing surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Line { from: Point2, to: Point2, stroke: Stroke },
    /// Open polyline through `points`.
    Path { points: Vec<Point2>, stroke: Stroke },
    Rect { rect: Rect, fill: Fill, stroke: Option<Stroke> },
    Circle { center: Point2, radius: f32, fill: Fill, stroke: Option<Stroke> },
    /// Pie slice; angles in degrees, clockwise from 12 o'clock.
    Sector { center: Point2, radius: f32, start_angle: f32, sweep_angle: f32, fill: Fill, stroke: Option<Stroke> },
}

/// The vector-graphics surface a graph draws into. Rasterization is the implementor's job.
pub trait DrawingSurface {
    fn size(&self) -> Size;
    fn draw(&mut self, primitive: Primitive);
    /// Remove every primitive. The surface stays usable.
    fn clear(&mut self);
    fn primitive_count(&self) -> usize;
}

/// Surface that only records what was drawn.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: Size,
    primitives: Vec<Primitive>,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self { size, primitives: Vec::new() }
    }

    pub fn primitives(&self) -> &[Primitive] { &self.primitives }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Size { self.size }
    fn draw(&mut self, primitive: Primitive) { self.primitives.push(primitive); }
    fn clear(&mut self) { self.primitives.clear(); }
    fn primitive_count(&self) -> usize { self.primitives.len() }
}
