// File: crates/elroi-core/src/types.rs
// Summary: Shared pixel types and constants (sizes, paddings, layout).

use crate::geometry::Rect;

/// Height of one line of axis label text, in pixels.
pub const LABEL_LINE_HEIGHT: f32 = 12.0;

/// Pixel size of an element or drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Space between the surface edge and the plot area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::new(15.0, 20.0, 18.0, 50.0)
    }
}

/// Resolved pixel layout of a graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
    pub label_line_height: f32,
}

impl Layout {
    pub fn new(size: Size, padding: Padding) -> Self {
        Self { width: size.width, height: size.height, padding, label_line_height: LABEL_LINE_HEIGHT }
    }

    /// The rectangle series are drawn into. Never inverted, even for tiny surfaces.
    pub fn plot_rect(&self) -> Rect {
        let left = self.padding.left;
        let top = self.padding.top;
        let right = (self.width - self.padding.right).max(left);
        let bottom = (self.height - self.padding.bottom).max(top);
        Rect::from_ltrb(left, top, right, bottom)
    }
}
