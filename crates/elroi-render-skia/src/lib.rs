// File: crates/elroi-render-skia/src/lib.rs
// Summary: Skia drawing surface. Records primitives like any surface and rasterizes them to PNG on demand.

use std::path::Path;

use anyhow::Result;
use elroi_core::theme::{chrome, Color};
use elroi_core::surface::{Fill, Stroke};
use elroi_core::{DrawingSurface, Primitive};
use elroi_core::types::Size;
use skia_safe as skia;
use tracing::debug;

/// Drawing surface backed by a Skia CPU raster.
///
/// Primitives are kept until `clear`; every export replays them onto a fresh raster,
/// so exporting twice yields the same pixels.
pub struct SkiaSurface {
    size: Size,
    pub background: Color,
    primitives: Vec<Primitive>,
}

impl SkiaSurface {
    pub fn new(size: Size) -> Self {
        Self { size, background: chrome::BACKGROUND, primitives: Vec::new() }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn primitives(&self) -> &[Primitive] { &self.primitives }

    /// Rasterize into PNG bytes.
    pub fn render_to_png_bytes(&self) -> Result<Vec<u8>> {
        let width = (self.size.width.round() as i32).max(1);
        let height = (self.size.height.round() as i32).max(1);
        let mut surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
        let canvas = surface.canvas();

        canvas.clear(to_skia(self.background, 1.0));
        for primitive in &self.primitives {
            draw_primitive(canvas, primitive);
        }

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        debug!(width, height, primitives = self.primitives.len(), bytes = data.as_bytes().len(), "surface rasterized");
        Ok(data.as_bytes().to_vec())
    }

    /// Rasterize and write a PNG to `output_png_path`, creating parent directories.
    pub fn render_to_png(&self, output_png_path: impl AsRef<Path>) -> Result<()> {
        let bytes = self.render_to_png_bytes()?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }
}

impl DrawingSurface for SkiaSurface {
    fn size(&self) -> Size { self.size }

    fn draw(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    fn clear(&mut self) {
        self.primitives.clear();
    }

    fn primitive_count(&self) -> usize { self.primitives.len() }
}

// ---- helpers ----------------------------------------------------------------

fn to_skia(color: Color, opacity: f32) -> skia::Color {
    let alpha = (color.a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    skia::Color::from_argb(alpha, color.r, color.g, color.b)
}

fn stroke_paint(stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width);
    paint.set_color(to_skia(stroke.color, stroke.opacity));
    paint
}

fn fill_paint(fill: &Fill) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(to_skia(fill.color, fill.opacity));
    paint
}

fn draw_primitive(canvas: &skia::Canvas, primitive: &Primitive) {
    match primitive {
        Primitive::Line { from, to, stroke } => {
            canvas.draw_line((from.x, from.y), (to.x, to.y), &stroke_paint(stroke));
        }
        Primitive::Path { points, stroke } => {
            let Some((first, rest)) = points.split_first() else { return };
            let mut path = skia::Path::new();
            path.move_to((first.x, first.y));
            for p in rest {
                path.line_to((p.x, p.y));
            }
            canvas.draw_path(&path, &stroke_paint(stroke));
        }
        Primitive::Rect { rect, fill, stroke } => {
            let r = skia::Rect::from_ltrb(rect.left, rect.top, rect.right, rect.bottom);
            canvas.draw_rect(r, &fill_paint(fill));
            if let Some(stroke) = stroke {
                canvas.draw_rect(r, &stroke_paint(stroke));
            }
        }
        Primitive::Circle { center, radius, fill, stroke } => {
            canvas.draw_circle((center.x, center.y), *radius, &fill_paint(fill));
            if let Some(stroke) = stroke {
                canvas.draw_circle((center.x, center.y), *radius, &stroke_paint(stroke));
            }
        }
        Primitive::Sector { center, radius, start_angle, sweep_angle, fill, stroke } => {
            let oval = skia::Rect::from_ltrb(center.x - radius, center.y - radius, center.x + radius, center.y + radius);
            // Skia measures from 3 o'clock; sectors are measured from 12 o'clock
            let start = start_angle - 90.0;
            canvas.draw_arc(oval, start, *sweep_angle, true, &fill_paint(fill));
            if let Some(stroke) = stroke {
                canvas.draw_arc(oval, start, *sweep_angle, true, &stroke_paint(stroke));
            }
        }
    }
}
