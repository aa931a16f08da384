// File: crates/elroi-core/src/scale.rs
// Summary: Pixel scales: value (Y) mapping, index band (X) mapping, and tick spacing.

/// `steps` evenly spaced values from `start` to `end` inclusive. A single step yields `[start]`.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => return Vec::new(),
        1 => return vec![start],
        _ => {}
    }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Vertical value scale mapping a data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new(top_px: f32, bottom_px: f32, vmin: f64, mut vmax: f64) -> Self {
        if (vmax - vmin).abs() < 1e-12 { vmax = vmin + 1.0; }
        Self { top_px, bottom_px, vmin, vmax }
    }
    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }
    /// Pixel position of the zero line, clamped into the plot.
    pub fn baseline_px(&self) -> f32 {
        // min/max instead of clamp: a NaN bound must not panic
        let zero = 0f64.max(self.vmin).min(self.vmax);
        self.to_px(zero)
    }
}

/// Horizontal scale dividing [left, right] into `count` equal bands, one per point index.
#[derive(Clone, Copy, Debug)]
pub struct BandScale {
    pub left_px: f32,
    pub right_px: f32,
    pub count: usize,
}

impl BandScale {
    pub fn new(left_px: f32, right_px: f32, count: usize) -> Self {
        Self { left_px, right_px, count: count.max(1) }
    }
    #[inline]
    pub fn band_width(&self) -> f32 {
        (self.right_px - self.left_px) / self.count as f32
    }
    /// Center of the band for point `index`.
    #[inline]
    pub fn center_px(&self, index: usize) -> f32 {
        self.left_px + self.band_width() * (index as f32 + 0.5)
    }
    /// Band index under pixel `px`, or `None` outside the scale.
    pub fn index_at(&self, px: f32) -> Option<usize> {
        if px < self.left_px || px >= self.right_px { return None; }
        let i = ((px - self.left_px) / self.band_width()) as usize;
        Some(i.min(self.count - 1))
    }
}
