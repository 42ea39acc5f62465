//! Rotated, staggered text tiling.
//!
//! The tile grid is laid out on a square canvas whose side is twice the
//! target's diagonal, so the rotated pattern still covers the whole target.
//! The grid origin is anchored on the diagonal of a fixed reference frame
//! instead of the target's own, which keeps the pattern at the same place
//! for every window size.
//!
//! Coordinates are integers and follow the usual C conversions: extents are
//! truncated toward zero and the diagonal is rounded half up.

use crate::config::{rounded_diagonal, WatermarkConfig};

/// Compositing operators used by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Over,
    /// Draw only where the destination already has content.
    Atop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Ink extents of a text run, in user space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtents {
    pub x_bearing: f64,
    pub y_bearing: f64,
    pub width: f64,
    pub height: f64,
    pub x_advance: f64,
    pub y_advance: f64,
}

/// Drawing primitives the tiling algorithm needs from a rendering context.
pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn set_operator(&mut self, op: Operator);
    fn move_to(&mut self, x: f64, y: f64);
    fn set_source_rgba(&mut self, red: f64, green: f64, blue: f64, alpha: f64);
    fn select_font_face(&mut self, family: &str, weight: FontWeight);
    fn set_font_size(&mut self, size: f64);
    fn rotate(&mut self, radians: f64);
    fn text_extents(&mut self, text: &str) -> TextExtents;
    fn show_text(&mut self, text: &str);
}

/// Where the text gets drawn for one target size.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayout {
    /// Rounded diagonal of the target surface.
    pub hypotenuse: i32,
    /// Side of the square working canvas (`2 * hypotenuse`).
    pub canvas_side: i32,
    /// Diagonal of the reference frame the origin is anchored on.
    pub reference_diagonal: i32,
    /// Text origins in drawing order, row by row.
    pub tiles: Vec<(i64, i64)>,
}

impl TileLayout {
    pub fn compute(config: &WatermarkConfig, extents: &TextExtents, width: i32, height: i32) -> Self {
        let hypotenuse = rounded_diagonal(width as i64, height as i64);
        let canvas_side = hypotenuse.saturating_mul(2);
        let reference_diagonal = config.reference_diagonal();
        let mut layout =
            TileLayout { hypotenuse, canvas_side, reference_diagonal, tiles: Vec::new() };

        let w = extents.width as i64;
        let h = extents.height as i64;
        let step_x = w + config.x_padding as i64;
        let step_y = h + config.y_padding as i64;
        if step_x <= 0 || step_y <= 0 {
            return layout;
        }

        let side = canvas_side as i64;
        let anchor = reference_diagonal as i64;
        let mut offset = (-(extents.width + config.x_padding as f64) / 2.0) as i64;
        let mut x = (-extents.x_bearing) as i64 - anchor;
        let mut y = (-extents.y_bearing) as i64 - anchor;

        while y + h <= side {
            while x + w <= side {
                layout.tiles.push((x, y));
                x += step_x;
            }
            y += step_y;
            // Every other row starts half a tile further right.
            x = (-extents.x_bearing - anchor as f64 + offset.max(0) as f64) as i64;
            offset = -offset;
        }

        layout
    }

    /// Number of rows drawn (distinct y values).
    pub fn rows(&self) -> usize {
        let mut rows = 0;
        let mut last = None;
        for &(_, y) in &self.tiles {
            if last != Some(y) {
                rows += 1;
                last = Some(y);
            }
        }
        rows
    }
}

/// The configured watermark, ready to be painted onto any canvas.
#[derive(Debug, Clone)]
pub struct Watermark {
    config: WatermarkConfig,
}

impl Watermark {
    pub fn new(config: WatermarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WatermarkConfig {
        &self.config
    }

    /// True when a `width` x `height` target is too small to be watermarked.
    pub fn too_small(&self, width: i32, height: i32) -> bool {
        width <= self.config.min_dimension || height <= self.config.min_dimension
    }

    /// Tile the watermark over a `width` x `height` target.
    ///
    /// The canvas state is saved before and restored after drawing, so the
    /// caller's operator, source, font and transform are left untouched.
    /// Returns `None` without touching the canvas when the target is too
    /// small or there is no text.
    pub fn paint<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        width: i32,
        height: i32,
    ) -> Option<TileLayout> {
        if self.too_small(width, height) || self.config.text.is_empty() {
            return None;
        }
        let cfg = &self.config;
        let [red, green, blue, alpha] = cfg.color;
        let weight = if cfg.bold { FontWeight::Bold } else { FontWeight::Normal };

        canvas.save();
        canvas.set_operator(Operator::Atop);
        canvas.move_to(0.0, 0.0);
        canvas.set_source_rgba(red, green, blue, alpha);
        canvas.select_font_face(&cfg.font_family, weight);
        canvas.set_font_size(cfg.font_size);
        canvas.rotate(cfg.angle_radians());

        let extents = canvas.text_extents(&cfg.text);
        let layout = TileLayout::compute(cfg, &extents, width, height);
        for &(x, y) in &layout.tiles {
            canvas.move_to(x as f64, y as f64);
            canvas.show_text(&cfg.text);
        }

        canvas.restore();
        Some(layout)
    }
}
