//! Pixel buffer painting
//!
//! [`Frame`] wraps a softbuffer pixel slice with clipped drawing
//! primitives, [`CodeFont`] rasterizes the code font through fontdue and
//! caches glyphs, and [`FramePainter`] joins both into a [`Painter`] the
//! render pipeline can draw through.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use fontdue::{Font, FontSettings, LineMetrics, Metrics};

use super::Painter;
use crate::layout::{FontMetrics, Rect};
use crate::theme::Color;

/// Glyph cache key: character and font size bits
pub type GlyphCacheKey = (char, u32);
pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Dash and gap length of dashed outlines
const DASH_LENGTH: i32 = 2;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). Returns the blended color
/// with full opacity.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

// ============================================================================
// Frame
// ============================================================================

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

/// A frame buffer wrapper providing clipped drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds operations are clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clip: Option<ClipRect>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height the height is reduced to
    /// what the buffer holds.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let height = if width > 0 {
            height.min(buffer.len() / width)
        } else {
            0
        };
        Self {
            buffer,
            width,
            height,
            clip: None,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Constrain all following drawing to `rect`
    pub fn set_clip(&mut self, rect: Rect) {
        let (x0, y0, x1, y1) = self.bounds(rect);
        self.clip = Some(ClipRect { x0, y0, x1, y1 });
    }

    pub fn clear_clip(&mut self) {
        self.clip = None;
    }

    /// Pixel span of `rect` inside the frame, before clipping
    fn bounds(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let clamp_x = |x: i32| (x.max(0) as usize).min(self.width);
        let clamp_y = |y: i32| (y.max(0) as usize).min(self.height);
        (
            clamp_x(rect.x),
            clamp_y(rect.y),
            clamp_x(rect.right()),
            clamp_y(rect.bottom()),
        )
    }

    /// Pixel span of `rect` after the frame bounds and the clip
    fn clipped(&self, rect: Rect) -> (usize, usize, usize, usize) {
        let (x0, y0, x1, y1) = self.bounds(rect);
        match self.clip {
            Some(c) => (x0.max(c.x0), y0.max(c.y0), x1.min(c.x1), y1.min(c.y1)),
            None => (x0, y0, x1, y1),
        }
    }

    #[inline]
    fn in_clip(&self, x: usize, y: usize) -> bool {
        match self.clip {
            Some(c) => x >= c.x0 && x < c.x1 && y >= c.y0 && y < c.y1,
            None => x < self.width && y < self.height,
        }
    }

    /// Clear the entire buffer with a solid color, ignoring the clip
    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let (x0, y0, x1, y1) = self.clipped(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            self.buffer[row_start + x0..row_start + x1.max(x0)].fill(color);
        }
    }

    /// XOR the RGB channels of every pixel in `rect`
    pub fn xor_rect(&mut self, rect: Rect, color: u32) {
        let mask = color & 0x00FF_FFFF;
        let (x0, y0, x1, y1) = self.clipped(rect);
        for y in y0..y1 {
            let row_start = y * self.width;
            for x in x0..x1 {
                self.buffer[row_start + x] ^= mask;
            }
        }
    }

    /// 1px dashed outline on the inner edge of `rect`
    pub fn dashed_rect(&mut self, rect: Rect, color: u32) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        let dash = |offset: i32| (offset / DASH_LENGTH) % 2 == 0;
        for dx in 0..rect.width {
            if dash(dx) {
                self.set_pixel_i32(rect.x + dx, rect.y, color);
                self.set_pixel_i32(rect.x + dx, rect.bottom() - 1, color);
            }
        }
        for dy in 0..rect.height {
            if dash(dy) {
                self.set_pixel_i32(rect.x, rect.y + dy, color);
                self.set_pixel_i32(rect.right() - 1, rect.y + dy, color);
            }
        }
    }

    /// Set a single pixel (bounds-checked, respects clip rect)
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if self.in_clip(x, y) {
            self.buffer[y * self.width + x] = color;
        }
    }

    #[inline]
    fn set_pixel_i32(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, color);
        }
    }

    /// Get a single pixel (returns 0 if out of bounds)
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> u32 {
        if x < self.width && y < self.height {
            self.buffer[y * self.width + x]
        } else {
            0
        }
    }

    /// Blend a pixel with alpha (ARGB format, alpha in high byte)
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        self.cover_pixel(x as i32, y as i32, color, alpha);
    }

    /// Blend `color` onto a pixel with the given coverage
    #[inline]
    fn cover_pixel(&mut self, x: i32, y: i32, color: u32, coverage: f32) {
        if x < 0 || y < 0 || coverage <= 0.0 || !self.in_clip(x as usize, y as usize) {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.buffer[idx] = if coverage >= 1.0 {
            color | 0xFF000000
        } else {
            blend_colors(self.buffer[idx], color, coverage)
        };
    }
}

// ============================================================================
// Code font
// ============================================================================

/// The rasterized code font with its glyph cache
///
/// The cache sits behind a `RefCell` so the font can serve as
/// [`FontMetrics`] for the pipeline while a [`FramePainter`] draws with it.
pub struct CodeFont {
    font: Font,
    font_size: f32,
    line_metrics: LineMetrics,
    char_width: i32,
    glyph_cache: RefCell<GlyphCache>,
}

impl CodeFont {
    /// Parse a TrueType/OpenType font at `font_size` pixels
    pub fn from_bytes(data: &[u8], font_size: f32) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| anyhow::anyhow!("Failed to load font: {}", e))?;
        let line_metrics = font
            .horizontal_line_metrics(font_size)
            .context("Font missing horizontal line metrics")?;
        let char_width = font.metrics('w', font_size).advance_width.round() as i32;

        let font = Self {
            font,
            font_size,
            line_metrics,
            char_width,
            glyph_cache: RefCell::new(HashMap::new()),
        };
        if !font.is_monospace() {
            tracing::warn!("Font is not monospaced, preview characters are centered per cell");
        }
        Ok(font)
    }

    pub fn load(path: &Path, font_size: f32) -> Result<Self> {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read font {}", path.display()))?;
        Self::from_bytes(&data, font_size)
    }

    pub fn glyph_cache_size(&self) -> usize {
        self.glyph_cache.borrow().len()
    }

    /// Draw one glyph with its origin at `x` on `baseline`
    fn draw_glyph(&self, frame: &mut Frame, x: i32, baseline: i32, ch: char, color: u32) {
        let mut cache = self.glyph_cache.borrow_mut();
        let (metrics, bitmap) = cache
            .entry((ch, self.font_size.to_bits()))
            .or_insert_with(|| self.font.rasterize(ch, self.font_size));
        let glyph_top = baseline - metrics.height as i32 - metrics.ymin;
        for bitmap_y in 0..metrics.height {
            for bitmap_x in 0..metrics.width {
                let alpha = bitmap[bitmap_y * metrics.width + bitmap_x];
                if alpha > 0 {
                    frame.cover_pixel(
                        x + bitmap_x as i32 + metrics.xmin,
                        glyph_top + bitmap_y as i32,
                        color,
                        alpha as f32 / 255.0,
                    );
                }
            }
        }
    }
}

impl FontMetrics for CodeFont {
    fn char_width(&self) -> i32 {
        self.char_width
    }

    fn font_size(&self) -> i32 {
        self.font_size.round() as i32
    }

    fn font_height(&self) -> i32 {
        self.line_metrics.new_line_size.ceil() as i32
    }

    fn ascent(&self) -> i32 {
        self.line_metrics.ascent.ceil() as i32
    }

    fn advance(&self, ch: char) -> i32 {
        self.font.metrics(ch, self.font_size).advance_width.round() as i32
    }
}

// ============================================================================
// Painter adapter
// ============================================================================

/// [`Painter`] over a [`Frame`], drawing text with a [`CodeFont`]
pub struct FramePainter<'a, 'b> {
    frame: Frame<'a>,
    font: &'b CodeFont,
}

impl<'a, 'b> FramePainter<'a, 'b> {
    pub fn new(frame: Frame<'a>, font: &'b CodeFont) -> Self {
        Self { frame, font }
    }

    pub fn frame_mut(&mut self) -> &mut Frame<'a> {
        &mut self.frame
    }
}

impl Painter for FramePainter<'_, '_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.frame.fill_rect(rect, color.to_argb_u32());
    }

    fn draw_text(&mut self, x: i32, baseline: i32, text: &str, color: Color) {
        let pixel = color.to_argb_u32();
        let cell = self.font.char_width;
        for (i, ch) in text.chars().enumerate() {
            if ch != ' ' {
                self.font
                    .draw_glyph(&mut self.frame, x + i as i32 * cell, baseline, ch, pixel);
            }
        }
    }

    fn draw_char_centered(&mut self, x: i32, baseline: i32, cell_width: i32, ch: char, color: Color) {
        let offset = (cell_width - self.font.advance(ch)) / 2;
        self.font
            .draw_glyph(&mut self.frame, x + offset, baseline, ch, color.to_argb_u32());
    }

    fn xor_rect(&mut self, rect: Rect, color: Color) {
        self.frame.xor_rect(rect, color.to_argb_u32());
    }

    fn draw_dashed_rect(&mut self, rect: Rect, color: Color) {
        self.frame.dashed_rect(rect, color.to_argb_u32());
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        match clip {
            Some(rect) => self.frame.set_clip(rect),
            None => self.frame.clear_clip(),
        }
    }
}
