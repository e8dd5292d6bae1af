//! Draw primitives the render pipeline paints through
//!
//! The pipeline never touches pixels directly. A platform adapter
//! implements [`Painter`]; [`Frame`](super::frame::Frame) does it for a
//! softbuffer pixel buffer and [`RecordingPainter`] captures the calls for
//! tests and benches.

use crate::layout::Rect;
use crate::theme::Color;

/// Drawing capability of the host surface
///
/// Coordinates are component pixels. Text baselines are absolute y values;
/// `draw_text` advances one grid cell per character.
pub trait Painter {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draws `text` starting at the cell whose left edge is `x`
    fn draw_text(&mut self, x: i32, baseline: i32, text: &str, color: Color);

    /// Draws `ch` centered in the cell `x..x + cell_width`
    fn draw_char_centered(&mut self, x: i32, baseline: i32, cell_width: i32, ch: char, color: Color);

    /// XORs every pixel of `rect` with `color`
    fn xor_rect(&mut self, rect: Rect, color: Color);

    /// 1px dashed outline just inside `rect`
    fn draw_dashed_rect(&mut self, rect: Rect, color: Color);

    /// Restricts all following calls to `clip`, or lifts the restriction
    fn set_clip(&mut self, clip: Option<Rect>);
}

/// A single recorded [`Painter`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    FillRect {
        rect: Rect,
        color: Color,
    },
    Text {
        x: i32,
        baseline: i32,
        text: String,
        color: Color,
    },
    CenteredChar {
        x: i32,
        baseline: i32,
        cell_width: i32,
        ch: char,
        color: Color,
    },
    XorRect {
        rect: Rect,
        color: Color,
    },
    DashedRect {
        rect: Rect,
        color: Color,
    },
    Clip(Option<Rect>),
}

/// Painter that stores every call instead of drawing
#[derive(Debug, Clone, Default)]
pub struct RecordingPainter {
    pub calls: Vec<DrawCall>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Text runs in call order, as `(text, color)`
    pub fn texts(&self) -> Vec<(&str, Color)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, color, .. } => Some((text.as_str(), *color)),
                _ => None,
            })
            .collect()
    }

    /// Text runs drawn on the line with `baseline`
    pub fn texts_at(&self, baseline: i32) -> Vec<(i32, &str)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text {
                    x,
                    baseline: b,
                    text,
                    ..
                } if *b == baseline => Some((*x, text.as_str())),
                _ => None,
            })
            .collect()
    }

    pub fn fills(&self) -> Vec<(Rect, Color)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    /// Fills with exactly `color`
    pub fn fills_with(&self, color: Color) -> Vec<Rect> {
        self.fills()
            .into_iter()
            .filter(|(_, c)| *c == color)
            .map(|(rect, _)| rect)
            .collect()
    }

    pub fn count(&self, matches: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|call| matches(call)).count()
    }
}

impl Painter for RecordingPainter {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::FillRect { rect, color });
    }

    fn draw_text(&mut self, x: i32, baseline: i32, text: &str, color: Color) {
        self.calls.push(DrawCall::Text {
            x,
            baseline,
            text: text.to_string(),
            color,
        });
    }

    fn draw_char_centered(&mut self, x: i32, baseline: i32, cell_width: i32, ch: char, color: Color) {
        self.calls.push(DrawCall::CenteredChar {
            x,
            baseline,
            cell_width,
            ch,
            color,
        });
    }

    fn xor_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::XorRect { rect, color });
    }

    fn draw_dashed_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(DrawCall::DashedRect { rect, color });
    }

    fn set_clip(&mut self, clip: Option<Rect>) {
        self.calls.push(DrawCall::Clip(clip));
    }
}
