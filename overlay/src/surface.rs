//! Drawing target abstraction
//!
//! Overlay code only ever talks to a [`TextSurface`]. Positions are host
//! region coordinates: origin bottom-left, y up, `y` naming the text
//! baseline. Implementations translate to their own pixel space.

use tiny_skia::Color;

pub trait TextSurface {
    /// Pixel size of the drawing region
    fn size(&self) -> (u32, u32);

    /// Draw a single line of text with its baseline at `(x, y)`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color);

    /// Width and height of a single line of text
    fn measure_text(&mut self, text: &str, font_size: f32) -> (f32, f32);

    /// Reset to fully transparent
    fn clear(&mut self);
}

/// One recorded `draw_text` call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub rgba: [u8; 4],
}

/// Surface that records draw calls instead of rasterizing them
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    /// Advance per character used by `measure_text`, as a fraction of the font size
    char_advance: f32,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            char_advance: 0.6,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Texts in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.calls.iter().map(|c| c.text.as_str()).collect()
    }
}

impl TextSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        let c = color.to_color_u8();
        self.calls.push(DrawCall {
            text: text.to_string(),
            x,
            y,
            font_size,
            rgba: [c.red(), c.green(), c.blue(), c.alpha()],
        });
    }

    fn measure_text(&mut self, text: &str, font_size: f32) -> (f32, f32) {
        let width = text.chars().count() as f32 * font_size * self.char_advance;
        (width, font_size)
    }

    fn clear(&mut self) {
        self.calls.clear();
    }
}
