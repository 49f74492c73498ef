//! Software text surface
//!
//! Shapes text with cosmic-text and blits the glyph coverage into a tiny-skia
//! pixmap. Used by the CLI to produce a PNG of one overlay frame.

use std::path::Path;

use cosmic_text::{
    Attrs, Buffer, Color as TextColor, Family, FontSystem, Metrics, Shaping, SwashCache,
};
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};

use crate::error::RenderError;
use crate::surface::TextSurface;
use crate::utils::flip_y;

/// Line box height as a multiple of the font size
const LINE_SPACING: f32 = 1.2;

pub struct PixmapSurface {
    pixmap: Pixmap,
    font_system: FontSystem,
    swash_cache: SwashCache,
}

impl PixmapSurface {
    /// Transparent surface backed by the system font database
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        Self::with_font_system(width, height, FontSystem::new())
    }

    pub fn with_font_system(
        width: u32,
        height: u32,
        font_system: FontSystem,
    ) -> Result<Self, RenderError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidSize { width, height })?;
        tracing::debug!(width, height, "Pixmap surface created");
        Ok(Self {
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
        })
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))
    }

    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let bytes = self.encode_png()?;
        std::fs::write(path, bytes).map_err(|e| RenderError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    fn shape(&mut self, text: &str, font_size: f32) -> Buffer {
        let metrics = Metrics::new(font_size, font_size * LINE_SPACING);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        let attrs = Attrs::new().family(Family::SansSerif);
        buffer.set_size(&mut self.font_system, None, None);
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut self.font_system, false);
        buffer
    }
}

impl TextSurface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, font_size: f32, color: Color) {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        if !line_may_be_visible(text, x, y, font_size, width, height) {
            tracing::trace!(x, y, "Text origin off the pixmap, skipped");
            return;
        }
        let buffer = self.shape(text, font_size);

        // buffer coordinates start at the top of the first line box
        let ascent = buffer
            .layout_runs()
            .next()
            .map(|run| run.line_y)
            .unwrap_or(font_size);
        let origin_x = x.round() as i32;
        let origin_y = (flip_y(y, height) - ascent).round() as i32;

        let c = color.to_color_u8();
        let text_color = TextColor::rgba(c.red(), c.green(), c.blue(), c.alpha());
        let pixmap = &mut self.pixmap;
        buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            text_color,
            |gx, gy, w, h, glyph_color| {
                if glyph_color.a() == 0 {
                    return;
                }
                let Some(rect) = Rect::from_xywh(
                    origin_x.saturating_add(gx) as f32,
                    origin_y.saturating_add(gy) as f32,
                    w as f32,
                    h as f32,
                ) else {
                    return;
                };
                let mut paint = Paint::default();
                paint.set_color_rgba8(
                    glyph_color.r(),
                    glyph_color.g(),
                    glyph_color.b(),
                    glyph_color.a(),
                );
                paint.anti_alias = false;
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            },
        );
    }

    fn measure_text(&mut self, text: &str, font_size: f32) -> (f32, f32) {
        let buffer = self.shape(text, font_size);
        let line_height = buffer.metrics().line_height;
        let (width, lines) = buffer
            .layout_runs()
            .fold((0.0f32, 0usize), |(w, n), run| (w.max(run.line_w), n + 1));
        (width, lines as f32 * line_height)
    }

    fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }
}

/// Rough bounds check in host coordinates before shaping. Glyphs can reach
/// one line box around the baseline and at most one em per character to the
/// right of `x`.
fn line_may_be_visible(
    text: &str,
    x: f32,
    y: f32,
    font_size: f32,
    width: u32,
    height: u32,
) -> bool {
    if !x.is_finite() || !y.is_finite() {
        return false;
    }
    let margin = font_size * LINE_SPACING;
    let max_advance = text.chars().count() as f32 * font_size;
    x + max_advance >= -margin
        && x <= width as f32 + margin
        && y >= -margin
        && y <= height as f32 + margin
}
