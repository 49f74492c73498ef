//! Text label with a drop shadow
//!
//! The shadow copy is drawn first at a fixed offset, the label on top, so
//! text stays readable over any viewport background.

use tiny_skia::Color;
use vgw_types::ShadowStyle;

use crate::surface::TextSurface;
use crate::utils::color_from_rgba;

#[derive(Debug, Clone)]
pub struct ShadowedLabel<'a> {
    pub text: &'a str,
    pub color: Color,
    pub font_size: f32,
}

impl<'a> ShadowedLabel<'a> {
    pub fn new(text: &'a str, color: Color, font_size: f32) -> Self {
        Self {
            text,
            color,
            font_size,
        }
    }

    /// Render at a baseline position in host coordinates (y-up)
    pub fn render(&self, surface: &mut dyn TextSurface, x: f32, y: f32, shadow: &ShadowStyle) {
        let [dx, dy] = shadow.offset;
        let shadow_color = color_from_rgba(shadow.color.to_rgba8(shadow.alpha));
        surface.draw_text(self.text, x + dx, y + dy, self.font_size, shadow_color);
        surface.draw_text(self.text, x, y, self.font_size, self.color);
    }
}
