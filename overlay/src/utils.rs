//! Common helpers shared by the surfaces and the overlay

use tiny_skia::Color;
use vgw_types::Rgb;

/// Convert a theme color to an opaque tiny_skia color
#[inline]
pub fn color_from_rgb(rgb: Rgb) -> Color {
    color_from_rgba(rgb.to_rgba8(255))
}

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Host rows count from the bottom, pixmap rows from the top
#[inline]
pub fn flip_y(y: f32, height: u32) -> f32 {
    height as f32 - y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_color_is_opaque() {
        let c = color_from_rgb(Rgb::new(1.0, 0.5, 0.0)).to_color_u8();
        assert_eq!([c.red(), c.green(), c.blue(), c.alpha()], [255, 128, 0, 255]);
    }

    #[test]
    fn flip_maps_bottom_to_last_row() {
        assert_eq!(flip_y(0.0, 600), 600.0);
        assert_eq!(flip_y(600.0, 600), 0.0);
        assert_eq!(flip_y(187.0, 600), 413.0);
    }
}
