//! Shared configuration types for the vertex group weights overlay
//!
//! These types are serialized to TOML (user config and scene files) and are
//! shared by the core, the overlay renderer and the CLI host.

pub mod formatting;

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Linear RGB color with channels in `0.0..=1.0`, as handed out by host themes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0.0, 0.0, 0.0]);
    pub const WHITE: Rgb = Rgb([1.0, 1.0, 1.0]);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    pub fn r(&self) -> f32 {
        self.0[0]
    }

    pub fn g(&self) -> f32 {
        self.0[1]
    }

    pub fn b(&self) -> f32 {
        self.0[2]
    }

    /// Multiply every channel by `factor`
    pub fn scaled(&self, factor: f32) -> Self {
        Self([self.0[0] * factor, self.0[1] * factor, self.0[2] * factor])
    }

    /// Convert to 8-bit RGBA, clamping each channel
    pub fn to_rgba8(&self, alpha: u8) -> [u8; 4] {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [c(self.0[0]), c(self.0[1]), c(self.0[2]), alpha]
    }
}

impl Default for Rgb {
    /// Default "active element" theme color of the edit-mesh view
    fn default() -> Self {
        Self([1.0, 1.0, 1.0])
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay style
// ─────────────────────────────────────────────────────────────────────────────

/// Drop shadow drawn behind every overlay label
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowStyle {
    /// Offset in host pixels (y-up), applied to the text position
    pub offset: [f32; 2],
    pub color: Rgb,
    pub alpha: u8,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            offset: [2.0, -2.0],
            color: Rgb::BLACK,
            alpha: 200,
        }
    }
}

/// Layout and color settings for the in-viewport weights overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub font_size: f32,
    /// Vertical distance between stacked lines of one vertex block
    pub line_height: f32,
    /// Horizontal indent of group lines relative to the vertex header
    pub indent: f32,
    pub shadow: ShadowStyle,
    /// Channel factor applied to the theme color for non-active vertices
    pub inactive_dim: f32,
    /// Decimal places used when printing weights
    pub weight_precision: usize,
    /// Drop vertices that project from behind the camera (w <= 0)
    pub clip_behind_camera: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            font_size: 13.0,
            line_height: 13.0,
            indent: 10.0,
            shadow: ShadowStyle::default(),
            inactive_dim: 0.85,
            weight_precision: 3,
            clip_behind_camera: true,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panel settings
// ─────────────────────────────────────────────────────────────────────────────

/// Settings of the side panel listing weights
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelSettings {
    /// List every selected vertex, not only the active one
    pub show_all_selected: bool,
}

/// Complete user configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub overlay: OverlayStyle,
    pub panel: PanelSettings,
}
