//! Per-frame driver
//!
//! Plays the host's redraw sequence against a surface: clear, run the
//! post-view stage (snapshot builder), then the post-pixel stage (text
//! overlay). A stage only runs while its callback is registered and the
//! overlay flag reads active, so a pending stop suppresses drawing before
//! the controller has removed the callbacks.

use vgw_core::snapshot::compute_snapshot;
use vgw_core::{CallbackRegistry, DrawStage, HostContext, OverlayFlag};
use vgw_types::OverlayStyle;

use crate::surface::TextSurface;
use crate::weights::draw_overlay;

/// What one frame did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub snapshot_built: bool,
    pub lines_drawn: usize,
}

pub struct FrameDriver {
    style: OverlayStyle,
    flag: OverlayFlag,
}

impl FrameDriver {
    pub fn new(style: OverlayStyle, flag: OverlayFlag) -> Self {
        Self { style, flag }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Run one redraw
    pub fn run_frame<H>(&self, host: &mut H, surface: &mut dyn TextSurface) -> FrameReport
    where
        H: HostContext + CallbackRegistry + ?Sized,
    {
        surface.clear();
        let mut report = FrameReport::default();
        if !self.flag.is_active() {
            return report;
        }

        if host.has_callback(DrawStage::PostView) {
            report.snapshot_built = compute_snapshot(host, &self.style);
        }
        if host.has_callback(DrawStage::PostPixel) {
            report.lines_drawn = draw_overlay(&*host, &self.style, surface);
        }

        tracing::debug!(
            snapshot = report.snapshot_built,
            lines = report.lines_drawn,
            "Frame rendered"
        );
        report
    }
}
