//! Vertex group weights overlay
//!
//! Draws the laid-out lines of the current snapshot: a "Vertex N:" header
//! per selected vertex with its group weights stacked below.

use vgw_core::HostContext;
use vgw_core::display::{OverlayLine, overlay_lines};
use vgw_types::OverlayStyle;

use crate::surface::TextSurface;
use crate::utils::color_from_rgb;
use crate::widgets::ShadowedLabel;

/// Draw already laid-out lines. Lines whose text box misses the surface
/// entirely are culled. Returns the number of lines drawn.
pub fn draw_lines(
    surface: &mut dyn TextSurface,
    lines: &[OverlayLine],
    style: &OverlayStyle,
) -> usize {
    let mut drawn = 0;
    for line in lines {
        let text_size = surface.measure_text(&line.text, style.font_size);
        if !intersects_surface(line, text_size, surface.size()) {
            continue;
        }
        ShadowedLabel::new(&line.text, color_from_rgb(line.color), style.font_size).render(
            surface,
            line.x,
            line.y,
            &style.shadow,
        );
        drawn += 1;
    }
    if drawn < lines.len() {
        tracing::debug!(culled = lines.len() - drawn, "Overlay lines outside the region");
    }
    drawn
}

/// Baseline-anchored text box against the region, padded by one line height
fn intersects_surface(
    line: &OverlayLine,
    (w, h): (f32, f32),
    (width, height): (u32, u32),
) -> bool {
    line.x.is_finite()
        && line.y.is_finite()
        && line.x + w >= -h
        && line.x <= width as f32 + h
        && line.y + h >= -h
        && line.y - h <= height as f32 + h
}

/// Post-pixel draw callback: render the snapshot stored on the mesh.
///
/// Draws nothing outside mesh edit mode, without vertex groups or before
/// the first snapshot.
pub fn draw_overlay<H>(host: &H, style: &OverlayStyle, surface: &mut dyn TextSurface) -> usize
where
    H: HostContext + ?Sized,
{
    let lines = overlay_lines(host, style);
    if lines.is_empty() {
        return 0;
    }
    let drawn = draw_lines(surface, &lines, style);
    tracing::trace!(lines = drawn, "Weights overlay drawn");
    drawn
}

#[cfg(test)]
mod tests {
    use vgw_core::{EditMesh, Region, Vertex, Viewport, compute_snapshot};

    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn every_line_is_drawn_with_shadow() {
        let mut mesh = EditMesh::new("Cube");
        mesh.new_group("Arm");
        let mut v = Vertex::new(1, [0.0; 3]);
        v.set_weight(0, 0.33333);
        mesh.push_vertex(v);
        mesh.select(1, true);
        let mut vp = Viewport::new(mesh, Region::new(200, 100));
        let style = OverlayStyle::default();

        let mut surface = RecordingSurface::new(200, 100);
        assert_eq!(draw_overlay(&vp, &style, &mut surface), 0);
        assert!(surface.calls().is_empty());

        compute_snapshot(&mut vp, &style);
        assert_eq!(draw_overlay(&vp, &style, &mut surface), 2);
        assert_eq!(
            surface.texts(),
            vec!["Vertex 1:", "Vertex 1:", "Arm: 0.333", "Arm: 0.333"]
        );
    }

    #[test]
    fn vertices_projecting_far_outside_are_culled() {
        let mut mesh = EditMesh::new("Cube");
        mesh.new_group("Head");
        for (index, co) in [(0, [1.0, 0.0, 0.0]), (1, [0.0, 0.0, 0.0])] {
            let mut v = Vertex::new(index, co);
            v.set_weight(0, 1.0);
            mesh.push_vertex(v);
            mesh.select(index, true);
        }
        let mut vp = Viewport::new(mesh, Region::new(200, 100));
        // w just above zero: vertex 0 lands billions of pixels to the right
        vp.perspective.w_axis.w = 1e-9;
        let style = OverlayStyle::default();
        compute_snapshot(&mut vp, &style);

        let mut surface = RecordingSurface::new(200, 100);
        let drawn = draw_overlay(&vp, &style, &mut surface);

        // vertex 1 at the origin still lands on the region centre
        assert_eq!(drawn, 2);
        assert_eq!(
            surface.texts(),
            vec!["Vertex 1:", "Vertex 1:", "Head: 1.000", "Head: 1.000"]
        );
    }
}
