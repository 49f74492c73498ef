//! Overlay display model
//!
//! Turns a snapshot into positioned text lines. Kept free of any drawing
//! so the layout can be checked without a renderer.

use vgw_types::formatting::{self, NO_GROUPS};
use vgw_types::{OverlayStyle, Rgb};

use crate::host::HostContext;
use crate::mesh::VertexGroup;
use crate::snapshot::{Snapshot, overlay_applicable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// `Vertex <index>:`
    Header,
    /// `<group>: <weight>`
    Weight,
    /// Fallback for vertices without group lines
    NoGroups,
}

/// One text line at a region position (y-up, baseline)
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    pub kind: LineKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub color: Rgb,
}

/// Lay out the text blocks for every vertex in the snapshot.
///
/// Group names are looked up in `groups` by index. Entries whose group no
/// longer exists are skipped; a vertex that ends up with no group line gets
/// a single "No Groups" line.
pub fn layout_lines(
    snapshot: &Snapshot,
    groups: &[VertexGroup],
    style: &OverlayStyle,
) -> Vec<OverlayLine> {
    let mut lines = Vec::new();

    for entry in &snapshot.vertices {
        let x = entry.screen_x as f32;
        let mut y = entry.screen_y as f32;
        lines.push(OverlayLine {
            kind: LineKind::Header,
            text: formatting::vertex_header(entry.vertex_index),
            x,
            y,
            color: entry.color,
        });

        let mut drew_group = false;
        for weight in snapshot.weights_for(entry.vertex_index) {
            let Some(group) = groups.iter().find(|g| g.index == weight.group_index) else {
                continue;
            };
            y -= style.line_height;
            lines.push(OverlayLine {
                kind: LineKind::Weight,
                text: formatting::weight_line(&group.name, weight.weight, style.weight_precision),
                x: x + style.indent,
                y,
                color: entry.color,
            });
            drew_group = true;
        }

        if !drew_group {
            lines.push(OverlayLine {
                kind: LineKind::NoGroups,
                text: NO_GROUPS.to_string(),
                x: x + style.indent,
                y: y - style.line_height,
                color: entry.color,
            });
        }
    }

    lines
}

/// Lines the renderer should draw this frame.
///
/// Empty outside mesh edit mode, without vertex groups, or when no snapshot
/// has been computed yet.
pub fn overlay_lines<H>(host: &H, style: &OverlayStyle) -> Vec<OverlayLine>
where
    H: HostContext + ?Sized,
{
    if !overlay_applicable(host) {
        return Vec::new();
    }
    let mesh = host.mesh();
    match mesh.snapshot() {
        Some(snapshot) if !snapshot.is_empty() => layout_lines(snapshot, &mesh.groups, style),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{InteractionMode, Region, Viewport};
    use crate::mesh::{EditMesh, Vertex};
    use crate::snapshot::{VertexSnapshotEntry, WeightEntry, compute_snapshot};

    fn entry(vertex_index: u32, x: i32, y: i32) -> VertexSnapshotEntry {
        VertexSnapshotEntry {
            vertex_index,
            is_active: false,
            screen_x: x,
            screen_y: y,
            color: Rgb::WHITE,
        }
    }

    fn groups(names: &[&str]) -> Vec<VertexGroup> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| VertexGroup {
                index: i as u32,
                name: name.to_string(),
                lock_weight: false,
            })
            .collect()
    }

    #[test]
    fn block_stacks_lines_below_header() {
        let snapshot = Snapshot {
            vertices: vec![entry(2, 100, 200)],
            weights: vec![
                WeightEntry { vertex_index: 2, group_index: 0, weight: 0.33333 },
                WeightEntry { vertex_index: 2, group_index: 1, weight: 1.0 },
            ],
        };
        let lines = layout_lines(&snapshot, &groups(&["Arm", "Hand"]), &OverlayStyle::default());

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].text, "Vertex 2:");
        assert_eq!((lines[0].x, lines[0].y), (100.0, 200.0));
        assert_eq!(lines[1].text, "Arm: 0.333");
        assert_eq!((lines[1].x, lines[1].y), (110.0, 187.0));
        assert_eq!(lines[2].text, "Hand: 1.000");
        assert_eq!((lines[2].x, lines[2].y), (110.0, 174.0));
    }

    #[test]
    fn vertex_without_weights_gets_no_groups_line() {
        let snapshot = Snapshot {
            vertices: vec![entry(4, 10, 50)],
            weights: vec![],
        };
        let lines = layout_lines(&snapshot, &groups(&["Arm"]), &OverlayStyle::default());
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Vertex 4:", "No Groups"]);
        assert_eq!(lines[1].kind, LineKind::NoGroups);
        assert_eq!((lines[1].x, lines[1].y), (20.0, 37.0));
    }

    #[test]
    fn deleted_group_is_skipped() {
        let snapshot = Snapshot {
            vertices: vec![entry(0, 0, 100)],
            weights: vec![
                WeightEntry { vertex_index: 0, group_index: 5, weight: 0.5 },
                WeightEntry { vertex_index: 0, group_index: 0, weight: 0.25 },
            ],
        };
        let lines = layout_lines(&snapshot, &groups(&["Arm"]), &OverlayStyle::default());
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Vertex 0:", "Arm: 0.250"]);
        assert_eq!(lines[1].y, 87.0);
    }

    #[test]
    fn rename_between_snapshot_and_render_is_visible() {
        let mut mesh = EditMesh::new("Cube");
        mesh.new_group("Head");
        let mut v = Vertex::new(0, [0.0; 3]);
        v.set_weight(0, 0.5);
        v.select = true;
        mesh.push_vertex(v);
        let mut vp = Viewport::new(mesh, Region::default());
        let style = OverlayStyle::default();

        compute_snapshot(&mut vp, &style);
        vp.mesh.rename_group(0, "Skull");

        let lines = overlay_lines(&vp, &style);
        assert_eq!(lines[1].text, "Skull: 0.500");
    }

    #[test]
    fn nothing_to_draw_without_snapshot_or_edit_mode() {
        let mut mesh = EditMesh::new("Cube");
        mesh.new_group("Head");
        mesh.push_vertex(Vertex::new(0, [0.0; 3]));
        mesh.select(0, true);
        let mut vp = Viewport::new(mesh, Region::default());
        let style = OverlayStyle::default();

        assert!(overlay_lines(&vp, &style).is_empty());

        compute_snapshot(&mut vp, &style);
        assert!(!overlay_lines(&vp, &style).is_empty());

        vp.mode = InteractionMode::Object;
        assert!(overlay_lines(&vp, &style).is_empty());
    }
}
