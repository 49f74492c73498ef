//! Per-frame snapshot builder
//!
//! Reads the edit mesh once per redraw, projects every selected, visible
//! vertex into region pixels and collects the weights it holds. The result
//! is stored on the mesh and consumed by the overlay renderer in the same
//! frame. Group names are deliberately not captured: the renderer resolves
//! them against the live group list.

use vgw_types::{OverlayStyle, Rgb};

use crate::host::HostContext;
use crate::projection::{combined_transform, project_to_region};

/// One selected, visible vertex placed on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexSnapshotEntry {
    pub vertex_index: u32,
    pub is_active: bool,
    pub screen_x: i32,
    pub screen_y: i32,
    pub color: Rgb,
}

/// A (vertex, group) membership captured for this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightEntry {
    pub vertex_index: u32,
    pub group_index: u32,
    pub weight: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    /// Sorted by vertex index
    pub vertices: Vec<VertexSnapshotEntry>,
    /// Grouped by vertex, in group-list order within a vertex
    pub weights: Vec<WeightEntry>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Weight entries captured for one vertex
    pub fn weights_for(&self, vertex_index: u32) -> impl Iterator<Item = &WeightEntry> {
        self.weights
            .iter()
            .filter(move |w| w.vertex_index == vertex_index)
    }
}

/// Whether the builder and renderer have anything to work on
pub fn overlay_applicable<H: HostContext + ?Sized>(host: &H) -> bool {
    host.is_edit_mesh() && !host.mesh().groups.is_empty()
}

/// Build a snapshot from the current host state.
///
/// Returns `None` outside mesh edit mode or when the object has no vertex
/// groups.
pub fn build_snapshot<H>(host: &H, style: &OverlayStyle) -> Option<Snapshot>
where
    H: HostContext + ?Sized,
{
    if !overlay_applicable(host) {
        return None;
    }

    let active_color = host.theme_active_color();
    let dim_color = active_color.scaled(style.inactive_dim);
    let region = host.region();
    let transform = combined_transform(host.perspective_matrix(), host.object_matrix());

    let mesh = host.mesh();
    let active_vertex = mesh.active_vertex();

    let mut selected: Vec<_> = mesh.vertices.iter().filter(|v| v.select && !v.hide).collect();
    selected.sort_by_key(|v| v.index);

    let mut snapshot = Snapshot::default();
    for vertex in selected {
        let Some(point) = project_to_region(
            &transform,
            vertex.position(),
            region,
            style.clip_behind_camera,
        ) else {
            continue;
        };

        let is_active = active_vertex == Some(vertex.index);
        snapshot.vertices.push(VertexSnapshotEntry {
            vertex_index: vertex.index,
            is_active,
            screen_x: point.x,
            screen_y: point.y,
            color: if is_active { active_color } else { dim_color },
        });

        for group in &mesh.groups {
            if let Some(weight) = vertex.weight(group.index) {
                snapshot.weights.push(WeightEntry {
                    vertex_index: vertex.index,
                    group_index: group.index,
                    weight,
                });
            }
        }
    }

    Some(snapshot)
}

/// Snapshot builder callback: rebuild and store the snapshot on the mesh.
///
/// When preconditions fail nothing is written, so a previous snapshot stays
/// in place until the next successful frame or an explicit clear.
pub fn compute_snapshot<H: HostContext + ?Sized>(host: &mut H, style: &OverlayStyle) -> bool {
    let Some(snapshot) = build_snapshot(host, style) else {
        tracing::trace!("Snapshot skipped, overlay not applicable");
        return false;
    };
    tracing::trace!(
        vertices = snapshot.vertices.len(),
        weights = snapshot.weights.len(),
        "Snapshot computed"
    );
    host.mesh_mut().store_snapshot(snapshot);
    true
}
