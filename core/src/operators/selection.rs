//! Scoped edits of host state that must be undone on every exit path

use std::ops::{Deref, DerefMut};

use crate::host::ToolSettings;
use crate::mesh::{EditMesh, SelectionState};

/// Narrows the selection to one vertex for the lifetime of the guard.
///
/// The host's "assign to active group" and "remove from active group" act on
/// the whole selection, so the operators narrow it first. The saved selection,
/// including its history, is put back when the guard drops.
pub struct SelectionGuard<'a> {
    mesh: &'a mut EditMesh,
    saved: SelectionState,
}

impl<'a> SelectionGuard<'a> {
    pub fn narrow(mesh: &'a mut EditMesh, vertex_index: u32) -> Self {
        let saved = mesh.save_selection();
        for vertex in &mut mesh.vertices {
            vertex.select = vertex.index == vertex_index;
        }
        mesh.select_history = vec![vertex_index];
        Self { mesh, saved }
    }
}

impl Deref for SelectionGuard<'_> {
    type Target = EditMesh;

    fn deref(&self) -> &EditMesh {
        self.mesh
    }
}

impl DerefMut for SelectionGuard<'_> {
    fn deref_mut(&mut self) -> &mut EditMesh {
        self.mesh
    }
}

impl Drop for SelectionGuard<'_> {
    fn drop(&mut self) {
        self.mesh.restore_selection(&self.saved);
    }
}

/// Overrides the tool-settings group weight until dropped
pub struct ToolWeightOverride<'a> {
    tools: &'a mut ToolSettings,
    previous: f32,
}

impl<'a> ToolWeightOverride<'a> {
    pub fn force(tools: &'a mut ToolSettings, weight: f32) -> Self {
        let previous = tools.vertex_group_weight;
        tools.vertex_group_weight = weight;
        Self { tools, previous }
    }

    pub fn weight(&self) -> f32 {
        self.tools.vertex_group_weight
    }
}

impl Drop for ToolWeightOverride<'_> {
    fn drop(&mut self) {
        self.tools.vertex_group_weight = self.previous;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::mesh::Vertex;

    #[test]
    fn guard_restores_selection_and_history() {
        let mut mesh = EditMesh::new("Cube");
        for i in 0..4 {
            mesh.push_vertex(Vertex::new(i, [0.0; 3]));
        }
        mesh.select(1, true);
        mesh.select(3, true);

        {
            let guard = SelectionGuard::narrow(&mut mesh, 2);
            assert_eq!(guard.selected_indices(), BTreeSet::from([2]));
            assert_eq!(guard.active_vertex(), Some(2));
        }

        assert_eq!(mesh.selected_indices(), BTreeSet::from([1, 3]));
        assert_eq!(mesh.select_history, vec![1, 3]);
    }

    #[test]
    fn tool_weight_is_put_back() {
        let mut tools = ToolSettings {
            vertex_group_weight: 0.2,
        };
        {
            let forced = ToolWeightOverride::force(&mut tools, 1.0);
            assert_eq!(forced.weight(), 1.0);
        }
        assert_eq!(tools.vertex_group_weight, 0.2);
    }
}
