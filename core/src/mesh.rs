//! Edit-mesh model
//!
//! A plain in-memory stand-in for the host's edit mesh: vertices with their
//! deform weights, the object's vertex group list, the selection state and
//! the per-mesh slot holding the overlay snapshot.
//!
//! Deform weights are an ordered list of `(group, weight)` pairs per vertex.
//! Group indices are positions in the group list, so deleting a group shifts
//! every group after it.

use std::collections::BTreeSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::MeshIndexError;
use crate::snapshot::Snapshot;

/// A named, weighted subset of the mesh's vertices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexGroup {
    pub index: u32,
    pub name: String,
    /// Locked groups are shown read-only in the panel
    #[serde(default)]
    pub lock_weight: bool,
}

/// One deform-layer entry of a vertex
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupWeight {
    pub group: u32,
    pub weight: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub index: u32,
    /// Object-space position
    pub co: [f32; 3],
    #[serde(default)]
    pub select: bool,
    #[serde(default)]
    pub hide: bool,
    #[serde(default)]
    pub deform: Vec<GroupWeight>,
}

impl Vertex {
    pub fn new(index: u32, co: [f32; 3]) -> Self {
        Self {
            index,
            co,
            select: false,
            hide: false,
            deform: Vec::new(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.co)
    }

    /// Weight held in `group`, if the vertex is a member
    pub fn weight(&self, group: u32) -> Option<f32> {
        self.deform
            .iter()
            .find(|gw| gw.group == group)
            .map(|gw| gw.weight)
    }

    pub fn is_member(&self, group: u32) -> bool {
        self.weight(group).is_some()
    }

    /// Set the weight for `group`, adding the membership if missing
    pub fn set_weight(&mut self, group: u32, weight: f32) {
        match self.deform.iter_mut().find(|gw| gw.group == group) {
            Some(gw) => gw.weight = weight,
            None => self.deform.push(GroupWeight { group, weight }),
        }
    }

    /// Drop the membership in `group`. Returns whether it existed.
    pub fn remove_group(&mut self, group: u32) -> bool {
        let before = self.deform.len();
        self.deform.retain(|gw| gw.group != group);
        self.deform.len() != before
    }
}

/// Which element types are selectable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectMode {
    pub vertex: bool,
    pub edge: bool,
    pub face: bool,
}

impl SelectMode {
    pub const VERTEX: SelectMode = SelectMode {
        vertex: true,
        edge: false,
        face: false,
    };

    /// The active vertex is only meaningful in pure vertex-select mode
    pub fn is_vertex_only(&self) -> bool {
        self.vertex && !self.edge && !self.face
    }
}

impl Default for SelectMode {
    fn default() -> Self {
        Self::VERTEX
    }
}

/// Saved selection state, restorable with [`EditMesh::restore_selection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: BTreeSet<u32>,
    pub history: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditMesh {
    pub name: String,
    #[serde(default)]
    pub groups: Vec<VertexGroup>,
    #[serde(default)]
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub select_mode: SelectMode,
    /// Selection order, most recent last
    #[serde(default)]
    pub select_history: Vec<u32>,
    #[serde(default)]
    pub active_group_index: Option<u32>,
    /// Overlay snapshot annotation, alive only while the overlay runs
    #[serde(skip)]
    snapshot: Option<Snapshot>,
}

impl EditMesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Vertices
    // ─────────────────────────────────────────────────────────────────────────

    pub fn vertex(&self, index: u32) -> Option<&Vertex> {
        self.vertices.iter().find(|v| v.index == index)
    }

    pub fn vertex_mut(&mut self, index: u32) -> Option<&mut Vertex> {
        self.vertices.iter_mut().find(|v| v.index == index)
    }

    /// Add a vertex, replacing any vertex with the same index
    pub fn push_vertex(&mut self, vertex: Vertex) {
        self.vertices.retain(|v| v.index != vertex.index);
        if vertex.select {
            self.select_history.retain(|&i| i != vertex.index);
            self.select_history.push(vertex.index);
        }
        self.vertices.push(vertex);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────

    pub fn selected_indices(&self) -> BTreeSet<u32> {
        self.vertices
            .iter()
            .filter(|v| v.select)
            .map(|v| v.index)
            .collect()
    }

    /// Select or deselect a vertex, keeping the selection history in sync
    pub fn select(&mut self, index: u32, selected: bool) -> bool {
        let Some(vertex) = self.vertex_mut(index) else {
            return false;
        };
        vertex.select = selected;
        self.select_history.retain(|&i| i != index);
        if selected {
            self.select_history.push(index);
        }
        true
    }

    /// Most recently selected vertex, only in pure vertex-select mode
    pub fn active_vertex(&self) -> Option<u32> {
        if !self.select_mode.is_vertex_only() {
            return None;
        }
        self.select_history
            .last()
            .copied()
            .filter(|&i| self.vertex(i).is_some_and(|v| v.select))
    }

    /// Make the history agree with the select flags: stale entries are
    /// dropped, selected vertices missing from it are appended in list order.
    pub fn sync_select_history(&mut self) {
        let selected = self.selected_indices();
        self.select_history.retain(|i| selected.contains(i));
        for vertex in self.vertices.iter().filter(|v| v.select) {
            if !self.select_history.contains(&vertex.index) {
                self.select_history.push(vertex.index);
            }
        }
    }

    pub fn save_selection(&self) -> SelectionState {
        SelectionState {
            selected: self.selected_indices(),
            history: self.select_history.clone(),
        }
    }

    pub fn restore_selection(&mut self, state: &SelectionState) {
        for vertex in &mut self.vertices {
            vertex.select = state.selected.contains(&vertex.index);
        }
        self.select_history = state.history.clone();
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Vertex groups
    // ─────────────────────────────────────────────────────────────────────────

    pub fn group(&self, index: u32) -> Option<&VertexGroup> {
        self.groups.iter().find(|g| g.index == index)
    }

    pub fn group_by_name(&self, name: &str) -> Option<&VertexGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn set_active_group(&mut self, index: u32) -> bool {
        if self.group(index).is_none() {
            return false;
        }
        self.active_group_index = Some(index);
        true
    }

    /// Group indices must equal their list position and vertex indices must
    /// be unique. Meshes built through this API always hold; deserialized
    /// ones are checked before use.
    pub fn check_indices(&self) -> Result<(), MeshIndexError> {
        for (position, group) in self.groups.iter().enumerate() {
            if group.index as usize != position {
                return Err(MeshIndexError::GroupOutOfPlace {
                    name: group.name.clone(),
                    position: position as u32,
                    index: group.index,
                });
            }
        }
        let mut seen = BTreeSet::new();
        for vertex in &self.vertices {
            if !seen.insert(vertex.index) {
                return Err(MeshIndexError::DuplicateVertex(vertex.index));
            }
        }
        Ok(())
    }

    /// Create a group with a unique name (`Name`, `Name.001`, ...) and make it active
    pub fn new_group(&mut self, name: &str) -> u32 {
        let unique = self.unique_group_name(name);
        let index = self.groups.len() as u32;
        self.groups.push(VertexGroup {
            index,
            name: unique,
            lock_weight: false,
        });
        self.active_group_index = Some(index);
        index
    }

    fn unique_group_name(&self, base: &str) -> String {
        if self.group_by_name(base).is_none() {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{}.{:03}", base, n))
            .find(|candidate| self.group_by_name(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }

    pub fn rename_group(&mut self, index: u32, name: impl Into<String>) -> bool {
        match self.groups.iter_mut().find(|g| g.index == index) {
            Some(group) => {
                group.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Delete a group and its memberships; later groups move down one index
    pub fn delete_group(&mut self, index: u32) -> bool {
        let Some(pos) = self.groups.iter().position(|g| g.index == index) else {
            return false;
        };
        self.groups.remove(pos);
        for group in &mut self.groups {
            if group.index > index {
                group.index -= 1;
            }
        }
        for vertex in &mut self.vertices {
            vertex.remove_group(index);
            for gw in &mut vertex.deform {
                if gw.group > index {
                    gw.group -= 1;
                }
            }
        }
        self.active_group_index = match self.active_group_index {
            Some(active) if active == index => None,
            Some(active) if active > index => Some(active - 1),
            other => other,
        };
        true
    }

    /// Assign every selected vertex to the active group with `weight`.
    /// Returns the number of vertices touched.
    pub fn assign_selected_to_active_group(&mut self, weight: f32) -> usize {
        let Some(group) = self.active_group_index else {
            return 0;
        };
        let mut count = 0;
        for vertex in self.vertices.iter_mut().filter(|v| v.select) {
            vertex.set_weight(group, weight);
            count += 1;
        }
        count
    }

    /// Remove every selected vertex from the active group.
    /// Returns the number of memberships dropped.
    pub fn remove_selected_from_active_group(&mut self) -> usize {
        let Some(group) = self.active_group_index else {
            return 0;
        };
        self.vertices
            .iter_mut()
            .filter(|v| v.select)
            .filter(|v| v.is_member(group))
            .map(|v| v.remove_group(group))
            .filter(|&removed| removed)
            .count()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Snapshot annotation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn store_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
    }

    /// Drop the stored snapshot. Returns whether one was present.
    pub fn clear_snapshot(&mut self) -> bool {
        self.snapshot.take().is_some()
    }
}
