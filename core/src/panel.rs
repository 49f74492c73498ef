//! Side panel display model
//!
//! Computes what the "Show Weights" panel lists for the current selection,
//! independent of any UI toolkit. The host turns this into widgets; the
//! per-vertex [`AssignRequest`] is what its "Assign Weights" button sends
//! back to [`crate::operators::assign_weights`].

use std::collections::BTreeMap;

use vgw_types::PanelSettings;
use vgw_types::formatting::{self, NO_GROUPS};

use crate::mesh::EditMesh;

/// One editable weight row of a vertex box
#[derive(Debug, Clone, PartialEq)]
pub struct WeightRow {
    pub group_index: u32,
    pub group_name: String,
    pub weight: f32,
    /// Locked groups are displayed without the edit affordance
    pub locked: bool,
}

/// Typed payload of the bulk weight assignment for one vertex
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssignRequest {
    pub vertex_index: u32,
    /// New weight per group index
    pub weights: BTreeMap<u32, f32>,
}

/// Box listing the groups of one vertex
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBox {
    pub vertex_index: u32,
    pub header: String,
    /// Empty when the vertex belongs to no group
    pub rows: Vec<WeightRow>,
}

impl VertexBox {
    pub fn has_groups(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Request that rewrites every listed weight with its current value,
    /// or `None` when there is nothing to assign
    pub fn assign_request(&self) -> Option<AssignRequest> {
        if self.rows.is_empty() {
            return None;
        }
        Some(AssignRequest {
            vertex_index: self.vertex_index,
            weights: self.rows.iter().map(|r| (r.group_index, r.weight)).collect(),
        })
    }

    /// Plain-text rendering of the box, one entry per label
    pub fn labels(&self, precision: usize) -> Vec<String> {
        let mut labels = vec![self.header.clone()];
        if self.rows.is_empty() {
            labels.push(format!("    {}", NO_GROUPS));
        }
        for row in &self.rows {
            let line = formatting::weight_line(&row.group_name, row.weight, precision);
            if row.locked {
                labels.push(format!("{} (locked)", line));
            } else {
                labels.push(line);
            }
        }
        labels
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelBody {
    /// The object has no vertex groups at all
    NoGroups,
    Groups {
        /// `None` renders as "No Active Vertex"
        active: Option<VertexBox>,
        /// Other selected vertices, only filled when `show_all_selected` is set
        others: Vec<VertexBox>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelModel {
    pub toggle_label: &'static str,
    pub body: PanelBody,
}

/// Build the box for one vertex, rows in deform-layer order
pub fn vertex_box(mesh: &EditMesh, vertex_index: u32) -> Option<VertexBox> {
    let vertex = mesh.vertex(vertex_index)?;
    let rows = vertex
        .deform
        .iter()
        .filter_map(|gw| {
            mesh.group(gw.group).map(|group| WeightRow {
                group_index: group.index,
                group_name: group.name.clone(),
                weight: gw.weight,
                locked: group.lock_weight,
            })
        })
        .collect();
    Some(VertexBox {
        vertex_index,
        header: formatting::vertex_header(vertex_index),
        rows,
    })
}

/// Compute the panel for the current mesh state
pub fn panel_model(mesh: &EditMesh, overlay_running: bool, settings: &PanelSettings) -> PanelModel {
    let toggle_label = formatting::toggle_label(overlay_running);
    if mesh.groups.is_empty() {
        return PanelModel {
            toggle_label,
            body: PanelBody::NoGroups,
        };
    }

    let active_index = mesh.active_vertex();
    let active = active_index.and_then(|i| vertex_box(mesh, i));

    let others = if settings.show_all_selected {
        mesh.selected_indices()
            .into_iter()
            .filter(|&i| Some(i) != active_index)
            .filter_map(|i| vertex_box(mesh, i))
            .collect()
    } else {
        Vec::new()
    };

    PanelModel {
        toggle_label,
        body: PanelBody::Groups { active, others },
    }
}

impl PanelModel {
    /// Plain-text rendering used by the CLI host
    pub fn to_lines(&self, precision: usize) -> Vec<String> {
        let mut lines = vec![format!("[{}]", self.toggle_label)];
        match &self.body {
            PanelBody::NoGroups => lines.push(NO_GROUPS.to_string()),
            PanelBody::Groups { active, others } => {
                match active {
                    Some(vbox) => {
                        lines.push("Active Vertex".to_string());
                        lines.extend(vbox.labels(precision));
                    }
                    None => lines.push("No Active Vertex".to_string()),
                }
                for vbox in others {
                    lines.push(String::new());
                    lines.extend(vbox.labels(precision));
                }
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Vertex;

    fn rigged_mesh() -> EditMesh {
        let mut mesh = EditMesh::new("Body");
        mesh.new_group("Head");
        mesh.new_group("Neck");
        mesh.groups[1].lock_weight = true;
        let mut v0 = Vertex::new(0, [0.0; 3]);
        v0.set_weight(1, 0.75);
        v0.set_weight(0, 0.25);
        mesh.push_vertex(v0);
        mesh.push_vertex(Vertex::new(1, [1.0, 0.0, 0.0]));
        mesh.push_vertex(Vertex::new(2, [2.0, 0.0, 0.0]));
        mesh
    }

    #[test]
    fn no_groups_on_object() {
        let mesh = EditMesh::new("Plane");
        let model = panel_model(&mesh, false, &PanelSettings::default());
        assert_eq!(model.body, PanelBody::NoGroups);
        assert_eq!(model.toggle_label, "Show Weights Overlay");
    }

    #[test]
    fn active_vertex_rows_follow_deform_order() {
        let mut mesh = rigged_mesh();
        mesh.select(0, true);
        let model = panel_model(&mesh, true, &PanelSettings::default());
        assert_eq!(model.toggle_label, "Hide Weights Overlay");

        let PanelBody::Groups { active: Some(vbox), others } = &model.body else {
            panic!("expected an active vertex box");
        };
        assert!(others.is_empty());
        let names: Vec<&str> = vbox.rows.iter().map(|r| r.group_name.as_str()).collect();
        assert_eq!(names, vec!["Neck", "Head"]);
        assert!(vbox.rows[0].locked);

        let request = vbox.assign_request().unwrap();
        assert_eq!(request.vertex_index, 0);
        assert_eq!(request.weights, BTreeMap::from([(0, 0.25), (1, 0.75)]));
    }

    #[test]
    fn no_active_vertex_in_face_mode() {
        let mut mesh = rigged_mesh();
        mesh.select(0, true);
        mesh.select_mode.face = true;
        let model = panel_model(&mesh, false, &PanelSettings::default());
        assert!(model.to_lines(3).contains(&"No Active Vertex".to_string()));
    }

    #[test]
    fn show_all_lists_other_selected_vertices() {
        let mut mesh = rigged_mesh();
        mesh.select(2, true);
        mesh.select(0, true);
        let settings = PanelSettings {
            show_all_selected: true,
        };
        let model = panel_model(&mesh, false, &settings);

        let PanelBody::Groups { active, others } = &model.body else {
            panic!("expected groups body");
        };
        assert_eq!(active.as_ref().unwrap().vertex_index, 0);
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].vertex_index, 2);
        assert!(!others[0].has_groups());
        assert!(others[0].assign_request().is_none());
        assert_eq!(others[0].labels(3), vec!["Vertex 2:", "    No Groups"]);
    }

    #[test]
    fn text_rendering_of_panel() {
        let mut mesh = rigged_mesh();
        mesh.select(0, true);
        let lines = panel_model(&mesh, false, &PanelSettings::default()).to_lines(3);
        assert_eq!(
            lines,
            vec![
                "[Show Weights Overlay]",
                "Active Vertex",
                "Vertex 0:",
                "Neck: 0.750 (locked)",
                "Head: 0.250",
            ]
        );
    }
}
