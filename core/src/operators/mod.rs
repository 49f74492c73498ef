//! Group membership operators
//!
//! Add a vertex to a group, remove it from one, or rewrite all of its weights
//! at once. Every operator validates its input against the current mesh
//! before touching anything, so a failed call leaves the mesh unchanged.

mod selection;

#[cfg(test)]
mod operator_tests;

pub use selection::{SelectionGuard, ToolWeightOverride};

use crate::error::{ContextError, OperatorError, ValidationError};
use crate::host::HostContext;
use crate::mesh::EditMesh;
use crate::panel::AssignRequest;

/// Label of the "create a new group" entry in the add menu
pub const NEW_GROUP_LABEL: &str = "New Vertex Group";

/// Base name for groups created from the add menu
pub const NEW_GROUP_NAME: &str = "Group";

/// Target of [`add_to_group`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupChoice {
    NewGroup,
    Existing(u32),
}

/// One entry of the add menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCandidate {
    pub choice: GroupChoice,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Assigned { group_index: u32 },
    /// The vertex was already in the group; nothing changed
    AlreadyMember { group_index: u32 },
}

fn require_edit_mode<H: HostContext + ?Sized>(host: &H) -> Result<(), OperatorError> {
    if !host.is_edit_mesh() {
        return Err(ContextError::NotEditMode.into());
    }
    Ok(())
}

fn require_vertex(mesh: &EditMesh, vertex_index: u32) -> Result<(), ValidationError> {
    match mesh.vertex(vertex_index) {
        Some(_) => Ok(()),
        None => Err(ValidationError::UnknownVertex(vertex_index)),
    }
}

fn require_group(mesh: &EditMesh, group_index: u32) -> Result<(), ValidationError> {
    match mesh.group(group_index) {
        Some(_) => Ok(()),
        None => Err(ValidationError::UnknownGroup(group_index)),
    }
}

/// Groups a vertex can be added to: the new-group entry first, then every
/// group it is not yet a member of, in group-list order.
pub fn available_groups(
    mesh: &EditMesh,
    vertex_index: u32,
) -> Result<Vec<GroupCandidate>, ValidationError> {
    let vertex = mesh
        .vertex(vertex_index)
        .ok_or(ValidationError::UnknownVertex(vertex_index))?;

    let mut candidates = vec![GroupCandidate {
        choice: GroupChoice::NewGroup,
        label: NEW_GROUP_LABEL.to_string(),
    }];
    candidates.extend(
        mesh.groups
            .iter()
            .filter(|g| !vertex.is_member(g.index))
            .map(|g| GroupCandidate {
                choice: GroupChoice::Existing(g.index),
                label: g.name.clone(),
            }),
    );
    Ok(candidates)
}

/// Add one vertex to a group with weight 1.0.
///
/// The selection is narrowed to the vertex and the tool weight forced to 1.0
/// while the host-side assignment runs; both are restored afterwards. The
/// target group becomes the active group.
pub fn add_to_group<H>(
    host: &mut H,
    vertex_index: u32,
    choice: GroupChoice,
) -> Result<AddOutcome, OperatorError>
where
    H: HostContext + ?Sized,
{
    require_edit_mode(host)?;
    let mesh = host.mesh();
    require_vertex(mesh, vertex_index)?;
    if let GroupChoice::Existing(group_index) = choice {
        require_group(mesh, group_index)?;
        if mesh.vertex(vertex_index).is_some_and(|v| v.is_member(group_index)) {
            tracing::debug!(vertex = vertex_index, group = group_index, "Already a member");
            return Ok(AddOutcome::AlreadyMember { group_index });
        }
    }

    let (mesh, tools) = host.edit_parts();
    let mut mesh = SelectionGuard::narrow(mesh, vertex_index);
    let tool_weight = ToolWeightOverride::force(tools, 1.0);

    let group_index = match choice {
        GroupChoice::NewGroup => mesh.new_group(NEW_GROUP_NAME),
        GroupChoice::Existing(index) => {
            mesh.set_active_group(index);
            index
        }
    };
    mesh.assign_selected_to_active_group(tool_weight.weight());

    tracing::info!(vertex = vertex_index, group = group_index, "Vertex added to group");
    Ok(AddOutcome::Assigned { group_index })
}

/// Remove one vertex from one group, leaving the selection as it was
pub fn remove_from_group<H>(
    host: &mut H,
    vertex_index: u32,
    group_index: u32,
) -> Result<(), OperatorError>
where
    H: HostContext + ?Sized,
{
    require_edit_mode(host)?;
    let mesh = host.mesh();
    require_vertex(mesh, vertex_index)?;
    require_group(mesh, group_index)?;
    if !mesh.vertex(vertex_index).is_some_and(|v| v.is_member(group_index)) {
        return Err(ValidationError::NotAMember {
            vertex: vertex_index,
            group: group_index,
        }
        .into());
    }

    let mut mesh = SelectionGuard::narrow(host.mesh_mut(), vertex_index);
    mesh.set_active_group(group_index);
    mesh.remove_selected_from_active_group();

    tracing::info!(vertex = vertex_index, group = group_index, "Vertex removed from group");
    Ok(())
}

/// Overwrite the weight of every group the vertex belongs to.
///
/// The request must carry exactly one weight in `0.0..=1.0` per membership.
/// Returns the number of weights written.
pub fn assign_weights<H>(host: &mut H, request: &AssignRequest) -> Result<usize, OperatorError>
where
    H: HostContext + ?Sized,
{
    require_edit_mode(host)?;
    validate_request(host.mesh(), request)?;

    let Some(vertex) = host.mesh_mut().vertex_mut(request.vertex_index) else {
        return Err(ValidationError::UnknownVertex(request.vertex_index).into());
    };
    let mut written = 0;
    for gw in &mut vertex.deform {
        if let Some(&weight) = request.weights.get(&gw.group) {
            gw.weight = weight;
            written += 1;
        }
    }

    tracing::info!(vertex = request.vertex_index, written, "Weights assigned");
    Ok(written)
}

fn validate_request(mesh: &EditMesh, request: &AssignRequest) -> Result<(), ValidationError> {
    let vertex = mesh
        .vertex(request.vertex_index)
        .ok_or(ValidationError::UnknownVertex(request.vertex_index))?;

    for (&group, &weight) in &request.weights {
        require_group(mesh, group)?;
        if !vertex.is_member(group) {
            return Err(ValidationError::NotAMember {
                vertex: vertex.index,
                group,
            });
        }
        if !(0.0..=1.0).contains(&weight) {
            return Err(ValidationError::WeightOutOfRange { group, weight });
        }
    }

    if let Some(missing) = vertex
        .deform
        .iter()
        .filter(|gw| mesh.group(gw.group).is_some())
        .find(|gw| !request.weights.contains_key(&gw.group))
    {
        return Err(ValidationError::MissingWeight {
            vertex: vertex.index,
            group: missing.group,
        });
    }
    Ok(())
}
