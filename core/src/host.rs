//! Host boundary
//!
//! The overlay never owns the mesh, the view or the draw loop. It reads them
//! through [`HostContext`] and hooks into the frame through
//! [`CallbackRegistry`]. [`Viewport`] is a self-contained host used by the
//! CLI and by tests.

use glam::Mat4;
use serde::{Deserialize, Serialize};
use vgw_types::Rgb;

use crate::mesh::EditMesh;

/// Interaction mode of the active object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    EditMesh,
    Object,
    WeightPaint,
}

/// Kind of editor area the command was invoked from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaKind {
    #[default]
    #[serde(rename = "view_3d")]
    View3D,
    ImageEditor,
    Properties,
    Outliner,
}

/// Pixel size of the drawing region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn mid(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Scene-level tool settings touched by the group operators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Weight used when assigning selected vertices to a group
    pub vertex_group_weight: f32,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            vertex_group_weight: 1.0,
        }
    }
}

/// Everything the overlay reads from the host for one frame
pub trait HostContext {
    fn mode(&self) -> InteractionMode;

    fn area(&self) -> AreaKind;

    fn region(&self) -> Region;

    /// Combined view and projection matrix of the viewport
    fn perspective_matrix(&self) -> Mat4;

    /// World transform of the active object
    fn object_matrix(&self) -> Mat4;

    /// Theme color of the active edit-mesh element
    fn theme_active_color(&self) -> Rgb;

    fn mesh(&self) -> &EditMesh;

    fn mesh_mut(&mut self) -> &mut EditMesh;

    /// Mesh and tool settings borrowed together, for operators touching both
    fn edit_parts(&mut self) -> (&mut EditMesh, &mut ToolSettings);

    fn is_edit_mesh(&self) -> bool {
        self.mode() == InteractionMode::EditMesh
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw callbacks
// ─────────────────────────────────────────────────────────────────────────────

/// Point of the frame at which a callback runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawStage {
    /// After the 3D scene, with view matrices valid (snapshot builder)
    PostView,
    /// After everything, in pixel space (text overlay)
    PostPixel,
}

/// Opaque handle returned when registering a draw callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackHandle(pub u64);

/// The host's per-region callback list
pub trait CallbackRegistry {
    fn callback_add(&mut self, stage: DrawStage) -> CallbackHandle;

    /// Returns `false` if the handle was not registered
    fn callback_remove(&mut self, handle: CallbackHandle) -> bool;

    fn has_callback(&self, stage: DrawStage) -> bool;

    /// Ask the host to redraw the area on the next tick
    fn tag_redraw(&mut self);
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory host
// ─────────────────────────────────────────────────────────────────────────────

/// A single 3D viewport with one edit mesh
#[derive(Debug, Clone)]
pub struct Viewport {
    pub mode: InteractionMode,
    pub area: AreaKind,
    pub region: Region,
    pub perspective: Mat4,
    pub object_world: Mat4,
    pub theme_active: Rgb,
    pub tool_settings: ToolSettings,
    pub mesh: EditMesh,
    callbacks: Vec<(CallbackHandle, DrawStage)>,
    next_handle: u64,
    redraw_requested: bool,
}

impl Viewport {
    pub fn new(mesh: EditMesh, region: Region) -> Self {
        Self {
            mode: InteractionMode::EditMesh,
            area: AreaKind::View3D,
            region,
            perspective: Mat4::IDENTITY,
            object_world: Mat4::IDENTITY,
            theme_active: Rgb::default(),
            tool_settings: ToolSettings::default(),
            mesh,
            callbacks: Vec::new(),
            next_handle: 1,
            redraw_requested: false,
        }
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Take the pending redraw request, clearing it
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

impl HostContext for Viewport {
    fn mode(&self) -> InteractionMode {
        self.mode
    }

    fn area(&self) -> AreaKind {
        self.area
    }

    fn region(&self) -> Region {
        self.region
    }

    fn perspective_matrix(&self) -> Mat4 {
        self.perspective
    }

    fn object_matrix(&self) -> Mat4 {
        self.object_world
    }

    fn theme_active_color(&self) -> Rgb {
        self.theme_active
    }

    fn mesh(&self) -> &EditMesh {
        &self.mesh
    }

    fn mesh_mut(&mut self) -> &mut EditMesh {
        &mut self.mesh
    }

    fn edit_parts(&mut self) -> (&mut EditMesh, &mut ToolSettings) {
        (&mut self.mesh, &mut self.tool_settings)
    }
}

impl CallbackRegistry for Viewport {
    fn callback_add(&mut self, stage: DrawStage) -> CallbackHandle {
        let handle = CallbackHandle(self.next_handle);
        self.next_handle += 1;
        self.callbacks.push((handle, stage));
        tracing::debug!(handle = handle.0, ?stage, "Draw callback added");
        handle
    }

    fn callback_remove(&mut self, handle: CallbackHandle) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(h, _)| *h != handle);
        self.callbacks.len() != before
    }

    fn has_callback(&self, stage: DrawStage) -> bool {
        self.callbacks.iter().any(|(_, s)| *s == stage)
    }

    fn tag_redraw(&mut self) {
        self.redraw_requested = true;
    }
}
