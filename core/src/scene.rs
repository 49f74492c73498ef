//! TOML scene files
//!
//! A scene captures everything a [`Viewport`] needs: the view, the tool
//! settings and one edit mesh. The CLI loads a scene, runs an operator or a
//! frame against it and writes it back.
//!
//! ```toml
//! [view]
//! region = { width = 640, height = 480 }
//! theme_active = [1.0, 0.6, 0.2]
//! camera = { eye = [0.0, -6.0, 2.0], target = [0.0, 0.0, 0.0], fov_y_degrees = 50.0 }
//!
//! [mesh]
//! name = "Cube"
//! groups = [{ index = 0, name = "Head" }]
//!
//! [[mesh.vertices]]
//! index = 5
//! co = [1.0, 1.0, 1.0]
//! select = true
//! deform = [{ group = 0, weight = 0.5 }]
//! ```

use std::path::Path;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use vgw_types::Rgb;

use crate::config::{load_toml, save_toml};
use crate::error::ConfigError;
use crate::host::{AreaKind, InteractionMode, Region, ToolSettings, Viewport};
use crate::mesh::EditMesh;

/// Row-major 4x4 matrix as written in scene files
pub type RowMatrix = [[f32; 4]; 4];

const IDENTITY_ROWS: RowMatrix = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

pub fn mat4_from_rows(rows: &RowMatrix) -> Mat4 {
    Mat4::from_cols_array_2d(rows).transpose()
}

pub fn mat4_to_rows(m: Mat4) -> RowMatrix {
    m.transpose().to_cols_array_2d()
}

/// Look-at camera, an alternative to spelling out the perspective matrix.
/// Z is up, as in the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov_y_degrees: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

fn default_fov() -> f32 {
    50.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    1000.0
}

impl Camera {
    pub fn view_projection(&self, region: Region) -> Mat4 {
        let aspect = region.width as f32 / region.height.max(1) as f32;
        let proj =
            Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), aspect, self.near, self.far);
        let view = Mat4::look_at_rh(
            Vec3::from_array(self.eye),
            Vec3::from_array(self.target),
            Vec3::Z,
        );
        proj * view
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub mode: InteractionMode,
    pub area: AreaKind,
    pub theme_active: Rgb,
    /// Takes precedence over `perspective` when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<Camera>,
    pub perspective: RowMatrix,
    pub object_world: RowMatrix,
    pub region: Region,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            mode: InteractionMode::EditMesh,
            area: AreaKind::View3D,
            theme_active: Rgb::default(),
            camera: None,
            perspective: IDENTITY_ROWS,
            object_world: IDENTITY_ROWS,
            region: Region::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub view: ViewSettings,
    #[serde(default)]
    pub tool_settings: ToolSettings,
    pub mesh: EditMesh,
}

impl Scene {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut scene: Scene = load_toml(path)?;
        scene
            .mesh
            .check_indices()
            .map_err(|source| ConfigError::InvalidMesh {
                path: path.to_path_buf(),
                source,
            })?;
        scene.mesh.sync_select_history();
        tracing::debug!(
            path = %path.display(),
            mesh = %scene.mesh.name,
            vertices = scene.mesh.vertices.len(),
            groups = scene.mesh.groups.len(),
            "Loaded scene"
        );
        Ok(scene)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        save_toml(path, self)
    }

    pub fn into_viewport(self) -> Viewport {
        let view = self.view;
        let mut viewport = Viewport::new(self.mesh, view.region);
        viewport.mode = view.mode;
        viewport.area = view.area;
        viewport.theme_active = view.theme_active;
        viewport.tool_settings = self.tool_settings;
        viewport.object_world = mat4_from_rows(&view.object_world);
        viewport.perspective = match view.camera {
            Some(camera) => camera.view_projection(view.region),
            None => mat4_from_rows(&view.perspective),
        };
        viewport
    }

    /// Inverse of [`Scene::into_viewport`]. A camera, if any, is kept so the
    /// file stays editable; the perspective rows always hold the live matrix.
    pub fn from_viewport(viewport: &Viewport, camera: Option<Camera>) -> Self {
        Self {
            view: ViewSettings {
                mode: viewport.mode,
                area: viewport.area,
                theme_active: viewport.theme_active,
                camera,
                perspective: mat4_to_rows(viewport.perspective),
                object_world: mat4_to_rows(viewport.object_world),
                region: viewport.region,
            },
            tool_settings: viewport.tool_settings,
            mesh: viewport.mesh.clone(),
        }
    }
}
