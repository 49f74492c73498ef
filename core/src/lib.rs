//! Vertex group weights overlay: snapshot builder, display models, the
//! overlay lifecycle and the group membership operators.
//!
//! Everything here talks to the host through [`host::HostContext`] and
//! [`host::CallbackRegistry`]; drawing lives in `vgw-overlay`.

pub mod config;
pub mod display;
pub mod error;
pub mod host;
pub mod lifecycle;
pub mod mesh;
pub mod operators;
pub mod panel;
pub mod projection;
pub mod scene;
pub mod snapshot;

pub use display::{LineKind, OverlayLine, layout_lines, overlay_lines};
pub use error::{ConfigError, ContextError, MeshIndexError, OperatorError, ValidationError};
pub use host::{
    AreaKind, CallbackHandle, CallbackRegistry, DrawStage, HostContext, InteractionMode, Region,
    ToolSettings, Viewport,
};
pub use lifecycle::{LoopStatus, OverlayController, OverlayFlag, OverlayState, ToggleStatus};
pub use mesh::{EditMesh, GroupWeight, SelectMode, Vertex, VertexGroup};
pub use operators::{
    AddOutcome, GroupCandidate, GroupChoice, add_to_group, assign_weights, available_groups,
    remove_from_group,
};
pub use panel::{AssignRequest, PanelBody, PanelModel, VertexBox, WeightRow, panel_model};
pub use scene::Scene;
pub use snapshot::{Snapshot, VertexSnapshotEntry, WeightEntry, build_snapshot, compute_snapshot};
