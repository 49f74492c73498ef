//! Error types shared by the controller, the operators and config loading

use std::path::PathBuf;

use thiserror::Error;

/// The operator was invoked from a context it cannot run in
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("View3D not found, can't run operator")]
    ViewportNotFound,
    #[error("Operator requires mesh edit mode")]
    NotEditMode,
}

/// Operator input that does not match the current mesh
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Vertex {0} does not exist")]
    UnknownVertex(u32),
    #[error("Vertex group {0} does not exist")]
    UnknownGroup(u32),
    #[error("Vertex {vertex} is not a member of group {group}")]
    NotAMember { vertex: u32, group: u32 },
    #[error("No weight given for group {group} of vertex {vertex}")]
    MissingWeight { vertex: u32, group: u32 },
    #[error("Weight {weight} for group {group} is outside 0..=1")]
    WeightOutOfRange { group: u32, weight: f32 },
}

/// Failure of a group membership operator. The mesh is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperatorError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Group or vertex indices of a mesh that break the index invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshIndexError {
    #[error("Vertex group '{name}' at position {position} has index {index}")]
    GroupOutOfPlace {
        name: String,
        position: u32,
        index: u32,
    },
    #[error("Vertex index {0} is used more than once")]
    DuplicateVertex(u32),
}

/// Errors from loading or saving config and scene files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Failed to serialize {path}: {source}")]
    SerializeError {
        path: PathBuf,
        source: toml::ser::Error,
    },
    #[error("Invalid mesh in {path}: {source}")]
    InvalidMesh {
        path: PathBuf,
        source: MeshIndexError,
    },
}
