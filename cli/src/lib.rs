//! Command line host: loads a TOML scene into an in-memory viewport and runs
//! overlay frames or group operators against it.

pub mod commands;
pub mod logging;

use thiserror::Error;
use vgw_core::{ConfigError, ContextError, OperatorError};
use vgw_overlay::RenderError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Operator(#[from] OperatorError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("No active vertex, pass --vertex")]
    NoActiveVertex,
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}
