//! Text rendering for the vertex group weights overlay
//!
//! [`frame::FrameDriver`] runs the snapshot and draw stages of one redraw;
//! [`renderer::PixmapSurface`] rasterizes into a pixmap and
//! [`surface::RecordingSurface`] records draw calls for tests.

pub mod error;
pub mod frame;
pub mod renderer;
pub mod surface;
pub mod utils;
pub mod weights;
pub mod widgets;

pub use error::RenderError;
pub use frame::{FrameDriver, FrameReport};
pub use renderer::PixmapSurface;
pub use surface::{DrawCall, RecordingSurface, TextSurface};
pub use weights::{draw_lines, draw_overlay};
