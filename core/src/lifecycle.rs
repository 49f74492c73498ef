//! Overlay toggle and lifecycle
//!
//! The overlay is driven by one shared [`OverlayFlag`]. The controller flips
//! it from the toggle command; the frame loop and the controller's modal tick
//! poll it. Stopping is cooperative: toggling a running overlay only marks
//! it as stopping, and the next tick removes the draw callbacks.
//!
//! ```text
//! Inactive --toggle--> Active --toggle--> Stopping --tick--> Inactive
//!                         ^                  |
//!                         +-----toggle-------+
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::ContextError;
use crate::host::{AreaKind, CallbackHandle, CallbackRegistry, DrawStage, HostContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OverlayState {
    Inactive = 0,
    Active = 1,
    /// Stop requested, callbacks still registered until the next tick
    Stopping = 2,
}

impl OverlayState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => OverlayState::Active,
            2 => OverlayState::Stopping,
            _ => OverlayState::Inactive,
        }
    }
}

/// Shared handle to the overlay state.
///
/// Cloning yields another handle to the same value, so a render loop on a
/// separate thread observes toggles made by the controller.
#[derive(Debug, Clone, Default)]
pub struct OverlayFlag(Arc<AtomicU8>);

impl OverlayFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> OverlayState {
        OverlayState::from_u8(self.0.load(Ordering::Acquire))
    }

    fn set(&self, state: OverlayState) {
        self.0.store(state as u8, Ordering::Release);
    }

    pub fn is_active(&self) -> bool {
        self.get() == OverlayState::Active
    }
}

/// Result of the toggle command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleStatus {
    /// Callbacks installed, the modal loop is running
    Started,
    /// Stop requested; the next tick tears down
    StopRequested,
    /// A pending stop was withdrawn before teardown
    Resumed,
}

/// Result of one modal loop tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// Overlay running, let events through
    PassThrough,
    /// Teardown done, the loop ends
    Cancelled,
    /// No loop is running
    Idle,
}

#[derive(Debug, Clone, Copy)]
struct InstalledCallbacks {
    snapshot: CallbackHandle,
    draw: CallbackHandle,
}

/// Owns the overlay state and the installed draw callbacks of one viewport
#[derive(Debug, Default)]
pub struct OverlayController {
    flag: OverlayFlag,
    installed: Option<InstalledCallbacks>,
}

impl OverlayController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for the render side to poll
    pub fn flag(&self) -> OverlayFlag {
        self.flag.clone()
    }

    pub fn state(&self) -> OverlayState {
        self.flag.get()
    }

    /// Command availability: only in mesh edit mode
    pub fn poll<H: HostContext + ?Sized>(host: &H) -> bool {
        host.is_edit_mesh()
    }

    /// Start or stop the overlay.
    ///
    /// Fails without touching any state when not invoked from a 3D viewport
    /// in mesh edit mode.
    pub fn toggle<H>(&mut self, host: &mut H) -> Result<ToggleStatus, ContextError>
    where
        H: HostContext + CallbackRegistry + ?Sized,
    {
        if host.area() != AreaKind::View3D {
            tracing::warn!(area = ?host.area(), "{}", ContextError::ViewportNotFound);
            return Err(ContextError::ViewportNotFound);
        }
        if !Self::poll(&*host) {
            tracing::warn!(mode = ?host.mode(), "{}", ContextError::NotEditMode);
            return Err(ContextError::NotEditMode);
        }

        match self.state() {
            OverlayState::Inactive => {
                let snapshot = host.callback_add(DrawStage::PostView);
                let draw = host.callback_add(DrawStage::PostPixel);
                self.installed = Some(InstalledCallbacks { snapshot, draw });
                self.flag.set(OverlayState::Active);
                tracing::info!(mesh = %host.mesh().name, "Weights overlay started");
                Ok(ToggleStatus::Started)
            }
            OverlayState::Active => {
                self.flag.set(OverlayState::Stopping);
                host.mesh_mut().clear_snapshot();
                tracing::info!("Weights overlay stop requested");
                Ok(ToggleStatus::StopRequested)
            }
            OverlayState::Stopping => {
                self.flag.set(OverlayState::Active);
                tracing::info!("Weights overlay stop withdrawn");
                Ok(ToggleStatus::Resumed)
            }
        }
    }

    /// One tick of the modal loop. Requests a redraw while running and
    /// finishes a pending stop.
    pub fn tick<H>(&mut self, host: &mut H) -> LoopStatus
    where
        H: HostContext + CallbackRegistry + ?Sized,
    {
        match self.state() {
            OverlayState::Inactive => LoopStatus::Idle,
            OverlayState::Active => {
                host.tag_redraw();
                LoopStatus::PassThrough
            }
            OverlayState::Stopping => {
                host.tag_redraw();
                self.teardown(host);
                LoopStatus::Cancelled
            }
        }
    }

    /// Immediate teardown, used when the add-on is unloaded. Safe to call in
    /// any state and any number of times.
    pub fn shutdown<H>(&mut self, host: &mut H) -> bool
    where
        H: HostContext + CallbackRegistry + ?Sized,
    {
        let was_running = self.state() != OverlayState::Inactive || self.installed.is_some();
        self.teardown(host);
        was_running
    }

    fn teardown<H>(&mut self, host: &mut H)
    where
        H: HostContext + CallbackRegistry + ?Sized,
    {
        if let Some(installed) = self.installed.take() {
            host.callback_remove(installed.snapshot);
            host.callback_remove(installed.draw);
            tracing::info!("Weights overlay stopped");
        }
        host.mesh_mut().clear_snapshot();
        self.flag.set(OverlayState::Inactive);
    }
}
