//! Pointer-capture free-look accumulation.
//!
//! The chase camera accepts an extra yaw offset so the player can look
//! around without turning the car. That offset is fed by raw pointer
//! movement, but only while the render surface holds exclusive pointer
//! capture. This module models that as a two-state machine:
//!
//! - `Free` --click--> `Captured` (side effect: the host must request
//!   pointer capture on the render surface)
//! - `Captured` --capture lost--> `Free`
//!
//! Movement deltas accumulate into the yaw only in `Captured`. Capture
//! transitions arrive from system events asynchronously to the frame loop;
//! the host should feed them in before stepping the camera. Hosts are
//! responsible for removing their click/capture listeners when the surface
//! is torn down; this type holds no listener handles.

use crate::settings::LOOK_SENSITIVITY;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LookMode {
    Free,
    Captured,
}

/// Accumulated free-look yaw plus the capture state that gates it.
#[derive(Clone, Copy, Debug)]
pub struct FreeLook {
    mode: LookMode,
    yaw: f32,
    sensitivity: f32,
}

impl Default for FreeLook {
    fn default() -> Self {
        Self::new()
    }
}

impl FreeLook {
    pub fn new() -> Self {
        Self::with_sensitivity(LOOK_SENSITIVITY)
    }

    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            mode: LookMode::Free,
            yaw: 0.0,
            sensitivity,
        }
    }

    /// A click on the render surface. Returns `true` when the host should
    /// request exclusive pointer capture; already-captured clicks are no-ops.
    pub fn on_click(&mut self) -> bool {
        match self.mode {
            LookMode::Free => {
                self.mode = LookMode::Captured;
                true
            }
            LookMode::Captured => false,
        }
    }

    /// System-level capture-change notification. Losing capture always lands
    /// back in `Free`, however the capture was lost.
    pub fn on_capture_change(&mut self, captured: bool) {
        self.mode = if captured {
            LookMode::Captured
        } else {
            LookMode::Free
        };
    }

    /// Horizontal pointer movement in pixels. Ignored unless captured.
    pub fn on_pointer_delta(&mut self, dx: f32) {
        if self.mode == LookMode::Captured {
            // Moving the pointer right swings the view right (negative yaw).
            self.yaw -= dx * self.sensitivity;
        }
    }

    /// Accumulated yaw offset (radians), fed to the chase camera each frame.
    #[inline]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        self.mode == LookMode::Captured
    }
}
