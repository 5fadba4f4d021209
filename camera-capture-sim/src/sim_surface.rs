use std::sync::Arc;

use parking_lot::Mutex;

use camera_capture_core::models::error::CaptureError;
use camera_capture_core::traits::display_surface::DisplaySurface;

/// Property flags of the simulated viewfinder window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceFlags {
    pub mirror: bool,
    pub visible: bool,
    pub flushed: bool,
}

/// Simulated viewfinder surface.
///
/// Property writes land in shared flags that `SimCamera::surface_flags`
/// exposes, so tests and the demo can observe how the session configured
/// the window.
pub struct SimSurface {
    flags: Arc<Mutex<SurfaceFlags>>,
}

impl SimSurface {
    pub(crate) fn new(flags: Arc<Mutex<SurfaceFlags>>) -> Self {
        Self { flags }
    }
}

impl DisplaySurface for SimSurface {
    fn set_mirror(&mut self, mirror: bool) -> Result<(), CaptureError> {
        log::debug!("surface mirror = {}", mirror);
        self.flags.lock().mirror = mirror;
        Ok(())
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), CaptureError> {
        log::debug!("surface visible = {}", visible);
        self.flags.lock().visible = visible;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), CaptureError> {
        self.flags.lock().flushed = true;
        Ok(())
    }
}
