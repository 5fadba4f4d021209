use crate::models::error::CaptureError;

/// A viewfinder surface handed over by the display event feed.
///
/// The surface-created handler configures it with immediate device writes
/// (mirror, visibility, flush) before returning. The surface is not retained
/// afterwards; the platform owns its lifetime.
pub trait DisplaySurface: Send {
    /// Horizontally mirror the surface (front-facing preview).
    fn set_mirror(&mut self, mirror: bool) -> Result<(), CaptureError>;

    /// Show or hide the surface.
    fn set_visible(&mut self, visible: bool) -> Result<(), CaptureError>;

    /// Flush pending property writes to the device.
    fn flush(&mut self) -> Result<(), CaptureError>;
}
