use std::sync::Arc;

use crate::models::config::CameraUnit;
use crate::models::error::CaptureError;
use crate::models::photo::PhotoFrame;
use crate::traits::photo_roll::PhotoRoll;

/// Callback invoked at the moment of exposure.
///
/// Its only contract is to produce the audible shutter cue; it must not
/// mutate session state. Fires on a backend-owned thread.
pub type ShutterCallback = Arc<dyn Fn() + Send + Sync + 'static>;

/// Callback invoked once the final image buffer is available.
///
/// Fires on a backend-owned thread: persist the frame and signal the
/// session, nothing more.
pub type StillCallback = Arc<dyn Fn(PhotoFrame) + Send + Sync + 'static>;

/// Interface for an open camera device.
///
/// Implemented by platform backends (`SimCamera` in the simulated backend).
/// All operations are fallible calls that the session logs and handles by
/// aborting the current operation, never by retrying.
pub trait CaptureDevice: Send {
    /// The physical unit this device was opened on.
    fn unit(&self) -> CameraUnit;

    /// Route the viewfinder surface into the given window group under the
    /// given window id.
    fn configure_viewfinder(&mut self, group: &str, window: &str) -> Result<(), CaptureError>;

    /// Start streaming the photo viewfinder. The backend announces the
    /// created surface asynchronously through the display event feed.
    fn start_viewfinder(&mut self) -> Result<(), CaptureError>;

    /// Stop streaming the photo viewfinder.
    fn stop_viewfinder(&mut self) -> Result<(), CaptureError>;

    /// Request a still capture.
    ///
    /// On acceptance the backend fires `shutter` at exposure time and
    /// `still` once the final buffer is ready, both from its own thread.
    /// A second request while one is in flight must be rejected, not queued.
    fn take_photo(
        &mut self,
        shutter: ShutterCallback,
        still: StillCallback,
    ) -> Result<(), CaptureError>;

    /// The device's photo roll, used by the still callback to obtain
    /// writable output slots.
    fn roll(&self) -> Arc<dyn PhotoRoll>;

    /// Release the device. Idempotent.
    fn close(&mut self) -> Result<(), CaptureError>;
}
