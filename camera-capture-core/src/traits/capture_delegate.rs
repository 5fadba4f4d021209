use crate::models::error::CaptureError;
use crate::models::photo::SavedPhoto;
use crate::models::state::ViewfinderState;

/// Event delegate for capture session notifications.
///
/// State changes arrive on the session thread; photo and error
/// notifications may arrive on the capture backend's thread.
/// Implementations should marshal to the UI thread if needed.
pub trait CaptureDelegate: Send + Sync {
    /// Called when the session state changes.
    fn on_state_changed(&self, state: ViewfinderState);

    /// Called when a captured image has been persisted to the roll.
    fn on_photo_saved(&self, photo: &SavedPhoto);

    /// Called when a capture request or a photo write fails.
    fn on_capture_error(&self, error: &CaptureError);
}
