use thiserror::Error;

/// Errors that can occur during camera capture operations.
///
/// The taxonomy follows how failures are handled, not where they originate:
/// configuration and viewfinder failures are fatal at init time, capture
/// request failures are recoverable (the session stays in the viewfinder
/// state), storage failures are best-effort (logged and abandoned).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("camera unit not available")]
    DeviceNotAvailable,

    #[error("configuration failed: {0}")]
    Configuration(String),

    #[error("viewfinder failed: {0}")]
    Viewfinder(String),

    #[error("capture request rejected: {0}")]
    CaptureRequest(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("event queue disconnected")]
    QueueDisconnected,
}
