use std::io::Write;

use crate::models::error::CaptureError;

/// A writable output slot allocated by the photo roll.
///
/// The roll generates the destination name; the caller streams the image
/// bytes into `writer` and drops it to close the slot.
pub struct PhotoSlot {
    pub writer: Box<dyn Write + Send>,
    pub file_name: String,
}

/// The device's photo storage manager.
///
/// Called from the still callback's thread, so implementations must be
/// thread-safe.
pub trait PhotoRoll: Send + Sync {
    /// Allocate a new output slot with a generated file name.
    fn open_photo(&self) -> Result<PhotoSlot, CaptureError>;
}
