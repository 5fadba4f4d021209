use std::io::{self, ErrorKind, Write};

use sha2::{Digest, Sha256};

use crate::models::error::CaptureError;
use crate::models::photo::{PhotoFrame, SavedPhoto};
use crate::traits::photo_roll::PhotoRoll;

/// Persist a still frame to a freshly allocated roll slot.
///
/// The caller has already checked the frame format; this writes the buffer
/// verbatim. On a non-retryable write error the slot is abandoned (a
/// partial file may remain) and the error is returned for logging.
pub fn save_photo(roll: &dyn PhotoRoll, frame: &PhotoFrame) -> Result<SavedPhoto, CaptureError> {
    let mut slot = roll.open_photo()?;
    log::info!(
        "saving {} ({} bytes)",
        slot.file_name,
        frame.data.len()
    );

    write_fully(slot.writer.as_mut(), &frame.data)
        .map_err(|e| CaptureError::Storage(format!("write failed: {}", e)))?;

    let checksum = sha256_hex(&frame.data);
    Ok(SavedPhoto::new(
        &slot.file_name,
        frame.data.len() as u64,
        &checksum,
    ))
}

/// Write the whole buffer, tolerating partial writes.
///
/// Only two conditions are retryable: `WouldBlock` and `Interrupted`. Any
/// other error, or a writer that accepts zero bytes, aborts the write.
fn write_fully<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> io::Result<()> {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    ErrorKind::WriteZero,
                    "destination accepted no bytes",
                ));
            }
            Ok(n) => written += n,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                continue;
            }
            Err(e) => return Err(e),
        }
    }
    writer.flush()
}

fn sha256_hex(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
