use std::fs;
use std::path::Path;

use crate::models::error::CaptureError;
use crate::models::photo::SavedPhoto;

/// Write capture metadata as a JSON sidecar file.
///
/// Creates `{photo_path}.metadata.json` alongside the image.
pub fn write_sidecar(photo: &SavedPhoto, photo_path: &Path) -> Result<(), CaptureError> {
    let sidecar_path = photo_path.with_extension("metadata.json");
    let json = serde_json::to_string_pretty(photo)
        .map_err(|e| CaptureError::Storage(format!("failed to serialize metadata: {}", e)))?;
    fs::write(&sidecar_path, json)
        .map_err(|e| CaptureError::Storage(format!("failed to write metadata: {}", e)))?;
    Ok(())
}

/// Read capture metadata from a JSON sidecar file.
pub fn read_sidecar(photo_path: &Path) -> Result<SavedPhoto, CaptureError> {
    let sidecar_path = photo_path.with_extension("metadata.json");
    let json = fs::read_to_string(&sidecar_path)
        .map_err(|e| CaptureError::Storage(format!("failed to read metadata: {}", e)))?;
    let photo: SavedPhoto = serde_json::from_str(&json)
        .map_err(|e| CaptureError::Storage(format!("failed to parse metadata: {}", e)))?;
    Ok(photo)
}
