use serde::{Deserialize, Serialize};

/// Encoding of a frame delivered by the capture pipeline.
///
/// Only `Jpeg` frames are persisted; viewfinder and raw frames pass through
/// the still callback unchanged but are never written to the roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    Jpeg,
    Nv12,
    Bayer,
}

/// Final image buffer handed to the buffer-ready callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFrame {
    pub format: FrameFormat,
    pub data: Vec<u8>,
}

impl PhotoFrame {
    pub fn new(format: FrameFormat, data: Vec<u8>) -> Self {
        Self { format, data }
    }

    pub fn jpeg(data: Vec<u8>) -> Self {
        Self::new(FrameFormat::Jpeg, data)
    }
}

/// Metadata for a capture that was persisted to the photo roll.
///
/// Serializable for JSON sidecar export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPhoto {
    pub id: String,
    pub file_name: String,
    pub byte_size: u64,
    pub checksum: String,
    pub created_at: String,
}

impl SavedPhoto {
    /// Creates metadata for a freshly written image, stamping a new id and
    /// the current UTC time.
    pub fn new(file_name: &str, byte_size: u64, checksum: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            byte_size,
            checksum: checksum.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
