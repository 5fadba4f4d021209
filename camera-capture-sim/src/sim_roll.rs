use std::fs::{self, File};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use camera_capture_core::models::error::CaptureError;
use camera_capture_core::traits::photo_roll::{PhotoRoll, PhotoSlot};

/// Simulated photo roll backed by a directory on disk.
///
/// Slots are plain files named `photo_NNNN.jpg`, numbered monotonically per
/// roll instance.
pub struct SimRoll {
    dir: PathBuf,
    enabled: bool,
    next_index: Mutex<u32>,
}

impl SimRoll {
    pub(crate) fn new(dir: PathBuf, enabled: bool) -> Self {
        Self {
            dir,
            enabled,
            next_index: Mutex::new(0),
        }
    }

    /// Directory the roll writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a file the roll named in a `PhotoSlot`.
    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

impl PhotoRoll for SimRoll {
    fn open_photo(&self) -> Result<PhotoSlot, CaptureError> {
        if !self.enabled {
            return Err(CaptureError::Storage(
                "camera opened without roll access".into(),
            ));
        }
        fs::create_dir_all(&self.dir)
            .map_err(|e| CaptureError::Storage(format!("failed to create roll directory: {}", e)))?;

        let index = {
            let mut next = self.next_index.lock();
            *next += 1;
            *next
        };
        let file_name = format!("photo_{:04}.jpg", index);
        let file = File::create(self.dir.join(&file_name))
            .map_err(|e| CaptureError::Storage(format!("failed to create photo file: {}", e)))?;

        Ok(PhotoSlot {
            writer: Box::new(file),
            file_name,
        })
    }
}
