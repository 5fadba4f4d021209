use std::sync::Arc;

use crate::events::queue::CompletionSender;
use crate::models::config::CaptureConfig;
use crate::models::photo::{FrameFormat, PhotoFrame};
use crate::storage::photo_writer;
use crate::traits::capture_delegate::CaptureDelegate;
use crate::traits::capture_device::{ShutterCallback, StillCallback};
use crate::traits::photo_roll::PhotoRoll;
use crate::traits::sound_player::SoundPlayer;

/// Bridges the capture backend's asynchronous callbacks to the session.
///
/// The backend fires the shutter and buffer-ready callbacks on its own
/// thread; neither touches session state. Their only route back to the main
/// loop is the `CompletionSender`, which posts a capture-complete event the
/// session consumes on its own thread.
pub struct CaptureBridge {
    roll: Arc<dyn PhotoRoll>,
    sounds: Arc<dyn SoundPlayer>,
    completion: CompletionSender,
    shutter_sound: String,
    delegate: Option<Arc<dyn CaptureDelegate>>,
}

impl CaptureBridge {
    pub fn new(
        roll: Arc<dyn PhotoRoll>,
        sounds: Arc<dyn SoundPlayer>,
        completion: CompletionSender,
        config: &CaptureConfig,
    ) -> Self {
        Self {
            roll,
            sounds,
            completion,
            shutter_sound: config.shutter_sound.clone(),
            delegate: None,
        }
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn CaptureDelegate>) {
        self.delegate = Some(delegate);
    }

    /// Callback fired at exposure time.
    ///
    /// Camera applications must produce an audible shutter cue; that is this
    /// callback's entire contract.
    pub fn shutter_callback(&self) -> ShutterCallback {
        let sounds = Arc::clone(&self.sounds);
        let name = self.shutter_sound.clone();
        Arc::new(move || sounds.play(&name))
    }

    /// Callback fired when the final image buffer is available.
    ///
    /// Persists JPEG frames to the roll; any other format is skipped. The
    /// capture-complete event is posted unconditionally afterwards, even on
    /// a failed write, so the session is never left waiting.
    pub fn still_callback(&self) -> StillCallback {
        let roll = Arc::clone(&self.roll);
        let completion = self.completion.clone();
        let delegate = self.delegate.clone();
        Arc::new(move |frame: PhotoFrame| {
            if frame.format == FrameFormat::Jpeg {
                match photo_writer::save_photo(roll.as_ref(), &frame) {
                    Ok(saved) => {
                        log::info!("saved {} ({} bytes)", saved.file_name, saved.byte_size);
                        if let Some(ref delegate) = delegate {
                            delegate.on_photo_saved(&saved);
                        }
                    }
                    Err(e) => {
                        log::error!("photo write abandoned: {}", e);
                        if let Some(ref delegate) = delegate {
                            delegate.on_capture_error(&e);
                        }
                    }
                }
            } else {
                log::debug!("skipping frame with format {:?}", frame.format);
            }
            completion.signal();
        })
    }
}
