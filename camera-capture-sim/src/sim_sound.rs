use parking_lot::Mutex;

use camera_capture_core::traits::sound_player::SoundPlayer;

/// Simulated sound device: playback is a log line, and the played names are
/// recorded for inspection.
#[derive(Default)]
pub struct SimSoundPlayer {
    played: Mutex<Vec<String>>,
}

impl SimSoundPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<String> {
        self.played.lock().clone()
    }
}

impl SoundPlayer for SimSoundPlayer {
    fn play(&self, name: &str) {
        log::info!("playing sound {}", name);
        self.played.lock().push(name.to_string());
    }
}
