//! # camera-capture-sim
//!
//! Simulated platform backend for camera-capture-core.
//!
//! Provides:
//! - `SimCamera` — capture device with an asynchronous surface announcement
//!   and a threaded photo pipeline delivering synthetic JPEG frames
//! - `SimSurface` — viewfinder surface with observable property flags
//! - `SimRoll` — photo roll writing numbered files under a directory
//! - `SimSoundPlayer` — sound device that logs and records playback
//! - `InputScript` — scripted touch/exit input source
//!
//! ## Usage
//! ```ignore
//! use camera_capture_core::{CaptureBridge, CaptureConfig, EventQueue, ViewfinderApp};
//! use camera_capture_sim::SimCamera;
//!
//! let queue = EventQueue::new();
//! let config = CaptureConfig::default();
//! let camera = SimCamera::open(config.unit, Default::default(), queue.sender(), "photos")?;
//! let bridge = CaptureBridge::new(camera.roll(), sounds, queue.completion_sender(), &config);
//! ViewfinderApp::new(camera, bridge, queue, config)?.run()?;
//! ```

pub mod script;
pub mod sim_camera;
pub mod sim_roll;
pub mod sim_sound;
pub mod sim_surface;

pub use script::InputScript;
pub use sim_camera::SimCamera;
pub use sim_roll::SimRoll;
pub use sim_sound::SimSoundPlayer;
pub use sim_surface::{SimSurface, SurfaceFlags};

#[cfg(test)]
mod tests {
    use super::*;
    use camera_capture_core::models::config::{AccessMode, CaptureConfig};
    use camera_capture_core::traits::capture_device::CaptureDevice;
    use camera_capture_core::{CaptureBridge, EventQueue, ViewfinderApp};
    use std::fs;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn scripted_touches_capture_photos_end_to_end() {
        let dir = std::env::temp_dir().join(format!(
            "camera_capture_sim_e2e_{}",
            std::process::id()
        ));
        fs::remove_dir_all(&dir).ok();

        let queue = EventQueue::new();
        let config = CaptureConfig::default();
        let camera = SimCamera::open(
            config.unit,
            AccessMode::default(),
            queue.sender(),
            dir.clone(),
        )
        .unwrap();
        let roll = camera.sim_roll();
        let sounds = Arc::new(SimSoundPlayer::new());

        let bridge = CaptureBridge::new(
            camera.roll(),
            sounds.clone(),
            queue.completion_sender(),
            &config,
        );

        InputScript::new(queue.sender())
            .spawn(2, Duration::from_millis(150))
            .unwrap();

        let app = ViewfinderApp::new(camera, bridge, queue, config).unwrap();
        app.run().unwrap();

        let photos: Vec<_> = fs::read_dir(roll.dir())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".jpg")
            })
            .collect();
        assert_eq!(photos.len(), 2);
        assert_eq!(sounds.played(), vec!["event_camera_shutter"; 2]);

        fs::remove_dir_all(&dir).ok();
    }
}
