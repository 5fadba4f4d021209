use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use camera_capture_core::models::config::AccessMode;
use camera_capture_core::storage::metadata;
use camera_capture_core::traits::capture_device::CaptureDevice;
use camera_capture_core::{
    CaptureBridge, CaptureConfig, CaptureDelegate, CaptureError, Event, EventQueue,
    LifecycleEvent, SavedPhoto, ViewfinderApp, ViewfinderState,
};
use camera_capture_sim::{InputScript, SimCamera, SimRoll, SimSoundPlayer};

/// Delegate that narrates the session and writes a metadata sidecar next to
/// each saved photo.
struct DemoDelegate {
    roll: Arc<SimRoll>,
}

impl CaptureDelegate for DemoDelegate {
    fn on_state_changed(&self, state: ViewfinderState) {
        log::info!("session state: {:?}", state);
    }

    fn on_photo_saved(&self, photo: &SavedPhoto) {
        match serde_json::to_string_pretty(photo) {
            Ok(json) => println!("{}", json),
            Err(e) => log::warn!("failed to render photo metadata: {}", e),
        }
        let photo_path = self.roll.path_for(&photo.file_name);
        if let Err(e) = metadata::write_sidecar(photo, &photo_path) {
            log::warn!("failed to write metadata sidecar: {}", e);
        }
    }

    fn on_capture_error(&self, error: &CaptureError) {
        log::error!("capture error: {}", error);
    }
}

fn run(photo_dir: PathBuf) -> Result<(), CaptureError> {
    let queue = EventQueue::new();
    let config = CaptureConfig::default();

    let camera = SimCamera::open(config.unit, AccessMode::default(), queue.sender(), photo_dir)?;
    let roll = camera.sim_roll();
    let sounds = Arc::new(SimSoundPlayer::new());
    let delegate = Arc::new(DemoDelegate { roll });

    let mut bridge = CaptureBridge::new(
        camera.roll(),
        sounds,
        queue.completion_sender(),
        &config,
    );
    bridge.set_delegate(delegate.clone());

    // Ctrl-C behaves like the platform's exit event.
    let exit_sender = queue.sender();
    ctrlc::set_handler(move || {
        let _ = exit_sender.send(Event::Lifecycle(LifecycleEvent::Exit));
    })
    .map_err(|e| CaptureError::Configuration(format!("failed to install exit handler: {}", e)))?;

    // Three scripted touches stand in for the user, then the script exits
    // the session on its own.
    let _script = InputScript::new(queue.sender()).spawn(3, Duration::from_millis(400))?;

    let mut app = ViewfinderApp::new(camera, bridge, queue, config)?;
    app.set_delegate(delegate);
    app.run()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let photo_dir = PathBuf::from("photos");
    log::info!("saving captures under {}", photo_dir.display());

    if let Err(e) = run(photo_dir) {
        log::error!("viewfinder session failed: {}", e);
    }
}
