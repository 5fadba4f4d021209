use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use camera_capture_core::events::queue::EventSender;
use camera_capture_core::models::config::{AccessMode, CameraUnit};
use camera_capture_core::models::error::CaptureError;
use camera_capture_core::models::event::{DisplayEvent, Event};
use camera_capture_core::models::photo::PhotoFrame;
use camera_capture_core::traits::capture_device::{CaptureDevice, ShutterCallback, StillCallback};
use camera_capture_core::traits::photo_roll::PhotoRoll;

use crate::sim_roll::SimRoll;
use crate::sim_surface::{SimSurface, SurfaceFlags};

/// How long after `start_viewfinder` the platform announces the created
/// surface.
const SURFACE_CREATE_DELAY: Duration = Duration::from_millis(10);
/// Delay between an accepted capture request and the shutter firing.
const EXPOSURE_DELAY: Duration = Duration::from_millis(20);
/// Delay between the shutter and the final buffer becoming available.
const ENCODE_DELAY: Duration = Duration::from_millis(30);

#[derive(Default)]
struct CameraState {
    window_group: Option<String>,
    window_id: Option<String>,
    viewfinder_running: bool,
    photo_in_flight: bool,
    closed: bool,
}

/// Simulated camera device.
///
/// Behaves like the platform API seen from the session's side: the
/// viewfinder surface is announced asynchronously through the display event
/// feed, and an accepted capture request fires the shutter and buffer-ready
/// callbacks from a dedicated pipeline thread, delivering a synthetic JPEG
/// frame. At most one capture is in flight; further requests are rejected,
/// not queued.
pub struct SimCamera {
    unit: CameraUnit,
    events: EventSender,
    roll: Arc<SimRoll>,
    surface_flags: Arc<Mutex<SurfaceFlags>>,
    state: Arc<Mutex<CameraState>>,
    workers: Vec<thread::JoinHandle<()>>,
}

impl SimCamera {
    /// Open the given unit. Read-write access is required for a viewfinder;
    /// roll access controls whether photo slots can be allocated.
    pub fn open(
        unit: CameraUnit,
        mode: AccessMode,
        events: EventSender,
        photo_dir: impl Into<PathBuf>,
    ) -> Result<Self, CaptureError> {
        if !mode.read_write {
            return Err(CaptureError::Configuration(
                "viewfinder requires read-write access".into(),
            ));
        }
        Ok(Self {
            unit,
            events,
            roll: Arc::new(SimRoll::new(photo_dir.into(), mode.roll)),
            surface_flags: Arc::new(Mutex::new(SurfaceFlags::default())),
            state: Arc::new(Mutex::new(CameraState::default())),
            workers: Vec::new(),
        })
    }

    /// The concrete roll, for locating written files.
    pub fn sim_roll(&self) -> Arc<SimRoll> {
        Arc::clone(&self.roll)
    }

    /// Snapshot of the viewfinder surface's property flags.
    pub fn surface_flags(&self) -> SurfaceFlags {
        *self.surface_flags.lock()
    }
}

impl CaptureDevice for SimCamera {
    fn unit(&self) -> CameraUnit {
        self.unit
    }

    fn configure_viewfinder(&mut self, group: &str, window: &str) -> Result<(), CaptureError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(CaptureError::DeviceNotAvailable);
        }
        state.window_group = Some(group.to_string());
        state.window_id = Some(window.to_string());
        Ok(())
    }

    fn start_viewfinder(&mut self) -> Result<(), CaptureError> {
        {
            let mut state = self.state.lock();
            if state.closed {
                return Err(CaptureError::DeviceNotAvailable);
            }
            if state.window_group.is_none() {
                return Err(CaptureError::Viewfinder(
                    "viewfinder target not configured".into(),
                ));
            }
            if state.viewfinder_running {
                return Err(CaptureError::Viewfinder("viewfinder already running".into()));
            }
            state.viewfinder_running = true;
        }

        // The platform creates the viewfinder window asynchronously and
        // announces it on the display feed.
        let events = self.events.clone();
        let flags = Arc::clone(&self.surface_flags);
        let handle = thread::Builder::new()
            .name("sim-viewfinder".into())
            .spawn(move || {
                thread::sleep(SURFACE_CREATE_DELAY);
                let surface = SimSurface::new(flags);
                let event = Event::Display(DisplayEvent::SurfaceCreated(Box::new(surface)));
                if events.send(event).is_err() {
                    log::warn!("viewfinder surface announcement dropped");
                }
            })
            .map_err(|e| {
                CaptureError::Viewfinder(format!("failed to spawn viewfinder thread: {}", e))
            })?;
        self.workers.push(handle);
        Ok(())
    }

    fn stop_viewfinder(&mut self) -> Result<(), CaptureError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(CaptureError::DeviceNotAvailable);
        }
        state.viewfinder_running = false;
        Ok(())
    }

    fn take_photo(
        &mut self,
        shutter: ShutterCallback,
        still: StillCallback,
    ) -> Result<(), CaptureError> {
        {
            let mut state = self.state.lock();
            if state.closed || !state.viewfinder_running {
                return Err(CaptureError::CaptureRequest(
                    "viewfinder is not running".into(),
                ));
            }
            if state.photo_in_flight {
                return Err(CaptureError::CaptureRequest(
                    "a capture is already in flight".into(),
                ));
            }
            state.photo_in_flight = true;
        }

        let state = Arc::clone(&self.state);
        let spawned = thread::Builder::new()
            .name("sim-photo-pipeline".into())
            .spawn(move || {
                thread::sleep(EXPOSURE_DELAY);
                shutter();
                thread::sleep(ENCODE_DELAY);
                still(PhotoFrame::jpeg(synthetic_jpeg()));
                state.lock().photo_in_flight = false;
            });

        match spawned {
            Ok(handle) => {
                self.workers.push(handle);
                Ok(())
            }
            Err(e) => {
                self.state.lock().photo_in_flight = false;
                Err(CaptureError::CaptureRequest(format!(
                    "failed to spawn capture pipeline: {}",
                    e
                )))
            }
        }
    }

    fn roll(&self) -> Arc<dyn PhotoRoll> {
        self.roll.clone()
    }

    fn close(&mut self) -> Result<(), CaptureError> {
        {
            let mut state = self.state.lock();
            if state.closed {
                return Ok(());
            }
            state.closed = true;
            state.viewfinder_running = false;
        }
        // Let outstanding pipeline threads finish their delivery.
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
        Ok(())
    }
}

impl Drop for SimCamera {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// A minimal JPEG envelope (SOI, JFIF APP0, comment, EOI): recognizable as
/// a JPEG file, not a decodable picture.
fn synthetic_jpeg() -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x10]);
    data.extend_from_slice(b"JFIF\0");
    data.extend_from_slice(&[0x01, 0x02, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
    data.extend_from_slice(&[0xFF, 0xFE, 0x00, 0x12]);
    data.extend_from_slice(b"simulated sensor");
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}
