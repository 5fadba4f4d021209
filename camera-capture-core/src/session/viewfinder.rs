use std::sync::Arc;

use crate::bridge::capture_bridge::CaptureBridge;
use crate::events::queue::EventQueue;
use crate::models::config::CaptureConfig;
use crate::models::error::CaptureError;
use crate::models::event::{DisplayEvent, Event, LifecycleEvent};
use crate::models::state::ViewfinderState;
use crate::traits::capture_delegate::CaptureDelegate;
use crate::traits::capture_device::CaptureDevice;

/// Touch-to-capture viewfinder session.
///
/// Owns the whole per-process context (state, touch flag, shutdown flag,
/// mirror flag, camera, bridge, event queue) and runs it as a
/// single-threaded cooperative loop:
///
/// ```text
/// while not shutdown:
///     step state machine (may request a capture)
///     block on the event queue, dispatch one event
/// ```
///
/// All state transitions happen on the thread calling [`run`](Self::run).
/// Backend callbacks re-enter only through the queue.
pub struct ViewfinderApp<C: CaptureDevice> {
    camera: C,
    bridge: CaptureBridge,
    queue: EventQueue,
    state: ViewfinderState,
    touch: bool,
    shutdown: bool,
    mirror: bool,
    delegate: Option<Arc<dyn CaptureDelegate>>,
}

impl<C: CaptureDevice> ViewfinderApp<C> {
    /// Configure and start the viewfinder on an opened camera.
    ///
    /// Any init failure closes the camera before the error is returned; the
    /// main loop is never entered with a half-acquired device.
    pub fn new(
        mut camera: C,
        bridge: CaptureBridge,
        queue: EventQueue,
        config: CaptureConfig,
    ) -> Result<Self, CaptureError> {
        if let Err(reason) = config.validate() {
            close_quietly(&mut camera);
            return Err(CaptureError::Configuration(reason));
        }
        if let Err(e) = camera.configure_viewfinder(&config.window_group, &config.window_id) {
            log::error!("configure_viewfinder failed: {}", e);
            close_quietly(&mut camera);
            return Err(e);
        }
        if let Err(e) = camera.start_viewfinder() {
            log::error!("start_viewfinder failed: {}", e);
            close_quietly(&mut camera);
            return Err(e);
        }
        let mirror = camera.unit().should_mirror();

        Ok(Self {
            camera,
            bridge,
            queue,
            state: ViewfinderState::Startup,
            touch: false,
            shutdown: false,
            mirror,
            delegate: None,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn CaptureDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> ViewfinderState {
        self.state
    }

    /// Run the session until the exit event arrives.
    ///
    /// A queue disconnect also ends the loop; teardown runs either way and
    /// releases resources in reverse acquisition order.
    pub fn run(mut self) -> Result<(), CaptureError> {
        let mut result = Ok(());
        while !self.shutdown {
            self.step();
            match self.queue.next() {
                Ok(event) => self.dispatch(event),
                Err(e) => {
                    log::error!("event fetch failed: {}", e);
                    result = Err(e);
                    break;
                }
            }
        }
        self.teardown();
        result
    }

    /// One state-machine tick.
    fn step(&mut self) {
        match self.state {
            // Waiting for the viewfinder surface. Nothing to do.
            ViewfinderState::Startup => {}
            ViewfinderState::Viewfinder => {
                if !self.touch {
                    return;
                }
                self.touch = false;
                let shutter = self.bridge.shutter_callback();
                let still = self.bridge.still_callback();
                match self.camera.take_photo(shutter, still) {
                    Ok(()) => self.set_state(ViewfinderState::TakingPhoto),
                    // No retry; the user has to touch again.
                    Err(e) => {
                        log::error!("take_photo failed: {}", e);
                        self.notify_error(&e);
                    }
                }
            }
            // Blocked on the asynchronous completion event.
            ViewfinderState::TakingPhoto => {}
        }
    }

    /// Route one event to its domain handler.
    fn dispatch(&mut self, event: Event) {
        match event {
            Event::Display(e) => self.on_display_event(e),
            Event::Lifecycle(e) => self.on_lifecycle_event(e),
            Event::CaptureComplete => self.on_capture_complete(),
        }
    }

    fn on_display_event(&mut self, event: DisplayEvent) {
        match event {
            DisplayEvent::Touch => {
                log::info!("touch event");
                self.touch = true;
            }
            DisplayEvent::SurfaceCreated(mut surface) => {
                log::info!("viewfinder surface created");
                if let Err(e) = surface.set_mirror(self.mirror) {
                    log::warn!("set_mirror failed: {}", e);
                }
                if let Err(e) = surface.set_visible(true) {
                    log::warn!("set_visible failed: {}", e);
                }
                if let Err(e) = surface.flush() {
                    log::warn!("surface flush failed: {}", e);
                }
                // The viewfinder is visible now, whatever state came before.
                self.touch = false;
                self.set_state(ViewfinderState::Viewfinder);
            }
            DisplayEvent::Release => {}
        }
    }

    fn on_lifecycle_event(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::Exit => {
                log::info!("exit event");
                self.shutdown = true;
            }
            other => log::debug!("ignoring lifecycle event {:?}", other),
        }
    }

    fn on_capture_complete(&mut self) {
        // Re-arm the viewfinder state.
        log::info!("capture complete");
        self.touch = false;
        self.set_state(ViewfinderState::Viewfinder);
    }

    fn set_state(&mut self, state: ViewfinderState) {
        if self.state == state {
            return;
        }
        self.state = state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(state);
        }
    }

    fn notify_error(&self, error: &CaptureError) {
        if let Some(ref delegate) = self.delegate {
            delegate.on_capture_error(error);
        }
    }

    fn teardown(&mut self) {
        if self.state.is_taking_photo() {
            // Don't wait for the outstanding still callback.
            self.set_state(ViewfinderState::Viewfinder);
        }
        if self.state.is_viewfinder() {
            if let Err(e) = self.camera.stop_viewfinder() {
                log::warn!("stop_viewfinder failed: {}", e);
            }
            if let Err(e) = self.camera.close() {
                log::warn!("camera close failed: {}", e);
            }
        }
    }
}

fn close_quietly<C: CaptureDevice>(camera: &mut C) {
    if let Err(e) = camera.close() {
        log::warn!("camera close failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::CameraUnit;
    use crate::models::photo::{PhotoFrame, SavedPhoto};
    use crate::traits::capture_device::{ShutterCallback, StillCallback};
    use crate::traits::display_surface::DisplaySurface;
    use crate::traits::photo_roll::{PhotoRoll, PhotoSlot};
    use crate::traits::sound_player::SoundPlayer;
    use parking_lot::Mutex;
    use std::io;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[derive(Default)]
    struct CameraLog {
        take_calls: AtomicUsize,
        stopped: AtomicBool,
        closed: AtomicBool,
    }

    struct FakeCamera {
        unit: CameraUnit,
        log: Arc<CameraLog>,
        roll: Arc<MemoryRoll>,
        accept_capture: bool,
        fail_configure: bool,
        fail_start: bool,
        // When set, take_photo fires both callbacks synchronously with a
        // small JPEG frame, so the completion event is queued before the
        // request returns.
        fire_callbacks: bool,
    }

    impl FakeCamera {
        fn new(unit: CameraUnit) -> Self {
            Self {
                unit,
                log: Arc::new(CameraLog::default()),
                roll: Arc::new(MemoryRoll::default()),
                accept_capture: true,
                fail_configure: false,
                fail_start: false,
                fire_callbacks: false,
            }
        }
    }

    impl CaptureDevice for FakeCamera {
        fn unit(&self) -> CameraUnit {
            self.unit
        }

        fn configure_viewfinder(&mut self, _group: &str, _window: &str) -> Result<(), CaptureError> {
            if self.fail_configure {
                return Err(CaptureError::Configuration("viewfinder target".into()));
            }
            Ok(())
        }

        fn start_viewfinder(&mut self) -> Result<(), CaptureError> {
            if self.fail_start {
                return Err(CaptureError::Viewfinder("stream start".into()));
            }
            Ok(())
        }

        fn stop_viewfinder(&mut self) -> Result<(), CaptureError> {
            self.log.stopped.store(true, Ordering::SeqCst);
            Ok(())
        }

        fn take_photo(
            &mut self,
            shutter: ShutterCallback,
            still: StillCallback,
        ) -> Result<(), CaptureError> {
            if !self.accept_capture {
                return Err(CaptureError::CaptureRequest("device busy".into()));
            }
            self.log.take_calls.fetch_add(1, Ordering::SeqCst);
            if self.fire_callbacks {
                shutter();
                still(PhotoFrame::jpeg(vec![0xFF, 0xD8, 0xFF, 0xD9]));
            }
            Ok(())
        }

        fn roll(&self) -> Arc<dyn PhotoRoll> {
            self.roll.clone()
        }

        fn close(&mut self) -> Result<(), CaptureError> {
            self.log.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryRoll {
        written: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    struct SlotWriter {
        sink: Arc<Mutex<Vec<Vec<u8>>>>,
        buf: Vec<u8>,
    }

    impl io::Write for SlotWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            self.sink.lock().push(self.buf.clone());
            Ok(())
        }
    }

    impl PhotoRoll for MemoryRoll {
        fn open_photo(&self) -> Result<PhotoSlot, CaptureError> {
            Ok(PhotoSlot {
                writer: Box::new(SlotWriter {
                    sink: Arc::clone(&self.written),
                    buf: Vec::new(),
                }),
                file_name: "photo_0001.jpg".into(),
            })
        }
    }

    struct NullSound;

    impl SoundPlayer for NullSound {
        fn play(&self, _name: &str) {}
    }

    #[derive(Default)]
    struct SurfaceLog {
        mirror: Option<bool>,
        visible: Option<bool>,
        flushed: bool,
    }

    struct FakeSurface {
        log: Arc<Mutex<SurfaceLog>>,
    }

    impl FakeSurface {
        fn new() -> (Self, Arc<Mutex<SurfaceLog>>) {
            let log = Arc::new(Mutex::new(SurfaceLog::default()));
            (Self { log: log.clone() }, log)
        }
    }

    impl DisplaySurface for FakeSurface {
        fn set_mirror(&mut self, mirror: bool) -> Result<(), CaptureError> {
            self.log.lock().mirror = Some(mirror);
            Ok(())
        }

        fn set_visible(&mut self, visible: bool) -> Result<(), CaptureError> {
            self.log.lock().visible = Some(visible);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), CaptureError> {
            self.log.lock().flushed = true;
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingDelegate {
        states: Mutex<Vec<ViewfinderState>>,
        errors: Mutex<Vec<CaptureError>>,
        photos: Mutex<Vec<SavedPhoto>>,
    }

    impl CaptureDelegate for RecordingDelegate {
        fn on_state_changed(&self, state: ViewfinderState) {
            self.states.lock().push(state);
        }

        fn on_photo_saved(&self, photo: &SavedPhoto) {
            self.photos.lock().push(photo.clone());
        }

        fn on_capture_error(&self, error: &CaptureError) {
            self.errors.lock().push(error.clone());
        }
    }

    struct Harness {
        app: ViewfinderApp<FakeCamera>,
        camera_log: Arc<CameraLog>,
        photos_written: Arc<Mutex<Vec<Vec<u8>>>>,
        delegate: Arc<RecordingDelegate>,
    }

    /// Builds an app around the fake camera, with extra queue senders for
    /// tests that drive the full run loop.
    fn harness_with_senders(
        camera: FakeCamera,
        extra_senders: usize,
    ) -> (Harness, Vec<crate::events::queue::EventSender>) {
        let camera_log = camera.log.clone();
        let photos_written = camera.roll.written.clone();
        let delegate = Arc::new(RecordingDelegate::default());

        let queue = EventQueue::new();
        let senders = (0..extra_senders).map(|_| queue.sender()).collect();
        let mut bridge = CaptureBridge::new(
            camera.roll(),
            Arc::new(NullSound),
            queue.completion_sender(),
            &CaptureConfig::default(),
        );
        bridge.set_delegate(delegate.clone());

        let mut app =
            ViewfinderApp::new(camera, bridge, queue, CaptureConfig::default()).unwrap();
        app.set_delegate(delegate.clone());

        (
            Harness {
                app,
                camera_log,
                photos_written,
                delegate,
            },
            senders,
        )
    }

    fn harness_with(camera: FakeCamera) -> Harness {
        harness_with_senders(camera, 0).0
    }

    fn harness() -> Harness {
        harness_with(FakeCamera::new(CameraUnit::Rear))
    }

    fn surface_event() -> (Event, Arc<Mutex<SurfaceLog>>) {
        let (surface, log) = FakeSurface::new();
        (
            Event::Display(DisplayEvent::SurfaceCreated(Box::new(surface))),
            log,
        )
    }

    #[test]
    fn startup_ticks_do_nothing() {
        let mut h = harness();
        h.app.step();
        h.app.step();
        assert_eq!(h.app.state(), ViewfinderState::Startup);
        assert_eq!(h.camera_log.take_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn surface_created_forces_viewfinder_and_configures_surface() {
        let mut h = harness();
        h.app.dispatch(Event::Display(DisplayEvent::Touch));

        let (event, surface_log) = surface_event();
        h.app.dispatch(event);

        assert_eq!(h.app.state(), ViewfinderState::Viewfinder);
        assert!(!h.app.touch);
        let log = surface_log.lock();
        assert_eq!(log.mirror, Some(false));
        assert_eq!(log.visible, Some(true));
        assert!(log.flushed);
    }

    #[test]
    fn front_unit_mirrors_surface() {
        let mut h = harness_with(FakeCamera::new(CameraUnit::Front));
        let (event, surface_log) = surface_event();
        h.app.dispatch(event);
        assert_eq!(surface_log.lock().mirror, Some(true));
    }

    #[test]
    fn surface_created_is_idempotent_past_startup() {
        let mut h = harness();
        let (first, _) = surface_event();
        h.app.dispatch(first);
        h.app.dispatch(Event::Display(DisplayEvent::Touch));

        // A second announcement re-forces the same state and clears touch.
        let (second, _) = surface_event();
        h.app.dispatch(second);

        assert_eq!(h.app.state(), ViewfinderState::Viewfinder);
        assert!(!h.app.touch);
        assert_eq!(*h.delegate.states.lock(), vec![ViewfinderState::Viewfinder]);
    }

    #[test]
    fn touch_in_viewfinder_requests_single_capture() {
        let mut h = harness();
        let (event, _) = surface_event();
        h.app.dispatch(event);

        // Multiple touches collapse into the single-slot flag.
        h.app.dispatch(Event::Display(DisplayEvent::Touch));
        h.app.dispatch(Event::Display(DisplayEvent::Touch));
        h.app.step();

        assert_eq!(h.app.state(), ViewfinderState::TakingPhoto);
        assert_eq!(h.camera_log.take_calls.load(Ordering::SeqCst), 1);

        // Further ticks while a capture is in flight request nothing.
        h.app.step();
        h.app.step();
        assert_eq!(h.camera_log.take_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn capture_complete_rearms_viewfinder_idempotently() {
        let mut h = harness();
        let (event, _) = surface_event();
        h.app.dispatch(event);
        h.app.dispatch(Event::Display(DisplayEvent::Touch));
        h.app.step();
        assert_eq!(h.app.state(), ViewfinderState::TakingPhoto);

        h.app.dispatch(Event::CaptureComplete);
        assert_eq!(h.app.state(), ViewfinderState::Viewfinder);
        assert!(!h.app.touch);

        // Delivering it again is a no-op.
        let states_before = h.delegate.states.lock().len();
        h.app.dispatch(Event::CaptureComplete);
        assert_eq!(h.app.state(), ViewfinderState::Viewfinder);
        assert_eq!(h.delegate.states.lock().len(), states_before);
    }

    #[test]
    fn touch_during_capture_is_recorded_then_cleared_by_completion() {
        let mut h = harness();
        let (event, _) = surface_event();
        h.app.dispatch(event);
        h.app.dispatch(Event::Display(DisplayEvent::Touch));
        h.app.step();
        assert_eq!(h.app.state(), ViewfinderState::TakingPhoto);

        // Touch while the pipeline is busy: recorded, not consumed.
        h.app.dispatch(Event::Display(DisplayEvent::Touch));
        assert!(h.app.touch);
        assert_eq!(h.app.state(), ViewfinderState::TakingPhoto);
        assert_eq!(h.camera_log.take_calls.load(Ordering::SeqCst), 1);

        // Completion clears the pending touch, so the next tick does not
        // immediately re-trigger a capture.
        h.app.dispatch(Event::CaptureComplete);
        assert!(!h.app.touch);
        h.app.step();
        assert_eq!(h.app.state(), ViewfinderState::Viewfinder);
        assert_eq!(h.camera_log.take_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn rejected_capture_stays_in_viewfinder() {
        let mut camera = FakeCamera::new(CameraUnit::Rear);
        camera.accept_capture = false;
        let mut h = harness_with(camera);
        let (event, _) = surface_event();
        h.app.dispatch(event);

        h.app.dispatch(Event::Display(DisplayEvent::Touch));
        h.app.step();

        assert_eq!(h.app.state(), ViewfinderState::Viewfinder);
        assert!(!h.app.touch);
        assert_eq!(h.delegate.errors.lock().len(), 1);

        // The user can touch again for another attempt.
        h.app.dispatch(Event::Display(DisplayEvent::Touch));
        h.app.step();
        assert_eq!(h.delegate.errors.lock().len(), 2);
    }

    #[test]
    fn unrecognized_kinds_are_ignored() {
        let mut h = harness();
        let (event, _) = surface_event();
        h.app.dispatch(event);

        h.app.dispatch(Event::Display(DisplayEvent::Release));
        h.app.dispatch(Event::Lifecycle(LifecycleEvent::Background));
        h.app.dispatch(Event::Lifecycle(LifecycleEvent::Foreground));
        h.app.step();

        assert_eq!(h.app.state(), ViewfinderState::Viewfinder);
        assert!(!h.app.touch);
        assert!(!h.app.shutdown);
        assert_eq!(h.camera_log.take_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn end_to_end_capture_sequence() {
        let mut h = harness();

        // Startup → surface created → viewfinder, untouched.
        let (event, surface_log) = surface_event();
        h.app.dispatch(event);
        assert_eq!(h.app.state(), ViewfinderState::Viewfinder);
        assert!(!h.app.touch);
        assert_eq!(surface_log.lock().mirror, Some(false));

        // Touch → tick requests a capture → taking-photo.
        h.app.dispatch(Event::Display(DisplayEvent::Touch));
        h.app.step();
        assert_eq!(h.app.state(), ViewfinderState::TakingPhoto);

        // Completion → viewfinder, untouched.
        h.app.dispatch(Event::CaptureComplete);
        assert_eq!(h.app.state(), ViewfinderState::Viewfinder);
        assert!(!h.app.touch);
    }

    #[test]
    fn run_loop_captures_and_exits() {
        let mut camera = FakeCamera::new(CameraUnit::Rear);
        camera.fire_callbacks = true;
        let (h, mut senders) = harness_with_senders(camera, 2);
        let exit_sender = senders.pop().unwrap();
        let sender = senders.pop().unwrap();

        let (surface, _) = FakeSurface::new();
        sender
            .send(Event::Display(DisplayEvent::SurfaceCreated(Box::new(
                surface,
            ))))
            .unwrap();
        sender.send(Event::Display(DisplayEvent::Touch)).unwrap();
        drop(sender);

        let exit = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            exit_sender
                .send(Event::Lifecycle(LifecycleEvent::Exit))
                .unwrap();
        });

        h.app.run().unwrap();
        exit.join().unwrap();

        assert_eq!(h.camera_log.take_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.photos_written.lock().len(), 1);
        assert_eq!(h.delegate.photos.lock().len(), 1);
        // Viewfinder → taking-photo → viewfinder, then clean teardown.
        assert_eq!(
            *h.delegate.states.lock(),
            vec![
                ViewfinderState::Viewfinder,
                ViewfinderState::TakingPhoto,
                ViewfinderState::Viewfinder,
            ]
        );
        assert!(h.camera_log.stopped.load(Ordering::SeqCst));
        assert!(h.camera_log.closed.load(Ordering::SeqCst));
    }

    #[test]
    fn exit_while_taking_photo_forces_teardown() {
        let camera = FakeCamera::new(CameraUnit::Rear);
        let (h, mut senders) = harness_with_senders(camera, 1);
        let sender = senders.pop().unwrap();

        let (surface, _) = FakeSurface::new();
        sender
            .send(Event::Display(DisplayEvent::SurfaceCreated(Box::new(
                surface,
            ))))
            .unwrap();
        sender.send(Event::Display(DisplayEvent::Touch)).unwrap();
        // The capture never completes; the exit arrives first.
        sender
            .send(Event::Lifecycle(LifecycleEvent::Exit))
            .unwrap();
        drop(sender);

        h.app.run().unwrap();

        assert_eq!(h.camera_log.take_calls.load(Ordering::SeqCst), 1);
        assert!(h.camera_log.stopped.load(Ordering::SeqCst));
        assert!(h.camera_log.closed.load(Ordering::SeqCst));
    }

    #[test]
    fn queue_disconnect_ends_loop_with_teardown() {
        let camera = FakeCamera::new(CameraUnit::Rear);
        let (h, mut senders) = harness_with_senders(camera, 1);
        let sender = senders.pop().unwrap();

        let (surface, _) = FakeSurface::new();
        sender
            .send(Event::Display(DisplayEvent::SurfaceCreated(Box::new(
                surface,
            ))))
            .unwrap();
        drop(sender);

        let result = h.app.run();

        assert_eq!(result.unwrap_err(), CaptureError::QueueDisconnected);
        assert!(h.camera_log.stopped.load(Ordering::SeqCst));
        assert!(h.camera_log.closed.load(Ordering::SeqCst));
    }

    #[test]
    fn configure_failure_closes_camera() {
        let mut camera = FakeCamera::new(CameraUnit::Rear);
        camera.fail_configure = true;
        let camera_log = camera.log.clone();
        let queue = EventQueue::new();
        let bridge = CaptureBridge::new(
            camera.roll(),
            Arc::new(NullSound),
            queue.completion_sender(),
            &CaptureConfig::default(),
        );

        let err = ViewfinderApp::new(camera, bridge, queue, CaptureConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, CaptureError::Configuration(_)));
        assert!(camera_log.closed.load(Ordering::SeqCst));
    }

    #[test]
    fn viewfinder_start_failure_closes_camera() {
        let mut camera = FakeCamera::new(CameraUnit::Rear);
        camera.fail_start = true;
        let camera_log = camera.log.clone();
        let queue = EventQueue::new();
        let bridge = CaptureBridge::new(
            camera.roll(),
            Arc::new(NullSound),
            queue.completion_sender(),
            &CaptureConfig::default(),
        );

        let err = ViewfinderApp::new(camera, bridge, queue, CaptureConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, CaptureError::Viewfinder(_)));
        assert!(camera_log.closed.load(Ordering::SeqCst));
    }
}
