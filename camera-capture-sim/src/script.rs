use std::thread;
use std::time::Duration;

use camera_capture_core::events::queue::EventSender;
use camera_capture_core::models::error::CaptureError;
use camera_capture_core::models::event::{DisplayEvent, Event, LifecycleEvent};

/// Scripted user input: a fixed number of touches at a fixed interval,
/// followed by the lifecycle exit event.
///
/// Stands in for the human finger in the demo and in end-to-end tests.
pub struct InputScript {
    events: EventSender,
}

impl InputScript {
    pub fn new(events: EventSender) -> Self {
        Self { events }
    }

    /// Run the script on its own thread.
    pub fn spawn(
        self,
        touches: usize,
        interval: Duration,
    ) -> Result<thread::JoinHandle<()>, CaptureError> {
        thread::Builder::new()
            .name("input-script".into())
            .spawn(move || {
                for _ in 0..touches {
                    thread::sleep(interval);
                    if self.events.send(Event::Display(DisplayEvent::Touch)).is_err() {
                        return;
                    }
                }
                thread::sleep(interval);
                let _ = self.events.send(Event::Lifecycle(LifecycleEvent::Exit));
            })
            .map_err(|e| {
                CaptureError::Configuration(format!("failed to spawn input script: {}", e))
            })
    }
}
