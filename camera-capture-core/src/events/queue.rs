use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::models::error::CaptureError;
use crate::models::event::Event;

struct Inner {
    events: VecDeque<Event>,
    senders: usize,
    receiver_alive: bool,
}

struct Shared {
    inner: Mutex<Inner>,
    ready: Condvar,
}

impl Shared {
    fn push(&self, event: Event) -> Result<(), CaptureError> {
        let mut inner = self.inner.lock();
        if !inner.receiver_alive {
            return Err(CaptureError::QueueDisconnected);
        }
        inner.events.push_back(event);
        drop(inner);
        self.ready.notify_one();
        Ok(())
    }
}

/// Single-consumer multiplexed event queue.
///
/// Every event domain (display, lifecycle, and the private capture-complete
/// route) feeds one FIFO queue, and the session blocks on `next` with no
/// timeout. This is the design's only synchronization point: backend threads
/// never mutate session state, they only post events here.
pub struct EventQueue {
    shared: Arc<Shared>,
}

/// Cloneable cross-thread handle for posting platform events.
///
/// The queue counts these handles: once every one is gone and the queue is
/// drained, `next` reports a disconnect instead of blocking forever.
pub struct EventSender {
    shared: Arc<Shared>,
}

/// Strongly typed handle for the private capture-complete route.
///
/// Can only post `Event::CaptureComplete`, and does not keep the queue
/// "connected": completions are a consequence of captures the session
/// itself started, not an independent event source. The callback context
/// has no error surface, so send failures are logged and swallowed.
#[derive(Clone)]
pub struct CompletionSender {
    shared: Arc<Shared>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(Inner {
                    events: VecDeque::new(),
                    senders: 0,
                    receiver_alive: true,
                }),
                ready: Condvar::new(),
            }),
        }
    }

    pub fn sender(&self) -> EventSender {
        self.shared.inner.lock().senders += 1;
        EventSender {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn completion_sender(&self) -> CompletionSender {
        CompletionSender {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Block until an event is available.
    ///
    /// Returns `QueueDisconnected` only once every platform sender is gone
    /// and the queue is drained; at that point nothing can ever arrive.
    pub fn next(&mut self) -> Result<Event, CaptureError> {
        let mut inner = self.shared.inner.lock();
        loop {
            if let Some(event) = inner.events.pop_front() {
                return Ok(event);
            }
            if inner.senders == 0 {
                return Err(CaptureError::QueueDisconnected);
            }
            self.shared.ready.wait(&mut inner);
        }
    }

    /// Bounded variant of `next` for tests and diagnostics.
    ///
    /// Returns `Ok(None)` if no event arrived within `timeout`.
    pub fn next_timeout(&mut self, timeout: Duration) -> Result<Option<Event>, CaptureError> {
        let deadline = Instant::now() + timeout;
        let mut inner = self.shared.inner.lock();
        loop {
            if let Some(event) = inner.events.pop_front() {
                return Ok(Some(event));
            }
            if inner.senders == 0 {
                return Err(CaptureError::QueueDisconnected);
            }
            if self.shared.ready.wait_until(&mut inner, deadline).timed_out() {
                return Ok(inner.events.pop_front());
            }
        }
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EventQueue {
    fn drop(&mut self) {
        self.shared.inner.lock().receiver_alive = false;
    }
}

impl EventSender {
    /// Post an event. Fails only if the consuming queue is gone.
    pub fn send(&self, event: Event) -> Result<(), CaptureError> {
        self.shared.push(event)
    }
}

impl Clone for EventSender {
    fn clone(&self) -> Self {
        self.shared.inner.lock().senders += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for EventSender {
    fn drop(&mut self) {
        let mut inner = self.shared.inner.lock();
        inner.senders -= 1;
        let last = inner.senders == 0;
        drop(inner);
        if last {
            // Wake a receiver blocked on an empty queue so it can observe
            // the disconnect.
            self.shared.ready.notify_all();
        }
    }
}

impl CompletionSender {
    /// Post a capture-complete event.
    pub fn signal(&self) {
        if let Err(e) = self.shared.push(Event::CaptureComplete) {
            log::warn!("capture-complete signal dropped: {}", e);
        }
    }
}
