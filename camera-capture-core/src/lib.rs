//! # camera-capture-core
//!
//! Platform-agnostic camera capture core library.
//!
//! Provides the touch-to-capture viewfinder session: a small cooperative
//! state machine, an event dispatcher, and a blocking main loop coordinating
//! three asynchronous sources (display/touch events, lifecycle events, and
//! camera-driven completion callbacks) on a single thread. Platform
//! backends implement the collaborator traits and plug into the generic
//! `ViewfinderApp`.
//!
//! ## Architecture
//!
//! ```text
//! camera-capture-core (this crate)
//! ├── traits/       ← CaptureDevice, DisplaySurface, PhotoRoll, SoundPlayer, CaptureDelegate
//! ├── models/       ← CaptureError, ViewfinderState, CaptureConfig, Event, PhotoFrame, SavedPhoto
//! ├── events/       ← EventQueue (multiplexed blocking feed), CompletionSender
//! ├── bridge/       ← CaptureBridge (backend callbacks → completion event)
//! ├── session/      ← ViewfinderApp (state machine + dispatcher + main loop)
//! └── storage/      ← photo write loop, metadata sidecars
//! ```

pub mod bridge;
pub mod events;
pub mod models;
pub mod session;
pub mod storage;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use bridge::capture_bridge::CaptureBridge;
pub use events::queue::{CompletionSender, EventQueue, EventSender};
pub use models::config::{AccessMode, CameraUnit, CaptureConfig};
pub use models::error::CaptureError;
pub use models::event::{DisplayEvent, Event, LifecycleEvent};
pub use models::photo::{FrameFormat, PhotoFrame, SavedPhoto};
pub use models::state::ViewfinderState;
pub use session::viewfinder::ViewfinderApp;
pub use traits::capture_delegate::CaptureDelegate;
pub use traits::capture_device::{CaptureDevice, ShutterCallback, StillCallback};
pub use traits::display_surface::DisplaySurface;
pub use traits::photo_roll::{PhotoRoll, PhotoSlot};
pub use traits::sound_player::SoundPlayer;
