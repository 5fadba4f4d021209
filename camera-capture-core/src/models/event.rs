use std::fmt;

use crate::traits::display_surface::DisplaySurface;

/// One event from the multiplexed platform queue, tagged by domain.
///
/// The dispatcher routes each event to exactly one handler based on this
/// tag. Kinds a handler does not recognize are ignored.
pub enum Event {
    /// Display/touch domain: surface lifecycle and touch input.
    Display(DisplayEvent),
    /// Application lifecycle domain.
    Lifecycle(LifecycleEvent),
    /// Private capture-complete domain: the photo pipeline finished,
    /// successfully or not.
    CaptureComplete,
}

/// Events from the display/touch domain.
pub enum DisplayEvent {
    /// A finger touched the screen.
    Touch,
    /// A finger was lifted. Recognized but not acted on.
    Release,
    /// The viewfinder surface was created and can now be configured.
    SurfaceCreated(Box<dyn DisplaySurface>),
}

/// Events from the application lifecycle domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The application was asked to exit.
    Exit,
    /// The application moved to the background. Recognized but not acted on.
    Background,
    /// The application returned to the foreground. Recognized but not acted on.
    Foreground,
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Display(e) => f.debug_tuple("Display").field(e).finish(),
            Self::Lifecycle(e) => f.debug_tuple("Lifecycle").field(e).finish(),
            Self::CaptureComplete => write!(f, "CaptureComplete"),
        }
    }
}

impl fmt::Debug for DisplayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Touch => write!(f, "Touch"),
            Self::Release => write!(f, "Release"),
            Self::SurfaceCreated(_) => write!(f, "SurfaceCreated"),
        }
    }
}
