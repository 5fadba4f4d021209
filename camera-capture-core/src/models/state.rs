/// Viewfinder session state machine.
///
/// State transitions:
/// ```text
/// startup → viewfinder ⇄ taking-photo
/// ```
/// `Startup → Viewfinder` is forced externally when the display surface is
/// created. `Viewfinder → TakingPhoto` happens when a touch is consumed and
/// the capture request is accepted. `TakingPhoto → Viewfinder` happens when
/// the capture-complete event is observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewfinderState {
    Startup,
    Viewfinder,
    TakingPhoto,
}

impl ViewfinderState {
    pub fn is_startup(&self) -> bool {
        matches!(self, Self::Startup)
    }

    pub fn is_viewfinder(&self) -> bool {
        matches!(self, Self::Viewfinder)
    }

    pub fn is_taking_photo(&self) -> bool {
        matches!(self, Self::TakingPhoto)
    }
}
