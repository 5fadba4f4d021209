/// Physical camera unit to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraUnit {
    Front,
    Rear,
}

impl CameraUnit {
    /// Front-facing units are mirrored in the viewfinder so the preview
    /// behaves like a mirror.
    pub fn should_mirror(&self) -> bool {
        matches!(self, Self::Front)
    }
}

/// Access flags requested when opening a camera unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessMode {
    /// Read-write device access. Required for running a viewfinder.
    pub read_write: bool,
    /// Access to the device's photo roll (generated output slots).
    pub roll: bool,
}

impl Default for AccessMode {
    fn default() -> Self {
        Self {
            read_write: true,
            roll: true,
        }
    }
}

/// Configuration for a viewfinder capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// Camera unit to open (default: rear).
    pub unit: CameraUnit,

    /// Window group the viewfinder surface is created under. The display
    /// event feed is keyed by this name.
    pub window_group: String,

    /// Window id of the viewfinder surface within the group.
    pub window_id: String,

    /// Named sound played by the shutter callback.
    pub shutter_sound: String,
}

impl CaptureConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.window_group.is_empty() {
            return Err("window group name must not be empty".into());
        }
        if self.window_id.is_empty() {
            return Err("window id must not be empty".into());
        }
        if self.shutter_sound.is_empty() {
            return Err("shutter sound name must not be empty".into());
        }
        Ok(())
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            unit: CameraUnit::Rear,
            window_group: "viewfinder_window_group".into(),
            window_id: "my_viewfinder".into(),
            shutter_sound: "event_camera_shutter".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(CaptureConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_group_rejected() {
        let config = CaptureConfig {
            window_group: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn only_front_unit_mirrors() {
        assert!(CameraUnit::Front.should_mirror());
        assert!(!CameraUnit::Rear.should_mirror());
    }
}
