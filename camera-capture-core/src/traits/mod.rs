pub mod capture_delegate;
pub mod capture_device;
pub mod display_surface;
pub mod photo_roll;
pub mod sound_player;
