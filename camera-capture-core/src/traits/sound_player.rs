/// Fire-and-forget playback of a named system sound.
///
/// Playback failures are not observable; the shutter cue is best-effort by
/// contract.
pub trait SoundPlayer: Send + Sync {
    fn play(&self, name: &str);
}
