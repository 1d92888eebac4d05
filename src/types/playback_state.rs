/// Ephemeral transport state for the loaded choreography. Never persisted;
/// rebuilt from scratch when a different choreography is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Playhead position in seconds, always within `[0, duration]`.
    pub current_time: f64,
    pub is_playing: bool,
    /// Playback speed multiplier, always positive.
    pub rate: f64,
}

impl PlaybackState {
    pub fn new() -> Self {
        PlaybackState {
            current_time: 0.0,
            is_playing: false,
            rate: 1.0,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
