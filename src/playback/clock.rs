use crate::types::playback_state::PlaybackState;

/// Pure playback clock state machine. All the transport rules live here;
/// the actual tick schedule is supplied from outside (see
/// [`crate::playback::engine::PlaybackEngine`]), which keeps this type
/// synchronous and directly testable.
///
/// States are Stopped (`current_time == 0`, not playing), Playing, and
/// Paused. Reaching the duration while playing drops into Paused with the
/// playhead parked at the end.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    state: PlaybackState,
    duration: f64,
}

impl PlaybackClock {
    pub fn new(duration: f64) -> Self {
        PlaybackClock {
            state: PlaybackState::new(),
            duration: duration.max(f64::MIN_POSITIVE),
        }
    }

    pub fn current_time(&self) -> f64 {
        self.state.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn rate(&self) -> f64 {
        self.state.rate
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn snapshot(&self) -> PlaybackState {
        self.state.clone()
    }

    pub fn set_rate(&mut self, rate: f64) {
        if rate > 0.0 {
            self.state.rate = rate;
        }
    }

    /// Enter the Playing state. A no-op while already playing or with the
    /// playhead parked at the end. Returns whether playback started.
    pub fn play(&mut self) -> bool {
        if self.state.is_playing || self.state.current_time >= self.duration {
            return false;
        }
        self.state.is_playing = true;
        true
    }

    /// Stop advancing but keep the playhead where it is.
    pub fn pause(&mut self) {
        self.state.is_playing = false;
    }

    /// Stop advancing and rewind the playhead to the start.
    pub fn stop(&mut self) {
        self.state.is_playing = false;
        self.state.current_time = 0.0;
    }

    /// Move the playhead, clamped to `[0, duration]`. Legal in any state and
    /// never changes the play/pause label.
    pub fn seek(&mut self, time: f64) {
        self.state.current_time = time.clamp(0.0, self.duration);
    }

    /// Advance the playhead by `delta` seconds of playback time, clamping at
    /// the duration. Hitting the end leaves the Playing state (auto-stop).
    /// Returns whether the clock is still playing afterwards, so a tick
    /// schedule knows when to wind down.
    pub fn tick(&mut self, delta: f64) -> bool {
        if !self.state.is_playing {
            return false;
        }
        self.state.current_time = (self.state.current_time + delta).min(self.duration);
        if self.state.current_time >= self.duration {
            self.state.is_playing = false;
        }
        self.state.is_playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::choreography::Choreography;
    use crate::types::formation::Formation;

    #[test]
    fn test_initial_state_is_stopped() {
        let clock = PlaybackClock::new(120.0);
        assert_eq!(clock.current_time(), 0.0);
        assert!(!clock.is_playing());
        assert_eq!(clock.rate(), 1.0);
    }

    #[test]
    fn test_seek_clamps_both_ends() {
        let mut clock = PlaybackClock::new(120.0);
        clock.seek(-5.0);
        assert_eq!(clock.current_time(), 0.0);
        clock.seek(220.0);
        assert_eq!(clock.current_time(), 120.0);
    }

    #[test]
    fn test_seek_preserves_play_state() {
        let mut clock = PlaybackClock::new(120.0);
        clock.play();
        clock.seek(30.0);
        assert!(clock.is_playing());
        clock.pause();
        clock.seek(40.0);
        assert!(!clock.is_playing());
        assert_eq!(clock.current_time(), 40.0);
    }

    #[test]
    fn test_play_is_idempotent() {
        let mut clock = PlaybackClock::new(120.0);
        assert!(clock.play());
        assert!(!clock.play());
    }

    #[test]
    fn test_play_at_end_is_noop() {
        let mut clock = PlaybackClock::new(120.0);
        clock.seek(120.0);
        assert!(!clock.play());
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_pause_retains_time_stop_rewinds() {
        let mut clock = PlaybackClock::new(120.0);
        clock.play();
        clock.tick(0.1);
        clock.tick(0.1);
        clock.pause();
        assert!(!clock.is_playing());
        assert!((clock.current_time() - 0.2).abs() < 1e-9);

        clock.play();
        clock.stop();
        assert!(!clock.is_playing());
        assert_eq!(clock.current_time(), 0.0);
    }

    #[test]
    fn test_tick_only_advances_while_playing() {
        let mut clock = PlaybackClock::new(120.0);
        assert!(!clock.tick(0.1));
        assert_eq!(clock.current_time(), 0.0);
    }

    #[test]
    fn test_auto_stop_at_duration() {
        let mut clock = PlaybackClock::new(10.0);
        clock.seek(10.0 - 0.05);
        assert!(clock.play());
        // One 100ms tick at rate 1 overshoots; the clamp parks the playhead
        // exactly at the duration and leaves the Playing state.
        assert!(!clock.tick(0.1));
        assert_eq!(clock.current_time(), 10.0);
        assert!(!clock.is_playing());
        // Further ticks change nothing.
        assert!(!clock.tick(0.1));
        assert_eq!(clock.current_time(), 10.0);
    }

    #[test]
    fn test_rate_scales_tick_delta() {
        let mut clock = PlaybackClock::new(120.0);
        clock.set_rate(2.0);
        clock.play();
        clock.tick(0.1 * clock.rate());
        assert!((clock.current_time() - 0.2).abs() < 1e-9);

        clock.set_rate(0.0); // rejected, rate stays positive
        assert_eq!(clock.rate(), 2.0);
    }

    // End-to-end transport scenario against a real choreography: play to the
    // second cue, check the resolved formation, then stop and re-resolve.
    #[test]
    fn test_playback_drives_formation_resolution() {
        let mut choreo = Choreography::new("Recital", 120.0);
        let mut a = Formation::new("Opening", 0.0);
        a.id = "a".to_string();
        let mut b = Formation::new("Chorus", 60.0);
        b.id = "b".to_string();
        choreo.add_formation(a);
        choreo.add_formation(b);

        let mut clock = PlaybackClock::new(choreo.duration);
        assert!(clock.play());
        // 650 ticks of 100ms at rate 1 ~= 65 seconds of playback time.
        for _ in 0..650 {
            clock.tick(0.1 * clock.rate());
        }
        assert!(clock.current_time() > 60.0);
        assert_eq!(
            choreo.active_formation_at(clock.current_time()).unwrap().id,
            "b"
        );

        clock.stop();
        assert_eq!(clock.current_time(), 0.0);
        assert_eq!(
            choreo.active_formation_at(clock.current_time()).unwrap().id,
            "a"
        );
    }
}
