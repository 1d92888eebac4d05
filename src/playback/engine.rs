use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::playback::clock::PlaybackClock;
use crate::playback::ticker::Ticker;
use crate::types::playback_state::PlaybackState;

/// Reference tick schedule: 10 Hz, each tick worth `0.1 * rate` seconds of
/// playback time.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Owns the clock for the loaded choreography and drives it on a real tick
/// schedule. One engine exists per open choreography view; loading a
/// different choreography replaces the engine, which resets the transport.
///
/// `play` spawns a [`Ticker`]; `pause`/`stop` cancel it before touching the
/// clock, so after either call returns no scheduled tick can still move the
/// playhead.
pub struct PlaybackEngine {
    clock: Arc<Mutex<PlaybackClock>>,
    ticker: Option<Ticker>,
}

impl PlaybackEngine {
    pub fn new(duration: f64) -> Self {
        PlaybackEngine {
            clock: Arc::new(Mutex::new(PlaybackClock::new(duration))),
            ticker: None,
        }
    }

    pub fn play(&mut self) {
        let started = self.clock.lock().unwrap().play();
        if !started {
            return;
        }
        tracing::debug!("playback started");
        // Reap a ticker left over from a previous auto-stop.
        self.cancel_ticker();
        let clock = Arc::clone(&self.clock);
        self.ticker = Some(Ticker::spawn(TICK_INTERVAL, move || {
            let mut clock = clock.lock().unwrap();
            let delta = TICK_INTERVAL.as_secs_f64() * clock.rate();
            clock.tick(delta)
        }));
    }

    pub fn pause(&mut self) {
        self.cancel_ticker();
        self.clock.lock().unwrap().pause();
        tracing::debug!("playback paused");
    }

    pub fn stop(&mut self) {
        self.cancel_ticker();
        self.clock.lock().unwrap().stop();
        tracing::debug!("playback stopped");
    }

    pub fn seek(&mut self, time: f64) {
        self.clock.lock().unwrap().seek(time);
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.clock.lock().unwrap().set_rate(rate);
    }

    pub fn current_time(&self) -> f64 {
        self.clock.lock().unwrap().current_time()
    }

    pub fn is_playing(&self) -> bool {
        self.clock.lock().unwrap().is_playing()
    }

    pub fn duration(&self) -> f64 {
        self.clock.lock().unwrap().duration()
    }

    pub fn snapshot(&self) -> PlaybackState {
        self.clock.lock().unwrap().snapshot()
    }

    fn cancel_ticker(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.cancel();
        }
    }
}

impl Drop for PlaybackEngine {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}
