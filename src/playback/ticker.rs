use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

/// A cancellable repeating-task handle.
///
/// Runs `tick` on a background thread every `interval` until the callback
/// returns `false` or the handle is cancelled. [`Ticker::cancel`] is the one
/// cancellation point for the whole playback schedule: it joins the worker,
/// so once it returns no further tick can fire.
pub struct Ticker {
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn<F>(interval: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if !tick() {
                            break;
                        }
                    }
                    // Cancelled (sender dropped or signalled).
                    _ => break,
                }
            }
        });
        Ticker {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Cancel the schedule and wait for the worker to exit. Safe to call
    /// more than once. An in-flight tick is allowed to finish; no tick
    /// starts after this returns.
    pub fn cancel(&mut self) {
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Whether the worker thread has already wound down on its own (the
    /// callback returned `false`).
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|h| h.is_finished())
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_ticker_fires_repeatedly() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);
        let mut ticker = Ticker::spawn(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        thread::sleep(Duration::from_millis(200));
        ticker.cancel();
        assert!(count.load(Ordering::SeqCst) >= 3);
    }

    #[test]
    fn test_cancel_is_deterministic() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);
        let mut ticker = Ticker::spawn(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });
        thread::sleep(Duration::from_millis(50));
        ticker.cancel();
        let after_cancel = count.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(100));
        // cancel() joined the worker, so the count is frozen.
        assert_eq!(count.load(Ordering::SeqCst), after_cancel);
    }

    #[test]
    fn test_callback_false_terminates_schedule() {
        let count = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&count);
        let ticker = Ticker::spawn(Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::SeqCst) < 2
        });
        thread::sleep(Duration::from_millis(150));
        assert!(ticker.is_finished());
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_cancel_twice_is_safe() {
        let mut ticker = Ticker::spawn(Duration::from_millis(10), || true);
        ticker.cancel();
        ticker.cancel();
        assert!(ticker.is_finished());
    }
}
