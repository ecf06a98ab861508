//! Session-wide stop signal
//!
//! An atomic flag for cheap polling plus a channel that is closed on trigger,
//! which wakes every thread blocked in [`ShutdownSignal::wait`] at once.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;

struct Inner {
    triggered: AtomicBool,
    /// Dropped on trigger; never used to send
    sender: Mutex<Option<Sender<()>>>,
    receiver: Receiver<()>,
}

#[derive(Clone)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(0);
        Self {
            inner: Arc::new(Inner {
                triggered: AtomicBool::new(false),
                sender: Mutex::new(Some(sender)),
                receiver,
            }),
        }
    }

    /// Request shutdown. Idempotent.
    pub fn trigger(&self) {
        self.inner.triggered.store(true, Ordering::SeqCst);
        self.inner.sender.lock().take();
    }

    pub fn is_triggered(&self) -> bool {
        self.inner.triggered.load(Ordering::SeqCst)
    }

    /// Block for up to `timeout`. Returns `true` as soon as shutdown is triggered,
    /// `false` if the timeout elapsed first.
    pub fn wait(&self, timeout: Duration) -> bool {
        if self.is_triggered() {
            return true;
        }
        match self.inner.receiver.recv_timeout(timeout) {
            Err(RecvTimeoutError::Timeout) => self.is_triggered(),
            Err(RecvTimeoutError::Disconnected) | Ok(()) => true,
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownSignal")
            .field("triggered", &self.is_triggered())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Instant;

    #[test]
    fn test_wait_times_out() {
        let signal = ShutdownSignal::new();
        let start = Instant::now();
        assert!(!signal.wait(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_trigger_is_idempotent() {
        let signal = ShutdownSignal::new();
        signal.trigger();
        signal.trigger();
        assert!(signal.is_triggered());
        assert!(signal.wait(Duration::from_secs(10)));
    }

    #[test]
    fn test_trigger_wakes_all_waiters() {
        let signal = ShutdownSignal::new();
        let waiters: Vec<_> = (0..3)
            .map(|_| {
                let s = signal.clone();
                thread::spawn(move || {
                    let start = Instant::now();
                    let woke = s.wait(Duration::from_secs(30));
                    (woke, start.elapsed())
                })
            })
            .collect();

        thread::sleep(Duration::from_millis(50));
        signal.trigger();

        for waiter in waiters {
            let (woke, elapsed) = waiter.join().unwrap();
            assert!(woke);
            assert!(elapsed < Duration::from_secs(5));
        }
    }
}
