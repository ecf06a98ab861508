//! Display Publisher - hands the ticker board to a renderer once it has data

use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::info;

use crate::shutdown::ShutdownSignal;
use crate::ticker_board::TickerBoard;

/// How often the publisher checks the board for its first entry
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Rendering boundary
///
/// `render` is called once and owns the display for the rest of the session.
/// It reads the board through its lock-guarded accessors and should return
/// once `shutdown` fires.
pub trait Renderer: Send {
    fn render(&mut self, board: TickerBoard, shutdown: ShutdownSignal);
}

pub struct DisplayPublisher<R: Renderer> {
    board: TickerBoard,
    renderer: R,
    poll_interval: Duration,
}

impl<R: Renderer> DisplayPublisher<R> {
    pub fn new(board: TickerBoard, renderer: R) -> Self {
        Self {
            board,
            renderer,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Block until the board has an entry. Returns `false` if shutdown came first.
    ///
    /// The board lock is only held for the emptiness check, never across the wait.
    pub fn wait_for_data(&self, shutdown: &ShutdownSignal) -> bool {
        loop {
            if !self.board.is_empty() {
                return true;
            }
            if shutdown.wait(self.poll_interval) {
                return false;
            }
        }
    }

    /// Wait for data, then run the renderer. Returns whether the renderer ran.
    pub fn publish(mut self, shutdown: ShutdownSignal) -> bool {
        if !self.wait_for_data(&shutdown) {
            info!("Display publisher stopped before any data arrived");
            return false;
        }
        info!(
            "Ticker board has {} entries, starting display",
            self.board.len()
        );
        self.renderer.render(self.board.clone(), shutdown);
        true
    }
}

impl<R: Renderer + 'static> DisplayPublisher<R> {
    pub fn spawn(self, shutdown: ShutdownSignal) -> std::io::Result<JoinHandle<bool>> {
        thread::Builder::new()
            .name("display".to_string())
            .spawn(move || self.publish(shutdown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gnat_core::Bar;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    struct CountingRenderer {
        calls: Arc<AtomicUsize>,
        seen_len: Arc<AtomicUsize>,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, board: TickerBoard, _shutdown: ShutdownSignal) {
            self.seen_len.store(board.len(), Ordering::SeqCst);
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn bar(symbol: &str) -> Bar {
        Bar {
            symbol: symbol.to_string(),
            timestamp: Utc::now(),
            open: dec!(1),
            high: dec!(1),
            low: dec!(1),
            close: dec!(1),
            volume: dec!(1),
        }
    }

    #[test]
    fn test_gated_until_first_entry() {
        let board = TickerBoard::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen_len = Arc::new(AtomicUsize::new(0));
        let renderer = CountingRenderer {
            calls: calls.clone(),
            seen_len: seen_len.clone(),
        };
        let poll = Duration::from_millis(20);
        let shutdown = ShutdownSignal::new();
        let handle = DisplayPublisher::new(board.clone(), renderer)
            .with_poll_interval(poll)
            .spawn(shutdown.clone())
            .unwrap();

        thread::sleep(Duration::from_millis(100));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let inserted_at = Instant::now();
        board.upsert(bar("AAPL"), Utc::now());
        assert!(handle.join().unwrap());
        assert!(inserted_at.elapsed() < poll * 10);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen_len.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_shutdown_before_data_skips_renderer() {
        let calls = Arc::new(AtomicUsize::new(0));
        let renderer = CountingRenderer {
            calls: calls.clone(),
            seen_len: Arc::new(AtomicUsize::new(0)),
        };
        let shutdown = ShutdownSignal::new();
        let handle = DisplayPublisher::new(TickerBoard::new(), renderer)
            .spawn(shutdown.clone())
            .unwrap();

        // default 5s poll; shutdown must cut the wait short
        shutdown.trigger();
        assert!(!handle.join().unwrap());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
