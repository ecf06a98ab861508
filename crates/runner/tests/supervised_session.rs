//! Integration test: full supervised sessions
//!
//! Console script -> Input Listener -> CommandQueue -> Trading Loop -> Broker
//! with the display publisher running alongside.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use chrono::Utc;
use gnat_core::{Fill, OrderRequest};
use gnat_gateway::adapters::{DummyConnector, PaperBroker};
use gnat_gateway::{ConnectorFactory, Connectors};
use gnat_ports::{Broker, ConnectorResult, Prompter};
use gnat_runner::{
    CommandQueue, CsvStorage, DisplayPublisher, InputListener, Renderer, SessionConfig,
    ShutdownSignal, Supervisor, TickerBoard, TradingLoop,
};
use parking_lot::Mutex;
use rust_decimal_macros::dec;

const CYCLE: Duration = Duration::from_millis(10);

/// Replays console lines, waiting for the queue to drain before each one
struct PacedConsole {
    lines: VecDeque<String>,
    queue: CommandQueue,
    output: Vec<String>,
}

impl PacedConsole {
    fn new(lines: &[&str], queue: CommandQueue) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            queue,
            output: Vec::new(),
        }
    }
}

impl Prompter for PacedConsole {
    fn say(&mut self, message: &str) -> io::Result<()> {
        self.output.push(message.to_string());
        Ok(())
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.output.push(question.to_string());
        let deadline = Instant::now() + Duration::from_secs(5);
        while !self.queue.is_empty() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(2));
        }
        Ok(self.lines.pop_front())
    }
}

/// Renderer that only records that it ran
#[derive(Clone, Default)]
struct FlagRenderer {
    ran: Arc<AtomicBool>,
}

impl Renderer for FlagRenderer {
    fn render(&mut self, board: TickerBoard, shutdown: ShutdownSignal) {
        assert!(!board.is_empty());
        self.ran.store(true, Ordering::SeqCst);
        shutdown.wait(Duration::from_secs(30));
    }
}

/// Broker that fills everything and keeps the submission order
#[derive(Default)]
struct RecordingBroker {
    orders: Mutex<Vec<OrderRequest>>,
}

impl Broker for RecordingBroker {
    fn name(&self) -> &str {
        "recording"
    }

    fn submit(&self, order: &OrderRequest) -> ConnectorResult<Fill> {
        self.orders.lock().push(order.clone());
        Ok(Fill {
            client_order_id: order.client_order_id,
            broker_order_id: None,
            symbol: order.symbol.clone(),
            side: order.side,
            quantity: order.quantity,
            price: Some(dec!(1)),
            filled_at: Utc::now(),
        })
    }
}

fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

/// dummy streamer + paper broker driven by a console script
#[test]
fn test_console_commands_reach_paper_broker() {
    let _ = env_logger::try_init();

    let dummy = Arc::new(DummyConnector::seeded(9));
    let paper = Arc::new(PaperBroker::new(dummy.clone()));
    let connectors = Connectors {
        streamer: dummy,
        broker: paper.clone(),
    };

    let mut supervisor = Supervisor::new();
    let renderer = FlagRenderer::default();
    let trading_loop = TradingLoop::new(
        &connectors,
        vec!["AAPL".to_string(), "@DOGE".to_string()],
        supervisor.queue(),
        supervisor.board(),
    )
    .with_interval(CYCLE);
    let display = DisplayPublisher::new(supervisor.board(), renderer.clone())
        .with_poll_interval(CYCLE);
    supervisor.start(trading_loop, display).unwrap();
    assert!(wait_until(|| renderer.ran.load(Ordering::SeqCst)), "display never started");

    let mut console = PacedConsole::new(
        &[
            "buy AAPL 10",
            "buy AAPL -5",
            "buy @DOGE 5",
            "sell",
            "sell AAPL 4",
            "quit",
        ],
        supervisor.queue(),
    );
    let summary = supervisor.listen(&mut console).unwrap();
    let board = supervisor.board();
    let report = supervisor.join().unwrap();

    assert_eq!(summary.enqueued, 3);
    assert_eq!(summary.rejected, 2);
    assert!(console.output.contains(&"AMOUNT is not positive".to_string()));
    assert!(console.output.contains(&"Goodbye!".to_string()));

    let account = paper.account();
    assert_eq!(account.position("AAPL"), dec!(6));
    assert_eq!(account.position("@DOGE"), dec!(5));
    assert!(account.cash < dec!(1000000));

    assert!(report.cycles >= 1);
    assert!(report.displayed);
    assert!(renderer.ran.load(Ordering::SeqCst));
    assert_eq!(board.len(), 2);
}

/// Commands pushed while the loop drains concurrently are submitted once each, in order
#[test]
fn test_fifo_without_loss_under_concurrent_drain() {
    let broker = Arc::new(RecordingBroker::default());
    let connectors = Connectors {
        streamer: Arc::new(DummyConnector::seeded(1)),
        broker: broker.clone(),
    };

    let mut supervisor = Supervisor::new();
    let trading_loop = TradingLoop::new(
        &connectors,
        vec!["AAPL".to_string()],
        supervisor.queue(),
        supervisor.board(),
    )
    .with_interval(Duration::from_millis(1));
    let display = DisplayPublisher::new(supervisor.board(), FlagRenderer::default());
    supervisor.start(trading_loop, display).unwrap();

    let lines: Vec<String> = (1..=200)
        .map(|i| format!("{} AAPL {}", if i % 2 == 0 { "sell" } else { "buy" }, i))
        .chain(std::iter::once("q".to_string()))
        .collect();
    let mut console = ScriptConsole(lines.into_iter().collect());
    let queue = supervisor.queue();
    let summary = InputListener::new(&mut console, queue.clone()).run().unwrap();
    assert_eq!(summary.enqueued, 200);

    assert!(wait_until(|| queue.is_empty()), "queue never drained");
    supervisor.join().unwrap();

    let quantities: Vec<_> = broker.orders.lock().iter().map(|o| o.quantity).collect();
    let expected: Vec<_> = (1..=200i64).map(rust_decimal::Decimal::from).collect();
    assert_eq!(quantities, expected);
}

struct ScriptConsole(VecDeque<String>);

impl Prompter for ScriptConsole {
    fn say(&mut self, _message: &str) -> io::Result<()> {
        Ok(())
    }

    fn ask(&mut self, _question: &str) -> io::Result<Option<String>> {
        Ok(self.0.pop_front())
    }
}

/// YAML config -> factory -> session writing bar history
#[test]
fn test_configured_session_writes_history() {
    let dir = tempfile::tempdir().unwrap();
    let yaml = format!(
        "assets: AAPL, @DOGE\nstreamer: dummy\nbroker: paper\nstorage_dir: {}\n",
        dir.path().display()
    );
    let session = SessionConfig::from_yaml(&yaml).unwrap();

    let mut no_prompts = ScriptConsole(VecDeque::new());
    let connectors = ConnectorFactory::new()
        .with_dummy_seed(3)
        .resolve(session.connectors, &mut no_prompts)
        .unwrap();
    assert!(!connectors.is_aliased());

    let mut supervisor = Supervisor::new();
    let storage = CsvStorage::new(session.storage_dir.clone());
    let trading_loop = TradingLoop::new(
        &connectors,
        session.symbols.clone(),
        supervisor.queue(),
        supervisor.board(),
    )
    .with_storage(Box::new(storage.clone()))
    .with_interval(CYCLE);
    let display =
        DisplayPublisher::new(supervisor.board(), FlagRenderer::default()).with_poll_interval(CYCLE);
    supervisor.start(trading_loop, display).unwrap();

    let board = supervisor.board();
    assert!(wait_until(|| board.get("@DOGE").is_some_and(|s| s.bars_seen >= 3)));
    let report = supervisor.join().unwrap();
    assert!(report.cycles >= 3);

    for symbol in &session.symbols {
        let history = std::fs::read_to_string(storage.path_for(symbol)).unwrap();
        let rows = history.lines().count() - 1;
        assert!(rows as u64 >= 3, "{} has {} rows", symbol, rows);
    }
}
