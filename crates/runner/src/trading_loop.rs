//! Trading Loop - periodic market data, strategy and execution cycle
//!
//! Each cycle:
//! 1. Fetch the latest bar for every tracked symbol (no lock held)
//! 2. Append the bars to storage
//! 3. Refresh the ticker board
//! 4. Let the strategy react to the bars
//! 5. Drain the command queue into market orders
//! 6. Submit strategy orders, then user orders, to the broker
//!
//! A streamer failure skips the cycle and leaves the queue untouched. A broker
//! failure only affects the order it was raised for.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::Utc;
use gnat_core::{Interval, OrderRequest, Symbol};
use gnat_gateway::Connectors;
use gnat_ports::{Broker, Storage, Strategy, Streamer};
use log::{debug, error, info, warn};

use crate::command_queue::CommandQueue;
use crate::shutdown::ShutdownSignal;
use crate::strategy::Watchlist;
use crate::ticker_board::TickerBoard;

/// Outcome of one cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// True when the streamer failed and nothing else ran
    pub skipped: bool,
    pub bars: usize,
    pub submitted: usize,
    pub filled: usize,
    pub failed: usize,
}

impl CycleReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

pub struct TradingLoop {
    streamer: Arc<dyn Streamer>,
    broker: Arc<dyn Broker>,
    strategy: Box<dyn Strategy>,
    storage: Option<Box<dyn Storage>>,
    symbols: Vec<Symbol>,
    queue: CommandQueue,
    board: TickerBoard,
    interval: Duration,
}

impl TradingLoop {
    /// Loop over `connectors` with the watchlist strategy, no storage and a one minute interval
    pub fn new(
        connectors: &Connectors,
        symbols: Vec<Symbol>,
        queue: CommandQueue,
        board: TickerBoard,
    ) -> Self {
        let mut strategy: Box<dyn Strategy> = Box::new(Watchlist::new());
        strategy.set_symbols(&symbols);
        Self {
            streamer: connectors.streamer.clone(),
            broker: connectors.broker.clone(),
            strategy,
            storage: None,
            symbols,
            queue,
            board,
            interval: Interval::default().as_duration(),
        }
    }

    pub fn with_strategy(mut self, mut strategy: Box<dyn Strategy>) -> Self {
        strategy.set_symbols(&self.symbols);
        self.strategy = strategy;
        self
    }

    pub fn with_storage(mut self, storage: Box<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run one full cycle
    pub fn run_cycle(&mut self) -> CycleReport {
        let bars = match self.streamer.latest_bars(&self.symbols) {
            Ok(bars) => bars,
            Err(e) => {
                warn!(
                    "Cycle skipped: {} failed to fetch bars: {} ({} commands held)",
                    self.streamer.name(),
                    e,
                    self.queue.len()
                );
                return CycleReport::skipped();
            }
        };

        if let Some(storage) = self.storage.as_mut() {
            for bar in &bars {
                if let Err(e) = storage.append(bar) {
                    error!("Failed to store bar for {}: {}", bar.symbol, e);
                }
            }
        }

        let now = Utc::now();
        for bar in &bars {
            self.board.upsert(bar.clone(), now);
        }

        let mut orders = self.strategy.on_bars(&bars);
        let commands = self.queue.drain();
        for command in &commands {
            debug!("Executing user command '{}'", command);
        }
        orders.extend(commands.iter().map(OrderRequest::from));

        let mut report = CycleReport {
            bars: bars.len(),
            ..CycleReport::default()
        };
        for order in &orders {
            report.submitted += 1;
            match self.broker.submit(order) {
                Ok(fill) => {
                    match fill.price {
                        Some(price) => info!(
                            "Filled {} {} {} @ {}",
                            fill.side, fill.quantity, fill.symbol, price
                        ),
                        None => info!(
                            "Accepted {} {} {} (broker id {})",
                            fill.side,
                            fill.quantity,
                            fill.symbol,
                            fill.broker_order_id.as_deref().unwrap_or("-")
                        ),
                    }
                    self.strategy.on_fill(&fill);
                    report.filled += 1;
                }
                Err(e) => {
                    warn!(
                        "Order {} {} {} failed on {}: {}",
                        order.side,
                        order.quantity,
                        order.symbol,
                        self.broker.name(),
                        e
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Run cycles until shutdown
    ///
    /// The first cycle runs immediately; later cycles start on multiples of the
    /// interval from the first. Ticks missed by a slow cycle are skipped.
    pub fn run(mut self, shutdown: ShutdownSignal) -> u64 {
        info!(
            "Trading loop started: {} symbols every {:?} (strategy={})",
            self.symbols.len(),
            self.interval,
            self.strategy.name()
        );

        let period = self.interval.max(Duration::from_millis(1));
        let start = Instant::now();
        let mut cycles: u64 = 0;

        while !shutdown.is_triggered() {
            let report = self.run_cycle();
            cycles += 1;
            if !report.skipped {
                info!(
                    "Cycle {}: {} bars, {} orders ({} filled, {} failed)",
                    cycles, report.bars, report.submitted, report.filled, report.failed
                );
            }

            let now = Instant::now();
            let ticks = now.duration_since(start).as_nanos() / period.as_nanos() + 1;
            let next = start + period * u32::try_from(ticks).unwrap_or(u32::MAX);
            if shutdown.wait(next.saturating_duration_since(now)) {
                break;
            }
        }

        info!("Trading loop stopped after {} cycles", cycles);
        cycles
    }

    pub fn spawn(self, shutdown: ShutdownSignal) -> std::io::Result<JoinHandle<u64>> {
        thread::Builder::new()
            .name("trading-loop".to_string())
            .spawn(move || self.run(shutdown))
    }
}
