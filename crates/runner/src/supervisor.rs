//! Supervisor - owns the shared structures and the worker threads of a session

use std::thread::JoinHandle;

use gnat_ports::Prompter;
use log::{info, warn};

use crate::command_queue::CommandQueue;
use crate::display::{DisplayPublisher, Renderer};
use crate::error::{Result, RunnerError};
use crate::listener::{InputListener, ListenerSummary};
use crate::shutdown::ShutdownSignal;
use crate::ticker_board::TickerBoard;
use crate::trading_loop::TradingLoop;

/// What the workers did, collected on join
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub cycles: u64,
    pub displayed: bool,
}

pub struct Supervisor {
    queue: CommandQueue,
    board: TickerBoard,
    shutdown: ShutdownSignal,
    trading: Option<JoinHandle<u64>>,
    display: Option<JoinHandle<bool>>,
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            queue: CommandQueue::new(),
            board: TickerBoard::new(),
            shutdown: ShutdownSignal::new(),
            trading: None,
            display: None,
        }
    }

    pub fn queue(&self) -> CommandQueue {
        self.queue.clone()
    }

    pub fn board(&self) -> TickerBoard {
        self.board.clone()
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.clone()
    }

    /// Start the trading loop and display publisher on their own threads
    pub fn start<R: Renderer + 'static>(
        &mut self,
        trading_loop: TradingLoop,
        display: DisplayPublisher<R>,
    ) -> Result<()> {
        let trading = trading_loop
            .spawn(self.shutdown.clone())
            .map_err(|source| RunnerError::Spawn {
                worker: "trading-loop",
                source,
            })?;
        self.trading = Some(trading);

        match display.spawn(self.shutdown.clone()) {
            Ok(handle) => {
                self.display = Some(handle);
                Ok(())
            }
            Err(source) => {
                self.shutdown.trigger();
                Err(RunnerError::Spawn {
                    worker: "display",
                    source,
                })
            }
        }
    }

    /// Run the input listener on the calling thread, then signal shutdown
    pub fn listen<P: Prompter>(&self, prompter: P) -> Result<ListenerSummary> {
        let result = InputListener::new(prompter, self.queue.clone()).run();
        self.shutdown.trigger();
        let summary = result?;
        if !self.queue.is_empty() {
            warn!(
                "{} commands were still queued at exit",
                self.queue.len()
            );
        }
        Ok(summary)
    }

    /// Signal shutdown and detach the workers without waiting for them
    pub fn detach(self) {
        self.shutdown.trigger();
        info!("Shutdown signalled, not waiting for workers");
    }

    /// Signal shutdown and wait for every worker to finish
    pub fn join(self) -> Result<SessionReport> {
        self.shutdown.trigger();
        let mut report = SessionReport::default();
        if let Some(handle) = self.trading {
            report.cycles = handle
                .join()
                .map_err(|_| RunnerError::WorkerPanicked("trading-loop".to_string()))?;
        }
        if let Some(handle) = self.display {
            report.displayed = handle
                .join()
                .map_err(|_| RunnerError::WorkerPanicked("display".to_string()))?;
        }
        info!(
            "Workers joined: {} cycles, display {}",
            report.cycles,
            if report.displayed { "ran" } else { "never started" }
        );
        Ok(report)
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}
