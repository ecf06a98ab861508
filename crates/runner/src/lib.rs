//! Gnat Runner - Trading Supervisor
//!
//! Runs a trading session as three workers sharing two lock-guarded structures:
//!
//! - **Input Listener** (main thread): reads console commands, validates them
//!   and pushes them onto the `CommandQueue`
//! - **Trading Loop** (worker thread): every interval fetches bars, refreshes the
//!   `TickerBoard`, drains the queue and submits orders to the broker
//! - **Display Publisher** (worker thread): waits for the first board entry, then
//!   hands the board to a `Renderer`
//!
//! ## Architecture
//!
//! ```text
//!   console ──► ┌────────────────┐   push   ┌──────────────┐
//!               │ Input Listener │ ───────► │ CommandQueue │
//!               └────────────────┘          └──────┬───────┘
//!                                                  │ drain
//!   ┌──────────┐  bars   ┌──────────────┐ ◄────────┘
//!   │ Streamer │ ──────► │ Trading Loop │ ──────► Broker
//!   └──────────┘         └──────┬───────┘ orders
//!                               │ upsert
//!                        ┌──────▼──────┐  snapshot  ┌──────────┐
//!                        │ TickerBoard │ ─────────► │ Renderer │
//!                        └─────────────┘            └──────────┘
//! ```
//!
//! Every worker gets a clone of the session's `ShutdownSignal` and waits on it
//! instead of sleeping, so a session can be stopped deterministically.

pub mod command_queue;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod listener;
pub mod prompt;
pub mod shutdown;
pub mod storage;
pub mod strategy;
pub mod supervisor;
pub mod ticker_board;
pub mod trading_loop;

// Re-export main types
pub use command_queue::CommandQueue;
pub use config::SessionConfig;
pub use dashboard::ConsoleDashboard;
pub use display::{DisplayPublisher, Renderer};
pub use error::{Result, RunnerError};
pub use listener::{InputListener, ListenerState, ListenerSummary};
pub use prompt::ConsolePrompter;
pub use shutdown::ShutdownSignal;
pub use storage::CsvStorage;
pub use strategy::Watchlist;
pub use supervisor::{SessionReport, Supervisor};
pub use ticker_board::TickerBoard;
pub use trading_loop::{CycleReport, TradingLoop};
