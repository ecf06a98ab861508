//! Gnat Core Domain
//!
//! Pure domain types for the gnat trading supervisor.
//! This crate contains no threads, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Market data
    Bar,
    // User instructions
    Command,
    EXIT_SENTINELS,
    // Execution
    Fill,
    Interval,
    OrderRequest,
    Side,
    TickerState,
    ValidationError,
    is_exit_sentinel,
};
pub use values::{AssetClass, Price, Quantity, Symbol, Timestamp, parse_symbol_list};
