mod bar;
mod command;
mod interval;
mod order;
mod side;
mod ticker;

pub use bar::Bar;
pub use command::{Command, EXIT_SENTINELS, ValidationError, is_exit_sentinel};
pub use interval::Interval;
pub use order::{Fill, OrderRequest};
pub use side::Side;
pub use ticker::TickerState;
