use gnat_core::Bar;

use crate::error::StorageError;

/// Port for append-only bar history, keyed by the bar's symbol
pub trait Storage: Send {
    fn append(&mut self, bar: &Bar) -> Result<(), StorageError>;
}
