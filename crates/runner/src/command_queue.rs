//! FIFO buffer of validated user commands
//!
//! Written by the input listener, drained by the trading loop. The lock is
//! only held inside each method.

use std::collections::VecDeque;
use std::sync::Arc;

use gnat_core::Command;
use parking_lot::Mutex;

#[derive(Clone, Default)]
pub struct CommandQueue {
    inner: Arc<Mutex<VecDeque<Command>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: Command) {
        self.inner.lock().push_back(command);
    }

    /// Take every queued command, oldest first
    pub fn drain(&self) -> Vec<Command> {
        let taken = std::mem::take(&mut *self.inner.lock());
        taken.into()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl std::fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandQueue")
            .field("len", &self.len())
            .finish()
    }
}
