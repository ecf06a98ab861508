//! Input listener - console command intake
//!
//! ```text
//!                ┌──valid──► Enqueued ──┐
//! AwaitingInput ──┤                      ├──► AwaitingInput
//!                └─invalid─► Rejected ──┘
//!
//! exit sentinel or end of input ──► Stopped
//! ```

use std::io;

use gnat_core::{Command, ValidationError};
use gnat_ports::Prompter;
use log::{debug, info};

use crate::command_queue::CommandQueue;

pub const BANNER: &str = "Type 'q' or 'quit' to exit.";
pub const COMMAND_PROMPT: &str = "Enter a command:";
pub const FAREWELL: &str = "Goodbye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    AwaitingInput,
    Enqueued,
    Rejected,
    Stopped,
}

/// What a listener run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenerSummary {
    pub enqueued: usize,
    pub rejected: usize,
    /// Stopped by end of input rather than an exit sentinel
    pub end_of_input: bool,
}

pub struct InputListener<P: Prompter> {
    prompter: P,
    queue: CommandQueue,
    state: ListenerState,
    summary: ListenerSummary,
}

impl<P: Prompter> InputListener<P> {
    pub fn new(prompter: P, queue: CommandQueue) -> Self {
        Self {
            prompter,
            queue,
            state: ListenerState::AwaitingInput,
            summary: ListenerSummary::default(),
        }
    }

    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Read and handle lines until an exit sentinel or end of input
    pub fn run(mut self) -> io::Result<ListenerSummary> {
        info!("Input listener started");
        self.prompter.say(BANNER)?;

        while self.state != ListenerState::Stopped {
            self.step()?;
        }

        info!(
            "Input listener stopped: {} enqueued, {} rejected",
            self.summary.enqueued, self.summary.rejected
        );
        Ok(self.summary)
    }

    /// Prompt for one line and handle it
    pub fn step(&mut self) -> io::Result<ListenerState> {
        self.state = ListenerState::AwaitingInput;
        match self.prompter.ask(COMMAND_PROMPT)? {
            Some(line) => self.handle_line(&line),
            None => {
                debug!("End of console input");
                self.summary.end_of_input = true;
                self.state = ListenerState::Stopped;
                Ok(self.state)
            }
        }
    }

    /// Validate one line and enqueue it if valid
    pub fn handle_line(&mut self, line: &str) -> io::Result<ListenerState> {
        self.state = match Command::parse(line) {
            Ok(command) => {
                debug!("Queued command '{}'", command);
                self.queue.push(command);
                self.summary.enqueued += 1;
                ListenerState::Enqueued
            }
            Err(ValidationError::ExitSentinel) => {
                self.prompter.say(FAREWELL)?;
                ListenerState::Stopped
            }
            Err(e) => {
                self.prompter.say(&e.to_string())?;
                self.summary.rejected += 1;
                ListenerState::Rejected
            }
        };
        Ok(self.state)
    }
}
