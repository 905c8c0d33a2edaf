//! Memory systems for the explorer and the controller.
//!
//! This module provides:
//! - The belief grid (long-term knowledge about every cell)
//! - A ring buffer used for the rolling outcome log

pub mod belief_grid;
mod ring_buffer;

pub use belief_grid::{BeliefGrid, CellBelief, CellSummary};
pub use ring_buffer::RingBuffer;

use crate::simulation::params::MESSAGE_LOG_CAPACITY;

/// One outcome message tagged with the turn that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub turn: u32,
    pub text: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Turn {}: {}", self.turn, self.text)
    }
}

/// Bounded history of recent outcome messages.
pub type MessageLog = RingBuffer<LogEntry, MESSAGE_LOG_CAPACITY>;
