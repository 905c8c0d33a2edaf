//! Simulation hyperparameters.

pub const GRID_SIZE: i32 = 4;
/// Largest cave side length accepted; bigger sizes are clamped.
pub const MAX_GRID_SIZE: i32 = 64;
pub const MAX_TURNS: u32 = 200;
pub const MAX_WUMPUSES: usize = 2;
pub const MAX_PITS: usize = 2;

// Scoring
pub const ACTION_COST: i32 = -1;
pub const DEATH_PENALTY: i32 = -1000;
pub const ARROW_COST: i32 = -10;
pub const GOLD_REWARD: i32 = 1000;

/// Outcome messages kept by the controller (older ones are overwritten).
pub const MESSAGE_LOG_CAPACITY: usize = 16;
/// Messages shown under the grids in the viewer.
pub const VISIBLE_MESSAGES: usize = 3;
pub const TICK_MILLIS: u64 = 250;
