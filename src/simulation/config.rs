//! Game configuration.

use thiserror::Error;

use crate::simulation::params::{GRID_SIZE, MAX_GRID_SIZE, MAX_PITS, MAX_TURNS, MAX_WUMPUSES};

/// Errors that can occur when validating a [`GameConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size {0} is too small (minimum 2)")]
    GridTooSmall(i32),
    #[error("grid size {0} is too large (maximum {max})", max = MAX_GRID_SIZE)]
    GridTooLarge(i32),
    #[error("turn limit must be non-zero")]
    ZeroTurnLimit,
    #[error("at least one wumpus and one pit are required")]
    NoHazards,
    #[error("{hazards} hazards plus the gold do not fit in {free} free cells")]
    Overcrowded { hazards: usize, free: usize },
}

/// Tunables for one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the square cave
    pub size: i32,
    /// Turn ceiling; reaching it ends the game as a loss
    pub max_turns: u32,
    /// Upper bound for the random wumpus count (at least one is placed)
    pub max_wumpuses: usize,
    /// Upper bound for the random pit count (at least one is placed)
    pub max_pits: usize,
    /// Seed for cave generation; `None` draws one from the thread RNG
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            max_turns: MAX_TURNS,
            max_wumpuses: MAX_WUMPUSES,
            max_pits: MAX_PITS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Checks that a cave can be generated from this configuration.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::GridTooSmall(self.size));
        }
        if self.size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.size));
        }
        if self.max_turns == 0 {
            return Err(ConfigError::ZeroTurnLimit);
        }
        if self.max_wumpuses == 0 || self.max_pits == 0 {
            return Err(ConfigError::NoHazards);
        }
        #[allow(clippy::cast_sign_loss)] // 2 <= size <= MAX_GRID_SIZE checked above
        let free = (self.size * self.size) as usize - 1;
        let hazards = self.max_wumpuses + self.max_pits;
        if hazards + 1 > free {
            return Err(ConfigError::Overcrowded { hazards, free });
        }
        Ok(())
    }
}
