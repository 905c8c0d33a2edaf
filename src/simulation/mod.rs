pub mod action;
pub mod agent;
pub mod config;
pub mod controller;
pub mod environment;
pub mod memory;
pub mod params;
pub mod percept;
pub mod planning;
pub mod spatial;

pub use action::{Action, ActionFailure};
pub use agent::Explorer;
pub use config::{ConfigError, GameConfig};
pub use controller::{Controller, GameResult, Outcome, Progress};
pub use environment::{Cave, Effect, Hazard, LayoutError, World};
pub use percept::Percept;
pub use spatial::{Direction, Location};
