//! Planning for the explorer.
//!
//! This module provides:
//! - The rule-based decision policy that turns beliefs into one action per turn

pub mod policy;

pub use policy::{Intent, Plan, decide, decide_with_intent};
