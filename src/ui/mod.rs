//! Terminal presentation. Reads controller state, never mutates it.

pub mod field;
pub mod render;

use crate::simulation::controller::Controller;
use crate::simulation::environment::Cave;
use crate::simulation::params::VISIBLE_MESSAGES;

/// Everything one frame shows, captured between turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub hud: String,
    pub beliefs: Vec<String>,
    pub cave: Vec<String>,
    /// Newest last
    pub messages: Vec<String>,
}

impl Snapshot {
    #[must_use]
    pub fn capture(controller: &Controller<Cave>) -> Self {
        let explorer = controller.explorer();
        let hud = format!(
            "Turn {}/{} | Score {} | {} facing {} | Gold: {} | Arrow: {} | Percept {}",
            controller.turn(),
            controller.max_turns(),
            controller.score(),
            explorer.location,
            explorer.direction,
            if explorer.has_gold { "yes" } else { "no" },
            if explorer.has_arrow { "yes" } else { "no" },
            controller.last_percept().flags(),
        );
        let mut messages: Vec<String> = controller
            .messages()
            .recent(VISIBLE_MESSAGES)
            .map(ToString::to_string)
            .collect();
        if let Some(result) = controller.result() {
            messages.push(result.to_string());
        }
        Self {
            hud,
            beliefs: field::belief_rows(&explorer.beliefs, explorer),
            cave: field::cave_rows(controller.world(), explorer),
            messages,
        }
    }
}
