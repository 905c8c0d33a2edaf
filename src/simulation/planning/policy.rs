//! Rule-based action selection over the belief grid.
//!
//! Priority order, evaluated every turn:
//! 1. Holding the gold at the entrance: climb out.
//! 2. Holding the gold elsewhere: retreat along the path stack.
//! 3. Glitter here: grab.
//! 4. Otherwise explore the lowest-risk neighbour, retreating when stuck.
//!
//! Rotation is always clockwise, so lining up with a target never takes
//! more than three turns.

use tracing::{debug, warn};

use crate::simulation::action::Action;
use crate::simulation::agent::Explorer;
use crate::simulation::percept::Percept;
use crate::simulation::spatial::{Direction, Location};

/// The action chosen for this turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plan {
    pub action: Action,
    /// A forward move that retraces the path stack instead of extending it
    pub backtrack: bool,
}

impl Plan {
    const fn act(action: Action) -> Self {
        Self {
            action,
            backtrack: false,
        }
    }
}

/// Why the policy picked what it picked, for the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Escape,
    Retreat,
    Grab,
    Explore,
}

/// Chooses the next action. Reads the explorer, never mutates it.
///
/// Returns `None` when a retreat was required but the path stack is empty
/// (or its top is not adjacent); the caller treats that as a loss.
#[must_use]
pub fn decide(explorer: &Explorer, percept: &Percept) -> Option<Plan> {
    decide_with_intent(explorer, percept).map(|(plan, _)| plan)
}

/// Like [`decide`], also reporting which rule fired.
#[must_use]
pub fn decide_with_intent(explorer: &Explorer, percept: &Percept) -> Option<(Plan, Intent)> {
    if explorer.has_gold {
        if explorer.at_exit() {
            return Some((Plan::act(Action::Climb), Intent::Escape));
        }
        return retreat(explorer).map(|plan| (plan, Intent::Retreat));
    }

    if percept.glitter {
        return Some((Plan::act(Action::Grab), Intent::Grab));
    }

    if let Some(plan) = explore(explorer) {
        return Some((plan, Intent::Explore));
    }
    debug!(at = %explorer.location, "nothing left to explore here, backing up");
    retreat(explorer).map(|plan| (plan, Intent::Retreat))
}

/// Heads back to the top of the path stack without popping it.
#[must_use]
pub fn retreat(explorer: &Explorer) -> Option<Plan> {
    let Some(&target) = explorer.path_stack.last() else {
        debug!("path stack is empty, cannot retreat");
        return None;
    };
    let plan = approach(explorer, target)?;
    Some(Plan {
        backtrack: plan.action == Action::Forward,
        ..plan
    })
}

/// Heads for the lowest-risk unexplored neighbour.
#[must_use]
pub fn explore(explorer: &Explorer) -> Option<Plan> {
    let target = *explorer
        .beliefs
        .candidate_neighbors(explorer.location)
        .first()?;
    debug!(at = %explorer.location, %target, "exploring");
    approach(explorer, target)
}

/// Turn right until facing `target`, then step forward.
fn approach(explorer: &Explorer, target: Location) -> Option<Plan> {
    let Some(heading) = Direction::between(explorer.location, target) else {
        warn!(from = %explorer.location, %target, "target is not adjacent");
        return None;
    };
    if explorer.direction == heading {
        Some(Plan::act(Action::Forward))
    } else {
        Some(Plan::act(Action::TurnRight))
    }
}
