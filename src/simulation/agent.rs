use tracing::debug;

use crate::simulation::action::{Action, ActionFailure};
use crate::simulation::memory::BeliefGrid;
use crate::simulation::percept::Percept;
use crate::simulation::spatial::{Direction, Location};

/// The explorer: physical state, inventory, route memory and beliefs.
///
/// Every explorer owns a freshly allocated [`BeliefGrid`]; nothing is shared
/// between instances.
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Explorer {
    pub location: Location,
    pub direction: Direction,
    pub has_gold: bool,
    pub has_arrow: bool,
    pub is_alive: bool,
    /// The last move retraced the route instead of extending it
    pub is_backtracking: bool,
    /// Cells occupied before each exploratory move, newest last.
    pub path_stack: Vec<Location>,
    pub beliefs: BeliefGrid,
}

impl Explorer {
    /// Creates an explorer at the entrance of a `size`×`size` cave, facing north.
    #[must_use]
    pub fn new(size: i32) -> Self {
        Self {
            location: Location::origin(),
            direction: Direction::North,
            has_gold: false,
            has_arrow: true,
            is_alive: true,
            is_backtracking: false,
            path_stack: Vec::new(),
            beliefs: BeliefGrid::new(size),
        }
    }

    #[must_use]
    pub fn at_exit(&self) -> bool {
        self.location == Location::origin()
    }

    /// Folds this turn's percept into the belief grid.
    ///
    /// A bump only teaches where the wall is; neighbour inference runs on the
    /// first visit to a cell; a scream clears the cell the arrow freed.
    pub fn perceive(&mut self, percept: &Percept) {
        if percept.bump {
            if self.beliefs.mark_wall(self.location, self.direction) {
                debug!(at = %self.location.step(self.direction), "wall recorded");
            }
        } else if self.beliefs.update(self.location, percept) {
            debug!(at = %self.location, percept = %percept.flags(), "first visit");
        }

        if percept.scream {
            if let Some(freed) = self.beliefs.clear_hazard_along(self.location, self.direction) {
                debug!(at = %freed, "scream cleared a lethal cell");
            }
        }
    }

    /// Inventory preconditions checked before the world resolves `action`.
    ///
    /// # Errors
    /// Returns the failure the action would hit regardless of the cave.
    pub fn readiness(&self, action: Action) -> Result<(), ActionFailure> {
        match action {
            Action::Shoot if !self.has_arrow => Err(ActionFailure::NoArrow),
            Action::Grab if self.has_gold => Err(ActionFailure::AlreadyHoldingGold),
            Action::Climb => self.climb(),
            _ => Ok(()),
        }
    }

    /// Applies a resolved action to the explorer's own state.
    ///
    /// `backtrack` marks a forward move as a retreat step along the path
    /// stack rather than an exploratory one.
    ///
    /// # Errors
    /// Returns the handler's failure; state is left unchanged in that case.
    pub fn perform(&mut self, action: Action, backtrack: bool) -> Result<(), ActionFailure> {
        self.is_backtracking = backtrack;
        match action {
            Action::Forward => self.move_forward(),
            Action::TurnLeft => {
                self.turn_left();
                Ok(())
            }
            Action::TurnRight => {
                self.turn_right();
                Ok(())
            }
            Action::Shoot => self.shoot_arrow(),
            Action::Grab => self.grab_gold(),
            Action::Climb => self.climb(),
        }
    }

    /// Steps one cell ahead.
    ///
    /// A retreat step pops the path stack; an exploratory step made without
    /// the gold pushes the cell being left.
    ///
    /// # Errors
    /// [`ActionFailure::Bump`] if the step would leave the cave.
    pub fn move_forward(&mut self) -> Result<(), ActionFailure> {
        let next = self.location.step(self.direction);
        if !self.beliefs.contains(next) {
            return Err(ActionFailure::Bump);
        }

        if self.is_backtracking {
            let popped = self.path_stack.pop();
            debug!(from = %self.location, to = %next, ?popped, "retreat step");
        } else if !self.has_gold {
            self.path_stack.push(self.location);
            debug!(
                from = %self.location,
                to = %next,
                depth = self.path_stack.len(),
                "explore step"
            );
        }

        self.location = next;
        Ok(())
    }

    pub fn turn_left(&mut self) {
        self.direction = self.direction.turn_left();
    }

    pub fn turn_right(&mut self) {
        self.direction = self.direction.turn_right();
    }

    /// # Errors
    /// [`ActionFailure::NoArrow`] if the arrow was already used.
    pub fn shoot_arrow(&mut self) -> Result<(), ActionFailure> {
        if !self.has_arrow {
            return Err(ActionFailure::NoArrow);
        }
        self.has_arrow = false;
        Ok(())
    }

    /// # Errors
    /// [`ActionFailure::AlreadyHoldingGold`] on a second grab.
    pub fn grab_gold(&mut self) -> Result<(), ActionFailure> {
        if self.has_gold {
            return Err(ActionFailure::AlreadyHoldingGold);
        }
        self.has_gold = true;
        Ok(())
    }

    /// # Errors
    /// [`ActionFailure::NotAtExit`] away from the entrance,
    /// [`ActionFailure::NoGoldToClimb`] without the gold.
    pub fn climb(&self) -> Result<(), ActionFailure> {
        if !self.at_exit() {
            return Err(ActionFailure::NotAtExit);
        }
        if !self.has_gold {
            return Err(ActionFailure::NoGoldToClimb);
        }
        Ok(())
    }

    /// Death recovery: latch the current cell as lethal and step back to the
    /// last cell on the path stack (the entrance if the stack is empty).
    ///
    /// Returns the location where the explorer died.
    pub fn recover_from_death(&mut self) -> Location {
        let dead_at = self.location;
        self.beliefs.mark_unsafe(dead_at);
        self.location = self.path_stack.pop().unwrap_or_else(Location::origin);
        self.is_alive = true;
        self.is_backtracking = false;
        dead_at
    }
}
