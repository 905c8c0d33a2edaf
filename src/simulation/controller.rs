//! The turn controller: one `advance()` call runs one game turn.
//!
//! Each turn goes through, in order: game-over check, respawn check,
//! perception, belief update, decision, action, death check and limit check.
//! A death is not handled in the turn it happens; the next turn notices the
//! lethal cell, steps the explorer back and does nothing else.

use std::fmt;

use tracing::{debug, info, warn};

use crate::simulation::action::{Action, ActionFailure};
use crate::simulation::agent::Explorer;
use crate::simulation::config::{ConfigError, GameConfig};
use crate::simulation::environment::{Cave, Effect, Resolution, World};
use crate::simulation::memory::{LogEntry, MessageLog};
use crate::simulation::params::ACTION_COST;
use crate::simulation::percept::Percept;
use crate::simulation::planning::{Plan, decide_with_intent};

/// How a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Climbed out at the entrance with the gold
    Escaped,
    /// The turn ceiling was reached
    TurnLimit,
    /// A retreat was required with nowhere left to go
    Stranded,
}

impl Outcome {
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Escaped)
    }
}

/// Final tally of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: Outcome,
    pub score: i32,
    pub turns: u32,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = match self.outcome {
            Outcome::Escaped => "WIN: escaped with the gold",
            Outcome::TurnLimit => "LOSS: turn limit reached",
            Outcome::Stranded => "LOSS: no route left to retreat along",
        };
        write!(f, "{verdict} (score {}, {} turns)", self.score, self.turns)
    }
}

/// Result of one [`Controller::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Continue,
    Finished(GameResult),
}

/// Drives one explorer through one world.
#[derive(Debug)]
pub struct Controller<W: World = Cave> {
    world: W,
    explorer: Explorer,
    last_bump: bool,
    last_scream: bool,
    last_percept: Percept,
    turn: u32,
    max_turns: u32,
    score: i32,
    messages: MessageLog,
    result: Option<GameResult>,
}

impl Controller<Cave> {
    /// Validates `config` and generates a cave from it.
    ///
    /// Returns the controller and the seed that reproduces the cave.
    ///
    /// # Errors
    /// [`ConfigError`] if the configuration cannot describe a playable cave.
    pub fn from_config(config: &GameConfig) -> Result<(Self, u64), ConfigError> {
        config.validate()?;
        let (cave, seed) = Cave::from_config(config);
        info!(size = config.size, seed, "cave generated");
        Ok((Self::new(cave, config.max_turns), seed))
    }
}

impl<W: World> Controller<W> {
    /// Starts a game in `world`; the explorer gets a fresh belief grid.
    pub fn new(world: W, max_turns: u32) -> Self {
        let mut explorer = Explorer::new(world.size());
        explorer.location = world.start();
        Self {
            world,
            explorer,
            last_bump: false,
            last_scream: false,
            last_percept: Percept::default(),
            turn: 0,
            max_turns,
            score: 0,
            messages: MessageLog::new(),
            result: None,
        }
    }

    #[must_use]
    pub const fn world(&self) -> &W {
        &self.world
    }

    #[must_use]
    pub const fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    /// Turns completed so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub const fn max_turns(&self) -> u32 {
        self.max_turns
    }

    #[must_use]
    pub const fn score(&self) -> i32 {
        self.score
    }

    /// The percept the explorer acted on most recently.
    #[must_use]
    pub const fn last_percept(&self) -> Percept {
        self.last_percept
    }

    #[must_use]
    pub const fn messages(&self) -> &MessageLog {
        &self.messages
    }

    #[must_use]
    pub const fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Runs one turn with the decision policy choosing the action.
    pub fn advance(&mut self) -> Progress {
        self.play_turn(|explorer, percept| {
            let (plan, intent) = decide_with_intent(explorer, percept)?;
            debug!(?intent, action = %plan.action, backtrack = plan.backtrack, "decided");
            Some(plan)
        })
    }

    /// Runs one turn with `action` in place of the policy's choice.
    ///
    /// Forward moves count as exploratory. A pending respawn still takes
    /// the whole turn and the action is dropped.
    pub fn advance_with(&mut self, action: Action) -> Progress {
        self.play_turn(|_, _| {
            Some(Plan {
                action,
                backtrack: false,
            })
        })
    }

    /// Advances until the game ends.
    pub fn run_to_end(&mut self) -> GameResult {
        loop {
            if let Progress::Finished(result) = self.advance() {
                return result;
            }
        }
    }

    fn play_turn<F>(&mut self, choose: F) -> Progress
    where
        F: FnOnce(&Explorer, &Percept) -> Option<Plan>,
    {
        if let Some(result) = self.result {
            return Progress::Finished(result);
        }

        if self.world.is_lethal(self.explorer.location) {
            let dead_at = self.explorer.recover_from_death();
            info!(%dead_at, back_to = %self.explorer.location, "respawned");
            self.log(format!(
                "died at {dead_at}, back to {}",
                self.explorer.location
            ));
            self.last_bump = false;
            self.last_scream = false;
            return self.finish_turn();
        }

        let percept = self.world.percept(
            self.explorer.location,
            self.last_bump,
            self.last_scream,
        );
        self.last_percept = percept;
        debug!(
            turn = self.turn,
            at = %self.explorer.location,
            percept = %percept.flags(),
            "perceived"
        );
        self.explorer.perceive(&percept);

        let Some(plan) = choose(&self.explorer, &percept) else {
            let failure = ActionFailure::ExhaustedRetreat;
            info!(at = %self.explorer.location, "{failure}");
            self.log(failure.to_string());
            return self.end(Outcome::Stranded);
        };

        self.act(plan)
    }

    fn act(&mut self, plan: Plan) -> Progress {
        let Plan { action, backtrack } = plan;
        let resolution = match self.explorer.readiness(action) {
            Ok(()) => self.world.resolve(
                action,
                self.explorer.location,
                self.explorer.direction,
            ),
            Err(failure) => Resolution {
                result: Err(failure),
                score_delta: ACTION_COST,
            },
        };

        self.last_bump = matches!(resolution.result, Err(ActionFailure::Bump));
        self.last_scream = matches!(resolution.result, Ok(Effect::WumpusKilled(_)));
        self.score += resolution.score_delta;

        match resolution.result {
            Ok(effect) => {
                if let Err(failure) = self.explorer.perform(action, backtrack) {
                    warn!(%action, %failure, "explorer rejected an action the world accepted");
                }
                if let Some(message) = effect.message() {
                    self.log(message.to_string());
                }
                match effect {
                    Effect::GoldGrabbed => info!(at = %self.explorer.location, "gold grabbed"),
                    Effect::WumpusKilled(at) => info!(%at, "wumpus killed"),
                    Effect::Escaped => {
                        self.turn += 1;
                        return self.end(Outcome::Escaped);
                    }
                    _ => {}
                }
            }
            Err(failure) => {
                debug!(%action, %failure, "action failed");
                self.log(failure.to_string());
            }
        }

        if self.world.is_lethal(self.explorer.location) {
            self.explorer.is_alive = false;
            info!(at = %self.explorer.location, "explorer died");
        }
        self.finish_turn()
    }

    fn finish_turn(&mut self) -> Progress {
        self.turn += 1;
        if self.turn >= self.max_turns {
            self.log("turn limit reached".to_string());
            return self.end(Outcome::TurnLimit);
        }
        Progress::Continue
    }

    fn end(&mut self, outcome: Outcome) -> Progress {
        let result = GameResult {
            outcome,
            score: self.score,
            turns: self.turn,
        };
        info!(?outcome, score = result.score, turns = result.turns, "game over");
        self.result = Some(result);
        Progress::Finished(result)
    }

    fn log(&mut self, text: String) {
        self.messages.push(LogEntry {
            turn: self.turn + 1,
            text,
        });
    }
}
