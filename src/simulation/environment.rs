use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::simulation::action::{Action, ActionFailure};
use crate::simulation::config::GameConfig;
use crate::simulation::params::{
    ACTION_COST, ARROW_COST, DEATH_PENALTY, GOLD_REWARD, MAX_GRID_SIZE,
};
use crate::simulation::percept::Percept;
use crate::simulation::spatial::{Direction, Location};

/// The two lethal things a cell can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hazard {
    Wumpus,
    Pit,
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wumpus => f.write_str("wumpus"),
            Self::Pit => f.write_str("pit"),
        }
    }
}

/// What a successfully resolved action did to the cave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    Moved,
    /// The move succeeded but the destination holds a hazard
    MovedIntoHazard(Hazard),
    Turned,
    WumpusKilled(Location),
    ArrowMissed,
    GoldGrabbed,
    Escaped,
}

impl Effect {
    /// Outcome message worth logging, if any.
    #[must_use]
    pub const fn message(self) -> Option<&'static str> {
        match self {
            Self::Moved | Self::Turned => None,
            Self::MovedIntoHazard(Hazard::Wumpus) => Some("eaten by the wumpus!"),
            Self::MovedIntoHazard(Hazard::Pit) => Some("fell into a pit!"),
            Self::WumpusKilled(_) => Some("killed the wumpus!"),
            Self::ArrowMissed => Some("the arrow missed"),
            Self::GoldGrabbed => Some("grabbed the gold!"),
            Self::Escaped => Some("climbed out of the cave!"),
        }
    }
}

/// The world's answer to one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub result: Result<Effect, ActionFailure>,
    pub score_delta: i32,
}

/// The simulator contract the controller drives.
pub trait World {
    /// Side length of the square cave.
    fn size(&self) -> i32;

    /// Where the explorer starts.
    fn start(&self) -> Location {
        Location::origin()
    }

    /// Percept at `location`; `bump` and `scream` carry over from the
    /// previous turn's action.
    fn percept(&self, location: Location, bump: bool, scream: bool) -> Percept;

    /// Resolves `action` taken at `location` facing `direction`.
    fn resolve(&mut self, action: Action, location: Location, direction: Direction) -> Resolution;

    /// True if standing at `location` kills the explorer.
    fn is_lethal(&self, location: Location) -> bool;
}

/// Contents of one cave cell. A hazard cell never holds the gold or the
/// other hazard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CaveCell {
    pub wumpus: bool,
    pub pit: bool,
    pub gold: bool,
}

impl CaveCell {
    /// Returns whether the wumpus could be placed.
    pub fn place_wumpus(&mut self) -> bool {
        if self.pit || self.gold {
            return false;
        }
        self.wumpus = true;
        true
    }

    /// Returns whether the pit could be placed.
    pub fn place_pit(&mut self) -> bool {
        if self.wumpus || self.gold {
            return false;
        }
        self.pit = true;
        true
    }

    /// Returns whether the gold could be placed.
    pub fn place_gold(&mut self) -> bool {
        if self.pit || self.wumpus {
            return false;
        }
        self.gold = true;
        true
    }

    #[must_use]
    pub const fn hazard(&self) -> Option<Hazard> {
        if self.wumpus {
            Some(Hazard::Wumpus)
        } else if self.pit {
            Some(Hazard::Pit)
        } else {
            None
        }
    }

    /// Letters for whatever the cell holds (`W`, `P`, `G`), empty if nothing.
    #[must_use]
    pub fn label(&self) -> String {
        [(self.wumpus, 'W'), (self.pit, 'P'), (self.gold, 'G')]
            .iter()
            .filter(|(on, _)| *on)
            .map(|&(_, c)| c)
            .collect()
    }
}

/// Errors from [`Cave::set_map`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{what} location {at} is outside the cave")]
    OutOfBounds { what: &'static str, at: Location },
    #[error("{what} cannot share {at} with another object")]
    Conflict { what: &'static str, at: Location },
}

/// The hidden cave: hazards and gold on a `size`×`size` grid.
#[derive(Clone, Debug)]
pub struct Cave {
    size: i32,
    cells: Vec<CaveCell>,
    start: Location,
}

impl Cave {
    /// Creates a cave with nothing in it.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // size is clamped to 1..=MAX_GRID_SIZE
    pub fn empty(size: i32) -> Self {
        let size = size.clamp(1, MAX_GRID_SIZE);
        Self {
            size,
            cells: vec![CaveCell::default(); (size * size) as usize],
            start: Location::origin(),
        }
    }

    /// Places 1..=`max_wumpuses` wumpuses, 1..=`max_pits` pits and the gold on
    /// distinct random cells, never on the entrance.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Self {
        let mut cave = Self::empty(config.size);
        let mut free: Vec<Location> = cave
            .locations()
            .filter(|&l| l != Location::origin())
            .collect();
        free.shuffle(rng);

        let wumpuses = rng.random_range(1..=config.max_wumpuses.max(1));
        let pits = rng.random_range(1..=config.max_pits.max(1));
        let mut free = free.into_iter();

        for at in free.by_ref().take(wumpuses) {
            cave.with_cell(at, CaveCell::place_wumpus);
        }
        for at in free.by_ref().take(pits) {
            cave.with_cell(at, CaveCell::place_pit);
        }
        if let Some(at) = free.next() {
            cave.with_cell(at, CaveCell::place_gold);
        }
        cave
    }

    /// Generates a cave from `config.seed`, drawing a seed when none is set.
    ///
    /// Returns the cave and the seed that reproduces it.
    #[must_use]
    pub fn from_config(config: &GameConfig) -> (Self, u64) {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        (Self::generate(config, &mut rng), seed)
    }

    /// Generates a `size`×`size` cave with the default hazard limits from a
    /// fixed seed.
    #[must_use]
    pub fn seeded(size: i32, seed: u64) -> Self {
        let config = GameConfig {
            size,
            ..GameConfig::default()
        };
        Self::generate(&config, &mut StdRng::seed_from_u64(seed))
    }

    #[allow(clippy::cast_sign_loss)] // bounds checked before the cast
    fn index(&self, location: Location) -> Option<usize> {
        location
            .is_inside(self.size)
            .then(|| ((location.row - 1) * self.size + (location.col - 1)) as usize)
    }

    #[must_use]
    pub fn cell(&self, location: Location) -> Option<&CaveCell> {
        self.index(location).and_then(|i| self.cells.get(i))
    }

    fn with_cell(&mut self, location: Location, place: fn(&mut CaveCell) -> bool) -> bool {
        match self.index(location) {
            Some(i) => place(&mut self.cells[i]),
            None => false,
        }
    }

    /// Interior locations, row by row.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (1..=self.size).flat_map(|row| (1..=self.size).map(move |col| Location::new(row, col)))
    }

    /// Where the gold currently lies, if it has not been grabbed.
    #[must_use]
    pub fn gold_location(&self) -> Option<Location> {
        self.locations()
            .find(|&l| self.cell(l).is_some_and(|c| c.gold))
    }

    /// Number of cells holding `hazard`.
    #[must_use]
    pub fn count(&self, hazard: Hazard) -> usize {
        self.cells
            .iter()
            .filter(|c| c.hazard() == Some(hazard))
            .count()
    }

    /// Replaces the whole layout with a fixed one (tests and debugging).
    ///
    /// The layout is validated first; on success every previous placement
    /// is cleared before the new one is applied.
    ///
    /// # Errors
    /// [`LayoutError`] if a location is outside the cave, two objects
    /// collide, or a hazard sits on the agent start or the entrance. The
    /// cave is left untouched in that case.
    pub fn set_map(
        &mut self,
        wumpuses: &[Location],
        pits: &[Location],
        gold: Location,
        agent: Location,
    ) -> Result<(), LayoutError> {
        type Place = fn(&mut CaveCell) -> bool;

        let mut staged = Self::empty(self.size);
        let placements = wumpuses
            .iter()
            .map(|&at| ("wumpus", at, CaveCell::place_wumpus as Place))
            .chain(pits.iter().map(|&at| ("pit", at, CaveCell::place_pit as Place)))
            .chain(std::iter::once(("gold", gold, CaveCell::place_gold as Place)));

        for (what, at, place) in placements {
            if !at.is_inside(self.size) {
                return Err(LayoutError::OutOfBounds { what, at });
            }
            if !staged.with_cell(at, place) {
                return Err(LayoutError::Conflict { what, at });
            }
        }
        if !agent.is_inside(self.size) {
            return Err(LayoutError::OutOfBounds {
                what: "agent",
                at: agent,
            });
        }
        // Respawns land on the start cell or the entrance
        for (what, at) in [("agent", agent), ("entrance", Location::origin())] {
            if staged.is_lethal(at) {
                return Err(LayoutError::Conflict { what, at });
            }
        }

        staged.start = agent;
        *self = staged;
        Ok(())
    }

    fn shoot(&mut self, location: Location, direction: Direction) -> Effect {
        let mut cursor = location.step(direction);
        while let Some(i) = self.index(cursor) {
            if self.cells[i].wumpus {
                self.cells[i].wumpus = false;
                return Effect::WumpusKilled(cursor);
            }
            cursor = cursor.step(direction);
        }
        Effect::ArrowMissed
    }
}

impl World for Cave {
    fn size(&self) -> i32 {
        self.size
    }

    fn start(&self) -> Location {
        self.start
    }

    fn percept(&self, location: Location, bump: bool, scream: bool) -> Percept {
        let around: Vec<&CaveCell> = location
            .neighbors()
            .into_iter()
            .filter_map(|n| self.cell(n))
            .collect();
        Percept {
            stench: around.iter().any(|c| c.wumpus),
            breeze: around.iter().any(|c| c.pit),
            glitter: self.cell(location).is_some_and(|c| c.gold),
            scream,
            bump,
        }
    }

    fn resolve(&mut self, action: Action, location: Location, direction: Direction) -> Resolution {
        let mut score_delta = ACTION_COST;
        let result = match action {
            Action::Forward => {
                let next = location.step(direction);
                match self.cell(next) {
                    None => Err(ActionFailure::Bump),
                    Some(cell) => match cell.hazard() {
                        Some(hazard) => {
                            score_delta += DEATH_PENALTY;
                            Ok(Effect::MovedIntoHazard(hazard))
                        }
                        None => Ok(Effect::Moved),
                    },
                }
            }
            Action::TurnLeft | Action::TurnRight => Ok(Effect::Turned),
            Action::Shoot => {
                score_delta += ARROW_COST;
                Ok(self.shoot(location, direction))
            }
            Action::Grab => match self.index(location) {
                Some(i) if self.cells[i].gold => {
                    self.cells[i].gold = false;
                    score_delta += GOLD_REWARD;
                    Ok(Effect::GoldGrabbed)
                }
                _ => Err(ActionFailure::NoGoldHere),
            },
            Action::Climb => {
                if location == Location::origin() {
                    Ok(Effect::Escaped)
                } else {
                    Err(ActionFailure::NotAtExit)
                }
            }
        };
        Resolution {
            result,
            score_delta,
        }
    }

    fn is_lethal(&self, location: Location) -> bool {
        self.cell(location).is_some_and(|c| c.hazard().is_some())
    }
}
