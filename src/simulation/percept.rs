//! Per-turn sensory snapshot.

/// What the explorer senses in its current cell at the start of a turn.
///
/// Built fresh by the world every turn and never merged across turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Percept {
    /// A wumpus occupies an adjacent cell
    pub stench: bool,
    /// A pit occupies an adjacent cell
    pub breeze: bool,
    /// The gold is in this cell
    pub glitter: bool,
    /// Last turn's arrow killed a wumpus
    pub scream: bool,
    /// Last turn's forward move hit the cave boundary
    pub bump: bool,
}

impl Percept {
    /// Compact one-letter-per-cue summary for the HUD, e.g. `S-G--`.
    #[must_use]
    pub fn flags(&self) -> String {
        [
            (self.stench, 'S'),
            (self.breeze, 'B'),
            (self.glitter, 'G'),
            (self.scream, 'R'),
            (self.bump, 'X'),
        ]
        .iter()
        .map(|&(on, c)| if on { c } else { '-' })
        .collect()
    }
}
