//! Belief grid: what the explorer has inferred about every cell.
//!
//! Evidence only ever accumulates. A cell's risk counters grow while its
//! neighbours keep reporting a cue, and a single quiet observation latches
//! the matching hazard out for good.

use std::fmt;

use crate::simulation::params::MAX_GRID_SIZE;
use crate::simulation::percept::Percept;
use crate::simulation::spatial::{Direction, Location};

/// Belief about a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct CellBelief {
    /// The explorer stood here and survived
    pub visited: bool,
    /// Proven free of both hazards
    pub safe: bool,
    /// Proven lethal: the explorer died here
    pub lethal: bool,
    /// Proven impassable by a bump
    pub wall: bool,
    /// Number of neighbouring observations that reported a stench
    pub wumpus_risk: u32,
    /// Number of neighbouring observations that reported a breeze
    pub pit_risk: u32,
    /// A stench-free observation excluded a wumpus here
    pub no_wumpus: bool,
    /// A breeze-free observation excluded a pit here
    pub no_pit: bool,
}

/// How a cell is summarised for display, by precedence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellSummary {
    Wall,
    Lethal,
    Visited,
    Safe,
    Risk(u32),
    Unknown,
}

impl fmt::Display for CellSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wall => f.write_str("W"),
            Self::Lethal => f.write_str("X"),
            Self::Visited => f.write_str("V"),
            Self::Safe => f.write_str("S"),
            Self::Risk(r) => write!(f, "{r}"),
            Self::Unknown => f.write_str("?"),
        }
    }
}

impl CellBelief {
    /// Combined evidence weight used to rank candidate moves.
    #[must_use]
    pub const fn risk(&self) -> u32 {
        self.wumpus_risk + self.pit_risk
    }

    /// wall > lethal > visited > safe > numeric risk > unknown
    #[must_use]
    pub const fn summary(&self) -> CellSummary {
        if self.wall {
            CellSummary::Wall
        } else if self.lethal {
            CellSummary::Lethal
        } else if self.visited {
            CellSummary::Visited
        } else if self.safe {
            CellSummary::Safe
        } else if self.risk() > 0 {
            CellSummary::Risk(self.risk())
        } else {
            CellSummary::Unknown
        }
    }

    /// Returns true if the cell respects the belief invariants.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        let visited_ok = !self.visited || (self.safe && self.risk() == 0 && !self.wall);
        let latches_ok =
            (!self.no_wumpus || self.wumpus_risk == 0) && (!self.no_pit || self.pit_risk == 0);
        visited_ok && latches_ok
    }

    fn zero_risks(&mut self) {
        self.wumpus_risk = 0;
        self.pit_risk = 0;
    }

    /// Applies one observation made from a neighbouring cell.
    fn observe_from_neighbor(&mut self, percept: &Percept) {
        if percept.stench {
            if !self.no_wumpus {
                self.wumpus_risk += 1;
            }
        } else {
            self.wumpus_risk = 0;
            self.no_wumpus = true;
        }

        if percept.breeze {
            if !self.no_pit {
                self.pit_risk += 1;
            }
        } else {
            self.pit_risk = 0;
            self.no_pit = true;
        }

        if self.no_wumpus && self.no_pit {
            self.safe = true;
        }
    }
}

/// The explorer's private map of a `size`×`size` cave.
///
/// Storage also covers a one-cell rim around the interior so that walls
/// discovered by bumping into the boundary can be remembered.
#[derive(Clone, Debug)]
pub struct BeliefGrid {
    size: i32,
    cells: Vec<CellBelief>,
}

impl BeliefGrid {
    /// Creates a grid where every cell is unknown.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // size is clamped to 1..=MAX_GRID_SIZE
    pub fn new(size: i32) -> Self {
        let size = size.clamp(1, MAX_GRID_SIZE);
        let side = (size + 2) as usize;
        Self {
            size,
            cells: vec![CellBelief::default(); side * side],
        }
    }

    #[allow(clippy::cast_sign_loss)] // bounds checked before the cast
    fn index(&self, location: Location) -> Option<usize> {
        let side = self.size + 2;
        let inside_rim = location.row >= 0
            && location.row < side
            && location.col >= 0
            && location.col < side;
        inside_rim.then(|| (location.row * side + location.col) as usize)
    }

    /// Side length of the cave interior.
    #[must_use]
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// True for interior cells (the rim is excluded).
    #[must_use]
    pub const fn contains(&self, location: Location) -> bool {
        location.is_inside(self.size)
    }

    /// Belief for an interior or rim cell; `None` further out.
    #[must_use]
    pub fn cell(&self, location: Location) -> Option<&CellBelief> {
        self.index(location).and_then(|i| self.cells.get(i))
    }

    fn cell_mut(&mut self, location: Location) -> Option<&mut CellBelief> {
        let index = self.index(location)?;
        self.cells.get_mut(index)
    }

    /// True once the explorer has stood at `location` and survived.
    #[must_use]
    pub fn is_visited(&self, location: Location) -> bool {
        self.cell(location).is_some_and(|c| c.visited)
    }

    /// First-visit inference from the percept sensed at `location`.
    ///
    /// Marks `location` visited and safe, then updates each unvisited,
    /// unproven neighbour. Calling it again for a visited cell does nothing,
    /// so risk is never counted twice from the same vantage point.
    ///
    /// A neighbour becomes safe once both hazards are latched out, whether
    /// the two quiet cues arrived in one observation or from two different
    /// vantage points. Its risks are zero either way; only the display
    /// changes from `?` to `S`.
    ///
    /// Returns whether the grid changed.
    pub fn update(&mut self, location: Location, percept: &Percept) -> bool {
        if !self.contains(location) || self.is_visited(location) {
            return false;
        }
        if let Some(here) = self.cell_mut(location) {
            here.visited = true;
            here.safe = true;
            here.wall = false;
            here.zero_risks();
            here.no_wumpus = true;
            here.no_pit = true;
        }

        for neighbor in location.neighbors() {
            if !self.contains(neighbor) {
                continue;
            }
            if let Some(cell) = self.cell_mut(neighbor) {
                if cell.visited || cell.wall || cell.safe {
                    continue;
                }
                cell.observe_from_neighbor(percept);
            }
        }
        true
    }

    /// Records a wall one step ahead of `location` after a bump.
    ///
    /// Returns whether a wall was recorded.
    pub fn mark_wall(&mut self, location: Location, direction: Direction) -> bool {
        match self.cell_mut(location.step(direction)) {
            Some(cell) if !cell.visited => {
                cell.wall = true;
                cell.zero_risks();
                true
            }
            _ => false,
        }
    }

    /// Latches `location` as lethal. Lethal cells are never offered as
    /// candidates again unless a scream clears them.
    pub fn mark_unsafe(&mut self, location: Location) {
        if let Some(cell) = self.cell_mut(location) {
            cell.lethal = true;
            cell.safe = false;
        }
    }

    /// After a scream, clears the first lethal cell along the arrow's path
    /// that carries wumpus risk.
    ///
    /// Returns the cleared location, if any.
    pub fn clear_hazard_along(
        &mut self,
        location: Location,
        direction: Direction,
    ) -> Option<Location> {
        let mut cursor = location.step(direction);
        while self.contains(cursor) {
            if let Some(cell) = self.cell_mut(cursor) {
                if cell.lethal && cell.wumpus_risk > 0 {
                    cell.lethal = false;
                    cell.safe = true;
                    cell.wumpus_risk = 0;
                    cell.no_wumpus = true;
                    return Some(cursor);
                }
            }
            cursor = cursor.step(direction);
        }
        None
    }

    /// Interior neighbours worth exploring, lowest combined risk first.
    ///
    /// Walls, visited and lethal cells are excluded. Ties keep the
    /// `Direction::ALL` order (N, E, S, W). An empty result means there is
    /// nothing left to explore from here.
    #[must_use]
    pub fn candidate_neighbors(&self, location: Location) -> Vec<Location> {
        let mut candidates: Vec<(u32, Location)> = location
            .neighbors()
            .into_iter()
            .filter(|&n| self.contains(n))
            .filter_map(|n| {
                self.cell(n)
                    .filter(|c| !c.wall && !c.visited && !c.lethal)
                    .map(|c| (c.risk(), n))
            })
            .collect();
        // Stable sort keeps the direction order among equal risks
        candidates.sort_by_key(|&(risk, _)| risk);
        candidates.into_iter().map(|(_, n)| n).collect()
    }

    /// Iterates over interior locations row by row.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        (1..=self.size).flat_map(|row| (1..=self.size).map(move |col| Location::new(row, col)))
    }

    /// Number of interior cells the explorer has visited.
    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.locations().filter(|&l| self.is_visited(l)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> Percept {
        Percept::default()
    }

    fn stench() -> Percept {
        Percept {
            stench: true,
            ..Percept::default()
        }
    }

    #[test]
    fn test_new_clamps_size() {
        let grid = BeliefGrid::new(50_000);
        assert_eq!(grid.size(), MAX_GRID_SIZE);
        assert!(grid.contains(Location::new(MAX_GRID_SIZE, MAX_GRID_SIZE)));
        assert!(grid.cell(Location::new(MAX_GRID_SIZE + 1, 1)).is_some());
        assert_eq!(BeliefGrid::new(-3).size(), 1);
    }

    #[test]
    fn test_cell_default_is_unknown() {
        let cell = CellBelief::default();
        assert_eq!(cell.summary(), CellSummary::Unknown);
        assert!(cell.is_valid());
    }

    #[test]
    fn test_summary_precedence() {
        let mut cell = CellBelief {
            wumpus_risk: 2,
            ..CellBelief::default()
        };
        assert_eq!(cell.summary(), CellSummary::Risk(2));
        cell.safe = true;
        assert_eq!(cell.summary(), CellSummary::Safe);
        cell.visited = true;
        assert_eq!(cell.summary(), CellSummary::Visited);
        cell.lethal = true;
        assert_eq!(cell.summary(), CellSummary::Lethal);
        cell.wall = true;
        assert_eq!(cell.summary(), CellSummary::Wall);
    }

    #[test]
    fn test_update_marks_current_cell() {
        let mut grid = BeliefGrid::new(4);
        let here = Location::new(2, 2);
        assert!(grid.update(here, &stench()));

        let cell = grid.cell(here).unwrap();
        assert!(cell.visited && cell.safe);
        assert_eq!(cell.risk(), 0);
    }

    #[test]
    fn test_quiet_percept_proves_neighbors_safe() {
        let mut grid = BeliefGrid::new(4);
        grid.update(Location::new(2, 2), &quiet());

        for n in Location::new(2, 2).neighbors() {
            let cell = grid.cell(n).unwrap();
            assert!(cell.safe, "{n} should be safe");
            assert!(cell.no_wumpus && cell.no_pit);
        }
    }

    #[test]
    fn test_stench_accumulates_once_per_vantage_point() {
        let mut grid = BeliefGrid::new(4);
        let here = Location::new(2, 2);
        grid.update(here, &stench());
        grid.update(here, &stench());

        let north = grid.cell(Location::new(1, 2)).unwrap();
        assert_eq!(north.wumpus_risk, 1);
        assert!(north.no_pit);
        assert!(!north.safe);
    }

    #[test]
    fn test_latch_blocks_later_risk() {
        let mut grid = BeliefGrid::new(4);
        let shared = Location::new(1, 3);
        let breeze = Percept {
            breeze: true,
            ..Percept::default()
        };
        grid.update(Location::new(1, 2), &breeze);
        let cell = grid.cell(shared).unwrap();
        assert!(cell.no_wumpus);
        assert_eq!(cell.pit_risk, 1);

        // A later stench from another side must not revive the wumpus risk
        grid.update(Location::new(2, 3), &stench());
        let cell = grid.cell(shared).unwrap();
        assert_eq!(cell.wumpus_risk, 0);
        assert!(cell.no_wumpus);
        // ...while the breeze-free reading latches the pit out as well
        assert_eq!(cell.pit_risk, 0);
        assert!(cell.safe);
    }

    #[test]
    fn test_mark_wall_on_rim() {
        let mut grid = BeliefGrid::new(4);
        assert!(grid.mark_wall(Location::origin(), Direction::North));
        let rim = grid.cell(Location::new(0, 1)).unwrap();
        assert!(rim.wall);
        assert!(!grid.contains(Location::new(0, 1)));
        // Beyond the rim is ignored
        assert!(!grid.mark_wall(Location::new(0, 1), Direction::North));
    }

    #[test]
    fn test_mark_wall_skips_visited() {
        let mut grid = BeliefGrid::new(4);
        grid.update(Location::new(1, 2), &quiet());
        assert!(!grid.mark_wall(Location::origin(), Direction::East));
        assert!(!grid.cell(Location::new(1, 2)).unwrap().wall);
    }

    #[test]
    fn test_candidates_sorted_with_direction_tie_break() {
        let mut grid = BeliefGrid::new(4);
        let here = Location::new(2, 2);
        grid.update(here, &stench());
        // All four neighbours have wumpus risk 1: direction order wins
        assert_eq!(
            grid.candidate_neighbors(here),
            vec![
                Location::new(1, 2),
                Location::new(2, 3),
                Location::new(3, 2),
                Location::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_candidates_prefer_lower_risk() {
        let mut grid = BeliefGrid::new(4);
        grid.update(Location::new(1, 2), &stench());
        // (1,1), (1,3) and (2,2) now carry wumpus risk 1
        grid.update(Location::new(2, 1), &quiet());
        // (1,1) and (2,2) are cleared by the quiet reading
        assert_eq!(
            grid.candidate_neighbors(Location::new(1, 2)),
            vec![Location::new(2, 2), Location::new(1, 1), Location::new(1, 3)]
        );
    }

    #[test]
    fn test_candidates_skip_lethal_and_walls() {
        let mut grid = BeliefGrid::new(4);
        let here = Location::new(2, 2);
        grid.mark_unsafe(Location::new(1, 2));
        grid.update(Location::new(2, 3), &quiet());
        grid.mark_wall(Location::new(3, 3), Direction::West);
        assert_eq!(grid.candidate_neighbors(here), vec![Location::new(2, 1)]);
    }

    #[test]
    fn test_clear_hazard_along_reverses_lethal() {
        let mut grid = BeliefGrid::new(4);
        grid.update(Location::new(1, 2), &stench());
        grid.mark_unsafe(Location::new(1, 3));

        let cleared = grid.clear_hazard_along(Location::new(1, 1), Direction::East);
        assert_eq!(cleared, Some(Location::new(1, 3)));
        let cell = grid.cell(Location::new(1, 3)).unwrap();
        assert!(cell.safe && !cell.lethal);
        assert_eq!(cell.wumpus_risk, 0);
    }

    #[test]
    fn test_clear_hazard_along_needs_wumpus_risk() {
        let mut grid = BeliefGrid::new(4);
        grid.mark_unsafe(Location::new(1, 3));
        assert_eq!(
            grid.clear_hazard_along(Location::origin(), Direction::East),
            None
        );
        assert!(grid.cell(Location::new(1, 3)).unwrap().lethal);
    }
}
