//! Grid coordinates and headings.

use std::fmt;

/// One of the four cardinal headings, in clockwise order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

const DELTAS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

impl Direction {
    /// Clockwise enumeration order. Also the tie-break order for candidates.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// `(row_delta, col_delta)` of one step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        DELTAS[self.index()]
    }

    #[must_use]
    pub const fn turn_right(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    #[must_use]
    pub const fn turn_left(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    /// The direction leading from `from` to the orthogonally adjacent `to`.
    ///
    /// Returns `None` when the two locations are not neighbours.
    #[must_use]
    pub fn between(from: Location, to: Location) -> Option<Self> {
        let delta = (to.row - from.row, to.col - from.col);
        Self::ALL.into_iter().find(|d| d.delta() == delta)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "NORTH",
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
        }
    }

    /// Arrow glyph used when drawing the explorer.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::North => '^',
            Self::East => '>',
            Self::South => 'v',
            Self::West => '<',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable `(row, col)` cell coordinate. The cave interior is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The starting cell and the only exit.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(1, 1)
    }

    /// Returns the location one step away along `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dr, dc) = direction.delta();
        Self::new(self.row + dr, self.col + dc)
    }

    /// The four orthogonal neighbours in `Direction::ALL` order, unfiltered.
    #[must_use]
    pub fn neighbors(self) -> [Self; 4] {
        Direction::ALL.map(|d| self.step(d))
    }

    /// True if the location lies inside a `size`×`size` cave.
    #[must_use]
    pub const fn is_inside(self, size: i32) -> bool {
        self.row >= 1 && self.row <= size && self.col >= 1 && self.col <= size
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
