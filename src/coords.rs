use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Neighbour directions of a pointy-top hex, listed counter-clockwise so that
/// consecutive entries (cyclically) share a corner.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub const CYCLE: [Direction; 6] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    pub fn unit(self) -> CubeCoord {
        match self {
            Direction::East => CubeCoord::new(1, -1, 0),
            Direction::NorthEast => CubeCoord::new(1, 0, -1),
            Direction::NorthWest => CubeCoord::new(0, 1, -1),
            Direction::West => CubeCoord::new(-1, 1, 0),
            Direction::SouthWest => CubeCoord::new(-1, 0, 1),
            Direction::SouthEast => CubeCoord::new(0, -1, 1),
        }
    }

    fn position(self) -> usize {
        Self::CYCLE
            .iter()
            .position(|d| *d == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Direction {
        Self::CYCLE[(self.position() + 1) % 6]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CubeCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CubeCoord {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        debug_assert!(x + y + z == 0, "cube coordinates must sum to zero");
        Self { x, y, z }
    }

    /// `q` is the column within a row, `r` the row (growing downwards).
    pub fn from_axial(q: i32, r: i32) -> Self {
        CubeCoord::new(q, -q - r, r)
    }

    pub fn add(self, other: CubeCoord) -> Self {
        CubeCoord::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn neighbor(self, direction: Direction) -> Self {
        self.add(direction.unit())
    }

    pub fn neighbors(self) -> impl Iterator<Item = CubeCoord> {
        Direction::CYCLE.into_iter().map(move |d| self.neighbor(d))
    }

    /// The three hexes (on or off the board) meeting at the corner between
    /// `direction` and the next direction counter-clockwise, sorted.
    pub fn corner(self, direction: Direction) -> [CubeCoord; 3] {
        let mut hexes = [
            self,
            self.neighbor(direction),
            self.neighbor(direction.next()),
        ];
        hexes.sort();
        hexes
    }
}

impl Default for CubeCoord {
    fn default() -> Self {
        CubeCoord::new(0, 0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_directions_are_adjacent() {
        for d in Direction::CYCLE {
            let a = CubeCoord::default().neighbor(d);
            let b = CubeCoord::default().neighbor(d.next());
            assert!(a.neighbors().any(|n| n == b), "{d} and {} not adjacent", d.next());
        }
    }

    #[test]
    fn corner_is_shared_by_its_three_hexes() {
        let origin = CubeCoord::default();
        let corner = origin.corner(Direction::East);
        let east = origin.neighbor(Direction::East);
        // the same corner seen from the east neighbour lies between its
        // north-west and west directions
        assert_eq!(east.corner(Direction::NorthWest), corner);
    }
}
