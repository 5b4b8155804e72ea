use once_cell::sync::Lazy;

use crate::coords::{CubeCoord, Direction};
use crate::types::{PortKind, Resource};

pub const DESERT_NUMBER: u8 = 7;

/// Columns occupied by each row of the board, top to bottom (3-4-5-4-3).
const ROWS: [(i32, std::ops::RangeInclusive<i32>); 5] =
    [(-2, 0..=2), (-1, -1..=2), (0, -2..=2), (1, -2..=1), (2, -2..=0)];

/// Tile letters `a..s` in reading order with their hex position.
pub static TILE_POSITIONS: Lazy<Vec<(char, CubeCoord)>> = Lazy::new(|| {
    ROWS.iter()
        .flat_map(|(r, qs)| qs.clone().map(move |q| CubeCoord::from_axial(q, *r)))
        .zip('a'..='s')
        .map(|(coord, letter)| (letter, coord))
        .collect()
});

/// The default board: resource and dice number per letter. `None` is the desert.
pub const DEFAULT_TILES: [(char, Option<Resource>, u8); 19] = {
    use Resource::*;
    [
        ('a', Some(Wheat), 9),
        ('b', Some(Wood), 8),
        ('c', Some(Sheep), 5),
        ('d', Some(Clay), 10),
        ('e', Some(Rock), 3),
        ('f', Some(Wheat), 11),
        ('g', Some(Wood), 4),
        ('h', Some(Sheep), 2),
        ('i', Some(Wood), 6),
        ('j', Some(Rock), 4),
        ('k', Some(Clay), 10),
        ('l', Some(Wheat), 9),
        ('m', Some(Rock), 5),
        ('n', None, DESERT_NUMBER),
        ('o', Some(Sheep), 11),
        ('p', Some(Wood), 3),
        ('q', Some(Wheat), 8),
        ('r', Some(Sheep), 12),
        ('s', Some(Clay), 6),
    ]
};

/// The nine harbours: the coastal edge of `letter` facing `direction`.
pub const PORTS: [(char, Direction, PortKind); 9] = {
    use Direction::*;
    use Resource::*;
    [
        ('a', NorthWest, PortKind::Any),
        ('b', NorthEast, PortKind::Specific(Sheep)),
        ('g', East, PortKind::Any),
        ('l', SouthEast, PortKind::Specific(Rock)),
        ('p', SouthEast, PortKind::Specific(Wheat)),
        ('s', SouthWest, PortKind::Any),
        ('q', West, PortKind::Specific(Clay)),
        ('h', West, PortKind::Specific(Wood)),
        ('d', NorthWest, PortKind::Any),
    ]
};

pub fn default_resources() -> Vec<Option<Resource>> {
    DEFAULT_TILES.iter().map(|(_, resource, _)| *resource).collect()
}

/// Dice numbers handed to non-desert tiles, in letter order.
pub fn default_numbers() -> Vec<u8> {
    DEFAULT_TILES
        .iter()
        .filter(|(_, resource, _)| resource.is_some())
        .map(|(_, _, number)| *number)
        .collect()
}
