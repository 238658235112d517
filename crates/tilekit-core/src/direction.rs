//! The eight compass directions plus a "none" sentinel.
//!
//! [`Direction`] is the atomic value stored in every precomputed
//! pathfinding structure: one step of movement on the grid, or
//! [`Direction::None`] when there is nowhere to go (target reached or
//! unreachable).

use crate::geom::Point;

/// A compass direction, or `None` when no step exists.
///
/// North is `-y` (screen coordinates, Y grows down). The byte encoding
/// (`0` = none, `1..=8` = N, NE, E, SE, S, SW, W, NW) is part of the
/// atlas serialization format and must not change.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    None,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// The eight real directions in clockwise order starting at north.
    ///
    /// This is the canonical neighbor expansion order used by every
    /// relaxation, so results are reproducible across runs.
    pub const COMPASS: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The coordinate delta of one step in this direction.
    /// `None` has a zero delta.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Direction::None => Point::new(0, 0),
            Direction::North => Point::new(0, -1),
            Direction::NorthEast => Point::new(1, -1),
            Direction::East => Point::new(1, 0),
            Direction::SouthEast => Point::new(1, 1),
            Direction::South => Point::new(0, 1),
            Direction::SouthWest => Point::new(-1, 1),
            Direction::West => Point::new(-1, 0),
            Direction::NorthWest => Point::new(-1, -1),
        }
    }

    /// The direction matching a single-step delta, or `None` for any
    /// delta that is not a king move.
    pub const fn from_delta(d: Point) -> Direction {
        match (d.x, d.y) {
            (0, -1) => Direction::North,
            (1, -1) => Direction::NorthEast,
            (1, 0) => Direction::East,
            (1, 1) => Direction::SouthEast,
            (0, 1) => Direction::South,
            (-1, 1) => Direction::SouthWest,
            (-1, 0) => Direction::West,
            (-1, -1) => Direction::NorthWest,
            _ => Direction::None,
        }
    }

    /// The opposite direction (`None` stays `None`).
    #[inline]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::None => Direction::None,
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Whether this is one of the four diagonal directions.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }

    /// Wire encoding used by atlas serialization.
    #[inline]
    pub const fn to_byte(self) -> u8 {
        match self {
            Direction::None => 0,
            Direction::North => 1,
            Direction::NorthEast => 2,
            Direction::East => 3,
            Direction::SouthEast => 4,
            Direction::South => 5,
            Direction::SouthWest => 6,
            Direction::West => 7,
            Direction::NorthWest => 8,
        }
    }

    /// Decode the wire encoding. Returns `None` for bytes above 8.
    pub const fn from_byte(b: u8) -> Option<Direction> {
        Some(match b {
            0 => Direction::None,
            1 => Direction::North,
            2 => Direction::NorthEast,
            3 => Direction::East,
            4 => Direction::SouthEast,
            5 => Direction::South,
            6 => Direction::SouthWest,
            7 => Direction::West,
            8 => Direction::NorthWest,
            _ => return None,
        })
    }
}
