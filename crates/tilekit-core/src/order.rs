//! Major order: the declared physical layout of a grid's backing
//! collection.
//!
//! Row-major stores tiles row by row (outer index = Y, inner = X);
//! column-major stores them column by column. Every algorithm in the
//! toolkit routes flat indexing through [`MajorOrder::flat_index`], so the
//! layout choice never leaks into geometry or pathfinding code.

use crate::geom::Point;

/// How a grid's backing collection is laid out in memory.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MajorOrder {
    /// Outer index = row (Y), inner index = column (X).
    #[default]
    RowMajor,
    /// Outer index = column (X), inner index = row (Y).
    ColumnMajor,
}

/// The one internal addressing function. Both orders are expressed as two
/// argument conventions over it.
#[inline]
const fn lane(inner: i32, outer: i32, inner_extent: i32) -> usize {
    outer as usize * inner_extent as usize + inner as usize
}

impl MajorOrder {
    /// Flat index of `p` in a `width`×`height` collection with this
    /// layout. Callers must validate bounds first.
    #[inline]
    pub const fn flat_index(self, p: Point, width: i32, height: i32) -> usize {
        match self {
            MajorOrder::RowMajor => lane(p.x, p.y, width),
            MajorOrder::ColumnMajor => lane(p.y, p.x, height),
        }
    }

    /// Inverse of [`flat_index`](Self::flat_index).
    #[inline]
    pub const fn point_at(self, idx: usize, width: i32, height: i32) -> Point {
        match self {
            MajorOrder::RowMajor => {
                Point::new((idx % width as usize) as i32, (idx / width as usize) as i32)
            }
            MajorOrder::ColumnMajor => Point::new(
                (idx / height as usize) as i32,
                (idx % height as usize) as i32,
            ),
        }
    }

    /// Wire encoding used by atlas serialization.
    #[inline]
    pub const fn to_byte(self) -> u8 {
        match self {
            MajorOrder::RowMajor => 0,
            MajorOrder::ColumnMajor => 1,
        }
    }

    /// Decode the wire encoding.
    pub const fn from_byte(b: u8) -> Option<MajorOrder> {
        match b {
            0 => Some(MajorOrder::RowMajor),
            1 => Some(MajorOrder::ColumnMajor),
            _ => None,
        }
    }
}
