//! A ready-made [`TileGrid`] implementation over a flat `Vec`.
//!
//! Callers with their own tile storage implement [`TileGrid`] directly;
//! [`VecGrid`] is for everyone else (and for this workspace's tests).

use crate::error::GridError;
use crate::geom::Point;
use crate::order::MajorOrder;
use crate::tile::{Tile, TileGrid};

/// A minimal concrete tile: coordinates, walkability, weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlatTile {
    pub x: i32,
    pub y: i32,
    pub walkable: bool,
    pub weight: f32,
}

impl FlatTile {
    /// A walkable tile with the default weight.
    pub const fn walkable(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            walkable: true,
            weight: 1.0,
        }
    }

    /// A wall tile.
    pub const fn wall(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            walkable: false,
            weight: 1.0,
        }
    }

    /// A walkable tile with a custom weight.
    pub const fn weighted(x: i32, y: i32, weight: f32) -> Self {
        Self {
            x,
            y,
            walkable: true,
            weight,
        }
    }
}

impl Tile for FlatTile {
    fn x(&self) -> i32 {
        self.x
    }

    fn y(&self) -> i32 {
        self.y
    }

    fn is_walkable(&self) -> bool {
        self.walkable
    }

    fn weight(&self) -> f32 {
        self.weight
    }
}

/// A rectangular tile collection backed by a flat `Vec`, with a declared
/// major order.
#[derive(Debug, Clone)]
pub struct VecGrid<T: Tile> {
    tiles: Vec<T>,
    width: i32,
    height: i32,
    order: MajorOrder,
}

impl<T: Tile> VecGrid<T> {
    /// Build a grid by calling `f` for every coordinate, storing tiles in
    /// the given major order.
    pub fn new_with(
        width: i32,
        height: i32,
        order: MajorOrder,
        mut f: impl FnMut(Point) -> T,
    ) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        let len = width as usize * height as usize;
        let mut tiles = Vec::with_capacity(len);
        for idx in 0..len {
            tiles.push(f(order.point_at(idx, width, height)));
        }
        Ok(Self {
            tiles,
            width,
            height,
            order,
        })
    }

    /// Wrap an existing row-major collection.
    pub fn from_rows(width: i32, height: i32, tiles: Vec<T>) -> Result<Self, GridError> {
        Self::from_tiles(width, height, MajorOrder::RowMajor, tiles)
    }

    /// Wrap an existing column-major collection.
    pub fn from_columns(width: i32, height: i32, tiles: Vec<T>) -> Result<Self, GridError> {
        Self::from_tiles(width, height, MajorOrder::ColumnMajor, tiles)
    }

    fn from_tiles(
        width: i32,
        height: i32,
        order: MajorOrder,
        tiles: Vec<T>,
    ) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        let expected = width as usize * height as usize;
        if tiles.len() != expected {
            return Err(GridError::BadTileCount {
                expected,
                got: tiles.len(),
            });
        }
        Ok(Self {
            tiles,
            width,
            height,
            order,
        })
    }

    /// Iterate over all tiles in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.tiles.iter()
    }
}

impl<T: Tile> TileGrid for VecGrid<T> {
    type Tile = T;

    fn horizontal_extent(&self) -> i32 {
        self.width
    }

    fn vertical_extent(&self) -> i32 {
        self.height
    }

    fn major_order(&self) -> MajorOrder {
        self.order
    }

    fn tile_at_index(&self, idx: usize) -> &T {
        &self.tiles[idx]
    }
}
