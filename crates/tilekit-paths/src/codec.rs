//! Binary serialization for [`DirectionAtlas`].
//!
//! Atlases are expensive to build and cheap to store, so they can be
//! written once and shipped alongside the map they describe. The format
//! is deliberately dumb: a fixed header, a bit-packed walkable mask,
//! then one direction byte per (target, source) pair. All multi-byte
//! integers are little-endian.
//!
//! Layout:
//!
//! ```text
//! magic    4  b"TKAT"
//! version  1  currently 1
//! width    4  u32
//! height   4  u32
//! order    1  MajorOrder wire byte
//! policy   1  DiagonalsPolicy wire byte
//! targets  4  u32, number of per-target fields
//! mask     ceil(width*height / 8), LSB-first walkability bits
//! fields   targets * width * height direction bytes
//! ```
//!
//! Decoding validates against a live grid: the caller proves the bytes
//! belong to the map being loaded, and a stale or foreign file is
//! rejected instead of silently mis-routing.

use log::debug;
use tilekit_core::{Direction, MajorOrder, TileGrid, walkable_at};

use crate::atlas::DirectionAtlas;
use crate::error::AtlasError;
use crate::policy::DiagonalsPolicy;
use crate::task::CancelToken;

const MAGIC: [u8; 4] = *b"TKAT";
const VERSION: u8 = 1;
const HEADER_LEN: usize = 19;

fn mask_len(cells: usize) -> usize {
    cells.div_ceil(8)
}

impl DirectionAtlas {
    /// Serialize the atlas.
    pub fn to_bytes(&self) -> Vec<u8> {
        let cells = self.walkable.len();
        let mut out =
            Vec::with_capacity(HEADER_LEN + mask_len(cells) + self.fields.len() * cells);
        self.write_header_and_mask(&mut out);
        for field in &self.fields {
            out.extend(field.iter().map(|d| d.to_byte()));
        }
        out
    }

    /// Serialize the atlas one field at a time, reporting progress and
    /// honoring cancellation between fields.
    ///
    /// `progress` receives the fraction of fields written; the final
    /// call is `1.0`. A cancelled run returns [`AtlasError::Cancelled`]
    /// and no bytes.
    pub fn to_bytes_with(
        &self,
        mut progress: impl FnMut(f32),
        cancel: &CancelToken,
    ) -> Result<Vec<u8>, AtlasError> {
        let cells = self.walkable.len();
        let total = self.fields.len();
        let mut out = Vec::with_capacity(HEADER_LEN + mask_len(cells) + total * cells);
        self.write_header_and_mask(&mut out);
        for (i, field) in self.fields.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(AtlasError::Cancelled);
            }
            out.extend(field.iter().map(|d| d.to_byte()));
            progress((i + 1) as f32 / total as f32);
        }
        if total == 0 {
            progress(1.0);
        }
        Ok(out)
    }

    fn write_header_and_mask(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.push(VERSION);
        out.extend_from_slice(&(self.width as u32).to_le_bytes());
        out.extend_from_slice(&(self.height as u32).to_le_bytes());
        out.push(self.order.to_byte());
        out.push(self.policy.to_byte());
        out.extend_from_slice(&(self.fields.len() as u32).to_le_bytes());

        let mut mask = vec![0u8; mask_len(self.walkable.len())];
        for (i, &w) in self.walkable.iter().enumerate() {
            if w {
                mask[i / 8] |= 1 << (i % 8);
            }
        }
        out.extend_from_slice(&mask);
    }

    /// Deserialize an atlas, validating it against `grid`.
    ///
    /// The grid must have the dimensions and walkable layout the bytes
    /// were generated for; any structural mismatch is an error rather
    /// than a best-effort load.
    pub fn from_bytes<G: TileGrid>(grid: &G, bytes: &[u8]) -> Result<Self, AtlasError> {
        Self::from_bytes_with(grid, bytes, |_| {}, &CancelToken::new())
    }

    /// Deserialize one field at a time, reporting progress and honoring
    /// cancellation between fields. Same contract as
    /// [`to_bytes_with`](Self::to_bytes_with).
    pub fn from_bytes_with<G: TileGrid>(
        grid: &G,
        bytes: &[u8],
        mut progress: impl FnMut(f32),
        cancel: &CancelToken,
    ) -> Result<Self, AtlasError> {
        if bytes.len() < HEADER_LEN {
            return Err(AtlasError::Truncated {
                expected: HEADER_LEN,
                got: bytes.len(),
            });
        }
        if bytes[0..4] != MAGIC {
            return Err(AtlasError::BadMagic);
        }
        if bytes[4] != VERSION {
            return Err(AtlasError::UnsupportedVersion(bytes[4]));
        }

        let raw_w = u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
        let raw_h = u32::from_le_bytes([bytes[9], bytes[10], bytes[11], bytes[12]]);
        let (Ok(width), Ok(height)) = (i32::try_from(raw_w), i32::try_from(raw_h)) else {
            return Err(AtlasError::BadHeader("dimensions"));
        };
        if grid.horizontal_extent() != width || grid.vertical_extent() != height {
            return Err(AtlasError::DimensionMismatch {
                want_width: width,
                want_height: height,
                got_width: grid.horizontal_extent(),
                got_height: grid.vertical_extent(),
            });
        }
        let order =
            MajorOrder::from_byte(bytes[13]).ok_or(AtlasError::BadHeader("major order"))?;
        let policy =
            DiagonalsPolicy::from_byte(bytes[14]).ok_or(AtlasError::BadHeader("diagonals policy"))?;
        let targets =
            u32::from_le_bytes([bytes[15], bytes[16], bytes[17], bytes[18]]) as usize;

        let cells = width as usize * height as usize;
        let mask_bytes = mask_len(cells);
        let expected = HEADER_LEN + mask_bytes + targets * cells;
        if bytes.len() < expected {
            return Err(AtlasError::Truncated {
                expected,
                got: bytes.len(),
            });
        }
        if bytes.len() > expected {
            return Err(AtlasError::TrailingBytes(bytes.len() - expected));
        }

        // The mask must describe the live grid exactly. Walkability is
        // compared through the atlas's own order, so the grid's declared
        // layout does not have to match the file's.
        let mask = &bytes[HEADER_LEN..HEADER_LEN + mask_bytes];
        let mut walkable = Vec::with_capacity(cells);
        let mut slot = vec![u32::MAX; cells];
        let mut n = 0u32;
        for i in 0..cells {
            let encoded = mask[i / 8] & (1 << (i % 8)) != 0;
            let actual = walkable_at(grid, order.point_at(i, width, height));
            if encoded != actual {
                return Err(AtlasError::LayoutMismatch);
            }
            if encoded {
                slot[i] = n;
                n += 1;
            }
            walkable.push(encoded);
        }
        if n as usize != targets {
            return Err(AtlasError::BadHeader("target count"));
        }

        let mut fields = Vec::with_capacity(targets);
        for t in 0..targets {
            if cancel.is_cancelled() {
                return Err(AtlasError::Cancelled);
            }
            let base = HEADER_LEN + mask_bytes + t * cells;
            let mut field = Vec::with_capacity(cells);
            for (i, &b) in bytes[base..base + cells].iter().enumerate() {
                let dir = Direction::from_byte(b).ok_or(AtlasError::CorruptDirection {
                    value: b,
                    offset: base + i,
                })?;
                field.push(dir);
            }
            fields.push(field);
            progress((t + 1) as f32 / targets as f32);
        }
        if targets == 0 {
            progress(1.0);
        }
        debug!("atlas decoded: {width}x{height}, {targets} targets");

        Ok(Self {
            width,
            height,
            order,
            policy,
            walkable,
            slot,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilekit_core::{FlatTile, Point, VecGrid};

    fn walled_grid() -> VecGrid<FlatTile> {
        VecGrid::new_with(5, 5, MajorOrder::RowMajor, |p| {
            if p.x == 2 && p.y != 4 {
                FlatTile::wall(p.x, p.y)
            } else {
                FlatTile::walkable(p.x, p.y)
            }
        })
        .unwrap()
    }

    #[test]
    fn round_trip_preserves_every_answer() {
        let g = walled_grid();
        let atlas = DirectionAtlas::generate(&g, DiagonalsPolicy::Euclidean);
        let bytes = atlas.to_bytes();
        let back = DirectionAtlas::from_bytes(&g, &bytes).unwrap();
        assert_eq!(atlas, back);
        assert_eq!(back.policy(), DiagonalsPolicy::Euclidean);

        for sy in 0..5 {
            for sx in 0..5 {
                for ty in 0..5 {
                    for tx in 0..5 {
                        let s = Point::new(sx, sy);
                        let t = Point::new(tx, ty);
                        assert_eq!(atlas.direction(s, t), back.direction(s, t));
                    }
                }
            }
        }
    }

    #[test]
    fn encoding_is_deterministic() {
        let g = walled_grid();
        let a = DirectionAtlas::generate(&g, DiagonalsPolicy::Uniform).to_bytes();
        let b = DirectionAtlas::generate(&g, DiagonalsPolicy::Uniform).to_bytes();
        assert_eq!(a, b);
    }

    #[test]
    fn expected_byte_length() {
        let g = walled_grid();
        let atlas = DirectionAtlas::generate(&g, DiagonalsPolicy::Uniform);
        // 19 header + ceil(25/8) mask + 21 fields of 25 bytes.
        assert_eq!(atlas.to_bytes().len(), 19 + 4 + 21 * 25);
    }

    #[test]
    fn header_errors() {
        let g = walled_grid();
        let bytes = DirectionAtlas::generate(&g, DiagonalsPolicy::Uniform).to_bytes();

        let err = DirectionAtlas::from_bytes(&g, &bytes[..10]).unwrap_err();
        assert!(matches!(err, AtlasError::Truncated { expected: 19, got: 10 }));

        let mut bad = bytes.clone();
        bad[0] = b'X';
        assert_eq!(
            DirectionAtlas::from_bytes(&g, &bad).unwrap_err(),
            AtlasError::BadMagic
        );

        let mut bad = bytes.clone();
        bad[4] = 9;
        assert_eq!(
            DirectionAtlas::from_bytes(&g, &bad).unwrap_err(),
            AtlasError::UnsupportedVersion(9)
        );

        let mut bad = bytes.clone();
        bad[14] = 7;
        assert_eq!(
            DirectionAtlas::from_bytes(&g, &bad).unwrap_err(),
            AtlasError::BadHeader("diagonals policy")
        );
    }

    #[test]
    fn payload_length_errors() {
        let g = walled_grid();
        let bytes = DirectionAtlas::generate(&g, DiagonalsPolicy::Uniform).to_bytes();

        let err = DirectionAtlas::from_bytes(&g, &bytes[..bytes.len() - 5]).unwrap_err();
        assert!(matches!(err, AtlasError::Truncated { .. }));

        let mut long = bytes.clone();
        long.extend_from_slice(&[0, 0, 0]);
        assert_eq!(
            DirectionAtlas::from_bytes(&g, &long).unwrap_err(),
            AtlasError::TrailingBytes(3)
        );
    }

    #[test]
    fn grid_mismatch_errors() {
        let g = walled_grid();
        let bytes = DirectionAtlas::generate(&g, DiagonalsPolicy::Uniform).to_bytes();

        let bigger = VecGrid::new_with(6, 5, MajorOrder::RowMajor, |p| {
            FlatTile::walkable(p.x, p.y)
        })
        .unwrap();
        let err = DirectionAtlas::from_bytes(&bigger, &bytes).unwrap_err();
        assert!(matches!(err, AtlasError::DimensionMismatch { .. }));

        // Same dimensions, wall moved one column over.
        let shifted = VecGrid::new_with(5, 5, MajorOrder::RowMajor, |p| {
            if p.x == 3 && p.y != 4 {
                FlatTile::wall(p.x, p.y)
            } else {
                FlatTile::walkable(p.x, p.y)
            }
        })
        .unwrap();
        assert_eq!(
            DirectionAtlas::from_bytes(&shifted, &bytes).unwrap_err(),
            AtlasError::LayoutMismatch
        );
    }

    #[test]
    fn corrupt_direction_reports_offset() {
        let g = walled_grid();
        let mut bytes = DirectionAtlas::generate(&g, DiagonalsPolicy::Uniform).to_bytes();
        let offset = 19 + 4 + 10;
        bytes[offset] = 0xBB;
        assert_eq!(
            DirectionAtlas::from_bytes(&g, &bytes).unwrap_err(),
            AtlasError::CorruptDirection {
                value: 0xBB,
                offset
            }
        );
    }

    #[test]
    fn chunked_codec_progress_and_cancel() {
        let g = walled_grid();
        let atlas = DirectionAtlas::generate(&g, DiagonalsPolicy::Uniform);

        let mut reports = Vec::new();
        let bytes = atlas
            .to_bytes_with(|p| reports.push(p), &CancelToken::new())
            .unwrap();
        assert_eq!(bytes, atlas.to_bytes());
        assert_eq!(reports.len(), atlas.target_count());
        assert_eq!(reports.last(), Some(&1.0));

        let mut reports = Vec::new();
        let back = DirectionAtlas::from_bytes_with(
            &g,
            &bytes,
            |p| reports.push(p),
            &CancelToken::new(),
        )
        .unwrap();
        assert_eq!(back, atlas);
        assert!(reports.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(reports.last(), Some(&1.0));

        let token = CancelToken::new();
        token.cancel();
        assert_eq!(
            atlas.to_bytes_with(|_| {}, &token).unwrap_err(),
            AtlasError::Cancelled
        );
        assert_eq!(
            DirectionAtlas::from_bytes_with(&g, &bytes, |_| {}, &token).unwrap_err(),
            AtlasError::Cancelled
        );
    }

    #[test]
    fn all_wall_grid_round_trips() {
        let g = VecGrid::new_with(3, 3, MajorOrder::RowMajor, |p| FlatTile::wall(p.x, p.y))
            .unwrap();
        let atlas = DirectionAtlas::generate(&g, DiagonalsPolicy::Uniform);
        assert_eq!(atlas.target_count(), 0);
        let bytes = atlas.to_bytes();
        assert_eq!(bytes.len(), 19 + 2);
        let back = DirectionAtlas::from_bytes(&g, &bytes).unwrap();
        assert_eq!(atlas, back);
    }
}
