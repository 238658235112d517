//! Errors for atlas generation and (de)serialization.

use tilekit_core::GridError;

/// An error from atlas generation or decoding.
///
/// Cancellation is a distinct outcome from both success and failure: no
/// partial or corrupt atlas is ever returned. Format errors fail fast
/// with the specific mismatch rather than attempting best-effort
/// recovery.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AtlasError {
    /// The cancellation token was signaled; generation stopped at the
    /// next per-target check point.
    #[error("atlas generation cancelled")]
    Cancelled,

    /// The byte stream does not start with the atlas magic.
    #[error("bad magic bytes in atlas header")]
    BadMagic,

    /// The byte stream declares a format version this build cannot read.
    #[error("unsupported atlas format version {0}")]
    UnsupportedVersion(u8),

    /// The supplied grid's dimensions differ from the ones the bytes
    /// were generated for.
    #[error(
        "atlas encodes a {want_width}x{want_height} grid, supplied grid is {got_width}x{got_height}"
    )]
    DimensionMismatch {
        want_width: i32,
        want_height: i32,
        got_width: i32,
        got_height: i32,
    },

    /// The supplied grid's walkable layout differs from the one encoded
    /// in the bytes.
    #[error("supplied grid's walkable layout does not match the atlas")]
    LayoutMismatch,

    /// The byte stream is shorter than its header declares.
    #[error("atlas bytes truncated: need {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },

    /// The byte stream is longer than its header declares.
    #[error("{0} trailing bytes after atlas payload")]
    TrailingBytes(usize),

    /// An out-of-range header field (major order or diagonals policy).
    #[error("invalid header field: {0}")]
    BadHeader(&'static str),

    /// A direction byte outside the 0..=8 wire range.
    #[error("invalid direction byte {value:#04x} at offset {offset}")]
    CorruptDirection { value: u8, offset: usize },

    /// A precondition violation on the underlying grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}
