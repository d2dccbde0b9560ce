//! Error types.

use std::num::ParseIntError;

use thiserror::Error;

use crate::{CubeShape, MAX_NDIM, MAX_STICKERS, MIN_NDIM, MIN_SIZE};

/// Error indicating a puzzle shape that cannot be constructed.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BadShape {
    #[error("number of dimensions must be between {min} and {max}, got {0}", min = MIN_NDIM, max = MAX_NDIM)]
    Ndim(u8),
    #[error("number of slices per side must be at least {min}, got {0}", min = MIN_SIZE)]
    Size(u16),
    #[error("a {ndim}-dimensional cube with {size} slices per side has more than {max} stickers", max = MAX_STICKERS)]
    TooManyStickers { ndim: u8, size: u16 },
}

/// Error indicating a move descriptor that is not valid for a puzzle.
///
/// All values are 1-indexed, as entered by the user.
#[allow(missing_docs)]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BadMove {
    #[error("face {face} is out of range (expected 1 to {max})")]
    FaceOutOfRange { face: u8, max: u8 },
    #[error("axis {axis} is out of range (expected 1 to {max})")]
    AxisOutOfRange { axis: u8, max: u8 },
    #[error("face {face} cannot turn using axis {axis}; axes {low} and {high} are forbidden")]
    ForbiddenAxis { face: u8, axis: u8, low: u8, high: u8 },
    #[error("axes {from} and {to} lie on the same axis and do not span a plane")]
    ParallelAxes { from: u8, to: u8 },
    #[error("slice {slice} is out of range (expected 1 to {max})")]
    SliceOutOfRange { slice: u16, max: u16 },
    #[error("twist for a {expected} cube cannot be applied to a {actual} cube")]
    ShapeMismatch {
        expected: CubeShape,
        actual: CubeShape,
    },
}

/// Error produced when parsing a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMoveError {
    /// Missing separator
    #[error("expected move of the form `face:from>to@slice`, got {0:?}")]
    Syntax(String),
    /// Integer parse error
    #[error("{0}")]
    ParseInt(#[from] ParseIntError),
}
