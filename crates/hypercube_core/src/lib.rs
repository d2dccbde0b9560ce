//! Move engine for N-dimensional Rubik's cubes.
//!
//! An N-dimensional cube with `s` slices per side has `2N` faces, each of
//! which is an `(N-1)`-dimensional grid of `s^(N-1)` stickers. A move turns
//! one layer of the cube by a quarter turn in a plane spanned by two axes.
//!
//! ```
//! use hypercube_core::{Cube, CubeShape, Move};
//!
//! let shape = CubeShape::new(4, 3)?;
//! let mut cube = Cube::new(shape);
//! let mv: Move = "1:3>5@2".parse()?;
//! cube.apply_move(mv)?;
//! assert!(!cube.is_solved());
//! cube.apply_move(mv.inverse())?;
//! assert!(cube.is_solved());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#[macro_use]
pub mod ti;
mod cube;
pub mod error;
pub mod grid;
pub mod index;
mod moves;
mod scramble;
mod shape;


pub use prelude::*;

/// Prelude of common imports.
pub mod prelude {
    pub use crate::cube::Cube;
    pub use crate::error::{BadMove, BadShape, ParseMoveError};
    pub use crate::grid::FaceGrid;
    pub use crate::moves::{Move, Twist};
    pub use crate::scramble::{ScrambledCube, random_move, scramble};
    pub use crate::shape::{Axis, CubeShape, Face, Label, PerFace};
    pub use crate::ti::{TiVec, TypedIndex};
}

/// Minimum number of spatial dimensions.
pub const MIN_NDIM: u8 = 3;
/// Maximum number of spatial dimensions.
pub const MAX_NDIM: u8 = 16;
/// Minimum number of slices per side.
pub const MIN_SIZE: u16 = 2;
/// Maximum total number of stickers on a cube. One state then holds at most
/// 64 MiB of labels.
pub const MAX_STICKERS: usize = 1 << 24;
