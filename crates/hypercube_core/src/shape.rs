use std::fmt;

use crate::error::BadShape;
use crate::ti::{TiVec, TypedIndex, TypedIndexIter};
use crate::{MAX_NDIM, MAX_STICKERS, MIN_NDIM, MIN_SIZE};

/// Label on a sticker, identifying which sticker of the solved cube is
/// currently in a cell. Labels start at 1.
pub type Label = u32;

/// Vector indexed by [`Face`].
pub type PerFace<T> = TiVec<Face, T>;

typed_index_struct! {
    /// Face of an N-dimensional cube, 0-indexed.
    ///
    /// Faces `2k` and `2k+1` are orthogonal to axis `k`. Even faces lie on the
    /// low side of their axis and odd faces lie on the high side. Users number
    /// faces from 1, so [`Face::number()`] and [`Face::from_number()`] convert
    /// to and from that form.
    pub struct Face(pub u8);

    /// Spatial axis of an N-dimensional cube, 0-indexed.
    pub struct Axis(pub u8);
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Face {
    /// Returns the face with a 1-indexed number, or `None` if `number` is
    /// zero.
    pub fn from_number(number: u8) -> Option<Self> {
        number.checked_sub(1).map(Face)
    }
    /// Returns the 1-indexed number of the face.
    pub fn number(self) -> u8 {
        self.0 + 1
    }

    /// Returns the axis orthogonal to the face.
    pub fn axis(self) -> Axis {
        Axis(self.0 / 2)
    }
    /// Returns whether the face lies on the high side of its axis.
    pub fn is_high(self) -> bool {
        self.0 % 2 == 1
    }
    /// Returns the opposite face on the same axis.
    #[must_use]
    pub fn partner(self) -> Self {
        Face(self.0 ^ 1)
    }
    /// Returns the coordinate along the face's axis of the cells that touch
    /// the face.
    pub fn boundary(self, size: u16) -> u16 {
        if self.is_high() { size - 1 } else { 0 }
    }
}

impl Axis {
    /// Returns the face on the low side of the axis.
    pub fn low_face(self) -> Face {
        Face(self.0 * 2)
    }
    /// Returns the face on the high side of the axis.
    pub fn high_face(self) -> Face {
        Face(self.0 * 2 + 1)
    }
    /// Returns the face on the low or high side of the axis.
    pub fn face(self, high: bool) -> Face {
        if high { self.high_face() } else { self.low_face() }
    }

    /// Returns the index of this axis in a grid whose axes are all the global
    /// axes except `excluded`, in increasing order.
    ///
    /// `self` must not be one of the excluded axes.
    pub fn index_without(self, excluded: &[Axis]) -> usize {
        debug_assert!(!excluded.contains(&self), "{self:?} is excluded");
        self.to_index() - excluded.iter().filter(|&&e| e < self).count()
    }
}

/// Dimensions of an N-dimensional cube: the number of spatial dimensions and
/// the number of slices along each edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CubeShape {
    ndim: u8,
    size: u16,
}

impl fmt::Display for CubeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size;
        write!(f, "{size}")?;
        for _ in 1..self.ndim {
            write!(f, "x{size}")?;
        }
        Ok(())
    }
}

impl CubeShape {
    /// Constructs a new shape, or returns an error if it is out of range or
    /// the cube would have more than [`MAX_STICKERS`] stickers.
    pub fn new(ndim: u8, size: u16) -> Result<Self, BadShape> {
        if !(MIN_NDIM..=MAX_NDIM).contains(&ndim) {
            return Err(BadShape::Ndim(ndim));
        }
        if size < MIN_SIZE {
            return Err(BadShape::Size(size));
        }
        let sticker_count = (size as usize)
            .checked_pow(ndim as u32 - 1)
            .and_then(|n| n.checked_mul(ndim as usize * 2))
            .filter(|&n| n <= MAX_STICKERS && Label::try_from(n).is_ok());
        match sticker_count {
            Some(_) => Ok(Self { ndim, size }),
            None => Err(BadShape::TooManyStickers { ndim, size }),
        }
    }

    /// Returns the number of spatial dimensions.
    pub fn ndim(self) -> u8 {
        self.ndim
    }
    /// Returns the number of slices along each edge.
    pub fn size(self) -> u16 {
        self.size
    }

    /// Returns the number of faces.
    pub fn face_count(self) -> usize {
        self.ndim as usize * 2
    }
    /// Returns the number of cells on each face: `size^(ndim-1)`.
    pub fn stickers_per_face(self) -> usize {
        (self.size as usize).pow(self.ndim as u32 - 1)
    }
    /// Returns the number of cells of one face that lie in a single layer:
    /// `size^(ndim-2)`, or 1 if there are fewer than two dimensions.
    pub fn stickers_per_layer(self) -> usize {
        (self.size as usize).pow(self.ndim.saturating_sub(2) as u32)
    }
    /// Returns the total number of stickers.
    pub fn sticker_count(self) -> usize {
        self.stickers_per_face() * self.face_count()
    }

    /// Returns an iterator over all faces.
    pub fn faces(self) -> TypedIndexIter<Face> {
        Face::iter(self.face_count())
    }
    /// Returns whether `face` exists on the cube.
    pub fn contains_face(self, face: Face) -> bool {
        face.to_index() < self.face_count()
    }
}
