//! Mixed-radix index arithmetic over flattened cell grids.
//!
//! A grid with `n` axes of side `s` is stored as a flat array. The cell at
//! coordinates `(c_0, ..., c_{n-1})` lives at offset `c_0 + c_1*s + ... +
//! c_{n-1}*s^(n-1)`, so axis 0 varies fastest.
//!
//! The indexers here walk a grid with an odometer: a counter whose digits
//! each range over `0..s`, incremented from digit 0 with carry. Both are lazy,
//! restartable (via [`Clone`]), and report their exact length.

use smallvec::SmallVec;

use crate::MAX_NDIM;

/// Digits of a grid coordinate, one per axis.
pub type Digits = SmallVec<[u16; MAX_NDIM as usize]>;

/// Returns the flat offset of the cell at `digits` in a grid of side `size`.
pub fn offset_of(digits: &[u16], size: u16) -> usize {
    digits
        .iter()
        .rev()
        .fold(0, |acc, &d| acc * size as usize + d as usize)
}

/// Returns the `n` digits of the cell at flat `offset` in a grid of side
/// `size`.
pub fn digits_of(mut offset: usize, size: u16, n: usize) -> Digits {
    let size = size as usize;
    (0..n)
        .map(|_| {
            let d = offset % size;
            offset /= size;
            d as u16
        })
        .collect()
}

/// Moves the digit at `from` to position `to` in an ordinal of an `n`-digit
/// grid, shifting the digits between them by one place. This re-expresses a
/// cell when one axis of the grid is swapped for another that sorts at a
/// different position.
pub fn move_digit(ordinal: usize, size: u16, n: usize, from: usize, to: usize) -> usize {
    if from == to {
        return ordinal;
    }
    let mut digits = digits_of(ordinal, size, n);
    let d = digits.remove(from);
    digits.insert(to, d);
    offset_of(&digits, size)
}

#[derive(Debug, Clone)]
struct Odometer {
    size: u16,
    digits: Digits,
    /// Digit that is held constant and skipped when carrying.
    fixed: Option<usize>,
    remaining: usize,
}

impl Odometer {
    fn new(size: u16, n: usize, fixed: Option<(usize, u16)>) -> Self {
        let mut digits = Digits::from_elem(0, n);
        let free_digits = match fixed {
            Some((axis, value)) => {
                digits[axis] = value;
                n.saturating_sub(1)
            }
            None => n,
        };
        Self {
            size,
            digits,
            fixed: fixed.map(|(axis, _)| axis),
            remaining: (size as usize).pow(free_digits as u32),
        }
    }

    /// Returns the current digits and advances to the next combination.
    fn next_digits(&mut self) -> Option<Digits> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.digits.clone();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(current)
    }

    fn advance(&mut self) {
        let max = self.size - 1;
        for (i, d) in self.digits.iter_mut().enumerate() {
            if Some(i) == self.fixed {
                continue;
            }
            if *d == max {
                *d = 0;
            } else {
                *d += 1;
                return;
            }
        }
    }
}

/// Flat offsets of the cells of a face grid that lie in one layer, in
/// odometer order. Constructed by [`layer_positions()`] or [`positions()`].
///
/// The position of each offset in the sequence is its ordinal in the layer
/// sub-grid, whose axes are the face grid's axes minus the fixed one.
#[derive(Debug, Clone)]
pub struct SlicePositions {
    odometer: Odometer,
}

impl Iterator for SlicePositions {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let digits = self.odometer.next_digits()?;
        Some(offset_of(&digits, self.odometer.size))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.odometer.remaining, Some(self.odometer.remaining))
    }
}

impl ExactSizeIterator for SlicePositions {}

/// Returns the offsets of the cells of an `n`-axis grid of side `size` whose
/// coordinate along `fixed_axis` is `coordinate`. There are `size^(n-1)` of
/// them (or 1 if `n` is 0).
pub fn layer_positions(size: u16, n: usize, fixed_axis: usize, coordinate: u16) -> SlicePositions {
    debug_assert!(fixed_axis < n.max(1));
    debug_assert!(coordinate < size);
    let fixed = (fixed_axis < n).then_some((fixed_axis, coordinate));
    SlicePositions {
        odometer: Odometer::new(size, n, fixed),
    }
}

/// Returns the offsets of the cells of a face of an `ndim`-dimensional cube
/// that lie in layer `slice` along the face grid's local axis `face_axis`.
///
/// Both `face_axis` (`1..=ndim-1`) and `slice` (`1..=size`) are 1-indexed.
/// The offsets are 0-indexed.
///
/// # Panics
///
/// Panics if `face_axis` or `slice` is out of range.
pub fn positions(face_axis: usize, size: u16, ndim: u8, slice: u16) -> SlicePositions {
    let n = ndim.saturating_sub(1) as usize;
    assert!((1..=n.max(1)).contains(&face_axis), "face axis out of range");
    assert!((1..=size).contains(&slice), "slice out of range");
    layer_positions(size, n, face_axis - 1, slice - 1)
}

/// Ordinals of the cells of a grid, in odometer order, each mirrored along
/// one axis. Constructed by [`flipped_positions()`].
#[derive(Debug, Clone)]
pub struct FlippedPositions {
    odometer: Odometer,
    flip_axis: usize,
}

impl Iterator for FlippedPositions {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let size = self.odometer.size;
        let mut digits = self.odometer.next_digits()?;
        if let Some(d) = digits.get_mut(self.flip_axis) {
            *d = size - 1 - *d;
        }
        Some(offset_of(&digits, size))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.odometer.remaining, Some(self.odometer.remaining))
    }
}

impl ExactSizeIterator for FlippedPositions {}

/// Returns, for each cell of an `n`-axis grid of side `size` in odometer
/// order, the ordinal of its mirror image along `flip_axis` (coordinate `v`
/// becomes `size-1-v`). The output is 0-indexed.
///
/// If `flip_axis` is not an axis of the grid, nothing is mirrored.
pub fn flipped_positions(size: u16, n: usize, flip_axis: usize) -> FlippedPositions {
    FlippedPositions {
        odometer: Odometer::new(size, n, None),
        flip_axis,
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_offset_digits() {
        assert_eq!(offset_of(&[1, 2, 0], 3), 7);
        assert_eq!(digits_of(7, 3, 3).as_slice(), &[1, 2, 0]);
        assert_eq!(offset_of(&[], 3), 0);
    }

    #[test]
    fn test_layer_positions_3d() {
        // 3x3 face grid, fix axis 0 to 2: the last column.
        assert_eq!(layer_positions(3, 2, 0, 2).collect_vec(), vec![2, 5, 8]);
        // Fix axis 1 to 1: the middle row.
        assert_eq!(layer_positions(3, 2, 1, 1).collect_vec(), vec![3, 4, 5]);
    }

    #[test]
    fn test_layer_positions_4d() {
        // 2x2x2 face grid, fix axis 1 to 0.
        assert_eq!(layer_positions(2, 3, 1, 0).collect_vec(), vec![0, 1, 4, 5]);
        assert_eq!(positions(2, 2, 4, 1).collect_vec(), vec![0, 1, 4, 5]);
        assert_eq!(positions(3, 2, 4, 2).collect_vec(), vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_positions_completeness() {
        for ndim in 3..=6 {
            for size in 2..=4 {
                let face_cells = (size as usize).pow(ndim as u32 - 1);
                let layer_cells = (size as usize).pow(ndim as u32 - 2);
                for face_axis in 1..ndim as usize {
                    let mut all = vec![];
                    for slice in 1..=size {
                        let p = positions(face_axis, size, ndim, slice);
                        assert_eq!(p.len(), layer_cells);
                        let p = p.collect_vec();
                        assert_eq!(p.len(), layer_cells);
                        assert!(p.iter().all_unique());
                        assert!(p.iter().all(|&i| i < face_cells));
                        all.extend(p);
                    }
                    // The layers partition the face.
                    all.sort_unstable();
                    assert_eq!(all, (0..face_cells).collect_vec());
                }
            }
        }
    }

    #[test]
    fn test_positions_restartable() {
        let p = positions(1, 3, 4, 2);
        let first = p.clone().collect_vec();
        assert_eq!(first, p.collect_vec());
    }

    #[test]
    fn test_positions_degenerate() {
        // A 0-axis grid has exactly one cell.
        assert_eq!(layer_positions(3, 0, 0, 0).collect_vec(), vec![0]);
    }

    #[test]
    fn test_flipped_positions() {
        assert_eq!(flipped_positions(3, 1, 0).collect_vec(), vec![2, 1, 0]);
        assert_eq!(flipped_positions(2, 2, 0).collect_vec(), vec![1, 0, 3, 2]);
        assert_eq!(flipped_positions(2, 2, 1).collect_vec(), vec![2, 3, 0, 1]);
        // Out-of-range axis leaves everything in place.
        assert_eq!(flipped_positions(2, 2, 5).collect_vec(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_flipped_positions_involution() {
        for size in 2..=4 {
            for n in 0..=3 {
                for flip_axis in 0..n {
                    let flipped = flipped_positions(size, n, flip_axis).collect_vec();
                    assert_eq!(flipped.len(), (size as usize).pow(n as u32));
                    for (i, &j) in flipped.iter().enumerate() {
                        assert_eq!(flipped[j], i);
                    }
                }
            }
        }
    }

    #[test]
    fn test_move_digit() {
        // digits [a, b, c] = [1, 0, 2] in base 3 -> move digit 0 to 2 -> [0, 2, 1]
        let ordinal = offset_of(&[1, 0, 2], 3);
        assert_eq!(move_digit(ordinal, 3, 3, 0, 2), offset_of(&[0, 2, 1], 3));
        assert_eq!(move_digit(ordinal, 3, 3, 2, 0), offset_of(&[2, 1, 0], 3));
        assert_eq!(move_digit(ordinal, 3, 3, 1, 1), ordinal);
    }
}
