//! Flattened hypercubic grids of stickers and quarter turns on them.

use std::fmt;

use itertools::Itertools;

use crate::Label;
use crate::index::{digits_of, offset_of};

/// Returns the cells of an `n`-axis grid of side `size` after a quarter turn
/// that carries axis `from` onto axis `to`.
///
/// The cell at coordinates `c` moves to `c'` where `c'[to] = c[from]` and
/// `c'[from] = size-1-c[to]`. Swapping `from` and `to` gives the inverse
/// turn.
///
/// A grid with fewer than two axes has no plane to turn in and is returned
/// unchanged. If `from` and `to` do not name two distinct axes of the grid,
/// the turn falls back to the plane of axes 0 and 1.
pub fn quarter_turn<T: Copy>(cells: &[T], size: u16, n: usize, from: usize, to: usize) -> Vec<T> {
    debug_assert_eq!(cells.len(), (size as usize).pow(n as u32));

    if n < 2 {
        return cells.to_vec();
    }
    let (from, to) = if from < n && to < n && from != to {
        (from, to)
    } else {
        log::warn!("bad quarter turn plane ({from}, {to}) for {n}-axis grid; using (0, 1)");
        (0, 1)
    };

    let mut ret = cells.to_vec();
    for (i, &cell) in cells.iter().enumerate() {
        let mut digits = digits_of(i, size, n);
        let (a, b) = (digits[from], digits[to]);
        digits[to] = a;
        digits[from] = size - 1 - b;
        ret[offset_of(&digits, size)] = cell;
    }
    ret
}

/// Grid of sticker labels on one face of a cube.
///
/// A face of an `N`-dimensional cube is an `(N-1)`-dimensional grid. Its axes
/// are the cube's axes except the one orthogonal to the face, in increasing
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FaceGrid {
    size: u16,
    ndim: u8,
    cells: Vec<Label>,
}

impl FaceGrid {
    /// Constructs a grid with `ndim` axes of side `size`, or returns `None` if
    /// `cells` has the wrong length.
    pub fn new(size: u16, ndim: u8, cells: Vec<Label>) -> Option<Self> {
        let expected_len = (size as usize).checked_pow(ndim as u32)?;
        (size > 0 && cells.len() == expected_len).then_some(Self { size, ndim, cells })
    }

    /// Returns the cells in offset order.
    pub fn cells(&self) -> &[Label] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Label] {
        &mut self.cells
    }

    /// Returns the grid after a quarter turn carrying axis `from` onto axis
    /// `to`. See [`quarter_turn()`].
    #[must_use]
    pub fn quarter_turned(&self, from: usize, to: usize) -> Self {
        Self {
            size: self.size,
            ndim: self.ndim,
            cells: quarter_turn(&self.cells, self.size, self.ndim as usize, from, to),
        }
    }
}

/// Prints the grid as a stack of 2D blocks. Axis 0 runs along each row, axis 1
/// down the rows, and higher axes select the block.
///
/// Labels are right-aligned to the formatter's width if one is given, or else
/// to the widest label on the face.
impl fmt::Display for FaceGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size as usize;
        let width = f.width().unwrap_or_else(|| {
            self.cells.iter().max().map_or(1, |m| m.to_string().len())
        });
        let block_len = size.pow(self.ndim.min(2) as u32);
        for (i, block) in self.cells.chunks(block_len).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for row in block.chunks(size) {
                let row = row.iter().map(|label| format!("{label:>width$}")).join(" ");
                writeln!(f, "{row}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_quarter_turn_2d() {
        // 0 1 2
        // 3 4 5
        // 6 7 8
        let cells = (0..9).collect::<Vec<u32>>();
        // Carry axis 0 (columns) onto axis 1 (rows).
        assert_eq!(
            quarter_turn(&cells, 3, 2, 0, 1),
            vec![6, 3, 0, 7, 4, 1, 8, 5, 2],
        );
        assert_eq!(
            quarter_turn(&cells, 3, 2, 1, 0),
            vec![2, 5, 8, 1, 4, 7, 0, 3, 6],
        );
    }

    #[test]
    fn test_quarter_turn_order_4() {
        let cells = (0..64).collect::<Vec<u32>>();
        for (from, to) in [(0, 1), (1, 2), (2, 0), (0, 2)] {
            let mut turned = cells.clone();
            for _ in 0..4 {
                turned = quarter_turn(&turned, 4, 3, from, to);
            }
            assert_eq!(turned, cells);

            let there = quarter_turn(&cells, 4, 3, from, to);
            assert_eq!(quarter_turn(&there, 4, 3, to, from), cells);
        }
    }

    #[test]
    fn test_quarter_turn_fallback() {
        let cells = (0..4).collect::<Vec<u32>>();
        assert_eq!(
            quarter_turn(&cells, 2, 2, 3, 1),
            quarter_turn(&cells, 2, 2, 0, 1),
        );
        assert_eq!(quarter_turn(&[7_u32, 8], 2, 1, 0, 1), vec![7, 8]);
    }

    #[test]
    fn test_face_grid_display() {
        let grid = FaceGrid::new(2, 3, (1..=8).collect()).unwrap();
        assert_eq!(grid.to_string(), "1 2\n3 4\n\n5 6\n7 8\n");
        let grid = FaceGrid::new(3, 2, (1..=9).map(|i| i * 3).collect()).unwrap();
        assert_eq!(grid.to_string(), " 3  6  9\n12 15 18\n21 24 27\n");
        assert_eq!(format!("{grid:3}").lines().next(), Some("  3   6   9"));
        assert!(FaceGrid::new(3, 2, vec![1, 2]).is_none());
    }
}
