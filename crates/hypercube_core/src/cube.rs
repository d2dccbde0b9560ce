use std::fmt;

use itertools::Itertools;
use tinyset::Set64;

use crate::error::BadMove;
use crate::grid::{FaceGrid, quarter_turn};
use crate::index::{SlicePositions, flipped_positions, layer_positions, move_digit};
use crate::ti::TypedIndex;
use crate::{Axis, CubeShape, Face, Label, Move, PerFace, Twist};

/// State of an N-dimensional cube: the sticker labels on each face.
///
/// A cube is only changed by twisting it, and every twist is a permutation of
/// the labels. Twisting builds a new state from the old one, so a move that
/// fails validation never leaves a partially-twisted cube behind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cube {
    shape: CubeShape,
    faces: PerFace<FaceGrid>,
}

impl Cube {
    /// Constructs a cube with the canonical labeling: face `f` (1-indexed)
    /// holds the labels `(f-1)*n+1 ..= f*n` in offset order, where `n` is the
    /// number of stickers per face.
    pub fn new(shape: CubeShape) -> Self {
        let n = shape.stickers_per_face();
        let faces = shape
            .faces()
            .map(|face| {
                let start = face.to_index() * n + 1;
                let cells = (start..start + n).map(|label| label as Label).collect();
                Self::face_grid(shape, cells)
            })
            .collect();
        Self { shape, faces }
    }

    /// Constructs a cube from explicit face grids, or returns `None` if the
    /// number of faces or the length of any face does not match `shape`.
    ///
    /// The labels are not checked to be a permutation of the canonical ones.
    pub fn from_faces(shape: CubeShape, faces: Vec<Vec<Label>>) -> Option<Self> {
        if faces.len() != shape.face_count() {
            return None;
        }
        let faces = faces
            .into_iter()
            .map(|cells| {
                FaceGrid::new(shape.size(), shape.ndim() - 1, cells)
                    .filter(|grid| grid.cells().len() == shape.stickers_per_face())
            })
            .collect::<Option<PerFace<FaceGrid>>>()?;
        Some(Self { shape, faces })
    }

    fn face_grid(shape: CubeShape, cells: Vec<Label>) -> FaceGrid {
        FaceGrid::new(shape.size(), shape.ndim() - 1, cells)
            .expect("face grid length is stickers_per_face()")
    }

    /// Returns the shape of the cube.
    pub fn shape(&self) -> CubeShape {
        self.shape
    }
    /// Returns the grids of all faces.
    pub fn faces(&self) -> &PerFace<FaceGrid> {
        &self.faces
    }
    /// Returns the grid of one face, or `None` if it does not exist.
    pub fn face(&self, face: Face) -> Option<&FaceGrid> {
        self.faces.get(face)
    }
    /// Returns an iterator over all labels, face by face.
    pub fn labels(&self) -> impl Iterator<Item = Label> + '_ {
        self.faces.iter_values().flat_map(|grid| grid.cells().iter().copied())
    }

    /// Returns the face on which `label` starts out in the canonical labeling.
    /// This plays the role of the sticker's color.
    pub fn home_face(&self, label: Label) -> Option<Face> {
        let index = (label as usize).checked_sub(1)? / self.shape.stickers_per_face();
        Face::try_from_index(index).filter(|&f| self.shape.contains_face(f))
    }

    /// Returns whether every face holds stickers from a single canonical face.
    pub fn is_solved(&self) -> bool {
        self.faces
            .iter_values()
            .all(|grid| grid.cells().iter().map(|&l| self.home_face(l)).all_equal())
    }

    /// Applies a move and returns the new state, or returns an error if the
    /// move is not valid for this cube. `self` is never modified.
    pub fn twist(&self, mv: Move) -> Result<Self, BadMove> {
        self.do_twist(mv.validate(self.shape)?)
    }

    /// Applies a move in place. If the move is not valid, returns an error and
    /// leaves the cube unchanged.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), BadMove> {
        *self = self.twist(mv)?;
        Ok(())
    }

    /// Applies a sequence of moves in place. If any move is not valid, returns
    /// an error and leaves the cube as it was before the sequence.
    pub fn apply_moves(&mut self, moves: impl IntoIterator<Item = Move>) -> Result<(), BadMove> {
        let mut new_state = self.clone();
        for mv in moves {
            new_state = new_state.twist(mv)?;
        }
        *self = new_state;
        Ok(())
    }

    /// Applies a validated twist and returns the new state, or returns an
    /// error if `twist` was validated against a different shape.
    ///
    /// Each step reads from `self` and writes into a copy, and the steps touch
    /// disjoint sets of faces.
    pub fn do_twist(&self, twist: Twist) -> Result<Self, BadMove> {
        if twist.shape() != self.shape {
            return Err(BadMove::ShapeMismatch {
                expected: twist.shape(),
                actual: self.shape,
            });
        }
        log::debug!("twisting {} cube: {}", self.shape, twist.to_move());

        let mut faces = self.faces.clone();
        self.rotate_face(twist, &mut faces);
        self.update_adjacent_faces(twist, &mut faces);
        self.swap_axis_faces(twist, &mut faces);

        Ok(Self {
            shape: self.shape,
            faces,
        })
    }

    /// Rotates the whole grid of the face lying in the turned layer, if the
    /// layer is an outermost layer.
    fn rotate_face(&self, twist: Twist, faces: &mut PerFace<FaceGrid>) {
        let Some(face) = twist.turned_face() else {
            return;
        };
        let (a, b) = twist.plane();
        let excluded = [twist.axis()];
        let (from, to) = (a.index_without(&excluded), b.index_without(&excluded));
        log::trace!("rotating face {face} in local plane ({from}, {to})");

        faces[face] = self.faces[face].quarter_turned(from, to);
    }

    /// Rotates the layer cells of every face that is orthogonal to neither the
    /// twist axis nor the plane of the twist. These faces keep their stickers;
    /// only the positions within the layer change.
    fn update_adjacent_faces(&self, twist: Twist, faces: &mut PerFace<FaceGrid>) {
        let size = self.shape.size();
        let ndim = self.shape.ndim() as usize;
        let (a, b) = twist.plane();
        let fixed_axes: Set64<Axis> = [twist.axis(), a, b].into_iter().collect();

        for face in self.shape.faces() {
            let face_axis = face.axis();
            if fixed_axes.contains(face_axis) {
                continue;
            }
            log::trace!("turning layer {} of face {face}", twist.layer());

            let positions = layer_positions(
                size,
                ndim - 1,
                twist.axis().index_without(&[face_axis]),
                twist.layer(),
            )
            .collect_vec();

            let old = self.faces[face].cells();
            let layer_cells = positions.iter().map(|&i| old[i]).collect_vec();
            let excluded = [twist.axis(), face_axis];
            let turned = quarter_turn(
                &layer_cells,
                size,
                ndim - 2,
                a.index_without(&excluded),
                b.index_without(&excluded),
            );

            let new = faces[face].cells_mut();
            for (&i, label) in positions.iter().zip(turned) {
                new[i] = label;
            }
        }
    }

    /// Cycles the layer cells among the four faces orthogonal to the plane of
    /// the twist: `from` → `to` → partner of `from` → partner of `to` →
    /// `from`.
    ///
    /// A sticker moving from face `X` to face `Y` keeps its coordinates along
    /// every axis except that its coordinate along `Y`'s axis becomes its
    /// coordinate along `X`'s axis. That coordinate is mirrored when the turn
    /// reverses its direction.
    fn swap_axis_faces(&self, twist: Twist, faces: &mut PerFace<FaceGrid>) {
        let size = self.shape.size();
        let ndim = self.shape.ndim() as usize;
        let layer_ndim = ndim - 2;
        let (a, _) = twist.plane();

        let from = twist.axis_from();
        let to = twist.axis_to();
        for src in [from, to, from.partner(), to.partner()] {
            let dst = twist.carry(src);
            let (src_axis, dst_axis) = (src.axis(), dst.axis());
            log::trace!("moving layer {} from face {src} to face {dst}", twist.layer());

            let src_positions = self.layer_positions_on(twist, src_axis);
            let dst_positions = self.layer_positions_on(twist, dst_axis).collect_vec();

            // Position of the moved coordinate in each face's layer sub-grid.
            let src_digit = dst_axis.index_without(&[src_axis, twist.axis()]);
            let dst_digit = src_axis.index_without(&[dst_axis, twist.axis()]);

            // The coordinate along `b` becomes the coordinate along `a`
            // reversed.
            let ordinals = if src_axis == a {
                flipped_positions(size, layer_ndim, src_digit).collect_vec()
            } else {
                (0..self.shape.stickers_per_layer()).collect_vec()
            };

            let old = self.faces[src].cells();
            let new = faces[dst].cells_mut();
            for (src_offset, ordinal) in src_positions.zip(ordinals) {
                let dst_ordinal = move_digit(ordinal, size, layer_ndim, src_digit, dst_digit);
                new[dst_positions[dst_ordinal]] = old[src_offset];
            }
        }
    }

    /// Returns the offsets of the cells in the twisted layer on a face
    /// orthogonal to `face_axis`.
    fn layer_positions_on(&self, twist: Twist, face_axis: Axis) -> SlicePositions {
        layer_positions(
            self.shape.size(),
            self.shape.ndim() as usize - 1,
            twist.axis().index_without(&[face_axis]),
            twist.layer(),
        )
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .labels()
            .max()
            .map_or(1, |label| label.to_string().len());
        for (face, grid) in self.faces.iter() {
            if face.to_index() > 0 {
                writeln!(f)?;
            }
            writeln!(f, "Face {face}:")?;
            write!(f, "{grid:width$}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn cube(ndim: u8, size: u16) -> Cube {
        Cube::new(CubeShape::new(ndim, size).unwrap())
    }

    fn face_cells(cube: &Cube) -> Vec<Vec<Label>> {
        cube.faces().iter_values().map(|g| g.cells().to_vec()).collect()
    }

    #[test]
    fn test_canonical_labeling() {
        let c = cube(3, 2);
        assert_eq!(
            face_cells(&c),
            vec![
                vec![1, 2, 3, 4],
                vec![5, 6, 7, 8],
                vec![9, 10, 11, 12],
                vec![13, 14, 15, 16],
                vec![17, 18, 19, 20],
                vec![21, 22, 23, 24],
            ],
        );
        assert!(c.is_solved());
        assert_eq!(c.home_face(1), Some(Face(0)));
        assert_eq!(c.home_face(24), Some(Face(5)));
        assert_eq!(c.home_face(25), None);
        assert_eq!(c.home_face(0), None);
    }

    #[test]
    fn test_outer_turn_3d() {
        let c = cube(3, 2).twist(Move::new(1, 3, 5, 1)).unwrap();
        assert_eq!(
            face_cells(&c),
            vec![
                vec![3, 1, 4, 2],
                vec![5, 6, 7, 8],
                vec![21, 10, 23, 12],
                vec![17, 14, 19, 16],
                vec![11, 18, 9, 20],
                vec![15, 22, 13, 24],
            ],
        );
        assert!(!c.is_solved());
    }

    #[test]
    fn test_inner_turn_3d() {
        let c = cube(3, 3).twist(Move::new(1, 3, 5, 2)).unwrap();
        assert_eq!(
            face_cells(&c),
            vec![
                vec![1, 2, 3, 4, 5, 6, 7, 8, 9],
                vec![10, 11, 12, 13, 14, 15, 16, 17, 18],
                vec![19, 47, 21, 22, 50, 24, 25, 53, 27],
                vec![28, 38, 30, 31, 41, 33, 34, 44, 36],
                vec![37, 26, 39, 40, 23, 42, 43, 20, 45],
                vec![46, 35, 48, 49, 32, 51, 52, 29, 54],
            ],
        );
    }

    #[test]
    fn test_outer_turn_4d() {
        let c = cube(4, 2).twist(Move::new(1, 3, 5, 1)).unwrap();
        assert_eq!(
            face_cells(&c),
            vec![
                vec![3, 1, 4, 2, 7, 5, 8, 6],
                vec![9, 10, 11, 12, 13, 14, 15, 16],
                vec![41, 18, 43, 20, 45, 22, 47, 24],
                vec![33, 26, 35, 28, 37, 30, 39, 32],
                vec![19, 34, 17, 36, 23, 38, 21, 40],
                vec![27, 42, 25, 44, 31, 46, 29, 48],
                vec![53, 50, 49, 52, 55, 54, 51, 56],
                vec![61, 58, 57, 60, 63, 62, 59, 64],
            ],
        );
    }

    #[test]
    fn test_invalid_move_leaves_cube_unchanged() {
        let mut c = cube(4, 3);
        c.apply_move(Move::new(2, 5, 7, 1)).unwrap();
        let before = c.clone();

        assert_eq!(
            c.apply_move(Move::new(2, 1, 7, 1)),
            Err(BadMove::ForbiddenAxis {
                face: 2,
                axis: 1,
                low: 1,
                high: 2,
            }),
        );
        assert_eq!(c, before);

        let result = c.apply_moves([Move::new(3, 1, 7, 2), Move::new(3, 1, 7, 9)]);
        assert_eq!(result, Err(BadMove::SliceOutOfRange { slice: 9, max: 3 }));
        assert_eq!(c, before);
    }

    #[test]
    fn test_twist_for_other_shape_is_rejected() {
        let small = cube(3, 3);
        let big_shape = CubeShape::new(4, 3).unwrap();
        let twist = Move::new(7, 1, 3, 1).validate(big_shape).unwrap();
        assert_eq!(
            small.do_twist(twist),
            Err(BadMove::ShapeMismatch {
                expected: big_shape,
                actual: small.shape(),
            }),
        );

        let same_shape = cube(4, 3);
        assert_eq!(
            same_shape.do_twist(twist),
            same_shape.twist(Move::new(7, 1, 3, 1)),
        );
    }

    #[test]
    fn test_from_faces() {
        let shape = CubeShape::new(3, 2).unwrap();
        let c = cube(3, 2);
        assert_eq!(Cube::from_faces(shape, face_cells(&c)), Some(c.clone()));

        let mut bad = face_cells(&c);
        bad[2].pop();
        assert_eq!(Cube::from_faces(shape, bad), None);
        assert_eq!(Cube::from_faces(shape, vec![]), None);
    }

    #[test]
    fn test_display() {
        let c = cube(3, 2);
        let s = c.to_string();
        assert!(s.starts_with("Face 1:\n 1  2\n 3  4\n\nFace 2:\n 5  6\n"));
        assert!(s.ends_with("Face 6:\n21 22\n23 24\n"));
    }
}
