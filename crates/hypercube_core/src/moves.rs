use std::fmt;
use std::str::FromStr;

use crate::error::{BadMove, ParseMoveError};
use crate::{Axis, CubeShape, Face};

/// Layer turn as entered by a user. All fields are 1-indexed.
///
/// The turn rotates one layer of the cube by a quarter turn, carrying the
/// face `axis_from` onto the position of the face `axis_to`. Swapping
/// `axis_from` and `axis_to` gives the inverse turn.
///
/// The notation is `face:from>to@slice`, for example `1:3>5@2`. The `@slice`
/// part may be omitted for an outermost layer turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Face whose layer is turned.
    pub face: u8,
    /// Face that the turn carries onto `axis_to`.
    pub axis_from: u8,
    /// Face onto which the turn carries `axis_from`.
    pub axis_to: u8,
    /// Depth of the layer, counted from `face`. Slice 1 is the outermost
    /// layer.
    pub slice: u16,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            face,
            axis_from,
            axis_to,
            slice,
        } = self;
        write!(f, "{face}:{axis_from}>{axis_to}")?;
        if *slice != 1 {
            write!(f, "@{slice}")?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax_error = || ParseMoveError::Syntax(s.to_owned());

        let (face, rest) = s.trim().split_once(':').ok_or_else(syntax_error)?;
        let (axis_from, rest) = rest.split_once('>').ok_or_else(syntax_error)?;
        let (axis_to, slice) = match rest.split_once('@') {
            Some((axis_to, slice)) => (axis_to, Some(slice)),
            None => (rest, None),
        };

        Ok(Move {
            face: face.trim().parse()?,
            axis_from: axis_from.trim().parse()?,
            axis_to: axis_to.trim().parse()?,
            slice: match slice {
                Some(slice) => slice.trim().parse()?,
                None => 1,
            },
        })
    }
}

impl Move {
    /// Constructs a new move.
    pub fn new(face: u8, axis_from: u8, axis_to: u8, slice: u16) -> Self {
        Self {
            face,
            axis_from,
            axis_to,
            slice,
        }
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            axis_from: self.axis_to,
            axis_to: self.axis_from,
            ..self
        }
    }

    /// Checks the move against a cube shape and returns a validated twist, or
    /// an error describing the first problem found.
    pub fn validate(self, shape: CubeShape) -> Result<Twist, BadMove> {
        let max = shape.face_count() as u8;

        let face = Face::from_number(self.face)
            .filter(|&f| shape.contains_face(f))
            .ok_or(BadMove::FaceOutOfRange {
                face: self.face,
                max,
            })?;

        let check_axis = |axis: u8| -> Result<Face, BadMove> {
            let axis_face = Face::from_number(axis)
                .filter(|&f| shape.contains_face(f))
                .ok_or(BadMove::AxisOutOfRange { axis, max })?;
            if axis_face.axis() == face.axis() {
                return Err(BadMove::ForbiddenAxis {
                    face: self.face,
                    axis,
                    low: face.axis().low_face().number(),
                    high: face.axis().high_face().number(),
                });
            }
            Ok(axis_face)
        };
        let from = check_axis(self.axis_from)?;
        let to = check_axis(self.axis_to)?;
        if from.axis() == to.axis() {
            return Err(BadMove::ParallelAxes {
                from: self.axis_from,
                to: self.axis_to,
            });
        }

        let size = shape.size();
        if !(1..=size).contains(&self.slice) {
            return Err(BadMove::SliceOutOfRange {
                slice: self.slice,
                max: size,
            });
        }
        let layer = if face.is_high() {
            size - self.slice
        } else {
            self.slice - 1
        };

        Ok(Twist {
            shape,
            face,
            from,
            to,
            slice: self.slice,
            layer,
        })
    }
}

/// Layer turn that has been validated against a cube shape. Constructed by
/// [`Move::validate()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Twist {
    /// Shape that the twist was validated against.
    shape: CubeShape,
    face: Face,
    from: Face,
    to: Face,
    slice: u16,
    /// Coordinate of the turned layer along the face's axis.
    layer: u16,
}

impl Twist {
    /// Returns the shape of cube that the twist applies to.
    pub fn shape(self) -> CubeShape {
        self.shape
    }
    /// Returns the face whose layer is turned.
    pub fn face(self) -> Face {
        self.face
    }
    /// Returns the axis orthogonal to the turned layer.
    pub fn axis(self) -> Axis {
        self.face.axis()
    }
    /// Returns the face that the turn carries onto [`Twist::axis_to()`].
    pub fn axis_from(self) -> Face {
        self.from
    }
    /// Returns the face onto which the turn carries [`Twist::axis_from()`].
    pub fn axis_to(self) -> Face {
        self.to
    }
    /// Returns the coordinate of the turned layer along [`Twist::axis()`].
    pub fn layer(self) -> u16 {
        self.layer
    }

    /// Returns the oriented plane of the turn as a pair of axes `(a, b)`: the
    /// turn carries the positive direction of `a` onto the positive direction
    /// of `b`.
    ///
    /// Faces on the low side of an axis point in its negative direction, so
    /// the plane is reversed when `from` and `to` lie on different sides.
    pub fn plane(self) -> (Axis, Axis) {
        let (p, q) = (self.from.axis(), self.to.axis());
        if self.from.is_high() == self.to.is_high() {
            (p, q)
        } else {
            (q, p)
        }
    }

    /// Returns the face onto which the turn carries stickers on `face`.
    ///
    /// Faces whose axis is not in the plane of the turn stay where they are.
    pub fn carry(self, face: Face) -> Face {
        let (a, b) = self.plane();
        let axis = face.axis();
        if axis == a {
            b.face(face.is_high())
        } else if axis == b {
            a.face(!face.is_high())
        } else {
            face
        }
    }

    /// Returns the face whose entire grid is turned, if the layer is an
    /// outermost layer: the twisted face itself for slice 1, or the opposite
    /// face for the deepest slice.
    pub fn turned_face(self) -> Option<Face> {
        [self.face, self.face.partner()]
            .into_iter()
            .find(|f| f.boundary(self.shape.size()) == self.layer)
    }

    /// Returns the user-facing move for this twist.
    pub fn to_move(self) -> Move {
        Move {
            face: self.face.number(),
            axis_from: self.from.number(),
            axis_to: self.to.number(),
            slice: self.slice,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn shape(ndim: u8, size: u16) -> CubeShape {
        CubeShape::new(ndim, size).unwrap()
    }

    #[test]
    fn test_move_notation() {
        let m = Move::new(1, 3, 5, 2);
        assert_eq!(m.to_string(), "1:3>5@2");
        assert_eq!("1:3>5@2".parse(), Ok(m));
        assert_eq!(" 1 : 3 > 5 @ 2 ".parse(), Ok(m));
        assert_eq!("4:1>6".parse(), Ok(Move::new(4, 1, 6, 1)));
        assert_eq!(Move::new(4, 1, 6, 1).to_string(), "4:1>6");

        assert!(matches!(
            "1-3>5".parse::<Move>(),
            Err(ParseMoveError::Syntax(_)),
        ));
        assert!(matches!(
            "1:3>x".parse::<Move>(),
            Err(ParseMoveError::ParseInt(_)),
        ));
    }

    #[test]
    fn test_move_validation() {
        let s = shape(3, 3);
        assert_eq!(
            Move::new(7, 3, 5, 1).validate(s),
            Err(BadMove::FaceOutOfRange { face: 7, max: 6 }),
        );
        assert_eq!(
            Move::new(0, 3, 5, 1).validate(s),
            Err(BadMove::FaceOutOfRange { face: 0, max: 6 }),
        );
        assert_eq!(
            Move::new(1, 9, 5, 1).validate(s),
            Err(BadMove::AxisOutOfRange { axis: 9, max: 6 }),
        );
        assert_eq!(
            Move::new(4, 3, 5, 1).validate(s),
            Err(BadMove::ForbiddenAxis {
                face: 4,
                axis: 3,
                low: 3,
                high: 4,
            }),
        );
        assert_eq!(
            Move::new(1, 5, 6, 1).validate(s),
            Err(BadMove::ParallelAxes { from: 5, to: 6 }),
        );
        assert_eq!(
            Move::new(1, 3, 5, 4).validate(s),
            Err(BadMove::SliceOutOfRange { slice: 4, max: 3 }),
        );
        assert_eq!(
            Move::new(1, 3, 5, 0).validate(s),
            Err(BadMove::SliceOutOfRange { slice: 0, max: 3 }),
        );
    }

    #[test]
    fn test_twist_layer() {
        let s = shape(4, 3);
        let twist = Move::new(1, 3, 5, 1).validate(s).unwrap();
        assert_eq!(twist.shape(), s);
        assert_eq!(twist.face(), Face(0));
        assert_eq!(twist.axis(), Axis(0));
        assert_eq!(twist.layer(), 0);
        assert_eq!(twist.turned_face(), Some(Face(0)));

        let twist = Move::new(2, 3, 5, 1).validate(s).unwrap();
        assert_eq!(twist.layer(), 2);
        assert_eq!(twist.turned_face(), Some(Face(1)));

        let twist = Move::new(2, 3, 5, 2).validate(s).unwrap();
        assert_eq!(twist.layer(), 1);
        assert_eq!(twist.turned_face(), None);

        let twist = Move::new(2, 3, 5, 3).validate(s).unwrap();
        assert_eq!(twist.layer(), 0);
        assert_eq!(twist.turned_face(), Some(Face(0)));
        assert_eq!(twist.to_move(), Move::new(2, 3, 5, 3));
    }

    #[test]
    fn test_twist_carry() {
        let s = shape(4, 2);
        for m in [
            Move::new(1, 3, 5, 1),
            Move::new(1, 4, 5, 1),
            Move::new(7, 2, 3, 2),
            Move::new(8, 6, 1, 1),
        ] {
            let twist = m.validate(s).unwrap();
            let (from, to) = (twist.axis_from(), twist.axis_to());
            // from -> to -> partner(from) -> partner(to) -> from
            assert_eq!(twist.carry(from), to);
            assert_eq!(twist.carry(to), from.partner());
            assert_eq!(twist.carry(from.partner()), to.partner());
            assert_eq!(twist.carry(to.partner()), from);
            // Faces outside the plane stay put.
            assert_eq!(twist.carry(twist.face()), twist.face());
            assert_eq!(twist.carry(twist.face().partner()), twist.face().partner());

            let inverse = m.inverse().validate(s).unwrap();
            for face in s.faces() {
                assert_eq!(inverse.carry(twist.carry(face)), face);
            }
        }
    }
}
