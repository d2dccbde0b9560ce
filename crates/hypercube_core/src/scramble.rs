use itertools::Itertools;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::{Cube, CubeShape, Move};

/// Output of scrambling a cube.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrambledCube {
    /// Random seed used to generate the scramble.
    pub seed: u64,
    /// Moves applied, in order.
    pub moves: Vec<Move>,
    /// State of the cube after scrambling.
    pub state: Cube,
}

/// Deterministically scrambles a solved cube with `count` random moves.
///
/// The same shape, count, and seed always produce the same moves.
pub fn scramble(shape: CubeShape, count: usize, seed: u64) -> ScrambledCube {
    let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(seed);

    let mut moves = vec![];
    let mut state = Cube::new(shape);
    for mv in std::iter::from_fn(|| random_move(shape, &mut rng)).take(count) {
        if let Ok(new_state) = state.twist(mv) {
            moves.push(mv);
            state = new_state;
        }
    }
    log::debug!("scrambled {shape} cube with {} moves from seed {seed}", moves.len());

    ScrambledCube { seed, moves, state }
}

/// Returns a random valid move for `shape`, choosing each part of the move
/// uniformly from the values allowed by the parts before it.
pub fn random_move(shape: CubeShape, rng: &mut impl Rng) -> Option<Move> {
    let face = *shape.faces().collect_vec().choose(rng)?;
    let from = *shape
        .faces()
        .filter(|f| f.axis() != face.axis())
        .collect_vec()
        .choose(rng)?;
    let to = *shape
        .faces()
        .filter(|f| ![face.axis(), from.axis()].contains(&f.axis()))
        .collect_vec()
        .choose(rng)?;
    let slice = rng.random_range(1..=shape.size());
    Some(Move::new(face.number(), from.number(), to.number(), slice))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scramble_deterministic() {
        let shape = CubeShape::new(4, 3).unwrap();
        let a = scramble(shape, 30, 12345);
        let b = scramble(shape, 30, 12345);
        assert_eq!(a, b);
        assert_eq!(a.moves.len(), 30);

        let mut replayed = Cube::new(shape);
        replayed.apply_moves(a.moves.iter().copied()).unwrap();
        assert_eq!(replayed, a.state);

        let c = scramble(shape, 30, 54321);
        assert_ne!(a.moves, c.moves);
    }

    #[test]
    fn test_random_moves_are_valid() {
        let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(7);
        for (ndim, size) in [(3, 2), (3, 5), (4, 3), (6, 2)] {
            let shape = CubeShape::new(ndim, size).unwrap();
            for _ in 0..200 {
                let mv = random_move(shape, &mut rng).unwrap();
                assert!(mv.validate(shape).is_ok(), "{mv} is not valid for {shape}");
            }
        }
    }

    #[test]
    fn test_empty_scramble_is_solved() {
        let shape = CubeShape::new(5, 2).unwrap();
        let s = scramble(shape, 0, 0);
        assert!(s.moves.is_empty());
        assert!(s.state.is_solved());
    }
}
