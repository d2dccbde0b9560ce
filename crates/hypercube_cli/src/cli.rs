use std::io::Write;

use eyre::{Result, WrapErr};
use hypercube_core::{Cube, CubeShape, Move};
use itertools::Itertools;

use crate::repl::Repl;

/// Simulator for N-dimensional Rubik's cubes
///
/// If no subcommand is specified, then the interactive simulator is started.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    /// Number of spatial dimensions.
    #[arg(short = 'd', long, env = "HYPERCUBE_NDIM", global = true)]
    pub ndim: Option<u8>,
    /// Number of slices along each edge.
    #[arg(short, long, env = "HYPERCUBE_SIZE", global = true)]
    pub size: Option<u16>,

    #[command(subcommand)]
    pub subcommand: Option<Subcommand>,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Start the interactive simulator.
    ///
    /// The number of dimensions and slices are asked for unless both are
    /// given as options.
    Repl,
    /// Apply moves to a solved cube and print the result.
    Apply {
        /// Moves of the form `face:from>to@slice`, such as `1:3>5@2`.
        moves: Vec<Move>,
    },
    /// Print a random scramble and the scrambled cube.
    Scramble {
        /// Number of random moves.
        #[arg(short, long, default_value_t = 20)]
        count: usize,
        /// Random seed. If omitted, one is chosen at random and printed.
        #[arg(long)]
        seed: Option<u64>,
    },
}

// Shape for non-interactive subcommands when none is given.
const DEFAULT_NDIM: u8 = 3;
const DEFAULT_SIZE: u16 = 3;

pub(crate) fn exec(args: Args) -> Result<()> {
    let Args {
        ndim,
        size,
        subcommand,
    } = args;

    match subcommand.unwrap_or(Subcommand::Repl) {
        Subcommand::Repl => {
            let shape = match (ndim, size) {
                (Some(ndim), Some(size)) => Some(CubeShape::new(ndim, size)?),
                _ => None,
            };
            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout().lock();
            Repl::new(stdin, stdout).run(shape)
        }

        Subcommand::Apply { moves } => {
            let shape = default_shape(ndim, size)?;
            let mut cube = Cube::new(shape);
            cube.apply_moves(moves.iter().copied())
                .wrap_err("error applying moves")?;

            let mut out = std::io::stdout().lock();
            writeln!(out, "Moves: {}", moves.iter().join(" "))?;
            writeln!(out)?;
            write!(out, "{cube}")?;
            writeln!(out)?;
            writeln!(out, "Solved: {}", if cube.is_solved() { "yes" } else { "no" })?;
            Ok(())
        }

        Subcommand::Scramble { count, seed } => {
            let shape = default_shape(ndim, size)?;
            let seed = seed.unwrap_or_else(rand::random);
            let scrambled = hypercube_core::scramble(shape, count, seed);

            let mut out = std::io::stdout().lock();
            writeln!(out, "Seed: {}", scrambled.seed)?;
            writeln!(out, "Moves: {}", scrambled.moves.iter().join(" "))?;
            writeln!(out)?;
            write!(out, "{}", scrambled.state)?;
            Ok(())
        }
    }
}

fn default_shape(ndim: Option<u8>, size: Option<u16>) -> Result<CubeShape> {
    let ndim = ndim.unwrap_or(DEFAULT_NDIM);
    let size = size.unwrap_or(DEFAULT_SIZE);
    CubeShape::new(ndim, size).wrap_err_with(|| format!("bad cube shape {ndim}D size {size}"))
}
