//! Interactive command loop.

use std::io::{BufRead, Write};

use eyre::Result;
use hypercube_core::{CubeShape, Face, MAX_NDIM, MIN_NDIM, MIN_SIZE, Move};

/// Interactive session reading commands from `input` and writing to
/// `output`.
///
/// End of input is treated the same as the quit command.
pub(crate) struct Repl<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs the session to completion. If `shape` is `None`, the user is asked
    /// for one first.
    pub(crate) fn run(&mut self, shape: Option<CubeShape>) -> Result<()> {
        writeln!(
            self.output,
            "Welcome to the Higher-Dimensional Rubik's Cube Simulator!"
        )?;

        let shape = match shape {
            Some(shape) => shape,
            None => match self.prompt_shape()? {
                Some(shape) => shape,
                None => return self.quit(),
            },
        };
        log::info!("starting session with {shape} cube");
        let mut cube = hypercube_core::Cube::new(shape);

        writeln!(self.output, "\nInitial Cube:")?;
        write!(self.output, "{cube}")?;

        writeln!(self.output, "\nCommands:")?;
        writeln!(self.output, "  Q - Quit")?;
        writeln!(self.output, "  S - Show current state of the Cube")?;
        writeln!(self.output, "  M - Make a move")?;
        writeln!(self.output, "Moves may also be entered as `face:from>to@slice`.")?;

        loop {
            let Some(line) = self.prompt("\nEnter command (Q/S/M): ")? else {
                return self.quit();
            };
            let command = line.trim();
            match command.to_ascii_uppercase().as_str() {
                "Q" => return self.quit(),
                "S" => {
                    writeln!(self.output, "\nCurrent Cube state:")?;
                    write!(self.output, "{cube}")?;
                }
                "M" => {
                    writeln!(self.output, "\nPlease enter the following move parameters:")?;
                    let Some(mv) = self.prompt_move(shape)? else {
                        return self.quit();
                    };
                    self.report_move(cube.apply_move(mv))?;
                }
                _ => match command.parse::<Move>() {
                    Ok(mv) => self.report_move(cube.apply_move(mv))?,
                    Err(_) => {
                        writeln!(self.output, "Invalid command. Please enter Q, S, or M.")?;
                    }
                },
            }
        }
    }

    fn quit(&mut self) -> Result<()> {
        writeln!(self.output, "Exiting program.")?;
        Ok(())
    }

    fn report_move(&mut self, result: Result<(), hypercube_core::BadMove>) -> Result<()> {
        match result {
            Ok(()) => writeln!(self.output, "Move executed successfully.")?,
            Err(e) => {
                log::debug!("rejected move: {e:?}");
                writeln!(self.output, "Error during move execution: {e}")?;
            }
        }
        Ok(())
    }

    /// Asks for the number of dimensions and slices until they describe a cube
    /// that can be constructed. Returns `None` at end of input.
    fn prompt_shape(&mut self) -> Result<Option<CubeShape>> {
        loop {
            let ndim_prompt = format!("Enter the number of dimensions (>= {MIN_NDIM}): ");
            let Some(ndim) = self.prompt_int(&ndim_prompt, MIN_NDIM.into(), MAX_NDIM.into())?
            else {
                return Ok(None);
            };
            let size_prompt =
                format!("Enter the number of slices or divisions per side (>= {MIN_SIZE}): ");
            let Some(size) = self.prompt_int(&size_prompt, MIN_SIZE.into(), u16::MAX.into())?
            else {
                return Ok(None);
            };

            // Both values were range-checked above.
            match CubeShape::new(ndim as u8, size as u16) {
                Ok(shape) => return Ok(Some(shape)),
                Err(e) => writeln!(self.output, "Error: {e}.")?,
            }
        }
    }

    /// Asks for each field of a move. Axes on the face's own axis are rejected
    /// and asked for again. Returns `None` at end of input.
    fn prompt_move(&mut self, shape: CubeShape) -> Result<Option<Move>> {
        let face_count = shape.face_count() as i64;
        let range = format!("1 to {face_count}");

        let Some(face) = self.prompt_int(&format!("Enter face ({range}): "), 1, face_count)? else {
            return Ok(None);
        };
        let face = face as u8;
        let Some(axis) = Face::from_number(face).map(|f| f.axis()) else {
            return Ok(None);
        };
        let forbidden = [axis.low_face().number(), axis.high_face().number()];

        let mut axes = [0; 2];
        for (name, value) in ["from", "to"].into_iter().zip(&mut axes) {
            let [low, high] = forbidden;
            loop {
                writeln!(
                    self.output,
                    "Info: For face {face}, axis_{name} cannot be in {{{low}, {high}}}."
                )?;
                let prompt = format!("Enter axis {name} ({range}): ");
                let Some(n) = self.prompt_int(&prompt, 1, face_count)? else {
                    return Ok(None);
                };
                if forbidden.contains(&(n as u8)) {
                    writeln!(
                        self.output,
                        "Error: For face {face}, axis_{name} cannot be in {{{low}, {high}}}."
                    )?;
                } else {
                    *value = n as u8;
                    break;
                }
            }
        }

        let size = i64::from(shape.size());
        let Some(slice) = self.prompt_int(&format!("Enter slice (1 to {size}): "), 1, size)? else {
            return Ok(None);
        };

        Ok(Some(Move::new(face, axes[0], axes[1], slice as u16)))
    }

    /// Asks for an integer until one in `min..=max` is entered. Returns `None`
    /// at end of input.
    fn prompt_int(&mut self, prompt: &str, min: i64, max: i64) -> Result<Option<i64>> {
        loop {
            let Some(line) = self.prompt(prompt)? else {
                return Ok(None);
            };
            match line.trim().parse::<i64>() {
                Ok(value) if value < min => {
                    writeln!(self.output, "Error: value must be at least {min}.")?;
                }
                Ok(value) if value > max => {
                    writeln!(self.output, "Error: value must be at most {max}.")?;
                }
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    writeln!(self.output, "Error: Invalid input. Please enter an integer.")?;
                }
            }
        }
    }

    /// Writes `prompt` and reads one line. Returns `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line))
    }
}
