//! Interactive simulator for N-dimensional Rubik's cubes.

mod cli;
mod repl;

fn main() -> eyre::Result<()> {
    use clap::Parser;

    let args = cli::Args::parse();

    // Initialize logging.
    env_logger::builder().init();

    color_eyre::install().expect("error initializing panic handler");

    cli::exec(args)
}
