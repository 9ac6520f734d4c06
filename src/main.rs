//! CLI entry point for overlapping wave function collapse synthesis

use clap::Parser;
use wavetile::io::cli::{Cli, PassRunner};

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    let mut runner = PassRunner::new(cli);
    runner.run()
}
