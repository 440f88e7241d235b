use clap::Parser;

use repodeck::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    run(Cli::parse())
}
