//! GridShift CLI: inspect site content and check its assets.
//!
//! Lists, looks up, and previews the portfolio projects and team members the
//! site is built from, and runs the same asset check CI runs.

mod commands;

use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
