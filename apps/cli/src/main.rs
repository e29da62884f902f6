//! internparse CLI: classify majors and extract structured fields from
//! Korean internship postings.
//!
//! Results are written to stdout as JSON; logs and progress go to stderr.

mod batch;
mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
