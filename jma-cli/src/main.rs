//! Binary crate for the `jma` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive office selection
//! - Human-friendly forecast output

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
