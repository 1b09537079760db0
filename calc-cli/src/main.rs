//! Binary crate for the `calc` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Mapping typed words onto keypad tokens
//! - Driving the engine and echoing its display

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run()
}
