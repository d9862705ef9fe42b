//! # XML Sitemap CLI
//!
//! Binary entry point for the `xml-sitemap` command-line tool. Argument
//! parsing lives in `cli`, and every subcommand is a thin wrapper around the
//! `xml_sitemap` library.
//!
//! Errors are printed as a single line with their full context chain, e.g.
//! `Error: Failed to add http://domain.com/: Unable to resolve file a.html`,
//! and the process exits with status 1. Usage errors are reported by clap
//! with status 2.

mod cli;
mod commands;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
