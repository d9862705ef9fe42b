//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the URLs registered
//! in a sitemap file in document order.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::{load, DEFAULT_SITEMAP};

/// List the URLs in a sitemap file
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to the sitemap file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SITEMAP)]
    pub sitemap: PathBuf,

    /// Show every field set on each URL
    #[arg(short, long)]
    pub fields: bool,

    /// Show only the total count of URLs
    #[arg(long, conflicts_with = "fields")]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    let sitemap = load(&args.sitemap)?;

    if args.count {
        println!("{}", sitemap.len());
        return Ok(());
    }

    for entry in sitemap.entries() {
        println!("{}", entry.loc());
        if args.fields {
            for (name, value) in entry.fields() {
                println!("  {}: {}", name, value);
            }
        }
    }
    Ok(())
}
