//! # Remove Command Implementation
//!
//! This module implements the `remove` subcommand. URLs that are not in the
//! sitemap are reported as warnings and skipped.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::{load, resolve_all, save, DEFAULT_SITEMAP};

/// Remove URLs from a sitemap file
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// URLs to remove, absolute or relative to --host
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Path to the sitemap file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SITEMAP)]
    pub sitemap: PathBuf,

    /// Base URL relative URLs are resolved against
    #[arg(long, value_name = "URL")]
    pub host: Option<String>,
}

/// Execute the `remove` command.
pub fn execute(args: RemoveArgs) -> Result<()> {
    let mut sitemap = load(&args.sitemap)?;
    let urls = resolve_all(args.host.as_deref(), &args.urls)?;

    let before = sitemap.len();
    for url in &urls {
        sitemap.remove(url);
    }

    save(&sitemap, &args.sitemap)?;
    println!(
        "✅ Removed {} URL(s) from {}",
        before - sitemap.len(),
        args.sitemap.display()
    );
    Ok(())
}
