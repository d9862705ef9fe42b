//! # Update Command Implementation
//!
//! This module implements the `update` subcommand, which refreshes the
//! `lastmod` of URLs in a sitemap file.
//!
//! ## Functionality
//!
//! - **Explicit Date**: `--date` sets a `YYYY-MM-DD` date (or `now`); without
//!   it the date is today.
//! - **From a File**: `--from-file` takes the date from a file's modification
//!   time.
//! - **Everything**: `--all` updates every URL in the sitemap.
//!
//! URLs that are not in the sitemap are reported as warnings and skipped.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use xml_sitemap::OptionValue;

use super::{load, resolve_all, save, DEFAULT_SITEMAP};

/// Refresh the lastmod of URLs in a sitemap file
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// URLs to update, absolute or relative to --host
    #[arg(value_name = "URL", required_unless_present = "all", conflicts_with = "all")]
    pub urls: Vec<String>,

    /// Update every URL in the sitemap
    #[arg(long)]
    pub all: bool,

    /// Date to set (YYYY-MM-DD or "now"); defaults to today
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Take the date from this file's modification time
    #[arg(long, value_name = "PATH", conflicts_with_all = ["date", "all"])]
    pub from_file: Option<PathBuf>,

    /// Path to the sitemap file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SITEMAP)]
    pub sitemap: PathBuf,

    /// Base URL relative URLs are resolved against
    #[arg(long, value_name = "URL")]
    pub host: Option<String>,
}

/// Execute the `update` command.
pub fn execute(args: UpdateArgs) -> Result<()> {
    let mut sitemap = load(&args.sitemap)?;
    let date = args.date.as_deref().map(OptionValue::from);

    if args.all {
        // File links are not stored in the XML, so every URL takes the date
        let date = date.unwrap_or_else(|| OptionValue::from("now"));
        sitemap.update_all(Some(date))?;
    } else {
        for url in resolve_all(args.host.as_deref(), &args.urls)? {
            match &args.from_file {
                Some(path) => sitemap
                    .update_from_file(&url, path)
                    .with_context(|| format!("Failed to update {}", url))?,
                None => sitemap
                    .update(&url, date.clone())
                    .with_context(|| format!("Failed to update {}", url))?,
            };
        }
    }

    save(&sitemap, &args.sitemap)?;
    println!("✅ Updated {}", args.sitemap.display());
    Ok(())
}
