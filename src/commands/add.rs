//! # Add Command Implementation
//!
//! This module implements the `add` subcommand, which adds one or more URLs to
//! a sitemap file. The file is created when it does not exist yet.
//!
//! Every URL receives the same options. Relative URLs are resolved against
//! `--host`.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use xml_sitemap::{OptionValue, UrlOptions};

use super::{load_or_new, resolve_all, save, DEFAULT_SITEMAP};

/// Add URLs to a sitemap file
#[derive(Args, Debug)]
pub struct AddArgs {
    /// URLs to add, absolute or relative to --host
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,

    /// Path to the sitemap file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SITEMAP)]
    pub sitemap: PathBuf,

    /// Base URL relative URLs are resolved against
    #[arg(long, value_name = "URL")]
    pub host: Option<String>,

    /// Last modification date (YYYY-MM-DD or "now")
    #[arg(long, value_name = "DATE")]
    pub lastmod: Option<String>,

    /// Change frequency (always, hourly, daily, weekly, monthly, yearly, never)
    #[arg(long, value_name = "FREQ")]
    pub changefreq: Option<String>,

    /// Priority between 0 and 1
    #[arg(long, value_name = "NUMBER")]
    pub priority: Option<f64>,

    /// File whose modification time becomes the lastmod
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl AddArgs {
    fn options(&self) -> UrlOptions {
        let mut options = UrlOptions::new();
        if let Some(lastmod) = &self.lastmod {
            options.insert("lastmod", lastmod);
        }
        if let Some(changefreq) = &self.changefreq {
            options.insert("changefreq", changefreq);
        }
        if let Some(priority) = self.priority {
            options.insert("priority", priority);
        }
        if let Some(file) = &self.file {
            options.insert("file", OptionValue::Text(file.to_string_lossy().into_owned()));
        }
        options
    }
}

/// Execute the `add` command.
pub fn execute(args: AddArgs) -> Result<()> {
    let mut sitemap = load_or_new(&args.sitemap)?;
    let urls = resolve_all(args.host.as_deref(), &args.urls)?;

    let options = args.options();
    for url in &urls {
        sitemap
            .add_url(url, options.clone())
            .with_context(|| format!("Failed to add {}", url))?;
    }

    save(&sitemap, &args.sitemap)?;
    println!(
        "✅ Added {} URL(s) to {}",
        args.urls.len(),
        args.sitemap.display()
    );
    Ok(())
}
