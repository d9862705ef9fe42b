//! # Build Command Implementation
//!
//! This module implements the `build` subcommand, which reads a YAML manifest
//! and writes the sitemap it describes.
//!
//! ## Functionality
//!
//! - **Manifest**: options, host and URLs are applied in that order (see
//!   `xml_sitemap::config`).
//! - **Output**: `--output` overrides the manifest's `output`, which defaults
//!   to `sitemap.xml` next to the manifest.
//! - **Merge**: `--merge` starts from the existing output file instead of an
//!   empty sitemap; URLs already in it have their options updated.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};

use xml_sitemap::config;
use xml_sitemap::Sitemap;

use super::{load_or_new, save};

/// Default manifest file name.
pub const DEFAULT_MANIFEST: &str = "sitemap.yaml";

/// Build a sitemap from a YAML manifest
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Path to the manifest file
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_MANIFEST)]
    pub config: PathBuf,

    /// Where to write the sitemap, overriding the manifest
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Apply the manifest on top of the existing output sitemap
    #[arg(long)]
    pub merge: bool,
}

/// Execute the `build` command.
pub fn execute(args: BuildArgs) -> Result<()> {
    let config_path = &args.config;
    if !config_path.exists() {
        anyhow::bail!("Manifest {} not found", config_path.display());
    }

    let manifest = config::from_file(config_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load manifest from {}: {}",
            config_path.display(),
            e
        )
    })?;

    let base_dir = config_path.parent().unwrap_or(Path::new("."));
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| manifest.output_path(base_dir));

    let sitemap = if args.merge {
        let mut sitemap = load_or_new(&output)?;
        manifest
            .merge(&mut sitemap, base_dir)
            .context("Failed to apply manifest")?;
        sitemap
    } else {
        let mut sitemap = Sitemap::new();
        manifest
            .apply(&mut sitemap, base_dir)
            .context("Failed to apply manifest")?;
        sitemap
    };

    save(&sitemap, &output)?;
    println!("✅ Wrote {} URL(s) to {}", sitemap.len(), output.display());
    Ok(())
}
