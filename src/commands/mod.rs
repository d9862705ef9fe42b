//! # Subcommands
//!
//! One file per `xml-sitemap` subcommand. Each holds a clap `XxxArgs` struct
//! and an `execute` function that loads the sitemap file, calls into the
//! `xml_sitemap` library and writes the result back.
//!
//! The helpers below are shared by the editing commands (`add`, `remove`,
//! `update`, `ls`): they load and save sitemap files with file-path context
//! on errors, and resolve URL arguments against an optional `--host`.

pub mod add;
pub mod build;
pub mod ls;
pub mod remove;
pub mod update;

use anyhow::{Context, Result};
use std::path::Path;

use xml_sitemap::host::Host;
use xml_sitemap::Sitemap;

/// Default sitemap file used by the editing commands.
pub const DEFAULT_SITEMAP: &str = "sitemap.xml";

/// Load an existing sitemap file.
pub fn load(path: &Path) -> Result<Sitemap> {
    if !path.exists() {
        anyhow::bail!("Sitemap {} not found", path.display());
    }
    Sitemap::from_file(path).with_context(|| format!("Failed to load sitemap from {}", path.display()))
}

/// Load a sitemap file, or start an empty sitemap if it does not exist.
pub fn load_or_new(path: &Path) -> Result<Sitemap> {
    if path.exists() {
        load(path)
    } else {
        Ok(Sitemap::new())
    }
}

/// Resolve URL arguments against `--host`.
///
/// Unlike `Sitemap::set_host`, the host is only used for resolution and is
/// never added to the sitemap.
pub fn resolve_all(host: Option<&str>, references: &[String]) -> Result<Vec<String>> {
    let mut base = Host::new();
    if let Some(host) = host {
        base.set(host).with_context(|| format!("Invalid host {}", host))?;
    }
    Ok(references.iter().map(|r| base.resolve(r)).collect())
}

/// Write a sitemap file.
pub fn save(sitemap: &Sitemap, path: &Path) -> Result<()> {
    sitemap
        .write_to_file(path)
        .with_context(|| format!("Failed to write sitemap to {}", path.display()))
}
