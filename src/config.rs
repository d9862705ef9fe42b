//! # Build Manifest
//!
//! This module defines the YAML manifest the `build` command reads to produce
//! a sitemap declaratively, and the logic for applying it to a [`Sitemap`].
//!
//! ```yaml
//! host: https://example.com/
//! options:
//!   - name: author
//!   - name: updated
//!     handler: lastmod
//! urls:
//!   - /
//!   - url: /about
//!     priority: 0.8
//!     changefreq: monthly
//!   - loc: /blog
//!     file: public/blog/index.html
//! output: public/sitemap.xml
//! ```
//!
//! ## Key Components
//!
//! - **`SitemapConfig`**: the whole manifest. Every key is optional.
//! - **`OptionSpec`**: a custom option. Handlers cannot be written in YAML,
//!   so an option may only reuse one of the built-in handlers by name.
//! - **`UrlSpec`**: a URL, either a plain string or an entry-like mapping with
//!   a `url` or `loc` key. Relative `file` paths are resolved against the
//!   manifest's directory.
//!
//! Applying a manifest registers the options first, then sets the host, then
//! adds the URLs in order.

use log::debug;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

use crate::entry::{UrlInput, FILE};
use crate::error::{Error, Result};
use crate::handlers::{handle_changefreq, handle_lastmod, handle_priority};
use crate::registry::{handler_fn, Handler};
use crate::sitemap::Sitemap;
use crate::value::{OptionValue, UrlOptions};

/// The default output file of a manifest without `output`.
pub const DEFAULT_OUTPUT: &str = "sitemap.xml";

/// A sitemap build manifest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    /// Absolute base URL, also registered as a URL.
    #[serde(default)]
    pub host: Option<String>,
    /// Custom options, registered in order before any URL is added.
    #[serde(default)]
    pub options: Vec<OptionSpec>,
    #[serde(default)]
    pub urls: Vec<UrlSpec>,
    /// Where the sitemap is written, relative to the manifest.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// A custom option declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionSpec {
    pub name: String,
    #[serde(default)]
    pub handler: Option<BuiltinHandler>,
    #[serde(default)]
    pub overwrite: bool,
}

/// Built-in handlers a custom option can reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinHandler {
    Lastmod,
    Changefreq,
    Priority,
}

impl BuiltinHandler {
    pub fn handler(self) -> Handler {
        match self {
            BuiltinHandler::Lastmod => handler_fn(handle_lastmod),
            BuiltinHandler::Changefreq => handler_fn(handle_changefreq),
            BuiltinHandler::Priority => handler_fn(handle_priority),
        }
    }
}

/// A URL to add.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UrlSpec {
    Plain(String),
    Entry(Mapping),
}

impl SitemapConfig {
    /// The output path, resolved against `base_dir`.
    pub fn output_path(&self, base_dir: &Path) -> PathBuf {
        let output = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
        base_dir.join(output)
    }

    /// Apply the manifest to a sitemap: options, then host, then URLs.
    ///
    /// # Errors
    ///
    /// Returns the first error any sitemap operation reports, or
    /// `Error::ConfigParse` for URL mappings that cannot be converted.
    pub fn apply(&self, sitemap: &mut Sitemap, base_dir: &Path) -> Result<()> {
        self.apply_with(sitemap, base_dir, false)
    }

    /// Like [`SitemapConfig::apply`], but URLs that are already registered
    /// have their options updated instead of failing as duplicates.
    pub fn merge(&self, sitemap: &mut Sitemap, base_dir: &Path) -> Result<()> {
        self.apply_with(sitemap, base_dir, true)
    }

    fn apply_with(&self, sitemap: &mut Sitemap, base_dir: &Path, merge: bool) -> Result<()> {
        for option in &self.options {
            sitemap.add_option(
                &option.name,
                option.handler.map(BuiltinHandler::handler),
                option.overwrite,
            )?;
        }
        if let Some(host) = &self.host {
            sitemap.set_host(host.as_str())?;
        }
        for spec in &self.urls {
            let input = spec.to_input(base_dir)?;
            if merge {
                let (url, options) = input.into_parts()?;
                if sitemap.has_url(&url) {
                    sitemap.set_option_values((url, options))?;
                } else {
                    sitemap.add_url(&url, options)?;
                }
            } else {
                sitemap.add(input)?;
            }
        }
        debug!(
            "Applied manifest: {} options, {} urls",
            self.options.len(),
            self.urls.len()
        );
        Ok(())
    }
}

impl UrlSpec {
    /// Convert into sitemap input, resolving a relative `file` against
    /// `base_dir`.
    pub fn to_input(&self, base_dir: &Path) -> Result<UrlInput> {
        let mapping = match self {
            UrlSpec::Plain(url) => return Ok(UrlInput::from(url.as_str())),
            UrlSpec::Entry(mapping) => mapping,
        };

        let mut options = UrlOptions::new();
        for (key, value) in mapping {
            let key = key.as_str().ok_or_else(|| Error::ConfigParse {
                message: format!("URL keys must be strings, found {:?}", key),
            })?;
            let mut value = yaml_to_option_value(key, value)?;
            if key == FILE {
                if let OptionValue::Text(path) = &value {
                    let path = base_dir.join(path);
                    value = OptionValue::Text(path.to_string_lossy().into_owned());
                }
            }
            options.insert(key, value);
        }
        Ok(UrlInput::Entry(options))
    }
}

fn yaml_to_option_value(key: &str, value: &Value) -> Result<OptionValue> {
    match value {
        Value::Null => Ok(OptionValue::Null),
        Value::Bool(flag) => Ok(OptionValue::Bool(*flag)),
        Value::Number(number) => number
            .as_f64()
            .map(OptionValue::Number)
            .ok_or_else(|| Error::ConfigParse {
                message: format!("'{}' is not a representable number", key),
            }),
        Value::String(text) => Ok(OptionValue::Text(text.clone())),
        _ => Err(Error::ConfigParse {
            message: format!("'{}' must be a string, number, boolean or null", key),
        }),
    }
}

/// Parse a manifest from YAML text.
pub fn parse(yaml_content: &str) -> Result<SitemapConfig> {
    Ok(serde_yaml::from_str(yaml_content)?)
}

/// Read and parse a manifest file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<SitemapConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
