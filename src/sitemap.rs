//! # Sitemap
//!
//! `Sitemap` is the public face of the crate. It owns an option registry, the
//! ordered URL store, the file-link table and the host, and keeps them
//! consistent with each other:
//!
//! - every URL argument is resolved against the host before use;
//! - option values are normalized through the registry before anything is
//!   mutated, so validation failures never leave partial changes behind;
//! - removing an option from the registry strips it from every entry.
//!
//! Operations that target a URL which is not registered fall into two groups.
//! Lookups (`get_url_node`, `get_option_value`, `set_option_values`) fail with
//! `Error::NotFound`. Mutations (`remove`, `update`, `link_file`,
//! `unlink_file`, `set_option_value`) log a warning and leave the sitemap
//! untouched.
//!
//! ## Example
//!
//! ```
//! use xml_sitemap::{Sitemap, UrlOptions};
//!
//! let mut sitemap = Sitemap::new();
//! sitemap
//!     .set_host("http://domain.com/")?
//!     .add(("/about", UrlOptions::new().with("priority", 0.8)))?
//!     .update("/about", Some("2012-12-21".into()))?;
//!
//! assert!(sitemap.has_url("about"));
//! assert_eq!(sitemap.get_option_value("/about", "lastmod")?, Some("2012-12-21"));
//! # Ok::<(), xml_sitemap::Error>(())
//! ```

use log::{debug, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::entry::{UrlEntry, UrlInput, FILE};
use crate::error::{Error, Result};
use crate::files::{modified_date, DiskFileStat, FileLinks, FileStat};
use crate::handlers::{today, LASTMOD};
use crate::host::Host;
use crate::registry::{Handler, OptionRegistry};
use crate::store::UrlStore;
use crate::tree;
use crate::value::{OptionValue, UrlOptions};
use crate::xml;

/// An in-memory sitemap.
#[derive(Debug)]
pub struct Sitemap {
    registry: OptionRegistry,
    store: UrlStore,
    files: FileLinks,
    host: Host,
    stat: Box<dyn FileStat>,
}

impl Default for Sitemap {
    fn default() -> Self {
        Self {
            registry: OptionRegistry::default(),
            store: UrlStore::new(),
            files: FileLinks::new(),
            host: Host::new(),
            stat: Box::new(DiskFileStat),
        }
    }
}

impl Sitemap {
    /// An empty sitemap with the built-in options and no host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate a sitemap from its tree. Stored values are kept verbatim.
    pub fn from_tree(tree: &Value) -> Result<Self> {
        Ok(Self {
            store: tree::from_tree(tree)?,
            ..Self::default()
        })
    }

    /// Rehydrate a sitemap from XML text.
    pub fn from_xml(xml: &str) -> Result<Self> {
        Self::from_tree(&xml::parse(xml)?)
    }

    /// Read and rehydrate a sitemap file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading sitemap from {}", path.display());
        Self::from_xml(&fs::read_to_string(path)?)
    }

    /// Replace the filesystem access used for linked files.
    pub fn with_file_stat(mut self, stat: Box<dyn FileStat>) -> Self {
        self.stat = stat;
        self
    }

    pub fn to_tree(&self) -> Value {
        self.store.to_tree()
    }

    /// Serialize to sitemaps.org XML.
    pub fn to_xml(&self) -> Result<String> {
        xml::serialize(&self.to_tree())
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_xml()?)?;
        debug!("Wrote {} urls to {}", self.len(), path.display());
        Ok(())
    }

    // --- host -----------------------------------------------------------

    /// The canonical host, empty when unset.
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// Set the host and register it as a URL.
    ///
    /// Accepts the same single shapes as [`Sitemap::add`]. If the host is
    /// already registered, its options are applied to the existing entry
    /// instead. Previously stored URLs are not re-resolved.
    ///
    /// # Errors
    ///
    /// `Error::UrlParse` if the URL is not absolute, and any error `add`
    /// reports for the options. On failure the previous host is restored.
    pub fn set_host(&mut self, input: impl Into<UrlInput>) -> Result<&mut Self> {
        let (url, options) = input.into().into_parts()?;
        let previous = self.host.clone();
        let canonical = self.host.set(&url)?;
        if let Err(e) = self.add_url(&canonical, options) {
            self.host = previous;
            return Err(e);
        }
        Ok(self)
    }

    /// Resolve a reference against the host into its canonical form.
    pub fn resolve(&self, reference: &str) -> String {
        self.host.resolve(reference)
    }

    // --- urls -----------------------------------------------------------

    /// Canonical URLs in registration order.
    pub fn urls(&self) -> &[String] {
        self.store.urls()
    }

    pub fn entries(&self) -> &[UrlEntry] {
        self.store.entries()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn has_url(&self, reference: &str) -> bool {
        self.store.contains(&self.resolve(reference))
    }

    /// Add one URL, an entry-like mapping, or a batch of either.
    ///
    /// Batch items are added in order; items before a failing one stay
    /// added. A `file` option links that file and derives `lastmod` from it.
    ///
    /// # Errors
    ///
    /// - `Error::DuplicateUrl` if the URL is registered and is not the host
    /// - `Error::MissingLocation` for an entry-like mapping without a location
    /// - `Error::FileNotFound` if a `file` option names a missing file
    /// - any normalization error for the options
    pub fn add(&mut self, input: impl Into<UrlInput>) -> Result<&mut Self> {
        match input.into() {
            UrlInput::Batch(items) => {
                for item in items {
                    self.add(item)?;
                }
            }
            single => {
                let (url, options) = single.into_parts()?;
                self.add_url(&url, options)?;
            }
        }
        Ok(self)
    }

    /// Add a single URL with options. See [`Sitemap::add`].
    pub fn add_url(&mut self, url: &str, mut options: UrlOptions) -> Result<&mut Self> {
        let loc = self.resolve(url);
        if self.store.contains(&loc) {
            if self.host.is_host(&loc) {
                self.apply_options(&loc, options)?;
                return Ok(self);
            }
            return Err(Error::DuplicateUrl { url: loc });
        }

        let file = take_file(&mut options)?;
        let lastmod = match &file {
            Some(path) => self.file_lastmod(path)?,
            None => None,
        };
        let entry = self.build_entry(&loc, &options)?;
        self.store.push(entry)?;
        debug!("Added {}", loc);

        if let Some(path) = file {
            self.attach_file(&loc, path, lastmod);
        }
        Ok(self)
    }

    /// Remove a URL. Logs a warning if it is not registered.
    ///
    /// A file linked to the URL stays in the link table.
    pub fn remove(&mut self, reference: &str) -> &mut Self {
        let loc = self.resolve(reference);
        match self.store.remove(&loc) {
            Some(_) => debug!("Removed {}", loc),
            None => warn!("{} not in sitemap, can't remove it.", loc),
        }
        self
    }

    /// The entry registered for a URL.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the URL is not registered.
    pub fn get_url_node(&self, reference: &str) -> Result<&UrlEntry> {
        let loc = self.resolve(reference);
        self.store.get(&loc).ok_or(Error::NotFound { url: loc })
    }

    /// Build an entry for an already resolved location, normalizing every
    /// option through the registry. `Null` values are left unset.
    pub fn build_entry(&self, loc: &str, options: &UrlOptions) -> Result<UrlEntry> {
        let mut entry = UrlEntry::new(loc);
        for (name, value) in self.normalize_all(options)? {
            if let Some(value) = value {
                entry.set(name, value);
            }
        }
        Ok(entry)
    }

    // --- options --------------------------------------------------------

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    /// Registered option names in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    /// Register a custom option.
    ///
    /// With `overwrite`, an existing option of the same name is removed first
    /// (including its values on every entry) and re-added at the end.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateOption` if the option exists and `overwrite`
    /// is false.
    pub fn add_option(
        &mut self,
        name: &str,
        handler: Option<Handler>,
        overwrite: bool,
    ) -> Result<&mut Self> {
        if overwrite && self.registry.contains(name) {
            self.remove_option(name);
        }
        self.registry.add(name, handler)?;
        Ok(self)
    }

    /// Unregister an option and strip it from every entry.
    pub fn remove_option(&mut self, name: &str) -> &mut Self {
        if self.registry.remove(name) {
            let stripped = self.store.strip_field(name);
            debug!("Stripped '{}' from {} urls", name, stripped);
        }
        self
    }

    /// Normalize a value for an option. `Ok(None)` means "clear the field".
    pub fn normalize(&self, name: &str, value: impl Into<OptionValue>) -> Result<Option<String>> {
        self.registry.normalize(name, &value.into())
    }

    /// The stored value of an option on a URL, `None` when unset.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if the URL is not registered, then
    /// `Error::UnknownOption` if the option is not.
    pub fn get_option_value(&self, reference: &str, option: &str) -> Result<Option<&str>> {
        let entry = self.get_url_node(reference)?;
        self.registry.require(option)?;
        Ok(entry.get(option))
    }

    /// Set a single option on a URL. `OptionValue::Null` removes the field.
    ///
    /// The `file` option links (or, with `Null`, unlinks) a file instead.
    /// The value is validated before the URL is looked up, so invalid values
    /// fail even for unregistered URLs, which otherwise only log a warning.
    pub fn set_option_value(
        &mut self,
        reference: &str,
        option: &str,
        value: impl Into<OptionValue>,
    ) -> Result<&mut Self> {
        let value = value.into();
        if option == FILE {
            return match file_path(value)? {
                Some(path) => self.link_file(reference, path),
                None => Ok(self.unlink_file(reference)),
            };
        }

        let normalized = self.registry.normalize(option, &value)?;
        let loc = self.resolve(reference);
        if !self.store.contains(&loc) {
            warn!("{} not in sitemap, can't update its {}.", loc, option);
            return Ok(self);
        }
        self.store_field(&loc, option, normalized);
        Ok(self)
    }

    /// Set several options on a registered URL at once.
    ///
    /// All options are validated before any is applied.
    ///
    /// # Errors
    ///
    /// `Error::NotFound` if the URL is not registered, plus any
    /// normalization or `file` error.
    pub fn set_option_values(&mut self, input: impl Into<UrlInput>) -> Result<&mut Self> {
        let (url, options) = input.into().into_parts()?;
        let loc = self.resolve(&url);
        if !self.store.contains(&loc) {
            return Err(Error::NotFound { url: loc });
        }
        self.apply_options(&loc, options)?;
        Ok(self)
    }

    // --- lastmod --------------------------------------------------------

    /// Refresh a URL's `lastmod`.
    ///
    /// A linked file always wins over `date`. Otherwise `None`, `Null` and
    /// `"now"` mean today, and any other value goes through the `lastmod`
    /// handler. Logs a warning if the URL is not registered.
    pub fn update(&mut self, reference: &str, date: Option<OptionValue>) -> Result<&mut Self> {
        let loc = self.resolve(reference);
        if !self.store.contains(&loc) {
            warn!("{} not in sitemap, can't update lastmod.", loc);
            return Ok(self);
        }

        let date = match self.files.get(&loc) {
            Some(path) => OptionValue::Date(modified_date(self.stat.as_ref(), path)?),
            None => date
                .filter(|d| !d.is_null())
                .unwrap_or_else(|| OptionValue::Date(today())),
        };
        let lastmod = self.registry.normalize(LASTMOD, &date)?;
        self.store_field(&loc, LASTMOD, lastmod);
        Ok(self)
    }

    /// Refresh `lastmod` across the sitemap.
    ///
    /// Without a default (`None` or `Null`) only URLs with a linked file are
    /// touched. With one, every URL is updated: linked URLs from their file,
    /// the rest to the default.
    pub fn update_all(&mut self, default: Option<OptionValue>) -> Result<&mut Self> {
        let default = default.filter(|d| !d.is_null());
        let urls = self.store.urls().to_vec();
        for url in urls {
            if default.is_some() || self.files.contains(&url) {
                self.update(&url, default.clone())?;
            }
        }
        Ok(self)
    }

    /// Set `lastmod` from a file's modification time without linking it.
    ///
    /// This is `update` with the file's date, so a file already linked to the
    /// URL still wins. Logs a warning if the URL is not registered.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileNotFound` if the file does not exist.
    pub fn update_from_file(&mut self, reference: &str, path: impl AsRef<Path>) -> Result<&mut Self> {
        let loc = self.resolve(reference);
        if !self.store.contains(&loc) {
            warn!("{} not in sitemap, can't update lastmod.", loc);
            return Ok(self);
        }
        let date = modified_date(self.stat.as_ref(), path.as_ref())?;
        self.update(&loc, Some(OptionValue::Date(date)))
    }

    // --- file links -----------------------------------------------------

    /// Link a file to a URL and derive its `lastmod` from the file now and
    /// on every later update.
    ///
    /// Logs a warning if the URL is not registered.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileNotFound` if the file does not exist.
    pub fn link_file(&mut self, reference: &str, path: impl Into<PathBuf>) -> Result<&mut Self> {
        let loc = self.resolve(reference);
        if !self.store.contains(&loc) {
            warn!("{} not in sitemap, can't link file.", loc);
            return Ok(self);
        }
        let path = path.into();
        let lastmod = self.file_lastmod(&path)?;
        self.attach_file(&loc, path, lastmod);
        Ok(self)
    }

    /// Remove a URL's file link. The current `lastmod` is kept.
    pub fn unlink_file(&mut self, reference: &str) -> &mut Self {
        let loc = self.resolve(reference);
        if let Some(path) = self.files.unlink(&loc) {
            debug!("Unlinked {} from {}", path.display(), loc);
        }
        self
    }

    pub fn linked_file(&self, reference: &str) -> Option<&Path> {
        self.files.get(&self.resolve(reference))
    }

    pub fn files(&self) -> &FileLinks {
        &self.files
    }

    // --- internals ------------------------------------------------------

    fn normalize_all(&self, options: &UrlOptions) -> Result<Vec<(String, Option<String>)>> {
        options
            .iter()
            .map(|(name, value)| Ok((name.to_string(), self.registry.normalize(name, value)?)))
            .collect()
    }

    /// Validate every option, then apply them to a registered URL.
    fn apply_options(&mut self, loc: &str, mut options: UrlOptions) -> Result<()> {
        let file = take_file(&mut options)?;
        let lastmod = match &file {
            Some(path) => self.file_lastmod(path)?,
            None => None,
        };
        for (name, value) in self.normalize_all(&options)? {
            self.store_field(loc, &name, value);
        }
        if let Some(path) = file {
            self.attach_file(loc, path, lastmod);
        }
        Ok(())
    }

    fn store_field(&mut self, loc: &str, name: &str, value: Option<String>) {
        if let Some(entry) = self.store.get_mut(loc) {
            match value {
                Some(value) => entry.set(name, value),
                None => {
                    entry.unset(name);
                }
            }
        }
    }

    /// The `lastmod` a file's modification time normalizes to.
    fn file_lastmod(&self, path: &Path) -> Result<Option<String>> {
        let date = modified_date(self.stat.as_ref(), path)?;
        self.registry.normalize(LASTMOD, &OptionValue::Date(date))
    }

    /// Record a link and the `lastmod` already read from the file.
    fn attach_file(&mut self, loc: &str, path: PathBuf, lastmod: Option<String>) {
        debug!("Linked {} to {}", path.display(), loc);
        self.files.link(loc, path);
        self.store_field(loc, LASTMOD, lastmod);
    }
}

/// Pull the `file` pseudo-option out of a set of options.
fn take_file(options: &mut UrlOptions) -> Result<Option<PathBuf>> {
    match options.remove(FILE) {
        Some(value) => file_path(value),
        None => Ok(None),
    }
}

fn file_path(value: OptionValue) -> Result<Option<PathBuf>> {
    match value {
        OptionValue::Null => Ok(None),
        OptionValue::Text(path) => Ok(Some(PathBuf::from(path))),
        other => Err(Error::InvalidType {
            option: FILE.to_string(),
            expected: "a file path".to_string(),
            found: other.type_name().to_string(),
        }),
    }
}
