//! Ordered storage for registered URLs.
//!
//! `UrlStore` keeps two sequences in lockstep: the canonical URL strings and
//! the entries they identify, so that `urls()[i] == entries()[i].loc()` holds
//! between any two calls. Positions are stable until a URL is removed, which
//! shifts later entries down by one.

use crate::entry::UrlEntry;
use crate::error::{Error, Result};

/// Index-aligned URL list and entry list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlStore {
    urls: Vec<String>,
    entries: Vec<UrlEntry>,
}

impl UrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing entries, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateUrl` if two entries share a location.
    pub fn from_entries(entries: Vec<UrlEntry>) -> Result<Self> {
        let mut store = Self::new();
        for entry in entries {
            store.push(entry)?;
        }
        Ok(store)
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn entries(&self) -> &[UrlEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn position(&self, url: &str) -> Option<usize> {
        self.urls.iter().position(|u| u == url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.position(url).is_some()
    }

    pub fn get(&self, url: &str) -> Option<&UrlEntry> {
        self.position(url).map(|index| &self.entries[index])
    }

    pub(crate) fn get_mut(&mut self, url: &str) -> Option<&mut UrlEntry> {
        let index = self.position(url)?;
        Some(&mut self.entries[index])
    }

    /// Append an entry to the end of both sequences.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateUrl` if the entry's location is already stored.
    pub(crate) fn push(&mut self, entry: UrlEntry) -> Result<()> {
        if self.contains(entry.loc()) {
            return Err(Error::DuplicateUrl {
                url: entry.loc().to_string(),
            });
        }
        self.urls.push(entry.loc().to_string());
        self.entries.push(entry);
        Ok(())
    }

    /// Remove a URL and its entry from both sequences.
    pub(crate) fn remove(&mut self, url: &str) -> Option<UrlEntry> {
        let index = self.position(url)?;
        self.urls.remove(index);
        Some(self.entries.remove(index))
    }

    /// Remove a field from every entry, returning how many entries had it.
    pub(crate) fn strip_field(&mut self, name: &str) -> usize {
        self.entries
            .iter_mut()
            .filter_map(|entry| entry.unset(name))
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UrlEntry> {
        self.entries.iter()
    }
}
