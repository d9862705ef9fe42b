//! Mapping between URL entries and the sitemap tree.
//!
//! The sitemap tree has a single `urlset` root carrying the sitemaps.org
//! namespace and, once at least one URL is registered, a `url` sequence with
//! one mapping per entry: `loc` first, then every set field in the order it
//! was first assigned.

use serde_json::{Map, Value};

use crate::entry::{UrlEntry, LOC};
use crate::error::{Error, Result};
use crate::host::Host;
use crate::store::UrlStore;
use crate::xml::{scalar_text, ATTRIBUTES_KEY};

/// Namespace of the sitemaps.org protocol.
pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const URLSET: &str = "urlset";
const URL: &str = "url";

/// Build the tree for a sequence of entries.
pub fn to_tree<'a>(entries: impl IntoIterator<Item = &'a UrlEntry>) -> Value {
    let urls: Vec<Value> = entries.into_iter().map(entry_to_value).collect();

    let mut namespace = Map::new();
    namespace.insert("xmlns".to_string(), Value::String(SITEMAP_NS.to_string()));

    let mut urlset = Map::new();
    urlset.insert(ATTRIBUTES_KEY.to_string(), Value::Object(namespace));
    if !urls.is_empty() {
        urlset.insert(URL.to_string(), Value::Array(urls));
    }

    let mut root = Map::new();
    root.insert(URLSET.to_string(), Value::Object(urlset));
    Value::Object(root)
}

fn entry_to_value(entry: &UrlEntry) -> Value {
    let mut object = Map::new();
    object.insert(LOC.to_string(), Value::String(entry.loc().to_string()));
    for (name, value) in entry.fields() {
        object.insert(name.to_string(), Value::String(value.to_string()));
    }
    Value::Object(object)
}

/// Rehydrate a URL store from a tree.
///
/// `url` may be a single mapping or a sequence of them. Each `loc` is
/// canonicalized the same way URL arguments are, so `https://example.com`
/// is stored as `https://example.com/`. Other field values are stored
/// verbatim, without running them through option handlers.
///
/// # Errors
///
/// - `Error::Tree` if the tree has no `urlset` root or a field is not text
/// - `Error::MissingLocation` for a `url` without a `loc`
/// - `Error::DuplicateUrl` if two entries share a canonical location
pub fn from_tree(tree: &Value) -> Result<UrlStore> {
    let urlset = tree
        .get(URLSET)
        .ok_or_else(|| tree_error("missing <urlset> root element"))?;

    let urls = match urlset {
        Value::Object(object) => match object.get(URL) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().collect(),
            Some(single) => vec![single],
        },
        // <urlset/> without attributes
        Value::String(text) if text.trim().is_empty() => Vec::new(),
        _ => return Err(tree_error("<urlset> must contain <url> elements")),
    };

    let entries = urls
        .into_iter()
        .map(value_to_entry)
        .collect::<Result<Vec<_>>>()?;
    UrlStore::from_entries(entries)
}

fn value_to_entry(value: &Value) -> Result<UrlEntry> {
    let object = match value {
        Value::Object(object) => object,
        Value::String(_) | Value::Null => return Err(Error::MissingLocation),
        _ => return Err(tree_error("<url> must be an element")),
    };

    let loc = match object.get(LOC) {
        None => return Err(Error::MissingLocation),
        Some(value) => scalar_text(value).ok_or_else(|| tree_error("<loc> must be text"))?,
    };

    let mut entry = UrlEntry::new(Host::new().resolve(&loc));
    for (name, value) in object {
        if name == LOC || name == ATTRIBUTES_KEY {
            continue;
        }
        let text = scalar_text(value)
            .ok_or_else(|| tree_error(format!("<{}> of {} must be text", name, entry.loc())))?;
        entry.set(name.as_str(), text);
    }
    Ok(entry)
}

fn tree_error(message: impl Into<String>) -> Error {
    Error::Tree {
        message: message.into(),
    }
}

impl UrlStore {
    /// The sitemap tree for this store.
    pub fn to_tree(&self) -> Value {
        to_tree(self.entries())
    }
}
