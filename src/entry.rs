//! URL entries and the shapes URL input can take.

use crate::error::{Error, Result};
use crate::value::UrlOptions;

/// Key under which an entry carries its location in the tree and in XML.
pub const LOC: &str = "loc";
/// Alternative location key accepted in entry-like input.
pub const URL: &str = "url";
/// Pseudo-option that links a file instead of storing a field.
pub const FILE: &str = "file";

/// One registered URL: its canonical location plus the option fields that
/// have been set on it, in the order they were first assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    loc: String,
    fields: Vec<(String, String)>,
}

impl UrlEntry {
    pub(crate) fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            fields: Vec::new(),
        }
    }

    /// The canonical absolute URL of this entry.
    pub fn loc(&self) -> &str {
        &self.loc
    }

    /// The stored value of a field, `None` when unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set fields in assignment order, `loc` excluded.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub(crate) fn unset(&mut self, name: &str) -> Option<String> {
        let index = self.fields.iter().position(|(k, _)| k == name)?;
        Some(self.fields.remove(index).1)
    }
}

/// Input accepted by `Sitemap::add` and friends.
///
/// ```
/// use xml_sitemap::{UrlInput, UrlOptions};
///
/// // a bare URL
/// let single: UrlInput = "http://domain.com/".into();
/// // a URL with options
/// let with_options: UrlInput = ("/about", UrlOptions::new().with("priority", 0.5)).into();
/// // an entry-like structure carrying its location inline
/// let entry: UrlInput = UrlOptions::new().with("loc", "/contact").into();
/// // a batch of any of the above
/// let batch = UrlInput::from(vec![single, with_options, entry]);
/// assert!(matches!(batch, UrlInput::Batch(items) if items.len() == 3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum UrlInput {
    /// A URL reference with separate options.
    Url { url: String, options: UrlOptions },
    /// A mapping with a `url` or `loc` key; every other key is an option.
    Entry(UrlOptions),
    /// Items added one after another in order.
    Batch(Vec<UrlInput>),
}

impl UrlInput {
    /// Split a single (non-batch) input into its URL reference and options.
    ///
    /// # Errors
    ///
    /// `Error::MissingLocation` for an entry-like mapping without a location,
    /// `Error::InvalidType` for a batch or a non-string location.
    pub fn into_parts(self) -> Result<(String, UrlOptions)> {
        match self {
            UrlInput::Url { url, options } => Ok((url, options)),
            UrlInput::Entry(object) => parse_url_object(object),
            UrlInput::Batch(_) => Err(Error::InvalidType {
                option: URL.to_string(),
                expected: "a single url or url object".to_string(),
                found: "batch".to_string(),
            }),
        }
    }
}

impl From<&str> for UrlInput {
    fn from(url: &str) -> Self {
        UrlInput::Url {
            url: url.to_string(),
            options: UrlOptions::new(),
        }
    }
}

impl From<String> for UrlInput {
    fn from(url: String) -> Self {
        UrlInput::Url {
            url,
            options: UrlOptions::new(),
        }
    }
}

impl<S: Into<String>> From<(S, UrlOptions)> for UrlInput {
    fn from((url, options): (S, UrlOptions)) -> Self {
        UrlInput::Url {
            url: url.into(),
            options,
        }
    }
}

impl From<UrlOptions> for UrlInput {
    fn from(object: UrlOptions) -> Self {
        UrlInput::Entry(object)
    }
}

impl<T: Into<UrlInput>> From<Vec<T>> for UrlInput {
    fn from(items: Vec<T>) -> Self {
        UrlInput::Batch(items.into_iter().map(Into::into).collect())
    }
}

/// Extract the location from an entry-like mapping.
///
/// `url` takes precedence over `loc`. Both keys are removed from the returned
/// options so neither is mistaken for a regular option.
///
/// # Errors
///
/// `Error::MissingLocation` when neither key holds a string.
pub fn parse_url_object(mut object: UrlOptions) -> Result<(String, UrlOptions)> {
    let url = take_text(&mut object, URL);
    let loc = take_text(&mut object, LOC);
    let location = url.or(loc).ok_or(Error::MissingLocation)?;
    Ok((location, object))
}

fn take_text(object: &mut UrlOptions, key: &str) -> Option<String> {
    let text = object.get(key)?.as_text()?.to_string();
    object.remove(key);
    Some(text)
}
