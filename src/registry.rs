//! The option registry.
//!
//! The registry is the ordered set of option names a URL entry may carry,
//! each with an optional [`Handler`] that normalizes raw values. It starts
//! with the three sitemaps.org fields (`lastmod`, `changefreq`, `priority`)
//! and can be extended with custom options.
//!
//! Stripping a removed option from existing entries is the sitemap's job, so
//! the registry itself only tracks definitions.

use log::debug;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::handlers::{
    handle_changefreq, handle_lastmod, handle_priority, CHANGEFREQ, LASTMOD, PRIORITY,
};
use crate::value::OptionValue;

/// A value normalization function stored per option.
pub type Handler = Arc<dyn Fn(&OptionValue) -> Result<String> + Send + Sync>;

/// Wrap a closure or function as a [`Handler`].
///
/// ```
/// use xml_sitemap::registry::handler_fn;
/// use xml_sitemap::OptionValue;
///
/// let upper = handler_fn(|value: &OptionValue| Ok(value.to_string().to_uppercase()));
/// assert_eq!(upper(&OptionValue::from("bar")).unwrap(), "BAR");
/// ```
pub fn handler_fn<F>(f: F) -> Handler
where
    F: Fn(&OptionValue) -> Result<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A single permitted option.
#[derive(Clone)]
pub struct OptionDefinition {
    name: String,
    handler: Option<Handler>,
}

impl OptionDefinition {
    pub fn new(name: impl Into<String>, handler: Option<Handler>) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler(&self) -> Option<&Handler> {
        self.handler.as_ref()
    }
}

impl fmt::Debug for OptionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionDefinition")
            .field("name", &self.name)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Ordered collection of option definitions with unique names.
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    definitions: Vec<OptionDefinition>,
}

impl Default for OptionRegistry {
    /// The built-in sitemaps.org options, in declaration order.
    fn default() -> Self {
        Self {
            definitions: vec![
                OptionDefinition::new(LASTMOD, Some(handler_fn(handle_lastmod))),
                OptionDefinition::new(CHANGEFREQ, Some(handler_fn(handle_changefreq))),
                OptionDefinition::new(PRIORITY, Some(handler_fn(handle_priority))),
            ],
        }
    }
}

impl OptionRegistry {
    /// A registry with the built-in options.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with no options at all.
    pub fn empty() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    /// Registered option names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&OptionDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Look up a definition, failing for unregistered names.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownOption` listing the registered names.
    pub fn require(&self, name: &str) -> Result<&OptionDefinition> {
        self.get(name).ok_or_else(|| Error::UnknownOption {
            option: name.to_string(),
            expected: self.names().collect::<Vec<_>>().join(", "),
        })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Register a new option at the end of the registry.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateOption` if the name is already registered.
    pub fn add(&mut self, name: &str, handler: Option<Handler>) -> Result<()> {
        if self.contains(name) {
            return Err(Error::DuplicateOption {
                option: name.to_string(),
            });
        }
        debug!("Registering option '{}' (handler: {})", name, handler.is_some());
        self.definitions.push(OptionDefinition::new(name, handler));
        Ok(())
    }

    /// Remove an option, returning whether it was registered.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.definitions.iter().position(|d| d.name == name) {
            Some(index) => {
                self.definitions.remove(index);
                debug!("Removed option '{}'", name);
                true
            }
            None => false,
        }
    }

    /// Normalize a raw value for the named option.
    ///
    /// Returns `Ok(None)` for the clear sentinel (`OptionValue::Null`)
    /// without looking the option up, which tells the caller to remove the
    /// field. Otherwise the value is run through the option's handler, or
    /// stringified unchanged when the option has none.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownOption` for unregistered names, and propagates
    /// any error raised by the handler.
    pub fn normalize(&self, name: &str, value: &OptionValue) -> Result<Option<String>> {
        if value.is_null() {
            return Ok(None);
        }
        match self.require(name)?.handler() {
            Some(handler) => handler(value).map(Some),
            None => Ok(Some(value.to_string())),
        }
    }
}
