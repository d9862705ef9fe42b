//! Host-relative URL resolution.
//!
//! Every URL argument a sitemap operation receives is resolved against the
//! configured host before it is used as a key, so `/magic`, `magic` and
//! `http://domain.com/magic` all name the same entry once the host is
//! `http://domain.com/`.

use log::debug;
use url::Url;

use crate::error::Result;

/// The base URL relative references are resolved against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Host {
    base: Option<Url>,
}

impl Host {
    /// An unset host; references are only normalized, never joined.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the host. Already stored URLs are not re-resolved.
    ///
    /// Returns the canonical host string (`http://domain.com` becomes
    /// `http://domain.com/`).
    ///
    /// # Errors
    ///
    /// Returns `Error::UrlParse` if `url` is not an absolute URL.
    pub fn set(&mut self, url: &str) -> Result<String> {
        let base = Url::parse(url)?;
        let canonical = base.to_string();
        debug!("Host set to {}", canonical);
        self.base = Some(base);
        Ok(canonical)
    }

    /// The canonical host string, empty when unset.
    pub fn as_str(&self) -> &str {
        self.base.as_ref().map(Url::as_str).unwrap_or_default()
    }

    pub fn is_set(&self) -> bool {
        self.base.is_some()
    }

    /// Whether a canonical URL is the host itself.
    pub fn is_host(&self, canonical: &str) -> bool {
        self.is_set() && self.as_str() == canonical
    }

    /// Resolve a reference into its canonical form.
    ///
    /// Absolute references are normalized. Relative references are joined
    /// onto the host; without a host they are returned unchanged, as is any
    /// reference the URL parser rejects.
    pub fn resolve(&self, reference: &str) -> String {
        let resolved = match &self.base {
            Some(base) => base.join(reference),
            None => Url::parse(reference),
        };
        match resolved {
            Ok(url) => url.into(),
            Err(e) => {
                debug!("Keeping '{}' unresolved: {}", reference, e);
                reference.to_string()
            }
        }
    }
}
