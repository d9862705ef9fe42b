//! # XML Sitemap Library
//!
//! This library maintains an in-memory model of a sitemaps.org sitemap and
//! converts it to and from XML. It is used by the `xml-sitemap` command-line
//! tool but works just as well embedded in a static site generator or any
//! other build step that needs to emit a sitemap.
//!
//! ## Quick Example
//!
//! ```
//! use xml_sitemap::{Sitemap, UrlInput, UrlOptions};
//!
//! let mut sitemap = Sitemap::new();
//! sitemap.set_host("http://domain.com/").unwrap();
//! sitemap
//!     .add(vec![
//!         UrlInput::from("/magic"),
//!         UrlInput::from(("/another-page", UrlOptions::new().with("changefreq", "weekly"))),
//!     ])
//!     .unwrap();
//!
//! assert!(sitemap.has_url("http://domain.com/magic"));
//! assert_eq!(sitemap.len(), 3);
//!
//! let xml = sitemap.to_xml().unwrap();
//! assert!(xml.contains("<changefreq>weekly</changefreq>"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Value handlers (`handlers`)**: normalize raw option values into the
//!   strings stored on an entry, e.g. dates into `YYYY-MM-DD`.
//! - **Option registry (`registry`)**: the ordered set of options an entry may
//!   carry, each with an optional handler.
//! - **URL store (`store`, `entry`)**: the ordered, duplicate-free list of URLs
//!   and their entries.
//! - **File links (`files`)**: files whose modification time drives a URL's
//!   `lastmod`.
//! - **Host (`host`)**: the base URL relative references resolve against.
//! - **Sitemap (`sitemap`)**: the facade composing all of the above.
//! - **Tree and XML (`tree`, `xml`)**: conversion between the sitemap, its
//!   nested-mapping tree and XML text.
//! - **Manifest (`config`)**: a YAML description of a sitemap to build.

pub mod config;
pub mod entry;
pub mod error;
pub mod files;
pub mod handlers;
pub mod host;
pub mod registry;
pub mod sitemap;
pub mod store;
pub mod tree;
pub mod value;
pub mod xml;

pub use entry::{UrlEntry, UrlInput};
pub use error::{Error, Result};
pub use sitemap::Sitemap;
pub use value::{OptionValue, UrlOptions};

#[cfg(test)]
mod handlers_proptest;
