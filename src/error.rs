//! # Error Handling
//!
//! This module defines the centralized error type for the `xml-sitemap`
//! library. It uses the `thiserror` library to build a single `Error` enum
//! covering every failure a sitemap operation can report.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Variants fall into four groups:
//!   - *Validation errors* (`InvalidType`, `InvalidValue`, `UnknownOption`,
//!     `MissingLocation`) raised while normalizing option values or parsing
//!     entry-like input. They never leave a partially mutated sitemap behind.
//!   - *Conflict errors* (`DuplicateOption`, `DuplicateUrl`).
//!   - *Not-found errors* (`NotFound` for URLs, `FileNotFound` for linked
//!     files).
//!   - *Collaborator errors* wrapped from I/O (including the XML writer),
//!     URL parsing and YAML configuration parsing.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Soft failures (operating on a URL that is not in the sitemap from a
//! mutation path such as `update` or `remove`) are not errors at all: they are
//! logged through the `log` facade and the operation returns normally.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for sitemap operations
#[derive(Error, Debug)]
pub enum Error {
    /// A value of the wrong kind was handed to an option handler.
    ///
    /// For example a boolean passed as `lastmod`, which only understands
    /// dates and strings.
    #[error("Invalid type for option '{option}': expected {expected}, found {found}")]
    InvalidType {
        option: String,
        expected: String,
        found: String,
    },

    /// A value of the right kind that the option handler rejected.
    #[error("Invalid value for option '{option}': {message}")]
    InvalidValue { option: String, message: String },

    /// The option is not present in the option registry.
    #[error("Unrecognized option {option}. Expected one of {expected}.")]
    UnknownOption { option: String, expected: String },

    /// An entry-like mapping carried neither a `url` nor a `loc` key.
    #[error("Url not found in url object. Does it have a `loc` or `url`?")]
    MissingLocation,

    /// The option is already registered and overwrite was not requested.
    #[error("Option '{option}' already exists. Set overwrite to true or call remove_option first.")]
    DuplicateOption { option: String },

    /// The URL is already registered in the sitemap.
    #[error("{url} is already in the sitemap. To update options use set_option_value or set_option_values.")]
    DuplicateUrl { url: String },

    /// The URL is not registered in the sitemap.
    #[error("{url} not in sitemap")]
    NotFound { url: String },

    /// A file that should be linked or read does not exist on disk.
    #[error("Unable to resolve file {}", path.display())]
    FileNotFound { path: PathBuf },

    /// The nested-mapping tree does not have the sitemap shape.
    #[error("Malformed sitemap tree: {message}")]
    Tree { message: String },

    /// The XML text could not be read.
    #[error("XML parsing error at byte {position}: {message}")]
    XmlParse { position: u64, message: String },

    /// The build manifest is structurally valid YAML but not a valid manifest.
    #[error("Configuration parsing error: {message}")]
    ConfigParse { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
