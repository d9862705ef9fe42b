//! Raw option values and ordered option mappings.
//!
//! Option handlers accept loosely typed input (a date, the token `"now"`, a
//! number for `priority`, a plain string for custom options). `OptionValue`
//! is the closed set of shapes such input can take, and `UrlOptions` is the
//! insertion-ordered mapping used both for a URL's options and for
//! entry-like structures that carry their location inline.

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::fmt;
use std::time::SystemTime;

use crate::handlers::w3_date;

/// A raw, not yet normalized option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// The clear sentinel. Normalizing it yields "no value", which removes
    /// the field from an entry.
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// A calendar date in local time.
    Date(NaiveDate),
}

impl OptionValue {
    /// Human readable name of the value's kind, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            OptionValue::Null => "null",
            OptionValue::Bool(_) => "boolean",
            OptionValue::Number(_) => "number",
            OptionValue::Text(_) => "string",
            OptionValue::Date(_) => "date",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, OptionValue::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OptionValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Null => f.write_str("null"),
            OptionValue::Bool(value) => write!(f, "{}", value),
            OptionValue::Number(value) => write!(f, "{}", value),
            OptionValue::Text(value) => f.write_str(value),
            OptionValue::Date(date) => f.write_str(&w3_date(date)),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<&String> for OptionValue {
    fn from(value: &String) -> Self {
        OptionValue::Text(value.clone())
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Number(value)
    }
}

impl From<i32> for OptionValue {
    fn from(value: i32) -> Self {
        OptionValue::Number(f64::from(value))
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<NaiveDate> for OptionValue {
    fn from(value: NaiveDate) -> Self {
        OptionValue::Date(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for OptionValue {
    fn from(value: DateTime<Tz>) -> Self {
        OptionValue::Date(value.with_timezone(&Local).date_naive())
    }
}

impl From<SystemTime> for OptionValue {
    fn from(value: SystemTime) -> Self {
        OptionValue::Date(DateTime::<Local>::from(value).date_naive())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(OptionValue::Null)
    }
}

/// An insertion-ordered mapping from option name to raw value.
///
/// Setting a key that is already present replaces its value in place, so the
/// key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UrlOptions {
    pairs: Vec<(String, OptionValue)>,
}

impl UrlOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Option<OptionValue> {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.pairs.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<OptionValue> {
        let index = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for UrlOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = UrlOptions::new();
        for (key, value) in iter {
            options.insert(key, value);
        }
        options
    }
}

impl<K: Into<String>, V: Into<OptionValue>, const N: usize> From<[(K, V); N]> for UrlOptions {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl IntoIterator for UrlOptions {
    type Item = (String, OptionValue);
    type IntoIter = std::vec::IntoIter<(String, OptionValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}
