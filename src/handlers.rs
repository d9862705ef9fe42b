//! Built-in option value handlers.
//!
//! A handler turns a raw [`OptionValue`] into the string that is stored on a
//! URL entry and written to the XML. Handlers are pure and deterministic
//! (apart from `lastmod` reading the clock for "today") and report invalid
//! input as typed errors instead of coercing it.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::{Error, Result};
use crate::value::OptionValue;

/// Name of the last-modified option.
pub const LASTMOD: &str = "lastmod";
/// Name of the change-frequency option.
pub const CHANGEFREQ: &str = "changefreq";
/// Name of the priority option.
pub const PRIORITY: &str = "priority";

/// Values accepted by the `changefreq` handler.
pub const CHANGEFREQ_VALUES: [&str; 7] = [
    "always", "hourly", "daily", "weekly", "monthly", "yearly", "never",
];

/// Format a date as `YYYY-MM-DD`.
///
/// The month and day are zero-padded to two digits; the year is written as
/// is.
pub fn w3_date<D: Datelike>(date: &D) -> String {
    format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Normalize a `lastmod` value.
///
/// - `Null` or the token `"now"` become today's date.
/// - A date is formatted with [`w3_date`].
/// - Any other string is passed through unvalidated.
///
/// Numbers and booleans fail with [`Error::InvalidType`].
pub fn handle_lastmod(value: &OptionValue) -> Result<String> {
    match value {
        OptionValue::Null => Ok(w3_date(&today())),
        OptionValue::Text(text) if text == "now" => Ok(w3_date(&today())),
        OptionValue::Text(text) => Ok(text.clone()),
        OptionValue::Date(date) => Ok(w3_date(date)),
        other => Err(Error::InvalidType {
            option: LASTMOD.to_string(),
            expected: "a date or string".to_string(),
            found: other.type_name().to_string(),
        }),
    }
}

/// Normalize a `changefreq` value. Only the values in
/// [`CHANGEFREQ_VALUES`] are accepted; they are returned unchanged.
pub fn handle_changefreq(value: &OptionValue) -> Result<String> {
    match value {
        OptionValue::Text(text) if CHANGEFREQ_VALUES.contains(&text.as_str()) => Ok(text.clone()),
        other => Err(Error::InvalidValue {
            option: CHANGEFREQ.to_string(),
            message: format!(
                "unrecognized changefreq value {}, expected one of {}",
                other,
                CHANGEFREQ_VALUES.join(", ")
            ),
        }),
    }
}

/// Normalize a `priority` value: a number in `[0, 1]`, returned as its
/// shortest decimal representation (`0.5` -> `"0.5"`, `1` -> `"1"`).
pub fn handle_priority(value: &OptionValue) -> Result<String> {
    match value {
        OptionValue::Number(priority) if (0.0..=1.0).contains(priority) => {
            // Avoid rendering negative zero as "-0"
            Ok((priority + 0.0).to_string())
        }
        other => Err(Error::InvalidValue {
            option: PRIORITY.to_string(),
            message: format!("priority must be a number between 0 and 1, found {}", other),
        }),
    }
}
