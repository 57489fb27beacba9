//! Lenient field decoders for store rows.
//!
//! Stores hand back whatever was written by the data-entry forms. Blank
//! strings are treated as absent, times may or may not carry seconds, and a
//! value that cannot be read at all (a zoned `timetz`, free text, a stray
//! number) decodes as absent. The validation rules then report the field as
//! missing instead of the whole row failing to load.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, de::IgnoredAny};

/// A scalar that may arrive as a JSON number, a JSON string, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

/// The trimmed, non-blank text of a scalar, if it is a string.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

/// Decode `YYYY-MM-DD`; anything else is absent.
pub(crate) fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()))
}

/// Decode `HH:MM` or `HH:MM:SS[.fff]`; anything else is absent.
pub(crate) fn optional_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.and_then(|s| parse_time(&s)))
}

/// Decode a price given as a number or a numeric string; anything else is absent.
pub(crate) fn optional_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Int(n)) => Some(n as f64),
        Some(NumberOrText::Float(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(NumberOrText::Other(_)) | None => None,
    })
}

/// Decode a row identifier given as a number or a string.
pub(crate) fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        None => None,
        Some(NumberOrText::Int(n)) => Some(n.to_string()),
        Some(NumberOrText::Float(n)) => Some(n.to_string()),
        Some(NumberOrText::Text(s)) => Some(s),
        Some(NumberOrText::Other(_)) => None,
    })
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .ok()
}
