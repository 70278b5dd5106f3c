//! Forgiving field deserializers for documents written by the browser client.
//!
//! Stored records are not schema-checked: numbers sometimes arrive as strings,
//! lists as `null`, and older documents omit fields entirely. Each helper here
//! accepts any input and falls back to a neutral value instead of failing the
//! whole document.

use std::collections::BTreeMap;

use mongodb::bson::oid::ObjectId;
use serde::de::{Deserialize, Deserializer, IgnoredAny};

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl Scalar {
    fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) if v.is_finite() => Some(*v),
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    fn into_text(self) -> Option<String> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Int(v) => Some(v.to_string()),
            Scalar::Float(v) if v.is_finite() => Some(v.to_string()),
            Scalar::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Maybe<T> {
    Value(T),
    Other(IgnoredAny),
}

impl<T> Maybe<T> {
    fn into_option(self) -> Option<T> {
        match self {
            Maybe::Value(v) => Some(v),
            Maybe::Other(_) => None,
        }
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ListLike<T> {
    List(Vec<Maybe<T>>),
    Other(IgnoredAny),
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum MapLike<T> {
    Map(BTreeMap<String, Maybe<T>>),
    Other(IgnoredAny),
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum IdLike {
    Oid(ObjectId),
    Text(String),
    Int(i64),
    Other(IgnoredAny),
}

/// Any number or numeric string; everything else is `0.0`.
pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(Scalar::deserialize(d)?.as_number().unwrap_or(0.0))
}

/// A number when one is present, `None` otherwise.
pub fn optional_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Scalar::deserialize(d)?.as_number())
}

/// A non-negative whole count. Negative, fractional-below-one and
/// non-numeric values become `0`; fractions are truncated.
pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Scalar::deserialize(d)?.as_number().unwrap_or(0.0);
    if value <= 0.0 {
        Ok(0)
    } else if value >= u32::MAX as f64 {
        Ok(u32::MAX)
    } else {
        Ok(value.trunc() as u32)
    }
}

/// `true` only for an actual boolean `true`.
pub fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(optional_flag(d)?.unwrap_or(false))
}

pub fn optional_flag<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    match Scalar::deserialize(d)? {
        Scalar::Bool(b) => Ok(Some(b)),
        _ => Ok(None),
    }
}

/// Strings pass through, numbers and booleans are rendered, anything else is `None`.
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Scalar::deserialize(d)?.into_text())
}

/// Like [`text`] but yields an empty string for missing values.
pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(text(d)?.unwrap_or_default())
}

/// Document identifiers, either an `ObjectId` or a plain string.
pub fn identifier<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match IdLike::deserialize(d)? {
        IdLike::Oid(oid) => oid.to_hex(),
        IdLike::Text(s) => s,
        IdLike::Int(v) => v.to_string(),
        IdLike::Other(_) => String::new(),
    })
}

/// A list whose malformed elements are dropped. A non-list value is empty.
pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(optional_list(d)?.unwrap_or_default())
}

/// `None` when the value is not a list at all, so callers can tell
/// "nothing recorded" apart from "recorded and empty".
pub fn optional_list<'de, D, T>(d: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match ListLike::<T>::deserialize(d)? {
        ListLike::List(items) => Some(items.into_iter().filter_map(Maybe::into_option).collect()),
        ListLike::Other(_) => None,
    })
}

/// A nested object, or `None` when the value has some other shape.
pub fn optional_object<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Maybe::<T>::deserialize(d)?.into_option())
}

/// A string-keyed map whose malformed values are dropped. A non-map value is empty.
pub fn map<'de, D, T>(d: D) -> Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match MapLike::<T>::deserialize(d)? {
        MapLike::Map(entries) => entries
            .into_iter()
            .filter_map(|(k, v)| v.into_option().map(|v| (k, v)))
            .collect(),
        MapLike::Other(_) => BTreeMap::new(),
    })
}
