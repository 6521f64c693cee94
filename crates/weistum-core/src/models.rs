//! Record types as they appear in the dataset JSON.
//!
//! Field names follow the dataset (`titel`, `ort`, `zeit`, …). Scalar fields
//! are read leniently: numbers and booleans are kept as their string form,
//! `null` and nested values in scalar positions count as absent, as do
//! non-object values where an object is expected. Keys the
//! model does not know are kept in [`Record::extra`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Placeholder shown for missing optional fields.
pub const PLACEHOLDER: &str = "-";

/// One Weistum as authored in the dataset.
///
/// The derived time category is not part of this type; it lives on
/// [`Entry`](crate::catalog::Entry) and is computed once at load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(deserialize_with = "required_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub titel: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub ort: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub zeit: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub schreiberinfo: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub koordinaten: Option<Koordinaten>,
    #[serde(default, deserialize_with = "lenient_object", skip_serializing_if = "Option::is_none")]
    pub edition: Option<Edition>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub original_link: Option<String>,
    /// Keys not modelled above, kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Minimal record with only an id, mostly useful in tests.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            titel: None,
            ort: None,
            region: None,
            zeit: None,
            typ: None,
            schreiberinfo: None,
            text: None,
            koordinaten: None,
            edition: None,
            original_link: None,
            extra: Map::new(),
        }
    }

    /// Title, or the placeholder when absent.
    pub fn titel_or_placeholder(&self) -> &str {
        or_placeholder(&self.titel)
    }

    /// Edition reference (`edition.stelle`), or the placeholder.
    pub fn edition_stelle(&self) -> &str {
        self.edition
            .as_ref()
            .and_then(|e| e.stelle.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(PLACEHOLDER)
    }

    /// Coordinates as `(lat, lng)` when both are present and non-zero.
    pub fn position(&self) -> Option<(f64, f64)> {
        let k = self.koordinaten.as_ref()?;
        match (k.lat, k.lng) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some((lat, lng)),
            _ => None,
        }
    }
}

/// Returns the value, or [`PLACEHOLDER`] when it is absent or empty.
pub fn or_placeholder(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => PLACEHOLDER,
    }
}

/// Geographic position of the place a Weistum belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Koordinaten {
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// Source edition metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Edition {
    /// Citation within the edition (volume, page).
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub stelle: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn scalar_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_string))
}

fn required_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match scalar_string(value) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(serde::de::Error::custom("id must be a non-empty string or number")),
    }
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(object @ Value::Object(_)) => serde_json::from_value(object).ok(),
        _ => None,
    })
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
