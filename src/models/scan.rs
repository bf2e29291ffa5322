//! Input models for one completed header scan.
//!
//! The header-fetching executable runs out of process and reports the headers
//! it observed as a JSON blob; these types are its deserialized form plus the
//! ordered, case-insensitive header collection the evaluator consumes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scanner output for one target URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanReport {
    pub target_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned_at: Option<DateTime<Utc>>,
    /// Response headers observed on the target, in report order.
    ///
    /// Kept as ordered pairs rather than a map: duplicate names (including
    /// case variants) must resolve first-match-wins deterministically.
    #[serde(with = "ordered_headers")]
    pub present_headers: Vec<(String, String)>,
    /// Security headers the scanner expected but did not find.
    #[serde(default)]
    pub missing_headers: Vec<String>,
    /// Headers leaking server/framework details (Server, X-Powered-By, ...).
    #[serde(default)]
    pub information_disclosure: HashMap<String, String>,
    /// Caching-related headers, reported for context only.
    #[serde(default)]
    pub caching_headers: HashMap<String, String>,
}

impl ScanReport {
    /// The observed headers as the evaluator's lookup structure.
    pub fn headers(&self) -> ScanHeaders {
        self.present_headers
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

/// JSON-object representation for ordered header pairs.
mod ordered_headers {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        headers: &[(String, String)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(headers.len()))?;
        for (name, value) in headers {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, String)>, D::Error> {
        struct OrderedHeadersVisitor;

        impl<'de> Visitor<'de> for OrderedHeadersVisitor {
            type Value = Vec<(String, String)>;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of header names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry()? {
                    entries.push((name, value));
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(OrderedHeadersVisitor)
    }
}

/// Ordered header-name/value pairs with case-insensitive lookup.
///
/// Duplicate names are kept; `get` returns the first match, mirroring how
/// the consuming code treats repeated response headers.
#[derive(Debug, Clone, Default)]
pub struct ScanHeaders {
    entries: Vec<(String, String)>,
}

impl ScanHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Case-insensitive lookup; first match wins when a name repeats.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ScanHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}
