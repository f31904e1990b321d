use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single field matcher, e.g. `{"matcher": "exact", "value": "/users"}`.
///
/// The matcher kind and value are interpreted by the proxy's matching
/// engine; this crate only carries them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldMatcher {
    pub matcher: String,
    pub value: serde_json::Value,
}

impl FieldMatcher {
    pub fn new(matcher: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self { matcher: matcher.into(), value: value.into() }
    }

    /// Shorthand for an `exact` matcher on a string value.
    pub fn exact(value: impl Into<String>) -> Self {
        Self::new("exact", value.into())
    }

    /// The matcher value when it is a plain string.
    pub fn value_str(&self) -> Option<&str> {
        self.value.as_str()
    }
}

/// Request side of a pair: the set of field matchers a live request must
/// satisfy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMatcher {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<FieldMatcher>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub method: Vec<FieldMatcher>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub destination: Vec<FieldMatcher>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scheme: Vec<FieldMatcher>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<FieldMatcher>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<FieldMatcher>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Vec<FieldMatcher>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requires_state: BTreeMap<String, String>,
}

impl RequestMatcher {
    /// The URL this matcher targets, built from the first `destination` and
    /// first `path` values. Missing parts contribute an empty string.
    pub fn url(&self) -> String {
        let destination = first_str(&self.destination).unwrap_or_default();
        let path = first_str(&self.path).unwrap_or_default();
        format!("{destination}{path}")
    }
}

fn first_str(matchers: &[FieldMatcher]) -> Option<&str> {
    matchers.first().and_then(FieldMatcher::value_str)
}

/// Response side of a pair.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDetails {
    pub status: u16,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub encoded_body: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub templated: bool,
    /// Fixed delay in milliseconds applied before responding.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub fixed_delay: u64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub transitions_state: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removes_state: Vec<String>,
}

fn is_zero(v: &u64) -> bool {
    *v == 0
}

impl ResponseDetails {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            encoded_body: false,
            headers: BTreeMap::new(),
            templated: false,
            fixed_delay: 0,
            transitions_state: BTreeMap::new(),
            removes_state: Vec::new(),
        }
    }

    /// First value of a header, looked up case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }
}

/// One request-matcher/response entry of a simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    /// Opaque identifier. Empty means the pair is unmanaged.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub request: RequestMatcher,
    pub response: ResponseDetails,
}

impl Pair {
    /// Create an unmanaged pair.
    pub fn new(request: RequestMatcher, response: ResponseDetails) -> Self {
        Self { id: String::new(), request, response }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether the pair carries an identifier.
    pub fn is_managed(&self) -> bool {
        !self.id.is_empty()
    }

    /// Ownership test used by identity-based upsert and delete.
    ///
    /// True iff this pair's id is non-empty and equal to `id`. An unmanaged
    /// pair belongs to no identifier, including the empty one.
    pub fn belongs_to(&self, id: &str) -> bool {
        self.is_managed() && self.id == id
    }
}
