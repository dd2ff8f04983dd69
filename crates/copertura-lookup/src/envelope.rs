//! The `{ "Body": ... }` envelope every coverage endpoint responds with.
//!
//! The upstream is inconsistent about how it says "nothing": sometimes
//! `"Body": []`, sometimes `"Body": null`. Both collapse into
//! [`Envelope::Empty`] here so no caller has to care which one it got.

use serde_json::Value;

/// Parsed envelope of one upstream response.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `Body` carried a non-empty array or an object.
    Found(Value),
    /// `Body` was `null` or `[]`.
    Empty,
    /// Not JSON, no `Body` key, or a `Body` of a type no endpoint returns.
    Malformed(String),
}

impl Envelope {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => return Self::Malformed(format!("invalid JSON: {e}")),
        };

        let Some(body) = value.as_object_mut().and_then(|o| o.remove("Body")) else {
            return Self::Malformed("missing `Body` field".to_string());
        };

        if body.is_null() || body.as_array().is_some_and(Vec::is_empty) {
            return Self::Empty;
        }
        if body.is_array() || body.is_object() {
            return Self::Found(body);
        }
        Self::Malformed(format!("unexpected `Body` type: {}", json_type(&body)))
    }
}

/// Which candidate a stage keeps when the upstream returns several matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidatePolicy {
    /// Keep the first candidate in upstream order. No ranking is attempted.
    FirstMatch,
}

/// Tie-break used by the city, address and header stages.
pub const CANDIDATE_POLICY: CandidatePolicy = CandidatePolicy::FirstMatch;

impl CandidatePolicy {
    #[must_use]
    pub fn select<T>(self, candidates: &[T]) -> Option<&T> {
        match self {
            CandidatePolicy::FirstMatch => candidates.first(),
        }
    }
}

/// Views a found body as a candidate list. A bare object counts as a
/// single candidate.
#[must_use]
pub fn candidates(body: &Value) -> &[Value] {
    match body {
        Value::Array(items) => items,
        Value::Object(_) => std::slice::from_ref(body),
        _ => &[],
    }
}

/// Opaque upstream identifier (city code, Egon code, header ID).
///
/// The upstream sends these as either JSON strings or JSON numbers; both are
/// carried as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpaqueId(String);

impl OpaqueId {
    /// Reads an identifier from a JSON field. Missing, null, blank, or
    /// non-scalar values yield `None`.
    #[must_use]
    pub fn from_field(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.trim().to_string())),
            Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OpaqueId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for OpaqueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
