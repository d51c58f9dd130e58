//! Page envelope parsing.
//!
//! Every response wraps its payload in one dataset-specific top-level key:
//! `{ "<service>": { "list_total_count": N, "row": [ ... ] } }`. The key is
//! carried out explicitly rather than trusting map iteration order.

use serde_json::Value;

use crate::record::{record_from_object, Record};

/// Why a response body could not be read as a page.
#[derive(Debug)]
pub enum EnvelopeError {
    /// Body root is not a JSON object.
    NotAnObject,
    /// Multiple (or zero) top-level keys and no service name to pick by.
    AmbiguousRoot(usize),
    /// The expected service key is absent from the root object.
    ServiceMissing(String),
    /// `list_total_count` or `row` absent or of the wrong shape.
    FieldMissing(&'static str),
    /// `list_total_count` is neither an integer nor a string of digits.
    BadCount(String),
}

impl std::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "response body is not a JSON object"),
            Self::AmbiguousRoot(n) => {
                write!(f, "expected a single top-level key, found {n}")
            }
            Self::ServiceMissing(name) => write!(f, "no '{name}' key in response"),
            Self::FieldMissing(field) => write!(f, "no '{field}' in payload"),
            Self::BadCount(raw) => write!(f, "unreadable list_total_count: {raw}"),
        }
    }
}

impl std::error::Error for EnvelopeError {}

/// One parsed page.
#[derive(Debug)]
pub struct Envelope {
    /// Top-level key the payload arrived under.
    pub service: String,
    /// `list_total_count` as reported by the API.
    pub total_count: u64,
    pub rows: Vec<Record>,
}

impl Envelope {
    /// Parse a response body.
    ///
    /// `service` is the expected top-level key; when `None`, the root must
    /// contain exactly one entry and that entry is taken.
    pub fn parse(body: Value, service: Option<&str>) -> Result<Self, EnvelopeError> {
        let root = match body {
            Value::Object(map) => map,
            _ => return Err(EnvelopeError::NotAnObject),
        };
        let n_keys = root.len();

        let (key, payload) = match service {
            Some(name) => {
                let mut root = root;
                let payload = root
                    .remove(name)
                    .ok_or_else(|| EnvelopeError::ServiceMissing(name.to_string()))?;
                (name.to_string(), payload)
            }
            None => {
                let mut entries = root.into_iter();
                match (entries.next(), entries.next()) {
                    (Some((key, payload)), None) => (key, payload),
                    _ => return Err(EnvelopeError::AmbiguousRoot(n_keys)),
                }
            }
        };

        let mut payload = match payload {
            Value::Object(map) => map,
            _ => return Err(EnvelopeError::FieldMissing("list_total_count")),
        };

        let count = payload
            .remove("list_total_count")
            .ok_or(EnvelopeError::FieldMissing("list_total_count"))?;
        let total_count = parse_count(count)?;

        let entries = match payload.remove("row") {
            Some(Value::Array(entries)) => entries,
            _ => return Err(EnvelopeError::FieldMissing("row")),
        };

        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            match entry {
                Value::Object(obj) => rows.push(record_from_object(obj)),
                other => log::debug!("ignoring non-object row entry: {other}"),
            }
        }

        Ok(Self {
            service: key,
            total_count,
            rows,
        })
    }
}

/// The portal reports the count as an integer; some datasets serve it as a
/// string of digits.
fn parse_count(v: Value) -> Result<u64, EnvelopeError> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| EnvelopeError::BadCount(n.to_string())),
        Value::String(s) => s.trim().parse().map_err(|_| EnvelopeError::BadCount(s)),
        other => Err(EnvelopeError::BadCount(other.to_string())),
    }
}
