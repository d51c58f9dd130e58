//! Record and scalar value types for untyped API payloads.
//!
//! The portal serves flat rows whose schema is decided entirely by the
//! dataset; rows are kept as maps from field name to a small scalar variant
//! so the CSV export stays deterministic.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

/// One field value. Nested JSON is stringified on ingest.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn from_value(v: Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        }
    }

    /// CSV cell rendering. Null is an empty cell.
    pub fn render(&self) -> Cow<'_, str> {
        match self {
            Self::Null => Cow::Borrowed(""),
            Self::Bool(b) => Cow::Owned(b.to_string()),
            Self::Number(n) => Cow::Owned(n.to_string()),
            Self::Text(s) => Cow::Borrowed(s),
        }
    }
}

/// A row as served by the API: field name to scalar value.
pub type Record = BTreeMap<String, Scalar>;

/// Convert one JSON row object into a [`Record`].
pub fn record_from_object(obj: serde_json::Map<String, Value>) -> Record {
    obj.into_iter()
        .map(|(k, v)| (k, Scalar::from_value(v)))
        .collect()
}

/// Union of field names across all records, in sorted name order.
pub fn column_union(records: &[Record]) -> Vec<String> {
    let mut columns: BTreeSet<&str> = BTreeSet::new();
    for record in records {
        columns.extend(record.keys().map(String::as_str));
    }
    columns.into_iter().map(String::from).collect()
}

/// Ordering for sort keys: numbers numerically, strings lexicographically,
/// mixed variants by rank (null < bool < number < string). No cross-variant
/// coercion.
pub fn compare(a: &Scalar, b: &Scalar) -> Ordering {
    match (a, b) {
        (Scalar::Number(x), Scalar::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Scalar::Text(x), Scalar::Text(y)) => x.cmp(y),
        (Scalar::Bool(x), Scalar::Bool(y)) => x.cmp(y),
        (Scalar::Null, Scalar::Null) => Ordering::Equal,
        _ => rank(a).cmp(&rank(b)),
    }
}

fn rank(s: &Scalar) -> u8 {
    match s {
        Scalar::Null => 0,
        Scalar::Bool(_) => 1,
        Scalar::Number(_) => 2,
        Scalar::Text(_) => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scalar(v: Value) -> Scalar {
        Scalar::from_value(v)
    }

    #[test]
    fn scalars_from_json() {
        assert_eq!(scalar(json!(null)), Scalar::Null);
        assert_eq!(scalar(json!(true)), Scalar::Bool(true));
        assert_eq!(scalar(json!("20241")), Scalar::Text("20241".to_string()));
        assert!(matches!(scalar(json!(42)), Scalar::Number(_)));
    }

    #[test]
    fn nested_values_stringified() {
        let s = scalar(json!({"a": 1}));
        assert_eq!(s, Scalar::Text("{\"a\":1}".to_string()));

        let s = scalar(json!([1, 2]));
        assert_eq!(s, Scalar::Text("[1,2]".to_string()));
    }

    #[test]
    fn render_cells() {
        assert_eq!(scalar(json!(null)).render(), "");
        assert_eq!(scalar(json!(false)).render(), "false");
        assert_eq!(scalar(json!(410)).render(), "410");
        assert_eq!(scalar(json!(4.5)).render(), "4.5");
        assert_eq!(scalar(json!("강남구")).render(), "강남구");
    }

    #[test]
    fn integer_rendering_unchanged() {
        // 410 must not come back as 410.0
        let s = scalar(json!(410));
        assert_eq!(s.render(), "410");
    }

    #[test]
    fn column_union_sorted() {
        let a: Record = record_from_object(
            json!({"B": 1, "A": 2}).as_object().cloned().unwrap_or_default(),
        );
        let b: Record = record_from_object(
            json!({"C": 3, "A": 4}).as_object().cloned().unwrap_or_default(),
        );
        assert_eq!(column_union(&[a, b]), vec!["A", "B", "C"]);
    }

    #[test]
    fn column_union_empty() {
        assert!(column_union(&[]).is_empty());
    }

    #[test]
    fn compare_numbers_numerically() {
        assert_eq!(compare(&scalar(json!(2)), &scalar(json!(10))), Ordering::Less);
        assert_eq!(compare(&scalar(json!(10)), &scalar(json!(2))), Ordering::Greater);
    }

    #[test]
    fn compare_strings_lexicographically() {
        // Quarter codes as strings sort by text, "10" before "2"
        assert_eq!(
            compare(&scalar(json!("10")), &scalar(json!("2"))),
            Ordering::Less
        );
    }

    #[test]
    fn compare_mixed_by_rank() {
        assert_eq!(compare(&Scalar::Null, &scalar(json!(1))), Ordering::Less);
        assert_eq!(
            compare(&scalar(json!("x")), &scalar(json!(1))),
            Ordering::Greater
        );
    }
}
