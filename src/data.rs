use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::PreviewResult;

/// A value that can be written into a placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Integer(n) => write!(f, "{}", n),
            // 3.0 prints as "3", the way the editor UI shows numbers
            Scalar::Float(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Scalar::Float(n) => write!(f, "{}", n),
        }
    }
}

/// A top-level entry of a [`DataRecord`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    /// Rows consumed by an `{{#each key}}` block
    List(Vec<RowRecord>),
    /// Booleans, nulls, objects and lists of non-objects. Never substituted.
    Other(serde_json::Value),
}

impl Value {
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RowRecord]> {
        match self {
            Value::List(rows) => Some(rows),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Integer(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Integer(n.into())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Float(n)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

macro_rules! value_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Scalar(v.into())
                }
            }
        )*
    };
}

value_from_scalar!(&str, String, i64, i32, f64);

/// One row of a list: a flat field -> value mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowRecord(HashMap<String, Value>);

impl RowRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Field value, if present and a scalar
    pub fn scalar(&self, field: &str) -> Option<&Scalar> {
        self.0.get(field).and_then(Value::as_scalar)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RowRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        RowRecord(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Data rendered into a template: sample data at design time, or a
/// client/contract record when previewing a specific document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataRecord(HashMap<String, Value>);

impl DataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> PreviewResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> PreviewResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert_list(&mut self, key: impl Into<String>, rows: Vec<RowRecord>) -> &mut Self {
        self.0.insert(key.into(), Value::List(rows));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn scalar(&self, key: &str) -> Option<&Scalar> {
        self.0.get(key).and_then(Value::as_scalar)
    }

    pub fn list(&self, key: &str) -> Option<&[RowRecord]> {
        self.0.get(key).and_then(Value::as_list)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        DataRecord(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::from("Acme").to_string(), "Acme");
        assert_eq!(Scalar::from(42).to_string(), "42");
        assert_eq!(Scalar::from(3.0).to_string(), "3");
        assert_eq!(Scalar::from(1250.5).to_string(), "1250.5");
    }

    #[test]
    fn test_json_record() {
        let record = DataRecord::from_json_str(
            r#"{
                "clientName": "Acme",
                "total": 1200,
                "rate": 12.5,
                "signed": false,
                "rows": [{"label": "Item 1"}, {"label": "Item 2", "qty": 3}]
            }"#,
        )
        .unwrap();

        assert_eq!(record.scalar("clientName"), Some(&Scalar::from("Acme")));
        assert_eq!(record.scalar("total"), Some(&Scalar::Integer(1200)));
        assert_eq!(record.scalar("rate"), Some(&Scalar::Float(12.5)));
        assert!(matches!(record.get("signed"), Some(Value::Other(_))));

        let rows = record.list("rows").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].scalar("qty"), Some(&Scalar::Integer(3)));
    }

    #[test]
    fn test_yaml_record() {
        let yaml = "clientName: Acme\nsignatories:\n  - name: Ann\n  - name: Bob\n";
        let record = DataRecord::from_yaml_str(yaml).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.list("signatories").unwrap().len(), 2);
    }

    #[test]
    fn test_list_of_strings_is_not_rows() {
        let record = DataRecord::from_json_str(r#"{"tags": ["a", "b"]}"#).unwrap();
        assert!(record.list("tags").is_none());
        assert!(matches!(record.get("tags"), Some(Value::Other(_))));
    }

    #[test]
    fn test_builder() {
        let mut record = DataRecord::new();
        record
            .insert("clientName", "Acme")
            .insert_list("rows", vec![RowRecord::from_iter([("label", "A")])]);
        assert_eq!(record.scalar("clientName"), Some(&Scalar::from("Acme")));
        assert_eq!(
            record.list("rows").unwrap()[0].scalar("label"),
            Some(&Scalar::from("A"))
        );
    }
}
