//! Tagged value variant for call arguments and nested fields.
//!
//! # Responsibility
//! - Represent every renderable argument shape with one exhaustive enum.
//! - Provide ergonomic conversions from common Rust scalars.
//!
//! # Invariants
//! - A value's shape is fixed at construction and never reinterpreted.
//! - `Object` keeps `(field, value)` pairs in declaration order, because
//!   positional INSERT expansion depends on it.

use serde::{Deserialize, Serialize};

/// Call argument or nested field content.
///
/// The integer/real split mirrors SQLite storage classes so numeric
/// literals keep their exact textual form when rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Absent/null-like argument. Renders as the SQL `null` literal.
    Null,
    /// Signed integer scalar.
    Integer(i64),
    /// Floating point scalar.
    Real(f64),
    /// Boolean scalar. Renders unquoted as `true`/`false`.
    Bool(bool),
    /// Text scalar. Renders as a single-quoted, escaped SQL literal.
    Text(String),
    /// Ordered list, rendered as an SQL value list `(e1,e2,...)`.
    Sequence(Vec<Value>),
    /// Structured record with ordered fields, used for whole-object
    /// INSERT-row expansion and `:root.property` access.
    Object(Vec<(String, Value)>),
}

impl Value {
    /// Builds an object value from ordered `(field, value)` pairs.
    pub fn object<S: Into<String>>(fields: Vec<(S, Value)>) -> Self {
        Self::Object(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Returns a named field of an object value, if present.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Object(fields) => fields
                .iter()
                .find(|(field, _)| field == name)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Returns the variant name used in diagnostics and error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Sequence(_) => "sequence",
            Self::Object(_) => "object",
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Sequence(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(inner) => inner.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn object_preserves_field_declaration_order() {
        let value = Value::object(vec![
            ("name", Value::from("Bob")),
            ("age", Value::from(30)),
        ]);

        let Value::Object(fields) = &value else {
            panic!("expected object value");
        };
        assert_eq!(fields[0].0, "name");
        assert_eq!(fields[1].0, "age");
    }

    #[test]
    fn field_lookup_returns_declared_value() {
        let value = Value::object(vec![("id", Value::from(7))]);
        assert_eq!(value.field("id"), Some(&Value::Integer(7)));
        assert_eq!(value.field("missing"), None);
        assert_eq!(Value::from(1).field("id"), None);
    }

    #[test]
    fn option_conversion_maps_none_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }
}
