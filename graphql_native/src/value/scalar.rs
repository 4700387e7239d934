use std::fmt;

use derive_more::with_trait::From;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

/// Native value produced by a scalar type.
///
/// Built-in scalars produce the first four variants; pass-through scalars
/// keep the raw JSON they received.
#[derive(Clone, Debug, From, PartialEq)]
pub enum ScalarValue {
    /// `Int`
    Int(i32),
    /// `Float`
    Float(f64),
    /// `String` and `ID`
    String(String),
    /// `Boolean`
    Boolean(bool),
    /// Any value of a pass-through scalar.
    Raw(JsonValue),
}

impl ScalarValue {
    /// Views the underlying integer, if this is an `Int`.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Views the underlying float, widening integers.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(f64::from(*i)),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Views the underlying string, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Raw(JsonValue::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Views the underlying boolean, if this is a `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Converts back to a JSON-safe value.
    ///
    /// Non-finite floats have no JSON form and become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Int(i) => JsonValue::from(*i),
            Self::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
            Self::String(s) => JsonValue::String(s.clone()),
            Self::Boolean(b) => JsonValue::Bool(*b),
            Self::Raw(v) => v.clone(),
        }
    }
}

impl<'a> From<&'a str> for ScalarValue {
    fn from(s: &'a str) -> Self {
        Self::String(s.into())
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Raw(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Int(i) => serializer.serialize_i32(*i),
            Self::Float(f) => serializer.serialize_f64(*f),
            Self::String(s) => serializer.serialize_str(s),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Raw(v) => v.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ScalarValue;

    #[test]
    fn converts_back_to_json() {
        assert_eq!(ScalarValue::Int(42).to_json(), json!(42));
        assert_eq!(ScalarValue::Float(1.5).to_json(), json!(1.5));
        assert_eq!(ScalarValue::Float(f64::NAN).to_json(), json!(null));
        assert_eq!(ScalarValue::from("Ada").to_json(), json!("Ada"));
        assert_eq!(ScalarValue::Boolean(true).to_json(), json!(true));
        assert_eq!(
            ScalarValue::Raw(json!({"lat": 1})).to_json(),
            json!({"lat": 1}),
        );
    }

    #[test]
    fn widens_int_to_float() {
        assert_eq!(ScalarValue::Int(3).as_float(), Some(3.0));
        assert_eq!(ScalarValue::String("3".into()).as_float(), None);
    }

    #[test]
    fn serializes_like_json() {
        let serialized = serde_json::to_string(&ScalarValue::from("x")).unwrap();
        assert_eq!(serialized, "\"x\"");
    }
}
