mod object;
mod scalar;

use std::fmt;

use arcstr::ArcStr;
use itertools::Itertools as _;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

pub use self::{object::Object, scalar::ScalarValue};

/// Native value decoded from a JSON result.
///
/// Objects are live: writing one of their fields updates the JSON they were
/// decoded from.
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum Value {
    Null,
    Scalar(ScalarValue),
    Enum(ArcStr),
    List(Vec<Value>),
    Object(Box<Object>),
}

impl Value {
    // CONSTRUCTORS

    /// Construct a null value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Construct a scalar value.
    pub fn scalar<T>(s: T) -> Self
    where
        ScalarValue: From<T>,
    {
        Self::Scalar(s.into())
    }

    /// Construct an enum value.
    pub fn enum_value(e: impl Into<ArcStr>) -> Self {
        Self::Enum(e.into())
    }

    /// Construct a list value.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Construct an object value.
    pub fn object(o: Object) -> Self {
        Self::Object(Box::new(o))
    }

    // DISCRIMINATORS

    /// Does this value represent null?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// View the underlying scalar value if present.
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// View the underlying string, for `String`, `ID` and enum values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => s.as_str(),
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// View the underlying integer, if present.
    pub fn as_int(&self) -> Option<i32> {
        self.as_scalar().and_then(ScalarValue::as_int)
    }

    /// View the underlying float, if present.
    pub fn as_float(&self) -> Option<f64> {
        self.as_scalar().and_then(ScalarValue::as_float)
    }

    /// View the underlying boolean, if present.
    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar().and_then(ScalarValue::as_bool)
    }

    /// View the underlying list value, if present.
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// View the underlying object value, if present.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Mutable view into the underlying object value, if present.
    ///
    /// Writes through it update the object's own JSON, but not the JSON of
    /// an enclosing object: use [`Object::update()`] on the enclosing one.
    pub fn as_mut_object(&mut self) -> Option<&mut Object> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Converts back to JSON, recursively.
    ///
    /// Objects only contribute their materialized fields, keyed by wire name.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Null => JsonValue::Null,
            Self::Scalar(s) => s.to_json(),
            Self::Enum(e) => JsonValue::String(e.as_str().into()),
            Self::List(l) => JsonValue::Array(l.iter().map(Self::to_json).collect()),
            Self::Object(o) => o.to_json(),
        }
    }

    /// Like [`Value::to_json()`], but objects contribute their whole backing
    /// JSON, keys never materialized included.
    pub(crate) fn to_backing_json(&self) -> JsonValue {
        match self {
            Self::List(l) => JsonValue::Array(l.iter().map(Self::to_backing_json).collect()),
            Self::Object(o) => JsonValue::Object(o.json().clone()),
            other => other.to_json(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Scalar(s) => write!(f, "{s}"),
            Self::Enum(e) => write!(f, "{e}"),
            Self::List(l) => write!(f, "[{}]", l.iter().format(", ")),
            Self::Object(o) => write!(f, "{o}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<T> From<Option<T>> for Value
where
    Self: From<T>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Self {
        Self::scalar(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::scalar(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::scalar(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::scalar(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::scalar(b)
    }
}

impl From<ScalarValue> for Value {
    fn from(s: ScalarValue) -> Self {
        Self::Scalar(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Self::object(o)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(l: Vec<T>) -> Self {
        Self::List(l.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use arcstr::literal;
    use serde_json::json;

    use super::Value;

    #[test]
    fn display() {
        assert_eq!(Value::null().to_string(), "null");
        assert_eq!(Value::from(123).to_string(), "123");
        assert_eq!(Value::from("foo").to_string(), "foo");
        assert_eq!(Value::enum_value("JEDI").to_string(), "JEDI");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
    }

    #[test]
    fn to_json() {
        let value = Value::list(vec![
            Value::from(1.5),
            Value::Enum(literal!("EMPIRE")),
            Value::from(None::<i32>),
            Value::from(true),
        ]);
        assert_eq!(value.to_json(), json!([1.5, "EMPIRE", null, true]));
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!([1.5, "EMPIRE", null, true]),
        );
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::from("Luke").as_str(), Some("Luke"));
        assert_eq!(Value::enum_value("JEDI").as_str(), Some("JEDI"));
        assert_eq!(Value::from(3).as_float(), Some(3.0));
        assert_eq!(Value::from(3).as_bool(), None);
        assert!(Value::from(vec![Value::Null]).as_list().is_some());
        assert!(Value::Null.as_object().is_none());
    }
}
