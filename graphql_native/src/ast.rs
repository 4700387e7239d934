use std::fmt;

use arcstr::ArcStr;
use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::{
    error::SchemaError,
    schema::meta::{Field, MetaType},
    value::{ScalarValue, Value},
};

/// A GraphQL input literal, as used for argument values and defaults.
///
/// Unlike [`Value`] it is not bound to a type: enums are bare names, objects
/// are keyed by attribute names and values may refer to variables. Typed
/// rendering goes through [`Printer`](crate::Printer).
#[derive(Clone, Debug, PartialEq)]
#[expect(missing_docs, reason = "self-explanatory")]
pub enum InputValue {
    Null,
    Scalar(ScalarValue),
    Enum(String),
    Variable(String),
    List(Vec<InputValue>),
    Object(IndexMap<String, InputValue>),
}

impl InputValue {
    /// Construct a `null` value.
    pub fn null() -> Self {
        Self::Null
    }

    /// Construct a scalar value.
    pub fn scalar<T>(v: T) -> Self
    where
        ScalarValue: From<T>,
    {
        Self::Scalar(v.into())
    }

    /// Construct an enum value.
    pub fn enum_value<T: AsRef<str>>(s: T) -> Self {
        Self::Enum(s.as_ref().into())
    }

    /// Construct a variable value.
    pub fn variable<T: AsRef<str>>(v: T) -> Self {
        Self::Variable(v.as_ref().into())
    }

    /// Construct a list.
    pub fn list(l: Vec<Self>) -> Self {
        Self::List(l)
    }

    /// Construct an object keyed by attribute names.
    pub fn object<K: AsRef<str>>(o: IndexMap<K, Self>) -> Self {
        Self::Object(o.into_iter().map(|(k, v)| (k.as_ref().into(), v)).collect())
    }

    /// Construct an object from key-value pairs, keeping their order.
    pub fn from_pairs(o: Vec<(String, Self)>) -> Self {
        Self::Object(o.into_iter().collect())
    }

    /// Builds a literal out of plain JSON.
    ///
    /// Integers fitting into an `Int` stay integers, other numbers become
    /// floats.
    pub fn from_json(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(b) => Self::scalar(b),
            JsonValue::Number(n) => match n.as_i64().and_then(|i| i32::try_from(i).ok()) {
                Some(i) => Self::scalar(i),
                None => n.as_f64().map_or(Self::Null, Self::scalar),
            },
            JsonValue::String(s) => Self::scalar(s),
            JsonValue::Array(a) => Self::List(a.into_iter().map(Self::from_json).collect()),
            JsonValue::Object(o) => {
                Self::Object(o.into_iter().map(|(k, v)| (k, Self::from_json(v))).collect())
            }
        }
    }

    /// Converts to JSON, or [`None`] if a variable occurs anywhere inside.
    ///
    /// Enum values become strings.
    pub fn to_json(&self) -> Option<JsonValue> {
        Some(match self {
            Self::Null => JsonValue::Null,
            Self::Scalar(s) => s.to_json(),
            Self::Enum(e) => JsonValue::String(e.clone()),
            Self::Variable(_) => return None,
            Self::List(l) => JsonValue::Array(l.iter().map(Self::to_json).collect::<Option<_>>()?),
            Self::Object(o) => JsonValue::Object(
                o.iter()
                    .map(|(k, v)| Some((k.clone(), v.to_json()?)))
                    .collect::<Option<JsonMap<_, _>>>()?,
            ),
        })
    }

    /// Does the value represent a `null`?
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Does the value represent a variable?
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// View the underlying enum value, if present.
    pub fn as_enum_value(&self) -> Option<&str> {
        match self {
            Self::Enum(e) => Some(e.as_str()),
            _ => None,
        }
    }

    /// View the underlying scalar value, if present.
    pub fn as_scalar(&self) -> Option<&ScalarValue> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// View the underlying string value, if present.
    pub fn as_string_value(&self) -> Option<&str> {
        self.as_scalar().and_then(ScalarValue::as_str)
    }

    /// View the underlying object, if present.
    pub fn to_object_value(&self) -> Option<IndexMap<&str, &Self>> {
        match self {
            Self::Object(o) => Some(o.iter().map(|(k, v)| (k.as_str(), v)).collect()),
            _ => None,
        }
    }

    /// View the underlying list, if present.
    pub fn to_list_value(&self) -> Option<Vec<&Self>> {
        match self {
            Self::List(l) => Some(l.iter().collect()),
            _ => None,
        }
    }

    /// Recursively finds all variables
    pub fn referenced_variables(&self) -> Vec<&str> {
        match self {
            Self::Variable(name) => vec![name.as_str()],
            Self::List(l) => l.iter().flat_map(Self::referenced_variables).collect(),
            Self::Object(o) => o.values().flat_map(Self::referenced_variables).collect(),
            _ => vec![],
        }
    }
}

/// Untyped rendering: strings are quoted, enums are bare.
impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Scalar(s) => write!(f, "{}", s.to_json()),
            Self::Enum(v) => write!(f, "{v}"),
            Self::Variable(v) => write!(f, "${v}"),
            Self::List(v) => {
                write!(f, "[")?;
                for (i, item) in v.iter().enumerate() {
                    item.fmt(f)?;
                    if i < v.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
            Self::Object(o) => {
                write!(f, "{{")?;
                for (i, (k, v)) in o.iter().enumerate() {
                    write!(f, "{k}: ")?;
                    v.fmt(f)?;
                    if i < o.len() - 1 {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

impl<T> From<Option<T>> for InputValue
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

impl<'a> From<&'a str> for InputValue {
    fn from(s: &'a str) -> Self {
        Self::scalar(s.to_owned())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        Self::scalar(s)
    }
}

impl From<i32> for InputValue {
    fn from(i: i32) -> Self {
        Self::scalar(i)
    }
}

impl From<f64> for InputValue {
    fn from(f: f64) -> Self {
        Self::scalar(f)
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        Self::scalar(b)
    }
}

impl From<ScalarValue> for InputValue {
    fn from(s: ScalarValue) -> Self {
        Self::Scalar(s)
    }
}

impl From<Variable> for InputValue {
    fn from(v: Variable) -> Self {
        Self::Variable(v.0.as_str().into())
    }
}

/// Decoded values can be passed back as arguments; objects keep their
/// materialized attributes.
impl<'a> From<&'a Value> for InputValue {
    fn from(v: &'a Value) -> Self {
        match v {
            Value::Null => Self::Null,
            Value::Scalar(s) => Self::Scalar(s.clone()),
            Value::Enum(e) => Self::Enum(e.as_str().into()),
            Value::List(l) => Self::List(l.iter().map(Self::from).collect()),
            Value::Object(o) => {
                Self::Object(o.iter().map(|(k, v)| (k.as_str().into(), Self::from(v))).collect())
            }
        }
    }
}

/// A named reference to an operation variable, rendered as `$name`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Variable(ArcStr);

impl Variable {
    /// Creates a reference to the variable `name`.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self(name.into())
    }

    /// Name without the `$` sigil.
    pub fn name(&self) -> &ArcStr {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// One requested field of a result, optionally aliased, with its own nested
/// selections.
///
/// When decoding with a selection list, only the selected fields are read,
/// each from its wire name, and stored under [`attribute_name()`].
///
/// [`attribute_name()`]: Selection::attribute_name
#[derive(Clone, Debug)]
pub struct Selection {
    /// Selected field.
    pub field: Field,
    /// Attribute name to store the value under instead of the field name.
    pub alias: Option<ArcStr>,
    /// Nested selections, for fields of container types.
    pub selections: Option<Vec<Selection>>,
}

impl Selection {
    /// Selects `field` without alias nor nested selections.
    pub fn new(field: &Field) -> Self {
        Self {
            field: field.clone(),
            alias: None,
            selections: None,
        }
    }

    /// Selects the field `name` of the container type `ty`.
    pub fn of(ty: &MetaType, name: &str) -> Result<Self, SchemaError> {
        ty.field(name).map(Self::new)
    }

    /// Sets the alias.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<ArcStr>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the nested selections.
    #[must_use]
    pub fn with_selections(mut self, selections: Vec<Selection>) -> Self {
        self.selections = Some(selections);
        self
    }

    /// Name the decoded value is stored under.
    pub fn attribute_name(&self) -> &ArcStr {
        self.alias.as_ref().unwrap_or_else(|| self.field.name())
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use serde_json::json;

    use crate::graphql_input_value;

    use super::{InputValue, Variable};

    #[test]
    fn test_input_value_fmt() {
        let value: InputValue = graphql_input_value!(null);
        assert_eq!(value.to_string(), "null");

        let value: InputValue = graphql_input_value!(123);
        assert_eq!(value.to_string(), "123");

        let value: InputValue = graphql_input_value!(12.3);
        assert_eq!(value.to_string(), "12.3");

        let value: InputValue = graphql_input_value!("FOO");
        assert_eq!(value.to_string(), "\"FOO\"");

        let value: InputValue = graphql_input_value!(true);
        assert_eq!(value.to_string(), "true");

        let value: InputValue = graphql_input_value!(BAR);
        assert_eq!(value.to_string(), "BAR");

        let value: InputValue = graphql_input_value!(@baz);
        assert_eq!(value.to_string(), "$baz");

        let value: InputValue = graphql_input_value!([1, 2]);
        assert_eq!(value.to_string(), "[1, 2]");

        let value: InputValue = graphql_input_value!({"foo": 1,"bar": 2});
        assert_eq!(value.to_string(), "{foo: 1, bar: 2}");
    }

    #[test]
    fn variable_renders_with_sigil() {
        let var = Variable::new("first");
        assert_eq!(var.to_string(), "$first");
        assert_eq!(InputValue::from(var), InputValue::variable("first"));
    }

    #[test]
    fn json_conversions() {
        let value = InputValue::from_json(json!({"a": [1, 2.5, "x"], "b": null}));
        assert_eq!(value.to_string(), "{a: [1, 2.5, \"x\"], b: null}");
        assert_eq!(value.to_json(), Some(json!({"a": [1, 2.5, "x"], "b": null})));

        let mut map = IndexMap::new();
        map.insert("ep", InputValue::enum_value("JEDI"));
        map.insert("after", InputValue::variable("cursor"));
        let value = InputValue::object(map);
        assert_eq!(value.to_json(), None);
        assert_eq!(value.referenced_variables(), vec!["cursor"]);
    }
}
