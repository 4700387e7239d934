//! Built-in scalars and the conversions they apply to raw JSON.

use std::fmt;

use arcstr::ArcStr;
use serde_json::Value as JsonValue;

use crate::{
    schema::meta::{MetaType, ScalarMeta},
    value::ScalarValue,
};

/// Conversion from raw JSON into a native scalar value.
///
/// The error is a human-readable reason, wrapped into
/// [`SchemaError::InvalidValue`](crate::SchemaError::InvalidValue) by the
/// caller.
pub type ScalarParseFn = fn(&JsonValue) -> Result<ScalarValue, ArcStr>;

/// Host primitive standing in for one of the built-in scalars.
///
/// Used wherever a type is expected, so that `Primitive::String` reads the
/// same as referencing the `String` scalar by name.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Primitive {
    /// `Int`
    Int,
    /// `Float`
    Float,
    /// `String`
    String,
    /// `Boolean`
    Boolean,
    /// `ID`
    Id,
}

impl Primitive {
    /// Name of the built-in scalar this primitive maps to.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::String => "String",
            Self::Boolean => "Boolean",
            Self::Id => "ID",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Descriptors registered by [`Schema::new()`](crate::Schema::new).
pub(crate) fn builtin_scalars() -> [MetaType; 5] {
    [
        ScalarMeta::with_parser(arcstr::literal!("Int"), parse_int).into_meta(),
        ScalarMeta::with_parser(arcstr::literal!("Float"), parse_float).into_meta(),
        ScalarMeta::with_parser(arcstr::literal!("String"), parse_string).into_meta(),
        ScalarMeta::with_parser(arcstr::literal!("Boolean"), parse_boolean).into_meta(),
        ScalarMeta::with_parser(arcstr::literal!("ID"), parse_string).into_meta(),
    ]
}

pub(crate) fn parse_raw(value: &JsonValue) -> Result<ScalarValue, ArcStr> {
    Ok(ScalarValue::Raw(value.clone()))
}

fn parse_int(value: &JsonValue) -> Result<ScalarValue, ArcStr> {
    let wide = match value {
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => n
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
                .ok_or(arcstr::literal!("not an integer"))?,
        },
        JsonValue::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| arcstr::literal!("not an integer"))?,
        JsonValue::Bool(b) => i64::from(*b),
        _ => return Err(arcstr::literal!("not an integer")),
    };
    i32::try_from(wide)
        .map(ScalarValue::Int)
        .map_err(|_| arcstr::literal!("integer out of range"))
}

fn parse_float(value: &JsonValue) -> Result<ScalarValue, ArcStr> {
    let f = match value {
        JsonValue::Number(n) => n.as_f64().ok_or(arcstr::literal!("not a float"))?,
        JsonValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| arcstr::literal!("not a float"))?,
        JsonValue::Bool(b) => f64::from(u8::from(*b)),
        _ => return Err(arcstr::literal!("not a float")),
    };
    Ok(ScalarValue::Float(f))
}

/// Strings pass through, any other value is kept as its compact JSON text.
fn parse_string(value: &JsonValue) -> Result<ScalarValue, ArcStr> {
    Ok(ScalarValue::String(match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }))
}

/// Truthiness: empty strings, zero, empty lists and objects are `false`.
fn parse_boolean(value: &JsonValue) -> Result<ScalarValue, ArcStr> {
    Ok(ScalarValue::Boolean(match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }))
}
