//! Decoding of JSON results into native values.

use std::sync::Arc;

use arcstr::ArcStr;
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::trace;

use crate::{
    ast::Selection,
    error::SchemaError,
    schema::{
        meta::{ContainerMeta, Field, MetaType, UnionMeta, WrapMode, WrapperMeta},
        model::Schema,
    },
    value::{Object, Value},
};

impl Schema {
    /// Decodes `json` as a value of type `ty`.
    ///
    /// For containers, `selection` restricts decoding to the selected fields,
    /// each stored under its alias if any; without it every declared field
    /// present in `json` is decoded. Absent fields are never materialized.
    /// Lists pass `selection` on to each of their elements.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::NullNotAllowed`] for `null` given to a non-null type.
    /// - [`SchemaError::InvalidEnumValue`] for a string outside of the enum
    ///   choices.
    /// - [`SchemaError::InvalidValue`] for a JSON value of the wrong shape.
    /// - [`SchemaError::FieldDecodeFailure`] wrapping the first error met
    ///   while decoding a field of a container.
    /// - [`SchemaError::UnresolvedType`] for lazy references to unknown
    ///   types.
    pub fn decode(
        &self,
        ty: &Arc<MetaType>,
        json: JsonValue,
        selection: Option<&[Selection]>,
    ) -> Result<Value, SchemaError> {
        if json.is_null() && !matches!(**ty, MetaType::Wrapped(_)) {
            return Ok(Value::Null);
        }
        match &**ty {
            MetaType::Scalar(s) => (s.parse_fn)(&json)
                .map(Value::Scalar)
                .map_err(|reason| SchemaError::InvalidValue {
                    type_name: s.name.clone(),
                    value: json,
                    reason,
                }),
            MetaType::Enum(e) => match json.as_str().and_then(|v| e.choice(v)) {
                Some(choice) => Ok(Value::Enum(choice.clone())),
                None => Err(SchemaError::InvalidEnumValue {
                    enum_name: e.name.clone(),
                    value: json,
                }),
            },
            MetaType::Union(u) => self.decode_union(u, json, selection),
            MetaType::Object(c) | MetaType::Interface(c) | MetaType::InputObject(c) => self
                .decode_container(ty, c, json, selection)
                .map(Value::object),
            MetaType::Wrapped(wrapper) => self.decode_wrapped(wrapper, json, selection),
        }
    }

    fn decode_wrapped(
        &self,
        wrapper: &WrapperMeta,
        json: JsonValue,
        selection: Option<&[Selection]>,
    ) -> Result<Value, SchemaError> {
        match (wrapper.mode, json) {
            (WrapMode::NonNull, JsonValue::Null) => {
                Err(SchemaError::NullNotAllowed(wrapper.name.clone()))
            }
            (WrapMode::NonNull, json) => {
                let of_type = self.resolve(&wrapper.of_type)?;
                self.decode(&of_type, json, selection)
            }
            (WrapMode::List, JsonValue::Null) => Ok(Value::Null),
            (WrapMode::List, JsonValue::Array(items)) => {
                let of_type = self.resolve(&wrapper.of_type)?;
                items
                    .into_iter()
                    .map(|item| self.decode(&of_type, item, selection))
                    .collect::<Result<_, _>>()
                    .map(Value::List)
            }
            (WrapMode::List, json) => Err(SchemaError::invalid_value(
                &wrapper.name,
                &json,
                "expected a list",
            )),
        }
    }

    /// Unions are resolved through the `__typename` of the result.
    fn decode_union(
        &self,
        union: &UnionMeta,
        json: JsonValue,
        selection: Option<&[Selection]>,
    ) -> Result<Value, SchemaError> {
        let member = json
            .get("__typename")
            .and_then(JsonValue::as_str)
            .and_then(|typename| union.iter().find(|m| m.name() == typename));
        let Some(member) = member else {
            return Err(SchemaError::invalid_value(
                &union.name,
                &json,
                "no member matches `__typename`",
            ));
        };
        let member = self.resolve(member)?;
        self.decode(&member, json, selection)
    }

    fn decode_container(
        &self,
        ty: &Arc<MetaType>,
        container: &ContainerMeta,
        json: JsonValue,
        selection: Option<&[Selection]>,
    ) -> Result<Object, SchemaError> {
        let JsonValue::Object(map) = json else {
            return Err(SchemaError::invalid_value(
                &container.name,
                &json,
                "expected an object",
            ));
        };

        let mut object = Object::new(ty.clone(), selection.map(<[_]>::to_vec));
        match selection {
            Some(selection) => {
                for s in selection {
                    let attribute = s.attribute_name();
                    let nested = s.selections.as_deref();
                    if let Some(value) =
                        self.decode_field(container, &map, attribute, &s.field, nested)?
                    {
                        object.materialize(attribute.clone(), s.field.clone(), value);
                    }
                }
            }
            None => {
                for field in container.fields() {
                    let attribute = field.name();
                    if let Some(value) = self.decode_field(container, &map, attribute, field, None)? {
                        object.materialize(attribute.clone(), field.clone(), value);
                    }
                }
            }
        }
        object.set_backing(map);
        Ok(object)
    }

    fn decode_field(
        &self,
        container: &ContainerMeta,
        map: &JsonMap<String, JsonValue>,
        attribute: &ArcStr,
        field: &Field,
        selection: Option<&[Selection]>,
    ) -> Result<Option<Value>, SchemaError> {
        let Some(raw) = map.get(field.wire_name()) else {
            return Ok(None);
        };
        trace!(
            container = %container.name,
            attribute = %attribute,
            wire_name = field.wire_name(),
            "decoding field",
        );
        self.resolve(&field.field_type)
            .and_then(|field_type| self.decode(&field_type, raw.clone(), selection))
            .map(Some)
            .map_err(|cause| SchemaError::FieldDecodeFailure {
                container: container.name.clone(),
                attribute: attribute.clone(),
                value: raw.clone(),
                cause: Box::new(cause),
            })
    }
}
