use std::{collections::BTreeMap, fmt, sync::Arc};

use arcstr::ArcStr;
use indexmap::IndexMap;
use itertools::Itertools as _;
use serde::{Serialize, Serializer};
use serde_json::{Map as JsonMap, Value as JsonValue};
use tracing::trace;

use crate::{
    ast::Selection,
    error::SchemaError,
    schema::meta::{Field, MetaType},
};

use super::Value;

/// Instance of a container type, decoded from a JSON object.
///
/// Keeps the JSON object it was decoded from as its backing store, along
/// with the fields actually materialized. Writing a materialized field with
/// [`Object::set()`] or [`Object::update()`] writes its JSON form back into
/// the store under the field's wire name.
#[derive(Clone, Debug)]
pub struct Object {
    meta: Arc<MetaType>,
    values: IndexMap<ArcStr, Value>,
    fields: IndexMap<ArcStr, Field>,
    selection: Option<Vec<Selection>>,
    json: JsonMap<String, JsonValue>,
}

impl Object {
    pub(crate) fn new(meta: Arc<MetaType>, selection: Option<Vec<Selection>>) -> Self {
        Self {
            meta,
            values: IndexMap::new(),
            fields: IndexMap::new(),
            selection,
            json: JsonMap::new(),
        }
    }

    /// Records a decoded field. The backing store is left untouched.
    pub(crate) fn materialize(&mut self, attribute: ArcStr, field: Field, value: Value) {
        self.fields.insert(attribute.clone(), field);
        self.values.insert(attribute, value);
    }

    pub(crate) fn set_backing(&mut self, json: JsonMap<String, JsonValue>) {
        self.json = json;
    }

    /// Type of the object. For union results, the member type it was decoded
    /// as.
    pub fn meta(&self) -> &Arc<MetaType> {
        &self.meta
    }

    /// Name of the type of the object.
    pub fn type_name(&self) -> &ArcStr {
        self.meta.name()
    }

    /// Value of the attribute named `attribute`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::MissingAttribute`] if it was never materialized nor
    /// set.
    pub fn get(&self, attribute: &str) -> Result<&Value, SchemaError> {
        self.values
            .get(attribute)
            .ok_or_else(|| SchemaError::missing_attribute(self.type_name(), attribute))
    }

    /// Sets the attribute named `attribute`.
    ///
    /// Materialized fields have their JSON form written into the backing
    /// store. Objects are written as their own backing JSON, so keys they
    /// never materialized survive. Other attributes are only kept on the
    /// object.
    pub fn set(&mut self, attribute: impl Into<ArcStr>, value: impl Into<Value>) {
        let attribute = attribute.into();
        self.values.insert(attribute.clone(), value.into());
        self.sync(&attribute);
    }

    /// Modifies the attribute named `attribute` in place, then writes it back
    /// like [`Object::set()`] does.
    ///
    /// Useful to change nested objects:
    /// `hero.update("friend", |f| f.as_mut_object().map(|f| f.set("name", "Leia")))`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::MissingAttribute`] if the attribute is absent.
    pub fn update<R>(
        &mut self,
        attribute: &str,
        f: impl FnOnce(&mut Value) -> R,
    ) -> Result<R, SchemaError> {
        let Some((_, key, value)) = self.values.get_full_mut(attribute) else {
            return Err(SchemaError::missing_attribute(self.type_name(), attribute));
        };
        let key = key.clone();
        let out = f(value);
        self.sync(&key);
        Ok(out)
    }

    fn sync(&mut self, attribute: &ArcStr) {
        let (Some(field), Some(value)) = (self.fields.get(attribute), self.values.get(attribute))
        else {
            return;
        };
        trace!(
            container = %self.meta.name(),
            attribute = %attribute,
            wire_name = field.wire_name(),
            "syncing field to JSON",
        );
        self.json.insert(field.wire_name().into(), value.to_backing_json());
    }

    /// Whether the attribute named `attribute` is present.
    pub fn contains(&self, attribute: &str) -> bool {
        self.values.contains_key(attribute)
    }

    /// Number of present attributes.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no attribute is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of the present attributes.
    pub fn keys(&self) -> impl Iterator<Item = &ArcStr> {
        self.values.keys()
    }

    /// Present attributes with their values.
    pub fn iter(&self) -> impl Iterator<Item = (&ArcStr, &Value)> {
        self.values.iter()
    }

    /// Field the attribute named `attribute` was materialized from.
    pub fn field(&self, attribute: &str) -> Option<&Field> {
        self.fields.get(attribute)
    }

    /// Selections the object was decoded with, if any.
    pub fn selection(&self) -> Option<&[Selection]> {
        self.selection.as_deref()
    }

    /// Backing JSON object.
    pub fn json(&self) -> &JsonMap<String, JsonValue> {
        &self.json
    }

    /// Snapshot of the materialized fields as JSON, keyed by wire name, in
    /// the order of the fields of the type.
    pub fn to_json(&self) -> JsonValue {
        let mut out = JsonMap::new();
        for declared in self.meta.fields() {
            let materialized = self
                .fields
                .iter()
                .filter(|(_, f)| f.name() == declared.name());
            for (attribute, field) in materialized {
                if let Some(value) = self.values.get(attribute) {
                    out.insert(field.wire_name().into(), value.to_json());
                }
            }
        }
        JsonValue::Object(out)
    }

    /// Compact JSON of [`Object::to_json()`] with keys sorted at every level.
    pub fn to_json_bytes(&self) -> Vec<u8> {
        // Serializing `JsonValue` cannot fail.
        serde_json::to_vec(&sorted(self.to_json())).unwrap_or_default()
    }
}

fn sorted(json: JsonValue) -> JsonValue {
    match json {
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(sorted).collect()),
        JsonValue::Object(map) => JsonValue::Object(
            map.into_iter()
                .map(|(k, v)| (k, sorted(v)))
                .collect::<BTreeMap<_, _>>()
                .into_iter()
                .collect(),
        ),
        other => other,
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.values == other.values
    }
}

/// `Human(id=1000, name=Luke Skywalker)`
impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})",
            self.type_name(),
            self.values
                .iter()
                .format_with(", ", |(k, v), f| f(&format_args!("{k}={v}"))),
        )
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
