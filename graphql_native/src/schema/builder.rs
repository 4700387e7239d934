//! Declaration of objects, interfaces and input objects.

use std::sync::Arc;

use arcstr::ArcStr;
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    error::SchemaError,
    schema::{
        meta::{Argument, ContainerMeta, Field, MetaType, TypeKind},
        model::Schema,
    },
};

/// Declaration of a container type: its kind, its bases and its own fields.
///
/// ```rust
/// # use graphql_native::{ContainerDecl, Primitive, Schema};
/// #
/// let mut schema = Schema::new();
/// let node = schema
///     .declare(ContainerDecl::interface("Node").field("id", Primitive::Id))
///     .unwrap();
/// let person = schema
///     .declare(
///         ContainerDecl::object("Person")
///             .base(&node)
///             .field("id", Primitive::Id)
///             .field("name", Primitive::String),
///     )
///     .unwrap();
/// assert_eq!(person.interfaces()[0].name(), "Node");
/// ```
#[derive(Clone, Debug)]
pub struct ContainerDecl {
    kind: TypeKind,
    name: ArcStr,
    bases: Vec<Arc<MetaType>>,
    members: Vec<(ArcStr, Field)>,
}

impl ContainerDecl {
    /// Declares an object type.
    pub fn object(name: impl Into<ArcStr>) -> Self {
        Self::new(TypeKind::Object, name)
    }

    /// Declares an interface.
    ///
    /// Built on top of an object type, it becomes an object type itself.
    pub fn interface(name: impl Into<ArcStr>) -> Self {
        Self::new(TypeKind::Interface, name)
    }

    /// Declares an input object type.
    pub fn input_object(name: impl Into<ArcStr>) -> Self {
        Self::new(TypeKind::InputObject, name)
    }

    fn new(kind: TypeKind, name: impl Into<ArcStr>) -> Self {
        Self {
            kind,
            name: name.into(),
            bases: vec![],
            members: vec![],
        }
    }

    /// Adds a base to inherit fields (and interfaces) from.
    #[must_use]
    pub fn base(mut self, base: &Arc<MetaType>) -> Self {
        self.bases.push(base.clone());
        self
    }

    /// Declares a field named `name`.
    ///
    /// `member` is either a type reference or an explicit [`Field`].
    #[must_use]
    pub fn field(mut self, name: impl Into<ArcStr>, member: impl Into<Field>) -> Self {
        self.members.push((name.into(), member.into()));
        self
    }
}

impl Schema {
    /// Builds the container type described by `decl`, without registering it.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidBase`] if a base has no fields to inherit.
    /// - [`SchemaError::UnresolvedType`] if a field or argument type is a
    ///   primitive with no registered built-in scalar.
    /// - [`SchemaError::InvalidDefault`] if an argument default is rejected
    ///   by the argument type.
    pub fn build_container(&self, decl: ContainerDecl) -> Result<MetaType, SchemaError> {
        let ContainerDecl {
            mut kind,
            name,
            bases,
            members,
        } = decl;

        if kind == TypeKind::Interface && bases.iter().any(|b| b.kind() == TypeKind::Object) {
            kind = TypeKind::Object;
        }

        let mut interfaces: Vec<Arc<MetaType>> = vec![];
        let mut fields: IndexMap<ArcStr, Field> = IndexMap::new();
        for base in &bases {
            let Some(container) = base.as_container() else {
                return Err(SchemaError::InvalidBase {
                    name,
                    base: base.name().clone(),
                });
            };
            let inherited = (base.kind() == TypeKind::Interface)
                .then_some(base)
                .into_iter()
                .chain(container.interfaces());
            for iface in inherited {
                if !interfaces.iter().any(|i| i.name() == iface.name()) {
                    interfaces.push(iface.clone());
                }
            }
            for (field_name, field) in &container.fields {
                fields.insert(field_name.clone(), field.clone());
            }
        }

        for (field_name, mut field) in members {
            field.field_type = self.ensure(&field.field_type)?;
            for arg in field.arguments.iter_mut() {
                arg.arg_type = self.ensure(&arg.arg_type)?;
            }
            fields.insert(field_name, field);
        }

        for (field_name, field) in &mut fields {
            field.attach(&name, field_name);
            for arg in field.arguments.iter() {
                self.check_default(arg)?;
            }
        }

        debug!(
            name = %name,
            kind = %kind,
            fields = fields.len(),
            interfaces = interfaces.len(),
            "declared container type",
        );

        let meta = ContainerMeta {
            name,
            fields,
            interfaces,
        };
        Ok(match kind {
            TypeKind::Interface => MetaType::Interface(meta),
            TypeKind::InputObject => MetaType::InputObject(meta),
            _ => MetaType::Object(meta),
        })
    }

    /// Builds the container type described by `decl` and registers it.
    ///
    /// # Errors
    ///
    /// Any error of [`Schema::build_container()`], and
    /// [`SchemaError::DuplicateRegistration`] if the name is taken.
    pub fn declare(&mut self, decl: ContainerDecl) -> Result<Arc<MetaType>, SchemaError> {
        let meta = self.build_container(decl)?;
        self.register(meta)
    }

    /// Decodes the default value of `arg` with its type. Defaults referring
    /// to variables cannot be checked and are accepted.
    fn check_default(&self, arg: &Argument) -> Result<(), SchemaError> {
        let Some(json) = arg.default_value.as_ref().and_then(|v| v.to_json()) else {
            return Ok(());
        };
        let invalid = |cause| SchemaError::InvalidDefault {
            argument: arg.name().clone(),
            cause: Box::new(cause),
        };
        let arg_type = self.resolve(&arg.arg_type).map_err(invalid)?;
        self.decode(&arg_type, json, None).map(drop).map_err(invalid)
    }
}

#[cfg(test)]
mod tests {
    use arcstr::literal;

    use crate::{
        error::SchemaError,
        schema::meta::{Argument, EnumMeta, Field, ScalarMeta, TypeKind},
        types::scalars::Primitive,
        InputValue, Schema,
    };

    use super::ContainerDecl;

    #[test]
    fn fields_get_wire_names() {
        let mut schema = Schema::new();
        let ty = schema
            .declare(
                ContainerDecl::object("Ship")
                    .field("ship_name", Primitive::String)
                    .field("crew", Field::new(Primitive::Int).graphql_name("crewSize")),
            )
            .unwrap();

        let wire: Vec<_> = ty.fields().map(|f| f.wire_name()).collect();
        assert_eq!(wire, ["shipName", "crewSize"]);
        assert_eq!(ty.field("crew").unwrap().container(), Some(&literal!("Ship")));
    }

    #[test]
    fn interface_on_object_becomes_object() {
        let mut schema = Schema::new();
        let base = schema
            .declare(ContainerDecl::object("Base").field("id", Primitive::Id))
            .unwrap();
        let derived = schema
            .declare(ContainerDecl::interface("Derived").base(&base))
            .unwrap();

        assert_eq!(derived.kind(), TypeKind::Object);
        assert!(derived.interfaces().is_empty());
    }

    #[test]
    fn interfaces_are_collected_once() {
        let mut schema = Schema::new();
        let node = schema
            .declare(ContainerDecl::interface("Node").field("id", Primitive::Id))
            .unwrap();
        let named = schema
            .declare(
                ContainerDecl::interface("Named")
                    .base(&node)
                    .field("name", Primitive::String),
            )
            .unwrap();
        let person = schema
            .declare(ContainerDecl::object("Person").base(&node).base(&named))
            .unwrap();

        let names: Vec<_> = person.interfaces().iter().map(|i| i.name().as_str()).collect();
        assert_eq!(names, ["Node", "Named"]);
        let fields: Vec<_> = person.fields().map(|f| f.name().as_str()).collect();
        assert_eq!(fields, ["id", "name"]);
    }

    #[test]
    fn later_bases_override_content_but_not_position() {
        let mut schema = Schema::new();
        let a = schema
            .declare(
                ContainerDecl::interface("A")
                    .field("value", Primitive::Int)
                    .field("only_a", Primitive::Int),
            )
            .unwrap();
        let b = schema
            .declare(ContainerDecl::interface("B").field("value", Primitive::String))
            .unwrap();
        let c = schema
            .declare(
                ContainerDecl::object("C")
                    .base(&a)
                    .base(&b)
                    .field("own", Primitive::Boolean),
            )
            .unwrap();

        let fields: Vec<_> = c
            .fields()
            .map(|f| (f.name().as_str(), f.field_type.name()))
            .collect();
        assert_eq!(
            fields,
            [("value", "String"), ("only_a", "Int"), ("own", "Boolean")],
        );
    }

    #[test]
    fn inherited_field_keeps_first_wire_name() {
        let mut schema = Schema::new();
        let a = schema
            .declare(
                ContainerDecl::interface("A")
                    .field("value", Field::new(Primitive::Int).graphql_name("aValue")),
            )
            .unwrap();
        let b = schema
            .declare(ContainerDecl::object("B").base(&a))
            .unwrap();

        let field = b.field("value").unwrap();
        assert_eq!(field.wire_name(), "aValue");
        assert_eq!(field.container(), Some(&literal!("B")));
        assert_eq!(a.field("value").unwrap().container(), Some(&literal!("A")));
    }

    #[test]
    fn rejects_non_container_base() {
        let mut schema = Schema::new();
        let scalar = schema.register(ScalarMeta::new("DateTime").into_meta()).unwrap();
        let err = schema
            .declare(ContainerDecl::object("Event").base(&scalar))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::InvalidBase {
                name: literal!("Event"),
                base: literal!("DateTime"),
            },
        );
    }

    #[test]
    fn rejects_unmapped_primitive() {
        let mut schema = Schema::empty();
        let err = schema
            .declare(ContainerDecl::object("Thing").field("id", Primitive::Id))
            .unwrap_err();
        assert_eq!(err, SchemaError::UnresolvedType(literal!("ID")));
    }

    #[test]
    fn validates_argument_defaults() {
        let mut schema = Schema::new();
        let episode = EnumMeta::from_choices_str("Episode", "NEWHOPE EMPIRE JEDI").unwrap();
        let episode = schema.register(episode.into_meta()).unwrap();
        let hero = |default: &str| {
            ContainerDecl::object("Query").field(
                "hero",
                Field::new(Primitive::String).argument(
                    "episode",
                    Argument::new(&episode).default_value(InputValue::enum_value(default)),
                ),
            )
        };

        assert!(schema.build_container(hero("JEDI")).is_ok());

        let err = schema.build_container(hero("PHANTOM")).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidDefault { ref argument, .. } if argument == "episode"
        ));
    }

    #[test]
    fn forward_references_stay_lazy() {
        let mut schema = Schema::new();
        let person = schema
            .declare(
                ContainerDecl::object("Person")
                    .field("best_friend", "Person")
                    .field("pets", "Pet"),
            )
            .unwrap();

        assert!(person.field("best_friend").unwrap().field_type.resolved().is_none());
        assert!(schema.resolve(&person.field("best_friend").unwrap().field_type).is_ok());
        assert!(schema.resolve(&person.field("pets").unwrap().field_type).is_err());
    }
}
