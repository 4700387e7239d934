//! Types used to describe a GraphQL type system.

use std::{fmt, sync::Arc};

use arcstr::ArcStr;
use indexmap::{IndexMap, IndexSet};

use crate::{
    ast::InputValue,
    error::SchemaError,
    types::scalars::{self, Primitive, ScalarParseFn},
    util::to_camel_case,
};

/// Kind of a type: its keyword in the IDL and its bucket in a
/// [`Schema`](crate::Schema).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TypeKind {
    /// ## Scalar types
    ///
    /// Leaves converted from and to JSON by a conversion function.
    Scalar,

    /// ## Enum types
    ///
    /// Leaves restricted to a fixed set of string choices.
    Enum,

    /// ## Union types
    ///
    /// A set of object types without fields of its own.
    Union,

    /// ## Object types
    ///
    /// Containers of fields, possibly implementing interfaces.
    Object,

    /// ## Interface types
    ///
    /// Containers of fields shared by the objects implementing them.
    Interface,

    /// ## Input objects
    ///
    /// Containers of fields provided as arguments _into_ the system.
    InputObject,

    /// ## Non-null wrappers
    NonNull,

    /// ## List wrappers
    List,
}

impl TypeKind {
    /// Whether types of this kind have fields.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Interface | Self::InputObject)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Enum => "enum",
            Self::Union => "union",
            Self::Object => "type",
            Self::Interface => "interface",
            Self::InputObject => "input",
            Self::NonNull => "non_null",
            Self::List => "list",
        })
    }
}

/// Reference to a type, as given to a field, an argument or a wrapper.
///
/// [`Named`] references stay lazy until decoding or rendering asks a
/// [`Schema`] to resolve them, which allows referring to types declared
/// later. [`Primitive`]s always map to the built-in scalars.
///
/// [`Named`]: TypeRef::Named
/// [`Schema`]: crate::Schema
#[derive(Clone, Debug)]
pub enum TypeRef {
    /// An already resolved type.
    Resolved(Arc<MetaType>),
    /// A type looked up by name when needed.
    Named(ArcStr),
    /// A built-in scalar.
    Primitive(Primitive),
}

impl TypeRef {
    /// Name of the referenced type.
    pub fn name(&self) -> &str {
        match self {
            Self::Resolved(t) => t.name(),
            Self::Named(n) => n,
            Self::Primitive(p) => p.type_name(),
        }
    }

    /// The referenced type, if already resolved.
    pub fn resolved(&self) -> Option<&Arc<MetaType>> {
        match self {
            Self::Resolved(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Arc<MetaType>> for TypeRef {
    fn from(t: Arc<MetaType>) -> Self {
        Self::Resolved(t)
    }
}

impl<'a> From<&'a Arc<MetaType>> for TypeRef {
    fn from(t: &'a Arc<MetaType>) -> Self {
        Self::Resolved(t.clone())
    }
}

impl<'a> From<&'a str> for TypeRef {
    fn from(name: &'a str) -> Self {
        Self::Named(name.into())
    }
}

impl From<ArcStr> for TypeRef {
    fn from(name: ArcStr) -> Self {
        Self::Named(name)
    }
}

impl From<Primitive> for TypeRef {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

/// Scalar type metadata
#[derive(Clone, Debug)]
pub struct ScalarMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    pub(crate) parse_fn: ScalarParseFn,
}

impl ScalarMeta {
    /// Builds a pass-through scalar: decoding keeps the raw JSON value.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self::with_parser(name, scalars::parse_raw)
    }

    /// Builds a scalar converting raw JSON with `parse_fn`.
    pub fn with_parser(name: impl Into<ArcStr>, parse_fn: ScalarParseFn) -> Self {
        Self {
            name: name.into(),
            parse_fn,
        }
    }

    /// Wraps this [`ScalarMeta`] into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Scalar(self)
    }
}

/// Enum type metadata
#[derive(Clone, Debug)]
pub struct EnumMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub choices: IndexSet<ArcStr>,
}

impl EnumMeta {
    /// Builds a new enum with the given ordered `choices`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::EmptyEnum`] if there are no choices.
    pub fn new<I>(name: impl Into<ArcStr>, choices: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator,
        I::Item: Into<ArcStr>,
    {
        let name = name.into();
        let choices: IndexSet<ArcStr> = choices.into_iter().map(Into::into).collect();
        if choices.is_empty() {
            return Err(SchemaError::EmptyEnum(name));
        }
        Ok(Self { name, choices })
    }

    /// Builds a new enum out of whitespace separated choices: `"A B C"`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::EmptyEnum`] if `choices` is blank.
    pub fn from_choices_str(name: impl Into<ArcStr>, choices: &str) -> Result<Self, SchemaError> {
        Self::new(name, choices.split_whitespace())
    }

    /// Whether `value` is one of the choices.
    pub fn contains(&self, value: &str) -> bool {
        self.choices.contains(value)
    }

    /// Choices, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ArcStr> {
        self.choices.iter()
    }

    /// Number of choices.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Always `false`, enums cannot be built without choices.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub(crate) fn choice(&self, value: &str) -> Option<&ArcStr> {
        self.choices.get(value)
    }

    /// Wraps this [`EnumMeta`] into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Enum(self)
    }
}

/// Union type metadata
#[derive(Clone, Debug)]
pub struct UnionMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub of_types: Vec<TypeRef>,
}

impl UnionMeta {
    /// Builds a new union of the given member types.
    pub fn new<I>(name: impl Into<ArcStr>, of_types: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TypeRef>,
    {
        Self {
            name: name.into(),
            of_types: of_types.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether a member type is named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.of_types.iter().any(|t| t.name() == name)
    }

    /// Whether `ty` is a member type.
    pub fn contains_type(&self, ty: &MetaType) -> bool {
        self.contains(ty.name())
    }

    /// Member types, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.of_types.iter()
    }

    /// Number of member types.
    pub fn len(&self) -> usize {
        self.of_types.len()
    }

    /// Whether the union has no member.
    pub fn is_empty(&self) -> bool {
        self.of_types.is_empty()
    }

    /// Wraps this [`UnionMeta`] into a generic [`MetaType`].
    pub fn into_meta(self) -> MetaType {
        MetaType::Union(self)
    }
}

/// Object, interface and input object metadata.
///
/// Built by [`Schema::declare()`](crate::Schema::declare), which takes care of
/// inheritance and of attaching every field to the container.
#[derive(Clone, Debug)]
pub struct ContainerMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub fields: IndexMap<ArcStr, Field>,
    #[doc(hidden)]
    pub interfaces: Vec<Arc<MetaType>>,
}

impl ContainerMeta {
    /// Field named `name` (attribute name, not wire name).
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Fields, inherited ones first, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Implemented interfaces, deduplicated by name.
    pub fn interfaces(&self) -> &[Arc<MetaType>] {
        &self.interfaces
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the container has no field.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Which wrapper a [`WrapperMeta`] is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WrapMode {
    /// `T!`
    NonNull,
    /// `[T]`
    List,
}

/// Non-null or list wrapper around another type.
#[derive(Clone, Debug)]
pub struct WrapperMeta {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub of_type: TypeRef,
    #[doc(hidden)]
    pub mode: WrapMode,
}

/// Generic type metadata
#[derive(Clone, Debug)]
pub enum MetaType {
    #[doc(hidden)]
    Scalar(ScalarMeta),
    #[doc(hidden)]
    Enum(EnumMeta),
    #[doc(hidden)]
    Union(UnionMeta),
    #[doc(hidden)]
    Object(ContainerMeta),
    #[doc(hidden)]
    Interface(ContainerMeta),
    #[doc(hidden)]
    InputObject(ContainerMeta),
    #[doc(hidden)]
    Wrapped(WrapperMeta),
}

impl MetaType {
    /// Name of the type. Wrappers are named `T!` and `[T]`.
    pub fn name(&self) -> &ArcStr {
        match self {
            Self::Scalar(ScalarMeta { name, .. })
            | Self::Enum(EnumMeta { name, .. })
            | Self::Union(UnionMeta { name, .. })
            | Self::Object(ContainerMeta { name, .. })
            | Self::Interface(ContainerMeta { name, .. })
            | Self::InputObject(ContainerMeta { name, .. })
            | Self::Wrapped(WrapperMeta { name, .. }) => name,
        }
    }

    /// Construct a [`TypeKind`] for a given type
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Scalar(_) => TypeKind::Scalar,
            Self::Enum(_) => TypeKind::Enum,
            Self::Union(_) => TypeKind::Union,
            Self::Object(_) => TypeKind::Object,
            Self::Interface(_) => TypeKind::Interface,
            Self::InputObject(_) => TypeKind::InputObject,
            Self::Wrapped(w) => match w.mode {
                WrapMode::NonNull => TypeKind::NonNull,
                WrapMode::List => TypeKind::List,
            },
        }
    }

    /// Access the container metadata, if this is an object, interface or
    /// input object.
    pub fn as_container(&self) -> Option<&ContainerMeta> {
        match self {
            Self::Object(c) | Self::Interface(c) | Self::InputObject(c) => Some(c),
            _ => None,
        }
    }

    /// Access the enum metadata, if applicable.
    pub fn as_enum(&self) -> Option<&EnumMeta> {
        match self {
            Self::Enum(e) => Some(e),
            _ => None,
        }
    }

    /// Access the union metadata, if applicable.
    pub fn as_union(&self) -> Option<&UnionMeta> {
        match self {
            Self::Union(u) => Some(u),
            _ => None,
        }
    }

    /// Access the wrapper metadata, if applicable.
    pub fn as_wrapper(&self) -> Option<&WrapperMeta> {
        match self {
            Self::Wrapped(w) => Some(w),
            _ => None,
        }
    }

    /// Access a field's meta data given its attribute name
    ///
    /// Only containers have fields. This method always returns `None` for other types.
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.as_container().and_then(|c| c.field(name))
    }

    /// Like [`MetaType::field_by_name()`], but failing with
    /// [`SchemaError::MissingAttribute`].
    pub fn field(&self, name: &str) -> Result<&Field, SchemaError> {
        self.field_by_name(name)
            .ok_or_else(|| SchemaError::missing_attribute(self.name(), name))
    }

    /// Whether the type has a field named `name`.
    pub fn contains_field(&self, name: &str) -> bool {
        self.field_by_name(name).is_some()
    }

    /// Fields of a container, empty for any other type.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.as_container().into_iter().flat_map(ContainerMeta::fields)
    }

    /// Interfaces implemented by a container, empty for any other type.
    pub fn interfaces(&self) -> &[Arc<MetaType>] {
        match self.as_container() {
            Some(c) => c.interfaces(),
            None => &[],
        }
    }

    /// Returns true if the type can occur in leaf positions in queries
    ///
    /// Only enums and scalars are leaf types.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Enum(_) | Self::Scalar(_))
    }

    /// Returns true if the type is one of the GraphQL built-in scalars.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Scalar(_))
            && matches!(&**self.name(), "Int" | "Float" | "String" | "Boolean" | "ID")
    }
}

impl fmt::Display for MetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata for a field
///
/// A field is created detached and gets its `name`, its `container` and,
/// unless explicitly given, its `graphql_name` when the container is
/// declared. Attaching happens once: a field inherited into another container
/// keeps the wire name of its first container.
#[derive(Clone, Debug)]
pub struct Field {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub graphql_name: Option<ArcStr>,
    #[doc(hidden)]
    pub field_type: TypeRef,
    #[doc(hidden)]
    pub arguments: Arguments,
    #[doc(hidden)]
    pub container: Option<ArcStr>,
}

impl Field {
    /// Builds a new detached field of type `field_type`.
    pub fn new(field_type: impl Into<TypeRef>) -> Self {
        Self {
            name: ArcStr::default(),
            graphql_name: None,
            field_type: field_type.into(),
            arguments: Arguments::default(),
            container: None,
        }
    }

    /// Sets the wire name instead of deriving it from the attribute name.
    #[must_use]
    pub fn graphql_name(mut self, name: impl Into<ArcStr>) -> Self {
        self.graphql_name = Some(name.into());
        self
    }

    /// Adds an argument.
    #[must_use]
    pub fn argument(mut self, name: impl Into<ArcStr>, argument: impl Into<Argument>) -> Self {
        self.arguments.insert(name, argument);
        self
    }

    /// Replaces all the arguments.
    #[must_use]
    pub fn arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = arguments;
        self
    }

    /// Attribute name, empty while detached.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Name the field has on the wire.
    pub fn wire_name(&self) -> &str {
        self.graphql_name.as_deref().unwrap_or(&self.name)
    }

    /// Name of the container the field was last attached to.
    pub fn container(&self) -> Option<&ArcStr> {
        self.container.as_ref()
    }

    pub(crate) fn attach(&mut self, container: &ArcStr, name: &ArcStr) {
        self.name = name.clone();
        self.container = Some(container.clone());
        if self.graphql_name.is_none() {
            self.graphql_name = Some(to_camel_case(name).into());
        }
        self.arguments.attach(container);
    }
}

impl From<TypeRef> for Field {
    fn from(t: TypeRef) -> Self {
        Self::new(t)
    }
}

impl From<Arc<MetaType>> for Field {
    fn from(t: Arc<MetaType>) -> Self {
        Self::new(t)
    }
}

impl<'a> From<&'a Arc<MetaType>> for Field {
    fn from(t: &'a Arc<MetaType>) -> Self {
        Self::new(t)
    }
}

impl<'a> From<&'a str> for Field {
    fn from(name: &'a str) -> Self {
        Self::new(name)
    }
}

impl From<Primitive> for Field {
    fn from(p: Primitive) -> Self {
        Self::new(p)
    }
}

/// Metadata for an argument to a field
#[derive(Clone, Debug)]
pub struct Argument {
    #[doc(hidden)]
    pub name: ArcStr,
    #[doc(hidden)]
    pub graphql_name: Option<ArcStr>,
    #[doc(hidden)]
    pub arg_type: TypeRef,
    #[doc(hidden)]
    pub default_value: Option<InputValue>,
    #[doc(hidden)]
    pub container: Option<ArcStr>,
}

impl Argument {
    /// Builds a new argument of type `arg_type` without default.
    pub fn new(arg_type: impl Into<TypeRef>) -> Self {
        Self {
            name: ArcStr::default(),
            graphql_name: None,
            arg_type: arg_type.into(),
            default_value: None,
            container: None,
        }
    }

    /// Sets the wire name instead of deriving it from the attribute name.
    #[must_use]
    pub fn graphql_name(mut self, name: impl Into<ArcStr>) -> Self {
        self.graphql_name = Some(name.into());
        self
    }

    /// Sets the default value, checked against the argument type when the
    /// owning container is declared.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<InputValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Attribute name, empty while detached.
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Name the argument has on the wire.
    pub fn wire_name(&self) -> &str {
        self.graphql_name.as_deref().unwrap_or(&self.name)
    }

    fn attach(&mut self, container: &ArcStr, name: &ArcStr) {
        self.name = name.clone();
        self.container = Some(container.clone());
        if self.graphql_name.is_none() {
            self.graphql_name = Some(to_camel_case(name).into());
        }
    }
}

impl From<TypeRef> for Argument {
    fn from(t: TypeRef) -> Self {
        Self::new(t)
    }
}

impl From<Arc<MetaType>> for Argument {
    fn from(t: Arc<MetaType>) -> Self {
        Self::new(t)
    }
}

impl<'a> From<&'a Arc<MetaType>> for Argument {
    fn from(t: &'a Arc<MetaType>) -> Self {
        Self::new(t)
    }
}

impl<'a> From<&'a str> for Argument {
    fn from(name: &'a str) -> Self {
        Self::new(name)
    }
}

impl From<Primitive> for Argument {
    fn from(p: Primitive) -> Self {
        Self::new(p)
    }
}

/// Ordered arguments of a field, keyed by attribute name.
#[derive(Clone, Debug, Default)]
pub struct Arguments(IndexMap<ArcStr, Argument>);

impl Arguments {
    /// No arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument, replacing any previous one with the same name.
    #[must_use]
    pub fn arg(mut self, name: impl Into<ArcStr>, argument: impl Into<Argument>) -> Self {
        self.insert(name, argument);
        self
    }

    /// Argument named `name` (attribute name).
    pub fn get(&self, name: &str) -> Option<&Argument> {
        self.0.get(name)
    }

    /// Arguments in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.0.values()
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Argument> {
        self.0.values_mut()
    }

    /// Container the arguments were attached to, if any.
    pub(crate) fn container(&self) -> Option<&ArcStr> {
        self.iter().find_map(|a| a.container.as_ref())
    }

    fn insert(&mut self, name: impl Into<ArcStr>, argument: impl Into<Argument>) {
        let name = name.into();
        let mut argument = argument.into();
        argument.name = name.clone();
        self.0.insert(name, argument);
    }

    fn attach(&mut self, container: &ArcStr) {
        for (name, arg) in &mut self.0 {
            arg.attach(container, name);
        }
    }
}

impl<K, A> FromIterator<(K, A)> for Arguments
where
    K: Into<ArcStr>,
    A: Into<Argument>,
{
    fn from_iter<T: IntoIterator<Item = (K, A)>>(iter: T) -> Self {
        let mut args = Self::default();
        for (name, arg) in iter {
            args.insert(name, arg);
        }
        args
    }
}
