//! Registry of the types of a schema, and the wrappers built over them.

use std::sync::Arc;

use arcstr::ArcStr;
use fnv::FnvHashMap;
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    error::SchemaError,
    schema::meta::{MetaType, TypeKind, TypeRef, WrapMode, WrapperMeta},
    types::scalars::builtin_scalars,
};

/// Registry of the types of a schema.
///
/// Owns the declared types by name, in registration order, an index of them
/// by [`TypeKind`], and a cache of the non-null and list wrappers built
/// through it. Types are shared as [`Arc`]s, so a type stays usable after
/// being unregistered.
///
/// Mutation is meant for an initialization phase: declare every type, then
/// share the schema for decoding and rendering.
#[derive(Clone, Debug)]
pub struct Schema {
    types: IndexMap<ArcStr, Arc<MetaType>>,
    kinds: FnvHashMap<TypeKind, IndexMap<ArcStr, Arc<MetaType>>>,
    wrappers: FnvHashMap<ArcStr, Arc<MetaType>>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    /// Creates a schema with the built-in scalars already registered.
    pub fn new() -> Self {
        let mut schema = Self::empty();
        for scalar in builtin_scalars() {
            schema.insert(Arc::new(scalar));
        }
        schema
    }

    /// Creates a schema without any type, not even the built-in scalars.
    pub fn empty() -> Self {
        Self {
            types: IndexMap::new(),
            kinds: FnvHashMap::default(),
            wrappers: FnvHashMap::default(),
        }
    }

    /// Creates a schema holding a snapshot of the types of `base`.
    ///
    /// The two schemas evolve independently afterwards. Wrappers are not
    /// copied: the new schema builds its own.
    pub fn with_base(base: &Self) -> Self {
        Self {
            types: base.types.clone(),
            kinds: base.kinds.clone(),
            wrappers: FnvHashMap::default(),
        }
    }

    /// Registers a type under its name.
    ///
    /// # Errors
    ///
    /// [`SchemaError::DuplicateRegistration`] if the name is taken.
    pub fn register(&mut self, ty: impl Into<Arc<MetaType>>) -> Result<Arc<MetaType>, SchemaError> {
        let ty = ty.into();
        if self.types.contains_key(ty.name()) {
            return Err(SchemaError::DuplicateRegistration(ty.name().clone()));
        }
        self.insert(ty.clone());
        debug!(name = %ty.name(), kind = %ty.kind(), "registered type");
        Ok(ty)
    }

    /// Removes the type named `name`, returning it.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnknownRegistration`] if there is no such type.
    pub fn unregister(&mut self, name: &str) -> Result<Arc<MetaType>, SchemaError> {
        let ty = self
            .types
            .shift_remove(name)
            .ok_or_else(|| SchemaError::UnknownRegistration(name.into()))?;
        if let Some(kind) = self.kinds.get_mut(&ty.kind()) {
            kind.shift_remove(name);
        }
        debug!(name = %ty.name(), kind = %ty.kind(), "unregistered type");
        Ok(ty)
    }

    /// The type named `name`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnresolvedType`] if there is no such type.
    pub fn lookup(&self, name: &str) -> Result<&Arc<MetaType>, SchemaError> {
        self.get(name)
            .ok_or_else(|| SchemaError::UnresolvedType(name.into()))
    }

    /// The type named `name`, if registered.
    pub fn get(&self, name: &str) -> Option<&Arc<MetaType>> {
        self.types.get(name)
    }

    /// Whether a type named `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Registered types of the given kind, by name.
    pub fn kind(&self, kind: TypeKind) -> Option<&IndexMap<ArcStr, Arc<MetaType>>> {
        self.kinds.get(&kind).filter(|types| !types.is_empty())
    }

    /// Registered types, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<MetaType>> {
        self.types.values()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether no type is registered.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolves a reference into a type.
    ///
    /// Names are looked up among registered types first, then among the
    /// wrappers built so far.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnresolvedType`] if the reference maps to nothing.
    pub fn resolve(&self, type_ref: &TypeRef) -> Result<Arc<MetaType>, SchemaError> {
        let name = match type_ref {
            TypeRef::Resolved(ty) => return Ok(ty.clone()),
            TypeRef::Named(name) => name.as_str(),
            TypeRef::Primitive(p) => p.type_name(),
        };
        self.types
            .get(name)
            .or_else(|| self.wrappers.get(name))
            .cloned()
            .ok_or_else(|| SchemaError::UnresolvedType(name.into()))
    }

    /// Resolves what can be resolved now.
    ///
    /// Primitives must map to a registered built-in scalar. Unknown names are
    /// kept as lazy references, so types may refer to types declared later.
    pub(crate) fn ensure(&self, type_ref: &TypeRef) -> Result<TypeRef, SchemaError> {
        match type_ref {
            TypeRef::Resolved(_) => Ok(type_ref.clone()),
            TypeRef::Primitive(_) => self.resolve(type_ref).map(TypeRef::Resolved),
            TypeRef::Named(_) => Ok(self
                .resolve(type_ref)
                .map_or_else(|_| type_ref.clone(), TypeRef::Resolved)),
        }
    }

    /// Non-null wrapper `T!` around `of_type`, built once per schema.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnresolvedType`] if `of_type` is a primitive whose
    /// built-in scalar is not registered.
    pub fn non_null(&mut self, of_type: impl Into<TypeRef>) -> Result<Arc<MetaType>, SchemaError> {
        self.wrap(of_type.into(), WrapMode::NonNull)
    }

    /// List wrapper `[T]` around `of_type`, built once per schema.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnresolvedType`] if `of_type` is a primitive whose
    /// built-in scalar is not registered.
    pub fn list_of(&mut self, of_type: impl Into<TypeRef>) -> Result<Arc<MetaType>, SchemaError> {
        self.wrap(of_type.into(), WrapMode::List)
    }

    /// Wrapper built by this schema under the synthesized `name`.
    pub fn wrapper(&self, name: &str) -> Option<&Arc<MetaType>> {
        self.wrappers.get(name)
    }

    fn wrap(&mut self, of_type: TypeRef, mode: WrapMode) -> Result<Arc<MetaType>, SchemaError> {
        let of_type = self.ensure(&of_type)?;
        let name: ArcStr = match mode {
            WrapMode::NonNull => format!("{}!", of_type.name()),
            WrapMode::List => format!("[{}]", of_type.name()),
        }
        .into();

        if let Some(wrapper) = self.wrappers.get(&name) {
            return Ok(wrapper.clone());
        }

        let wrapper = Arc::new(MetaType::Wrapped(WrapperMeta {
            name: name.clone(),
            of_type,
            mode,
        }));
        debug!(name = %name, "built wrapper type");
        self.wrappers.insert(name, wrapper.clone());
        Ok(wrapper)
    }

    fn insert(&mut self, ty: Arc<MetaType>) {
        let name = ty.name().clone();
        self.kinds
            .entry(ty.kind())
            .or_default()
            .insert(name.clone(), ty.clone());
        self.types.insert(name, ty);
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Arc<MetaType>;
    type IntoIter = indexmap::map::Values<'a, ArcStr, Arc<MetaType>>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.values()
    }
}
