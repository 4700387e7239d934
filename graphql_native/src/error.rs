//! Errors raised while declaring, decoding and rendering types.

use arcstr::ArcStr;
use derive_more::with_trait::{Display, Error};
use serde_json::Value as JsonValue;

/// Error of any operation over a [`Schema`] or its descriptors.
///
/// Declaration-time errors ([`DuplicateRegistration`], [`UnresolvedType`],
/// [`InvalidDefault`], ...) are fatal to the declaration that raised them.
/// Decode-time errors carry enough context to locate the offending value
/// without looking into the registry.
///
/// [`DuplicateRegistration`]: SchemaError::DuplicateRegistration
/// [`InvalidDefault`]: SchemaError::InvalidDefault
/// [`Schema`]: crate::Schema
/// [`UnresolvedType`]: SchemaError::UnresolvedType
#[derive(Clone, Debug, Display, Error, PartialEq)]
pub enum SchemaError {
    /// A type with the same name is already registered.
    #[display("Schema already has a type named \"{_0}\"")]
    DuplicateRegistration(#[error(not(source))] ArcStr),

    /// The type to unregister is not present.
    #[display("Schema has no type named \"{_0}\"")]
    UnknownRegistration(#[error(not(source))] ArcStr),

    /// A member, argument or wrapper target maps to no known type.
    #[display("Type \"{_0}\" is neither declared nor mapped")]
    UnresolvedType(#[error(not(source))] ArcStr),

    /// A container was declared on top of a type that has no fields.
    #[display("\"{name}\" cannot inherit from non-container type \"{base}\"")]
    InvalidBase {
        /// Container being declared.
        name: ArcStr,
        /// Offending base.
        base: ArcStr,
    },

    /// An enum was declared without any choice.
    #[display("Enum \"{_0}\" is missing its choices")]
    EmptyEnum(#[error(not(source))] ArcStr),

    /// A decoded string is not among the enum choices.
    #[display("{enum_name} does not accept value {value}")]
    InvalidEnumValue {
        /// Enum type name.
        enum_name: ArcStr,
        /// Rejected raw value.
        value: JsonValue,
    },

    /// A non-null type received `null`.
    #[display("{_0} received null value")]
    NullNotAllowed(#[error(not(source))] ArcStr),

    /// The JSON value has a shape the type cannot decode.
    #[display("{type_name} cannot decode {value}: {reason}")]
    InvalidValue {
        /// Decoding type name.
        type_name: ArcStr,
        /// Rejected raw value.
        value: JsonValue,
        /// What went wrong.
        reason: ArcStr,
    },

    /// An argument default value is rejected by the argument type.
    #[display("Argument \"{argument}\" has an invalid default: {cause}")]
    InvalidDefault {
        /// Argument name.
        argument: ArcStr,
        /// Decoding failure of the default value.
        #[error(source)]
        cause: Box<SchemaError>,
    },

    /// Decoding a single field of a container failed.
    #[display("{container} selection \"{attribute}\": {value} ({cause})")]
    FieldDecodeFailure {
        /// Container type name.
        container: ArcStr,
        /// Local attribute name the value was assigned to.
        attribute: ArcStr,
        /// Raw JSON value of the field.
        value: JsonValue,
        /// Underlying failure.
        #[error(source)]
        cause: Box<SchemaError>,
    },

    /// Reading an attribute or field that does not exist.
    #[display("{container} has no field {field}")]
    MissingAttribute {
        /// Container type name.
        container: ArcStr,
        /// Requested name.
        field: ArcStr,
    },
}

impl SchemaError {
    pub(crate) fn invalid_value(
        type_name: &ArcStr,
        value: &JsonValue,
        reason: impl Into<ArcStr>,
    ) -> Self {
        Self::InvalidValue {
            type_name: type_name.clone(),
            value: value.clone(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_attribute(container: &ArcStr, field: &str) -> Self {
        Self::MissingAttribute {
            container: container.clone(),
            field: field.into(),
        }
    }
}
