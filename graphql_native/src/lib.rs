#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

#[doc(hidden)]
#[macro_use]
pub mod macros;
mod ast;
mod error;
pub mod schema;
mod types;
mod util;
mod value;

#[cfg(test)]
mod tests;

pub use crate::util::to_camel_case;

pub use crate::{
    ast::{InputValue, Selection, Variable},
    error::SchemaError,
    schema::{
        builder::ContainerDecl,
        meta::{
            Argument, Arguments, ContainerMeta, EnumMeta, Field, MetaType, ScalarMeta, TypeKind,
            TypeRef, UnionMeta, WrapMode, WrapperMeta,
        },
        model::Schema,
        printer::{Printer, RenderOptions},
    },
    types::scalars::{Primitive, ScalarParseFn},
    value::{Object, ScalarValue, Value},
};
