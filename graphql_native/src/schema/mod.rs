//! Type registry, type metadata, container declaration and IDL rendering.

pub mod builder;
pub mod meta;
pub mod model;
pub mod printer;
