//! Declarative macros.

#[macro_use]
mod graphql_input_value;
