//! Library fixtures

/// Star Wars schema and responses
pub mod starwars;
