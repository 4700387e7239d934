//! Library tests and fixtures

pub mod fixtures;
mod codec_tests;
