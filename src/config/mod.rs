//! Configuration module for stencilgen
//!
//! Provides types and parsing for `stencilgen.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
