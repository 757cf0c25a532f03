//! Build settings
//!
//! Layered build configuration: defaults, an optional TOML file, then
//! `ELEGANCE_*` environment variables.

pub use elegance_conf::*;
