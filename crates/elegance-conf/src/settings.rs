//! Build settings management
//!
//! Settings are layered from three sources, lowest priority first:
//!
//! 1. built-in defaults ([`BuildSettings::default`])
//! 2. a TOML settings file ([`sources::TomlFileSource`])
//! 3. `ELEGANCE_`-prefixed environment variables ([`sources::EnvSource`])

mod build;
mod error;
pub mod sources;
mod transform;

pub use build::{BuildSettings, Environment, LoggingSettings, PRODUCTION_DROPS};
pub use error::{SettingsError, SettingsResult};
pub use transform::{Loader, Platform, ScriptFormat, TransformOptions};
