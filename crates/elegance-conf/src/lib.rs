//! # Elegance Configuration
//!
//! Settings for page builds: where pages live, where output goes, which
//! artifacts are written and how hydration scripts are transformed.
//!
//! ## Quick Start
//!
//! ```ignore
//! use elegance_conf::BuildSettings;
//!
//! let settings = BuildSettings::load("elegance.toml")?;
//! let options = settings.transform_options();
//! ```
//!
//! ## Module Organization
//!
//! - [`settings`]: Settings types and configuration sources

#![warn(missing_docs)]

pub mod settings;

// Re-export commonly used types at the crate root for convenience
pub use settings::{
	BuildSettings, Environment, Loader, LoggingSettings, Platform, ScriptFormat, SettingsError,
	SettingsResult, TransformOptions,
};
