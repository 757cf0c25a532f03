//! Settings errors.

use std::path::PathBuf;
use thiserror::Error;

/// Error raised while loading build settings.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
	/// A settings file could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Io {
		/// File that was being read.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// A settings file is not valid TOML.
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Merged settings do not match the settings schema.
	#[error("invalid settings: {0}")]
	Json(#[from] serde_json::Error),

	/// A single setting has a value that cannot be interpreted.
	#[error("invalid value '{value}' for {key}")]
	InvalidValue {
		/// Setting (or environment variable) name.
		key: String,
		/// Offending value.
		value: String,
	},
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
