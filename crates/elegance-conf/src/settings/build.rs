//! Build settings
//!
//! Settings can be loaded from a TOML file, environment variables, or code.

use super::error::{SettingsError, SettingsResult};
use super::sources::{
	ConfigSource, DEFAULT_ENV_PREFIX, EnvSource, TomlFileSource, merge_into, merge_sources, parse_toml,
};
use super::transform::{Loader, Platform, ScriptFormat, TransformOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Statement kinds stripped from production scripts.
pub const PRODUCTION_DROPS: &[&str] = &["console", "debugger"];

/// Build environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	/// Optimized output.
	#[default]
	Production,
	/// Development output with debugging statements kept.
	Development,
}

impl Environment {
	/// Returns `true` for production builds.
	pub fn is_production(self) -> bool {
		self == Self::Production
	}
}

impl fmt::Display for Environment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Production => f.write_str("production"),
			Self::Development => f.write_str("development"),
		}
	}
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// Filter directive, e.g. `info` or `elegance_build=debug`.
	pub level: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
		}
	}
}

/// Settings of a page build.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
	/// Root of the page sources.
	pub pages_dir: PathBuf,
	/// Root of the build output; each page is written below it at its relative path.
	pub output_dir: PathBuf,
	/// Write `index.html` via the renderer (`true`) or `page.json` (`false`).
	pub write_to_html: bool,
	/// Build environment.
	pub environment: Environment,
	/// Minify hydration scripts.
	pub minify: bool,
	/// URL of the client runtime script referenced by every document.
	pub client_script: String,
	/// Logging configuration.
	pub logging: LoggingSettings,
}

impl Default for BuildSettings {
	fn default() -> Self {
		Self {
			pages_dir: PathBuf::from("pages"),
			output_dir: PathBuf::from("dist"),
			write_to_html: true,
			environment: Environment::default(),
			minify: true,
			client_script: "/client.js".to_string(),
			logging: LoggingSettings::default(),
		}
	}
}

impl BuildSettings {
	/// Create new settings with defaults
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the output directory.
	pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.output_dir = dir.into();
		self
	}

	/// Sets the pages directory.
	pub fn with_pages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.pages_dir = dir.into();
		self
	}

	/// Selects HTML (`true`) or JSON (`false`) page output.
	pub fn with_write_to_html(mut self, write_to_html: bool) -> Self {
		self.write_to_html = write_to_html;
		self
	}

	/// Sets the build environment.
	pub fn with_environment(mut self, environment: Environment) -> Self {
		self.environment = environment;
		self
	}

	/// Enables or disables minification.
	pub fn with_minify(mut self, minify: bool) -> Self {
		self.minify = minify;
		self
	}

	/// Parses settings from TOML text. Missing keys keep their defaults.
	pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
		let map = parse_toml(content)?;
		Self::from_layers(serde_json::Value::Object(map.into_iter().collect()))
	}

	/// Reads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&content)
	}

	/// Overrides settings from process environment variables starting with `prefix`.
	pub fn apply_env(self, prefix: &str) -> SettingsResult<Self> {
		self.apply_source(&EnvSource::new().with_prefix(prefix))
	}

	/// Overrides settings from the given variables, filtered by `prefix`.
	pub fn apply_env_from<I, K, V>(self, prefix: &str, vars: I) -> SettingsResult<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.apply_source(&EnvSource::new().with_prefix(prefix).with_vars(vars))
	}

	/// Loads defaults, then the TOML file at `path` (if it exists), then
	/// `ELEGANCE_` environment overrides.
	pub fn load(path: impl Into<PathBuf>) -> SettingsResult<Self> {
		let sources: Vec<Box<dyn ConfigSource>> = vec![
			Box::new(TomlFileSource::new(path)),
			Box::new(EnvSource::new().with_prefix(DEFAULT_ENV_PREFIX)),
		];
		let settings = Self::from_layers(merge_sources(&sources)?)?;
		tracing::debug!(
			"loaded build settings: environment={}, output_dir={}",
			settings.environment,
			settings.output_dir.display()
		);
		Ok(settings)
	}

	/// Derives the transformer options for hydration scripts.
	pub fn transform_options(&self) -> TransformOptions {
		let drop = if self.environment.is_production() {
			PRODUCTION_DROPS.iter().map(|s| s.to_string()).collect()
		} else {
			Vec::new()
		};

		TransformOptions {
			minify: self.minify,
			drop,
			format: ScriptFormat::Esm,
			platform: Platform::Browser,
			loader: Loader::Ts,
		}
	}

	fn apply_source(self, source: &dyn ConfigSource) -> SettingsResult<Self> {
		let mut base = serde_json::to_value(&self)?;
		let layer = source.load()?;
		merge_into(&mut base, serde_json::Value::Object(layer.into_iter().collect()));
		Self::from_layers(base)
	}

	fn from_layers(value: serde_json::Value) -> SettingsResult<Self> {
		Ok(serde_json::from_value(value)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults() {
		let settings = BuildSettings::default();

		assert_eq!(settings.pages_dir, PathBuf::from("pages"));
		assert_eq!(settings.output_dir, PathBuf::from("dist"));
		assert!(settings.write_to_html);
		assert_eq!(settings.environment, Environment::Production);
		assert!(settings.minify);
		assert_eq!(settings.client_script, "/client.js");
		assert_eq!(settings.logging.level, "info");
	}

	#[rstest]
	fn test_from_toml_str_keeps_defaults_for_missing_keys() {
		let settings = BuildSettings::from_toml_str(
			"output_dir = \"public\"\nenvironment = \"development\"\n[logging]\nlevel = \"debug\"\n",
		)
		.unwrap();

		assert_eq!(settings.output_dir, PathBuf::from("public"));
		assert_eq!(settings.environment, Environment::Development);
		assert_eq!(settings.logging.level, "debug");
		assert_eq!(settings.pages_dir, PathBuf::from("pages"));
		assert!(settings.minify);
	}

	#[rstest]
	fn test_from_toml_str_rejects_unknown_environment() {
		let err = BuildSettings::from_toml_str("environment = \"staging\"").unwrap_err();
		assert!(matches!(err, SettingsError::Json(_)));
	}

	#[rstest]
	fn test_apply_env_from_overrides_only_given_keys() {
		let settings = BuildSettings::new()
			.with_output_dir("out")
			.apply_env_from("ELEGANCE_", [("ELEGANCE_WRITE_TO_HTML", "false"), ("ELEGANCE_LOG_LEVEL", "warn")])
			.unwrap();

		assert!(!settings.write_to_html);
		assert_eq!(settings.logging.level, "warn");
		assert_eq!(settings.output_dir, PathBuf::from("out"));
	}

	#[rstest]
	#[case::production(Environment::Production, vec!["console".to_string(), "debugger".to_string()])]
	#[case::development(Environment::Development, vec![])]
	fn test_transform_options(#[case] environment: Environment, #[case] drop: Vec<String>) {
		let options = BuildSettings::new()
			.with_environment(environment)
			.with_minify(false)
			.transform_options();

		assert_eq!(options.drop, drop);
		assert!(!options.minify);
		assert_eq!(options.format, ScriptFormat::Esm);
		assert_eq!(options.platform, Platform::Browser);
		assert_eq!(options.loader, Loader::Ts);
	}
}
