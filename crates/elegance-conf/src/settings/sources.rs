//! Configuration sources for layered build settings
//!
//! Sources are merged in priority order (environment variables > settings
//! file > defaults). Every source produces a flat or nested JSON object that is
//! deep-merged into the result before it is deserialized.

use super::error::{SettingsError, SettingsResult};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

/// Default prefix of environment overrides.
pub const DEFAULT_ENV_PREFIX: &str = "ELEGANCE_";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> SettingsResult<IndexMap<String, Value>>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// TOML settings file.
///
/// A missing file contributes nothing.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> SettingsResult<IndexMap<String, Value>> {
		if !self.path.exists() {
			tracing::debug!("settings file {} not found, skipping", self.path.display());
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
			path: self.path.clone(),
			source,
		})?;
		parse_toml(&content)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Parses TOML text into a settings map.
pub fn parse_toml(content: &str) -> SettingsResult<IndexMap<String, Value>> {
	let table: toml::Table = toml::from_str(content)?;
	let value = serde_json::to_value(table)?;
	Ok(match value {
		Value::Object(map) => map.into_iter().collect(),
		_ => IndexMap::new(),
	})
}

/// Environment variable overrides.
///
/// Recognized keys (after the prefix): `OUTPUT_DIR`, `PAGES_DIR`,
/// `WRITE_TO_HTML`, `ENVIRONMENT`, `MINIFY`, `CLIENT_SCRIPT`, `LOG_LEVEL`.
/// Other variables with the prefix are ignored.
pub struct EnvSource {
	prefix: String,
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	/// Reads the process environment with the default prefix.
	pub fn new() -> Self {
		Self {
			prefix: DEFAULT_ENV_PREFIX.to_string(),
			vars: None,
		}
	}

	/// Set the prefix filter for environment variables
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	/// Reads the given variables instead of the process environment.
	pub fn with_vars<I, K, V>(mut self, vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.vars = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
		self
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> SettingsResult<IndexMap<String, Value>> {
		let vars: Vec<(String, String)> = match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		};

		let mut config = IndexMap::new();
		for (key, value) in vars {
			let Some(name) = key.strip_prefix(&self.prefix) else {
				continue;
			};

			let (field, parsed) = match name.to_lowercase().as_str() {
				"output_dir" => ("output_dir", Value::String(value)),
				"pages_dir" => ("pages_dir", Value::String(value)),
				"client_script" => ("client_script", Value::String(value)),
				"write_to_html" => ("write_to_html", Value::Bool(parse_bool(&key, &value)?)),
				"minify" => ("minify", Value::Bool(parse_bool(&key, &value)?)),
				"environment" => ("environment", Value::String(parse_environment(&key, &value)?)),
				"log_level" => {
					let mut logging = Map::new();
					logging.insert("level".to_string(), Value::String(value.to_lowercase()));
					("logging", Value::Object(logging))
				}
				_ => {
					tracing::debug!("ignoring unknown setting {key}");
					continue;
				}
			};
			config.insert(field.to_string(), parsed);
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables with prefix {}", self.prefix)
	}
}

fn parse_bool(key: &str, value: &str) -> SettingsResult<bool> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(SettingsError::InvalidValue {
			key: key.to_string(),
			value: value.to_string(),
		}),
	}
}

fn parse_environment(key: &str, value: &str) -> SettingsResult<String> {
	match value.trim().to_lowercase().as_str() {
		"production" | "prod" => Ok("production".to_string()),
		"development" | "dev" => Ok("development".to_string()),
		_ => Err(SettingsError::InvalidValue {
			key: key.to_string(),
			value: value.to_string(),
		}),
	}
}

/// Loads every source and deep-merges them, lowest priority first.
pub fn merge_sources(sources: &[Box<dyn ConfigSource>]) -> SettingsResult<Value> {
	let mut ordered: Vec<&dyn ConfigSource> = sources.iter().map(AsRef::as_ref).collect();
	ordered.sort_by_key(|source| source.priority());

	let mut merged = Value::Object(Map::new());
	for source in ordered {
		let layer = source.load()?;
		tracing::debug!("loaded {} setting(s) from {}", layer.len(), source.description());
		merge_into(&mut merged, Value::Object(layer.into_iter().collect()));
	}
	Ok(merged)
}

pub(crate) fn merge_into(base: &mut Value, layer: Value) {
	match (base, layer) {
		(Value::Object(base), Value::Object(layer)) => {
			for (key, value) in layer {
				match base.get_mut(&key) {
					Some(existing) => merge_into(existing, value),
					None => {
						base.insert(key, value);
					}
				}
			}
		}
		(base, layer) => *base = layer,
	}
}
