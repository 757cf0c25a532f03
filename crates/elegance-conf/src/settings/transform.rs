//! Options handed to the script transformer.

use serde::{Deserialize, Serialize};

/// Output module format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptFormat {
	/// ES modules.
	#[default]
	Esm,
	/// CommonJS.
	Cjs,
	/// Immediately invoked function expression.
	Iife,
}

/// Target platform of the transformed script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
	/// Browser runtime.
	#[default]
	Browser,
	/// Node runtime.
	Node,
	/// No platform assumptions.
	Neutral,
}

/// Source language the transformer parses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loader {
	/// JavaScript.
	Js,
	/// TypeScript.
	#[default]
	Ts,
}

/// Transformer options for the hydration script of a page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformOptions {
	/// Whether to minify.
	pub minify: bool,
	/// Statement kinds to strip (e.g. `console`, `debugger`).
	pub drop: Vec<String>,
	/// Output module format.
	pub format: ScriptFormat,
	/// Target platform.
	pub platform: Platform,
	/// Source language.
	pub loader: Loader,
}

impl TransformOptions {
	/// Returns `true` if statements of `kind` are dropped.
	pub fn drops(&self, kind: &str) -> bool {
		self.drop.iter().any(|d| d == kind)
	}
}
