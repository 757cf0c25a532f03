//! Script transformer collaborator.
//!
//! The transformer turns a generated hydration script into the code written to
//! `page_data.js` (bundling, minification, format conversion). A real bundler
//! is plugged in through [`ScriptTransformer`]; [`PassthroughTransformer`]
//! covers builds that need no bundling.

use async_trait::async_trait;
use elegance_conf::TransformOptions;

/// Result of a transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
	/// Transformed code.
	pub code: String,
}

/// Transforms generated client code.
#[async_trait]
pub trait ScriptTransformer: Send + Sync {
	/// Transforms `source` according to `options`.
	async fn transform(
		&self,
		source: &str,
		options: &TransformOptions,
	) -> anyhow::Result<TransformOutput>;
}

/// Transformer that leaves code unchanged apart from whitespace minification.
///
/// With `minify` set, every line is trimmed and blank lines are dropped. Line
/// breaks are kept, so line comments and automatic semicolon insertion in
/// author-written source keep their meaning.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTransformer;

#[async_trait]
impl ScriptTransformer for PassthroughTransformer {
	async fn transform(
		&self,
		source: &str,
		options: &TransformOptions,
	) -> anyhow::Result<TransformOutput> {
		let code = if options.minify {
			source
				.lines()
				.map(str::trim)
				.filter(|line| !line.is_empty())
				.collect::<Vec<_>>()
				.join("\n")
		} else {
			source.to_string()
		};
		Ok(TransformOutput { code })
	}
}
