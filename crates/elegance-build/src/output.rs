//! Page artifact writers.

use crate::error::{BuildError, BuildResult};
use elegance_pages::Child;
use std::path::{Path, PathBuf};

pub use crate::template::PAGE_DATA_FILE;

/// File name of the rendered document.
pub const INDEX_HTML_FILE: &str = "index.html";

/// File name of the normalized tree in JSON mode.
pub const PAGE_JSON_FILE: &str = "page.json";

/// Closing tag appended after the rendered body.
pub const DOCUMENT_END: &str = "</html>";

/// Writes `contents` to `dir/name`, creating `dir` if needed.
pub async fn write_artifact(dir: &Path, name: &str, contents: &str) -> BuildResult<PathBuf> {
	tokio::fs::create_dir_all(dir)
		.await
		.map_err(|source| BuildError::Io {
			path: dir.to_path_buf(),
			source,
		})?;

	let path = dir.join(name);
	tokio::fs::write(&path, contents)
		.await
		.map_err(|source| BuildError::Io {
			path: path.clone(),
			source,
		})?;

	tracing::debug!("Wrote {} ({} bytes)", path.display(), contents.len());
	Ok(path)
}

/// Writes the full document: template, rendered body and closing tag.
pub async fn write_document(dir: &Path, template: &str, body_html: &str) -> BuildResult<PathBuf> {
	let document = format!("{template}{body_html}{DOCUMENT_END}");
	write_artifact(dir, INDEX_HTML_FILE, &document).await
}

/// Writes the normalized tree as pretty-printed JSON.
pub async fn write_page_json(dir: &Path, tree: &Child) -> BuildResult<PathBuf> {
	let json = serde_json::to_string_pretty(tree)?;
	write_artifact(dir, PAGE_JSON_FILE, &json).await
}

/// Writes the transformed hydration script.
pub async fn write_page_data(dir: &Path, code: &str) -> BuildResult<PathBuf> {
	write_artifact(dir, PAGE_DATA_FILE, code).await
}
