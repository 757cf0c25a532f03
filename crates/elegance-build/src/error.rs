//! Build error types.
//!
//! Every variant except [`BuildError::Discovery`] is scoped to a single page;
//! the orchestrator logs it and continues with the next page.

use elegance_pages::NormalizeError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for build operations.
pub type BuildResult<T> = Result<T, BuildError>;

/// Page build errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
	/// The page module has no metadata export.
	#[error("page '{page}' does not export a metadata function")]
	MissingMetadataExport {
		/// Relative page path.
		page: String,
	},

	/// The page module has no page export.
	#[error("page '{page}' does not export a page element")]
	MissingPageExport {
		/// Relative page path.
		page: String,
	},

	/// The page tree could not be normalized.
	#[error("failed to process elements of page '{page}': {source}")]
	Normalize {
		/// Relative page path.
		page: String,
		/// Underlying normalization error.
		#[source]
		source: NormalizeError,
	},

	/// The script transformer failed.
	#[error("failed to transform hydration script of page '{page}': {message}")]
	Transform {
		/// Relative page path.
		page: String,
		/// Transformer error message.
		message: String,
	},

	/// The renderer or template generator failed.
	#[error("failed to render page '{page}': {message}")]
	Render {
		/// Relative page path.
		page: String,
		/// Renderer error message.
		message: String,
	},

	/// Page discovery failed; no page was built.
	#[error("failed to discover pages: {0}")]
	Discovery(String),

	/// An artifact could not be written.
	#[error("failed to write {}: {source}", path.display())]
	Io {
		/// Path being written.
		path: PathBuf,
		/// Underlying I/O error.
		#[source]
		source: std::io::Error,
	},

	/// The normalized tree could not be encoded.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

impl BuildError {
	/// Relative path of the page the error belongs to, if any.
	pub fn page(&self) -> Option<&str> {
		match self {
			Self::MissingMetadataExport { page }
			| Self::MissingPageExport { page }
			| Self::Normalize { page, .. }
			| Self::Transform { page, .. }
			| Self::Render { page, .. } => Some(page.as_str()),
			_ => None,
		}
	}
}
