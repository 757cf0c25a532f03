//! Error types for element normalization.

use thiserror::Error;

/// Errors raised while normalizing a page tree.
///
/// Either error aborts the current page only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NormalizeError {
	/// An object-shaped option carries no recognized attribute type.
	#[error("option '{option}' on <{tag}> is an object without an attribute type")]
	MissingAttributeType {
		/// Tag of the element holding the option.
		tag: String,
		/// Name of the option as written by the author.
		option: String,
	},

	/// `innerText` / `innerHTML` was set on an element created without children.
	#[error("option '{option}' on <{tag}> needs a children list, but the element has none")]
	ChildlessElement {
		/// Tag of the element holding the option.
		tag: String,
		/// Name of the option as written by the author.
		option: String,
	},
}

/// Result type for normalization.
pub type NormalizeResult<T> = Result<T, NormalizeError>;
