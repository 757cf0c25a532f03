//! Element tree normalization.
//!
//! A [`Normalizer`] is the processing context of one page pass. It walks the
//! raw tree produced by page code, moves children that were passed in the
//! options slot back into the children list, rewrites option names, and
//! collects every dynamic binding it finds.
//!
//! ## Example
//!
//! ```ignore
//! use elegance_pages::{Normalizer, attrs, builder::div};
//!
//! let mut normalizer = Normalizer::new();
//! let tree = normalizer.normalize(div(attrs! { "dataFoo" => "x" }, vec![]))?;
//! let bindings = normalizer.into_bindings();
//! ```

mod classify;
mod shape;

pub use classify::{KEY_OPTION, REF_OPTION};
pub use shape::OptionsShape;

use crate::binding::{Binding, ElementKeyAllocator};
use crate::element::{AttributeMap, AttributeValue, Child, Element, Options};
use crate::error::{NormalizeError, NormalizeResult};
use serde_json::Value;

/// Lower-cased name of the option that prepends text content.
pub const INNER_TEXT: &str = "innertext";

/// Lower-cased name of the option that replaces the content.
pub const INNER_HTML: &str = "innerhtml";

/// Processing context of one page pass.
#[derive(Debug, Default)]
pub struct Normalizer {
	keys: ElementKeyAllocator,
	bindings: Vec<Binding>,
}

impl Normalizer {
	/// Creates a context whose first element key is `0`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Normalizes a child.
	///
	/// Text, numbers, booleans and fragments are returned unchanged.
	pub fn normalize(&mut self, child: Child) -> NormalizeResult<Child> {
		match child {
			Child::Element(element) => {
				let element = self.normalize_element(*element)?;
				Ok(Child::Element(Box::new(element)))
			}
			other => Ok(other),
		}
	}

	/// Bindings collected so far, in discovery order.
	pub fn bindings(&self) -> &[Binding] {
		&self.bindings
	}

	/// Consumes the context, returning the collected bindings.
	pub fn into_bindings(self) -> Vec<Binding> {
		self.bindings
	}

	/// Number of element keys allocated in this pass.
	pub fn keys_allocated(&self) -> u32 {
		self.keys.allocated()
	}

	/// Drops all bindings and restarts element keys at `0`.
	pub fn reset(&mut self) {
		self.keys.reset();
		self.bindings.clear();
	}

	fn normalize_element(&mut self, mut element: Element) -> NormalizeResult<Element> {
		let options = std::mem::take(&mut element.options);
		let map = match OptionsShape::parse(&element.tag, options)? {
			OptionsShape::MisplacedChild(child) => {
				tracing::trace!(tag = %element.tag, "moving misplaced child out of options");
				let mut children = element.children.take().unwrap_or_default();
				children.insert(0, child);
				element.children = Some(self.normalize_all(children)?);
				return Ok(element);
			}
			OptionsShape::Attributes(map) => map,
		};

		let entries: Vec<(String, AttributeValue)> =
			map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
		element.options = Options::Attributes(map);

		for (name, value) in entries {
			if value.is_object_shaped() {
				self.classify(&mut element, &name, value)?;
			} else {
				rewrite_plain_option(&mut element, &name, value)?;
			}
		}

		if let Some(children) = element.children.take() {
			element.children = Some(self.normalize_all(children)?);
		}

		Ok(element)
	}

	fn normalize_all(&mut self, children: Vec<Child>) -> NormalizeResult<Vec<Child>> {
		children.into_iter().map(|child| self.normalize(child)).collect()
	}
}

fn rewrite_plain_option(
	element: &mut Element,
	name: &str,
	value: AttributeValue,
) -> NormalizeResult<()> {
	let lowered = name.to_lowercase();
	let options: &mut AttributeMap = element.attributes_or_default();
	options.shift_remove(name);

	if lowered != INNER_TEXT && lowered != INNER_HTML {
		options.insert(kebab_case(name), value);
		return Ok(());
	}

	let raw = match value {
		AttributeValue::Literal(raw) => raw,
		AttributeValue::Object(_) => Value::Null,
	};
	let Some(children) = element.children.as_mut() else {
		return Err(NormalizeError::ChildlessElement {
			tag: element.tag.clone(),
			option: name.to_string(),
		});
	};

	if lowered == INNER_TEXT {
		children.insert(0, Child::from_json(raw));
	} else {
		*children = vec![Child::from_markup_json(raw)];
	}
	Ok(())
}

/// Converts a camel-cased option name to the kebab-cased attribute name.
///
/// `dataFoo` becomes `data-foo`; names that are already kebab-cased are
/// returned lower-cased.
pub fn kebab_case(name: &str) -> String {
	let mut out = String::with_capacity(name.len() + 4);
	let mut prev: Option<char> = None;
	for c in name.chars() {
		if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
			out.push('-');
		}
		out.extend(c.to_lowercase());
		prev = Some(c);
	}
	out
}
