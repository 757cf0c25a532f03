//! Attribute classification.
//!
//! Handles a single object-shaped option of an element: gives the element a
//! stable key, rewrites the option in place and records the binding.

use super::Normalizer;
use crate::attribute::{ObjectAttribute, StateValue};
use crate::binding::{Binding, BindingSource, ElementKey};
use crate::element::{AttributeValue, Child, Element};
use crate::error::{NormalizeError, NormalizeResult};
use serde_json::Value;

/// Option name of the element key.
pub const KEY_OPTION: &str = "key";

/// Option name that reference attributes are rewritten to.
pub const REF_OPTION: &str = "ref";

impl Normalizer {
	/// Classifies the object-shaped option `name` of `element`.
	///
	/// Pushes at most one binding. A value without a kind tag is rejected
	/// before any binding is recorded.
	pub fn classify(
		&mut self,
		element: &mut Element,
		name: &str,
		value: AttributeValue,
	) -> NormalizeResult<()> {
		let attribute = match value {
			AttributeValue::Object(attribute) => attribute,
			AttributeValue::Literal(_) => {
				return Err(NormalizeError::MissingAttributeType {
					tag: element.tag.clone(),
					option: name.to_string(),
				});
			}
		};

		let lowered = name.to_lowercase();
		let key = self.element_key(element);
		tracing::trace!(
			tag = %element.tag,
			option = name,
			kind = %attribute.kind(),
			key = key.0,
			"classifying option"
		);

		match attribute {
			ObjectAttribute::State(state) => {
				let raw = match &state.value {
					StateValue::Source(_) => {
						element.attributes_or_default().shift_remove(name);
						return Ok(());
					}
					StateValue::Literal(raw) => raw.clone(),
				};
				apply_value(element, name, &lowered, raw);
				self.bindings.push(Binding {
					key,
					attribute: lowered,
					source: BindingSource::State(state),
				});
			}
			ObjectAttribute::Observer(observer) => {
				let raw = observer.first_value();
				apply_value(element, name, &lowered, raw);
				self.bindings.push(Binding {
					key,
					attribute: name.to_string(),
					source: BindingSource::Observer(observer),
				});
			}
			ObjectAttribute::Reference(reference) => {
				let options = element.attributes_or_default();
				options.shift_remove(name);
				options.insert(
					REF_OPTION.to_string(),
					AttributeValue::Literal(reference.value.clone()),
				);
				self.bindings.push(Binding {
					key,
					attribute: REF_OPTION.to_string(),
					source: BindingSource::Reference(reference),
				});
			}
		}

		Ok(())
	}

	/// Returns the element's key, allocating and storing one if it has none.
	fn element_key(&mut self, element: &mut Element) -> ElementKey {
		let options = element.attributes_or_default();
		if let Some(key) = options.get(KEY_OPTION).and_then(parse_key) {
			return key;
		}

		let key = self.keys.allocate();
		options.insert(KEY_OPTION.to_string(), AttributeValue::Literal(Value::from(key.0)));
		key
	}
}

fn parse_key(value: &AttributeValue) -> Option<ElementKey> {
	match value {
		AttributeValue::Literal(Value::Number(n)) => {
			n.as_u64().and_then(|n| u32::try_from(n).ok()).map(ElementKey)
		}
		AttributeValue::Literal(Value::String(s)) => s.parse().ok().map(ElementKey),
		_ => None,
	}
}

/// Writes a resolved value: into the children for `innerText` / `innerHTML`,
/// otherwise under the lower-cased option name.
fn apply_value(element: &mut Element, name: &str, lowered: &str, raw: Value) {
	element.attributes_or_default().shift_remove(name);
	if lowered == super::INNER_TEXT {
		element.children = Some(vec![Child::from_json(raw)]);
	} else if lowered == super::INNER_HTML {
		element.children = Some(vec![Child::from_markup_json(raw)]);
	} else {
		element
			.attributes_or_default()
			.insert(lowered.to_string(), AttributeValue::Literal(raw));
	}
}
