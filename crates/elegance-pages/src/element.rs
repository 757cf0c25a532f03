//! Element tree data model.
//!
//! Page-definition code produces a tree of [`Child`] values. Each element has a
//! tag, an *options* slot and an optional children list. Before normalization
//! the options slot may hold a child that was passed positionally
//! ([`Options::Child`]); after normalization it is always an attribute map.

use crate::attribute::{ObjectAttribute, ObserverAttribute, ReferenceAttribute, StateAttribute};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Insertion-ordered option map of an element.
///
/// Removing a key and inserting it again moves it to the end, which is the
/// order the rendered markup and `page.json` follow.
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// A node in the page tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Child {
	/// Text content.
	Text(String),
	/// Markup assigned through `innerHTML`, rendered without escaping.
	///
	/// Serializes as a plain string, like [`Child::Text`].
	Markup(String),
	/// Numeric content.
	Number(f64),
	/// Boolean content.
	Bool(bool),
	/// An ordered list of children without a wrapper element.
	Fragment(Vec<Child>),
	/// An element node.
	Element(Box<Element>),
}

impl Child {
	/// Converts a JSON value into a child.
	///
	/// Arrays become fragments, `null` becomes an empty fragment and objects
	/// become their JSON text.
	pub fn from_json(value: Value) -> Self {
		match value {
			Value::Null => Self::Fragment(Vec::new()),
			Value::Bool(b) => Self::Bool(b),
			Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
			Value::String(s) => Self::Text(s),
			Value::Array(items) => Self::Fragment(items.into_iter().map(Self::from_json).collect()),
			object @ Value::Object(_) => Self::Text(object.to_string()),
		}
	}

	/// Converts a JSON value assigned through `innerHTML` into a child.
	///
	/// Strings become [`Child::Markup`]; anything else converts as in
	/// [`Child::from_json`].
	pub fn from_markup_json(value: Value) -> Self {
		match value {
			Value::String(markup) => Self::Markup(markup),
			other => Self::from_json(other),
		}
	}

	/// Truthiness as the page-definition language sees it.
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Text(text) | Self::Markup(text) => !text.is_empty(),
			Self::Number(n) => *n != 0.0 && !n.is_nan(),
			Self::Bool(b) => *b,
			Self::Fragment(_) | Self::Element(_) => true,
		}
	}

	/// Returns the element, if this child is one.
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			Self::Element(element) => Some(element),
			_ => None,
		}
	}
}

impl From<&str> for Child {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for Child {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

impl From<f64> for Child {
	fn from(n: f64) -> Self {
		Self::Number(n)
	}
}

impl From<i32> for Child {
	fn from(n: i32) -> Self {
		Self::Number(f64::from(n))
	}
}

impl From<bool> for Child {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<Vec<Child>> for Child {
	fn from(children: Vec<Child>) -> Self {
		Self::Fragment(children)
	}
}

impl From<Element> for Child {
	fn from(element: Element) -> Self {
		Self::Element(Box::new(element))
	}
}

/// The options slot of an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Options {
	/// A genuine option map.
	Attributes(AttributeMap),
	/// A child placed where the options were expected.
	Child(Child),
}

impl Options {
	/// Truthiness of the slot; any option map is truthy.
	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Attributes(_) => true,
			Self::Child(child) => child.is_truthy(),
		}
	}
}

impl Default for Options {
	fn default() -> Self {
		Self::Attributes(AttributeMap::new())
	}
}

impl From<AttributeMap> for Options {
	fn from(map: AttributeMap) -> Self {
		Self::Attributes(map)
	}
}

impl From<Child> for Options {
	fn from(child: Child) -> Self {
		Self::Child(child)
	}
}

impl From<&str> for Options {
	fn from(text: &str) -> Self {
		Self::Child(Child::from(text))
	}
}

impl From<String> for Options {
	fn from(text: String) -> Self {
		Self::Child(Child::from(text))
	}
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
	/// Tag name.
	pub tag: String,
	/// Options slot.
	pub options: Options,
	/// Children; `None` for elements that cannot hold content.
	pub children: Option<Vec<Child>>,
}

impl Element {
	/// Creates an element.
	pub fn new(
		tag: impl Into<String>,
		options: impl Into<Options>,
		children: Option<Vec<Child>>,
	) -> Self {
		Self {
			tag: tag.into(),
			options: options.into(),
			children,
		}
	}

	/// Returns the option map, if the options slot holds one.
	pub fn attributes(&self) -> Option<&AttributeMap> {
		match &self.options {
			Options::Attributes(map) => Some(map),
			Options::Child(_) => None,
		}
	}

	/// Returns the option map mutably, if the options slot holds one.
	pub fn attributes_mut(&mut self) -> Option<&mut AttributeMap> {
		match &mut self.options {
			Options::Attributes(map) => Some(map),
			Options::Child(_) => None,
		}
	}

	/// Returns the option map, replacing a misplaced child with an empty map.
	pub fn attributes_or_default(&mut self) -> &mut AttributeMap {
		match self.options {
			Options::Attributes(ref mut map) => map,
			Options::Child(_) => {
				self.options = Options::Attributes(AttributeMap::new());
				self.attributes_or_default()
			}
		}
	}

	/// Whether this element has the full shape of an element: a non-empty tag,
	/// truthy options and a children list.
	pub fn has_element_shape(&self) -> bool {
		!self.tag.is_empty() && self.options.is_truthy() && self.children.is_some()
	}
}

/// A literal or reactive option value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
	/// A plain value.
	Literal(Value),
	/// A reactive value.
	Object(ObjectAttribute),
}

impl AttributeValue {
	/// Whether the value is object-shaped and must go through classification.
	///
	/// JSON object literals are object-shaped but carry no kind tag.
	pub fn is_object_shaped(&self) -> bool {
		matches!(self, Self::Object(_) | Self::Literal(Value::Object(_)))
	}
}

impl From<Value> for AttributeValue {
	fn from(value: Value) -> Self {
		Self::Literal(value)
	}
}

impl From<&str> for AttributeValue {
	fn from(value: &str) -> Self {
		Self::Literal(Value::from(value))
	}
}

impl From<String> for AttributeValue {
	fn from(value: String) -> Self {
		Self::Literal(Value::from(value))
	}
}

impl From<bool> for AttributeValue {
	fn from(value: bool) -> Self {
		Self::Literal(Value::from(value))
	}
}

impl From<i64> for AttributeValue {
	fn from(value: i64) -> Self {
		Self::Literal(Value::from(value))
	}
}

impl From<i32> for AttributeValue {
	fn from(value: i32) -> Self {
		Self::Literal(Value::from(value))
	}
}

impl From<u32> for AttributeValue {
	fn from(value: u32) -> Self {
		Self::Literal(Value::from(value))
	}
}

impl From<f64> for AttributeValue {
	fn from(value: f64) -> Self {
		Self::Literal(Value::from(value))
	}
}

impl From<ObjectAttribute> for AttributeValue {
	fn from(value: ObjectAttribute) -> Self {
		Self::Object(value)
	}
}

impl From<StateAttribute> for AttributeValue {
	fn from(value: StateAttribute) -> Self {
		Self::Object(ObjectAttribute::State(value))
	}
}

impl From<ObserverAttribute> for AttributeValue {
	fn from(value: ObserverAttribute) -> Self {
		Self::Object(ObjectAttribute::Observer(value))
	}
}

impl From<ReferenceAttribute> for AttributeValue {
	fn from(value: ReferenceAttribute) -> Self {
		Self::Object(ObjectAttribute::Reference(value))
	}
}

/// Builds an [`AttributeMap`] from `name => value` pairs.
///
/// ```ignore
/// let options = attrs! {
///     "class" => "counter",
///     "innerText" => scope.observe([count.to_ref()], "(c) => `Count: ${c}`", render),
/// };
/// ```
#[macro_export]
macro_rules! attrs {
	() => {
		$crate::element::AttributeMap::new()
	};
	($($name:expr => $value:expr),+ $(,)?) => {{
		let mut map = $crate::element::AttributeMap::new();
		$(
			map.insert(
				::std::string::String::from($name),
				$crate::element::AttributeValue::from($value),
			);
		)+
		map
	}};
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case::empty_text(Child::from(""), false)]
	#[case::text(Child::from("a"), true)]
	#[case::zero(Child::from(0), false)]
	#[case::nan(Child::Number(f64::NAN), false)]
	#[case::number(Child::from(2), true)]
	#[case::false_(Child::from(false), false)]
	#[case::empty_fragment(Child::Fragment(vec![]), true)]
	fn test_child_truthiness(#[case] child: Child, #[case] expected: bool) {
		assert_eq!(child.is_truthy(), expected);
	}

	#[rstest]
	fn test_child_from_json() {
		assert_eq!(Child::from_json(json!("x")), Child::from("x"));
		assert_eq!(Child::from_json(json!(3)), Child::Number(3.0));
		assert_eq!(Child::from_json(Value::Null), Child::Fragment(vec![]));
		assert_eq!(
			Child::from_json(json!([1, "a"])),
			Child::Fragment(vec![Child::Number(1.0), Child::from("a")])
		);
		assert_eq!(Child::from_json(json!({"a": 1})), Child::from(r#"{"a":1}"#));
	}

	#[rstest]
	fn test_element_shape_requires_children() {
		let full = Element::new("span", AttributeMap::new(), Some(vec![]));
		let void = Element::new("input", AttributeMap::new(), None);
		let untagged = Element::new("", AttributeMap::new(), Some(vec![]));
		let falsy_options = Element::new("span", "", Some(vec![]));

		assert!(full.has_element_shape());
		assert!(!void.has_element_shape());
		assert!(!untagged.has_element_shape());
		assert!(!falsy_options.has_element_shape());
	}

	#[rstest]
	fn test_attributes_or_default_replaces_misplaced_child() {
		let mut misplaced = Element::new("p", "text", Some(vec![]));
		let mut attributed = Element::new("p", attrs! { "id" => "a" }, Some(vec![]));

		misplaced.attributes_or_default().insert("id".into(), "b".into());

		assert_eq!(misplaced.options, Options::Attributes(attrs! { "id" => "b" }));
		assert_eq!(attributed.attributes_or_default().len(), 1);
	}

	#[rstest]
	fn test_object_shaped_values() {
		assert!(AttributeValue::from(json!({"x": 1})).is_object_shaped());
		assert!(!AttributeValue::from(json!([1, 2])).is_object_shaped());
		assert!(!AttributeValue::from(Value::Null).is_object_shaped());
		assert!(!AttributeValue::from("x").is_object_shaped());
	}

	#[rstest]
	fn test_attrs_macro_preserves_order() {
		let map = attrs! { "b" => 1, "a" => "x" };
		let keys: Vec<_> = map.keys().cloned().collect();
		assert_eq!(keys, vec!["b", "a"]);
	}

	#[rstest]
	fn test_element_serializes_to_tree_json() {
		let element = Element::new("p", attrs! { "class" => "x" }, Some(vec!["hi".into()]));
		let json = serde_json::to_value(&element).unwrap();
		assert_eq!(
			json,
			json!({"tag": "p", "options": {"class": "x"}, "children": ["hi"]})
		);
	}
}
