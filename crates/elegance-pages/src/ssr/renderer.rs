//! Static HTML rendering of normalized trees.

use crate::element::{AttributeMap, AttributeValue, Child, Element};
use serde_json::Value;
use std::borrow::Cow;

/// Elements that never have content or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// HTML boolean attributes that are only emitted when truthy.
pub const BOOLEAN_ATTRS: &[&str] = &[
	"allowfullscreen",
	"async",
	"autofocus",
	"autoplay",
	"checked",
	"controls",
	"default",
	"defer",
	"disabled",
	"formnovalidate",
	"hidden",
	"inert",
	"ismap",
	"loop",
	"multiple",
	"muted",
	"nomodule",
	"novalidate",
	"open",
	"readonly",
	"required",
	"reversed",
	"selected",
];

/// Escapes text for use in HTML content and double-quoted attribute values.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

/// Renders a normalized tree to HTML.
///
/// Booleans render nothing and [`Child::Markup`] is written as is. Reactive
/// option values that were not resolved by normalization are skipped.
pub fn render_to_string(child: &Child) -> String {
	let mut output = String::new();
	render_child(child, &mut output);
	output
}

fn render_child(child: &Child, output: &mut String) {
	match child {
		Child::Text(text) => output.push_str(&html_escape(text)),
		Child::Markup(markup) => output.push_str(markup),
		Child::Number(n) => output.push_str(&format_number(*n)),
		Child::Bool(_) => {}
		Child::Fragment(children) => {
			for child in children {
				render_child(child, output);
			}
		}
		Child::Element(element) => render_element(element, output),
	}
}

fn render_element(element: &Element, output: &mut String) {
	output.push('<');
	output.push_str(&element.tag);
	if let Some(attributes) = element.attributes() {
		render_attributes(attributes, output);
	}

	let children = match &element.children {
		Some(children) if !VOID_ELEMENTS.contains(&element.tag.as_str()) => children,
		_ => {
			output.push_str(" />");
			return;
		}
	};

	output.push('>');
	for child in children {
		render_child(child, output);
	}
	output.push_str("</");
	output.push_str(&element.tag);
	output.push('>');
}

fn render_attributes(attributes: &AttributeMap, output: &mut String) {
	for (name, value) in attributes {
		let AttributeValue::Literal(value) = value else {
			continue;
		};
		let text = match value {
			Value::Null | Value::Bool(false) => continue,
			Value::Bool(true) => {
				output.push(' ');
				output.push_str(name);
				continue;
			}
			Value::String(s) => Cow::Borrowed(s.as_str()),
			Value::Number(n) => Cow::Owned(n.to_string()),
			other => Cow::Owned(other.to_string()),
		};
		if BOOLEAN_ATTRS.contains(&name.as_str()) && !is_boolean_attr_truthy(&text) {
			continue;
		}

		output.push(' ');
		output.push_str(name);
		output.push_str("=\"");
		output.push_str(&html_escape(&text));
		output.push('"');
	}
}

fn is_boolean_attr_truthy(value: &str) -> bool {
	!value.is_empty() && value != "false" && value != "0"
}

fn format_number(n: f64) -> String {
	if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
		format!("{}", n as i64)
	} else {
		n.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::attrs;
	use rstest::rstest;

	#[rstest]
	fn test_renders_nested_elements_with_escaping() {
		let tree = Child::from(Element::new(
			"div",
			attrs! { "class" => "a\"b", "data-n" => 3 },
			Some(vec![
				Child::from("x < y"),
				Element::new("span", attrs! {}, Some(vec![Child::from(2)])).into(),
			]),
		));

		assert_eq!(
			render_to_string(&tree),
			r#"<div class="a&quot;b" data-n="3">x &lt; y<span>2</span></div>"#
		);
	}

	#[rstest]
	fn test_markup_is_not_escaped() {
		let tree = Child::from(Element::new(
			"p",
			attrs! {},
			Some(vec![Child::Markup("<b>x</b>".into()), Child::from("<i>")]),
		));

		assert_eq!(render_to_string(&tree), "<p><b>x</b>&lt;i&gt;</p>");
	}

	#[rstest]
	#[case::childless(Element::new("input", attrs! { "type" => "text" }, None), r#"<input type="text" />"#)]
	#[case::void_tag(Element::new("br", attrs! {}, Some(vec![])), "<br />")]
	fn test_void_elements(#[case] element: Element, #[case] expected: &str) {
		assert_eq!(render_to_string(&element.into()), expected);
	}

	#[rstest]
	#[case::true_(attrs! { "disabled" => true }, "<button disabled></button>")]
	#[case::false_(attrs! { "disabled" => false }, "<button></button>")]
	#[case::string_false(attrs! { "disabled" => "false" }, "<button></button>")]
	#[case::null(attrs! { "title" => Value::Null }, "<button></button>")]
	fn test_boolean_and_null_attributes(#[case] options: AttributeMap, #[case] expected: &str) {
		let button = Element::new("button", options, Some(vec![]));
		assert_eq!(render_to_string(&button.into()), expected);
	}

	#[rstest]
	#[case(3.0, "3")]
	#[case(-2.0, "-2")]
	#[case(1.5, "1.5")]
	fn test_format_number(#[case] n: f64, #[case] expected: &str) {
		assert_eq!(format_number(n), expected);
	}
}
