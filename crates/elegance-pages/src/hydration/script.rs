//! Client-code literal helpers.
//!
//! The hydration payload mixes JSON data with verbatim function source, so it
//! is assembled as text. These helpers produce the individual literals.

use crate::attribute::{BindKey, StateValue};
use serde_json::Value;

/// Double-quoted, escaped string literal.
pub fn quoted(text: &str) -> String {
	Value::String(text.to_string()).to_string()
}

/// Literal for the value of a state cell.
///
/// Strings are emitted as a quoted JSON string (the client parses them a
/// second time), sources verbatim, everything else as JSON.
pub fn state_value(value: &StateValue) -> String {
	match value {
		StateValue::Literal(Value::String(text)) => quoted(&quoted(text)),
		StateValue::Literal(other) => other.to_string(),
		StateValue::Source(source) => source.as_str().to_string(),
	}
}

/// JSON literal of a bound value.
pub fn json_value(value: &StateValue) -> String {
	match value {
		StateValue::Literal(value) => value.to_string(),
		StateValue::Source(source) => source.as_str().to_string(),
	}
}

/// Emits `,bind:<key>` when a bind group is present.
///
/// See [`BindKey::to_literal`] for how the key is written.
pub fn push_bind(out: &mut String, bind: Option<&BindKey>) {
	if let Some(bind) = bind {
		out.push_str(",bind:");
		out.push_str(&bind.to_literal());
	}
}
