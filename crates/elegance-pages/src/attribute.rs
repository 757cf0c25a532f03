//! Reactive option values.
//!
//! An option on an element is either a plain literal or an *object attribute*
//! carrying reactive semantics. Object attributes come in three kinds:
//!
//! - [`StateAttribute`]: the current value of a state cell, kept in sync on the client
//! - [`ObserverAttribute`]: a value computed from one or more state cells
//! - [`ReferenceAttribute`]: a DOM handle registration
//!
//! Values that only exist as client code (event listeners, observer updates,
//! load hooks) are captured as [`JsSource`] when they are declared, so they can
//! be emitted verbatim into the hydration script later on.

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Identifier of a state cell within one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StateId(pub u32);

impl fmt::Display for StateId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Key of a bind group.
///
/// Numeric and identifier keys are emitted verbatim into the hydration script
/// (as object keys and as references). Any other key is emitted as a quoted
/// string literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BindKey(String);

impl BindKey {
	/// Creates a bind key from its textual form.
	pub fn new(key: impl Into<String>) -> Self {
		Self(key.into())
	}

	/// Returns the key as emitted into client code.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns the key as a client-code literal.
	///
	/// Unsigned integers and identifiers (`[A-Za-z_$][A-Za-z0-9_$]*`) are
	/// returned verbatim, anything else as a double-quoted string.
	pub fn to_literal(&self) -> String {
		if self.is_verbatim() {
			self.0.clone()
		} else {
			Value::String(self.0.clone()).to_string()
		}
	}

	fn is_verbatim(&self) -> bool {
		let mut chars = self.0.chars();
		match chars.next() {
			Some(first) if first.is_ascii_digit() => self.0.bytes().all(|b| b.is_ascii_digit()),
			Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
				chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
			}
			_ => false,
		}
	}
}

impl fmt::Display for BindKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<u32> for BindKey {
	fn from(key: u32) -> Self {
		Self(key.to_string())
	}
}

impl From<&str> for BindKey {
	fn from(key: &str) -> Self {
		Self(key.to_string())
	}
}

impl From<String> for BindKey {
	fn from(key: String) -> Self {
		Self(key)
	}
}

/// Verbatim client source text of a function or expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct JsSource(String);

impl JsSource {
	/// Wraps author-written source text.
	pub fn new(source: impl Into<String>) -> Self {
		Self(source.into())
	}

	/// Returns the source text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for JsSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for JsSource {
	fn from(source: &str) -> Self {
		Self(source.to_string())
	}
}

impl From<String> for JsSource {
	fn from(source: String) -> Self {
		Self(source)
	}
}

/// Value held by a state cell: either data or client-only source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StateValue {
	/// Plain data, serialized as JSON.
	Literal(Value),
	/// A function resolved on the client only.
	Source(JsSource),
}

impl StateValue {
	/// Returns `true` for client-only function values.
	pub fn is_source(&self) -> bool {
		matches!(self, Self::Source(_))
	}

	/// Returns the literal value, if any.
	pub fn as_literal(&self) -> Option<&Value> {
		match self {
			Self::Literal(value) => Some(value),
			Self::Source(_) => None,
		}
	}
}

impl From<Value> for StateValue {
	fn from(value: Value) -> Self {
		Self::Literal(value)
	}
}

impl From<JsSource> for StateValue {
	fn from(source: JsSource) -> Self {
		Self::Source(source)
	}
}

/// Dependency of an observer on a state cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateRef {
	/// Referenced state cell.
	pub id: StateId,
	/// Bind group of the referenced cell.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bind: Option<BindKey>,
}

/// Server-side evaluator of an observer update.
pub type ObserverFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Update function of an observer.
///
/// Holds the client source text together with an equivalent server-side
/// evaluator used to compute the first rendered value. Two updates compare
/// equal when their source text is equal.
#[derive(Clone)]
pub struct ObserverUpdate {
	source: JsSource,
	evaluate: Arc<ObserverFn>,
}

impl ObserverUpdate {
	/// Creates an update from its client source and server evaluator.
	pub fn new<F>(source: impl Into<JsSource>, evaluate: F) -> Self
	where
		F: Fn(&[Value]) -> Value + Send + Sync + 'static,
	{
		Self {
			source: source.into(),
			evaluate: Arc::new(evaluate),
		}
	}

	/// Returns the client source text.
	pub fn source(&self) -> &JsSource {
		&self.source
	}

	/// Runs the server-side evaluator.
	pub fn evaluate(&self, args: &[Value]) -> Value {
		(self.evaluate)(args)
	}
}

impl fmt::Debug for ObserverUpdate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObserverUpdate")
			.field("source", &self.source)
			.finish_non_exhaustive()
	}
}

impl PartialEq for ObserverUpdate {
	fn eq(&self, other: &Self) -> bool {
		self.source == other.source
	}
}

impl Serialize for ObserverUpdate {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.source.serialize(serializer)
	}
}

/// Option bound to a state cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateAttribute {
	/// The state cell.
	pub id: StateId,
	/// Current value of the cell.
	pub value: StateValue,
	/// Bind group of the cell.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub bind: Option<BindKey>,
}

impl StateAttribute {
	/// Returns a dependency reference to this cell.
	pub fn to_ref(&self) -> StateRef {
		StateRef {
			id: self.id,
			bind: self.bind.clone(),
		}
	}
}

/// Option computed from state cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObserverAttribute {
	/// Update function.
	pub update: ObserverUpdate,
	/// Cells the update depends on, in argument order.
	pub refs: Vec<StateRef>,
	/// Argument values for the first evaluation.
	pub initial_values: Vec<Value>,
}

impl ObserverAttribute {
	/// Computes the first rendered value.
	///
	/// Evaluated on every build; nothing is cached between builds.
	pub fn first_value(&self) -> Value {
		self.update.evaluate(&self.initial_values)
	}
}

/// Option registering a DOM handle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceAttribute {
	/// Opaque handle value.
	pub value: Value,
}

/// An option value with reactive semantics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectAttribute {
	/// Bound to a state cell.
	State(StateAttribute),
	/// Computed from state cells.
	Observer(ObserverAttribute),
	/// Registers a DOM handle.
	Reference(ReferenceAttribute),
}

impl ObjectAttribute {
	/// Returns the kind tag of this attribute.
	pub fn kind(&self) -> ObjectAttributeKind {
		match self {
			Self::State(_) => ObjectAttributeKind::State,
			Self::Observer(_) => ObjectAttributeKind::Observer,
			Self::Reference(_) => ObjectAttributeKind::Reference,
		}
	}
}

impl From<StateAttribute> for ObjectAttribute {
	fn from(attr: StateAttribute) -> Self {
		Self::State(attr)
	}
}

impl From<ObserverAttribute> for ObjectAttribute {
	fn from(attr: ObserverAttribute) -> Self {
		Self::Observer(attr)
	}
}

impl From<ReferenceAttribute> for ObjectAttribute {
	fn from(attr: ReferenceAttribute) -> Self {
		Self::Reference(attr)
	}
}

/// Kind tag of an [`ObjectAttribute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectAttributeKind {
	/// [`ObjectAttribute::State`]
	State,
	/// [`ObjectAttribute::Observer`]
	Observer,
	/// [`ObjectAttribute::Reference`]
	Reference,
}

impl fmt::Display for ObjectAttributeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::State => f.write_str("state"),
			Self::Observer => f.write_str("observer"),
			Self::Reference => f.write_str("reference"),
		}
	}
}
