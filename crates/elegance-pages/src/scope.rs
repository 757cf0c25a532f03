//! Page evaluation scope.
//!
//! A [`PageScope`] is created fresh for every page before its definition code
//! runs. It owns the page's state cells and load hooks and hands out the
//! object attributes that page code places on elements.
//!
//! ## Example
//!
//! ```ignore
//! use elegance_pages::{PageScope, attrs, builder::{body, button}};
//! use serde_json::{Value, json};
//!
//! let mut scope = PageScope::new();
//! let count = scope.create_state(0);
//! let label = scope.observe([count.to_ref()], "(c) => `Count: ${c}`", |args| {
//!     json!(format!("Count: {}", args[0]))
//! });
//! scope.create_load_hook("() => console.log('ready')");
//!
//! let page = body(attrs! {}, vec![button(attrs! { "innerText" => label }, vec![])]);
//! ```

use crate::attribute::{
	BindKey, JsSource, ObserverAttribute, ObserverUpdate, ReferenceAttribute, StateAttribute,
	StateId, StateRef, StateValue,
};
use serde_json::Value;

/// A state cell live during one page evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct StateCell {
	/// Cell identifier, unique within the page.
	pub id: StateId,
	/// Current value.
	pub value: StateValue,
	/// Bind group, if the cell belongs to one.
	pub bind: Option<BindKey>,
	/// Cells passed to a client-side listener, in argument order.
	pub deps: Vec<StateRef>,
}

impl StateCell {
	/// Whether the cell belongs to a bind group.
	pub fn is_bound(&self) -> bool {
		self.bind.is_some()
	}

	/// Returns the option value that binds an element to this cell.
	pub fn to_attribute(&self) -> StateAttribute {
		StateAttribute {
			id: self.id,
			value: self.value.clone(),
			bind: self.bind.clone(),
		}
	}
}

/// A function run on the client when the page becomes active.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadHook {
	/// Client source of the hook.
	pub source: JsSource,
	/// Bind group the hook is scoped to.
	pub bind: Option<BindKey>,
	/// Cells passed to the hook, in argument order.
	pub deps: Vec<StateRef>,
}

/// Per-page registry of state cells and load hooks.
#[derive(Debug, Default)]
pub struct PageScope {
	next_state_id: u32,
	states: Vec<StateCell>,
	load_hooks: Vec<LoadHook>,
}

impl PageScope {
	/// Creates an empty scope.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an unbound state cell.
	pub fn create_state(&mut self, value: impl Into<Value>) -> StateAttribute {
		self.push_state(StateValue::Literal(value.into()), None, Vec::new())
	}

	/// Creates a state cell in a bind group.
	pub fn create_bound_state(
		&mut self,
		value: impl Into<Value>,
		bind: impl Into<BindKey>,
	) -> StateAttribute {
		self.push_state(StateValue::Literal(value.into()), Some(bind.into()), Vec::new())
	}

	/// Creates a state cell holding a client-side event listener.
	///
	/// Options bound to such a cell are not rendered into the markup.
	pub fn create_event_listener(&mut self, source: impl Into<JsSource>) -> StateAttribute {
		self.push_state(StateValue::Source(source.into()), None, Vec::new())
	}

	/// Creates an event listener that receives the given cells after the event.
	///
	/// ```ignore
	/// let on_click = scope.create_event_listener_with_deps(
	///     [counter.to_ref()],
	///     "(_, counter) => { counter.value++; counter.signal(); }",
	/// );
	/// ```
	pub fn create_event_listener_with_deps<I>(
		&mut self,
		deps: I,
		source: impl Into<JsSource>,
	) -> StateAttribute
	where
		I: IntoIterator<Item = StateRef>,
	{
		self.push_state(
			StateValue::Source(source.into()),
			None,
			deps.into_iter().collect(),
		)
	}

	/// Creates an observer over the given cells.
	///
	/// The initial arguments are the current values of the referenced cells;
	/// cells holding client-side source contribute `null`.
	pub fn observe<I, F>(
		&self,
		refs: I,
		source: impl Into<JsSource>,
		evaluate: F,
	) -> ObserverAttribute
	where
		I: IntoIterator<Item = StateRef>,
		F: Fn(&[Value]) -> Value + Send + Sync + 'static,
	{
		let refs: Vec<StateRef> = refs.into_iter().collect();
		let initial_values = refs
			.iter()
			.map(|r| {
				self.state(r.id)
					.and_then(|cell| cell.value.as_literal().cloned())
					.unwrap_or(Value::Null)
			})
			.collect();

		ObserverAttribute {
			update: ObserverUpdate::new(source, evaluate),
			refs,
			initial_values,
		}
	}

	/// Creates a DOM reference option.
	pub fn create_reference(&self, value: impl Into<Value>) -> ReferenceAttribute {
		ReferenceAttribute {
			value: value.into(),
		}
	}

	/// Registers an unscoped load hook.
	pub fn create_load_hook(&mut self, source: impl Into<JsSource>) {
		self.load_hooks.push(LoadHook {
			source: source.into(),
			bind: None,
			deps: Vec::new(),
		});
	}

	/// Registers an unscoped load hook that receives the given cells.
	pub fn create_load_hook_with_deps<I>(&mut self, deps: I, source: impl Into<JsSource>)
	where
		I: IntoIterator<Item = StateRef>,
	{
		self.load_hooks.push(LoadHook {
			source: source.into(),
			bind: None,
			deps: deps.into_iter().collect(),
		});
	}

	/// Registers a load hook scoped to a bind group.
	pub fn create_bound_load_hook(&mut self, source: impl Into<JsSource>, bind: impl Into<BindKey>) {
		self.load_hooks.push(LoadHook {
			source: source.into(),
			bind: Some(bind.into()),
			deps: Vec::new(),
		});
	}

	/// Looks up a state cell.
	pub fn state(&self, id: StateId) -> Option<&StateCell> {
		self.states.iter().find(|cell| cell.id == id)
	}

	/// All state cells, in creation order.
	pub fn states(&self) -> &[StateCell] {
		&self.states
	}

	/// All load hooks, in registration order.
	pub fn load_hooks(&self) -> &[LoadHook] {
		&self.load_hooks
	}

	/// Consumes the scope, returning its cells and hooks.
	pub fn into_parts(self) -> (Vec<StateCell>, Vec<LoadHook>) {
		(self.states, self.load_hooks)
	}

	fn push_state(
		&mut self,
		value: StateValue,
		bind: Option<BindKey>,
		deps: Vec<StateRef>,
	) -> StateAttribute {
		let cell = StateCell {
			id: StateId(self.next_state_id),
			value,
			bind,
			deps,
		};
		self.next_state_id += 1;
		let attribute = cell.to_attribute();
		self.states.push(cell);
		attribute
	}
}
