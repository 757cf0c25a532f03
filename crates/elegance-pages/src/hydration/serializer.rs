//! Hydration data serializer.
//!
//! Produces the statement that registers a page's hydration payload in the
//! client's global page-data dictionary:
//!
//! ```text
//! pd["/blog"]={state:[{id:0,value:"\"hi\""}],soa:[{key:0,attribute:"title",id:0,value:"hi"}],};
//! ```
//!
//! Every present key is followed by a comma and absent keys are omitted.

use super::script::{json_value, push_bind, quoted, state_value};
use crate::attribute::{BindKey, StateRef};
use crate::binding::{Binding, BindingSource};
use crate::scope::{LoadHook, StateCell};
use indexmap::IndexMap;

/// Global dictionary the client runtime reads page payloads from.
pub const PAGE_DATA_VAR: &str = "pd";

/// Serialized hydration payload of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HydrationScript {
	/// Client code registering the payload. Not minified.
	pub code: String,
	/// Whether the client has to reload instead of patching in place.
	pub send_hard_reload_instruction: bool,
}

/// Returns the client URL of a page from its path relative to the pages root.
pub fn page_url(relative_path: &str) -> String {
	let trimmed = relative_path.trim_matches('/');
	if trimmed.is_empty() {
		"/".to_string()
	} else {
		format!("/{}", trimmed.replace('\\', "/"))
	}
}

/// Serializes the hydration payload for the page at `url`.
pub fn serialize(
	url: &str,
	states: &[StateCell],
	bindings: &[Binding],
	load_hooks: &[LoadHook],
) -> HydrationScript {
	let mut code = format!("{PAGE_DATA_VAR}[{}]={{", quoted(url));

	let (unbound, bound): (Vec<&StateCell>, Vec<&StateCell>) =
		states.iter().partition(|cell| cell.bind.is_none());

	if !unbound.is_empty() {
		let entries: Vec<String> = unbound.iter().map(|cell| state_entry(cell)).collect();
		code.push_str(&format!("state:[{}],", entries.join(",")));
	}

	if !bound.is_empty() {
		let mut groups: IndexMap<&BindKey, Vec<String>> = IndexMap::new();
		for cell in &bound {
			if let Some(bind) = &cell.bind {
				groups.entry(bind).or_default().push(state_entry(cell));
			}
		}
		let groups: Vec<String> = groups
			.iter()
			.map(|(bind, entries)| format!("{}:[{}]", bind.to_literal(), entries.join(",")))
			.collect();
		code.push_str(&format!("binds:{{{}}},", groups.join(",")));
	}

	let soa: Vec<String> = bindings.iter().filter_map(state_binding_entry).collect();
	if !soa.is_empty() {
		code.push_str(&format!("soa:[{}],", soa.join(",")));
	}

	let ooa: Vec<String> = bindings.iter().filter_map(observer_binding_entry).collect();
	if !ooa.is_empty() {
		code.push_str(&format!("ooa:[{}],", ooa.join(",")));
	}

	if !load_hooks.is_empty() {
		let hooks: Vec<String> = load_hooks.iter().map(load_hook_entry).collect();
		code.push_str(&format!("lh:[{}],", hooks.join(",")));
	}

	code.push_str("};");

	tracing::trace!(
		url,
		states = states.len(),
		bindings = bindings.len(),
		load_hooks = load_hooks.len(),
		"serialized hydration payload"
	);

	HydrationScript {
		code,
		send_hard_reload_instruction: false,
	}
}

fn state_entry(cell: &StateCell) -> String {
	let mut entry = format!("{{id:{},value:{}", cell.id, state_value(&cell.value));
	push_deps(&mut entry, &cell.deps);
	entry.push('}');
	entry
}

fn push_deps(out: &mut String, deps: &[StateRef]) {
	if deps.is_empty() {
		return;
	}
	let deps: Vec<String> = deps.iter().map(ref_entry).collect();
	out.push_str(&format!(",deps:[{}]", deps.join(",")));
}

fn state_binding_entry(binding: &Binding) -> Option<String> {
	let BindingSource::State(state) = &binding.source else {
		return None;
	};
	let mut entry = format!(
		"{{key:{},attribute:{},id:{},value:{}",
		binding.key,
		quoted(&binding.attribute),
		state.id,
		json_value(&state.value)
	);
	push_bind(&mut entry, state.bind.as_ref());
	entry.push('}');
	Some(entry)
}

fn observer_binding_entry(binding: &Binding) -> Option<String> {
	let BindingSource::Observer(observer) = &binding.source else {
		return None;
	};
	let refs: Vec<String> = observer.refs.iter().map(ref_entry).collect();
	Some(format!(
		"{{key:{},attribute:{},update:{},refs:[{}]}}",
		binding.key,
		quoted(&binding.attribute),
		observer.update.source(),
		refs.join(",")
	))
}

fn ref_entry(state_ref: &StateRef) -> String {
	let mut entry = format!("{{id:{}", state_ref.id);
	push_bind(&mut entry, state_ref.bind.as_ref());
	entry.push('}');
	entry
}

fn load_hook_entry(hook: &LoadHook) -> String {
	let bind = hook.bind.as_ref().map(BindKey::as_str).unwrap_or_default();
	let mut entry = format!("{{fn:{},bind:{}", hook.source, quoted(bind));
	push_deps(&mut entry, &hook.deps);
	entry.push('}');
	entry
}
