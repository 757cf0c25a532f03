//! Elegance Pages - page trees, normalization and hydration payloads
//!
//! Page-definition code produces a raw tree of element descriptors. This crate
//! turns that tree into static markup plus the data a thin client runtime
//! needs to make the markup reactive again.
//!
//! ## Architecture
//!
//! - [`element`]: Element tree data model ([`Child`], [`Element`], options)
//! - [`attribute`]: Reactive option values (state, observer, reference)
//! - [`scope`]: Per-page state cells and load hooks ([`PageScope`])
//! - [`builder`]: Tag functions for building raw trees
//! - [`normalize`]: Tree normalization and attribute classification ([`Normalizer`])
//! - [`binding`]: Bindings extracted during normalization
//! - [`hydration`]: Hydration payload serializer
//! - [`ssr`]: Static HTML rendering of normalized trees
//!
//! ## Example
//!
//! ```ignore
//! use elegance_pages::{Normalizer, PageScope, attrs, builder::{body, button}, hydration};
//! use serde_json::json;
//!
//! let mut scope = PageScope::new();
//! let count = scope.create_state(0);
//! let label = scope.observe([count.to_ref()], "(c) => `Clicked ${c} times`", |args| {
//!     json!(format!("Clicked {} times", args[0]))
//! });
//!
//! let page = body(attrs! {}, vec![
//!     button(attrs! { "innerText" => label, "dataCount" => count }, vec![]),
//! ]);
//!
//! let mut normalizer = Normalizer::new();
//! let tree = normalizer.normalize(page)?;
//! let html = elegance_pages::ssr::render_to_string(&tree);
//! let script = hydration::serialize("/", scope.states(), normalizer.bindings(), scope.load_hooks());
//! ```

#![warn(missing_docs)]

pub mod attribute;
pub mod binding;
pub mod builder;
pub mod element;
pub mod error;
pub mod hydration;
pub mod normalize;
pub mod scope;
pub mod ssr;

pub use attribute::{
	BindKey, JsSource, ObjectAttribute, ObjectAttributeKind, ObserverAttribute, ObserverUpdate,
	ReferenceAttribute, StateAttribute, StateId, StateRef, StateValue,
};
pub use binding::{Binding, BindingSource, ElementKey, ElementKeyAllocator};
pub use element::{AttributeMap, AttributeValue, Child, Element, Options};
pub use error::{NormalizeError, NormalizeResult};
pub use hydration::{HydrationScript, page_url};
pub use normalize::{Normalizer, OptionsShape, kebab_case};
pub use scope::{LoadHook, PageScope, StateCell};
