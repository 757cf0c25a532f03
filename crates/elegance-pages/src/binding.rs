//! Bindings extracted from a page tree.
//!
//! A [`Binding`] ties an element (by its [`ElementKey`]) and one of its
//! attributes to a reactive source. The client looks elements up by key when
//! it hydrates the static markup.

use crate::attribute::{ObjectAttributeKind, ObserverAttribute, ReferenceAttribute, StateAttribute};
use serde::Serialize;
use std::fmt;

/// Per-page identity of an element that carries bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ElementKey(pub u32);

impl fmt::Display for ElementKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Hands out element keys for one page pass.
#[derive(Debug, Default)]
pub struct ElementKeyAllocator {
	next: u32,
}

impl ElementKeyAllocator {
	/// Creates an allocator whose first key is `0`.
	pub fn new() -> Self {
		Self::default()
	}

	/// Allocates the next key.
	pub fn allocate(&mut self) -> ElementKey {
		let key = ElementKey(self.next);
		self.next += 1;
		key
	}

	/// Number of keys handed out so far.
	pub fn allocated(&self) -> u32 {
		self.next
	}

	/// Starts over at key `0`.
	pub fn reset(&mut self) {
		self.next = 0;
	}
}

/// The reactive source behind a binding, with the fields of the original attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum BindingSource {
	/// From a state option.
	State(StateAttribute),
	/// From an observer option.
	Observer(ObserverAttribute),
	/// From a reference option.
	Reference(ReferenceAttribute),
}

/// One extracted binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
	/// Key of the element the binding belongs to.
	pub key: ElementKey,
	/// Final attribute name on the client.
	pub attribute: String,
	/// Reactive source.
	pub source: BindingSource,
}

impl Binding {
	/// Kind of the attribute the binding was extracted from.
	pub fn kind(&self) -> ObjectAttributeKind {
		match self.source {
			BindingSource::State(_) => ObjectAttributeKind::State,
			BindingSource::Observer(_) => ObjectAttributeKind::Observer,
			BindingSource::Reference(_) => ObjectAttributeKind::Reference,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_allocator_counts_and_resets() {
		let mut keys = ElementKeyAllocator::new();
		assert_eq!(keys.allocate(), ElementKey(0));
		assert_eq!(keys.allocate(), ElementKey(1));
		assert_eq!(keys.allocated(), 2);

		keys.reset();
		assert_eq!(keys.allocate(), ElementKey(0));
	}
}
