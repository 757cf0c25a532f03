//! Options-slot disambiguation.
//!
//! Before any option is processed, the options slot of an element is parsed
//! into either a genuine attribute map or a child that the author passed
//! positionally. The checks run in a fixed order:
//!
//! 1. a non-element child (text, number, boolean, fragment) is a misplaced child
//! 2. an element with the full element shape is a misplaced child
//! 3. an element without that shape is read as a plain map of its fields, whose
//!    `options` entry is an untyped object and is rejected
//! 4. an attribute map is taken as is

use crate::element::{AttributeMap, Child, Options};
use crate::error::{NormalizeError, NormalizeResult};

/// Parsed options slot.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsShape {
	/// The slot holds genuine options.
	Attributes(AttributeMap),
	/// The slot holds a child that belongs at the front of the children list.
	MisplacedChild(Child),
}

impl OptionsShape {
	/// Parses the options slot of the element tagged `tag`.
	pub fn parse(tag: &str, options: Options) -> NormalizeResult<Self> {
		match options {
			Options::Attributes(map) => Ok(Self::Attributes(map)),
			Options::Child(Child::Element(element)) => {
				if element.has_element_shape() {
					Ok(Self::MisplacedChild(Child::Element(element)))
				} else {
					Err(NormalizeError::MissingAttributeType {
						tag: tag.to_string(),
						option: "options".to_string(),
					})
				}
			}
			Options::Child(child) => Ok(Self::MisplacedChild(child)),
		}
	}
}
