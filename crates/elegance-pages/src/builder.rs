//! Element construction helpers.
//!
//! These build raw, not yet normalized trees. The options argument accepts an
//! attribute map as well as a child passed positionally, which normalization
//! moves to the front of the children list.
//!
//! ## Example
//!
//! ```ignore
//! use elegance_pages::{attrs, builder::{body, h1, p}};
//!
//! let page = body(attrs! { "class" => "home" }, vec![
//!     h1("Welcome", vec![]),
//!     p(attrs! { "innerText" => "Hello" }, vec![]),
//! ]);
//! ```

use crate::element::{Child, Element, Options};

/// Creates an element that holds children.
pub fn element(tag: &str, options: impl Into<Options>, children: Vec<Child>) -> Child {
	Child::from(Element::new(tag, options, Some(children)))
}

/// Creates an element that cannot hold children.
pub fn void_element(tag: &str, options: impl Into<Options>) -> Child {
	Child::from(Element::new(tag, options, None))
}

macro_rules! define_element {
	($($(#[$meta:meta])* $name:ident, $tag:literal;)+) => {
		$(
			$(#[$meta])*
			pub fn $name(options: impl Into<Options>, children: Vec<Child>) -> Child {
				element($tag, options, children)
			}
		)+
	};
}

macro_rules! define_void_element {
	($($(#[$meta:meta])* $name:ident, $tag:literal;)+) => {
		$(
			$(#[$meta])*
			pub fn $name(options: impl Into<Options>) -> Child {
				void_element($tag, options)
			}
		)+
	};
}

define_element! {
	/// Create a `<html>` element
	html, "html";
	/// Create a `<head>` element
	head, "head";
	/// Create a `<body>` element
	body, "body";
	/// Create a `<title>` element
	title, "title";
	/// Create a `<script>` element
	script, "script";
	/// Create a `<style>` element
	style, "style";
	/// Create a `<main>` element
	main, "main";
	/// Create a `<section>` element
	section, "section";
	/// Create a `<div>` element
	div, "div";
	/// Create a `<span>` element
	span, "span";
	/// Create a `<p>` element
	p, "p";
	/// Create a `<h1>` element
	h1, "h1";
	/// Create a `<h2>` element
	h2, "h2";
	/// Create a `<a>` element
	a, "a";
	/// Create a `<button>` element
	button, "button";
	/// Create a `<ul>` element
	ul, "ul";
	/// Create a `<li>` element
	li, "li";
}

define_void_element! {
	/// Create a `<meta>` element
	meta, "meta";
	/// Create a `<link>` element
	link, "link";
	/// Create a `<input>` element
	input, "input";
	/// Create a `<img>` element
	img, "img";
	/// Create a `<br>` element
	br, "br";
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::attrs;
	use rstest::rstest;

	#[rstest]
	fn test_tag_functions_build_elements() {
		let tree = div(attrs! { "id" => "x" }, vec![p("text", vec![])]);

		let element = tree.as_element().unwrap();
		assert_eq!(element.tag, "div");
		let child = element.children.as_ref().unwrap()[0].as_element().unwrap();
		assert_eq!(child.tag, "p");
		assert_eq!(child.options, Options::from("text"));
	}

	#[rstest]
	fn test_void_elements_have_no_children() {
		let tree = meta(attrs! { "charset" => "utf-8" });
		assert_eq!(tree.as_element().unwrap().children, None);
	}
}
