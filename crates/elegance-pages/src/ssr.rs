//! Server-side rendering of normalized page trees.

mod renderer;

pub use renderer::{BOOLEAN_ATTRS, VOID_ELEMENTS, html_escape, render_to_string};
