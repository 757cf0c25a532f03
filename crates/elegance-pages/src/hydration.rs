//! Hydration payload generation.
//!
//! After a page is normalized, its state cells, bindings and load hooks are
//! turned into a script that the client runtime executes to attach reactive
//! behavior to the static markup.

pub mod script;
mod serializer;

pub use serializer::{HydrationScript, PAGE_DATA_VAR, page_url, serialize};
