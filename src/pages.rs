//! Element trees, normalization and hydration payloads
//!
//! This module provides access to elegance-pages, the compiler core that turns
//! page element trees into static markup plus a client hydration payload.
//!
//! ## Architecture
//!
//! - **Element Trees**: Elements, children and options produced by page code
//! - **Normalizer**: Canonical tree shape and binding classification
//! - **Hydration**: `page_data.js` payload serialization
//! - **SSR**: Static HTML rendering of normalized trees
//!
//! ## Example
//!
//! ```rust,ignore
//! use elegance::pages::{Normalizer, PageScope, attrs, builder::button, hydration};
//!
//! let mut scope = PageScope::new();
//! let count = scope.create_state(0);
//! let tree = button(attrs! { "dataCount" => count }, vec!["+".into()]);
//!
//! let mut normalizer = Normalizer::new();
//! let tree = normalizer.normalize(tree)?;
//! let script = hydration::serialize("/", scope.states(), normalizer.bindings(), scope.load_hooks());
//! ```

// Re-export all elegance-pages functionality
pub use elegance_pages::*;
