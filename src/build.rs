//! Page build orchestration
//!
//! Builds every page into `index.html` (or `page.json`) and `page_data.js`,
//! with pluggable script transformer, SSR renderer and template generator.

pub use elegance_build::*;
