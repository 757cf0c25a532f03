//! # Elegance
//!
//! A build-time page compiler.
//!
//! Page code produces element trees whose options may carry reactive state,
//! observers and DOM references. Elegance normalizes those trees, assigns
//! element keys, records every binding, and emits for each page a static
//! document plus a hydration payload the client runtime consumes.
//!
//! ## Crates
//!
//! - [`pages`]: Element trees, normalizer, hydration serializer, SSR renderer
//! - [`conf`]: Build settings
//! - [`build`]: Page build orchestrator
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use elegance::prelude::*;
//! use elegance::pages::builder::{button, div, title};
//!
//! let registry = PageRegistry::new()
//!     .page("counter", |scope| {
//!         let count = scope.create_state(0);
//!         div(attrs! {}, vec![button(attrs! { "dataCount" => count }, vec!["+".into()])])
//!     })
//!     .metadata("counter", |_| title(attrs! {}, vec!["Counter".into()]));
//!
//! let settings = BuildSettings::load("elegance.toml")?;
//! init_logging(&settings.logging);
//!
//! let report = PageBuildOrchestrator::from_registry(registry, settings)
//!     .build_all()
//!     .await?;
//! ```

pub mod build;
pub mod conf;
pub mod pages;

/// Commonly used types.
pub mod prelude {
	pub use crate::build::logging::init_logging;
	pub use crate::build::{
		BuildError, BuildReport, PageBuildOrchestrator, PageRegistry, ScriptTransformer,
		SsrRenderer, TemplateGenerator,
	};
	pub use crate::conf::{BuildSettings, Environment};
	pub use crate::pages::{Child, Element, Normalizer, PageScope, attrs};
}
