//! Elegance Build - page build orchestration
//!
//! Builds every page of a site into static output: a document (or the
//! normalized tree as JSON) and a hydration script per page.
//!
//! ## Architecture
//!
//! - [`orchestrator`]: Sequential page builds ([`PageBuildOrchestrator`])
//! - [`loader`]: Page module loading ([`PageModuleLoader`], [`PageRegistry`])
//! - [`transformer`]: Script transformer collaborator
//! - [`renderer`]: SSR renderer collaborator
//! - [`template`]: HTML template generator collaborator
//! - [`output`]: Artifact writers
//! - [`logging`]: Subscriber initialisation
//!
//! ## Example
//!
//! ```ignore
//! use elegance_build::{PageBuildOrchestrator, PageRegistry, logging::init_logging};
//! use elegance_conf::BuildSettings;
//! use elegance_pages::{attrs, builder::{body, h1, head, title}};
//!
//! let settings = BuildSettings::load("elegance.toml")?;
//! init_logging(&settings.logging);
//!
//! let registry = PageRegistry::new()
//!     .page("", |_| body(attrs! {}, vec![h1("Home", vec![])]))
//!     .metadata("", |_| head(attrs! {}, vec![title("Home", vec![])]));
//!
//! let report = PageBuildOrchestrator::from_registry(registry, settings).build_all().await?;
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod renderer;
pub mod template;
pub mod transformer;

pub use error::{BuildError, BuildResult};
pub use loader::{LoadedPage, PageModuleLoader, PageRegistry};
pub use orchestrator::{BuildReport, PageBuildOrchestrator, PageBuildResult, PageFailure};
pub use renderer::{RenderOutput, SsrRenderer, StaticHtmlRenderer};
pub use template::{DocumentTemplate, TemplateContext, TemplateGenerator};
pub use transformer::{PassthroughTransformer, ScriptTransformer, TransformOutput};
