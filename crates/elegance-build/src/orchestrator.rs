//! Page build orchestration.
//!
//! Pages are built strictly one after another. For each page the orchestrator:
//!
//! 1. creates a fresh [`PageScope`] and [`Normalizer`]
//! 2. evaluates the page module
//! 3. normalizes the page tree
//! 4. writes `index.html` (HTML mode) or `page.json` (JSON mode); the page
//!    tree becomes the document `<body>` and the metadata tree its `<head>`
//! 5. serializes, transforms and writes `page_data.js`
//!
//! A failing page is logged and skipped; the remaining pages are still built.

use crate::error::{BuildError, BuildResult};
use crate::loader::{PageModuleLoader, PageRegistry};
use crate::output;
use crate::renderer::{SsrRenderer, StaticHtmlRenderer};
use crate::template::{
	DocumentTemplate, TemplateContext, TemplateGenerator, body_element, head_content,
};
use crate::transformer::{PassthroughTransformer, ScriptTransformer};
use elegance_conf::BuildSettings;
use elegance_pages::{Child, Normalizer, PageScope, hydration};
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of building one or more pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageBuildResult {
	/// Whether connected clients must fully reload.
	pub should_hard_reload: bool,
}

impl PageBuildResult {
	/// Folds another page's result into this one.
	pub fn merge(&mut self, other: PageBuildResult) {
		self.should_hard_reload |= other.should_hard_reload;
	}
}

/// A page that failed to build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
	/// Relative page path.
	pub page: String,
	/// Error message.
	pub error: String,
}

/// Summary of a build pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildReport {
	/// Aggregated result over all pages.
	pub result: PageBuildResult,
	/// Pages built successfully, in build order.
	pub built: Vec<String>,
	/// Pages that failed, in build order.
	pub failed: Vec<PageFailure>,
}

impl BuildReport {
	/// Returns `true` if every page was built.
	pub fn is_success(&self) -> bool {
		self.failed.is_empty()
	}
}

/// Builds pages with pluggable collaborators.
///
/// ## Example
///
/// ```ignore
/// let orchestrator = PageBuildOrchestrator::new(registry, BuildSettings::load("elegance.toml")?)
///     .with_transformer(Arc::new(MyBundler::default()));
/// let report = orchestrator.build_all().await?;
/// ```
pub struct PageBuildOrchestrator {
	loader: Arc<dyn PageModuleLoader>,
	transformer: Arc<dyn ScriptTransformer>,
	renderer: Arc<dyn SsrRenderer>,
	template: Arc<dyn TemplateGenerator>,
	settings: BuildSettings,
}

impl PageBuildOrchestrator {
	/// Creates an orchestrator with the default transformer, renderer and template.
	pub fn new(loader: impl PageModuleLoader + 'static, settings: BuildSettings) -> Self {
		let template = DocumentTemplate::new(settings.client_script.clone());
		Self {
			loader: Arc::new(loader),
			transformer: Arc::new(PassthroughTransformer),
			renderer: Arc::new(StaticHtmlRenderer),
			template: Arc::new(template),
			settings,
		}
	}

	/// Creates an orchestrator over an in-process page registry.
	pub fn from_registry(registry: PageRegistry, settings: BuildSettings) -> Self {
		Self::new(registry, settings)
	}

	/// Replaces the script transformer.
	pub fn with_transformer(mut self, transformer: Arc<dyn ScriptTransformer>) -> Self {
		self.transformer = transformer;
		self
	}

	/// Replaces the SSR renderer.
	pub fn with_renderer(mut self, renderer: Arc<dyn SsrRenderer>) -> Self {
		self.renderer = renderer;
		self
	}

	/// Replaces the template generator.
	pub fn with_template(mut self, template: Arc<dyn TemplateGenerator>) -> Self {
		self.template = template;
		self
	}

	/// Build settings in use.
	pub fn settings(&self) -> &BuildSettings {
		&self.settings
	}

	/// Output directory of the page at `path`.
	pub fn output_dir_for(&self, path: &str) -> PathBuf {
		if path.is_empty() {
			self.settings.output_dir.clone()
		} else {
			self.settings.output_dir.join(path)
		}
	}

	/// Builds every discovered page.
	///
	/// Only a discovery failure is returned as an error. Page failures are
	/// logged and listed in the report.
	pub async fn build_all(&self) -> BuildResult<BuildReport> {
		let pages = self.loader.discover().await?;
		tracing::info!("Building {} page(s) into {}", pages.len(), self.settings.output_dir.display());

		let mut report = BuildReport::default();
		for page in pages {
			match self.build_page(&page).await {
				Ok(result) => {
					report.result.merge(result);
					report.built.push(page);
				}
				Err(e) => {
					tracing::error!("Failed to build page '{}': {}", page, e);
					report.failed.push(PageFailure {
						page,
						error: e.to_string(),
					});
				}
			}
		}

		tracing::info!(
			"Build finished: {} built, {} failed, hard reload: {}",
			report.built.len(),
			report.failed.len(),
			report.result.should_hard_reload
		);
		Ok(report)
	}

	/// Builds the page at the relative path `path`.
	pub async fn build_page(&self, path: &str) -> BuildResult<PageBuildResult> {
		tracing::debug!("Building page '{}'", path);

		let mut scope = PageScope::new();
		let mut normalizer = Normalizer::new();

		let loaded = self.loader.load(path, &mut scope).await?;
		let tree = self.normalize(&mut normalizer, path, loaded.page)?;
		tracing::debug!(
			"Normalized page '{}': {} binding(s), {} state cell(s)",
			path,
			normalizer.bindings().len(),
			scope.states().len()
		);

		let url = hydration::page_url(path);
		let out_dir = self.output_dir_for(path);

		if self.settings.write_to_html {
			let head_tree = (loaded.metadata)(&mut scope);
			let head_tree = head_content(self.normalize(&mut normalizer, path, head_tree)?);
			let body_tree = body_element(tree);
			let page_location = self.settings.pages_dir.join(path);

			let head = self
				.renderer
				.render(&head_tree, &page_location)
				.await
				.map_err(|e| render_error(path, e))?;
			let body = self
				.renderer
				.render(&body_tree, &page_location)
				.await
				.map_err(|e| render_error(path, e))?;

			let context = TemplateContext {
				page_url: url.clone(),
				head_html: head.body_html,
				add_page_script_tag: true,
			};
			let template = self
				.template
				.generate(&context)
				.await
				.map_err(|e| render_error(path, e))?;

			output::write_document(&out_dir, &template, &body.body_html).await?;
		} else {
			output::write_page_json(&out_dir, &tree).await?;
		}

		let script = hydration::serialize(
			&url,
			scope.states(),
			normalizer.bindings(),
			scope.load_hooks(),
		);
		let transformed = self
			.transformer
			.transform(&script.code, &self.settings.transform_options())
			.await
			.map_err(|e| BuildError::Transform {
				page: path.to_string(),
				message: format!("{e:#}"),
			})?;
		output::write_page_data(&out_dir, &transformed.code).await?;

		tracing::debug!("Built page '{}' at {}", path, url);
		Ok(PageBuildResult {
			should_hard_reload: script.send_hard_reload_instruction,
		})
	}

	fn normalize(&self, normalizer: &mut Normalizer, path: &str, tree: Child) -> BuildResult<Child> {
		normalizer.normalize(tree).map_err(|source| BuildError::Normalize {
			page: path.to_string(),
			source,
		})
	}
}

fn render_error(path: &str, e: anyhow::Error) -> BuildError {
	BuildError::Render {
		page: path.to_string(),
		message: format!("{e:#}"),
	}
}
