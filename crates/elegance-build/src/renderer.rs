//! SSR renderer collaborator.

use async_trait::async_trait;
use elegance_pages::{Child, ssr};
use std::path::Path;

/// Markup produced for a tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderOutput {
	/// Rendered HTML fragment.
	pub body_html: String,
}

/// Renders normalized trees to HTML.
#[async_trait]
pub trait SsrRenderer: Send + Sync {
	/// Renders `tree` for the page whose sources live at `page_location`.
	async fn render(&self, tree: &Child, page_location: &Path) -> anyhow::Result<RenderOutput>;
}

/// Renders trees with [`elegance_pages::ssr::render_to_string`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticHtmlRenderer;

#[async_trait]
impl SsrRenderer for StaticHtmlRenderer {
	async fn render(&self, tree: &Child, _page_location: &Path) -> anyhow::Result<RenderOutput> {
		Ok(RenderOutput {
			body_html: ssr::render_to_string(tree),
		})
	}
}
