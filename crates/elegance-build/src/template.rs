//! HTML template generator collaborator.
//!
//! The template is the opening part of the document, up to and including the
//! closing `</head>` tag. The orchestrator appends the rendered `<body>` element
//! and closes the document.

use async_trait::async_trait;
use elegance_pages::ssr::html_escape;
use elegance_pages::{Child, Element, Options};

/// File name of the hydration script written next to each page.
pub const PAGE_DATA_FILE: &str = "page_data.js";

/// Input of a template generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
	/// Client URL of the page (`/` for the root page).
	pub page_url: String,
	/// Rendered head content.
	pub head_html: String,
	/// Whether to reference the page's hydration script.
	pub add_page_script_tag: bool,
}

impl TemplateContext {
	/// URL of the page's hydration script.
	pub fn page_data_url(&self) -> String {
		format!("{}/{PAGE_DATA_FILE}", self.page_url.trim_end_matches('/'))
	}
}

/// Produces the opening part of a page document.
#[async_trait]
pub trait TemplateGenerator: Send + Sync {
	/// Generates the template for `context`.
	async fn generate(&self, context: &TemplateContext) -> anyhow::Result<String>;
}

/// Default document template.
///
/// ```text
/// <!DOCTYPE html><html><head>{head}<script src="/client.js" defer></script>{page script}</head>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTemplate {
	client_script: String,
}

impl DocumentTemplate {
	/// Creates a template that loads the client runtime from `client_script`.
	pub fn new(client_script: impl Into<String>) -> Self {
		Self {
			client_script: client_script.into(),
		}
	}
}

#[async_trait]
impl TemplateGenerator for DocumentTemplate {
	async fn generate(&self, context: &TemplateContext) -> anyhow::Result<String> {
		let mut html = String::from("<!DOCTYPE html><html><head>");
		html.push_str(&context.head_html);
		html.push_str(&format!(
			r#"<script src="{}" defer></script>"#,
			html_escape(&self.client_script)
		));
		if context.add_page_script_tag {
			html.push_str(&format!(
				r#"<script src="{}" defer></script>"#,
				html_escape(&context.page_data_url())
			));
		}
		html.push_str("</head>");
		Ok(html)
	}
}

/// Content of the document head for a metadata tree.
///
/// A `<head>` root is unwrapped to its children; any other tree is head
/// content already.
pub fn head_content(tree: Child) -> Child {
	match tree {
		Child::Element(element) if element.tag == "head" => {
			Child::Fragment(element.children.unwrap_or_default())
		}
		other => other,
	}
}

/// The `<body>` element of the document for a page tree.
///
/// A `<body>` root is kept as is; any other tree is wrapped in one.
pub fn body_element(tree: Child) -> Child {
	match tree {
		Child::Element(element) if element.tag == "body" => Child::Element(element),
		other => Element::new("body", Options::default(), Some(vec![other])).into(),
	}
}
