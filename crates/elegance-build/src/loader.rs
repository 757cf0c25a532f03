//! Page module loading.
//!
//! A page module exports two things: the page element tree and a metadata
//! function producing the head tree. Page code runs against a fresh
//! [`PageScope`], so every state cell and load hook it declares belongs to the
//! page being built.

use crate::error::{BuildError, BuildResult};
use async_trait::async_trait;
use elegance_pages::{Child, PageScope};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Page definition code.
pub type PageFn = dyn Fn(&mut PageScope) -> Child + Send + Sync;

/// Metadata function; returns the head tree.
pub type MetadataFn = dyn Fn(&mut PageScope) -> Child + Send + Sync;

/// File-name stem that marks a directory as a page.
pub const PAGE_FILE_STEM: &str = "page";

/// Exports of an evaluated page module.
pub struct LoadedPage {
	/// Page element tree.
	pub page: Child,
	/// Metadata function.
	pub metadata: Arc<MetadataFn>,
}

impl fmt::Debug for LoadedPage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LoadedPage")
			.field("page", &self.page)
			.finish_non_exhaustive()
	}
}

/// Loads page modules.
#[async_trait]
pub trait PageModuleLoader: Send + Sync {
	/// Relative paths of all pages to build, in build order.
	async fn discover(&self) -> BuildResult<Vec<String>>;

	/// Evaluates the page at `path` against `scope`.
	///
	/// Fails with [`BuildError::MissingPageExport`] or
	/// [`BuildError::MissingMetadataExport`] when an export is absent.
	async fn load(&self, path: &str, scope: &mut PageScope) -> BuildResult<LoadedPage>;
}

#[derive(Default, Clone)]
struct PageDefinition {
	page: Option<Arc<PageFn>>,
	metadata: Option<Arc<MetadataFn>>,
}

/// In-process page module loader.
///
/// ## Example
///
/// ```ignore
/// let registry = PageRegistry::new()
///     .page("", |scope| body(attrs! {}, vec![h1("Home", vec![])]))
///     .metadata("", |_| head(attrs! {}, vec![title("Home", vec![])]));
/// ```
#[derive(Default, Clone)]
pub struct PageRegistry {
	pages: BTreeMap<String, PageDefinition>,
	pages_dir: Option<PathBuf>,
}

impl PageRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the page export of the page at `path`.
	pub fn page<F>(mut self, path: impl Into<String>, page: F) -> Self
	where
		F: Fn(&mut PageScope) -> Child + Send + Sync + 'static,
	{
		self.pages.entry(normalize_path(path.into())).or_default().page = Some(Arc::new(page));
		self
	}

	/// Registers the metadata export of the page at `path`.
	pub fn metadata<F>(mut self, path: impl Into<String>, metadata: F) -> Self
	where
		F: Fn(&mut PageScope) -> Child + Send + Sync + 'static,
	{
		self.pages.entry(normalize_path(path.into())).or_default().metadata =
			Some(Arc::new(metadata));
		self
	}

	/// Restricts discovery to pages whose directory below `dir` contains a page file.
	pub fn with_pages_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.pages_dir = Some(dir.into());
		self
	}

	/// Number of registered pages.
	pub fn len(&self) -> usize {
		self.pages.len()
	}

	/// Returns `true` if no page is registered.
	pub fn is_empty(&self) -> bool {
		self.pages.is_empty()
	}
}

impl fmt::Debug for PageRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PageRegistry")
			.field("pages", &self.pages.keys().collect::<Vec<_>>())
			.field("pages_dir", &self.pages_dir)
			.finish()
	}
}

#[async_trait]
impl PageModuleLoader for PageRegistry {
	async fn discover(&self) -> BuildResult<Vec<String>> {
		let Some(dir) = &self.pages_dir else {
			return Ok(self.pages.keys().cloned().collect());
		};

		let on_disk = scan_page_dirs(dir).await?;
		let mut pages = Vec::new();
		for path in self.pages.keys() {
			if on_disk.contains(path) {
				pages.push(path.clone());
			} else {
				tracing::warn!("Page '{}' is registered but has no page file in {}", path, dir.display());
			}
		}
		for path in on_disk.iter().filter(|p| !self.pages.contains_key(*p)) {
			tracing::warn!("Page file found for '{}' but no page is registered", path);
		}
		Ok(pages)
	}

	async fn load(&self, path: &str, scope: &mut PageScope) -> BuildResult<LoadedPage> {
		let definition = self.pages.get(path).cloned().unwrap_or_default();

		let Some(page) = definition.page else {
			return Err(BuildError::MissingPageExport {
				page: path.to_string(),
			});
		};
		let Some(metadata) = definition.metadata else {
			return Err(BuildError::MissingMetadataExport {
				page: path.to_string(),
			});
		};

		Ok(LoadedPage {
			page: page(scope),
			metadata,
		})
	}
}

fn normalize_path(path: String) -> String {
	path.trim_matches('/').replace('\\', "/")
}

/// Finds page directories below `root`.
///
/// A directory is a page when it directly contains a file whose stem is
/// `page` (e.g. `page.ts`). Paths are returned relative to `root`, with `/`
/// separators, sorted; the root itself is `""`. A missing root yields no pages.
pub async fn scan_page_dirs(root: &Path) -> BuildResult<Vec<String>> {
	let mut pages = Vec::new();
	let exists = tokio::fs::try_exists(root)
		.await
		.map_err(|e| BuildError::Discovery(format!("Failed to access {}: {}", root.display(), e)))?;
	if !exists {
		tracing::debug!("Pages directory does not exist: {}", root.display());
		return Ok(pages);
	}

	let mut pending = vec![root.to_path_buf()];
	while let Some(dir) = pending.pop() {
		let mut entries = tokio::fs::read_dir(&dir)
			.await
			.map_err(|e| BuildError::Discovery(format!("Failed to read {}: {}", dir.display(), e)))?;

		let mut is_page = false;
		while let Some(entry) = entries
			.next_entry()
			.await
			.map_err(|e| BuildError::Discovery(format!("Failed to read directory entry: {}", e)))?
		{
			let path = entry.path();
			let file_type = entry
				.file_type()
				.await
				.map_err(|e| BuildError::Discovery(format!("Failed to inspect {}: {}", path.display(), e)))?;
			if file_type.is_dir() {
				pending.push(path);
			} else if path.file_stem().is_some_and(|stem| stem == PAGE_FILE_STEM) {
				is_page = true;
			}
		}

		if is_page {
			let relative = dir.strip_prefix(root).unwrap_or(&dir);
			let relative = relative
				.components()
				.map(|c| c.as_os_str().to_string_lossy().into_owned())
				.collect::<Vec<_>>()
				.join("/");
			pages.push(relative);
		}
	}

	pages.sort();
	tracing::debug!("Discovered {} page directories in {}", pages.len(), root.display());
	Ok(pages)
}

#[cfg(test)]
mod tests {
	use super::*;
	use elegance_pages::{attrs, builder::{body, head}};
	use rstest::rstest;

	#[rstest]
	#[tokio::test]
	async fn test_missing_exports() {
		let registry = PageRegistry::new()
			.metadata("no-page", |_| head(attrs! {}, vec![]))
			.page("no-metadata", |_| body(attrs! {}, vec![]));
		let mut scope = PageScope::new();

		let missing_page = registry.load("no-page", &mut scope).await.unwrap_err();
		let missing_metadata = registry.load("no-metadata", &mut scope).await.unwrap_err();
		let unknown = registry.load("unknown", &mut scope).await.unwrap_err();

		assert!(matches!(missing_page, BuildError::MissingPageExport { .. }));
		assert!(matches!(missing_metadata, BuildError::MissingMetadataExport { .. }));
		assert!(matches!(unknown, BuildError::MissingPageExport { .. }));
	}

	#[rstest]
	#[tokio::test]
	async fn test_page_runs_against_scope() {
		let registry = PageRegistry::new()
			.page("/counter/", |scope| {
				let count = scope.create_state(0);
				body(attrs! { "dataCount" => count }, vec![])
			})
			.metadata("counter", |_| head(attrs! {}, vec![]));
		let mut scope = PageScope::new();

		registry.load("counter", &mut scope).await.unwrap();

		assert_eq!(scope.states().len(), 1);
		assert_eq!(registry.discover().await.unwrap(), vec!["counter".to_string()]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_scan_page_dirs() {
		let root = tempfile::tempdir().unwrap();
		for dir in ["", "blog", "blog/post", "assets"] {
			std::fs::create_dir_all(root.path().join(dir)).unwrap();
		}
		std::fs::write(root.path().join("page.ts"), "").unwrap();
		std::fs::write(root.path().join("blog/post/page.ts"), "").unwrap();
		std::fs::write(root.path().join("assets/logo.svg"), "").unwrap();

		let pages = scan_page_dirs(root.path()).await.unwrap();

		assert_eq!(pages, vec!["".to_string(), "blog/post".to_string()]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_scan_missing_root_yields_no_pages() {
		let root = tempfile::tempdir().unwrap();

		let pages = scan_page_dirs(&root.path().join("missing")).await.unwrap();

		assert!(pages.is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_scan_ignores_page_named_directories() {
		let root = tempfile::tempdir().unwrap();
		std::fs::create_dir_all(root.path().join("docs/page")).unwrap();
		std::fs::write(root.path().join("docs/page/page.tsx"), "").unwrap();

		let pages = scan_page_dirs(root.path()).await.unwrap();

		assert_eq!(pages, vec!["docs/page".to_string()]);
	}

	#[rstest]
	#[tokio::test]
	async fn test_discovery_restricted_to_pages_dir() {
		let root = tempfile::tempdir().unwrap();
		std::fs::create_dir_all(root.path().join("about")).unwrap();
		std::fs::write(root.path().join("about/page.ts"), "").unwrap();
		let registry = PageRegistry::new()
			.page("about", |_| body(attrs! {}, vec![]))
			.page("gone", |_| body(attrs! {}, vec![]))
			.with_pages_dir(root.path());

		assert_eq!(registry.discover().await.unwrap(), vec!["about".to_string()]);
	}
}
