//! Integration tests for the page build orchestrator
//!
//! Each test builds a small site into a temporary output directory and checks
//! the artifacts written for every page:
//! 1. `index.html` in HTML mode, `page.json` in JSON mode
//! 2. `page_data.js` with the page's hydration payload
//! 3. Failing pages are reported without stopping the build

use async_trait::async_trait;
use elegance_build::{
	BuildError, PageBuildOrchestrator, PageRegistry, ScriptTransformer, TransformOutput,
};
use elegance_conf::{BuildSettings, TransformOptions};
use elegance_pages::builder::{a, body, button, div, h1, head, link, p, span, title};
use elegance_pages::{Child, PageScope, attrs};
use rstest::*;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn counter_page(scope: &mut PageScope) -> Child {
	let count = scope.create_state(0);
	let label = scope.observe([count.to_ref()], "(c) => `Count: ${c}`", |args| {
		json!(format!("Count: {}", args[0]))
	});
	let on_click = scope.create_event_listener("() => count.value++");
	scope.create_load_hook("() => console.log('ready')");

	div(
		attrs! {},
		vec![button(
			attrs! { "onClick" => on_click, "innerText" => label, "dataCount" => count },
			vec![],
		)],
	)
}

fn metadata(name: &'static str) -> impl Fn(&mut PageScope) -> Child + Send + Sync + 'static {
	move |_| Child::Fragment(vec![title(attrs! {}, vec![name.into()])])
}

fn read(dir: &Path, path: &str) -> String {
	std::fs::read_to_string(dir.join(path)).unwrap()
}

#[fixture]
fn out_dir() -> TempDir {
	tempfile::tempdir().unwrap()
}

// ============================================================================
// HTML mode
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_html_mode_writes_document_and_page_data(out_dir: TempDir) {
	let registry = PageRegistry::new()
		.page("counter", counter_page)
		.metadata("counter", metadata("Counter"));
	let settings = BuildSettings::new().with_output_dir(out_dir.path());
	let orchestrator = PageBuildOrchestrator::from_registry(registry, settings);

	let report = orchestrator.build_all().await.unwrap();

	assert!(report.is_success());
	assert_eq!(report.built, vec!["counter".to_string()]);
	assert!(!report.result.should_hard_reload);
	assert_eq!(
		read(out_dir.path(), "counter/index.html"),
		concat!(
			"<!DOCTYPE html><html><head><title>Counter</title>",
			r#"<script src="/client.js" defer></script>"#,
			r#"<script src="/counter/page_data.js" defer></script>"#,
			"</head><body>",
			r#"<div><button key="0" datacount="0">Count: 0</button></div>"#,
			"</body></html>",
		)
	);
	assert_eq!(
		read(out_dir.path(), "counter/page_data.js"),
		concat!(
			r#"pd["/counter"]={"#,
			r#"state:[{id:0,value:0},{id:1,value:() => count.value++}],"#,
			r#"soa:[{key:0,attribute:"datacount",id:0,value:0}],"#,
			r#"ooa:[{key:0,attribute:"innerText",update:(c) => `Count: ${c}`,refs:[{id:0}]}],"#,
			r#"lh:[{fn:() => console.log('ready'),bind:""}],"#,
			r#"};"#,
		)
	);
	assert!(!out_dir.path().join("counter/page.json").exists());
}

#[rstest]
#[tokio::test]
async fn test_root_page_is_written_to_output_root(out_dir: TempDir) {
	let registry = PageRegistry::new()
		.page("", |_| h1("Home", vec![]))
		.metadata("", metadata("Home"));
	let settings = BuildSettings::new().with_output_dir(out_dir.path());

	PageBuildOrchestrator::from_registry(registry, settings)
		.build_all()
		.await
		.unwrap();

	let html = read(out_dir.path(), "index.html");
	assert!(html.contains(r#"<script src="/page_data.js" defer></script>"#));
	assert!(html.ends_with("<body><h1>Home</h1></body></html>"));
	assert_eq!(read(out_dir.path(), "page_data.js"), r#"pd["/"]={};"#);
}

const INTERVAL_HOOK: &str = "(_, counter) => {
    const interval = setInterval(() => {
        counter.value++;
        counter.signal();
    }, 1000);

    return () => clearInterval(interval);
}";

const CLICK_LISTENER: &str = "(_, counter) => {
    counter.value++;

    counter.signal();
}";

fn welcome_page(scope: &mut PageScope) -> Child {
	let counter = scope.create_state(0);
	scope.create_load_hook_with_deps([counter.to_ref()], INTERVAL_HOOK);
	let on_click = scope.create_event_listener_with_deps([counter.to_ref()], CLICK_LISTENER);
	let label = scope.observe([counter.to_ref()], "(counter) => `Counter: ${counter}`", |args| {
		json!(format!("Counter: {}", args[0]))
	});

	body(
		attrs! { "class" => "page" },
		vec![
			h1(attrs! { "class" => "title" }, vec!["Welcome to Elegance.JS!".into()]),
			p(attrs! {}, vec!["Edit page.ts to get started.".into()]),
			div(
				attrs! { "class" => "links" },
				vec![
					a(
						attrs! { "href" => "https://elegance.js.org/", "target" => "_blank" },
						vec![
							"Documentation".into(),
							div(attrs! { "aria-hidden" => "true" }, vec![]),
						],
					),
					button(
						attrs! { "onClick" => on_click, "innerText" => label },
						vec![div(attrs! { "aria-hidden" => "true" }, vec![])],
					),
				],
			),
		],
	)
}

fn welcome_metadata(_: &mut PageScope) -> Child {
	head(
		attrs! {},
		vec![
			link(attrs! { "rel" => "stylesheet", "href" => "/index.css" }),
			title(attrs! {}, vec!["Elegance.JS".into()]),
		],
	)
}

#[rstest]
#[tokio::test]
async fn test_welcome_page_with_listener_and_load_hook_dependencies(out_dir: TempDir) {
	let registry = PageRegistry::new()
		.page("", welcome_page)
		.metadata("", welcome_metadata);
	let settings = BuildSettings::new()
		.with_output_dir(out_dir.path())
		.with_minify(false);

	PageBuildOrchestrator::from_registry(registry, settings)
		.build_page("")
		.await
		.unwrap();

	assert_eq!(
		read(out_dir.path(), "index.html"),
		concat!(
			"<!DOCTYPE html><html><head>",
			r#"<link rel="stylesheet" href="/index.css" /><title>Elegance.JS</title>"#,
			r#"<script src="/client.js" defer></script>"#,
			r#"<script src="/page_data.js" defer></script>"#,
			"</head>",
			r#"<body class="page"><h1 class="title">Welcome to Elegance.JS!</h1>"#,
			"<p>Edit page.ts to get started.</p>",
			r#"<div class="links"><a href="https://elegance.js.org/" target="_blank">Documentation"#,
			r#"<div aria-hidden="true"></div></a><button key="0">Counter: 0</button></div>"#,
			"</body></html>",
		)
	);
	let (listener, hook) = (CLICK_LISTENER, INTERVAL_HOOK);
	assert_eq!(
		read(out_dir.path(), "page_data.js"),
		format!(
			concat!(
				r#"pd["/"]={{state:[{{id:0,value:0}},{{id:1,value:{listener},deps:[{{id:0}}]}}],"#,
				r#"ooa:[{{key:0,attribute:"innerText",update:(counter) => `Counter: ${{counter}}`,refs:[{{id:0}}]}}],"#,
				r#"lh:[{{fn:{hook},bind:"",deps:[{{id:0}}]}}],}};"#,
			),
			listener = listener,
			hook = hook,
		)
	);
}

#[rstest]
#[tokio::test]
async fn test_minified_page_data_keeps_line_breaks(out_dir: TempDir) {
	let registry = PageRegistry::new()
		.page("", |scope: &mut PageScope| {
			scope.create_load_hook("() => {\n    const x = 1\n    // tick\n    go(x)\n}");
			div(attrs! {}, vec![])
		})
		.metadata("", metadata("Tick"));
	let settings = BuildSettings::new().with_output_dir(out_dir.path());
	assert!(settings.minify);

	PageBuildOrchestrator::from_registry(registry, settings)
		.build_page("")
		.await
		.unwrap();

	assert_eq!(
		read(out_dir.path(), "page_data.js"),
		"pd[\"/\"]={lh:[{fn:() => {\nconst x = 1\n// tick\ngo(x)\n},bind:\"\"}],};"
	);
}

// ============================================================================
// JSON mode
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_json_mode_writes_normalized_tree(out_dir: TempDir) {
	let registry = PageRegistry::new()
		.page("about", |_| p(attrs! { "ariaLabel" => "intro", "innerText" => "Hi" }, vec![]))
		.metadata("about", metadata("About"));
	let settings = BuildSettings::new()
		.with_output_dir(out_dir.path())
		.with_write_to_html(false);

	let report = PageBuildOrchestrator::from_registry(registry, settings)
		.build_all()
		.await
		.unwrap();

	assert!(report.is_success());
	assert!(!out_dir.path().join("about/index.html").exists());
	let tree: serde_json::Value =
		serde_json::from_str(&read(out_dir.path(), "about/page.json")).unwrap();
	assert_eq!(
		tree,
		json!({"tag": "p", "options": {"aria-label": "intro"}, "children": ["Hi"]})
	);
	assert_eq!(read(out_dir.path(), "about/page_data.js"), r#"pd["/about"]={};"#);
}

// ============================================================================
// Per-page isolation
// ============================================================================

#[rstest]
#[tokio::test]
async fn test_failing_page_does_not_stop_build(out_dir: TempDir) {
	let registry = PageRegistry::new()
		.page("a", |_| div(attrs! { "broken" => json!({"x": 1}) }, vec![]))
		.metadata("a", metadata("A"))
		.page("b", |_| span(attrs! {}, vec!["ok".into()]))
		.metadata("b", metadata("B"))
		.page("c", |_| span(attrs! {}, vec![]));
	let settings = BuildSettings::new().with_output_dir(out_dir.path());

	let report = PageBuildOrchestrator::from_registry(registry, settings)
		.build_all()
		.await
		.unwrap();

	assert_eq!(report.built, vec!["b".to_string()]);
	let failed: Vec<&str> = report.failed.iter().map(|f| f.page.as_str()).collect();
	assert_eq!(failed, vec!["a", "c"]);
	assert!(report.failed[1].error.contains("metadata"));
	assert!(!out_dir.path().join("a").exists());
	assert!(out_dir.path().join("b/index.html").exists());
}

#[rstest]
#[tokio::test]
async fn test_build_page_reports_normalize_error(out_dir: TempDir) {
	let registry = PageRegistry::new()
		.page("bad", |_| div(attrs! { "broken" => json!({"x": 1}) }, vec![]))
		.metadata("bad", metadata("Bad"));
	let settings = BuildSettings::new().with_output_dir(out_dir.path());
	let orchestrator = PageBuildOrchestrator::from_registry(registry, settings);

	let error = orchestrator.build_page("bad").await.unwrap_err();

	assert!(matches!(error, BuildError::Normalize { .. }));
	assert_eq!(error.page(), Some("bad"));
}

#[rstest]
#[tokio::test]
async fn test_each_page_gets_fresh_keys_and_state_ids(out_dir: TempDir) {
	let page = |scope: &mut PageScope| {
		let text = scope.create_state("x");
		span(attrs! { "title" => text }, vec![])
	};
	let registry = PageRegistry::new()
		.page("one", page)
		.metadata("one", metadata("One"))
		.page("two", page)
		.metadata("two", metadata("Two"));
	let settings = BuildSettings::new()
		.with_output_dir(out_dir.path())
		.with_write_to_html(false);

	PageBuildOrchestrator::from_registry(registry, settings)
		.build_all()
		.await
		.unwrap();

	for name in ["one", "two"] {
		let script = read(out_dir.path(), &format!("{name}/page_data.js"));
		assert_eq!(
			script,
			format!(
				r#"pd["/{name}"]={{state:[{{id:0,value:"\"x\""}}],soa:[{{key:0,attribute:"title",id:0,value:"x"}}],}};"#
			)
		);
	}
}

// ============================================================================
// Collaborators
// ============================================================================

struct FailingTransformer;

#[async_trait]
impl ScriptTransformer for FailingTransformer {
	async fn transform(
		&self,
		_source: &str,
		_options: &TransformOptions,
	) -> anyhow::Result<TransformOutput> {
		anyhow::bail!("unexpected token")
	}
}

struct WrappingTransformer;

#[async_trait]
impl ScriptTransformer for WrappingTransformer {
	async fn transform(
		&self,
		source: &str,
		options: &TransformOptions,
	) -> anyhow::Result<TransformOutput> {
		Ok(TransformOutput {
			code: format!("/*{:?}*/{source}", options.format),
		})
	}
}

#[rstest]
#[tokio::test]
async fn test_transformer_failure_is_reported(out_dir: TempDir) {
	let registry = PageRegistry::new()
		.page("x", |_| div(attrs! {}, vec![]))
		.metadata("x", metadata("X"));
	let settings = BuildSettings::new().with_output_dir(out_dir.path());
	let orchestrator = PageBuildOrchestrator::from_registry(registry, settings)
		.with_transformer(Arc::new(FailingTransformer));

	let error = orchestrator.build_page("x").await.unwrap_err();

	assert!(matches!(error, BuildError::Transform { .. }));
	assert!(error.to_string().contains("unexpected token"));
}

#[rstest]
#[tokio::test]
async fn test_custom_transformer_output_is_written(out_dir: TempDir) {
	let registry = PageRegistry::new()
		.page("x", |_| div(attrs! {}, vec![]))
		.metadata("x", metadata("X"));
	let settings = BuildSettings::new()
		.with_output_dir(out_dir.path())
		.with_write_to_html(false);
	let orchestrator = PageBuildOrchestrator::from_registry(registry, settings)
		.with_transformer(Arc::new(WrappingTransformer));

	orchestrator.build_page("x").await.unwrap();

	assert_eq!(read(out_dir.path(), "x/page_data.js"), r#"/*Esm*/pd["/x"]={};"#);
}
