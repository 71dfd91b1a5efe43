use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use indexmap::IndexSet;
use std::path::Path;
use std::sync::Arc;
use svg_icons_ssr::core::{
    Command, FileStats, FileStatsCache, PluginManager, ResolvedConfig, ScanResult, SvgScanner,
};
use svg_icons_ssr::server::{serve_virtual_module, DevServer};
use svg_icons_ssr::{
    ScanOptions, SvgIconsError, SvgIconsSsrConfig, SvgIconsSsrPlugin, MARKUP_MODULE_ID,
    NAMES_MODULE_ID,
};
use tower::ServiceExt;

/// Minimal directory scanner: every top level `.svg` file becomes a symbol,
/// sorted by file name, reusing cached stats while the mtime is unchanged.
struct DirScanner;

#[async_trait]
impl SvgScanner for DirScanner {
    async fn scan_dir(
        &self,
        root: &Path,
        cache: &FileStatsCache,
        options: &ScanOptions,
    ) -> svg_icons_ssr::Result<ScanResult> {
        let mut files = Vec::new();
        let mut entries = tokio::fs::read_dir(root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("svg") {
                files.push(path);
            }
        }
        files.sort();

        let mut svg_html = String::from("<svg xmlns=\"http://www.w3.org/2000/svg\">");
        let mut id_set = IndexSet::new();

        for path in files {
            let mtime = tokio::fs::metadata(&path).await?.modified()?;
            let stats = match cache.get(&path) {
                Some(stats) if stats.mtime == mtime => stats,
                _ => {
                    let name = path.file_stem().unwrap().to_string_lossy().to_string();
                    let symbol_id = options.symbol_id.replace("[name]", &name);
                    let source = tokio::fs::read_to_string(&path).await?;
                    let code = source
                        .replace("<svg", &format!("<symbol id=\"{}\"", symbol_id))
                        .replace("</svg>", "</symbol>");
                    let stats = FileStats {
                        relative_name: format!("{}.svg", name),
                        mtime,
                        code,
                        symbol_id,
                    };
                    cache.insert(path.clone(), stats.clone());
                    stats
                }
            };

            svg_html.push_str(&stats.code);
            id_set.insert(stats.symbol_id);
        }

        svg_html.push_str("</svg>");
        Ok(ScanResult { svg_html, id_set })
    }
}

fn icon_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("b.svg"),
        "<svg viewBox=\"0 0 24 24\"><path d=\"M1 1\"/></svg>",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("a.svg"),
        "<svg viewBox=\"0 0 24 24\"><circle r=\"2\"/></svg>",
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "not an icon").unwrap();
    dir
}

fn plugin_for(scan_dir: &Path) -> Arc<SvgIconsSsrPlugin> {
    let config = SvgIconsSsrConfig::new(scan_dir).with_symbol_id("icon-[name]");
    Arc::new(SvgIconsSsrPlugin::new(config, Arc::new(DirScanner)))
}

fn manager_for(plugin: Arc<SvgIconsSsrPlugin>) -> PluginManager {
    let mut manager = PluginManager::new();
    manager.register(plugin);
    manager
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_build_loads_both_virtual_modules() {
    let icons = icon_dir();
    let manager = manager_for(plugin_for(icons.path()));
    manager
        .config_resolved(&ResolvedConfig::new(icons.path(), Command::Build))
        .unwrap();

    let names = manager.load_virtual(NAMES_MODULE_ID).await.unwrap();
    assert_eq!(names.as_deref(), Some(r#"export default ["icon-a","icon-b"]"#));

    let markup = manager.load_virtual(MARKUP_MODULE_ID).await.unwrap().unwrap();
    let expected_html = "<svg xmlns=\"http://www.w3.org/2000/svg\">\
        <symbol id=\"icon-a\" viewBox=\"0 0 24 24\"><circle r=\"2\"/></symbol>\
        <symbol id=\"icon-b\" viewBox=\"0 0 24 24\"><path d=\"M1 1\"/></symbol>\
        </svg>";
    assert_eq!(
        markup,
        format!("export default {}", serde_json::to_string(expected_html).unwrap())
    );

    assert_eq!(manager.load_virtual("./src/app.ts").await.unwrap(), None);
}

#[tokio::test]
async fn test_consecutive_loads_are_identical_and_share_cache() {
    let icons = icon_dir();
    let plugin = plugin_for(icons.path());
    let manager = manager_for(plugin.clone());

    let first = manager.load(NAMES_MODULE_ID).await.unwrap();
    let second = manager.load(NAMES_MODULE_ID).await.unwrap();
    assert_eq!(first, second);

    let html_first = manager.load(MARKUP_MODULE_ID).await.unwrap();
    let html_second = manager.load(MARKUP_MODULE_ID).await.unwrap();
    assert_eq!(html_first, html_second);

    assert_eq!(plugin.builder().cache().len(), 2);
}

#[tokio::test]
async fn test_new_icon_shows_up_on_next_load() {
    let icons = icon_dir();
    let manager = manager_for(plugin_for(icons.path()));

    manager.load(NAMES_MODULE_ID).await.unwrap();
    std::fs::write(icons.path().join("c.svg"), "<svg></svg>").unwrap();

    let names = manager.load(NAMES_MODULE_ID).await.unwrap();
    assert_eq!(
        names.as_deref(),
        Some(r#"export default ["icon-a","icon-b","icon-c"]"#)
    );
}

#[tokio::test]
async fn test_dev_server_serves_same_content_as_load() {
    let icons = icon_dir();
    let public = tempfile::tempdir().unwrap();
    let plugin = plugin_for(icons.path());
    let expected = plugin.builder().build().await.unwrap();

    let app = DevServer::new(manager_for(plugin), public.path()).router();

    let response = app
        .clone()
        .oneshot(get("/@id/virtual:svg-icons-ssr-names"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/javascript");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
    assert!(!response.headers()[header::ETAG].is_empty());
    assert_eq!(body_text(response).await, expected.names);

    let response = app
        .oneshot(get("/@id/virtual:svg-icons-ssr-html"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, expected.markup);
}

#[tokio::test]
async fn test_dev_server_passes_other_requests_through() {
    let icons = icon_dir();
    let public = tempfile::tempdir().unwrap();
    let app = DevServer::new(manager_for(plugin_for(icons.path())), public.path()).router();

    let response = app.oneshot(get("/favicon.ico")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(response.headers().get(header::ETAG).is_none());
}

#[tokio::test]
async fn test_missing_scan_root_fails_load_and_dev_request_alike() {
    let missing = tempfile::tempdir().unwrap().path().join("icons");
    let plugin = plugin_for(&missing);

    let load_error = plugin.builder().build().await.unwrap_err();
    assert!(matches!(load_error, SvgIconsError::Io(ref err) if err.kind() == std::io::ErrorKind::NotFound));

    let manager = manager_for(plugin.clone());
    let manager_error = manager.load(MARKUP_MODULE_ID).await.unwrap_err();
    assert_eq!(manager_error.to_string(), load_error.to_string());

    let dev_error = serve_virtual_module(plugin.builder(), "/@id/virtual:svg-icons-ssr-names")
        .await
        .unwrap_err();
    assert_eq!(dev_error.to_string(), load_error.to_string());

    let public = tempfile::tempdir().unwrap();
    let response = DevServer::new(manager, public.path())
        .router()
        .oneshot(get("/@id/virtual:svg-icons-ssr-names"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, load_error.to_string());
}
