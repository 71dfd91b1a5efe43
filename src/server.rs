use crate::core::models::{Command, ResolvedConfig, VirtualModule};
use crate::core::plugin::PluginManager;
use crate::core::services::ModuleCodeBuilder;
use crate::utils::{normalize_path, weak_etag, Logger, Result};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

const JAVASCRIPT_MIME: &str = "application/javascript";

type RouterWrapper = Box<dyn FnOnce(Router) -> Router + Send>;

/// Middleware registration handed to plugins by `configure_server`.
///
/// Middleware runs in the order it was added: the first one added sees the
/// request first and the response last.
#[derive(Default)]
pub struct Middlewares {
    stack: Vec<RouterWrapper>,
}

impl Middlewares {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a middleware, usually `|router| router.layer(...)`
    pub fn add<F>(&mut self, wrap: F)
    where
        F: FnOnce(Router) -> Router + Send + 'static,
    {
        self.stack.push(Box::new(wrap));
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Wrap `router` so the first added middleware ends up outermost
    pub fn apply(self, router: Router) -> Router {
        self.stack
            .into_iter()
            .rev()
            .fold(router, |router, wrap| wrap(router))
    }
}

/// Serve a virtual module if `path` points at one.
///
/// Returns `Ok(None)` for any other path. Content is regenerated on every
/// call.
pub async fn serve_virtual_module(
    builder: &ModuleCodeBuilder,
    path: &str,
) -> Result<Option<Response>> {
    let path = normalize_path(path);
    let Some(module) = VirtualModule::from_dev_path(&path) else {
        return Ok(None);
    };

    let body = builder.build().await?.into_body(module);
    let etag = weak_etag(&body);

    let mut response = (StatusCode::OK, body).into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JAVASCRIPT_MIME));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    headers.insert(header::ETAG, HeaderValue::from_str(&etag)?);

    Logger::dev_module_served(&path, &etag);
    Ok(Some(response))
}

/// Dev server middleware answering `/@id/virtual:svg-icons-ssr-*` requests.
///
/// Install with `axum::middleware::from_fn_with_state`. Everything else is
/// passed to `next` untouched. A failed scan becomes a 500 for that request.
pub async fn svg_icons_middleware(
    State(builder): State<ModuleCodeBuilder>,
    request: Request,
    next: Next,
) -> Result<Response> {
    let path = request.uri().path().to_string();

    match serve_virtual_module(&builder, &path).await? {
        Some(response) => Ok(response),
        None => Ok(next.run(request).await),
    }
}

/// Development server: static files from `root` behind plugin middleware
#[derive(Clone)]
pub struct DevServer {
    plugins: Arc<PluginManager>,
    root: PathBuf,
    host: String,
    port: u16,
}

impl DevServer {
    pub fn new(plugins: PluginManager, root: impl Into<PathBuf>) -> Self {
        Self {
            plugins: Arc::new(plugins),
            root: root.into(),
            host: "localhost".to_string(),
            port: 5173,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn router(&self) -> Router {
        let base = Router::new().fallback_service(ServeDir::new(&self.root));

        let mut middlewares = Middlewares::new();
        self.plugins.configure_server(&mut middlewares);
        Logger::debug(&format!("🔧 {} dev middleware registered", middlewares.len()));

        middlewares.apply(base)
    }

    pub async fn run(self) -> Result<()> {
        Logger::init();

        self.plugins
            .config_resolved(&ResolvedConfig::new(&self.root, Command::Serve))?;

        let app = self.router();
        let listener = tokio::net::TcpListener::bind(format!("{}:{}", self.host, self.port)).await?;

        Logger::dev_server_started(&self.host, self.port);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
