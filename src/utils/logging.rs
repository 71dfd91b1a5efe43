use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install the fmt subscriber. A subscriber installed by the host wins.
    pub fn init() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("svg_icons_ssr=info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    }

    pub fn plugin_registered(name: &str) {
        debug!("🔌 Registered plugin: {}", name);
    }

    pub fn module_resolved(id: &str) {
        debug!("🔍 Resolved virtual module: {}", id);
    }

    pub fn module_loaded(id: &str, bytes: usize) {
        debug!("📦 Loaded {} ({} bytes)", id, bytes);
    }

    pub fn dev_module_served(path: &str, etag: &str) {
        debug!("⚡ Served {} [{}]", path, etag);
    }

    pub fn dev_server_started(host: &str, port: u16) {
        info!("🚀 Dev server running on http://{}:{}", host, port);
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn error(msg: &str) {
        error!("❌ {}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
