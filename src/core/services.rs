use crate::config::SvgIconsSsrConfig;
use crate::core::interfaces::SvgScanner;
use crate::core::models::{FileStatsCache, ModuleCode, ScanResult};
use crate::utils::{Result, Timer};
use std::sync::Arc;

/// Scan the icon directory and render both virtual module bodies.
///
/// Every call runs the scanner again; `cache` is only forwarded to it.
/// Scanner errors are returned as they are.
pub async fn create_module_code(
    scanner: &dyn SvgScanner,
    cache: &FileStatsCache,
    config: &SvgIconsSsrConfig,
) -> Result<ModuleCode> {
    let _timer = Timer::start(&format!("svg icon scan of {}", config.scan_dir.display()));

    let ScanResult { svg_html, id_set } = scanner
        .scan_dir(&config.scan_dir, cache, &config.scan)
        .await?;

    tracing::debug!("🎨 Found {} icons", id_set.len());

    let names: Vec<String> = id_set.into_iter().collect();

    Ok(ModuleCode {
        markup: default_export(&svg_html)?,
        names: default_export(&names)?,
    })
}

fn default_export<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(format!("export default {}", serde_json::to_string(value)?))
}

/// Scanner, cache and options of one plugin instance
#[derive(Clone)]
pub struct ModuleCodeBuilder {
    scanner: Arc<dyn SvgScanner>,
    cache: FileStatsCache,
    config: Arc<SvgIconsSsrConfig>,
}

impl ModuleCodeBuilder {
    pub fn new(
        scanner: Arc<dyn SvgScanner>,
        cache: FileStatsCache,
        config: Arc<SvgIconsSsrConfig>,
    ) -> Self {
        Self {
            scanner,
            cache,
            config,
        }
    }

    pub async fn build(&self) -> Result<ModuleCode> {
        create_module_code(self.scanner.as_ref(), &self.cache, &self.config).await
    }

    pub fn cache(&self) -> &FileStatsCache {
        &self.cache
    }

    pub fn config(&self) -> &SvgIconsSsrConfig {
        &self.config
    }
}
