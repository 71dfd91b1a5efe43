// SVG icons SSR plugin: serves the icon sprite and icon names as virtual modules

use crate::config::SvgIconsSsrConfig;
use crate::core::interfaces::SvgScanner;
use crate::core::models::{FileStatsCache, ResolvedConfig, VirtualModule};
use crate::core::plugin::Plugin;
use crate::core::services::ModuleCodeBuilder;
use crate::server::{svg_icons_middleware, Middlewares};
use crate::utils::{Logger, Result};
use async_trait::async_trait;
use axum::middleware;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Plugin exposing `virtual:svg-icons-ssr-html` and `virtual:svg-icons-ssr-names`
///
/// # Example
/// ```no_run
/// use svg_icons_ssr::config::SvgIconsSsrConfig;
/// use svg_icons_ssr::core::{PluginManager, SvgScanner};
/// use svg_icons_ssr::plugins::SvgIconsSsrPlugin;
/// use std::sync::Arc;
///
/// # fn register(scanner: Arc<dyn SvgScanner>) {
/// let plugin = SvgIconsSsrPlugin::new(SvgIconsSsrConfig::new("src/icons"), scanner);
///
/// let mut plugins = PluginManager::new();
/// plugins.register(Arc::new(plugin));
/// # }
/// ```
pub struct SvgIconsSsrPlugin {
    builder: ModuleCodeBuilder,
}

impl SvgIconsSsrPlugin {
    /// Create the plugin with a fresh file stats cache
    pub fn new(config: SvgIconsSsrConfig, scanner: Arc<dyn SvgScanner>) -> Self {
        Self {
            builder: ModuleCodeBuilder::new(scanner, FileStatsCache::new(), Arc::new(config)),
        }
    }

    pub fn builder(&self) -> &ModuleCodeBuilder {
        &self.builder
    }
}

#[async_trait]
impl Plugin for SvgIconsSsrPlugin {
    fn name(&self) -> &str {
        "svg-icons-ssr"
    }

    fn config_resolved(&self, config: &ResolvedConfig) -> Result<()> {
        Logger::debug(&format!(
            "🔧 svg-icons-ssr: {:?} in {}",
            config.command,
            config.root.display()
        ));
        Ok(())
    }

    fn resolve_id(&self, id: &str) -> Result<Option<String>> {
        Ok(VirtualModule::resolve(id).map(|module| module.id().to_string()))
    }

    async fn load(&self, id: &str) -> Result<Option<String>> {
        let Some(module) = VirtualModule::from_load_id(id) else {
            return Ok(None);
        };

        let code = self.builder.build().await?;
        Ok(Some(code.into_body(module)))
    }

    fn configure_server(&self, middlewares: &mut Middlewares) {
        middlewares.add(|router| router.layer(CorsLayer::permissive()));

        let builder = self.builder.clone();
        middlewares.add(move |router| {
            router.layer(middleware::from_fn_with_state(builder, svg_icons_middleware))
        });
    }
}
