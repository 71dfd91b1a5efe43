// Plugin contract between the host bundler and its plugins

use crate::core::models::ResolvedConfig;
use crate::server::Middlewares;
use crate::utils::{Logger, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Hooks a plugin can implement. Every hook is optional.
///
/// The host drives them in this order:
/// - `config_resolved` once the session configuration is final
/// - `resolve_id` then `load` for every import specifier
/// - `configure_server` once, when a dev server is started
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Unique name for this plugin
    fn name(&self) -> &str;

    fn config_resolved(&self, _config: &ResolvedConfig) -> Result<()> {
        Ok(())
    }

    /// Claim an import specifier.
    ///
    /// Return Some(id) to take ownership of the module,
    /// or None to let the next plugin try.
    fn resolve_id(&self, _id: &str) -> Result<Option<String>> {
        Ok(None)
    }

    /// Provide the source of a resolved module, or None to defer.
    async fn load(&self, _id: &str) -> Result<Option<String>> {
        Ok(None)
    }

    /// Register dev server middleware
    fn configure_server(&self, _middlewares: &mut Middlewares) {}
}

/// Manages plugin registration and hook dispatch
pub struct PluginManager {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginManager {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        Logger::plugin_registered(plugin.name());
        self.plugins.push(plugin);
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Notify every plugin, stopping at the first error
    pub fn config_resolved(&self, config: &ResolvedConfig) -> Result<()> {
        for plugin in &self.plugins {
            plugin.config_resolved(config)?;
        }
        Ok(())
    }

    /// First plugin returning Some wins
    pub fn resolve_id(&self, id: &str) -> Result<Option<String>> {
        for plugin in &self.plugins {
            if let Some(resolved) = plugin.resolve_id(id)? {
                Logger::module_resolved(&resolved);
                return Ok(Some(resolved));
            }
        }
        Ok(None)
    }

    /// First plugin returning Some wins
    pub async fn load(&self, id: &str) -> Result<Option<String>> {
        for plugin in &self.plugins {
            if let Some(code) = plugin.load(id).await? {
                Logger::module_loaded(id, code.len());
                return Ok(Some(code));
            }
        }
        Ok(None)
    }

    /// Resolve an import specifier and load whatever it resolves to
    pub async fn load_virtual(&self, specifier: &str) -> Result<Option<String>> {
        let id = self
            .resolve_id(specifier)?
            .unwrap_or_else(|| specifier.to_string());
        self.load(&id).await
    }

    /// Collect middleware from every plugin, in registration order
    pub fn configure_server(&self, middlewares: &mut Middlewares) {
        for plugin in &self.plugins {
            plugin.configure_server(middlewares);
        }
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}
