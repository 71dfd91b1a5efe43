use crate::utils::{Logger, Result, SvgIconsError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Plugin options: the directory to scan plus every scanner option.
///
/// Loaded from JSON with camelCase keys, e.g.
/// `{ "scanDir": "src/icons", "symbolId": "icon-[name]" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgIconsSsrConfig {
    /// Root directory handed to the scanner
    pub scan_dir: PathBuf,

    #[serde(flatten)]
    pub scan: ScanOptions,
}

/// Options forwarded verbatim to the icon scanner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    /// Symbol id pattern, `[dir]` and `[name]` are filled in by the scanner
    #[serde(default = "default_symbol_id")]
    pub symbol_id: String,

    /// Glob patterns of files to pick up
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Glob patterns of files to skip
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Scanner specific options this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_symbol_id() -> String {
    "icon-[dir]-[name]".to_string()
}

fn default_include() -> Vec<String> {
    vec!["**/*.svg".to_string()]
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            symbol_id: default_symbol_id(),
            include: default_include(),
            exclude: Vec::new(),
            extra: Map::new(),
        }
    }
}

impl SvgIconsSsrConfig {
    pub fn new(scan_dir: impl Into<PathBuf>) -> Self {
        Self {
            scan_dir: scan_dir.into(),
            scan: ScanOptions::default(),
        }
    }

    pub fn with_symbol_id(mut self, symbol_id: impl Into<String>) -> Self {
        self.scan.symbol_id = symbol_id.into();
        self
    }

    pub fn with_include(mut self, include: Vec<String>) -> Self {
        self.scan.include = include;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.scan.exclude = exclude;
        self
    }

    /// Parse and validate options from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load options from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SvgIconsError::config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;

        Logger::info(&format!("📝 Loaded config from {}", path.display()));
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan_dir.as_os_str().is_empty() {
            return Err(SvgIconsError::config("scanDir must not be empty"));
        }
        if self.scan.symbol_id.trim().is_empty() {
            return Err(SvgIconsError::config("symbolId must not be empty"));
        }
        Ok(())
    }
}
