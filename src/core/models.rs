use dashmap::DashMap;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Import specifier of the inline sprite markup module
pub const MARKUP_MODULE_ID: &str = "virtual:svg-icons-ssr-html";

/// Import specifier of the icon name list module
pub const NAMES_MODULE_ID: &str = "virtual:svg-icons-ssr-names";

/// The two virtual modules served by the plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VirtualModule {
    Markup,
    Names,
}

impl VirtualModule {
    pub const ALL: [VirtualModule; 2] = [VirtualModule::Markup, VirtualModule::Names];

    pub fn id(self) -> &'static str {
        match self {
            VirtualModule::Markup => MARKUP_MODULE_ID,
            VirtualModule::Names => NAMES_MODULE_ID,
        }
    }

    /// URL the dev server exposes the module under
    pub fn dev_url(self) -> String {
        format!("/@id/{}", self.id())
    }

    /// Exact match on the import specifier
    pub fn resolve(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|module| module.id() == id)
    }

    /// Match a resolved id, which the host may have prefixed
    pub fn from_load_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|module| id.ends_with(module.id()))
    }

    /// Match a normalized dev server request path
    pub fn from_dev_path(path: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|module| path.ends_with(&module.dev_url()))
    }
}

/// Generated bodies of both virtual modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleCode {
    pub markup: String,
    pub names: String,
}

impl ModuleCode {
    pub fn get(&self, module: VirtualModule) -> &str {
        match module {
            VirtualModule::Markup => &self.markup,
            VirtualModule::Names => &self.names,
        }
    }

    pub fn into_body(self, module: VirtualModule) -> String {
        match module {
            VirtualModule::Markup => self.markup,
            VirtualModule::Names => self.names,
        }
    }
}

/// Output of one directory scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Combined sprite markup
    pub svg_html: String,
    /// Symbol ids in order of appearance in `svg_html`
    pub id_set: IndexSet<String>,
}

/// Per-file scan state kept by the scanner between runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub relative_name: String,
    pub mtime: SystemTime,
    pub code: String,
    pub symbol_id: String,
}

/// File stats shared by every scan of one plugin instance.
///
/// Clones share the same map. Only the scanner reads or writes entries.
#[derive(Debug, Clone, Default)]
pub struct FileStatsCache {
    entries: Arc<DashMap<PathBuf, FileStats>>,
}

impl FileStatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<FileStats> {
        self.entries.get(path).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, path: PathBuf, stats: FileStats) -> Option<FileStats> {
        self.entries.insert(path, stats)
    }

    pub fn remove(&self, path: &Path) -> Option<FileStats> {
        self.entries.remove(path).map(|(_, stats)| stats)
    }

    pub fn retain(&self, mut keep: impl FnMut(&Path, &FileStats) -> bool) {
        self.entries.retain(|path, stats| keep(path, stats));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

/// What the host is doing this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Build,
    Serve,
}

/// Host configuration handed to plugins once it is final
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub root: PathBuf,
    pub command: Command,
}

impl ResolvedConfig {
    pub fn new(root: impl Into<PathBuf>, command: Command) -> Self {
        Self {
            root: root.into(),
            command,
        }
    }
}
