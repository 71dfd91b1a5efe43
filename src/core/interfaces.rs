use crate::config::ScanOptions;
use crate::core::models::{FileStatsCache, ScanResult};
use crate::utils::Result;
use async_trait::async_trait;
use std::path::Path;

/// Icon scanner interface.
///
/// Walks `root`, turns every matching SVG into a sprite symbol and returns the
/// combined markup with the symbol ids. Implementations own `cache` freshness
/// and any synchronization between concurrent scans.
#[async_trait]
pub trait SvgScanner: Send + Sync {
    async fn scan_dir(
        &self,
        root: &Path,
        cache: &FileStatsCache,
        options: &ScanOptions,
    ) -> Result<ScanResult>;
}
