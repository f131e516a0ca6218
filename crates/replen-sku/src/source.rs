//! 對應表來源與快照快取

use std::path::PathBuf;
use std::sync::Mutex;

use crate::mapping::{ComboRow, MappingSnapshot, SkuMappingRecord};

/// 外部對應表來源（可能失敗）
pub trait MappingSource {
    /// 取得平面 SKU 對應表
    fn fetch_sku_mappings(&self) -> replen_core::Result<Vec<SkuMappingRecord>>;

    /// 取得組合商品表
    fn fetch_combo_rows(&self) -> replen_core::Result<Vec<ComboRow>>;

    /// 一次取得完整快照，任一表失敗即整體失敗
    fn fetch_snapshot(&self) -> replen_core::Result<MappingSnapshot> {
        Ok(MappingSnapshot::new(
            self.fetch_sku_mappings()?,
            self.fetch_combo_rows()?,
        ))
    }
}

impl MappingSource for MappingSnapshot {
    fn fetch_sku_mappings(&self) -> replen_core::Result<Vec<SkuMappingRecord>> {
        Ok(self.sku_mappings.clone())
    }

    fn fetch_combo_rows(&self) -> replen_core::Result<Vec<ComboRow>> {
        Ok(self.combo_rows.clone())
    }
}

/// 上次成功載入的對應表快照
pub trait SnapshotCache {
    fn load(&self) -> Option<MappingSnapshot>;
    fn store(&self, snapshot: &MappingSnapshot);
}

/// 不做任何快取
impl SnapshotCache for () {
    fn load(&self) -> Option<MappingSnapshot> {
        None
    }

    fn store(&self, _snapshot: &MappingSnapshot) {}
}

/// 記憶體快取
#[derive(Debug, Default)]
pub struct MemorySnapshotCache {
    inner: Mutex<Option<MappingSnapshot>>,
}

impl MemorySnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以既有快照初始化
    pub fn with_snapshot(snapshot: MappingSnapshot) -> Self {
        Self {
            inner: Mutex::new(Some(snapshot)),
        }
    }
}

impl SnapshotCache for MemorySnapshotCache {
    fn load(&self) -> Option<MappingSnapshot> {
        self.inner.lock().ok().and_then(|guard| guard.clone())
    }

    fn store(&self, snapshot: &MappingSnapshot) {
        if let Ok(mut guard) = self.inner.lock() {
            *guard = Some(snapshot.clone());
        }
    }
}

/// JSON 檔案快取
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotCache {
    path: PathBuf,
}

impl JsonFileSnapshotCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SnapshotCache for JsonFileSnapshotCache {
    fn load(&self) -> Option<MappingSnapshot> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("無法讀取對應表快取 {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("對應表快取格式錯誤 {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn store(&self, snapshot: &MappingSnapshot) {
        let result = serde_json::to_string(snapshot)
            .map_err(|e| e.to_string())
            .and_then(|raw| std::fs::write(&self.path, raw).map_err(|e| e.to_string()));

        if let Err(e) = result {
            tracing::warn!("寫入對應表快取失敗 {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> MappingSnapshot {
        MappingSnapshot::new(
            vec![SkuMappingRecord::new("wid-1".to_string(), "WIDGET-1".to_string())],
            vec![ComboRow::new("combo-1".to_string()).with_column("SKU1", "WIDGET-1")],
        )
    }

    #[test]
    fn test_memory_cache() {
        let cache = MemorySnapshotCache::new();
        assert!(cache.load().is_none());

        cache.store(&sample_snapshot());
        assert_eq!(cache.load(), Some(sample_snapshot()));
    }

    #[test]
    fn test_json_file_cache_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "replen-sku-cache-{}.json",
            std::process::id()
        ));
        let cache = JsonFileSnapshotCache::new(&path);

        cache.store(&sample_snapshot());
        assert_eq!(cache.load(), Some(sample_snapshot()));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_json_file_cache_missing() {
        let cache = JsonFileSnapshotCache::new("/nonexistent/replen/cache.json");
        assert!(cache.load().is_none());
    }

    #[test]
    fn test_snapshot_as_source() {
        let snapshot = sample_snapshot();
        let fetched = snapshot.fetch_snapshot().unwrap();
        assert_eq!(fetched, snapshot);
    }
}
