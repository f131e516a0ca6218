//! SKU 對應器

use std::collections::HashMap;

use crate::mapping::{MappingSnapshot, SkuMappingRecord};
use crate::normalizer::normalize_sku;
use crate::source::{MappingSource, SnapshotCache};
use crate::SkuResolution;

/// SKU 對應器（每個工作階段建立一次）
#[derive(Debug, Clone, Default)]
pub struct SkuMapper {
    /// 正規化平台 SKU → 對應紀錄
    flat: HashMap<String, SkuMappingRecord>,

    /// 正規化組合 SKU → 組件 MSKU（可能為空）
    combos: HashMap<String, Vec<String>>,
}

impl SkuMapper {
    /// 空對應表（所有查詢皆為 Unmapped）
    pub fn empty() -> Self {
        Self::default()
    }

    /// 從外部來源載入
    ///
    /// 失敗時退回快取快照，仍無則回傳空表；不會向外拋出錯誤。
    pub fn load(source: &dyn MappingSource, cache: &dyn SnapshotCache) -> Self {
        match source.fetch_snapshot() {
            Ok(snapshot) => {
                cache.store(&snapshot);
                Self::from_snapshot(&snapshot)
            }
            Err(e) => {
                tracing::warn!("載入 SKU 對應表失敗: {}", e);
                match cache.load() {
                    Some(snapshot) => {
                        tracing::warn!("改用快取的 SKU 對應表");
                        Self::from_snapshot(&snapshot)
                    }
                    None => {
                        tracing::error!("無可用的 SKU 對應表快取，使用空表");
                        Self::empty()
                    }
                }
            }
        }
    }

    /// 從快照建表
    pub fn from_snapshot(snapshot: &MappingSnapshot) -> Self {
        let mut flat = HashMap::new();
        let mut inactive = 0usize;

        for record in &snapshot.sku_mappings {
            if !record.is_active() {
                inactive += 1;
                continue;
            }

            let Some(key) = normalize_sku(&record.platform_sku) else {
                tracing::debug!("略過空白平台 SKU 的對應紀錄");
                continue;
            };

            if flat.contains_key(&key) {
                tracing::warn!("重複的平台 SKU 對應 {}，保留第一筆", key);
                continue;
            }
            flat.insert(key, record.clone());
        }

        let mut combos = HashMap::new();
        for row in &snapshot.combo_rows {
            let Some(key) = normalize_sku(&row.combo_sku) else {
                tracing::debug!("略過空白組合 SKU");
                continue;
            };

            if combos.contains_key(&key) {
                tracing::warn!("重複的組合 SKU {}，保留第一筆", key);
                continue;
            }
            combos.insert(key, row.component_mskus());
        }

        tracing::info!(
            "SKU 對應表載入完成：單一 {} 筆，組合 {} 筆，略過非啟用 {} 筆",
            flat.len(),
            combos.len(),
            inactive
        );

        Self { flat, combos }
    }

    /// 解析平台 SKU
    ///
    /// 組合表優先於平面表；組合無組件時視為 Unmapped，不會退回平面表。
    pub fn resolve(&self, platform_sku: &str) -> SkuResolution {
        let Some(key) = normalize_sku(platform_sku) else {
            tracing::debug!("空白平台 SKU，無對應");
            return SkuResolution::Unmapped;
        };

        if let Some(components) = self.combos.get(&key) {
            if components.is_empty() {
                tracing::warn!("組合 SKU {} 沒有任何組件 MSKU", key);
                return SkuResolution::Unmapped;
            }
            return SkuResolution::Combo(components.clone());
        }

        match self.flat.get(&key) {
            Some(record) => {
                let msku = record.msku.trim();
                if msku.is_empty() {
                    tracing::warn!("平台 SKU {} 的對應 MSKU 為空", key);
                    SkuResolution::Unmapped
                } else {
                    SkuResolution::Single(msku.to_string())
                }
            }
            None => {
                tracing::debug!("平台 SKU {} 無對應", key);
                SkuResolution::Unmapped
            }
        }
    }

    /// 取得單一 SKU 的完整對應紀錄（組合 SKU 回傳 None）
    pub fn resolve_with_details(&self, platform_sku: &str) -> Option<&SkuMappingRecord> {
        let key = normalize_sku(platform_sku)?;
        if self.combos.contains_key(&key) {
            return None;
        }
        self.flat.get(&key)
    }

    /// 反查：所有對應到指定 MSKU 的平台 SKU 紀錄（依平台 SKU 排序）
    pub fn find_by_msku(&self, msku: &str) -> Vec<&SkuMappingRecord> {
        let target = msku.trim();
        if target.is_empty() {
            return Vec::new();
        }

        let mut records: Vec<&SkuMappingRecord> = self
            .flat
            .values()
            .filter(|r| r.msku.trim().eq_ignore_ascii_case(target))
            .collect();
        records.sort_by(|a, b| a.platform_sku.cmp(&b.platform_sku));
        records
    }

    /// 以 ASIN 查詢對應紀錄（依平台 SKU 排序）
    pub fn find_by_asin(&self, asin: &str) -> Vec<&SkuMappingRecord> {
        let Some(target) = normalize_sku(asin) else {
            return Vec::new();
        };

        let mut records: Vec<&SkuMappingRecord> = self
            .flat
            .values()
            .filter(|r| {
                r.asin
                    .as_deref()
                    .and_then(normalize_sku)
                    .is_some_and(|a| a == target)
            })
            .collect();
        records.sort_by(|a, b| a.platform_sku.cmp(&b.platform_sku));
        records
    }

    /// 單一對應筆數
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    /// 組合對應筆數
    pub fn combo_count(&self) -> usize {
        self.combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flat.is_empty() && self.combos.is_empty()
    }
}
