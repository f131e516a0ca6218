//! # Replen SKU
//!
//! 平台 SKU 正規化與主商品代碼（MSKU）對應

pub mod mapper;
pub mod mapping;
pub mod normalizer;
pub mod source;

// Re-export 主要類型
pub use mapper::SkuMapper;
pub use mapping::{ComboRow, MappingSnapshot, SkuMappingRecord};
pub use normalizer::normalize_sku;
pub use source::{JsonFileSnapshotCache, MappingSource, MemorySnapshotCache, SnapshotCache};

/// SKU 對應結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkuResolution {
    /// 單一 MSKU
    Single(String),
    /// 組合商品：對應多個 MSKU（依欄位順序）
    Combo(Vec<String>),
    /// 無對應
    Unmapped,
}

impl SkuResolution {
    pub fn is_mapped(&self) -> bool {
        !matches!(self, SkuResolution::Unmapped)
    }

    /// 展開為 MSKU 列表（無對應時為空）
    pub fn into_mskus(self) -> Vec<String> {
        match self {
            SkuResolution::Single(msku) => vec![msku],
            SkuResolution::Combo(mskus) => mskus,
            SkuResolution::Unmapped => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_mskus() {
        assert_eq!(
            SkuResolution::Single("A".to_string()).into_mskus(),
            vec!["A".to_string()]
        );
        assert_eq!(
            SkuResolution::Combo(vec!["A".to_string(), "B".to_string()]).into_mskus(),
            vec!["A".to_string(), "B".to_string()]
        );
        assert!(SkuResolution::Unmapped.into_mskus().is_empty());
        assert!(!SkuResolution::Unmapped.is_mapped());
    }
}
