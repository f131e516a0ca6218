//! SKU 對應表資料

use serde::{Deserialize, Serialize};

/// 單一 SKU 對應紀錄（平台 SKU → MSKU）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuMappingRecord {
    /// 平台 SKU（原始字串）
    pub platform_sku: String,

    /// 主商品代碼
    #[serde(default)]
    pub msku: String,

    /// 所屬面板/帳號
    #[serde(default)]
    pub panel: Option<String>,

    /// 狀態（只有 active 會載入）
    #[serde(default)]
    pub status: String,

    /// Amazon ASIN
    #[serde(default)]
    pub asin: Option<String>,
}

impl SkuMappingRecord {
    /// 創建新的啟用中對應紀錄
    pub fn new(platform_sku: String, msku: String) -> Self {
        Self {
            platform_sku,
            msku,
            panel: None,
            status: "Active".to_string(),
            asin: None,
        }
    }

    /// 建構器模式：設置面板
    pub fn with_panel(mut self, panel: String) -> Self {
        self.panel = Some(panel);
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: String) -> Self {
        self.status = status;
        self
    }

    /// 建構器模式：設置 ASIN
    pub fn with_asin(mut self, asin: String) -> Self {
        self.asin = Some(asin);
        self
    }

    pub fn is_active(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("active")
    }
}

/// 組合商品原始列
///
/// 組件欄位依名稱樣式（如 `SKU1`、`SKU 2`、`msku_3`）辨識，
/// 順序即欄位順序。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboRow {
    /// 組合 SKU
    pub combo_sku: String,

    /// 其餘欄位（欄名, 值），保留原始順序
    pub columns: Vec<(String, String)>,
}

impl ComboRow {
    pub fn new(combo_sku: String) -> Self {
        Self {
            combo_sku,
            columns: Vec::new(),
        }
    }

    /// 建構器模式：加入欄位
    pub fn with_column(mut self, name: &str, value: &str) -> Self {
        self.columns.push((name.to_string(), value.to_string()));
        self
    }

    /// 依欄位順序取出非空的組件 MSKU
    pub fn component_mskus(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|(name, _)| is_component_column(name))
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// 欄名是否符合「SKU + 編號」樣式
pub fn is_component_column(name: &str) -> bool {
    let lowered = name.trim().to_ascii_lowercase();
    let stem = lowered.trim_end_matches(|c: char| c.is_ascii_digit());

    // 必須以至少一位數字結尾
    if stem.len() == lowered.len() {
        return false;
    }

    stem.trim_end_matches([' ', '_', '-', '#', '.'])
        .ends_with("sku")
}

/// 對應表快照（建表輸入，也是快取內容）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingSnapshot {
    pub sku_mappings: Vec<SkuMappingRecord>,
    pub combo_rows: Vec<ComboRow>,
}

impl MappingSnapshot {
    pub fn new(sku_mappings: Vec<SkuMappingRecord>, combo_rows: Vec<ComboRow>) -> Self {
        Self {
            sku_mappings,
            combo_rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sku_mappings.is_empty() && self.combo_rows.is_empty()
    }
}
