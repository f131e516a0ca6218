//! 商品主檔模型

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 商品類型（決定補貨策略）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProductType {
    /// 重點商品：海運 + 空運雙軌
    Focused,
    /// 非重點商品：僅空運
    #[default]
    NonFocused,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Focused => "FOCUSED",
            ProductType::NonFocused => "NON-FOCUSED",
        }
    }

    /// 寬鬆解析：無法辨識的值一律視為 NON-FOCUSED
    pub fn parse_lenient(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_uppercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "FOCUSED" => ProductType::Focused,
            _ => ProductType::NonFocused,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ProductType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProductType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(ProductType::parse_lenient)
            .unwrap_or_default())
    }
}

/// 商品主檔（外部擁有，引擎唯讀）
///
/// 選填欄位缺少時使用預設值：數值為 0，類型為 NON-FOCUSED。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// 主商品代碼
    pub msku: String,

    /// 現有庫存
    #[serde(default)]
    pub current_inventory: Decimal,

    /// 商品類型
    #[serde(default)]
    pub product_type: ProductType,

    /// 供應商提前期（天）
    #[serde(default)]
    pub vendor_lead_time_days: f64,

    /// 分類
    #[serde(default)]
    pub category: Option<String>,
}

impl ProductRecord {
    /// 創建新的商品主檔
    pub fn new(msku: String, current_inventory: Decimal, product_type: ProductType) -> Self {
        Self {
            msku,
            current_inventory,
            product_type,
            vendor_lead_time_days: 0.0,
            category: None,
        }
    }

    /// 建構器模式：設置供應商提前期
    pub fn with_vendor_lead_time(mut self, days: f64) -> Self {
        self.vendor_lead_time_days = days;
        self
    }

    /// 建構器模式：設置分類
    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    pub fn is_focused(&self) -> bool {
        self.product_type == ProductType::Focused
    }
}
