//! 包材補貨模型

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 包材庫存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingItem {
    /// 包材代碼
    pub material: String,

    /// 現有庫存
    #[serde(default)]
    pub current_stock: Decimal,
}

impl PackagingItem {
    pub fn new(material: String, current_stock: Decimal) -> Self {
        Self {
            material,
            current_stock,
        }
    }
}

/// 包材用量（每售出一件 MSKU 消耗的包材數量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingUsage {
    pub msku: String,
    pub material: String,
    pub qty_per_unit: Decimal,
}

impl PackagingUsage {
    pub fn new(msku: String, material: String, qty_per_unit: Decimal) -> Self {
        Self {
            msku,
            material,
            qty_per_unit,
        }
    }
}

/// 包材補貨狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackagingStatus {
    #[serde(rename = "🚨 Order Now")]
    OrderNow,
    #[serde(rename = "⚠️ Reorder Soon")]
    ReorderSoon,
    #[serde(rename = "📦 Overstocked")]
    Overstocked,
    #[serde(rename = "✅ OK")]
    Ok,
}

impl PackagingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackagingStatus::OrderNow => "🚨 Order Now",
            PackagingStatus::ReorderSoon => "⚠️ Reorder Soon",
            PackagingStatus::Overstocked => "📦 Overstocked",
            PackagingStatus::Ok => "✅ OK",
        }
    }
}

impl fmt::Display for PackagingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 包材補貨建議
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackagingRecommendation {
    pub material: String,
    pub current_stock: f64,
    pub daily_usage: f64,
    /// 可用天數（無用量時為 999）
    pub days_of_stock: f64,
    pub reorder_point: f64,
    pub target_stock: f64,
    pub suggested_order_qty: u64,
    pub status: PackagingStatus,
}
