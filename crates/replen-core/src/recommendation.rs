//! 補貨建議模型（引擎輸出）
//!
//! 狀態與原因字串由外部通知產生器逐字比對，不可更動。

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ProductType;

/// 補貨狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReplenStatus {
    /// 立即空運下單
    #[serde(rename = "🚨 Order NOW (AIR)")]
    OrderNow,
    /// 低庫存
    #[serde(rename = "⚠️ Low Stock")]
    LowStock,
    /// 規劃海運
    #[serde(rename = "🚢 Plan SEA Order")]
    PlanSea,
    /// 庫存過量
    #[serde(rename = "📦 Overstocked")]
    Overstocked,
    #[serde(rename = "✅ OK")]
    Ok,
}

impl ReplenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplenStatus::OrderNow => "🚨 Order NOW (AIR)",
            ReplenStatus::LowStock => "⚠️ Low Stock",
            ReplenStatus::PlanSea => "🚢 Plan SEA Order",
            ReplenStatus::Overstocked => "📦 Overstocked",
            ReplenStatus::Ok => "✅ OK",
        }
    }
}

impl fmt::Display for ReplenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 動銷狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementStatus {
    #[serde(rename = "🚀 Fast Moving")]
    FastMoving,
    #[serde(rename = "🏃 Normal")]
    Normal,
    #[serde(rename = "🐢 Slow Moving")]
    SlowMoving,
    #[serde(rename = "💀 Dead Stock")]
    DeadStock,
    #[serde(rename = "🔥 Liquidate")]
    Liquidate,
}

impl MovementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementStatus::FastMoving => "🚀 Fast Moving",
            MovementStatus::Normal => "🏃 Normal",
            MovementStatus::SlowMoving => "🐢 Slow Moving",
            MovementStatus::DeadStock => "💀 Dead Stock",
            MovementStatus::Liquidate => "🔥 Liquidate",
        }
    }
}

impl fmt::Display for MovementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 需求波動分級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolatilityStatus {
    Stable,
    Moderate,
    High,
    Extreme,
}

impl VolatilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatilityStatus::Stable => "Stable",
            VolatilityStatus::Moderate => "Moderate",
            VolatilityStatus::High => "High",
            VolatilityStatus::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for VolatilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 下單原因標籤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderReason {
    #[serde(rename = "URGENT")]
    Urgent,
    #[serde(rename = "BRIDGE")]
    Bridge,
    #[serde(rename = "REGULAR SEA")]
    RegularSea,
    #[serde(rename = "REGULAR AIR")]
    RegularAir,
}

impl OrderReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderReason::Urgent => "URGENT",
            OrderReason::Bridge => "BRIDGE",
            OrderReason::RegularSea => "REGULAR SEA",
            OrderReason::RegularAir => "REGULAR AIR",
        }
    }

    /// 以 " + " 串接多個原因
    pub fn join(reasons: &[OrderReason]) -> String {
        reasons
            .iter()
            .map(OrderReason::as_str)
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl fmt::Display for OrderReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 單一 MSKU 的補貨建議
///
/// 每次執行重新計算，不具長期識別。所有浮點欄位皆為有限值。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub msku: String,
    pub product_type: ProductType,

    /// 現有庫存
    pub current_inventory: f64,
    /// 調整後日均銷量（含旺季倍數）
    pub adjusted_daily_sales: f64,

    /// 空運在途
    pub in_transit_air: f64,
    /// 海運在途
    pub in_transit_sea: f64,
    /// 最早海運到貨日
    pub sea_order_eta: Option<NaiveDate>,

    /// 調整後空運提前期（天）
    pub air_lead_time_adjusted: f64,
    /// 調整後海運提前期（天）
    pub sea_lead_time_adjusted: f64,
    /// 動態安全庫存比例
    pub safety_factor: f64,
    /// 波動調整後危險天數
    pub danger_days_adjusted: f64,

    /// 現有庫存可售天數（無銷量時為 999）
    pub current_days_coverage: f64,
    /// 含在途可售天數（無銷量時為 999）
    pub effective_days_coverage: f64,

    /// 是否到檢討週期
    pub review_due: bool,
    /// 海運目標庫存
    pub sea_target_stock: f64,

    pub sea_order_quantity: u64,
    pub air_order_quantity: u64,

    pub replen_status: ReplenStatus,
    pub movement_status: MovementStatus,
    pub volatility_status: VolatilityStatus,
    pub order_reasons: Vec<OrderReason>,
}

impl Recommendation {
    /// 下單原因字串（例如 "BRIDGE + REGULAR SEA"，無原因時為空字串）
    pub fn order_reason(&self) -> String {
        OrderReason::join(&self.order_reasons)
    }

    /// 是否需要任何下單
    pub fn needs_order(&self) -> bool {
        self.sea_order_quantity > 0 || self.air_order_quantity > 0
    }

    pub fn has_reason(&self, reason: OrderReason) -> bool {
        self.order_reasons.contains(&reason)
    }
}
