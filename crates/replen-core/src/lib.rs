//! # Replen Core
//!
//! 補貨決策核心資料模型與類型定義

pub mod calendar;
pub mod config;
pub mod packaging;
pub mod product;
pub mod purchase_order;
pub mod recommendation;
pub mod sales;
pub mod source;

// Re-export 主要類型
pub use calendar::DateWindow;
pub use config::{PackagingParams, ReplenParams, SalesStatsConfig};
pub use packaging::{PackagingItem, PackagingRecommendation, PackagingStatus, PackagingUsage};
pub use product::{ProductRecord, ProductType};
pub use purchase_order::{PoStatus, PurchaseOrderLine, ShipmentRoute};
pub use recommendation::{
    MovementStatus, OrderReason, Recommendation, ReplenStatus, VolatilityStatus,
};
pub use sales::{DailySalesRecord, Platform};
pub use source::{ProductSource, PurchaseOrderSource, SalesLedgerSource};

/// 「無資料 / 極久未動」哨兵值（天）
///
/// 必須保持有限且可排序：下游比較依賴它永遠大於任何門檻。
pub const SENTINEL_DAYS: f64 = 999.0;

/// 補貨錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ReplenError {
    #[error("外部資料來源錯誤: {0}")]
    Source(String),

    #[error("無效的參數 {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("設定解析錯誤: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReplenError>;
