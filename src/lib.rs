//! # Replen
//!
//! 多平台電商補貨決策系統：報表解析、SKU 對應、銷售統計與補貨建議

pub use replen_calc as calc;
pub use replen_core as model;
pub use replen_ingest as ingest;
pub use replen_sku as sku;

pub use replen_calc::{
    ReplenResult, ReplenSummary, ReplenWarning, ReplenishmentEngine, ReplenishmentSession,
    WarningSeverity,
};
pub use replen_core::{ReplenError, ReplenParams, Result, SalesStatsConfig};
