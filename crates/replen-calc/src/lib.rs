//! # Replenishment Calculation Engine
//!
//! 補貨計算引擎：銷售統計、在途彙總、提前期、下單數量、分類與包材補貨

pub mod classification;
pub mod engine;
pub mod lead_time;
pub mod numeric;
pub mod open_po;
pub mod order_qty;
pub mod packaging;
pub mod sales_stats;
pub mod session;

use std::collections::BTreeMap;
use std::fmt;

use replen_core::{Recommendation, ReplenStatus};

// Re-export 主要類型
pub use engine::ReplenishmentEngine;
pub use lead_time::{AdjustedLeadTimes, LeadTimeCalculator};
pub use open_po::{OpenPoAggregate, OpenPoAggregator, PoDetail};
pub use order_qty::OrderQuantityCalculator;
pub use packaging::PackagingPlanner;
pub use sales_stats::{SalesStats, SalesStatsCalculator, NEVER_SOLD_DAYS};
pub use session::ReplenishmentSession;

/// 補貨計算結果
#[derive(Debug, Clone)]
pub struct ReplenResult {
    /// 補貨建議（依商品主檔順序）
    pub recommendations: Vec<Recommendation>,

    /// 警告信息
    pub warnings: Vec<ReplenWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ReplenResult {
    /// 創建空的計算結果
    pub fn empty() -> Self {
        Self {
            recommendations: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ReplenWarning) {
        self.warnings.push(warning);
    }

    /// 依 MSKU 查詢建議
    pub fn get(&self, msku: &str) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.msku == msku)
    }

    /// 彙總（供通知層使用）
    pub fn summary(&self) -> ReplenSummary {
        let mut summary = ReplenSummary::default();
        for rec in &self.recommendations {
            summary.total_rows += 1;
            *summary.by_status.entry(rec.replen_status).or_insert(0) += 1;
            summary.total_air_units += rec.air_order_quantity;
            summary.total_sea_units += rec.sea_order_quantity;
            if rec.needs_order() {
                summary.rows_needing_order += 1;
            }
        }
        summary
    }
}

/// 計算結果彙總
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplenSummary {
    pub total_rows: usize,
    pub by_status: BTreeMap<ReplenStatus, usize>,
    pub total_air_units: u64,
    pub total_sea_units: u64,
    pub rows_needing_order: usize,
}

impl ReplenSummary {
    pub fn count(&self, status: ReplenStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// 補貨警告
#[derive(Debug, Clone, PartialEq)]
pub struct ReplenWarning {
    pub msku: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ReplenWarning {
    pub fn info(msku: String, message: String) -> Self {
        Self {
            msku,
            message,
            severity: WarningSeverity::Info,
        }
    }

    pub fn warning(msku: String, message: String) -> Self {
        Self {
            msku,
            message,
            severity: WarningSeverity::Warning,
        }
    }

    /// 資料錯誤（該列未產生建議）
    pub fn error(msku: String, message: String) -> Self {
        Self {
            msku,
            message,
            severity: WarningSeverity::Error,
        }
    }
}

impl fmt::Display for ReplenWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.msku.is_empty() {
            write!(f, "[{}] {}", self.severity, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.severity, self.msku, self.message)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WarningSeverity::Info => "INFO",
            WarningSeverity::Warning => "WARN",
            WarningSeverity::Error => "ERROR",
        })
    }
}
