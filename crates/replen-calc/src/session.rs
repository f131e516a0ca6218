//! 單次補貨執行
//!
//! 每次執行只抓取一次三份快照（商品主檔、銷售帳本、採購單），其後全部為純計算。

use chrono::NaiveDate;
use replen_core::{
    ProductSource, PurchaseOrderSource, ReplenParams, SalesLedgerSource, SalesStatsConfig,
};

use crate::engine::ReplenishmentEngine;
use crate::open_po::OpenPoAggregator;
use crate::sales_stats::SalesStatsCalculator;
use crate::ReplenResult;

/// 補貨執行器
#[derive(Debug, Clone)]
pub struct ReplenishmentSession {
    engine: ReplenishmentEngine,
    stats_config: SalesStatsConfig,
}

impl ReplenishmentSession {
    /// 參數不合法時回傳錯誤
    pub fn new(params: ReplenParams, stats_config: SalesStatsConfig) -> replen_core::Result<Self> {
        params.validate()?;
        if stats_config.stats_window_days == 0 || stats_config.velocity_window_days == 0 {
            return Err(replen_core::ReplenError::InvalidParameter {
                name: "stats_window_days".to_string(),
                reason: "統計視窗天數必須大於 0".to_string(),
            });
        }

        Ok(Self {
            engine: ReplenishmentEngine::new(params),
            stats_config,
        })
    }

    pub fn engine(&self) -> &ReplenishmentEngine {
        &self.engine
    }

    /// 抓取快照並計算補貨建議
    pub fn run(
        &self,
        products: &dyn ProductSource,
        sales: &dyn SalesLedgerSource,
        purchase_orders: &dyn PurchaseOrderSource,
        as_of: NaiveDate,
    ) -> replen_core::Result<ReplenResult> {
        let products = products.fetch()?;
        let sales = sales.fetch()?;
        let purchase_orders = purchase_orders.fetch()?;
        tracing::info!(
            "快照載入：商品 {} 筆，銷售 {} 筆，採購單 {} 筆",
            products.len(),
            sales.len(),
            purchase_orders.len()
        );

        let stats = SalesStatsCalculator::compute(&sales, &self.stats_config);
        let open_pos = OpenPoAggregator::aggregate(&purchase_orders);
        let last_order_dates = OpenPoAggregator::last_order_dates(&purchase_orders);

        Ok(self
            .engine
            .run(&products, &stats, &open_pos, &last_order_dates, as_of))
    }
}
