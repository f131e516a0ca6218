//! 包材補貨
//!
//! 單一提前期、單一安全覆蓋天數，沒有空運/海運與重點商品之分。

use std::collections::BTreeMap;

use replen_core::{PackagingItem, PackagingParams, PackagingRecommendation, PackagingStatus, PackagingUsage};

use crate::numeric::{ceil_units, days_of_cover, finite_or, non_negative, to_f64};
use crate::sales_stats::SalesStats;

/// 目標庫存在再訂購點之外多備的天數
pub const TARGET_EXTRA_DAYS: f64 = 30.0;

/// 可用天數超過此值視為過量
pub const OVERSTOCK_DAYS: f64 = 120.0;

/// 包材補貨規劃器
#[derive(Debug, Clone)]
pub struct PackagingPlanner {
    params: PackagingParams,
}

impl PackagingPlanner {
    pub fn new(params: PackagingParams) -> Self {
        Self { params }
    }

    /// 依商品日均銷量與包材用量表推算每種包材的日用量
    pub fn daily_usage(
        sales_stats: &BTreeMap<String, SalesStats>,
        usages: &[PackagingUsage],
    ) -> BTreeMap<String, f64> {
        let mut usage_by_material: BTreeMap<String, f64> = BTreeMap::new();
        for usage in usages {
            let avg = sales_stats
                .get(usage.msku.trim())
                .map(|s| non_negative(s.avg_daily_sales_30d))
                .unwrap_or(0.0);
            *usage_by_material.entry(usage.material.clone()).or_insert(0.0) +=
                avg * non_negative(to_f64(usage.qty_per_unit));
        }
        usage_by_material
    }

    /// 計算包材補貨建議（依輸入順序）
    pub fn plan(
        &self,
        items: &[PackagingItem],
        daily_usage: &BTreeMap<String, f64>,
    ) -> Vec<PackagingRecommendation> {
        let recommendations: Vec<_> = items
            .iter()
            .map(|item| {
                let usage = daily_usage.get(&item.material).copied().unwrap_or(0.0);
                self.plan_one(item, usage)
            })
            .collect();

        tracing::info!("包材補貨計算完成：{} 項", recommendations.len());
        recommendations
    }

    fn plan_one(&self, item: &PackagingItem, daily_usage: f64) -> PackagingRecommendation {
        let lead = self.params.lead_time_days;
        let cover = self.params.stock_cover_days;

        let stock = to_f64(item.current_stock);
        let usage = non_negative(daily_usage);

        let reorder_point = finite_or(usage * lead + usage * cover, 0.0);
        let target_stock = finite_or(reorder_point + usage * TARGET_EXTRA_DAYS, 0.0);
        let days_of_stock = days_of_cover(stock, usage);

        let status = if stock <= reorder_point {
            PackagingStatus::OrderNow
        } else if days_of_stock <= lead + cover {
            PackagingStatus::ReorderSoon
        } else if days_of_stock > OVERSTOCK_DAYS {
            PackagingStatus::Overstocked
        } else {
            PackagingStatus::Ok
        };

        PackagingRecommendation {
            material: item.material.clone(),
            current_stock: stock,
            daily_usage: usage,
            days_of_stock,
            reorder_point,
            target_stock,
            suggested_order_qty: ceil_units(target_stock - stock),
            status,
        }
    }
}
