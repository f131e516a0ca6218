//! 銷售統計計算
//!
//! 所有視窗以輸入資料中最近一筆銷售日期為基準（不是今天），
//! 同一份帳本重算結果必定相同。

use std::collections::BTreeMap;

use chrono::NaiveDate;
use replen_core::{DailySalesRecord, DateWindow, SalesStatsConfig};
use serde::{Deserialize, Serialize};

use crate::numeric::{finite_or, to_f64};

/// 從未銷售（或極久未銷售）的天數哨兵值
pub const NEVER_SOLD_DAYS: i64 = 999;

/// 單一 MSKU 的銷售統計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesStats {
    pub msku: String,

    /// 統計視窗日均銷量（缺銷售日補 0 後的平均）
    pub avg_daily_sales_30d: f64,

    /// 統計視窗日銷量樣本標準差
    pub std_dev_daily_sales: f64,

    /// 趨勢視窗總銷量
    pub total_sales_90d: f64,

    /// 最後一個銷量 > 0 的日期
    pub last_sale_date: Option<NaiveDate>,

    /// 距最後銷售天數（無銷售時為 999）
    pub days_since_last_sale: i64,

    /// 變異係數（日均為 0 時為 0）
    pub coefficient_of_variation: f64,

    /// 趨勢強度：> 1 加速，< 1 減速
    pub velocity_score: f64,
}

impl SalesStats {
    /// 無銷售紀錄的 MSKU
    pub fn zero(msku: String) -> Self {
        Self {
            msku,
            avg_daily_sales_30d: 0.0,
            std_dev_daily_sales: 0.0,
            total_sales_90d: 0.0,
            last_sale_date: None,
            days_since_last_sale: NEVER_SOLD_DAYS,
            coefficient_of_variation: 0.0,
            velocity_score: 0.0,
        }
    }
}

/// 銷售統計計算器
pub struct SalesStatsCalculator;

impl SalesStatsCalculator {
    /// 計算每個 MSKU 的銷售統計
    pub fn compute(
        records: &[DailySalesRecord],
        config: &SalesStatsConfig,
    ) -> BTreeMap<String, SalesStats> {
        let Some(max_date) = records.iter().map(|r| r.sale_date).max() else {
            tracing::debug!("銷售帳本為空，略過統計");
            return BTreeMap::new();
        };

        let stats_window = DateWindow::ending_at(max_date, config.stats_window_days);
        let velocity_window = DateWindow::ending_at(max_date, config.velocity_window_days);
        tracing::debug!(
            "統計視窗 {} ~ {}，趨勢視窗 {} ~ {}",
            stats_window.start,
            stats_window.end,
            velocity_window.start,
            velocity_window.end
        );

        let daily_totals = Self::daily_totals(records);

        let stats: BTreeMap<String, SalesStats> = daily_totals
            .iter()
            .map(|(msku, by_day)| {
                let row = Self::compute_one(
                    msku,
                    by_day,
                    max_date,
                    &stats_window,
                    &velocity_window,
                    config,
                );
                (msku.clone(), row)
            })
            .collect();

        tracing::info!("銷售統計完成：{} 個 MSKU", stats.len());
        stats
    }

    /// 依 (MSKU, 日期) 加總跨平台、跨帳號銷量
    fn daily_totals(records: &[DailySalesRecord]) -> BTreeMap<String, BTreeMap<NaiveDate, f64>> {
        let mut totals: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
        for record in records {
            *totals
                .entry(record.msku.clone())
                .or_default()
                .entry(record.sale_date)
                .or_insert(0.0) += to_f64(record.quantity_sold);
        }
        totals
    }

    fn compute_one(
        msku: &str,
        by_day: &BTreeMap<NaiveDate, f64>,
        max_date: NaiveDate,
        stats_window: &DateWindow,
        velocity_window: &DateWindow,
        config: &SalesStatsConfig,
    ) -> SalesStats {
        let mut row = SalesStats::zero(msku.to_string());

        // 只有在統計視窗內出現過的 MSKU 才建立密集網格
        if by_day.keys().any(|d| stats_window.contains(*d)) {
            let grid: Vec<f64> = stats_window
                .days()
                .into_iter()
                .map(|day| by_day.get(&day).copied().unwrap_or(0.0))
                .collect();
            row.avg_daily_sales_30d = mean(&grid);
            row.std_dev_daily_sales = sample_std_dev(&grid);
        }

        row.total_sales_90d = by_day
            .iter()
            .filter(|(day, _)| velocity_window.contains(**day))
            .map(|(_, qty)| qty)
            .sum();

        row.last_sale_date = by_day
            .iter()
            .filter(|(_, qty)| **qty > 0.0)
            .map(|(day, _)| *day)
            .max();
        if let Some(last) = row.last_sale_date {
            row.days_since_last_sale = (max_date - last).num_days();
        }

        row.coefficient_of_variation = if row.avg_daily_sales_30d > 0.0 {
            finite_or(row.std_dev_daily_sales / row.avg_daily_sales_30d, 0.0)
        } else {
            0.0
        };

        // (日均 × 統計天數) ÷ (趨勢總量 ÷ 視窗倍數)
        let window_ratio = config.velocity_window_days as f64 / config.stats_window_days.max(1) as f64;
        let divisor = row.total_sales_90d / window_ratio;
        row.velocity_score = if divisor > 0.0 && divisor.is_finite() {
            finite_or(
                row.avg_daily_sales_30d * config.stats_window_days as f64 / divisor,
                0.0,
            )
        } else {
            0.0
        };

        row
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    finite_or(values.iter().sum::<f64>() / values.len() as f64, 0.0)
}

/// 樣本標準差（n - 1），單一資料點時為 0
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>()
        / (values.len() - 1) as f64;
    finite_or(variance.sqrt(), 0.0)
}
