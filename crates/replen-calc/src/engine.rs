//! 補貨主計算器
//!
//! 每個 MSKU 依序通過：需求調整 → 提前期 → 動態安全係數 → 可售天數
//! → 檢討週期 → 候選數量 → 依類型決定數量 → 狀態/動銷/波動分類 → 下單原因。

use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use replen_core::{
    OrderReason, ProductRecord, ProductType, Recommendation, ReplenParams, ReplenStatus,
    SENTINEL_DAYS,
};

use crate::classification::{
    classify_movement, classify_status, classify_volatility, MovementContext, StatusContext,
};
use crate::lead_time::LeadTimeCalculator;
use crate::numeric::{ceil_units, days_of_cover, finite_or, non_negative, to_f64};
use crate::open_po::OpenPoAggregate;
use crate::order_qty::OrderQuantityCalculator;
use crate::sales_stats::SalesStats;
use crate::{ReplenResult, ReplenWarning};

/// 補貨計算器
#[derive(Debug, Clone)]
pub struct ReplenishmentEngine {
    params: ReplenParams,
}

impl ReplenishmentEngine {
    /// 創建新的補貨計算器
    pub fn new(params: ReplenParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ReplenParams {
        &self.params
    }

    /// 主補貨計算入口
    ///
    /// 不會回傳錯誤：缺少統計或在途資料的商品以 0 計算，資料品質問題記錄於 warnings。
    pub fn run(
        &self,
        products: &[ProductRecord],
        sales_stats: &BTreeMap<String, SalesStats>,
        open_pos: &BTreeMap<String, OpenPoAggregate>,
        last_order_dates: &BTreeMap<String, NaiveDate>,
        as_of: NaiveDate,
    ) -> ReplenResult {
        tracing::info!(
            "開始補貨計算：商品 {} 筆，銷售統計 {} 筆，在途 {} 筆，基準日 {}",
            products.len(),
            sales_stats.len(),
            open_pos.len(),
            as_of
        );

        let start_time = std::time::Instant::now();
        let mut result = ReplenResult::empty();

        // Step 1: 商品主檔去重（保留第一筆）
        tracing::debug!("Step 1: 商品主檔去重");
        let mut seen: HashSet<&str> = HashSet::new();
        let mut unique_products = Vec::with_capacity(products.len());
        for product in products {
            let msku = product.msku.trim();
            if msku.is_empty() {
                result.add_warning(ReplenWarning::error(
                    String::new(),
                    "商品主檔有空白 MSKU，已略過".to_string(),
                ));
                continue;
            }
            if !seen.insert(msku) {
                tracing::warn!("商品主檔 MSKU 重複：{}，保留第一筆", msku);
                result.add_warning(ReplenWarning::warning(
                    msku.to_string(),
                    "商品主檔 MSKU 重複，保留第一筆".to_string(),
                ));
                continue;
            }
            unique_products.push(product);
        }

        // Step 2: 逐商品計算
        tracing::debug!("Step 2: 逐商品計算 {} 筆", unique_products.len());
        for product in unique_products {
            let msku = product.msku.trim();
            let stats = match sales_stats.get(msku) {
                Some(stats) => stats.clone(),
                None => {
                    result.add_warning(ReplenWarning::info(
                        msku.to_string(),
                        "無銷售紀錄，以 0 計算".to_string(),
                    ));
                    SalesStats::zero(msku.to_string())
                }
            };
            if !stats_are_finite(&stats) {
                result.add_warning(ReplenWarning::warning(
                    msku.to_string(),
                    "銷售統計含非有限值，已轉為 0".to_string(),
                ));
            }

            let recommendation = self.evaluate(
                product,
                &stats,
                open_pos.get(msku),
                last_order_dates.get(msku).copied(),
                as_of,
            );
            tracing::debug!(
                "{}: {} 空運 {} 海運 {} [{}]",
                recommendation.msku,
                recommendation.replen_status,
                recommendation.air_order_quantity,
                recommendation.sea_order_quantity,
                recommendation.order_reason()
            );
            result.recommendations.push(recommendation);
        }

        // Step 3: 商品主檔外的在途
        tracing::debug!("Step 3: 檢查主檔外在途");
        for msku in open_pos.keys().filter(|m| !seen.contains(m.as_str())) {
            result.add_warning(ReplenWarning::info(
                msku.clone(),
                "有未結採購單但不在商品主檔".to_string(),
            ));
        }

        let elapsed = start_time.elapsed().as_millis();
        result.calculation_time_ms = Some(elapsed);

        tracing::info!(
            "補貨計算完成：建議 {} 筆，警告 {} 筆，耗時 {} ms",
            result.recommendations.len(),
            result.warnings.len(),
            elapsed
        );

        result
    }

    /// 單一商品的補貨建議
    pub fn evaluate(
        &self,
        product: &ProductRecord,
        stats: &SalesStats,
        open_po: Option<&OpenPoAggregate>,
        last_order_date: Option<NaiveDate>,
        as_of: NaiveDate,
    ) -> Recommendation {
        let params = &self.params;
        let focused = product.product_type == ProductType::Focused;

        let inventory = to_f64(product.current_inventory);
        let avg_daily = non_negative(stats.avg_daily_sales_30d);
        let std_dev = non_negative(stats.std_dev_daily_sales);
        let cv = non_negative(stats.coefficient_of_variation);

        // 需求調整
        let adjusted_daily_sales = non_negative(avg_daily * params.demand_multiplier());

        // 提前期
        let lead = LeadTimeCalculator::adjusted(product.vendor_lead_time_days, params);

        // 動態安全係數
        let safety_factor =
            finite_or((params.base_safety_buffer_pct + cv).min(params.max_safety_buffer_pct), 0.0);

        // 在途
        let (in_transit_air, in_transit_sea, sea_order_eta) = match open_po {
            Some(po) => (
                to_f64(po.on_order_qty_air),
                to_f64(po.on_order_qty_sea),
                po.sea_order_eta,
            ),
            None => (0.0, 0.0, None),
        };
        let total_in_transit = in_transit_air + in_transit_sea;
        let has_open_sea_order = in_transit_sea > 0.0;

        // 可售天數
        let current_days_coverage = days_of_cover(inventory, adjusted_daily_sales);
        let effective_days_coverage =
            days_of_cover(inventory + total_in_transit, adjusted_daily_sales);
        let danger_days_adjusted = finite_or(params.danger_threshold_days * (1.0 + cv), 0.0);

        // 檢討週期：從未下單視為到期
        let review_due = match last_order_date {
            Some(last) => LeadTimeCalculator::days_since(as_of, last) >= params.review_period_days,
            None => true,
        };

        // 候選數量
        let sea_target_stock = OrderQuantityCalculator::sea_target_stock(
            adjusted_daily_sales,
            lead.sea,
            params.review_period_days,
            safety_factor,
        );
        let sea_qty =
            OrderQuantityCalculator::sea_order_qty(sea_target_stock, inventory, in_transit_sea);

        let days_until_eta = sea_order_eta
            .map(|eta| LeadTimeCalculator::days_until(as_of, eta))
            .unwrap_or(params.sea_transit_days);
        let bridge_qty = OrderQuantityCalculator::air_bridge_qty(
            inventory,
            adjusted_daily_sales,
            std_dev,
            days_until_eta,
            params.air_bridge_buffer_pct,
        );
        let urgent_qty = OrderQuantityCalculator::air_urgent_qty(
            adjusted_daily_sales,
            lead.air,
            safety_factor,
            inventory,
            in_transit_air,
        );
        let non_focused_qty = OrderQuantityCalculator::air_non_focused_qty(
            adjusted_daily_sales,
            lead.air,
            params.review_period_days,
            safety_factor,
            params.non_focused_multiplier,
            inventory,
            total_in_transit,
        );

        // 依類型決定數量
        let (sea_order_quantity, air_order_quantity) = if focused {
            let air = if has_open_sea_order {
                bridge_qty
            } else if current_days_coverage < danger_days_adjusted {
                urgent_qty
            } else {
                0.0
            };
            (ceil_units(sea_qty), ceil_units(air))
        } else {
            (0, ceil_units(non_focused_qty))
        };

        // 分類
        let replen_status = classify_status(
            focused,
            &StatusContext {
                current_days_coverage,
                effective_days_coverage,
                danger_days_adjusted,
                air_lead_time_adjusted: lead.air,
                sea_lead_time_adjusted: lead.sea,
                has_open_sea_order,
                danger_threshold_days: params.danger_threshold_days,
                overstock_days: params.overstock_days,
            },
        );
        let movement_status = classify_movement(&MovementContext::new(
            finite_or(stats.velocity_score, 0.0),
            stats.days_since_last_sale as f64,
            params,
        ));
        let volatility_status = classify_volatility(cv);

        let order_reasons = order_reasons(
            focused,
            replen_status,
            has_open_sea_order,
            review_due,
            sea_order_quantity,
            air_order_quantity,
        );

        Recommendation {
            msku: product.msku.trim().to_string(),
            product_type: product.product_type,
            current_inventory: inventory,
            adjusted_daily_sales,
            in_transit_air,
            in_transit_sea,
            sea_order_eta,
            air_lead_time_adjusted: finite_or(lead.air, 0.0),
            sea_lead_time_adjusted: finite_or(lead.sea, 0.0),
            safety_factor,
            danger_days_adjusted,
            current_days_coverage: finite_or(current_days_coverage, SENTINEL_DAYS),
            effective_days_coverage: finite_or(effective_days_coverage, SENTINEL_DAYS),
            review_due,
            sea_target_stock,
            sea_order_quantity,
            air_order_quantity,
            replen_status,
            movement_status,
            volatility_status,
            order_reasons,
        }
    }
}

/// 下單原因（可疊加，依序串接）
fn order_reasons(
    focused: bool,
    status: ReplenStatus,
    has_open_sea_order: bool,
    review_due: bool,
    sea_qty: u64,
    air_qty: u64,
) -> Vec<OrderReason> {
    let mut reasons = Vec::new();

    if focused && status == ReplenStatus::OrderNow && air_qty > 0 {
        reasons.push(OrderReason::Urgent);
    }
    if focused && !reasons.contains(&OrderReason::Urgent) && has_open_sea_order && air_qty > 0 {
        reasons.push(OrderReason::Bridge);
    }
    if sea_qty > 0 && review_due {
        reasons.push(OrderReason::RegularSea);
    }
    if !focused && air_qty > 0 {
        reasons.push(OrderReason::RegularAir);
    }

    reasons
}

fn stats_are_finite(stats: &SalesStats) -> bool {
    stats.avg_daily_sales_30d.is_finite()
        && stats.std_dev_daily_sales.is_finite()
        && stats.coefficient_of_variation.is_finite()
        && stats.velocity_score.is_finite()
}
