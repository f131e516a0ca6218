//! 下單數量計算
//!
//! 每個候選數量都對所有商品計算，再依商品類型決定採用哪一個。
//! 回傳值皆為未取整的非負數。

use crate::numeric::non_negative;

/// 常態分配單尾約 95% 服務水準
pub const SERVICE_LEVEL_Z: f64 = 1.65;

/// 下單數量計算器
pub struct OrderQuantityCalculator;

impl OrderQuantityCalculator {
    /// 海運目標庫存：(海運提前期 + 檢討週期) 的需求，再加安全庫存
    pub fn sea_target_stock(
        adjusted_daily_sales: f64,
        sea_lead_time: f64,
        review_period_days: f64,
        safety_factor: f64,
    ) -> f64 {
        let demand = adjusted_daily_sales * (sea_lead_time + review_period_days);
        non_negative(demand * (1.0 + safety_factor))
    }

    /// 海運下單量 = max(0, 目標 − 庫存 − 海運在途)
    pub fn sea_order_qty(sea_target: f64, inventory: f64, in_transit_sea: f64) -> f64 {
        non_negative(sea_target - inventory - in_transit_sea)
    }

    /// 空運補缺口：預估海運到貨時的庫存若為負，以空運補足（加上緩衝比例）
    pub fn air_bridge_qty(
        inventory: f64,
        adjusted_daily_sales: f64,
        std_dev_daily_sales: f64,
        days_until_eta: f64,
        bridge_buffer_pct: f64,
    ) -> f64 {
        let days = non_negative(days_until_eta);
        let demand_until_eta = adjusted_daily_sales * days;
        let volatility_buffer = std_dev_daily_sales * days.sqrt() * SERVICE_LEVEL_Z;
        let projected = inventory - demand_until_eta - volatility_buffer;

        if projected < 0.0 {
            non_negative(-projected * (1.0 + bridge_buffer_pct))
        } else {
            0.0
        }
    }

    /// 緊急空運量：空運提前期需求加安全庫存，扣除庫存與空運在途
    pub fn air_urgent_qty(
        adjusted_daily_sales: f64,
        air_lead_time: f64,
        safety_factor: f64,
        inventory: f64,
        in_transit_air: f64,
    ) -> f64 {
        let target = adjusted_daily_sales * air_lead_time * (1.0 + safety_factor);
        non_negative(target - inventory - in_transit_air)
    }

    /// 非重點商品空運量：安全庫存項再乘上非重點倍數，扣除全部在途
    pub fn air_non_focused_qty(
        adjusted_daily_sales: f64,
        air_lead_time: f64,
        review_period_days: f64,
        safety_factor: f64,
        non_focused_multiplier: f64,
        inventory: f64,
        total_in_transit: f64,
    ) -> f64 {
        let demand = adjusted_daily_sales * (air_lead_time + review_period_days);
        let target = demand + demand * safety_factor * non_focused_multiplier;
        non_negative(target - inventory - total_in_transit)
    }
}
