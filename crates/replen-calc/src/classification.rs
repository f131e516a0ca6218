//! 分類規則
//!
//! 每組規則是有序的 (標籤, 條件) 清單，由上而下第一個成立者勝出。
//! 條件彼此並不互斥，順序即優先權。

use replen_core::{MovementStatus, ReplenParams, ReplenStatus, VolatilityStatus};

/// 有序規則
pub type Rule<L, C> = (L, fn(&C) -> bool);

/// 第一個成立的規則標籤，全部不成立時回傳 `fallback`
pub fn first_match<L: Copy, C>(rules: &[Rule<L, C>], ctx: &C, fallback: L) -> L {
    rules
        .iter()
        .find(|(_, predicate)| predicate(ctx))
        .map(|(label, _)| *label)
        .unwrap_or(fallback)
}

/// 補貨狀態判斷所需的指標
#[derive(Debug, Clone, Copy)]
pub struct StatusContext {
    pub current_days_coverage: f64,
    pub effective_days_coverage: f64,
    pub danger_days_adjusted: f64,
    pub air_lead_time_adjusted: f64,
    pub sea_lead_time_adjusted: f64,
    pub has_open_sea_order: bool,
    pub danger_threshold_days: f64,
    pub overstock_days: f64,
}

fn is_urgent(c: &StatusContext) -> bool {
    c.current_days_coverage < c.danger_days_adjusted
}

fn is_low_focused(c: &StatusContext) -> bool {
    c.current_days_coverage < c.air_lead_time_adjusted
}

fn needs_sea_plan(c: &StatusContext) -> bool {
    c.effective_days_coverage < c.sea_lead_time_adjusted && !c.has_open_sea_order
}

fn is_overstocked_focused(c: &StatusContext) -> bool {
    c.effective_days_coverage > c.sea_lead_time_adjusted + c.overstock_days
}

fn is_low_non_focused(c: &StatusContext) -> bool {
    c.current_days_coverage < c.air_lead_time_adjusted + c.danger_threshold_days
}

fn is_overstocked_non_focused(c: &StatusContext) -> bool {
    c.current_days_coverage > c.overstock_days
}

/// 重點商品：緊急 > 低庫存 > 規劃海運 > 過量 > OK
pub const FOCUSED_STATUS_RULES: [Rule<ReplenStatus, StatusContext>; 4] = [
    (ReplenStatus::OrderNow, is_urgent),
    (ReplenStatus::LowStock, is_low_focused),
    (ReplenStatus::PlanSea, needs_sea_plan),
    (ReplenStatus::Overstocked, is_overstocked_focused),
];

/// 非重點商品：緊急 > 低庫存 > 過量 > OK
pub const NON_FOCUSED_STATUS_RULES: [Rule<ReplenStatus, StatusContext>; 3] = [
    (ReplenStatus::OrderNow, is_urgent),
    (ReplenStatus::LowStock, is_low_non_focused),
    (ReplenStatus::Overstocked, is_overstocked_non_focused),
];

/// 動銷分類所需的指標
#[derive(Debug, Clone, Copy)]
pub struct MovementContext {
    pub velocity_score: f64,
    pub days_since_last_sale: f64,
    pub fast_moving_threshold: f64,
    pub slow_moving_threshold: f64,
    pub dead_stock_days: f64,
}

impl MovementContext {
    pub fn new(velocity_score: f64, days_since_last_sale: f64, params: &ReplenParams) -> Self {
        Self {
            velocity_score,
            days_since_last_sale,
            fast_moving_threshold: params.fast_moving_threshold,
            slow_moving_threshold: params.slow_moving_threshold,
            dead_stock_days: params.dead_stock_days,
        }
    }
}

/// 快 > 一般 > 慢 > 呆滯 > 出清
pub const MOVEMENT_RULES: [Rule<MovementStatus, MovementContext>; 4] = [
    (MovementStatus::FastMoving, |c| {
        c.velocity_score > c.fast_moving_threshold
    }),
    (MovementStatus::Normal, |c| {
        c.velocity_score > c.slow_moving_threshold
    }),
    (MovementStatus::SlowMoving, |c| {
        c.days_since_last_sale < c.dead_stock_days && c.velocity_score > 0.0
    }),
    (MovementStatus::DeadStock, |c| {
        c.days_since_last_sale >= c.dead_stock_days
    }),
];

/// 變異係數分級門檻
pub const VOLATILITY_RULES: [Rule<VolatilityStatus, f64>; 3] = [
    (VolatilityStatus::Stable, |cv| *cv < 0.25),
    (VolatilityStatus::Moderate, |cv| *cv < 0.50),
    (VolatilityStatus::High, |cv| *cv < 0.75),
];

/// 補貨狀態分類
pub fn classify_status(focused: bool, ctx: &StatusContext) -> ReplenStatus {
    let rules: &[Rule<ReplenStatus, StatusContext>] = if focused {
        &FOCUSED_STATUS_RULES
    } else {
        &NON_FOCUSED_STATUS_RULES
    };
    first_match(rules, ctx, ReplenStatus::Ok)
}

pub fn classify_movement(ctx: &MovementContext) -> MovementStatus {
    first_match(&MOVEMENT_RULES, ctx, MovementStatus::Liquidate)
}

pub fn classify_volatility(coefficient_of_variation: f64) -> VolatilityStatus {
    first_match(
        &VOLATILITY_RULES,
        &coefficient_of_variation,
        VolatilityStatus::Extreme,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use replen_core::SENTINEL_DAYS;
    use rstest::rstest;

    fn ctx(coverage: f64, effective: f64, has_open_sea: bool) -> StatusContext {
        StatusContext {
            current_days_coverage: coverage,
            effective_days_coverage: effective,
            danger_days_adjusted: 8.4,
            air_lead_time_adjusted: 17.0,
            sea_lead_time_adjusted: 42.0,
            has_open_sea_order: has_open_sea,
            danger_threshold_days: 7.0,
            overstock_days: 60.0,
        }
    }

    #[rstest]
    #[case::urgent(2.0, 2.0, false, ReplenStatus::OrderNow)]
    #[case::urgent_beats_overstock(2.0, 500.0, false, ReplenStatus::OrderNow)]
    #[case::low_stock(10.0, 10.0, false, ReplenStatus::LowStock)]
    #[case::plan_sea(20.0, 30.0, false, ReplenStatus::PlanSea)]
    #[case::sea_already_open(20.0, 30.0, true, ReplenStatus::Ok)]
    #[case::overstocked(120.0, 120.0, false, ReplenStatus::Overstocked)]
    #[case::sentinel(SENTINEL_DAYS, SENTINEL_DAYS, false, ReplenStatus::Overstocked)]
    #[case::ok(50.0, 50.0, false, ReplenStatus::Ok)]
    fn test_focused_status(
        #[case] coverage: f64,
        #[case] effective: f64,
        #[case] has_open_sea: bool,
        #[case] expected: ReplenStatus,
    ) {
        assert_eq!(
            classify_status(true, &ctx(coverage, effective, has_open_sea)),
            expected
        );
    }

    #[rstest]
    #[case::urgent(5.0, ReplenStatus::OrderNow)]
    #[case::low_stock(20.0, ReplenStatus::LowStock)]
    #[case::ok(30.0, ReplenStatus::Ok)]
    #[case::overstocked(61.0, ReplenStatus::Overstocked)]
    fn test_non_focused_status(#[case] coverage: f64, #[case] expected: ReplenStatus) {
        assert_eq!(
            classify_status(false, &ctx(coverage, coverage, false)),
            expected
        );
    }

    #[rstest]
    #[case::fast(2.0, 0.0, MovementStatus::FastMoving)]
    #[case::normal(1.0, 0.0, MovementStatus::Normal)]
    #[case::slow(0.3, 10.0, MovementStatus::SlowMoving)]
    #[case::dead(0.0, 120.0, MovementStatus::DeadStock)]
    #[case::never_sold(0.0, 999.0, MovementStatus::DeadStock)]
    #[case::liquidate(0.0, 30.0, MovementStatus::Liquidate)]
    fn test_movement(
        #[case] velocity: f64,
        #[case] days_since: f64,
        #[case] expected: MovementStatus,
    ) {
        let ctx = MovementContext::new(velocity, days_since, &ReplenParams::default());
        assert_eq!(classify_movement(&ctx), expected);
    }

    #[rstest]
    #[case(0.0, VolatilityStatus::Stable)]
    #[case(0.25, VolatilityStatus::Moderate)]
    #[case(0.6, VolatilityStatus::High)]
    #[case(0.75, VolatilityStatus::Extreme)]
    #[case(3.0, VolatilityStatus::Extreme)]
    fn test_volatility(#[case] cv: f64, #[case] expected: VolatilityStatus) {
        assert_eq!(classify_volatility(cv), expected);
    }
}
