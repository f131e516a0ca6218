//! 數值邊界處理
//!
//! 任何非有限中間值在進入比較或取整前都必須轉為定義好的哨兵值。

use replen_core::SENTINEL_DAYS;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// 非有限值改用 `fallback`
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// 非有限或負值一律為 0
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// 單位數量向上取整（非有限或非正值為 0）
pub fn ceil_units(value: f64) -> u64 {
    let value = non_negative(value);
    value.ceil() as u64
}

/// 可用天數：庫存 ÷ 日均量，日均量非正時回傳 999
pub fn days_of_cover(stock: f64, daily_rate: f64) -> f64 {
    if daily_rate > 0.0 && daily_rate.is_finite() {
        finite_or(stock / daily_rate, SENTINEL_DAYS)
    } else {
        SENTINEL_DAYS
    }
}

/// Decimal 轉 f64（無法轉換時為 0）
pub fn to_f64(value: Decimal) -> f64 {
    value.to_f64().map(|v| finite_or(v, 0.0)).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_units() {
        assert_eq!(ceil_units(10.2), 11);
        assert_eq!(ceil_units(10.0), 10);
        assert_eq!(ceil_units(-3.5), 0);
        assert_eq!(ceil_units(f64::NAN), 0);
        assert_eq!(ceil_units(f64::INFINITY), 0);
        assert_eq!(ceil_units(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn test_days_of_cover() {
        assert_eq!(days_of_cover(10.0, 5.0), 2.0);
        assert_eq!(days_of_cover(10.0, 0.0), SENTINEL_DAYS);
        assert_eq!(days_of_cover(0.0, 0.0), SENTINEL_DAYS);
        assert_eq!(days_of_cover(10.0, f64::NAN), SENTINEL_DAYS);
        assert_eq!(days_of_cover(f64::INFINITY, 1.0), SENTINEL_DAYS);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(to_f64(Decimal::new(25, 1)), 2.5);
        assert_eq!(to_f64(Decimal::ZERO), 0.0);
    }
}
