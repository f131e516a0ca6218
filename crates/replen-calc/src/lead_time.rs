//! 交期計算

use chrono::NaiveDate;
use replen_core::ReplenParams;

use crate::numeric::non_negative;

/// 調整後提前期
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustedLeadTimes {
    pub air: f64,
    pub sea: f64,
}

/// 交期計算器
pub struct LeadTimeCalculator;

impl LeadTimeCalculator {
    /// 供應商交期 + 運輸 + 行政天數（旺季再加假期緩衝）
    ///
    /// 空運與海運使用相同的行政與假期附加天數。
    pub fn adjusted(vendor_lead_time_days: f64, params: &ReplenParams) -> AdjustedLeadTimes {
        let vendor = non_negative(vendor_lead_time_days);
        let overhead = params.admin_days + params.effective_holiday_buffer();

        AdjustedLeadTimes {
            air: vendor + params.air_transit_days + overhead,
            sea: vendor + params.sea_transit_days + overhead,
        }
    }

    /// 距預計到貨日天數（已過期時為 0）
    pub fn days_until(as_of: NaiveDate, arrive_by: NaiveDate) -> f64 {
        (arrive_by - as_of).num_days().max(0) as f64
    }

    /// 距上次下單天數
    pub fn days_since(as_of: NaiveDate, last: NaiveDate) -> f64 {
        (as_of - last).num_days() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjusted_off_season() {
        let lead = LeadTimeCalculator::adjusted(10.0, &ReplenParams::default());
        assert_eq!(lead.air, 17.0);
        assert_eq!(lead.sea, 42.0);
    }

    #[test]
    fn test_adjusted_peak_adds_same_buffer_to_both_routes() {
        let params = ReplenParams::default().with_peak_season(true, 1.2);
        let lead = LeadTimeCalculator::adjusted(10.0, &params);
        assert_eq!(lead.air, 24.0);
        assert_eq!(lead.sea, 49.0);
    }

    #[test]
    fn test_negative_vendor_lead_time_is_clipped() {
        let lead = LeadTimeCalculator::adjusted(-4.0, &ReplenParams::default());
        assert_eq!(lead.air, 7.0);
    }

    #[test]
    fn test_days_until_never_negative() {
        let as_of = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        let past = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        let future = NaiveDate::from_ymd_opt(2025, 11, 21).unwrap();

        assert_eq!(LeadTimeCalculator::days_until(as_of, past), 0.0);
        assert_eq!(LeadTimeCalculator::days_until(as_of, future), 20.0);
        assert_eq!(LeadTimeCalculator::days_since(as_of, past), 12.0);
    }
}
