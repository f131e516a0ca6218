//! 補貨策略參數配置

use serde::{Deserialize, Serialize};

use crate::{ReplenError, Result};

/// 補貨引擎策略參數
///
/// 所有欄位皆有預設值，缺少任何鍵的設定檔都能反序列化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplenParams {
    /// 旺季需求倍數
    pub peak_season_multiplier: f64,

    /// 是否為旺季
    pub is_peak_season: bool,

    /// 空運運輸天數
    pub air_transit_days: f64,

    /// 海運運輸天數
    pub sea_transit_days: f64,

    /// 行政作業天數（空運、海運共用）
    pub admin_days: f64,

    /// 旺季假期緩衝天數（空運、海運共用）
    pub holiday_buffer_days: f64,

    /// 基礎安全庫存比例
    pub base_safety_buffer_pct: f64,

    /// 安全庫存比例上限
    pub max_safety_buffer_pct: f64,

    /// 危險庫存天數門檻
    pub danger_threshold_days: f64,

    /// 檢討週期（天）
    pub review_period_days: f64,

    /// 非重點商品安全庫存倍數
    pub non_focused_multiplier: f64,

    /// 空運橋接緩衝比例
    pub air_bridge_buffer_pct: f64,

    /// 超量庫存天數
    pub overstock_days: f64,

    /// 快速動銷門檻（velocity score）
    pub fast_moving_threshold: f64,

    /// 慢速動銷門檻（velocity score）
    pub slow_moving_threshold: f64,

    /// 呆滯庫存天數
    pub dead_stock_days: f64,
}

impl Default for ReplenParams {
    fn default() -> Self {
        Self {
            peak_season_multiplier: 1.2,
            is_peak_season: false,
            air_transit_days: 5.0,
            sea_transit_days: 30.0,
            admin_days: 2.0,
            holiday_buffer_days: 7.0,
            base_safety_buffer_pct: 0.20,
            max_safety_buffer_pct: 0.50,
            danger_threshold_days: 7.0,
            review_period_days: 15.0,
            non_focused_multiplier: 1.5,
            air_bridge_buffer_pct: 0.10,
            overstock_days: 60.0,
            fast_moving_threshold: 1.5,
            slow_moving_threshold: 0.5,
            dead_stock_days: 90.0,
        }
    }
}

impl ReplenParams {
    /// 從扁平 JSON 設定載入（缺少的鍵使用預設值）
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(raw)?;
        params.validate()?;
        Ok(params)
    }

    /// 建構器模式：設置旺季
    pub fn with_peak_season(mut self, is_peak: bool, multiplier: f64) -> Self {
        self.is_peak_season = is_peak;
        self.peak_season_multiplier = multiplier;
        self
    }

    /// 建構器模式：設置運輸天數
    pub fn with_transit_days(mut self, air: f64, sea: f64) -> Self {
        self.air_transit_days = air;
        self.sea_transit_days = sea;
        self
    }

    /// 建構器模式：設置行政與假期緩衝天數
    pub fn with_admin_days(mut self, admin: f64, holiday_buffer: f64) -> Self {
        self.admin_days = admin;
        self.holiday_buffer_days = holiday_buffer;
        self
    }

    /// 建構器模式：設置安全庫存比例（基礎、上限）
    pub fn with_safety_buffer(mut self, base_pct: f64, max_pct: f64) -> Self {
        self.base_safety_buffer_pct = base_pct;
        self.max_safety_buffer_pct = max_pct;
        self
    }

    /// 建構器模式：設置危險門檻
    pub fn with_danger_threshold(mut self, days: f64) -> Self {
        self.danger_threshold_days = days;
        self
    }

    /// 建構器模式：設置檢討週期
    pub fn with_review_period(mut self, days: f64) -> Self {
        self.review_period_days = days;
        self
    }

    /// 建構器模式：設置超量庫存天數
    pub fn with_overstock_days(mut self, days: f64) -> Self {
        self.overstock_days = days;
        self
    }

    /// 建構器模式：設置動銷門檻
    pub fn with_movement_thresholds(mut self, fast: f64, slow: f64, dead_stock_days: f64) -> Self {
        self.fast_moving_threshold = fast;
        self.slow_moving_threshold = slow;
        self.dead_stock_days = dead_stock_days;
        self
    }

    /// 檢查參數合法性
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("peak_season_multiplier", self.peak_season_multiplier),
            ("air_transit_days", self.air_transit_days),
            ("sea_transit_days", self.sea_transit_days),
            ("admin_days", self.admin_days),
            ("holiday_buffer_days", self.holiday_buffer_days),
            ("base_safety_buffer_pct", self.base_safety_buffer_pct),
            ("max_safety_buffer_pct", self.max_safety_buffer_pct),
            ("danger_threshold_days", self.danger_threshold_days),
            ("review_period_days", self.review_period_days),
            ("non_focused_multiplier", self.non_focused_multiplier),
            ("air_bridge_buffer_pct", self.air_bridge_buffer_pct),
            ("overstock_days", self.overstock_days),
            ("fast_moving_threshold", self.fast_moving_threshold),
            ("slow_moving_threshold", self.slow_moving_threshold),
            ("dead_stock_days", self.dead_stock_days),
        ];

        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ReplenError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("必須為非負有限數值，實際為 {}", value),
                });
            }
        }

        if self.slow_moving_threshold > self.fast_moving_threshold {
            return Err(ReplenError::InvalidParameter {
                name: "slow_moving_threshold".to_string(),
                reason: "不可大於 fast_moving_threshold".to_string(),
            });
        }

        Ok(())
    }

    /// 實際生效的需求倍數（非旺季為 1）
    pub fn demand_multiplier(&self) -> f64 {
        if self.is_peak_season {
            self.peak_season_multiplier
        } else {
            1.0
        }
    }

    /// 實際生效的假期緩衝（非旺季為 0）
    pub fn effective_holiday_buffer(&self) -> f64 {
        if self.is_peak_season {
            self.holiday_buffer_days
        } else {
            0.0
        }
    }
}

/// 銷售統計視窗
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalesStatsConfig {
    /// 平均與標準差視窗（天）
    pub stats_window_days: u32,

    /// 趨勢（velocity）視窗（天）
    pub velocity_window_days: u32,
}

impl Default for SalesStatsConfig {
    fn default() -> Self {
        Self {
            stats_window_days: 30,
            velocity_window_days: 90,
        }
    }
}

/// 包材補貨參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingParams {
    /// 包材採購提前期（天）
    pub lead_time_days: f64,

    /// 安全庫存覆蓋天數
    pub stock_cover_days: f64,
}

impl Default for PackagingParams {
    fn default() -> Self {
        Self {
            lead_time_days: 7.0,
            stock_cover_days: 15.0,
        }
    }
}

impl PackagingParams {
    /// 從扁平 JSON 設定載入
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time(mut self, days: f64) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 建構器模式：設置安全覆蓋天數
    pub fn with_stock_cover(mut self, days: f64) -> Self {
        self.stock_cover_days = days;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = ReplenParams::default();

        assert_eq!(params.danger_threshold_days, 7.0);
        assert_eq!(params.review_period_days, 15.0);
        assert_eq!(params.fast_moving_threshold, 1.5);
        assert_eq!(params.demand_multiplier(), 1.0);
        assert_eq!(params.effective_holiday_buffer(), 0.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params =
            ReplenParams::from_json_str(r#"{"danger_threshold_days": 10, "is_peak_season": true}"#)
                .unwrap();

        assert_eq!(params.danger_threshold_days, 10.0);
        assert!(params.is_peak_season);
        assert_eq!(params.demand_multiplier(), 1.2);
        assert_eq!(params.effective_holiday_buffer(), 7.0);
        // 未提供的鍵
        assert_eq!(params.sea_transit_days, 30.0);
    }

    #[test]
    fn test_empty_json() {
        let params = ReplenParams::from_json_str("{}").unwrap();
        assert_eq!(params, ReplenParams::default());
    }

    #[test]
    fn test_builder() {
        let params = ReplenParams::default()
            .with_peak_season(true, 1.5)
            .with_transit_days(4.0, 25.0)
            .with_review_period(30.0);

        assert_eq!(params.demand_multiplier(), 1.5);
        assert_eq!(params.air_transit_days, 4.0);
        assert_eq!(params.sea_transit_days, 25.0);
        assert_eq!(params.review_period_days, 30.0);
    }

    #[test]
    fn test_validate_rejects_negative() {
        let params = ReplenParams::default().with_danger_threshold(-1.0);
        assert!(matches!(
            params.validate(),
            Err(ReplenError::InvalidParameter { ref name, .. }) if name == "danger_threshold_days"
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let params = ReplenParams::default().with_movement_thresholds(0.5, 1.5, 90.0);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ReplenParams::from_json_str("not json"),
            Err(ReplenError::Config(_))
        ));
    }

    #[test]
    fn test_packaging_params() {
        let params = PackagingParams::from_json_str(r#"{"lead_time_days": 10}"#).unwrap();
        assert_eq!(params.lead_time_days, 10.0);
        assert_eq!(params.stock_cover_days, 15.0);
    }
}
