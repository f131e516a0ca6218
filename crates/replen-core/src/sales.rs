//! 每日銷售紀錄模型

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 銷售平台
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    Amazon,
    Flipkart,
    Meesho,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Amazon => "Amazon",
            Platform::Flipkart => "Flipkart",
            Platform::Meesho => "Meesho",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 每日銷售紀錄（經 SKU 對應與彙總後）
///
/// 每個 (sale_date, msku, platform, account_name) 只會有一筆。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySalesRecord {
    /// 銷售日期
    pub sale_date: NaiveDate,

    /// 主商品代碼
    pub msku: String,

    /// 平台
    pub platform: Platform,

    /// 平台帳號
    pub account_name: String,

    /// 銷售數量（平台期間報表分攤後可能為小數）
    pub quantity_sold: Decimal,

    /// 淨營收
    pub net_revenue: Decimal,

    /// 總營收（來源報表未提供時為 0）
    #[serde(default)]
    pub gross_revenue: Decimal,

    /// 折扣金額（來源報表未提供時為 0）
    #[serde(default)]
    pub discount_amount: Decimal,

    /// 平台費用（來源報表未提供時為 0）
    #[serde(default)]
    pub platform_fees: Decimal,

    /// 來源平台 SKU（彙總後以 ", " 串接）
    #[serde(default)]
    pub platform_sku: String,

    /// 來源訂單號（彙總後以 ", " 串接）
    #[serde(default)]
    pub order_id: String,
}

impl DailySalesRecord {
    /// 創建新的每日銷售紀錄
    pub fn new(
        sale_date: NaiveDate,
        msku: String,
        platform: Platform,
        account_name: String,
        quantity_sold: Decimal,
    ) -> Self {
        Self {
            sale_date,
            msku,
            platform,
            account_name,
            quantity_sold,
            net_revenue: Decimal::ZERO,
            gross_revenue: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            platform_fees: Decimal::ZERO,
            platform_sku: String::new(),
            order_id: String::new(),
        }
    }

    /// 建構器模式：設置淨營收
    pub fn with_net_revenue(mut self, revenue: Decimal) -> Self {
        self.net_revenue = revenue;
        self
    }

    /// 建構器模式：設置來源 SKU
    pub fn with_platform_sku(mut self, platform_sku: String) -> Self {
        self.platform_sku = platform_sku;
        self
    }

    /// 建構器模式：設置訂單號
    pub fn with_order_id(mut self, order_id: String) -> Self {
        self.order_id = order_id;
        self
    }

    /// 彙總鍵
    pub fn group_key(&self) -> (NaiveDate, String, Platform, String) {
        (
            self.sale_date,
            self.msku.clone(),
            self.platform,
            self.account_name.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_record() {
        let record = DailySalesRecord::new(
            NaiveDate::from_ymd_opt(2025, 10, 6).unwrap(),
            "WIDGET-1".to_string(),
            Platform::Flipkart,
            "Main Store".to_string(),
            Decimal::from(3),
        )
        .with_net_revenue(Decimal::from(450))
        .with_platform_sku("wid-1-blk".to_string());

        assert_eq!(record.quantity_sold, Decimal::from(3));
        assert_eq!(record.net_revenue, Decimal::from(450));
        assert_eq!(record.gross_revenue, Decimal::ZERO);
        assert_eq!(record.platform.to_string(), "Flipkart");
    }

    #[test]
    fn test_group_key() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 6).unwrap();
        let a = DailySalesRecord::new(date, "A".to_string(), Platform::Amazon, "acc".to_string(), Decimal::ONE);
        let b = DailySalesRecord::new(date, "A".to_string(), Platform::Amazon, "acc".to_string(), Decimal::from(2));
        assert_eq!(a.group_key(), b.group_key());
    }
}
