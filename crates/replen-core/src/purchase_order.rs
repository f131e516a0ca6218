//! 採購單模型

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 採購單狀態
///
/// 序列化使用外部資料的狀態字串（如 "In Transit"）。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PoStatus {
    Draft,
    SentForApproval,
    FinalInvoiceReceived,
    Dispatched,
    InTransit,
    OnHold,
    Received,
    Cancelled,
    /// 無法辨識的狀態（保留原文）
    Other(String),
}

impl PoStatus {
    /// 從外部資料的狀態字串解析
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => PoStatus::Draft,
            "sent for approval" => PoStatus::SentForApproval,
            "final invoice received" => PoStatus::FinalInvoiceReceived,
            "dispatched" => PoStatus::Dispatched,
            "in transit" => PoStatus::InTransit,
            "on hold" => PoStatus::OnHold,
            "received" | "completed" | "closed" => PoStatus::Received,
            "cancelled" | "canceled" => PoStatus::Cancelled,
            _ => PoStatus::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PoStatus::Draft => "Draft",
            PoStatus::SentForApproval => "Sent For Approval",
            PoStatus::FinalInvoiceReceived => "Final Invoice Received",
            PoStatus::Dispatched => "Dispatched",
            PoStatus::InTransit => "In Transit",
            PoStatus::OnHold => "On Hold",
            PoStatus::Received => "Received",
            PoStatus::Cancelled => "Cancelled",
            PoStatus::Other(raw) => raw,
        }
    }

    /// 是否屬於未結（在途）狀態集合
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            PoStatus::Draft
                | PoStatus::SentForApproval
                | PoStatus::FinalInvoiceReceived
                | PoStatus::Dispatched
                | PoStatus::InTransit
                | PoStatus::OnHold
        )
    }
}

impl fmt::Display for PoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PoStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PoStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(PoStatus::parse(&raw))
    }
}

/// 運輸方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShipmentRoute {
    Air,
    Sea,
}

impl ShipmentRoute {
    /// 解析運輸方式，無法辨識時回傳 None
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_ascii_lowercase();
        if lowered.contains("air") {
            Some(ShipmentRoute::Air)
        } else if lowered.contains("sea") || lowered.contains("ocean") {
            Some(ShipmentRoute::Sea)
        } else {
            None
        }
    }
}

/// 採購單明細
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    /// 採購單號
    pub po_number: String,

    /// 主商品代碼
    pub msku: String,

    /// 狀態
    pub status: PoStatus,

    /// 運輸方式（原始字串）
    pub shipment_route: String,

    /// 數量
    pub quantity: Decimal,

    /// 下單日期
    pub order_date: Option<NaiveDate>,

    /// 預計到貨日期
    pub arrive_by: Option<NaiveDate>,

    /// 供應商
    pub vendor_name: Option<String>,
}

impl PurchaseOrderLine {
    /// 創建新的採購單明細
    pub fn new(
        po_number: String,
        msku: String,
        status: PoStatus,
        shipment_route: String,
        quantity: Decimal,
    ) -> Self {
        Self {
            po_number,
            msku,
            status,
            shipment_route,
            quantity,
            order_date: None,
            arrive_by: None,
            vendor_name: None,
        }
    }

    /// 建構器模式：設置下單日期
    pub fn with_order_date(mut self, date: NaiveDate) -> Self {
        self.order_date = Some(date);
        self
    }

    /// 建構器模式：設置預計到貨日期
    pub fn with_arrive_by(mut self, date: NaiveDate) -> Self {
        self.arrive_by = Some(date);
        self
    }

    /// 建構器模式：設置供應商
    pub fn with_vendor(mut self, vendor: String) -> Self {
        self.vendor_name = Some(vendor);
        self
    }

    pub fn route(&self) -> Option<ShipmentRoute> {
        ShipmentRoute::parse(&self.shipment_route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_status_set() {
        for raw in [
            "Draft",
            "Sent For Approval",
            "Final Invoice Received",
            "Dispatched",
            "In Transit",
            "On Hold",
        ] {
            assert!(PoStatus::parse(raw).is_open(), "{} 應為未結狀態", raw);
        }

        assert!(!PoStatus::parse("Received").is_open());
        assert!(!PoStatus::parse("Cancelled").is_open());
        assert_eq!(PoStatus::parse("Lost"), PoStatus::Other("Lost".to_string()));
        assert!(!PoStatus::parse("Lost").is_open());
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!(ShipmentRoute::parse("AIR"), Some(ShipmentRoute::Air));
        assert_eq!(ShipmentRoute::parse("By Sea"), Some(ShipmentRoute::Sea));
        assert_eq!(ShipmentRoute::parse("Ocean Freight"), Some(ShipmentRoute::Sea));
        assert_eq!(ShipmentRoute::parse("Rail"), None);
    }

    #[test]
    fn test_po_line_builder() {
        let line = PurchaseOrderLine::new(
            "PO-1001".to_string(),
            "WIDGET-1".to_string(),
            PoStatus::InTransit,
            "Sea".to_string(),
            Decimal::from(500),
        )
        .with_arrive_by(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap())
        .with_vendor("Acme".to_string());

        assert_eq!(line.route(), Some(ShipmentRoute::Sea));
        assert_eq!(line.vendor_name.as_deref(), Some("Acme"));
        assert!(line.order_date.is_none());
    }

    #[test]
    fn test_status_serde_uses_store_vocabulary() {
        let json = r#"{
            "po_number": "PO-7",
            "msku": "WIDGET-1",
            "status": "In Transit",
            "shipment_route": "Sea",
            "quantity": "40",
            "order_date": "2025-10-02",
            "arrive_by": null,
            "vendor_name": null
        }"#;

        let line: PurchaseOrderLine = serde_json::from_str(json).unwrap();
        assert_eq!(line.status, PoStatus::InTransit);
        assert!(line.status.is_open());

        let status: PoStatus = serde_json::from_str(r#""sent for approval""#).unwrap();
        assert_eq!(status, PoStatus::SentForApproval);
        assert_eq!(
            serde_json::to_string(&PoStatus::SentForApproval).unwrap(),
            r#""Sent For Approval""#
        );
        assert_eq!(
            serde_json::from_str::<PoStatus>(r#""Lost""#).unwrap(),
            PoStatus::Other("Lost".to_string())
        );

        let back: PurchaseOrderLine =
            serde_json::from_str(&serde_json::to_string(&line).unwrap()).unwrap();
        assert_eq!(back, line);
    }
}
