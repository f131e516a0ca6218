//! 在途採購彙總

use std::collections::BTreeMap;

use chrono::NaiveDate;
use replen_core::{PurchaseOrderLine, ShipmentRoute};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 採購單明細摘要（追溯用，不參與計算）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoDetail {
    pub po_number: String,
    pub vendor: Option<String>,
    pub quantity: Decimal,
    pub arrive_by: Option<NaiveDate>,
    /// 原始運輸方式字串
    pub route: String,
}

/// 單一 MSKU 的在途彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenPoAggregate {
    pub msku: String,

    /// 空運在途數量
    pub on_order_qty_air: Decimal,

    /// 海運在途數量
    pub on_order_qty_sea: Decimal,

    /// 最早海運到貨日
    pub sea_order_eta: Option<NaiveDate>,

    pub po_details: Vec<PoDetail>,
}

impl OpenPoAggregate {
    pub fn new(msku: String) -> Self {
        Self {
            msku,
            on_order_qty_air: Decimal::ZERO,
            on_order_qty_sea: Decimal::ZERO,
            sea_order_eta: None,
            po_details: Vec::new(),
        }
    }

    /// 總在途數量
    pub fn total_in_transit(&self) -> Decimal {
        self.on_order_qty_air.saturating_add(self.on_order_qty_sea)
    }

    /// 是否有未到貨的海運單
    pub fn has_open_sea_order(&self) -> bool {
        self.on_order_qty_sea > Decimal::ZERO
    }
}

/// 在途採購彙總器
pub struct OpenPoAggregator;

impl OpenPoAggregator {
    /// 彙總未結採購單（依 MSKU 與運輸方式加總）
    pub fn aggregate(lines: &[PurchaseOrderLine]) -> BTreeMap<String, OpenPoAggregate> {
        let mut aggregates: BTreeMap<String, OpenPoAggregate> = BTreeMap::new();
        let mut skipped = 0usize;

        for line in lines.iter().filter(|l| l.status.is_open()) {
            let msku = line.msku.trim();
            if msku.is_empty() {
                skipped += 1;
                continue;
            }

            let entry = aggregates
                .entry(msku.to_string())
                .or_insert_with(|| OpenPoAggregate::new(msku.to_string()));

            match line.route() {
                Some(ShipmentRoute::Air) => {
                    add_quantity(&mut entry.on_order_qty_air, line);
                }
                Some(ShipmentRoute::Sea) => {
                    add_quantity(&mut entry.on_order_qty_sea, line);
                    if let Some(arrive_by) = line.arrive_by {
                        entry.sea_order_eta = Some(match entry.sea_order_eta {
                            Some(current) => current.min(arrive_by),
                            None => arrive_by,
                        });
                    }
                }
                None => {
                    tracing::warn!(
                        "採購單 {} 的運輸方式 '{}' 無法辨識，數量不計入在途",
                        line.po_number,
                        line.shipment_route
                    );
                }
            }

            entry.po_details.push(PoDetail {
                po_number: line.po_number.clone(),
                vendor: line.vendor_name.clone(),
                quantity: line.quantity,
                arrive_by: line.arrive_by,
                route: line.shipment_route.clone(),
            });
        }

        if skipped > 0 {
            tracing::warn!("{} 筆未結採購單缺少 MSKU，已略過", skipped);
        }
        tracing::debug!("在途彙總：{} 個 MSKU", aggregates.len());

        aggregates
    }

    /// 每個 MSKU 最近一次下單日期（不分狀態）
    pub fn last_order_dates(lines: &[PurchaseOrderLine]) -> BTreeMap<String, NaiveDate> {
        let mut dates: BTreeMap<String, NaiveDate> = BTreeMap::new();
        for line in lines {
            let (msku, Some(order_date)) = (line.msku.trim(), line.order_date) else {
                continue;
            };
            if msku.is_empty() {
                continue;
            }
            dates
                .entry(msku.to_string())
                .and_modify(|d| *d = (*d).max(order_date))
                .or_insert(order_date);
        }
        dates
    }
}

/// 在途數量加總，溢位時停在上限
fn add_quantity(total: &mut Decimal, line: &PurchaseOrderLine) {
    *total = match total.checked_add(line.quantity) {
        Some(sum) => sum,
        None => {
            tracing::warn!("採購單 {} 數量加總溢位，以上限計算", line.po_number);
            total.saturating_add(line.quantity)
        }
    };
}
