//! SKU 展開與每日彙總

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use replen_core::{DailySalesRecord, Platform};
use replen_sku::{SkuMapper, SkuResolution};
use rust_decimal::Decimal;

use crate::LineItem;

/// 解析單筆明細的 MSKU（SKU 無對應時以 ASIN 反查）
fn resolve_line(item: &LineItem, mapper: &SkuMapper) -> SkuResolution {
    let resolution = mapper.resolve(&item.platform_sku);
    if resolution.is_mapped() {
        return resolution;
    }

    let Some(asin) = item.asin.as_deref() else {
        return resolution;
    };

    mapper
        .find_by_asin(asin)
        .into_iter()
        .map(|record| record.msku.trim())
        .find(|msku| !msku.is_empty())
        .map(|msku| {
            tracing::debug!("SKU {} 以 ASIN {} 對應到 {}", item.platform_sku, asin, msku);
            SkuResolution::Single(msku.to_string())
        })
        .unwrap_or(SkuResolution::Unmapped)
}

/// 將明細透過 SKU 對應展開為 MSKU 層級的銷售紀錄
///
/// 組合商品的每個組件都繼承整列數量與金額（不按比例拆分）。
pub fn expand_line_items(
    items: &[LineItem],
    mapper: &SkuMapper,
    platform: Platform,
    account_name: &str,
) -> (Vec<DailySalesRecord>, BTreeSet<String>) {
    let mut records = Vec::with_capacity(items.len());
    let mut unmapped = BTreeSet::new();

    for item in items {
        let mskus = resolve_line(item, mapper).into_mskus();

        if mskus.is_empty() {
            let sku = item.platform_sku.trim();
            if !sku.is_empty() {
                unmapped.insert(sku.to_string());
            }
            continue;
        }

        for msku in mskus {
            records.push(DailySalesRecord {
                sale_date: item.sale_date,
                msku,
                platform,
                account_name: account_name.to_string(),
                quantity_sold: item.quantity,
                net_revenue: item.net_revenue,
                gross_revenue: item.gross_revenue,
                discount_amount: item.discount_amount,
                platform_fees: item.platform_fees,
                platform_sku: item.platform_sku.trim().to_string(),
                order_id: item.order_id.clone().unwrap_or_default(),
            });
        }
    }

    (records, unmapped)
}

/// 彙總中的累加器
struct Accumulator {
    record: DailySalesRecord,
    platform_skus: Vec<String>,
    order_ids: Vec<String>,
}

impl Accumulator {
    fn new(record: DailySalesRecord) -> Self {
        let mut acc = Self {
            platform_skus: Vec::new(),
            order_ids: Vec::new(),
            record,
        };
        acc.collect_refs_from_record();
        acc
    }

    fn collect_refs_from_record(&mut self) {
        let skus = split_refs(&self.record.platform_sku);
        let orders = split_refs(&self.record.order_id);
        push_distinct(&mut self.platform_skus, skus);
        push_distinct(&mut self.order_ids, orders);
    }

    fn add(&mut self, other: DailySalesRecord) {
        let msku = self.record.msku.as_str();
        add_saturating(&mut self.record.quantity_sold, other.quantity_sold, msku, "quantity_sold");
        add_saturating(&mut self.record.net_revenue, other.net_revenue, msku, "net_revenue");
        add_saturating(&mut self.record.gross_revenue, other.gross_revenue, msku, "gross_revenue");
        add_saturating(
            &mut self.record.discount_amount,
            other.discount_amount,
            msku,
            "discount_amount",
        );
        add_saturating(&mut self.record.platform_fees, other.platform_fees, msku, "platform_fees");
        push_distinct(&mut self.platform_skus, split_refs(&other.platform_sku));
        push_distinct(&mut self.order_ids, split_refs(&other.order_id));
    }

    fn finish(mut self) -> DailySalesRecord {
        self.record.platform_sku = self.platform_skus.join(", ");
        self.record.order_id = self.order_ids.join(", ");
        self.record
    }
}

/// 加總溢位時停在上下限
fn add_saturating(total: &mut Decimal, value: Decimal, msku: &str, field: &str) {
    *total = match total.checked_add(value) {
        Some(sum) => sum,
        None => {
            tracing::warn!("{} 的 {} 加總溢位，以上限計算", msku, field);
            total.saturating_add(value)
        }
    };
}

fn split_refs(joined: &str) -> Vec<String> {
    joined
        .split(", ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn push_distinct(target: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}

/// 彙總為每個 (日期, MSKU, 平台, 帳號) 一筆
///
/// 輸出依彙總鍵排序。
pub fn aggregate_records(records: Vec<DailySalesRecord>) -> Vec<DailySalesRecord> {
    let mut grouped: BTreeMap<(NaiveDate, String, Platform, String), Accumulator> =
        BTreeMap::new();

    for record in records {
        let key = record.group_key();
        match grouped.get_mut(&key) {
            Some(acc) => acc.add(record),
            None => {
                grouped.insert(key, Accumulator::new(record));
            }
        }
    }

    grouped.into_values().map(Accumulator::finish).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use replen_sku::{ComboRow, MappingSnapshot, SkuMappingRecord};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    fn mapper() -> SkuMapper {
        SkuMapper::from_snapshot(&MappingSnapshot::new(
            vec![
                SkuMappingRecord::new("wid-1".to_string(), "WIDGET-1".to_string())
                    .with_asin("B0WIDGET01".to_string()),
                SkuMappingRecord::new("wid-1-alt".to_string(), "WIDGET-1".to_string()),
            ],
            vec![ComboRow::new("trio".to_string())
                .with_column("SKU1", "A")
                .with_column("SKU2", "B")
                .with_column("SKU3", "C")],
        ))
    }

    #[test]
    fn test_combo_expansion_keeps_full_quantity() {
        let mut item = LineItem::new(date(1), "TRIO".to_string(), Decimal::from(4));
        item.net_revenue = Decimal::from(1000);

        let (records, unmapped) =
            expand_line_items(&[item], &mapper(), Platform::Flipkart, "Main");

        assert!(unmapped.is_empty());
        assert_eq!(records.len(), 3);
        for (record, msku) in records.iter().zip(["A", "B", "C"]) {
            assert_eq!(record.msku, msku);
            assert_eq!(record.quantity_sold, Decimal::from(4));
            assert_eq!(record.net_revenue, Decimal::from(1000));
        }
    }

    #[test]
    fn test_unmapped_collected_once() {
        let items = vec![
            LineItem::new(date(1), "GHOST".to_string(), Decimal::ONE),
            LineItem::new(date(2), "GHOST".to_string(), Decimal::ONE),
            LineItem::new(date(2), "  ".to_string(), Decimal::ONE),
        ];

        let (records, unmapped) = expand_line_items(&items, &mapper(), Platform::Meesho, "M");

        assert!(records.is_empty());
        assert_eq!(unmapped.len(), 1);
        assert!(unmapped.contains("GHOST"));
    }

    #[test]
    fn test_asin_fallback() {
        let mut item = LineItem::new(date(1), "amz-unknown".to_string(), Decimal::ONE);
        item.asin = Some("B0WIDGET01".to_string());

        let (records, unmapped) = expand_line_items(&[item], &mapper(), Platform::Amazon, "IN");

        assert!(unmapped.is_empty());
        assert_eq!(records[0].msku, "WIDGET-1");
    }

    #[test]
    fn test_aggregate_sums_per_key() {
        let items = vec![
            {
                let mut i = LineItem::new(date(1), "wid-1".to_string(), Decimal::from(2));
                i.net_revenue = Decimal::from(200);
                i.order_id = Some("OD-1".to_string());
                i
            },
            {
                let mut i = LineItem::new(date(1), "wid-1-alt".to_string(), Decimal::from(3));
                i.net_revenue = Decimal::from(300);
                i.order_id = Some("OD-2".to_string());
                i
            },
            LineItem::new(date(2), "wid-1".to_string(), Decimal::from(1)),
        ];

        let (records, _) = expand_line_items(&items, &mapper(), Platform::Flipkart, "Main");
        let aggregated = aggregate_records(records);

        assert_eq!(aggregated.len(), 2);
        assert_eq!(aggregated[0].sale_date, date(1));
        assert_eq!(aggregated[0].quantity_sold, Decimal::from(5));
        assert_eq!(aggregated[0].net_revenue, Decimal::from(500));
        assert_eq!(aggregated[0].platform_sku, "wid-1, wid-1-alt");
        assert_eq!(aggregated[0].order_id, "OD-1, OD-2");
        assert_eq!(aggregated[1].quantity_sold, Decimal::ONE);
    }

    #[test]
    fn test_aggregate_separates_accounts() {
        let a = DailySalesRecord::new(date(1), "A".to_string(), Platform::Amazon, "IN-1".to_string(), Decimal::ONE);
        let b = DailySalesRecord::new(date(1), "A".to_string(), Platform::Amazon, "IN-2".to_string(), Decimal::ONE);

        assert_eq!(aggregate_records(vec![a, b]).len(), 2);
    }

    #[test]
    fn test_aggregate_saturates_on_overflow() {
        let a = DailySalesRecord::new(date(1), "A".to_string(), Platform::Meesho, "M".to_string(), Decimal::MAX);
        let b = DailySalesRecord::new(date(1), "A".to_string(), Platform::Meesho, "M".to_string(), Decimal::MAX);

        let aggregated = aggregate_records(vec![a, b]);

        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].quantity_sold, Decimal::MAX);
    }
}
