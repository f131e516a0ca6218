//! Meesho 訂單報表

use replen_core::{DateWindow, Platform};

use crate::reader::{self, ReportTable};
use crate::{IngestError, LineItem, PlatformParser};

const COL_DATE: &str = "Order Date";
const COL_SKU: &str = "SKU";
const COL_QTY: &str = "Quantity";
const COL_ORDER_ID: &str = "Sub Order No";
const COL_STATUS: &str = "Reason for Credit Entry";
const COL_PRICE: &str = "Supplier Discounted Price (Incl GST and Commision)";
const COL_LISTED: &str = "Supplier Listed Price (Incl. GST + Commission)";

/// Meesho 訂單報表解析器
#[derive(Debug, Clone)]
pub struct MeeshoOrdersParser {
    account_name: String,
}

impl MeeshoOrdersParser {
    pub fn new(account_name: String) -> Self {
        Self { account_name }
    }
}

/// 取消與退回（RTO）不計入銷售
fn is_excluded_status(status: &str) -> bool {
    let upper = status.trim().to_ascii_uppercase();
    upper == "CANCELLED" || upper.starts_with("RTO")
}

impl PlatformParser for MeeshoOrdersParser {
    fn platform(&self) -> Platform {
        Platform::Meesho
    }

    fn account_name(&self) -> &str {
        &self.account_name
    }

    fn extract(
        &self,
        table: &ReportTable,
        window: &DateWindow,
    ) -> Result<Vec<LineItem>, IngestError> {
        let date_idx = table.require_column(COL_DATE)?;
        let sku_idx = table.require_column(COL_SKU)?;
        let qty_idx = table.require_column(COL_QTY)?;

        let order_idx = table.column_index(COL_ORDER_ID);
        let status_idx = table.column_index(COL_STATUS);
        let price_idx = table.column_index(COL_PRICE);
        let listed_idx = table.column_index(COL_LISTED);

        let mut items = Vec::new();
        for (i, record) in table.rows().iter().enumerate() {
            let row = i + 2;

            if reader::optional_cell(record, status_idx).is_some_and(is_excluded_status) {
                continue;
            }

            let sale_date = reader::require_date(record, date_idx, row)?;
            if !window.contains(sale_date) {
                continue;
            }

            let quantity = reader::require_amount(record, qty_idx, COL_QTY, row)?;
            // 報表價格為單價
            let unit_price = reader::optional_amount(record, price_idx, COL_PRICE, row)?;
            let listed_price = reader::optional_amount(record, listed_idx, COL_LISTED, row)?;

            let mut item = LineItem::new(
                sale_date,
                reader::cell(record, sku_idx).to_string(),
                quantity,
            );
            item.order_id = reader::optional_cell(record, order_idx).map(str::to_string);
            item.net_revenue = reader::line_total(unit_price, quantity, COL_PRICE, row)?;
            item.gross_revenue = reader::line_total(listed_price, quantity, COL_LISTED, row)?;
            if let (Some(listed_i), Some(_)) = (listed_idx, price_idx) {
                item.discount_amount = item
                    .gross_revenue
                    .checked_sub(item.net_revenue)
                    .ok_or_else(|| IngestError::InvalidNumber {
                        row,
                        column: COL_LISTED.to_string(),
                        value: reader::cell(record, listed_i).to_string(),
                    })?;
            }

            items.push(item);
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use replen_sku::{MappingSnapshot, SkuMapper, SkuMappingRecord};
    use rust_decimal::Decimal;

    #[test]
    fn test_parse_skips_cancelled_and_rto() {
        let csv = "\
Reason for Credit Entry,Sub Order No,Order Date,SKU,Quantity,Supplier Discounted Price (Incl GST and Commision)
DELIVERED,S1,2025-10-03 10:11:12,mug-blue,2,150
CANCELLED,S2,2025-10-03 11:00:00,mug-blue,1,150
RTO_COMPLETE,S3,2025-10-03 12:00:00,mug-blue,1,150
SHIPPED,S4,2025-10-04 09:00:00,mug-blue,1,150
";
        let mapper = SkuMapper::from_snapshot(&MappingSnapshot::new(
            vec![SkuMappingRecord::new("MUG-BLUE".to_string(), "MUG-1".to_string())],
            vec![],
        ));
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 31).unwrap(),
        );

        let parser = MeeshoOrdersParser::new("Meesho 1".to_string());
        let outcome = parser.parse(&mut csv.as_bytes(), &window, &mapper);

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0].quantity_sold, Decimal::from(2));
        assert_eq!(outcome.records[0].net_revenue, Decimal::from(300));
        assert_eq!(outcome.records[0].order_id, "S1");
        assert_eq!(outcome.records[1].quantity_sold, Decimal::ONE);
    }

    #[test]
    fn test_overflowing_line_rejects_file() {
        let csv = "\
Order Date,SKU,Quantity,Supplier Discounted Price (Incl GST and Commision)
2025-10-02,mug-blue,1,150
2025-10-03,mug-blue,100000000000000000000,10000000000
";
        let mapper = SkuMapper::from_snapshot(&MappingSnapshot::new(
            vec![SkuMappingRecord::new("MUG-BLUE".to_string(), "MUG-1".to_string())],
            vec![],
        ));
        let window = DateWindow::new(
            NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 31).unwrap(),
        );

        let parser = MeeshoOrdersParser::new("Meesho 1".to_string());
        let outcome = parser.parse(&mut csv.as_bytes(), &window, &mapper);

        assert!(outcome.records.is_empty());
        assert!(outcome.unmapped_skus.is_empty());
    }
}
