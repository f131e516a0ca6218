//! Flipkart 銷售報表（逐筆訂單）

use replen_core::{DateWindow, Platform};

use crate::reader::{self, ReportTable};
use crate::{IngestError, LineItem, PlatformParser};

const COL_DATE: &str = "Order Date";
const COL_SKU: &str = "SKU";
const COL_QTY: &str = "Item Quantity";
const COL_ORDER_ID: &str = "Order ID";
const COL_EVENT: &str = "Event Type";
const COL_NET: &str = "Final Invoice Amount";
const COL_GROSS: &str = "Price Before Discount";
const COL_DISCOUNT: &str = "Total Discount";
const COL_FEES: &str = "Marketplace Fee";

/// Flipkart 銷售報表解析器
#[derive(Debug, Clone)]
pub struct FlipkartSalesParser {
    account_name: String,
}

impl FlipkartSalesParser {
    pub fn new(account_name: String) -> Self {
        Self { account_name }
    }
}

/// Flipkart 報表 SKU 常見包裝：`"""SKU:ABC-1"""`
fn clean_sku(raw: &str) -> String {
    let unquoted = raw.trim().trim_matches('"').trim();
    let stripped = unquoted
        .strip_prefix("SKU:")
        .or_else(|| unquoted.strip_prefix("sku:"))
        .unwrap_or(unquoted);
    stripped.trim().to_string()
}

impl PlatformParser for FlipkartSalesParser {
    fn platform(&self) -> Platform {
        Platform::Flipkart
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
        let event_idx = table.column_index(COL_EVENT);
        let net_idx = table.column_index(COL_NET);
        let gross_idx = table.column_index(COL_GROSS);
        let discount_idx = table.column_index(COL_DISCOUNT);
        let fees_idx = table.column_index(COL_FEES);

        let mut items = Vec::new();
        for (i, record) in table.rows().iter().enumerate() {
            let row = i + 2;

            // 只計入銷售事件（退貨、取消另計）
            if let Some(event) = reader::optional_cell(record, event_idx) {
                if !event.eq_ignore_ascii_case("sale") {
                    continue;
                }
            }

            let sale_date = reader::require_date(record, date_idx, row)?;
            if !window.contains(sale_date) {
                continue;
            }

            let mut item = LineItem::new(
                sale_date,
                clean_sku(reader::cell(record, sku_idx)),
                reader::require_amount(record, qty_idx, COL_QTY, row)?,
            );
            item.order_id = reader::optional_cell(record, order_idx).map(str::to_string);
            item.net_revenue = reader::optional_amount(record, net_idx, COL_NET, row)?;
            item.gross_revenue = reader::optional_amount(record, gross_idx, COL_GROSS, row)?;
            item.discount_amount =
                reader::optional_amount(record, discount_idx, COL_DISCOUNT, row)?;
            item.platform_fees = reader::optional_amount(record, fees_idx, COL_FEES, row)?;

            items.push(item);
        }

        Ok(items)
    }
}
