//! Amazon 業務報表（期間彙總）
//!
//! 報表只提供整段期間的總量，沒有逐日資料。期間總量除以期間天數（至少 1 天），
//! 平均分攤到期間與查詢視窗交集的每一天。

use replen_core::{DateWindow, Platform};
use rust_decimal::Decimal;

use crate::reader::{self, ReportTable};
use crate::{IngestError, LineItem, PlatformParser};

const COL_SKU: &str = "SKU";
const COL_ASIN: &str = "(Child) ASIN";
const COL_UNITS: &str = "Units Ordered";
const COL_SALES: &str = "Ordered Product Sales";

/// Amazon 業務報表解析器
#[derive(Debug, Clone)]
pub struct AmazonBusinessReportParser {
    account_name: String,

    /// 報表涵蓋期間（未設定時視為與查詢視窗相同）
    report_period: Option<DateWindow>,
}

impl AmazonBusinessReportParser {
    pub fn new(account_name: String) -> Self {
        Self {
            account_name,
            report_period: None,
        }
    }

    /// 建構器模式：設置報表涵蓋期間
    pub fn with_report_period(mut self, period: DateWindow) -> Self {
        self.report_period = Some(period);
        self
    }
}

impl PlatformParser for AmazonBusinessReportParser {
    fn platform(&self) -> Platform {
        Platform::Amazon
    }

    fn account_name(&self) -> &str {
        &self.account_name
    }

    fn extract(
        &self,
        table: &ReportTable,
        window: &DateWindow,
    ) -> Result<Vec<LineItem>, IngestError> {
        let sku_idx = table.require_column(COL_SKU)?;
        let units_idx = table.require_column(COL_UNITS)?;
        let asin_idx = table.column_index(COL_ASIN);
        let sales_idx = table.column_index(COL_SALES);

        let period = self.report_period.unwrap_or(*window);
        let period_days = Decimal::from(period.num_days().max(1));

        let Some(overlap) = period.intersect(window) else {
            tracing::info!(
                "Amazon 報表期間 {} ~ {} 與查詢視窗無交集",
                period.start,
                period.end
            );
            return Ok(Vec::new());
        };
        let days = overlap.days();

        let mut items = Vec::with_capacity(table.rows().len() * days.len());
        for (i, record) in table.rows().iter().enumerate() {
            let row = i + 2;

            let units = reader::require_amount(record, units_idx, COL_UNITS, row)?;
            let sales = reader::optional_amount(record, sales_idx, COL_SALES, row)?;
            let daily_units = units / period_days;
            let daily_sales = sales / period_days;
            let sku = reader::cell(record, sku_idx).to_string();
            let asin = reader::optional_cell(record, asin_idx).map(str::to_string);

            for &day in &days {
                let mut item = LineItem::new(day, sku.clone(), daily_units);
                item.asin = asin.clone();
                item.net_revenue = daily_sales;
                items.push(item);
            }
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use replen_sku::{MappingSnapshot, SkuMapper, SkuMappingRecord};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
    }

    fn mapper() -> SkuMapper {
        SkuMapper::from_snapshot(&MappingSnapshot::new(
            vec![SkuMappingRecord::new("AMZ-WID".to_string(), "WIDGET-1".to_string())
                .with_asin("B0WID00001".to_string())],
            vec![],
        ))
    }

    const REPORT: &str = "\
(Parent) ASIN,(Child) ASIN,Title,SKU,Units Ordered,Ordered Product Sales
B0PARENT,B0WID00001,Widget,AMZ-WID,100,\"₹10,000.00\"
";

    #[test]
    fn test_equal_daily_distribution_over_overlap() {
        // 報表 10 天（10/1 ~ 10/10），查詢視窗 10/6 ~ 10/20
        let parser = AmazonBusinessReportParser::new("Amazon IN".to_string())
            .with_report_period(DateWindow::new(d(1), d(10)));
        let window = DateWindow::new(d(6), d(20));

        let outcome = parser.parse(&mut REPORT.as_bytes(), &window, &mapper());

        // 交集 10/6 ~ 10/10 共 5 天，每天 100 / 10 = 10
        assert_eq!(outcome.records.len(), 5);
        for record in &outcome.records {
            assert_eq!(record.quantity_sold, Decimal::from(10));
            assert_eq!(record.net_revenue, Decimal::from(1000));
        }
        assert_eq!(outcome.records[0].sale_date, d(6));
        assert_eq!(outcome.records[4].sale_date, d(10));
    }

    #[test]
    fn test_period_defaults_to_window() {
        let parser = AmazonBusinessReportParser::new("Amazon IN".to_string());
        let window = DateWindow::new(d(1), d(4));

        let outcome = parser.parse(&mut REPORT.as_bytes(), &window, &mapper());

        assert_eq!(outcome.records.len(), 4);
        assert_eq!(outcome.records[0].quantity_sold, Decimal::from(25));
    }

    #[test]
    fn test_single_day_period() {
        let parser = AmazonBusinessReportParser::new("Amazon IN".to_string())
            .with_report_period(DateWindow::new(d(3), d(3)));
        let window = DateWindow::new(d(1), d(31));

        let outcome = parser.parse(&mut REPORT.as_bytes(), &window, &mapper());

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].quantity_sold, Decimal::from(100));
    }

    #[test]
    fn test_no_overlap() {
        let parser = AmazonBusinessReportParser::new("Amazon IN".to_string())
            .with_report_period(DateWindow::new(d(1), d(5)));
        let window = DateWindow::new(d(20), d(25));

        let outcome = parser.parse(&mut REPORT.as_bytes(), &window, &mapper());
        assert!(outcome.records.is_empty());
    }

    #[test]
    fn test_asin_fallback_when_sku_unknown() {
        let report = "\
(Child) ASIN,SKU,Units Ordered
B0WID00001,renamed-sku,30
";
        let parser = AmazonBusinessReportParser::new("Amazon IN".to_string());
        let window = DateWindow::new(d(1), d(30));

        let outcome = parser.parse(&mut report.as_bytes(), &window, &mapper());

        assert_eq!(outcome.records.len(), 30);
        assert!(outcome.records.iter().all(|r| r.msku == "WIDGET-1"));
        assert!(outcome.unmapped_skus.is_empty());
    }
}
