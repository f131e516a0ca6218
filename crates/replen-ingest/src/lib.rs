//! # Replen Ingest
//!
//! 各平台銷售報表解析：讀取、驗證欄位、SKU 對應、彙總為每日銷售紀錄

pub mod aggregate;
pub mod platforms;
pub mod reader;

use std::collections::BTreeSet;
use std::io::Read;

use chrono::NaiveDate;
use replen_core::{DailySalesRecord, DateWindow, Platform};
use replen_sku::SkuMapper;
use rust_decimal::Decimal;

// Re-export 主要類型
pub use aggregate::{aggregate_records, expand_line_items};
pub use platforms::{AmazonBusinessReportParser, FlipkartSalesParser, MeeshoOrdersParser};
pub use reader::ReportTable;

/// 報表解析錯誤（整份檔案拒收）
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("缺少必要欄位: {0}")]
    MissingColumn(String),

    #[error("第 {row} 列日期無法解析: {value}")]
    InvalidDate { row: usize, value: String },

    #[error("第 {row} 列欄位 {column} 數值無法解析: {value}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("CSV 讀取錯誤: {0}")]
    Csv(#[from] csv::Error),
}

/// 報表原始明細（SKU 對應前）
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub sale_date: NaiveDate,
    pub platform_sku: String,
    pub asin: Option<String>,
    pub order_id: Option<String>,
    pub quantity: Decimal,
    pub net_revenue: Decimal,
    pub gross_revenue: Decimal,
    pub discount_amount: Decimal,
    pub platform_fees: Decimal,
}

impl LineItem {
    pub fn new(sale_date: NaiveDate, platform_sku: String, quantity: Decimal) -> Self {
        Self {
            sale_date,
            platform_sku,
            asin: None,
            order_id: None,
            quantity,
            net_revenue: Decimal::ZERO,
            gross_revenue: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            platform_fees: Decimal::ZERO,
        }
    }
}

/// 解析結果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    /// 已彙總的每日銷售紀錄
    pub records: Vec<DailySalesRecord>,

    /// 無法對應的平台 SKU
    pub unmapped_skus: BTreeSet<String>,
}

impl ParseOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.unmapped_skus.is_empty()
    }
}

/// 平台報表解析能力
///
/// 各平台只需提供欄位驗證與明細擷取，SKU 對應與彙總共用。
pub trait PlatformParser {
    fn platform(&self) -> Platform;

    fn account_name(&self) -> &str;

    /// 從報表擷取日期視窗內的明細
    fn extract(
        &self,
        table: &ReportTable,
        window: &DateWindow,
    ) -> Result<Vec<LineItem>, IngestError>;

    /// 解析報表
    ///
    /// 結構錯誤時整份拒收，回傳空結果並記錄原因，不會產生部分資料。
    fn parse(&self, input: &mut dyn Read, window: &DateWindow, mapper: &SkuMapper) -> ParseOutcome {
        let result = ReportTable::from_reader(input).and_then(|table| self.extract(&table, window));

        match result {
            Ok(items) => {
                let (records, unmapped_skus) =
                    expand_line_items(&items, mapper, self.platform(), self.account_name());
                let records = aggregate_records(records);

                tracing::info!(
                    "{} ({}) 報表解析完成：明細 {} 筆，彙總 {} 筆，未對應 SKU {} 個",
                    self.platform(),
                    self.account_name(),
                    items.len(),
                    records.len(),
                    unmapped_skus.len()
                );

                ParseOutcome {
                    records,
                    unmapped_skus,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "{} ({}) 報表拒收: {}",
                    self.platform(),
                    self.account_name(),
                    e
                );
                ParseOutcome::empty()
            }
        }
    }
}

/// 合併多份解析結果為單一銷售帳
pub fn merge_outcomes(outcomes: Vec<ParseOutcome>) -> ParseOutcome {
    let mut records = Vec::new();
    let mut unmapped_skus = BTreeSet::new();

    for outcome in outcomes {
        records.extend(outcome.records);
        unmapped_skus.extend(outcome.unmapped_skus);
    }

    ParseOutcome {
        records: aggregate_records(records),
        unmapped_skus,
    }
}
