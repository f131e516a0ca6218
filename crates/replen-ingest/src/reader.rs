//! 表格報表讀取

use std::io::Read;

use chrono::NaiveDate;
use replen_core::calendar::parse_report_date;
use rust_decimal::Decimal;

use crate::IngestError;

/// 已讀入記憶體的報表
#[derive(Debug, Clone)]
pub struct ReportTable {
    headers: Vec<String>,
    rows: Vec<csv::StringRecord>,
}

impl ReportTable {
    /// 從 CSV 讀取報表（第一列為欄名）
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IngestError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            // 完全空白的列略過
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            rows.push(record);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[csv::StringRecord] {
        &self.rows
    }

    /// 欄位索引（不分大小寫）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name.trim()))
    }

    /// 必要欄位索引，缺少時回傳錯誤
    pub fn require_column(&self, name: &str) -> Result<usize, IngestError> {
        self.column_index(name)
            .ok_or_else(|| IngestError::MissingColumn(name.to_string()))
    }

    /// 檢查多個必要欄位
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>, IngestError> {
        names.iter().map(|name| self.require_column(name)).collect()
    }
}

/// 取得儲存格（欄位不存在時為空字串）
pub fn cell(record: &csv::StringRecord, index: usize) -> &str {
    record.get(index).map(str::trim).unwrap_or("")
}

/// 取得選填欄位儲存格
pub fn optional_cell(record: &csv::StringRecord, index: Option<usize>) -> Option<&str> {
    index
        .map(|i| cell(record, i))
        .filter(|value| !value.is_empty())
}

/// 可容忍的貨幣前綴
const CURRENCY_PREFIXES: [&str; 5] = ["₹", "Rs.", "Rs", "INR", "$"];

fn strip_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, text),
    }
}

fn strip_currency(text: &str) -> &str {
    CURRENCY_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .map(str::trim_start)
        .unwrap_or(text)
}

/// 整數部分：純數字，或以千分位（含印度式 1,23,456）分組
fn is_grouped_integer(int_part: &str) -> bool {
    let groups: Vec<&str> = int_part.split(',').collect();
    if !groups
        .iter()
        .all(|g| !g.is_empty() && g.chars().all(|c| c.is_ascii_digit()))
    {
        return false;
    }
    match groups.as_slice() {
        [_] => true,
        [first, middle @ .., last] => {
            first.len() <= 3 && last.len() == 3 && middle.iter().all(|g| (2..=3).contains(&g.len()))
        }
        [] => false,
    }
}

/// 解析金額/數量（容忍貨幣前綴與千分位；空白為 0）
///
/// 其他字元（科學記號、括號負數、錯誤分組）一律視為無法解析。
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let (mut negative, body) = strip_sign(raw.trim());
    let mut body = strip_currency(body);
    if !negative {
        (negative, body) = strip_sign(body);
    }

    if body.is_empty() {
        return (!negative).then_some(Decimal::ZERO);
    }

    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (body, None),
    };
    let int_ok = if int_part.is_empty() {
        frac_part.is_some()
    } else {
        is_grouped_integer(int_part)
    };
    let frac_ok = frac_part
        .map(|f| !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(true);
    if !int_ok || !frac_ok {
        return None;
    }

    let mut digits = String::with_capacity(body.len() + 1);
    if negative {
        digits.push('-');
    }
    if int_part.is_empty() {
        digits.push('0');
    }
    digits.extend(body.chars().filter(|c| *c != ','));
    digits.parse::<Decimal>().ok()
}

/// 單價 × 數量，溢位時回傳結構錯誤
pub fn line_total(
    unit_price: Decimal,
    quantity: Decimal,
    column: &str,
    row: usize,
) -> Result<Decimal, IngestError> {
    unit_price
        .checked_mul(quantity)
        .ok_or_else(|| IngestError::InvalidNumber {
            row,
            column: column.to_string(),
            value: format!("{} × {}", unit_price, quantity),
        })
}

/// 解析數值欄位，失敗時回傳結構錯誤
pub fn require_amount(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<Decimal, IngestError> {
    let raw = cell(record, index);
    parse_amount(raw).ok_or_else(|| IngestError::InvalidNumber {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// 解析選填數值欄位（缺少時為 0）
pub fn optional_amount(
    record: &csv::StringRecord,
    index: Option<usize>,
    column: &str,
    row: usize,
) -> Result<Decimal, IngestError> {
    match index {
        Some(i) => require_amount(record, i, column, row),
        None => Ok(Decimal::ZERO),
    }
}

/// 解析日期欄位，失敗時回傳結構錯誤
pub fn require_date(
    record: &csv::StringRecord,
    index: usize,
    row: usize,
) -> Result<NaiveDate, IngestError> {
    let raw = cell(record, index);
    parse_report_date(raw).ok_or_else(|| IngestError::InvalidDate {
        row,
        value: raw.to_string(),
    })
}
