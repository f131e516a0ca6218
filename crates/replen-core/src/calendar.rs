//! 日期區間模型

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// 閉區間日期範圍 `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// 創建新的日期區間（起訖顛倒時自動對調）
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// 以結束日往回推算 `days` 天（含結束日）
    ///
    /// `days` 為 0 時視為 1 天。
    pub fn ending_at(end: NaiveDate, days: u32) -> Self {
        let span = u64::from(days.max(1) - 1);
        let start = end.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// 區間內天數（至少 1）
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// 檢查日期是否在區間內
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 兩區間交集
    pub fn intersect(&self, other: &DateWindow) -> Option<DateWindow> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(DateWindow { start, end })
    }

    /// 逐日列出區間內所有日期
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|d| *d <= self.end)
            .collect()
    }
}

/// 解析常見報表日期格式
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 6] = [
        "%Y-%m-%d",
        "%d-%m-%Y",
        "%d/%m/%Y",
        "%Y/%m/%d",
        "%d-%b-%Y",
        "%b %d, %Y",
    ];

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    // 帶時間的欄位只取日期部分
    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .filter(|p| p.len() >= 8)
        .unwrap_or(trimmed);

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
        .or_else(|| {
            FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_ending_at() {
        let window = DateWindow::ending_at(d(2025, 10, 30), 30);
        assert_eq!(window.start, d(2025, 10, 1));
        assert_eq!(window.num_days(), 30);
        assert_eq!(window.days().len(), 30);
    }

    #[test]
    fn test_ending_at_zero_days() {
        let window = DateWindow::ending_at(d(2025, 10, 30), 0);
        assert_eq!(window.num_days(), 1);
    }

    #[test]
    fn test_intersect() {
        let a = DateWindow::new(d(2025, 10, 1), d(2025, 10, 31));
        let b = DateWindow::new(d(2025, 10, 25), d(2025, 11, 5));

        let overlap = a.intersect(&b).unwrap();
        assert_eq!(overlap.start, d(2025, 10, 25));
        assert_eq!(overlap.end, d(2025, 10, 31));
        assert_eq!(overlap.num_days(), 7);

        let c = DateWindow::new(d(2025, 12, 1), d(2025, 12, 2));
        assert!(a.intersect(&c).is_none());
    }

    #[test]
    fn test_reversed_bounds() {
        let window = DateWindow::new(d(2025, 10, 5), d(2025, 10, 1));
        assert_eq!(window.start, d(2025, 10, 1));
        assert!(window.contains(d(2025, 10, 3)));
    }

    #[rstest]
    #[case("2025-10-06", Some((2025, 10, 6)))]
    #[case("06/10/2025", Some((2025, 10, 6)))]
    #[case("2025-10-06 14:22:01", Some((2025, 10, 6)))]
    #[case("2025-10-06T14:22:01+05:30", Some((2025, 10, 6)))]
    #[case("06-Oct-2025", Some((2025, 10, 6)))]
    #[case("Oct 06, 2025", Some((2025, 10, 6)))]
    #[case("not a date", None)]
    #[case("  ", None)]
    fn test_parse_report_date(#[case] raw: &str, #[case] expected: Option<(i32, u32, u32)>) {
        assert_eq!(parse_report_date(raw), expected.map(|(y, m, day)| d(y, m, day)));
    }
}
