//! SKU 正規化
//!
//! 建表與查詢必須使用同一個函式，否則查詢會靜默失敗。

use unicode_normalization::UnicodeNormalization;

/// 將平台 SKU 正規化為查詢鍵
///
/// NFKD 分解後丟棄非 ASCII 字元，轉小寫並去除前後空白。
/// 結果為空時回傳 `None`（代表「無對應」，不是錯誤）。
pub fn normalize_sku(raw: &str) -> Option<String> {
    let ascii: String = raw.nfkd().filter(char::is_ascii).collect();
    let key = ascii.to_ascii_lowercase();
    let key = key.trim();

    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// 可空輸入版本
pub fn normalize_opt(raw: Option<&str>) -> Option<String> {
    raw.and_then(normalize_sku)
}
