//! 外部資料來源介面
//!
//! 實作（REST 資料庫、快取）不屬於本系統，只定義契約。

use crate::{DailySalesRecord, ProductRecord, PurchaseOrderLine, Result};

/// 商品主檔來源
pub trait ProductSource {
    fn fetch(&self) -> Result<Vec<ProductRecord>>;
}

/// 銷售帳來源（已由平台解析器彙總）
pub trait SalesLedgerSource {
    fn fetch(&self) -> Result<Vec<DailySalesRecord>>;
}

/// 採購單來源
pub trait PurchaseOrderSource {
    fn fetch(&self) -> Result<Vec<PurchaseOrderLine>>;
}

impl ProductSource for Vec<ProductRecord> {
    fn fetch(&self) -> Result<Vec<ProductRecord>> {
        Ok(self.clone())
    }
}

impl SalesLedgerSource for Vec<DailySalesRecord> {
    fn fetch(&self) -> Result<Vec<DailySalesRecord>> {
        Ok(self.clone())
    }
}

impl PurchaseOrderSource for Vec<PurchaseOrderLine> {
    fn fetch(&self) -> Result<Vec<PurchaseOrderLine>> {
        Ok(self.clone())
    }
}
