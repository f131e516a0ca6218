//! 各平台報表解析器

pub mod amazon;
pub mod flipkart;
pub mod meesho;

pub use amazon::AmazonBusinessReportParser;
pub use flipkart::FlipkartSalesParser;
pub use meesho::MeeshoOrdersParser;
