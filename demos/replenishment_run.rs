//! 補貨計算示範
//!
//! 執行：`RUST_LOG=debug cargo run --example replenishment_run [params.json]`

use anyhow::Context;
use chrono::NaiveDate;
use replen::calc::{PackagingPlanner, SalesStatsCalculator};
use replen::ingest::{merge_outcomes, FlipkartSalesParser, MeeshoOrdersParser, PlatformParser};
use replen::model::{
    DateWindow, PackagingItem, PackagingParams, PackagingUsage, PoStatus, ProductRecord,
    ProductType, PurchaseOrderLine,
};
use replen::sku::{ComboRow, MappingSnapshot, MemorySnapshotCache, SkuMapper, SkuMappingRecord};
use replen::{ReplenParams, ReplenishmentSession, SalesStatsConfig};
use rust_decimal::Decimal;

const FLIPKART_REPORT: &str = "\
Order ID,Order Date,SKU,Item Quantity,Event Type,Final Invoice Amount
OD101,2025-10-04,SKU:WID-1,4,Sale,1000
OD102,2025-10-11,SKU:WID-1,7,Sale,1750
OD103,2025-10-18,GIFT-SET,2,Sale,900
OD104,2025-10-25,SKU:WID-1,5,Sale,1250
OD105,2025-10-26,SKU:UNKNOWN-9,1,Sale,100
";

const MEESHO_REPORT: &str = "\
Sub Order No,Order Date,SKU,Quantity,Reason for Credit Entry,Supplier Discounted Price (Incl GST and Commision)
S201,2025-10-06,mug-blue,3,DELIVERED,149
S202,2025-10-21,MUG-BLUE,2,DELIVERED,149
S203,2025-10-29,MUG-BLUE,6,RTO_COMPLETE,149
";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let params = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("無法讀取參數檔 {}", path))?;
            ReplenParams::from_json_str(&raw).context("參數檔格式錯誤")?
        }
        None => ReplenParams::default(),
    };

    let window = DateWindow::new(date(2025, 10, 1)?, date(2025, 10, 31)?);
    let as_of = date(2025, 11, 1)?;

    // SKU 對應表
    let snapshot = MappingSnapshot::new(
        vec![
            SkuMappingRecord::new("WID-1".to_string(), "WIDGET-1".to_string()),
            SkuMappingRecord::new("MUG-BLUE".to_string(), "MUG-1".to_string()),
        ],
        vec![ComboRow::new("GIFT-SET".to_string())
            .with_column("SKU1", "WIDGET-1")
            .with_column("SKU2", "MUG-1")],
    );
    let mapper = SkuMapper::load(&snapshot, &MemorySnapshotCache::new());

    // 報表解析
    let ledger = merge_outcomes(vec![
        FlipkartSalesParser::new("FK Main".to_string()).parse(
            &mut FLIPKART_REPORT.as_bytes(),
            &window,
            &mapper,
        ),
        MeeshoOrdersParser::new("Meesho 1".to_string()).parse(
            &mut MEESHO_REPORT.as_bytes(),
            &window,
            &mapper,
        ),
    ]);
    if !ledger.unmapped_skus.is_empty() {
        println!("未對應 SKU: {:?}", ledger.unmapped_skus);
    }

    let products = vec![
        ProductRecord::new("WIDGET-1".to_string(), Decimal::from(12), ProductType::Focused)
            .with_vendor_lead_time(10.0),
        ProductRecord::new("MUG-1".to_string(), Decimal::from(40), ProductType::NonFocused)
            .with_vendor_lead_time(5.0),
    ];
    let purchase_orders = vec![PurchaseOrderLine::new(
        "PO-2025-031".to_string(),
        "WIDGET-1".to_string(),
        PoStatus::InTransit,
        "Sea".to_string(),
        Decimal::from(30),
    )
    .with_order_date(date(2025, 10, 2)?)
    .with_arrive_by(date(2025, 11, 28)?)
    .with_vendor("Ningbo Homeware".to_string())];

    let session = ReplenishmentSession::new(params, SalesStatsConfig::default())?;
    let result = session.run(&products, &ledger.records, &purchase_orders, as_of)?;

    println!(
        "{:<10} {:<12} {:>8} {:>8} {:>6} {:>6}  {:<20} {}",
        "MSKU", "TYPE", "DOS", "EFF", "SEA", "AIR", "STATUS", "REASON"
    );
    for rec in &result.recommendations {
        println!(
            "{:<10} {:<12} {:>8.1} {:>8.1} {:>6} {:>6}  {:<20} {}",
            rec.msku,
            rec.product_type,
            rec.current_days_coverage,
            rec.effective_days_coverage,
            rec.sea_order_quantity,
            rec.air_order_quantity,
            rec.replen_status,
            rec.order_reason()
        );
    }

    let summary = result.summary();
    println!(
        "\n共 {} 項，需下單 {} 項，空運 {} 件，海運 {} 件",
        summary.total_rows,
        summary.rows_needing_order,
        summary.total_air_units,
        summary.total_sea_units
    );
    for warning in &result.warnings {
        println!("{}", warning);
    }

    // 包材
    let stats = SalesStatsCalculator::compute(&ledger.records, &SalesStatsConfig::default());
    let bill = vec![
        PackagingUsage::new("WIDGET-1".to_string(), "BOX-M".to_string(), Decimal::ONE),
        PackagingUsage::new("MUG-1".to_string(), "BOX-S".to_string(), Decimal::ONE),
    ];
    let planner = PackagingPlanner::new(PackagingParams::default());
    let packaging = planner.plan(
        &[
            PackagingItem::new("BOX-M".to_string(), Decimal::from(5)),
            PackagingItem::new("BOX-S".to_string(), Decimal::from(200)),
        ],
        &PackagingPlanner::daily_usage(&stats, &bill),
    );
    println!();
    for rec in &packaging {
        println!(
            "{:<6} 庫存 {:>6.0} 日用量 {:>5.2} 建議 {:>5} {}",
            rec.material, rec.current_stock, rec.daily_usage, rec.suggested_order_qty, rec.status
        );
    }

    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> anyhow::Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("無效日期 {}-{}-{}", year, month, day))
}
