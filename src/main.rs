// ==========================================
// Shopify 商品导入引擎 - CLI 入口
// ==========================================
// 用法:
//   shopify-import <feed-file> [report-out.csv]
//
// 环境变量:
//   SHOPIFY_STORE_URL / SHOPIFY_ACCESS_TOKEN / SHOPIFY_API_VERSION
// ==========================================

use shopify_import_engine::{logging, ImportApi, ImportSettings, ShopifyConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", shopify_import_engine::APP_NAME);
    tracing::info!("系统版本: {}", shopify_import_engine::VERSION);
    tracing::info!("==================================================");

    let mut args = std::env::args().skip(1);
    let file_path = args
        .next()
        .ok_or("usage: shopify-import <feed-file> [report-out.csv]")?;
    let report_path = args.next();

    let config = ShopifyConfig::from_env()?;
    let api = ImportApi::new(config, ImportSettings::default_settings());

    let response = api.import_products(&file_path).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);

    if let (Some(report_path), Some(result_id)) = (report_path, response.result_id.as_deref()) {
        api.export_report(result_id, &report_path).await?;
        tracing::info!(report = %report_path, "报表已导出");
    }

    Ok(())
}
