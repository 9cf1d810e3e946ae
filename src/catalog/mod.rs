// ==========================================
// Shopify 商品导入引擎 - 目录存储层
// ==========================================
// 职责: 远程目录数据访问（不包含业务规则）
// ==========================================

pub mod catalog_store;
pub mod shopify_client;

pub use catalog_store::{CatalogError, CatalogStore};
pub use shopify_client::ShopifyClient;
