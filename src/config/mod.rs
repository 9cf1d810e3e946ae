// ==========================================
// Shopify 商品导入引擎 - 配置层
// ==========================================
// 红线: 远程目录连接配置为显式注入值，不使用模块级环境状态
// ==========================================

pub mod import_settings;
pub mod shopify_config;

pub use import_settings::ImportSettings;
pub use shopify_config::{ConfigError, ShopifyConfig};
