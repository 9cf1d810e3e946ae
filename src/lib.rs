// ==========================================
// Shopify 商品导入引擎 - 核心库
// ==========================================
// 技术栈: Rust + Shopify Admin REST
// 系统定位: 商品表批量导入与远程目录对账
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 目录存储层 - 远程目录访问
pub mod catalog;

// 引擎层 - 对账业务规则
pub mod engine;

// 导入层 - 导入管道
pub mod importer;

// 结果报表层 - 台账持久化与报表导出
pub mod report;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    GroupedProduct, ImportIssue, ImportOutcome, ImportSummary, NormalizedRow, ProductFragment,
    RawRow, RemoteProduct, RemoteVariant, RowOutcome, RowStatus, StoredImportResult,
    VariantFragment, VariantReconcileResult,
};

// 目录存储
pub use catalog::{CatalogError, CatalogStore, ShopifyClient};

// 引擎
pub use engine::{CatalogMatcherImpl, FieldMergerImpl, VariantReconcilerImpl};

// 导入层
pub use importer::{ImportError, ProductImporter, ProductImporterImpl, UniversalFileParser};

// 结果报表
pub use report::{FsResultStore, ReportWriter, ResultStore};

// 配置
pub use config::{ImportSettings, ShopifyConfig};

// API
pub use api::{ApiError, ImportApi, ImportApiResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Shopify 商品导入引擎";
