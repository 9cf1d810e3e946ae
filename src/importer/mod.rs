// ==========================================
// Shopify 商品导入引擎 - 导入层
// ==========================================
// 职责: 商品表文件导入，驱动对账管道生成远程变更与结果台账
// 支持: CSV, Excel
// ==========================================

// 模块声明
pub mod error;
pub mod file_parser;
pub mod product_grouper;
pub mod product_importer_impl;
pub mod product_importer_trait;
pub mod row_normalizer;
pub mod validator;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser, DATA_START_ROW};
pub use product_grouper::ProductGrouper as ProductGrouperImpl;
pub use product_importer_impl::ProductImporterImpl;
pub use row_normalizer::RowNormalizer as RowNormalizerImpl;
pub use validator::ProductValidator as ProductValidatorImpl;
pub use validator::MISSING_IDENTITY_ERROR;

// 重导出 Trait 接口
pub use product_importer_trait::{
    CatalogMatcher, FieldMerger, FileParser, ProductGrouper, ProductImporter, ProductValidator,
    RowNormalizer, VariantReconciler,
};
