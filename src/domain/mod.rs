// ==========================================
// Shopify 商品导入引擎 - 领域层
// ==========================================
// 职责: 导入管道与远程目录的实体定义
// ==========================================

pub mod catalog;
pub mod outcome;
pub mod product;

pub use catalog::{ProductPayload, RemoteProduct, RemoteVariant, VariantPayload};
pub use outcome::{
    DroppedVariant, ImportIssue, ImportOutcome, ImportSummary, RowOutcome, RowStatus,
    StoredImportResult, ValidationFailure, ValidationReport, VariantIssue,
    VariantReconcileResult, VariantRef,
};
pub use product::{GroupedProduct, NormalizedRow, ProductFragment, RawRow, VariantFragment};
