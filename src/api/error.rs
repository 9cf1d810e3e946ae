// ==========================================
// Shopify 商品导入引擎 - API 层错误类型
// ==========================================
// 职责: 把内部错误转换为调用方友好的错误消息
// ==========================================

use crate::importer::ImportError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Import result not found: {0}")]
    ResultNotFound(String),

    #[error("Report export failed: {0}")]
    ReportFailed(String),
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::ResultNotFound(id) => ApiError::ResultNotFound(id),
            ImportError::ReportWriteError(message) => ApiError::ReportFailed(message),
            other => ApiError::ImportFailed(other.to_string()),
        }
    }
}
