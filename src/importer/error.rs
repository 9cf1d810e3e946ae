// ==========================================
// Shopify 商品导入引擎 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 传播策略: 行级错误记入台账不上抛；目录传输错误上抛并中止本次运行
// ==========================================

use crate::catalog::CatalogError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file type: {0} (only .csv/.xlsx/.xls are supported)")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    FileReadError(String),

    #[error("Failed to parse Excel file: {0}")]
    ExcelParseError(String),

    #[error("Failed to parse CSV file: {0}")]
    CsvParseError(String),

    // ===== 行标准化错误 =====
    #[error("Type conversion failed (row {row}, field {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    // ===== 结果存储错误 =====
    #[error("Import result not found: {0}")]
    ResultNotFound(String),

    #[error("Failed to persist import result: {0}")]
    ResultStoreError(String),

    #[error("Failed to write report: {0}")]
    ReportWriteError(String),

    // ===== 远程目录错误（致命，终止本次运行）=====
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    // ===== 通用错误 =====
    #[error("Internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<serde_json::Error>（台账序列化）
impl From<serde_json::Error> for ImportError {
    fn from(err: serde_json::Error) -> Self {
        ImportError::ResultStoreError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
