// ==========================================
// Shopify 商品导入引擎 - 导入侧设置
// ==========================================
// 职责: 结果台账目录 / 结果保留周期
// ==========================================

use std::path::PathBuf;

/// 结果台账缺省保留天数（超期结果可清理）
const DEFAULT_RESULT_RETENTION_DAYS: i64 = 90;

// ==========================================
// ImportSettings - 导入侧设置
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportSettings {
    pub result_dir: PathBuf,        // 结果台账存放目录
    pub result_retention_days: i64, // 结果保留天数
}

impl ImportSettings {
    pub fn new(result_dir: impl Into<PathBuf>, result_retention_days: i64) -> Self {
        Self {
            result_dir: result_dir.into(),
            result_retention_days,
        }
    }

    /// 缺省设置：结果存放于系统数据目录下的 results 子目录
    pub fn default_settings() -> Self {
        let result_dir = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("shopify-import-engine")
            .join("results");

        Self::new(result_dir, DEFAULT_RESULT_RETENTION_DAYS)
    }
}
