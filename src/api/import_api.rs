// ==========================================
// 商品导入 API
// ==========================================
// 职责: 封装商品导入相关功能（导入 / 结果查询 / 报表导出）
// ==========================================

use crate::api::error::ApiError;
use crate::catalog::ShopifyClient;
use crate::config::{ImportSettings, ShopifyConfig};
use crate::domain::{ImportIssue, ImportOutcome, StoredImportResult};
use crate::importer::{ProductImporter, ProductImporterImpl};
use crate::report::{FsResultStore, ReportWriter, ResultStore};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// 导入 API 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 新建商品数
    pub products_created: usize,
    /// 更新商品数
    pub products_updated: usize,
    /// 新建变体数
    pub variants_created: usize,
    /// 更新变体数
    pub variants_updated: usize,
    /// 问题明细（行/商品/变体级）
    pub errors: Vec<ImportIssue>,
    /// 结果 ID（用于查询台账 / 导出报表）
    pub result_id: Option<String>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
}

impl From<ImportOutcome> for ImportApiResponse {
    fn from(outcome: ImportOutcome) -> Self {
        Self {
            products_created: outcome.summary.products_created,
            products_updated: outcome.summary.products_updated,
            variants_created: outcome.summary.variants_created,
            variants_updated: outcome.summary.variants_updated,
            errors: outcome.summary.errors,
            result_id: outcome.summary.result_id,
            elapsed_ms: outcome.elapsed_time.as_millis() as i64,
        }
    }
}

/// 导入 API
pub struct ImportApi {
    config: ShopifyConfig,
    settings: ImportSettings,
}

impl ImportApi {
    /// 创建新的 ImportApi 实例（远程连接配置显式注入）
    pub fn new(config: ShopifyConfig, settings: ImportSettings) -> Self {
        Self { config, settings }
    }

    /// 装配导入器
    fn create_importer(
        &self,
    ) -> Result<ProductImporterImpl<ShopifyClient, FsResultStore>, ApiError> {
        let client =
            ShopifyClient::new(&self.config).map_err(|e| ApiError::ConfigError(e.to_string()))?;
        let result_store = FsResultStore::new(self.settings.result_dir.clone());

        Ok(ProductImporterImpl::with_default_components(
            client,
            result_store,
        ))
    }

    fn result_store(&self) -> FsResultStore {
        FsResultStore::new(self.settings.result_dir.clone())
    }

    /// 导入商品表文件
    ///
    /// # 参数
    /// - file_path: 文件路径（.csv/.xlsx/.xls）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 汇总统计 + 结果 ID
    /// - Err(ApiError): 错误信息
    pub async fn import_products(&self, file_path: &str) -> Result<ImportApiResponse, ApiError> {
        let importer = self.create_importer()?;
        let outcome = importer.import_from_file(file_path).await?;

        // 顺带清理超过保留期的历史结果（失败不影响本次导入）
        if let Err(e) = self
            .result_store()
            .delete_stale(self.settings.result_retention_days)
            .await
        {
            warn!(error = %e, "历史结果清理失败");
        }

        Ok(outcome.into())
    }

    /// 批量导入多个商品表文件
    pub async fn batch_import_products(
        &self,
        file_paths: Vec<String>,
    ) -> Result<Vec<Result<ImportApiResponse, String>>, ApiError> {
        let importer = self.create_importer()?;
        let results = importer.batch_import(file_paths).await?;

        Ok(results
            .into_iter()
            .map(|r| r.map(ImportApiResponse::from))
            .collect())
    }

    /// 按结果 ID 查询行级台账
    pub async fn get_import_result(
        &self,
        result_id: &str,
    ) -> Result<StoredImportResult, ApiError> {
        Ok(self.result_store().load(result_id).await?)
    }

    /// 导出报表 CSV
    ///
    /// # 参数
    /// - result_id: 结果 ID
    /// - out_path: 输出文件路径
    pub async fn export_report(
        &self,
        result_id: &str,
        out_path: impl AsRef<Path>,
    ) -> Result<(), ApiError> {
        let stored = self.result_store().load(result_id).await?;
        ReportWriter.write_csv_file(&stored, out_path)?;
        Ok(())
    }
}
