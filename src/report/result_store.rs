// ==========================================
// Shopify 商品导入引擎 - 结果台账存储
// ==========================================
// 职责: 按结果 ID 持久化/读取行级台账（JSON 文档）
// 生命周期: 导入完成后保留至清理周期；远程目录才是唯一业务持久层
// ==========================================

use crate::domain::StoredImportResult;
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

// ==========================================
// ResultStore Trait
// ==========================================
// 用途: 台账数据访问（不包含业务规则）
// 实现者: FsResultStore
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// 持久化一次导入的行级台账
    async fn save(&self, result: &StoredImportResult) -> ImportResult<()>;

    /// 按结果 ID 读取台账
    ///
    /// # 返回
    /// - Err(ResultNotFound): 结果不存在或已被清理
    async fn load(&self, result_id: &str) -> ImportResult<StoredImportResult>;

    /// 清理超过保留期的台账
    ///
    /// # 返回
    /// - Ok(usize): 删除的结果数
    async fn delete_stale(&self, retention_days: i64) -> ImportResult<usize>;
}

// ==========================================
// FsResultStore - 文件系统实现
// ==========================================
// 文件布局: <dir>/import_result_<uuid>.json
pub struct FsResultStore {
    dir: PathBuf,
}

impl FsResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, result_id: &str) -> PathBuf {
        self.dir.join(format!("import_result_{}.json", result_id))
    }
}

#[async_trait]
impl ResultStore for FsResultStore {
    async fn save(&self, result: &StoredImportResult) -> ImportResult<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| ImportError::ResultStoreError(e.to_string()))?;

        let path = self.path_for(&result.result_id);
        let json = serde_json::to_string(result)?;
        std::fs::write(&path, json).map_err(|e| ImportError::ResultStoreError(e.to_string()))?;

        debug!(result_id = %result.result_id, path = %path.display(), "台账已持久化");
        Ok(())
    }

    async fn load(&self, result_id: &str) -> ImportResult<StoredImportResult> {
        // 结果 ID 必须是 UUID，拒绝任何路径穿越形式
        if Uuid::parse_str(result_id).is_err() {
            return Err(ImportError::ResultNotFound(result_id.to_string()));
        }

        let path = self.path_for(result_id);
        if !path.exists() {
            return Err(ImportError::ResultNotFound(result_id.to_string()));
        }

        let json = std::fs::read_to_string(&path)
            .map_err(|e| ImportError::ResultStoreError(e.to_string()))?;
        Ok(serde_json::from_str(&json)?)
    }

    async fn delete_stale(&self, retention_days: i64) -> ImportResult<usize> {
        let cutoff = Utc::now() - Duration::days(retention_days);
        let mut deleted = 0;

        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // 目录尚未创建 → 无可清理
            Err(_) => return Ok(0),
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !is_result_file(&path) {
                continue;
            }

            match std::fs::read_to_string(&path)
                .ok()
                .and_then(|json| serde_json::from_str::<StoredImportResult>(&json).ok())
            {
                Some(stored) if stored.imported_at < cutoff => {
                    if std::fs::remove_file(&path).is_ok() {
                        deleted += 1;
                    }
                }
                Some(_) => {}
                None => {
                    warn!(path = %path.display(), "无法解析的台账文件，跳过清理");
                }
            }
        }

        Ok(deleted)
    }
}

fn is_result_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("import_result_") && n.ends_with(".json"))
        .unwrap_or(false)
}
