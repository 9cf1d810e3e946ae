// ==========================================
// Shopify 商品导入引擎 - 目录身份匹配器实现
// ==========================================
// 职责: 判定传入商品在远程目录中是否已存在
// 策略: 严格优先级，首个命中即返回 - (1) ID 查找 (2) handle 查找
// 红线: title 不参与远程匹配（仅凭标题无法确定远程身份）
// ==========================================

use crate::catalog::{CatalogError, CatalogStore};
use crate::domain::{GroupedProduct, RemoteProduct};
use crate::importer::product_importer_trait::CatalogMatcher as CatalogMatcherTrait;
use async_trait::async_trait;
use tracing::debug;

pub struct CatalogMatcher;

#[async_trait]
impl CatalogMatcherTrait for CatalogMatcher {
    async fn find_existing(
        &self,
        store: &dyn CatalogStore,
        product: &GroupedProduct,
    ) -> Result<Option<RemoteProduct>, CatalogError> {
        // 哨兵值 id 已在标准化阶段归一为缺失，此处只需判存在性
        if let Some(id) = product.product.id {
            if let Some(existing) = store.lookup_by_id(id).await? {
                debug!(product_id = id, "按 ID 命中远程商品");
                return Ok(Some(existing));
            }
        }

        if let Some(handle) = &product.product.handle {
            if let Some(existing) = store.lookup_by_handle(handle).await? {
                debug!(handle = %handle, remote_id = existing.id, "按 handle 命中远程商品");
                return Ok(Some(existing));
            }
        }

        Ok(None)
    }
}
