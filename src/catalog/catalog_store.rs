// ==========================================
// Shopify 商品导入引擎 - 目录存储 Trait
// ==========================================
// 职责: 定义远程目录访问接口（不包含实现）
// 红线: 查找未命中是合法空结果（Ok(None)），不是错误
// ==========================================

use crate::domain::{ProductPayload, RemoteProduct, RemoteVariant, VariantPayload};
use async_trait::async_trait;
use thiserror::Error;

/// 目录访问错误类型（传输/接口层，对导入运行是致命的）
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {endpoint}: {body}")]
    UnexpectedStatus {
        status: u16,
        endpoint: String,
        body: String,
    },

    #[error("Failed to decode catalog response: {0}")]
    Decode(String),

    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),
}

// ==========================================
// CatalogStore Trait
// ==========================================
// 用途: 远程目录数据访问
// 实现者: ShopifyClient（Admin REST）、测试用内存实现
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// 按商品 ID 查找
    ///
    /// # 返回
    /// - Ok(Some): 命中
    /// - Ok(None): 不存在（404 视为空结果）
    async fn lookup_by_id(&self, id: i64) -> Result<Option<RemoteProduct>, CatalogError>;

    /// 按 handle 查找
    async fn lookup_by_handle(&self, handle: &str)
        -> Result<Option<RemoteProduct>, CatalogError>;

    /// 列出商品的全部变体
    async fn list_variants(&self, product_id: i64) -> Result<Vec<RemoteVariant>, CatalogError>;

    /// 创建商品
    async fn create_product(&self, payload: &ProductPayload)
        -> Result<RemoteProduct, CatalogError>;

    /// 更新商品（部分载荷）
    async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<RemoteProduct, CatalogError>;

    /// 创建变体
    async fn create_variant(
        &self,
        product_id: i64,
        payload: &VariantPayload,
    ) -> Result<RemoteVariant, CatalogError>;

    /// 更新变体（部分载荷）
    async fn update_variant(
        &self,
        variant_id: i64,
        payload: &VariantPayload,
    ) -> Result<RemoteVariant, CatalogError>;
}

// Arc 透传实现（共享同一目录存储实例的场景）
#[async_trait]
impl<T: CatalogStore + ?Sized> CatalogStore for std::sync::Arc<T> {
    async fn lookup_by_id(&self, id: i64) -> Result<Option<RemoteProduct>, CatalogError> {
        (**self).lookup_by_id(id).await
    }

    async fn lookup_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<RemoteProduct>, CatalogError> {
        (**self).lookup_by_handle(handle).await
    }

    async fn list_variants(&self, product_id: i64) -> Result<Vec<RemoteVariant>, CatalogError> {
        (**self).list_variants(product_id).await
    }

    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<RemoteProduct, CatalogError> {
        (**self).create_product(payload).await
    }

    async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<RemoteProduct, CatalogError> {
        (**self).update_product(id, payload).await
    }

    async fn create_variant(
        &self,
        product_id: i64,
        payload: &VariantPayload,
    ) -> Result<RemoteVariant, CatalogError> {
        (**self).create_variant(product_id, payload).await
    }

    async fn update_variant(
        &self,
        variant_id: i64,
        payload: &VariantPayload,
    ) -> Result<RemoteVariant, CatalogError> {
        (**self).update_variant(variant_id, payload).await
    }
}
