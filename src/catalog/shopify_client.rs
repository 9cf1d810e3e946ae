// ==========================================
// Shopify 商品导入引擎 - Shopify Admin REST 客户端
// ==========================================
// 职责: CatalogStore 的线上实现
// 约定: 404 视为查找空结果；其余非 2xx 状态报 UnexpectedStatus
// ==========================================

use crate::catalog::catalog_store::{CatalogError, CatalogStore};
use crate::config::ShopifyConfig;
use crate::domain::{ProductPayload, RemoteProduct, RemoteVariant, VariantPayload};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// 单次目录调用超时
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ===== 响应信封 =====
#[derive(Deserialize)]
struct ProductEnvelope {
    product: RemoteProduct,
}

#[derive(Deserialize)]
struct ProductsEnvelope {
    #[serde(default)]
    products: Vec<RemoteProduct>,
}

#[derive(Deserialize)]
struct VariantEnvelope {
    variant: RemoteVariant,
}

// ==========================================
// ShopifyClient
// ==========================================
pub struct ShopifyClient {
    client: reqwest::Client,
    base_url: String,
}

impl ShopifyClient {
    /// 构造客户端（连接配置显式注入）
    pub fn new(config: &ShopifyConfig) -> Result<Self, CatalogError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-Shopify-Access-Token",
            HeaderValue::from_str(&config.access_token)
                .map_err(|e| CatalogError::InvalidConfig(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// 非 2xx 状态转为 UnexpectedStatus
    async fn check(endpoint: &str, response: Response) -> Result<Response, CatalogError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
                body,
            })
        }
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
        response
            .json::<T>()
            .await
            .map_err(|e| CatalogError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogStore for ShopifyClient {
    async fn lookup_by_id(&self, id: i64) -> Result<Option<RemoteProduct>, CatalogError> {
        let endpoint = format!("products/{}.json", id);
        debug!(product_id = id, "按 ID 查找远程商品");

        let response = self.client.get(self.url(&endpoint)).send().await?;

        // 404 为合法空结果
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check(&endpoint, response).await?;
        let envelope: ProductEnvelope = Self::decode(response).await?;
        Ok(Some(envelope.product))
    }

    async fn lookup_by_handle(
        &self,
        handle: &str,
    ) -> Result<Option<RemoteProduct>, CatalogError> {
        let endpoint = "products.json";
        debug!(handle = %handle, "按 handle 查找远程商品");

        let response = self
            .client
            .get(self.url(endpoint))
            .query(&[("handle", handle)])
            .send()
            .await?;

        let response = Self::check(endpoint, response).await?;
        let envelope: ProductsEnvelope = Self::decode(response).await?;
        Ok(envelope.products.into_iter().next())
    }

    async fn list_variants(&self, product_id: i64) -> Result<Vec<RemoteVariant>, CatalogError> {
        let endpoint = format!("products/{}.json", product_id);
        debug!(product_id, "列出远程商品变体");

        let response = self.client.get(self.url(&endpoint)).send().await?;
        let response = Self::check(&endpoint, response).await?;
        let envelope: ProductEnvelope = Self::decode(response).await?;
        Ok(envelope.product.variants)
    }

    async fn create_product(
        &self,
        payload: &ProductPayload,
    ) -> Result<RemoteProduct, CatalogError> {
        let endpoint = "products.json";
        debug!("创建远程商品");

        let response = self
            .client
            .post(self.url(endpoint))
            .json(&json!({ "product": payload }))
            .send()
            .await?;

        let response = Self::check(endpoint, response).await?;
        let envelope: ProductEnvelope = Self::decode(response).await?;
        Ok(envelope.product)
    }

    async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<RemoteProduct, CatalogError> {
        let endpoint = format!("products/{}.json", id);
        debug!(product_id = id, "更新远程商品");

        let response = self
            .client
            .put(self.url(&endpoint))
            .json(&json!({ "product": payload }))
            .send()
            .await?;

        let response = Self::check(&endpoint, response).await?;
        let envelope: ProductEnvelope = Self::decode(response).await?;
        Ok(envelope.product)
    }

    async fn create_variant(
        &self,
        product_id: i64,
        payload: &VariantPayload,
    ) -> Result<RemoteVariant, CatalogError> {
        let endpoint = format!("products/{}/variants.json", product_id);
        debug!(product_id, "创建远程变体");

        let response = self
            .client
            .post(self.url(&endpoint))
            .json(&json!({ "variant": payload }))
            .send()
            .await?;

        let response = Self::check(&endpoint, response).await?;
        let envelope: VariantEnvelope = Self::decode(response).await?;
        Ok(envelope.variant)
    }

    async fn update_variant(
        &self,
        variant_id: i64,
        payload: &VariantPayload,
    ) -> Result<RemoteVariant, CatalogError> {
        let endpoint = format!("variants/{}.json", variant_id);
        debug!(variant_id, "更新远程变体");

        let response = self
            .client
            .put(self.url(&endpoint))
            .json(&json!({ "variant": payload }))
            .send()
            .await?;

        let response = Self::check(&endpoint, response).await?;
        let envelope: VariantEnvelope = Self::decode(response).await?;
        Ok(envelope.variant)
    }
}
