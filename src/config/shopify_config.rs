// ==========================================
// Shopify 商品导入引擎 - 远程目录连接配置
// ==========================================
// 职责: 店铺地址 / 访问令牌 / API 版本
// 用途: 构造目录客户端时显式注入
// ==========================================

use thiserror::Error;

/// 缺省 Admin API 版本
const DEFAULT_API_VERSION: &str = "2024-01";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    MissingVar(&'static str),
}

// ==========================================
// ShopifyConfig - 远程目录连接配置
// ==========================================
#[derive(Debug, Clone)]
pub struct ShopifyConfig {
    pub store_url: String,    // 店铺域名（如 example.myshopify.com）
    pub access_token: String, // Admin API 访问令牌
    pub api_version: String,  // API 版本
}

impl ShopifyConfig {
    pub fn new(
        store_url: impl Into<String>,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            store_url: store_url.into(),
            access_token: access_token.into(),
            api_version: api_version.into(),
        }
    }

    /// 从环境变量构造
    ///
    /// # 环境变量
    /// - SHOPIFY_STORE_URL: 店铺域名（必填）
    /// - SHOPIFY_ACCESS_TOKEN: 访问令牌（必填）
    /// - SHOPIFY_API_VERSION: API 版本（缺省 2024-01）
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_url = std::env::var("SHOPIFY_STORE_URL")
            .map_err(|_| ConfigError::MissingVar("SHOPIFY_STORE_URL"))?;
        let access_token = std::env::var("SHOPIFY_ACCESS_TOKEN")
            .map_err(|_| ConfigError::MissingVar("SHOPIFY_ACCESS_TOKEN"))?;
        let api_version = std::env::var("SHOPIFY_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        Ok(Self::new(store_url, access_token, api_version))
    }

    /// Admin REST 基础地址
    pub fn base_url(&self) -> String {
        format!("https://{}/admin/api/{}", self.store_url, self.api_version)
    }
}
