// ==========================================
// Shopify 商品导入引擎 - 远程目录实体
// ==========================================
// 用途: Shopify Admin REST 返回结构与变更载荷
// 红线: 载荷仅包含出现的字段，缺失字段不得写入（避免误清空远端数据）
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// RemoteProduct - 远程商品
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteProduct {
    pub id: i64, // 远程商品 ID
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub vendor: Option<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub tags: Option<String>, // 逗号连接的标签串（Shopify 线上格式）
    #[serde(default)]
    pub variants: Vec<RemoteVariant>,
}

impl RemoteProduct {
    /// 解析远端标签串为标签列表（与导入侧 tags 同构，便于比较）
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

// ==========================================
// RemoteVariant - 远程变体
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteVariant {
    pub id: i64, // 远程变体 ID
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub price: Option<String>, // Shopify 以字符串返回金额
    #[serde(default)]
    pub compare_at_price: Option<String>,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub option1: Option<String>,
    #[serde(default)]
    pub option2: Option<String>,
    #[serde(default)]
    pub option3: Option<String>,
}

// ==========================================
// ProductPayload - 商品变更载荷
// ==========================================
// 用途: 创建/更新商品时的部分载荷
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>, // 逗号连接（线上格式）
}

impl ProductPayload {
    /// 空载荷意味着无需更新（抑制更新调用与计数）
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.handle.is_none()
            && self.body_html.is_none()
            && self.vendor.is_none()
            && self.product_type.is_none()
            && self.tags.is_none()
    }
}

// ==========================================
// VariantPayload - 变体变更载荷
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory_quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option3: Option<String>,
}
