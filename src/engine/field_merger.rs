// ==========================================
// Shopify 商品导入引擎 - 商品字段合并器实现
// ==========================================
// 职责: 计算把远端商品对齐到导入数据所需的最小更新载荷
// 字段集: title / body_html / vendor / product_type / tags
// 红线: 导入侧缺失的字段绝不进入载荷（避免误清空远端数据）
// 不变量: 对同一远端状态重复合并同一导入数据，第二次必为空载荷
// ==========================================

use crate::domain::{ProductFragment, ProductPayload, RemoteProduct};
use crate::importer::product_importer_trait::FieldMerger as FieldMergerTrait;

pub struct FieldMerger;

impl FieldMergerTrait for FieldMerger {
    fn merge_product_fields(
        &self,
        existing: &RemoteProduct,
        incoming: &ProductFragment,
    ) -> ProductPayload {
        let mut payload = ProductPayload::default();

        // 仅纳入导入侧存在且与远端不同的字段
        if let Some(title) = &incoming.title {
            if existing.title.as_deref() != Some(title.as_str()) {
                payload.title = Some(title.clone());
            }
        }
        if let Some(body_html) = &incoming.body_html {
            if existing.body_html.as_deref() != Some(body_html.as_str()) {
                payload.body_html = Some(body_html.clone());
            }
        }
        if let Some(vendor) = &incoming.vendor {
            if existing.vendor.as_deref() != Some(vendor.as_str()) {
                payload.vendor = Some(vendor.clone());
            }
        }
        if let Some(product_type) = &incoming.product_type {
            if existing.product_type.as_deref() != Some(product_type.as_str()) {
                payload.product_type = Some(product_type.clone());
            }
        }
        // 标签以解析后的列表比较（远端为逗号串）
        if !incoming.tags.is_empty() && existing.tag_list() != incoming.tags {
            payload.tags = Some(incoming.tags.join(","));
        }

        payload
    }

    fn build_create_payload(&self, incoming: &ProductFragment) -> ProductPayload {
        let mut payload = ProductPayload::default();

        // title 缺失时回退为 handle
        payload.title = incoming.title.clone().or_else(|| incoming.handle.clone());
        payload.handle = incoming.handle.clone();
        payload.body_html = incoming.body_html.clone();
        payload.vendor = incoming.vendor.clone();
        payload.product_type = incoming.product_type.clone();
        if !incoming.tags.is_empty() {
            payload.tags = Some(incoming.tags.join(","));
        }

        payload
    }
}
