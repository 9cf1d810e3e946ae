// ==========================================
// Shopify 商品导入引擎 - 变体对账器实现
// ==========================================
// 职责: 对单个远程商品逐变体判定 创建/更新/跳过
// 匹配优先级: 远端同 id 变体 > 远端同 SKU 变体
// 冲突规则: 传入 SKU 已被远端另一身份的变体占用 → 跳过且不发起任何变更调用
// ==========================================

use crate::catalog::{CatalogError, CatalogStore};
use crate::domain::{
    RemoteProduct, RemoteVariant, VariantFragment, VariantIssue, VariantPayload,
    VariantReconcileResult, VariantRef,
};
use crate::importer::product_importer_trait::VariantReconciler as VariantReconcilerTrait;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, warn};

/// 目录侧 SKU 冲突的固定文案（台账与汇总共用）
pub const DUPLICATE_SKU_IN_CATALOG: &str = "Duplicate SKU already exists in Shopify";

pub struct VariantReconciler;

#[async_trait]
impl VariantReconcilerTrait for VariantReconciler {
    async fn reconcile(
        &self,
        store: &dyn CatalogStore,
        product: &RemoteProduct,
        variants: &[VariantFragment],
    ) -> Result<VariantReconcileResult, CatalogError> {
        // 远端变体列表每商品仅拉取一次
        let remote_variants = store.list_variants(product.id).await?;

        // SKU → 远端变体 ID 索引
        let sku_index: HashMap<&str, i64> = remote_variants
            .iter()
            .filter_map(|v| v.sku.as_deref().map(|s| (s, v.id)))
            .collect();

        let mut result = VariantReconcileResult::default();

        for incoming in variants {
            let existing = find_existing(&remote_variants, incoming);
            let variant_ref = VariantRef {
                sku: incoming.sku.clone(),
                row_number: incoming.row_number,
            };

            // 冲突: SKU 已存在于远端索引，但按 id/SKU 解析到的是另一变体（或根本无匹配）
            if let Some(sku) = &incoming.sku {
                if let Some(&owner_id) = sku_index.get(sku.as_str()) {
                    let conflicting = match &existing {
                        None => true,
                        Some(matched) => matched.id != owner_id,
                    };
                    if conflicting {
                        warn!(sku = %sku, owner_id, "SKU 已被远端另一变体占用，跳过该行");
                        result.skipped.push(variant_ref);
                        result.errors.push(VariantIssue {
                            sku: Some(sku.clone()),
                            row_number: incoming.row_number,
                            error: DUPLICATE_SKU_IN_CATALOG.to_string(),
                        });
                        continue;
                    }
                }
            }

            let payload = build_variant_payload(incoming);

            match existing {
                Some(matched) => {
                    store.update_variant(matched.id, &payload).await?;
                    debug!(variant_id = matched.id, sku = ?incoming.sku, "变体已更新");
                    result.updated.push(variant_ref);
                }
                None => {
                    store.create_variant(product.id, &payload).await?;
                    debug!(product_id = product.id, sku = ?incoming.sku, "变体已创建");
                    result.created.push(variant_ref);
                }
            }
        }

        Ok(result)
    }
}

/// 在远端变体中查找匹配（id 优先，其次 SKU）
fn find_existing<'a>(
    remote_variants: &'a [RemoteVariant],
    incoming: &VariantFragment,
) -> Option<&'a RemoteVariant> {
    if let Some(id) = incoming.id {
        if let Some(found) = remote_variants.iter().find(|v| v.id == id) {
            return Some(found);
        }
    }

    if let Some(sku) = &incoming.sku {
        if let Some(found) = remote_variants
            .iter()
            .find(|v| v.sku.as_deref() == Some(sku.as_str()))
        {
            return Some(found);
        }
    }

    None
}

/// 构造变体载荷：仅复制出现的字段；选项值按顺序映射到 option1..3
fn build_variant_payload(incoming: &VariantFragment) -> VariantPayload {
    let mut payload = VariantPayload {
        sku: incoming.sku.clone(),
        price: incoming.price,
        compare_at_price: incoming.compare_at_price,
        weight: incoming.weight,
        inventory_quantity: incoming.inventory_qty,
        ..Default::default()
    };

    let values: Vec<&String> = incoming.options.iter().map(|(_, value)| value).collect();
    if values.is_empty() {
        // 无选项商品使用 Shopify 约定的占位选项
        payload.option1 = Some("Default".to_string());
    } else {
        payload.option1 = Some(values[0].clone());
        if values.len() > 1 {
            payload.option2 = Some(values[1].clone());
        }
        if values.len() > 2 {
            payload.option3 = Some(values[2].clone());
        }
    }

    payload
}
