// ==========================================
// Shopify 商品导入引擎 - 商品校验器实现
// ==========================================
// 职责: 必填字段校验，划分合法商品与失败报告
// 规则: 商品级失败整体剔除；变体级失败仅剔除该变体（警告级，商品存活）
// ==========================================

use crate::domain::{
    DroppedVariant, GroupedProduct, ValidationFailure, ValidationReport,
};
use crate::importer::product_importer_trait::ProductValidator as ProductValidatorTrait;

/// 商品级校验失败消息（台账回写用固定文案）
pub const MISSING_IDENTITY_ERROR: &str = "Product must have at least Handle or Title";

pub struct ProductValidator;

impl ProductValidatorTrait for ProductValidator {
    fn validate(&self, products: Vec<GroupedProduct>) -> ValidationReport {
        let mut valid = Vec::new();
        let mut failures = Vec::new();
        let mut dropped_variants = Vec::new();

        for group in products {
            let label = group.product.label();

            // 商品级校验: handle 与 title 至少其一
            if group.product.handle.is_none() && group.product.title.is_none() {
                failures.push(ValidationFailure {
                    product: label,
                    errors: vec![MISSING_IDENTITY_ERROR.to_string()],
                    row_numbers: group.source_rows.clone(),
                });
                continue;
            }

            // 变体级校验: id 与 sku 至少其一，否则剔除该变体（警告级）
            let mut valid_variants = Vec::new();
            for (idx, variant) in group.variants.into_iter().enumerate() {
                if variant.id.is_none() && variant.sku.is_none() {
                    dropped_variants.push(DroppedVariant {
                        product: label.clone(),
                        row_number: variant.row_number,
                        message: format!("Variant at index {} must have Variant ID or SKU", idx),
                    });
                } else {
                    valid_variants.push(variant);
                }
            }

            valid.push(GroupedProduct {
                product: group.product,
                variants: valid_variants,
                source_rows: group.source_rows,
            });
        }

        ValidationReport {
            valid,
            failures,
            dropped_variants,
        }
    }
}
