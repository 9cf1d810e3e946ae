// ==========================================
// Shopify 商品导入引擎 - 商品分组器实现
// ==========================================
// 职责: 按分组键折叠变体行，保持首次出现顺序
// 分组键优先级: id > handle > title；三者皆缺时按行号隔离成组
// 红线: 商品级字段取首次出现行的值，后续同键行不得覆盖
// ==========================================

use crate::domain::{GroupedProduct, NormalizedRow, ProductFragment};
use crate::importer::product_importer_trait::ProductGrouper as ProductGrouperTrait;
use std::collections::HashMap;

// ==========================================
// GroupKey - 分组键
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey {
    Id(i64),
    Handle(String),
    Title(String),
    /// 无任何身份字段的行独立成组，绝不与其他无身份行合并
    Isolated(usize),
}

impl GroupKey {
    fn for_product(product: &ProductFragment, row_number: usize) -> Self {
        if let Some(id) = product.id {
            GroupKey::Id(id)
        } else if let Some(handle) = &product.handle {
            GroupKey::Handle(handle.clone())
        } else if let Some(title) = &product.title {
            GroupKey::Title(title.clone())
        } else {
            GroupKey::Isolated(row_number)
        }
    }
}

pub struct ProductGrouper;

impl ProductGrouperTrait for ProductGrouper {
    fn group(&self, rows: Vec<NormalizedRow>) -> Vec<GroupedProduct> {
        let mut groups: Vec<GroupedProduct> = Vec::new();
        let mut index: HashMap<GroupKey, usize> = HashMap::new();

        for row in rows {
            let row_number = row.variant.row_number;
            let key = GroupKey::for_product(&row.product, row_number);

            let group_idx = match index.get(&key) {
                Some(idx) => *idx,
                None => {
                    // 首次出现：以该行的商品级字段作为组身份
                    groups.push(GroupedProduct {
                        product: row.product,
                        variants: Vec::new(),
                        source_rows: Vec::new(),
                    });
                    let idx = groups.len() - 1;
                    index.insert(key, idx);
                    idx
                }
            };

            groups[group_idx].source_rows.push(row_number);

            // 空变体片段（纯商品行）不进入变体列表
            if !row.variant.is_empty() {
                groups[group_idx].variants.push(row.variant);
            }
        }

        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VariantFragment;
    use crate::importer::product_importer_trait::ProductGrouper as _;

    fn normalized(
        handle: Option<&str>,
        title: Option<&str>,
        sku: Option<&str>,
        row_number: usize,
    ) -> NormalizedRow {
        NormalizedRow {
            product: ProductFragment {
                handle: handle.map(str::to_string),
                title: title.map(str::to_string),
                ..Default::default()
            },
            variant: VariantFragment {
                sku: sku.map(str::to_string),
                row_number,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_rows_sharing_handle_fold_into_one_group() {
        let rows = vec![
            normalized(Some("shirt"), Some("Shirt"), Some("S1"), 2),
            normalized(Some("shirt"), None, Some("S2"), 3),
        ];

        let groups = ProductGrouper.group(rows);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].variants.len(), 2);
        // 首行字段胜出
        assert_eq!(groups[0].product.title, Some("Shirt".to_string()));
    }

    #[test]
    fn test_first_seen_fields_win() {
        let mut second = normalized(Some("shirt"), Some("Renamed"), Some("S2"), 3);
        second.product.vendor = Some("Acme".to_string());

        let rows = vec![
            normalized(Some("shirt"), Some("Shirt"), Some("S1"), 2),
            second,
        ];

        let groups = ProductGrouper.group(rows);

        assert_eq!(groups[0].product.title, Some("Shirt".to_string()));
        // 后续行的商品级字段不覆盖
        assert_eq!(groups[0].product.vendor, None);
    }

    #[test]
    fn test_first_seen_order_preserved() {
        let rows = vec![
            normalized(Some("mug"), None, Some("M1"), 2),
            normalized(Some("shirt"), None, Some("S1"), 3),
            normalized(Some("mug"), None, Some("M2"), 4),
        ];

        let groups = ProductGrouper.group(rows);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].product.handle, Some("mug".to_string()));
        assert_eq!(groups[1].product.handle, Some("shirt".to_string()));
        assert_eq!(groups[0].variants.len(), 2);
    }

    #[test]
    fn test_id_takes_precedence_over_handle() {
        let mut a = normalized(Some("shirt"), None, Some("S1"), 2);
        a.product.id = Some(9);
        let mut b = normalized(Some("other-handle"), None, Some("S2"), 3);
        b.product.id = Some(9);

        let groups = ProductGrouper.group(vec![a, b]);

        // 同 id 不同 handle 仍折叠为一组
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].variants.len(), 2);
    }

    #[test]
    fn test_identityless_rows_never_merge() {
        let rows = vec![
            normalized(None, None, Some("S1"), 2),
            normalized(None, None, Some("S2"), 3),
        ];

        let groups = ProductGrouper.group(rows);

        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_empty_variant_not_appended() {
        let rows = vec![normalized(Some("shirt"), Some("Shirt"), None, 2)];

        let groups = ProductGrouper.group(rows);

        assert_eq!(groups.len(), 1);
        assert!(groups[0].variants.is_empty());
    }
}
