// ==========================================
// Shopify 商品导入引擎 - 行标准化器实现
// ==========================================
// 职责: 原始行 → (商品片段, 变体片段) + 类型强制转换
// 红线: 空白串与 "nan" 哨兵值一律标准化为缺失，不得以数值样式字符串泄漏到下游
// ==========================================

use crate::domain::{NormalizedRow, ProductFragment, RawRow, VariantFragment};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::product_importer_trait::RowNormalizer as RowNormalizerTrait;

pub struct RowNormalizer;

impl RowNormalizerTrait for RowNormalizer {
    fn normalize(&self, row: &RawRow, row_number: usize) -> ImportResult<NormalizedRow> {
        let product = ProductFragment {
            id: self.parse_id(row, "ID", row_number)?,
            handle: self.get_string(row, "Handle"),
            title: self.get_string(row, "Title"),
            body_html: self.get_string(row, "Body (HTML)"),
            vendor: self.get_string(row, "Vendor"),
            product_type: self.get_string(row, "Product Type"),
            tags: self.parse_tags(row.get("Tags").map(String::as_str).unwrap_or("")),
        };

        let variant = VariantFragment {
            id: self.parse_id(row, "Variant ID", row_number)?,
            sku: self.get_string(row, "Variant SKU"),
            price: self.parse_f64(row, "Variant Price", row_number)?,
            compare_at_price: self.parse_f64(row, "Variant Compare At Price", row_number)?,
            inventory_qty: self.parse_i64(row, "Variant Inventory Qty", row_number)?,
            weight: self.parse_f64(row, "Variant Weight", row_number)?,
            options: self.parse_options(row),
            row_number,
        };

        Ok(NormalizedRow { product, variant })
    }
}

impl RowNormalizer {
    /// 提取字符串字段（TRIM，空串 → None）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        row.get(key).and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 解析标签串（逗号拆分，逐项 TRIM，空项剔除，保持顺序）
    fn parse_tags(&self, value: &str) -> Vec<String> {
        value
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// 解析选项列对（Option1..3 Name/Value，两侧同时存在才计入，保持插入顺序）
    fn parse_options(&self, row: &RawRow) -> Vec<(String, String)> {
        let mut options = Vec::new();

        for i in 1..=3 {
            let name = self.get_string(row, &format!("Option{} Name", i));
            let value = self.get_string(row, &format!("Option{} Value", i));

            if let (Some(name), Some(value)) = (name, value) {
                options.push((name, value));
            }
        }

        options
    }

    /// 解析浮点数（"nan" 哨兵 → None）
    fn parse_f64(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => match value.parse::<f64>() {
                // 电子表格空单元格常以 NaN 哨兵出现，按缺失处理
                Ok(v) if !v.is_finite() => Ok(None),
                Ok(v) => Ok(Some(v)),
                Err(_) => Err(ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("cannot parse '{}' as a number", value),
                }),
            },
        }
    }

    /// 解析整数（接受 "3" 与 "3.0"，小数部分非零视为转换失败）
    fn parse_i64(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<i64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => {
                if let Ok(v) = value.parse::<i64>() {
                    return Ok(Some(v));
                }
                match value.parse::<f64>() {
                    Ok(v) if !v.is_finite() => Ok(None),
                    Ok(v) if v.fract() == 0.0 => Ok(Some(v as i64)),
                    _ => Err(ImportError::TypeConversionError {
                        row: row_number,
                        field: key.to_string(),
                        message: format!("cannot parse '{}' as an integer", value),
                    }),
                }
            }
        }
    }

    /// 解析远程 ID（Excel 常把整数格式化为 "123.0"，与整数同规则）
    fn parse_id(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<i64>> {
        self.parse_i64(row, key, row_number)
    }
}
