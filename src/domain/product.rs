// ==========================================
// Shopify 商品导入引擎 - 商品片段领域模型
// ==========================================
// 用途: 导入管道中间产物（文件解析 → 行标准化 → 此结构）
// 生命周期: 仅在单次导入流程内
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 原始行记录（列名 → 单元格文本，空串视为缺失）
pub type RawRow = HashMap<String, String>;

// ==========================================
// ProductFragment - 商品片段
// ==========================================
// 红线: 仅当 id/handle/title 至少一个存在时可寻址
// 寻址优先级: id > handle > title（分组键与远程匹配共用）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductFragment {
    pub id: Option<i64>,              // 远程商品 ID（电子表格 "ID" 列）
    pub handle: Option<String>,       // 商品 handle
    pub title: Option<String>,        // 商品标题
    pub body_html: Option<String>,    // 商品描述（HTML）
    pub vendor: Option<String>,       // 供应商
    pub product_type: Option<String>, // 商品类型
    pub tags: Vec<String>,            // 标签（逗号拆分，保持顺序）
}

impl ProductFragment {
    /// 校验/报表用标签：handle 优先，其次 title
    pub fn label(&self) -> String {
        self.handle
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| "Unknown product".to_string())
    }

    /// 是否可寻址（id/handle/title 至少一个存在）
    pub fn is_addressable(&self) -> bool {
        self.id.is_some() || self.handle.is_some() || self.title.is_some()
    }
}

// ==========================================
// VariantFragment - 变体片段
// ==========================================
// 批次内身份: SKU（区分大小写，已去除首尾空白）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantFragment {
    pub id: Option<i64>,                  // 远程变体 ID（"Variant ID" 列）
    pub sku: Option<String>,              // SKU
    pub price: Option<f64>,               // 售价
    pub compare_at_price: Option<f64>,    // 划线价
    pub inventory_qty: Option<i64>,       // 库存数量
    pub weight: Option<f64>,              // 重量
    pub options: Vec<(String, String)>,   // 选项 名称→值（≤3 项，保持插入顺序）

    // 元信息
    pub row_number: usize, // 原始文件行号（用于结果台账回写）
}

impl VariantFragment {
    /// 是否不携带任何变体数据（空片段不进入分组）
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.sku.is_none()
            && self.price.is_none()
            && self.compare_at_price.is_none()
            && self.inventory_qty.is_none()
            && self.weight.is_none()
            && self.options.is_empty()
    }
}

// ==========================================
// NormalizedRow - 标准化行
// ==========================================
// 用途: 行标准化阶段输出（商品片段 + 变体片段）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub product: ProductFragment,
    pub variant: VariantFragment,
}

// ==========================================
// GroupedProduct - 分组后的商品
// ==========================================
// 用途: 按分组键折叠后的商品实体，携带其全部变体
// 不变量: 商品级字段取首次出现行的值，后续同键行仅贡献变体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedProduct {
    pub product: ProductFragment,
    pub variants: Vec<VariantFragment>,
    pub source_rows: Vec<usize>, // 全部贡献行行号（含纯商品行，台账回写用）
}
