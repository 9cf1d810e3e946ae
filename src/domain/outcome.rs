// ==========================================
// Shopify 商品导入引擎 - 导入结果领域模型
// ==========================================
// 用途: 行级结果台账 + 批次汇总统计
// 红线: 每个输入行恰有一条台账记录，成功运行后不得残留 pending
// ==========================================

use crate::domain::product::RawRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RowStatus - 行状态
// ==========================================
// 终态: created/updated/skipped/error；pending 仅为管道内部过渡态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Pending,
    Created,
    Updated,
    Skipped,
    Error,
}

impl RowStatus {
    /// 报表/日志用小写文本
    pub fn as_str(&self) -> &'static str {
        match self {
            RowStatus::Pending => "pending",
            RowStatus::Created => "created",
            RowStatus::Updated => "updated",
            RowStatus::Skipped => "skipped",
            RowStatus::Error => "error",
        }
    }
}

// ==========================================
// RowOutcome - 行级结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowOutcome {
    pub row: usize,             // 原始文件行号（1 基，含表头偏移）
    pub sku: Option<String>,    // 该行变体 SKU（如有）
    pub status: RowStatus,      // 行状态
    pub error: Option<String>,  // 错误/跳过原因
    pub data: RawRow,           // 原始行数据（报表回显用）
}

impl RowOutcome {
    /// 新建 pending 台账记录
    pub fn pending(row: usize, sku: Option<String>, data: RawRow) -> Self {
        Self {
            row,
            sku,
            status: RowStatus::Pending,
            error: None,
            data,
        }
    }
}

// ==========================================
// ImportIssue - 汇总级问题条目
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportIssue {
    /// 行级错误（标准化失败等）
    Row { row: usize, error: String },
    /// 商品级校验失败
    Product { product: String, errors: Vec<String> },
    /// 变体级错误（目录侧 SKU 冲突等）
    Variant { sku: Option<String>, error: String },
    /// 变体级警告（缺 id/sku 被剔除）
    Warning { product: String, message: String },
}

// ==========================================
// ImportSummary - 批次汇总统计
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSummary {
    pub products_created: usize,
    pub products_updated: usize,
    pub variants_created: usize,
    pub variants_updated: usize,
    pub errors: Vec<ImportIssue>,       // 问题明细（行/商品/变体级）
    pub result_id: Option<String>,      // 已持久化台账的结果 ID
}

// ==========================================
// ValidationFailure / DroppedVariant / ValidationReport
// ==========================================
// 用途: 校验阶段输出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub product: String,        // 商品标签（handle/title/"Unknown product"）
    pub errors: Vec<String>,    // 校验错误明细
    pub row_numbers: Vec<usize>, // 该商品全部变体行号（台账回写用）
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedVariant {
    pub product: String,   // 所属商品标签
    pub row_number: usize, // 被剔除变体的行号
    pub message: String,   // 剔除原因
}

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub valid: Vec<crate::domain::product::GroupedProduct>, // 通过校验的商品（仅保留合法变体）
    pub failures: Vec<ValidationFailure>,                   // 商品级失败
    pub dropped_variants: Vec<DroppedVariant>,              // 警告级剔除明细
}

// ==========================================
// VariantRef / VariantIssue / VariantReconcileResult
// ==========================================
// 用途: 变体对账阶段输出
// 记账键: SKU + 行号（仅有 id 的变体没有 SKU，台账回写必须按行号）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantRef {
    pub sku: Option<String>,
    pub row_number: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantIssue {
    pub sku: Option<String>,
    pub row_number: usize,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantReconcileResult {
    pub created: Vec<VariantRef>,  // 新建变体
    pub updated: Vec<VariantRef>,  // 更新变体
    pub skipped: Vec<VariantRef>,  // 跳过变体（目录侧冲突）
    pub errors: Vec<VariantIssue>, // 冲突明细
}

// ==========================================
// ImportOutcome - 导入接口返回值
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub summary: ImportSummary,     // 汇总统计
    pub outcomes: Vec<RowOutcome>,  // 行级台账
    pub elapsed_time: std::time::Duration, // 导入耗时
}

// ==========================================
// StoredImportResult - 台账持久化信封
// ==========================================
// 生命周期: 导入完成后保留至结果清理周期
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredImportResult {
    pub result_id: String,              // 结果 ID（UUID）
    pub file_name: Option<String>,      // 源文件名
    pub imported_at: DateTime<Utc>,     // 导入时间
    pub rows: Vec<RowOutcome>,          // 行级台账
}
