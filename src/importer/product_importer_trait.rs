// ==========================================
// Shopify 商品导入引擎 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 解析 → 标准化 → 分组 → 校验 → 远程匹配 → 字段合并 → 变体对账
// ==========================================

use crate::catalog::{CatalogError, CatalogStore};
use crate::domain::{
    GroupedProduct, ImportOutcome, NormalizedRow, ProductFragment, ProductPayload, RawRow,
    RemoteProduct, ValidationReport, VariantFragment, VariantReconcileResult,
};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 行来源接口（阶段 0）
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录（列名 → 单元格文本）
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表（保持文件顺序，空白行已剔除）
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// RowNormalizer Trait
// ==========================================
// 用途: 行标准化接口（阶段 1）
// 实现者: RowNormalizerImpl
pub trait RowNormalizer: Send + Sync {
    /// 将一条原始行记录标准化为（商品片段, 变体片段）
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 行号（1 基，用于错误归因）
    ///
    /// # 返回
    /// - Ok(NormalizedRow): 标准化结果
    /// - Err(TypeConversionError): 数值字段无法强制转换
    fn normalize(&self, row: &RawRow, row_number: usize) -> ImportResult<NormalizedRow>;
}

// ==========================================
// ProductGrouper Trait
// ==========================================
// 用途: 商品分组接口（阶段 2）
// 实现者: ProductGrouperImpl
pub trait ProductGrouper: Send + Sync {
    /// 按分组键折叠标准化行，保持首次出现顺序
    ///
    /// # 参数
    /// - rows: 标准化行序列（批次内重复 SKU 已在编排层剔除）
    ///
    /// # 返回
    /// - Vec<GroupedProduct>: 分组后的商品列表
    fn group(&self, rows: Vec<NormalizedRow>) -> Vec<GroupedProduct>;
}

// ==========================================
// ProductValidator Trait
// ==========================================
// 用途: 商品校验接口（阶段 3）
// 实现者: ProductValidatorImpl
pub trait ProductValidator: Send + Sync {
    /// 校验分组后的商品，划分为合法商品与失败报告
    ///
    /// # 规则
    /// - 商品级: handle 与 title 均缺失 → 整个商品失败
    /// - 变体级: id 与 sku 均缺失 → 仅剔除该变体（警告级）
    fn validate(&self, products: Vec<GroupedProduct>) -> ValidationReport;
}

// ==========================================
// CatalogMatcher Trait
// ==========================================
// 用途: 远程身份匹配接口（阶段 4）
// 实现者: CatalogMatcherImpl
#[async_trait]
pub trait CatalogMatcher: Send + Sync {
    /// 按 id > handle 优先级查找已存在的远程商品
    ///
    /// # 返回
    /// - Ok(Some(RemoteProduct)): 命中
    /// - Ok(None): 两路查找均未命中（应创建新商品）
    /// - Err(CatalogError): 传输/接口错误（致命）
    async fn find_existing(
        &self,
        store: &dyn CatalogStore,
        product: &GroupedProduct,
    ) -> Result<Option<RemoteProduct>, CatalogError>;
}

// ==========================================
// FieldMerger Trait
// ==========================================
// 用途: 商品字段合并接口（阶段 5）
// 实现者: FieldMergerImpl
pub trait FieldMerger: Send + Sync {
    /// 计算最小更新载荷
    ///
    /// # 规则
    /// - 仅纳入导入侧存在且与远端不同的字段
    /// - 空载荷表示无需更新（调用方应抑制更新调用与计数）
    fn merge_product_fields(
        &self,
        existing: &RemoteProduct,
        incoming: &ProductFragment,
    ) -> ProductPayload;

    /// 构造新建商品载荷（title 缺失时回退为 handle）
    fn build_create_payload(&self, incoming: &ProductFragment) -> ProductPayload;
}

// ==========================================
// VariantReconciler Trait
// ==========================================
// 用途: 变体对账接口（阶段 6）
// 实现者: VariantReconcilerImpl
#[async_trait]
pub trait VariantReconciler: Send + Sync {
    /// 对一个远程商品逐个对账传入变体（创建/更新/跳过）
    ///
    /// # 参数
    /// - store: 目录存储
    /// - product: 已解析的远程商品（已存在或刚创建）
    /// - variants: 分组商品的变体列表（按原始顺序）
    ///
    /// # 返回
    /// - Ok(VariantReconcileResult): 按 SKU 记账的对账结果
    /// - Err(CatalogError): 传输/接口错误（致命）
    async fn reconcile(
        &self,
        store: &dyn CatalogStore,
        product: &RemoteProduct,
        variants: &[VariantFragment],
    ) -> Result<VariantReconcileResult, CatalogError>;
}

// ==========================================
// ProductImporter Trait
// ==========================================
// 用途: 商品导入主接口
// 实现者: ProductImporterImpl
#[async_trait]
pub trait ProductImporter: Send + Sync {
    /// 导入一批原始行（台账行号自 start_row 起）
    ///
    /// # 参数
    /// - rows: 原始行序列
    /// - start_row: 首行行号（文件导入时为 2，第 1 行为表头）
    /// - file_name: 源文件名（台账元信息，可缺失）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 汇总统计 + 行级台账 + 耗时
    /// - Err: 目录传输错误、台账持久化错误
    async fn import_rows(
        &self,
        rows: Vec<RawRow>,
        start_row: usize,
        file_name: Option<String>,
    ) -> ImportResult<ImportOutcome>;

    /// 从商品表文件导入（CSV/Excel，按扩展名自动选择解析器）
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome>;

    /// 批量导入多个文件（并发执行，单个文件失败不影响其他文件）
    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> ImportResult<Vec<Result<ImportOutcome, String>>>;
}
