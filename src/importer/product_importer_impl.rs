// ==========================================
// Shopify 商品导入引擎 - 商品导入器实现
// ==========================================
// 职责: 整合导入流程，从行序列到远程目录与结果台账
// 流程: 标准化 → 批次内去重 → 分组 → 校验 → 远程匹配 → 合并/创建 → 变体对账 → 台账回写
// 红线: 行级错误记入台账后继续；目录传输错误直接中止本次运行
// ==========================================

use crate::catalog::CatalogStore;
use crate::domain::{
    ImportIssue, ImportOutcome, ImportSummary, NormalizedRow, RawRow, RowOutcome, RowStatus,
    StoredImportResult,
};
use crate::importer::file_parser::DATA_START_ROW;
use crate::importer::product_importer_trait::{
    CatalogMatcher, FieldMerger, FileParser, ProductGrouper, ProductImporter, ProductValidator,
    RowNormalizer, VariantReconciler,
};
use crate::importer::error::ImportResult;
use crate::report::ResultStore;
use chrono::Utc;
use std::collections::HashSet;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ProductImporterImpl - 商品导入器实现
// ==========================================
pub struct ProductImporterImpl<S, R>
where
    S: CatalogStore,
    R: ResultStore,
{
    // 远程目录存储
    catalog: S,

    // 结果台账存储
    result_store: R,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    row_normalizer: Box<dyn RowNormalizer>,
    product_grouper: Box<dyn ProductGrouper>,
    product_validator: Box<dyn ProductValidator>,
    catalog_matcher: Box<dyn CatalogMatcher>,
    field_merger: Box<dyn FieldMerger>,
    variant_reconciler: Box<dyn VariantReconciler>,
}

impl<S, R> ProductImporterImpl<S, R>
where
    S: CatalogStore,
    R: ResultStore,
{
    /// 创建新的 ProductImporter 实例
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog: S,
        result_store: R,
        file_parser: Box<dyn FileParser>,
        row_normalizer: Box<dyn RowNormalizer>,
        product_grouper: Box<dyn ProductGrouper>,
        product_validator: Box<dyn ProductValidator>,
        catalog_matcher: Box<dyn CatalogMatcher>,
        field_merger: Box<dyn FieldMerger>,
        variant_reconciler: Box<dyn VariantReconciler>,
    ) -> Self {
        Self {
            catalog,
            result_store,
            file_parser,
            row_normalizer,
            product_grouper,
            product_validator,
            catalog_matcher,
            field_merger,
            variant_reconciler,
        }
    }

    /// 使用标准组件装配导入器
    pub fn with_default_components(catalog: S, result_store: R) -> Self {
        use crate::engine::{CatalogMatcherImpl, FieldMergerImpl, VariantReconcilerImpl};
        use crate::importer::{
            ProductGrouperImpl, ProductValidatorImpl, RowNormalizerImpl, UniversalFileParser,
        };

        Self::new(
            catalog,
            result_store,
            Box::new(UniversalFileParser),
            Box::new(RowNormalizerImpl),
            Box::new(ProductGrouperImpl),
            Box::new(ProductValidatorImpl),
            Box::new(CatalogMatcherImpl),
            Box::new(FieldMergerImpl),
            Box::new(VariantReconcilerImpl),
        )
    }
}

#[async_trait::async_trait]
impl<S, R> ProductImporter for ProductImporterImpl<S, R>
where
    S: CatalogStore + Send + Sync,
    R: ResultStore + Send + Sync,
{
    #[instrument(skip(self, rows, file_name), fields(result_id))]
    async fn import_rows(
        &self,
        rows: Vec<RawRow>,
        start_row: usize,
        file_name: Option<String>,
    ) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let result_id = Uuid::new_v4().to_string();

        let total_rows = rows.len();
        info!(result_id = %result_id, total_rows, "开始导入商品数据");

        let mut summary = ImportSummary::default();
        let mut outcomes: Vec<RowOutcome> = Vec::new();

        // === 步骤 1: 行标准化 + 批次内重复 SKU 检测 ===
        debug!("步骤 1: 行标准化");
        let mut normalized: Vec<NormalizedRow> = Vec::new();
        let mut seen_skus: HashSet<String> = HashSet::new();

        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = start_row + idx;

            match self.row_normalizer.normalize(&row, row_number) {
                Ok(norm) => {
                    let sku = norm.variant.sku.clone();

                    // 同一批次内第二次出现的非空 SKU 直接跳过，不进入分组
                    if let Some(sku_value) = &sku {
                        if !seen_skus.insert(sku_value.clone()) {
                            let message = format!(
                                "Duplicate SKU '{}' found in same import. Row skipped.",
                                sku_value
                            );
                            warn!(row = row_number, sku = %sku_value, "批次内重复 SKU，跳过该行");
                            outcomes.push(RowOutcome {
                                row: row_number,
                                sku,
                                status: RowStatus::Skipped,
                                error: Some(message),
                                data: row,
                            });
                            continue;
                        }
                    }

                    outcomes.push(RowOutcome::pending(row_number, sku, row));
                    normalized.push(norm);
                }
                Err(e) => {
                    // 标准化失败：记入台账后继续处理后续行
                    warn!(row = row_number, error = %e, "行标准化失败");
                    summary.errors.push(ImportIssue::Row {
                        row: row_number,
                        error: e.to_string(),
                    });
                    outcomes.push(RowOutcome {
                        row: row_number,
                        sku: None,
                        status: RowStatus::Error,
                        error: Some(e.to_string()),
                        data: row,
                    });
                }
            }
        }
        info!(normalized = normalized.len(), "行标准化完成");

        // === 步骤 2: 商品分组 ===
        debug!("步骤 2: 商品分组");
        let grouped = self.product_grouper.group(normalized);
        debug!(groups = grouped.len(), "商品分组完成");

        // === 步骤 3: 商品校验 ===
        debug!("步骤 3: 商品校验");
        let report = self.product_validator.validate(grouped);
        info!(
            valid = report.valid.len(),
            failed = report.failures.len(),
            dropped_variants = report.dropped_variants.len(),
            "商品校验完成"
        );

        // 商品级失败：整组行回写为 error
        for failure in &report.failures {
            let message = failure.errors.first().cloned().unwrap_or_default();
            for row_number in &failure.row_numbers {
                set_terminal(
                    &mut outcomes,
                    *row_number,
                    RowStatus::Error,
                    Some(message.clone()),
                );
            }
            summary.errors.push(ImportIssue::Product {
                product: failure.product.clone(),
                errors: failure.errors.clone(),
            });
        }

        // 变体级剔除：对应行回写为 error，汇总记警告
        for dropped in &report.dropped_variants {
            set_terminal(
                &mut outcomes,
                dropped.row_number,
                RowStatus::Error,
                Some(dropped.message.clone()),
            );
            summary.errors.push(ImportIssue::Warning {
                product: dropped.product.clone(),
                message: dropped.message.clone(),
            });
        }

        // === 步骤 4: 逐商品对账（匹配 → 合并/创建 → 变体对账） ===
        debug!("步骤 4: 逐商品对账");

        // 运行级去重集合：同一远程商品只合并/创建一次（作用域仅限本次运行）
        let mut processed_product_ids: HashSet<i64> = HashSet::new();

        for group in &report.valid {
            let existing = self
                .catalog_matcher
                .find_existing(&self.catalog, group)
                .await
                .map_err(|e| {
                    error!(product = %group.product.label(), error = %e, "远程匹配失败，中止导入");
                    e
                })?;

            // product_fallback: 纯商品行（无变体数据）的收尾状态
            let (remote_product, product_fallback) = match existing {
                Some(existing) => {
                    if processed_product_ids.insert(existing.id) {
                        let payload = self
                            .field_merger
                            .merge_product_fields(&existing, &group.product);
                        if payload.is_empty() {
                            // 字段无差异：抑制更新调用与计数
                            debug!(product_id = existing.id, "商品字段无差异，跳过更新");
                            (existing, RowStatus::Skipped)
                        } else {
                            let updated =
                                self.catalog.update_product(existing.id, &payload).await?;
                            summary.products_updated += 1;
                            info!(product_id = updated.id, "商品已更新");
                            (updated, RowStatus::Updated)
                        }
                    } else {
                        (existing, RowStatus::Skipped)
                    }
                }
                None => {
                    let payload = self.field_merger.build_create_payload(&group.product);
                    let created = self.catalog.create_product(&payload).await?;
                    processed_product_ids.insert(created.id);
                    summary.products_created += 1;
                    info!(product_id = created.id, product = %group.product.label(), "商品已创建");
                    (created, RowStatus::Created)
                }
            };

            let result = self
                .variant_reconciler
                .reconcile(&self.catalog, &remote_product, &group.variants)
                .await?;

            summary.variants_created += result.created.len();
            summary.variants_updated += result.updated.len();

            // 台账回写（仅 pending 行过渡到终态）
            for variant in &result.created {
                set_terminal(&mut outcomes, variant.row_number, RowStatus::Created, None);
            }
            for variant in &result.updated {
                set_terminal(&mut outcomes, variant.row_number, RowStatus::Updated, None);
            }
            for variant in &result.skipped {
                set_terminal(&mut outcomes, variant.row_number, RowStatus::Skipped, None);
            }
            for issue in &result.errors {
                attach_error(&mut outcomes, issue.row_number, &issue.error);
                summary.errors.push(ImportIssue::Variant {
                    sku: issue.sku.clone(),
                    error: issue.error.clone(),
                });
            }

            // 纯商品行（无变体数据）按商品级动作收尾
            for row_number in &group.source_rows {
                set_terminal(&mut outcomes, *row_number, product_fallback, None);
            }
        }

        // === 步骤 5: 台账持久化 ===
        debug!("步骤 5: 台账持久化");
        let stored = StoredImportResult {
            result_id: result_id.clone(),
            file_name,
            imported_at: Utc::now(),
            rows: outcomes.clone(),
        };
        self.result_store.save(&stored).await?;
        summary.result_id = Some(result_id.clone());

        let elapsed_time = start_time.elapsed();
        info!(
            result_id = %result_id,
            products_created = summary.products_created,
            products_updated = summary.products_updated,
            variants_created = summary.variants_created,
            variants_updated = summary.variants_updated,
            issues = summary.errors.len(),
            elapsed_ms = elapsed_time.as_millis() as u64,
            "商品数据导入完成"
        );

        Ok(ImportOutcome {
            summary,
            outcomes,
            elapsed_time,
        })
    }

    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome> {
        let path = file_path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string);

        info!(file = %path.display(), "从文件导入商品数据");
        let rows = self.file_parser.parse_to_raw_rows(path)?;

        // 第 1 行为表头，台账行号自 2 起
        self.import_rows(rows, DATA_START_ROW, file_name).await
    }

    /// 批量导入多个文件（并发执行，单个文件失败不影响其他文件）
    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> ImportResult<Vec<Result<ImportOutcome, String>>> {
        use futures::future::join_all;

        info!(count = file_paths.len(), "开始批量导入文件");

        let import_tasks = file_paths.into_iter().map(|path| {
            let path_str = path.as_ref().display().to_string();
            async move {
                match self.import_from_file(path).await {
                    Ok(outcome) => {
                        info!(
                            file = %path_str,
                            products_created = outcome.summary.products_created,
                            variants_created = outcome.summary.variants_created,
                            "文件导入成功"
                        );
                        Ok(outcome)
                    }
                    Err(e) => {
                        error!(file = %path_str, error = %e, "文件导入失败");
                        Err(format!("import of {} failed: {}", path_str, e))
                    }
                }
            }
        });

        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量导入完成"
        );

        Ok(results)
    }
}

/// pending 行过渡到终态；已终结的行不再改写
fn set_terminal(
    outcomes: &mut [RowOutcome],
    row_number: usize,
    status: RowStatus,
    error: Option<String>,
) {
    if let Some(outcome) = outcomes.iter_mut().find(|o| o.row == row_number) {
        if outcome.status == RowStatus::Pending {
            outcome.status = status;
            outcome.error = error;
        }
    }
}

/// 为已跳过的冲突行补充错误文案（行若仍为 pending 则按 error 终结）
fn attach_error(outcomes: &mut [RowOutcome], row_number: usize, error: &str) {
    if let Some(outcome) = outcomes.iter_mut().find(|o| o.row == row_number) {
        if outcome.status == RowStatus::Pending {
            outcome.status = RowStatus::Error;
        }
        if outcome.error.is_none() {
            outcome.error = Some(error.to_string());
        }
    }
}
