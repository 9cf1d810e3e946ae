// ==========================================
// ProductImporter 集成测试
// ==========================================
// 测试目标: 验证完整的商品导入流程（标准化 → 分组 → 校验 → 对账 → 台账）
// ==========================================

mod helpers;

use helpers::mock_catalog::{remote_product, remote_variant, CatalogCall, MockCatalogStore};
use shopify_import_engine::importer::{ProductImporter, ProductImporterImpl};
use shopify_import_engine::logging;
use shopify_import_engine::report::{FsResultStore, ResultStore};
use shopify_import_engine::{RawRow, RowStatus};
use std::sync::Arc;
use tempfile::TempDir;

/// 创建测试用的 ProductImporter 实例
fn create_test_importer(
    store: Arc<MockCatalogStore>,
    result_dir: &TempDir,
) -> ProductImporterImpl<Arc<MockCatalogStore>, FsResultStore> {
    ProductImporterImpl::with_default_components(store, FsResultStore::new(result_dir.path()))
}

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_import_creates_product_and_variants() {
    logging::init_test();

    let store = Arc::new(MockCatalogStore::new());
    let result_dir = tempfile::tempdir().unwrap();
    let importer = create_test_importer(store.clone(), &result_dir);

    // 两行同 handle：一个商品、两个变体
    let rows = vec![
        row(&[
            ("Handle", "shirt"),
            ("Title", "Shirt"),
            ("Variant SKU", "S1"),
            ("Variant Price", "10"),
        ]),
        row(&[
            ("Handle", "shirt"),
            ("Variant SKU", "S2"),
            ("Variant Price", "12"),
        ]),
    ];

    let outcome = importer.import_rows(rows, 2, None).await.unwrap();

    assert_eq!(outcome.summary.products_created, 1);
    assert_eq!(outcome.summary.products_updated, 0);
    assert_eq!(outcome.summary.variants_created, 2);
    assert_eq!(outcome.summary.variants_updated, 0);

    // 恰好一次商品创建、两次变体创建
    assert_eq!(
        store.count_calls(|c| matches!(c, CatalogCall::CreateProduct)),
        1
    );
    assert_eq!(
        store.count_calls(|c| matches!(c, CatalogCall::CreateVariant(_))),
        2
    );

    // 两行均终结为 created
    assert_eq!(outcome.outcomes.len(), 2);
    assert!(outcome
        .outcomes
        .iter()
        .all(|o| o.status == RowStatus::Created));

    // 目录状态: 商品带两个变体
    let created = store.product_by_handle("shirt").unwrap();
    assert_eq!(created.title, Some("Shirt".to_string()));
    assert_eq!(created.variants.len(), 2);
}

#[tokio::test]
async fn test_ledger_persisted_and_loadable() {
    logging::init_test();

    let store = Arc::new(MockCatalogStore::new());
    let result_dir = tempfile::tempdir().unwrap();
    let importer = create_test_importer(store, &result_dir);

    let rows = vec![row(&[
        ("Handle", "shirt"),
        ("Title", "Shirt"),
        ("Variant SKU", "S1"),
    ])];

    let outcome = importer
        .import_rows(rows, 2, Some("feed.csv".to_string()))
        .await
        .unwrap();

    let result_id = outcome.summary.result_id.expect("result id must be set");

    let ledger = FsResultStore::new(result_dir.path())
        .load(&result_id)
        .await
        .unwrap();

    assert_eq!(ledger.file_name, Some("feed.csv".to_string()));
    assert_eq!(ledger.rows.len(), 1);
    assert_eq!(ledger.rows[0].row, 2);
    assert_eq!(ledger.rows[0].status, RowStatus::Created);
    assert_eq!(ledger.rows[0].data.get("Handle"), Some(&"shirt".to_string()));
}

#[tokio::test]
async fn test_duplicate_sku_in_batch_is_skipped() {
    logging::init_test();

    let store = Arc::new(MockCatalogStore::new());
    let result_dir = tempfile::tempdir().unwrap();
    let importer = create_test_importer(store.clone(), &result_dir);

    // 第二次出现的 S1 在中间位置，仍应跳过
    let rows = vec![
        row(&[("Handle", "shirt"), ("Title", "Shirt"), ("Variant SKU", "S1")]),
        row(&[("Handle", "shirt"), ("Variant SKU", "S1")]),
        row(&[("Handle", "shirt"), ("Variant SKU", "S2")]),
    ];

    let outcome = importer.import_rows(rows, 2, None).await.unwrap();

    assert_eq!(outcome.outcomes[1].status, RowStatus::Skipped);
    assert_eq!(
        outcome.outcomes[1].error.as_deref(),
        Some("Duplicate SKU 'S1' found in same import. Row skipped.")
    );

    // 首次出现的 S1 与 S2 正常创建
    assert_eq!(outcome.summary.variants_created, 2);
    assert_eq!(outcome.outcomes[0].status, RowStatus::Created);
    assert_eq!(outcome.outcomes[2].status, RowStatus::Created);
}

#[tokio::test]
async fn test_product_without_identity_fails_validation() {
    logging::init_test();

    let store = Arc::new(MockCatalogStore::new());
    let result_dir = tempfile::tempdir().unwrap();
    let importer = create_test_importer(store.clone(), &result_dir);

    // 无 Handle 无 Title，仅 SKU
    let rows = vec![row(&[("Variant SKU", "X9"), ("Variant Price", "5")])];

    let outcome = importer.import_rows(rows, 2, None).await.unwrap();

    assert_eq!(outcome.outcomes[0].status, RowStatus::Error);
    assert_eq!(
        outcome.outcomes[0].error.as_deref(),
        Some("Product must have at least Handle or Title")
    );

    // 校验失败的商品不触达远程目录
    assert!(store.calls().is_empty());
    assert_eq!(outcome.summary.products_created, 0);
}

#[tokio::test]
async fn test_normalization_error_does_not_stop_other_rows() {
    logging::init_test();

    let store = Arc::new(MockCatalogStore::new());
    let result_dir = tempfile::tempdir().unwrap();
    let importer = create_test_importer(store, &result_dir);

    let rows = vec![
        row(&[("Handle", "shirt"), ("Title", "Shirt"), ("Variant SKU", "S1"), ("Variant Price", "abc")]),
        row(&[("Handle", "mug"), ("Title", "Mug"), ("Variant SKU", "M1"), ("Variant Price", "4")]),
    ];

    let outcome = importer.import_rows(rows, 2, None).await.unwrap();

    // 坏行: 行级错误，含行号与字段名
    assert_eq!(outcome.outcomes[0].status, RowStatus::Error);
    let message = outcome.outcomes[0].error.as_deref().unwrap();
    assert!(message.contains("row 2"));
    assert!(message.contains("Variant Price"));

    // 好行继续处理
    assert_eq!(outcome.outcomes[1].status, RowStatus::Created);
    assert_eq!(outcome.summary.products_created, 1);
}

#[tokio::test]
async fn test_existing_product_minimal_update_and_convergence() {
    logging::init_test();

    let store = Arc::new(
        MockCatalogStore::new().with_product(remote_product(1, "shirt", "Old Title")),
    );
    let result_dir = tempfile::tempdir().unwrap();
    let importer = create_test_importer(store.clone(), &result_dir);

    let rows = || {
        vec![row(&[
            ("Handle", "shirt"),
            ("Title", "New Title"),
            ("Variant SKU", "S1"),
            ("Variant Price", "10"),
        ])]
    };

    // 第一轮: 标题有差异 → 更新一次商品，创建变体
    let first = importer.import_rows(rows(), 2, None).await.unwrap();
    assert_eq!(first.summary.products_updated, 1);
    assert_eq!(first.summary.variants_created, 1);
    assert_eq!(
        store.count_calls(|c| matches!(c, CatalogCall::UpdateProduct(1))),
        1
    );
    assert_eq!(first.outcomes[0].status, RowStatus::Created);

    // 第二轮: 远端已收敛 → 空载荷，不再发起商品更新
    let second = importer.import_rows(rows(), 2, None).await.unwrap();
    assert_eq!(second.summary.products_updated, 0);
    assert_eq!(
        store.count_calls(|c| matches!(c, CatalogCall::UpdateProduct(1))),
        1
    );

    // 变体此时已存在 → 走更新
    assert_eq!(second.summary.variants_updated, 1);
    assert_eq!(second.outcomes[0].status, RowStatus::Updated);
}

#[tokio::test]
async fn test_catalog_owned_sku_conflict_is_skipped_without_mutation() {
    logging::init_test();

    // 远端: 变体 5 持有 XYZ，变体 9 持有 ABC
    let mut existing = remote_product(1, "shirt", "Shirt");
    existing.variants = vec![remote_variant(5, 1, "XYZ"), remote_variant(9, 1, "ABC")];

    let store = Arc::new(MockCatalogStore::new().with_product(existing));
    let result_dir = tempfile::tempdir().unwrap();
    let importer = create_test_importer(store.clone(), &result_dir);

    // 传入变体按 id 解析到变体 5，但 ABC 已被变体 9 占用
    let rows = vec![row(&[
        ("Handle", "shirt"),
        ("Variant ID", "5"),
        ("Variant SKU", "ABC"),
    ])];

    let outcome = importer.import_rows(rows, 2, None).await.unwrap();

    assert_eq!(outcome.outcomes[0].status, RowStatus::Skipped);
    assert_eq!(
        outcome.outcomes[0].error.as_deref(),
        Some("Duplicate SKU already exists in Shopify")
    );

    // 不发起任何变更调用
    assert_eq!(store.mutation_count(), 0);
    assert_eq!(outcome.summary.variants_created, 0);
    assert_eq!(outcome.summary.variants_updated, 0);
}

#[tokio::test]
async fn test_same_remote_product_reconciled_once() {
    logging::init_test();

    let store =
        Arc::new(MockCatalogStore::new().with_product(remote_product(7, "mug", "Mug")));
    let result_dir = tempfile::tempdir().unwrap();
    let importer = create_test_importer(store.clone(), &result_dir);

    // 两个分组键（ID 与 handle）解析到同一远程商品
    let rows = vec![
        row(&[("ID", "7"), ("Title", "Mug"), ("Variant SKU", "M1")]),
        row(&[("Handle", "mug"), ("Variant SKU", "M2")]),
    ];

    let outcome = importer.import_rows(rows, 2, None).await.unwrap();

    // 字段无差异且去重集合生效 → 零次商品更新
    assert_eq!(outcome.summary.products_updated, 0);
    assert_eq!(
        store.count_calls(|c| matches!(c, CatalogCall::UpdateProduct(_))),
        0
    );

    // 两个变体都挂到同一商品
    assert_eq!(outcome.summary.variants_created, 2);
    assert_eq!(store.product_by_handle("mug").unwrap().variants.len(), 2);
}

#[tokio::test]
async fn test_no_row_left_pending_on_mixed_input() {
    logging::init_test();

    let store = Arc::new(MockCatalogStore::new());
    let result_dir = tempfile::tempdir().unwrap();
    let importer = create_test_importer(store, &result_dir);

    let rows = vec![
        // 正常行
        row(&[("Handle", "shirt"), ("Title", "Shirt"), ("Variant SKU", "S1")]),
        // 批次内重复 SKU
        row(&[("Handle", "shirt"), ("Variant SKU", "S1")]),
        // 标准化失败
        row(&[("Handle", "shirt"), ("Variant SKU", "S3"), ("Variant Weight", "heavy")]),
        // 商品无身份
        row(&[("Variant SKU", "S4")]),
        // 纯商品行（无变体字段）
        row(&[("Handle", "mug"), ("Title", "Mug")]),
        // 变体无身份（商品存活，该行报错）
        row(&[("Handle", "mug"), ("Variant Price", "3")]),
    ];

    let outcome = importer.import_rows(rows, 2, None).await.unwrap();

    // 每个输入行恰有一条台账记录
    assert_eq!(outcome.outcomes.len(), 6);
    let rows_seen: Vec<usize> = outcome.outcomes.iter().map(|o| o.row).collect();
    assert_eq!(rows_seen, vec![2, 3, 4, 5, 6, 7]);

    // 成功运行后不得残留 pending
    assert!(outcome
        .outcomes
        .iter()
        .all(|o| o.status != RowStatus::Pending));

    // 变体无身份的行带剔除文案
    assert_eq!(outcome.outcomes[5].status, RowStatus::Error);
    assert!(outcome.outcomes[5]
        .error
        .as_deref()
        .unwrap()
        .contains("must have Variant ID or SKU"));

    // 纯商品行按商品动作终结
    assert_eq!(outcome.outcomes[4].status, RowStatus::Created);
}

#[tokio::test]
async fn test_import_from_csv_file() {
    use std::io::Write;

    logging::init_test();

    let store = Arc::new(MockCatalogStore::new());
    let result_dir = tempfile::tempdir().unwrap();
    let importer = create_test_importer(store, &result_dir);

    let mut feed = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(feed, "Handle,Title,Variant SKU,Variant Price").unwrap();
    writeln!(feed, "shirt,Shirt,S1,10").unwrap();
    writeln!(feed, "shirt,,S2,12").unwrap();

    let outcome = importer.import_from_file(feed.path()).await.unwrap();

    assert_eq!(outcome.summary.products_created, 1);
    assert_eq!(outcome.summary.variants_created, 2);

    // 数据行行号自 2 起（第 1 行为表头）
    assert_eq!(outcome.outcomes[0].row, 2);
    assert_eq!(outcome.outcomes[1].row, 3);
}
