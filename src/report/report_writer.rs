// ==========================================
// Shopify 商品导入引擎 - 导入结果报表
// ==========================================
// 职责: 行级台账 → 表格报表（CSV）
// 列约定: Row + 全部行 data 键的并集（字典序）+ Status + Error
// ==========================================

use crate::domain::StoredImportResult;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

pub struct ReportWriter;

impl ReportWriter {
    /// 写出 CSV 报表
    pub fn write_csv<W: Write>(&self, result: &StoredImportResult, writer: W) -> ImportResult<()> {
        // 动态收集所有行出现过的列名
        let mut columns: BTreeSet<String> = BTreeSet::new();
        for row in &result.rows {
            columns.extend(row.data.keys().cloned());
        }
        let columns: Vec<String> = columns.into_iter().collect();

        let mut csv_writer = csv::Writer::from_writer(writer);

        // 表头
        let mut header: Vec<&str> = vec!["Row"];
        header.extend(columns.iter().map(String::as_str));
        header.push("Status");
        header.push("Error");
        csv_writer.write_record(&header)?;

        // 数据行
        for row in &result.rows {
            let row_number = row.row.to_string();
            let mut record: Vec<&str> = vec![row_number.as_str()];
            for column in &columns {
                record.push(row.data.get(column).map(String::as_str).unwrap_or(""));
            }
            record.push(row.status.as_str());
            record.push(row.error.as_deref().unwrap_or(""));
            csv_writer.write_record(&record)?;
        }

        csv_writer
            .flush()
            .map_err(|e| ImportError::ReportWriteError(e.to_string()))?;
        Ok(())
    }

    /// 写出 CSV 报表到文件
    pub fn write_csv_file(
        &self,
        result: &StoredImportResult,
        path: impl AsRef<Path>,
    ) -> ImportResult<()> {
        let file = std::fs::File::create(path.as_ref())
            .map_err(|e| ImportError::ReportWriteError(e.to_string()))?;
        self.write_csv(result, file)
    }
}
