// ==========================================
// HVDC 物流 Flow Code 引擎 - 记录映射器
// ==========================================
// 职责: 原始行 → ShipmentRecord (列一次性解析)
// 规则: 配置列在文件中缺失时视为恒空,只记录一次警告
// ==========================================

use crate::config::ColumnSchema;
use crate::domain::shipment::{CellValue, ColumnValue, ShipmentRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use crate::importer::value_normalizer::ValueNormalizer;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

// ==========================================
// MappedBatch - 映射结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct MappedBatch {
    pub records: Vec<ShipmentRecord>,
    /// 文件中找不到的配置列 (标准列名)
    pub missing_columns: Vec<String>,
    /// 重复出现的 case_id (每个只记一次); 重复行照常保留
    pub duplicate_case_ids: Vec<String>,
}

pub struct RecordMapper<'a> {
    schema: &'a ColumnSchema,
}

impl<'a> RecordMapper<'a> {
    pub fn new(schema: &'a ColumnSchema) -> Self {
        Self { schema }
    }

    /// 批量映射
    ///
    /// # 错误
    /// - PrimaryKeyMissing: case_id 为空 (行号从 2 开始,对应表格行)
    ///
    /// 同一 case_id 重复出现时保留全部行, 由出入库汇总按 (货物, 位置, 事件) 去重
    #[tracing::instrument(skip(self, rows), fields(count = rows.len()))]
    pub fn map_rows(&self, rows: Vec<RawRow>) -> ImportResult<MappedBatch> {
        let headers: BTreeSet<&str> = rows
            .iter()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect();

        // 标准列名 → 实际表头 (None = 缺失)
        let resolved: HashMap<&str, Option<String>> = self
            .schema
            .all_columns()
            .into_iter()
            .map(|column| (column, self.resolve_header(column, &headers)))
            .collect();

        let mut missing_columns: Vec<String> = self
            .schema
            .all_columns()
            .into_iter()
            .filter(|c| resolved.get(c).map_or(true, Option::is_none))
            .map(str::to_string)
            .collect();
        missing_columns.dedup();

        if resolved
            .get(self.schema.case_id_column.as_str())
            .map_or(true, Option::is_none)
            && !rows.is_empty()
        {
            return Err(ImportError::PrimaryKeyMissing(2));
        }

        for column in &missing_columns {
            tracing::warn!(column = %column, "配置列在数据中不存在, 按恒空处理");
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut duplicate_case_ids: Vec<String> = Vec::new();
        let mut records = Vec::with_capacity(rows.len());

        for (idx, row) in rows.iter().enumerate() {
            let row_number = idx + 2; // 表头占第 1 行
            let take = |column: &str| -> CellValue {
                resolved
                    .get(column)
                    .and_then(|header| header.as_ref())
                    .and_then(|header| row.get(header))
                    .cloned()
                    .unwrap_or_default()
            };

            let case_id = ValueNormalizer::clean(&take(self.schema.case_id_column.as_str()));
            if !ValueNormalizer::is_valid_str(&case_id) {
                return Err(ImportError::PrimaryKeyMissing(row_number));
            }
            if !seen.insert(case_id.clone()) {
                tracing::warn!(
                    row = row_number,
                    case_id = %case_id,
                    "case_id 重复, 保留该行"
                );
                if !duplicate_case_ids.contains(&case_id) {
                    duplicate_case_ids.push(case_id.clone());
                }
            }

            records.push(ShipmentRecord {
                location_raw: take(self.schema.location_column.as_str()),
                status_raw: take(self.schema.status_column.as_str()),
                warehouses: self
                    .schema
                    .warehouse_columns
                    .iter()
                    .map(|c| ColumnValue::new(c.as_str(), take(c.as_str())))
                    .collect(),
                offshore: ColumnValue::new(
                    self.schema.offshore_column.as_str(),
                    take(self.schema.offshore_column.as_str()),
                ),
                sites: self
                    .schema
                    .site_columns
                    .iter()
                    .map(|c| ColumnValue::new(c.as_str(), take(c.as_str())))
                    .collect(),
                case_id,
            });
        }

        tracing::info!(
            records = records.len(),
            missing_columns = missing_columns.len(),
            duplicates = duplicate_case_ids.len(),
            "记录映射完成"
        );

        Ok(MappedBatch {
            records,
            missing_columns,
            duplicate_case_ids,
        })
    }

    /// 查找标准列名或别名对应的实际表头 (忽略大小写与空白差异)
    fn resolve_header(&self, column: &str, headers: &BTreeSet<&str>) -> Option<String> {
        for candidate in self.schema.candidates(column) {
            let wanted = ValueNormalizer::clean_str(candidate).to_uppercase();
            if let Some(found) = headers
                .iter()
                .find(|h| ValueNormalizer::clean_str(h).to_uppercase() == wanted)
            {
                return Some(found.to_string());
            }
        }
        None
    }
}
