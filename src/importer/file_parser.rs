// ==========================================
// HVDC 物流 Flow Code 引擎 - 文件解析器实现
// ==========================================
// 职责: 外部表格 → 原始行 (列名 → 单元格值)
// 支持: Excel (.xlsx/.xls/.xlsb/.xlsm/.ods) / CSV (.csv)
// ==========================================

use crate::domain::shipment::CellValue;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::value_normalizer::ValueNormalizer;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行: 表头 → 单元格值
pub type RawRow = HashMap<String, CellValue>;

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser {
    /// 读取文件为原始行,跳过完全空白的行
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(ValueNormalizer::clean_str)
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    let cell = if value.trim().is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(value.to_string())
                    };
                    row.insert(header.clone(), cell);
                }
            }

            if row.values().all(CellValue::is_empty) {
                continue;
            }
            rows.push(row);
        }

        tracing::debug!(path = %file_path.display(), rows = rows.len(), "CSV 解析完成");
        Ok(rows)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
#[derive(Default)]
pub struct ExcelParser {
    /// 指定工作表; None 时读取第一个
    pub sheet: Option<String>,
}

impl ExcelParser {
    fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) if s.trim().is_empty() => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => {
                let serial = dt.as_f64();
                match ValueNormalizer::excel_serial_to_datetime(serial) {
                    Some(ts) => CellValue::DateTime(ts),
                    None => CellValue::Number(serial),
                }
            }
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Error(e.to_string()),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_rows(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if !matches!(ext.as_str(), "xlsx" | "xls" | "xlsb" | "xlsm" | "ods") {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        let sheet_name = match &self.sheet {
            Some(name) => name.clone(),
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| {
                    ImportError::ExcelParseError("Excel 文件无工作表".to_string())
                })?,
        };

        let range = workbook.worksheet_range(&sheet_name)?;

        let mut source_rows = range.rows();
        let header_row = source_rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无数据行".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| ValueNormalizer::clean_str(&cell.to_string()))
            .collect();

        let mut rows = Vec::new();
        for data_row in source_rows {
            let mut row = RawRow::new();

            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    if header.is_empty() {
                        continue;
                    }
                    row.insert(header.clone(), Self::convert_cell(cell));
                }
            }

            if row.values().all(CellValue::is_empty) {
                continue;
            }
            rows.push(row);
        }

        tracing::debug!(
            path = %file_path.display(),
            sheet = %sheet_name,
            rows = rows.len(),
            "Excel 解析完成"
        );
        Ok(rows)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRow>> {
        let path = file_path.as_ref();
        match extension_of(path).as_str() {
            "csv" => CsvParser.parse_to_rows(path),
            "xlsx" | "xls" | "xlsb" | "xlsm" | "ods" => ExcelParser::default().parse_to_rows(path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}
