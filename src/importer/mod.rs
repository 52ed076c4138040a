// ==========================================
// HVDC 物流 Flow Code 引擎 - 导入层
// ==========================================
// 职责: 外部表格 → ShipmentRecord; 值清洗与时间戳识别
// 支持: Excel, CSV, JSON 参考分布
// ==========================================

pub mod error;
pub mod file_parser;
pub mod record_mapper;
pub mod reference;
pub mod value_normalizer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use record_mapper::{MappedBatch, RecordMapper};
pub use reference::{load_reference_distribution, parse_reference_distribution};
pub use value_normalizer::ValueNormalizer;
