// ==========================================
// HVDC 物流 Flow Code 引擎 - 配置层
// ==========================================
// 职责: 列结构、关键字表、阈值、分类方案
// 存储: JSON 文件,缺省值即标准部署
// ==========================================

pub mod column_schema;
pub mod engine_config;
pub mod error;
pub mod keyword_table;

// 重导出核心配置
pub use column_schema::ColumnSchema;
pub use engine_config::{EngineConfig, FlowScheme, Thresholds};
pub use error::{ConfigError, ConfigResult};
pub use keyword_table::KeywordTable;
