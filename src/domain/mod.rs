// ==========================================
// HVDC 物流 Flow Code 引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件读取,不含引擎逻辑
// ==========================================

pub mod classification;
pub mod movement;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use classification::{ClassificationOutput, ClassificationResult, Route};
pub use movement::{GapEntry, GapIssue, GapReport, MonthlyBalance, WarehouseEvent};
pub use shipment::{CellValue, ColumnValue, ShipmentRecord};
pub use types::{Distribution, EventType, FlowCode, LocationCategory, Period};
