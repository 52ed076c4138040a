// ==========================================
// HVDC 物流 Flow Code 引擎 - 核心库
// ==========================================
// 技术栈: Rust + calamine/csv + serde + tracing
// 系统定位: 货物路线分类 + 仓库出入库平衡核对
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分类与核对规则
pub mod engine;

// 导入层 - 外部表格
pub mod importer;

// 配置层 - 列结构/关键字/阈值
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Distribution, EventType, FlowCode, LocationCategory, Period};

// 领域实体
pub use domain::{
    CellValue, ClassificationOutput, ClassificationResult, GapIssue, GapReport, MonthlyBalance,
    Route, ShipmentRecord, WarehouseEvent,
};

// 引擎
pub use engine::{
    BalanceReconciler, FlowCodeResolver, FlowPipeline, FlowReport, GapAnalyzer,
    LocationClassifier, RouteExtractor, WarehouseMovementAggregator,
};

// 配置
pub use config::{EngineConfig, FlowScheme};

// 导入
pub use importer::{RecordMapper, UniversalFileParser, ValueNormalizer};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "HVDC Flow Code 引擎";
