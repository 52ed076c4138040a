// ==========================================
// HVDC 物流 Flow Code 引擎 - 引擎层
// ==========================================
// 职责: 位置分类 / 路线提取 / Flow Code 判定 /
//       出入库汇总 / 平衡核对 / 分布差异
// 红线: 不读文件,不写表格; 入口不向外抛错误
// ==========================================

pub mod balance_reconciler;
pub mod flow_code_resolver;
pub mod flow_pipeline;
pub mod gap_analyzer;
pub mod location_classifier;
pub mod movement_aggregator;
pub mod route_extractor;

// 重导出核心引擎
pub use balance_reconciler::BalanceReconciler;
pub use flow_code_resolver::FlowCodeResolver;
pub use flow_pipeline::{FlowPipeline, FlowReport};
pub use gap_analyzer::GapAnalyzer;
pub use location_classifier::LocationClassifier;
pub use movement_aggregator::{MovementLedger, WarehouseMovementAggregator};
pub use route_extractor::RouteExtractor;
