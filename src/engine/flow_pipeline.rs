// ==========================================
// HVDC 物流 Flow Code 引擎 - 批处理编排器
// ==========================================
// 用途: 协调分类、出入库汇总、平衡核对、差异分析
// 流程: 记录 → 路线 → Flow Code (逐条)
//       全量 → 事件 → 月度平衡
//       分布 + 平衡 → 差异报告
// 红线: 批次一定跑完,每条输入记录一定有结果
// ==========================================

use crate::config::EngineConfig;
use crate::domain::classification::{ClassificationOutput, ClassificationResult, Route};
use crate::domain::movement::{GapReport, MonthlyBalance, WarehouseEvent};
use crate::domain::shipment::ShipmentRecord;
use crate::domain::types::{Distribution, FlowCode, LocationCategory};
use crate::engine::{
    BalanceReconciler, FlowCodeResolver, GapAnalyzer, LocationClassifier, RouteExtractor,
    WarehouseMovementAggregator,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// FlowReport - 批次结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub record_count: usize,
    pub malformed_count: usize,
    pub classifications: Vec<ClassificationOutput>,
    pub distribution: Distribution,
    pub event_count: usize,
    pub balances: Vec<MonthlyBalance>,
    pub gap_report: Option<GapReport>,
}

impl FlowReport {
    /// 任一期间需要人工复核
    pub fn needs_failsafe(&self) -> bool {
        self.balances.iter().any(|b| b.needs_failsafe)
    }
}

// ==========================================
// FlowPipeline - 批处理编排器
// ==========================================
#[derive(Debug, Clone)]
pub struct FlowPipeline {
    extractor: RouteExtractor,
    resolver: FlowCodeResolver,
    aggregator: WarehouseMovementAggregator,
    reconciler: BalanceReconciler,
    analyzer: GapAnalyzer,
    malformed_confidence: f64,
}

impl Default for FlowPipeline {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl FlowPipeline {
    pub fn new(config: &EngineConfig) -> Self {
        let thresholds = &config.thresholds;
        Self {
            extractor: RouteExtractor::new(LocationClassifier::new(&config.keywords)),
            resolver: FlowCodeResolver::new(config.scheme, thresholds.clone()),
            aggregator: WarehouseMovementAggregator::new(),
            reconciler: BalanceReconciler::new(thresholds.failsafe_accuracy),
            analyzer: GapAnalyzer::new(thresholds.over_classification_gap),
            malformed_confidence: thresholds.malformed_confidence,
        }
    }

    /// 单条记录分类
    ///
    /// 含非预期类型字段的记录按默认直送处理: code 1, [port, site], 置信度 0.5
    pub fn classify_record(&self, record: &ShipmentRecord) -> ClassificationResult {
        let malformed = record.malformed_fields();
        if !malformed.is_empty() {
            warn!(
                case_id = %record.case_id,
                fields = ?malformed,
                "记录字段类型异常, 按默认直送处理"
            );
            return ClassificationResult {
                flow_code: FlowCode::DIRECT,
                route: Route::from_tokens(vec![LocationCategory::Port, LocationCategory::Site]),
                confidence: self.malformed_confidence,
                location_category: LocationCategory::Unknown,
            };
        }

        let route = self.extractor.extract(record);
        let (flow_code, _) = self.resolver.resolve(&route);
        let confidence = self.resolver.confidence(record, &route, flow_code);
        let location_category = self.location_category(record);

        debug!(
            case_id = %record.case_id,
            flow_code = %flow_code,
            route = %route.route_string(),
            confidence,
            "记录分类完成"
        );

        ClassificationResult {
            flow_code,
            route,
            confidence,
            location_category,
        }
    }

    /// 当前位置类别; Status_Location 无法识别时退回状态字段
    fn location_category(&self, record: &ShipmentRecord) -> LocationCategory {
        let classifier = self.extractor.classifier();
        match classifier.classify(&record.location_raw) {
            LocationCategory::Unknown => classifier.classify(&record.status_raw),
            category => category,
        }
    }

    /// 批量分类,输出顺序与输入一致
    #[instrument(skip(self, records), fields(count = records.len()))]
    pub fn classify_batch(&self, records: &[ShipmentRecord]) -> Vec<ClassificationOutput> {
        records
            .iter()
            .map(|r| ClassificationOutput::from_result(&r.case_id, &self.classify_record(r)))
            .collect()
    }

    /// 分类结果 → 分布
    pub fn distribution(outputs: &[ClassificationOutput]) -> Distribution {
        let mut distribution = Distribution::new();
        for output in outputs {
            *distribution.entry(output.flow_code).or_insert(0) += 1;
        }
        distribution
    }

    pub fn aggregate_events(&self, records: &[ShipmentRecord]) -> Vec<WarehouseEvent> {
        self.aggregator.aggregate(records)
    }

    pub fn reconcile(&self, events: &[WarehouseEvent]) -> Vec<MonthlyBalance> {
        self.reconciler.reconcile_all(events)
    }

    /// 完整批处理
    ///
    /// # 参数
    /// - records: 货物记录 (调用方持有)
    /// - reference: 外部参考分布; None 时不做差异分析
    #[instrument(skip(self, records, reference), fields(count = records.len()))]
    pub fn run(&self, records: &[ShipmentRecord], reference: Option<&Distribution>) -> FlowReport {
        let run_id = Uuid::new_v4();
        info!(run_id = %run_id, records = records.len(), "开始 Flow Code 批处理");

        // 步骤1: 逐条分类
        let classifications = self.classify_batch(records);
        let malformed_count = records
            .iter()
            .filter(|r| !r.malformed_fields().is_empty())
            .count();
        let distribution = Self::distribution(&classifications);

        // 步骤2: 出入库事件
        let events = self.aggregate_events(records);

        // 步骤3: 月度平衡
        let balances = self.reconcile(&events);

        // 步骤4: 差异分析
        let gap_report = reference.map(|reference| {
            self.analyzer.compare_with_balance(&distribution, reference, &balances)
        });

        let report = FlowReport {
            run_id,
            generated_at: Utc::now(),
            record_count: records.len(),
            malformed_count,
            classifications,
            distribution,
            event_count: events.len(),
            balances,
            gap_report,
        };

        info!(
            run_id = %run_id,
            malformed = report.malformed_count,
            events = report.event_count,
            periods = report.balances.len(),
            needs_failsafe = report.needs_failsafe(),
            "Flow Code 批处理完成"
        );
        report
    }
}
