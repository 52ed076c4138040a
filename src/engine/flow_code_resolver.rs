// ==========================================
// HVDC 物流 Flow Code 引擎 - Flow Code 判定
// ==========================================
// 职责: Route → Flow Code + 置信度
// 顺序: 未到港 > 标准模式精确匹配 > 兜底规则 (先中先得)
// ==========================================

use crate::config::{FlowScheme, Thresholds};
use crate::domain::classification::Route;
use crate::domain::shipment::ShipmentRecord;
use crate::domain::types::LocationCategory::{Offshore, Port, Site, Warehouse};
use crate::domain::types::{FlowCode, LocationCategory};
use crate::importer::ValueNormalizer;

/// 标准模式表
const CANONICAL_PATTERNS: [(&[LocationCategory], FlowCode); 4] = [
    (&[Port, Site], FlowCode::DIRECT),
    (&[Port, Warehouse, Site], FlowCode::VIA_WAREHOUSE),
    (&[Port, Warehouse, Offshore, Site], FlowCode::VIA_WAREHOUSE_OFFSHORE),
    (
        &[Port, Warehouse, Warehouse, Offshore, Site],
        FlowCode::MULTI_WAREHOUSE_OFFSHORE,
    ),
];

#[derive(Debug, Clone)]
pub struct FlowCodeResolver {
    scheme: FlowScheme,
    thresholds: Thresholds,
}

impl Default for FlowCodeResolver {
    fn default() -> Self {
        Self::new(FlowScheme::default(), Thresholds::default())
    }
}

impl FlowCodeResolver {
    pub fn new(scheme: FlowScheme, thresholds: Thresholds) -> Self {
        Self { scheme, thresholds }
    }

    /// 判定 Flow Code,同时返回路线文本
    pub fn resolve(&self, route: &Route) -> (FlowCode, String) {
        let code = match self.scheme {
            FlowScheme::Canonical => Self::resolve_canonical(route),
        };
        (code, route.route_string())
    }

    fn resolve_canonical(route: &Route) -> FlowCode {
        // 1. 未到港
        if route.contains(LocationCategory::PreArrival) {
            return FlowCode::PRE_ARRIVAL;
        }

        // 2. 精确模式
        if let Some((_, code)) = CANONICAL_PATTERNS
            .iter()
            .find(|(pattern, _)| *pattern == route.tokens())
        {
            return *code;
        }

        // 3. 兜底
        let wh_count = route.warehouse_handling();
        let has_offshore = route.has_offshore();
        match (route.len(), wh_count, has_offshore) {
            (2, 0, false) => FlowCode::DIRECT,
            (_, n, false) if n > 0 => FlowCode::VIA_WAREHOUSE,
            (_, 1, true) => FlowCode::VIA_WAREHOUSE_OFFSHORE,
            (_, n, true) if n >= 2 => FlowCode::MULTI_WAREHOUSE_OFFSHORE,
            // 已知会导致 Code 2 过度归类,语义待业务确认前保持不变
            _ => FlowCode::VIA_WAREHOUSE,
        }
    }

    /// 置信度 [confidence_floor, 1.0]
    pub fn confidence(&self, record: &ShipmentRecord, route: &Route, flow_code: FlowCode) -> f64 {
        let mut confidence: f64 = 1.0;

        if !ValueNormalizer::is_valid(&record.location_raw) {
            confidence -= 0.3;
        }
        if !ValueNormalizer::is_valid(&record.status_raw) {
            confidence -= 0.2;
        }
        if route.len() < 2 {
            confidence -= 0.2;
        }
        if flow_code == FlowCode::PRE_ARRIVAL {
            confidence = confidence.max(self.thresholds.pre_arrival_confidence);
        }

        confidence.clamp(self.thresholds.confidence_floor, 1.0)
    }
}
