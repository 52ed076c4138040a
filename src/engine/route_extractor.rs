// ==========================================
// HVDC 物流 Flow Code 引擎 - 路线提取器
// ==========================================
// 职责: 单条记录 → Route
// 规则: 仓库列只计存在次数,不代表时间顺序
// 红线: 无仓库/MOSB/现场数据时仍返回 [port, site] (默认直送)
// ==========================================

use crate::domain::classification::Route;
use crate::domain::shipment::ShipmentRecord;
use crate::domain::types::LocationCategory;
use crate::engine::location_classifier::LocationClassifier;
use crate::importer::ValueNormalizer;

#[derive(Debug, Clone, Default)]
pub struct RouteExtractor {
    classifier: LocationClassifier,
}

impl RouteExtractor {
    pub fn new(classifier: LocationClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &LocationClassifier {
        &self.classifier
    }

    pub fn extract(&self, record: &ShipmentRecord) -> Route {
        // 1. 未到港短路
        if self.classifier.classify(&record.location_raw) == LocationCategory::PreArrival {
            return Route::pre_arrival();
        }

        // 2. 起点港口
        let mut route = Route::from_tokens(vec![LocationCategory::Port]);

        // 3. 每个有效仓库列一个 warehouse
        for column in &record.warehouses {
            if ValueNormalizer::is_valid(&column.value) {
                route.push(LocationCategory::Warehouse);
            }
        }

        // 4. MOSB
        if ValueNormalizer::is_valid(&record.offshore.value) {
            route.push(LocationCategory::Offshore);
        }

        // 5. 终点现场 (无条件)
        route.push(LocationCategory::Site);
        route
    }
}
