// ==========================================
// HVDC 物流 Flow Code 引擎 - 路线与分类结果
// ==========================================
// 职责: Route (位置类别序列) + 单条记录分类结果
// ==========================================

use crate::domain::types::{FlowCode, LocationCategory};
use serde::{Deserialize, Serialize};

// ==========================================
// Route - 路线
// ==========================================
// 不变量: 恰为 [pre_arrival],或以 port 开头、以 site 结尾
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(Vec<LocationCategory>);

impl Route {
    /// 未到港路线
    pub fn pre_arrival() -> Self {
        Route(vec![LocationCategory::PreArrival])
    }

    /// 从类别序列构造 (调用方负责不变量)
    pub fn from_tokens(tokens: Vec<LocationCategory>) -> Self {
        Route(tokens)
    }

    pub fn tokens(&self) -> &[LocationCategory] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, category: LocationCategory) -> bool {
        self.0.contains(&category)
    }

    pub fn count(&self, category: LocationCategory) -> usize {
        self.0.iter().filter(|c| **c == category).count()
    }

    /// WH_HANDLING: 仓库经手次数
    pub fn warehouse_handling(&self) -> usize {
        self.count(LocationCategory::Warehouse)
    }

    pub fn has_offshore(&self) -> bool {
        self.contains(LocationCategory::Offshore)
    }

    /// 文本形式,如 "port → warehouse → site"
    pub fn route_string(&self) -> String {
        self.0
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(" → ")
    }

    pub(crate) fn push(&mut self, category: LocationCategory) {
        self.0.push(category);
    }
}

// ==========================================
// ClassificationResult - 分类结果
// ==========================================
// 每条记录生成一次,只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub flow_code: FlowCode,
    pub route: Route,
    pub confidence: f64, // [0.1, 1.0]
    pub location_category: LocationCategory,
}

// ==========================================
// ClassificationOutput - 对外输出行
// ==========================================
// 报表/可视化协作方消费的扁平结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationOutput {
    pub case_id: String,
    pub flow_code: FlowCode,
    pub flow_description: String,
    pub route_string: String,
    pub location_category: LocationCategory,
    pub confidence: f64,
    pub wh_handling: usize,
}

impl ClassificationOutput {
    pub fn from_result(case_id: &str, result: &ClassificationResult) -> Self {
        Self {
            case_id: case_id.to_string(),
            flow_code: result.flow_code,
            flow_description: result.flow_code.description().to_string(),
            route_string: result.route.route_string(),
            location_category: result.location_category,
            confidence: result.confidence,
            wh_handling: result.route.warehouse_handling(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LocationCategory::*;

    #[test]
    fn test_route_string_and_handling() {
        let route = Route::from_tokens(vec![Port, Warehouse, Warehouse, Offshore, Site]);
        assert_eq!(
            route.route_string(),
            "port → warehouse → warehouse → offshore → site"
        );
        assert_eq!(route.warehouse_handling(), 2);
        assert!(route.has_offshore());
    }

    #[test]
    fn test_output_row_carries_description_and_handling() {
        let result = ClassificationResult {
            flow_code: FlowCode::VIA_WAREHOUSE_OFFSHORE,
            route: Route::from_tokens(vec![Port, Warehouse, Offshore, Site]),
            confidence: 0.8,
            location_category: Offshore,
        };
        let output = ClassificationOutput::from_result("HE-001", &result);
        assert_eq!(output.flow_description, "经仓库和MOSB到现场");
        assert_eq!(output.route_string, "port → warehouse → offshore → site");
        assert_eq!(output.wh_handling, 1);
    }

    #[test]
    fn test_route_serializes_as_list() {
        let json = serde_json::to_string(&Route::pre_arrival()).unwrap();
        assert_eq!(json, r#"["pre_arrival"]"#);
    }
}
