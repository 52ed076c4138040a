// ==========================================
// HVDC 物流 Flow Code 引擎 - 位置关键字表
// ==========================================
// 职责: 每个位置类别的精选关键字 (唯一一份)
// ==========================================

use crate::domain::types::LocationCategory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTable {
    pub port: Vec<String>,
    pub warehouse: Vec<String>,
    pub offshore: Vec<String>,
    pub site: Vec<String>,
    pub pre_arrival: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self {
            port: owned(&["PORT", "JEBEL ALI", "KHALIFA PORT", "MINA ZAYED"]),
            warehouse: owned(&[
                "DSV INDOOR",
                "DSV OUTDOOR",
                "DSV AL MARKAZ",
                "DSV MZP",
                "HAULER INDOOR",
                "AAA STORAGE",
            ]),
            offshore: owned(&["MOSB", "MARINE BASE", "OFFSHORE BASE"]),
            site: owned(&["AGI", "DAS", "MIR", "SHU"]),
            pre_arrival: owned(&[
                "PRE ARRIVAL",
                "PRE-ARRIVAL",
                "PRE_ARRIVAL",
                "PREARRIVAL",
                "INBOUND_PENDING",
                "NOT_YET_RECEIVED",
            ]),
        }
    }
}

impl KeywordTable {
    /// 匹配优先级: 未到港 > 海上基地 > 仓库 > 港口 > 现场
    ///
    /// 现场代码很短,放最后以减少子串误判
    pub const PRIORITY: [LocationCategory; 5] = [
        LocationCategory::PreArrival,
        LocationCategory::Offshore,
        LocationCategory::Warehouse,
        LocationCategory::Port,
        LocationCategory::Site,
    ];

    pub fn keywords(&self, category: LocationCategory) -> &[String] {
        match category {
            LocationCategory::Port => &self.port,
            LocationCategory::Warehouse => &self.warehouse,
            LocationCategory::Offshore => &self.offshore,
            LocationCategory::Site => &self.site,
            LocationCategory::PreArrival => &self.pre_arrival,
            LocationCategory::Unknown => &[],
        }
    }

    /// 关键字统一为大写、单空格
    pub fn normalized(&self) -> Self {
        let norm = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .map(|w| w.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase())
                .filter(|w| !w.is_empty())
                .collect()
        };
        Self {
            port: norm(&self.port),
            warehouse: norm(&self.warehouse),
            offshore: norm(&self.offshore),
            site: norm(&self.site),
            pre_arrival: norm(&self.pre_arrival),
        }
    }
}
