// ==========================================
// HVDC 物流 Flow Code 引擎 - 仓库出入库模型
// ==========================================
// 职责: 仓库事件 + 月度平衡 + 差异报告
// 红线: 派生数据,每次核对重新计算,不持久化
// ==========================================

use crate::domain::types::{EventType, FlowCode, Period};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// WarehouseEvent - 仓库事件
// ==========================================
// 去重: 同一 (item, location, event_type) 每次运行至多一条
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WarehouseEvent {
    pub item_id: String,
    pub location_name: String, // 出库/调拨为仓库名,入库为现场名
    pub event_type: EventType,
    pub month: Period,
    pub direct_delivery: bool, // 仅入库: 港口直送现场,未经仓库
}

// ==========================================
// MonthlyBalance - 月度平衡
// ==========================================
// 不变量: warehouse_outbound_count + direct_delivery_count == site_inbound_count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBalance {
    pub month: Period,
    pub warehouse_outbound_count: usize, // 已扣除仓库间调拨
    pub direct_delivery_count: usize,
    pub site_inbound_count: usize,
    pub transfer_count: usize,
    pub gap: i64, // supply - demand
    /// 1 - |gap| / max(demand, 1), 下限为 0 (供给远超需求时报 0 而非负数)
    pub accuracy: f64,
    pub needs_failsafe: bool,
}

impl MonthlyBalance {
    pub fn supply(&self) -> usize {
        self.warehouse_outbound_count + self.direct_delivery_count
    }

    pub fn demand(&self) -> usize {
        self.site_inbound_count
    }

    pub fn is_balanced(&self) -> bool {
        self.gap == 0
    }
}

// ==========================================
// GapEntry / GapIssue / GapReport - 分布差异
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapEntry {
    pub code: FlowCode,
    pub reported_count: usize, // 参考分布
    pub actual_count: usize,   // 本次分类结果
    pub gap: i64,
    pub gap_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GapIssue {
    /// 参考分布有值而本次结果为 0
    Uncomputed { code: FlowCode, reference: usize },
    /// 兜底分支导致的过度归类
    OverClassified { code: FlowCode, gap: i64 },
    /// 月度平衡需要切换人工复核
    BalanceFailsafe {
        month: Period,
        accuracy: f64,
        gap: i64,
    },
}

impl fmt::Display for GapIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapIssue::Uncomputed { code, reference } => write!(
                f,
                "Code {} uncomputed (reference {}, actual 0)",
                code, reference
            ),
            GapIssue::OverClassified { code, gap } => {
                write!(f, "Code {} over-classified (+{})", code, gap)
            }
            GapIssue::BalanceFailsafe {
                month,
                accuracy,
                gap,
            } => write!(
                f,
                "Balance {} needs failsafe (accuracy {:.4}, gap {})",
                month, accuracy, gap
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapReport {
    pub entries: Vec<GapEntry>,
    pub issues: Vec<GapIssue>,
}

impl GapReport {
    pub fn entry(&self, code: FlowCode) -> Option<&GapEntry> {
        self.entries.iter().find(|e| e.code == code)
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// 问题列表的文本形式
    pub fn issue_messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.to_string()).collect()
    }
}
