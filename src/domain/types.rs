// ==========================================
// HVDC 物流 Flow Code 引擎 - 领域类型定义
// ==========================================
// 职责: 位置类别 / Flow Code / 事件类型 / 统计期间
// 红线: 纯值类型,不含业务判定逻辑
// ==========================================

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ==========================================
// 位置类别 (Location Category)
// ==========================================
// 派生值,不落库
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationCategory {
    Port,       // 港口
    Warehouse,  // 仓库
    Offshore,   // 海上基地 (MOSB)
    Site,       // 现场
    PreArrival, // 未到港
    Unknown,    // 无法识别
}

impl LocationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationCategory::Port => "port",
            LocationCategory::Warehouse => "warehouse",
            LocationCategory::Offshore => "offshore",
            LocationCategory::Site => "site",
            LocationCategory::PreArrival => "pre_arrival",
            LocationCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LocationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// Flow Code
// ==========================================
// 标准方案取值 0..=4; 扩展方案的取值 (6/30/31/32/99) 也能用同一类型承载
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlowCode(pub u8);

impl FlowCode {
    /// 未到港
    pub const PRE_ARRIVAL: FlowCode = FlowCode(0);
    /// 港口 → 现场 (直送)
    pub const DIRECT: FlowCode = FlowCode(1);
    /// 港口 → 仓库 → 现场
    pub const VIA_WAREHOUSE: FlowCode = FlowCode(2);
    /// 港口 → 仓库 → MOSB → 现场
    pub const VIA_WAREHOUSE_OFFSHORE: FlowCode = FlowCode(3);
    /// 港口 → 仓库 → 仓库 → MOSB → 现场
    pub const MULTI_WAREHOUSE_OFFSHORE: FlowCode = FlowCode(4);

    /// 标准方案的全部取值
    pub const CANONICAL: [FlowCode; 5] = [
        FlowCode::PRE_ARRIVAL,
        FlowCode::DIRECT,
        FlowCode::VIA_WAREHOUSE,
        FlowCode::VIA_WAREHOUSE_OFFSHORE,
        FlowCode::MULTI_WAREHOUSE_OFFSHORE,
    ];

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_canonical(&self) -> bool {
        self.0 <= 4
    }

    /// 中文描述,仅用于报表
    pub fn description(&self) -> &'static str {
        match self.0 {
            0 => "未到港",
            1 => "港口直送现场",
            2 => "经仓库到现场",
            3 => "经仓库和MOSB到现场",
            4 => "经多仓库和MOSB到现场",
            _ => "扩展代码",
        }
    }
}

impl fmt::Display for FlowCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Flow Code 分布: 代码 → 件数
pub type Distribution = BTreeMap<FlowCode, usize>;

// ==========================================
// 仓库事件类型 (Warehouse Event Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Inbound,  // 现场入库
    Outbound, // 仓库出库
    Transfer, // 仓库间调拨
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Inbound => write!(f, "inbound"),
            EventType::Outbound => write!(f, "outbound"),
            EventType::Transfer => write!(f, "transfer"),
        }
    }
}

// ==========================================
// 统计期间 (Period)
// ==========================================
// 年 + 月, 文本形式 YYYY-MM
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    /// 构造期间,月份非法时返回 None
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn from_datetime(ts: NaiveDateTime) -> Self {
        Self::from_date(ts.date())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("期间格式错误: {}（期望 YYYY-MM）", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("期间年份非法: {}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("期间月份非法: {}", s))?;
        Period::new(year, month).ok_or_else(|| format!("期间月份越界: {}", s))
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
