// ==========================================
// HVDC 物流 Flow Code 引擎 - 货物记录领域模型
// ==========================================
// 职责: 单元格值 + 货物记录 (一行一件)
// 红线: 导入时一次性解析列,加载后不可变
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// CellValue - 单元格值
// ==========================================
// 表格单元格的强类型表示; Error 对应电子表格错误单元格 (#N/A 等)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Error(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// 从可选字符串构造,None 视为空
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            Some(v) => CellValue::Text(v.to_string()),
            None => CellValue::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// 位置/仓库字段中出现的非预期类型
    ///
    /// 错误单元格和布尔值都不可能是位置名、日期或标记
    pub fn is_malformed(&self) -> bool {
        matches!(self, CellValue::Error(_) | CellValue::Bool(_))
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

// ==========================================
// ColumnValue - 具名列值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnValue {
    pub column: String,
    pub value: CellValue,
}

impl ColumnValue {
    pub fn new(column: impl Into<String>, value: CellValue) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

// ==========================================
// ShipmentRecord - 货物记录
// ==========================================
// 仓库列顺序 = 配置列顺序,不代表时间先后
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    // ===== 主键 =====
    pub case_id: String,

    // ===== 当前状态 =====
    pub location_raw: CellValue, // Status_Location
    pub status_raw: CellValue,   // Status_Current

    // ===== 节点时间戳/标记 =====
    pub warehouses: Vec<ColumnValue>,
    pub offshore: ColumnValue, // MOSB
    pub sites: Vec<ColumnValue>,
}

impl ShipmentRecord {
    /// 创建空记录 (默认 MOSB 列名)
    pub fn new(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            location_raw: CellValue::Empty,
            status_raw: CellValue::Empty,
            warehouses: Vec::new(),
            offshore: ColumnValue::new("MOSB", CellValue::Empty),
            sites: Vec::new(),
        }
    }

    pub fn with_location(mut self, value: impl Into<CellValue>) -> Self {
        self.location_raw = value.into();
        self
    }

    pub fn with_status(mut self, value: impl Into<CellValue>) -> Self {
        self.status_raw = value.into();
        self
    }

    pub fn with_warehouse(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.warehouses.push(ColumnValue::new(column, value.into()));
        self
    }

    pub fn with_offshore(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.offshore = ColumnValue::new(column, value.into());
        self
    }

    pub fn with_site(mut self, column: &str, value: impl Into<CellValue>) -> Self {
        self.sites.push(ColumnValue::new(column, value.into()));
        self
    }

    /// 列出含非预期类型的字段名 (空列表 = 记录完好)
    pub fn malformed_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if self.location_raw.is_malformed() {
            fields.push("location".to_string());
        }
        if self.status_raw.is_malformed() {
            fields.push("status".to_string());
        }
        for column in self
            .warehouses
            .iter()
            .chain(std::iter::once(&self.offshore))
            .chain(self.sites.iter())
        {
            if column.value.is_malformed() {
                fields.push(column.column.clone());
            }
        }
        fields
    }
}
