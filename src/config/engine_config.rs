// ==========================================
// HVDC 物流 Flow Code 引擎 - 引擎配置
// ==========================================
// 职责: 列结构 / 关键字表 / 阈值 / 分类方案
// 存储: JSON 文件 (可选,缺省值即标准部署)
// ==========================================

use crate::config::column_schema::ColumnSchema;
use crate::config::error::{ConfigError, ConfigResult};
use crate::config::keyword_table::KeywordTable;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ==========================================
// FlowScheme - Flow Code 分类方案
// ==========================================
// 每个部署只选一种方案,不混用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowScheme {
    #[default]
    Canonical, // 0..=4
}

// ==========================================
// Thresholds - 阈值
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// 月度平衡准确率低于该值时建议切换人工复核
    pub failsafe_accuracy: f64,
    /// Code 2 超出参考分布的件数阈值
    pub over_classification_gap: i64,
    pub confidence_floor: f64,
    pub pre_arrival_confidence: f64,
    pub malformed_confidence: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            failsafe_accuracy: 0.99,
            over_classification_gap: 1000,
            confidence_floor: 0.1,
            pre_arrival_confidence: 0.95,
            malformed_confidence: 0.5,
        }
    }
}

// ==========================================
// EngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub schema: ColumnSchema,
    pub keywords: KeywordTable,
    pub thresholds: Thresholds,
    pub scheme: FlowScheme,
}

impl EngineConfig {
    /// 从 JSON 文本加载并校验
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载并校验
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            warehouses = config.schema.warehouse_columns.len(),
            sites = config.schema.site_columns.len(),
            "引擎配置已加载"
        );
        Ok(config)
    }

    /// 语义校验
    pub fn validate(&self) -> ConfigResult<()> {
        let schema = &self.schema;
        if schema.case_id_column.trim().is_empty() {
            return Err(ConfigError::invalid("schema.case_id_column", "主键列名不能为空"));
        }
        if schema.warehouse_columns.is_empty() {
            return Err(ConfigError::invalid(
                "schema.warehouse_columns",
                "至少需要一个仓库列",
            ));
        }
        if schema.site_columns.is_empty() {
            return Err(ConfigError::invalid("schema.site_columns", "至少需要一个现场列"));
        }
        if schema.offshore_column.trim().is_empty() {
            return Err(ConfigError::invalid("schema.offshore_column", "MOSB 列名不能为空"));
        }
        if schema
            .warehouse_columns
            .iter()
            .any(|c| c.eq_ignore_ascii_case(&schema.offshore_column))
        {
            return Err(ConfigError::invalid(
                "schema.warehouse_columns",
                format!("{} 不能同时作为仓库列和 MOSB 列", schema.offshore_column),
            ));
        }

        let t = &self.thresholds;
        if !(0.0..=1.0).contains(&t.failsafe_accuracy) {
            return Err(ConfigError::invalid(
                "thresholds.failsafe_accuracy",
                format!("必须在 [0, 1] 内, 实际 {}", t.failsafe_accuracy),
            ));
        }
        if t.over_classification_gap < 0 {
            return Err(ConfigError::invalid(
                "thresholds.over_classification_gap",
                "不能为负数",
            ));
        }
        for (key, value) in [
            ("thresholds.confidence_floor", t.confidence_floor),
            ("thresholds.pre_arrival_confidence", t.pre_arrival_confidence),
            ("thresholds.malformed_confidence", t.malformed_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(
                    key,
                    format!("必须在 [0, 1] 内, 实际 {}", value),
                ));
            }
        }
        Ok(())
    }
}
