// ==========================================
// HVDC 物流 Flow Code 引擎 - 参考分布读取
// ==========================================
// 格式: JSON 对象 { "0": 71, "1": 255, "2": 1134, ... }
// ==========================================

use crate::domain::types::Distribution;
use crate::importer::error::{ImportError, ImportResult};
use std::fs;
use std::path::Path;

pub fn parse_reference_distribution(raw: &str) -> ImportResult<Distribution> {
    serde_json::from_str(raw).map_err(|e| ImportError::ReferenceFormatError(e.to_string()))
}

pub fn load_reference_distribution<P: AsRef<Path>>(path: P) -> ImportResult<Distribution> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    let raw = fs::read_to_string(path)?;
    parse_reference_distribution(&raw)
}
