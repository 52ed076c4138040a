// ==========================================
// HVDC 物流 Flow Code 引擎 - 列结构配置
// ==========================================
// 职责: 仓库/MOSB/现场列名 + 列名别名
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSchema {
    pub case_id_column: String,
    pub location_column: String,
    pub status_column: String,
    pub warehouse_columns: Vec<String>,
    pub offshore_column: String,
    pub site_columns: Vec<String>,
    /// 标准列名 → 源文件中可能出现的别名
    pub aliases: BTreeMap<String, Vec<String>>,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        let mut aliases = BTreeMap::new();
        aliases.insert(
            "Case No.".to_string(),
            vec!["Case No".to_string(), "CASE_NO".to_string(), "case_id".to_string()],
        );
        aliases.insert(
            "Status_Location".to_string(),
            vec!["Status Location".to_string(), "Location".to_string()],
        );
        aliases.insert(
            "Status_Current".to_string(),
            vec!["Status Current".to_string(), "Status".to_string()],
        );
        aliases.insert(
            "DSV Al Markaz".to_string(),
            vec!["DSV AL MARKAZ".to_string(), "DSV Markaz".to_string()],
        );
        aliases.insert(
            "Hauler Indoor".to_string(),
            vec!["Hauler_Indoor".to_string()],
        );

        Self {
            case_id_column: "Case No.".to_string(),
            location_column: "Status_Location".to_string(),
            status_column: "Status_Current".to_string(),
            warehouse_columns: vec![
                "DSV Indoor".to_string(),
                "DSV Al Markaz".to_string(),
                "DSV Outdoor".to_string(),
                "AAA Storage".to_string(),
                "Hauler Indoor".to_string(),
                "DSV MZP".to_string(),
            ],
            offshore_column: "MOSB".to_string(),
            site_columns: vec![
                "AGI".to_string(),
                "DAS".to_string(),
                "MIR".to_string(),
                "SHU".to_string(),
            ],
            aliases,
        }
    }
}

impl ColumnSchema {
    /// 返回标准列名及其全部别名 (标准名在前)
    pub fn candidates<'a>(&'a self, column: &'a str) -> Vec<&'a str> {
        let mut names = vec![column];
        if let Some(extra) = self.aliases.get(column) {
            names.extend(extra.iter().map(String::as_str));
        }
        names
    }

    /// 全部需要解析的列 (主键、状态、节点)
    pub fn all_columns(&self) -> Vec<&str> {
        let mut columns = vec![
            self.case_id_column.as_str(),
            self.location_column.as_str(),
            self.status_column.as_str(),
        ];
        columns.extend(self.warehouse_columns.iter().map(String::as_str));
        columns.push(self.offshore_column.as_str());
        columns.extend(self.site_columns.iter().map(String::as_str));
        columns
    }
}
