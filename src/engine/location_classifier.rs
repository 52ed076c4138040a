// ==========================================
// HVDC 物流 Flow Code 引擎 - 位置分类器
// ==========================================
// 职责: 原始位置文本 → LocationCategory
// 顺序: 精确匹配 > 子串匹配 > 启发式 > unknown (先中先得)
// 红线: 纯函数,无副作用
// ==========================================

use crate::config::KeywordTable;
use crate::domain::shipment::CellValue;
use crate::domain::types::LocationCategory;
use crate::importer::ValueNormalizer;

/// 启发式关键字 (步骤 4),按顺序判定
const HEURISTICS: [(LocationCategory, &[&str]); 3] = [
    (LocationCategory::Warehouse, &["WAREHOUSE", "WH", "STORAGE"]),
    (LocationCategory::Site, &["SITE", "PLANT"]),
    (LocationCategory::Offshore, &["OFFSHORE", "MARINE"]),
];

#[derive(Debug, Clone)]
pub struct LocationClassifier {
    keywords: KeywordTable, // 已标准化 (大写)
}

impl Default for LocationClassifier {
    fn default() -> Self {
        Self::new(&KeywordTable::default())
    }
}

impl LocationClassifier {
    pub fn new(keywords: &KeywordTable) -> Self {
        Self {
            keywords: keywords.normalized(),
        }
    }

    pub fn classify(&self, raw_location: &CellValue) -> LocationCategory {
        self.classify_str(&ValueNormalizer::clean(raw_location))
    }

    pub fn classify_str(&self, raw_location: &str) -> LocationCategory {
        // 1. 标准化
        let cleaned = ValueNormalizer::clean_str(raw_location);
        if !ValueNormalizer::is_valid_str(&cleaned) {
            return LocationCategory::Unknown;
        }
        let upper = cleaned.to_uppercase();

        // 2. 精确匹配
        for category in KeywordTable::PRIORITY {
            if self.keywords.keywords(category).iter().any(|k| *k == upper) {
                return category;
            }
        }

        // 3. 子串匹配
        for category in KeywordTable::PRIORITY {
            if self
                .keywords
                .keywords(category)
                .iter()
                .any(|k| upper.contains(k.as_str()))
            {
                return category;
            }
        }

        // 4. 启发式
        for (category, words) in HEURISTICS {
            if words.iter().any(|w| upper.contains(w)) {
                return category;
            }
        }

        LocationCategory::Unknown
    }
}
