// ==========================================
// HVDC 物流 Flow Code 引擎 - 分布差异分析
// ==========================================
// 职责: 本次分类分布 vs 外部参考分布 → GapReport
// 诊断: 未计算的代码 / Code 2 过度归类 / 月度平衡失效
// ==========================================

use crate::domain::movement::{GapEntry, GapIssue, GapReport, MonthlyBalance};
use crate::domain::types::{Distribution, FlowCode};

#[derive(Debug, Clone)]
pub struct GapAnalyzer {
    over_classification_gap: i64,
}

impl Default for GapAnalyzer {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl GapAnalyzer {
    pub fn new(over_classification_gap: i64) -> Self {
        Self {
            over_classification_gap,
        }
    }

    /// 逐代码比较; 标准代码全部列出, 扩展代码仅在任一侧出现时列出
    pub fn compare(&self, actual: &Distribution, reference: &Distribution) -> GapReport {
        let max_code = FlowCode::CANONICAL
            .iter()
            .chain(actual.keys())
            .chain(reference.keys())
            .map(FlowCode::value)
            .max()
            .unwrap_or(0);

        let mut report = GapReport::default();

        for value in 0..=max_code {
            let code = FlowCode(value);
            let actual_count = actual.get(&code).copied().unwrap_or(0);
            let reported_count = reference.get(&code).copied().unwrap_or(0);
            let gap = actual_count as i64 - reported_count as i64;
            let gap_pct = if reported_count == 0 {
                0.0
            } else {
                gap as f64 / reported_count as f64 * 100.0
            };

            // 两侧都没有的扩展代码不列出
            if !code.is_canonical() && actual_count == 0 && reported_count == 0 {
                continue;
            }

            if reported_count > 0 && actual_count == 0 {
                report.issues.push(GapIssue::Uncomputed {
                    code,
                    reference: reported_count,
                });
            }
            if code == FlowCode::VIA_WAREHOUSE && gap > self.over_classification_gap {
                report.issues.push(GapIssue::OverClassified { code, gap });
            }

            report.entries.push(GapEntry {
                code,
                reported_count,
                actual_count,
                gap,
                gap_pct,
            });
        }

        for issue in &report.issues {
            tracing::warn!(issue = %issue, "分布差异诊断");
        }
        report
    }

    /// 分布比较 + 月度平衡诊断
    pub fn compare_with_balance(
        &self,
        actual: &Distribution,
        reference: &Distribution,
        balances: &[MonthlyBalance],
    ) -> GapReport {
        let mut report = self.compare(actual, reference);
        report.issues.extend(
            balances
                .iter()
                .filter(|b| b.needs_failsafe)
                .map(|b| GapIssue::BalanceFailsafe {
                    month: b.month,
                    accuracy: b.accuracy,
                    gap: b.gap,
                }),
        );
        report
    }
}
