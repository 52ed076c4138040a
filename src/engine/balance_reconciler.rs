// ==========================================
// HVDC 物流 Flow Code 引擎 - 出入库平衡核对
// ==========================================
// 职责: 按月校验 仓库出库 + 直送 == 现场入库
// 输出: MonthlyBalance (needs_failsafe 仅为建议,不中断)
// 红线: 核对入口不报错、不中断
// ==========================================

use crate::domain::movement::{MonthlyBalance, WarehouseEvent};
use crate::domain::types::{EventType, Period};
use std::collections::BTreeSet;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct BalanceReconciler {
    failsafe_accuracy: f64,
}

impl Default for BalanceReconciler {
    fn default() -> Self {
        Self::new(0.99)
    }
}

impl BalanceReconciler {
    pub fn new(failsafe_accuracy: f64) -> Self {
        Self { failsafe_accuracy }
    }

    /// 单期核对
    ///
    /// - warehouse_outbound_count: 出库数扣除同期调拨 (调拨后仍在仓库网络内)
    /// - accuracy = 1 - |supply - demand| / max(demand, 1),下限 0
    pub fn reconcile(&self, events: &[WarehouseEvent], period: Period) -> MonthlyBalance {
        let mut outbound = 0usize;
        let mut transfers = 0usize;
        let mut direct = 0usize;
        let mut inbound = 0usize;

        for event in events.iter().filter(|e| e.month == period) {
            match event.event_type {
                EventType::Outbound => outbound += 1,
                EventType::Transfer => transfers += 1,
                EventType::Inbound => {
                    inbound += 1;
                    if event.direct_delivery {
                        direct += 1;
                    }
                }
            }
        }

        let warehouse_outbound = outbound.saturating_sub(transfers);
        let supply = (warehouse_outbound + direct) as i64;
        let demand = inbound as i64;
        let gap = supply - demand;
        let accuracy = (1.0 - gap.unsigned_abs() as f64 / demand.max(1) as f64).max(0.0);
        let needs_failsafe = accuracy < self.failsafe_accuracy;

        if needs_failsafe {
            tracing::warn!(
                period = %period,
                supply,
                demand,
                gap,
                accuracy,
                "出入库不平衡, 建议切换人工复核 (ZERO 模式)"
            );
        } else {
            tracing::debug!(period = %period, supply, demand, accuracy, "出入库平衡");
        }

        MonthlyBalance {
            month: period,
            warehouse_outbound_count: warehouse_outbound,
            direct_delivery_count: direct,
            site_inbound_count: inbound,
            transfer_count: transfers,
            gap,
            accuracy,
            needs_failsafe,
        }
    }

    /// 全部期间核对,按期间升序
    #[instrument(skip(self, events), fields(count = events.len()))]
    pub fn reconcile_all(&self, events: &[WarehouseEvent]) -> Vec<MonthlyBalance> {
        let periods: BTreeSet<Period> = events.iter().map(|e| e.month).collect();
        periods
            .into_iter()
            .map(|period| self.reconcile(events, period))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan() -> Period {
        Period::new(2024, 1).unwrap()
    }

    fn event(item: &str, location: &str, event_type: EventType, direct: bool) -> WarehouseEvent {
        WarehouseEvent {
            item_id: item.to_string(),
            location_name: location.to_string(),
            event_type,
            month: jan(),
            direct_delivery: direct,
        }
    }

    #[test]
    fn test_balanced_month() {
        let mut events = Vec::new();
        for i in 0..10 {
            let item = format!("HE-{:03}", i);
            events.push(event(&item, "DSV Indoor", EventType::Outbound, false));
            events.push(event(&item, "AGI", EventType::Inbound, false));
        }

        let balance = BalanceReconciler::default().reconcile(&events, jan());
        assert_eq!(balance.warehouse_outbound_count, 10);
        assert_eq!(balance.site_inbound_count, 10);
        assert_eq!(balance.direct_delivery_count, 0);
        assert_eq!(balance.accuracy, 1.0);
        assert!(!balance.needs_failsafe);
    }

    #[test]
    fn test_direct_deliveries_balance() {
        let events = vec![
            event("A", "DSV Indoor", EventType::Outbound, false),
            event("A", "AGI", EventType::Inbound, false),
            event("B", "DAS", EventType::Inbound, true),
        ];

        let balance = BalanceReconciler::default().reconcile(&events, jan());
        assert_eq!(balance.supply(), 2);
        assert_eq!(balance.demand(), 2);
        assert!(balance.is_balanced());
    }

    #[test]
    fn test_transfers_netted_out() {
        let events = vec![
            event("A", "DSV Indoor", EventType::Outbound, false),
            event("A", "DSV Outdoor", EventType::Outbound, false),
            event("A", "DSV Outdoor", EventType::Transfer, false),
            event("A", "AGI", EventType::Inbound, false),
        ];

        let balance = BalanceReconciler::default().reconcile(&events, jan());
        assert_eq!(balance.warehouse_outbound_count, 1);
        assert_eq!(balance.transfer_count, 1);
        assert_eq!(balance.accuracy, 1.0);
    }

    #[test]
    fn test_imbalance_sets_failsafe_without_error() {
        let mut events = Vec::new();
        for i in 0..100 {
            events.push(event(&format!("I{}", i), "AGI", EventType::Inbound, false));
        }
        for i in 0..98 {
            events.push(event(&format!("I{}", i), "DSV Indoor", EventType::Outbound, false));
        }

        let balance = BalanceReconciler::default().reconcile(&events, jan());
        assert_eq!(balance.gap, -2);
        assert!((balance.accuracy - 0.98).abs() < 1e-9);
        assert!(balance.needs_failsafe);
    }

    #[test]
    fn test_empty_period_and_accuracy_floor() {
        let reconciler = BalanceReconciler::default();
        let empty = reconciler.reconcile(&[], jan());
        assert_eq!(empty.accuracy, 1.0);
        assert!(!empty.needs_failsafe);

        // 只有出库没有入库: 准确率不低于 0
        let events = vec![
            event("A", "DSV Indoor", EventType::Outbound, false),
            event("B", "DSV Indoor", EventType::Outbound, false),
        ];
        let balance = reconciler.reconcile(&events, jan());
        assert_eq!(balance.accuracy, 0.0);
        assert!(balance.needs_failsafe);
    }

    #[test]
    fn test_reconcile_all_orders_periods() {
        let mut feb = event("B", "AGI", EventType::Inbound, true);
        feb.month = Period::new(2024, 2).unwrap();
        let events = vec![feb, event("A", "AGI", EventType::Inbound, true)];

        let balances = BalanceReconciler::default().reconcile_all(&events);
        let months: Vec<String> = balances.iter().map(|b| b.month.to_string()).collect();
        assert_eq!(months, vec!["2024-01", "2024-02"]);
        assert!(balances.iter().all(|b| !b.needs_failsafe));
    }
}
