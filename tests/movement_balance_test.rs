// ==========================================
// 出入库汇总 / 平衡核对 / 分布差异 集成测试
// ==========================================
// 测试目标: 验证事件去重、月度平衡公式、差异诊断
// 覆盖范围: 多仓库去重 / 平衡月份 / 跨月滞后 / 未计算代码 / Code 2 过度归类
// ==========================================


use hvdc_flow_code::domain::movement::GapIssue;
use hvdc_flow_code::domain::types::{EventType, FlowCode, Period};
use hvdc_flow_code::engine::{
    BalanceReconciler, GapAnalyzer, MovementLedger, WarehouseMovementAggregator,
};
use test_helpers::{direct_item, distribution, via_warehouse_item, ShipmentBuilder};

fn period(year: i32, month: u32) -> Period {
    Period::new(year, month).unwrap()
}

// ==========================================
// 事件去重
// ==========================================

#[test]
fn test_three_warehouses_count_once_each() {
    let record = ShipmentBuilder::new("HE-0100")
        .location("SHU")
        .warehouse("DSV Indoor", "2024-01-02")
        .warehouse("DSV Outdoor", "2024-01-08")
        .warehouse("DSV MZP", "2024-01-15")
        .site("SHU", "2024-01-25")
        .build();

    let aggregator = WarehouseMovementAggregator::new();
    let mut ledger = MovementLedger::new();
    let added = aggregator.aggregate_into(std::slice::from_ref(&record), &mut ledger);
    assert_eq!(added, 3 + 2 + 1);

    // 重复汇总同一批次不新增事件
    let added_again = aggregator.aggregate_into(&[record], &mut ledger);
    assert_eq!(added_again, 0);

    let outbound: Vec<_> = ledger
        .events()
        .iter()
        .filter(|e| e.event_type == EventType::Outbound)
        .collect();
    assert_eq!(outbound.len(), 3);
    assert!(outbound.iter().all(|e| e.item_id == "HE-0100"));

    // 调拨扣除后,该件货物在供给侧只计一次
    let balance = BalanceReconciler::default().reconcile(ledger.events(), period(2024, 1));
    assert_eq!(balance.warehouse_outbound_count, 1);
    assert_eq!(balance.transfer_count, 2);
    assert_eq!(balance.site_inbound_count, 1);
    assert_eq!(balance.gap, 0);
    assert!(balance.is_balanced());
}

// ==========================================
// 月度平衡
// ==========================================

#[test]
fn test_january_ten_items_balanced() {
    let mut records = Vec::new();
    for i in 0..5 {
        records.push(via_warehouse_item(
            &format!("HE-W{:02}", i),
            "DSV Indoor",
            "2024-01-03",
            "AGI",
            "2024-01-20",
        ));
        records.push(direct_item(&format!("HE-D{:02}", i), "MIR", "2024-01-10"));
    }

    let events = WarehouseMovementAggregator::new().aggregate(&records);
    let balances = BalanceReconciler::default().reconcile_all(&events);
    assert_eq!(balances.len(), 1);

    let january = &balances[0];
    assert_eq!(january.month, period(2024, 1));
    assert_eq!(january.warehouse_outbound_count, 5);
    assert_eq!(january.direct_delivery_count, 5);
    assert_eq!(january.site_inbound_count, 10);
    assert_eq!(january.gap, 0);
    assert_eq!(january.accuracy, 1.0);
    assert!(!january.needs_failsafe);
}

#[test]
fn test_cross_month_lag_triggers_failsafe() {
    let records = vec![via_warehouse_item(
        "HE-LAG",
        "DSV Al Markaz",
        "2024-01-30",
        "DAS",
        "2024-02-03",
    )];

    let events = WarehouseMovementAggregator::new().aggregate(&records);
    let balances = BalanceReconciler::default().reconcile_all(&events);
    assert_eq!(balances.len(), 2);

    assert_eq!(balances[0].month, period(2024, 1));
    assert_eq!(balances[0].gap, 1);
    assert_eq!(balances[0].accuracy, 0.0);
    assert!(balances[0].needs_failsafe);

    assert_eq!(balances[1].month, period(2024, 2));
    assert_eq!(balances[1].gap, -1);
    assert!(balances[1].needs_failsafe);
}

#[test]
fn test_site_before_warehouse_is_not_inbound() {
    // 现场日期早于仓库日期: 最终位置是仓库
    let record = ShipmentBuilder::new("HE-BACK")
        .site("AGI", "2024-01-05")
        .warehouse("DSV Indoor", "2024-01-20")
        .build();

    let events = WarehouseMovementAggregator::new().aggregate(&[record]);
    assert!(events.iter().all(|e| e.event_type != EventType::Inbound));
}

#[test]
fn test_reconcile_empty_period() {
    let balance = BalanceReconciler::default().reconcile(&[], period(2024, 3));
    assert_eq!(balance.supply(), 0);
    assert_eq!(balance.demand(), 0);
    assert_eq!(balance.accuracy, 1.0);
    assert!(!balance.needs_failsafe);
}

// ==========================================
// 分布差异
// ==========================================

#[test]
fn test_missing_code_3_is_reported() {
    let actual = distribution(&[(0, 71), (1, 255), (2, 1134)]);
    let reference = distribution(&[(0, 71), (1, 255), (2, 1134), (3, 402), (4, 5)]);

    let report = GapAnalyzer::default().compare(&actual, &reference);
    let messages = report.issue_messages();
    assert!(messages.iter().any(|m| m.contains("Code 3 uncomputed")));
    assert!(messages.iter().any(|m| m.contains("Code 4 uncomputed")));

    let entry = report.entry(FlowCode(3)).unwrap();
    assert_eq!(entry.actual_count, 0);
    assert_eq!(entry.reported_count, 402);
    assert_eq!(entry.gap, -402);
    assert_eq!(entry.gap_pct, -100.0);
}

#[test]
fn test_code_2_over_classification() {
    let actual = distribution(&[(1, 10), (2, 1600)]);
    let reference = distribution(&[(1, 10), (2, 500)]);

    let report = GapAnalyzer::default().compare(&actual, &reference);
    assert_eq!(
        report.issues,
        vec![GapIssue::OverClassified {
            code: FlowCode(2),
            gap: 1100,
        }]
    );
}

#[test]
fn test_matching_distributions_have_no_issues() {
    let dist = distribution(&[(1, 3), (2, 4)]);
    let report = GapAnalyzer::default().compare(&dist, &dist);
    assert!(!report.has_issues());
    assert_eq!(report.entries.len(), 5);
    assert!(report.entries.iter().all(|e| e.gap == 0));
}
