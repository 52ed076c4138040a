// ==========================================
// HVDC 物流 Flow Code 引擎 - 仓库出入库汇总
// ==========================================
// 职责: 全量记录 → 去重后的出库/入库/调拨事件
// 红线: 去重键为 (item, location, event_type),与时间戳无关;
//       同一批数据重复汇总不会重复计数
// ==========================================

use crate::domain::movement::WarehouseEvent;
use crate::domain::shipment::{ColumnValue, ShipmentRecord};
use crate::domain::types::{EventType, Period};
use crate::importer::ValueNormalizer;
use chrono::NaiveDateTime;
use std::collections::HashSet;
use tracing::instrument;

// ==========================================
// MovementLedger - 事件台账 (调用方持有)
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MovementLedger {
    events: Vec<WarehouseEvent>,
    seen: HashSet<(String, String, EventType)>,
}

impl MovementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录事件; 已存在同键事件时忽略并返回 false
    pub fn record(&mut self, event: WarehouseEvent) -> bool {
        let key = (
            event.item_id.clone(),
            event.location_name.clone(),
            event.event_type,
        );
        if !self.seen.insert(key) {
            return false;
        }
        self.events.push(event);
        true
    }

    pub fn events(&self) -> &[WarehouseEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<WarehouseEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// ==========================================
// WarehouseMovementAggregator
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct WarehouseMovementAggregator;

impl WarehouseMovementAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 单次运行: 新台账 → 事件列表
    pub fn aggregate(&self, records: &[ShipmentRecord]) -> Vec<WarehouseEvent> {
        let mut ledger = MovementLedger::new();
        self.aggregate_into(records, &mut ledger);
        ledger.into_events()
    }

    /// 汇总到已有台账,返回新增事件数
    #[instrument(skip(self, records, ledger), fields(count = records.len()))]
    pub fn aggregate_into(&self, records: &[ShipmentRecord], ledger: &mut MovementLedger) -> usize {
        let mut added = 0;
        let mut skipped = 0;

        for record in records {
            for event in Self::item_events(record) {
                if ledger.record(event) {
                    added += 1;
                } else {
                    skipped += 1;
                }
            }
        }

        tracing::info!(added, skipped, total = ledger.len(), "仓库事件汇总完成");
        added
    }

    /// 单件货物的候选事件 (未去重)
    fn item_events(record: &ShipmentRecord) -> Vec<WarehouseEvent> {
        let mut events = Vec::new();

        // 有日期的仓库节点,保持列顺序
        let dated_warehouses: Vec<(&ColumnValue, NaiveDateTime)> = record
            .warehouses
            .iter()
            .filter_map(|c| ValueNormalizer::to_timestamp(&c.value).map(|ts| (c, ts)))
            .collect();

        // 1. 出库: 每个有日期的仓库一条
        for (column, ts) in &dated_warehouses {
            events.push(Self::event(record, column, EventType::Outbound, *ts, false));
        }

        // 2. 调拨: 按时间排序,首个仓库之后的每个仓库一条
        let mut chronological = dated_warehouses.clone();
        chronological.sort_by_key(|(_, ts)| *ts);
        for (column, ts) in chronological.iter().skip(1) {
            events.push(Self::event(record, column, EventType::Transfer, *ts, false));
        }

        // 3. 入库: 最终位置为现场时一条
        let latest_site = record
            .sites
            .iter()
            .filter_map(|c| ValueNormalizer::to_timestamp(&c.value).map(|ts| (c, ts)))
            .fold(None::<(&ColumnValue, NaiveDateTime)>, |best, (c, ts)| match best {
                Some((_, best_ts)) if best_ts >= ts => best,
                _ => Some((c, ts)),
            });

        if let Some((site, site_ts)) = latest_site {
            let latest_other = dated_warehouses
                .iter()
                .map(|(_, ts)| *ts)
                .chain(ValueNormalizer::to_timestamp(&record.offshore.value))
                .max();

            if latest_other.map_or(true, |other| site_ts >= other) {
                let via_warehouse = record
                    .warehouses
                    .iter()
                    .any(|c| !c.value.is_malformed() && ValueNormalizer::is_valid(&c.value));
                events.push(Self::event(
                    record,
                    site,
                    EventType::Inbound,
                    site_ts,
                    !via_warehouse,
                ));
            } else {
                tracing::debug!(
                    case_id = %record.case_id,
                    site = %site.column,
                    "现场时间早于仓库/MOSB时间, 最终位置不是现场, 不计入库"
                );
            }
        }

        events
    }

    fn event(
        record: &ShipmentRecord,
        column: &ColumnValue,
        event_type: EventType,
        ts: NaiveDateTime,
        direct_delivery: bool,
    ) -> WarehouseEvent {
        WarehouseEvent {
            item_id: record.case_id.clone(),
            location_name: column.column.clone(),
            event_type,
            month: Period::from_datetime(ts),
            direct_delivery,
        }
    }
}
