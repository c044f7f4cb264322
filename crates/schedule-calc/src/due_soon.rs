//! 即將到期摘要

use chrono::NaiveDate;
use rust_decimal::Decimal;
use schedule_core::ServiceInterval;
use serde::Serialize;

use crate::AssetSchedule;

/// 即將到期項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueSoonEntry {
    pub fleet_number: String,
    pub category: Option<String>,
    pub model: Option<String>,
    pub date: NaiveDate,
    pub est_hours: Decimal,
    pub start_hours: Option<Decimal>,
    pub planned_hours: Decimal,
    pub interval: Option<ServiceInterval>,
}

/// 即將到期計算器
pub struct DueSoonCalculator;

impl DueSoonCalculator {
    /// 推估落在第一個計劃保養點前 `window_hours` 小時內的日子
    ///
    /// 條件為 `計劃 - 窗口 <= 推估 < 計劃`，結果按日期、車隊編號排序。
    pub fn due_soon(schedules: &[AssetSchedule], window_hours: Decimal) -> Vec<DueSoonEntry> {
        let mut entries: Vec<DueSoonEntry> = schedules
            .iter()
            .filter_map(|schedule| {
                let planned = schedule.planned_services.first()?;
                (planned.planned_hours > Decimal::ZERO).then_some((schedule, planned))
            })
            .flat_map(|(schedule, planned)| {
                let lower = planned.planned_hours - window_hours;
                schedule
                    .rows
                    .iter()
                    .filter(move |row| {
                        row.est_hours >= lower && row.est_hours < planned.planned_hours
                    })
                    .map(move |row| DueSoonEntry {
                        fleet_number: row.fleet_number.clone(),
                        category: schedule.asset.category.clone(),
                        model: schedule.asset.model.clone(),
                        date: row.date,
                        est_hours: row.est_hours,
                        start_hours: row.start_hours,
                        planned_hours: planned.planned_hours,
                        interval: planned.interval,
                    })
            })
            .collect();

        entries.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.fleet_number.cmp(&b.fleet_number))
        });

        tracing::debug!("即將到期項目: {} 筆", entries.len());
        entries
    }
}
