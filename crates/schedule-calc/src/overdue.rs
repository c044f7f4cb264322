//! 逾期事件

use chrono::NaiveDate;
use schedule_core::ServiceInterval;
use serde::Serialize;

use crate::AssetSchedule;

/// 逾期事件（每日通知作業的計算結果）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueEvent {
    pub fleet_number: String,
    pub interval: ServiceInterval,
    pub anchor_date: NaiveDate,
    pub overdue_date: NaiveDate,
}

/// 逾期事件計算器
pub struct OverdueCalculator;

impl OverdueCalculator {
    /// 資產排程中所有逾期日及其錨點
    pub fn overdue_events(schedule: &AssetSchedule) -> Vec<OverdueEvent> {
        schedule
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_overdue)
            .filter_map(|(index, row)| {
                let anchor = schedule
                    .crossings
                    .iter()
                    .rev()
                    .find(|c| c.index < index)?;
                Some(OverdueEvent {
                    fleet_number: row.fleet_number.clone(),
                    interval: anchor.threshold,
                    anchor_date: anchor.date,
                    overdue_date: row.date,
                })
            })
            .collect()
    }

    /// 逾期日恰為 `today` 的事件
    pub fn events_on(schedules: &[AssetSchedule], today: NaiveDate) -> Vec<OverdueEvent> {
        let events: Vec<OverdueEvent> = schedules
            .iter()
            .flat_map(Self::overdue_events)
            .filter(|event| event.overdue_date == today)
            .collect();

        tracing::info!("{} 逾期事件: {} 筆", today, events.len());
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetScheduleInput, ScheduleCalculator};
    use schedule_core::{Asset, MonthSpan, ScheduleConfig, ServiceRecord, UsageRate};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, d).unwrap()
    }

    fn schedules(inputs: Vec<AssetScheduleInput>) -> Vec<AssetSchedule> {
        let calculator = ScheduleCalculator::new(ScheduleConfig::default());
        let month = MonthSpan::new(2025, 10).unwrap();
        calculator.calculate(month, inputs).schedules
    }

    #[test]
    fn test_overdue_events_for_asset() {
        let input = AssetScheduleInput::new(
            Asset::new("ADT-007".to_string()).with_daily_usage(UsageRate::from_hours(15)),
        );
        let result = schedules(vec![input]);

        let events = OverdueCalculator::overdue_events(&result[0]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].interval, ServiceInterval::H250);
        assert_eq!(events[0].anchor_date, date(17));
        assert_eq!(events[0].overdue_date, date(21));
    }

    #[test]
    fn test_events_on_today_only() {
        let busy = AssetScheduleInput::new(
            Asset::new("ADT-007".to_string()).with_daily_usage(UsageRate::from_hours(15)),
        );
        let serviced = AssetScheduleInput::new(
            Asset::new("ADT-008".to_string()).with_daily_usage(UsageRate::from_hours(15)),
        )
        .with_service(ServiceRecord::new(date(18)).with_reference("MSR-0300".to_string()));
        let result = schedules(vec![busy, serviced]);

        let today = OverdueCalculator::events_on(&result, date(21));
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].fleet_number, "ADT-007");

        assert!(OverdueCalculator::events_on(&result, date(22)).is_empty());
    }
}
