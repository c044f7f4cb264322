//! 保養歷史

use chrono::NaiveDate;
use rust_decimal::Decimal;
use schedule_core::{ServiceBaseline, ServiceRecord};
use std::collections::BTreeSet;

/// 單一資產的保養歷史（按日期排序）
#[derive(Debug, Clone, Default)]
pub struct ServiceHistory {
    records: Vec<ServiceRecord>,
}

impl ServiceHistory {
    /// 創建保養歷史（同日多筆保留輸入順序）
    pub fn new(mut records: Vec<ServiceRecord>) -> Self {
        records.sort_by_key(|r| r.service_date);
        Self { records }
    }

    /// 所有記錄
    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    /// 截至指定日期（含）的最近一次保養
    pub fn previous_service_on(&self, date: NaiveDate) -> Option<&ServiceRecord> {
        self.records.iter().rev().find(|r| r.service_date <= date)
    }

    /// 指定日期之前（不含）的保養基準
    pub fn baseline_before(&self, date: NaiveDate) -> ServiceBaseline {
        self.records
            .iter()
            .rev()
            .find(|r| r.service_date < date)
            .map(|r| ServiceBaseline::new(r.hours.unwrap_or(Decimal::ZERO), r.interval))
            .unwrap_or_default()
    }

    /// 日期區間內（含兩端）的保養記錄
    pub fn records_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<ServiceRecord> {
        self.records
            .iter()
            .filter(|r| r.service_date >= start && r.service_date <= end)
            .cloned()
            .collect()
    }

    /// 日期區間內有保養的日子
    pub fn serviced_dates_between(&self, start: NaiveDate, end: NaiveDate) -> BTreeSet<NaiveDate> {
        self.records
            .iter()
            .map(|r| r.service_date)
            .filter(|d| *d >= start && *d <= end)
            .collect()
    }

    /// 區間內第一個有正時數的「上次保養時數」（計劃保養點的基準）
    pub fn first_previous_service_hours(&self, days: &[NaiveDate]) -> Option<Decimal> {
        days.iter()
            .filter_map(|d| self.previous_service_on(*d))
            .filter_map(|r| r.hours)
            .find(|h| *h > Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schedule_core::ServiceInterval;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn history() -> ServiceHistory {
        ServiceHistory::new(vec![
            ServiceRecord::new(date(10, 14))
                .with_hours(Decimal::from(2260))
                .with_interval(ServiceInterval::H500)
                .with_reference("MSR-0220".to_string()),
            ServiceRecord::new(date(9, 2))
                .with_hours(Decimal::from(2010))
                .with_interval(ServiceInterval::H250)
                .with_reference("MSR-0188".to_string()),
        ])
    }

    #[test]
    fn test_previous_service_on() {
        let history = history();

        assert!(history.previous_service_on(date(9, 1)).is_none());
        assert_eq!(
            history.previous_service_on(date(10, 1)).and_then(|r| r.reference.as_deref()),
            Some("MSR-0188")
        );
        assert_eq!(
            history.previous_service_on(date(10, 14)).and_then(|r| r.reference.as_deref()),
            Some("MSR-0220")
        );
    }

    #[test]
    fn test_baseline_before() {
        let history = history();

        let baseline = history.baseline_before(date(10, 1));
        assert_eq!(baseline.hours, Decimal::from(2010));
        assert_eq!(baseline.last_interval, Some(ServiceInterval::H250));

        // 當天的保養不算「之前」
        let baseline = history.baseline_before(date(10, 14));
        assert_eq!(baseline.hours, Decimal::from(2010));

        assert_eq!(history.baseline_before(date(8, 1)), ServiceBaseline::default());
    }

    #[test]
    fn test_records_in_month() {
        let history = history();
        let records = history.records_between(date(10, 1), date(10, 31));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].service_date, date(10, 14));

        let dates = history.serviced_dates_between(date(10, 1), date(10, 31));
        assert!(dates.contains(&date(10, 14)));
        assert!(!dates.contains(&date(9, 2)));
    }

    #[test]
    fn test_first_previous_service_hours() {
        let history = history();
        let days: Vec<NaiveDate> = (1..=31).map(|d| date(10, d)).collect();
        assert_eq!(
            history.first_previous_service_hours(&days),
            Some(Decimal::from(2010))
        );

        let empty = ServiceHistory::default();
        assert_eq!(empty.first_previous_service_hours(&days), None);
    }
}
