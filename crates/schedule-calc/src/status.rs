//! 每日狀態分類（預警窗口、逾期、已保養）

use chrono::NaiveDate;
use rust_decimal::Decimal;
use schedule_core::{CrossingEvent, DayProjection, ScheduleConfig, StatusFlags};
use std::collections::BTreeSet;

/// 狀態窗口參數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusWindows {
    /// 跨越日之前的預警窗口（小時）
    pub window_hours_before: Decimal,

    /// 跨越日之後的逾期容許時數
    pub overdue_margin_hours: Decimal,
}

impl StatusWindows {
    /// 創建窗口參數
    pub fn new(window_hours_before: Decimal, overdue_margin_hours: Decimal) -> Self {
        Self {
            window_hours_before,
            overdue_margin_hours,
        }
    }

    /// 從排程配置取得窗口參數
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self::new(config.pre_window_hours, config.overdue_margin_hours)
    }
}

impl Default for StatusWindows {
    fn default() -> Self {
        Self::new(Decimal::from(60), Decimal::from(50))
    }
}

/// 狀態分類器
pub struct StatusClassifier;

impl StatusClassifier {
    /// 分類整月每一天的狀態
    ///
    /// `crossings` 需按位置升序（`CrossingDetector` 的輸出即是）。
    pub fn classify_month(
        series: &[DayProjection],
        crossings: &[CrossingEvent],
        serviced_dates: &BTreeSet<NaiveDate>,
        windows: &StatusWindows,
    ) -> Vec<StatusFlags> {
        let mut flags: Vec<StatusFlags> = series
            .iter()
            .map(|day| StatusFlags {
                is_serviced: serviced_dates.contains(&day.date),
                ..StatusFlags::default()
            })
            .collect();

        for (position, anchor) in crossings.iter().enumerate() {
            if let Some(flag) = flags.get_mut(anchor.index) {
                flag.crossing_threshold = Some(anchor.threshold);
            }

            for index in Self::pre_window_indices(series, anchor, windows.window_hours_before) {
                flags[index].is_pre_window = true;
            }

            if let Some(index) = Self::overdue_index(
                series,
                crossings,
                position,
                serviced_dates,
                windows.overdue_margin_hours,
            ) {
                flags[index].is_overdue = true;
            }
        }

        flags
    }

    /// 分類單日狀態
    pub fn classify_day_status(
        day_index: usize,
        series: &[DayProjection],
        crossings: &[CrossingEvent],
        serviced_dates: &BTreeSet<NaiveDate>,
        windows: &StatusWindows,
    ) -> StatusFlags {
        Self::classify_month(series, crossings, serviced_dates, windows)
            .get(day_index)
            .copied()
            .unwrap_or_default()
    }

    /// 跨越日之前的預警日
    ///
    /// 從跨越日往前走，推估落在 `[錨點 - 窗口, 錨點)` 的日子都標記；
    /// 一旦低於窗口下限就停止。
    pub fn pre_window_indices(
        series: &[DayProjection],
        anchor: &CrossingEvent,
        window_hours_before: Decimal,
    ) -> Vec<usize> {
        let lower = anchor.est_hours - window_hours_before;
        let mut indices = Vec::new();

        for index in (0..anchor.index.min(series.len())).rev() {
            let est = series[index].est_hours;
            if est >= lower && est < anchor.est_hours {
                indices.push(index);
            } else if est < lower {
                break;
            }
        }

        indices
    }

    /// 跨越日之後第一個逾期日
    ///
    /// 窗口為本錨點到下一個錨點（不含）。窗口內任何一天有保養記錄即不算逾期；
    /// 否則取錨點之後第一個推估達到 `錨點 + 容許時數` 的日子。
    pub fn overdue_index(
        series: &[DayProjection],
        crossings: &[CrossingEvent],
        position: usize,
        serviced_dates: &BTreeSet<NaiveDate>,
        overdue_margin_hours: Decimal,
    ) -> Option<usize> {
        let anchor = crossings.get(position)?;
        let window_end = crossings
            .get(position + 1)
            .map(|next| next.index)
            .unwrap_or(series.len())
            .min(series.len());

        if anchor.index >= window_end {
            return None;
        }

        let serviced_in_window = series[anchor.index..window_end]
            .iter()
            .any(|day| serviced_dates.contains(&day.date));
        if serviced_in_window {
            return None;
        }

        let threshold = anchor.est_hours + overdue_margin_hours;
        (anchor.index + 1..window_end).find(|&index| series[index].est_hours >= threshold)
    }
}
