//! 平均每日使用時數

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use schedule_core::UsageRate;
use std::collections::BTreeMap;

/// 平均每日使用時數計算器
pub struct UsageAverager;

impl UsageAverager {
    /// 以回溯窗口內的錶頭讀數計算平均每日使用時數
    ///
    /// 只採用相鄰兩個日曆日之間的非負差值（忽略錶頭重置或錯誤資料），
    /// 結果限制在 [0, 24] 並四捨五入到整數小時。沒有可用差值時返回 None。
    /// 這裡 0 讀數是有效讀數。
    pub fn average_daily_usage(
        readings: &BTreeMap<NaiveDate, Decimal>,
        anchor: NaiveDate,
        window_days: u32,
    ) -> Option<UsageRate> {
        if window_days == 0 {
            return None;
        }

        let start = anchor.checked_sub_signed(Duration::days(i64::from(window_days) - 1))?;

        let mut deltas = Vec::new();
        let mut prev: Option<(NaiveDate, Decimal)> = None;
        for (&date, &hours) in readings.range(start..=anchor) {
            if let Some((prev_date, prev_hours)) = prev {
                if (date - prev_date).num_days() == 1 {
                    let delta = hours - prev_hours;
                    if delta >= Decimal::ZERO {
                        deltas.push(delta);
                    }
                }
            }
            prev = Some((date, hours));
        }

        if deltas.is_empty() {
            return None;
        }

        let average = deltas.iter().copied().sum::<Decimal>() / Decimal::from(deltas.len());
        Some(UsageRate::new(average).rounded())
    }

    /// 平均每日使用時數，無資料時使用備用值
    pub fn average_or(
        readings: &BTreeMap<NaiveDate, Decimal>,
        anchor: NaiveDate,
        window_days: u32,
        fallback: UsageRate,
    ) -> UsageRate {
        Self::average_daily_usage(readings, anchor, window_days).unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    #[test]
    fn test_average_consecutive_days() {
        let mut readings = BTreeMap::new();
        readings.insert(date(9, 27), Decimal::from(1000));
        readings.insert(date(9, 28), Decimal::from(1010));
        readings.insert(date(9, 29), Decimal::from(1022));
        readings.insert(date(9, 30), Decimal::from(1030));

        // (10 + 12 + 8) / 3 = 10
        let avg = UsageAverager::average_daily_usage(&readings, date(9, 30), 30);
        assert_eq!(avg, Some(UsageRate::from_hours(10)));
    }

    #[test]
    fn test_gaps_and_resets_ignored() {
        let mut readings = BTreeMap::new();
        readings.insert(date(9, 20), Decimal::from(500));
        readings.insert(date(9, 21), Decimal::from(512));
        // 隔天缺讀數：9/21 → 9/23 不計
        readings.insert(date(9, 23), Decimal::from(600));
        // 錶頭重置：負差值不計
        readings.insert(date(9, 24), Decimal::from(5));
        readings.insert(date(9, 25), Decimal::from(19));

        // (12 + 14) / 2 = 13
        let avg = UsageAverager::average_daily_usage(&readings, date(9, 30), 30);
        assert_eq!(avg, Some(UsageRate::from_hours(13)));
    }

    #[test]
    fn test_window_excludes_old_readings() {
        let mut readings = BTreeMap::new();
        readings.insert(date(8, 1), Decimal::from(100));
        readings.insert(date(8, 2), Decimal::from(120));
        readings.insert(date(9, 29), Decimal::from(400));

        assert_eq!(
            UsageAverager::average_daily_usage(&readings, date(9, 30), 30),
            None
        );
        assert_eq!(
            UsageAverager::average_or(&readings, date(9, 30), 30, UsageRate::default()),
            UsageRate::from_hours(15)
        );
    }

    #[test]
    fn test_average_clamped_to_day() {
        let mut readings = BTreeMap::new();
        readings.insert(date(9, 29), Decimal::from(100));
        readings.insert(date(9, 30), Decimal::from(160));

        let avg = UsageAverager::average_daily_usage(&readings, date(9, 30), 30);
        assert_eq!(avg, Some(UsageRate::from_hours(24)));
    }

    #[test]
    fn test_average_rounds_half_to_even() {
        let mut readings = BTreeMap::new();
        readings.insert(date(9, 28), Decimal::from(100));
        readings.insert(date(9, 29), Decimal::from(110));
        readings.insert(date(9, 30), Decimal::from(123));

        // (10 + 13) / 2 = 11.5 → 12
        let avg = UsageAverager::average_daily_usage(&readings, date(9, 30), 30);
        assert_eq!(avg, Some(UsageRate::from_hours(12)));
    }

    #[test]
    fn test_zero_reading_counts() {
        let mut readings = BTreeMap::new();
        readings.insert(date(9, 29), Decimal::ZERO);
        readings.insert(date(9, 30), Decimal::from(9));

        let avg = UsageAverager::average_daily_usage(&readings, date(9, 30), 30);
        assert_eq!(avg, Some(UsageRate::from_hours(9)));
    }
}
