//! 計劃保養點

use chrono::NaiveDate;
use rust_decimal::Decimal;
use schedule_core::interval::INTERVAL_STEP_HOURS;
use schedule_core::{adjust_sunday_to_saturday, DayProjection, PlannedService, ServiceInterval};

/// 每次計算的計劃保養點數量
pub const PLANNED_SLOTS: u8 = 3;

/// 計劃保養計算器
pub struct PlannedServiceCalculator;

impl PlannedServiceCalculator {
    /// 計算下次保養點
    ///
    /// 以上次保養時數向上取整到 250 的倍數為第一個計劃點，之後每點加 250。
    /// 上次保養時數不為正時不產生計劃點。
    pub fn plan(
        series: &[DayProjection],
        hours_previous_service: Decimal,
        month_start: Option<NaiveDate>,
        shift_sunday: bool,
    ) -> Vec<PlannedService> {
        let first = Self::ceiling_to_step(hours_previous_service);
        if first <= Decimal::ZERO {
            return Vec::new();
        }

        let step = Decimal::from(INTERVAL_STEP_HOURS);
        (0..PLANNED_SLOTS)
            .map(|slot| {
                let planned_hours = first + step * Decimal::from(slot);
                let date = Self::find_threshold_crossing_date(series, planned_hours).map(|d| {
                    if shift_sunday {
                        adjust_sunday_to_saturday(d, month_start)
                    } else {
                        d
                    }
                });

                PlannedService {
                    slot: slot + 1,
                    planned_hours,
                    date,
                    interval: ServiceInterval::due_at_meter_hours(planned_hours),
                }
            })
            .collect()
    }

    /// 向上取整到 250 的倍數（不為正時返回 0）
    pub fn ceiling_to_step(hours: Decimal) -> Decimal {
        let hours = hours.trunc();
        if hours <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let step = Decimal::from(INTERVAL_STEP_HOURS);
        (hours / step).ceil() * step
    }

    /// 推估第一次達到計劃時數的日期
    ///
    /// 序列第一天已達到即返回第一天；否則需前一天低於、當天達到。
    pub fn find_threshold_crossing_date(
        series: &[DayProjection],
        planned_hours: Decimal,
    ) -> Option<NaiveDate> {
        if planned_hours <= Decimal::ZERO {
            return None;
        }

        let mut prev_est: Option<Decimal> = None;
        for day in series {
            let est = day.est_hours;
            let crossed = match prev_est {
                None => est >= planned_hours,
                Some(prev) => prev < planned_hours && planned_hours <= est,
            };
            if crossed {
                return Some(day.date);
            }
            prev_est = Some(est);
        }

        None
    }
}
