//! 保養排程主計算器

use chrono::NaiveDate;
use rust_decimal::Decimal;
use schedule_core::{MonthSpan, ScheduleConfig, ScheduleRow, UsageRate};
use std::collections::BTreeMap;

use crate::forecast::{ForecastCalculator, ForecastOptions};
use crate::status::{StatusClassifier, StatusWindows};
use crate::{
    AssetSchedule, AssetScheduleInput, CrossingDetector, PlannedServiceCalculator,
    ScheduleResult, ScheduleWarning, ServiceHistory, UsageAverager,
};

/// 每日使用時數的來源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageSource {
    /// 資產上設定的值
    Asset,
    /// 月初前回溯窗口的平均值
    RollingAverage,
    /// 配置預設值
    Default,
}

/// 保養排程計算器
pub struct ScheduleCalculator {
    /// 排程配置
    config: ScheduleConfig,
}

impl ScheduleCalculator {
    /// 創建新的保養排程計算器
    pub fn new(config: ScheduleConfig) -> Self {
        Self { config }
    }

    /// 主排程計算入口
    pub fn calculate(&self, month: MonthSpan, inputs: Vec<AssetScheduleInput>) -> ScheduleResult {
        tracing::info!("開始保養排程計算：{}，資產 {} 台", month, inputs.len());

        let start_time = std::time::Instant::now();
        let mut result = ScheduleResult::empty(month);

        for input in &inputs {
            let mut warnings = Vec::new();
            let schedule = self.calculate_asset(month, input, &mut warnings);
            result.schedules.push(schedule);
            result.warnings.extend(warnings);
        }

        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!("保養排程計算完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "跨越事件 {} 筆，警告 {} 筆",
            result.schedules.iter().map(|s| s.crossings.len()).sum::<usize>(),
            result.warnings.len()
        );

        result
    }

    /// 單一資產排程計算
    pub fn calculate_asset(
        &self,
        month: MonthSpan,
        input: &AssetScheduleInput,
        warnings: &mut Vec<ScheduleWarning>,
    ) -> AssetSchedule {
        let fleet_number = input.fleet_number().to_string();
        let days = month.days();

        let (Some(first_day), Some(last_day)) = (days.first().copied(), days.last().copied())
        else {
            warnings.push(ScheduleWarning::error(
                fleet_number,
                format!("無效的排程月份 {}-{}，不產生排程", month.year, month.month),
            ));
            return AssetSchedule::empty(input.asset.clone(), UsageRate::ZERO);
        };

        // Step 1: 決定每日使用時數
        let (daily_usage, source) = self.resolve_daily_usage(input, first_day);
        tracing::debug!(
            "資產 {} 每日使用時數 {}（來源 {:?}）",
            fleet_number,
            daily_usage,
            source
        );
        if source == UsageSource::Default {
            warnings.push(ScheduleWarning::info(
                fleet_number.clone(),
                format!("無使用時數資料，採用預設 {} 小時/天", daily_usage),
            ));
        }

        // Step 2: 取出當月讀數並檢查錶頭倒退
        let month_readings: BTreeMap<NaiveDate, Decimal> = input
            .readings
            .range(first_day..=last_day)
            .map(|(d, h)| (*d, *h))
            .collect();
        Self::check_readings(&fleet_number, &month_readings, warnings);

        // Step 3: 推估每日運轉時數
        let options = ForecastOptions::default()
            .with_seed(input.seed)
            .with_zero_reading_policy(self.config.zero_reading_policy);
        let series = ForecastCalculator::project_month_with(
            &input.asset,
            &days,
            daily_usage,
            &month_readings,
            &options,
        );

        // Step 4: 偵測間隔跨越
        let history = ServiceHistory::new(input.services.clone());
        let baseline = history.baseline_before(first_day);
        let month_services = history.records_between(first_day, last_day);
        let crossings = CrossingDetector::detect_with_services(&series, &baseline, &month_services);
        tracing::debug!("資產 {} 間隔跨越: {} 次", fleet_number, crossings.len());

        // Step 5: 分類每日狀態
        let serviced_dates = history.serviced_dates_between(first_day, last_day);
        let flags = StatusClassifier::classify_month(
            &series,
            &crossings,
            &serviced_dates,
            &StatusWindows::from_config(&self.config),
        );

        // Step 6: 計劃保養點
        let planned_services = history
            .first_previous_service_hours(&days)
            .map(|hours| {
                PlannedServiceCalculator::plan(
                    &series,
                    hours,
                    Some(first_day),
                    self.config.shift_sunday_services,
                )
            })
            .unwrap_or_default();

        let rows: Vec<ScheduleRow> = series
            .iter()
            .zip(flags)
            .map(|(projection, flag)| {
                ScheduleRow::from_parts(
                    projection,
                    flag,
                    daily_usage,
                    history.previous_service_on(projection.date).cloned(),
                )
            })
            .collect();

        AssetSchedule {
            asset: input.asset.clone(),
            daily_usage,
            rows,
            crossings,
            planned_services,
        }
    }

    /// 決定每日使用時數：資產設定 → 月初前回溯平均 → 配置預設
    pub fn resolve_daily_usage(
        &self,
        input: &AssetScheduleInput,
        month_start: NaiveDate,
    ) -> (UsageRate, UsageSource) {
        if let Some(rate) = input.asset.daily_usage {
            return (rate, UsageSource::Asset);
        }

        let averaged = month_start.pred_opt().and_then(|anchor| {
            UsageAverager::average_daily_usage(
                &input.readings,
                anchor,
                self.config.usage_average_window_days,
            )
        });

        match averaged {
            Some(rate) => (rate, UsageSource::RollingAverage),
            None => (self.config.default_daily_usage, UsageSource::Default),
        }
    }

    /// 讀數倒退時產生警告（錶頭更換或錄入錯誤）
    fn check_readings(
        fleet_number: &str,
        readings: &BTreeMap<NaiveDate, Decimal>,
        warnings: &mut Vec<ScheduleWarning>,
    ) {
        let mut prev: Option<(NaiveDate, Decimal)> = None;
        for (&date, &hours) in readings {
            if let Some((prev_date, prev_hours)) = prev {
                if hours > Decimal::ZERO && hours < prev_hours {
                    tracing::warn!(
                        "資產 {} 讀數倒退: {} {} → {} {}",
                        fleet_number,
                        prev_date,
                        prev_hours,
                        date,
                        hours
                    );
                    warnings.push(ScheduleWarning::warning(
                        fleet_number.to_string(),
                        format!(
                            "{} 讀數 {} 低於 {} 的 {}",
                            date, hours, prev_date, prev_hours
                        ),
                    ));
                }
            }
            if hours > Decimal::ZERO {
                prev = Some((date, hours));
            }
        }
    }

    /// 獲取排程配置引用
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }
}

impl Default for ScheduleCalculator {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WarningSeverity;
    use schedule_core::{Asset, MonthSeed, ServiceInterval, ServiceRecord};

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn october() -> MonthSpan {
        MonthSpan::new(2025, 10).unwrap()
    }

    #[test]
    fn test_calculate_without_data() {
        let calculator = ScheduleCalculator::default();
        let input = AssetScheduleInput::new(Asset::new("EX-001".to_string()));

        let result = calculator.calculate(october(), vec![input]);
        let schedule = result.schedule("EX-001").unwrap();

        assert_eq!(schedule.rows.len(), 31);
        assert_eq!(schedule.daily_usage, UsageRate::from_hours(15));
        assert_eq!(schedule.rows[16].est_hours, Decimal::from(255));
        assert_eq!(
            schedule.rows[16].crossing_threshold,
            Some(ServiceInterval::H250)
        );
        assert!(schedule.planned_services.is_empty());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Info));
    }

    #[test]
    fn test_rolling_average_from_previous_month() {
        let calculator = ScheduleCalculator::default();
        let input = AssetScheduleInput::new(Asset::new("EX-002".to_string()))
            .with_reading(date(9, 28), Decimal::from(3000))
            .with_reading(date(9, 29), Decimal::from(3008))
            .with_reading(date(9, 30), Decimal::from(3016));

        let (rate, source) = calculator.resolve_daily_usage(&input, date(10, 1));
        assert_eq!(rate, UsageRate::from_hours(8));
        assert_eq!(source, UsageSource::RollingAverage);
    }

    #[test]
    fn test_asset_rate_wins() {
        let calculator = ScheduleCalculator::default();
        let input = AssetScheduleInput::new(
            Asset::new("EX-003".to_string()).with_daily_usage(UsageRate::from_hours(4)),
        )
        .with_reading(date(9, 29), Decimal::from(3000))
        .with_reading(date(9, 30), Decimal::from(3020));

        let (rate, source) = calculator.resolve_daily_usage(&input, date(10, 1));
        assert_eq!(rate, UsageRate::from_hours(4));
        assert_eq!(source, UsageSource::Asset);
    }

    #[test]
    fn test_full_pipeline_with_history() {
        let calculator = ScheduleCalculator::default();
        let input = AssetScheduleInput::new(
            Asset::new("ADT-021".to_string())
                .with_category("ADT".to_string())
                .with_daily_usage(UsageRate::from_hours(20)),
        )
        .with_seed(MonthSeed::new(Decimal::from(5180), UsageRate::from_hours(20)))
        .with_reading(date(10, 6), Decimal::from(5300))
        .with_service(
            ServiceRecord::new(date(9, 12))
                .with_hours(Decimal::from(5010))
                .with_interval(ServiceInterval::H250)
                .with_reference("MSR-0140".to_string()),
        );

        let result = calculator.calculate(october(), vec![input]);
        let schedule = &result.schedules[0];

        // 第 1 天：種子 5180 + 20
        assert_eq!(schedule.rows[0].est_hours, Decimal::from(5200));
        // 第 6 天讀數 5300
        assert_eq!(schedule.rows[5].est_hours, Decimal::from(5300));
        assert_eq!(schedule.rows[5].start_hours, Some(Decimal::from(5300)));

        // 上次 250 保養（5010），先追蹤 500：累計 510 於 10/17；再追蹤 750：累計 750 於 10/29
        assert_eq!(schedule.crossings.len(), 2);
        assert_eq!(schedule.crossings[0].threshold, ServiceInterval::H500);
        assert_eq!(schedule.crossings[0].date, date(10, 17));
        assert_eq!(schedule.crossings[1].threshold, ServiceInterval::H750);
        assert_eq!(schedule.crossings[1].date, date(10, 29));

        // 計劃點：ceil(5010) = 5250 於 10/4（5240 → 5260）；5500 於 10/16
        assert_eq!(schedule.planned_services[0].planned_hours, Decimal::from(5250));
        assert_eq!(schedule.planned_services[0].date, Some(date(10, 4)));
        assert_eq!(schedule.planned_services[1].planned_hours, Decimal::from(5500));
        assert_eq!(schedule.planned_services[1].date, Some(date(10, 16)));

        assert_eq!(
            schedule.rows[0]
                .previous_service
                .as_ref()
                .and_then(|s| s.reference.as_deref()),
            Some("MSR-0140")
        );
    }

    #[test]
    fn test_in_month_service_marks_row() {
        let calculator = ScheduleCalculator::default();
        let input = AssetScheduleInput::new(
            Asset::new("DZ-011".to_string()).with_daily_usage(UsageRate::from_hours(15)),
        )
        .with_service(ServiceRecord::new(date(10, 20)).with_reference("MSR-0301".to_string()));

        let result = calculator.calculate(october(), vec![input]);
        let schedule = &result.schedules[0];

        assert!(schedule.rows[19].is_serviced);
        assert!(schedule.rows.iter().all(|r| !r.is_overdue));
        assert!(schedule.rows[18].previous_service.is_none());
        assert!(schedule.rows[19].previous_service.is_some());
    }

    #[test]
    fn test_reading_regression_warns() {
        let calculator = ScheduleCalculator::default();
        let input = AssetScheduleInput::new(
            Asset::new("DZ-012".to_string()).with_daily_usage(UsageRate::from_hours(10)),
        )
        .with_reading(date(10, 3), Decimal::from(900))
        .with_reading(date(10, 4), Decimal::from(40));

        let result = calculator.calculate(october(), vec![input]);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Warning && w.fleet_number == "DZ-012"));
    }

    #[test]
    fn test_invalid_month_yields_empty_schedule() {
        let calculator = ScheduleCalculator::default();
        let month = MonthSpan {
            year: 2025,
            month: 13,
        };
        let input = AssetScheduleInput::new(Asset::new("EX-404".to_string()));

        let result = calculator.calculate(month, vec![input]);
        assert!(result.schedules[0].rows.is_empty());
        assert_eq!(result.warnings[0].severity, WarningSeverity::Error);
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let calculator = ScheduleCalculator::default();
        let input = AssetScheduleInput::new(
            Asset::new("EX-005".to_string()).with_daily_usage(UsageRate::from_hours(18)),
        )
        .with_reading(date(10, 9), Decimal::from(260));

        let first = calculator.calculate(october(), vec![input.clone()]);
        let second = calculator.calculate(october(), vec![input]);
        assert_eq!(first.schedules, second.schedules);
        assert_eq!(first.warnings, second.warnings);
    }
}
