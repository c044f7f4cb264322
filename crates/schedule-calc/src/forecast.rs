//! 運轉時數推估

use chrono::NaiveDate;
use rust_decimal::Decimal;
use schedule_core::{Asset, DayProjection, MonthSeed, UsageRate, ZeroReadingPolicy};
use std::collections::BTreeMap;

/// 推估選項
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastOptions {
    /// 上月延續種子
    pub seed: Option<MonthSeed>,

    /// 0 讀數的處理方式
    pub zero_reading_policy: ZeroReadingPolicy,
}

impl ForecastOptions {
    /// 建構器模式：設置延續種子
    pub fn with_seed(mut self, seed: Option<MonthSeed>) -> Self {
        self.seed = seed;
        self
    }

    /// 建構器模式：設置 0 讀數處理方式
    pub fn with_zero_reading_policy(mut self, policy: ZeroReadingPolicy) -> Self {
        self.zero_reading_policy = policy;
        self
    }
}

/// 運轉時數推估計算器
pub struct ForecastCalculator;

impl ForecastCalculator {
    /// 推估整月每日運轉時數
    ///
    /// 有實際讀數的日子直接採用讀數並作為新基準，其餘日子按每日使用時數線性外推。
    /// `calendar_days` 需為升序；空列表返回空結果。
    pub fn project_month(
        asset: &Asset,
        calendar_days: &[NaiveDate],
        daily_usage: UsageRate,
        actual_entries: &BTreeMap<NaiveDate, Decimal>,
    ) -> Vec<DayProjection> {
        Self::project_month_with(
            asset,
            calendar_days,
            daily_usage,
            actual_entries,
            &ForecastOptions::default(),
        )
    }

    /// 推估整月每日運轉時數（含延續種子與 0 讀數選項）
    pub fn project_month_with(
        asset: &Asset,
        calendar_days: &[NaiveDate],
        daily_usage: UsageRate,
        actual_entries: &BTreeMap<NaiveDate, Decimal>,
        options: &ForecastOptions,
    ) -> Vec<DayProjection> {
        let rate = daily_usage.hours();
        let mut projections = Vec::with_capacity(calendar_days.len());

        // 前一天的實際讀數（無讀數為 0）與前一天的推估值
        let mut prev_start = Decimal::ZERO;
        let mut prev_est = Decimal::ZERO;

        for (index, &date) in calendar_days.iter().enumerate() {
            let start_hours = actual_entries
                .get(&date)
                .copied()
                .filter(|hours| options.zero_reading_policy.accepts(*hours));

            let est_hours = match start_hours {
                Some(hours) => hours,
                None if index == 0 => options
                    .seed
                    .map(|seed| seed.first_day_estimate())
                    .unwrap_or(prev_est + rate),
                None if prev_start > Decimal::ZERO => prev_start + rate,
                None => prev_est + rate,
            };

            prev_start = start_hours.unwrap_or(Decimal::ZERO);
            prev_est = est_hours;

            projections.push(DayProjection::new(
                asset.fleet_number.clone(),
                date,
                start_hours,
                est_hours,
            ));
        }

        tracing::debug!(
            "資產 {} 推估完成：{} 天，每日 {} 小時，讀數 {} 筆",
            asset.fleet_number,
            projections.len(),
            daily_usage,
            projections.iter().filter(|p| p.is_observed()).count()
        );

        projections
    }
}
