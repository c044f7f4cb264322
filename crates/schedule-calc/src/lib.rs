//! # Service Schedule Calculation Engine
//!
//! 運轉時數推估與保養間隔計算引擎

pub mod calculator;
pub mod crossing;
pub mod due_soon;
pub mod forecast;
pub mod overdue;
pub mod planning;
pub mod service_history;
pub mod status;
pub mod usage_average;

// Re-export 主要類型
pub use calculator::ScheduleCalculator;
pub use crossing::CrossingDetector;
pub use due_soon::{DueSoonCalculator, DueSoonEntry};
pub use forecast::{ForecastCalculator, ForecastOptions};
pub use overdue::{OverdueCalculator, OverdueEvent};
pub use planning::PlannedServiceCalculator;
pub use service_history::ServiceHistory;
pub use status::{StatusClassifier, StatusWindows};
pub use usage_average::UsageAverager;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use schedule_core::{
    Asset, CrossingEvent, MeterReading, MonthSeed, MonthSpan, PlannedService, ScheduleRow,
    ServiceRecord, UsageRate,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// 單一資產的排程輸入
#[derive(Debug, Clone)]
pub struct AssetScheduleInput {
    /// 資產
    pub asset: Asset,

    /// 錶頭讀數（日期 → 開工時數），可包含排程月份之前的讀數
    pub readings: BTreeMap<NaiveDate, Decimal>,

    /// 保養記錄
    pub services: Vec<ServiceRecord>,

    /// 上月延續種子
    pub seed: Option<MonthSeed>,
}

impl AssetScheduleInput {
    /// 創建新的排程輸入
    pub fn new(asset: Asset) -> Self {
        Self {
            asset,
            readings: BTreeMap::new(),
            services: Vec::new(),
            seed: None,
        }
    }

    /// 建構器模式：添加讀數
    pub fn with_reading(mut self, date: NaiveDate, start_hours: Decimal) -> Self {
        self.readings.insert(date, start_hours);
        self
    }

    /// 建構器模式：批量添加讀數（只接受同一車隊編號）
    pub fn with_readings(mut self, readings: impl IntoIterator<Item = MeterReading>) -> Self {
        for reading in readings {
            if reading.fleet_number == self.asset.fleet_number {
                self.readings.insert(reading.date, reading.start_hours);
            }
        }
        self
    }

    /// 建構器模式：添加保養記錄
    pub fn with_service(mut self, record: ServiceRecord) -> Self {
        self.services.push(record);
        self
    }

    /// 建構器模式：設置上月延續種子
    pub fn with_seed(mut self, seed: MonthSeed) -> Self {
        self.seed = Some(seed);
        self
    }

    /// 車隊編號
    pub fn fleet_number(&self) -> &str {
        &self.asset.fleet_number
    }
}

/// 單一資產的排程結果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetSchedule {
    /// 資產
    pub asset: Asset,

    /// 使用的每日使用時數
    pub daily_usage: UsageRate,

    /// 每日輸出行
    pub rows: Vec<ScheduleRow>,

    /// 間隔跨越事件
    pub crossings: Vec<CrossingEvent>,

    /// 計劃保養點
    pub planned_services: Vec<PlannedService>,
}

impl AssetSchedule {
    /// 空排程（無效月份時使用）
    pub fn empty(asset: Asset, daily_usage: UsageRate) -> Self {
        Self {
            asset,
            daily_usage,
            rows: Vec::new(),
            crossings: Vec::new(),
            planned_services: Vec::new(),
        }
    }

    /// 車隊編號
    pub fn fleet_number(&self) -> &str {
        &self.asset.fleet_number
    }

    /// 指定日期的輸出行
    pub fn row_on(&self, date: NaiveDate) -> Option<&ScheduleRow> {
        self.rows.iter().find(|r| r.date == date)
    }
}

/// 保養排程計算結果
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResult {
    /// 排程月份
    pub month: MonthSpan,

    /// 各資產排程
    pub schedules: Vec<AssetSchedule>,

    /// 警告信息
    pub warnings: Vec<ScheduleWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl ScheduleResult {
    /// 創建空的計算結果
    pub fn empty(month: MonthSpan) -> Self {
        Self {
            month,
            schedules: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: ScheduleWarning) {
        self.warnings.push(warning);
    }

    /// 查找資產排程
    pub fn schedule(&self, fleet_number: &str) -> Option<&AssetSchedule> {
        self.schedules.iter().find(|s| s.fleet_number() == fleet_number)
    }
}

/// 排程警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleWarning {
    pub fleet_number: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ScheduleWarning {
    pub fn new(fleet_number: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            fleet_number,
            message,
            severity,
        }
    }

    pub fn info(fleet_number: String, message: String) -> Self {
        Self::new(fleet_number, message, WarningSeverity::Info)
    }

    pub fn warning(fleet_number: String, message: String) -> Self {
        Self::new(fleet_number, message, WarningSeverity::Warning)
    }

    pub fn error(fleet_number: String, message: String) -> Self {
        Self::new(fleet_number, message, WarningSeverity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarningSeverity {
    Info,
    Warning,
    Error,
}
