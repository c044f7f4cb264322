//! 推估結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ServiceInterval, ServiceRecord, UsageRate};

/// 單日推估（計算結果，不持久化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProjection {
    /// 車隊編號
    pub fleet_number: String,

    /// 日期
    pub date: NaiveDate,

    /// 實際讀數（無讀數時為 None）
    pub start_hours: Option<Decimal>,

    /// 推估運轉時數
    pub est_hours: Decimal,
}

impl DayProjection {
    /// 創建新的單日推估
    pub fn new(
        fleet_number: String,
        date: NaiveDate,
        start_hours: Option<Decimal>,
        est_hours: Decimal,
    ) -> Self {
        Self {
            fleet_number,
            date,
            start_hours,
            est_hours,
        }
    }

    /// 是否有實際讀數
    pub fn is_observed(&self) -> bool {
        self.start_hours.is_some()
    }
}

/// 保養間隔跨越事件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingEvent {
    /// 在推估序列中的位置
    pub index: usize,

    /// 跨越日期
    pub date: NaiveDate,

    /// 跨越的間隔
    pub threshold: ServiceInterval,

    /// 當日推估時數（預警/逾期窗口的錨點）
    pub est_hours: Decimal,

    /// 自上次保養起累計時數
    pub elapsed_hours: Decimal,
}

/// 單日狀態旗標
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusFlags {
    /// 當日跨越的間隔
    pub crossing_threshold: Option<ServiceInterval>,

    /// 保養前預警窗口內
    pub is_pre_window: bool,

    /// 逾期
    pub is_overdue: bool,

    /// 當日有保養記錄
    pub is_serviced: bool,
}

impl StatusFlags {
    /// 是否為間隔跨越日
    pub fn is_interval_crossing(&self) -> bool {
        self.crossing_threshold.is_some()
    }
}

/// 計劃保養（依上次保養時數向上取整得到的下次保養點）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedService {
    /// 序號（1-3）
    pub slot: u8,

    /// 計劃錶頭時數
    pub planned_hours: Decimal,

    /// 推估達到計劃時數的日期（本月未達到為 None）
    pub date: Option<NaiveDate>,

    /// 到期的保養類型
    pub interval: Option<ServiceInterval>,
}

/// 排程輸出行（每資產每日一行）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 車隊編號
    pub fleet_number: String,

    /// 日期
    pub date: NaiveDate,

    /// 實際讀數
    pub start_hours: Option<Decimal>,

    /// 推估運轉時數
    pub est_hours: Decimal,

    /// 使用的每日使用時數
    pub daily_usage: UsageRate,

    /// 當日跨越的間隔
    pub crossing_threshold: Option<ServiceInterval>,

    /// 保養前預警窗口內
    pub is_pre_window: bool,

    /// 逾期
    pub is_overdue: bool,

    /// 當日有保養記錄
    pub is_serviced: bool,

    /// 截至當日的最近一次保養
    pub previous_service: Option<ServiceRecord>,
}

impl ScheduleRow {
    /// 由推估與狀態組成輸出行
    pub fn from_parts(
        projection: &DayProjection,
        flags: StatusFlags,
        daily_usage: UsageRate,
        previous_service: Option<ServiceRecord>,
    ) -> Self {
        Self {
            fleet_number: projection.fleet_number.clone(),
            date: projection.date,
            start_hours: projection.start_hours,
            est_hours: projection.est_hours,
            daily_usage,
            crossing_threshold: flags.crossing_threshold,
            is_pre_window: flags.is_pre_window,
            is_overdue: flags.is_overdue,
            is_serviced: flags.is_serviced,
            previous_service,
        }
    }

    /// 上次保養時數對應的間隔（歷史欄位著色用）
    pub fn previous_service_interval(&self) -> Option<ServiceInterval> {
        let service = self.previous_service.as_ref()?;
        service
            .interval
            .or_else(|| service.hours.and_then(ServiceInterval::from_previous_service_hours))
    }
}
