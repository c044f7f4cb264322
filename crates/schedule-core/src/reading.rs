//! 錶頭讀數與保養記錄

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ServiceInterval, UsageRate};

/// 錶頭讀數（日班開工前記錄的運轉時數）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterReading {
    /// 車隊編號
    pub fleet_number: String,

    /// 讀數日期
    pub date: NaiveDate,

    /// 開工時數
    pub start_hours: Decimal,

    /// 關聯的保養單號
    pub service_ref: Option<String>,

    /// 關聯的故障/維修單號
    pub maintenance_ref: Option<String>,
}

impl MeterReading {
    /// 創建新的讀數
    pub fn new(fleet_number: String, date: NaiveDate, start_hours: Decimal) -> Self {
        Self {
            fleet_number,
            date,
            start_hours,
            service_ref: None,
            maintenance_ref: None,
        }
    }

    /// 建構器模式：設置保養單號
    pub fn with_service_ref(mut self, service_ref: String) -> Self {
        self.service_ref = Some(service_ref);
        self
    }

    /// 建構器模式：設置維修單號
    pub fn with_maintenance_ref(mut self, maintenance_ref: String) -> Self {
        self.maintenance_ref = Some(maintenance_ref);
        self
    }
}

/// 保養記錄（機械保養報告，類型為保養）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    /// 保養日期
    pub service_date: NaiveDate,

    /// 保養時的錶頭時數
    pub hours: Option<Decimal>,

    /// 保養間隔
    pub interval: Option<ServiceInterval>,

    /// 報告參考號
    pub reference: Option<String>,
}

impl ServiceRecord {
    /// 創建新的保養記錄
    pub fn new(service_date: NaiveDate) -> Self {
        Self {
            service_date,
            hours: None,
            interval: None,
            reference: None,
        }
    }

    /// 建構器模式：設置錶頭時數
    pub fn with_hours(mut self, hours: Decimal) -> Self {
        self.hours = Some(hours);
        self
    }

    /// 建構器模式：設置保養間隔
    pub fn with_interval(mut self, interval: ServiceInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// 建構器模式：設置報告參考號
    pub fn with_reference(mut self, reference: String) -> Self {
        self.reference = Some(reference);
        self
    }

    /// 是否帶有可用的錶頭時數
    pub fn has_hours(&self) -> bool {
        self.hours.is_some_and(|h| h > Decimal::ZERO)
    }
}

/// 上月延續種子（第 1 天無讀數時使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSeed {
    /// 上月最後一天的推估時數
    pub last_est_hours: Decimal,

    /// 上月的每日使用時數
    pub daily_usage: UsageRate,
}

impl MonthSeed {
    /// 創建延續種子
    pub fn new(last_est_hours: Decimal, daily_usage: UsageRate) -> Self {
        Self {
            last_est_hours,
            daily_usage,
        }
    }

    /// 第 1 天的推估時數
    pub fn first_day_estimate(&self) -> Decimal {
        self.last_est_hours + self.daily_usage.hours()
    }
}
