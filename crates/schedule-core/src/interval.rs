//! 保養間隔模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, ScheduleError};

/// 保養間隔步長（小時）
pub const INTERVAL_STEP_HOURS: u32 = 250;

/// 保養間隔完整週期（小時）
pub const INTERVAL_CYCLE_HOURS: u32 = 2000;

/// 保養間隔（累計運轉時數檢查點）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ServiceInterval {
    /// 250 小時保養
    H250,
    /// 500 小時保養
    H500,
    /// 750 小時保養
    H750,
    /// 1000 小時保養
    H1000,
    /// 2000 小時保養
    H2000,
}

impl ServiceInterval {
    /// 由小到大排列的所有間隔
    pub const ALL: [ServiceInterval; 5] = [
        ServiceInterval::H250,
        ServiceInterval::H500,
        ServiceInterval::H750,
        ServiceInterval::H1000,
        ServiceInterval::H2000,
    ];

    /// 間隔小時數
    pub fn hours(&self) -> u32 {
        match self {
            ServiceInterval::H250 => 250,
            ServiceInterval::H500 => 500,
            ServiceInterval::H750 => 750,
            ServiceInterval::H1000 => 1000,
            ServiceInterval::H2000 => 2000,
        }
    }

    /// 間隔小時數（Decimal）
    pub fn threshold(&self) -> Decimal {
        Decimal::from(self.hours())
    }

    /// 從精確小時數轉換
    pub fn from_hours(hours: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|iv| iv.hours() == hours)
    }

    /// 從文字解析，允許 "500 Hours" 這類格式
    pub fn parse(input: &str) -> Option<Self> {
        let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse::<u32>().ok().and_then(Self::from_hours)
    }

    /// 下一個追蹤的間隔（嚴格大於自身；2000 之後回到 250）
    pub fn next(&self) -> Self {
        match self {
            ServiceInterval::H250 => ServiceInterval::H500,
            ServiceInterval::H500 => ServiceInterval::H750,
            ServiceInterval::H750 => ServiceInterval::H1000,
            ServiceInterval::H1000 => ServiceInterval::H2000,
            ServiceInterval::H2000 => ServiceInterval::H250,
        }
    }

    /// 嚴格大於指定時數的最小間隔
    pub fn smallest_above(hours: Decimal) -> Option<Self> {
        Self::ALL.into_iter().find(|iv| iv.threshold() > hours)
    }

    /// 錶頭時數到期的保養類型
    ///
    /// 以 2000 小時為週期：250, 500, 750, 1000, 250, 500, 750, 2000。
    /// 非 250 的正整數倍時返回 None。
    pub fn due_at_meter_hours(meter_hours: Decimal) -> Option<Self> {
        let step = Decimal::from(INTERVAL_STEP_HOURS);
        if meter_hours <= Decimal::ZERO || !(meter_hours % step).is_zero() {
            return None;
        }

        let position = meter_hours % Decimal::from(INTERVAL_CYCLE_HOURS);
        if position.is_zero() {
            return Some(ServiceInterval::H2000);
        }

        let position = position % Decimal::from(1000);
        if position.is_zero() {
            return Some(ServiceInterval::H1000);
        }
        Self::ALL.into_iter().find(|iv| iv.threshold() == position)
    }

    /// 計劃時數之後的下一次保養類型（「下次保養間隔」欄位）
    pub fn label_after(planned_hours: Decimal) -> Option<Self> {
        if planned_hours <= Decimal::ZERO {
            return None;
        }
        Self::due_at_meter_hours(planned_hours + Decimal::from(INTERVAL_STEP_HOURS))
    }

    /// 上次保養時數向下取整到 250 後對應的間隔
    ///
    /// 2000 以上一律視為 2000；其餘只接受精確落在間隔集合中的值（1250 之類返回 None）。
    pub fn from_previous_service_hours(hours: Decimal) -> Option<Self> {
        if hours <= Decimal::ZERO {
            return None;
        }
        let step = Decimal::from(INTERVAL_STEP_HOURS);
        let floored = ((hours / step).floor() * step).min(Decimal::from(INTERVAL_CYCLE_HOURS));
        Self::ALL.into_iter().find(|iv| iv.threshold() == floored)
    }
}

impl From<ServiceInterval> for u32 {
    fn from(interval: ServiceInterval) -> Self {
        interval.hours()
    }
}

impl TryFrom<u32> for ServiceInterval {
    type Error = ScheduleError;

    fn try_from(hours: u32) -> Result<Self> {
        Self::from_hours(hours)
            .ok_or_else(|| ScheduleError::Other(format!("不支援的保養間隔: {}", hours)))
    }
}

impl std::fmt::Display for ServiceInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hours", self.hours())
    }
}

/// 上次保養基準
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceBaseline {
    /// 上次保養時的錶頭時數
    pub hours: Decimal,

    /// 上次保養的間隔
    pub last_interval: Option<ServiceInterval>,
}

impl ServiceBaseline {
    /// 創建基準
    pub fn new(hours: Decimal, last_interval: Option<ServiceInterval>) -> Self {
        Self {
            hours,
            last_interval,
        }
    }

    /// 只有上次間隔、錶頭從 0 起算
    pub fn from_interval(last_interval: Option<ServiceInterval>) -> Self {
        Self::new(Decimal::ZERO, last_interval)
    }

    /// 下一個要追蹤的間隔
    pub fn next_threshold(&self) -> ServiceInterval {
        self.last_interval
            .map(|iv| iv.next())
            .unwrap_or(ServiceInterval::H250)
    }

    /// 自上次保養起累計的時數
    pub fn elapsed(&self, est_hours: Decimal) -> Decimal {
        est_hours - self.hours
    }
}
