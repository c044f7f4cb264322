//! 每日使用時數

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, ScheduleError};

/// 每日使用時數上限（小時/天）
pub const MAX_DAILY_USAGE: u32 = 24;

/// 預設每日使用時數（未設定時）
pub const DEFAULT_DAILY_USAGE: u32 = 15;

/// 每日使用時數（永遠落在 [0, 24] 之間）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct UsageRate(Decimal);

impl UsageRate {
    /// 零使用
    pub const ZERO: UsageRate = UsageRate(Decimal::ZERO);

    /// 創建使用時數，超出範圍時飽和到邊界
    pub fn new(hours: Decimal) -> Self {
        Self(hours.clamp(Decimal::ZERO, Decimal::from(MAX_DAILY_USAGE)))
    }

    /// 從整數小時創建
    pub fn from_hours(hours: i64) -> Self {
        Self::new(Decimal::from(hours))
    }

    /// 從浮點數創建，NaN / 無限大視為 0
    pub fn from_f64(hours: f64) -> Self {
        if !hours.is_finite() {
            return Self::ZERO;
        }
        Decimal::from_f64(hours).map(Self::new).unwrap_or(Self::ZERO)
    }

    /// 嚴格解析（使用者輸入驗證用）
    ///
    /// 無法解析時返回 `InvalidRate`；可解析但超出範圍的值照常飽和。
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        trimmed
            .parse::<Decimal>()
            .map(Self::new)
            .map_err(|_| ScheduleError::InvalidRate(trimmed.to_string()))
    }

    /// 寬鬆解析：無法解析的輸入視為 0
    pub fn parse_lenient(input: &str) -> Self {
        Self::parse(input).unwrap_or(Self::ZERO)
    }

    /// 預設使用時數
    pub fn default_rate() -> Self {
        Self::from_hours(DEFAULT_DAILY_USAGE as i64)
    }

    /// 小時數
    pub fn hours(&self) -> Decimal {
        self.0
    }

    /// 四捨五入到整數小時
    pub fn rounded(&self) -> Self {
        Self(self.0.round())
    }

    /// 轉為浮點數（顯示用）
    pub fn as_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl Default for UsageRate {
    fn default() -> Self {
        Self::default_rate()
    }
}

impl From<Decimal> for UsageRate {
    fn from(hours: Decimal) -> Self {
        Self::new(hours)
    }
}

impl From<UsageRate> for Decimal {
    fn from(rate: UsageRate) -> Self {
        rate.0
    }
}

impl std::fmt::Display for UsageRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
