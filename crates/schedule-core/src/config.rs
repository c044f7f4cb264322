//! 保養排程配置

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, ScheduleError, UsageRate};

/// 保養排程參數配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// 每日使用時數預設值（資產未設定且無歷史讀數時）
    pub default_daily_usage: UsageRate,

    /// 保養前預警窗口（小時）
    pub pre_window_hours: Decimal,

    /// 逾期容許時數（超過保養點多少小時算逾期）
    pub overdue_margin_hours: Decimal,

    /// 即將到期摘要窗口（小時）
    pub due_soon_hours: Decimal,

    /// 平均每日使用時數的回溯天數
    pub usage_average_window_days: u32,

    /// 計劃保養日落在週日時是否提前到週六
    pub shift_sunday_services: bool,

    /// 讀數為 0 時的處理方式
    ///
    /// 新購設備的錶頭可能真的是 0，預設仍視為「無讀數」。
    pub zero_reading_policy: ZeroReadingPolicy,
}

impl ScheduleConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            default_daily_usage: UsageRate::default_rate(),
            pre_window_hours: Decimal::from(60),
            overdue_margin_hours: Decimal::from(50),
            due_soon_hours: Decimal::from(50),
            usage_average_window_days: 30,
            shift_sunday_services: true,
            zero_reading_policy: ZeroReadingPolicy::TreatAsAbsent,
        }
    }

    /// 從 JSON 載入配置（缺少的欄位使用預設值）
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ScheduleError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if self.pre_window_hours < Decimal::ZERO {
            return Err(ScheduleError::InvalidConfig(format!(
                "pre_window_hours 不可為負: {}",
                self.pre_window_hours
            )));
        }
        if self.overdue_margin_hours < Decimal::ZERO {
            return Err(ScheduleError::InvalidConfig(format!(
                "overdue_margin_hours 不可為負: {}",
                self.overdue_margin_hours
            )));
        }
        if self.due_soon_hours < Decimal::ZERO {
            return Err(ScheduleError::InvalidConfig(format!(
                "due_soon_hours 不可為負: {}",
                self.due_soon_hours
            )));
        }
        if self.usage_average_window_days == 0 {
            return Err(ScheduleError::InvalidConfig(
                "usage_average_window_days 必須大於 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 建構器模式：設置預設每日使用時數
    pub fn with_default_daily_usage(mut self, rate: UsageRate) -> Self {
        self.default_daily_usage = rate;
        self
    }

    /// 建構器模式：設置保養前預警窗口
    pub fn with_pre_window_hours(mut self, hours: Decimal) -> Self {
        self.pre_window_hours = hours;
        self
    }

    /// 建構器模式：設置逾期容許時數
    pub fn with_overdue_margin_hours(mut self, hours: Decimal) -> Self {
        self.overdue_margin_hours = hours;
        self
    }

    /// 建構器模式：設置即將到期窗口
    pub fn with_due_soon_hours(mut self, hours: Decimal) -> Self {
        self.due_soon_hours = hours;
        self
    }

    /// 建構器模式：設置平均使用時數回溯天數
    pub fn with_usage_average_window_days(mut self, days: u32) -> Self {
        self.usage_average_window_days = days;
        self
    }

    /// 建構器模式：設置週日保養是否提前
    pub fn with_shift_sunday_services(mut self, shift: bool) -> Self {
        self.shift_sunday_services = shift;
        self
    }

    /// 建構器模式：設置 0 讀數處理方式
    pub fn with_zero_reading_policy(mut self, policy: ZeroReadingPolicy) -> Self {
        self.zero_reading_policy = policy;
        self
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 讀數為 0 的處理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroReadingPolicy {
    /// 視為無讀數（沿用推估）
    #[default]
    TreatAsAbsent,

    /// 視為真實讀數（重設基準為 0）
    TreatAsReading,
}

impl ZeroReadingPolicy {
    /// 讀數是否可作為基準
    pub fn accepts(&self, hours: Decimal) -> bool {
        match self {
            ZeroReadingPolicy::TreatAsAbsent => hours > Decimal::ZERO,
            ZeroReadingPolicy::TreatAsReading => hours >= Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScheduleConfig::default();

        assert_eq!(config.default_daily_usage.hours(), Decimal::from(15));
        assert_eq!(config.pre_window_hours, Decimal::from(60));
        assert_eq!(config.overdue_margin_hours, Decimal::from(50));
        assert_eq!(config.usage_average_window_days, 30);
        assert!(config.shift_sunday_services);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ScheduleConfig::new()
            .with_default_daily_usage(UsageRate::from_hours(10))
            .with_pre_window_hours(Decimal::from(40))
            .with_overdue_margin_hours(Decimal::from(25))
            .with_shift_sunday_services(false)
            .with_zero_reading_policy(ZeroReadingPolicy::TreatAsReading);

        assert_eq!(config.default_daily_usage.hours(), Decimal::from(10));
        assert_eq!(config.pre_window_hours, Decimal::from(40));
        assert_eq!(config.overdue_margin_hours, Decimal::from(25));
        assert!(!config.shift_sunday_services);
        assert_eq!(config.zero_reading_policy, ZeroReadingPolicy::TreatAsReading);
    }

    #[test]
    fn test_from_json_partial() {
        let config = ScheduleConfig::from_json_str(
            r#"{ "overdue_margin_hours": "75", "zero_reading_policy": "treat_as_reading" }"#,
        )
        .unwrap();

        assert_eq!(config.overdue_margin_hours, Decimal::from(75));
        assert_eq!(config.pre_window_hours, Decimal::from(60));
        assert_eq!(config.zero_reading_policy, ZeroReadingPolicy::TreatAsReading);
    }

    #[test]
    fn test_from_json_rejects_negative_window() {
        let result = ScheduleConfig::from_json_str(r#"{ "pre_window_hours": "-1" }"#);
        assert!(matches!(result, Err(ScheduleError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_json_malformed() {
        let result = ScheduleConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ScheduleError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_reading_policy() {
        assert!(!ZeroReadingPolicy::TreatAsAbsent.accepts(Decimal::ZERO));
        assert!(ZeroReadingPolicy::TreatAsAbsent.accepts(Decimal::from(1)));
        assert!(ZeroReadingPolicy::TreatAsReading.accepts(Decimal::ZERO));
        assert!(!ZeroReadingPolicy::TreatAsReading.accepts(Decimal::from(-1)));
    }
}
