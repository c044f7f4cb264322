//! # Service Schedule Core
//!
//! 核心資料模型與類型定義

pub mod asset;
pub mod calendar;
pub mod config;
pub mod interval;
pub mod projection;
pub mod reading;
pub mod usage;

// Re-export 主要類型
pub use asset::Asset;
pub use calendar::{adjust_sunday_to_saturday, MonthSpan};
pub use config::{ScheduleConfig, ZeroReadingPolicy};
pub use interval::{ServiceBaseline, ServiceInterval};
pub use projection::{CrossingEvent, DayProjection, PlannedService, ScheduleRow, StatusFlags};
pub use reading::{MeterReading, MonthSeed, ServiceRecord};
pub use usage::UsageRate;

/// 保養排程錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("無效的每日使用時數: {0}")]
    InvalidRate(String),

    #[error("無效的月份: {0}")]
    InvalidMonth(String),

    #[error("無效的月份標籤: {0}（格式應為 'January 2025'）")]
    InvalidMonthLabel(String),

    #[error("無效的排程配置: {0}")]
    InvalidConfig(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
