//! # Service Schedule
//!
//! 設備運轉時數推估與保養排程
//!
//! 各子 crate 的門面：
//! - [`model`]：資料模型、配置、錯誤
//! - [`calc`]：推估、間隔跨越、狀態分類與排程計算
//! - [`cache`]：增量重算會話

pub mod logging;

pub use schedule_cache as cache;
pub use schedule_calc as calc;
pub use schedule_core as model;

pub use schedule_cache::{ScheduleEvent, ScheduleSession, SessionError};
pub use schedule_calc::{
    AssetSchedule, AssetScheduleInput, ScheduleCalculator, ScheduleResult, ScheduleWarning,
    WarningSeverity,
};
pub use schedule_core::{
    Asset, MonthSeed, MonthSpan, ScheduleConfig, ScheduleError, ServiceInterval, ServiceRecord,
    UsageRate,
};
