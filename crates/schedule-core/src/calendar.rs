//! 排程月份模型

use chrono::{Datelike, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::{Result, ScheduleError};

/// 英文月份名稱（月份標籤用）
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// 排程月份（年 + 1 起算的月份）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthSpan {
    /// 年
    pub year: i32,
    /// 月（1-12）
    pub month: u32,
}

impl MonthSpan {
    /// 創建排程月份
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ScheduleError::InvalidMonth(format!("{}-{}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// 包含指定日期的月份
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// 從月份標籤解析，例如 "January 2025"
    pub fn from_label(label: &str) -> Result<Self> {
        let parts: Vec<&str> = label.split_whitespace().collect();
        let [month_name, year_text] = parts.as_slice() else {
            return Err(ScheduleError::InvalidMonthLabel(label.to_string()));
        };

        let month_index = MONTH_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(month_name))
            .ok_or_else(|| ScheduleError::InvalidMonthLabel(label.to_string()))?;

        let year = year_text
            .parse::<i32>()
            .map_err(|_| ScheduleError::InvalidMonthLabel(label.to_string()))?;

        Self::new(year, month_index as u32 + 1)
    }

    /// 月份標籤，例如 "January 2025"
    ///
    /// 無效月份顯示為 "2025-13"。
    pub fn label(&self) -> String {
        let name = self
            .month
            .checked_sub(1)
            .and_then(|index| MONTH_NAMES.get(index as usize));
        match name {
            Some(name) => format!("{} {}", name, self.year),
            None => format!("{}-{}", self.year, self.month),
        }
    }

    /// 月份是否有效
    pub fn is_valid(&self) -> bool {
        self.first_day().is_some()
    }

    /// 上個月（無效月份返回自身）
    pub fn previous(&self) -> Self {
        if !self.is_valid() {
            return *self;
        }
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// 下個月（無效月份返回自身）
    pub fn next(&self) -> Self {
        if !self.is_valid() {
            return *self;
        }
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// 月初
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// 月底
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.first_day()?
            .checked_add_months(Months::new(1))?
            .pred_opt()
    }

    /// 當月天數
    pub fn num_days(&self) -> u32 {
        self.last_day().map(|d| d.day()).unwrap_or(0)
    }

    /// 當月所有日期（升序）
    ///
    /// 無效月份返回空列表。
    pub fn days(&self) -> Vec<NaiveDate> {
        let (Some(first), Some(last)) = (self.first_day(), self.last_day()) else {
            return Vec::new();
        };
        first.iter_days().take_while(|d| *d <= last).collect()
    }

    /// 日期是否在此月份內
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::fmt::Display for MonthSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// 保養日落在週日時提前到週六
///
/// 提前後早於月初則保留原日期。
pub fn adjust_sunday_to_saturday(date: NaiveDate, month_start: Option<NaiveDate>) -> NaiveDate {
    if date.weekday() != Weekday::Sun {
        return date;
    }

    match date.pred_opt() {
        Some(saturday) if month_start.map_or(true, |start| saturday >= start) => saturday,
        _ => date,
    }
}
