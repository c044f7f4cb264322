//! 增量重算

use chrono::NaiveDate;
use rust_decimal::Decimal;
use schedule_calc::{AssetSchedule, AssetScheduleInput, ScheduleCalculator, ScheduleWarning};
use schedule_core::{MonthSeed, MonthSpan, ScheduleConfig, ServiceRecord, UsageRate};
use std::collections::BTreeMap;

use crate::DirtyTracker;

/// 排程會話錯誤
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("未知資產: {0}")]
    UnknownAsset(String),

    #[error("資產已存在: {0}")]
    DuplicateAsset(String),
}

/// 會話事件
#[derive(Debug, Clone)]
pub enum ScheduleEvent {
    /// 修改每日使用時數（超出 [0, 24] 會被限制）
    UsageRateEdited { fleet_number: String, rate: Decimal },

    /// 錄入錶頭讀數（同日覆蓋）
    ReadingRecorded {
        fleet_number: String,
        date: NaiveDate,
        hours: Decimal,
    },

    /// 錄入保養記錄
    ServiceRecorded {
        fleet_number: String,
        record: ServiceRecord,
    },

    AssetAdded(AssetScheduleInput),

    AssetRemoved(String),

    /// 切換排程月份
    MonthChanged(MonthSpan),
}

impl ScheduleEvent {
    /// 受影響的車隊編號（月份切換影響全部，返回 None）
    pub fn fleet_number(&self) -> Option<&str> {
        match self {
            ScheduleEvent::UsageRateEdited { fleet_number, .. }
            | ScheduleEvent::ReadingRecorded { fleet_number, .. }
            | ScheduleEvent::ServiceRecorded { fleet_number, .. }
            | ScheduleEvent::AssetRemoved(fleet_number) => Some(fleet_number),
            ScheduleEvent::AssetAdded(input) => Some(input.fleet_number()),
            ScheduleEvent::MonthChanged(_) => None,
        }
    }
}

/// 排程會話
///
/// 保存各資產的輸入與最近一次排程結果，事件只標記受影響的資產，
/// `recompute` 時才重算髒資產。
pub struct ScheduleSession {
    calculator: ScheduleCalculator,
    month: MonthSpan,
    inputs: BTreeMap<String, AssetScheduleInput>,
    schedules: BTreeMap<String, AssetSchedule>,
    warnings: BTreeMap<String, Vec<ScheduleWarning>>,
    tracker: DirtyTracker,
}

impl ScheduleSession {
    /// 創建新的排程會話
    pub fn new(config: ScheduleConfig, month: MonthSpan) -> Self {
        Self {
            calculator: ScheduleCalculator::new(config),
            month,
            inputs: BTreeMap::new(),
            schedules: BTreeMap::new(),
            warnings: BTreeMap::new(),
            tracker: DirtyTracker::new(),
        }
    }

    /// 建構器模式：加入資產
    pub fn with_assets(mut self, inputs: impl IntoIterator<Item = AssetScheduleInput>) -> Self {
        for input in inputs {
            let fleet_number = input.fleet_number().to_string();
            self.tracker.mark_dirty(&fleet_number);
            self.inputs.insert(fleet_number, input);
        }
        self
    }

    /// 套用事件並標記受影響資產
    pub fn apply(&mut self, event: ScheduleEvent) -> Result<(), SessionError> {
        tracing::debug!("套用事件: {:?}", event);

        match event {
            ScheduleEvent::UsageRateEdited { fleet_number, rate } => {
                let input = self.input_mut(&fleet_number)?;
                input.asset.daily_usage = Some(UsageRate::new(rate));
                self.tracker.mark_dirty(&fleet_number);
            }
            ScheduleEvent::ReadingRecorded {
                fleet_number,
                date,
                hours,
            } => {
                let input = self.input_mut(&fleet_number)?;
                input.readings.insert(date, hours);
                self.tracker.mark_dirty(&fleet_number);
            }
            ScheduleEvent::ServiceRecorded {
                fleet_number,
                record,
            } => {
                let input = self.input_mut(&fleet_number)?;
                input.services.push(record);
                self.tracker.mark_dirty(&fleet_number);
            }
            ScheduleEvent::AssetAdded(input) => {
                let fleet_number = input.fleet_number().to_string();
                if self.inputs.contains_key(&fleet_number) {
                    return Err(SessionError::DuplicateAsset(fleet_number));
                }
                self.tracker.mark_dirty(&fleet_number);
                self.inputs.insert(fleet_number, input);
            }
            ScheduleEvent::AssetRemoved(fleet_number) => {
                if self.inputs.remove(&fleet_number).is_none() {
                    return Err(SessionError::UnknownAsset(fleet_number));
                }
                self.schedules.remove(&fleet_number);
                self.warnings.remove(&fleet_number);
                self.tracker.forget(&fleet_number);
            }
            ScheduleEvent::MonthChanged(month) => self.change_month(month),
        }

        Ok(())
    }

    /// 重算所有髒資產並返回其最新排程
    pub fn recompute(&mut self) -> Vec<&AssetSchedule> {
        let dirty = self.tracker.take_dirty();
        if dirty.is_empty() {
            return Vec::new();
        }

        self.recompute_fleets(&dirty);

        dirty
            .iter()
            .filter_map(|fleet_number| self.schedules.get(fleet_number))
            .collect()
    }

    /// 最近一次計算的資產排程
    pub fn schedule(&self, fleet_number: &str) -> Option<&AssetSchedule> {
        self.schedules.get(fleet_number)
    }

    /// 最近一次計算的全部排程（按車隊編號排序）
    pub fn schedules(&self) -> impl Iterator<Item = &AssetSchedule> {
        self.schedules.values()
    }

    /// 最近一次計算的資產警告
    pub fn warnings(&self, fleet_number: &str) -> &[ScheduleWarning] {
        self.warnings
            .get(fleet_number)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn month(&self) -> MonthSpan {
        self.month
    }

    pub fn is_dirty(&self, fleet_number: &str) -> bool {
        self.tracker.is_dirty(fleet_number)
    }

    fn input_mut(&mut self, fleet_number: &str) -> Result<&mut AssetScheduleInput, SessionError> {
        self.inputs
            .get_mut(fleet_number)
            .ok_or_else(|| SessionError::UnknownAsset(fleet_number.to_string()))
    }

    fn recompute_fleets(&mut self, fleet_numbers: &[String]) {
        tracing::info!("增量重算 {}：{} 台資產", self.month, fleet_numbers.len());
        let start_time = std::time::Instant::now();

        for fleet_number in fleet_numbers {
            let Some(input) = self.inputs.get(fleet_number) else {
                continue;
            };
            let mut warnings = Vec::new();
            let schedule = self
                .calculator
                .calculate_asset(self.month, input, &mut warnings);
            self.schedules.insert(fleet_number.clone(), schedule);
            self.warnings.insert(fleet_number.clone(), warnings);
        }

        tracing::info!("增量重算完成，耗時 {:?}", start_time.elapsed());
    }

    /// 切換月份：往後一個月時以上月最後一天的推估值作為延續種子
    ///
    /// 種子取自上月的最新排程，尚未重算的資產先按上月重算。
    fn change_month(&mut self, month: MonthSpan) {
        let follows = month.is_valid() && month.previous() == self.month;

        if follows {
            let stale = self.tracker.take_dirty();
            if !stale.is_empty() {
                self.recompute_fleets(&stale);
            }
        }

        for (fleet_number, input) in self.inputs.iter_mut() {
            input.seed = if follows {
                self.schedules.get(fleet_number).and_then(|schedule| {
                    let last = schedule.rows.last()?;
                    Some(MonthSeed::new(last.est_hours, schedule.daily_usage))
                })
            } else {
                None
            };
        }

        tracing::debug!("切換月份 {} → {}（延續種子: {}）", self.month, month, follows);
        self.month = month;
        self.tracker
            .mark_all(self.inputs.keys().map(String::as_str));
    }
}
