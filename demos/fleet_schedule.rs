//! 車隊保養排程示例：多台設備、保養歷史、計劃保養點與增量重算

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use service_schedule::calc::{DueSoonCalculator, OverdueCalculator};
use service_schedule::{
    logging, Asset, AssetScheduleInput, MonthSeed, MonthSpan, ScheduleConfig, ScheduleEvent,
    ScheduleSession, ServiceInterval, ServiceRecord, UsageRate,
};

fn main() -> anyhow::Result<()> {
    logging::init();

    println!("=== 車隊保養排程示例 ===\n");

    let config = ScheduleConfig::from_json_str(
        r#"{
            "pre_window_hours": 60,
            "overdue_margin_hours": 50,
            "zero_reading_policy": "treat_as_absent"
        }"#,
    )?;
    let due_soon_hours = config.due_soon_hours;

    let month = MonthSpan::new(2025, 10)?;
    let date = |m: u32, d: u32| NaiveDate::from_ymd_opt(2025, m, d).context("無效日期");

    let excavator = AssetScheduleInput::new(
        Asset::new("EX-001".to_string())
            .with_category("Excavator".to_string())
            .with_model("EC480".to_string())
            .with_daily_usage(UsageRate::from_hours(18)),
    )
    .with_seed(MonthSeed::new(Decimal::from(4380), UsageRate::from_hours(18)))
    .with_reading(date(10, 8)?, Decimal::from(4530))
    .with_service(
        ServiceRecord::new(date(9, 14)?)
            .with_hours(Decimal::from(4255))
            .with_interval(ServiceInterval::H250)
            .with_reference("MSR-0912".to_string()),
    );

    // 未設定每日使用時數：以 9 月讀數回溯平均
    let dozer = AssetScheduleInput::new(
        Asset::new("DZ-002".to_string())
            .with_category("Dozer".to_string())
            .with_model("D6T".to_string()),
    )
    .with_reading(date(9, 28)?, Decimal::from(1190))
    .with_reading(date(9, 29)?, Decimal::from(1202))
    .with_reading(date(9, 30)?, Decimal::from(1214))
    .with_service(
        ServiceRecord::new(date(9, 1)?)
            .with_hours(Decimal::from(1000))
            .with_interval(ServiceInterval::H1000),
    );

    let mut session = ScheduleSession::new(config, month).with_assets([excavator, dozer]);
    session.recompute();

    for schedule in session.schedules() {
        println!(
            "{} ({}): 每日 {} 小時，月底推估 {}",
            schedule.fleet_number(),
            schedule.asset.category.as_deref().unwrap_or("-"),
            schedule.daily_usage,
            schedule
                .rows
                .last()
                .map(|r| r.est_hours.to_string())
                .unwrap_or_default()
        );
        for crossing in &schedule.crossings {
            println!("  到期 {} 於 {}（推估 {}）", crossing.threshold, crossing.date, crossing.est_hours);
        }
        for planned in &schedule.planned_services {
            println!(
                "  計劃 #{} {} 小時 {} {}",
                planned.slot,
                planned.planned_hours,
                planned.date.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string()),
                planned.interval.map(|i| i.to_string()).unwrap_or_default()
            );
        }
    }

    let schedules: Vec<_> = session.schedules().cloned().collect();

    println!("\n即將到期（{} 小時內）:", due_soon_hours);
    for entry in DueSoonCalculator::due_soon(&schedules, due_soon_hours) {
        println!("  {} {} 推估 {} / 計劃 {}", entry.date, entry.fleet_number, entry.est_hours, entry.planned_hours);
    }

    println!("\n逾期事件:");
    for schedule in &schedules {
        for event in OverdueCalculator::overdue_events(schedule) {
            println!(
                "  {} {} 於 {} 到期，{} 逾期",
                event.fleet_number, event.interval, event.anchor_date, event.overdue_date
            );
        }
    }

    // 現場修改使用時數並錄入保養，只重算 EX-001
    session.apply(ScheduleEvent::UsageRateEdited {
        fleet_number: "EX-001".to_string(),
        rate: Decimal::from(22),
    })?;
    session.apply(ScheduleEvent::ServiceRecorded {
        fleet_number: "EX-001".to_string(),
        record: ServiceRecord::new(date(10, 16)?)
            .with_hours(Decimal::from(4700))
            .with_interval(ServiceInterval::H500)
            .with_reference("MSR-1016".to_string()),
    })?;

    println!("\n增量重算:");
    for schedule in session.recompute() {
        println!(
            "  {}: 跨越 {} 次，逾期 {} 天",
            schedule.fleet_number(),
            schedule.crossings.len(),
            schedule.rows.iter().filter(|r| r.is_overdue).count()
        );
    }

    // 切換到 11 月，以 10 月底推估值延續
    session.apply(ScheduleEvent::MonthChanged(month.next()))?;
    session.recompute();
    for schedule in session.schedules() {
        if let Some(first) = schedule.rows.first() {
            println!("  {} {} 推估 {}", schedule.fleet_number(), first.date, first.est_hours);
        }
    }

    Ok(())
}
