//! 單台設備保養排程示例

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use service_schedule::{
    logging, Asset, AssetScheduleInput, MonthSpan, ScheduleCalculator, ScheduleConfig, UsageRate,
};

fn main() -> anyhow::Result<()> {
    logging::init();

    println!("=== 單台設備保養排程示例 ===\n");

    let month = MonthSpan::from_label("October 2025")?;
    let date = |d: u32| {
        NaiveDate::from_ymd_opt(month.year, month.month, d).context("無效日期")
    };

    let asset = Asset::new("EX-001".to_string())
        .with_category("Excavator".to_string())
        .with_model("EC480".to_string())
        .with_daily_usage(UsageRate::parse("15")?);

    let input = AssetScheduleInput::new(asset).with_reading(date(10)?, Decimal::from(260));

    let calculator = ScheduleCalculator::new(ScheduleConfig::default());
    let result = calculator.calculate(month, vec![input]);
    let schedule = result.schedule("EX-001").context("缺少 EX-001 排程")?;

    println!("{}，每日 {} 小時\n", month, schedule.daily_usage);
    println!("{:<12} {:>8} {:>8}  狀態", "日期", "讀數", "推估");
    for row in &schedule.rows {
        let mut status = Vec::new();
        if let Some(interval) = row.crossing_threshold {
            status.push(format!("到期 {}", interval));
        }
        if row.is_pre_window {
            status.push("預警".to_string());
        }
        if row.is_overdue {
            status.push("逾期".to_string());
        }
        if row.is_serviced {
            status.push("已保養".to_string());
        }

        println!(
            "{:<12} {:>8} {:>8}  {}",
            row.date.to_string(),
            row.start_hours.map(|h| h.to_string()).unwrap_or_default(),
            row.est_hours,
            status.join(", ")
        );
    }

    for warning in &result.warnings {
        println!("\n[{:?}] {}: {}", warning.severity, warning.fleet_number, warning.message);
    }

    Ok(())
}
