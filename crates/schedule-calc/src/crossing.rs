//! 保養間隔跨越偵測

use schedule_core::{CrossingEvent, DayProjection, ServiceBaseline, ServiceInterval, ServiceRecord};

/// 保養間隔跨越偵測器
pub struct CrossingDetector;

impl CrossingDetector {
    /// 偵測推估序列中的間隔跨越日
    ///
    /// 一次只追蹤一個間隔。兩天之間跳過多個間隔時只回報最小的那個，
    /// 之後追蹤大於當前累計時數的下一個間隔，被跳過的間隔不補報。
    pub fn detect_interval_crossings(
        series: &[DayProjection],
        baseline: &ServiceBaseline,
    ) -> Vec<CrossingEvent> {
        Self::detect_with_services(series, baseline, &[])
    }

    /// 偵測間隔跨越日，月內有帶時數的保養記錄時在當天重設基準
    pub fn detect_with_services(
        series: &[DayProjection],
        baseline: &ServiceBaseline,
        services: &[ServiceRecord],
    ) -> Vec<CrossingEvent> {
        let mut events = Vec::new();
        let mut baseline = *baseline;
        let mut target = Some(baseline.next_threshold());

        for (index, day) in series.iter().enumerate() {
            let service_today = services
                .iter()
                .filter(|s| s.service_date == day.date)
                .filter_map(|s| s.hours.filter(|_| s.has_hours()).map(|h| (h, s.interval)))
                .last();

            if let Some((hours, interval)) = service_today {
                baseline = ServiceBaseline::new(hours, interval);
                target = Some(baseline.next_threshold());
                tracing::debug!(
                    "資產 {} 於 {} 保養，重設基準 {} 小時，下一間隔 {:?}",
                    day.fleet_number,
                    day.date,
                    hours,
                    target
                );
            }

            let Some(threshold) = target else {
                continue;
            };

            let elapsed = baseline.elapsed(day.est_hours);
            if elapsed >= threshold.threshold() {
                events.push(CrossingEvent {
                    index,
                    date: day.date,
                    threshold,
                    est_hours: day.est_hours,
                    elapsed_hours: elapsed,
                });

                target = ServiceInterval::smallest_above(elapsed.max(threshold.threshold()));
            }
        }

        events
    }
}
