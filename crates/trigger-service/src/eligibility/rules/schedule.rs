//! 时间类规则
//!
//! 只依赖评估时刻，不做外部查询。星期与小时按配置的时区偏移换算。

use std::ops::Range;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc, Weekday};

use crate::eligibility::{RuleInput, TriggerRule};

const WORKDAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

const WEEKEND: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

/// 星期 + 可选小时区间的规则
#[derive(Debug, Clone)]
pub struct ScheduleRule {
    trigger_id: String,
    days: Vec<Weekday>,
    /// 左闭右开，None 表示全天
    hours: Option<Range<u32>>,
    offset: FixedOffset,
}

impl ScheduleRule {
    pub fn new(
        trigger_id: impl Into<String>,
        days: impl IntoIterator<Item = Weekday>,
        hours: Option<Range<u32>>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            trigger_id: trigger_id.into(),
            days: days.into_iter().collect(),
            hours,
            offset,
        }
    }

    /// 周一至周五的 [start, end) 时段
    pub fn weekday_hours(
        trigger_id: impl Into<String>,
        start: u32,
        end: u32,
        offset: FixedOffset,
    ) -> Self {
        Self::new(trigger_id, WORKDAYS, Some(start..end), offset)
    }

    /// 周六、周日全天
    pub fn weekend(trigger_id: impl Into<String>, offset: FixedOffset) -> Self {
        Self::new(trigger_id, WEEKEND, None, offset)
    }

    /// 判断给定时刻是否落在规则窗口内
    pub fn matches(&self, now: DateTime<Utc>) -> bool {
        let local = now.with_timezone(&self.offset);

        if !self.days.contains(&local.weekday()) {
            return false;
        }

        match &self.hours {
            Some(hours) => hours.contains(&local.hour()),
            None => true,
        }
    }
}

#[async_trait]
impl TriggerRule for ScheduleRule {
    fn trigger_id(&self) -> &str {
        &self.trigger_id
    }

    async fn is_eligible(&self, input: &RuleInput<'_>) -> bool {
        self.matches(input.now)
    }

    fn description(&self) -> &'static str {
        "Schedule Rule"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    // 2024-05-15 是周三，2024-05-18 是周六
    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_weekday_window() {
        let rule = ScheduleRule::weekday_hours("happy-hour-discount", 16, 18, utc());

        assert!(rule.matches(at(15, 17, 0)));
        assert!(rule.matches(at(15, 16, 0)));
        assert!(rule.matches(at(15, 17, 59)));
        // 右边界不含
        assert!(!rule.matches(at(15, 18, 0)));
        assert!(!rule.matches(at(15, 15, 59)));
    }

    #[test]
    fn test_weekday_window_ignores_weekend() {
        let rule = ScheduleRule::weekday_hours("happy-hour-discount", 16, 18, utc());

        assert!(!rule.matches(at(18, 17, 0)));
        assert!(!rule.matches(at(19, 17, 0)));
    }

    #[test]
    fn test_weekend() {
        let rule = ScheduleRule::weekend("weekend-discount", utc());

        assert!(rule.matches(at(18, 0, 0)));
        assert!(rule.matches(at(19, 23, 59)));
        assert!(!rule.matches(at(17, 23, 59)));
        assert!(!rule.matches(at(20, 0, 0)));
    }

    #[test]
    fn test_offset_shifts_day() {
        // UTC 周五 23:00 在 UTC+2 已是周六 01:00
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let rule = ScheduleRule::weekend("weekend-discount", plus_two);

        assert!(rule.matches(at(17, 23, 0)));
        assert!(!ScheduleRule::weekend("weekend-discount", utc()).matches(at(17, 23, 0)));
    }

    #[test]
    fn test_offset_shifts_hour() {
        // UTC 15:30 在 UTC+1 是 16:30
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        let rule = ScheduleRule::weekday_hours("happy-hour-discount", 16, 18, plus_one);

        assert!(rule.matches(at(15, 15, 30)));
    }
}
