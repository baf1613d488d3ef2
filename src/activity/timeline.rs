use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::utils::time::format_clock;

use super::entities::Interval;

/// One block of the daily timeline, ready to be placed on an hour grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub start_hour: u32,
    pub start_minute: u32,
    /// Whole minutes, rounded up so that short blocks stay visible.
    pub duration_minutes: u32,
    pub title: Arc<str>,
    pub additional_info: Option<Arc<str>>,
    pub time: String,
}

impl From<&Interval> for TimelineEntry {
    fn from(interval: &Interval) -> Self {
        Self {
            start_hour: interval.start_hour,
            start_minute: interval.start_minute,
            duration_minutes: interval.duration_minutes.max(0.).ceil() as u32,
            title: interval.title.clone(),
            additional_info: interval.additional_info.clone(),
            time: format_clock(interval.start_hour, interval.start_minute),
        }
    }
}

/// Maps day intervals to timeline entries. With `min_display_minutes` set, intervals shorter than
/// it are left out of the timeline. This only affects display, summaries are built from the
/// ungated intervals.
pub fn build_timeline(
    intervals: &[Interval],
    min_display_minutes: Option<f64>,
) -> Vec<TimelineEntry> {
    intervals
        .iter()
        .filter(|v| min_display_minutes.map_or(true, |min| v.duration_minutes >= min))
        .map(TimelineEntry::from)
        .collect()
}
