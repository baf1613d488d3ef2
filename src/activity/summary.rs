use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entities::Interval;

pub const DEFAULT_TOP_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityUsage {
    pub title: Arc<str>,
    pub minutes: f64,
}

/// Statistics of the selected intervals. Minutes are kept unrounded, rounding is a display
/// concern.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_minutes: f64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub top_activities: Vec<ActivityUsage>,
}

/// Returns totals over `intervals` together with the `limit` titles that took the most time.
/// Titles with equal time keep the order in which they first appeared.
pub fn summarize(intervals: &[Interval], limit: usize) -> Summary {
    let mut usages = Vec::<ActivityUsage>::new();
    let mut positions = HashMap::<Arc<str>, usize>::new();

    let mut summary = Summary::default();

    for v in intervals {
        summary.total_minutes += v.duration_minutes;
        summary.start_time = Some(summary.start_time.map_or(v.start, |s| s.min(v.start)));
        summary.end_time = Some(summary.end_time.map_or(v.start, |e| e.max(v.start)));

        let position = *positions.entry(v.title.clone()).or_insert_with(|| {
            usages.push(ActivityUsage {
                title: v.title.clone(),
                minutes: 0.,
            });
            usages.len() - 1
        });
        usages[position].minutes += v.duration_minutes;
    }

    // Stable sort, ties stay in order of first appearance.
    usages.sort_by(|a, b| b.minutes.total_cmp(&a.minutes));
    usages.truncate(limit);
    summary.top_activities = usages;
    summary
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use crate::activity::entities::{ActivityEvent, Interval};

    use super::summarize;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 9, 10, 0, 0).unwrap()
    }

    fn interval(offset_minutes: i64, title: &str, minutes: f64) -> Interval {
        let moment = start() + Duration::minutes(offset_minutes);
        Interval::open(&ActivityEvent::new(moment, title)).with_duration(minutes)
    }

    fn ranked(intervals: &[Interval], limit: usize) -> Vec<(String, f64)> {
        summarize(intervals, limit)
            .top_activities
            .into_iter()
            .map(|v| (v.title.to_string(), v.minutes))
            .collect()
    }

    #[test]
    fn test_summary_basic() {
        let intervals = vec![interval(0, "A", 5.), interval(5, "B", 1.)];
        let summary = summarize(&intervals, 5);

        assert_eq!(summary.total_minutes, 6.);
        assert_eq!(summary.start_time, Some(start()));
        assert_eq!(summary.end_time, Some(start() + Duration::minutes(5)));
        assert_eq!(
            ranked(&intervals, 5),
            vec![("A".into(), 5.), ("B".into(), 1.)]
        );
    }

    #[test]
    fn test_summary_empty() {
        let summary = summarize(&[], 5);

        assert_eq!(summary.total_minutes, 0.);
        assert_eq!(summary.start_time, None);
        assert_eq!(summary.end_time, None);
        assert!(summary.top_activities.is_empty());
    }

    #[test]
    fn test_summary_single_interval() {
        let summary = summarize(&[interval(0, "A", 1.)], 5);

        assert_eq!(summary.start_time, summary.end_time);
        assert_eq!(summary.total_minutes, 1.);
    }

    #[test]
    fn test_summary_groups_titles() {
        let intervals = vec![
            interval(0, "A", 2.),
            interval(2, "B", 3.),
            interval(5, "A", 2.5),
            interval(8, "C", 0.5),
        ];

        assert_eq!(
            ranked(&intervals, 5),
            vec![("A".into(), 4.5), ("B".into(), 3.), ("C".into(), 0.5)]
        );
    }

    #[test]
    fn test_summary_ties_keep_first_appearance() {
        let intervals = vec![
            interval(0, "late riser", 1.),
            interval(1, "B", 2.),
            interval(3, "A", 2.),
            interval(5, "late riser", 1.),
        ];

        assert_eq!(
            ranked(&intervals, 5),
            vec![
                ("late riser".into(), 2.),
                ("B".into(), 2.),
                ("A".into(), 2.)
            ]
        );
    }

    #[test]
    fn test_summary_limit() {
        let intervals = (0..8)
            .map(|i| interval(i, &format!("title {i}"), (i + 1) as f64))
            .collect::<Vec<_>>();
        let summary = summarize(&intervals, 5);

        assert_eq!(summary.top_activities.len(), 5);
        assert_eq!(&*summary.top_activities[0].title, "title 7");
        assert!(summary
            .top_activities
            .windows(2)
            .all(|w| w[0].minutes >= w[1].minutes));
        let top_sum = summary
            .top_activities
            .iter()
            .map(|v| v.minutes)
            .sum::<f64>();
        assert!(top_sum <= summary.total_minutes);
        assert_eq!(summary.total_minutes, 36.);
    }

    #[test]
    fn test_summary_start_end_are_min_max() {
        // Order of intervals doesn't matter for the time range.
        let intervals = vec![interval(30, "A", 1.), interval(0, "B", 1.), interval(10, "C", 1.)];
        let summary = summarize(&intervals, 5);

        assert_eq!(summary.start_time, Some(start()));
        assert_eq!(summary.end_time, Some(start() + Duration::minutes(30)));
    }
}
