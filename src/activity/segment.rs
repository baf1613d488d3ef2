use chrono::Duration;
use tracing::{debug, warn};

use super::entities::{ActivityEvent, Interval};

/// Default largest gap bridged between two samples of the same title. Focus trackers emit many
/// samples for one foreground window, anything above this is treated as a separate visit.
pub const DEFAULT_MERGE_THRESHOLD: Duration = Duration::seconds(60);

/// The last event of a log has no successor to measure against, it is credited with this much.
pub const TAIL_FLOOR_MINUTES: f64 = 1.;

/// How events are turned into intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentationPolicy {
    /// Consecutive same-title events whose gap is at most `threshold` form one interval.
    Merge { threshold: Duration },
    /// Every event is its own interval lasting until the next event.
    PerEvent,
}

impl Default for SegmentationPolicy {
    fn default() -> Self {
        Self::Merge {
            threshold: DEFAULT_MERGE_THRESHOLD,
        }
    }
}

impl SegmentationPolicy {
    fn merges(&self, gap: Duration, current: &Interval, next: &ActivityEvent) -> bool {
        match self {
            Self::Merge { threshold } => gap <= *threshold && next.title == current.title,
            Self::PerEvent => false,
        }
    }
}

fn as_minutes(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 60_000.
}

/// Splits the whole log into intervals in one greedy pass.
///
/// Every gap between neighbouring events is credited to the interval that is open when the gap
/// starts, so no time is created or lost apart from the [TAIL_FLOOR_MINUTES] given to the very
/// last interval. Runs before any day filtering so merging sees across day boundaries.
pub fn segment(events: &[ActivityEvent], policy: SegmentationPolicy) -> Vec<Interval> {
    let mut intervals = Vec::new();
    let mut events = events.iter().peekable();

    while let Some(first) = events.next() {
        let mut current = Interval::open(first);
        let mut previous = first;
        let mut elapsed = Duration::zero();
        let mut tail = 0.;
        loop {
            let Some(&next) = events.peek() else {
                tail = TAIL_FLOOR_MINUTES;
                break;
            };

            let mut gap = next.timestamp - previous.timestamp;
            if gap < Duration::zero() {
                warn!(
                    "Events out of order at {} -> {}, counting the gap as zero",
                    previous.timestamp, next.timestamp
                );
                gap = Duration::zero();
            }
            elapsed += gap;

            if !policy.merges(gap, &current, next) {
                break;
            }
            previous = next;
            events.next();
        }
        // Summed in milliseconds so merged intervals don't accumulate float error.
        current.duration_minutes = as_minutes(elapsed) + tail;
        intervals.push(current);
    }

    debug!("Segmented into {} intervals", intervals.len());
    intervals
}
