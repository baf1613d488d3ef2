use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};

/// A focus sample with its calendar position already resolved. The calendar fields are computed
/// once at normalization in a single time zone and are never recomputed later, so every later
/// stage agrees on which day and hour an event belongs to.
#[derive(PartialEq, Debug, Clone)]
pub struct ActivityEvent {
    pub timestamp: DateTime<Utc>,
    pub date: NaiveDate,
    /// Day of the week, Sunday is 0.
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub title: Arc<str>,
    pub process_id: Arc<str>,
    pub additional_info: Option<Arc<str>>,
}

impl ActivityEvent {
    pub fn new<Tz: TimeZone>(moment: DateTime<Tz>, title: impl Into<Arc<str>>) -> Self {
        Self {
            timestamp: moment.to_utc(),
            date: moment.date_naive(),
            day: moment.weekday().num_days_from_sunday(),
            hour: moment.hour(),
            minute: moment.minute(),
            title: title.into(),
            process_id: "".into(),
            additional_info: None,
        }
    }

    pub fn with_process_id(self, process_id: impl Into<Arc<str>>) -> Self {
        Self {
            process_id: process_id.into(),
            ..self
        }
    }

    pub fn with_additional_info(self, additional_info: Option<Arc<str>>) -> Self {
        Self {
            additional_info,
            ..self
        }
    }
}

/// A contiguous span of time attributed to one title. The calendar fields are taken from the
/// event that opened the interval.
#[derive(PartialEq, Debug, Clone)]
pub struct Interval {
    pub title: Arc<str>,
    pub start: DateTime<Utc>,
    pub start_date: NaiveDate,
    pub start_day: u32,
    pub start_hour: u32,
    pub start_minute: u32,
    pub duration_minutes: f64,
    pub additional_info: Option<Arc<str>>,
}

impl Interval {
    /// Opens an interval at `event` with no duration yet.
    pub fn open(event: &ActivityEvent) -> Self {
        Self {
            title: event.title.clone(),
            start: event.timestamp,
            start_date: event.date,
            start_day: event.day,
            start_hour: event.hour,
            start_minute: event.minute,
            duration_minutes: 0.,
            additional_info: event.additional_info.clone(),
        }
    }

    pub fn with_duration(self, duration_minutes: f64) -> Self {
        Self {
            duration_minutes,
            ..self
        }
    }
}
