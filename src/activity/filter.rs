use std::fmt::Display;

use chrono::{Datelike, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ViewError;

use super::entities::Interval;

/// How a view picks its day. Both modes exist because some callers look at one concrete date and
/// others at a recurring day of the week. A single view must stick to one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    Date,
    Weekday,
}

impl Display for SelectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionMode::Date => write!(f, "date"),
            SelectionMode::Weekday => write!(f, "weekday"),
        }
    }
}

impl SelectionMode {
    pub fn selector_for(&self, date: NaiveDate) -> DaySelector {
        match self {
            SelectionMode::Date => DaySelector::Date(date),
            SelectionMode::Weekday => DaySelector::Weekday(date.weekday()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySelector {
    Date(NaiveDate),
    Weekday(Weekday),
}

impl DaySelector {
    /// Weekday from its ordinal, Sunday is 0.
    pub fn weekday_ordinal(ordinal: u32) -> Result<Self, ViewError> {
        let weekday = match ordinal {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            6 => Weekday::Sat,
            _ => {
                return Err(ViewError::InvalidConfig(format!(
                    "weekday must be between 0 and 6, got {ordinal}"
                )))
            }
        };
        Ok(Self::Weekday(weekday))
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            DaySelector::Date(_) => SelectionMode::Date,
            DaySelector::Weekday(_) => SelectionMode::Weekday,
        }
    }

    pub fn matches(&self, interval: &Interval) -> bool {
        match self {
            DaySelector::Date(date) => interval.start_date == *date,
            DaySelector::Weekday(weekday) => {
                interval.start_day == weekday.num_days_from_sunday()
            }
        }
    }
}

impl Display for DaySelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DaySelector::Date(date) => write!(f, "{}", date.format("%A, %B %-d, %Y")),
            DaySelector::Weekday(weekday) => write!(f, "every {weekday}"),
        }
    }
}

/// Keeps the intervals that start on the selected day, in their original order.
pub fn filter_day(intervals: &[Interval], selector: DaySelector) -> Vec<Interval> {
    intervals
        .iter()
        .filter(|v| selector.matches(v))
        .cloned()
        .collect()
}
