use chrono::{Days, NaiveDate};

use crate::{
    activity::filter::{DaySelector, SelectionMode},
    utils::clock::Clock,
};

pub const ZOOM_MIN: f64 = 0.5;
pub const ZOOM_MAX: f64 = 4.;
pub const ZOOM_STEP: f64 = 0.5;
pub const ZOOM_DEFAULT: f64 = 1.;

/// Height of one hour on the timeline at zoom 1, in pixels.
pub const HOUR_HEIGHT: f64 = 60.;

/// State a presentation layer keeps between requests: which day it shows and how zoomed in it is.
/// Owned by the caller and handed to every request, the pipeline itself keeps none of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewContext {
    date: NaiveDate,
    zoom: f64,
}

impl ViewContext {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            zoom: ZOOM_DEFAULT,
        }
    }

    pub fn today(clock: &dyn Clock) -> Self {
        Self::new(clock.now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Moves the shown day forward or backwards. Saturates at the ends of the supported calendar.
    pub fn shift_days(self, days: i64) -> Self {
        let step = Days::new(days.unsigned_abs());
        let date = if days >= 0 {
            self.date.checked_add_days(step)
        } else {
            self.date.checked_sub_days(step)
        };
        Self {
            date: date.unwrap_or(self.date),
            ..self
        }
    }

    /// Returns true if zoom changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom + ZOOM_STEP)
    }

    /// Returns true if zoom changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom - ZOOM_STEP)
    }

    fn set_zoom(&mut self, zoom: f64) -> bool {
        let zoom = zoom.clamp(ZOOM_MIN, ZOOM_MAX);
        let changed = zoom != self.zoom;
        self.zoom = zoom;
        changed
    }

    pub fn hour_height(&self) -> f64 {
        HOUR_HEIGHT * self.zoom
    }

    pub fn selector(&self, mode: SelectionMode) -> DaySelector {
        mode.selector_for(self.date)
    }
}
