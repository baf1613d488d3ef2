//! Ties the stages together. A view request always runs the whole pipeline over the resident log,
//! there is no incremental state between requests.

pub mod context;

use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    activity::{
        entities::ActivityEvent,
        filter::{DaySelector, filter_day},
        normalize::normalize,
        segment::segment,
        summary::{Summary, summarize},
        timeline::{TimelineEntry, build_timeline},
    },
    config::ViewConfig,
    error::ViewError,
    source::EventSource,
};

/// Everything the presentation layer needs for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityView {
    pub summary: Summary,
    pub timeline: Vec<TimelineEntry>,
}

/// The normalized log, read-only once built. Concurrent requests for different days can share it
/// behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityLog {
    events: Vec<ActivityEvent>,
}

impl ActivityLog {
    pub fn from_events(events: Vec<ActivityEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[ActivityEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn view(&self, config: &ViewConfig, selector: DaySelector) -> ActivityView {
        build_view(&self.events, config, selector)
    }
}

/// Segments the whole log, then derives summary and timeline for `selector`. One selector serves
/// both halves of the view, so they always describe the same set of intervals.
pub fn build_view(
    events: &[ActivityEvent],
    config: &ViewConfig,
    selector: DaySelector,
) -> ActivityView {
    let intervals = segment(events, config.policy);
    let selected = filter_day(&intervals, selector);
    debug!("{} of {} intervals on {selector}", selected.len(), intervals.len());

    ActivityView {
        summary: summarize(&selected, config.top_activity_limit),
        timeline: build_timeline(&selected, config.min_display_minutes),
    }
}

/// Loads the log again and normalizes it in `tz`. Callers decide when this happens.
#[instrument(skip_all)]
pub async fn refresh<Tz: TimeZone>(
    source: &impl EventSource,
    tz: &Tz,
) -> Result<ActivityLog, ViewError> {
    let raw = source.load().await?;
    Ok(ActivityLog::from_events(normalize(raw, tz)))
}

#[cfg(test)]
mod tests {
    use std::{io::Write, sync::Arc};

    use anyhow::Result;
    use chrono::{NaiveDate, Utc};
    use tempfile::{NamedTempFile, tempdir};

    use crate::{
        activity::filter::DaySelector,
        config::ViewConfig,
        error::ViewError,
        source::{EventSource, RawEvent, csv_file::CsvFileSource},
        utils::logging::TEST_LOGGING,
    };

    use super::{ActivityLog, refresh};

    struct StaticSource(Vec<RawEvent>);

    impl EventSource for StaticSource {
        async fn load(&self) -> Result<Vec<RawEvent>, ViewError> {
            Ok(self.0.clone())
        }
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 9).unwrap()
    }

    async fn scenario_log() -> Result<ActivityLog> {
        let source = StaticSource(vec![
            RawEvent::new("2024-08-09T10:00:00", "A"),
            RawEvent::new("2024-08-09T10:00:30", "A"),
            RawEvent::new("2024-08-09T10:05:00", "B"),
        ]);
        Ok(refresh(&source, &Utc).await?)
    }

    #[tokio::test]
    async fn test_view_scenario() -> Result<()> {
        let log = scenario_log().await?;
        let view = log.view(&ViewConfig::default(), DaySelector::Date(test_date()));

        assert_eq!(view.summary.total_minutes, 6.);
        assert_eq!(view.summary.top_activities.len(), 2);
        assert_eq!(&*view.summary.top_activities[0].title, "A");
        assert_eq!(view.summary.top_activities[0].minutes, 5.);
        let timeline = view
            .timeline
            .iter()
            .map(|v| (v.time.as_str(), v.duration_minutes))
            .collect::<Vec<_>>();
        assert_eq!(timeline, vec![("10:00", 5), ("10:05", 1)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_view_of_other_day_is_empty() -> Result<()> {
        let log = scenario_log().await?;
        let view = log.view(
            &ViewConfig::default(),
            DaySelector::Date(test_date().succ_opt().unwrap()),
        );

        assert_eq!(view.summary.total_minutes, 0.);
        assert_eq!(view.summary.start_time, None);
        assert!(view.timeline.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_gate_does_not_change_totals() -> Result<()> {
        let source = StaticSource(vec![
            RawEvent::new("2024-08-09T10:00:00", "A"),
            RawEvent::new("2024-08-09T10:00:20", "B"),
            RawEvent::new("2024-08-09T10:03:20", "C"),
        ]);
        let log = refresh(&source, &Utc).await?;
        let config = ViewConfig {
            min_display_minutes: Some(1.),
            ..ViewConfig::default()
        };
        let view = log.view(&config, DaySelector::Date(test_date()));

        let titles = view.timeline.iter().map(|v| &*v.title).collect::<Vec<_>>();
        assert_eq!(titles, vec!["B", "C"]);
        assert!((view.summary.total_minutes - (20. / 60. + 3. + 1.)).abs() < 1e-9);
        assert_eq!(view.summary.top_activities.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_interval_across_midnight_stays_with_start_day() -> Result<()> {
        let source = StaticSource(vec![
            RawEvent::new("2024-08-09T23:59:50", "A"),
            RawEvent::new("2024-08-10T00:00:20", "A"),
            RawEvent::new("2024-08-10T00:10:00", "B"),
        ]);
        let log = refresh(&source, &Utc).await?;

        let first = log.view(&ViewConfig::default(), DaySelector::Date(test_date()));
        let second = log.view(
            &ViewConfig::default(),
            DaySelector::Date(test_date().succ_opt().unwrap()),
        );

        assert!((first.summary.total_minutes - (10. + 1. / 6.)).abs() < 1e-9);
        assert_eq!(second.summary.total_minutes, 1.);
        Ok(())
    }

    #[tokio::test]
    async fn test_view_is_repeatable_from_shared_log() -> Result<()> {
        let log = Arc::new(scenario_log().await?);

        let handles = [test_date(), test_date().succ_opt().unwrap()].map(|date| {
            let log = log.clone();
            tokio::spawn(async move { log.view(&ViewConfig::default(), DaySelector::Date(date)) })
        });
        let mut views = vec![];
        for handle in handles {
            views.push(handle.await?);
        }

        assert_eq!(
            views[0],
            log.view(&ViewConfig::default(), DaySelector::Date(test_date()))
        );
        assert!(views[1].timeline.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_from_file() -> Result<()> {
        *TEST_LOGGING;
        let mut file = NamedTempFile::new()?;
        file.write_all(
            b"timestamp,title,process_id\n\
              2024-08-09T10:00:00,A,1\n\
              broken,A,1\n\
              2024-08-09T10:02:00,A,1\n",
        )?;
        let log = refresh(&CsvFileSource::new(file.path()), &Utc).await?;

        assert!(!log.is_empty());
        assert_eq!(log.events().len(), 2);
        let view = log.view(&ViewConfig::default(), DaySelector::Date(test_date()));
        assert_eq!(view.timeline.len(), 2);
        assert_eq!(view.summary.total_minutes, 3.);
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_header_only_log_is_empty() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"timestamp,title,process_id,additional_info\n")?;
        let log = refresh(&CsvFileSource::new(file.path()), &Utc).await?;

        assert!(log.is_empty());
        let view = log.view(&ViewConfig::default(), DaySelector::Date(test_date()));
        assert_eq!(view.summary.start_time, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_refresh_missing_source() -> Result<()> {
        let dir = tempdir()?;
        let result = refresh(&CsvFileSource::new(dir.path().join("missing.csv")), &Utc).await;

        assert!(matches!(result, Err(ViewError::SourceUnavailable { .. })));
        Ok(())
    }
}
