use chrono::{DateTime, NaiveDateTime, TimeZone};
use tracing::{debug, warn};

use crate::source::RawEvent;

use super::entities::ActivityEvent;

/// Naive shapes the tracker is known to write. ISO output from the tracker carries no offset and
/// is meant as local time.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Resolves a log timestamp into a point in time. Strings carrying an offset are taken as is,
/// naive strings are interpreted in `tz`.
pub fn parse_timestamp<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let value = value.trim();
    if let Ok(v) = DateTime::parse_from_rfc3339(value) {
        return Some(v.with_timezone(tz));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        // Ambiguous local times pick the first occurrence, nonexistent ones are dropped.
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
}

/// Converts raw rows into typed events, preserving order. Rows with unusable timestamps are
/// dropped and logged, the rest of the log is still processed.
pub fn normalize<Tz: TimeZone>(
    raw: impl IntoIterator<Item = RawEvent>,
    tz: &Tz,
) -> Vec<ActivityEvent> {
    let mut skipped = 0usize;
    let events = raw
        .into_iter()
        .filter_map(|row| match parse_timestamp(&row.timestamp, tz) {
            Some(moment) => Some(
                ActivityEvent::new(moment, row.title)
                    .with_process_id(row.process_id)
                    .with_additional_info(row.additional_info.map(Into::into)),
            ),
            None => {
                skipped += 1;
                warn!("Skipping event with unparsable timestamp {:?}", row.timestamp);
                None
            }
        })
        .collect::<Vec<_>>();
    debug!("Normalized {} events, skipped {skipped}", events.len());
    events
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

    use crate::{source::RawEvent, utils::logging::TEST_LOGGING};

    use super::{normalize, parse_timestamp};

    #[test]
    fn test_parse_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 8, 9, 10, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2024-08-09T10:00:00", &Utc), Some(expected));
        assert_eq!(parse_timestamp("2024-08-09 10:00:00", &Utc), Some(expected));
        assert_eq!(parse_timestamp("2024-08-09T10:00", &Utc), Some(expected));
        assert_eq!(parse_timestamp("2024-08-09T10:00:00Z", &Utc), Some(expected));
        assert_eq!(
            parse_timestamp("2024-08-09T12:00:00+02:00", &Utc),
            Some(expected)
        );
        assert_eq!(
            parse_timestamp("2024-08-09T10:00:00.250000", &Utc),
            Some(expected + chrono::Duration::milliseconds(250))
        );
        assert_eq!(parse_timestamp("yesterday-ish", &Utc), None);
        assert_eq!(parse_timestamp("", &Utc), None);
    }

    #[test]
    fn test_normalize_decomposes_in_zone() {
        // 23:30 UTC on a Friday is already Saturday in UTC+2.
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let events = normalize(
            vec![RawEvent::new("2024-08-09T23:30:00Z", "Editor").with_additional_info("late")],
            &zone,
        );

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 8, 10).unwrap());
        assert_eq!(event.day, 6);
        assert_eq!(event.hour, 1);
        assert_eq!(event.minute, 30);
        assert_eq!(event.additional_info.as_deref(), Some("late"));
        assert_eq!(
            event.timestamp,
            Utc.with_ymd_and_hms(2024, 8, 9, 23, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_normalize_skips_malformed() {
        *TEST_LOGGING;
        let events = normalize(
            vec![
                RawEvent::new("2024-08-09T10:00:00", "A"),
                RawEvent::new("not a date", "B"),
                RawEvent::new("2024-08-09T10:01:00", "C"),
            ],
            &Utc,
        );

        let titles = events.iter().map(|v| &*v.title).collect::<Vec<_>>();
        assert_eq!(titles, vec!["A", "C"]);
    }
}
