use chrono::{DateTime, Local, Utc};

/// This is the standard way of showing a time of day in focuslog.
pub fn format_clock(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}

pub fn format_local_clock(moment: DateTime<Utc>) -> String {
    moment.with_timezone(&Local).format("%H:%M").to_string()
}

/// Human readable minutes. Only whole minutes are shown, fractions are rounded.
pub fn format_minutes(minutes: f64) -> String {
    let minutes = minutes.round() as i64;
    if minutes >= 60 {
        format!("{}h{}m", minutes / 60, minutes % 60)
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_clock, format_minutes};

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(9, 5), "09:05");
        assert_eq!(format_clock(23, 59), "23:59");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0.4), "0m");
        assert_eq!(format_minutes(5.5), "6m");
        assert_eq!(format_minutes(61.), "1h1m");
        assert_eq!(format_minutes(120.), "2h0m");
    }
}
