//! Clock and duration formatting helpers

use std::time::Duration;

/// Format a second count as a `HH:MM:SS` clock string.
///
/// Every field is zero-padded to two digits. Hours are not wrapped, so
/// durations of 100 hours or more simply widen the hour field.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}

/// Format an hour count with the right singular/plural noun
pub fn format_hours_text(hours: u64) -> String {
    if hours == 1 {
        "1 hour".to_string()
    } else {
        format!("{} hours", hours)
    }
}

/// Human readable uptime such as `1h 2m 3s`, `4m 5s` or `6s`
pub fn format_uptime(duration: Duration) -> String {
    let hours = duration.as_secs() / 3600;
    let minutes = (duration.as_secs() % 3600) / 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_clock(clock: &str) -> u64 {
        let parts: Vec<u64> = clock
            .split(':')
            .map(|part| part.parse().expect("numeric clock field"))
            .collect();
        assert_eq!(parts.len(), 3, "clock must have three fields: {clock}");
        parts[0] * 3600 + parts[1] * 60 + parts[2]
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_duration(0), "00:00:00");
    }

    #[test]
    fn formats_seconds_only() {
        assert_eq!(format_duration(45), "00:00:45");
    }

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_duration(125), "00:02:05");
    }

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(36000), "10:00:00");
    }

    #[test]
    fn hours_widen_instead_of_wrapping() {
        assert_eq!(format_duration(100 * 3600 + 59), "100:00:59");
    }

    #[test]
    fn clock_string_parses_back_to_the_same_seconds() {
        let samples = [0, 1, 59, 60, 61, 3599, 3600, 3601, 86_399, 86_400, 359_999, 360_000];
        for seconds in samples.into_iter().chain((0..20_000).step_by(37)) {
            assert_eq!(parse_clock(&format_duration(seconds)), seconds);
        }
    }

    #[test]
    fn hours_text_pluralizes() {
        assert_eq!(format_hours_text(1), "1 hour");
        assert_eq!(format_hours_text(2), "2 hours");
        assert_eq!(format_hours_text(0), "0 hours");
    }

    #[test]
    fn uptime_picks_largest_unit() {
        assert_eq!(format_uptime(Duration::from_secs(6)), "6s");
        assert_eq!(format_uptime(Duration::from_secs(245)), "4m 5s");
        assert_eq!(format_uptime(Duration::from_secs(3723)), "1h 2m 3s");
    }
}
