use super::enums::TaskKind;
use super::task::Task;
use crate::error::InputError;
use chrono::{NaiveDate, NaiveTime};

/// "HH:MM"
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Time range label for a task: "09:00" or "11:30 – 12:15"
pub fn time_range_text(task: &Task) -> String {
    match task.kind {
        TaskKind::Point => format_time(task.start),
        TaskKind::Interval => format!(
            "{} – {}",
            format_time(task.start),
            task.end.map(format_time).unwrap_or_default()
        ),
    }
}

/// Status glyph used in task lists
pub fn done_badge(task: &Task) -> &'static str {
    if task.is_done {
        "✓"
    } else {
        "·"
    }
}

/// Parse "YYYY-MM-DD"
pub fn parse_date(input: &str) -> Result<NaiveDate, InputError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| InputError::Date(trimmed.to_string()))
}

/// Parse "HH:MM" (also accepts "H:MM")
pub fn parse_time(input: &str) -> Result<NaiveTime, InputError> {
    let trimmed = input.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M").map_err(|_| InputError::Time(trimmed.to_string()))
}

/// Truncate a string to `max_len` characters, ending with "..." when cut
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_time_range_text() {
        assert_eq!(time_range_text(&Task::point("Mail", hm(9, 0))), "09:00");
        assert_eq!(
            time_range_text(&Task::interval("Call", hm(11, 30), hm(12, 15))),
            "11:30 – 12:15"
        );
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("07:05"), Ok(hm(7, 5)));
        assert_eq!(parse_time(" 7:05 "), Ok(hm(7, 5)));
        assert_eq!(parse_time("25:00"), Err(InputError::Time("25:00".to_string())));
        assert!(parse_time("noon").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-10-14"), Ok(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()));
        assert_eq!(parse_date("14.10.2026"), Err(InputError::Date("14.10.2026".to_string())));
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Hello World", 20), "Hello World");
        assert_eq!(truncate_string("Hello World", 8), "Hello...");
        assert_eq!(truncate_string("Hello World", 3), "Hel");
        assert_eq!(truncate_string("Привет мир", 6), "При...");
    }
}
