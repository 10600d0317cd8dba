/// Format a countdown as "m:ss", e.g. 3600 -> "60:00".
pub fn format_countdown(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format a duration in seconds to "Xh Ym" or "Ym" string
pub fn format_duration_secs(secs: i64) -> String {
    if secs <= 0 {
        return "now".to_string();
    }
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Signed goal adjustment, "+2", "-1" or "0".
pub fn format_delta(delta: i32) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// "2024-06-03" -> "Mon"; unparseable keys are returned unchanged.
pub fn weekday_label(date: &str) -> String {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%a").to_string())
        .unwrap_or_else(|_| date.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown() {
        assert_eq!(format_countdown(3600), "60:00");
        assert_eq!(format_countdown(3599), "59:59");
        assert_eq!(format_countdown(65), "1:05");
        assert_eq!(format_countdown(0), "0:00");
    }

    #[test]
    fn duration() {
        assert_eq!(format_duration_secs(0), "now");
        assert_eq!(format_duration_secs(1500), "25m");
        assert_eq!(format_duration_secs(3900), "1h 5m");
    }

    #[test]
    fn deltas() {
        assert_eq!(format_delta(2), "+2");
        assert_eq!(format_delta(0), "0");
        assert_eq!(format_delta(-1), "-1");
    }

    #[test]
    fn bars() {
        assert_eq!(progress_bar(4, 8, 8), "████░░░░");
        assert_eq!(progress_bar(12, 8, 4), "████");
        assert_eq!(progress_bar(0, 0, 3), "░░░");
    }

    #[test]
    fn weekdays() {
        assert_eq!(weekday_label("2024-06-03"), "Mon");
        assert_eq!(weekday_label("bogus"), "bogus");
    }
}
