use chrono::{DateTime, Local, Utc};

pub fn format_duration(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

pub fn format_human(total_seconds: i64) -> String {
    let total_seconds = total_seconds.max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

pub fn format_started_at(started_at: DateTime<Utc>) -> String {
    let local = started_at.with_timezone(&Local);
    format!(
        "{} at {}",
        local.format("%a, %b %-d"),
        local.format("%-I:%M %p")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_zero_pads_each_field() {
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(59), "00:00:59");
        assert_eq!(format_duration(36_000), "10:00:00");
    }

    #[test]
    fn duration_clamps_negative_elapsed_to_zero() {
        assert_eq!(format_duration(-5), "00:00:00");
    }

    #[test]
    fn human_duration_drops_hours_when_zero() {
        assert_eq!(format_human(45 * 60), "45m");
        assert_eq!(format_human(8 * 3600 + 5 * 60), "8h 5m");
        assert_eq!(format_human(16 * 3600 + 2 * 60 + 30), "16h 2m");
    }
}
