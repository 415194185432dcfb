use chrono::Datelike;

use streakwise::models::DayKey;

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

/// Heatmap glyph for a 0..=3 score
pub fn score_glyph(score: u8) -> &'static str {
    match score {
        0 => "·",
        1 => "░",
        2 => "▒",
        _ => "█",
    }
}

/// Single-letter weekday, Monday = "M"
pub fn weekday_initial(day: DayKey) -> &'static str {
    const INITIALS: [&str; 7] = ["M", "T", "W", "T", "F", "S", "S"];
    INITIALS[day.date().weekday().num_days_from_monday() as usize]
}

/// "1 day" / "3 days"
pub fn days(n: u32) -> String {
    if n == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", n)
    }
}
