//! Small text helpers shared by the view models and the renderer.

use chrono::{DateTime, Utc};

/// Upper-cases the first character: `"automatic"` becomes `"Automatic"`.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// `"Dec 15, 2023"`.
#[must_use]
pub fn format_listed_date(listed: DateTime<Utc>) -> String {
    listed.format("%b %-d, %Y").to_string()
}

/// Truncates to `max` characters, appending an ellipsis when anything was cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
