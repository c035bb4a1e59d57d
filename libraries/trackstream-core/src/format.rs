//! Display formatting helpers shared by list, details and player views.
//!
//! Missing values render as neutral placeholders (`0:00`, `0 B`), never as
//! errors.

/// Format a duration in whole seconds as `m:ss`.
///
/// An unknown duration renders as `0:00`.
pub fn format_duration(secs: Option<u64>) -> String {
    let secs = secs.unwrap_or(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format a byte count using binary units (B, KB, MB, GB).
///
/// An unknown or zero size renders as `0 B`.
pub fn format_file_size(bytes: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    let bytes = bytes.unwrap_or(0);
    if bytes == 0 {
        return "0 B".to_string();
    }

    let exp = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1);
    let value = bytes as f64 / f64::from(1u32 << (10 * exp));

    if exp == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[exp as usize])
    }
}

/// Fallback color for unknown categories
const DEFAULT_CATEGORY_COLOR: &str = "#B8B8B8";

/// Map a category tag to its display color.
///
/// Lookup is case-insensitive; unknown categories get a neutral grey.
pub fn category_color(category: &str) -> &'static str {
    match category.to_ascii_lowercase().as_str() {
        "pop" => "#FF6B6B",
        "rock" => "#4ECDC4",
        "rap" => "#45B7D1",
        "jazz" => "#96CEB4",
        "classical" => "#FFEAA7",
        "electronic" => "#DDA0DD",
        "reggae" => "#98D8C8",
        _ => DEFAULT_CATEGORY_COLOR,
    }
}
