//! Date formatting helpers

use chrono::{DateTime, TimeZone};

/// Format a date using the Moment.js-style tokens from the site config
///
/// # Examples
/// ```ignore
/// format_date(&date, "YYYY-MM-DD HH:mm:ss") // -> "2024-01-15 10:30:00"
/// ```
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(&to_chrono_format(format)).to_string()
}

/// Translate Moment.js tokens to a chrono format string
fn to_chrono_format(format: &str) -> String {
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut result = format.to_string();
    for (token, chrono) in replacements {
        result = result.replace(token, chrono);
    }
    result
}
