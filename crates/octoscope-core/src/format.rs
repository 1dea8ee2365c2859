//! Formatting helpers shared by every display binding

use chrono::{DateTime, Datelike, TimeZone};
use std::borrow::Cow;
use std::time::Duration;

/// How long the stat counters take to count up to their value
pub const COUNT_UP_DURATION: Duration = Duration::from_millis(600);

/// Color used for languages missing from the table
pub const DEFAULT_LANGUAGE_COLOR: &str = "#8b949e";

const LANGUAGE_COLORS: &[(&str, &str)] = &[
    ("JavaScript", "#f1e05a"),
    ("TypeScript", "#3178c6"),
    ("Python", "#3572A5"),
    ("Java", "#b07219"),
    ("Ruby", "#701516"),
    ("Go", "#00ADD8"),
    ("Rust", "#dea584"),
    ("PHP", "#4F5D95"),
    ("C++", "#f34b7d"),
    ("C", "#555555"),
    ("C#", "#178600"),
    ("Swift", "#FA7343"),
    ("Kotlin", "#A97BFF"),
    ("Shell", "#89e051"),
    ("HTML", "#e34c26"),
    ("CSS", "#563d7c"),
    ("Dart", "#00B4AB"),
    ("Scala", "#c22d40"),
    ("R", "#198CE7"),
    ("Vue", "#41b883"),
    ("Jupyter", "#DA5B0B"),
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Abbreviate a count: `1500` → `1.5k`, `2_300_000` → `2.3M`
pub fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

/// `Joined March 2015`, in the time zone of `tz`
pub fn format_join_date<Tz: TimeZone>(joined: &DateTime<chrono::Utc>, tz: &Tz) -> String {
    let local = joined.with_timezone(tz);
    format!("Joined {} {}", MONTH_NAMES[local.month0() as usize], local.year())
}

/// Share with one decimal place: `12.3%`
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Ease-out cubic curve over `progress` in `[0, 1]`
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// Value shown by a counter `elapsed` into its count-up animation
pub fn count_up_value(target: u64, elapsed: Duration, duration: Duration) -> u64 {
    if duration.is_zero() || elapsed >= duration {
        return target;
    }
    let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
    (ease_out_cubic(progress) * target as f64).round() as u64
}

/// Stable display color for a language tag
pub fn language_color(language: &str) -> &'static str {
    LANGUAGE_COLORS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_LANGUAGE_COLOR)
}

/// Parse `#rrggbb` into its components
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Neutralize text before it reaches a display sink.
///
/// Markup-significant characters (`&`, `<`, `>`) become entities and control
/// characters are dropped so they cannot smuggle terminal escape sequences.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c if c.is_control() => {}
            c => escaped.push(c),
        }
    }
    escaped
}

/// Drop control characters, leaving everything else as is.
///
/// For values such as URLs that must keep `&` literal.
pub fn strip_control(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Decode the entities `escape_markup` produces, for plain-text sinks.
///
/// Terminals and text reports are not markup; control characters stay removed.
pub fn plain_text(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&"),
    )
}

/// Split a free-form link into `(href, label)`.
///
/// Links without a scheme get `https://`; the label drops the scheme.
/// Control characters are removed from both.
pub fn normalize_link(link: &str) -> (String, String) {
    let link = strip_control(link);
    let link = link.trim();
    let href = if link.starts_with("http") {
        link.to_string()
    } else {
        format!("https://{}", link)
    };
    let label = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))
        .unwrap_or(link)
        .to_string();
    (href, label)
}
