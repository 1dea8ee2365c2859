//! Chart state owned by a mounted dashboard
//!
//! Built once from a `DashboardView` when the dashboard panel is entered and
//! dropped with the panel. Widgets rebuild ratatui bars from it every frame.

use octoscope_core::format::{
    count_up_value, parse_hex_color, plain_text, DEFAULT_LANGUAGE_COLOR,
};
use octoscope_core::DashboardView;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Bar;
use std::time::{Duration, Instant};
use tracing::debug;

/// Scale applied to percentages so bars keep one decimal place
pub const PERCENT_SCALE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageBar {
    pub language: String,
    pub label: String,
    pub percent: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityColumn {
    pub label: String,
    pub count: u64,
}

#[derive(Debug)]
pub struct DashboardCharts {
    mounted_at: Instant,
    duration: Duration,
    counters: [(&'static str, u64); 4],
    languages: Vec<LanguageBar>,
    activity: Vec<ActivityColumn>,
}

impl DashboardCharts {
    pub fn mount(view: &DashboardView, duration: Duration) -> Self {
        Self::mount_at(view, duration, Instant::now())
    }

    /// Mount with an explicit animation start
    pub fn mount_at(view: &DashboardView, duration: Duration, mounted_at: Instant) -> Self {
        let languages: Vec<LanguageBar> = view
            .languages
            .slices()
            .iter()
            .map(|slice| LanguageBar {
                language: plain_text(&slice.language).into_owned(),
                label: slice.label.clone(),
                percent: slice.percent,
                color: hex_color(slice.color),
            })
            .collect();

        let activity: Vec<ActivityColumn> = view
            .activity
            .bars
            .iter()
            .map(|bar| ActivityColumn {
                label: bar.label.clone(),
                count: bar.count,
            })
            .collect();

        debug!(
            "Mounted dashboard charts: {} languages, {} months",
            languages.len(),
            activity.len()
        );

        Self {
            mounted_at,
            duration,
            counters: view.stats.counters(),
            languages,
            activity,
        }
    }

    /// Counter values as of `now`, counting up from zero
    pub fn counter_values(&self, now: Instant) -> [(&'static str, u64); 4] {
        let elapsed = now.saturating_duration_since(self.mounted_at);
        self.counters
            .map(|(caption, target)| (caption, count_up_value(target, elapsed, self.duration)))
    }

    /// Whether the counters are still moving at `now`
    pub fn animating(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.mounted_at) < self.duration
    }

    pub fn languages(&self) -> &[LanguageBar] {
        &self.languages
    }

    pub fn activity(&self) -> &[ActivityColumn] {
        &self.activity
    }

    /// Horizontal language bars, value in tenths of a percent
    pub fn language_bars(&self) -> Vec<Bar<'_>> {
        self.languages
            .iter()
            .map(|lang| {
                Bar::default()
                    .value((lang.percent * PERCENT_SCALE).round() as u64)
                    .label(Line::from(lang.language.as_str()))
                    .text_value(lang.label.clone())
                    .style(Style::default().fg(lang.color))
            })
            .collect()
    }

    /// Vertical activity bars, oldest month first
    pub fn activity_bars(&self) -> Vec<Bar<'_>> {
        self.activity
            .iter()
            .map(|column| {
                Bar::default()
                    .value(column.count)
                    .label(Line::from(column.label.as_str()))
                    .text_value(column.count.to_string())
            })
            .collect()
    }
}

impl Drop for DashboardCharts {
    fn drop(&mut self) {
        debug!("Released dashboard charts");
    }
}

/// Hex color to a terminal color, falling back to the default language gray
pub fn hex_color(hex: &str) -> Color {
    parse_hex_color(hex)
        .or_else(|| parse_hex_color(DEFAULT_LANGUAGE_COLOR))
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Gray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_account, sample_view};
    use chrono::Utc;
    use octoscope_core::ProfileSnapshot;

    #[test]
    fn test_counters_count_up() {
        let view = sample_view();
        let start = Instant::now();
        let charts = DashboardCharts::mount_at(&view, Duration::from_millis(600), start);

        let initial = charts.counter_values(start);
        assert!(initial.iter().all(|(_, value)| *value == 0));
        assert!(charts.animating(start));

        let done = charts.counter_values(start + Duration::from_millis(600));
        assert_eq!(done, view.stats.counters());
        assert!(!charts.animating(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_language_bars_follow_view() {
        let view = sample_view();
        let charts = DashboardCharts::mount(&view, Duration::from_millis(600));

        assert_eq!(charts.languages().len(), view.languages.slices().len());
        assert_eq!(charts.language_bars().len(), view.languages.slices().len());
        assert_eq!(charts.languages()[0].language, "Rust");
        assert_eq!(charts.languages()[0].color, Color::Rgb(0xde, 0xa5, 0x84));
    }

    #[test]
    fn test_language_labels_are_plain_text() {
        let snapshot = ProfileSnapshot {
            account: sample_account(),
            projects: Vec::new(),
            languages: [("F&Q<x>".to_string(), 10u64)].into_iter().collect(),
        };
        let view = DashboardView::build(&snapshot, &Utc::now());
        assert_eq!(view.languages.slices()[0].language, "F&amp;Q&lt;x&gt;");

        let charts = DashboardCharts::mount(&view, Duration::ZERO);
        assert_eq!(charts.languages()[0].language, "F&Q<x>");
    }

    #[test]
    fn test_activity_has_twelve_columns() {
        let charts = DashboardCharts::mount(&sample_view(), Duration::ZERO);
        assert_eq!(charts.activity().len(), 12);
        assert_eq!(charts.activity_bars().len(), 12);
    }

    #[test]
    fn test_hex_color_fallback() {
        assert_eq!(hex_color("#ff0000"), Color::Rgb(255, 0, 0));
        assert_eq!(hex_color("nonsense"), Color::Rgb(0x8b, 0x94, 0x9e));
    }
}
