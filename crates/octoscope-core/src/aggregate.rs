//! Reductions from fetched collections to dashboard metrics
//!
//! Every function here is pure and deterministic: the same inputs always
//! produce the same totals and rankings.

use crate::types::{LanguageShare, LanguageUsage, MonthBucket, Project};
use chrono::{DateTime, Datelike, TimeZone};

/// Number of projects shown as ranked cards
pub const TOP_PROJECTS: usize = 6;

/// Number of projects whose language maps are fetched
pub const LANGUAGE_SAMPLE_SIZE: usize = 20;

/// Number of languages kept in the histogram
pub const TOP_LANGUAGES: usize = 8;

/// Length of the activity window in calendar months
pub const ACTIVITY_MONTHS: usize = 12;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Star and fork totals over a full project collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectTotals {
    pub stars: u64,
    pub forks: u64,
}

/// Sum stars and forks over every fetched project (not just the sample)
pub fn totals(projects: &[Project]) -> ProjectTotals {
    projects.iter().fold(ProjectTotals::default(), |acc, p| ProjectTotals {
        stars: acc.stars + p.stars,
        forks: acc.forks + p.forks,
    })
}

/// Projects ranked by stars, descending, truncated to `limit`.
///
/// The sort is stable so equal star counts keep their fetch order.
pub fn rank_by_stars(projects: &[Project], limit: usize) -> Vec<&Project> {
    let mut ranked: Vec<&Project> = projects.iter().collect();
    ranked.sort_by(|a, b| b.stars.cmp(&a.stars));
    ranked.truncate(limit);
    ranked
}

/// The ranked project cards subset
pub fn top_projects(projects: &[Project]) -> Vec<&Project> {
    rank_by_stars(projects, TOP_PROJECTS)
}

/// The subset whose per-project language maps are worth fetching
pub fn language_sample(projects: &[Project]) -> Vec<&Project> {
    rank_by_stars(projects, LANGUAGE_SAMPLE_SIZE)
}

/// Sum byte counts per language across several per-project maps
pub fn merge_languages<I>(maps: I) -> LanguageUsage
where
    I: IntoIterator<Item = LanguageUsage>,
{
    let mut merged = LanguageUsage::new();
    for map in maps {
        for (language, bytes) in map {
            *merged.entry(language).or_insert(0) += bytes;
        }
    }
    merged
}

/// Rank languages by bytes and express each as a share of the kept entries.
///
/// Percentages are relative to the truncated set, not to the full map.
/// Equal byte counts are ordered by language name.
pub fn language_breakdown(usage: &LanguageUsage, limit: usize) -> Vec<LanguageShare> {
    let mut ranked: Vec<(&String, u64)> = usage.iter().map(|(l, b)| (l, *b)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);

    let total: u64 = ranked.iter().map(|(_, bytes)| bytes).sum();

    ranked
        .into_iter()
        .map(|(language, bytes)| LanguageShare {
            language: language.clone(),
            bytes,
            percent: if total == 0 {
                0.0
            } else {
                bytes as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

/// Count projects by last-pushed month over the trailing twelve months.
///
/// Buckets run oldest to newest and end at the month of `now`. Push times are
/// converted into the time zone of `now` before bucketing. Projects without a
/// push time, or pushed outside the window, are not counted.
pub fn activity_histogram<Tz: TimeZone>(projects: &[Project], now: &DateTime<Tz>) -> Vec<MonthBucket> {
    let newest = month_index(now.year(), now.month0());
    let oldest = newest - (ACTIVITY_MONTHS as i64 - 1);

    let mut buckets: Vec<MonthBucket> = (oldest..=newest)
        .map(|index| {
            let year = index.div_euclid(12);
            let month0 = index.rem_euclid(12) as usize;
            MonthBucket {
                key: format!("{:04}-{:02}", year, month0 + 1),
                label: MONTH_LABELS[month0].to_string(),
                count: 0,
            }
        })
        .collect();

    let tz = now.timezone();
    for pushed in projects.iter().filter_map(|p| p.pushed_at) {
        let local = pushed.with_timezone(&tz);
        let index = month_index(local.year(), local.month0());
        if (oldest..=newest).contains(&index) {
            buckets[(index - oldest) as usize].count += 1;
        }
    }

    buckets
}

fn month_index(year: i32, month0: u32) -> i64 {
    year as i64 * 12 + month0 as i64
}
