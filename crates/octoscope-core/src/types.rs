//! Core record types shared by the client, aggregator and views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Language tag → cumulative byte count.
///
/// Ordered so that iteration, and every ranking derived from it, is deterministic.
pub type LanguageUsage = BTreeMap<String, u64>;

/// An account profile from `GET /users/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique handle
    pub login: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    pub avatar_url: String,
    /// Profile page on the hosting site
    pub html_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    /// Free-form external link; the API sends an empty string when unset
    #[serde(default)]
    pub blog: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
}

impl Account {
    /// Name to show in headings, falling back to the handle
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(&self.login)
    }

    /// The external link, if one is actually set
    pub fn external_link(&self) -> Option<&str> {
        non_empty(self.blog.as_deref())
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(self.location.as_deref())
    }
}

/// Owner stub embedded in every project record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOwner {
    pub login: String,
}

/// A repository record from `GET /users/{id}/repos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub owner: ProjectOwner,
    /// Unique per owner
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Primary language tag
    #[serde(default)]
    pub language: Option<String>,
    #[serde(rename = "stargazers_count", default)]
    pub stars: u64,
    #[serde(rename = "forks_count", default)]
    pub forks: u64,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    pub html_url: String,
}

/// Everything one search cycle fetched for a single account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSnapshot {
    pub account: Account,
    /// Full fetched collection in page order
    pub projects: Vec<Project>,
    /// Byte counts merged from the sampled projects that answered
    pub languages: LanguageUsage,
}

/// One ranked entry of the language histogram
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageShare {
    pub language: String,
    pub bytes: u64,
    /// Share of the truncated set, 0.0 - 100.0
    pub percent: f64,
}

/// One calendar month of the activity histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    /// `YYYY-MM`
    pub key: String,
    /// Three-letter month name
    pub label: String,
    /// Projects last pushed in this month
    pub count: u64,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
