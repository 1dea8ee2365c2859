//! Display-agnostic view model
//!
//! `DashboardView` is the only thing display bindings see. It is built once per
//! completed search, from a full `ProfileSnapshot`, so a view never mixes data
//! from two accounts. User- and remote-controlled text is escaped here.

use crate::aggregate::{self, TOP_LANGUAGES};
use crate::format::{
    escape_markup, format_count, format_join_date, format_percent, language_color, normalize_link,
    strip_control,
};
use crate::types::{Account, Project, ProfileSnapshot};
use crate::{OctoscopeError, Result};
use chrono::{DateTime, TimeZone};
use serde::Serialize;

/// Shown instead of project cards for accounts without public projects
pub const NO_PROJECTS_MESSAGE: &str = "No public repositories";

/// Shown instead of the language chart when no language data came back
pub const NO_LANGUAGE_MESSAGE: &str = "No language data";

/// Shown for projects without a description
pub const NO_DESCRIPTION: &str = "No description provided";

/// Everything a display binding needs to paint one dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub profile: ProfileView,
    pub stats: StatsView,
    /// Ranked by stars, at most six
    pub projects: Vec<ProjectCard>,
    pub languages: LanguageChart,
    pub activity: ActivityChart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub login: String,
    /// `@login`
    pub handle: String,
    pub display_name: String,
    pub avatar_url: String,
    pub bio: String,
    pub location: Option<String>,
    pub link: Option<ExternalLink>,
    /// `Joined <Month> <Year>`
    pub joined: String,
    pub profile_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub href: String,
    pub label: String,
}

/// The four headline counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsView {
    pub stars: u64,
    pub public_projects: u64,
    pub followers: u64,
    pub forks: u64,
}

impl StatsView {
    /// Counters in display order with their captions
    pub fn counters(&self) -> [(&'static str, u64); 4] {
        [
            ("Stars", self.stars),
            ("Repositories", self.public_projects),
            ("Followers", self.followers),
            ("Forks", self.forks),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub name: String,
    pub description: String,
    pub language: Option<String>,
    pub language_color: Option<&'static str>,
    /// Exact star count, for JSON consumers that sort or sum
    pub star_count: u64,
    /// Abbreviated star count
    pub stars: String,
    /// Abbreviated fork count
    pub forks: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LanguageChart {
    Empty { message: &'static str },
    Ranked { slices: Vec<LanguageSlice> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageSlice {
    pub language: String,
    pub bytes: u64,
    pub percent: f64,
    /// `percent` with one decimal place
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityChart {
    /// Exactly twelve bars, oldest month first
    pub bars: Vec<ActivityBar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityBar {
    /// `YYYY-MM`
    pub key: String,
    pub label: String,
    pub count: u64,
}

impl LanguageChart {
    /// Ranked slices; empty for the no-data state
    pub fn slices(&self) -> &[LanguageSlice] {
        match self {
            LanguageChart::Empty { .. } => &[],
            LanguageChart::Ranked { slices } => slices.as_slice(),
        }
    }
}

impl ActivityChart {
    /// Projects last pushed inside the window
    pub fn total(&self) -> u64 {
        self.bars.iter().map(|b| b.count).sum()
    }

    pub fn peak(&self) -> u64 {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

impl DashboardView {
    /// Aggregate a snapshot into a view, relative to `now`.
    ///
    /// `now` fixes both the activity window and the time zone used for dates.
    pub fn build<Tz: TimeZone>(snapshot: &ProfileSnapshot, now: &DateTime<Tz>) -> Self {
        let totals = aggregate::totals(&snapshot.projects);

        let languages = match aggregate::language_breakdown(&snapshot.languages, TOP_LANGUAGES) {
            shares if shares.is_empty() => LanguageChart::Empty {
                message: NO_LANGUAGE_MESSAGE,
            },
            shares => LanguageChart::Ranked {
                slices: shares
                    .into_iter()
                    .map(|share| LanguageSlice {
                        color: language_color(&share.language),
                        label: format_percent(share.percent),
                        language: escape_markup(&share.language),
                        bytes: share.bytes,
                        percent: share.percent,
                    })
                    .collect(),
            },
        };

        let activity = ActivityChart {
            bars: aggregate::activity_histogram(&snapshot.projects, now)
                .into_iter()
                .map(|bucket| ActivityBar {
                    key: bucket.key,
                    label: bucket.label,
                    count: bucket.count,
                })
                .collect(),
        };

        Self {
            profile: ProfileView::build(&snapshot.account, &now.timezone()),
            stats: StatsView {
                stars: totals.stars,
                public_projects: snapshot.account.public_repos,
                followers: snapshot.account.followers,
                forks: totals.forks,
            },
            projects: aggregate::top_projects(&snapshot.projects)
                .into_iter()
                .map(ProjectCard::build)
                .collect(),
            languages,
            activity,
        }
    }

    /// Empty-state text for the project grid, if there is nothing to list
    pub fn projects_placeholder(&self) -> Option<&'static str> {
        self.projects.is_empty().then_some(NO_PROJECTS_MESSAGE)
    }
}

impl ProfileView {
    fn build<Tz: TimeZone>(account: &Account, tz: &Tz) -> Self {
        Self {
            login: escape_markup(&account.login),
            handle: format!("@{}", escape_markup(&account.login)),
            display_name: escape_markup(account.display_name()),
            avatar_url: strip_control(&account.avatar_url),
            bio: account.bio.as_deref().map(escape_markup).unwrap_or_default(),
            location: account.location().map(escape_markup),
            link: account.external_link().map(|raw| {
                let (href, label) = normalize_link(raw);
                ExternalLink {
                    href,
                    label: escape_markup(&label),
                }
            }),
            joined: format_join_date(&account.created_at, tz),
            profile_url: strip_control(&account.html_url),
        }
    }
}

impl ProjectCard {
    fn build(project: &Project) -> Self {
        let language = project
            .language
            .as_deref()
            .filter(|l| !l.is_empty());
        Self {
            name: escape_markup(&project.name),
            description: project
                .description
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(escape_markup)
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            language: language.map(escape_markup),
            language_color: language.map(language_color),
            star_count: project.stars,
            stars: format_count(project.stars),
            forks: format_count(project.forks),
            url: strip_control(&project.html_url),
        }
    }
}

/// Title and message of the error panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorView {
    pub title: String,
    pub message: String,
}

impl ErrorView {
    /// Turn a failed search for `account` into user-facing text.
    ///
    /// The identifier and any error detail are escaped before being echoed.
    pub fn classify(error: &OctoscopeError, account: &str) -> Self {
        match error {
            OctoscopeError::NotFound(_) => Self {
                title: "Account not found".to_string(),
                message: format!(
                    "\"{}\" does not exist or is not accessible.",
                    escape_markup(account)
                ),
            },
            OctoscopeError::RateLimited => Self {
                title: "API rate limit reached".to_string(),
                message: "The API rate limit has been reached. Wait a while and try again."
                    .to_string(),
            },
            other => Self {
                title: "Failed to fetch data".to_string(),
                message: format!(
                    "Check your network connection and try again. ({})",
                    escape_markup(&other.to_string())
                ),
            },
        }
    }
}

/// A display sink that consumes finished views
pub trait DashboardPresenter {
    fn present(&mut self, view: &DashboardView) -> Result<()>;

    fn present_error(&mut self, error: &ErrorView) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LanguageUsage, ProjectOwner};
    use chrono::Utc;

    fn account() -> Account {
        Account {
            login: "octocat".to_string(),
            name: Some("The Octocat".to_string()),
            avatar_url: "https://avatars.example/u/1".to_string(),
            html_url: "https://github.com/octocat".to_string(),
            bio: Some("<b>bold</b> claims".to_string()),
            location: Some("  ".to_string()),
            blog: Some("octo.blog".to_string()),
            created_at: "2011-01-25T18:44:36Z".parse().unwrap(),
            public_repos: 8,
            followers: 12_345,
        }
    }

    fn project(name: &str, stars: u64, language: Option<&str>) -> Project {
        Project {
            owner: ProjectOwner {
                login: "octocat".to_string(),
            },
            name: name.to_string(),
            description: Some(format!("{} & friends", name)),
            language: language.map(str::to_string),
            stars,
            forks: stars / 2,
            pushed_at: Some("2024-02-10T00:00:00Z".parse().unwrap()),
            html_url: format!("https://github.com/octocat/{}", name),
        }
    }

    fn now() -> DateTime<Utc> {
        "2024-03-15T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_build_full_view() {
        let snapshot = ProfileSnapshot {
            account: account(),
            projects: (0..10)
                .map(|i| project(&format!("repo-{}", i), i * 300, Some("Rust")))
                .collect(),
            languages: [("Rust".to_string(), 3000u64), ("Shell".to_string(), 1000)]
                .into_iter()
                .collect(),
        };

        let view = DashboardView::build(&snapshot, &now());

        assert_eq!(view.profile.display_name, "The Octocat");
        assert_eq!(view.profile.handle, "@octocat");
        assert_eq!(view.profile.bio, "&lt;b&gt;bold&lt;/b&gt; claims");
        assert_eq!(view.profile.location, None);
        assert_eq!(
            view.profile.link,
            Some(ExternalLink {
                href: "https://octo.blog".to_string(),
                label: "octo.blog".to_string(),
            })
        );
        assert_eq!(view.profile.joined, "Joined January 2011");

        assert_eq!(view.stats.stars, (0..10).map(|i| i * 300).sum::<u64>());
        assert_eq!(view.stats.forks, (0..10).map(|i| i * 150).sum::<u64>());
        assert_eq!(view.stats.followers, 12_345);
        assert_eq!(view.stats.public_projects, 8);

        assert_eq!(view.projects.len(), 6);
        assert_eq!(view.projects[0].name, "repo-9");
        assert_eq!(view.projects[0].stars, "2.7k");
        assert_eq!(view.projects[0].description, "repo-9 &amp; friends");
        assert_eq!(view.projects[0].language_color, Some("#dea584"));
        assert!(view.projects_placeholder().is_none());

        match &view.languages {
            LanguageChart::Ranked { slices } => {
                assert_eq!(slices.len(), 2);
                assert_eq!(slices[0].language, "Rust");
                assert_eq!(slices[0].label, "75.0%");
                assert_eq!(slices[1].color, "#89e051");
            }
            other => panic!("expected ranked languages, got {:?}", other),
        }

        assert_eq!(view.activity.bars.len(), 12);
        assert_eq!(view.activity.bars[10].key, "2024-02");
        assert_eq!(view.activity.bars[10].count, 10);
        assert_eq!(view.activity.total(), 10);
        assert_eq!(view.activity.peak(), 10);
    }

    #[test]
    fn test_build_empty_account() {
        let snapshot = ProfileSnapshot {
            account: Account {
                name: None,
                bio: None,
                blog: Some(String::new()),
                ..account()
            },
            projects: Vec::new(),
            languages: LanguageUsage::new(),
        };

        let view = DashboardView::build(&snapshot, &now());

        assert_eq!(view.profile.display_name, "octocat");
        assert_eq!(view.profile.bio, "");
        assert_eq!(view.profile.link, None);
        assert!(view.projects.is_empty());
        assert_eq!(view.projects_placeholder(), Some(NO_PROJECTS_MESSAGE));
        assert_eq!(
            view.languages,
            LanguageChart::Empty {
                message: NO_LANGUAGE_MESSAGE
            }
        );
        assert_eq!(view.activity.bars.len(), 12);
        assert_eq!(view.activity.total(), 0);
        assert_eq!(view.stats.stars, 0);
        assert_eq!(view.stats.forks, 0);
    }

    #[test]
    fn test_remote_links_lose_control_characters() {
        let snapshot = ProfileSnapshot {
            account: Account {
                blog: Some("evil.example/\u{1b}[2J\u{1b}]0;pwned\u{7}".to_string()),
                html_url: "https://github.com/octocat\u{1b}[0m".to_string(),
                ..account()
            },
            projects: vec![Project {
                html_url: "https://github.com/octocat/x\u{1b}[1m".to_string(),
                ..project("x", 1, None)
            }],
            languages: LanguageUsage::new(),
        };

        let view = DashboardView::build(&snapshot, &now());

        let link = view.profile.link.as_ref().unwrap();
        assert_eq!(link.href, "https://evil.example/[2J]0;pwned");
        assert!(!link.label.chars().any(char::is_control));
        assert_eq!(view.profile.profile_url, "https://github.com/octocat[0m");
        assert_eq!(view.projects[0].url, "https://github.com/octocat/x[1m");
        assert_eq!(view.projects[0].star_count, 1);
    }

    #[test]
    fn test_build_is_idempotent() {
        let snapshot = ProfileSnapshot {
            account: account(),
            projects: vec![
                project("a", 5, Some("Go")),
                project("b", 5, None),
                project("c", 9, Some("Go")),
            ],
            languages: [("Go".to_string(), 10u64), ("C".to_string(), 10)]
                .into_iter()
                .collect(),
        };

        let first = serde_json::to_string(&DashboardView::build(&snapshot, &now())).unwrap();
        let second = serde_json::to_string(&DashboardView::build(&snapshot, &now())).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_project_card_without_language_or_description() {
        let mut bare = project("bare", 0, None);
        bare.description = None;

        let card = ProjectCard::build(&bare);
        assert_eq!(card.description, NO_DESCRIPTION);
        assert_eq!(card.language, None);
        assert_eq!(card.language_color, None);
        assert_eq!(card.stars, "0");
    }

    #[test]
    fn test_error_view_not_found_escapes_identifier() {
        let error = OctoscopeError::NotFound("/users/x".to_string());
        let view = ErrorView::classify(&error, "<img src=x onerror=alert(1)>");

        assert_eq!(view.title, "Account not found");
        assert!(view
            .message
            .contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(!view.message.contains('<'));
    }

    #[test]
    fn test_error_view_rate_limited_and_other() {
        let view = ErrorView::classify(&OctoscopeError::RateLimited, "octocat");
        assert_eq!(view.title, "API rate limit reached");

        let view = ErrorView::classify(&OctoscopeError::Http { status: 502 }, "octocat");
        assert_eq!(view.title, "Failed to fetch data");
        assert!(view.message.ends_with("(HTTP error 502)"));

        let view = ErrorView::classify(
            &OctoscopeError::Transport("dns error: <no such host>".to_string()),
            "octocat",
        );
        assert!(view.message.contains("&lt;no such host&gt;"));
    }
}
