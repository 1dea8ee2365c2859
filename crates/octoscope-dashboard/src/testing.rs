//! Fixtures shared by the unit tests

use chrono::Utc;
use octoscope_core::{Account, DashboardView, ProfileSnapshot, Project, ProjectOwner};

pub fn sample_account() -> Account {
    Account {
        login: "octocat".to_string(),
        name: Some("The Octocat".to_string()),
        avatar_url: "https://avatars.example/u/583231".to_string(),
        html_url: "https://github.com/octocat".to_string(),
        bio: Some("Mascot & tester".to_string()),
        location: Some("San Francisco".to_string()),
        blog: Some("github.blog".to_string()),
        created_at: "2011-01-25T18:44:36Z".parse().unwrap(),
        public_repos: 8,
        followers: 12_345,
    }
}

pub fn sample_projects() -> Vec<Project> {
    (0..8u64)
        .map(|i| Project {
            owner: ProjectOwner {
                login: "octocat".to_string(),
            },
            name: format!("project-{}", i),
            description: (i % 2 == 0).then(|| format!("Project number {}", i)),
            language: Some(if i % 3 == 0 { "Shell" } else { "Rust" }.to_string()),
            stars: i * 250,
            forks: i * 10,
            pushed_at: Some(Utc::now()),
            html_url: format!("https://github.com/octocat/project-{}", i),
        })
        .collect()
}

pub fn sample_view() -> DashboardView {
    let snapshot = ProfileSnapshot {
        account: sample_account(),
        projects: sample_projects(),
        languages: [("Rust".to_string(), 7_000u64), ("Shell".to_string(), 3_000)]
            .into_iter()
            .collect(),
    };
    DashboardView::build(&snapshot, &Utc::now())
}
